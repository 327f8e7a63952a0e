//! # Materials Catalog
//!
//! Panel materials and their default thicknesses, in inches.
//!
//! Each material has two defaults: the thickness generally used for cabinet
//! panels, and the bottom panel thickness(es) used when legs will be
//! attached. Leg screws need more than 3/4" to grab, so the legs default is
//! either a thicker single panel or two stacked panels.
//!
//! The defaults are only defaults: material lots vary (gray melamine is
//! often 0.74"), so a [`Run`](crate::run::Run) may override any of them.
//!
//! ## Example
//!
//! ```rust
//! use cabinet_core::materials::MaterialCatalog;
//!
//! let catalog = MaterialCatalog::standard();
//! let ply = catalog.get("Standard Plywood").unwrap();
//! assert_eq!(ply.thickness, 0.74);
//! assert_eq!(ply.legs_bottom_thicknesses, vec![0.74, 0.74]);
//! assert!(catalog.get("Oak").is_err());
//! ```

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{CabError, CabResult};

/// Primary material used when none is specified
pub const PRIMARY_MATERIAL_DEFAULT: &str = "Standard Plywood";

/// Door material used when none is specified
pub const DOOR_MATERIAL_DEFAULT: &str = "Melamine";

static STANDARD_CATALOG: Lazy<MaterialCatalog> = Lazy::new(|| MaterialCatalog {
    materials: vec![
        MaterialSpec::new("Standard Plywood", "PLY", 0.74, vec![0.74, 0.74]),
        MaterialSpec::new("Marine-Grade Plywood", "MarPLY", 0.75, vec![0.75, 0.75]),
        MaterialSpec::new("Melamine", "MEL", 0.76, vec![1.0]),
    ],
});

/// One panel material and its default thicknesses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialSpec {
    /// Full name, e.g. "Standard Plywood"
    pub name: String,

    /// Short name for narrow displays, e.g. "PLY"
    pub abbrev: String,

    /// Default panel thickness (in)
    pub thickness: f64,

    /// Default bottom panel thicknesses when the run has legs (in).
    /// Two entries means the bottom is two stacked panels.
    pub legs_bottom_thicknesses: Vec<f64>,
}

impl MaterialSpec {
    fn new(name: &str, abbrev: &str, thickness: f64, legs_bottom_thicknesses: Vec<f64>) -> Self {
        MaterialSpec {
            name: name.to_string(),
            abbrev: abbrev.to_string(),
            thickness,
            legs_bottom_thicknesses,
        }
    }
}

/// Read-only table of known materials, in selection order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialCatalog {
    materials: Vec<MaterialSpec>,
}

impl MaterialCatalog {
    /// The built-in, process-wide catalog
    pub fn standard() -> &'static MaterialCatalog {
        &STANDARD_CATALOG
    }

    /// Look up a material by its exact name.
    pub fn get(&self, name: &str) -> CabResult<&MaterialSpec> {
        self.materials
            .iter()
            .find(|m| m.name == name)
            .ok_or_else(|| CabError::material_not_found(name))
    }

    /// Material names, in selection order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.materials.iter().map(|m| m.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &MaterialSpec> {
        self.materials.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_order() {
        let names: Vec<_> = MaterialCatalog::standard().names().collect();
        assert_eq!(names, vec!["Standard Plywood", "Marine-Grade Plywood", "Melamine"]);
    }

    #[test]
    fn test_defaults_exist() {
        let catalog = MaterialCatalog::standard();
        assert!(catalog.get(PRIMARY_MATERIAL_DEFAULT).is_ok());
        assert_eq!(catalog.get(DOOR_MATERIAL_DEFAULT).unwrap().thickness, 0.76);
    }

    #[test]
    fn test_thicknesses_are_valid() {
        for m in MaterialCatalog::standard().iter() {
            assert!(m.thickness > 0.0, "{} thickness", m.name);
            let n = m.legs_bottom_thicknesses.len();
            assert!(n == 1 || n == 2, "{} has {} bottom panels", m.name, n);
            assert!(m.legs_bottom_thicknesses.iter().all(|t| *t > 0.0));
        }
    }

    #[test]
    fn test_abbreviations() {
        let catalog = MaterialCatalog::standard();
        assert_eq!(catalog.get("Marine-Grade Plywood").unwrap().abbrev, "MarPLY");
        assert_eq!(catalog.get("Melamine").unwrap().abbrev, "MEL");
    }

    #[test]
    fn test_unknown_material() {
        let err = MaterialCatalog::standard().get("standard plywood").unwrap_err();
        assert_eq!(err, CabError::material_not_found("standard plywood"));
    }
}
