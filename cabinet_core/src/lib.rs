//! # cabinet_core - Cabinet Run Sizing Engine
//!
//! `cabinet_core` turns a wall opening's dimensions into a buildable cut list
//! for a run (bank) of Euro-style cabinets, and renders measurements in the
//! fractional notation used on the shop floor.
//!
//! ## Design Philosophy
//!
//! - **Derived, not stored**: a [`Run`] keeps only its inputs; every count
//!   and dimension is recomputed from them on access
//! - **Immutable values**: changing a run returns a new run
//! - **JSON-First**: inputs, cut lists and errors implement Serialize
//! - **Rich Errors**: structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use cabinet_core::{dimstr, Ends, Run, RunInput};
//!
//! let run = Run::new(RunInput::new(183.0, 28.0, 24.0).with_fillers(Ends::Left)).unwrap();
//! assert_eq!(run.num_cabinets(), 6);
//!
//! let door_width = run.door_width().unwrap();
//! assert_eq!(dimstr(door_width).unwrap(), "14 13/16");
//! ```
//!
//! ## Modules
//!
//! - [`run`] - Run inputs, cabinet/filler sizing and panel dimensions
//! - [`dimension`] - Fractional inch strings with strong/shy marks
//! - [`materials`] - Material catalog and default thicknesses
//! - [`ends`] - Which ends of a run get fillers
//! - [`job`] - Plain-text job specification
//! - [`errors`] - Structured error types

pub mod dimension;
pub mod ends;
pub mod errors;
pub mod job;
pub mod materials;
pub mod run;

// Re-export commonly used types at crate root for convenience
pub use dimension::{dimstr, dimstr_col, dimstr_nths, sdalign, thickness_str};
pub use ends::Ends;
pub use errors::{CabError, CabResult, ErrorKind};
pub use job::Job;
pub use materials::{MaterialCatalog, MaterialSpec};
pub use run::{CutList, Part, PartKind, Run, RunInput};
