//! # Job Report
//!
//! A [`Job`] is a one-off cabinet job: a name (its identifier), an optional
//! description, and the [`Run`] of cabinets to build. It renders the run as
//! the plain-text specification printed for the shop:
//!
//! ```text
//! -----------------------------------------------------------------
//! Job Name: Left Filler Job
//! Total Wall Space: 183"
//! -----------------------------------------------------------------
//! Overview:
//!
//! 6 cabinets measuring 30" totalling 180", with a 3" filler on the left.
//! ...
//! Parts List:
//!
//! Back Panels:      6  @  30"         x  28"         x  3/4"
//! ...
//! ```
//!
//! Every line is built from the run's raw derived values; the fraction
//! strings are for display only.

use serde::Serialize;

use crate::dimension::{dimstr, dimstr_col, thickness_str};
use crate::ends::Ends;
use crate::errors::{CabError, CabResult};
use crate::run::{Part, PartKind, Run};

/// Width of the dashed separator lines, and of the printed report
pub const REPORT_WIDTH: usize = 65;

/// A named job with a single run of cabinets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Job {
    name: String,
    description: String,
    run: Run,
}

impl Job {
    pub fn new(name: impl Into<String>, run: Run) -> Self {
        Job {
            name: name.into(),
            description: String::new(),
            run,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn run(&self) -> &Run {
        &self.run
    }

    /// Job name, description (when given) and total wall space.
    pub fn header(&self) -> Vec<String> {
        let mut lines = vec![format!("Job Name: {}", self.name)];
        if !self.description.is_empty() {
            lines.push(format!("Description: {}", self.description));
        }
        lines.push(format!("Total Wall Space: {}\"", self.run.fullwidth()));
        lines
    }

    /// One-sentence summary of the cabinets, fillers and legs.
    pub fn summary_line(&self) -> CabResult<Vec<String>> {
        let run = &self.run;
        let num_cabinets = run.num_cabinets();
        let cabinet_width = run.cabinet_width()?;
        let mut summary = format!(
            "{} {} measuring {}\" totalling {}\"",
            num_cabinets,
            if num_cabinets == 1 { "cabinet" } else { "cabinets" },
            dimstr(cabinet_width)?,
            dimstr(cabinet_width * num_cabinets as f64)?,
        );

        match run.fillers() {
            Ends::Neither => {
                summary.push_str(
                    ", with finished end panels on left and right. No filler panels required.",
                );
            }
            Ends::Left => {
                summary.push_str(&format!(", with a {}\" filler on the left.", self.filler_str()?));
            }
            Ends::Right => {
                summary.push_str(&format!(", with a {}\" filler on the right.", self.filler_str()?));
            }
            Ends::Both => {
                summary.push_str(&format!(", with two (2) {}\" fillers.", self.filler_str()?));
            }
        }
        if run.has_legs() {
            summary.push_str(" To be mounted on legs.");
        }
        Ok(vec![summary])
    }

    /// Number of cabinets and single cabinet width.
    pub fn cabinet_info(&self) -> CabResult<Vec<String>> {
        Ok(vec![
            format!("Number of cabinets needed:  {}", self.run.num_cabinets()),
            format!("Single cabinet width:  {}\"", dimstr(self.run.cabinet_width()?)?),
        ])
    }

    /// Materials and their nominal thicknesses.
    pub fn material_info(&self) -> CabResult<Vec<String>> {
        let run = &self.run;
        let mut lines = vec![
            format!(
                "Primary Material:  {}\" {}",
                thickness_str(run.primary_thickness())?,
                run.primary_material()
            ),
            format!(
                "Door Material:  {}\" {}",
                thickness_str(run.door_thickness())?,
                run.door_material()
            ),
        ];
        if run.has_legs() {
            let line = if run.bottom_stacked() {
                let nominal = run
                    .bottom_panel_thicknesses()
                    .iter()
                    .map(|t| thickness_str(*t).map(|s| format!("{}\"", s)))
                    .collect::<CabResult<Vec<_>>>()?;
                let thicknesses = if all_equal(&nominal) {
                    nominal[0].clone()
                } else {
                    nominal.join(" + ")
                };
                format!(
                    "Bottom Material:  {} {}, stacked x {}",
                    thicknesses,
                    run.primary_material(),
                    run.bottom_panels_per_cabinet()
                )
            } else {
                format!(
                    "Bottom Material:  {}\" {}",
                    thickness_str(run.bottom_thickness())?,
                    run.primary_material()
                )
            };
            lines.push(line);
        }
        Ok(lines)
    }

    /// Summary, cabinet info and material info, separated by blank lines.
    pub fn overview(&self) -> CabResult<Vec<String>> {
        let mut lines = self.summary_line()?;
        lines.push(String::new());
        lines.extend(self.cabinet_info()?);
        lines.push(String::new());
        lines.extend(self.material_info()?);
        Ok(lines)
    }

    /// One aligned row per kind of panel, e.g.
    /// `Doors:           12  @  14 13/16"   x  27 1/2"     x  3/4"`.
    pub fn parts_list(&self) -> CabResult<Vec<String>> {
        let cut_list = self.run.cut_list()?;
        cut_list.parts.iter().map(|part| self.parts_row(part)).collect()
    }

    /// The complete report: header, overview and parts list.
    pub fn specification(&self) -> CabResult<Vec<String>> {
        let separator = "-".repeat(REPORT_WIDTH);
        let mut lines = vec![separator.clone()];
        lines.extend(self.header());
        lines.push(separator.clone());
        lines.push("Overview:".to_string());
        lines.push(String::new());
        lines.extend(self.overview()?);
        lines.push(separator.clone());
        lines.push("Parts List:".to_string());
        lines.push(String::new());
        lines.extend(self.parts_list()?);
        lines.push(separator);
        Ok(lines)
    }

    fn parts_row(&self, part: &Part) -> CabResult<String> {
        let thickness = match part.kind {
            PartKind::Bottom => self.bottom_panel_thickness_str()?,
            _ => thickness_str(part.thickness)?,
        };
        Ok(format!(
            "{:<17}{:>2}  @  {:<10}  x  {:<10}  x  {}\"",
            format!("{}:", part.kind.label()),
            part.count,
            format!("{}\"", dimstr_col(part.width)?),
            format!("{}\"", dimstr_col(part.length)?),
            thickness,
        ))
    }

    /// Stacked bottoms of one nominal thickness are listed per panel.
    fn bottom_panel_thickness_str(&self) -> CabResult<String> {
        let run = &self.run;
        if run.bottom_stacked() {
            let nominal = run
                .bottom_panel_thicknesses()
                .iter()
                .map(|t| thickness_str(*t))
                .collect::<CabResult<Vec<_>>>()?;
            if all_equal(&nominal) {
                return Ok(nominal[0].clone());
            }
        }
        thickness_str(run.bottom_thickness())
    }

    fn filler_str(&self) -> CabResult<String> {
        let width = self
            .run
            .filler_width()?
            .ok_or_else(|| CabError::internal("run has fillers but no filler width"))?;
        dimstr(width)
    }
}

fn all_equal<T: PartialEq>(items: &[T]) -> bool {
    items.windows(2).all(|pair| pair[0] == pair[1])
}
