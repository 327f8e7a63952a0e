//! # Cabinet Run Sizing
//!
//! A [`Run`] holds every specification for a single run, or bank, of
//! Euro-style cabinets spanning a wall opening. From the wall width it
//! derives the number of cabinets, the width of each cabinet, the filler
//! width (if fillers are used), and the size of every panel:
//!
//! - full back panels
//! - bottom panels (possibly stacked, for legs)
//! - side panels
//! - top nailers
//! - doors (two per cabinet)
//! - fillers
//!
//! Only the inputs are stored. Everything else is recomputed on each access.
//! A `Run` is an immutable value: the `with_*` methods return a new run.
//!
//! All measurements are in inches.
//!
//! ## Example
//!
//! ```rust
//! use cabinet_core::ends::Ends;
//! use cabinet_core::run::{Run, RunInput};
//!
//! let run = Run::new(RunInput::new(183.0, 28.0, 24.0).with_fillers(Ends::Left)).unwrap();
//! assert_eq!(run.num_cabinets(), 6);
//! assert_eq!(run.cabinet_width().unwrap(), 30.0);
//! assert_eq!(run.filler_width().unwrap(), Some(3.0));
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::ends::Ends;
use crate::errors::{CabError, CabResult};
use crate::materials::{MaterialCatalog, DOOR_MATERIAL_DEFAULT, PRIMARY_MATERIAL_DEFAULT};

/// Widest cabinet the shop builds
pub const MAX_CABINET_WIDTH: f64 = 36.0;

/// Narrowest allowed filler strip
pub const MIN_FILLER_WIDTH: f64 = 1.0;

/// Widest allowed filler strip
pub const MAX_FILLER_WIDTH: f64 = 4.0;

/// Gap between the back of a door and the front of the cabinet, due to the hinges
pub const DOOR_HINGE_GAP: f64 = 0.125;

/// Every cabinet has exactly two doors.
pub const DOORS_PER_CABINET: usize = 2;

/// Finest cabinet width adjustment tried while fitting fillers
pub const MIN_WIDTH_STEP: f64 = 1.0 / 64.0;

pub const TOP_NAILER_DEPTH_DEFAULT: f64 = 4.0;
pub const DOOR_TOP_GAP_DEFAULT: f64 = 0.5;
pub const DOOR_SIDE_GAP_DEFAULT: f64 = 0.125;

/// [`Run::with_bottom_thickness`] accepts values strictly between these.
pub const BOTTOM_THICKNESS_MIN: f64 = 0.375;
pub const BOTTOM_THICKNESS_MAX: f64 = 2.125;

/// Input parameters for a run of cabinets.
///
/// Optional thicknesses default to the catalog values for the chosen
/// materials. Missing JSON fields take the [`Default`] values.
///
/// ## JSON Example
///
/// ```json
/// {
///   "fullwidth": 183.0,
///   "height": 28.0,
///   "depth": 24.0,
///   "fillers": "LEFT",
///   "primary_material": "Standard Plywood",
///   "door_material": "Melamine",
///   "has_legs": false
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunInput {
    /// Full wall width for the entire run of cabinets
    pub fullwidth: f64,

    /// Distance from the toe kick to the top of the cabinets
    pub height: f64,

    /// Distance from the front of the doors to the wall
    pub depth: f64,

    /// End(s) of the run that get filler panels
    pub fillers: Ends,

    /// Primary building material name (catalog key)
    pub primary_material: String,

    /// Thickness of most panels; catalog default when `None`
    pub primary_thickness: Option<f64>,

    /// Door material name (catalog key)
    pub door_material: String,

    /// Door thickness; catalog default when `None`
    pub door_thickness: Option<f64>,

    /// Bottom panel thicknesses, top to bottom. When `None`, the catalog's
    /// legs thicknesses if `has_legs`, else one primary-thickness panel.
    pub bottom_panel_thicknesses: Option<Vec<f64>>,

    /// Whether the cabinets stand on legs
    pub has_legs: bool,

    /// Front-to-back depth of the top nailers
    pub top_nailer_depth: f64,

    /// How much shorter the doors are than the cabinet, usually 1/2" or 3/8"
    pub door_top_gap: f64,

    /// Space between the left edge of the cabinet and the left door
    pub door_side_gap_left: f64,

    /// Space between the two doors
    pub door_side_gap_middle: f64,

    /// Space between the right door and the right edge of the cabinet
    pub door_side_gap_right: f64,
}

impl Default for RunInput {
    fn default() -> Self {
        RunInput {
            fullwidth: 0.0,
            height: 0.0,
            depth: 0.0,
            fillers: Ends::Neither,
            primary_material: PRIMARY_MATERIAL_DEFAULT.to_string(),
            primary_thickness: None,
            door_material: DOOR_MATERIAL_DEFAULT.to_string(),
            door_thickness: None,
            bottom_panel_thicknesses: None,
            has_legs: false,
            top_nailer_depth: TOP_NAILER_DEPTH_DEFAULT,
            door_top_gap: DOOR_TOP_GAP_DEFAULT,
            door_side_gap_left: DOOR_SIDE_GAP_DEFAULT,
            door_side_gap_middle: DOOR_SIDE_GAP_DEFAULT,
            door_side_gap_right: DOOR_SIDE_GAP_DEFAULT,
        }
    }
}

impl RunInput {
    /// Input with the given wall dimensions and every other value defaulted.
    pub fn new(fullwidth: f64, height: f64, depth: f64) -> Self {
        RunInput {
            fullwidth,
            height,
            depth,
            ..RunInput::default()
        }
    }

    pub fn with_fillers(mut self, fillers: Ends) -> Self {
        self.fillers = fillers;
        self
    }

    pub fn with_legs(mut self, has_legs: bool) -> Self {
        self.has_legs = has_legs;
        self
    }

    pub fn with_primary_material(mut self, name: impl Into<String>, thickness: Option<f64>) -> Self {
        self.primary_material = name.into();
        self.primary_thickness = thickness;
        self
    }

    pub fn with_door_material(mut self, name: impl Into<String>, thickness: Option<f64>) -> Self {
        self.door_material = name.into();
        self.door_thickness = thickness;
        self
    }

    pub fn with_bottom_panel_thicknesses(mut self, thicknesses: Vec<f64>) -> Self {
        self.bottom_panel_thicknesses = Some(thicknesses);
        self
    }
}

/// One run (bank) of cabinets, validated and ready for sizing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Run {
    fullwidth: f64,
    height: f64,
    depth: f64,
    fillers: Ends,
    primary_material: String,
    primary_thickness: f64,
    door_material: String,
    door_thickness: f64,
    has_legs: bool,
    bottom_panel_thicknesses: Vec<f64>,
    top_nailer_depth: f64,
    door_top_gap: f64,
    door_side_gap_left: f64,
    door_side_gap_middle: f64,
    door_side_gap_right: f64,
    /// Catalog legs bottoms for the primary material, for [`Run::with_legs`]
    #[serde(skip)]
    legs_bottom_thicknesses: Vec<f64>,
}

impl Run {
    /// Validate the input and resolve material defaults.
    ///
    /// # Errors
    ///
    /// * `CabError::InvalidInput` for a non-positive or non-finite dimension,
    ///   thickness or gap, or a bottom list that is not 1 or 2 panels
    /// * `CabError::MaterialNotFound` for a material missing from the catalog
    pub fn new(input: RunInput) -> CabResult<Run> {
        let catalog = MaterialCatalog::standard();
        let primary = catalog.get(&input.primary_material)?;
        let door = catalog.get(&input.door_material)?;

        let primary_thickness = positive("primary_thickness", input.primary_thickness.unwrap_or(primary.thickness))?;
        let door_thickness = positive("door_thickness", input.door_thickness.unwrap_or(door.thickness))?;

        let bottom_panel_thicknesses = match input.bottom_panel_thicknesses {
            Some(thicknesses) => thicknesses,
            None if input.has_legs => primary.legs_bottom_thicknesses.clone(),
            None => vec![primary_thickness],
        };

        let run = Run {
            fullwidth: positive("fullwidth", input.fullwidth)?,
            height: positive("height", input.height)?,
            depth: positive("depth", input.depth)?,
            fillers: input.fillers,
            primary_material: primary.name.clone(),
            primary_thickness,
            door_material: door.name.clone(),
            door_thickness,
            has_legs: input.has_legs,
            bottom_panel_thicknesses: validate_bottoms(bottom_panel_thicknesses)?,
            top_nailer_depth: positive("top_nailer_depth", input.top_nailer_depth)?,
            door_top_gap: non_negative("door_top_gap", input.door_top_gap)?,
            door_side_gap_left: non_negative("door_side_gap_left", input.door_side_gap_left)?,
            door_side_gap_middle: non_negative("door_side_gap_middle", input.door_side_gap_middle)?,
            door_side_gap_right: non_negative("door_side_gap_right", input.door_side_gap_right)?,
            legs_bottom_thicknesses: primary.legs_bottom_thicknesses.clone(),
        };
        debug!(
            fullwidth = run.fullwidth,
            fillers = %run.fillers,
            primary = %run.primary_material,
            has_legs = run.has_legs,
            "run created"
        );
        Ok(run)
    }

    /// Shorthand for a run with default materials and no fillers or legs.
    pub fn from_dimensions(fullwidth: f64, height: f64, depth: f64) -> CabResult<Run> {
        Run::new(RunInput::new(fullwidth, height, depth))
    }

    /// The inputs this run was built from, with thicknesses made explicit.
    pub fn to_input(&self) -> RunInput {
        RunInput {
            fullwidth: self.fullwidth,
            height: self.height,
            depth: self.depth,
            fillers: self.fillers,
            primary_material: self.primary_material.clone(),
            primary_thickness: Some(self.primary_thickness),
            door_material: self.door_material.clone(),
            door_thickness: Some(self.door_thickness),
            bottom_panel_thicknesses: Some(self.bottom_panel_thicknesses.clone()),
            has_legs: self.has_legs,
            top_nailer_depth: self.top_nailer_depth,
            door_top_gap: self.door_top_gap,
            door_side_gap_left: self.door_side_gap_left,
            door_side_gap_middle: self.door_side_gap_middle,
            door_side_gap_right: self.door_side_gap_right,
        }
    }

    // ------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------

    /// This run with legs added or removed.
    ///
    /// Changing the legs setting resets the bottom panels: adding legs
    /// needs a thicker bottom (the catalog's legs thicknesses for the
    /// primary material, possibly stacked), removing them goes back to a
    /// single primary-thickness panel. Setting the current value again
    /// changes nothing.
    pub fn with_legs(&self, has_legs: bool) -> Run {
        let mut run = self.clone();
        if run.has_legs != has_legs {
            run.has_legs = has_legs;
            run.bottom_panel_thicknesses = if has_legs {
                self.legs_bottom_thicknesses.clone()
            } else {
                vec![self.primary_thickness]
            };
        }
        run
    }

    /// This run with explicit bottom panel thicknesses. Leaves `has_legs` alone.
    pub fn with_bottom_panel_thicknesses(&self, thicknesses: Vec<f64>) -> CabResult<Run> {
        let mut run = self.clone();
        run.bottom_panel_thicknesses = validate_bottoms(thicknesses)?;
        Ok(run)
    }

    /// This run with a bottom of roughly `value` combined thickness, built
    /// from standard stock:
    ///
    /// | `value`          | bottom panels  |
    /// |------------------|----------------|
    /// | (0.375, 1.375)   | `[value]`      |
    /// | [1.375, 1.625)   | `[0.75, 0.75]` |
    /// | [1.625, 1.875)   | `[0.75, 1.0]`  |
    /// | [1.875, 2.125)   | `[1.0, 1.0]`   |
    ///
    /// # Errors
    ///
    /// * `CabError::BottomThicknessOutOfRange` for anything else
    pub fn with_bottom_thickness(&self, value: f64) -> CabResult<Run> {
        if !(value > BOTTOM_THICKNESS_MIN && value < BOTTOM_THICKNESS_MAX) {
            return Err(CabError::BottomThicknessOutOfRange { value });
        }
        let thicknesses = if value < 1.375 {
            vec![value]
        } else if value < 1.625 {
            vec![0.75, 0.75]
        } else if value < 1.875 {
            vec![0.75, 1.0]
        } else {
            vec![1.0, 1.0]
        };
        self.with_bottom_panel_thicknesses(thicknesses)
    }

    /// This run resized to a different wall width.
    pub fn with_fullwidth(&self, fullwidth: f64) -> CabResult<Run> {
        let mut run = self.clone();
        run.fullwidth = positive("fullwidth", fullwidth)?;
        Ok(run)
    }

    // ------------------------------------------------------------------
    // Inputs
    // ------------------------------------------------------------------

    pub fn fullwidth(&self) -> f64 {
        self.fullwidth
    }

    pub fn cabinet_height(&self) -> f64 {
        self.height
    }

    pub fn cabinet_depth(&self) -> f64 {
        self.depth
    }

    pub fn fillers(&self) -> Ends {
        self.fillers
    }

    pub fn primary_material(&self) -> &str {
        &self.primary_material
    }

    pub fn primary_thickness(&self) -> f64 {
        self.primary_thickness
    }

    pub fn door_material(&self) -> &str {
        &self.door_material
    }

    pub fn door_thickness(&self) -> f64 {
        self.door_thickness
    }

    pub fn has_legs(&self) -> bool {
        self.has_legs
    }

    /// Bottom panel thicknesses, top to bottom
    pub fn bottom_panel_thicknesses(&self) -> &[f64] {
        &self.bottom_panel_thicknesses
    }

    pub fn top_nailer_depth(&self) -> f64 {
        self.top_nailer_depth
    }

    pub fn door_top_gap(&self) -> f64 {
        self.door_top_gap
    }

    pub fn door_side_gap_left(&self) -> f64 {
        self.door_side_gap_left
    }

    pub fn door_side_gap_middle(&self) -> f64 {
        self.door_side_gap_middle
    }

    pub fn door_side_gap_right(&self) -> f64 {
        self.door_side_gap_right
    }

    // ------------------------------------------------------------------
    // Cabinets and fillers
    // ------------------------------------------------------------------

    /// Fewest cabinets that fill the wall without exceeding [`MAX_CABINET_WIDTH`].
    pub fn num_cabinets(&self) -> usize {
        (self.fullwidth / MAX_CABINET_WIDTH).ceil() as usize
    }

    pub fn num_fillers(&self) -> usize {
        self.fillers.num_fillers()
    }

    /// Width of each cabinet in the run.
    ///
    /// Without fillers the cabinets split the wall evenly. With fillers the
    /// cabinets get an easy-to-cut width (whole inches if possible, else the
    /// nearest halving step) that keeps each filler within
    /// [`MIN_FILLER_WIDTH`]..=[`MAX_FILLER_WIDTH`].
    ///
    /// # Errors
    ///
    /// * `CabError::NoFillerFit` when no such width exists
    pub fn cabinet_width(&self) -> CabResult<f64> {
        match self.num_fillers() {
            0 => Ok(self.fullwidth / self.num_cabinets() as f64),
            n => fit_cabinet_width(self.fullwidth, self.num_cabinets(), n),
        }
    }

    /// Wall width left over beside the cabinets, taken up by fillers.
    pub fn extra_width(&self) -> CabResult<f64> {
        Ok(self.fullwidth - self.num_cabinets() as f64 * self.cabinet_width()?)
    }

    /// Width of each filler; `None` without fillers.
    pub fn filler_width(&self) -> CabResult<Option<f64>> {
        match self.num_fillers() {
            0 => Ok(None),
            n => Ok(Some(self.extra_width()? / n as f64)),
        }
    }

    pub fn filler_height(&self) -> Option<f64> {
        self.has_fillers().then_some(self.height)
    }

    pub fn filler_thickness(&self) -> Option<f64> {
        self.has_fillers().then_some(self.primary_thickness)
    }

    fn has_fillers(&self) -> bool {
        self.num_fillers() > 0
    }

    // ------------------------------------------------------------------
    // Back panels
    // ------------------------------------------------------------------

    pub fn num_back_panels(&self) -> usize {
        self.num_cabinets()
    }

    /// Full back panels cover the full width of a cabinet, including sides.
    pub fn back_width(&self) -> CabResult<f64> {
        self.cabinet_width()
    }

    /// Full back panels cover the full height of a cabinet, including top.
    pub fn back_height(&self) -> f64 {
        self.height
    }

    pub fn back_thickness(&self) -> f64 {
        self.primary_thickness
    }

    // ------------------------------------------------------------------
    // Side panels
    // ------------------------------------------------------------------

    pub fn num_side_panels(&self) -> usize {
        2 * self.num_cabinets()
    }

    /// Cabinet depth less the door, the hinge gap and the back panel.
    pub fn side_depth(&self) -> f64 {
        self.depth - (self.door_thickness + DOOR_HINGE_GAP) - self.back_thickness()
    }

    pub fn side_height(&self) -> f64 {
        self.height
    }

    pub fn side_thickness(&self) -> f64 {
        self.primary_thickness
    }

    // ------------------------------------------------------------------
    // Bottom panels
    // ------------------------------------------------------------------

    pub fn bottom_panels_per_cabinet(&self) -> usize {
        self.bottom_panel_thicknesses.len()
    }

    pub fn bottom_stacked(&self) -> bool {
        self.bottom_panels_per_cabinet() > 1
    }

    pub fn num_bottom_panels(&self) -> usize {
        self.bottom_panels_per_cabinet() * self.num_cabinets()
    }

    /// Combined thickness of a cabinet bottom, all stacked panels included.
    pub fn bottom_thickness(&self) -> f64 {
        self.bottom_panel_thicknesses.iter().sum()
    }

    /// Bottoms fit between the two sides.
    pub fn bottom_width(&self) -> CabResult<f64> {
        Ok(self.cabinet_width()? - 2.0 * self.side_thickness())
    }

    pub fn bottom_depth(&self) -> f64 {
        self.side_depth()
    }

    // ------------------------------------------------------------------
    // Top nailers
    // ------------------------------------------------------------------

    pub fn num_top_nailers(&self) -> usize {
        2 * self.num_cabinets()
    }

    pub fn top_nailer_width(&self) -> CabResult<f64> {
        self.bottom_width()
    }

    pub fn top_nailer_thickness(&self) -> f64 {
        self.primary_thickness
    }

    // ------------------------------------------------------------------
    // Doors
    // ------------------------------------------------------------------

    pub fn num_doors(&self) -> usize {
        DOORS_PER_CABINET * self.num_cabinets()
    }

    /// Total space left, right and between the doors of one cabinet
    pub fn door_side_gap_total(&self) -> f64 {
        self.door_side_gap_left + self.door_side_gap_middle + self.door_side_gap_right
    }

    pub fn door_width(&self) -> CabResult<f64> {
        Ok((self.cabinet_width()? - self.door_side_gap_total()) / DOORS_PER_CABINET as f64)
    }

    pub fn door_height(&self) -> f64 {
        self.height - self.door_top_gap
    }

    // ------------------------------------------------------------------
    // Snapshot
    // ------------------------------------------------------------------

    /// Every derived value of this run, computed once.
    #[tracing::instrument(level = "debug", skip_all, fields(fullwidth = self.fullwidth))]
    pub fn cut_list(&self) -> CabResult<CutList> {
        let cabinet_width = self.cabinet_width()?;
        let bottom_width = self.bottom_width()?;
        let filler_width = self.filler_width()?;

        let mut parts = vec![
            Part {
                kind: PartKind::Back,
                count: self.num_back_panels(),
                width: cabinet_width,
                length: self.back_height(),
                thickness: self.back_thickness(),
            },
            Part {
                kind: PartKind::Bottom,
                count: self.num_bottom_panels(),
                width: bottom_width,
                length: self.bottom_depth(),
                thickness: self.bottom_thickness(),
            },
            Part {
                kind: PartKind::Side,
                count: self.num_side_panels(),
                width: self.side_depth(),
                length: self.side_height(),
                thickness: self.side_thickness(),
            },
            Part {
                kind: PartKind::TopNailer,
                count: self.num_top_nailers(),
                width: bottom_width,
                length: self.top_nailer_depth,
                thickness: self.top_nailer_thickness(),
            },
        ];
        if let (Some(width), Some(length), Some(thickness)) =
            (filler_width, self.filler_height(), self.filler_thickness())
        {
            parts.push(Part {
                kind: PartKind::Filler,
                count: self.num_fillers(),
                width,
                length,
                thickness,
            });
        }
        parts.push(Part {
            kind: PartKind::Door,
            count: self.num_doors(),
            width: self.door_width()?,
            length: self.door_height(),
            thickness: self.door_thickness,
        });

        Ok(CutList {
            num_cabinets: self.num_cabinets(),
            cabinet_width,
            cabinet_height: self.height,
            cabinet_depth: self.depth,
            fillers: self.fillers,
            num_fillers: self.num_fillers(),
            extra_width: self.extra_width()?,
            filler_width,
            has_legs: self.has_legs,
            bottom_panel_thicknesses: self.bottom_panel_thicknesses.clone(),
            bottom_stacked: self.bottom_stacked(),
            parts,
        })
    }
}

/// The kinds of panel on a cut list, in cut list order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartKind {
    Back,
    Bottom,
    Side,
    TopNailer,
    Filler,
    Door,
}

impl PartKind {
    /// Heading used on printed parts lists
    pub fn label(&self) -> &'static str {
        match self {
            PartKind::Back => "Back Panels",
            PartKind::Bottom => "Bottom Panels",
            PartKind::Side => "Side Panels",
            PartKind::TopNailer => "Top Nailers",
            PartKind::Filler => "Fillers",
            PartKind::Door => "Doors",
        }
    }
}

/// One line of a cut list: `count` identical panels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub kind: PartKind,

    pub count: usize,

    /// First cut dimension (in): width, or depth for side panels
    pub width: f64,

    /// Second cut dimension (in): height, or depth for bottoms and nailers
    pub length: f64,

    /// Panel thickness (in); combined thickness for stacked bottoms
    pub thickness: f64,
}

/// All derived values for a run.
///
/// ## JSON Example
///
/// ```json
/// {
///   "num_cabinets": 6,
///   "cabinet_width": 30.0,
///   "fillers": "LEFT",
///   "num_fillers": 1,
///   "extra_width": 3.0,
///   "filler_width": 3.0,
///   "parts": [{ "kind": "Back", "count": 6, "width": 30.0, "length": 28.0, "thickness": 0.74 }]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutList {
    pub num_cabinets: usize,
    pub cabinet_width: f64,
    pub cabinet_height: f64,
    pub cabinet_depth: f64,
    pub fillers: Ends,
    pub num_fillers: usize,
    pub extra_width: f64,
    pub filler_width: Option<f64>,
    pub has_legs: bool,
    pub bottom_panel_thicknesses: Vec<f64>,
    pub bottom_stacked: bool,
    pub parts: Vec<Part>,
}

impl CutList {
    /// The cut list line for one kind of part, if present
    pub fn part(&self, kind: PartKind) -> Option<&Part> {
        self.parts.iter().find(|p| p.kind == kind)
    }

    /// Total number of panels to cut
    pub fn total_panels(&self) -> usize {
        self.parts.iter().map(|p| p.count).sum()
    }
}

/// Largest easy-to-cut cabinet width that keeps fillers in range.
///
/// Starts from the whole-inch width `floor(fullwidth / num_cabinets)` and
/// narrows by whole inches until the fillers are wide enough. If they are
/// then too wide, the width grows by successively halved steps until they
/// fit. A step that leaves the fillers too narrow is taken back, and the
/// width is bisected down to [`MIN_WIDTH_STEP`] for the widest cabinets that
/// still leave room for them. The search stops with `NoFillerFit` when the
/// width reaches zero, the step would drop below [`MIN_WIDTH_STEP`], or no
/// width on that grid fits.
fn fit_cabinet_width(fullwidth: f64, num_cabinets: usize, num_fillers: usize) -> CabResult<f64> {
    let cabinets = num_cabinets as f64;
    let fillers = num_fillers as f64;
    let filler_at = |width: f64| (fullwidth - width * cabinets) / fillers;
    let no_fit = || CabError::NoFillerFit {
        fullwidth,
        num_cabinets,
        num_fillers,
        min_filler: MIN_FILLER_WIDTH,
        max_filler: MAX_FILLER_WIDTH,
    };

    let mut width = (fullwidth / cabinets).floor();
    let mut filler = filler_at(width);
    let mut delta = 1.0;

    while filler < MIN_FILLER_WIDTH {
        width -= delta;
        if width <= 0.0 {
            debug!(fullwidth, num_cabinets, num_fillers, "no positive cabinet width fits");
            return Err(no_fit());
        }
        filler = filler_at(width);
        trace!(width, filler, "narrowed cabinets");
    }

    while filler > MAX_FILLER_WIDTH {
        delta /= 2.0;
        if delta < MIN_WIDTH_STEP {
            debug!(fullwidth, num_cabinets, num_fillers, "width step exhausted");
            return Err(no_fit());
        }
        width += delta;
        filler = filler_at(width);
        trace!(width, filler, delta, "widened cabinets");

        if filler < MIN_FILLER_WIDTH {
            // Overshot: back off, then bisect down to the finest step.
            width -= delta;
            let mut step = delta / 2.0;
            while step >= MIN_WIDTH_STEP {
                if filler_at(width + step) >= MIN_FILLER_WIDTH {
                    width += step;
                }
                step /= 2.0;
            }
            filler = filler_at(width);
            trace!(width, filler, "refined after overshoot");
            break;
        }
    }

    if width <= 0.0 || !(MIN_FILLER_WIDTH..=MAX_FILLER_WIDTH).contains(&filler) {
        debug!(width, filler, "filler out of range after search");
        return Err(no_fit());
    }
    debug!(width, filler, "cabinet width fitted");
    Ok(width)
}

fn positive(field: &str, value: f64) -> CabResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(CabError::invalid_input(field, value.to_string(), "Must be a positive number of inches"))
    }
}

fn non_negative(field: &str, value: f64) -> CabResult<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(CabError::invalid_input(field, value.to_string(), "Must be zero or a positive number of inches"))
    }
}

fn validate_bottoms(thicknesses: Vec<f64>) -> CabResult<Vec<f64>> {
    if thicknesses.is_empty() || thicknesses.len() > 2 {
        return Err(CabError::invalid_input(
            "bottom_panel_thicknesses",
            format!("{:?}", thicknesses),
            "A bottom is one panel or two stacked panels",
        ));
    }
    for &t in &thicknesses {
        positive("bottom_panel_thicknesses", t)?;
    }
    Ok(thicknesses)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < TOL
    }

    /// 157.25" wall, default materials, no fillers, no legs
    fn test_run() -> Run {
        Run::from_dimensions(157.25, 28.5, 24.0).unwrap()
    }

    #[test]
    fn test_default_run_sizing() {
        let run = test_run();
        assert_eq!(run.num_cabinets(), 5);
        assert!(close(run.cabinet_width().unwrap(), 31.45));
        assert_eq!(run.back_thickness(), 0.74);
        // 24 - (0.76 + 0.125) - 0.74
        assert!(close(run.side_depth(), 22.375));
        // (31.45 - 3 * 0.125) / 2
        assert!(close(run.door_width().unwrap(), 15.5375));
        assert!(close(run.door_height(), 28.0));
    }

    #[test]
    fn test_material_defaults() {
        let run = test_run();
        assert_eq!(run.primary_material(), "Standard Plywood");
        assert_eq!(run.primary_thickness(), 0.74);
        assert_eq!(run.door_material(), "Melamine");
        assert_eq!(run.door_thickness(), 0.76);
        assert_eq!(run.bottom_panel_thicknesses(), &[0.74]);
        assert!(!run.bottom_stacked());
    }

    #[test]
    fn test_no_fillers() {
        let run = test_run();
        assert_eq!(run.num_fillers(), 0);
        assert_eq!(run.filler_width().unwrap(), None);
        assert_eq!(run.filler_height(), None);
        assert_eq!(run.filler_thickness(), None);
        assert!(close(run.extra_width().unwrap(), 0.0));
    }

    #[test]
    fn test_left_filler() {
        let run = Run::new(RunInput::new(183.0, 28.0, 24.0).with_fillers(Ends::Left)).unwrap();
        assert_eq!(run.num_cabinets(), 6);
        assert_eq!(run.cabinet_width().unwrap(), 30.0);
        assert_eq!(run.filler_width().unwrap(), Some(3.0));
        assert_eq!(run.filler_height(), Some(28.0));
        assert_eq!(run.filler_thickness(), Some(0.74));
    }

    #[test]
    fn test_both_fillers_narrow_cabinets() {
        // 100 / 3 = 33.33, so 33" cabinets leave 0.5" per filler; 32" leaves 2"
        let run = Run::new(RunInput::new(100.0, 30.0, 24.0).with_fillers(Ends::Both)).unwrap();
        assert_eq!(run.num_cabinets(), 3);
        assert_eq!(run.cabinet_width().unwrap(), 32.0);
        assert_eq!(run.filler_width().unwrap(), Some(2.0));
    }

    #[test]
    fn test_wide_filler_halves_step() {
        // 184.5 / 6 = 30.75: 30" cabinets leave a 4.5" filler, 30.5" leaves 1.5"
        let run = Run::new(RunInput::new(184.5, 30.0, 24.0).with_fillers(Ends::Right)).unwrap();
        assert_eq!(run.cabinet_width().unwrap(), 30.5);
        assert_eq!(run.filler_width().unwrap(), Some(1.5));
    }

    #[test]
    fn test_no_filler_fit_is_error() {
        let run = Run::new(RunInput::new(1.5, 30.0, 24.0).with_fillers(Ends::Both)).unwrap();
        let err = run.cabinet_width().unwrap_err();
        assert_eq!(err.error_code(), "NO_FILLER_FIT");
        assert!(run.filler_width().is_err());
        assert!(run.cut_list().is_err());
    }

    #[test]
    fn test_filler_overshoot_backs_off() {
        // 7 cabinets: 31" leaves a 4.125" filler, 31.5" leaves 0.625"
        let run = Run::new(RunInput::new(221.125, 30.0, 24.0).with_fillers(Ends::Left)).unwrap();
        assert_eq!(run.num_cabinets(), 7);
        assert_eq!(run.cabinet_width().unwrap(), 31.4375);
        assert_eq!(run.filler_width().unwrap(), Some(1.0625));
    }

    #[test]
    fn test_filler_overshoot_settles_on_finest_step() {
        // 11 cabinets: 35" leaves 5", 35.5" leaves -0.5"
        let run = Run::new(RunInput::new(390.0, 30.0, 24.0).with_fillers(Ends::Left)).unwrap();
        assert_eq!(run.num_cabinets(), 11);
        assert_eq!(run.cabinet_width().unwrap(), 35.359375);
        assert_eq!(run.filler_width().unwrap(), Some(1.046875));
    }

    #[test]
    fn test_legs_stack_bottoms() {
        let run = test_run().with_legs(true);
        assert!(run.has_legs());
        assert_eq!(run.bottom_panel_thicknesses(), &[0.74, 0.74]);
        assert!(run.bottom_stacked());
        assert_eq!(run.bottom_panels_per_cabinet(), 2);
        assert_eq!(run.num_bottom_panels(), 10);
        assert!(close(run.bottom_thickness(), 1.48));
    }

    #[test]
    fn test_removing_legs_restores_single_bottom() {
        let run = test_run().with_legs(true).with_legs(false);
        assert!(!run.has_legs());
        assert_eq!(run.bottom_panel_thicknesses(), &[0.74]);
    }

    #[test]
    fn test_with_legs_same_value_keeps_bottoms() {
        let run = test_run().with_bottom_panel_thicknesses(vec![1.0]).unwrap();
        assert_eq!(run.with_legs(false).bottom_panel_thicknesses(), &[1.0]);
    }

    #[test]
    fn test_with_legs_leaves_original_untouched() {
        let run = test_run();
        let _legs = run.with_legs(true);
        assert!(!run.has_legs());
        assert_eq!(run.bottom_panel_thicknesses(), &[0.74]);
    }

    #[test]
    fn test_setting_bottoms_does_not_change_legs() {
        let run = test_run().with_bottom_panel_thicknesses(vec![0.75, 0.75]).unwrap();
        assert!(!run.has_legs());
        let run = test_run().with_legs(true).with_bottom_panel_thicknesses(vec![1.0]).unwrap();
        assert!(run.has_legs());
    }

    #[test]
    fn test_melamine_legs_single_thick_bottom() {
        let input = RunInput::new(100.0, 30.0, 24.0)
            .with_primary_material("Melamine", None)
            .with_legs(true);
        let run = Run::new(input).unwrap();
        assert_eq!(run.bottom_panel_thicknesses(), &[1.0]);
        assert!(!run.bottom_stacked());
    }

    #[test]
    fn test_bottom_thickness_quantization() {
        let run = test_run();
        assert_eq!(run.with_bottom_thickness(1.61).unwrap().bottom_panel_thicknesses(), &[0.75, 0.75]);
        assert!(close(run.with_bottom_thickness(1.61).unwrap().bottom_thickness(), 1.5));
        assert_eq!(run.with_bottom_thickness(0.5).unwrap().bottom_panel_thicknesses(), &[0.5]);
        assert_eq!(run.with_bottom_thickness(1.3).unwrap().bottom_panel_thicknesses(), &[1.3]);
        assert_eq!(run.with_bottom_thickness(1.375).unwrap().bottom_panel_thicknesses(), &[0.75, 0.75]);
        assert_eq!(run.with_bottom_thickness(1.7).unwrap().bottom_panel_thicknesses(), &[0.75, 1.0]);
        assert_eq!(run.with_bottom_thickness(2.0).unwrap().bottom_panel_thicknesses(), &[1.0, 1.0]);
    }

    #[test]
    fn test_bottom_thickness_out_of_range() {
        let run = test_run();
        for bad in [2.2, 2.125, 0.375, 0.1, -1.0, f64::NAN] {
            let err = run.with_bottom_thickness(bad).unwrap_err();
            assert_eq!(err.error_code(), "BOTTOM_THICKNESS_OUT_OF_RANGE");
        }
    }

    #[test]
    fn test_panel_counts() {
        let run = test_run();
        assert_eq!(run.num_back_panels(), 5);
        assert_eq!(run.num_side_panels(), 10);
        assert_eq!(run.num_top_nailers(), 10);
        assert_eq!(run.num_doors(), 10);
        assert_eq!(run.num_bottom_panels(), 5);
    }

    #[test]
    fn test_bottom_and_nailer_width() {
        let run = test_run();
        assert!(close(run.bottom_width().unwrap(), 31.45 - 1.48));
        assert_eq!(run.top_nailer_width().unwrap(), run.bottom_width().unwrap());
        assert_eq!(run.top_nailer_depth(), 4.0);
        assert_eq!(run.bottom_depth(), run.side_depth());
    }

    #[test]
    fn test_unknown_material() {
        let input = RunInput::new(100.0, 30.0, 24.0).with_door_material("Walnut", None);
        assert_eq!(Run::new(input).unwrap_err(), CabError::material_not_found("Walnut"));
    }

    #[test]
    fn test_invalid_dimensions() {
        assert!(Run::from_dimensions(0.0, 30.0, 24.0).is_err());
        assert!(Run::from_dimensions(100.0, -1.0, 24.0).is_err());
        assert!(Run::from_dimensions(100.0, 30.0, f64::NAN).is_err());
        assert!(test_run().with_fullwidth(-3.0).is_err());
    }

    #[test]
    fn test_too_many_bottoms() {
        let input = RunInput::new(100.0, 30.0, 24.0).with_bottom_panel_thicknesses(vec![0.5, 0.5, 0.5]);
        assert_eq!(Run::new(input).unwrap_err().error_code(), "INVALID_INPUT");
        assert!(test_run().with_bottom_panel_thicknesses(vec![]).is_err());
    }

    #[test]
    fn test_with_fullwidth() {
        let run = test_run().with_fullwidth(183.0).unwrap();
        assert_eq!(run.num_cabinets(), 6);
        assert!(close(run.cabinet_width().unwrap(), 30.5));
    }

    #[test]
    fn test_to_input_roundtrip() {
        let run = test_run().with_legs(true);
        assert_eq!(Run::new(run.to_input()).unwrap(), run);
    }

    #[test]
    fn test_cut_list() {
        let run = Run::new(RunInput::new(183.0, 28.0, 24.0).with_fillers(Ends::Left)).unwrap();
        let cut_list = run.cut_list().unwrap();
        let kinds: Vec<_> = cut_list.parts.iter().map(|p| p.kind).collect();
        assert_eq!(
            kinds,
            vec![
                PartKind::Back,
                PartKind::Bottom,
                PartKind::Side,
                PartKind::TopNailer,
                PartKind::Filler,
                PartKind::Door
            ]
        );
        let filler = cut_list.part(PartKind::Filler).unwrap();
        assert_eq!((filler.count, filler.width, filler.length), (1, 3.0, 28.0));
        assert_eq!(cut_list.part(PartKind::Door).unwrap().count, 12);
        assert_eq!(cut_list.total_panels(), 6 + 6 + 12 + 12 + 1 + 12);
    }

    #[test]
    fn test_cut_list_without_fillers() {
        let cut_list = test_run().cut_list().unwrap();
        assert!(cut_list.part(PartKind::Filler).is_none());
        assert_eq!(cut_list.filler_width, None);
    }

    #[test]
    fn test_input_json_defaults() {
        let input: RunInput =
            serde_json::from_str(r#"{"fullwidth": 183, "height": 28, "depth": 24, "fillers": "LEFT"}"#).unwrap();
        assert_eq!(input.fillers, Ends::Left);
        assert_eq!(input.primary_material, PRIMARY_MATERIAL_DEFAULT);
        assert_eq!(input.door_top_gap, 0.5);
        let run = Run::new(input).unwrap();
        assert_eq!(run.cabinet_width().unwrap(), 30.0);
    }

    #[test]
    fn test_cut_list_serialization() {
        let cut_list = test_run().cut_list().unwrap();
        let json = serde_json::to_string(&cut_list).unwrap();
        assert!(json.contains("\"fillers\":\"NEITHER\""));
        assert!(json.contains("\"filler_width\":null"));
        let roundtrip: CutList = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, cut_list);
    }
}
