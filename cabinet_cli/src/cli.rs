use std::path::PathBuf;

use cabinet_core::Ends;
use clap::Parser;

/// Configure a one-off job consisting of a single bank of cabinets.
///
/// The wall width, height, depth and job name are required unless they come
/// from an --input file.
#[derive(Parser, Debug)]
#[command(name = "cabinet-calc", version)]
pub struct Cli {
    /// Full bank width for all cabinets combined (in)
    #[arg(short = 'w', long, value_name = "WIDTH")]
    pub fullwidth: Option<f64>,

    /// Height from toe kick to top of cabinet (in)
    #[arg(short = 'H', long, value_name = "HT")]
    pub height: Option<f64>,

    /// Depth from front to back including door (in)
    #[arg(short = 'd', long, value_name = "DEPTH")]
    pub depth: Option<f64>,

    /// A unique identifying name for the job
    #[arg(short = 'n', long, value_name = "NAME", required_unless_present_any = ["materials", "json"])]
    pub name: Option<String>,

    /// A description of the job
    #[arg(short = 's', long, value_name = "DESC")]
    pub desc: Option<String>,

    /// Ends that will have filler panels: NEITHER, LEFT, RIGHT or BOTH
    #[arg(short = 'f', long)]
    pub fillers: Option<Ends>,

    /// Primary material name
    #[arg(long = "prim-matl", alias = "prim_matl", value_name = "MTL")]
    pub prim_matl: Option<String>,

    /// Primary material thickness (in)
    #[arg(long = "prim-thick", alias = "prim_thick", value_name = "TH")]
    pub prim_thick: Option<f64>,

    /// Door material name
    #[arg(long = "door-matl", alias = "door_matl", value_name = "MTL")]
    pub door_matl: Option<String>,

    /// Door thickness (in)
    #[arg(long = "door-thick", alias = "door_thick", value_name = "TH")]
    pub door_thick: Option<f64>,

    /// Add cabinet legs
    #[arg(short = 'l', long)]
    pub legs: bool,

    /// Bottom panel thicknesses, top to bottom (in)
    #[arg(long = "btm-thicks", alias = "btm_thicks", value_name = "TH", num_args = 1..=2)]
    pub btm_thicks: Option<Vec<f64>>,

    /// Read run parameters from a JSON file; flags override its values
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Print the cut list as JSON instead of the text specification
    #[arg(long)]
    pub json: bool,

    /// List the material catalog and exit
    #[arg(long)]
    pub materials: bool,
}
