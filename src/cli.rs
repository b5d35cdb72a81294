use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "cropwise",
    version,
    about = "Soil image crop recommendation client"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config.yaml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the analysis server base URL
    #[arg(short, long)]
    pub server: Option<String>,

    /// Soil image to preload into the upload step
    #[arg(short, long)]
    pub image: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Re-run interactive setup
    Init,
    /// Check that the analysis server is reachable
    Check,
    /// Submit an analysis without the interactive wizard
    Analyze(AnalyzeArgs),
}

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Soil image (JPG, PNG, GIF or BMP, up to 16MB)
    pub image: PathBuf,

    /// Farm location, e.g. "Pune, Maharashtra"
    #[arg(long)]
    pub location: String,

    /// Growing season (kharif, rabi, summer)
    #[arg(long)]
    pub season: String,

    /// Average temperature in °C
    #[arg(long)]
    pub temperature: String,

    /// Seasonal rainfall in mm
    #[arg(long)]
    pub rainfall: String,

    /// Relative humidity in %
    #[arg(long)]
    pub humidity: String,

    /// Crop grown last season
    #[arg(long)]
    pub previous_crop: Option<String>,

    /// Also write the printable HTML report
    #[arg(long)]
    pub report: bool,
}
