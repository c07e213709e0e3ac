use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use framefit::{AspectRatio, BackgroundColor};

#[derive(Parser)]
#[command(name = "framefit", version, about = "framefit CLI")]
pub struct CliArgs {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(long, global = true, default_value_t = false)]
    pub log: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Fit a single image to the target ratio
    Fit {
        /// Input image
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output image; the extension selects the encoder
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        fit: FitArgs,
    },

    /// Fit every image of a folder into an output folder
    Batch {
        /// Input directory containing images
        #[arg(long)]
        input_dir: Option<PathBuf>,

        /// Output directory; file names are kept
        #[arg(long)]
        output_dir: Option<PathBuf>,

        #[command(flatten)]
        fit: FitArgs,
    },

    /// Print the bounding box of the main object
    Locate {
        /// Input image
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// List the image files of a folder as JSON
    Inventory {
        /// Folder to scan (recursively)
        #[arg(long)]
        folder: Option<PathBuf>,

        /// Directory written in place of each file's real location
        #[arg(long)]
        base_path: Option<PathBuf>,

        /// Report file (defaults to <folder>/inventory.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Clone)]
pub struct FitArgs {
    /// Target ratio: 1:1, 4:3, 3:2, 16:9, 3:4, 2:3, 9:16, any W:H, or a decimal
    #[arg(long)]
    pub ratio: Option<AspectRatio>,

    /// Padding color as "r,g,b" or "#rrggbb"
    #[arg(long)]
    pub background: Option<BackgroundColor>,

    /// Enlarge a small object on a white background before padding
    #[arg(long, default_value_t = false)]
    pub smart: bool,

    /// JSON preset with fit parameters; flags given on the command line win
    #[arg(long)]
    pub preset: Option<PathBuf>,
}
