use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
pub struct Args {
    /// Window width in pixels
    #[arg(long, default_value_t = 1280)]
    pub width: u32,
    /// Window height in pixels
    #[arg(long, default_value_t = 720)]
    pub height: u32,
    /// Directory with the scene's shader sources
    #[arg(long, default_value = concat!(env!("CARGO_MANIFEST_DIR"), "/data/tut04"))]
    pub data_dir: PathBuf,
}
