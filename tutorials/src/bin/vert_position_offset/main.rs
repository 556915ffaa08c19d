use clap::Parser;

use framework::{Runner, WindowConfig};

mod args;
mod scene;

use args::Args;
use scene::VertPositionOffset;

fn main() {
    env_logger::init();

    let args = Args::parse();

    let scene = VertPositionOffset::new(args.data_dir);

    let runner = match Runner::new(WindowConfig {
        title: "Tutorial 03 - Shader Position Offset".to_string(),
        width: args.width,
        height: args.height,
    }) {
        Ok(runner) => runner,
        Err(e) => {
            log::error!("could not set up a window: {e}");
            std::process::exit(1);
        }
    };

    runner.run(scene);
}
