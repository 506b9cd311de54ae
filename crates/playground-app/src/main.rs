//! Widget playground driver entry point.

use clap::Parser;
use playground_app::{CliArgs, FrameFormat, Runner, Script, ScriptError, ShortcutRegistry};
use playground_core::PlaygroundConfig;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Starting widget playground");

    let args = CliArgs::parse();
    if args.shortcuts {
        ShortcutRegistry::print_all();
        return ExitCode::SUCCESS;
    }

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{}", err);
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: CliArgs) -> Result<(), ScriptError> {
    let config = match &args.config {
        Some(path) => PlaygroundConfig::load(path)?,
        None => PlaygroundConfig::default(),
    };
    let script = match &args.script {
        Some(path) => Script::load(path)?,
        None => Script::demo(),
    };
    let format = if args.json { FrameFormat::Json } else { FrameFormat::Text };

    let mut runner = match args.seed {
        Some(seed) => Runner::with_seed(config, format, seed),
        None => Runner::new(config, format),
    };
    let result = runner.run(&script);
    // Frames captured before a failing step are still worth seeing.
    for frame in runner.frames() {
        println!("{}", frame);
    }
    result
}
