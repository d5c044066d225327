use std::fs::OpenOptions;
use std::process::ExitCode;

use log::{error, info, LevelFilter};
use shape_renderer::{create_clap_command, handle_clap_matches, renderers::terminal, RenderConfig};
use simplelog::{Config, WriteLogger};

fn init_logging(config: &RenderConfig) -> std::io::Result<()> {
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;
    let level = if config.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    // A logger can only be set once per process; a second init is harmless.
    let _ = WriteLogger::init(level, Config::default(), log_file);
    Ok(())
}

fn main() -> ExitCode {
    let matches = create_clap_command().get_matches();
    let config = match handle_clap_matches(&matches) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_logging(&config) {
        eprintln!(
            "Warning: could not open log file {}: {e}",
            config.log_file.display()
        );
    }
    info!("starting with {:?}", config);

    match terminal::run(&config) {
        Ok(()) => {
            info!("rendering stopped");
            println!("Rendering stopped.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
