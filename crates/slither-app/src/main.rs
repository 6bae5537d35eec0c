use std::path::PathBuf;
use std::process::ExitCode;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use slither_headless::{run_app, SlitherConfig};

fn main() -> ExitCode {
    // Init logging; stdout carries the frame records, so logs go to stderr.
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_env_filter("info")
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    info!("Slither starting");
    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => match SlitherConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Slither config error ({}): {e}", path.display());
                return ExitCode::FAILURE;
            }
        },
        None => SlitherConfig::default(),
    };

    let stdout = std::io::stdout();
    match run_app(&config, &mut stdout.lock()) {
        Ok(summary) if !summary.attached => {
            info!("overlay already present; nothing to do");
            ExitCode::SUCCESS
        }
        Ok(summary) => {
            info!(
                frames = summary.frames,
                longest_chain = summary.longest_chain,
                "Slither finished"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Slither error: {e}");
            ExitCode::FAILURE
        }
    }
}
