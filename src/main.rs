use clap::Parser;
use navkit::core::config::{self, CliOverrides};
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "navkit", about = "Interactive navigation stack playground")]
struct Args {
    /// Destination to start with (must be one of the configured destinations)
    #[arg(short, long)]
    start: Option<String>,

    /// Log level: off, error, warn, info, debug, trace
    #[arg(long)]
    log_level: Option<String>,

    /// Present modals full screen by default
    #[arg(long)]
    full_screen: bool,
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();

    let file_config = config::load_config().map_err(std::io::Error::other)?;
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            start: args.start,
            log_level: args.log_level,
            full_screen: args.full_screen,
        },
    );

    // Initialize file logger; the terminal belongs to the TUI
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    log::info!(
        "navkit starting with {} destinations, start {:?}",
        resolved.destinations.len(),
        resolved.start
    );

    navkit::tui::run(resolved)
}
