use clap::Parser;
use phonefolio::Mode;
use phonefolio::core::config::{self, CliOverrides};
use phonefolio::core::registry::ScreenRegistry;
use phonefolio::core::script::{run_script, spaced};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "phonefolio", about = "A portfolio that behaves like a phone, in your terminal")]
struct Args {
    /// Interactive phone or a JSON trace of scripted navigation
    #[arg(short, long, default_value_t, value_enum)]
    mode: Mode,

    /// Config file (defaults to ~/.phonefolio/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Delay between leaving a screen and entering the next, in ms
    #[arg(long)]
    transition_ms: Option<u64>,

    /// Gap between successive content reveals, in ms
    #[arg(long)]
    stagger_ms: Option<u64>,

    /// Id of the home screen
    #[arg(long)]
    home: Option<String>,

    /// Trace mode: time between scripted targets, in ms
    #[arg(long, default_value_t = 1000)]
    gap_ms: u64,

    /// Trace mode: screens to open in order ("home" goes home)
    targets: Vec<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to phonefolio.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("phonefolio.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    log::info!("Phonefolio starting up in {:?} mode", args.mode);

    let file_config = config::load_config(args.config.as_deref()).map_err(std::io::Error::other)?;
    let overrides = CliOverrides {
        home: args.home,
        transition_delay_ms: args.transition_ms,
        stagger_interval_ms: args.stagger_ms,
    };
    let resolved = config::resolve(&file_config, &overrides);
    log::info!("Resolved timing: {:?}", resolved.timing);

    let registry = ScreenRegistry::new(resolved.screens.clone(), &resolved.home)
        .map_err(std::io::Error::other)?;

    match args.mode {
        Mode::Trace => {
            let steps = spaced(&args.targets, registry.home(), args.gap_ms);
            let events = run_script(&registry, resolved.timing, &steps);
            let json = serde_json::to_string_pretty(&events).map_err(std::io::Error::other)?;
            println!("{json}");
            Ok(())
        }
        Mode::Phone => phonefolio::tui::run(resolved, registry),
    }
}
