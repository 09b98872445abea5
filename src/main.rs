use clap::Parser;
use fieldbind::app::Runtime;
use fieldbind::config::FormConfig;
use fieldbind::error::FormResult;
use fieldbind::terminal::{RenderMode, Terminal};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "fieldbind")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Fill in a form in the terminal and print what was submitted", long_about = None)]
struct Cli {
    /// Form definition (YAML). Without it the built-in reference form is shown.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `fieldbind=trace`. Falls back to RUST_LOG.
    #[arg(long)]
    log_level: Option<String>,

    /// Draw below the prompt instead of on the alternate screen
    #[arg(long)]
    inline: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> FormResult<()> {
    if let Some(path) = &cli.log_file {
        init_logging(path, cli.log_level.as_deref())?;
    }

    let config = match &cli.config {
        Some(path) => FormConfig::load(path)?,
        None => FormConfig::reference(),
    };
    let form = config.build()?;

    let mode = if cli.inline {
        RenderMode::Inline
    } else {
        RenderMode::AltScreen
    };
    let terminal = Terminal::new()?.with_mode(mode);
    let mut runtime = Runtime::new(form, terminal);
    let submitted = runtime.run()?;

    match submitted {
        Some(values) => {
            info!(fields = values.len(), "exiting with submitted values");
            match serde_json::to_string_pretty(&values) {
                Ok(json) => println!("{json}"),
                Err(err) => eprintln!("Error: could not encode values: {err}"),
            }
        }
        None => info!("exiting without a successful submit"),
    }
    Ok(())
}

/// Logs go to a file only; the terminal belongs to the form.
fn init_logging(path: &Path, level: Option<&str>) -> FormResult<()> {
    let file = File::create(path)?;
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .with(filter)
        .init();
    Ok(())
}
