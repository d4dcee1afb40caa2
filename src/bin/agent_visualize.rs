//! Command-line front end: renders an agent's stream-json output.
//!
//! Typical use is at the end of a pipe:
//!
//! ```text
//! claude -p --output-format stream-json --verbose "..." | agent-visualize
//! ```

use agent_stream_visualizer::{debug_requested, visualize, Error, Result, VisualizerConfig};
use clap::Parser;
use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "agent-visualize",
    version,
    about = "Render a coding agent's stream-json output as a readable trace"
)]
struct Cli {
    /// Input file; reads stdin when omitted or `-`
    file: Option<PathBuf>,

    /// Prefix every block with an ISO-8601 timestamp
    #[arg(short, long)]
    debug: bool,

    /// Disable ANSI colors
    #[arg(long)]
    no_color: bool,

    /// Maximum lines shown for interim text and tool output
    #[arg(long, value_name = "N")]
    max_lines: Option<usize>,

    /// Maximum characters shown for interim text and tool output
    #[arg(long, value_name = "N")]
    max_chars: Option<usize>,

    /// TOML configuration file with a [display] table
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

impl Cli {
    fn resolve_config(&self) -> Result<VisualizerConfig> {
        let mut config = match &self.config {
            Some(path) => VisualizerConfig::from_file(path)?,
            None => VisualizerConfig::new(),
        };
        config = config.apply_env();
        if self.debug {
            config = config.with_debug();
        }
        if self.no_color {
            config = config.with_color(false);
        }
        if let Some(max_lines) = self.max_lines {
            config = config.with_max_lines(max_lines);
        }
        if let Some(max_chars) = self.max_chars {
            config = config.with_max_chars(max_chars);
        }
        Ok(config)
    }

    fn open_input(&self) -> io::Result<Box<dyn Read>> {
        match &self.file {
            Some(path) if path.as_os_str() != "-" => Ok(Box::new(File::open(path)?)),
            _ => Ok(Box::new(io::stdin().lock())),
        }
    }
}

fn init_tracing(debug: bool) {
    let level = if debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.resolve_config()?;
    let input = cli
        .open_input()
        .map_err(|source| Error::ReadInput { source })?;
    let stats = visualize(input, io::stdout().lock(), config)?;
    tracing::info!(
        lines = stats.lines,
        events = stats.events,
        parse_errors = stats.parse_errors,
        paired_tools = stats.paired_tools,
        unpaired_calls = stats.unpaired_calls,
        unpaired_results = stats.unpaired_results,
        "stream closed"
    );
    Ok(())
}

fn main() {
    init_tracing(debug_requested(std::env::args().skip(1)));
    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
