//! tracekit CLI - inspect the preset and color tables and print trace lines.
//!
//! Commands:
//! - `presets` - List the preset table
//! - `colors` - List the color names, painted
//! - `log` - Print one line through the logger
//! - `demo` - Run an instrumented sample type

#![forbid(unsafe_code)]

mod demo;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use tracekit::{
    Color, Console, LogRequest, LogSpec, Payload, Preset, TraceConfig, TraceResult, init_console,
    init_logger,
};

/// Exit status for a log request that could not be built.
const INVALID_REQUEST: u8 = 2;

/// tracekit CLI - Preset-driven console tracing.
#[derive(Parser)]
#[command(name = "tracekit")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file (defaults to <config dir>/tracekit/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Strip color escapes
    #[arg(long, global = true)]
    plain: bool,

    /// Prefix every line with [HH:MM:SS]
    #[arg(long, global = true)]
    timestamps: bool,

    /// Turn debug output off
    #[arg(long, short, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every preset with its index and template.
    Presets,

    /// List every color name, painted with its escape.
    Colors,

    /// Print one line through the logger.
    ///
    /// The request is validated before anything is printed: an unknown
    /// method, preset index or color exits with status 2.
    Log {
        /// Console method (log, info, warn, error, debug)
        #[arg(long, short)]
        method: Option<String>,

        /// Preset table index
        #[arg(long, short)]
        preset: Option<usize>,

        /// Color name
        #[arg(long, short)]
        color: Option<String>,

        /// Value substituted into the preset slot
        #[arg(long, short)]
        slot: Option<String>,

        /// Arguments printed after the preset
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Run an instrumented sample type exercising every interceptor.
    Demo,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        Commands::Presets => cmd_presets(&config),
        Commands::Colors => cmd_colors(&config),
        Commands::Log {
            method,
            preset,
            color,
            slot,
            args,
        } => {
            let spec = LogSpec {
                method,
                preset,
                color,
            };
            let request = match LogRequest::try_from(spec) {
                Ok(request) => request,
                Err(e) => {
                    eprintln!("Error: {e}");
                    return ExitCode::from(INVALID_REQUEST);
                }
            };
            cmd_log(&config, request, slot, args)
        }
        Commands::Demo => demo::run(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// File (explicit or default location), then environment, then flags.
fn load_config(cli: &Cli) -> TraceResult<TraceConfig> {
    let config = match cli.config.as_deref() {
        Some(path) => TraceConfig::load(path)?,
        None => TraceConfig::load_default()?,
    };
    let mut config = config.merge_env().with_debug(!cli.quiet);
    if cli.plain {
        config = config.plain_mode();
    }
    if cli.timestamps {
        config = config.with_timestamps(true);
    }
    Ok(config)
}

fn listing_console(config: &TraceConfig) -> TraceResult<&'static Arc<Console>> {
    init_console(Console::from_config(config))
}

fn cmd_presets(config: &TraceConfig) -> TraceResult<()> {
    let out = listing_console(config)?;
    for preset in Preset::ALL {
        out.print_plain(&format!(
            "{}  {:<10} {:?}",
            preset.index(),
            preset.name(),
            preset.template()
        ));
    }
    Ok(())
}

fn cmd_colors(config: &TraceConfig) -> TraceResult<()> {
    let out = listing_console(config)?;
    for color in Color::ALL {
        out.print_plain(&color.paint(color.name()));
    }
    Ok(())
}

fn cmd_log(
    config: &TraceConfig,
    request: LogRequest,
    slot: Option<String>,
    args: Vec<String>,
) -> TraceResult<()> {
    let logger = init_logger(config)?;
    let payload = match slot {
        Some(value) => Payload::Slot { value, args },
        None => Payload::Args(args),
    };
    logger.log(request, payload);
    Ok(())
}

