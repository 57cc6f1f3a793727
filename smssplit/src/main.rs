use std::io::{self, BufRead, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, Level};
use tracing_subscriber::{fmt, EnvFilter};

use smssplit::{Encoding, OutputFormat, Segmentation, Segmenter, SplitConfig};

#[derive(Parser)]
#[command(name = "smssplit")]
#[command(about = "Split text messages into SMS parts")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Message to split with the configured defaults (read from stdin if omitted)
    message: Option<String>,

    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,
}

#[derive(Subcommand)]
enum Commands {
    /// Split a message into parts
    Split {
        #[arg(short, long, value_enum)]
        encoding: Option<EncodingArg>,
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,
        /// Message text (read from stdin if omitted)
        message: Option<String>,
    },
    /// Show how many units a message uses and how they are spread over parts
    Info {
        #[arg(short, long, value_enum)]
        encoding: Option<EncodingArg>,
        /// Message text (read from stdin if omitted)
        message: Option<String>,
    },
    /// Split every stdin line as a separate message
    Repl {
        #[arg(short, long, value_enum)]
        encoding: Option<EncodingArg>,
    },
    /// Print the effective configuration as TOML
    Config,
}

#[derive(clap::ValueEnum, Clone, Copy)]
enum EncodingArg {
    Gsm,
    Unicode,
}

impl From<EncodingArg> for Encoding {
    fn from(arg: EncodingArg) -> Self {
        match arg {
            EncodingArg::Gsm => Encoding::Gsm,
            EncodingArg::Unicode => Encoding::Unicode,
        }
    }
}

#[derive(clap::ValueEnum, Clone, Copy)]
enum FormatArg {
    Plain,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Plain => OutputFormat::Plain,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

/// Filter from `rust_log` when it is set and parses, else from `level`.
fn log_filter(rust_log: Option<&str>, level: LogLevel) -> EnvFilter {
    match rust_log.filter(|s| !s.trim().is_empty()).map(EnvFilter::try_new) {
        Some(Ok(filter)) => filter,
        _ => EnvFilter::default().add_directive(Level::from(level).into()),
    }
}

fn setup_logging(level: LogLevel) -> Result<()> {
    let rust_log = std::env::var("RUST_LOG").ok();
    let filter = log_filter(rust_log.as_deref(), level);
    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("failed to set subscriber")?;
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<SplitConfig> {
    match path {
        Some(path) => {
            let config = SplitConfig::load_toml(path)?;
            debug!(path = %path.display(), ?config, "loaded config");
            Ok(config)
        }
        None => Ok(SplitConfig::default()),
    }
}

/// Use `message` if given, otherwise all of stdin minus the final newline.
fn message_or_stdin(message: Option<String>) -> Result<String> {
    if let Some(message) = message {
        return Ok(message);
    }
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .context("failed to read message from stdin")?;
    if buf.ends_with('\n') {
        buf.pop();
        if buf.ends_with('\r') {
            buf.pop();
        }
    }
    Ok(buf)
}

fn print_segmentation(seg: &Segmentation<'_>, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Plain => {
            for (i, part) in seg.parts.iter().enumerate() {
                println!("{}. {}", i + 1, part.text);
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(seg).context("failed to serialize parts")?;
            println!("{}", json);
        }
    }
    Ok(())
}

fn handle_split(config: &SplitConfig, message: &str, format: OutputFormat) -> Result<()> {
    let seg = Segmenter::new(config.encoding).segment(message);
    config.check_part_count(seg.part_count())?;
    print_segmentation(&seg, format)
}

fn handle_info(config: &SplitConfig, message: &str) -> Result<()> {
    let seg = Segmenter::new(config.encoding).segment(message);
    println!("encoding: {}", seg.encoding);
    println!("total units: {}", seg.total_units);
    if seg.is_concatenated() {
        println!(
            "parts: {} (concatenated, {} units per part)",
            seg.part_count(),
            seg.capacity_per_part()
        );
    } else {
        println!("parts: 1 (up to {} units)", seg.capacity_per_part());
    }
    for (i, part) in seg.parts.iter().enumerate() {
        println!("  {}. {} units, {} chars", i + 1, part.units, part.text.chars().count());
    }
    println!("remaining in last part: {}", seg.remaining_units());
    if seg.part_count() > config.max_parts {
        println!("warning: exceeds max_parts ({})", config.max_parts);
    }
    Ok(())
}

fn run_repl(config: &SplitConfig) -> Result<()> {
    let segmenter = Segmenter::new(config.encoding);
    eprintln!("smssplit ({}) - one message per line, Ctrl-D to exit", config.encoding);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("error reading stdin")?;
        if line.is_empty() {
            continue;
        }
        let seg = segmenter.segment(&line);
        if let Err(e) = config.check_part_count(seg.part_count()) {
            eprintln!("error: {}", e);
            continue;
        }
        print_segmentation(&seg, config.format)?;
        println!();
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.log_level)?;
    let mut config = load_config(cli.config.as_deref())?;

    match cli.command {
        Some(Commands::Split {
            encoding,
            format,
            message,
        }) => {
            if let Some(enc) = encoding {
                config.encoding = enc.into();
            }
            let format = format.map(Into::into).unwrap_or(config.format);
            let message = message_or_stdin(message)?;
            handle_split(&config, &message, format)
        }
        Some(Commands::Info { encoding, message }) => {
            if let Some(enc) = encoding {
                config.encoding = enc.into();
            }
            let message = message_or_stdin(message)?;
            handle_info(&config, &message)
        }
        Some(Commands::Repl { encoding }) => {
            if let Some(enc) = encoding {
                config.encoding = enc.into();
            }
            run_repl(&config)
        }
        Some(Commands::Config) => {
            print!("{}", config.to_toml_string().context("failed to render config")?);
            Ok(())
        }
        None => {
            let message = message_or_stdin(cli.message)?;
            handle_split(&config, &message, config.format)
        }
    }
}
