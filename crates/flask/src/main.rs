use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use flask_core::{convert, load_observations, ConfigOverrides, ConverterConfig, OutputFormat};
use flask_parser::HeaderMode;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod inspect;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Convert Mauna Loa flask CO2 monthly means to CSV, JSON and Markdown",
    long_about = None
)]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the CSV, JSON and Markdown outputs (default)
    Convert(ConvertArgs),
    /// Parse the input and print a summary without writing anything
    Inspect(SourceArgs),
}

#[derive(Args, Debug, Default)]
struct SourceArgs {
    /// TOML config file (falls back to FLASK_CONFIG)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Source text file
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Number of metadata lines to skip before the data
    #[arg(long, conflicts_with = "detect_header")]
    header_lines: Option<usize>,

    /// Find the end of the metadata block from the file contents
    #[arg(long)]
    detect_header: bool,
}

impl SourceArgs {
    fn header_mode(&self) -> Option<HeaderMode> {
        if self.detect_header {
            Some(HeaderMode::Detect)
        } else {
            self.header_lines.map(HeaderMode::Fixed)
        }
    }
}

#[derive(Args, Debug, Default)]
struct ConvertArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Directory the outputs are written to
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output file name without extension
    #[arg(long)]
    stem: Option<String>,

    /// Restrict the outputs to these formats (repeatable)
    #[arg(short, long = "format", value_enum)]
    formats: Vec<FormatArg>,

    /// Indent the JSON output
    #[arg(long)]
    pretty_json: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    Csv,
    Json,
    #[value(alias = "md")]
    Markdown,
}

impl From<FormatArg> for OutputFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Csv => OutputFormat::Csv,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Markdown => OutputFormat::Markdown,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);
    dotenvy::dotenv().ok();

    match cli
        .command
        .unwrap_or_else(|| Command::Convert(ConvertArgs::default()))
    {
        Command::Convert(args) => run_convert(args),
        Command::Inspect(args) => run_inspect(args),
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn run_convert(args: ConvertArgs) -> Result<()> {
    let overrides = ConfigOverrides {
        input: args.source.input.clone(),
        output_dir: args.output_dir,
        stem: args.stem,
        header: args.source.header_mode(),
        formats: args.formats.into_iter().map(OutputFormat::from).collect(),
        pretty_json: args.pretty_json,
    };
    let config = ConverterConfig::resolve(args.source.config.as_deref(), overrides)
        .context("failed to resolve configuration")?;

    let summary = convert(&config).context("flask conversion failed")?;

    info!(
        records = summary.record_count,
        missing = summary.missing_count,
        outputs = summary.outputs.len(),
        "Conversion finished"
    );
    for output in &summary.outputs {
        println!("{}: {}", output.format, output.path.display());
    }
    Ok(())
}

fn run_inspect(args: SourceArgs) -> Result<()> {
    let overrides = ConfigOverrides {
        input: args.input.clone(),
        header: args.header_mode(),
        ..ConfigOverrides::default()
    };
    let config = ConverterConfig::resolve(args.config.as_deref(), overrides)
        .context("failed to resolve configuration")?;

    let parsed = load_observations(&config).context("failed to load flask observations")?;
    println!("{}", inspect::summary_table(&config.input, &parsed));
    Ok(())
}
