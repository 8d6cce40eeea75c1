use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use ionofilter_core::channels::ChannelSpec;
use ionofilter_core::config::{ConfigOverrides, FilterConfig};
use ionofilter_core::pipeline::{self, PipelineSummary};
use ionofilter_core::sinks::{
    CsvSink, GnuplotSink, ParquetSink, PlotSink, RecordingSink, TableSink,
};
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Median-filter channels of an ionosonde station table", long_about = None)]
struct Cli {
    /// Station table to read
    input: PathBuf,

    /// TOML configuration file (falls back to $IONOFILTER_CONFIG)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Odd median window width
    #[arg(long)]
    window: Option<usize>,

    /// Channel to filter as INDEX or INDEX:LABEL; repeat for several
    #[arg(long = "channel", value_name = "IDX[:LABEL]")]
    channels: Vec<ChannelSpec>,

    /// Drop malformed data lines instead of aborting the batch
    #[arg(long)]
    skip_malformed: bool,

    #[arg(long, value_enum, default_value_t = SinkKind::Table)]
    sink: SinkKind,

    /// Destination file for the table, csv and parquet sinks (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Print the run summary as JSON on stderr
    #[arg(long)]
    summary_json: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum SinkKind {
    Table,
    Csv,
    Parquet,
    Gnuplot,
    None,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .json()
        .init();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    let summary = match cli.sink {
        SinkKind::Table => {
            let mut sink = TableSink::new(open_output(cli.output_path()?)?);
            run(&cli.input, &config, &mut sink)?
        }
        SinkKind::Csv => {
            let mut sink = CsvSink::new(open_output(cli.output_path()?)?);
            run(&cli.input, &config, &mut sink)?
        }
        SinkKind::Parquet => {
            let mut sink = ParquetSink::new(open_output(cli.output_path()?)?);
            run(&cli.input, &config, &mut sink)?
        }
        SinkKind::Gnuplot => {
            if cli.output.is_some() {
                warn!("--output is ignored by the gnuplot sink");
            }
            run(&cli.input, &config, &mut GnuplotSink::default())?
        }
        SinkKind::None => run(&cli.input, &config, &mut RecordingSink::new())?,
    };

    if cli.summary_json {
        // stdout may already carry sink output.
        write_summary(&summary, io::stderr().lock())?;
    }

    let failed = summary.failed_channels();
    if failed > 0 {
        bail!("{failed} of {} channels failed", summary.channels.len());
    }
    Ok(())
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            config_path: self.config.clone(),
            window_width: self.window,
            channels: self.channels.clone(),
            skip_malformed: self.skip_malformed,
        }
    }

    /// Destination for file-capable sinks. Parquet is binary, so it never
    /// goes to the terminal.
    fn output_path(&self) -> Result<Option<&Path>> {
        match (self.sink, self.output.as_deref()) {
            (SinkKind::Parquet, None) => bail!("--sink parquet requires --output <PATH>"),
            (_, output) => Ok(output),
        }
    }
}

fn resolve_config(cli: &Cli) -> Result<FilterConfig> {
    dotenvy::dotenv().ok();
    cli.overrides()
        .resolve_from_env()
        .context("invalid configuration")
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create output file {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

fn write_summary(summary: &PipelineSummary, mut out: impl Write) -> Result<()> {
    let json = summary
        .to_json()
        .context("failed to serialize run summary")?;
    writeln!(out, "{json}").context("failed to write run summary")?;
    Ok(())
}

fn run(input: &Path, config: &FilterConfig, sink: &mut dyn PlotSink) -> Result<PipelineSummary> {
    pipeline::run_file(input, config, sink)
        .with_context(|| format!("failed to filter {}", input.display()))
}
