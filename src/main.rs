use anyhow::Context;
use campaign_cleaner::config::Config;
use campaign_cleaner::pipeline::ingestion::locate_batches;
use campaign_cleaner::{logging, metrics, Pipeline};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "campaign_cleaner")]
#[command(about = "Split bank marketing campaign archives into client, campaign and economics tables")]
#[command(version = "0.1.0")]
struct Cli {
    /// TOML config file; built-in defaults are used when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean every batch archive and write the output tables
    Run {
        #[command(flatten)]
        overrides: Overrides,
        /// Print the run summary as JSON on stdout
        #[arg(long)]
        json: bool,
    },
    /// List the batch archives a run would process, in processing order
    List {
        #[command(flatten)]
        overrides: Overrides,
    },
}

#[derive(Args)]
struct Overrides {
    /// Directory holding the batch archives
    #[arg(long)]
    input: Option<PathBuf>,
    /// Directory receiving client.csv, campaign.csv and economics.csv
    #[arg(long)]
    output: Option<PathBuf>,
    /// File name pattern of batch archives
    #[arg(long)]
    pattern: Option<String>,
    /// Year stamped onto last_contact_date
    #[arg(long)]
    year: Option<i32>,
    /// Log filter, e.g. "info" or "campaign_cleaner=debug"
    #[arg(long)]
    log_level: Option<String>,
}

impl Overrides {
    fn apply(self, mut config: Config) -> anyhow::Result<Config> {
        if let Some(input) = self.input {
            config.input_dir = input;
        }
        if let Some(output) = self.output {
            config.output_dir = output;
        }
        if let Some(pattern) = self.pattern {
            config.pattern = pattern;
        }
        if let Some(year) = self.year {
            config.calendar_year = year;
        }
        if let Some(level) = self.log_level {
            config.logging.level = level;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let base = Config::load_or_default(cli.config.as_deref())
        .context("failed to load configuration")?;

    match cli.command {
        Commands::Run { overrides, json } => {
            let config = overrides.apply(base)?;
            let _guard = logging::init_logging(&config.logging)?;

            if config.metrics.textfile.is_some() {
                metrics::init_metrics();
            }

            let result = match Pipeline::run(&config) {
                Ok(result) => result,
                Err(e) => {
                    error!("Run failed: {}", e);
                    return Err(e).context("campaign cleaning run failed");
                }
            };

            if let Some(path) = &config.metrics.textfile {
                metrics::write_textfile(path)
                    .with_context(|| format!("failed to write metrics to {}", path.display()))?;
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                for relation in &result.relations {
                    match &relation.output_file {
                        Some(file) => info!(
                            "{}: {} rows ({} duplicates dropped) -> {}",
                            relation.relation, relation.rows_written, relation.duplicates_dropped, file
                        ),
                        None => info!("{}: no rows, not written", relation.relation),
                    }
                }
            }
        }
        Commands::List { overrides } => {
            let config = overrides.apply(base)?;
            let _guard = logging::init_logging(&config.logging)?;

            let batches = locate_batches(&config.input_dir, &config.pattern)?;
            for batch in batches {
                println!("{}", batch.display());
            }
        }
    }
    Ok(())
}
