use std::path::PathBuf;

use chrono::NaiveDate;
use tracing::info;

use crate::cli::commands::Cli;
use crate::config::{delimiter_byte, parse_config, ReformatConfig};
use crate::errors::RollupError;
use crate::rollup::{aggregate_with_summary, RollupSummary};
use crate::table::{read_records, write_table};

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct ReformatJob {
    pub input: PathBuf,
    pub output: PathBuf,
    pub today: NaiveDate,
    pub delimiter: u8,
    pub json_summary: bool,
}

impl ReformatJob {
    /// Combine flags with the optional config file. Flags win; `today`
    /// falls back to the local calendar date.
    pub async fn resolve(cli: &Cli) -> Result<Self, RollupError> {
        let file_config = match &cli.config {
            Some(path) => parse_config(&PathBuf::from(path)).await?,
            None => ReformatConfig::default(),
        };

        let flag_config = ReformatConfig {
            today: cli.today.as_deref().map(parse_today).transpose()?,
            delimiter: cli.delimiter,
            json_summary: cli.json.then_some(true),
        };
        let config = file_config.merge(flag_config);

        Ok(Self {
            input: PathBuf::from(&cli.file),
            output: PathBuf::from(&cli.output),
            today: config
                .today
                .unwrap_or_else(|| chrono::Local::now().date_naive()),
            delimiter: delimiter_byte(config.delimiter_or_default())?,
            json_summary: config.json_summary.unwrap_or(false),
        })
    }
}

fn parse_today(raw: &str) -> Result<NaiveDate, RollupError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| RollupError::Config(format!("Invalid --today {:?}: {}", raw, e)))
}

/// Read, aggregate, then write. Nothing is written unless every record
/// was accumulated.
pub async fn run_reformat(job: &ReformatJob) -> Result<RollupSummary, RollupError> {
    info!(
        input = %job.input.display(),
        output = %job.output.display(),
        today = %job.today,
        "Reformatting rollup"
    );

    let records = read_records(&job.input, job.delimiter).await?;
    let (rows, summary) = aggregate_with_summary(records, job.today)?;
    write_table(&job.output, &rows, job.delimiter).await?;

    info!(
        records = summary.records_read,
        accumulated = summary.records_accumulated,
        skipped = summary.records_skipped(),
        rows = rows.len(),
        "Reformat complete"
    );
    Ok(summary)
}

pub async fn handle_reformat(cli: Cli) -> Result<(), RollupError> {
    let job = ReformatJob::resolve(&cli).await?;
    let summary = run_reformat(&job).await?;
    if job.json_summary {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }
    Ok(())
}
