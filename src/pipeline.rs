// 🔁 Batch Pipeline - load -> clean -> persist -> figures
//
// Runs once, start to finish, single-threaded. Any stage failure aborts the
// run; the cleaned file is only replaced after cleaning fully succeeded.

use crate::charts::{build_figures, write_figures};
use crate::cleaning::{clean_records, CleanedTable, CleaningReport};
use crate::config::Config;
use crate::error::Result;
use crate::export::write_cleaned_csv;
use crate::loader::load_records;
use std::path::PathBuf;
use tracing::info;

/// Outcome of a successful run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub records_loaded: usize,
    pub report: CleaningReport,
    pub output: PathBuf,
    pub fingerprint: String,
    pub figures: Vec<PathBuf>,
}

impl RunSummary {
    pub fn summary(&self) -> String {
        format!(
            "{} records -> {} ({} coercion warnings, {} cells imputed, {} figures)",
            self.records_loaded,
            self.output.display(),
            self.report.warnings.len(),
            self.report.imputed_total(),
            self.figures.len()
        )
    }
}

/// Load and clean without touching the output locations
pub fn load_and_clean(config: &Config) -> Result<(usize, CleanedTable, CleaningReport)> {
    let records = load_records(&config.input, config.input_format)?;
    let (table, report) = clean_records(&records)?;
    Ok((records.len(), table, report))
}

pub fn run(config: &Config) -> Result<RunSummary> {
    info!(input = %config.input.display(), "stage 1/3: load and clean");
    let (records_loaded, table, report) = load_and_clean(config)?;

    info!(output = %config.output.display(), "stage 2/3: persist cleaned table");
    write_cleaned_csv(&table, &config.output)?;
    let fingerprint = table.fingerprint()?;
    info!(sha256 = %fingerprint, "cleaned table fingerprint");

    info!(dir = %config.figures_dir.display(), "stage 3/3: figures");
    let figures = build_figures(&table, &config.figure_options());
    let figures = write_figures(&figures, &config.figures_dir)?;

    Ok(RunSummary {
        records_loaded,
        report,
        output: config.output.clone(),
        fingerprint,
        figures,
    })
}
