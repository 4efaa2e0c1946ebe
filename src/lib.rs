// Lodging Insights - Core Library
// Exposes the record model, cleaning pipeline and figures for the CLI and tests

pub mod error;
pub mod record;
pub mod loader;
pub mod cleaning;
pub mod export;
pub mod charts;
pub mod config;
pub mod pipeline;

// Re-export commonly used types
pub use error::{CoercionWarning, PipelineError, Result};
pub use record::{Category, LodgingKind, LodgingRecord, RawLodging};
pub use loader::{
    get_source, load_records, load_with,
    CsvSource, JsonSource, RecordSource, SourceFormat,
};
pub use cleaning::{
    clean_records, coerce, impute, median, mode,
    CleanedRow, CleanedTable, CleaningReport, Column, ColumnFill, RawTable, HEADER,
};
pub use export::{read_cleaned_csv, render_csv, write_cleaned_csv};
pub use charts::{build_figures, write_figures, Figure, FigureData, FigureOptions};
pub use config::{Config, ConfigOverrides};
pub use pipeline::{run, RunSummary};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
