// 📂 Loader - Pluggable record sources
//
// A source turns a stored collection into raw lodging tuples. The pipeline
// only sees `RawLodging`, so any reader that yields
// (date, name, category, subtype, rating, price, average_revenue) fits.

use crate::error::{PipelineError, Result as PipelineResult};
use crate::record::{LodgingRecord, RawLodging};
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;

// ============================================================================
// SOURCE FORMAT
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    Json,
    Csv,
}

impl SourceFormat {
    pub fn name(&self) -> &'static str {
        match self {
            SourceFormat::Json => "json",
            SourceFormat::Csv => "csv",
        }
    }

    /// Detect the format from the file extension
    pub fn detect(path: &Path) -> PipelineResult<SourceFormat> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "json" => Ok(SourceFormat::Json),
            "csv" => Ok(SourceFormat::Csv),
            _ => Err(PipelineError::deserialization(
                path,
                format!("unsupported input format '{}'", extension),
            )),
        }
    }
}

impl std::str::FromStr for SourceFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(SourceFormat::Json),
            "csv" => Ok(SourceFormat::Csv),
            other => Err(format!("unknown input format '{}' (expected json or csv)", other)),
        }
    }
}

// ============================================================================
// RECORD SOURCE TRAIT
// ============================================================================

/// Reads a stored collection into raw lodging tuples, in stored order.
pub trait RecordSource {
    fn read(&self, path: &Path) -> Result<Vec<RawLodging>>;

    fn format(&self) -> SourceFormat;
}

/// Factory: source implementation for a format
pub fn get_source(format: SourceFormat) -> Box<dyn RecordSource> {
    match format {
        SourceFormat::Json => Box::new(JsonSource),
        SourceFormat::Csv => Box::new(CsvSource),
    }
}

// ============================================================================
// JSON SOURCE
// ============================================================================

/// JSON array of objects. Scalars may be strings, numbers, booleans or null.
pub struct JsonSource;

#[derive(Debug, Deserialize)]
struct JsonLodging {
    #[serde(default)]
    date: Value,
    #[serde(default)]
    name: Value,
    #[serde(default)]
    category: Value,
    #[serde(default, rename = "type")]
    kind: Value,
    #[serde(default)]
    subtype: Value,
    #[serde(default)]
    rating: Value,
    #[serde(default)]
    price: Value,
    #[serde(default)]
    average_revenue: Value,
}

fn scalar_text(field: &str, value: Value) -> Result<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Array(_) | Value::Object(_) => {
            Err(anyhow!("field '{}' must be a scalar value", field))
        }
    }
}

impl JsonLodging {
    fn into_raw(self) -> Result<RawLodging> {
        Ok(RawLodging {
            date: scalar_text("date", self.date)?,
            name: scalar_text("name", self.name)?,
            category: scalar_text("category", self.category)?,
            subtype: match self.kind {
                Value::Null => scalar_text("subtype", self.subtype)?,
                kind => scalar_text("type", kind)?,
            },
            rating: scalar_text("rating", self.rating)?,
            price: scalar_text("price", self.price)?,
            average_revenue: scalar_text("average_revenue", self.average_revenue)?,
        })
    }
}

impl RecordSource for JsonSource {
    fn read(&self, path: &Path) -> Result<Vec<RawLodging>> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open file: {}", path.display()))?;

        let items: Vec<JsonLodging> = serde_json::from_reader(BufReader::new(file))
            .context("Expected a JSON array of lodging objects")?;

        items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                item.into_raw()
                    .with_context(|| format!("Invalid record at index {}", index))
            })
            .collect()
    }

    fn format(&self) -> SourceFormat {
        SourceFormat::Json
    }
}

// ============================================================================
// CSV SOURCE
// ============================================================================

/// Headered CSV with columns date,name,category,type,rating,price,average_revenue.
/// Column order is free; `subtype` is accepted for `type`.
pub struct CsvSource;

const REQUIRED_COLUMNS: [&str; 6] = ["date", "name", "category", "rating", "price", "average_revenue"];

impl RecordSource for CsvSource {
    fn read(&self, path: &Path) -> Result<Vec<RawLodging>> {
        use csv::ReaderBuilder;

        let file = File::open(path)
            .with_context(|| format!("Failed to open file: {}", path.display()))?;

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::Headers)
            .from_reader(file);

        let headers = reader.headers().context("Failed to read CSV header")?.clone();
        let column = |name: &str| headers.iter().position(|h| h == name);

        for required in REQUIRED_COLUMNS {
            if column(required).is_none() {
                return Err(anyhow!("missing required column '{}'", required));
            }
        }
        let subtype_idx = column("type")
            .or_else(|| column("subtype"))
            .ok_or_else(|| anyhow!("missing required column 'type'"))?;

        let idx = |name: &str| column(name).unwrap_or(usize::MAX);
        let (date_idx, name_idx, category_idx) = (idx("date"), idx("name"), idx("category"));
        let (rating_idx, price_idx, revenue_idx) = (idx("rating"), idx("price"), idx("average_revenue"));

        let mut raws = Vec::new();
        for (line_num, result) in reader.records().enumerate() {
            let record = result.with_context(|| {
                format!("Failed to parse CSV line {}", line_num + 2)
            })?;

            let field = |i: usize| -> Option<String> {
                record
                    .get(i)
                    .filter(|value| !value.is_empty())
                    .map(|value| value.to_string())
            };

            raws.push(RawLodging {
                date: field(date_idx),
                name: field(name_idx),
                category: field(category_idx),
                subtype: field(subtype_idx),
                rating: field(rating_idx),
                price: field(price_idx),
                average_revenue: field(revenue_idx),
            });
        }

        Ok(raws)
    }

    fn format(&self) -> SourceFormat {
        SourceFormat::Csv
    }
}

// ============================================================================
// LOADING
// ============================================================================

/// Turn raw tuples into records with sequential ids (1..=n)
pub fn assign_ids(raws: Vec<RawLodging>) -> Vec<LodgingRecord> {
    raws.into_iter()
        .zip(1u64..)
        .map(|(raw, id)| LodgingRecord::from_raw(id, raw))
        .collect()
}

/// Load a stored collection through the given source
pub fn load_with(source: &dyn RecordSource, path: &Path) -> PipelineResult<Vec<LodgingRecord>> {
    if !path.exists() {
        return Err(PipelineError::deserialization(path, "file not found"));
    }

    let raws = source
        .read(path)
        .map_err(|e| PipelineError::deserialization(path, format!("{:#}", e)))?;

    let records = assign_ids(raws);
    info!(
        path = %path.display(),
        format = source.format().name(),
        count = records.len(),
        "loaded lodging records"
    );
    Ok(records)
}

/// Load a stored collection, detecting the format from the extension when
/// none is given.
pub fn load_records(path: &Path, format: Option<SourceFormat>) -> PipelineResult<Vec<LodgingRecord>> {
    let format = match format {
        Some(format) => format,
        None => SourceFormat::detect(path)?,
    };
    let source = get_source(format);
    load_with(source.as_ref(), path)
}
