// 💾 Flat File Export - cleaned table <-> delimited text
//
// Output layout:
//   unique_id,date,name,category,type,rating,price,average_revenue
// Dates as YYYY-MM-DD, numbers as plain decimals, no quoting at all.
// A value containing a comma corrupts its row; that is a known limitation
// of the format and is not escaped here.

use crate::cleaning::{format_number, CleanedRow, CleanedTable, HEADER};
use crate::error::{PipelineError, Result};
use sha2::{Digest, Sha256};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

/// Render the table exactly as it is written to disk
pub fn render_csv(table: &CleanedTable) -> io::Result<Vec<u8>> {
    let mut wtr = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(Vec::new());

    wtr.write_record(HEADER)?;
    for row in &table.rows {
        wtr.write_record([
            row.unique_id.to_string(),
            row.date.format("%Y-%m-%d").to_string(),
            row.name.clone(),
            row.category.clone(),
            row.subtype.clone(),
            format_number(row.rating),
            format_number(row.price),
            format_number(row.average_revenue),
        ])?;
    }

    wtr.into_inner().map_err(|e| e.into_error())
}

impl CleanedTable {
    /// SHA-256 of the rendered file contents (hex)
    pub fn fingerprint(&self) -> Result<String> {
        let bytes = render_csv(self).map_err(|e| PipelineError::persistence("<memory>", e))?;
        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        Ok(format!("{:x}", hasher.finalize()))
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write the cleaned table, replacing any existing file.
///
/// Contents go to a sibling staging file first and are renamed into place,
/// so the destination is either fully replaced or left untouched.
pub fn write_cleaned_csv(table: &CleanedTable, path: &Path) -> Result<()> {
    let bytes = render_csv(table).map_err(|e| PipelineError::persistence(path, e))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| PipelineError::persistence(parent, e))?;
    }

    let staging = staging_path(path);
    if let Err(e) = fs::write(&staging, &bytes) {
        let _ = fs::remove_file(&staging);
        return Err(PipelineError::persistence(&staging, e));
    }
    if let Err(e) = fs::rename(&staging, path) {
        let _ = fs::remove_file(&staging);
        return Err(PipelineError::persistence(path, e));
    }

    info!(path = %path.display(), rows = table.len(), bytes = bytes.len(), "cleaned table written");
    Ok(())
}

/// Read a cleaned file back into memory
pub fn read_cleaned_csv(path: &Path) -> Result<CleanedTable> {
    // Written with QuoteStyle::Never, so quotes are plain text on the way back
    let mut rdr = csv::ReaderBuilder::new()
        .quoting(false)
        .from_path(path)
        .map_err(|e| PipelineError::deserialization(path, e))?;

    let headers = rdr
        .headers()
        .map_err(|e| PipelineError::deserialization(path, e))?
        .clone();
    if headers.iter().ne(HEADER.iter().copied()) {
        return Err(PipelineError::deserialization(
            path,
            format!("unexpected header '{}'", headers.iter().collect::<Vec<_>>().join(",")),
        ));
    }

    let mut rows = Vec::new();
    for result in rdr.deserialize() {
        let row: CleanedRow = result.map_err(|e| PipelineError::deserialization(path, e))?;
        rows.push(row);
    }

    Ok(CleanedTable::new(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn row(id: u64, date: (i32, u32, u32), name: &str, subtype: &str, rating: f64, price: f64, revenue: f64) -> CleanedRow {
        let category = if subtype == "HotelRoom" { "Travel" } else { "Vacation" };
        CleanedRow {
            unique_id: id,
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            name: name.to_string(),
            category: category.to_string(),
            subtype: subtype.to_string(),
            rating,
            price,
            average_revenue: revenue,
        }
    }

    fn sample_table() -> CleanedTable {
        CleanedTable::new(vec![
            row(1, (2022, 11, 1), "Lake Cabin", "Cottage", 4.0, 150.0, 900.0),
            row(2, (2022, 11, 1), "City Inn", "HotelRoom", 4.0, 200.0, 1100.5),
        ])
    }

    #[test]
    fn test_render_layout() {
        let text = String::from_utf8(render_csv(&sample_table()).unwrap()).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "unique_id,date,name,category,type,rating,price,average_revenue");
        assert_eq!(lines[1], "1,2022-11-01,Lake Cabin,Vacation,Cottage,4,150,900");
        assert_eq!(lines[2], "2,2022-11-01,City Inn,Travel,HotelRoom,4,200,1100.5");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_render_does_not_quote() {
        let table = CleanedTable::new(vec![row(1, (2022, 1, 1), "Dunes, North", "BeachHouse", 5.0, 1.0, 1.0)]);
        let text = String::from_utf8(render_csv(&table).unwrap()).unwrap();
        assert!(text.contains(",Dunes, North,"));
        assert!(!text.contains('"'));
    }

    #[test]
    fn test_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lodging_data_cleaned.csv");
        let table = sample_table();

        write_cleaned_csv(&table, &path).unwrap();
        let read_back = read_cleaned_csv(&path).unwrap();

        assert_eq!(read_back, table);
    }

    #[test]
    fn test_round_trip_keeps_quote_characters() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("quoted.csv");
        let table = CleanedTable::new(vec![
            row(1, (2022, 11, 1), "\"Blue\" Lagoon Inn", "HotelRoom", 4.0, 200.0, 1100.0),
            row(2, (2022, 11, 2), "Sam's \"Hut\"", "Cottage", 3.5, 90.0, 400.0),
        ]);

        write_cleaned_csv(&table, &path).unwrap();
        let read_back = read_cleaned_csv(&path).unwrap();

        assert_eq!(read_back.rows[0].name, "\"Blue\" Lagoon Inn");
        assert_eq!(read_back, table);
    }

    #[test]
    fn test_write_overwrites_and_leaves_no_staging_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        fs::write(&path, "stale contents that are longer than the new file ...").unwrap();

        write_cleaned_csv(&CleanedTable::default(), &path).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "unique_id,date,name,category,type,rating,price,average_revenue\n"
        );
        assert!(!staging_path(&path).exists());
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deeper").join("out.csv");

        write_cleaned_csv(&sample_table(), &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_write_failure_is_persistence_error() {
        let dir = TempDir::new().unwrap();
        // A directory standing where the file should go
        let path = dir.path().join("taken");
        fs::create_dir(&path).unwrap();

        let err = write_cleaned_csv(&sample_table(), &path).unwrap_err();
        assert!(matches!(err, PipelineError::Persistence { .. }));
        assert!(!staging_path(&path).exists());
    }

    #[test]
    fn test_empty_table_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.csv");

        write_cleaned_csv(&CleanedTable::default(), &path).unwrap();
        let read_back = read_cleaned_csv(&path).unwrap();
        assert!(read_back.is_empty());
    }

    #[test]
    fn test_read_rejects_foreign_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("foreign.csv");
        fs::write(&path, "Date,Description,Amount\n12/31/2024,Coffee,-4.50\n").unwrap();

        let err = read_cleaned_csv(&path).unwrap_err();
        assert!(matches!(err, PipelineError::Deserialization { .. }));
    }

    #[test]
    fn test_fingerprint_is_stable() {
        let a = sample_table().fingerprint().unwrap();
        let b = sample_table().fingerprint().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);

        let mut changed = sample_table();
        changed.rows[0].price = 151.0;
        assert_ne!(changed.fingerprint().unwrap(), a);
    }
}
