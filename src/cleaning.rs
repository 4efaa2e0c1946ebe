// 🧹 Cleaning Pipeline - projection, coercion, imputation
//
// Canonical order:
//   1. project records into columns (input order kept)
//   2. coerce every column (bad values become missing + warning)
//   3. impute numeric columns with the median
//   4. impute categorical columns with the mode
//
// Rows are never added or dropped. Only cell values change.

use crate::error::{CoercionWarning, PipelineError, Result};
use crate::record::LodgingRecord;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

// ============================================================================
// COLUMNS
// ============================================================================

/// Header of the cleaned flat file, in column order
pub const HEADER: [&str; 8] = [
    "unique_id",
    "date",
    "name",
    "category",
    "type",
    "rating",
    "price",
    "average_revenue",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Column {
    Date,
    Name,
    Category,
    Subtype,
    Rating,
    Price,
    AverageRevenue,
}

impl Column {
    pub fn name(&self) -> &'static str {
        match self {
            Column::Date => "date",
            Column::Name => "name",
            Column::Category => "category",
            Column::Subtype => "type",
            Column::Rating => "rating",
            Column::Price => "price",
            Column::AverageRevenue => "average_revenue",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Column::Rating | Column::Price | Column::AverageRevenue)
    }
}

// ============================================================================
// STEP 1 - PROJECTION
// ============================================================================

/// Column-oriented copy of the raw record values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub ids: Vec<u64>,
    pub date: Vec<Option<String>>,
    pub name: Vec<Option<String>>,
    pub category: Vec<Option<String>>,
    pub subtype: Vec<Option<String>>,
    pub rating: Vec<Option<String>>,
    pub price: Vec<Option<String>>,
    pub average_revenue: Vec<Option<String>>,
}

impl RawTable {
    pub fn from_records(records: &[LodgingRecord]) -> Self {
        let mut table = RawTable::default();
        for record in records {
            table.ids.push(record.id);
            table.date.push(record.date.clone());
            table.name.push(record.name.clone());
            table.category.push(record.category.clone());
            table.subtype.push(record.subtype.clone());
            table.rating.push(record.rating.clone());
            table.price.push(record.price.clone());
            table.average_revenue.push(record.average_revenue.clone());
        }
        table
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

// ============================================================================
// STEP 2 - COERCION
// ============================================================================

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Parse a calendar date. Datetimes keep only their date part.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Some(date);
        }
    }

    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(value, format) {
            return Some(datetime.date());
        }
    }

    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|datetime| datetime.date_naive())
}

/// Parse a finite decimal number
pub fn parse_number(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
}

fn normalize_text(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

/// Typed columns, missing cells as `None`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoercedTable {
    pub ids: Vec<u64>,
    pub date: Vec<Option<NaiveDate>>,
    pub name: Vec<Option<String>>,
    pub category: Vec<Option<String>>,
    pub subtype: Vec<Option<String>>,
    pub rating: Vec<Option<f64>>,
    pub price: Vec<Option<f64>>,
    pub average_revenue: Vec<Option<f64>>,
}

impl CoercedTable {
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

fn coerce_column<T>(
    ids: &[u64],
    raw: &[Option<String>],
    column: Column,
    parse: impl Fn(&str) -> Option<T>,
    warnings: &mut Vec<CoercionWarning>,
) -> Vec<Option<T>> {
    ids.iter()
        .zip(raw)
        .map(|(id, value)| {
            let text = normalize_text(value)?;
            let parsed = parse(&text);
            if parsed.is_none() {
                warnings.push(CoercionWarning {
                    row_id: *id,
                    column: column.name().to_string(),
                    value: text,
                });
            }
            parsed
        })
        .collect()
}

/// Best-effort type coercion. Never fails: unparsable values become missing
/// and are reported as warnings.
pub fn coerce(raw: &RawTable) -> (CoercedTable, Vec<CoercionWarning>) {
    let mut warnings = Vec::new();
    let ids = &raw.ids;

    let table = CoercedTable {
        ids: ids.clone(),
        date: coerce_column(ids, &raw.date, Column::Date, parse_date, &mut warnings),
        name: raw.name.iter().map(normalize_text).collect(),
        category: raw.category.iter().map(normalize_text).collect(),
        subtype: raw.subtype.iter().map(normalize_text).collect(),
        rating: coerce_column(ids, &raw.rating, Column::Rating, parse_number, &mut warnings),
        price: coerce_column(ids, &raw.price, Column::Price, parse_number, &mut warnings),
        average_revenue: coerce_column(
            ids,
            &raw.average_revenue,
            Column::AverageRevenue,
            parse_number,
            &mut warnings,
        ),
    };

    for warning in &warnings {
        warn!(row_id = warning.row_id, column = %warning.column, value = %warning.value, "coercion failed, value treated as missing");
    }

    (table, warnings)
}

// ============================================================================
// STEP 3 - IMPUTATION STATISTICS
// ============================================================================

/// Median of the non-missing values. Even counts average the two middle values.
pub fn median(values: &[Option<f64>]) -> Option<f64> {
    let mut present: Vec<f64> = values.iter().flatten().copied().collect();
    if present.is_empty() {
        return None;
    }
    present.sort_by(|a, b| a.total_cmp(b));

    let mid = present.len() / 2;
    if present.len() % 2 == 0 {
        // halve first so two large finite values cannot overflow
        Some(present[mid - 1] / 2.0 + present[mid] / 2.0)
    } else {
        Some(present[mid])
    }
}

/// Most frequent non-missing value.
///
/// Ties resolve to the smallest tied value in natural order (chronological
/// for dates, byte order for text), so repeated runs pick the same value.
pub fn mode<T: Ord + Clone>(values: &[Option<T>]) -> Option<T> {
    let mut counts: BTreeMap<&T, usize> = BTreeMap::new();
    for value in values.iter().flatten() {
        *counts.entry(value).or_insert(0) += 1;
    }

    let mut best: Option<(&T, usize)> = None;
    for (value, count) in counts {
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((value, count)),
        }
    }
    best.map(|(value, _)| value.clone())
}

// ============================================================================
// CLEANED TABLE
// ============================================================================

/// One gap-free row of the cleaned table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanedRow {
    pub unique_id: u64,
    pub date: NaiveDate,
    pub name: String,
    pub category: String,
    #[serde(rename = "type")]
    pub subtype: String,
    pub rating: f64,
    pub price: f64,
    pub average_revenue: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CleanedTable {
    pub rows: Vec<CleanedRow>,
}

impl CleanedTable {
    pub fn new(rows: Vec<CleanedRow>) -> Self {
        CleanedTable { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn prices(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.price).collect()
    }

    pub fn ratings(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.rating).collect()
    }
}

// ============================================================================
// CLEANING REPORT
// ============================================================================

/// What imputation did to one column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnFill {
    pub column: Column,
    pub imputed: usize,
    /// Fill value as written to the flat file; `None` for an empty table
    pub fill_value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CleaningReport {
    pub rows: usize,
    pub warnings: Vec<CoercionWarning>,
    pub fills: Vec<ColumnFill>,
}

impl CleaningReport {
    pub fn imputed_total(&self) -> usize {
        self.fills.iter().map(|f| f.imputed).sum()
    }

    pub fn fill_for(&self, column: Column) -> Option<&ColumnFill> {
        self.fills.iter().find(|f| f.column == column)
    }

    pub fn summary(&self) -> String {
        format!(
            "{} rows cleaned, {} coercion warnings, {} cells imputed",
            self.rows,
            self.warnings.len(),
            self.imputed_total()
        )
    }
}

/// Render a number the way the flat file stores it (plain decimal)
pub fn format_number(value: f64) -> String {
    format!("{}", value)
}

// ============================================================================
// STEP 3 - IMPUTATION
// ============================================================================

fn missing_count<T>(values: &[Option<T>]) -> usize {
    values.iter().filter(|v| v.is_none()).count()
}

fn fill_numeric(values: Vec<Option<f64>>, column: Column, fills: &mut Vec<ColumnFill>) -> Result<Vec<f64>> {
    if values.is_empty() {
        fills.push(ColumnFill { column, imputed: 0, fill_value: None });
        return Ok(Vec::new());
    }

    let fill = median(&values).ok_or_else(|| PipelineError::NoData {
        column: column.name().to_string(),
    })?;
    let imputed = missing_count(&values);

    debug!(column = column.name(), median = fill, imputed, "numeric fill");
    fills.push(ColumnFill {
        column,
        imputed,
        fill_value: Some(format_number(fill)),
    });

    Ok(values.into_iter().map(|v| v.unwrap_or(fill)).collect())
}

fn fill_categorical<T: Ord + Clone + ToString>(
    values: Vec<Option<T>>,
    column: Column,
    fills: &mut Vec<ColumnFill>,
) -> Result<Vec<T>> {
    if values.is_empty() {
        fills.push(ColumnFill { column, imputed: 0, fill_value: None });
        return Ok(Vec::new());
    }

    let fill = mode(&values).ok_or_else(|| PipelineError::NoData {
        column: column.name().to_string(),
    })?;
    let imputed = missing_count(&values);

    debug!(column = column.name(), mode = %fill.to_string(), imputed, "categorical fill");
    fills.push(ColumnFill {
        column,
        imputed,
        fill_value: Some(fill.to_string()),
    });

    Ok(values
        .into_iter()
        .map(|v| v.unwrap_or_else(|| fill.clone()))
        .collect())
}

/// Fill every missing cell: numeric columns first (median), then
/// categorical columns (mode). Fails with `NoData` when a column of a
/// non-empty table has no valid value at all.
pub fn impute(table: CoercedTable) -> Result<(CleanedTable, Vec<ColumnFill>)> {
    let mut fills = Vec::new();

    let price = fill_numeric(table.price, Column::Price, &mut fills)?;
    let average_revenue = fill_numeric(table.average_revenue, Column::AverageRevenue, &mut fills)?;
    let rating = fill_numeric(table.rating, Column::Rating, &mut fills)?;

    let date = fill_categorical(table.date, Column::Date, &mut fills)?;
    let name = fill_categorical(table.name, Column::Name, &mut fills)?;
    let category = fill_categorical(table.category, Column::Category, &mut fills)?;
    let subtype = fill_categorical(table.subtype, Column::Subtype, &mut fills)?;

    let rows = table
        .ids
        .into_iter()
        .zip(date)
        .zip(name)
        .zip(category)
        .zip(subtype)
        .zip(rating)
        .zip(price)
        .zip(average_revenue)
        .map(
            |(((((((unique_id, date), name), category), subtype), rating), price), average_revenue)| {
                CleanedRow {
                    unique_id,
                    date,
                    name,
                    category,
                    subtype,
                    rating,
                    price,
                    average_revenue,
                }
            },
        )
        .collect();

    Ok((CleanedTable::new(rows), fills))
}

// ============================================================================
// PIPELINE
// ============================================================================

/// Run projection, coercion and imputation over a loaded collection.
/// No I/O happens here.
pub fn clean_records(records: &[LodgingRecord]) -> Result<(CleanedTable, CleaningReport)> {
    let raw = RawTable::from_records(records);
    let (coerced, warnings) = coerce(&raw);
    let (table, fills) = impute(coerced)?;

    let report = CleaningReport {
        rows: table.len(),
        warnings,
        fills,
    };
    info!("{}", report.summary());

    Ok((table, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{LodgingKind, RawLodging};

    fn some(value: &str) -> Option<String> {
        Some(value.to_string())
    }

    fn raw(
        date: Option<&str>,
        name: Option<&str>,
        subtype: Option<&str>,
        rating: Option<&str>,
        price: Option<&str>,
        average_revenue: Option<&str>,
    ) -> RawLodging {
        RawLodging {
            date: date.map(str::to_string),
            name: name.map(str::to_string),
            category: None,
            subtype: subtype.map(str::to_string),
            rating: rating.map(str::to_string),
            price: price.map(str::to_string),
            average_revenue: average_revenue.map(str::to_string),
        }
    }

    fn records(raws: Vec<RawLodging>) -> Vec<LodgingRecord> {
        crate::loader::assign_ids(raws)
    }

    fn lake_cabin_and_city_inn() -> Vec<LodgingRecord> {
        vec![
            LodgingRecord::new(
                1,
                LodgingKind::Cottage,
                some("2022-11-01"),
                some("Lake Cabin"),
                some("4"),
                some("150"),
                some("900"),
            ),
            LodgingRecord::new(
                2,
                LodgingKind::HotelRoom,
                some("bad-date"),
                some("City Inn"),
                some(""),
                some("200"),
                some("1100"),
            ),
        ]
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2022, 11, 1);
        assert_eq!(parse_date("2022-11-01"), expected);
        assert_eq!(parse_date("11/01/2022"), expected);
        assert_eq!(parse_date("2022/11/01"), expected);
        assert_eq!(parse_date("2022-11-01 13:45:00"), expected);
        assert_eq!(parse_date("2022-11-01T13:45:00"), expected);
        assert_eq!(parse_date("2022-11-01T23:45:00+02:00"), expected);
        assert_eq!(parse_date(" 2022-11-01 "), expected);
        assert_eq!(parse_date("bad-date"), None);
        assert_eq!(parse_date("2022-13-40"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("150"), Some(150.0));
        assert_eq!(parse_number(" 4.5 "), Some(4.5));
        assert_eq!(parse_number("-12"), Some(-12.0));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("four"), None);
        assert_eq!(parse_number("$150"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
    }

    #[test]
    fn test_median_odd_even_and_missing() {
        assert_eq!(median(&[Some(10.0), Some(20.0), None, Some(40.0)]), Some(20.0));
        assert_eq!(median(&[Some(4.0), Some(1.0), Some(3.0), Some(2.0)]), Some(2.5));
        assert_eq!(median(&[Some(7.0)]), Some(7.0));
        assert_eq!(median(&[None, None]), None);
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn test_median_of_large_values_stays_finite() {
        let fill = median(&[Some(1.5e308), Some(1.6e308)]).unwrap();
        assert!(fill.is_finite());
        assert!(fill >= 1.5e308 && fill <= 1.6e308);

        let records = records(vec![
            raw(Some("2022-01-01"), Some("A"), Some("Cottage"), Some("1"), Some("1.5e308"), Some("1")),
            raw(Some("2022-01-01"), Some("B"), Some("Cottage"), Some("1"), Some("1.6e308"), Some("1")),
            raw(Some("2022-01-01"), Some("C"), Some("Cottage"), Some("1"), Some(""), Some("1")),
        ]);
        let (table, _) = clean_records(&records).unwrap();
        assert!(table.prices().iter().all(|p| p.is_finite()));
    }

    #[test]
    fn test_mode_most_frequent() {
        let values = vec![some("b"), some("a"), some("b"), None, some("c")];
        assert_eq!(mode(&values), some("b"));
    }

    #[test]
    fn test_mode_tie_picks_smallest() {
        let values = vec![some("Zebra Inn"), some("Alpine Lodge"), some("Zebra Inn"), some("Alpine Lodge")];
        assert_eq!(mode(&values), some("Alpine Lodge"));

        let d1 = NaiveDate::from_ymd_opt(2022, 12, 1).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
        assert_eq!(mode(&[Some(d1), Some(d2)]), Some(d2));
    }

    #[test]
    fn test_mode_all_missing() {
        let values: Vec<Option<String>> = vec![None, None];
        assert_eq!(mode(&values), None);
    }

    #[test]
    fn test_projection_preserves_order() {
        let records = lake_cabin_and_city_inn();
        let raw = RawTable::from_records(&records);

        assert_eq!(raw.len(), 2);
        assert_eq!(raw.ids, vec![1, 2]);
        assert_eq!(raw.name, vec![some("Lake Cabin"), some("City Inn")]);
        assert_eq!(raw.category, vec![some("Vacation"), some("Travel")]);
    }

    #[test]
    fn test_coercion_reports_warnings_only_for_bad_values() {
        let records = lake_cabin_and_city_inn();
        let (coerced, warnings) = coerce(&RawTable::from_records(&records));

        assert_eq!(coerced.date[1], None);
        assert_eq!(coerced.rating[1], None);
        assert_eq!(coerced.price, vec![Some(150.0), Some(200.0)]);

        // Empty rating is simply missing; only the bad date is a warning
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].row_id, 2);
        assert_eq!(warnings[0].column, "date");
        assert_eq!(warnings[0].value, "bad-date");
    }

    #[test]
    fn test_blank_text_is_missing() {
        let records = records(vec![
            raw(Some("2022-01-01"), Some("   "), Some("Cottage"), Some("3"), Some("10"), Some("100")),
            raw(Some("2022-01-02"), Some("Harbor View"), Some("Cottage"), Some("3"), Some("10"), Some("100")),
        ]);
        let (coerced, _) = coerce(&RawTable::from_records(&records));
        assert_eq!(coerced.name, vec![None, some("Harbor View")]);
    }

    #[test]
    fn test_scenario_lake_cabin_city_inn() {
        let records = lake_cabin_and_city_inn();
        let (table, report) = clean_records(&records).unwrap();

        assert_eq!(table.len(), 2);
        let city_inn = &table.rows[1];
        assert_eq!(city_inn.date, NaiveDate::from_ymd_opt(2022, 11, 1).unwrap());
        assert_eq!(city_inn.rating, 4.0);
        assert_eq!(city_inn.category, "Travel");
        assert_eq!(city_inn.subtype, "HotelRoom");

        assert_eq!(report.fill_for(Column::Rating).unwrap().imputed, 1);
        assert_eq!(report.fill_for(Column::Date).unwrap().fill_value.as_deref(), Some("2022-11-01"));
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_scenario_numeric_median_fill() {
        let records = records(vec![
            raw(Some("2022-01-01"), Some("A"), Some("Cottage"), Some("1"), Some("10"), Some("1")),
            raw(Some("2022-01-01"), Some("B"), Some("Cottage"), Some("1"), Some("20"), Some("1")),
            raw(Some("2022-01-01"), Some("C"), Some("Cottage"), Some("1"), None, Some("1")),
            raw(Some("2022-01-01"), Some("D"), Some("Cottage"), Some("1"), Some("40"), Some("1")),
        ]);
        let (table, _) = clean_records(&records).unwrap();

        assert_eq!(table.prices(), vec![10.0, 20.0, 20.0, 40.0]);
    }

    #[test]
    fn test_imputed_values_match_pre_imputation_statistics() {
        let records = records(vec![
            raw(Some("2022-03-01"), Some("A"), Some("Cottage"), Some("5"), Some("100"), Some("700")),
            raw(None, Some("B"), None, None, Some("300"), None),
            raw(Some("2022-03-01"), None, Some("HotelRoom"), Some("2"), None, Some("900")),
            raw(Some("2022-04-01"), Some("B"), Some("HotelRoom"), Some("3"), Some("250"), Some("800")),
        ]);
        let raw_table = RawTable::from_records(&records);
        let (coerced, _) = coerce(&raw_table);

        let expected_rating = median(&coerced.rating).unwrap();
        let expected_price = median(&coerced.price).unwrap();
        let expected_date = mode(&coerced.date).unwrap();
        let expected_name = mode(&coerced.name).unwrap();
        let expected_subtype = mode(&coerced.subtype).unwrap();

        let (table, _) = impute(coerced.clone()).unwrap();

        assert_eq!(table.len(), records.len());
        assert_eq!(table.rows[1].rating, expected_rating);
        assert_eq!(table.rows[2].price, expected_price);
        assert_eq!(table.rows[1].date, expected_date);
        assert_eq!(table.rows[2].name, expected_name);
        assert_eq!(table.rows[1].subtype, expected_subtype);

        assert_eq!(expected_rating, 3.0);
        assert_eq!(expected_price, 250.0);
        assert_eq!(expected_name, "B");
        assert_eq!(expected_subtype, "HotelRoom");
    }

    #[test]
    fn test_known_values_untouched() {
        let records = lake_cabin_and_city_inn();
        let (table, _) = clean_records(&records).unwrap();

        let cabin = &table.rows[0];
        assert_eq!(cabin.unique_id, 1);
        assert_eq!(cabin.name, "Lake Cabin");
        assert_eq!(cabin.price, 150.0);
        assert_eq!(cabin.average_revenue, 900.0);
    }

    #[test]
    fn test_no_data_column_is_fatal() {
        let records = records(vec![
            raw(Some("2022-01-01"), Some("A"), Some("Cottage"), Some("4"), None, Some("1")),
            raw(Some("2022-01-02"), Some("B"), Some("Cottage"), Some("4"), Some("oops"), Some("1")),
        ]);

        let err = clean_records(&records).unwrap_err();
        match err {
            PipelineError::NoData { column } => assert_eq!(column, "price"),
            other => panic!("expected NoData, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_input_gives_empty_table() {
        let (table, report) = clean_records(&[]).unwrap();

        assert!(table.is_empty());
        assert_eq!(report.rows, 0);
        assert_eq!(report.fills.len(), 7);
        assert!(report.fills.iter().all(|f| f.imputed == 0 && f.fill_value.is_none()));
    }

    #[test]
    fn test_cleaning_is_deterministic() {
        let records = records(vec![
            raw(Some("2022-01-01"), Some("Tie B"), Some("Cottage"), Some("4"), Some("10"), Some("5")),
            raw(Some("2022-01-02"), Some("Tie A"), Some("BeachHouse"), None, None, None),
            raw(None, None, None, Some("2"), Some("30"), Some("7")),
        ]);

        let first = clean_records(&records).unwrap();
        let second = clean_records(&records).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.0.rows[2].name, "Tie A");
        assert_eq!(first.0.rows[2].subtype, "BeachHouse");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(150.0), "150");
        assert_eq!(format_number(4.5), "4.5");
        assert_eq!(format_number(1100.25), "1100.25");
    }

    #[test]
    fn test_column_names_match_header() {
        let columns = [
            Column::Date,
            Column::Name,
            Column::Category,
            Column::Subtype,
            Column::Rating,
            Column::Price,
            Column::AverageRevenue,
        ];
        let names: Vec<_> = columns.iter().map(|c| c.name()).collect();
        assert_eq!(names, HEADER[1..].to_vec());
        assert!(Column::Rating.is_numeric());
        assert!(!Column::Subtype.is_numeric());
    }
}
