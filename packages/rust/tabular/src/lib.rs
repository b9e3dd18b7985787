//! Tabular boundary adapter: CSV in, annotated CSV out.
//!
//! The pipeline core never sees raw columns: this crate resolves which
//! header is the organization name and which is the website, builds typed
//! [`Record`]s, and writes them back out with every original column
//! preserved plus the annotation columns appended.

mod columns;

use std::path::Path;

use tracing::{debug, info};

use sitescout_shared::{Record, Result, RowMarker, SiteScoutError};

pub use columns::{resolve_columns, NAME_COLUMN_KEYWORDS, WEBSITE_COLUMN_KEYWORDS};

/// Annotation columns appended to the export, in order.
const ANNOTATION_COLUMNS: &[&str] = &[
    "is_duplicate",
    "duplicate_group",
    "found_url",
    "search_notes",
    "url_works",
    "verification_status",
    "company_type",
    "category_description",
    "row_marker",
];

/// Header used when the input has no website-like column.
const CREATED_WEBSITE_COLUMN: &str = "Website";

// ---------------------------------------------------------------------------
// LoadedTable
// ---------------------------------------------------------------------------

/// An input table with its resolved name/website columns.
#[derive(Debug, Clone)]
pub struct LoadedTable {
    /// Original headers, input order.
    pub headers: Vec<String>,
    /// Original cell values, one `Vec<String>` per row, padded to header width.
    pub rows: Vec<Vec<String>>,
    /// Index of the name column.
    pub name_col: usize,
    /// Index of the website column, if the input had one.
    pub website_col: Option<usize>,
}

impl LoadedTable {
    /// Build one [`Record`] per row.
    pub fn to_records(&self) -> Vec<Record> {
        self.rows
            .iter()
            .map(|row| {
                let name = row.get(self.name_col).cloned().unwrap_or_default();
                let website = self
                    .website_col
                    .and_then(|idx| row.get(idx))
                    .cloned()
                    .filter(|w| !w.trim().is_empty());
                Record::new(name.trim(), website)
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Load a CSV file and resolve its name/website columns.
///
/// Decodes UTF-8 (BOM tolerated) with a Latin-1 fallback for legacy
/// exports. Short rows are padded to the header width; a row wider than
/// the header is rejected rather than truncated. An unreadable file, an
/// empty table, or a table with no usable header row is a fatal input
/// error.
pub fn load_table(path: &Path) -> Result<LoadedTable> {
    let bytes = std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            SiteScoutError::input(format!(
                "input file not found: {}, check the path and try again",
                path.display()
            ))
        } else {
            SiteScoutError::io(path, e)
        }
    })?;

    let content = decode(&bytes);

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| SiteScoutError::input(format!("{}: unreadable header row: {e}", path.display())))?
        .iter()
        .map(str::to_string)
        .collect();

    if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
        return Err(SiteScoutError::input(format!(
            "{}: no usable header row",
            path.display()
        )));
    }

    let width = headers.len();
    let mut rows: Vec<Vec<String>> = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| {
            SiteScoutError::input(format!("{}: malformed CSV row: {e}", path.display()))
        })?;
        let mut row: Vec<String> = record.iter().map(str::to_string).collect();
        if row.len() > width {
            return Err(SiteScoutError::input(format!(
                "{}: row {} has {} cells but the header has {}",
                path.display(),
                rows.len() + 1,
                row.len(),
                width
            )));
        }
        row.resize(width, String::new());
        rows.push(row);
    }

    let (name_col, website_col) = resolve_columns(&headers);

    info!(
        path = %path.display(),
        rows = rows.len(),
        name_column = %headers[name_col],
        website_column = website_col.map(|i| headers[i].as_str()).unwrap_or("<none>"),
        "table loaded"
    );

    Ok(LoadedTable {
        headers,
        rows,
        name_col,
        website_col,
    })
}

/// Decode file bytes: UTF-8 first (BOM stripped), Latin-1 as the fallback.
fn decode(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(b"\xef\xbb\xbf").unwrap_or(bytes);

    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => {
            debug!("input is not UTF-8, decoding as Latin-1");
            // Latin-1 maps every byte 1:1 onto the first Unicode block.
            bytes.iter().map(|&b| b as char).collect()
        }
    }
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

/// Write the annotated table: original columns, updated website cells, and
/// the annotation columns.
///
/// Every input row appears exactly once, in input order. Absent values are
/// written as empty strings, never as missing columns. `url_works` and
/// `is_duplicate` render as "True"/"False" here and only here; the data
/// model keeps them as booleans.
pub fn export_table(path: &Path, table: &LoadedTable, records: &[Record]) -> Result<()> {
    if records.len() != table.rows.len() {
        return Err(SiteScoutError::validation(format!(
            "record count {} does not match row count {}",
            records.len(),
            table.rows.len()
        )));
    }

    let mut writer = csv::Writer::from_path(path).map_err(|e| {
        SiteScoutError::input(format!("{}: cannot write output: {e}", path.display()))
    })?;

    let mut header_row: Vec<String> = table.headers.clone();
    if table.website_col.is_none() {
        header_row.push(CREATED_WEBSITE_COLUMN.to_string());
    }
    header_row.extend(ANNOTATION_COLUMNS.iter().map(|c| c.to_string()));
    writer
        .write_record(&header_row)
        .map_err(|e| SiteScoutError::validation(format!("write header: {e}")))?;

    for (row, record) in table.rows.iter().zip(records) {
        let mut out: Vec<String> = row.clone();

        // The website cell reflects resolution results.
        let website = record.website.clone().unwrap_or_default();
        match table.website_col {
            Some(idx) => out[idx] = website,
            None => out.push(website),
        }

        out.push(render_bool(Some(record.is_duplicate)));
        out.push(record.duplicate_group.clone().unwrap_or_default());
        out.push(record.found_url.clone().unwrap_or_default());
        out.push(record.search_notes.clone());
        out.push(render_bool(record.url_works));
        out.push(record.verification_status.clone());
        out.push(record.company_type.clone());
        out.push(record.category_description.clone());
        out.push(RowMarker::for_record(record).as_str().to_string());

        writer
            .write_record(&out)
            .map_err(|e| SiteScoutError::validation(format!("write row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| SiteScoutError::io(path, e))?;

    info!(path = %path.display(), rows = records.len(), "annotated table written");
    Ok(())
}

/// Boolean rendering at the serialization boundary.
fn render_bool(value: Option<bool>) -> String {
    match value {
        Some(true) => "True".into(),
        Some(false) => "False".into(),
        None => String::new(),
    }
}
