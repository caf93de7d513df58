//! CSV Loader
//!
//! Reads `URL,Label` rows. Header names are matched after trimming, extra
//! columns are ignored, and non-UTF-8 bytes are replaced rather than failing
//! the whole file.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ByteRecord, ReaderBuilder};

use super::record::{DatasetSummary, LabeledUrl};
use crate::error::{ClassifierError, ClassifierResult};

pub const URL_COLUMN: &str = "URL";
pub const LABEL_COLUMN: &str = "Label";

/// Load a labeled URL dataset from disk
pub fn load_csv(path: impl AsRef<Path>) -> ClassifierResult<Vec<LabeledUrl>> {
    let path = path.as_ref();
    log::info!("Loading dataset from {}", path.display());

    let file = File::open(path)
        .map_err(|e| ClassifierError::Dataset(format!("{}: {}", path.display(), e)))?;
    let (records, summary) = from_reader(file)?;

    log::info!(
        "Loaded {} URLs ({} malicious, {} safe, {} skipped)",
        summary.total,
        summary.malicious,
        summary.safe,
        summary.skipped
    );
    Ok(records)
}

pub fn from_reader<R: Read>(reader: R) -> ClassifierResult<(Vec<LabeledUrl>, DatasetSummary)> {
    let mut csv = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = csv.byte_headers()?.clone();
    let url_column = find_column(&headers, URL_COLUMN)?;
    let label_column = find_column(&headers, LABEL_COLUMN)?;

    let mut records = Vec::new();
    let mut skipped = 0;
    let mut row = ByteRecord::new();

    while csv.read_byte_record(&mut row)? {
        let url = field(&row, url_column);
        if url.is_empty() {
            skipped += 1;
            continue;
        }
        let label = field(&row, label_column);
        records.push(LabeledUrl::new(url, &label));
    }

    let summary = DatasetSummary::of(&records, skipped);
    Ok((records, summary))
}

fn find_column(headers: &ByteRecord, name: &str) -> ClassifierResult<usize> {
    headers
        .iter()
        .position(|h| String::from_utf8_lossy(h).trim() == name)
        .ok_or_else(|| ClassifierError::Dataset(format!("missing '{}' column", name)))
}

fn field(row: &ByteRecord, index: usize) -> String {
    row.get(index)
        .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
        .unwrap_or_default()
}
