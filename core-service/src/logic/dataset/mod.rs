//! Dataset Module - Labeled URL Corpus
//!
//! Loads the `URL,Label` training corpus. Only the label `bad` marks a URL
//! as malicious.

pub mod loader;
pub mod record;

#[cfg(test)]
mod tests;

pub use loader::{from_reader, load_csv, LABEL_COLUMN, URL_COLUMN};
pub use record::{is_malicious_label, DatasetSummary, LabeledUrl, MALICIOUS_LABEL};
