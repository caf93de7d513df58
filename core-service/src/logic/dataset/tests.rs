use super::loader::{from_reader, load_csv};
use super::record::{is_malicious_label, DatasetSummary, LabeledUrl};
use crate::error::ClassifierError;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_label_normalization() {
    assert!(is_malicious_label("bad"));
    assert!(is_malicious_label(" BAD "));
    assert!(is_malicious_label("Bad\t"));
    assert!(!is_malicious_label("good"));
    assert!(!is_malicious_label(""));
    assert!(!is_malicious_label("badly"));
}

#[test]
fn test_load_csv_from_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("urls.csv");
    fs::write(
        &path,
        "URL,Label\n\
         nobell.it/70ffb52d079109dca5664cce6f317373782/login.SkyPe.com/en/cgi-bin/verification/login/,bad\n\
         www.dghjdgf.com/paypal.co.uk/cycgi-bin/webscrcmd=_home-customer&nav=1/loading.php,bad\n\
         github.com/rust-lang/rust,good\n",
    )
    .unwrap();

    let records = load_csv(&path).unwrap();
    assert_eq!(records.len(), 3);
    assert!(records[0].malicious);
    assert!(records[1].malicious);
    assert_eq!(records[2], LabeledUrl { url: "github.com/rust-lang/rust".into(), malicious: false });
}

#[test]
fn test_headers_are_trimmed_and_extra_columns_ignored() {
    let data = " Label , URL ,source\ngood,example.com,kaggle\n Bad ,evil.tk/login,kaggle\n";
    let (records, summary) = from_reader(data.as_bytes()).unwrap();

    assert_eq!(records[0].url, "example.com");
    assert!(!records[0].malicious);
    assert!(records[1].malicious);
    assert_eq!(summary, DatasetSummary { total: 2, malicious: 1, safe: 1, skipped: 0 });
}

#[test]
fn test_empty_urls_are_dropped() {
    let data = "URL,Label\n,bad\nexample.com,good\n,good\n";
    let (records, summary) = from_reader(data.as_bytes()).unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(summary.skipped, 2);
}

#[test]
fn test_quoted_urls_with_commas() {
    let data = "URL,Label\n\"http://a.com/?q=1,2\",bad\n";
    let (records, _) = from_reader(data.as_bytes()).unwrap();
    assert_eq!(records[0].url, "http://a.com/?q=1,2");
}

#[test]
fn test_invalid_utf8_is_replaced() {
    let mut data = b"URL,Label\nexample.com/".to_vec();
    data.extend_from_slice(&[0xff, 0xfe]);
    data.extend_from_slice(b",good\n");

    let (records, _) = from_reader(data.as_slice()).unwrap();
    assert_eq!(records.len(), 1);
    assert!(records[0].url.starts_with("example.com/"));
}

#[test]
fn test_missing_column_is_an_error() {
    let result = from_reader("address,Label\nexample.com,good\n".as_bytes());
    assert!(matches!(result, Err(ClassifierError::Dataset(msg)) if msg.contains("URL")));
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = tempdir().unwrap();
    let result = load_csv(dir.path().join("absent.csv"));
    assert!(matches!(result, Err(ClassifierError::Dataset(_))));
}
