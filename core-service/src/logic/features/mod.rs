//! Features Module - URL Feature Extraction Engine
//!
//! Turns a raw URL string into the 13-slot vector both classifiers consume.
//! Each signal group (`chars`, `host`, `lexicon`) writes its own slots by
//! name, so the order lives only in `layout.rs`.

pub mod layout;
pub mod vector;
pub mod url;
pub mod chars;
pub mod host;
pub mod lexicon;


pub use layout::{
    feature_index, layout_hash, LayoutInfo, LayoutMismatchError,
    FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION,
};
pub use vector::{FeatureExtractor, FeatureVector, FeatureVectorBuilder};
pub use url::{normalize, ParsedUrl};

use chars::CharacterFeatures;
use host::HostFeatures;
use lexicon::LexicalFeatures;

/// Extract the feature vector for a URL.
///
/// Total over all strings: parse failures degrade host features to zero.
pub fn extract_features(url: &str) -> FeatureVector {
    let url = normalize(url);
    let url_lower = url.to_lowercase();
    let parsed = ParsedUrl::parse(&url);

    FeatureVectorBuilder::new()
        .with(&CharacterFeatures::from_url(&url))
        .with(&HostFeatures::from_parsed(&url_lower, &parsed))
        .with(&LexicalFeatures::from_lower(&url_lower))
        .build()
}
