//! Character Feature Extraction
//!
//! Counts taken over the whole scheme-normalized URL in a single pass.

use once_cell::sync::Lazy;
use regex::Regex;

use super::vector::{FeatureExtractor, FeatureVector};

/// Unicode decimal digits plus the `Numeric_Type=Digit` code points
/// (superscripts, subscripts, circled and Ethiopic digits, ...).
static DIGIT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"[\p{Nd}\x{B2}\x{B3}\x{B9}\x{1369}-\x{1371}\x{19DA}\x{2070}\x{2074}-\x{2079}",
        r"\x{2080}-\x{2089}\x{2460}-\x{2468}\x{2474}-\x{247C}\x{2488}-\x{2490}\x{24EA}",
        r"\x{24F5}-\x{24FD}\x{24FF}\x{2776}-\x{277E}\x{2780}-\x{2788}\x{278A}-\x{2792}",
        r"\x{10A40}-\x{10A43}\x{10E60}-\x{10E68}\x{11052}-\x{1105A}\x{1F100}-\x{1F10A}]",
    ))
    .expect("digit pattern compiles")
});

/// True for any character counted into `num_digits`
pub fn is_digit(c: char) -> bool {
    let mut buf = [0u8; 4];
    DIGIT_PATTERN.is_match(c.encode_utf8(&mut buf))
}

/// Characters summed into `special_char_count`
pub const SPECIAL_CHARS: &[char] = &['%', '=', '?', '&', '!', '+'];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterFeatures {
    pub length: usize,
    pub dots: usize,
    pub hyphens: usize,
    pub at_symbols: usize,
    pub digits: usize,
    pub special_chars: usize,
}

impl CharacterFeatures {
    pub fn from_url(url: &str) -> Self {
        let mut counts = Self::default();

        for c in url.chars() {
            counts.length += 1;
            match c {
                '.' => counts.dots += 1,
                '-' => counts.hyphens += 1,
                '@' => counts.at_symbols += 1,
                c if is_digit(c) => counts.digits += 1,
                c if SPECIAL_CHARS.contains(&c) => counts.special_chars += 1,
                _ => {}
            }
        }

        counts
    }
}

impl FeatureExtractor for CharacterFeatures {
    fn extract(&self, vector: &mut FeatureVector) {
        vector.set_by_name("url_length", self.length as f32);
        vector.set_by_name("num_dots", self.dots as f32);
        vector.set_by_name("num_hyphens", self.hyphens as f32);
        vector.set_by_name("num_at_symbols", self.at_symbols as f32);
        vector.set_by_name("num_digits", self.digits as f32);
        vector.set_by_name("special_char_count", self.special_chars as f32);
    }
}
