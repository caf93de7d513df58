//! Lenient URL Parsing
//!
//! Splits a URL into scheme / network location / path the way a forgiving
//! browser-agnostic splitter does. The only checks are on the host: bracketed
//! hosts must be IPv6 (or IPvFuture), and a non-ASCII host must not turn into
//! a delimiter under NFKC. Parsing is total. Input that fails a check yields
//! an empty, degraded value and every dependent feature falls back to zero.

use std::borrow::Cow;
use std::net::Ipv6Addr;

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Prefix added to URLs that do not start with `http`
pub const DEFAULT_SCHEME_PREFIX: &str = "http://";

/// Schemes whose last path segment may carry `;params`
const SCHEMES_WITH_PARAMS: &[&str] = &[
    "", "ftp", "hdl", "prospero", "http", "imap", "https", "shttp",
    "rtsp", "rtspu", "sip", "sips", "mms", "sftp", "tel",
];

/// Removed anywhere in the URL before splitting
const UNSAFE_CHARS: &[char] = &['\t', '\r', '\n'];

/// Characters a host must not gain through NFKC normalization
const NETLOC_DELIMITERS: &[char] = &['/', '?', '#', '@', ':'];

static IPV_FUTURE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^v[a-fA-F0-9]+\..+$").expect("IPvFuture pattern compiles"));

/// Dotted quad anywhere in the host. Octet ranges are not checked.
static IPV4_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+\.\d+\.\d+\.\d+").expect("IPv4 pattern compiles"));

/// Prefix `http://` unless the URL already starts with `http`.
///
/// Shared by the extractor, the explainer and the allowlist so all three see
/// the same string.
pub fn normalize(url: &str) -> Cow<'_, str> {
    if url.starts_with("http") {
        Cow::Borrowed(url)
    } else {
        Cow::Owned(format!("{}{}", DEFAULT_SCHEME_PREFIX, url))
    }
}

/// True if the network location contains a dotted-quad IPv4 pattern
pub fn has_ipv4_host(netloc: &str) -> bool {
    IPV4_PATTERN.is_match(netloc)
}

// ============================================================================
// PARSED URL
// ============================================================================

/// Why a URL could not be split
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseDegraded {
    /// `[` without `]` (or the reverse) in the network location
    UnbalancedBrackets,
    /// Bracketed host is neither IPv6 nor `vX.future`
    InvalidBracketedHost,
    /// Non-ASCII host whose NFKC form contains `/ ? # @ :`
    NormalizedDelimiter,
}

/// Scheme, network location and path of a URL
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedUrl {
    pub scheme: String,
    /// `userinfo@host:port`, verbatim
    pub netloc: String,
    pub path: String,
    degraded: Option<ParseDegraded>,
}

impl ParsedUrl {
    /// Never fails: malformed input produces an empty degraded value
    pub fn parse(url: &str) -> Self {
        match split(url) {
            Ok(parsed) => parsed,
            Err(reason) => {
                log::debug!("URL parse degraded ({:?}): {}", reason, url);
                Self {
                    degraded: Some(reason),
                    ..Self::default()
                }
            }
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded.is_some()
    }

    pub fn degraded_reason(&self) -> Option<ParseDegraded> {
        self.degraded
    }

    /// Dot-separated labels in the network location, minus the registrable pair
    pub fn subdomain_count(&self) -> usize {
        self.netloc.split('.').count().saturating_sub(2)
    }

    pub fn has_ipv4_host(&self) -> bool {
        has_ipv4_host(&self.netloc)
    }
}

fn split(url: &str) -> Result<ParsedUrl, ParseDegraded> {
    let url = strip_unsafe(url);
    let (scheme, rest) = split_scheme(&url);

    let (netloc, rest) = match rest.strip_prefix("//") {
        Some(after) => {
            let end = after
                .find(|c| matches!(c, '/' | '?' | '#'))
                .unwrap_or(after.len());
            (&after[..end], &after[end..])
        }
        None => ("", rest),
    };

    check_brackets(netloc)?;

    let rest = rest.split_once('#').map_or(rest, |(before, _)| before);
    let rest = rest.split_once('?').map_or(rest, |(before, _)| before);

    check_normalized_netloc(netloc)?;

    let path = if SCHEMES_WITH_PARAMS.contains(&scheme.as_str()) {
        strip_params(rest)
    } else {
        rest
    };

    Ok(ParsedUrl {
        scheme,
        netloc: netloc.to_string(),
        path: path.to_string(),
        degraded: None,
    })
}

/// Drop leading C0 controls and spaces, then every tab, CR and LF
fn strip_unsafe(url: &str) -> Cow<'_, str> {
    let url = url.trim_start_matches(|c: char| c <= ' ');
    if url.contains(UNSAFE_CHARS) {
        Cow::Owned(url.chars().filter(|c| !UNSAFE_CHARS.contains(c)).collect())
    } else {
        Cow::Borrowed(url)
    }
}

fn check_brackets(netloc: &str) -> Result<(), ParseDegraded> {
    let opened = netloc.contains('[');
    if opened != netloc.contains(']') {
        return Err(ParseDegraded::UnbalancedBrackets);
    }
    if !opened {
        return Ok(());
    }

    let bracketed = netloc.split_once('[').map_or("", |(_, after)| after);
    let host = bracketed.split_once(']').map_or(bracketed, |(host, _)| host);
    if is_valid_bracketed_host(host) {
        Ok(())
    } else {
        Err(ParseDegraded::InvalidBracketedHost)
    }
}

/// IPv6 with an optional non-empty `%scope`, or an IPvFuture literal
fn is_valid_bracketed_host(host: &str) -> bool {
    if host.starts_with('v') {
        return IPV_FUTURE_PATTERN.is_match(host);
    }

    let address = match host.split_once('%') {
        Some((_, scope)) if scope.is_empty() || scope.contains('%') => return false,
        Some((address, _)) => address,
        None => host,
    };
    address.parse::<Ipv6Addr>().is_ok()
}

fn check_normalized_netloc(netloc: &str) -> Result<(), ParseDegraded> {
    if netloc.is_ascii() {
        return Ok(());
    }

    let stripped: String = netloc
        .chars()
        .filter(|c| !matches!(c, '@' | ':' | '#' | '?'))
        .collect();
    let normalized: String = stripped.nfkc().collect();
    if normalized != stripped && normalized.contains(NETLOC_DELIMITERS) {
        return Err(ParseDegraded::NormalizedDelimiter);
    }
    Ok(())
}

/// Scheme is the text before the first ':' when it looks like one
fn split_scheme(url: &str) -> (String, &str) {
    if let Some(colon) = url.find(':') {
        let candidate = &url[..colon];
        let starts_alpha = candidate
            .chars()
            .next()
            .map_or(false, |c| c.is_ascii_alphabetic());
        let valid = candidate
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));

        if starts_alpha && valid {
            return (candidate.to_ascii_lowercase(), &url[colon + 1..]);
        }
    }
    (String::new(), url)
}

/// Drop `;params` from the last path segment
fn strip_params(path: &str) -> &str {
    let segment_start = path.rfind('/').unwrap_or(0);
    match path[segment_start..].find(';') {
        Some(offset) => &path[..segment_start + offset],
        None => path,
    }
}
