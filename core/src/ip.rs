//! Dotted-quad IPv4 matching.
//!
//! Every parser in the workspace finds addresses through this module. The
//! match is purely lexical: four groups of one to three digits separated by
//! dots, bounded by word boundaries. Octet ranges are not checked, so
//! `999.999.999.999` is accepted.

use regex::Regex;
use std::sync::LazyLock;

// SAFETY: These regexes are compile-time constants and are validated by tests.
static IPV4_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}\b").expect("static regex must compile")
});
static IPV4_EXACT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}$").expect("static regex must compile")
});

/// Returns the first IPv4-shaped substring of `text`.
///
/// Behaves the same whether `text` is a single whitespace token or a whole
/// line, since only the first match is reported.
///
/// # Examples
///
/// ```
/// use netsift_core::find_ipv4;
///
/// assert_eq!(find_ipv4("AU-JIM-EPCR-WAP16-192.168.55.104"), Some("192.168.55.104"));
/// assert_eq!(find_ipv4("no address here"), None);
/// ```
pub fn find_ipv4(text: &str) -> Option<&str> {
    IPV4_RE.find(text).map(|m| m.as_str())
}

/// Like [`find_ipv4`], but also returns the byte offset where the address
/// starts, so callers can look at the text preceding it.
///
/// # Examples
///
/// ```
/// use netsift_core::find_ipv4_with_offset;
///
/// let line = "CORE-SW1 - 10.0.0.1";
/// let (offset, ip) = find_ipv4_with_offset(line).unwrap();
/// assert_eq!(ip, "10.0.0.1");
/// assert_eq!(&line[..offset], "CORE-SW1 - ");
/// ```
pub fn find_ipv4_with_offset(text: &str) -> Option<(usize, &str)> {
    IPV4_RE.find(text).map(|m| (m.start(), m.as_str()))
}

/// Returns `true` when the whole of `candidate` is IPv4-shaped.
pub fn is_ipv4_shape(candidate: &str) -> bool {
    IPV4_EXACT_RE.is_match(candidate)
}
