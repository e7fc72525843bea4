//! Raw-value parsers for environment-sourced settings
//!
//! These are pure functions over the raw strings read from the process
//! environment. They never fail: malformed input degrades to a well-defined
//! value instead of an error, so configuration loading stays infallible.

/// Parse a flag value by exact comparison against the literal `"True"`.
///
/// Only the exact string `True` enables the flag. Any other value, including
/// `true`, `TRUE`, `1`, `yes`, and the empty string, resolves to `false`.
/// This contract is deliberately strict; deployments rely on it, so do not
/// loosen it without migrating every consumer of the affected variables.
///
/// # Examples
///
/// ```
/// use stagehand_conf::parse::parse_bool_strict;
///
/// assert!(parse_bool_strict("True"));
/// assert!(!parse_bool_strict("true"));
/// assert!(!parse_bool_strict("1"));
/// assert!(!parse_bool_strict(""));
/// ```
pub fn parse_bool_strict(raw: &str) -> bool {
	raw == "True"
}

/// Split a comma-separated value into an ordered list.
///
/// Segments are kept verbatim: surrounding whitespace is not stripped and
/// empty segments are preserved, so `"a,,b"` yields three entries. Callers
/// that need normalized host names must normalize at the point of use.
///
/// # Examples
///
/// ```
/// use stagehand_conf::parse::parse_list;
///
/// assert_eq!(parse_list("a.com,b.com"), vec!["a.com", "b.com"]);
/// assert_eq!(parse_list("solo"), vec!["solo"]);
/// ```
pub fn parse_list(raw: &str) -> Vec<String> {
	raw.split(',').map(|s| s.to_string()).collect()
}
