//! Flag parsing for free-text command arguments.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

static FLAG_PATTERN: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"--?(.+?)(?: ([^-]*)|\s*$)").expect("flag pattern is valid"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagValue {
	Value(String),
	/// Flag given without a value, e.g. `--force`.
	Present,
}

impl FlagValue {
	pub fn as_str(&self) -> Option<&str> {
		match self {
			FlagValue::Value(v) => Some(v),
			FlagValue::Present => None,
		}
	}
}

pub type Flags = HashMap<String, FlagValue>;

/// Parse `-name value` / `--name value` / `--name` tokens out of `content`.
///
/// Returns the flags and the text starting at the first `--` (or the first
/// `-` when there is no double dash). Text before the flags is not kept:
/// with no flags the result is an empty map and an empty string.
///
/// ```
/// use command::flags::{parse_flags, FlagValue};
///
/// let (flags, rest) = parse_flags("please --foo bar --baz");
/// assert_eq!(flags["foo"], FlagValue::Value("bar".into()));
/// assert_eq!(flags["baz"], FlagValue::Present);
/// assert_eq!(rest, "--foo bar --baz");
/// ```
pub fn parse_flags(content: &str) -> (Flags, String) {
	let mut flags = Flags::new();
	for caps in FLAG_PATTERN.captures_iter(content) {
		let name = caps[1].to_string();
		let value = caps
			.get(2)
			.map(|m| m.as_str().trim())
			.filter(|v| !v.is_empty())
			.map_or(FlagValue::Present, |v| FlagValue::Value(v.to_string()));
		flags.insert(name, value);
	}

	if flags.is_empty() {
		return (flags, String::new());
	}

	match content.find("--").or_else(|| content.find('-')) {
		Some(start) => (flags, content[start..].to_string()),
		None => (Flags::new(), String::new()),
	}
}
