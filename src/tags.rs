//! Doc comment markers (`+openapi-gen=true`, `+vendor:openapi-gen=false`)
//! and the description text that remains once they are removed.

use once_cell::sync::Lazy;
use regex::Regex;

static TAG_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+(?:(?P<prefix>[\w.-]+):)?(?P<name>[\w.-]+)(?:=(?P<value>.*))?$")
        .expect("tag regex is valid")
});

fn is_marker(line: &str) -> bool {
    line.trim_start().starts_with('+')
}

/// Value of the first `+name=value` (or `+prefix:name=value`) marker.
/// A bare `+name` yields an empty value.
pub fn extract_tag(doc: &str, name: &str) -> Option<String> {
    doc.lines()
        .map(str::trim)
        .filter_map(|line| TAG_LINE.captures(line))
        .find(|caps| &caps["name"] == name)
        .map(|caps| caps.name("value").map_or("", |m| m.as_str()).trim().to_string())
}

pub fn is_enabled(doc: &str, name: &str) -> bool {
    extract_tag(doc, name).as_deref() == Some("true")
}

/// Documentation with marker lines dropped, trimmed.
pub fn description(doc: &str) -> String {
    doc.lines()
        .filter(|line| !is_marker(line))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
