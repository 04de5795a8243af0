/// Substrings that count as documentation.
pub const DOCUMENTATION_MARKERS: [&str; 3] = ["\"\"\"", "'''", "#"];

/// True when `source` contains a docstring delimiter or a `#` anywhere.
///
/// Deliberately coarse: a `#` inside a string literal counts too.
pub fn has_documentation(source: &str) -> bool {
    DOCUMENTATION_MARKERS.iter().any(|marker| source.contains(marker))
}
