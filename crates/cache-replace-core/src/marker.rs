//! Placeholder markers
//!
//! A marker is the literal tag left in rendered output where dynamic content
//! is injected after the fragment comes out of cache:
//!
//! ```text
//! <cr name>
//! ```
//!
//! `cr` is not a valid HTML element, so a marker that is never replaced is
//! ignored by browsers instead of breaking the surrounding markup. There is no
//! decode step: markers are found again by literal substring search.

use std::fmt::Display;

/// Opening delimiter of every marker
pub const MARKER_OPEN: &str = "<cr ";

/// Closing delimiter of every marker
pub const MARKER_CLOSE: &str = ">";

/// Build the marker for a placeholder name
///
/// Names are not validated. A name containing `>` yields a marker that can
/// collide with other names.
pub fn marker(name: impl Display) -> String {
    format!("{}{}{}", MARKER_OPEN, name, MARKER_CLOSE)
}

/// List the names of markers still present in `text`, in order of appearance
pub fn find_markers(text: &str) -> Vec<&str> {
    let mut names = Vec::new();
    let mut pos = 0;

    while let Some(open) = text[pos..].find(MARKER_OPEN) {
        let name_start = pos + open + MARKER_OPEN.len();
        match text[name_start..].find(MARKER_CLOSE) {
            Some(close) => {
                names.push(&text[name_start..name_start + close]);
                pos = name_start + close + MARKER_CLOSE.len();
            }
            None => break,
        }
    }

    names
}
