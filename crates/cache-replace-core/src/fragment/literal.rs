//! Literal substring replacement
//!
//! Markers are matched as plain text, never as patterns: characters such as
//! `.`, `*` or `$` in a placeholder name have no special meaning, and the
//! replacement text is inserted verbatim.

/// Replace every non-overlapping occurrence of `needle` in `buffer`
///
/// Scans left to right and splices `replacement` in place of each match.
/// Inserted text is never rescanned, so a replacement that contains `needle`
/// does not recurse. Returns the number of occurrences replaced; the buffer is
/// left untouched when there are none.
pub(crate) fn replace_all(buffer: &mut String, needle: &str, replacement: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }

    let mut output = String::new();
    let mut count = 0;
    let mut pos = 0;

    while let Some(found) = buffer[pos..].find(needle) {
        if count == 0 {
            output.reserve(buffer.len());
        }
        let start = pos + found;
        output.push_str(&buffer[pos..start]);
        output.push_str(replacement);
        pos = start + needle.len();
        count += 1;
    }

    if count > 0 {
        output.push_str(&buffer[pos..]);
        *buffer = output;
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replaces_every_occurrence() {
        let mut buffer = "<cr x>-<cr x>".to_string();
        assert_eq!(replace_all(&mut buffer, "<cr x>", "Y"), 2);
        assert_eq!(buffer, "Y-Y");
    }

    #[test]
    fn test_no_match_leaves_buffer() {
        let mut buffer = "plain".to_string();
        assert_eq!(replace_all(&mut buffer, "<cr x>", "Y"), 0);
        assert_eq!(buffer, "plain");
    }

    #[test]
    fn test_replacement_is_not_rescanned() {
        let mut buffer = "<cr a>".to_string();
        assert_eq!(replace_all(&mut buffer, "<cr a>", "<cr a><cr a>"), 1);
        assert_eq!(buffer, "<cr a><cr a>");
    }

    #[test]
    fn test_pattern_characters_are_literal() {
        let mut buffer = "<cr a.b> <cr axb>".to_string();
        assert_eq!(replace_all(&mut buffer, "<cr a.b>", "$1"), 1);
        assert_eq!(buffer, "$1 <cr axb>");
    }

    #[test]
    fn test_multibyte_text() {
        let mut buffer = "héllo <cr név> wörld".to_string();
        replace_all(&mut buffer, "<cr név>", "ünïcode");
        assert_eq!(buffer, "héllo ünïcode wörld");
    }

    #[test]
    fn test_empty_needle_is_noop() {
        let mut buffer = "abc".to_string();
        assert_eq!(replace_all(&mut buffer, "", "x"), 0);
        assert_eq!(buffer, "abc");
    }
}
