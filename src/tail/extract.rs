/// Result of one backward scan over the running buffer
#[derive(Debug, PartialEq, Eq)]
pub struct Extracted<'a> {
    /// Every line found so far, oldest first
    pub lines: Vec<String>,
    /// Prefix of the buffer before the earliest newline consumed. Its first
    /// line may still be partial, so it waits for the next chunk.
    pub remaining: &'a [u8],
}

/// Split complete lines off the end of `buffer`.
///
/// Newly found lines are placed in front of `existing`, since scanning
/// backward always discovers lines that come earlier in the file. Scanning
/// stops once `requested` lines are known; anything before the last boundary
/// consumed is handed back untouched in `remaining`.
pub fn extract_lines(
    buffer: &[u8],
    requested: usize,
    skip_blank: bool,
    existing: Vec<String>,
) -> Extracted<'_> {
    let mut end = buffer.len();
    let mut found = Vec::new();

    while existing.len() + found.len() < requested {
        let Some(newline) = buffer[..end].iter().rposition(|&b| b == b'\n') else {
            break;
        };
        let line = &buffer[newline + 1..end];
        end = newline;

        if skip_blank && line.is_empty() {
            continue;
        }
        found.push(decode(line));
    }

    found.reverse();
    found.extend(existing);

    Extracted {
        lines: found,
        remaining: &buffer[..end],
    }
}

/// `\n` never occurs inside a multi-byte UTF-8 sequence, so a complete line
/// always decodes the same way no matter where the chunks were cut.
pub(crate) fn decode(line: &[u8]) -> String {
    String::from_utf8_lossy(line).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_newline_returns_buffer_unchanged() {
        let out = extract_lines(b"partial", 3, false, Vec::new());
        assert!(out.lines.is_empty());
        assert_eq!(out.remaining, b"partial");
    }

    #[test]
    fn test_splits_lines_in_file_order() {
        let out = extract_lines(b"head\none\ntwo", 5, false, Vec::new());
        assert_eq!(out.lines, strings(&["one", "two"]));
        assert_eq!(out.remaining, b"head");
    }

    #[test]
    fn test_stops_at_requested_count() {
        let out = extract_lines(b"a\nb\nc\nd", 2, false, Vec::new());
        assert_eq!(out.lines, strings(&["c", "d"]));
        // Earlier content is left for the caller, not scanned
        assert_eq!(out.remaining, b"a\nb");
    }

    #[test]
    fn test_existing_lines_count_toward_limit() {
        let existing = strings(&["later"]);
        let out = extract_lines(b"x\ny\nz", 2, false, existing);
        assert_eq!(out.lines, strings(&["z", "later"]));
        assert_eq!(out.remaining, b"x\ny");
    }

    #[test]
    fn test_existing_already_satisfied() {
        let existing = strings(&["a", "b"]);
        let out = extract_lines(b"q\nr", 2, false, existing.clone());
        assert_eq!(out.lines, existing);
        assert_eq!(out.remaining, b"q\nr");
    }

    #[test]
    fn test_keeps_blank_lines_by_default() {
        let out = extract_lines(b"a\n\nb", 5, false, Vec::new());
        assert_eq!(out.lines, strings(&["", "b"]));
        assert_eq!(out.remaining, b"a");
    }

    #[test]
    fn test_skip_blank_discards_but_consumes() {
        let out = extract_lines(b"a\n\n\nb", 5, true, Vec::new());
        assert_eq!(out.lines, strings(&["b"]));
        assert_eq!(out.remaining, b"a");
    }

    #[test]
    fn test_skipped_blanks_do_not_count() {
        let out = extract_lines(b"a\nb\n\n\nc", 2, true, Vec::new());
        assert_eq!(out.lines, strings(&["b", "c"]));
        assert_eq!(out.remaining, b"a");
    }

    #[test]
    fn test_leading_newline_leaves_empty_remainder() {
        let out = extract_lines(b"\nonly", 5, false, Vec::new());
        assert_eq!(out.lines, strings(&["only"]));
        assert!(out.remaining.is_empty());
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let out = extract_lines(b"x\n\xffok", 1, false, Vec::new());
        assert_eq!(out.lines, strings(&["\u{fffd}ok"]));
    }
}
