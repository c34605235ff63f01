//! SIMD-accelerated markup scanning using memchr
//!
//! Every search is bounded by a window end so the scanner can run over the
//! filled part of a larger, partially-filled buffer.

use memchr::memchr;

/// Scanner over a window of the working buffer
pub struct Scanner<'a> {
    input: &'a [u8],
    pos: usize,
    end: usize,
}

impl<'a> Scanner<'a> {
    /// Create a scanner over `input[pos..end]`
    #[inline]
    pub fn new(input: &'a [u8], pos: usize, end: usize) -> Self {
        let end = end.min(input.len());
        Scanner { input, pos: pos.min(end), end }
    }

    /// Get remaining bytes in the window
    #[inline]
    pub fn remaining(&self) -> &'a [u8] {
        &self.input[self.pos..self.end]
    }

    /// Find next '<' using SIMD
    #[inline]
    pub fn find_tag_start(&self) -> Option<usize> {
        memchr(b'<', self.remaining()).map(|i| self.pos + i)
    }

    /// Find the '>' closing a tag, skipping any '>' inside single or
    /// double quotes
    pub fn find_tag_end_quoted(&self) -> Option<usize> {
        let mut pos = self.pos;
        let mut in_single_quote = false;
        let mut in_double_quote = false;

        while pos < self.end {
            // Jump straight to the next byte that can change state
            let window = &self.input[pos..self.end];
            let next = if in_double_quote {
                memchr(b'"', window)
            } else if in_single_quote {
                memchr(b'\'', window)
            } else {
                memchr::memchr3(b'"', b'\'', b'>', window)
            };
            let at = pos + next?;
            match self.input[at] {
                b'"' if !in_single_quote => in_double_quote = !in_double_quote,
                b'\'' if !in_double_quote => in_single_quote = !in_single_quote,
                b'>' => return Some(at),
                _ => {}
            }
            pos = at + 1;
        }
        None
    }

    /// Find the '>' closing a DOCTYPE: quotes and the `[...]` internal
    /// subset are both opaque.
    ///
    /// Inside the subset, comments and processing instructions are skipped
    /// whole and quotes only count within markup declarations, so prose
    /// like `<!-- don't -->` cannot hide the closing `]>`.
    pub fn find_doctype_end(&self) -> Option<usize> {
        let mut pos = self.pos;
        let mut quote = None;
        let mut in_subset = false;
        let mut in_declaration = false;

        while pos < self.end {
            let b = self.input[pos];
            if let Some(open) = quote {
                if b == open {
                    quote = None;
                }
                pos += 1;
                continue;
            }

            if !in_subset {
                match b {
                    b'"' | b'\'' => quote = Some(b),
                    b'[' => in_subset = true,
                    b'>' => return Some(pos),
                    _ => {}
                }
                pos += 1;
                continue;
            }

            if !in_declaration {
                let rest = &self.input[pos..self.end];
                if rest.starts_with(b"<!--") {
                    pos = Scanner::new(self.input, pos, self.end).find_terminator(b"-->", pos + 4)? + 1;
                    continue;
                }
                if rest.starts_with(b"<?") {
                    pos = Scanner::new(self.input, pos, self.end).find_terminator(b"?>", pos + 2)? + 1;
                    continue;
                }
            }
            match b {
                b'<' => in_declaration = true,
                b'>' => in_declaration = false,
                b'"' | b'\'' if in_declaration => quote = Some(b),
                b']' if !in_declaration => in_subset = false,
                _ => {}
            }
            pos += 1;
        }
        None
    }

    /// Find a terminator ending in '>' (e.g. `-->`, `]]>`, `?>`).
    ///
    /// Re-searches for the next raw '>' until it is preceded by the rest of
    /// the terminator. The whole terminator must start at or after
    /// `min_start`. Returns the position of the final '>'.
    pub fn find_terminator(&self, terminator: &[u8], min_start: usize) -> Option<usize> {
        debug_assert!(terminator.last() == Some(&b'>'));
        let prefix_len = terminator.len() - 1;
        let mut pos = self.pos.max(min_start + prefix_len);

        while pos < self.end {
            let gt = pos + memchr(b'>', &self.input[pos..self.end])?;
            if gt >= min_start + prefix_len
                && &self.input[gt - prefix_len..=gt] == terminator
            {
                return Some(gt);
            }
            pos = gt + 1;
        }
        None
    }

    /// Find the start of `sequence` (which begins with '<'), optionally
    /// ignoring ASCII case. A partial match cut by the window end is not
    /// reported.
    pub fn find_sequence(&self, sequence: &[u8], case_insensitive: bool) -> Option<usize> {
        let mut pos = self.pos;
        while pos < self.end {
            let lt = pos + memchr(sequence[0], &self.input[pos..self.end])?;
            if lt + sequence.len() > self.end {
                return None;
            }
            let candidate = &self.input[lt..lt + sequence.len()];
            let matched = if case_insensitive {
                candidate.eq_ignore_ascii_case(sequence)
            } else {
                candidate == sequence
            };
            if matched {
                return Some(lt);
            }
            pos = lt + 1;
        }
        None
    }

}

/// Markup whitespace
#[inline]
pub fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | b'\x0C')
}

/// First byte of an element name. Non-ASCII bytes are accepted so UTF-8
/// names pass through untouched.
#[inline]
pub fn is_name_start_byte(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b':' || b >= 0x80
}

/// Compare `input[pos..end]` with an ASCII keyword.
///
/// Returns `None` when the window ends before the comparison can be decided,
/// i.e. the available bytes are a proper prefix of the keyword.
pub fn match_keyword(input: &[u8], pos: usize, end: usize, keyword: &[u8], ignore_case: bool) -> Option<bool> {
    let available = end.saturating_sub(pos).min(keyword.len());
    let head = &input[pos..pos + available];
    let matches = if ignore_case {
        head.eq_ignore_ascii_case(&keyword[..available])
    } else {
        head == &keyword[..available]
    };
    if !matches {
        Some(false)
    } else if available < keyword.len() {
        None
    } else {
        Some(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scanner(input: &[u8]) -> Scanner<'_> {
        Scanner::new(input, 0, input.len())
    }

    #[test]
    fn test_find_tag_start() {
        assert_eq!(scanner(b"hello <world>").find_tag_start(), Some(6));
    }

    #[test]
    fn test_find_tag_end_quoted() {
        assert_eq!(scanner(b"<a attr=\">test\">content").find_tag_end_quoted(), Some(15));
        assert_eq!(scanner(b"<a attr='>'>").find_tag_end_quoted(), Some(11));
        assert_eq!(scanner(b"<a attr=\"it's\">").find_tag_end_quoted(), Some(14));
    }

    #[test]
    fn test_find_tag_end_unbalanced_quote() {
        assert_eq!(scanner(b"<a attr=\"open>").find_tag_end_quoted(), None);
    }

    #[test]
    fn test_find_tag_end_respects_window() {
        let input = b"<a><b>";
        assert_eq!(Scanner::new(input, 3, 5).find_tag_end_quoted(), None);
        assert_eq!(Scanner::new(input, 3, 6).find_tag_end_quoted(), Some(5));
    }

    #[test]
    fn test_find_doctype_end_ignores_subset_comments() {
        let input = b"<!DOCTYPE a [<!-- don't -->]>";
        assert_eq!(scanner(input).find_doctype_end(), Some(input.len() - 1));

        let input = b"<!DOCTYPE a [<?pi it's ]> ?><!ENTITY e 'x]>y'>]> tail";
        assert_eq!(scanner(input).find_doctype_end(), Some(47));

        assert_eq!(scanner(b"<!DOCTYPE a [<!-- ]> ").find_doctype_end(), None);
    }

    #[test]
    fn test_find_doctype_end_skips_subset() {
        let input = b"<!DOCTYPE a [<!ELEMENT a (#PCDATA)>]>";
        assert_eq!(scanner(input).find_doctype_end(), Some(input.len() - 1));
    }

    #[test]
    fn test_find_comment_terminator() {
        let input = b"<!-- a > b -- c -->";
        assert_eq!(scanner(input).find_terminator(b"-->", 4), Some(input.len() - 1));
    }

    #[test]
    fn test_terminator_cannot_overlap_opener() {
        // `<!-->` does not close itself
        assert_eq!(scanner(b"<!-->").find_terminator(b"-->", 4), None);
        assert_eq!(scanner(b"<!---->").find_terminator(b"-->", 4), Some(6));
    }

    #[test]
    fn test_find_sequence_case_insensitive() {
        let input = b"var x = 1;</SCRIPT>";
        assert_eq!(scanner(input).find_sequence(b"</script", true), Some(10));
        assert_eq!(scanner(input).find_sequence(b"</script", false), None);
    }

    #[test]
    fn test_find_sequence_partial_at_end() {
        assert_eq!(scanner(b"abc</scr").find_sequence(b"</script", true), None);
    }

    #[test]
    fn test_match_keyword() {
        let input = b"<!doctype html>";
        assert_eq!(match_keyword(input, 2, input.len(), b"DOCTYPE", true), Some(true));
        assert_eq!(match_keyword(input, 2, input.len(), b"DOCTYPE", false), Some(false));
        assert_eq!(match_keyword(input, 2, 5, b"DOCTYPE", true), None);
        assert_eq!(match_keyword(input, 2, input.len(), b"ENTITY", true), Some(false));
    }
}
