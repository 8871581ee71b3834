/// Whole-word occurrence search over a single line of text.
///
/// A substring occurrence qualifies as a whole word only when the character
/// immediately before it (if any) and the character immediately after it
/// (if any) are both non-alphanumeric. Searching for `Str` inside
/// `Strings` therefore yields nothing, while `Strings.Greeting` yields a
/// match for both tokens.

/// Lazily yields the byte offsets of whole-word occurrences of `word`
/// within `line`, in ascending order.
///
/// Case-insensitive mode folds ASCII case only; it exists for Visual Basic
/// sources, whose identifiers are case-insensitive. An empty `word`
/// produces no matches.
pub fn find_whole_words<'a>(
    line: &'a str,
    word: &'a str,
    case_sensitive: bool,
) -> WholeWordOffsets<'a> {
    WholeWordOffsets {
        line,
        word,
        case_sensitive,
        cursor: 0,
    }
}

/// Single-pass cursor over one line. Not restartable; collect the offsets
/// if they are needed more than once.
#[derive(Debug, Clone)]
pub struct WholeWordOffsets<'a> {
    line: &'a str,
    word: &'a str,
    case_sensitive: bool,
    cursor: usize,
}

impl<'a> WholeWordOffsets<'a> {
    fn is_word_boundary(&self, start: usize, end: usize) -> bool {
        let before = self.line[..start].chars().next_back();
        let after = self.line[end..].chars().next();
        before.map_or(true, |c| !c.is_alphanumeric()) && after.map_or(true, |c| !c.is_alphanumeric())
    }
}

impl<'a> Iterator for WholeWordOffsets<'a> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.word.is_empty() {
            return None;
        }
        loop {
            let rel = find_from(&self.line[self.cursor..], self.word, self.case_sensitive)?;
            let start = self.cursor + rel;
            let end = start + self.word.len();
            // Advance past every occurrence, qualifying or not, so adjacent
            // occurrences are visited without rescanning the same bytes.
            self.cursor = end;
            if self.is_word_boundary(start, end) {
                return Some(start);
            }
        }
    }
}

fn find_from(haystack: &str, needle: &str, case_sensitive: bool) -> Option<usize> {
    if case_sensitive {
        return haystack.find(needle);
    }
    let haystack = haystack.as_bytes();
    let needle = needle.as_bytes();
    if needle.len() > haystack.len() {
        return None;
    }
    // An ASCII-case-insensitive window can only start where the needle's
    // first byte could start, which is never inside a UTF-8 sequence, so
    // the returned offset is always a char boundary.
    (0..=haystack.len() - needle.len())
        .find(|&i| haystack[i..i + needle.len()].eq_ignore_ascii_case(needle))
}
