use crate::errors::{ScanError, ScanResult};

/// A token occurrence as a half-open byte range within one line.
#[derive(Debug, Clone, Copy)]
struct Span {
    start: usize,
    end: usize,
}

impl Span {
    fn new(start: usize, len: usize) -> Self {
        Self {
            start,
            end: start + len,
        }
    }

    /// Gap between two spans regardless of which one appears first.
    fn distance(self, other: Span) -> usize {
        usize::abs_diff(self.end, other.start).min(usize::abs_diff(self.start, other.end))
    }
}

/// Splits `line` into five ordered segments around the closest-spaced pair
/// of token occurrences, one drawn from each offset set.
///
/// The segments are: text before the earlier token (left-trimmed), the
/// earlier token, text between the tokens, the later token, and text after
/// the later token (right-trimmed). Among pairs with equal distance the
/// one with the smallest earlier start wins, then the smallest later
/// start, so the result does not depend on enumeration order.
///
/// Both offset sets must be non-empty and must come from a whole-word
/// search over the same `line`; violations are rejected with an error
/// rather than producing garbage segments.
pub fn line_segments(
    line: &str,
    first_offsets: &[usize],
    first_len: usize,
    second_offsets: &[usize],
    second_len: usize,
) -> ScanResult<[String; 5]> {
    if first_offsets.is_empty() {
        return Err(ScanError::EmptyOffsetSet("first"));
    }
    if second_offsets.is_empty() {
        return Err(ScanError::EmptyOffsetSet("second"));
    }

    let pairs = first_offsets.iter().flat_map(|&f| {
        second_offsets.iter().map(move |&s| {
            let first = Span::new(f, first_len);
            let second = Span::new(s, second_len);
            let distance = first.distance(second);
            if first.start <= second.start {
                (distance, first, second)
            } else {
                (distance, second, first)
            }
        })
    });

    let Some((_, earlier, later)) =
        pairs.min_by_key(|&(distance, earlier, later)| (distance, earlier.start, later.start))
    else {
        return Err(ScanError::EmptyOffsetSet("first"));
    };

    let end = earlier.end.max(later.end);
    if end > line.len() {
        return Err(ScanError::SpanOutOfBounds {
            start: later.start,
            end,
            line_len: line.len(),
        });
    }

    // Overlapping spans (a key equal to its base name) collapse the inner
    // cuts so the five segments still cover the whole line.
    let cut1 = earlier.end;
    let cut2 = later.start.max(cut1);
    let cut3 = later.end.max(cut2);

    Ok([
        line[..earlier.start].trim_start().to_string(),
        line[earlier.start..cut1].to_string(),
        line[cut1..cut2].to_string(),
        line[cut2..cut3].to_string(),
        line[cut3..].trim_end().to_string(),
    ])
}
