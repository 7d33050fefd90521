//! Marker-bounded substring scanning primitives.
//!
//! These know nothing about markup semantics; they locate regions of a text
//! buffer bounded by literal start/end marker strings. `None` is the
//! not-found result; callers promote it to a typed error with context.

/// A located region of a buffer, as byte offsets.
///
/// Depending on the [`Include`] mode used to produce it, the span covers the
/// bounding markers themselves or only the text strictly between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// The span's text within the buffer it was located in.
    pub fn slice<'a>(&self, buffer: &'a str) -> &'a str {
        &buffer[self.start..self.end]
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Whether a located span covers its bounding markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Include {
    /// From the first byte of the start marker to the last byte of the end
    /// marker.
    Markers,
    /// Only the text strictly between the two markers.
    Between,
}

/// Locate the first `start_marker`, then the first `end_marker` strictly
/// after it.
///
/// Returns `None` when either marker is absent (or empty). The end-marker
/// search begins after the start marker's last byte, so an end marker
/// embedded inside the start marker text can never match.
pub fn locate_next(
    buffer: &str,
    start_marker: &str,
    end_marker: &str,
    include: Include,
) -> Option<Span> {
    if start_marker.is_empty() || end_marker.is_empty() {
        return None;
    }
    let start_at = buffer.find(start_marker)?;
    let inner_from = start_at + start_marker.len();
    let end_at = inner_from + buffer[inner_from..].find(end_marker)?;
    Some(match include {
        Include::Markers => Span {
            start: start_at,
            end: end_at + end_marker.len(),
        },
        Include::Between => Span {
            start: inner_from,
            end: end_at,
        },
    })
}

/// Locate every non-overlapping marked block in `buffer`, front to back.
///
/// The iterator advances a cursor over the immutable buffer: each found
/// block moves the cursor past that block's end marker, so a given byte
/// range is never matched twice. The sequence is finite and ends when no
/// further match exists.
///
/// The degenerate case `start_marker == end_marker` splits the buffer into
/// successive marker-delimited segments: each segment runs from one
/// occurrence of the marker to the next, and adjacent segments share their
/// boundary occurrence.
pub fn locate_all<'a, 'm>(
    buffer: &'a str,
    start_marker: &'m str,
    end_marker: &'m str,
    include: Include,
) -> LocateAll<'a, 'm> {
    LocateAll {
        buffer,
        start_marker,
        end_marker,
        include,
        cursor: 0,
    }
}

/// Iterator returned by [`locate_all`]. Yields [`Span`]s relative to the
/// original buffer.
pub struct LocateAll<'a, 'm> {
    buffer: &'a str,
    start_marker: &'m str,
    end_marker: &'m str,
    include: Include,
    cursor: usize,
}

impl Iterator for LocateAll<'_, '_> {
    type Item = Span;

    fn next(&mut self) -> Option<Span> {
        if self.cursor >= self.buffer.len() {
            return None;
        }
        let rel = locate_next(
            &self.buffer[self.cursor..],
            self.start_marker,
            self.end_marker,
            self.include,
        )?;
        let span = Span {
            start: self.cursor + rel.start,
            end: self.cursor + rel.end,
        };

        // End of the full block including markers, whatever the include mode.
        let block_end = match self.include {
            Include::Markers => span.end,
            Include::Between => span.end + self.end_marker.len(),
        };
        self.cursor = if self.start_marker == self.end_marker {
            // Successive segments share their boundary marker occurrence.
            block_end - self.end_marker.len()
        } else {
            block_end
        };
        Some(span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn next_text<'a>(buf: &'a str, s: &str, e: &str, inc: Include) -> Option<&'a str> {
        locate_next(buf, s, e, inc).map(|sp| sp.slice(buf))
    }

    fn all_texts<'a>(buf: &'a str, s: &str, e: &str, inc: Include) -> Vec<&'a str> {
        locate_all(buf, s, e, inc).map(|sp| sp.slice(buf)).collect()
    }

    #[test]
    fn locates_block_with_and_without_markers() {
        assert_eq!(next_text("A<x>B", "<", ">", Include::Markers), Some("<x>"));
        assert_eq!(next_text("A<x>B", "<", ">", Include::Between), Some("x"));
    }

    #[test]
    fn not_found_when_end_marker_never_follows_start() {
        assert_eq!(locate_next("A>B<C", "<", ">", Include::Markers), None);
        assert_eq!(locate_next("no markers here", "<", ">", Include::Between), None);
    }

    #[test]
    fn not_found_when_start_marker_absent() {
        assert_eq!(locate_next("plain text>", "<", ">", Include::Markers), None);
    }

    #[test]
    fn end_marker_inside_start_marker_does_not_match() {
        // end `"` occurs inside the start marker; the search must begin
        // after the start marker's last byte.
        let buf = r#"x data-time="1609459200" y"#;
        assert_eq!(
            next_text(buf, "data-time=\"", "\"", Include::Between),
            Some("1609459200")
        );
    }

    #[test]
    fn all_blocks_in_order() {
        assert_eq!(
            all_texts("[a][b][c]", "[", "]", Include::Markers),
            vec!["[a]", "[b]", "[c]"]
        );
        assert_eq!(
            all_texts("[a] pad [b]", "[", "]", Include::Between),
            vec!["a", "b"]
        );
    }

    #[test]
    fn all_on_zero_matches_is_empty() {
        assert!(all_texts("nothing to see", "[", "]", Include::Markers).is_empty());
    }

    #[test]
    fn degenerate_equal_markers_split_into_successive_segments() {
        // Segments run from one occurrence to the next, sharing boundaries.
        assert_eq!(
            all_texts("|a|b|c|", "|", "|", Include::Markers),
            vec!["|a|", "|b|", "|c|"]
        );
        assert_eq!(
            all_texts("|a|b|", "|", "|", Include::Between),
            vec!["a", "b"]
        );
    }

    #[test]
    fn spans_are_offsets_into_the_original_buffer() {
        let buf = "xx[a]yy[b]";
        let spans: Vec<Span> = locate_all(buf, "[", "]", Include::Markers).collect();
        assert_eq!(
            spans,
            vec![Span { start: 2, end: 5 }, Span { start: 7, end: 10 }]
        );
    }

    #[test]
    fn span_length_and_emptiness() {
        let buf = "<>x<ab>";
        let spans: Vec<Span> = locate_all(buf, "<", ">", Include::Between).collect();
        assert!(spans[0].is_empty());
        assert_eq!(spans[0].len(), 0);
        assert!(!spans[1].is_empty());
        assert_eq!(spans[1].len(), 2);
    }

    #[test]
    fn empty_markers_never_match() {
        assert_eq!(locate_next("abc", "", "c", Include::Markers), None);
        assert_eq!(locate_next("abc", "a", "", Include::Markers), None);
    }

    #[test]
    fn multibyte_text_between_markers() {
        assert_eq!(
            next_text("<café ☕>", "<", ">", Include::Between),
            Some("café ☕")
        );
    }
}
