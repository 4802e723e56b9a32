//! Shared rendering utilities and helpers.
//!
//! This module provides small text utilities used across UI components:
//! turning fuzzy-match indices into highlighted spans, and fitting text into a
//! fixed column width.
//!
//! All index handling operates on character positions, not bytes, so
//! multi-byte service names highlight correctly.
//!
//! # Example
//!
//! ```rust
//! use pass_tui::ui::helpers::{highlight_ranges, highlighted_spans};
//! use ratatui::style::{Color, Style};
//!
//! let ranges = highlight_ranges(&[0, 1, 3]);
//! assert_eq!(ranges, vec![(0, 2), (3, 4)]);
//!
//! let spans = highlighted_spans("github", &ranges, Style::default(), Style::default().fg(Color::Yellow));
//! assert_eq!(spans.len(), 4);
//! ```

use ratatui::style::Style;
use ratatui::text::Span;

/// Collapses sorted match indices into half-open `(start, end)` ranges.
#[must_use]
pub fn highlight_ranges(indices: &[usize]) -> Vec<(usize, usize)> {
    let mut ranges = Vec::new();
    let mut start = None;
    let mut prev = None;

    for &idx in indices {
        match (start, prev) {
            (None, _) => {
                start = Some(idx);
                prev = Some(idx);
            }
            (Some(_), Some(p)) if idx == p + 1 => {
                prev = Some(idx);
            }
            (Some(s), Some(p)) => {
                ranges.push((s, p + 1));
                start = Some(idx);
                prev = Some(idx);
            }
            _ => {}
        }
    }

    if let (Some(s), Some(p)) = (start, prev) {
        ranges.push((s, p + 1));
    }

    ranges
}

/// Splits `text` into spans, styling the character `ranges` with `highlight`.
///
/// Ranges must be sorted and non-overlapping; out-of-bounds ends are clamped.
#[must_use]
pub fn highlighted_spans(
    text: &str,
    ranges: &[(usize, usize)],
    base: Style,
    highlight: Style,
) -> Vec<Span<'static>> {
    let chars: Vec<char> = text.chars().collect();
    let mut spans = Vec::new();
    let mut pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < pos || start >= end {
            continue;
        }
        if pos < start {
            spans.push(Span::styled(chars[pos..start].iter().collect::<String>(), base));
        }
        spans.push(Span::styled(chars[start..end].iter().collect::<String>(), highlight));
        pos = end;
    }

    if pos < chars.len() {
        spans.push(Span::styled(chars[pos..].iter().collect::<String>(), base));
    }

    spans
}

/// Truncates `text` to `width` characters, ending with `…` when shortened.
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(width - 1).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    #[test]
    fn ranges_merge_consecutive_indices() {
        assert_eq!(highlight_ranges(&[]), Vec::<(usize, usize)>::new());
        assert_eq!(highlight_ranges(&[2, 3, 4, 7]), vec![(2, 5), (7, 8)]);
    }

    #[test]
    fn spans_cover_whole_text() {
        let hl = Style::default().fg(Color::Yellow);
        let spans = highlighted_spans("héllo", &[(1, 3)], Style::default(), hl);
        let text: Vec<&str> = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, vec!["h", "él", "lo"]);
        assert_eq!(spans[1].style, hl);
    }

    #[test]
    fn truncate_marks_cut() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("longer-name", 6), "longe…");
        assert_eq!(truncate("abc", 0), "");
    }
}
