//! Grapheme-aware helpers for the entry line and for fitting task text into
//! terminal cells.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Display width in terminal cells.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate a string to fit within `max_cells` terminal cells, appending `…` if truncated.
pub fn truncate_to_width(s: &str, max_cells: usize) -> String {
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    if max_cells == 0 {
        return String::new();
    }
    // One cell goes to the ellipsis
    let budget = max_cells - 1;
    let mut used = 0;
    let mut out = String::new();
    for g in s.graphemes(true) {
        let w = display_width(g);
        if used + w > budget {
            break;
        }
        used += w;
        out.push_str(g);
    }
    out.push('\u{2026}');
    out
}

/// Byte offset of the grapheme after the one at `byte_offset`. None at the end.
pub fn next_grapheme_boundary(s: &str, byte_offset: usize) -> Option<usize> {
    let rest = s.get(byte_offset..)?;
    let first = rest.graphemes(true).next()?;
    Some(byte_offset + first.len())
}

/// Byte offset where the grapheme before `byte_offset` starts. None at the start.
pub fn prev_grapheme_boundary(s: &str, byte_offset: usize) -> Option<usize> {
    let head = s.get(..byte_offset)?;
    let last = head.graphemes(true).next_back()?;
    Some(byte_offset - last.len())
}

fn is_blank(g: &str) -> bool {
    g.chars().all(char::is_whitespace)
}

/// Start of the word left of `byte_offset`, skipping whitespace first.
pub fn word_boundary_left(s: &str, byte_offset: usize) -> usize {
    let head = &s[..byte_offset.min(s.len())];
    let mut pos = head.len();
    let mut in_word = false;
    for (i, g) in head.grapheme_indices(true).rev() {
        if is_blank(g) {
            if in_word {
                break;
            }
        } else {
            in_word = true;
        }
        pos = i;
    }
    if in_word { pos } else { 0 }
}

/// Start of the next word right of `byte_offset`, or the end of the string.
pub fn word_boundary_right(s: &str, byte_offset: usize) -> usize {
    let start = byte_offset.min(s.len());
    let mut left_word = false;
    for (i, g) in s[start..].grapheme_indices(true) {
        if is_blank(g) {
            left_word = true;
        } else if left_word {
            return start + i;
        }
    }
    s.len()
}

/// Display column of `byte_offset`, used to place the terminal cursor.
pub fn byte_offset_to_display_col(s: &str, byte_offset: usize) -> usize {
    display_width(&s[..byte_offset.min(s.len())])
}
