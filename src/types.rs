//! Core types used throughout the project.

use std::fmt;

/// A range in a catalog file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SourceRange {
    pub start: SourcePosition,
    pub end: SourcePosition,
}

/// A position in a catalog file (0-indexed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct SourcePosition {
    pub line: u32,
    pub character: u32,
}

impl SourcePosition {
    /// Converts a byte offset into `text` to a line/character position.
    ///
    /// Offsets past the end of `text` clamp to the end. `character` counts
    /// `char`s, not bytes.
    #[must_use]
    pub fn from_offset(text: &str, offset: usize) -> Self {
        let mut end = offset.min(text.len());
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        let prefix = text.get(..end).unwrap_or_default();

        let line = prefix.matches('\n').count();
        let line_start = prefix.rfind('\n').map_or(0, |i| i + 1);
        let character = prefix.get(line_start..).map_or(0, |rest| rest.chars().count());

        Self {
            line: u32::try_from(line).unwrap_or(u32::MAX),
            character: u32::try_from(character).unwrap_or(u32::MAX),
        }
    }

    /// 1-based line number for display.
    #[must_use]
    pub const fn display_line(&self) -> u32 {
        self.line.saturating_add(1)
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.display_line(), self.character.saturating_add(1))
    }
}

impl SourceRange {
    #[must_use]
    pub const fn new(start: SourcePosition, end: SourcePosition) -> Self {
        Self { start, end }
    }

    /// Builds a range from two byte offsets into `text`.
    #[must_use]
    pub fn from_offsets(text: &str, start: usize, end: usize) -> Self {
        Self {
            start: SourcePosition::from_offset(text, start),
            end: SourcePosition::from_offset(text, end),
        }
    }

    /// Checks if a position is within this range.
    #[must_use]
    pub const fn contains(&self, position: SourcePosition) -> bool {
        if position.line < self.start.line {
            return false;
        }
        if position.line == self.start.line && position.character < self.start.character {
            return false;
        }
        if position.line > self.end.line {
            return false;
        }
        if position.line == self.end.line && position.character > self.end.character {
            return false;
        }
        true
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    const fn pos(line: u32, character: u32) -> SourcePosition {
        SourcePosition { line, character }
    }

    const fn range(start_line: u32, start_char: u32, end_line: u32, end_char: u32) -> SourceRange {
        SourceRange { start: pos(start_line, start_char), end: pos(end_line, end_char) }
    }

    #[rstest]
    #[case::before_start_line(pos(0, 5), range(1, 5, 2, 10), false)]
    #[case::before_start_char(pos(1, 4), range(1, 5, 2, 10), false)]
    #[case::at_start(pos(1, 5), range(1, 5, 2, 10), true)]
    #[case::middle_line(pos(1, 10), range(1, 5, 2, 10), true)]
    #[case::at_end(pos(2, 10), range(1, 5, 2, 10), true)]
    #[case::after_end_char(pos(2, 11), range(1, 5, 2, 10), false)]
    #[case::after_end_line(pos(3, 0), range(1, 5, 2, 10), false)]
    fn test_contains(
        #[case] position: SourcePosition,
        #[case] range: SourceRange,
        #[case] expected: bool,
    ) {
        assert_that!(range.contains(position), eq(expected));
    }

    #[rstest]
    #[case::start_of_text(0, pos(0, 0))]
    #[case::first_line(3, pos(0, 3))]
    #[case::after_newline(5, pos(1, 0))]
    #[case::third_line(8, pos(2, 2))]
    #[case::past_end(100, pos(3, 3))]
    fn test_from_offset(#[case] offset: usize, #[case] expected: SourcePosition) {
        let text = "<TS>\n\n<ab>\nxyz";

        assert_that!(SourcePosition::from_offset(text, offset), eq(expected));
    }

    #[googletest::test]
    fn test_from_offset_counts_chars_not_bytes() {
        // "ô" is two bytes
        let text = "<translation>Contrôle</translation>";
        let offset = text.find("</translation>").unwrap();

        expect_that!(SourcePosition::from_offset(text, offset), eq(pos(0, 21)));
    }

    #[googletest::test]
    fn test_display_is_one_based() {
        expect_that!(pos(0, 0).to_string(), eq("1:1"));
        expect_that!(pos(41, 7).to_string(), eq("42:8"));
    }
}
