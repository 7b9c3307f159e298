// This file is part of pesh, an educational POSIX shell.
// Copyright (C) 2026 The pesh authors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Shell script source code
//!
//! This module defines the types that describe where a piece of source code
//! came from and where a syntactic construct is located in it. A [`Code`]
//! instance holds one unit of parsed source code. A [`Location`] refers to a
//! range of characters in a `Code`. All AST nodes and diagnostics carry
//! `Location`s.
//!
//! Positions are character-indexed. Line and column numbers are computed on
//! demand from a lazily built line-start index, so converting an index to a
//! [`LineColumn`] is O(log n) in the number of lines.

pub mod pretty;

use std::cell::OnceCell;
use std::num::NonZeroU64;
use std::ops::Range;
use std::rc::Rc;

/// Origin of source code
///
/// This enum describes how a piece of source code entered the shell. The
/// expansion engine parses command substitution contents on the fly, and the
/// resulting code objects remember the location of the substitution they came
/// from so that diagnostics can point back to the original script.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Source {
    /// Source code of unknown origin
    ///
    /// This is mainly used in tests and in ASTs parsed with `FromStr`.
    Unknown,
    /// Command string given to the shell
    CommandString,
    /// Content of a command substitution
    CommandSubst {
        /// Location of the command substitution in the original code
        original: Location,
    },
    /// Content of a process substitution
    ProcSubst {
        /// Location of the process substitution in the original code
        original: Location,
    },
    /// Content of an arithmetic expansion
    Arith {
        /// Location of the arithmetic expansion in the original code
        original: Location,
    },
}

impl Source {
    /// Returns a short label identifying this source.
    ///
    /// The label is used as a file name substitute when rendering diagnostics.
    #[must_use]
    pub fn label(&self) -> &'static str {
        use Source::*;
        match self {
            Unknown => "<?>",
            CommandString => "<command>",
            CommandSubst { .. } => "<command_substitution>",
            ProcSubst { .. } => "<process_substitution>",
            Arith { .. } => "<arithmetic_expansion>",
        }
    }
}

/// Line and column numbers of a position in source code
///
/// Both numbers count from 1. Columns count characters (Unicode scalar
/// values), not bytes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LineColumn {
    pub line: NonZeroU64,
    pub column: NonZeroU64,
}

/// One unit of parsed source code
///
/// A `Code` is shared by the lexer, the resulting tokens, and all AST nodes
/// parsed from it, via `Rc`.
#[derive(Debug)]
pub struct Code {
    /// Source code text
    pub value: String,
    /// Line number of the first line of the code, counted from 1
    pub start_line_number: NonZeroU64,
    /// Origin of this code
    pub source: Rc<Source>,
    /// Character indices of line starts, built on first use
    line_starts: OnceCell<Vec<usize>>,
}

impl Code {
    /// Creates a new code unit starting at line 1.
    #[must_use]
    pub fn new<S: Into<String>>(value: S, source: Source) -> Code {
        Code {
            value: value.into(),
            start_line_number: NonZeroU64::new(1).unwrap(),
            source: Rc::new(source),
            line_starts: OnceCell::new(),
        }
    }

    fn line_starts(&self) -> &[usize] {
        self.line_starts.get_or_init(|| {
            let mut starts = vec![0];
            starts.extend(
                self.value
                    .chars()
                    .enumerate()
                    .filter(|&(_, c)| c == '\n')
                    .map(|(i, _)| i + 1),
            );
            starts
        })
    }

    /// Computes the line and column numbers of a character index.
    ///
    /// An index equal to the code length refers to the imaginary position
    /// just after the last character.
    #[must_use]
    pub fn line_column(&self, index: usize) -> LineColumn {
        let starts = self.line_starts();
        let row = starts.partition_point(|&start| start <= index) - 1;
        let line = self.start_line_number.get() + row as u64;
        let column = (index - starts[row]) as u64 + 1;
        LineColumn {
            line: NonZeroU64::new(line).unwrap(),
            column: NonZeroU64::new(column).unwrap(),
        }
    }
}

/// Compares the text, starting line number, and source. The cached line index
/// does not participate in the comparison.
impl PartialEq for Code {
    fn eq(&self, other: &Code) -> bool {
        self.value == other.value
            && self.start_line_number == other.start_line_number
            && self.source == other.source
    }
}

impl Eq for Code {}

/// Position of a syntactic construct in source code
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Location {
    /// Code that contains the construct
    pub code: Rc<Code>,
    /// Character range of the construct in `code.value`
    pub range: Range<usize>,
}

impl Location {
    /// Creates a dummy location covering the whole of the given string.
    ///
    /// The code is of [unknown](Source::Unknown) origin. This function is
    /// mainly for use in tests.
    #[must_use]
    pub fn dummy<S: Into<String>>(value: S) -> Location {
        let value = value.into();
        let range = 0..value.chars().count();
        let code = Rc::new(Code::new(value, Source::Unknown));
        Location { code, range }
    }

    /// Returns the line and column numbers of the start of this location.
    #[must_use]
    pub fn line_column(&self) -> LineColumn {
        self.code.line_column(self.range.start)
    }

    /// Converts the character range of this location to a byte range.
    #[must_use]
    pub fn byte_range(&self) -> Range<usize> {
        let mut indices = self
            .code
            .value
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(self.code.value.len()));
        let start = indices.nth(self.range.start).unwrap_or_default();
        let end = if self.range.is_empty() {
            start
        } else {
            indices
                .nth(self.range.len() - 1)
                .unwrap_or(self.code.value.len())
        };
        start..end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_line_column_single_line() {
        let code = Code::new("echo foo", Source::Unknown);
        let lc = code.line_column(0);
        assert_eq!(lc.line.get(), 1);
        assert_eq!(lc.column.get(), 1);
        let lc = code.line_column(5);
        assert_eq!(lc.line.get(), 1);
        assert_eq!(lc.column.get(), 6);
        let lc = code.line_column(8);
        assert_eq!(lc.line.get(), 1);
        assert_eq!(lc.column.get(), 9);
    }

    #[test]
    fn code_line_column_multi_line() {
        let code = Code::new("foo\nbar\n\nbaz", Source::Unknown);
        let lc = code.line_column(3);
        assert_eq!(lc.line.get(), 1);
        assert_eq!(lc.column.get(), 4);
        let lc = code.line_column(4);
        assert_eq!(lc.line.get(), 2);
        assert_eq!(lc.column.get(), 1);
        let lc = code.line_column(8);
        assert_eq!(lc.line.get(), 3);
        assert_eq!(lc.column.get(), 1);
        let lc = code.line_column(11);
        assert_eq!(lc.line.get(), 4);
        assert_eq!(lc.column.get(), 3);
    }

    #[test]
    fn code_line_column_counts_characters() {
        let code = Code::new("héllo wörld", Source::Unknown);
        let lc = code.line_column(10);
        assert_eq!(lc.line.get(), 1);
        assert_eq!(lc.column.get(), 11);
    }

    #[test]
    fn location_dummy() {
        let location = Location::dummy("source");
        assert_eq!(location.code.value, "source");
        assert_eq!(location.code.start_line_number.get(), 1);
        assert_eq!(*location.code.source, Source::Unknown);
        assert_eq!(location.range, 0..6);
    }

    #[test]
    fn location_byte_range_ascii() {
        let mut location = Location::dummy("hello");
        location.range = 1..3;
        assert_eq!(location.byte_range(), 1..3);
    }

    #[test]
    fn location_byte_range_multibyte() {
        let mut location = Location::dummy("héllo");
        location.range = 2..4;
        assert_eq!(location.byte_range(), 3..5);
    }
}
