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

//! Attributed characters
//!
//! The initial expansion produces characters annotated with their origin and
//! quoting state. The later expansion steps consult the attributes: field
//! splitting applies only to unquoted characters of soft-expansion origin,
//! pathname expansion treats quoted characters literally, and quote removal
//! drops the quoting characters themselves.

/// Origin of a character produced in the initial expansion
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Origin {
    /// The character appeared literally in the original word.
    Literal,
    /// The character originates from a tilde expansion or process
    /// substitution.
    ///
    /// This kind of character is treated literally in field splitting and
    /// pathname expansion.
    HardExpansion,
    /// The character originates from a parameter expansion, command
    /// substitution, or arithmetic expansion.
    ///
    /// This kind of character is subject to field splitting where
    /// applicable.
    SoftExpansion,
}

/// Character with attributes describing its origin
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct AttrChar {
    /// Character value
    pub value: char,
    /// Character origin
    pub origin: Origin,
    /// Whether this character is quoted by another character
    pub is_quoted: bool,
    /// Whether this is a quotation character that quotes another character
    ///
    /// Note that a character can be both quoting and quoted. For example,
    /// the backslash in the word `"\$"` quotes the dollar and is quoted by
    /// the double-quotes.
    pub is_quoting: bool,
}

impl AttrChar {
    /// Creates an unquoted literal character.
    #[must_use]
    pub fn literal(value: char) -> AttrChar {
        AttrChar {
            value,
            origin: Origin::Literal,
            is_quoted: false,
            is_quoting: false,
        }
    }
}

/// Converts a string to attributed characters sharing the same attributes.
pub fn from_str(s: &str, origin: Origin, is_quoted: bool, is_quoting: bool) -> Vec<AttrChar> {
    s.chars()
        .map(|value| AttrChar {
            value,
            origin,
            is_quoted,
            is_quoting,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_str_shares_attributes() {
        let chars = from_str("a-z", Origin::SoftExpansion, true, false);
        assert_eq!(chars.len(), 3);
        for c in &chars {
            assert_eq!(c.origin, Origin::SoftExpansion);
            assert!(c.is_quoted);
            assert!(!c.is_quoting);
        }
        assert_eq!(chars[0].value, 'a');
        assert_eq!(chars[2].value, 'z');
    }
}
