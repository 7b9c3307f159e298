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

//! Word production rule for tilde expansion
//!
//! Tilde expansion is part of word parsing: a word that starts with an
//! unquoted `~` has its leading run of literal characters replaced by a
//! [`Tilde`] unit. The lexer does not do this by default because tildes are
//! special only in some contexts; the parser calls these functions on words
//! in contexts that are subject to tilde expansion.

use crate::syntax::TextUnit::Literal;
use crate::syntax::Word;
use crate::syntax::WordUnit::{Tilde, Unquoted};

/// Scans a tilde prefix in `units`.
///
/// `is_name_delimiter` decides which literal character ends the name. The
/// prefix ends at the first delimiter or at the end of the word. If a
/// non-literal unit is found before that, the word has no tilde prefix.
fn tilde_prefix<F>(
    units: &[crate::syntax::WordUnit],
    mut is_name_delimiter: F,
) -> Option<(usize, String)>
where
    F: FnMut(char) -> bool,
{
    let mut iter = units.iter();
    match iter.next() {
        Some(Unquoted(Literal('~'))) => (),
        _ => return None,
    }

    let mut name = String::new();
    let mut count = 1;
    for unit in iter {
        match unit {
            Unquoted(Literal(c)) if is_name_delimiter(*c) => break,
            Unquoted(Literal(c)) => {
                name.push(*c);
                count += 1;
            }
            // A quotation or expansion in the name defeats tilde expansion.
            _ => return None,
        }
    }
    Some((count, name))
}

impl Word {
    /// Parses a tilde expansion at the beginning of the word.
    ///
    /// This function checks if `self.units` start with an unquoted `~` and,
    /// if so, replaces the leading literal characters up to (but not
    /// including) the first unquoted `/` with a [`Tilde`] unit.
    ///
    /// This function should be applied to command words and redirection
    /// operands. For assignment values, use
    /// [`parse_tilde_everywhere`](Self::parse_tilde_everywhere).
    pub fn parse_tilde_front(&mut self) {
        if let Some((count, name)) = tilde_prefix(&self.units, |c| c == '/') {
            self.units.splice(0..count, std::iter::once(Tilde(name)));
        }
    }

    /// Parses tilde expansions at the beginning of the word and after each
    /// unquoted colon.
    ///
    /// This function is for assignment values, where `a=~/x:~/y` expands
    /// both tildes.
    pub fn parse_tilde_everywhere(&mut self) {
        let mut i = 0;
        loop {
            if let Some((count, name)) = tilde_prefix(&self.units[i..], |c| c == '/' || c == ':') {
                self.units
                    .splice(i..i + count, std::iter::once(Tilde(name)));
                i += 1;
            }

            // Skip to the character past the next colon
            loop {
                match self.units.get(i) {
                    Some(Unquoted(Literal(':'))) => {
                        i += 1;
                        break;
                    }
                    Some(_) => i += 1,
                    None => return,
                }
            }
        }
    }
}
