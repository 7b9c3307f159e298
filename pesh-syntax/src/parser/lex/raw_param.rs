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

//! Part of the lexer that parses parameter expansions not enclosed in braces

use super::core::WordLexer;
use crate::parser::core::Result;
use crate::syntax::Param;
use crate::syntax::ParamType;
use crate::syntax::SpecialParam;
use crate::syntax::TextUnit;

/// Tests if a character can be part of a POSIX-portable variable name.
pub fn is_portable_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Tests if a character can be part of a variable name.
///
/// The current implementation is the same as [`is_portable_name_char`].
pub fn is_name_char(c: char) -> bool {
    // TODO support other Unicode name characters
    is_portable_name_char(c)
}

impl WordLexer<'_> {
    /// Parses a parameter expansion that is not enclosed in braces.
    ///
    /// The initial `$` must have been consumed before calling this function;
    /// `start_index` is its position. If the next character does not name a
    /// parameter, no characters are consumed and `Ok(None)` is returned.
    pub fn raw_param(&mut self, start_index: usize) -> Result<Option<TextUnit>> {
        let Some(c) = self.peek_char() else {
            return Ok(None);
        };

        let param = if c.is_ascii_digit() {
            // Unbraced positional parameters are a single digit: `$12` is
            // `${1}2`.
            self.consume_char();
            if c == '0' {
                Param::from(SpecialParam::Zero)
            } else {
                Param {
                    id: c.to_string(),
                    r#type: ParamType::Positional(c.to_digit(10).unwrap() as usize),
                }
            }
        } else if is_name_char(c) {
            let name_start = self.index();
            self.consume_char();
            while self.skip_if(is_name_char) {}
            Param::variable(self.source_string(name_start..self.index()))
        } else if let Some(special) = SpecialParam::from_char(c) {
            self.consume_char();
            Param::from(special)
        } else {
            return Ok(None);
        };

        let location = self.location_range(start_index..self.index());
        Ok(Some(TextUnit::RawParam { param, location }))
    }
}
