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

//! Part of the lexer that parses arithmetic expansions

use super::core::WordLexer;
use crate::parser::core::Result;
use crate::syntax::TextUnit;

impl WordLexer<'_> {
    /// Parses an arithmetic expansion of the form `$((...))`.
    ///
    /// The initial `$` must have been consumed before calling this function;
    /// `start_index` is its position. This function then requires two
    /// opening parentheses. The content is parsed as a [text with
    /// parentheses](crate::parser::lex::Lexer::text_with_parentheses) so
    /// that inner expansions are recognized, and must be followed by two
    /// closing parentheses.
    ///
    /// `$((...))` is ambiguous with a command substitution containing a
    /// subshell, as in `$((echo a); (echo b))`. When the content cannot be
    /// closed by `))`, the position is rewound and `Ok(None)` is returned so
    /// that the caller can re-parse the input as a command substitution.
    pub fn arithmetic_expansion(&mut self, start_index: usize) -> Result<Option<TextUnit>> {
        fn is_escapable(c: char) -> bool {
            matches!(c, '$' | '`' | '\\')
        }

        let index = self.index();
        if !self.skip_if(|c| c == '(') {
            return Ok(None);
        }
        if !self.skip_if(|c| c == '(') {
            self.rewind(index);
            return Ok(None);
        }

        let content = match self.text_with_parentheses(|c| c == ')', is_escapable) {
            Ok(content) => content,
            Err(_) => {
                // Unbalanced inner parentheses; this may still be a valid
                // command substitution.
                self.rewind(index);
                return Ok(None);
            }
        };

        // The first `)` terminated the text.
        if !self.skip_if(|c| c == ')') {
            self.rewind(index);
            return Ok(None);
        }
        if !self.skip_if(|c| c == ')') {
            self.rewind(index);
            return Ok(None);
        }

        let location = self.location_range(start_index..self.index());
        Ok(Some(TextUnit::Arith { content, location }))
    }
}
