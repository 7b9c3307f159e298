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

//! Part of the lexer that parses backquotes

use super::core::WordContext;
use super::core::WordLexer;
use crate::parser::core::Result;
use crate::parser::error::Error;
use crate::parser::error::SyntaxError;
use crate::syntax::BackquoteUnit;
use crate::syntax::TextUnit;

impl WordLexer<'_> {
    /// Parses a command substitution of the form `` `...` ``.
    ///
    /// If the next character is not a backquote, no characters are consumed
    /// and the return value is `Ok(None)`.
    ///
    /// Inside backquotes, only `$`, `` ` `` and `\` can be escaped by a
    /// backslash. When the word is being parsed inside double quotes
    /// ([`WordContext::Text`]), `"` is escapable as well.
    pub fn backquote(&mut self) -> Result<Option<TextUnit>> {
        let start_index = self.index();
        if !self.skip_if(|c| c == '`') {
            return Ok(None);
        }
        let opening_location = self.location_range(start_index..self.index());

        let double_quote_escapable = match self.context {
            WordContext::Word => false,
            WordContext::Text => true,
        };

        let mut content = Vec::new();
        loop {
            let Some(c) = self.peek_char() else {
                let cause = SyntaxError::UnclosedBackquote { opening_location }.into();
                let location = self.location();
                return Err(Error { cause, location });
            };
            self.consume_char();
            match c {
                '`' => break,
                '\\' => match self.peek_char() {
                    Some(c @ ('$' | '`' | '\\')) => {
                        self.consume_char();
                        content.push(BackquoteUnit::Backslashed(c));
                    }
                    Some('"') if double_quote_escapable => {
                        self.consume_char();
                        content.push(BackquoteUnit::Backslashed('"'));
                    }
                    _ => content.push(BackquoteUnit::Literal('\\')),
                },
                _ => content.push(BackquoteUnit::Literal(c)),
            }
        }

        let location = self.location_range(start_index..self.index());
        Ok(Some(TextUnit::Backquote { content, location }))
    }
}
