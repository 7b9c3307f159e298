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

//! Part of the lexer that parses dollar units
//!
//! Note that the detail lexer for each type of dollar units is in another
//! dedicated module.

use super::core::WordLexer;
use crate::parser::core::Result;
use crate::syntax::TextUnit;

impl WordLexer<'_> {
    /// Parses a text unit that starts with `$`.
    ///
    /// If the next character is `$`, a parameter expansion, command
    /// substitution, or arithmetic expansion is parsed. Otherwise, no
    /// characters are consumed and the return value is `Ok(None)`.
    ///
    /// If the `$` is not followed by anything that can start an expansion,
    /// the position is rewound and `Ok(None)` is returned; the `$` then
    /// parses as a literal character.
    pub fn dollar_unit(&mut self) -> Result<Option<TextUnit>> {
        let index = self.index();
        if !self.skip_if(|c| c == '$') {
            return Ok(None);
        }

        self.enter_nesting()?;
        let result = self.dollar_unit_tail(index);
        self.leave_nesting();

        match result? {
            Some(unit) => Ok(Some(unit)),
            None => {
                self.rewind(index);
                Ok(None)
            }
        }
    }

    fn dollar_unit_tail(&mut self, start_index: usize) -> Result<Option<TextUnit>> {
        if let Some(unit) = self.raw_param(start_index)? {
            return Ok(Some(unit));
        }

        if let Some(param) = self.braced_param(start_index)? {
            return Ok(Some(TextUnit::BracedParam(param)));
        }

        if let Some(unit) = self.arithmetic_expansion(start_index)? {
            return Ok(Some(unit));
        }

        if let Some(unit) = self.command_substitution(start_index)? {
            return Ok(Some(unit));
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lex::Lexer;
    use crate::parser::lex::WordContext;
    use crate::syntax::Param;
    use assert_matches::assert_matches;

    fn dollar_unit_of(source: &str) -> Result<Option<TextUnit>> {
        let mut lexer = Lexer::with_code(source);
        let mut lexer = WordLexer {
            lexer: &mut lexer,
            context: WordContext::Word,
        };
        lexer.dollar_unit()
    }

    #[test]
    fn lexer_dollar_unit_no_dollar() {
        assert_eq!(dollar_unit_of("foo").unwrap(), None);
        assert_eq!(dollar_unit_of("").unwrap(), None);
    }

    #[test]
    fn lexer_dollar_unit_dollar_followed_by_non_special() {
        let mut lexer = Lexer::with_code("$;");
        let mut lexer = WordLexer {
            lexer: &mut lexer,
            context: WordContext::Word,
        };
        let result = lexer.dollar_unit().unwrap();
        assert_eq!(result, None);
        assert_eq!(lexer.peek_char(), Some('$'));
    }

    #[test]
    fn lexer_dollar_unit_raw_param() {
        let unit = dollar_unit_of("$foo").unwrap().unwrap();
        assert_matches!(unit, TextUnit::RawParam { param, .. } => {
            assert_eq!(param, Param::variable("foo"));
        });
    }

    #[test]
    fn lexer_dollar_unit_braced_param() {
        let unit = dollar_unit_of("${foo}").unwrap().unwrap();
        assert_matches!(unit, TextUnit::BracedParam(param) => {
            assert_eq!(param.param, Param::variable("foo"));
        });
    }

    #[test]
    fn lexer_dollar_unit_command_substitution() {
        let unit = dollar_unit_of("$(date)").unwrap().unwrap();
        assert_matches!(unit, TextUnit::CommandSubst { content, .. } => {
            assert_eq!(&*content, "date");
        });
    }

    #[test]
    fn lexer_dollar_unit_arithmetic_expansion() {
        let unit = dollar_unit_of("$((1+2))").unwrap().unwrap();
        assert_matches!(unit, TextUnit::Arith { content, .. } => {
            assert_eq!(content.to_string(), "1+2");
        });
    }

    #[test]
    fn lexer_dollar_unit_with_line_continuation() {
        let unit = dollar_unit_of("$\\\nfoo").unwrap().unwrap();
        assert_matches!(unit, TextUnit::RawParam { param, .. } => {
            assert_eq!(param, Param::variable("foo"));
        });
    }
}
