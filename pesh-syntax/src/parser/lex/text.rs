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

//! Part of the lexer that parses texts

use super::core::Lexer;
use super::core::WordContext;
use super::core::WordLexer;
use crate::parser::core::Result;
use crate::parser::error::Error;
use crate::parser::error::SyntaxError;
use crate::syntax::Backslashed;
use crate::syntax::Literal;
use crate::syntax::Text;
use crate::syntax::TextUnit;

impl WordLexer<'_> {
    /// Parses a [`TextUnit`].
    ///
    /// This function parses a literal character, backslash-escaped character,
    /// [dollar unit](WordLexer::dollar_unit), or
    /// [backquote](WordLexer::backquote).
    ///
    /// `is_delimiter` is a function that decides if a character is a
    /// delimiter. An unquoted character is parsed only if `is_delimiter`
    /// returns false for it.
    ///
    /// `is_escapable` decides if a character can be escaped by a backslash.
    /// When `is_escapable` returns false, the preceding backslash is
    /// considered literal.
    pub fn text_unit<F, G>(
        &mut self,
        mut is_delimiter: F,
        mut is_escapable: G,
    ) -> Result<Option<TextUnit>>
    where
        F: FnMut(char) -> bool,
        G: FnMut(char) -> bool,
    {
        if self.skip_if(|c| c == '\\') {
            let continuation = self.set_line_continuation(false);
            let escaped = self.consume_char_if(&mut is_escapable);
            self.set_line_continuation(continuation);
            return match escaped {
                Some(c) => Ok(Some(Backslashed(c))),
                None => Ok(Some(Literal('\\'))),
            };
        }

        if let Some(u) = self.dollar_unit()? {
            return Ok(Some(u));
        }

        if let Some(u) = self.backquote()? {
            return Ok(Some(u));
        }

        if let Some(c) = self.consume_char_if(|c| !is_delimiter(c)) {
            return Ok(Some(Literal(c)));
        }

        Ok(None)
    }
}

impl Lexer {
    /// Parses a text, i.e., a (possibly empty) sequence of [`TextUnit`]s.
    ///
    /// `is_delimiter` tests if an unquoted character is a delimiter. When
    /// `is_delimiter` returns true, the parser stops parsing and returns the
    /// text up to the delimiter.
    ///
    /// `is_escapable` tests if a backslash can escape a character. When the
    /// parser finds an unquoted backslash, the next character is passed to
    /// `is_escapable`. If `is_escapable` returns true, the backslash is
    /// treated as a valid escape (`TextUnit::Backslashed`). Otherwise, it is
    /// a literal (`TextUnit::Literal`).
    pub fn text<F, G>(&mut self, mut is_delimiter: F, mut is_escapable: G) -> Result<Text>
    where
        F: FnMut(char) -> bool,
        G: FnMut(char) -> bool,
    {
        let mut units = vec![];

        let mut word_lexer = WordLexer {
            lexer: self,
            context: WordContext::Text,
        };
        while let Some(unit) = word_lexer.text_unit(&mut is_delimiter, &mut is_escapable)? {
            units.push(unit);
        }

        Ok(Text(units))
    }

    /// Parses a text that may contain nested parentheses.
    ///
    /// This function works similarly to [`text`](Self::text). However, if an
    /// unquoted `(` is found in the text, all text units are parsed up to the
    /// next matching unquoted `)`. Inside the parentheses, the `is_delimiter`
    /// function is ignored. After finding the `)`, this function continues
    /// parsing to find a delimiter (as per `is_delimiter`) or another pair of
    /// parentheses.
    ///
    /// Nested parentheses are supported: the number of `(`s and `)`s must
    /// match. In other words, the final delimiter is recognized only outside
    /// the outermost parentheses.
    pub fn text_with_parentheses<F, G>(
        &mut self,
        mut is_delimiter: F,
        mut is_escapable: G,
    ) -> Result<Text>
    where
        F: FnMut(char) -> bool,
        G: FnMut(char) -> bool,
    {
        let mut units = Vec::new();
        let mut open_paren_locations = Vec::new();
        loop {
            let mut is_delimiter_or_paren = |c| {
                if c == '(' {
                    return true;
                }
                if open_paren_locations.is_empty() {
                    is_delimiter(c)
                } else {
                    c == ')'
                }
            };
            let next_units = self.text(&mut is_delimiter_or_paren, &mut is_escapable)?.0;

            units.extend(next_units);

            if self.peek_char() == Some('(') {
                let location = self.location();
                self.consume_char();
                units.push(Literal('('));
                open_paren_locations.push(location);
            } else if let Some(opening_location) = open_paren_locations.pop() {
                if self.skip_if(|c| c == ')') {
                    units.push(Literal(')'));
                } else {
                    let cause = SyntaxError::UnclosedParen { opening_location }.into();
                    let location = self.location();
                    return Err(Error { cause, location });
                }
            } else {
                break;
            }
        }
        Ok(Text(units))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::error::ErrorCause;
    use crate::syntax::TextUnit::*;
    use assert_matches::assert_matches;

    fn word_lexer(lexer: &mut Lexer) -> WordLexer<'_> {
        WordLexer {
            lexer,
            context: WordContext::Word,
        }
    }

    #[test]
    fn lexer_text_unit_literal_accepted() {
        let mut lexer = Lexer::with_code("X");
        let mut lexer = word_lexer(&mut lexer);
        let mut called = false;
        let result = lexer
            .text_unit(
                |c| {
                    called = true;
                    assert_eq!(c, 'X');
                    false
                },
                |c| unreachable!("unexpected call to is_escapable({:?})", c),
            )
            .unwrap()
            .unwrap();
        assert!(called);
        assert_eq!(result, Literal('X'));
        assert_eq!(lexer.peek_char(), None);
    }

    #[test]
    fn lexer_text_unit_literal_rejected() {
        let mut lexer = Lexer::with_code(";");
        let mut lexer = word_lexer(&mut lexer);
        let result = lexer
            .text_unit(
                |c| {
                    assert_eq!(c, ';');
                    true
                },
                |c| unreachable!("unexpected call to is_escapable({:?})", c),
            )
            .unwrap();
        assert_eq!(result, None);
        assert_eq!(lexer.peek_char(), Some(';'));
    }

    #[test]
    fn lexer_text_unit_backslash_escapable() {
        let mut lexer = Lexer::with_code(r"\#");
        let mut lexer = word_lexer(&mut lexer);
        let result = lexer
            .text_unit(
                |c| unreachable!("unexpected call to is_delimiter({:?})", c),
                |c| {
                    assert_eq!(c, '#');
                    true
                },
            )
            .unwrap()
            .unwrap();
        assert_eq!(result, Backslashed('#'));
        assert_eq!(lexer.peek_char(), None);
    }

    #[test]
    fn lexer_text_unit_backslash_not_escapable() {
        let mut lexer = Lexer::with_code(r"\x");
        let mut lexer = word_lexer(&mut lexer);
        let result = lexer
            .text_unit(
                |c| unreachable!("unexpected call to is_delimiter({:?})", c),
                |_| false,
            )
            .unwrap()
            .unwrap();
        assert_eq!(result, Literal('\\'));
        assert_eq!(lexer.peek_char(), Some('x'));
    }

    #[test]
    fn lexer_text_unit_backslash_at_end_of_input() {
        let mut lexer = Lexer::with_code(r"\");
        let mut lexer = word_lexer(&mut lexer);
        let result = lexer
            .text_unit(
                |c| unreachable!("unexpected call to is_delimiter({:?})", c),
                |c| unreachable!("unexpected call to is_escapable({:?})", c),
            )
            .unwrap()
            .unwrap();
        assert_eq!(result, Literal('\\'));
        assert_eq!(lexer.peek_char(), None);
    }

    #[test]
    fn lexer_text_unit_backslash_newline_is_not_escape() {
        // A backslash-newline pair in a context where the newline is not
        // escapable is a literal backslash followed by a real newline.
        let mut lexer = Lexer::with_code("\\\nx");
        let mut lexer = word_lexer(&mut lexer);
        // The pair is consumed as a line continuation before the backslash
        // is even seen.
        let result = lexer.text_unit(|_| false, |_| false).unwrap().unwrap();
        assert_eq!(result, Literal('x'));
    }

    #[test]
    fn lexer_text_empty() {
        let mut lexer = Lexer::with_code("");
        let text = lexer.text(|_| false, |_| true).unwrap();
        assert_eq!(text, Text(vec![]));
    }

    #[test]
    fn lexer_text_to_delimiter() {
        let mut lexer = Lexer::with_code("abc;def");
        let text = lexer.text(|c| c == ';', |_| true).unwrap();
        assert_eq!(text.to_string(), "abc");
        assert_eq!(lexer.peek_char(), Some(';'));
    }

    #[test]
    fn lexer_text_with_expansions() {
        let mut lexer = Lexer::with_code("a$b$(c)`d`");
        let text = lexer.text(|_| false, |_| true).unwrap();
        assert_eq!(text.0.len(), 4);
        assert_eq!(text.0[0], Literal('a'));
        assert_matches!(&text.0[1], RawParam { param, .. } => {
            assert_eq!(param.id, "b");
        });
        assert_matches!(&text.0[2], CommandSubst { content, .. } => {
            assert_eq!(&**content, "c");
        });
        assert_matches!(&text.0[3], Backquote { content, .. } => {
            assert_eq!(content.len(), 1);
        });
    }

    #[test]
    fn lexer_text_with_parentheses_no_parentheses() {
        let mut lexer = Lexer::with_code("abc");
        let text = lexer.text_with_parentheses(|_| false, |_| true).unwrap();
        assert_eq!(text.to_string(), "abc");
    }

    #[test]
    fn lexer_text_with_parentheses_nested() {
        let mut lexer = Lexer::with_code("a(b(c)d);");
        let text = lexer.text_with_parentheses(|c| c == ';', |_| true).unwrap();
        assert_eq!(text.to_string(), "a(b(c)d)");
        assert_eq!(lexer.peek_char(), Some(';'));
    }

    #[test]
    fn lexer_text_with_parentheses_ignores_delimiter_inside() {
        let mut lexer = Lexer::with_code("a(b;c);");
        let text = lexer.text_with_parentheses(|c| c == ';', |_| true).unwrap();
        assert_eq!(text.to_string(), "a(b;c)");
        assert_eq!(lexer.peek_char(), Some(';'));
    }

    #[test]
    fn lexer_text_with_parentheses_unclosed() {
        let mut lexer = Lexer::with_code("a(b");
        let e = lexer
            .text_with_parentheses(|_| false, |_| true)
            .unwrap_err();
        assert_matches!(e.cause, ErrorCause::Syntax(SyntaxError::UnclosedParen { opening_location }) => {
            assert_eq!(opening_location.range, 1..2);
        });
        assert_eq!(e.location.range, 3..3);
    }
}
