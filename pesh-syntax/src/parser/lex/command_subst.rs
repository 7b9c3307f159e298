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

//! Part of the lexer that parses command substitutions
//!
//! The lexer captures the raw text of a command substitution without parsing
//! it; the content is parsed when the substitution is expanded. The end of
//! the substitution is found by balanced-bracket scanning that respects
//! single quotes, double quotes, backslashes, backquotes, and nested
//! parentheses.

use super::core::Lexer;
use super::core::WordLexer;
use crate::parser::core::Result;
use crate::parser::error::Error;
use crate::parser::error::SyntaxError;
use crate::source::Location;
use crate::syntax::TextUnit;

impl Lexer {
    /// Scans the raw content of a parenthesized substitution.
    ///
    /// The opening `(` must have been consumed; the matching `)` is consumed
    /// by this function. The returned string is the text between the
    /// parentheses, with quotes and nested parentheses respected but not
    /// interpreted.
    pub fn raw_paren_content(&mut self, opening_location: Location) -> Result<String> {
        let content_start = self.index();
        let continuation = self.set_line_continuation(false);
        let result = self.raw_paren_content_impl();
        self.set_line_continuation(continuation);
        match result {
            Some(end) => Ok(self.source_string(content_start..end)),
            None => {
                let cause = SyntaxError::UnclosedCommandSubstitution { opening_location }.into();
                let location = self.location();
                Err(Error { cause, location })
            }
        }
    }

    /// Returns the index of the matching `)`, consuming it, or `None` at the
    /// end of input.
    fn raw_paren_content_impl(&mut self) -> Option<usize> {
        let mut depth = 1;
        loop {
            let index = self.index();
            let Some(c) = self.peek_char() else {
                return None;
            };
            self.consume_char();
            match c {
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(index);
                    }
                }
                '\\' => {
                    // The escaped character cannot close the substitution.
                    if self.peek_char().is_some() {
                        self.consume_char();
                    }
                }
                '\'' => {
                    // Single quotes are verbatim up to the closing quote.
                    while let Some(c) = self.peek_char() {
                        self.consume_char();
                        if c == '\'' {
                            break;
                        }
                    }
                }
                '"' => {
                    // Inside double quotes, a backslash escapes the next
                    // character; everything else is literal up to the
                    // closing quote.
                    loop {
                        let Some(c) = self.peek_char() else {
                            return None;
                        };
                        self.consume_char();
                        match c {
                            '"' => break,
                            '\\' => {
                                if self.peek_char().is_some() {
                                    self.consume_char();
                                }
                            }
                            _ => (),
                        }
                    }
                }
                '`' => {
                    // Backquotes nest their own escape rules.
                    loop {
                        let Some(c) = self.peek_char() else {
                            return None;
                        };
                        self.consume_char();
                        match c {
                            '`' => break,
                            '\\' => {
                                if self.peek_char().is_some() {
                                    self.consume_char();
                                }
                            }
                            _ => (),
                        }
                    }
                }
                _ => (),
            }
        }
    }
}

impl WordLexer<'_> {
    /// Parses a command substitution of the form `$(...)`.
    ///
    /// The initial `$` must have been consumed before calling this function.
    /// This function checks if the next character is an opening parenthesis.
    /// If so, the raw content is scanned up to and including the matching
    /// closing parenthesis. Otherwise, no characters are consumed and the
    /// return value is `Ok(None)`.
    ///
    /// `start_index` is the position of the initial `$`.
    pub fn command_substitution(&mut self, start_index: usize) -> Result<Option<TextUnit>> {
        if !self.skip_if(|c| c == '(') {
            return Ok(None);
        }

        let opening_location = self.location_range(start_index..self.index());
        let content = self.raw_paren_content(opening_location)?;
        let location = self.location_range(start_index..self.index());
        Ok(Some(TextUnit::CommandSubst {
            content: content.into(),
            location,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::error::ErrorCause;
    use crate::parser::lex::WordContext;
    use assert_matches::assert_matches;

    fn command_subst_of(source: &str) -> Result<Option<TextUnit>> {
        let mut lexer = Lexer::with_code(source);
        assert_eq!(lexer.peek_char(), Some('$'));
        lexer.consume_char();
        let mut lexer = WordLexer {
            lexer: &mut lexer,
            context: WordContext::Word,
        };
        lexer.command_substitution(0)
    }

    #[test]
    fn lexer_command_substitution_empty() {
        let unit = command_subst_of("$()").unwrap().unwrap();
        assert_matches!(unit, TextUnit::CommandSubst { content, location } => {
            assert_eq!(&*content, "");
            assert_eq!(location.range, 0..3);
        });
    }

    #[test]
    fn lexer_command_substitution_simple() {
        let unit = command_subst_of("$( foo bar )x").unwrap().unwrap();
        assert_matches!(unit, TextUnit::CommandSubst { content, location } => {
            assert_eq!(&*content, " foo bar ");
            assert_eq!(location.range, 0..12);
        });
    }

    #[test]
    fn lexer_command_substitution_nested_parentheses() {
        let unit = command_subst_of("$( (a); (b) )").unwrap().unwrap();
        assert_matches!(unit, TextUnit::CommandSubst { content, .. } => {
            assert_eq!(&*content, " (a); (b) ");
        });
    }

    #[test]
    fn lexer_command_substitution_quotes_protect_parentheses() {
        let unit = command_subst_of(r#"$(echo ')' "(" \))"#).unwrap().unwrap();
        assert_matches!(unit, TextUnit::CommandSubst { content, .. } => {
            assert_eq!(&*content, r#"echo ')' "(" \)"#);
        });
    }

    #[test]
    fn lexer_command_substitution_nested_substitution() {
        let unit = command_subst_of("$(echo $(date))").unwrap().unwrap();
        assert_matches!(unit, TextUnit::CommandSubst { content, .. } => {
            assert_eq!(&*content, "echo $(date)");
        });
    }

    #[test]
    fn lexer_command_substitution_none_without_parenthesis() {
        let result = command_subst_of("$;").unwrap();
        assert_eq!(result, None);
    }

    #[test]
    fn lexer_command_substitution_unclosed() {
        let e = command_subst_of("$(foo").unwrap_err();
        assert_matches!(
            e.cause,
            ErrorCause::Syntax(SyntaxError::UnclosedCommandSubstitution { opening_location }) => {
                assert_eq!(opening_location.range, 0..2);
            }
        );
        assert_eq!(e.location.range, 5..5);
    }

    #[test]
    fn lexer_command_substitution_unclosed_in_quotes() {
        let e = command_subst_of(r#"$(echo ")"#).unwrap_err();
        assert_matches!(
            e.cause,
            ErrorCause::Syntax(SyntaxError::UnclosedCommandSubstitution { .. })
        );
    }
}
