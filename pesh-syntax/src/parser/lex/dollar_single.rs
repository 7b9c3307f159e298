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

//! Part of the lexer that parses dollar-single-quoted strings (`$'...'`)

use super::core::WordLexer;
use crate::parser::core::Result;
use crate::parser::error::Error;
use crate::parser::error::SyntaxError;
use crate::syntax::EscapeUnit;
use crate::syntax::EscapedString;
use crate::syntax::WordUnit;

impl WordLexer<'_> {
    /// Parses a dollar-single-quoted string.
    ///
    /// If the input does not start with `$'`, or ANSI-C quoting is disabled
    /// in the options, no characters are consumed and the return value is
    /// `Ok(None)`.
    pub fn dollar_single_quote(&mut self) -> Result<Option<WordUnit>> {
        if !self.options().ansi_c_quoting {
            return Ok(None);
        }
        let start_index = self.index();
        if !self.skip_if(|c| c == '$') {
            return Ok(None);
        }
        if !self.skip_if(|c| c == '\'') {
            self.rewind(start_index);
            return Ok(None);
        }
        let opening_location = self.location_range(start_index..self.index());

        let continuation = self.set_line_continuation(false);
        let result = self.dollar_single_quote_content(opening_location);
        self.set_line_continuation(continuation);
        result.map(Some)
    }

    fn dollar_single_quote_content(&mut self, opening_location: crate::source::Location) -> Result<WordUnit> {
        let mut units = Vec::new();
        loop {
            let Some(c) = self.peek_char() else {
                let cause = SyntaxError::UnclosedDollarSingleQuote { opening_location }.into();
                let location = self.location();
                return Err(Error { cause, location });
            };
            self.consume_char();
            match c {
                '\'' => break,
                '\\' => units.push(self.escape_unit()?),
                _ => units.push(EscapeUnit::Literal(c)),
            }
        }
        Ok(WordUnit::DollarSingleQuote(EscapedString(units)))
    }

    /// Parses the remainder of an escape sequence after the backslash.
    fn escape_unit(&mut self) -> Result<EscapeUnit> {
        let escape_start = self.index() - 1;
        let invalid_escape = |lexer: &Self, end: usize| Error {
            cause: SyntaxError::InvalidEscape.into(),
            location: lexer.location_range(escape_start..end),
        };

        let Some(c) = self.peek_char() else {
            return Err(Error {
                cause: SyntaxError::IncompleteEscape.into(),
                location: self.location_range(escape_start..self.index()),
            });
        };
        self.consume_char();
        match c {
            '"' => Ok(EscapeUnit::DoubleQuote),
            '\'' => Ok(EscapeUnit::SingleQuote),
            '\\' => Ok(EscapeUnit::Backslash),
            'a' => Ok(EscapeUnit::Alert),
            'b' => Ok(EscapeUnit::Backspace),
            'e' | 'E' => Ok(EscapeUnit::Escape),
            'f' => Ok(EscapeUnit::FormFeed),
            'n' => Ok(EscapeUnit::Newline),
            'r' => Ok(EscapeUnit::CarriageReturn),
            't' => Ok(EscapeUnit::Tab),
            'v' => Ok(EscapeUnit::VerticalTab),

            'c' => {
                let Some(c) = self.peek_char() else {
                    return Err(Error {
                        cause: SyntaxError::IncompleteControlEscape.into(),
                        location: self.location_range(escape_start..self.index()),
                    });
                };
                self.consume_char();
                let value = match c {
                    '\\' => {
                        // A control-backslash must be written `\c\\`.
                        if self.skip_if(|c| c == '\\') {
                            b'\\'
                        } else {
                            return Err(Error {
                                cause: SyntaxError::IncompleteControlBackslashEscape.into(),
                                location: self.location_range(escape_start..self.index()),
                            });
                        }
                    }
                    c if c.is_ascii() => c as u8,
                    _ => return Err(invalid_escape(self, self.index())),
                };
                Ok(EscapeUnit::Control(value.to_ascii_uppercase() ^ 0x40))
            }

            'x' => {
                let mut value = 0u32;
                let mut digits = 0;
                while digits < 2 {
                    let Some(d) = self.consume_char_if(|c| c.is_ascii_hexdigit()) else {
                        break;
                    };
                    value = value * 16 + d.to_digit(16).unwrap();
                    digits += 1;
                }
                if digits == 0 {
                    return Err(Error {
                        cause: SyntaxError::IncompleteHexEscape.into(),
                        location: self.location_range(escape_start..self.index()),
                    });
                }
                Ok(EscapeUnit::Hex(value as u8))
            }

            '0'..='7' => {
                let mut value = c.to_digit(8).unwrap();
                let mut digits = 1;
                while digits < 3 {
                    let Some(d) = self.consume_char_if(|c| matches!(c, '0'..='7')) else {
                        break;
                    };
                    value = value * 8 + d.to_digit(8).unwrap();
                    digits += 1;
                }
                match u8::try_from(value) {
                    Ok(value) => Ok(EscapeUnit::Octal(value)),
                    Err(_) => Err(Error {
                        cause: SyntaxError::OctalEscapeOutOfRange.into(),
                        location: self.location_range(escape_start..self.index()),
                    }),
                }
            }

            'u' => self.unicode_escape(escape_start, 4),
            'U' => self.unicode_escape(escape_start, 8),

            _ => Err(invalid_escape(self, self.index())),
        }
    }

    fn unicode_escape(&mut self, escape_start: usize, max_digits: usize) -> Result<EscapeUnit> {
        let mut value = 0u32;
        let mut digits = 0;
        while digits < max_digits {
            let Some(d) = self.consume_char_if(|c| c.is_ascii_hexdigit()) else {
                break;
            };
            value = value.saturating_mul(16).saturating_add(d.to_digit(16).unwrap());
            digits += 1;
        }
        if digits == 0 {
            let cause = if max_digits == 4 {
                SyntaxError::IncompleteShortUnicodeEscape
            } else {
                SyntaxError::IncompleteLongUnicodeEscape
            };
            return Err(Error {
                cause: cause.into(),
                location: self.location_range(escape_start..self.index()),
            });
        }
        match char::from_u32(value) {
            Some(c) => Ok(EscapeUnit::Unicode(c)),
            None => Err(Error {
                cause: SyntaxError::UnicodeEscapeOutOfRange.into(),
                location: self.location_range(escape_start..self.index()),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::error::ErrorCause;
    use crate::parser::lex::Lexer;
    use crate::parser::lex::WordContext;
    use assert_matches::assert_matches;

    fn dollar_single_quote_of(source: &str) -> Result<Option<WordUnit>> {
        let mut lexer = Lexer::with_code(source);
        let mut lexer = WordLexer {
            lexer: &mut lexer,
            context: WordContext::Word,
        };
        lexer.dollar_single_quote()
    }

    fn units_of(source: &str) -> Vec<EscapeUnit> {
        match dollar_single_quote_of(source).unwrap().unwrap() {
            WordUnit::DollarSingleQuote(EscapedString(units)) => units,
            other => panic!("not a dollar single quote: {other:?}"),
        }
    }

    #[test]
    fn lexer_dollar_single_quote_literals() {
        assert_eq!(units_of("$''"), []);
        assert_eq!(
            units_of("$'ab'"),
            [EscapeUnit::Literal('a'), EscapeUnit::Literal('b')]
        );
    }

    #[test]
    fn lexer_dollar_single_quote_named_escapes() {
        assert_eq!(
            units_of(r"$'\n\t\\\''"),
            [
                EscapeUnit::Newline,
                EscapeUnit::Tab,
                EscapeUnit::Backslash,
                EscapeUnit::SingleQuote,
            ]
        );
    }

    #[test]
    fn lexer_dollar_single_quote_numeric_escapes() {
        assert_eq!(
            units_of(r"$'\033\x1bA\U0001F600'"),
            [
                EscapeUnit::Octal(0o33),
                EscapeUnit::Hex(0x1B),
                EscapeUnit::Unicode('A'),
                EscapeUnit::Unicode('😀'),
            ]
        );
    }

    #[test]
    fn lexer_dollar_single_quote_control_escape() {
        assert_eq!(units_of(r"$'\cA'"), [EscapeUnit::Control(1)]);
        assert_eq!(units_of(r"$'\ca'"), [EscapeUnit::Control(1)]);
    }

    #[test]
    fn lexer_dollar_single_quote_none_cases() {
        assert_eq!(dollar_single_quote_of("x").unwrap(), None);
        assert_eq!(dollar_single_quote_of("$x").unwrap(), None);

        let mut lexer = Lexer::with_code("$'a'");
        lexer.set_options(crate::parser::lex::Options::posix());
        let mut lexer = WordLexer {
            lexer: &mut lexer,
            context: WordContext::Word,
        };
        assert_eq!(lexer.dollar_single_quote().unwrap(), None);
    }

    #[test]
    fn lexer_dollar_single_quote_unclosed() {
        let e = dollar_single_quote_of("$'abc").unwrap_err();
        assert_matches!(
            e.cause,
            ErrorCause::Syntax(SyntaxError::UnclosedDollarSingleQuote { opening_location }) => {
                assert_eq!(opening_location.range, 0..2);
            }
        );
    }

    #[test]
    fn lexer_dollar_single_quote_invalid_escape() {
        let e = dollar_single_quote_of(r"$'\q'").unwrap_err();
        assert_eq!(e.cause, ErrorCause::Syntax(SyntaxError::InvalidEscape));
        assert_eq!(e.location.range, 2..4);
    }

    #[test]
    fn lexer_dollar_single_quote_octal_out_of_range() {
        let e = dollar_single_quote_of(r"$'\777'").unwrap_err();
        assert_eq!(
            e.cause,
            ErrorCause::Syntax(SyntaxError::OctalEscapeOutOfRange)
        );
    }
}
