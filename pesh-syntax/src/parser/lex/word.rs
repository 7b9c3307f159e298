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

//! Part of the lexer that parses words

use super::core::Lexer;
use super::core::WordContext;
use super::core::WordLexer;
use crate::parser::core::Result;
use crate::parser::error::Error;
use crate::parser::error::SyntaxError;
use crate::source::Location;
use crate::syntax::ProcSubstDirection;
use crate::syntax::Word;
use crate::syntax::WordUnit::{self, DoubleQuote, ProcSubst, SingleQuote, Unquoted};

impl Lexer {
    /// Parses a single-quoted string.
    ///
    /// The opening `'` must have been consumed before calling this function.
    /// The closing `'` is consumed in this function.
    ///
    /// `opening_location` should be the location of the opening `'`. It is
    /// used to construct an error value, but this function does not check if
    /// it actually is a location of `'`.
    fn single_quote(&mut self, opening_location: Location) -> Result<WordUnit> {
        let mut content = String::new();
        let continuation = self.set_line_continuation(false);
        loop {
            match self.peek_char() {
                Some('\'') => {
                    self.consume_char();
                    break;
                }
                Some(c) => {
                    self.consume_char();
                    content.push(c);
                }
                None => {
                    self.set_line_continuation(continuation);
                    let cause = SyntaxError::UnclosedSingleQuote { opening_location }.into();
                    let location = self.location();
                    return Err(Error { cause, location });
                }
            }
        }
        self.set_line_continuation(continuation);
        Ok(SingleQuote(content))
    }

    /// Parses a double-quoted string.
    ///
    /// The opening `"` must have been consumed before calling this function.
    /// The closing `"` is consumed in this function.
    ///
    /// `opening_location` should be the location of the opening `"`. It is
    /// used to construct an error value, but this function does not check if
    /// it actually is a location of `"`.
    fn double_quote(&mut self, opening_location: Location) -> Result<WordUnit> {
        fn is_delimiter(c: char) -> bool {
            c == '"'
        }
        fn is_escapable(c: char) -> bool {
            matches!(c, '$' | '`' | '"' | '\\')
        }

        let content = self.text(is_delimiter, is_escapable)?;

        if self.skip_if(|c| c == '"') {
            Ok(DoubleQuote(content))
        } else {
            let cause = SyntaxError::UnclosedDoubleQuote { opening_location }.into();
            let location = self.location();
            Err(Error { cause, location })
        }
    }
}

impl WordLexer<'_> {
    /// Parses a process substitution (`<(...)` or `>(...)`).
    ///
    /// If the next characters do not start a process substitution, or the
    /// feature is disabled in the options, no characters are consumed and the
    /// return value is `Ok(None)`.
    fn proc_subst(&mut self) -> Result<Option<WordUnit>> {
        if !self.options().process_substitution {
            return Ok(None);
        }
        let start_index = self.index();
        let direction = match self.peek_char() {
            Some('<') => ProcSubstDirection::In,
            Some('>') => ProcSubstDirection::Out,
            _ => return Ok(None),
        };
        self.consume_char();
        if !self.skip_if(|c| c == '(') {
            self.rewind(start_index);
            return Ok(None);
        }

        let opening_location = self.location_range(start_index..self.index());
        let content = self.raw_paren_content(opening_location)?;
        let location = self.location_range(start_index..self.index());
        Ok(Some(ProcSubst {
            direction,
            content: content.into(),
            location,
        }))
    }

    /// Parses a word unit.
    ///
    /// `is_delimiter` is a function that decides a character is a delimiter.
    /// An unquoted character is parsed only if `is_delimiter` returns false
    /// for it.
    ///
    /// This function does not parse tilde expansion. See
    /// [`Word::parse_tilde_front`].
    pub fn word_unit<F>(&mut self, is_delimiter: F) -> Result<Option<WordUnit>>
    where
        F: FnMut(char) -> bool,
    {
        let allow_quotes = match self.context {
            WordContext::Word => true,
            WordContext::Text => false,
        };

        match self.peek_char() {
            Some('\'') if allow_quotes => {
                let location = self.location();
                self.consume_char();
                self.single_quote(location).map(Some)
            }
            Some('"') if allow_quotes => {
                let location = self.location();
                self.consume_char();
                self.double_quote(location).map(Some)
            }
            _ => {
                if allow_quotes {
                    if let Some(unit) = self.dollar_single_quote()? {
                        return Ok(Some(unit));
                    }
                    if let Some(unit) = self.proc_subst()? {
                        return Ok(Some(unit));
                    }
                }
                Ok(self.text_unit(is_delimiter, |_| true)?.map(Unquoted))
            }
        }
    }

    /// Parses a word token.
    ///
    /// `is_delimiter` is a function that decides which character is a
    /// delimiter. The word ends when an unquoted delimiter is found. To parse
    /// a normal word token, you should pass
    /// [`is_token_delimiter_char`](super::is_token_delimiter_char) as
    /// `is_delimiter`. Other functions can be passed to parse a word that
    /// ends with different delimiters.
    ///
    /// This function does not parse any tilde expansions in the word.
    /// To parse them, you need to call [`Word::parse_tilde_front`] or
    /// [`Word::parse_tilde_everywhere`] on the resultant word.
    pub fn word<F>(&mut self, mut is_delimiter: F) -> Result<Word>
    where
        F: FnMut(char) -> bool,
    {
        let _ = self.peek_char();
        let start_index = self.index();
        let mut units = vec![];
        while let Some(unit) = self.word_unit(&mut is_delimiter)? {
            units.push(unit)
        }
        let location = self.location_range(start_index..self.index());
        Ok(Word { units, location })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::error::ErrorCause;
    use crate::syntax::Text;
    use crate::syntax::TextUnit::{Backslashed, CommandSubst, Literal};
    use assert_matches::assert_matches;

    fn word_lexer(lexer: &mut Lexer) -> WordLexer<'_> {
        WordLexer {
            lexer,
            context: WordContext::Word,
        }
    }

    fn no_delimiter(c: char) -> bool {
        panic!("unexpected call to is_delimiter({c:?})")
    }

    #[test]
    fn lexer_word_unit_unquoted() {
        let mut lexer = Lexer::with_code("$()");
        let mut lexer = word_lexer(&mut lexer);
        let result = lexer.word_unit(no_delimiter).unwrap().unwrap();
        assert_matches!(result, Unquoted(CommandSubst { content, location }) => {
            assert_eq!(&*content, "");
            assert_eq!(location.range, 0..3);
        });
        assert_eq!(lexer.peek_char(), None);
    }

    #[test]
    fn lexer_word_unit_unquoted_escapes() {
        // Any characters can be escaped in this context.
        let mut lexer = Lexer::with_code(r#"\a\$\`\"\\\'\#"#);
        let mut lexer = word_lexer(&mut lexer);
        for c in ['a', '$', '`', '"', '\\', '\'', '#'] {
            let result = lexer.word_unit(no_delimiter).unwrap();
            assert_eq!(result, Some(Unquoted(Backslashed(c))));
        }
        assert_eq!(lexer.peek_char(), None);
    }

    #[test]
    fn lexer_word_unit_single_quote() {
        let mut lexer = Lexer::with_code("'abc'x");
        let mut lexer = word_lexer(&mut lexer);
        let result = lexer.word_unit(no_delimiter).unwrap().unwrap();
        assert_eq!(result, SingleQuote("abc".to_string()));
        assert_eq!(lexer.peek_char(), Some('x'));
    }

    #[test]
    fn lexer_word_unit_single_quote_multiline() {
        // A newline is permitted in single quotes and line continuations are
        // not recognized.
        let mut lexer = Lexer::with_code("'a\\\nb\nc'");
        let mut lexer = word_lexer(&mut lexer);
        let result = lexer.word_unit(no_delimiter).unwrap().unwrap();
        assert_eq!(result, SingleQuote("a\\\nb\nc".to_string()));
    }

    #[test]
    fn lexer_word_unit_single_quote_unclosed() {
        let mut lexer = Lexer::with_code("'abc");
        let mut lexer = word_lexer(&mut lexer);
        let e = lexer.word_unit(no_delimiter).unwrap_err();
        assert_matches!(e.cause, ErrorCause::Syntax(SyntaxError::UnclosedSingleQuote { opening_location }) => {
            assert_eq!(opening_location.range, 0..1);
        });
    }

    #[test]
    fn lexer_word_unit_double_quote() {
        let mut lexer = Lexer::with_code(r#""a$b\$c""#);
        let mut lexer = word_lexer(&mut lexer);
        let result = lexer.word_unit(no_delimiter).unwrap().unwrap();
        assert_matches!(result, DoubleQuote(Text(units)) => {
            assert_eq!(units[0], Literal('a'));
            assert_matches!(&units[1], crate::syntax::TextUnit::RawParam { param, .. } => {
                assert_eq!(param.id, "b");
            });
            assert_eq!(units[2], Backslashed('$'));
            assert_eq!(units[3], Literal('c'));
        });
    }

    #[test]
    fn lexer_word_unit_double_quote_unclosed() {
        let mut lexer = Lexer::with_code("\"abc");
        let mut lexer = word_lexer(&mut lexer);
        let e = lexer.word_unit(no_delimiter).unwrap_err();
        assert_matches!(e.cause, ErrorCause::Syntax(SyntaxError::UnclosedDoubleQuote { opening_location }) => {
            assert_eq!(opening_location.range, 0..1);
        });
    }

    #[test]
    fn lexer_word_unit_proc_subst() {
        let mut lexer = Lexer::with_code("<(sort a)");
        let mut lexer = word_lexer(&mut lexer);
        let result = lexer.word_unit(no_delimiter).unwrap().unwrap();
        assert_matches!(result, ProcSubst { direction, content, location } => {
            assert_eq!(direction, ProcSubstDirection::In);
            assert_eq!(&*content, "sort a");
            assert_eq!(location.range, 0..9);
        });
    }

    #[test]
    fn lexer_word_unit_proc_subst_out() {
        let mut lexer = Lexer::with_code(">(cat)");
        let mut lexer = word_lexer(&mut lexer);
        let result = lexer.word_unit(no_delimiter).unwrap().unwrap();
        assert_matches!(result, ProcSubst { direction, .. } => {
            assert_eq!(direction, ProcSubstDirection::Out);
        });
    }

    #[test]
    fn lexer_word_unit_proc_subst_disabled_in_posix_mode() {
        let mut lexer = Lexer::with_code("<(sort a)");
        lexer.set_options(crate::parser::lex::Options::posix());
        let mut lexer = word_lexer(&mut lexer);
        let result = lexer.word_unit(|c| c == '<').unwrap();
        assert_eq!(result, None);
    }

    #[test]
    fn lexer_word_empty() {
        let mut lexer = Lexer::with_code(";");
        let mut lexer = word_lexer(&mut lexer);
        let word = lexer.word(|c| c == ';').unwrap();
        assert_eq!(word.units, []);
        assert_eq!(word.location.range, 0..0);
    }

    #[test]
    fn lexer_word_mixed_units() {
        let mut lexer = Lexer::with_code(r#"pre"mid"$var post"#);
        let mut lexer = word_lexer(&mut lexer);
        let word = lexer
            .word(crate::parser::lex::is_token_delimiter_char)
            .unwrap();
        assert_eq!(word.to_string(), r#"pre"mid"$var"#);
        assert_eq!(word.units.len(), 5);
        assert_eq!(word.location.range, 0..12);
        assert_eq!(lexer.peek_char(), Some(' '));
    }

    #[test]
    fn lexer_word_dollar_single_quote() {
        let mut lexer = Lexer::with_code(r"$'a\n'x");
        let mut lexer = word_lexer(&mut lexer);
        let word = lexer
            .word(crate::parser::lex::is_token_delimiter_char)
            .unwrap();
        assert_matches!(&word.units[0], WordUnit::DollarSingleQuote(_));
        assert_eq!(word.units.len(), 2);
    }
}
