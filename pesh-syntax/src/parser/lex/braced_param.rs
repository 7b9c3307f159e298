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

//! Part of the lexer that parses braced parameter expansions

use super::core::WordLexer;
use super::raw_param::is_name_char;
use crate::parser::core::Result;
use crate::parser::error::Error;
use crate::parser::error::SyntaxError;
use crate::syntax::BracedParam;
use crate::syntax::Indirection;
use crate::syntax::Modifier;
use crate::syntax::Param;
use crate::syntax::ParamIndex;
use crate::syntax::ParamType;
use crate::syntax::PrefixMatchMode;
use crate::syntax::SpecialParam;
use std::num::IntErrorKind;

/// Determines the type of the parameter.
///
/// This function assumes the argument contains [name characters](is_name_char)
/// only.
///
/// - If the argument does not start with a digit, it is a named parameter.
/// - Otherwise, it is a positional parameter. However, if it contains
///   non-digit characters, it is an error.
///
/// This function does not care for special parameters other than `0`. The
/// special parameter `0` is recognized only if the argument is exactly a
/// single-digit `0`, as required by POSIX.
#[must_use]
fn type_of_id(id: &str) -> Option<ParamType> {
    if id == "0" {
        return Some(ParamType::Special(SpecialParam::Zero));
    }
    if id.starts_with(|c: char| c.is_ascii_digit()) {
        return match id.parse() {
            Ok(index) => Some(ParamType::Positional(index)),
            Err(e) => match e.kind() {
                IntErrorKind::PosOverflow => Some(ParamType::Positional(usize::MAX)),
                _ => None,
            },
        };
    }
    Some(ParamType::Variable)
}

impl WordLexer<'_> {
    /// Tests if there is a length prefix (`#`).
    ///
    /// This function may consume many characters, possibly beyond the length
    /// prefix, regardless of the result. The caller should remember the index
    /// before calling this function and rewind afterwards.
    fn has_length_prefix(&mut self) -> Result<bool> {
        if !self.skip_if(|c| c == '#') {
            return Ok(false);
        }

        // A parameter expansion cannot have both a prefix and suffix
        // modifier. For example, `${#-?}` is not considered to have a
        // prefix. We need to look ahead to see if it is okay to treat the
        // `#` as a prefix.
        if let Some(c) = self.peek_char() {
            // Check characters that cannot be a special parameter.
            if matches!(c, '}' | '+' | '=' | ':' | '%' | '/') {
                return Ok(false);
            }

            // Check characters that can be either a special parameter or the
            // beginning of a modifier
            if matches!(c, '-' | '?' | '#') {
                self.consume_char();
                if let Some(c) = self.peek_char() {
                    return Ok(c == '}');
                }
            }
        }

        Ok(true)
    }

    /// Consumes a length prefix (`#`) if any.
    fn length_prefix(&mut self) -> Result<bool> {
        let initial_index = self.index();
        let has_length_prefix = self.has_length_prefix()?;
        self.rewind(initial_index);
        if has_length_prefix {
            self.consume_char();
        }
        Ok(has_length_prefix)
    }

    /// Consumes a leading `!` if it denotes indirection.
    ///
    /// A `!` immediately followed by the closing brace is the special
    /// parameter `$!`, not indirection.
    fn indirection_prefix(&mut self) -> bool {
        let initial_index = self.index();
        if !self.skip_if(|c| c == '!') {
            return false;
        }
        if matches!(self.peek_char(), Some('}') | None) {
            self.rewind(initial_index);
            return false;
        }
        true
    }

    /// Parses the subscript of an array parameter, if any.
    fn subscript(&mut self) -> Result<Option<ParamIndex>> {
        if !self.skip_if(|c| c == '[') {
            return Ok(None);
        }

        let index = self.index();
        if let Some(c) = self.consume_char_if(|c| c == '@' || c == '*') {
            if self.skip_if(|c| c == ']') {
                return Ok(Some(match c {
                    '@' => ParamIndex::At,
                    _ => ParamIndex::Asterisk,
                }));
            }
            self.rewind(index);
        }

        let mut depth = 0;
        let word = self.word(|c| match c {
            '[' => {
                depth += 1;
                false
            }
            ']' if depth > 0 => {
                depth -= 1;
                false
            }
            ']' => true,
            _ => false,
        })?;

        if !self.skip_if(|c| c == ']') {
            let cause = SyntaxError::BadSubscript.into();
            let location = self.location();
            return Err(Error { cause, location });
        }
        Ok(Some(ParamIndex::Value(word)))
    }

    /// Parses a parameter expansion that is enclosed in braces.
    ///
    /// The initial `$` must have been consumed before calling this function.
    /// This function checks if the next character is an opening brace. If so,
    /// the following characters are parsed as a parameter expansion up to and
    /// including the closing brace. Otherwise, no characters are consumed and
    /// the return value is `Ok(None)`.
    ///
    /// `start_index` is the position of the initial `$`.
    pub fn braced_param(&mut self, start_index: usize) -> Result<Option<BracedParam>> {
        if !self.skip_if(|c| c == '{') {
            return Ok(None);
        }

        let opening_location = self.location_range(start_index..self.index());

        let mut indirection = self.indirection_prefix().then_some(Indirection::Variable);
        let has_length_prefix = self.length_prefix()?;

        let param_start_index = self.index();

        let Some(c) = self.peek_char() else {
            let cause = SyntaxError::UnclosedParam { opening_location }.into();
            let location = self.location();
            return Err(Error { cause, location });
        };
        let param = if is_name_char(c) {
            self.consume_char();
            let mut id = c.to_string();
            while let Some(c) = self.consume_char_if(is_name_char) {
                id.push(c);
            }

            let Some(r#type) = type_of_id(&id) else {
                let cause = SyntaxError::InvalidParam.into();
                let location = self.location_range(param_start_index..self.index());
                return Err(Error { cause, location });
            };
            Param { id, r#type }
        } else if let Some(special) = SpecialParam::from_char(c) {
            self.consume_char();
            Param {
                id: c.to_string(),
                r#type: special.into(),
            }
        } else {
            let cause = SyntaxError::EmptyParam.into();
            let location = self.location();
            return Err(Error { cause, location });
        };

        // `${!prefix*}` and `${!prefix@}` list variable names.
        if indirection == Some(Indirection::Variable) {
            let index = self.index();
            if let Some(c) = self.consume_char_if(|c| c == '*' || c == '@') {
                if self.peek_char() == Some('}') {
                    let mode = match c {
                        '*' => PrefixMatchMode::Asterisk,
                        _ => PrefixMatchMode::At,
                    };
                    indirection = Some(Indirection::NamePrefix(mode));
                } else {
                    self.rewind(index);
                }
            }
        }

        let index = self.subscript()?;

        let suffix_location = self.location();
        let suffix = self.suffix_modifier()?;

        if !self.skip_if(|c| c == '}') {
            let cause = SyntaxError::UnclosedParam { opening_location }.into();
            let location = self.location();
            return Err(Error { cause, location });
        }

        let modifier = match (has_length_prefix, suffix) {
            (true, Modifier::None) => Modifier::Length,
            (true, _) => {
                let cause = SyntaxError::MultipleModifier.into();
                let location = suffix_location;
                return Err(Error { cause, location });
            }
            (false, suffix) => suffix,
        };

        Ok(Some(BracedParam {
            param,
            index,
            indirection,
            modifier,
            location: self.location_range(start_index..self.index()),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::error::ErrorCause;
    use crate::parser::lex::Lexer;
    use crate::parser::lex::WordContext;
    use assert_matches::assert_matches;

    fn braced_param_of(source: &str) -> Result<Option<BracedParam>> {
        let mut lexer = Lexer::with_code(source);
        assert_eq!(lexer.peek_char(), Some('$'));
        lexer.consume_char();
        let mut lexer = WordLexer {
            lexer: &mut lexer,
            context: WordContext::Word,
        };
        lexer.braced_param(0)
    }

    #[test]
    fn lexer_braced_param_none_without_brace() {
        let mut lexer = Lexer::with_code("$foo");
        lexer.consume_char_if(|c| c == '$').unwrap();
        let mut lexer = WordLexer {
            lexer: &mut lexer,
            context: WordContext::Word,
        };
        assert_eq!(lexer.braced_param(0).unwrap(), None);
        assert_eq!(lexer.peek_char(), Some('f'));
    }

    #[test]
    fn lexer_braced_param_minimum() {
        let param = braced_param_of("${@};").unwrap().unwrap();
        assert_eq!(param.param, Param::from(SpecialParam::At));
        assert_eq!(param.index, None);
        assert_eq!(param.indirection, None);
        assert_eq!(param.modifier, Modifier::None);
        assert_eq!(param.location.range, 0..4);
    }

    #[test]
    fn lexer_braced_param_name() {
        let param = braced_param_of("${foo_123}<").unwrap().unwrap();
        assert_eq!(param.param, Param::variable("foo_123"));
        assert_eq!(param.modifier, Modifier::None);
        assert_eq!(param.location.range, 0..10);
    }

    #[test]
    fn lexer_braced_param_positional() {
        let param = braced_param_of("${12}").unwrap().unwrap();
        assert_eq!(param.param.id, "12");
        assert_eq!(param.param.r#type, ParamType::Positional(12));
    }

    #[test]
    fn lexer_braced_param_length() {
        let param = braced_param_of("${#foo}").unwrap().unwrap();
        assert_eq!(param.param, Param::variable("foo"));
        assert_eq!(param.modifier, Modifier::Length);
    }

    #[test]
    fn lexer_braced_param_hash_alone() {
        let param = braced_param_of("${#}").unwrap().unwrap();
        assert_eq!(param.param, Param::from(SpecialParam::Number));
        assert_eq!(param.modifier, Modifier::None);
    }

    #[test]
    fn lexer_braced_param_hash_with_modifier() {
        let param = braced_param_of("${#:-x}").unwrap().unwrap();
        assert_eq!(param.param, Param::from(SpecialParam::Number));
        assert_matches!(param.modifier, Modifier::Switch(_));
    }

    #[test]
    fn lexer_braced_param_length_of_special() {
        let param = braced_param_of("${#-}").unwrap().unwrap();
        assert_eq!(param.param, Param::from(SpecialParam::Hyphen));
        assert_eq!(param.modifier, Modifier::Length);
    }

    #[test]
    fn lexer_braced_param_indirection() {
        let param = braced_param_of("${!foo}").unwrap().unwrap();
        assert_eq!(param.param, Param::variable("foo"));
        assert_eq!(param.indirection, Some(Indirection::Variable));
    }

    #[test]
    fn lexer_braced_param_bang_alone_is_special() {
        let param = braced_param_of("${!}").unwrap().unwrap();
        assert_eq!(param.param, Param::from(SpecialParam::Exclamation));
        assert_eq!(param.indirection, None);
    }

    #[test]
    fn lexer_braced_param_name_prefix_listing() {
        let param = braced_param_of("${!pre*}").unwrap().unwrap();
        assert_eq!(param.param, Param::variable("pre"));
        assert_eq!(
            param.indirection,
            Some(Indirection::NamePrefix(PrefixMatchMode::Asterisk))
        );

        let param = braced_param_of("${!pre@}").unwrap().unwrap();
        assert_eq!(
            param.indirection,
            Some(Indirection::NamePrefix(PrefixMatchMode::At))
        );
    }

    #[test]
    fn lexer_braced_param_subscript() {
        let param = braced_param_of("${a[1]}").unwrap().unwrap();
        assert_eq!(param.param, Param::variable("a"));
        assert_matches!(param.index, Some(ParamIndex::Value(word)) => {
            assert_eq!(word.to_string(), "1");
        });

        let param = braced_param_of("${a[@]}").unwrap().unwrap();
        assert_eq!(param.index, Some(ParamIndex::At));

        let param = braced_param_of("${#a[@]}").unwrap().unwrap();
        assert_eq!(param.index, Some(ParamIndex::At));
        assert_eq!(param.modifier, Modifier::Length);
    }

    #[test]
    fn lexer_braced_param_subscript_with_quotes() {
        let param = braced_param_of(r#"${a["k v"]}"#).unwrap().unwrap();
        assert_matches!(param.index, Some(ParamIndex::Value(word)) => {
            assert_eq!(word.to_string(), r#""k v""#);
        });
    }

    #[test]
    fn lexer_braced_param_empty_param() {
        let e = braced_param_of("${}").unwrap_err();
        assert_eq!(e.cause, ErrorCause::Syntax(SyntaxError::EmptyParam));
    }

    #[test]
    fn lexer_braced_param_unclosed() {
        let e = braced_param_of("${foo").unwrap_err();
        assert_matches!(e.cause, ErrorCause::Syntax(SyntaxError::UnclosedParam { opening_location }) => {
            assert_eq!(opening_location.range, 0..2);
        });
    }

    #[test]
    fn lexer_braced_param_multiple_modifier() {
        let e = braced_param_of("${#foo-bar}").unwrap_err();
        assert_eq!(e.cause, ErrorCause::Syntax(SyntaxError::MultipleModifier));
    }
}
