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

//! Part of the lexer that parses braced parameter expansion modifiers

use super::core::WordLexer;
use crate::parser::core::Result;
use crate::parser::error::Error;
use crate::parser::error::SyntaxError;
use crate::syntax::CaseConv;
use crate::syntax::CaseDirection;
use crate::syntax::CaseScope;
use crate::syntax::Modifier;
use crate::syntax::Slice;
use crate::syntax::Subst;
use crate::syntax::Switch;
use crate::syntax::SwitchCondition;
use crate::syntax::SwitchType;
use crate::syntax::TrimLength;
use crate::syntax::TrimSide;
use crate::syntax::Word;

fn switch_type_of(c: char) -> Option<SwitchType> {
    match c {
        '+' => Some(SwitchType::Alter),
        '-' => Some(SwitchType::Default),
        '=' => Some(SwitchType::Assign),
        '?' => Some(SwitchType::Error),
        _ => None,
    }
}

fn is_arith_escapable(c: char) -> bool {
    matches!(c, '$' | '`' | '\\')
}

impl WordLexer<'_> {
    /// Parses the word of a switch or trim modifier, delimited by the
    /// closing brace.
    fn modifier_word(&mut self) -> Result<Word> {
        self.word(|c| c == '}')
    }

    /// Parses a switch modifier after the optional colon.
    fn switch(&mut self, condition: SwitchCondition, r#type: SwitchType) -> Result<Switch> {
        let word = self.modifier_word()?;
        Ok(Switch {
            r#type,
            condition,
            word,
        })
    }

    /// Parses a substring modifier after the colon.
    fn slice(&mut self) -> Result<Slice> {
        let offset = self.text_with_parentheses(|c| c == ':' || c == '}', is_arith_escapable)?;
        let length = if self.skip_if(|c| c == ':') {
            Some(self.text_with_parentheses(|c| c == '}', is_arith_escapable)?)
        } else {
            None
        };
        Ok(Slice { offset, length })
    }

    /// Parses a pattern substitution modifier after the first slash.
    fn subst(&mut self) -> Result<Subst> {
        let all = self.skip_if(|c| c == '/');
        let pattern = self.word(|c| c == '/' || c == '}')?;
        let replacement = if self.skip_if(|c| c == '/') {
            Some(self.modifier_word()?)
        } else {
            None
        };
        Ok(Subst {
            pattern,
            replacement,
            all,
        })
    }

    /// Parses a modifier that comes after the parameter name (and subscript)
    /// in a braced parameter expansion.
    ///
    /// Returns `Modifier::None` if the next character closes the expansion.
    pub fn suffix_modifier(&mut self) -> Result<Modifier> {
        match self.peek_char() {
            Some('}') | None => Ok(Modifier::None),

            Some(':') => {
                self.consume_char();
                match self.peek_char().and_then(switch_type_of) {
                    Some(r#type) => {
                        self.consume_char();
                        let switch = self.switch(SwitchCondition::UnsetOrEmpty, r#type)?;
                        Ok(Modifier::Switch(switch))
                    }
                    None => Ok(Modifier::Slice(self.slice()?)),
                }
            }

            Some(c) => {
                if let Some(r#type) = switch_type_of(c) {
                    self.consume_char();
                    let switch = self.switch(SwitchCondition::Unset, r#type)?;
                    return Ok(Modifier::Switch(switch));
                }
                match c {
                    '#' | '%' => {
                        self.consume_char();
                        let side = if c == '#' {
                            TrimSide::Prefix
                        } else {
                            TrimSide::Suffix
                        };
                        let length = if self.skip_if(|next| next == c) {
                            TrimLength::Longest
                        } else {
                            TrimLength::Shortest
                        };
                        let pattern = self.modifier_word()?;
                        Ok(Modifier::Trim(crate::syntax::Trim {
                            side,
                            length,
                            pattern,
                        }))
                    }
                    '/' => {
                        self.consume_char();
                        Ok(Modifier::Subst(self.subst()?))
                    }
                    '^' | ',' => {
                        self.consume_char();
                        let direction = if c == '^' {
                            CaseDirection::Upper
                        } else {
                            CaseDirection::Lower
                        };
                        let scope = if self.skip_if(|next| next == c) {
                            CaseScope::All
                        } else {
                            CaseScope::First
                        };
                        Ok(Modifier::CaseConv(CaseConv { scope, direction }))
                    }
                    _ => {
                        let cause = SyntaxError::InvalidModifier.into();
                        let location = self.location();
                        Err(Error { cause, location })
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lex::Lexer;
    use crate::parser::lex::WordContext;
    use crate::syntax::BracedParam;
    use crate::syntax::Param;
    use assert_matches::assert_matches;

    fn braced_param_of(source: &str) -> BracedParam {
        let mut lexer = Lexer::with_code(source);
        lexer.consume_char_if(|c| c == '$').unwrap();
        let mut lexer = WordLexer {
            lexer: &mut lexer,
            context: WordContext::Word,
        };
        lexer.braced_param(0).unwrap().unwrap()
    }

    #[test]
    fn switch_with_colon() {
        let param = braced_param_of("${foo:-bar}");
        assert_matches!(param.modifier, Modifier::Switch(switch) => {
            assert_eq!(switch.r#type, SwitchType::Default);
            assert_eq!(switch.condition, SwitchCondition::UnsetOrEmpty);
            assert_eq!(switch.word.to_string(), "bar");
        });
    }

    #[test]
    fn switch_without_colon() {
        let param = braced_param_of("${foo=bar baz}");
        assert_matches!(param.modifier, Modifier::Switch(switch) => {
            assert_eq!(switch.r#type, SwitchType::Assign);
            assert_eq!(switch.condition, SwitchCondition::Unset);
            assert_eq!(switch.word.to_string(), "bar baz");
        });
    }

    #[test]
    fn switch_word_may_contain_expansions() {
        let param = braced_param_of("${foo:+${bar}}");
        assert_matches!(param.modifier, Modifier::Switch(switch) => {
            assert_eq!(switch.r#type, SwitchType::Alter);
            assert_eq!(switch.word.to_string(), "${bar}");
        });
    }

    #[test]
    fn trim_modifiers() {
        let param = braced_param_of("${foo#*/}");
        assert_matches!(param.modifier, Modifier::Trim(trim) => {
            assert_eq!(trim.side, TrimSide::Prefix);
            assert_eq!(trim.length, TrimLength::Shortest);
            assert_eq!(trim.pattern.to_string(), "*/");
        });

        let param = braced_param_of("${foo%%.*}");
        assert_matches!(param.modifier, Modifier::Trim(trim) => {
            assert_eq!(trim.side, TrimSide::Suffix);
            assert_eq!(trim.length, TrimLength::Longest);
            assert_eq!(trim.pattern.to_string(), ".*");
        });
    }

    #[test]
    fn subst_modifiers() {
        let param = braced_param_of("${foo/a/b}");
        assert_matches!(param.modifier, Modifier::Subst(subst) => {
            assert!(!subst.all);
            assert_eq!(subst.pattern.to_string(), "a");
            assert_eq!(subst.replacement.unwrap().to_string(), "b");
        });

        let param = braced_param_of("${foo//a}");
        assert_matches!(param.modifier, Modifier::Subst(subst) => {
            assert!(subst.all);
            assert_eq!(subst.pattern.to_string(), "a");
            assert_eq!(subst.replacement, None);
        });
    }

    #[test]
    fn case_conversion_modifiers() {
        let param = braced_param_of("${foo^^}");
        assert_eq!(
            param.modifier,
            Modifier::CaseConv(CaseConv {
                scope: CaseScope::All,
                direction: CaseDirection::Upper,
            })
        );

        let param = braced_param_of("${foo,}");
        assert_eq!(
            param.modifier,
            Modifier::CaseConv(CaseConv {
                scope: CaseScope::First,
                direction: CaseDirection::Lower,
            })
        );
    }

    #[test]
    fn slice_modifiers() {
        let param = braced_param_of("${foo:1:2}");
        assert_matches!(param.modifier, Modifier::Slice(slice) => {
            assert_eq!(slice.offset.to_string(), "1");
            assert_eq!(slice.length.unwrap().to_string(), "2");
        });

        let param = braced_param_of("${foo: -1}");
        assert_matches!(param.modifier, Modifier::Slice(slice) => {
            assert_eq!(slice.offset.to_string(), " -1");
            assert_eq!(slice.length, None);
        });

        let param = braced_param_of("${foo:(-1):1}");
        assert_matches!(param.modifier, Modifier::Slice(slice) => {
            assert_eq!(slice.offset.to_string(), "(-1)");
            assert_eq!(slice.length.unwrap().to_string(), "1");
        });
    }

    #[test]
    fn invalid_modifier() {
        let mut lexer = Lexer::with_code("${foo;}");
        lexer.consume_char_if(|c| c == '$').unwrap();
        let mut lexer = WordLexer {
            lexer: &mut lexer,
            context: WordContext::Word,
        };
        let e = lexer.braced_param(0).unwrap_err();
        assert_eq!(
            e.cause,
            crate::parser::error::ErrorCause::Syntax(SyntaxError::InvalidModifier)
        );
    }

    #[test]
    fn subst_on_array_element() {
        let param = braced_param_of("${a[0]/x/y}");
        assert_eq!(param.param, Param::variable("a"));
        assert_matches!(param.modifier, Modifier::Subst(_));
    }
}
