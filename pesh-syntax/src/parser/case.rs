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

//! Syntax parser for the case conditional construct

use super::core::Parser;
use super::core::Result;
use super::error::Error;
use super::error::SyntaxError;
use super::lex::Keyword::{Esac, In};
use super::lex::Operator::{Bar, CloseParen, OpenParen};
use super::lex::TokenId::{Operator, Token};
use crate::syntax::CaseContinuation;
use crate::syntax::CaseItem;
use crate::syntax::CompoundCommand;
use crate::syntax::Word;

impl Parser<'_> {
    /// Parses the pattern list of a case item.
    ///
    /// The optional opening `(` must have been consumed; `esac_allowed`
    /// tells whether an initial `esac` keyword should be treated as a
    /// pattern (it is after an explicit `(`) or as the end of the construct.
    fn case_patterns(&mut self) -> Result<Vec<Word>> {
        let mut patterns = Vec::new();
        loop {
            let token = self.peek_token()?;
            match token.id {
                Token(_) => patterns.push(self.take_token()?.word),
                _ => {
                    let location = token.word.location.clone();
                    let cause = if patterns.is_empty() {
                        SyntaxError::MissingPattern
                    } else {
                        SyntaxError::InvalidPattern
                    };
                    return Err(Error {
                        cause: cause.into(),
                        location,
                    });
                }
            }

            if self.peek_token()?.id != Operator(Bar) {
                break;
            }
            self.take_token()?;
        }
        Ok(patterns)
    }

    /// Parses one case item.
    ///
    /// The first token of the item must be the current token. Returns `None`
    /// when the current token is the closing `esac`.
    fn case_item(&mut self) -> Result<Option<CaseItem>> {
        let explicit_paren = if self.peek_token()?.id == Operator(OpenParen) {
            self.take_token()?;
            true
        } else {
            false
        };

        if !explicit_paren && self.peek_token()?.id == Token(Some(Esac)) {
            return Ok(None);
        }

        let patterns = self.case_patterns()?;

        let next = self.peek_token()?;
        if next.id != Operator(CloseParen) {
            let location = next.word.location.clone();
            return Err(Error {
                cause: SyntaxError::UnclosedPatternList.into(),
                location,
            });
        }
        self.take_token()?;

        let body = self.maybe_compound_list()?;

        let continuation = match self.peek_token()?.id {
            Operator(op) => match CaseContinuation::try_from(op) {
                Ok(continuation) => {
                    self.take_token()?;
                    continuation
                }
                Err(_) => CaseContinuation::default(),
            },
            _ => CaseContinuation::default(),
        };

        Ok(Some(CaseItem {
            patterns,
            body,
            continuation,
        }))
    }

    /// Parses a case conditional construct.
    ///
    /// The next token must be the `case` reserved word.
    pub fn case_command(&mut self) -> Result<CompoundCommand> {
        let opening_location = self.take_token()?.word.location;

        let token = self.peek_token()?;
        let subject = match token.id {
            Token(_) => {
                let mut word = self.take_token()?.word;
                word.parse_tilde_front();
                word
            }
            _ => {
                let location = token.word.location.clone();
                return Err(Error {
                    cause: SyntaxError::MissingCaseSubject.into(),
                    location,
                });
            }
        };

        while self.newline_and_here_doc_contents()? {}

        self.expect_keyword(In, |_| SyntaxError::MissingIn {
            opening_location: opening_location.clone(),
        })?;

        let mut items = Vec::new();
        loop {
            while self.newline_and_here_doc_contents()? {}

            if self.peek_token()?.id == Token(Some(Esac)) {
                self.take_token()?;
                break;
            }

            match self.case_item()? {
                Some(item) => items.push(item),
                None => {
                    self.take_token()?;
                    break;
                }
            }

            if self.peek_token()?.id == Token(Some(Esac)) {
                self.take_token()?;
                break;
            }

            // A case item not followed by `;;` (or a variant) must be the
            // last one.
            match self.peek_token()?.id {
                Operator(super::lex::Operator::Newline) => (),
                Token(_) | Operator(OpenParen) => continue,
                _ => {
                    let location = self.peek_token()?.word.location.clone();
                    return Err(Error {
                        cause: SyntaxError::UnclosedCase {
                            opening_location: opening_location.clone(),
                        }
                        .into(),
                        location,
                    });
                }
            }
        }

        Ok(CompoundCommand::Case { subject, items })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::lex::Lexer;
    use assert_matches::assert_matches;

    fn compound_command_of(source: &str) -> Result<Option<CompoundCommand>> {
        let mut lexer = Lexer::with_code(source);
        let mut parser = Parser::new(&mut lexer);
        parser.compound_command()
    }

    #[test]
    fn parser_case_empty() {
        let command = compound_command_of("case x in esac").unwrap().unwrap();
        assert_matches!(command, CompoundCommand::Case { subject, items } => {
            assert_eq!(subject.to_string(), "x");
            assert_eq!(items, []);
        });
    }

    #[test]
    fn parser_case_one_item() {
        let command = compound_command_of("case $x in foo) echo foo;; esac")
            .unwrap()
            .unwrap();
        assert_matches!(command, CompoundCommand::Case { items, .. } => {
            assert_eq!(items.len(), 1);
            assert_eq!(items[0].patterns.len(), 1);
            assert_eq!(items[0].patterns[0].to_string(), "foo");
            assert_eq!(items[0].body.to_string(), "echo foo");
            assert_eq!(items[0].continuation, CaseContinuation::Break);
        });
    }

    #[test]
    fn parser_case_multiple_patterns() {
        let command = compound_command_of("case x in (a | b*| c) :;; esac")
            .unwrap()
            .unwrap();
        assert_matches!(command, CompoundCommand::Case { items, .. } => {
            assert_eq!(items[0].patterns.len(), 3);
            assert_eq!(items[0].patterns[1].to_string(), "b*");
        });
    }

    #[test]
    fn parser_case_continuations() {
        let command = compound_command_of("case x in a) :;; b) :;& c) :;;& d) : ;; esac")
            .unwrap()
            .unwrap();
        assert_matches!(command, CompoundCommand::Case { items, .. } => {
            assert_eq!(items.len(), 4);
            assert_eq!(items[0].continuation, CaseContinuation::Break);
            assert_eq!(items[1].continuation, CaseContinuation::FallThrough);
            assert_eq!(items[2].continuation, CaseContinuation::Continue);
            assert_eq!(items[3].continuation, CaseContinuation::Break);
        });
    }

    #[test]
    fn parser_case_last_item_without_terminator() {
        let command = compound_command_of("case x in a) echo a\nesac")
            .unwrap()
            .unwrap();
        assert_matches!(command, CompoundCommand::Case { items, .. } => {
            assert_eq!(items.len(), 1);
        });
    }

    #[test]
    fn parser_case_multi_line() {
        let command = compound_command_of("case x in\na)\necho a\n;;\nb)\necho b\n;;\nesac")
            .unwrap()
            .unwrap();
        assert_matches!(command, CompoundCommand::Case { items, .. } => {
            assert_eq!(items.len(), 2);
        });
    }

    #[test]
    fn parser_case_esac_as_pattern_after_paren() {
        let command = compound_command_of("case x in (esac) :;; esac")
            .unwrap()
            .unwrap();
        assert_matches!(command, CompoundCommand::Case { items, .. } => {
            assert_eq!(items[0].patterns[0].to_string(), "esac");
        });
    }

    #[test]
    fn parser_case_missing_subject() {
        let e = compound_command_of("case; esac").unwrap_err();
        assert_eq!(e.cause, SyntaxError::MissingCaseSubject.into());
    }

    #[test]
    fn parser_case_missing_in() {
        let e = compound_command_of("case x y) :;; esac").unwrap_err();
        assert_matches!(
            e.cause,
            super::super::ErrorCause::Syntax(SyntaxError::MissingIn { .. })
        );
    }

    #[test]
    fn parser_case_unclosed_pattern_list() {
        let e = compound_command_of("case x in a b) :;; esac").unwrap_err();
        assert_eq!(e.cause, SyntaxError::UnclosedPatternList.into());
    }

    #[test]
    fn parser_case_unclosed() {
        let e = compound_command_of("case x in a) :;;").unwrap_err();
        // The end of input looks like a missing `esac`.
        assert_matches!(
            e.cause,
            super::super::ErrorCause::Syntax(SyntaxError::UnclosedCase { .. })
        );
    }
}
