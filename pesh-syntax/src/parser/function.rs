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

//! Syntax parser for function definitions

use super::core::Parser;
use super::core::Result;
use super::error::Error;
use super::error::SyntaxError;
use super::lex::Operator::{CloseParen, Newline, OpenParen};
use super::lex::TokenId::{EndOfInput, Operator, Token};
use crate::syntax::FunctionDefinition;
use crate::syntax::Word;
use std::rc::Rc;

impl Parser<'_> {
    /// Parses the parentheses and body of a function definition.
    ///
    /// The function name word must have been parsed; the next token must be
    /// the `(` operator.
    pub(super) fn function_definition_body(
        &mut self,
        name: Word,
        has_keyword: bool,
    ) -> Result<FunctionDefinition> {
        let open = self.take_token()?;
        debug_assert_eq!(open.id, Operator(OpenParen));

        let next = self.peek_token()?;
        if next.id != Operator(CloseParen) {
            let location = next.word.location.clone();
            return Err(Error {
                cause: SyntaxError::UnmatchedParenthesis.into(),
                location,
            });
        }
        self.take_token()?;

        while self.newline_and_here_doc_contents()? {}

        match self.full_compound_command()? {
            Some(body) => Ok(FunctionDefinition {
                has_keyword,
                name,
                body: Rc::new(body),
            }),
            None => {
                let next = self.peek_token()?;
                let cause = match next.id {
                    EndOfInput | Operator(Newline) => SyntaxError::MissingFunctionBody,
                    _ => SyntaxError::InvalidFunctionBody,
                };
                let location = next.word.location.clone();
                Err(Error {
                    cause: cause.into(),
                    location,
                })
            }
        }
    }

    /// Parses a function definition that starts with the `function` reserved
    /// word.
    ///
    /// In this form, the parentheses after the function name are optional.
    pub(super) fn function_definition_with_keyword(&mut self) -> Result<FunctionDefinition> {
        let keyword_location = self.take_token()?.word.location;

        let next = self.peek_token()?;
        let name = match next.id {
            Token(_) => self.take_token()?.word,
            _ => {
                return Err(Error {
                    cause: SyntaxError::MissingFunctionName.into(),
                    location: keyword_location,
                });
            }
        };

        if self.peek_token()?.id == Operator(OpenParen) {
            return self.function_definition_body(name, true);
        }

        while self.newline_and_here_doc_contents()? {}

        match self.full_compound_command()? {
            Some(body) => Ok(FunctionDefinition {
                has_keyword: true,
                name,
                body: Rc::new(body),
            }),
            None => {
                let next = self.peek_token()?;
                let cause = match next.id {
                    EndOfInput | Operator(Newline) => SyntaxError::MissingFunctionBody,
                    _ => SyntaxError::InvalidFunctionBody,
                };
                let location = next.word.location.clone();
                Err(Error {
                    cause: cause.into(),
                    location,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lex::Lexer;
    use crate::syntax::Command;
    use crate::syntax::CompoundCommand;
    use assert_matches::assert_matches;

    fn command_of(source: &str) -> Result<Option<Command>> {
        let mut lexer = Lexer::with_code(source);
        let mut parser = Parser::new(&mut lexer);
        parser.command()
    }

    #[test]
    fn parser_function_definition_posix_form() {
        let command = command_of("greet() { echo hello; }").unwrap().unwrap();
        assert_matches!(command, Command::Function(function) => {
            assert!(!function.has_keyword);
            assert_eq!(function.name.to_string(), "greet");
            assert_matches!(&function.body.command, CompoundCommand::Grouping(_));
        });
    }

    #[test]
    fn parser_function_definition_keyword_form() {
        let command = command_of("function greet { echo hello; }").unwrap().unwrap();
        assert_matches!(command, Command::Function(function) => {
            assert!(function.has_keyword);
            assert_eq!(function.name.to_string(), "greet");
        });
    }

    #[test]
    fn parser_function_definition_keyword_form_with_parens() {
        let command = command_of("function greet() { echo hello; }")
            .unwrap()
            .unwrap();
        assert_matches!(command, Command::Function(function) => {
            assert!(function.has_keyword);
        });
    }

    #[test]
    fn parser_function_definition_body_on_next_line() {
        let command = command_of("f()\n{ echo hi; }").unwrap().unwrap();
        assert_matches!(command, Command::Function(_));
    }

    #[test]
    fn parser_function_definition_subshell_body() {
        let command = command_of("f() (echo hi)").unwrap().unwrap();
        assert_matches!(command, Command::Function(function) => {
            assert_matches!(&function.body.command, CompoundCommand::Subshell { .. });
        });
    }

    #[test]
    fn parser_function_definition_with_redirections() {
        let command = command_of("f() { echo hi; } >log").unwrap().unwrap();
        assert_matches!(command, Command::Function(function) => {
            assert_eq!(function.body.redirs.len(), 1);
        });
    }

    #[test]
    fn parser_function_definition_unmatched_parenthesis() {
        let e = command_of("f(x) { :; }").unwrap_err();
        assert_eq!(e.cause, SyntaxError::UnmatchedParenthesis.into());
    }

    #[test]
    fn parser_function_definition_missing_body() {
        let e = command_of("f()").unwrap_err();
        assert_eq!(e.cause, SyntaxError::MissingFunctionBody.into());
    }

    #[test]
    fn parser_function_definition_invalid_body() {
        let e = command_of("f() echo hi").unwrap_err();
        assert_eq!(e.cause, SyntaxError::InvalidFunctionBody.into());
    }

    #[test]
    fn parser_function_definition_missing_name() {
        let e = command_of("function ;").unwrap_err();
        assert_eq!(e.cause, SyntaxError::MissingFunctionName.into());
    }
}
