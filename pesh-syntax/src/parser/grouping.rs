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

//! Syntax parser for grouping and subshell commands

use super::core::Parser;
use super::core::Result;
use super::error::Error;
use super::error::SyntaxError;
use super::lex::Keyword::CloseBrace;
use super::lex::Operator::CloseParen;
use super::lex::TokenId::Operator;
use crate::syntax::CompoundCommand;

impl Parser<'_> {
    /// Parses a grouping (`{ ...; }`).
    ///
    /// The next token must be the `{` reserved word.
    pub fn brace_group(&mut self) -> Result<CompoundCommand> {
        let opening_location = self.take_token()?.word.location;

        let list = self.maybe_compound_list()?;
        if list.0.is_empty() {
            let location = self.peek_token()?.word.location.clone();
            return Err(Error {
                cause: SyntaxError::EmptyGrouping.into(),
                location,
            });
        }

        self.expect_keyword(CloseBrace, |_| SyntaxError::UnclosedGrouping {
            opening_location,
        })?;

        Ok(CompoundCommand::Grouping(list))
    }

    /// Parses a subshell (`(...)`) or, if the opening parenthesis is
    /// immediately followed by another, an arithmetic command (`((...))`).
    ///
    /// The next token must be the `(` operator.
    pub fn subshell(&mut self) -> Result<CompoundCommand> {
        let token = self.take_token()?;
        let start_index = token.index;
        let location = token.word.location;

        if self.options().arith_command {
            if let Some(arith) = self.arithmetic_command(start_index)? {
                return Ok(arith);
            }
        }

        let body = self.maybe_compound_list()?;
        if body.0.is_empty() {
            let location = self.peek_token()?.word.location.clone();
            return Err(Error {
                cause: SyntaxError::EmptySubshell.into(),
                location,
            });
        }

        let next = self.peek_token()?;
        if next.id != Operator(CloseParen) {
            let error_location = next.word.location.clone();
            return Err(Error {
                cause: SyntaxError::UnclosedSubshell {
                    opening_location: location,
                }
                .into(),
                location: error_location,
            });
        }
        self.take_token()?;

        Ok(CompoundCommand::Subshell { body, location })
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
    fn parser_brace_group() {
        let command = compound_command_of("{ echo a; echo b; }").unwrap().unwrap();
        assert_matches!(command, CompoundCommand::Grouping(list) => {
            assert_eq!(list.0.len(), 2);
        });
    }

    #[test]
    fn parser_brace_group_multi_line() {
        let command = compound_command_of("{\necho a\necho b\n}").unwrap().unwrap();
        assert_matches!(command, CompoundCommand::Grouping(list) => {
            assert_eq!(list.0.len(), 2);
        });
    }

    #[test]
    fn parser_brace_group_empty() {
        let e = compound_command_of("{ }").unwrap_err();
        assert_eq!(e.cause, SyntaxError::EmptyGrouping.into());
    }

    #[test]
    fn parser_brace_group_unclosed() {
        let e = compound_command_of("{ echo a;").unwrap_err();
        assert_matches!(e.cause, super::super::ErrorCause::Syntax(SyntaxError::UnclosedGrouping { opening_location }) => {
            assert_eq!(opening_location.range, 0..1);
        });
    }

    #[test]
    fn parser_subshell() {
        let command = compound_command_of("(echo a; echo b)").unwrap().unwrap();
        assert_matches!(command, CompoundCommand::Subshell { body, location } => {
            assert_eq!(body.0.len(), 2);
            assert_eq!(location.range, 0..1);
        });
    }

    #[test]
    fn parser_subshell_empty() {
        let e = compound_command_of("()").unwrap_err();
        assert_eq!(e.cause, SyntaxError::EmptySubshell.into());
    }

    #[test]
    fn parser_subshell_unclosed() {
        let e = compound_command_of("(echo a").unwrap_err();
        assert_matches!(
            e.cause,
            super::super::ErrorCause::Syntax(SyntaxError::UnclosedSubshell { .. })
        );
    }

    #[test]
    fn parser_subshell_starting_with_inner_subshell() {
        // `( (a) )` must not be mistaken for an arithmetic command.
        let command = compound_command_of("( (echo a) )").unwrap().unwrap();
        assert_matches!(command, CompoundCommand::Subshell { .. });
    }
}
