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

//! Syntax parser for while and until loops

use super::core::Parser;
use super::core::Result;
use super::error::Error;
use super::error::SyntaxError;
use super::lex::Keyword::{Do, Done};
use crate::syntax::CompoundCommand;
use crate::syntax::List;

impl Parser<'_> {
    /// Parses a do clause, i.e., `do ... done`.
    ///
    /// `missing_do` constructs the error reported when the `do` reserved
    /// word is not found; each loop construct has its own error for that.
    pub(super) fn do_clause<F>(&mut self, missing_do: F) -> Result<List>
    where
        F: FnOnce() -> SyntaxError,
    {
        let do_location = self.expect_keyword(Do, |_| missing_do())?.word.location;

        let body = self.maybe_compound_list()?;
        if body.0.is_empty() {
            let location = self.peek_token()?.word.location.clone();
            return Err(Error {
                cause: SyntaxError::EmptyDoClause.into(),
                location,
            });
        }

        self.expect_keyword(Done, |_| SyntaxError::UnclosedDoClause {
            opening_location: do_location.clone(),
        })?;

        Ok(body)
    }

    /// Parses a while loop.
    ///
    /// The next token must be the `while` reserved word.
    pub fn while_loop(&mut self) -> Result<CompoundCommand> {
        let opening_location = self.take_token()?.word.location;

        let condition = self.maybe_compound_list()?;
        if condition.0.is_empty() {
            let location = self.peek_token()?.word.location.clone();
            return Err(Error {
                cause: SyntaxError::EmptyWhileCondition.into(),
                location,
            });
        }

        let body = self.do_clause(|| SyntaxError::UnclosedWhileClause {
            opening_location: opening_location.clone(),
        })?;
        Ok(CompoundCommand::While { condition, body })
    }

    /// Parses an until loop.
    ///
    /// The next token must be the `until` reserved word.
    pub fn until_loop(&mut self) -> Result<CompoundCommand> {
        let opening_location = self.take_token()?.word.location;

        let condition = self.maybe_compound_list()?;
        if condition.0.is_empty() {
            let location = self.peek_token()?.word.location.clone();
            return Err(Error {
                cause: SyntaxError::EmptyUntilCondition.into(),
                location,
            });
        }

        let body = self.do_clause(|| SyntaxError::UnclosedUntilClause {
            opening_location: opening_location.clone(),
        })?;
        Ok(CompoundCommand::Until { condition, body })
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
    fn parser_while_loop() {
        let command = compound_command_of("while read x; do echo $x; done")
            .unwrap()
            .unwrap();
        assert_matches!(command, CompoundCommand::While { condition, body } => {
            assert_eq!(condition.to_string(), "read x");
            assert_eq!(body.to_string(), "echo $x");
        });
    }

    #[test]
    fn parser_until_loop() {
        let command = compound_command_of("until test -f stop; do sleep 1; done")
            .unwrap()
            .unwrap();
        assert_matches!(command, CompoundCommand::Until { condition, .. } => {
            assert_eq!(condition.to_string(), "test -f stop");
        });
    }

    #[test]
    fn parser_while_loop_empty_condition() {
        let e = compound_command_of("while do x; done").unwrap_err();
        assert_eq!(e.cause, SyntaxError::EmptyWhileCondition.into());
    }

    #[test]
    fn parser_while_loop_missing_do() {
        let e = compound_command_of("while x; done").unwrap_err();
        assert_matches!(
            e.cause,
            super::super::ErrorCause::Syntax(SyntaxError::UnclosedWhileClause { .. })
        );
    }

    #[test]
    fn parser_while_loop_empty_body() {
        let e = compound_command_of("while x; do done").unwrap_err();
        assert_eq!(e.cause, SyntaxError::EmptyDoClause.into());
    }

    #[test]
    fn parser_while_loop_unclosed_do() {
        let e = compound_command_of("while x; do y;").unwrap_err();
        assert_matches!(
            e.cause,
            super::super::ErrorCause::Syntax(SyntaxError::UnclosedDoClause { .. })
        );
    }
}
