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

//! Syntax parser for the if conditional construct

use super::core::Parser;
use super::core::Result;
use super::error::Error;
use super::error::SyntaxError;
use super::lex::Keyword::{Elif, Else, Fi, Then};
use super::lex::TokenId::Token;
use crate::syntax::CompoundCommand;
use crate::syntax::ElifThen;
use crate::syntax::List;

impl Parser<'_> {
    /// Parses a command list and reports the given error if it is empty.
    fn nonempty_list<F>(&mut self, error: F) -> Result<List>
    where
        F: FnOnce() -> SyntaxError,
    {
        let list = self.maybe_compound_list()?;
        if list.0.is_empty() {
            let location = self.peek_token()?.word.location.clone();
            return Err(Error {
                cause: error().into(),
                location,
            });
        }
        Ok(list)
    }

    /// Parses an if conditional construct.
    ///
    /// The next token must be the `if` reserved word.
    pub fn if_command(&mut self) -> Result<CompoundCommand> {
        let if_location = self.take_token()?.word.location;

        let condition = self.nonempty_list(|| SyntaxError::EmptyIfCondition)?;
        self.expect_keyword(Then, |_| SyntaxError::IfMissingThen {
            if_location: if_location.clone(),
        })?;
        let body = self.nonempty_list(|| SyntaxError::EmptyIfBody)?;

        let mut elifs = Vec::new();
        loop {
            if self.peek_token()?.id != Token(Some(Elif)) {
                break;
            }
            let elif_location = self.take_token()?.word.location;

            let condition = self.nonempty_list(|| SyntaxError::EmptyElifCondition)?;
            self.expect_keyword(Then, |_| SyntaxError::ElifMissingThen {
                elif_location: elif_location.clone(),
            })?;
            let body = self.nonempty_list(|| SyntaxError::EmptyElifBody)?;
            elifs.push(ElifThen { condition, body });
        }

        let r#else = if self.peek_token()?.id == Token(Some(Else)) {
            self.take_token()?;
            Some(self.nonempty_list(|| SyntaxError::EmptyElse)?)
        } else {
            None
        };

        self.expect_keyword(Fi, |_| SyntaxError::UnclosedIf {
            opening_location: if_location.clone(),
        })?;

        Ok(CompoundCommand::If {
            condition,
            body,
            elifs,
            r#else,
        })
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
    fn parser_if_minimal() {
        let command = compound_command_of("if true; then echo ok; fi")
            .unwrap()
            .unwrap();
        assert_matches!(command, CompoundCommand::If { condition, body, elifs, r#else } => {
            assert_eq!(condition.to_string(), "true");
            assert_eq!(body.to_string(), "echo ok");
            assert_eq!(elifs, []);
            assert_eq!(r#else, None);
        });
    }

    #[test]
    fn parser_if_with_elifs_and_else() {
        let command = compound_command_of(
            "if a; then x; elif b; then y; elif c; then z; else w; fi",
        )
        .unwrap()
        .unwrap();
        assert_matches!(command, CompoundCommand::If { elifs, r#else, .. } => {
            assert_eq!(elifs.len(), 2);
            assert_eq!(elifs[0].condition.to_string(), "b");
            assert_eq!(elifs[1].body.to_string(), "z");
            assert_eq!(r#else.unwrap().to_string(), "w");
        });
    }

    #[test]
    fn parser_if_multi_line() {
        let command = compound_command_of("if a\nthen\nx\ny\nfi").unwrap().unwrap();
        assert_matches!(command, CompoundCommand::If { body, .. } => {
            assert_eq!(body.0.len(), 2);
        });
    }

    #[test]
    fn parser_if_missing_then() {
        let e = compound_command_of("if true; fi").unwrap_err();
        assert_matches!(
            e.cause,
            super::super::ErrorCause::Syntax(SyntaxError::IfMissingThen { if_location }) => {
                assert_eq!(if_location.range, 0..2);
            }
        );
    }

    #[test]
    fn parser_if_empty_condition() {
        let e = compound_command_of("if then x; fi").unwrap_err();
        assert_eq!(e.cause, SyntaxError::EmptyIfCondition.into());
    }

    #[test]
    fn parser_if_empty_body() {
        let e = compound_command_of("if a; then fi").unwrap_err();
        assert_eq!(e.cause, SyntaxError::EmptyIfBody.into());
    }

    #[test]
    fn parser_if_unclosed() {
        let e = compound_command_of("if a; then b; else c;").unwrap_err();
        assert_matches!(
            e.cause,
            super::super::ErrorCause::Syntax(SyntaxError::UnclosedIf { .. })
        );
    }
}
