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

//! Syntax parser for for and select loops

use super::core::Parser;
use super::core::Result;
use super::error::Error;
use super::error::SyntaxError;
use super::lex::Keyword::In;
use super::lex::Operator::{Newline, OpenParen, Semicolon};
use super::lex::TokenId::{Operator, Token};
use crate::source::Location;
use crate::syntax::CompoundCommand;
use crate::syntax::MaybeLiteral;
use crate::syntax::Word;

impl Parser<'_> {
    /// Parses the name of a for or select loop.
    fn loop_name(&mut self) -> Result<Word> {
        let token = self.peek_token()?;
        match token.id {
            Token(_) => {
                let word = self.take_token()?.word;
                match word.to_string_if_literal() {
                    Some(name)
                        if !name.is_empty()
                            && !name.starts_with(|c: char| c.is_ascii_digit())
                            && name.chars().all(super::lex::is_name_char) =>
                    {
                        Ok(word)
                    }
                    _ => Err(Error {
                        cause: SyntaxError::InvalidForName.into(),
                        location: word.location,
                    }),
                }
            }
            _ => Err(Error {
                cause: SyntaxError::MissingForName.into(),
                location: token.word.location.clone(),
            }),
        }
    }

    /// Parses the optional `in` clause of a for or select loop.
    ///
    /// Returns `None` when the loop has no `in` clause (and thus iterates
    /// over the positional parameters).
    fn loop_values(&mut self) -> Result<Option<Vec<Word>>> {
        // A newline may precede the `in` keyword or the `do` clause.
        while self.newline_and_here_doc_contents()? {}

        if self.peek_token()?.id != Token(Some(In)) {
            // An optional `;` may precede the `do` clause.
            if self.peek_token()?.id == Operator(Semicolon) {
                self.take_token()?;
                while self.newline_and_here_doc_contents()? {}
            }
            return Ok(None);
        }
        self.take_token()?;

        let mut values = Vec::new();
        loop {
            match self.peek_token()?.id {
                Token(_) => {
                    let mut word = self.take_token()?.word;
                    word.parse_tilde_front();
                    values.push(word);
                }
                Operator(Semicolon) => {
                    self.take_token()?;
                    break;
                }
                Operator(Newline) => {
                    self.take_token()?;
                    self.here_doc_contents()?;
                    break;
                }
                _ => {
                    let location = self.peek_token()?.word.location.clone();
                    return Err(Error {
                        cause: SyntaxError::InvalidForValue.into(),
                        location,
                    });
                }
            }
        }
        while self.newline_and_here_doc_contents()? {}
        Ok(Some(values))
    }

    /// Parses a for loop.
    ///
    /// The next token must be the `for` reserved word. Both the word-list
    /// form and the c-style `for ((...))` form are recognized.
    pub fn for_loop(&mut self) -> Result<CompoundCommand> {
        let opening_location = self.take_token()?.word.location;

        if self.options().arith_command && self.peek_token()?.id == Operator(OpenParen) {
            return self.arith_for_loop(opening_location);
        }

        let name = self.loop_name()?;
        let values = self.loop_values()?;
        let body = self.do_clause(|| SyntaxError::MissingForBody {
            opening_location: opening_location.clone(),
        })?;

        Ok(CompoundCommand::For { name, values, body })
    }

    /// Parses the remainder of a c-style for loop after the `for` keyword.
    fn arith_for_loop(&mut self, opening_location: Location) -> Result<CompoundCommand> {
        let token = self.take_token()?;
        let start_index = token.index;

        let lexer = self.lexer();
        if lexer.peek_char() != Some('(') {
            let location = lexer.location();
            return Err(Error {
                cause: SyntaxError::InvalidForName.into(),
                location,
            });
        }
        lexer.consume_char();

        let Some(content) = lexer.double_paren_content()? else {
            let location = lexer.location();
            return Err(Error {
                cause: SyntaxError::UnclosedArithFor {
                    opening_location: opening_location.clone(),
                }
                .into(),
                location,
            });
        };
        let head_location = lexer.location_range(start_index..lexer.index());

        let Some([init, condition, update]) = super::arith_cmd::split_sections(&content) else {
            return Err(Error {
                cause: SyntaxError::InvalidArithFor.into(),
                location: head_location,
            });
        };

        // An optional `;` and newlines may precede the `do` clause.
        if self.peek_token()?.id == Operator(Semicolon) {
            self.take_token()?;
        }
        while self.newline_and_here_doc_contents()? {}

        let body = self.do_clause(|| SyntaxError::MissingForBody {
            opening_location: opening_location.clone(),
        })?;

        Ok(CompoundCommand::ArithFor {
            init,
            condition,
            update,
            body,
            location: head_location,
        })
    }

    /// Parses a select loop.
    ///
    /// The next token must be the `select` reserved word.
    pub fn select_loop(&mut self) -> Result<CompoundCommand> {
        let opening_location = self.take_token()?.word.location;

        let name = self.loop_name()?;
        let values = self.loop_values()?;
        let body = self.do_clause(|| SyntaxError::MissingForBody {
            opening_location: opening_location.clone(),
        })?;

        Ok(CompoundCommand::Select { name, values, body })
    }
}
