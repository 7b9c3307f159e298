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

//! Syntax parser for simple commands

use super::core::Parser;
use super::core::Result;
use super::error::Error;
use super::error::SyntaxError;
use super::lex::Operator::{CloseParen, Newline, OpenParen};
use super::lex::TokenId::{Operator, Token};
use crate::syntax::Assign;
use crate::syntax::Scalar;
use crate::syntax::SimpleCommand;
use crate::syntax::Value::Array;
use crate::syntax::Word;

impl Parser<'_> {
    /// Parses the value of an array assignment.
    ///
    /// This function first consumes a `(` token, then any number of words
    /// separated by blanks and/or newlines, and finally a `)`. If the first
    /// token is not `(`, the result is `Ok(None)`. If the closing `)` is
    /// missing, the result is an `UnclosedArrayValue` error.
    pub fn array_values(&mut self) -> Result<Option<Vec<Word>>> {
        if self.peek_token()?.id != Operator(OpenParen) {
            return Ok(None);
        }

        let opening_location = self.take_token()?.word.location;
        let mut words = vec![];

        loop {
            let next = self.take_token()?;
            match next.id {
                Operator(Newline) => continue,
                Operator(CloseParen) => break,
                Token(_keyword) => {
                    let mut word = next.word;
                    word.parse_tilde_everywhere();
                    words.push(word);
                }
                _ => {
                    return Err(Error {
                        cause: SyntaxError::UnclosedArrayValue { opening_location }.into(),
                        location: next.word.location,
                    });
                }
            }
        }

        Ok(Some(words))
    }

    /// Parses a simple command.
    ///
    /// If there is no valid command at the current position, this function
    /// returns `Ok(None)`.
    pub fn simple_command(&mut self) -> Result<Option<SimpleCommand>> {
        let mut result = SimpleCommand::default();

        loop {
            // Parse redirection
            if let Some(redir) = self.redirection()? {
                result.redirs.push(redir);
                continue;
            }

            // Filter token type
            match self.peek_token()?.id {
                Token(Some(_keyword)) if result.is_empty() => break,
                Token(_) => (),
                _ => break,
            }

            let token = self.take_token()?;

            // Tell assignment from word
            if !result.words.is_empty() {
                let mut word = token.word;
                word.parse_tilde_front();
                result.words.push(word);
                continue;
            }
            let mut assign = match Assign::try_from(token.word) {
                Ok(assign) => assign,
                Err(mut word) => {
                    word.parse_tilde_front();
                    result.words.push(word);
                    continue;
                }
            };

            let value_is_empty = match &assign.value {
                Scalar(word) => word.units.is_empty(),
                Array(_) => false,
            };

            // Tell array assignment from scalar assignment
            if self.options().arrays && value_is_empty && !self.has_blank() {
                if let Some(words) = self.array_values()? {
                    assign.value = Array(words);
                }
            }

            if let Scalar(word) = &mut assign.value {
                word.parse_tilde_everywhere();
            }

            result.assigns.push(assign);
        }

        Ok(if result.is_empty() {
            None
        } else {
            Some(result)
        })
    }
}
