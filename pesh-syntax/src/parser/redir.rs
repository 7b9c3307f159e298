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

//! Syntax parser for redirections

use super::core::Parser;
use super::core::Result;
use super::error::Error;
use super::error::SyntaxError;
use super::lex::Operator::{LessLess, LessLessDash};
use super::lex::TokenId::{IoNumber, Operator, Token};
use crate::syntax::Fd;
use crate::syntax::HereDoc;
use crate::syntax::MaybeLiteral;
use crate::syntax::Redir;
use crate::syntax::RedirBody;
use crate::syntax::RedirOp;
use crate::syntax::Word;
use std::cell::OnceCell;
use std::rc::Rc;

impl Parser<'_> {
    /// Parses the operand word of a redirection operator.
    fn redir_operand(&mut self, operator_location: &crate::source::Location) -> Result<Word> {
        let token = self.peek_token()?;
        match token.id {
            Token(_) => {
                let mut word = self.take_token()?.word;
                word.parse_tilde_front();
                Ok(word)
            }
            _ => Err(Error {
                cause: SyntaxError::MissingRedirOperand.into(),
                location: operator_location.clone(),
            }),
        }
    }

    /// Parses a normal redirection body.
    fn normal_redir_body(&mut self, operator: RedirOp) -> Result<RedirBody> {
        let operator_location = self.take_token()?.word.location;
        let operand = self.redir_operand(&operator_location)?;
        Ok(RedirBody::Normal { operator, operand })
    }

    /// Parses the redirection body for a here-document operator.
    ///
    /// The returned here-document has no content yet; it is remembered in
    /// the parser and filled when the next newline token is consumed.
    fn here_doc_redir_body(&mut self, remove_tabs: bool) -> Result<RedirBody> {
        let operator_location = self.take_token()?.word.location;

        let token = self.peek_token()?;
        let delimiter = match token.id {
            Token(_) => self.take_token()?.word,
            _ => {
                return Err(Error {
                    cause: SyntaxError::MissingHereDocDelimiter.into(),
                    location: operator_location,
                });
            }
        };

        let here_doc = Rc::new(HereDoc {
            delimiter,
            remove_tabs,
            content: OnceCell::new(),
        });
        self.memorize_unread_here_doc(Rc::clone(&here_doc));
        Ok(RedirBody::HereDoc(here_doc))
    }

    /// Parses a redirection, if any.
    ///
    /// If the current token is not the beginning of a redirection, this
    /// function returns `Ok(None)`.
    pub fn redirection(&mut self) -> Result<Option<Redir>> {
        // Parse the optional I/O number
        let fd = if self.peek_token()?.id == IoNumber {
            let token = self.peek_token()?;
            let digits = token
                .word
                .to_string_if_literal()
                .expect("IO_NUMBER tokens are all literal");
            let Ok(number) = digits.parse() else {
                return Err(Error {
                    cause: SyntaxError::FdOutOfRange.into(),
                    location: token.word.location.clone(),
                });
            };
            self.take_token()?;
            Some(Fd(number))
        } else {
            None
        };

        // Parse the operator and what follows
        let body = match self.peek_token()?.id {
            Operator(op) => {
                if let Ok(operator) = RedirOp::try_from(op) {
                    self.normal_redir_body(operator)?
                } else {
                    match op {
                        LessLess => self.here_doc_redir_body(false)?,
                        LessLessDash => self.here_doc_redir_body(true)?,
                        _ => return self.missing_redir_after_fd(fd),
                    }
                }
            }
            _ => return self.missing_redir_after_fd(fd),
        };

        Ok(Some(Redir { fd, body }))
    }

    /// Reports the absence of a redirection operator after an I/O number.
    ///
    /// A lone I/O number cannot occur in a valid program because the lexer
    /// only produces one when a `<` or `>` follows; this path is reachable
    /// when that character begins a process substitution instead.
    fn missing_redir_after_fd(&mut self, fd: Option<Fd>) -> Result<Option<Redir>> {
        if fd.is_none() {
            return Ok(None);
        }
        let location = self.peek_token()?.word.location.clone();
        Err(Error {
            cause: SyntaxError::MissingRedirOperand.into(),
            location,
        })
    }

    /// Parses as many redirections as possible.
    pub fn redirections(&mut self) -> Result<Vec<Redir>> {
        let mut redirs = Vec::new();
        while let Some(redir) = self.redirection()? {
            redirs.push(redir);
        }
        Ok(redirs)
    }
}
