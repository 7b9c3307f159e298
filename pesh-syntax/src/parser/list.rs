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

//! Syntax parser for lists and and-or lists

use super::core::Parser;
use super::core::Result;
use super::error::Error;
use super::error::SyntaxError;
use super::lex::Keyword;
use super::lex::Operator::{And, AndAnd, BarBar, Newline, Semicolon};
use super::lex::TokenId::{EndOfInput, Operator, Token};
use crate::syntax::AndOr;
use crate::syntax::AndOrList;
use crate::syntax::Item;
use crate::syntax::List;

impl Parser<'_> {
    /// Parses an and-or list.
    ///
    /// If there is no valid and-or list at the current position, this
    /// function returns `Ok(None)`.
    pub fn and_or_list(&mut self) -> Result<Option<AndOrList>> {
        let Some(first) = self.pipeline()? else {
            return Ok(None);
        };

        let mut rest = Vec::new();
        loop {
            let and_or = match self.peek_token()?.id {
                Operator(AndAnd) => AndOr::AndThen,
                Operator(BarBar) => AndOr::OrElse,
                _ => break,
            };
            self.take_token()?;

            while self.newline_and_here_doc_contents()? {}

            let Some(pipeline) = self.pipeline()? else {
                let location = self.peek_token()?.word.location.clone();
                return Err(Error {
                    cause: SyntaxError::MissingPipeline(and_or).into(),
                    location,
                });
            };
            rest.push((and_or, pipeline));
        }

        Ok(Some(AndOrList { first, rest }))
    }

    /// Constructs an error for a token that cannot start a command.
    pub(super) fn invalid_command_token_error(&mut self) -> Error {
        use Keyword::*;
        let token = match self.peek_token() {
            Ok(token) => token,
            Err(error) => return error,
        };
        let cause = match token.id {
            Operator(super::lex::Operator::CloseParen) => SyntaxError::UnopenedSubshell,
            Operator(
                super::lex::Operator::SemicolonSemicolon
                | super::lex::Operator::SemicolonAnd
                | super::lex::Operator::SemicolonSemicolonAnd,
            ) => SyntaxError::UnopenedCase,
            Token(Some(CloseBrace)) => SyntaxError::UnopenedGrouping,
            Token(Some(Then | Else | Elif | Fi)) => SyntaxError::UnopenedIf,
            Token(Some(Do)) => SyntaxError::UnopenedLoop,
            Token(Some(Done)) => SyntaxError::UnopenedDoClause,
            Token(Some(Esac)) => SyntaxError::UnopenedCase,
            Token(Some(In)) => SyntaxError::InAsCommandName,
            _ => SyntaxError::InvalidCommandToken,
        };
        Error {
            cause: cause.into(),
            location: token.word.location.clone(),
        }
    }

    /// Parses an optional compound list.
    ///
    /// A compound list is a sequence of and-or lists separated by `;`, `&`,
    /// and newlines, as found in the body of a compound command. Parsing
    /// stops (without an error) at any token that cannot start an and-or
    /// list, such as a clause delimiter keyword or a closing parenthesis.
    pub fn maybe_compound_list(&mut self) -> Result<List> {
        let mut items = Vec::new();
        loop {
            while self.newline_and_here_doc_contents()? {}

            let Some(and_or) = self.and_or_list()? else {
                break;
            };

            let mut done = false;
            let async_flag = match self.peek_token()?.id {
                Operator(Semicolon) => {
                    self.take_token()?;
                    None
                }
                Operator(And) => Some(self.take_token()?.word.location),
                Operator(Newline) => None,
                _ => {
                    done = true;
                    None
                }
            };
            items.push(Item { and_or, async_flag });
            if done {
                break;
            }
        }
        Ok(List(items))
    }

    /// Parses one logical line of commands, including the contents of any
    /// here-documents started on the line.
    ///
    /// Returns `Ok(None)` when the end of input is reached without any
    /// command. A blank line yields an empty list.
    pub fn command_line(&mut self) -> Result<Option<List>> {
        let mut items = Vec::new();
        loop {
            if let Some(and_or) = self.and_or_list()? {
                match self.peek_token()?.id {
                    Operator(Semicolon) => {
                        self.take_token()?;
                        items.push(Item {
                            and_or,
                            async_flag: None,
                        });
                    }
                    Operator(And) => {
                        let location = self.take_token()?.word.location;
                        items.push(Item {
                            and_or,
                            async_flag: Some(location),
                        });
                    }
                    Operator(Newline) => {
                        items.push(Item {
                            and_or,
                            async_flag: None,
                        });
                        self.take_token()?;
                        self.here_doc_contents()?;
                        return Ok(Some(List(items)));
                    }
                    EndOfInput => {
                        items.push(Item {
                            and_or,
                            async_flag: None,
                        });
                        self.ensure_no_unread_here_doc()?;
                        return Ok(Some(List(items)));
                    }
                    _ => {
                        let location = self.peek_token()?.word.location.clone();
                        return Err(Error {
                            cause: SyntaxError::MissingSeparator.into(),
                            location,
                        });
                    }
                }
            } else {
                return match self.peek_token()?.id {
                    Operator(Newline) => {
                        self.take_token()?;
                        self.here_doc_contents()?;
                        Ok(Some(List(items)))
                    }
                    EndOfInput => {
                        self.ensure_no_unread_here_doc()?;
                        if items.is_empty() {
                            Ok(None)
                        } else {
                            Ok(Some(List(items)))
                        }
                    }
                    _ => Err(self.invalid_command_token_error()),
                };
            }
        }
    }

    /// Parses a whole program up to the end of input.
    ///
    /// All here-documents are guaranteed to have their contents filled in
    /// the returned AST.
    pub fn program(&mut self) -> Result<List> {
        let mut items = Vec::new();
        while let Some(List(mut line)) = self.command_line()? {
            items.append(&mut line);
        }
        let list = List(items);
        super::fill::ensure_here_docs_filled(&list)?;
        Ok(list)
    }

    /// Parses a whole program, collecting errors instead of stopping at the
    /// first one.
    ///
    /// After an error, the parser skips to the next `;`, `&`, or newline
    /// token and resumes. The returned list contains the commands that
    /// parsed successfully; the error vector contains one diagnostic per
    /// abandoned command. If the parser was not configured with
    /// [`ErrorRecovery::Collect`](super::ErrorRecovery::Collect), the first
    /// error is returned alone with whatever parsed before it.
    pub fn program_collecting(&mut self) -> (List, Vec<Error>) {
        let mut items = Vec::new();
        let mut diagnostics = Vec::new();
        loop {
            match self.command_line() {
                Ok(Some(List(mut line))) => items.append(&mut line),
                Ok(None) => break,
                Err(error) => {
                    diagnostics.push(error);
                    if self.error_recovery() != super::ErrorRecovery::Collect {
                        break;
                    }
                    self.recover();
                }
            }
        }
        (List(items), diagnostics)
    }
}
