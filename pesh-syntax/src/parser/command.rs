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

//! Syntax parser for commands

use super::core::Parser;
use super::core::Result;
use super::lex::Keyword;
use super::lex::Operator::OpenParen;
use super::lex::TokenId::{Operator, Token};
use crate::syntax::Command;

impl Parser<'_> {
    /// Parses a command.
    ///
    /// A command is either a simple command, a compound command (with
    /// optional redirections), or a function definition. If there is no
    /// valid command at the current position, this function returns
    /// `Ok(None)`.
    pub fn command(&mut self) -> Result<Option<Command>> {
        self.enter_nesting()?;
        let result = self.command_impl();
        self.leave_nesting();
        result
    }

    fn command_impl(&mut self) -> Result<Option<Command>> {
        use Keyword::*;
        match self.peek_token()?.id {
            Operator(OpenParen) => Ok(self.full_compound_command()?.map(Command::Compound)),
            Token(Some(keyword)) => match keyword {
                OpenBrace | If | While | Until | For | Case | Select => {
                    Ok(self.full_compound_command()?.map(Command::Compound))
                }
                OpenBracketBracket if self.options().extended_test => {
                    Ok(self.full_compound_command()?.map(Command::Compound))
                }
                Function => self
                    .function_definition_with_keyword()
                    .map(|f| Some(Command::Function(f))),
                _ => Ok(None),
            },
            Token(None) => self.simple_command_or_function(),
            _ => Ok(None),
        }
    }

    /// Parses a simple command, turning it into a function definition if the
    /// command is a lone word followed by `()`.
    fn simple_command_or_function(&mut self) -> Result<Option<Command>> {
        let Some(mut simple) = self.simple_command()? else {
            return Ok(None);
        };

        if simple.assigns.is_empty()
            && simple.redirs.is_empty()
            && simple.words.len() == 1
            && self.peek_token()?.id == Operator(OpenParen)
        {
            let name = simple.words.pop().unwrap();
            let function = self.function_definition_body(name, false)?;
            return Ok(Some(Command::Function(function)));
        }

        Ok(Some(Command::Simple(simple)))
    }
}
