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

//! Syntax parser for compound commands

use super::core::Parser;
use super::core::Result;
use super::lex::Keyword;
use super::lex::Operator::OpenParen;
use super::lex::TokenId::{Operator, Token};
use crate::syntax::CompoundCommand;
use crate::syntax::FullCompoundCommand;

impl Parser<'_> {
    /// Parses a compound command.
    ///
    /// If the next token does not start a compound command, this function
    /// returns `Ok(None)`.
    pub fn compound_command(&mut self) -> Result<Option<CompoundCommand>> {
        use Keyword::*;
        let token_id = self.peek_token()?.id;
        match token_id {
            Operator(OpenParen) => self.subshell().map(Some),
            Token(Some(OpenBrace)) => self.brace_group().map(Some),
            Token(Some(If)) => self.if_command().map(Some),
            Token(Some(While)) => self.while_loop().map(Some),
            Token(Some(Until)) => self.until_loop().map(Some),
            Token(Some(For)) => self.for_loop().map(Some),
            Token(Some(Case)) => self.case_command().map(Some),
            Token(Some(Select)) => self.select_loop().map(Some),
            Token(Some(OpenBracketBracket)) if self.options().extended_test => {
                self.double_bracket().map(Some)
            }
            _ => Ok(None),
        }
    }

    /// Parses a compound command with optional following redirections.
    pub fn full_compound_command(&mut self) -> Result<Option<FullCompoundCommand>> {
        let Some(command) = self.compound_command()? else {
            return Ok(None);
        };
        let redirs = self.redirections()?;
        Ok(Some(FullCompoundCommand { command, redirs }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::lex::Lexer;
    use crate::syntax::RedirBody;
    use crate::syntax::RedirOp;
    use assert_matches::assert_matches;

    fn full_compound_command_of(source: &str) -> Result<Option<FullCompoundCommand>> {
        let mut lexer = Lexer::with_code(source);
        let mut parser = Parser::new(&mut lexer);
        parser.full_compound_command()
    }

    #[test]
    fn parser_full_compound_command_with_redirections() {
        let command = full_compound_command_of("{ echo hi; } >out 2>&1")
            .unwrap()
            .unwrap();
        assert_matches!(command.command, CompoundCommand::Grouping(_));
        assert_eq!(command.redirs.len(), 2);
        assert_matches!(&command.redirs[0].body, RedirBody::Normal { operator, .. } => {
            assert_eq!(*operator, RedirOp::FileOut);
        });
        assert_eq!(command.to_string(), "{ echo hi; } >out 2>&1");
    }

    #[test]
    fn parser_compound_command_none_for_simple_command() {
        assert_eq!(full_compound_command_of("echo").unwrap(), None);
    }

    #[test]
    fn parser_compound_command_dispatch() {
        for (source, is_match) in [
            ("(x)", true),
            ("{ x; }", true),
            ("if x; then y; fi", true),
            ("while x; do y; done", true),
            ("until x; do y; done", true),
            ("for i do :; done", true),
            ("case x in esac", true),
            ("select i in a; do :; done", true),
            ("[[ -n x ]]", true),
            ("((1 + 2))", true),
        ] {
            let result = full_compound_command_of(source).unwrap();
            assert_eq!(result.is_some(), is_match, "source: {source}");
        }
    }
}
