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

//! Implementations of [`FromStr`] for AST types
//!
//! The implementations parse the whole input string as the given syntactic
//! element. Input that is not entirely consumed is a `RedundantToken` error.
//! Locations in the results refer to a [`Code`](crate::source::Code) of
//! [unknown origin](crate::source::Source::Unknown).

use super::core::Parser;
use super::core::Result;
use super::error::Error;
use super::error::SyntaxError;
use super::lex::Lexer;
use super::lex::TokenId::EndOfInput;
use super::lex::WordContext;
use super::lex::WordLexer;
use super::lex::is_token_delimiter_char;
use crate::syntax::AndOrList;
use crate::syntax::Command;
use crate::syntax::CompoundCommand;
use crate::syntax::FullCompoundCommand;
use crate::syntax::List;
use crate::syntax::Pipeline;
use crate::syntax::Redir;
use crate::syntax::SimpleCommand;
use crate::syntax::Text;
use crate::syntax::Word;
use std::str::FromStr;

/// Reports a `RedundantToken` error if the lexer has not reached the end of
/// input.
fn require_end_of_input(lexer: &mut Lexer) -> Result<()> {
    if lexer.peek_char().is_none() {
        Ok(())
    } else {
        let location = lexer.location();
        Err(Error {
            cause: SyntaxError::RedundantToken.into(),
            location,
        })
    }
}

/// Reports a `RedundantToken` error if the parser has a token other than the
/// end of input.
fn require_last_token(parser: &mut Parser) -> Result<()> {
    let token = parser.peek_token()?;
    if token.id == EndOfInput {
        Ok(())
    } else {
        let location = token.word.location.clone();
        Err(Error {
            cause: SyntaxError::RedundantToken.into(),
            location,
        })
    }
}

impl FromStr for Text {
    type Err = Error;
    fn from_str(s: &str) -> Result<Text> {
        let mut lexer = Lexer::with_code(s);
        let text = lexer.text(|_| false, |_| true)?;
        require_end_of_input(&mut lexer)?;
        Ok(text)
    }
}

impl FromStr for Word {
    type Err = Error;
    fn from_str(s: &str) -> Result<Word> {
        let mut lexer = Lexer::with_code(s);
        let mut word_lexer = WordLexer {
            lexer: &mut lexer,
            context: WordContext::Word,
        };
        let word = word_lexer.word(is_token_delimiter_char)?;
        require_end_of_input(&mut lexer)?;
        Ok(word)
    }
}

impl FromStr for Redir {
    type Err = Error;
    fn from_str(s: &str) -> Result<Redir> {
        let mut lexer = Lexer::with_code(s);
        let mut parser = Parser::new(&mut lexer);
        let redir = parser.redirection()?.ok_or_else(|| Error {
            cause: SyntaxError::MissingRedirOperand.into(),
            location: crate::source::Location::dummy(s),
        })?;
        // Here-doc contents are not available in this context.
        Ok(redir)
    }
}

impl FromStr for SimpleCommand {
    type Err = Error;
    fn from_str(s: &str) -> Result<SimpleCommand> {
        let mut lexer = Lexer::with_code(s);
        let mut parser = Parser::new(&mut lexer);
        let command = parser.simple_command()?.ok_or_else(|| Error {
            cause: SyntaxError::InvalidCommandToken.into(),
            location: crate::source::Location::dummy(s),
        })?;
        require_last_token(&mut parser)?;
        Ok(command)
    }
}

impl FromStr for CompoundCommand {
    type Err = Error;
    fn from_str(s: &str) -> Result<CompoundCommand> {
        let full: FullCompoundCommand = s.parse()?;
        Ok(full.command)
    }
}

impl FromStr for FullCompoundCommand {
    type Err = Error;
    fn from_str(s: &str) -> Result<FullCompoundCommand> {
        let mut lexer = Lexer::with_code(s);
        let mut parser = Parser::new(&mut lexer);
        let command = parser.full_compound_command()?.ok_or_else(|| Error {
            cause: SyntaxError::InvalidCommandToken.into(),
            location: crate::source::Location::dummy(s),
        })?;
        require_last_token(&mut parser)?;
        Ok(command)
    }
}

impl FromStr for Command {
    type Err = Error;
    fn from_str(s: &str) -> Result<Command> {
        let mut lexer = Lexer::with_code(s);
        let mut parser = Parser::new(&mut lexer);
        let command = parser.command()?.ok_or_else(|| Error {
            cause: SyntaxError::InvalidCommandToken.into(),
            location: crate::source::Location::dummy(s),
        })?;
        require_last_token(&mut parser)?;
        Ok(command)
    }
}

impl FromStr for Pipeline {
    type Err = Error;
    fn from_str(s: &str) -> Result<Pipeline> {
        let mut lexer = Lexer::with_code(s);
        let mut parser = Parser::new(&mut lexer);
        let pipeline = parser.pipeline()?.ok_or_else(|| Error {
            cause: SyntaxError::InvalidCommandToken.into(),
            location: crate::source::Location::dummy(s),
        })?;
        require_last_token(&mut parser)?;
        Ok(pipeline)
    }
}

impl FromStr for AndOrList {
    type Err = Error;
    fn from_str(s: &str) -> Result<AndOrList> {
        let mut lexer = Lexer::with_code(s);
        let mut parser = Parser::new(&mut lexer);
        let list = parser.and_or_list()?.ok_or_else(|| Error {
            cause: SyntaxError::InvalidCommandToken.into(),
            location: crate::source::Location::dummy(s),
        })?;
        require_last_token(&mut parser)?;
        Ok(list)
    }
}

impl FromStr for List {
    type Err = Error;
    fn from_str(s: &str) -> Result<List> {
        let mut lexer = Lexer::with_code(s);
        let mut parser = Parser::new(&mut lexer);
        parser.program()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn word_from_str() {
        let word: Word = r#"a"b"c$d"#.parse().unwrap();
        assert_eq!(word.to_string(), r#"a"b"c$d"#);
    }

    #[test]
    fn word_from_str_redundant_input() {
        let e = "a b".parse::<Word>().unwrap_err();
        assert_eq!(e.cause, SyntaxError::RedundantToken.into());
    }

    #[test]
    fn text_from_str() {
        let text: Text = "a$b".parse().unwrap();
        assert_eq!(text.0.len(), 2);
    }

    #[test]
    fn redir_from_str() {
        let redir: Redir = ">file".parse().unwrap();
        assert_eq!(redir.to_string(), ">file");
    }

    #[test]
    fn simple_command_from_str() {
        let command: SimpleCommand = "echo a b".parse().unwrap();
        assert_eq!(command.to_string(), "echo a b");
    }

    #[test]
    fn compound_command_from_str() {
        let command: CompoundCommand = "while x; do y; done".parse().unwrap();
        assert_eq!(command.to_string(), "while x; do y; done");
    }

    #[test]
    fn command_from_str() {
        let command: Command = "f() ( foo )".parse().unwrap();
        assert_matches!(command, Command::Function(_));
    }

    #[test]
    fn pipeline_from_str() {
        let pipeline: Pipeline = "! a | b".parse().unwrap();
        assert_eq!(pipeline.to_string(), "! a | b");
    }

    #[test]
    fn and_or_list_from_str() {
        let list: AndOrList = "a && b || c".parse().unwrap();
        assert_eq!(list.to_string(), "a && b || c");
    }

    #[test]
    fn list_from_str() {
        let list: List = "diff foo bar; echo $?".parse().unwrap();
        assert_eq!(list.to_string(), "diff foo bar; echo $?");
    }

    #[test]
    fn parse_is_stable() {
        let source = "if a; then b | while read x; do echo $x; done; fi >log 2>&1\n";
        let first: List = source.parse().unwrap();
        let second: List = source.parse().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn list_display_round_trip() {
        for source in [
            "echo ok",
            "a; b& c",
            "a && b || ! c",
            "if a; then b; else c; fi",
            "while read x; do echo \"n=$x\"; done <input",
            "for i in 1 2 3; do echo $i; done",
            "case $x in (a | b) echo ab;; (*) echo other;; esac",
            "f() { echo hi; } >log",
            "(a; b) | { c; }",
            "echo ${x:-default} $(date) `uname` $((1 + 2))",
        ] {
            let list: List = source.parse().unwrap();
            let displayed = list.to_string();
            let reparsed: List = displayed.parse().unwrap();
            assert_eq!(reparsed.to_string(), displayed, "source: {source}");
        }
    }
}
