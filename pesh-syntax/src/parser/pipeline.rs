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

//! Syntax parser for pipelines

use super::core::Parser;
use super::core::Result;
use super::error::Error;
use super::error::SyntaxError;
use super::lex::Keyword::{Bang, Time};
use super::lex::Operator::{Bar, BarAnd};
use super::lex::TokenId::{Operator, Token};
use crate::source::Location;
use crate::syntax::Command;
use crate::syntax::Fd;
use crate::syntax::Pipeline;
use crate::syntax::Redir;
use crate::syntax::RedirBody;
use crate::syntax::RedirOp;
use crate::syntax::TextUnit::Literal;
use crate::syntax::Word;
use crate::syntax::WordUnit::Unquoted;
use std::rc::Rc;

/// Appends a `2>&1` duplication to the command.
///
/// The `|&` operator is shorthand for redirecting the standard error to the
/// pipe as well; the parser desugars it into an explicit redirection on the
/// left-hand command.
fn append_stderr_dup(command: &mut Command, location: Location) {
    let operand = Word {
        units: vec![Unquoted(Literal('1'))],
        location,
    };
    let redir = Redir {
        fd: Some(Fd::STDERR),
        body: RedirBody::Normal {
            operator: RedirOp::FdOut,
            operand,
        },
    };
    match command {
        Command::Simple(simple) => simple.redirs.push(redir),
        Command::Compound(compound) => compound.redirs.push(redir),
        Command::Function(function) => Rc::make_mut(&mut function.body).redirs.push(redir),
    }
}

impl Parser<'_> {
    /// Parses a pipeline.
    ///
    /// If there is no valid pipeline at the current position, this function
    /// returns `Ok(None)`.
    pub fn pipeline(&mut self) -> Result<Option<Pipeline>> {
        // Parse the `time` and `!` reserved words
        let timed = if self.peek_token()?.id == Token(Some(Time)) {
            self.take_token()?;
            true
        } else {
            false
        };

        let (negation, prefix_location) = if self.peek_token()?.id == Token(Some(Bang)) {
            let location = self.take_token()?.word.location;
            (true, Some(location))
        } else {
            (false, None)
        };

        // Parse the first command
        let first = match self.command()? {
            Some(first) => first,
            None => {
                if negation {
                    let next = self.peek_token()?;
                    let cause = if next.id == Token(Some(Bang)) {
                        SyntaxError::DoubleNegation.into()
                    } else {
                        SyntaxError::MissingCommandAfterBang.into()
                    };
                    let location = prefix_location.unwrap();
                    return Err(Error { cause, location });
                }
                if timed {
                    let location = self.peek_token()?.word.location.clone();
                    return Err(Error {
                        cause: SyntaxError::MissingCommandAfterTime.into(),
                        location,
                    });
                }
                return Ok(None);
            }
        };

        // Parse `|` and `|&`
        let mut commands = vec![first];
        loop {
            let join_stderr = match self.peek_token()?.id {
                Operator(Bar) => false,
                Operator(BarAnd) => true,
                _ => break,
            };
            let bar_location = self.take_token()?.word.location;

            if join_stderr {
                append_stderr_dup(commands.last_mut().unwrap(), bar_location.clone());
            }

            while self.newline_and_here_doc_contents()? {}

            match self.command()? {
                Some(next) => commands.push(next),
                None => {
                    let next = self.peek_token()?;
                    return if next.id == Token(Some(Bang)) {
                        Err(Error {
                            cause: SyntaxError::BangAfterBar.into(),
                            location: next.word.location.clone(),
                        })
                    } else {
                        Err(Error {
                            cause: SyntaxError::MissingCommandAfterBar.into(),
                            location: bar_location,
                        })
                    };
                }
            }
        }

        let commands = commands.into_iter().map(Rc::new).collect();
        Ok(Some(Pipeline {
            commands,
            negation,
            timed,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::lex::Lexer;
    use crate::syntax::CompoundCommand;
    use assert_matches::assert_matches;

    fn pipeline_of(source: &str) -> Result<Option<Pipeline>> {
        let mut lexer = Lexer::with_code(source);
        let mut parser = Parser::new(&mut lexer);
        parser.pipeline()
    }

    #[test]
    fn parser_pipeline_eof() {
        assert_eq!(pipeline_of("").unwrap(), None);
    }

    #[test]
    fn parser_pipeline_single_command() {
        let pipeline = pipeline_of("echo ok").unwrap().unwrap();
        assert_eq!(pipeline.commands.len(), 1);
        assert!(!pipeline.negation);
        assert!(!pipeline.timed);
    }

    #[test]
    fn parser_pipeline_multiple_commands() {
        let pipeline = pipeline_of("seq 3 | tac | wc -l").unwrap().unwrap();
        assert_eq!(pipeline.commands.len(), 3);
        assert_eq!(pipeline.to_string(), "seq 3 | tac | wc -l");
    }

    #[test]
    fn parser_pipeline_negation() {
        let pipeline = pipeline_of("! false").unwrap().unwrap();
        assert!(pipeline.negation);
        assert_eq!(pipeline.to_string(), "! false");
    }

    #[test]
    fn parser_pipeline_timed() {
        let pipeline = pipeline_of("time sleep 1 | cat").unwrap().unwrap();
        assert!(pipeline.timed);
        assert_eq!(pipeline.commands.len(), 2);

        let pipeline = pipeline_of("time ! false").unwrap().unwrap();
        assert!(pipeline.timed);
        assert!(pipeline.negation);
    }

    #[test]
    fn parser_pipeline_newline_after_bar() {
        let pipeline = pipeline_of("echo a |\n\ncat").unwrap().unwrap();
        assert_eq!(pipeline.commands.len(), 2);
    }

    #[test]
    fn parser_pipeline_bar_and_desugars_to_redirection() {
        let pipeline = pipeline_of("make |& tee log").unwrap().unwrap();
        assert_eq!(pipeline.commands.len(), 2);
        assert_matches!(&*pipeline.commands[0], Command::Simple(simple) => {
            assert_eq!(simple.redirs.len(), 1);
            assert_eq!(simple.redirs[0].fd, Some(Fd::STDERR));
            assert_matches!(&simple.redirs[0].body, RedirBody::Normal { operator, operand } => {
                assert_eq!(*operator, RedirOp::FdOut);
                assert_eq!(operand.to_string(), "1");
            });
        });
    }

    #[test]
    fn parser_pipeline_compound_command_stage() {
        let pipeline = pipeline_of("seq 3 | while read n; do echo $n; done")
            .unwrap()
            .unwrap();
        assert_eq!(pipeline.commands.len(), 2);
        assert_matches!(&*pipeline.commands[1], Command::Compound(compound) => {
            assert_matches!(&compound.command, CompoundCommand::While { .. });
        });
    }

    #[test]
    fn parser_pipeline_double_negation() {
        let e = pipeline_of("! ! true").unwrap_err();
        assert_eq!(e.cause, SyntaxError::DoubleNegation.into());
    }

    #[test]
    fn parser_pipeline_bang_after_bar() {
        let e = pipeline_of("true | ! false").unwrap_err();
        assert_eq!(e.cause, SyntaxError::BangAfterBar.into());
    }

    #[test]
    fn parser_pipeline_missing_command_after_bar() {
        let e = pipeline_of("true | ;").unwrap_err();
        assert_eq!(e.cause, SyntaxError::MissingCommandAfterBar.into());
    }
}
