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

//! Syntax parser for the extended test command (`[[ ... ]]`)
//!
//! Inside the double brackets, word tokens become operands and a small set
//! of operators becomes meaningful. The operator precedence is `!` before
//! `&&` before `||`, with parentheses grouping. The right-hand side of the
//! `=~` operator is read in a dedicated lexer mode where parentheses and
//! vertical bars are ordinary regular expression characters.

use super::core::Parser;
use super::core::Result;
use super::error::Error;
use super::error::SyntaxError;
use super::lex::Keyword::{Bang, CloseBracketBracket};
use super::lex::Operator::{AndAnd, BarBar, CloseParen, Greater, Less, OpenParen};
use super::lex::TokenId::{Operator, Token};
use super::lex::WordContext;
use super::lex::WordLexer;
use super::lex::is_blank;
use crate::syntax::BinaryTestOp;
use crate::syntax::CompoundCommand;
use crate::syntax::MaybeLiteral;
use crate::syntax::TestExpr;
use crate::syntax::UnaryTestOp;
use crate::syntax::Word;

impl Parser<'_> {
    /// Skips newline tokens between test expression elements.
    fn test_linebreak(&mut self) -> Result<()> {
        while self.newline_and_here_doc_contents()? {}
        Ok(())
    }

    /// Parses an operand word of a test expression.
    fn test_operand(&mut self) -> Result<Word> {
        self.test_linebreak()?;
        let token = self.peek_token()?;
        match token.id {
            Token(_) => Ok(self.take_token()?.word),
            _ => {
                let location = token.word.location.clone();
                Err(Error {
                    cause: SyntaxError::InvalidTestOperand.into(),
                    location,
                })
            }
        }
    }

    /// Parses the right-hand side of the `=~` operator.
    ///
    /// A regular expression may contain characters that would otherwise be
    /// operators, such as `(` and `|`, so it is read directly from the lexer
    /// up to the next blank.
    fn regex_operand(&mut self) -> Result<Word> {
        let lexer = self.lexer();
        lexer.skip_blanks_and_comment();
        let mut word_lexer = WordLexer {
            lexer,
            context: WordContext::Word,
        };
        let word = word_lexer.word(|c| is_blank(c) || c == '\n')?;
        if word.units.is_empty() {
            let location = word.location;
            return Err(Error {
                cause: SyntaxError::InvalidTestOperand.into(),
                location,
            });
        }
        Ok(word)
    }

    /// Parses a primary test expression: a parenthesized group, a unary
    /// operator application, a binary operator application, or a single
    /// word.
    fn test_primary(&mut self) -> Result<TestExpr> {
        self.test_linebreak()?;

        if self.peek_token()?.id == Operator(OpenParen) {
            self.take_token()?;
            let inner = self.test_or()?;
            self.test_linebreak()?;
            let next = self.peek_token()?;
            if next.id != Operator(CloseParen) {
                let location = next.word.location.clone();
                return Err(Error {
                    cause: SyntaxError::UnclosedParen {
                        opening_location: location.clone(),
                    }
                    .into(),
                    location,
                });
            }
            self.take_token()?;
            return Ok(TestExpr::Group(Box::new(inner)));
        }

        let lhs = self.test_operand()?;

        // Unary operator applied to the next word
        if let Some(op) = lhs
            .to_string_if_literal()
            .as_deref()
            .and_then(UnaryTestOp::from_str_opt)
        {
            if matches!(self.peek_token()?.id, Token(_)) {
                let operand = self.take_token()?.word;
                return Ok(TestExpr::Unary { op, operand });
            }
        }

        // Binary operator between two words
        let op = match self.peek_token()?.id {
            Operator(Less) => Some(BinaryTestOp::LessThan),
            Operator(Greater) => Some(BinaryTestOp::GreaterThan),
            Token(_) => self
                .peek_token()?
                .word
                .to_string_if_literal()
                .as_deref()
                .and_then(BinaryTestOp::from_str_opt),
            _ => None,
        };
        if let Some(op) = op {
            self.take_token()?;
            let rhs = if op == BinaryTestOp::Match {
                self.regex_operand()?
            } else {
                self.test_operand()?
            };
            return Ok(TestExpr::Binary { op, lhs, rhs });
        }

        Ok(TestExpr::Word(lhs))
    }

    /// Parses a test expression with `!` applied.
    fn test_not(&mut self) -> Result<TestExpr> {
        self.test_linebreak()?;
        if self.peek_token()?.id == Token(Some(Bang)) {
            self.take_token()?;
            let inner = self.test_not()?;
            return Ok(TestExpr::Not(Box::new(inner)));
        }
        self.test_primary()
    }

    /// Parses a conjunction of test expressions.
    fn test_and(&mut self) -> Result<TestExpr> {
        let mut result = self.test_not()?;
        loop {
            self.test_linebreak()?;
            if self.peek_token()?.id != Operator(AndAnd) {
                return Ok(result);
            }
            self.take_token()?;
            let rhs = self.test_not()?;
            result = TestExpr::And(Box::new(result), Box::new(rhs));
        }
    }

    /// Parses a disjunction of test expressions.
    fn test_or(&mut self) -> Result<TestExpr> {
        let mut result = self.test_and()?;
        loop {
            self.test_linebreak()?;
            if self.peek_token()?.id != Operator(BarBar) {
                return Ok(result);
            }
            self.take_token()?;
            let rhs = self.test_and()?;
            result = TestExpr::Or(Box::new(result), Box::new(rhs));
        }
    }

    /// Parses an extended test command.
    ///
    /// The next token must be the `[[` reserved word.
    pub fn double_bracket(&mut self) -> Result<CompoundCommand> {
        let opening_location = self.take_token()?.word.location;

        if self.peek_token()?.id == Token(Some(CloseBracketBracket)) {
            let location = self.take_token()?.word.location;
            return Err(Error {
                cause: SyntaxError::EmptyDoubleBracket.into(),
                location,
            });
        }

        let expr = self.test_or()?;

        self.test_linebreak()?;
        let next = self.peek_token()?;
        if next.id != Token(Some(CloseBracketBracket)) {
            let location = next.word.location.clone();
            return Err(Error {
                cause: SyntaxError::UnclosedDoubleBracket { opening_location }.into(),
                location,
            });
        }
        self.take_token()?;

        Ok(CompoundCommand::DoubleBracket(expr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::lex::Lexer;
    use assert_matches::assert_matches;

    fn test_expr_of(source: &str) -> Result<TestExpr> {
        let mut lexer = Lexer::with_code(source);
        let mut parser = Parser::new(&mut lexer);
        let command = parser.compound_command()?.unwrap();
        match command {
            CompoundCommand::DoubleBracket(expr) => Ok(expr),
            other => panic!("not a double bracket command: {other:?}"),
        }
    }

    #[test]
    fn parser_double_bracket_single_word() {
        let expr = test_expr_of("[[ $x ]]").unwrap();
        assert_matches!(expr, TestExpr::Word(word) => {
            assert_eq!(word.to_string(), "$x");
        });
    }

    #[test]
    fn parser_double_bracket_unary() {
        let expr = test_expr_of("[[ -f /etc/passwd ]]").unwrap();
        assert_matches!(expr, TestExpr::Unary { op, operand } => {
            assert_eq!(op, UnaryTestOp::IsRegular);
            assert_eq!(operand.to_string(), "/etc/passwd");
        });
    }

    #[test]
    fn parser_double_bracket_unary_op_as_lone_operand() {
        let expr = test_expr_of("[[ -f ]]").unwrap();
        assert_matches!(expr, TestExpr::Word(word) => {
            assert_eq!(word.to_string(), "-f");
        });
    }

    #[test]
    fn parser_double_bracket_binary() {
        let expr = test_expr_of("[[ $a == b* ]]").unwrap();
        assert_matches!(expr, TestExpr::Binary { op, lhs, rhs } => {
            assert_eq!(op, BinaryTestOp::Equal);
            assert_eq!(lhs.to_string(), "$a");
            assert_eq!(rhs.to_string(), "b*");
        });

        let expr = test_expr_of("[[ 1 -lt 2 ]]").unwrap();
        assert_matches!(expr, TestExpr::Binary { op, .. } => {
            assert_eq!(op, BinaryTestOp::ArithLessThan);
        });

        let expr = test_expr_of("[[ a < b ]]").unwrap();
        assert_matches!(expr, TestExpr::Binary { op, .. } => {
            assert_eq!(op, BinaryTestOp::LessThan);
        });
    }

    #[test]
    fn parser_double_bracket_regex_match() {
        let expr = test_expr_of("[[ $x =~ ^a(b|c)+$ ]]").unwrap();
        assert_matches!(expr, TestExpr::Binary { op, rhs, .. } => {
            assert_eq!(op, BinaryTestOp::Match);
            assert_eq!(rhs.to_string(), "^a(b|c)+$");
        });
    }

    #[test]
    fn parser_double_bracket_precedence() {
        // `!` binds tighter than `&&`, which binds tighter than `||`.
        let expr = test_expr_of("[[ a || ! b && c ]]").unwrap();
        assert_matches!(expr, TestExpr::Or(lhs, rhs) => {
            assert_matches!(*lhs, TestExpr::Word(_));
            assert_matches!(*rhs, TestExpr::And(lhs, rhs) => {
                assert_matches!(*lhs, TestExpr::Not(_));
                assert_matches!(*rhs, TestExpr::Word(_));
            });
        });
    }

    #[test]
    fn parser_double_bracket_grouping() {
        let expr = test_expr_of("[[ ( a || b ) && c ]]").unwrap();
        assert_matches!(expr, TestExpr::And(lhs, _) => {
            assert_matches!(*lhs, TestExpr::Group(inner) => {
                assert_matches!(*inner, TestExpr::Or(_, _));
            });
        });
    }

    #[test]
    fn parser_double_bracket_empty() {
        let e = test_expr_of("[[ ]]").unwrap_err();
        assert_eq!(e.cause, SyntaxError::EmptyDoubleBracket.into());
    }

    #[test]
    fn parser_double_bracket_unclosed() {
        let e = test_expr_of("[[ a == b").unwrap_err();
        assert_matches!(
            e.cause,
            super::super::ErrorCause::Syntax(SyntaxError::UnclosedDoubleBracket { .. })
        );
    }

    #[test]
    fn parser_double_bracket_keyword_needs_command_position() {
        // As an argument, `[[` is an ordinary word.
        let mut lexer = Lexer::with_code("echo [[ a ]]");
        let mut parser = Parser::new(&mut lexer);
        let command = parser.command().unwrap().unwrap();
        assert_matches!(command, crate::syntax::Command::Simple(simple) => {
            assert_eq!(simple.words.len(), 4);
        });
    }
}
