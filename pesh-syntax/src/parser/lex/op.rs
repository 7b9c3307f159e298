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

//! Part of the lexer that parses operators

use super::core::Lexer;
use super::core::Token;
use super::core::TokenId;
use crate::parser::core::Result;
use crate::syntax::CaseContinuation;
use crate::syntax::RedirOp;
use std::fmt;

/// Operator token identifier
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Operator {
    /// Newline
    Newline,
    /// `&`
    And,
    /// `&&`
    AndAnd,
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,
    /// `;`
    Semicolon,
    /// `;;`
    SemicolonSemicolon,
    /// `;&`
    SemicolonAnd,
    /// `;;&`
    SemicolonSemicolonAnd,
    /// `<`
    Less,
    /// `<&`
    LessAnd,
    /// `<<`
    LessLess,
    /// `<<-`
    LessLessDash,
    /// `<<<`
    LessLessLess,
    /// `<>`
    LessGreater,
    /// `>`
    Greater,
    /// `>&`
    GreaterAnd,
    /// `>>`
    GreaterGreater,
    /// `>|`
    GreaterBar,
    /// `|`
    Bar,
    /// `||`
    BarBar,
    /// `|&`
    BarAnd,
}

impl Operator {
    /// Returns the literal string representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        use Operator::*;
        match self {
            Newline => "\n",
            And => "&",
            AndAnd => "&&",
            OpenParen => "(",
            CloseParen => ")",
            Semicolon => ";",
            SemicolonSemicolon => ";;",
            SemicolonAnd => ";&",
            SemicolonSemicolonAnd => ";;&",
            Less => "<",
            LessAnd => "<&",
            LessLess => "<<",
            LessLessDash => "<<-",
            LessLessLess => "<<<",
            LessGreater => "<>",
            Greater => ">",
            GreaterAnd => ">&",
            GreaterGreater => ">>",
            GreaterBar => ">|",
            Bar => "|",
            BarBar => "||",
            BarAnd => "|&",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error value indicating that an operator token does not denote a
/// redirection or case continuation
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TryFromOperatorError;

impl TryFrom<Operator> for RedirOp {
    type Error = TryFromOperatorError;
    fn try_from(op: Operator) -> std::result::Result<RedirOp, TryFromOperatorError> {
        use Operator::*;
        match op {
            Less => Ok(RedirOp::FileIn),
            LessGreater => Ok(RedirOp::FileInOut),
            Greater => Ok(RedirOp::FileOut),
            GreaterGreater => Ok(RedirOp::FileAppend),
            GreaterBar => Ok(RedirOp::FileClobber),
            LessAnd => Ok(RedirOp::FdIn),
            GreaterAnd => Ok(RedirOp::FdOut),
            LessLessLess => Ok(RedirOp::HereString),
            _ => Err(TryFromOperatorError),
        }
    }
}

impl TryFrom<Operator> for CaseContinuation {
    type Error = TryFromOperatorError;
    fn try_from(op: Operator) -> std::result::Result<CaseContinuation, TryFromOperatorError> {
        use Operator::*;
        match op {
            SemicolonSemicolon => Ok(CaseContinuation::Break),
            SemicolonAnd => Ok(CaseContinuation::FallThrough),
            SemicolonSemicolonAnd => Ok(CaseContinuation::Continue),
            _ => Err(TryFromOperatorError),
        }
    }
}

/// Trie data structure that defines the set of operator tokens
///
/// This struct represents a node of the trie. A node is a sorted array of
/// [`Edge`]s.
#[derive(Copy, Clone, Debug)]
pub struct Trie(&'static [Edge]);

/// Edge of a [`Trie`]
#[derive(Copy, Clone, Debug)]
pub struct Edge {
    /// Character value of this edge
    pub key: char,
    /// Operator token that is delimited after taking this edge if there are
    /// no longer matches
    pub value: Option<Operator>,
    /// Sub-trie containing values for keys that have the common prefix
    pub next: Trie,
}

impl Trie {
    /// Tests if this trie is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Finds an edge for the given key.
    pub fn edge(&self, key: char) -> Option<&Edge> {
        self.0
            .binary_search_by_key(&key, |edge| edge.key)
            .ok()
            .map(|i| &self.0[i])
    }
}

/// Trie containing all the operators
pub const OPERATORS: Trie = Trie(&[
    Edge {
        key: '\n',
        value: Some(Operator::Newline),
        next: NONE,
    },
    Edge {
        key: '&',
        value: Some(Operator::And),
        next: AND,
    },
    Edge {
        key: '(',
        value: Some(Operator::OpenParen),
        next: NONE,
    },
    Edge {
        key: ')',
        value: Some(Operator::CloseParen),
        next: NONE,
    },
    Edge {
        key: ';',
        value: Some(Operator::Semicolon),
        next: SEMICOLON,
    },
    Edge {
        key: '<',
        value: Some(Operator::Less),
        next: LESS,
    },
    Edge {
        key: '>',
        value: Some(Operator::Greater),
        next: GREATER,
    },
    Edge {
        key: '|',
        value: Some(Operator::Bar),
        next: BAR,
    },
]);

/// Trie of the operators that start with `&`
const AND: Trie = Trie(&[Edge {
    key: '&',
    value: Some(Operator::AndAnd),
    next: NONE,
}]);

/// Trie of the operators that start with `;`
const SEMICOLON: Trie = Trie(&[
    Edge {
        key: '&',
        value: Some(Operator::SemicolonAnd),
        next: NONE,
    },
    Edge {
        key: ';',
        value: Some(Operator::SemicolonSemicolon),
        next: SEMICOLON_SEMICOLON,
    },
]);

/// Trie of the operators that start with `;;`
const SEMICOLON_SEMICOLON: Trie = Trie(&[Edge {
    key: '&',
    value: Some(Operator::SemicolonSemicolonAnd),
    next: NONE,
}]);

/// Trie of the operators that start with `<`
const LESS: Trie = Trie(&[
    Edge {
        key: '&',
        value: Some(Operator::LessAnd),
        next: NONE,
    },
    Edge {
        key: '<',
        value: Some(Operator::LessLess),
        next: LESS_LESS,
    },
    Edge {
        key: '>',
        value: Some(Operator::LessGreater),
        next: NONE,
    },
]);

/// Trie of the operators that start with `<<`
const LESS_LESS: Trie = Trie(&[
    Edge {
        key: '-',
        value: Some(Operator::LessLessDash),
        next: NONE,
    },
    Edge {
        key: '<',
        value: Some(Operator::LessLessLess),
        next: NONE,
    },
]);

/// Trie of the operators that start with `>`
const GREATER: Trie = Trie(&[
    Edge {
        key: '&',
        value: Some(Operator::GreaterAnd),
        next: NONE,
    },
    Edge {
        key: '>',
        value: Some(Operator::GreaterGreater),
        next: NONE,
    },
    Edge {
        key: '|',
        value: Some(Operator::GreaterBar),
        next: NONE,
    },
]);

/// Trie of the operators that start with `|`
const BAR: Trie = Trie(&[
    Edge {
        key: '&',
        value: Some(Operator::BarAnd),
        next: NONE,
    },
    Edge {
        key: '|',
        value: Some(Operator::BarBar),
        next: NONE,
    },
]);

/// Trie containing nothing
const NONE: Trie = Trie(&[]);

/// Tests whether the given character is the first character of an operator.
pub fn is_operator_char(c: char) -> bool {
    OPERATORS.edge(c).is_some()
}

impl Lexer {
    /// Parses an operator token, using the given trie and greedy longest
    /// match.
    ///
    /// This function must be called when [`is_operator_char`] returns true
    /// for the next character; it panics on a position where no operator
    /// starts.
    pub fn operator(&mut self) -> Result<Token> {
        let start_index = self.index();
        let mut trie = OPERATORS;
        let mut last_match = None;

        loop {
            let Some(edge) = self.peek_char().and_then(|c| trie.edge(c)) else {
                break;
            };
            self.consume_char();
            if let Some(operator) = edge.value {
                last_match = Some((operator, self.index()));
            }
            trie = edge.next;
        }

        let (operator, end_index) =
            last_match.expect("Lexer::operator called at a non-operator position");
        self.rewind(end_index);

        let units = operator
            .as_str()
            .chars()
            .map(|c| crate::syntax::WordUnit::Unquoted(crate::syntax::TextUnit::Literal(c)))
            .collect();
        let location = self.location_range(start_index..end_index);
        let word = crate::syntax::Word { units, location };
        Ok(Token {
            word,
            id: TokenId::Operator(operator),
            index: start_index,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lex::TokenId;

    fn operator_of(source: &str) -> (Operator, usize) {
        let mut lexer = Lexer::with_code(source);
        let token = lexer.operator().unwrap();
        let TokenId::Operator(op) = token.id else {
            panic!("not an operator: {:?}", token.id);
        };
        (op, lexer.index())
    }

    #[test]
    fn lexer_operator_single_chars() {
        assert_eq!(operator_of(";"), (Operator::Semicolon, 1));
        assert_eq!(operator_of("("), (Operator::OpenParen, 1));
        assert_eq!(operator_of(")"), (Operator::CloseParen, 1));
        assert_eq!(operator_of("\n"), (Operator::Newline, 1));
    }

    #[test]
    fn lexer_operator_longest_match() {
        assert_eq!(operator_of("&&"), (Operator::AndAnd, 2));
        assert_eq!(operator_of("||x"), (Operator::BarBar, 2));
        assert_eq!(operator_of("|&"), (Operator::BarAnd, 2));
        assert_eq!(operator_of(";;&"), (Operator::SemicolonSemicolonAnd, 3));
        assert_eq!(operator_of(";&"), (Operator::SemicolonAnd, 2));
        assert_eq!(operator_of("<<-"), (Operator::LessLessDash, 3));
        assert_eq!(operator_of("<<<"), (Operator::LessLessLess, 3));
        assert_eq!(operator_of("<>"), (Operator::LessGreater, 2));
        assert_eq!(operator_of(">|"), (Operator::GreaterBar, 2));
    }

    #[test]
    fn lexer_operator_backtracks_on_partial_match() {
        // `;;` followed by a non-`&` character is just `;;`.
        assert_eq!(operator_of(";;x"), (Operator::SemicolonSemicolon, 2));
        // `<` followed by `<` followed by a word is `<<`.
        assert_eq!(operator_of("<<x"), (Operator::LessLess, 2));
    }

    #[test]
    fn lexer_operator_with_line_continuation() {
        assert_eq!(operator_of("&\\\n&"), (Operator::AndAnd, 4));
    }

    #[test]
    fn is_operator_char_classification() {
        assert!(is_operator_char('&'));
        assert!(is_operator_char('|'));
        assert!(is_operator_char(';'));
        assert!(is_operator_char('\n'));
        assert!(!is_operator_char('a'));
        assert!(!is_operator_char('-'));
        assert!(!is_operator_char('{'));
    }
}
