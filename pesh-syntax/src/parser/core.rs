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

//! Fundamentals for implementing the parser
//!
//! This module includes common types that are used as building blocks for
//! constructing the syntax parser.

use super::error::Error;
use super::error::SyntaxError;
use super::lex::Keyword;
use super::lex::Lexer;
use super::lex::Operator;
use super::lex::Options;
use super::lex::Token;
use super::lex::TokenId::*;
use super::lex::is_blank;
use crate::syntax::HereDoc;
use std::rc::Rc;

/// Entire result of parsing
pub type Result<T> = std::result::Result<T, Error>;

/// How the parser reacts to a syntax error
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ErrorRecovery {
    /// The first error aborts parsing.
    #[default]
    Stop,
    /// Errors are collected and parsing resumes at the next separator.
    Collect,
}

/// Set of parameters for constructing a [parser](Parser)
///
/// `Config` is a builder for constructing a parser. A [new](Self::new)
/// configuration starts with default settings. You can customize them by
/// calling methods that can be chained. Finally, you can create a parser by
/// providing the lexer to the [`input`](Self::input) method.
#[derive(Clone, Debug, Default)]
#[must_use = "Config must be used to create a parser"]
pub struct Config {
    /// Lexer and parser feature options
    options: Options,

    /// Reaction to syntax errors
    recovery: ErrorRecovery,
}

impl Config {
    /// Creates a new configuration with default settings.
    ///
    /// You can also call [`Parser::config`] to create a new configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the feature options.
    ///
    /// The options are applied to the lexer when the parser is created. The
    /// default options have all extensions enabled; use
    /// [`Options::posix`](super::lex::Options::posix) for the portable
    /// subset.
    #[inline]
    pub fn options(&mut self, options: Options) -> &mut Self {
        self.options = options;
        self
    }

    /// Sets the error recovery mode.
    ///
    /// The recovery mode is consulted by
    /// [`Parser::program_collecting`]; other parsing functions always stop
    /// at the first error.
    #[inline]
    pub fn recovery(&mut self, recovery: ErrorRecovery) -> &mut Self {
        self.recovery = recovery;
        self
    }

    /// Creates a parser with the given lexer.
    pub fn input<'a>(&self, lexer: &'a mut Lexer) -> Parser<'a> {
        lexer.set_options(self.options);
        Parser {
            lexer,
            recovery: self.recovery,
            token: None,
            unread_here_docs: Vec::new(),
        }
    }
}

/// The shell syntax parser
///
/// A parser manages a set of data used in syntax parsing. It keeps a
/// reference to a [lexer](Lexer) that provides tokens to parse, and some
/// parameters that can be set by a [configuration](Config).
///
/// # Parsing here-documents
///
/// Most intrinsic functions of `Parser` may return an AST containing
/// `HereDoc`s with empty content. The parser creates the `HereDoc` instance
/// when it finds a here-document operator, but it has not read its content at
/// that time. When consuming a newline token, the parser reads the contents
/// and fills them into the `HereDoc` instances.
///
/// Unless you are interested in parsing a specific syntactic construct that
/// is only part of source code, you will want to use a function that returns
/// a complete result filled with proper here-document contents, such as
/// [`command_line`](Self::command_line) or [`program`](Self::program).
#[derive(Debug)]
#[must_use = "Parser must be used to parse syntax"]
pub struct Parser<'a> {
    /// Lexer that provides tokens
    lexer: &'a mut Lexer,

    /// Reaction to syntax errors
    recovery: ErrorRecovery,

    /// Token to parse next
    ///
    /// This value is an option of a result. It is `None` when the next token
    /// is not yet parsed by the lexer. It is `Some(Err(_))` if the lexer has
    /// failed.
    token: Option<Result<Token>>,

    /// Here-documents without contents
    ///
    /// The here-document is added to this list when the parser finds a
    /// here-document operator. After consuming the next newline token, the
    /// parser reads and fills the contents, then clears this list.
    unread_here_docs: Vec<Rc<HereDoc>>,
}

impl<'a> Parser<'a> {
    /// Creates a new configuration with default settings.
    ///
    /// This is a synonym for [`Config::new`]. Customize the settings by
    /// calling methods of the returned configuration and then create a
    /// parser by calling its [`input`](Config::input) method.
    #[inline(always)]
    pub fn config() -> Config {
        Config::new()
    }

    /// Creates a new parser based on the given lexer.
    ///
    /// The parser uses the lexer to read tokens. All other settings are
    /// default. To customize the settings, use the [`config`](Self::config)
    /// function.
    pub fn new(lexer: &'a mut Lexer) -> Parser<'a> {
        Self::config().input(lexer)
    }

    /// Returns the error recovery mode.
    pub(super) fn error_recovery(&self) -> ErrorRecovery {
        self.recovery
    }

    /// Gives direct access to the lexer.
    ///
    /// This function must not be called while a token is pending; grammar
    /// rules that read characters rather than tokens (here-document contents,
    /// regular expression operands, arithmetic command heads) use it.
    pub(super) fn lexer(&mut self) -> &mut Lexer {
        assert!(self.token.is_none(), "There should be no pending token");
        self.lexer
    }

    /// Returns the feature options in effect.
    pub fn options(&self) -> &Options {
        self.lexer.options()
    }

    /// Enters one level of command nesting.
    ///
    /// The depth counter is shared with the lexer, so deeply nested
    /// expansions and deeply nested commands count against the same
    /// configured maximum.
    pub(super) fn enter_nesting(&mut self) -> Result<()> {
        self.lexer.enter_nesting()
    }

    /// Leaves one level of command nesting.
    pub(super) fn leave_nesting(&mut self) {
        self.lexer.leave_nesting()
    }

    /// Reads a next token if the current token is `None`.
    fn require_token(&mut self) {
        if self.token.is_none() {
            self.lexer.skip_blanks_and_comment();
            self.token = Some(self.lexer.token());
        }
    }

    /// Returns a reference to the current token.
    ///
    /// If the current token is not yet read from the underlying lexer, it is
    /// read.
    pub fn peek_token(&mut self) -> Result<&Token> {
        self.require_token();
        self.token.as_ref().unwrap().as_ref().map_err(|e| e.clone())
    }

    /// Consumes the current token.
    ///
    /// If the current token is not yet read from the underlying lexer, it is
    /// read.
    pub fn take_token(&mut self) -> Result<Token> {
        self.require_token();
        self.token.take().unwrap()
    }

    /// Tests if there is a blank before the next token.
    ///
    /// This function can be called to tell whether the previous and next
    /// tokens are separated by a blank or they are adjacent.
    ///
    /// This function must be called after the previous token has been
    /// [taken](Self::take_token) and before the next token is
    /// [peeked](Self::peek_token). Otherwise, this function would panic.
    ///
    /// # Panics
    ///
    /// If the previous token has not been taken or the next token has been
    /// peeked.
    pub fn has_blank(&mut self) -> bool {
        assert!(self.token.is_none(), "There should be no pending token");
        self.lexer.peek_char().is_some_and(is_blank)
    }

    /// Remembers the given partial here-document for later parsing of its
    /// content.
    ///
    /// The remembered here-document's content will be parsed when
    /// [`here_doc_contents`](Self::here_doc_contents) is called later.
    pub fn memorize_unread_here_doc(&mut self, here_doc: Rc<HereDoc>) {
        self.unread_here_docs.push(here_doc)
    }

    /// Reads here-document contents that match the remembered list of
    /// here-document operators.
    ///
    /// The results are inserted to the `content` cells of the `HereDoc`
    /// instances.
    ///
    /// This function must be called just after a newline token has been
    /// [taken](Self::take_token). If there is a pending token that has been
    /// peeked but not yet taken, this function will panic!
    pub fn here_doc_contents(&mut self) -> Result<()> {
        assert!(
            self.token.is_none(),
            "No token must be peeked before reading here-doc contents"
        );

        for here_doc in self.unread_here_docs.drain(..) {
            self.lexer.here_doc_content(&here_doc)?;
        }

        Ok(())
    }

    /// Ensures that there is no pending partial here-document.
    ///
    /// If there is any, this function returns a `MissingHereDocContent`
    /// error.
    pub fn ensure_no_unread_here_doc(&self) -> Result<()> {
        match self.unread_here_docs.first() {
            None => Ok(()),
            Some(here_doc) => Err(Error {
                cause: SyntaxError::MissingHereDocContent.into(),
                location: here_doc.delimiter.location.clone(),
            }),
        }
    }

    /// Consumes the current token if it is a newline, then reads pending
    /// here-document contents.
    ///
    /// Returns true if a newline was consumed.
    pub fn newline_and_here_doc_contents(&mut self) -> Result<bool> {
        if self.peek_token()?.id != Operator(self::Operator::Newline) {
            return Ok(false);
        }

        self.take_token()?;
        self.here_doc_contents()?;
        Ok(true)
    }

    /// Skips input up to and including the next command separator.
    ///
    /// This function implements error recovery in
    /// [collecting](ErrorRecovery::Collect) mode: after an error, the parser
    /// abandons the current command and resumes parsing after the next `;`,
    /// `&`, or newline token. Pending here-documents are dropped.
    pub(super) fn recover(&mut self) {
        use super::lex::Operator::*;
        self.unread_here_docs.clear();
        loop {
            // A token-level error inside a word would repeat forever if we
            // only retried the token, so skip a character in that case.
            match self.take_token() {
                Ok(token) => match token.id {
                    Operator(Semicolon) | Operator(And) | Operator(Newline) => break,
                    EndOfInput => break,
                    _ => (),
                },
                Err(_) => {
                    if self.lexer.peek_char().is_none() {
                        break;
                    }
                    self.lexer.consume_char();
                }
            }
        }
    }

    /// Requires that the given keyword comes next, consuming it.
    ///
    /// On failure, returns the error produced by the `error` function, which
    /// receives the location of the offending token.
    pub(super) fn expect_keyword<F>(&mut self, keyword: Keyword, error: F) -> Result<Token>
    where
        F: FnOnce(crate::source::Location) -> SyntaxError,
    {
        let token = self.peek_token()?;
        if token.id == Token(Some(keyword)) {
            self.take_token()
        } else {
            let location = token.word.location.clone();
            Err(Error {
                cause: error(location.clone()).into(),
                location,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lex::TokenId;

    #[test]
    fn parser_peek_and_take() {
        let mut lexer = Lexer::with_code("echo foo");
        let mut parser = Parser::new(&mut lexer);

        let token = parser.peek_token().unwrap();
        assert_eq!(token.word.to_string(), "echo");
        let token = parser.take_token().unwrap();
        assert_eq!(token.word.to_string(), "echo");
        let token = parser.take_token().unwrap();
        assert_eq!(token.word.to_string(), "foo");
        let token = parser.take_token().unwrap();
        assert_eq!(token.id, TokenId::EndOfInput);
    }

    #[test]
    fn parser_has_blank() {
        let mut lexer = Lexer::with_code("foo bar");
        let mut parser = Parser::new(&mut lexer);
        parser.take_token().unwrap();
        assert!(parser.has_blank());

        let mut lexer = Lexer::with_code("foo;bar");
        let mut parser = Parser::new(&mut lexer);
        parser.take_token().unwrap();
        assert!(!parser.has_blank());
    }

    #[test]
    #[should_panic(expected = "There should be no pending token")]
    fn parser_has_blank_with_pending_token() {
        let mut lexer = Lexer::with_code("foo");
        let mut parser = Parser::new(&mut lexer);
        parser.peek_token().unwrap();
        parser.has_blank();
    }

    #[test]
    fn parser_config_applies_options_to_lexer() {
        let mut lexer = Lexer::with_code("<(x)");
        let mut parser = Parser::config()
            .options(Options::posix())
            .input(&mut lexer);
        // In POSIX mode, `<(` is an ordinary redirection operator.
        let token = parser.take_token().unwrap();
        assert_eq!(
            token.id,
            TokenId::Operator(crate::parser::lex::Operator::Less)
        );
    }
}
