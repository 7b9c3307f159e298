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

//! Fundamental building blocks for the lexical analyzer
//!
//! The [`Lexer`] operates on a complete in-memory source string. It maintains
//! a character index into the source and exposes primitive functions such as
//! [`peek_char`](Lexer::peek_char) and [`consume_char`](Lexer::consume_char).
//! Derived functions in the sibling modules build tokens on top of those
//! primitives. The current position can be [saved](Lexer::index) and
//! [restored](Lexer::rewind) for backtracking-free speculative recognition.

use super::keyword::Keyword;
pub use super::op::Operator;
use super::op::is_operator_char;
use crate::parser::error::{Error, SyntaxError};
use crate::parser::core::Result;
use crate::source::{Code, Location, Source};
use crate::syntax::MaybeLiteral;
use crate::syntax::TextUnit::Literal;
use crate::syntax::Word;
use crate::syntax::WordUnit::Unquoted;
use std::fmt;
use std::ops::{Deref, DerefMut, Range};
use std::rc::Rc;

/// Returns true if the character is a blank character.
///
/// Blanks separate tokens within a line. The newline is not a blank; it is an
/// operator token of its own.
pub fn is_blank(c: char) -> bool {
    c != '\n' && c.is_whitespace()
}

/// Returns true if the character delimits a token.
pub fn is_token_delimiter_char(c: char) -> bool {
    is_operator_char(c) || is_blank(c)
}

/// Configuration for the lexer and parser
///
/// All feature toggles are explicit fields of this immutable value; nothing
/// in the core is controlled by environment variables.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct Options {
    /// Restrict recognition to the portable POSIX subset
    pub posix: bool,
    /// Recognize `<(...)` and `>(...)` process substitution
    pub process_substitution: bool,
    /// Recognize `$'...'` ANSI-C quoting
    pub ansi_c_quoting: bool,
    /// Recognize array assignments (`a=(...)`, `a[i]=...`)
    pub arrays: bool,
    /// Recognize the `[[ ... ]]` extended test command
    pub extended_test: bool,
    /// Recognize the `(( ... ))` arithmetic command and c-style `for`
    pub arith_command: bool,
    /// Maximum nesting depth of quotations, expansions, and commands
    pub max_nesting: usize,
}

impl Options {
    /// Returns options with all extensions enabled.
    #[must_use]
    pub fn extended() -> Options {
        Options {
            posix: false,
            process_substitution: true,
            ansi_c_quoting: true,
            arrays: true,
            extended_test: true,
            arith_command: true,
            max_nesting: 1000,
        }
    }

    /// Returns options restricted to the portable POSIX subset.
    #[must_use]
    pub fn posix() -> Options {
        Options {
            posix: true,
            process_substitution: false,
            ansi_c_quoting: false,
            arrays: false,
            extended_test: false,
            arith_command: false,
            max_nesting: 1000,
        }
    }
}

/// The default options have all extensions enabled.
impl Default for Options {
    fn default() -> Options {
        Options::extended()
    }
}

/// Token identifier, or classification of tokens
///
/// This enum classifies a token as defined in POSIX XCU 2.10.1 Shell Grammar
/// Lexical Conventions, but does not exactly reflect further distinction
/// defined in POSIX XCU 2.10.2 Shell Grammar Rules.
///
/// For convenience, the special token identifier `EndOfInput` is included.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TokenId {
    /// `TOKEN`
    ///
    /// If this token _looks like_ a reserved word, this variant has some
    /// associated `Keyword` that describes the word. However, it depends on
    /// context whether a token is actually regarded as a reserved word or
    /// just as an ordinary word. You must ensure that you're in an
    /// applicable context when examining the `Keyword` value.
    Token(Option<Keyword>),
    /// Operator
    Operator(Operator),
    /// `IO_NUMBER`
    IoNumber,
    /// Imaginary token identifier for the end of input
    EndOfInput,
}

/// Result of lexical analysis produced by the [`Lexer`]
#[derive(Clone, Debug)]
pub struct Token {
    /// Content of the token
    ///
    /// The word value may be empty only if the token is `EndOfInput`.
    pub word: Word,
    /// Token identifier
    pub id: TokenId,
    /// Position of the first character of the word
    pub index: usize,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.word)
    }
}

/// Lexical analyzer
///
/// A lexer parses an in-memory source string into tokens. It has an internal
/// position (the index of the character that is to be parsed next), which can
/// be saved and restored to implement speculative recognition.
///
/// Line continuations (a backslash followed by a newline) are transparently
/// skipped by [`peek_char`](Lexer::peek_char) unless disabled with
/// [`set_line_continuation`](Lexer::set_line_continuation); single-quoted
/// strings and literal here-document contents disable them.
pub struct Lexer {
    code: Rc<Code>,
    chars: Vec<char>,
    index: usize,
    line_continuation: bool,
    options: Options,
    nesting: usize,
}

impl Lexer {
    /// Creates a new lexer with a fixed source code.
    #[must_use]
    pub fn from_memory<S: Into<String>>(code: S, source: Source) -> Lexer {
        let code = Rc::new(Code::new(code, source));
        let chars = code.value.chars().collect();
        Lexer {
            code,
            chars,
            index: 0,
            line_continuation: true,
            options: Options::default(),
            nesting: 0,
        }
    }

    /// Creates a new lexer for source code of unknown origin.
    #[must_use]
    pub fn with_code(code: &str) -> Lexer {
        Lexer::from_memory(code, Source::Unknown)
    }

    /// Returns the current options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Replaces the options.
    pub fn set_options(&mut self, options: Options) {
        self.options = options;
    }

    /// Returns the code unit this lexer reads from.
    #[must_use]
    pub fn code(&self) -> &Rc<Code> {
        &self.code
    }

    /// Enables or disables line continuation skipping.
    ///
    /// Returns the previous setting so it can be restored.
    pub fn set_line_continuation(&mut self, enabled: bool) -> bool {
        std::mem::replace(&mut self.line_continuation, enabled)
    }

    fn skip_line_continuations(&mut self) {
        if !self.line_continuation {
            return;
        }
        while self.chars.get(self.index) == Some(&'\\')
            && self.chars.get(self.index + 1) == Some(&'\n')
        {
            self.index += 2;
        }
    }

    /// Peeks the next character.
    ///
    /// If the end of input is reached, `None` is returned. Pending line
    /// continuations are skipped, which is why this function takes `&mut
    /// self`.
    pub fn peek_char(&mut self) -> Option<char> {
        self.skip_line_continuations();
        self.chars.get(self.index).copied()
    }

    /// Consumes the next character.
    ///
    /// This function must be called after [`peek_char`](Lexer::peek_char) has
    /// successfully returned a character. Consuming a character that has not
    /// been peeked results in a panic!
    pub fn consume_char(&mut self) {
        assert!(
            self.index < self.chars.len(),
            "A character must have been peeked before being consumed: index={}",
            self.index
        );
        self.index += 1;
    }

    /// Peeks the next character and, if the given decider function returns
    /// true for it, advances the position.
    ///
    /// Returns the consumed character if the function returned true. Returns
    /// `None` if it returned false or there is no more character.
    pub fn consume_char_if<F>(&mut self, f: F) -> Option<char>
    where
        F: FnOnce(char) -> bool,
    {
        match self.peek_char() {
            Some(c) if f(c) => {
                self.consume_char();
                Some(c)
            }
            _ => None,
        }
    }

    /// Like [`consume_char_if`](Lexer::consume_char_if), but only reports
    /// whether a character was consumed.
    pub fn skip_if<F>(&mut self, f: F) -> bool
    where
        F: FnOnce(char) -> bool,
    {
        self.consume_char_if(f).is_some()
    }

    /// Returns the position of the next character, counted from zero.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Moves the current position back to the given index so that characters
    /// that have been consumed can be read again.
    ///
    /// The given index must not be larger than the [current
    /// index](Lexer::index), or this function would panic.
    pub fn rewind(&mut self, index: usize) {
        assert!(
            index <= self.index,
            "The new index {} must not be larger than the current index {}",
            index,
            self.index
        );
        self.index = index;
    }

    /// Returns the location of the next character.
    ///
    /// If there is no more character, an imaginary empty location just after
    /// the last character is returned.
    #[must_use]
    pub fn location(&self) -> Location {
        let start = self.index.min(self.chars.len());
        let end = (start + 1).min(self.chars.len()).max(start);
        Location {
            code: Rc::clone(&self.code),
            range: start..end,
        }
    }

    /// Returns the location of the given character range.
    #[must_use]
    pub fn location_range(&self, range: Range<usize>) -> Location {
        Location {
            code: Rc::clone(&self.code),
            range,
        }
    }

    /// Extracts the source characters in the given range as a string.
    #[must_use]
    pub fn source_string(&self, range: Range<usize>) -> String {
        self.chars[range].iter().collect()
    }

    /// Enters one level of syntactic nesting.
    ///
    /// Returns a `NestingTooDeep` error if the configured maximum is
    /// exceeded. Each successful call must be paired with a
    /// [`leave_nesting`](Lexer::leave_nesting) call.
    pub fn enter_nesting(&mut self) -> Result<()> {
        if self.nesting >= self.options.max_nesting {
            let cause = SyntaxError::NestingTooDeep.into();
            let location = self.location();
            return Err(Error { cause, location });
        }
        self.nesting += 1;
        Ok(())
    }

    /// Leaves one level of syntactic nesting.
    pub fn leave_nesting(&mut self) {
        self.nesting -= 1;
    }

    /// Skips blank characters.
    pub fn skip_blanks(&mut self) {
        while self.skip_if(is_blank) {}
    }

    /// Skips a comment, if any.
    ///
    /// A comment ranges from a `#` to (but not including) the next newline.
    pub fn skip_comment(&mut self) {
        if self.skip_if(|c| c == '#') {
            let continuation = self.set_line_continuation(false);
            while self.skip_if(|c| c != '\n') {}
            self.set_line_continuation(continuation);
        }
    }

    /// Skips blank characters and a trailing comment.
    pub fn skip_blanks_and_comment(&mut self) {
        self.skip_blanks();
        self.skip_comment();
    }

    /// Parses an `IO_NUMBER` token, if any.
    ///
    /// An I/O number is a sequence of digits immediately followed by a `<` or
    /// `>` character. If the digits are not followed by such a character, the
    /// position is rewound and `None` is returned.
    fn io_number(&mut self) -> Option<Token> {
        let start_index = self.index;
        let mut digits = String::new();
        while let Some(c) = self.consume_char_if(|c| c.is_ascii_digit()) {
            digits.push(c);
        }
        if digits.is_empty() || !matches!(self.peek_char(), Some('<') | Some('>')) {
            self.rewind(start_index);
            return None;
        }

        let units = digits.chars().map(|c| Unquoted(Literal(c))).collect();
        let location = self.location_range(start_index..self.index);
        let word = Word { units, location };
        Some(Token {
            word,
            id: TokenId::IoNumber,
            index: start_index,
        })
    }

    /// Tests whether a process substitution starts at the current position.
    fn at_proc_subst(&mut self) -> bool {
        if !self.options.process_substitution {
            return false;
        }
        let index = self.index;
        let result = self.skip_if(|c| c == '<' || c == '>') && self.peek_char() == Some('(');
        self.rewind(index);
        result
    }

    /// Parses a complete token.
    ///
    /// The caller must have skipped leading blanks and comments with
    /// [`skip_blanks_and_comment`](Lexer::skip_blanks_and_comment). If the
    /// end of input has been reached, an `EndOfInput` token is returned.
    pub fn token(&mut self) -> Result<Token> {
        let index = self.index;

        let Some(c) = self.peek_char() else {
            let word = Word {
                units: vec![],
                location: self.location(),
            };
            return Ok(Token {
                word,
                id: TokenId::EndOfInput,
                index: self.index,
            });
        };

        if c.is_ascii_digit() {
            if let Some(token) = self.io_number() {
                return Ok(token);
            }
        }

        if is_operator_char(c) && !self.at_proc_subst() {
            return self.operator();
        }

        let mut word_lexer = WordLexer {
            lexer: self,
            context: WordContext::Word,
        };
        let word = word_lexer.word(is_token_delimiter_char)?;
        let keyword = word
            .to_string_if_literal()
            .and_then(|s| s.parse::<Keyword>().ok());
        Ok(Token {
            word,
            id: TokenId::Token(keyword),
            index,
        })
    }
}

impl fmt::Debug for Lexer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> std::result::Result<(), fmt::Error> {
        f.debug_struct("Lexer")
            .field("code", &self.code)
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

/// Context in which a word is parsed
///
/// Some elements are recognized differently depending on where the word
/// appears. In the `Text` context, used for here-document contents and
/// double-quote interiors, single quotes are not special.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WordContext {
    /// The word is a normal token.
    Word,
    /// The word is part of a text.
    Text,
}

/// Lexer for a word token
///
/// A word lexer is a thin wrapper around a [`Lexer`] that remembers the
/// [context](WordContext) the word is being parsed in. It dereferences to the
/// inner lexer.
#[derive(Debug)]
pub struct WordLexer<'a> {
    pub lexer: &'a mut Lexer,
    pub context: WordContext,
}

impl Deref for WordLexer<'_> {
    type Target = Lexer;
    fn deref(&self) -> &Lexer {
        self.lexer
    }
}

impl DerefMut for WordLexer<'_> {
    fn deref_mut(&mut self) -> &mut Lexer {
        self.lexer
    }
}
