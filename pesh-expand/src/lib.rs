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

//! Word expansion for pesh
//!
//! This crate turns parsed [words](pesh_syntax::syntax::Word) into the
//! strings that are ultimately passed to commands. The expansion proceeds in
//! the POSIX order:
//!
//! 1. Brace expansion (`{a,b}`, `{1..5}`), producing multiple words
//! 2. Tilde expansion
//! 3. Parameter expansion, command substitution, arithmetic expansion
//! 4. Quote removal
//! 5. Field splitting on `$IFS`
//! 6. Pathname expansion
//!
//! Steps 1–3 are the [initial expansion](initial), which produces
//! [phrases](phrase::Phrase) of [attributed characters](attr::AttrChar).
//! The attributes record where each character came from and whether it is
//! quoted, which is what the later steps consult: only unquoted characters
//! from parameter-like expansions are subject to field splitting, and only
//! unquoted pattern characters are special in pathname expansion.
//!
//! The main entry points are [`expand_words`] (command arguments, full
//! pipeline), [`expand_word`] (contexts that take exactly one field), and
//! [`expand_text`] (here-document contents).

pub mod assign;
pub mod attr;
pub mod attr_strip;
pub mod brace;
pub mod glob;
pub mod initial;
pub mod pattern;
pub mod phrase;
pub mod quote_removal;
pub mod split;


use self::attr::AttrChar;
use self::initial::Expand;
use self::split::Ifs;
use pesh_env::exec::{ArithmeticEvaluator, CommandRunner, Globber};
use pesh_env::semantics::{ExitStatus, Field};
use pesh_syntax::source::Location;
use pesh_syntax::source::pretty::{Annotation, AnnotationType, MessageBase};
use pesh_syntax::syntax::Text;
use pesh_syntax::syntax::Word;
use std::borrow::Cow;
use std::cell::Cell;
use std::rc::Rc;
use thiserror::Error as ThisError;

/// Cooperative cancellation token
///
/// The expansion checks the token between words and before each call-out to
/// the command runner, returning a `Cancelled` error when it has been
/// triggered. Cloning the token yields a handle to the same flag.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    /// Creates a token that has not been cancelled.
    #[must_use]
    pub fn new() -> CancelToken {
        CancelToken::default()
    }

    /// Triggers the token.
    pub fn cancel(&self) {
        self.0.set(true);
    }

    /// Tests whether the token has been triggered.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// Types of errors that may occur in the word expansion
#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[non_exhaustive]
pub enum ErrorCause {
    /// A parameter expansion is not supported by the variable it names.
    #[error("bad substitution")]
    BadSubstitution,
    /// A `${var:?}` expansion found the parameter unset or null.
    #[error("{message}")]
    ParameterUnsetOrNull {
        /// Name of the parameter
        param: String,
        /// Message, either user-provided or the default
        message: String,
    },
    /// A `${var:=...}` expansion names a parameter that cannot be assigned.
    #[error("cannot assign to this parameter")]
    NonassignableParameter,
    /// An assignment targets a read-only variable.
    #[error(transparent)]
    AssignReadOnly(#[from] pesh_env::variable::AssignError),
    /// An array subscript could not be evaluated.
    #[error("invalid array subscript")]
    BadArrayIndex,
    /// An arithmetic expansion failed to evaluate.
    #[error(transparent)]
    Arith(#[from] pesh_env::exec::ArithError),
    /// The content of a command substitution failed to parse.
    #[error("error in command substitution: {0}")]
    CommandSubstSyntax(Box<pesh_syntax::parser::Error>),
    /// The command runner failed to run a substitution.
    #[error(transparent)]
    CommandSubstFailure(pesh_env::exec::RunError),
    /// The expansion was cancelled through its [`CancelToken`].
    #[error("expansion cancelled")]
    Cancelled,
}

impl ErrorCause {
    /// Returns the stable identifier of this error cause.
    #[must_use]
    pub fn code(&self) -> &'static str {
        use ErrorCause::*;
        match self {
            BadSubstitution => "E0301_BAD_SUBSTITUTION",
            ParameterUnsetOrNull { .. } => "E0302_PARAMETER_UNSET_OR_NULL",
            NonassignableParameter | AssignReadOnly(_) => "E0303_ASSIGNMENT_FAILED",
            BadArrayIndex => "E0304_BAD_ARRAY_INDEX",
            Arith(_) => "E0305_ARITHMETIC_ERROR",
            CommandSubstSyntax(_) | CommandSubstFailure(_) => "E0306_COMMAND_SUBSTITUTION",
            Cancelled => "E0307_CANCELLED",
        }
    }
}

/// Explanation of an expansion failure
#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("{cause}")]
pub struct Error {
    pub cause: ErrorCause,
    pub location: Location,
}

impl MessageBase for Error {
    fn message_title(&self) -> Cow<'_, str> {
        self.cause.to_string().into()
    }

    fn message_code(&self) -> Option<&'static str> {
        Some(self.cause.code())
    }

    fn main_annotation(&self) -> Annotation<'_> {
        Annotation::new(
            AnnotationType::Error,
            self.cause.to_string().into(),
            &self.location,
        )
    }
}

/// Result of word expansion
pub type Result<T> = std::result::Result<T, Error>;

/// Shell execution environment for performing word expansion in
///
/// An `Env` borrows the shell state and the collaborators the expansion
/// calls out to. It also carries the transient state of one expansion run,
/// such as whether the current context is subject to field splitting.
pub struct Env<'a> {
    /// Shell state: variables, functions, parameters
    pub inner: &'a mut pesh_env::Env,
    /// Runner for command and process substitution
    pub runner: &'a mut dyn CommandRunner,
    /// Evaluator for arithmetic expansion
    pub arith: &'a dyn ArithmeticEvaluator,
    /// Matcher for pathname expansion
    pub globber: &'a mut dyn Globber,
    /// Cancellation token checked between expansion steps
    pub cancel: CancelToken,
    /// Exit status of the last command substitution in this run, if any
    pub last_command_subst_status: Option<ExitStatus>,
    /// Whether the current context is subject to field splitting
    ///
    /// This flag is cleared inside double quotes; `$*`-like expansions
    /// consult it to decide between joining and separate fields.
    pub(crate) will_split: bool,
}

impl<'a> Env<'a> {
    /// Creates an expansion environment.
    pub fn new(
        inner: &'a mut pesh_env::Env,
        runner: &'a mut dyn CommandRunner,
        arith: &'a dyn ArithmeticEvaluator,
        globber: &'a mut dyn Globber,
    ) -> Env<'a> {
        Env {
            inner,
            runner,
            arith,
            globber,
            cancel: CancelToken::new(),
            last_command_subst_status: None,
            will_split: true,
        }
    }

    /// Returns a `Cancelled` error if the token has been triggered.
    pub(crate) fn check_cancel(&self, location: &Location) -> Result<()> {
        if self.cancel.is_cancelled() {
            Err(Error {
                cause: ErrorCause::Cancelled,
                location: location.clone(),
            })
        } else {
            Ok(())
        }
    }

    /// Returns the character that joins multi-valued expansions in
    /// non-splitting contexts.
    ///
    /// This is the first character of `$IFS`: a space when the variable is
    /// unset, nothing when it is set but empty.
    pub(crate) fn join_char(&self) -> Option<char> {
        match self.inner.ifs() {
            Some(chars) => chars.chars().next(),
            None => Some(' '),
        }
    }
}

impl std::fmt::Debug for Env<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Env")
            .field("inner", &self.inner)
            .field("will_split", &self.will_split)
            .finish_non_exhaustive()
    }
}

/// Converts one field of attributed characters into its final string form.
fn finish_field(chars: Vec<AttrChar>, origin: &Location) -> Field {
    let value = attr_strip::strip(quote_removal::skip_quotes(chars));
    Field {
        value,
        origin: origin.clone(),
    }
}

/// Expands words to any number of fields.
///
/// This is the full expansion used for command arguments and `for` loop
/// word lists: brace expansion, initial expansion, field splitting, and
/// pathname expansion all apply.
pub fn expand_words(env: &mut Env, words: &[Word]) -> Result<Vec<Field>> {
    let mut fields = Vec::new();
    for word in words {
        env.check_cancel(&word.location)?;
        for word in brace::expand_word_braces(word) {
            let phrase = word.expand(env)?;
            let ifs_chars = env.inner.ifs().map(ToOwned::to_owned);
            let ifs = match &ifs_chars {
                Some(chars) => Ifs::new(chars),
                None => Ifs::default(),
            };
            for field in phrase.into_fields() {
                for split in split::split_fields(field, &ifs) {
                    fields.extend(glob::glob_field(env, split, &word.location));
                }
            }
        }
    }
    Ok(fields)
}

/// Expands a word to exactly one field.
///
/// This expansion applies to contexts where the result is a single string:
/// assignment values, redirection targets, case subjects and patterns, and
/// extended test operands. Brace expansion, field splitting, and pathname
/// expansion do not apply; a multi-valued expansion such as `$@` is joined
/// with spaces.
pub fn expand_word(env: &mut Env, word: &Word) -> Result<Field> {
    env.check_cancel(&word.location)?;
    let will_split = std::mem::replace(&mut env.will_split, false);
    let result = word.expand(env);
    env.will_split = will_split;
    let phrase = result?;
    let chars = phrase.ifs_join(env.join_char());
    Ok(finish_field(chars, &word.location))
}

/// Expands a text to a string.
///
/// This expansion applies to here-document contents with unquoted
/// delimiters. Only the step-3 expansions are performed.
pub fn expand_text(env: &mut Env, text: &Text) -> Result<String> {
    let will_split = std::mem::replace(&mut env.will_split, false);
    let result = text.expand(env);
    env.will_split = will_split;
    let phrase = result?;
    let chars = phrase.ifs_join(env.join_char());
    Ok(attr_strip::strip(quote_removal::skip_quotes(chars)))
}
