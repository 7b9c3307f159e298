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

//! Definition of errors that happen in the parser

use crate::source::Location;
use crate::source::pretty::{Annotation, AnnotationType, MessageBase};
use crate::syntax::AndOr;
use std::borrow::Cow;
use thiserror::Error;

/// Types of syntax errors
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("{}", self.message())]
#[non_exhaustive]
pub enum SyntaxError {
    /// A backslash is at the end of the input.
    IncompleteEscape,
    /// A backslash is not followed by a character that makes a valid escape.
    InvalidEscape,
    /// A control escape (`\c...`) is incomplete.
    IncompleteControlEscape,
    /// A control-backslash escape (`\c\\`) is incomplete.
    IncompleteControlBackslashEscape,
    /// An octal escape is out of range (greater than `\377`).
    OctalEscapeOutOfRange,
    /// A hexadecimal escape (`\x...`) is incomplete.
    IncompleteHexEscape,
    /// A Unicode escape (`\u...`) is incomplete.
    IncompleteShortUnicodeEscape,
    /// A Unicode escape (`\U...`) is incomplete.
    IncompleteLongUnicodeEscape,
    /// A Unicode escape is out of range.
    UnicodeEscapeOutOfRange,
    /// A `(` lacks a closing `)`.
    UnclosedParen { opening_location: Location },
    /// A single quotation lacks a closing `'`.
    UnclosedSingleQuote { opening_location: Location },
    /// A double quotation lacks a closing `"`.
    UnclosedDoubleQuote { opening_location: Location },
    /// A `$'` lacks a closing `'`.
    UnclosedDollarSingleQuote { opening_location: Location },
    /// A parameter expansion lacks a closing `}`.
    UnclosedParam { opening_location: Location },
    /// A parameter expansion lacks a name.
    EmptyParam,
    /// A parameter expansion has an invalid name.
    InvalidParam,
    /// A modifier does not have a valid form in a parameter expansion.
    InvalidModifier,
    /// A braced parameter expansion has both a prefix and suffix modifier.
    MultipleModifier,
    /// An array subscript lacks a closing `]`.
    BadSubscript,
    /// A command substitution started with `$(` but lacks a closing `)`.
    UnclosedCommandSubstitution { opening_location: Location },
    /// A command substitution started with `` ` `` but lacks a closing
    /// `` ` ``.
    UnclosedBackquote { opening_location: Location },
    /// An arithmetic expansion lacks a closing `))`.
    UnclosedArith { opening_location: Location },
    /// Syntactic constructs are nested too deeply.
    NestingTooDeep,
    /// A command begins with an inappropriate keyword or operator token.
    InvalidCommandToken,
    /// A separator is missing between commands.
    MissingSeparator,
    /// The file descriptor specified for a redirection cannot be used.
    FdOutOfRange,
    /// A redirection operator is missing its operand.
    MissingRedirOperand,
    /// A here-document operator is missing its delimiter token.
    MissingHereDocDelimiter,
    /// A here-document operator is missing its corresponding content.
    MissingHereDocContent,
    /// A here-document content is missing its delimiter.
    UnclosedHereDocContent { redir_op_location: Location },
    /// An array assignment started with `=(` but lacks a closing `)`.
    UnclosedArrayValue { opening_location: Location },
    /// A `}` appears without a matching `{`.
    UnopenedGrouping,
    /// A grouping is not closed.
    UnclosedGrouping { opening_location: Location },
    /// A grouping contains no commands.
    EmptyGrouping,
    /// A `)` appears without a matching `(`.
    UnopenedSubshell,
    /// A subshell is not closed.
    UnclosedSubshell { opening_location: Location },
    /// A subshell contains no commands.
    EmptySubshell,
    /// A `do` appears outside a loop.
    UnopenedLoop,
    /// A `done` appears outside a loop.
    UnopenedDoClause,
    /// A do clause is not closed.
    UnclosedDoClause { opening_location: Location },
    /// A do clause contains no commands.
    EmptyDoClause,
    /// The variable name is missing in a for loop.
    MissingForName,
    /// The variable name is not a valid word in a for loop.
    InvalidForName,
    /// A value is not a valid word in a for loop.
    InvalidForValue,
    /// A for loop is missing a do clause.
    MissingForBody { opening_location: Location },
    /// A c-style for loop head is not closed by `))`.
    UnclosedArithFor { opening_location: Location },
    /// A while loop is missing a do clause.
    UnclosedWhileClause { opening_location: Location },
    /// A while loop's condition is empty.
    EmptyWhileCondition,
    /// An until loop is missing a do clause.
    UnclosedUntilClause { opening_location: Location },
    /// An until loop's condition is empty.
    EmptyUntilCondition,
    /// An if command is missing the then clause.
    IfMissingThen { if_location: Location },
    /// An if command's condition is empty.
    EmptyIfCondition,
    /// An if command's body is empty.
    EmptyIfBody,
    /// An elif clause is missing the then clause.
    ElifMissingThen { elif_location: Location },
    /// An elif clause's condition is empty.
    EmptyElifCondition,
    /// An elif clause's body is empty.
    EmptyElifBody,
    /// An else clause is empty.
    EmptyElse,
    /// An `elif`, `else`, `then`, or `fi` appears outside an if command.
    UnopenedIf,
    /// An if command is not closed.
    UnclosedIf { opening_location: Location },
    /// The case command is missing its subject.
    MissingCaseSubject,
    /// The subject of the case command is not a valid word.
    InvalidCaseSubject,
    /// The case command is missing `in` after the subject.
    MissingIn { opening_location: Location },
    /// The `)` is missing in a case item.
    UnclosedPatternList,
    /// The pattern is missing in a case item.
    MissingPattern,
    /// The pattern is not a valid word token.
    InvalidPattern,
    /// An `esac` or `;;` appears outside a case command.
    UnopenedCase,
    /// A case command is not closed.
    UnclosedCase { opening_location: Location },
    /// An extended test command is not closed by `]]`.
    UnclosedDoubleBracket { opening_location: Location },
    /// An extended test command contains no expression.
    EmptyDoubleBracket,
    /// An operand or operator in an extended test command is invalid.
    InvalidTestOperand,
    /// An arithmetic command is not closed by `))`.
    UnclosedArithCommand { opening_location: Location },
    /// A c-style for loop head does not have exactly three sections.
    InvalidArithFor,
    /// The `(` is not followed by `)` in a function definition.
    UnmatchedParenthesis,
    /// The function name is missing after the `function` keyword.
    MissingFunctionName,
    /// The function body is missing in a function definition command.
    MissingFunctionBody,
    /// A function body is not a compound command.
    InvalidFunctionBody,
    /// The keyword `in` is used as a command name.
    InAsCommandName,
    /// A pipeline is missing after a `&&` or `||` token.
    MissingPipeline(AndOr),
    /// Two successive `!` tokens.
    DoubleNegation,
    /// A `|` token is followed by a `!`.
    BangAfterBar,
    /// A command is missing after a `!` token.
    MissingCommandAfterBang,
    /// A command is missing after a `|` token.
    MissingCommandAfterBar,
    /// A command is missing after the `time` keyword.
    MissingCommandAfterTime,
    /// There is a redundant token.
    RedundantToken,
}

impl SyntaxError {
    /// Returns an error message describing the error.
    #[must_use]
    pub fn message(&self) -> &'static str {
        use SyntaxError::*;
        match self {
            IncompleteEscape => "the backslash is escaping nothing",
            InvalidEscape => "the backslash escape is invalid",
            IncompleteControlEscape => "the control escape is incomplete",
            IncompleteControlBackslashEscape => "the control-backslash escape is incomplete",
            OctalEscapeOutOfRange => "the octal escape is out of range",
            IncompleteHexEscape => "the hexadecimal escape is incomplete",
            IncompleteShortUnicodeEscape | IncompleteLongUnicodeEscape => {
                "the Unicode escape is incomplete"
            }
            UnicodeEscapeOutOfRange => "the Unicode escape is out of range",
            UnclosedParen { .. } => "the parenthesis is not closed",
            UnclosedSingleQuote { .. } => "the single quote is not closed",
            UnclosedDoubleQuote { .. } => "the double quote is not closed",
            UnclosedDollarSingleQuote { .. } => "the dollar single quote is not closed",
            UnclosedParam { .. } => "the parameter expansion is not closed",
            EmptyParam => "the parameter name is missing",
            InvalidParam => "the parameter name is invalid",
            InvalidModifier => "the parameter expansion contains a malformed modifier",
            MultipleModifier => "a suffix modifier cannot be used together with a prefix modifier",
            BadSubscript => "the array subscript is not closed",
            UnclosedCommandSubstitution { .. } => "the command substitution is not closed",
            UnclosedBackquote { .. } => "the backquote is not closed",
            UnclosedArith { .. } => "the arithmetic expansion is not closed",
            NestingTooDeep => "the command is nested too deeply",
            InvalidCommandToken => "the command starts with an inappropriate token",
            MissingSeparator => "a separator is missing between the commands",
            FdOutOfRange => "the file descriptor is too large",
            MissingRedirOperand => "the redirection operator is missing its operand",
            MissingHereDocDelimiter => "the here-document operator is missing its delimiter",
            MissingHereDocContent => "content of the here-document is missing",
            UnclosedHereDocContent { .. } => {
                "the delimiter to close the here-document content is missing"
            }
            UnclosedArrayValue { .. } => "the array assignment value is not closed",
            UnopenedGrouping | UnopenedSubshell | UnopenedLoop | UnopenedDoClause | UnopenedIf
            | UnopenedCase | InAsCommandName => "the compound command delimiter is unmatched",
            UnclosedGrouping { .. } => "the grouping is not closed",
            EmptyGrouping => "the grouping is missing its content",
            UnclosedSubshell { .. } => "the subshell is not closed",
            EmptySubshell => "the subshell is missing its content",
            UnclosedDoClause { .. } => "the `do` clause is missing its closing `done`",
            EmptyDoClause => "the `do` clause is missing its content",
            MissingForName => "the variable name is missing in the `for` loop",
            InvalidForName => "the variable name is invalid",
            InvalidForValue => "the operator token is invalid in the word list of the `for` loop",
            MissingForBody { .. } => "the `for` loop is missing its `do` clause",
            UnclosedArithFor { .. } => "the `for ((...))` head is missing its closing `))`",
            InvalidArithFor => "the `for ((...))` head must contain exactly two semicolons",
            UnclosedWhileClause { .. } => "the `while` loop is missing its `do` clause",
            EmptyWhileCondition => "the `while` loop is missing its condition",
            UnclosedUntilClause { .. } => "the `until` loop is missing its `do` clause",
            EmptyUntilCondition => "the `until` loop is missing its condition",
            IfMissingThen { .. } => "the `if` command is missing the `then` clause",
            EmptyIfCondition => "the `if` command is missing its condition",
            EmptyIfBody => "the `if` command is missing its body",
            ElifMissingThen { .. } => "the `elif` clause is missing the `then` clause",
            EmptyElifCondition => "the `elif` clause is missing its condition",
            EmptyElifBody => "the `elif` clause is missing its body",
            EmptyElse => "the `else` clause is missing its content",
            UnclosedIf { .. } => "the `if` command is missing its closing `fi`",
            MissingCaseSubject => "the subject is missing after `case`",
            InvalidCaseSubject => "the `case` command subject is not a valid word",
            MissingIn { .. } => "`in` is missing in the `case` command",
            UnclosedPatternList => "the pattern list is not properly closed by a `)`",
            MissingPattern => "a pattern is missing in the `case` command",
            InvalidPattern => "the pattern is not a valid word token",
            UnclosedCase { .. } => "the `case` command is missing its closing `esac`",
            UnclosedDoubleBracket { .. } => "the `[[` command is missing its closing `]]`",
            EmptyDoubleBracket => "the `[[` command is missing its expression",
            InvalidTestOperand => "the test operand is invalid",
            UnclosedArithCommand { .. } => "the `((` command is missing its closing `))`",
            UnmatchedParenthesis => "`)` is missing after `(`",
            MissingFunctionName => "the function name is missing",
            MissingFunctionBody => "the function body is missing",
            InvalidFunctionBody => "the function body must be a compound command",
            MissingPipeline(AndOr::AndThen) => "a command is missing after `&&`",
            MissingPipeline(AndOr::OrElse) => "a command is missing after `||`",
            DoubleNegation => "`!` cannot be used twice in a row",
            BangAfterBar => "`!` cannot be used in the middle of a pipeline",
            MissingCommandAfterBang => "a command is missing after `!`",
            MissingCommandAfterBar => "a command is missing after `|`",
            MissingCommandAfterTime => "a command is missing after `time`",
            RedundantToken => "there is a redundant token",
        }
    }

    /// Returns a label for annotating the error location.
    ///
    /// The label suggests what was expected at the location and can be used
    /// as a hint when rendering the diagnostic.
    #[must_use]
    pub fn label(&self) -> &'static str {
        use SyntaxError::*;
        match self {
            IncompleteEscape => "expected an escaped character after the backslash",
            InvalidEscape => "invalid escape sequence",
            IncompleteControlEscape | IncompleteControlBackslashEscape => {
                "expected a control character"
            }
            OctalEscapeOutOfRange => "expected an octal value up to `\\377`",
            IncompleteHexEscape | IncompleteShortUnicodeEscape | IncompleteLongUnicodeEscape => {
                "expected hexadecimal digits"
            }
            UnicodeEscapeOutOfRange => "expected a valid Unicode scalar value",
            UnclosedParen { .. }
            | UnclosedCommandSubstitution { .. }
            | UnclosedArrayValue { .. }
            | UnclosedSubshell { .. }
            | UnclosedPatternList
            | UnmatchedParenthesis => "expected `)`",
            UnclosedSingleQuote { .. } | UnclosedDollarSingleQuote { .. } => "expected `'`",
            UnclosedDoubleQuote { .. } => "expected `\"`",
            UnclosedParam { .. } => "expected `}`",
            EmptyParam | InvalidParam => "expected a parameter name",
            InvalidModifier => "expected a valid modifier",
            MultipleModifier => "cannot be combined with `#`",
            BadSubscript => "expected `]`",
            UnclosedBackquote { .. } => "expected `` ` ``",
            UnclosedArith { .. } | UnclosedArithCommand { .. } | UnclosedArithFor { .. } => {
                "expected `))`"
            }
            NestingTooDeep => "too deeply nested",
            InvalidCommandToken | MissingSeparator | RedundantToken => "unexpected token",
            FdOutOfRange => "unsupported file descriptor",
            MissingRedirOperand => "expected a word as the redirection target",
            MissingHereDocDelimiter => "expected a word as the here-document delimiter",
            MissingHereDocContent | UnclosedHereDocContent { .. } => {
                "expected the here-document delimiter line"
            }
            UnopenedGrouping | UnopenedSubshell | UnopenedLoop | UnopenedDoClause | UnopenedIf
            | UnopenedCase | InAsCommandName => "put this inside the matching compound command",
            UnclosedGrouping { .. } => "expected `}`",
            EmptyGrouping | EmptySubshell | EmptyDoClause | EmptyWhileCondition
            | EmptyUntilCondition | EmptyIfCondition | EmptyIfBody | EmptyElifCondition
            | EmptyElifBody | EmptyElse | EmptyDoubleBracket => "expected a command",
            UnclosedDoClause { .. } => "expected `done`",
            MissingForName | InvalidForName | MissingFunctionName => "expected a name",
            InvalidArithFor => "expected `;`",
            InvalidForValue => "expected a word",
            MissingForBody { .. } | UnclosedWhileClause { .. } | UnclosedUntilClause { .. } => {
                "expected `do`"
            }
            IfMissingThen { .. } | ElifMissingThen { .. } => "expected `then`",
            UnclosedIf { .. } => "expected `fi`",
            MissingCaseSubject | InvalidCaseSubject => "expected a word as the `case` subject",
            MissingIn { .. } => "expected `in`",
            MissingPattern | InvalidPattern => "expected a pattern word",
            UnclosedCase { .. } => "expected `esac`",
            UnclosedDoubleBracket { .. } => "expected `]]`",
            InvalidTestOperand => "expected a test operand",
            MissingFunctionBody | InvalidFunctionBody => "expected a compound command",
            MissingPipeline(_) | MissingCommandAfterBang | MissingCommandAfterBar
            | MissingCommandAfterTime => "expected a command",
            DoubleNegation | BangAfterBar => "remove this `!`",
        }
    }

    /// Returns the stable identifier of this error.
    ///
    /// Codes are stable across releases and can be used to match diagnostics
    /// programmatically.
    #[must_use]
    pub fn code(&self) -> &'static str {
        use SyntaxError::*;
        match self {
            UnclosedSingleQuote { .. }
            | UnclosedDoubleQuote { .. }
            | UnclosedDollarSingleQuote { .. }
            | UnclosedBackquote { .. } => "E0101_UNTERMINATED_QUOTE",
            UnclosedParam { .. }
            | UnclosedCommandSubstitution { .. }
            | UnclosedArith { .. }
            | UnclosedParen { .. } => "E0102_UNTERMINATED_EXPANSION",
            MissingHereDocContent | UnclosedHereDocContent { .. } => {
                "E0103_UNTERMINATED_HEREDOC"
            }
            IncompleteEscape
            | InvalidEscape
            | IncompleteControlEscape
            | IncompleteControlBackslashEscape
            | OctalEscapeOutOfRange
            | IncompleteHexEscape
            | IncompleteShortUnicodeEscape
            | IncompleteLongUnicodeEscape
            | UnicodeEscapeOutOfRange => "E0104_INVALID_ESCAPE",
            NestingTooDeep => "E0105_NESTING_TOO_DEEP",
            EmptyParam | InvalidParam | InvalidModifier | MultipleModifier | BadSubscript => {
                "E0106_BAD_SUBSTITUTION"
            }
            IfMissingThen { .. }
            | ElifMissingThen { .. }
            | UnclosedGrouping { .. }
            | UnclosedSubshell { .. }
            | UnclosedDoClause { .. }
            | MissingForBody { .. }
            | UnclosedWhileClause { .. }
            | UnclosedUntilClause { .. }
            | UnclosedIf { .. }
            | MissingIn { .. }
            | UnclosedCase { .. }
            | UnclosedDoubleBracket { .. }
            | UnclosedArithCommand { .. }
            | UnclosedArithFor { .. } => "E0202_MISSING_KEYWORD",
            EmptyGrouping | EmptySubshell | EmptyDoClause | EmptyWhileCondition
            | EmptyUntilCondition | EmptyIfCondition | EmptyIfBody | EmptyElifCondition
            | EmptyElifBody | EmptyElse | EmptyDoubleBracket => "E0203_EMPTY_BODY",
            MissingFunctionBody | InvalidFunctionBody => "E0204_INVALID_FUNCTION",
            _ => "E0201_UNEXPECTED_TOKEN",
        }
    }
}

/// Types of errors that may happen in parsing
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[non_exhaustive]
pub enum ErrorCause {
    /// Error in an underlying input function
    #[error("cannot read commands: {0}")]
    Io(String),
    /// Syntax error
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}

impl ErrorCause {
    /// Returns an error message describing the error cause.
    #[must_use]
    pub fn message(&self) -> Cow<'static, str> {
        match self {
            ErrorCause::Io(message) => format!("cannot read commands: {message}").into(),
            ErrorCause::Syntax(e) => e.message().into(),
        }
    }

    /// Returns a label for annotating the error location.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            ErrorCause::Io(_) => "error occurred here",
            ErrorCause::Syntax(e) => e.label(),
        }
    }

    /// Returns the stable identifier of this error cause.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCause::Io(_) => "E0001_IO",
            ErrorCause::Syntax(e) => e.code(),
        }
    }

    /// Returns a location related with the error cause and a message
    /// describing the location, if any.
    #[must_use]
    pub fn related_location(&self) -> Option<(&Location, &'static str)> {
        use SyntaxError::*;
        match self {
            ErrorCause::Io(_) => None,
            ErrorCause::Syntax(e) => match e {
                UnclosedParen { opening_location }
                | UnclosedSingleQuote { opening_location }
                | UnclosedDoubleQuote { opening_location }
                | UnclosedDollarSingleQuote { opening_location }
                | UnclosedParam { opening_location }
                | UnclosedCommandSubstitution { opening_location }
                | UnclosedBackquote { opening_location }
                | UnclosedArith { opening_location } => {
                    Some((opening_location, "the opening is here"))
                }
                UnclosedHereDocContent { redir_op_location } => {
                    Some((redir_op_location, "the here-document operator is here"))
                }
                UnclosedArrayValue { opening_location }
                | UnclosedGrouping { opening_location }
                | UnclosedSubshell { opening_location }
                | UnclosedDoClause { opening_location }
                | MissingForBody { opening_location }
                | UnclosedArithFor { opening_location }
                | UnclosedWhileClause { opening_location }
                | UnclosedUntilClause { opening_location }
                | MissingIn { opening_location }
                | UnclosedCase { opening_location }
                | UnclosedDoubleBracket { opening_location }
                | UnclosedArithCommand { opening_location }
                | UnclosedIf { opening_location } => {
                    Some((opening_location, "the command starts here"))
                }
                IfMissingThen { if_location } => Some((if_location, "the `if` is here")),
                ElifMissingThen { elif_location } => Some((elif_location, "the `elif` is here")),
                _ => None,
            },
        }
    }
}

/// Explanation of a failure in parsing
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("{cause}")]
pub struct Error {
    pub cause: ErrorCause,
    pub location: Location,
}

impl MessageBase for Error {
    fn message_title(&self) -> Cow<'_, str> {
        self.cause.message()
    }

    fn message_code(&self) -> Option<&'static str> {
        Some(self.cause.code())
    }

    fn main_annotation(&self) -> Annotation<'_> {
        Annotation::new(
            AnnotationType::Error,
            self.cause.label().into(),
            &self.location,
        )
    }

    fn additional_annotations<'a, T: Extend<Annotation<'a>>>(&'a self, results: &mut T) {
        if let Some((location, label)) = self.cause.related_location() {
            results.extend(std::iter::once(Annotation::new(
                AnnotationType::Info,
                label.into(),
                location,
            )));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::pretty::Message;

    #[test]
    fn error_message_and_code() {
        let error = Error {
            cause: SyntaxError::EmptyParam.into(),
            location: Location::dummy("${}"),
        };
        assert_eq!(error.to_string(), "the parameter name is missing");
        assert_eq!(error.cause.code(), "E0106_BAD_SUBSTITUTION");
    }

    #[test]
    fn error_to_message_with_related_location() {
        let opening_location = Location::dummy("'");
        let error = Error {
            cause: SyntaxError::UnclosedSingleQuote { opening_location }.into(),
            location: Location::dummy("x"),
        };
        let message = Message::from(&error);
        assert_eq!(message.title, "the single quote is not closed");
        assert_eq!(message.code, Some("E0101_UNTERMINATED_QUOTE"));
        assert_eq!(message.annotations.len(), 2);
        assert_eq!(message.annotations[0].label, "expected `'`");
        assert_eq!(message.annotations[1].label, "the opening is here");
    }
}
