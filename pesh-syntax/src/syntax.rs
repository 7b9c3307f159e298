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

//! Shell command language syntax
//!
//! This module contains types that represent abstract syntax trees (ASTs) of
//! the shell language.
//!
//! ## Syntactic elements
//!
//! The AST type that represents a whole script is [`List`], which is a vector
//! of [`Item`]s. An `Item` is a possibly asynchronous [`AndOrList`], which is
//! a sequence of conditionally executed [`Pipeline`]s. A `Pipeline` is a
//! sequence of [`Command`]s separated by `|`.
//!
//! There are several types of `Command`s, namely [`SimpleCommand`],
//! [`CompoundCommand`] and [`FunctionDefinition`], where `CompoundCommand` in
//! turn comes in many variants. Any compound command can be used wherever a
//! simple command can, including as a pipeline stage.
//!
//! ## Lexical elements
//!
//! Tokens that make up commands may contain quotations and expansions. A
//! [`Word`], a sequence of [`WordUnit`]s, represents such a token. In some
//! contexts quotes are not recognized but other expansions are; such a part
//! is represented as [`Text`], a sequence of [`TextUnit`]s.
//!
//! ## Parsing and displaying
//!
//! Most AST types implement [`FromStr`](std::str::FromStr), so you can get an
//! AST by calling `parse` on a `&str`. Locations in ASTs constructed this way
//! have an [unknown source](crate::source::Source::Unknown). Most AST types
//! also implement [`Display`](std::fmt::Display), producing single-line
//! source code with here-document contents omitted.

use crate::source::Location;
use std::cell::OnceCell;
use std::rc::Rc;

/// Special parameter
///
/// This enum value identifies a special parameter in the shell language.
/// Each special parameter is a single character that has a special meaning in
/// the shell language. For example, `@` represents all positional parameters.
///
/// See [`ParamType`] for other types of parameters.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SpecialParam {
    /// `@` (all positional parameters)
    At,
    /// `*` (all positional parameters)
    Asterisk,
    /// `#` (number of positional parameters)
    Number,
    /// `?` (exit status of the last command)
    Question,
    /// `-` (active shell options)
    Hyphen,
    /// `$` (process ID of the shell)
    Dollar,
    /// `!` (process ID of the last asynchronous command)
    Exclamation,
    /// `0` (name of the shell or shell script)
    Zero,
}

impl SpecialParam {
    /// Returns the special parameter for the given character, if any.
    #[must_use]
    pub fn from_char(c: char) -> Option<SpecialParam> {
        use SpecialParam::*;
        match c {
            '@' => Some(At),
            '*' => Some(Asterisk),
            '#' => Some(Number),
            '?' => Some(Question),
            '-' => Some(Hyphen),
            '$' => Some(Dollar),
            '!' => Some(Exclamation),
            '0' => Some(Zero),
            _ => None,
        }
    }

    /// Returns the character that represents this special parameter.
    #[must_use]
    pub const fn as_char(self) -> char {
        use SpecialParam::*;
        match self {
            At => '@',
            Asterisk => '*',
            Number => '#',
            Question => '?',
            Hyphen => '-',
            Dollar => '$',
            Exclamation => '!',
            Zero => '0',
        }
    }
}

/// Type of a parameter
///
/// This enum distinguishes three types of [parameters](Param): named, special
/// and positional parameters. The actual parameter name as a string is stored
/// in a separate field in the AST node that contains this value.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ParamType {
    /// Named parameter (a variable)
    Variable,
    /// Special parameter
    Special(SpecialParam),
    /// Positional parameter
    ///
    /// Positional parameters are indexed starting from 1, so the index of `0`
    /// always refers to a non-existent parameter. If the string form of a
    /// positional parameter represents an index that is too large to fit in a
    /// `usize`, the index should be `usize::MAX`, which is also guaranteed to
    /// spot a non-existent parameter since a `Vec` cannot have more than
    /// `isize::MAX` elements.
    Positional(usize),
}

impl From<SpecialParam> for ParamType {
    fn from(special: SpecialParam) -> ParamType {
        ParamType::Special(special)
    }
}

/// Parameter
///
/// A parameter is an identifier that appears in a parameter expansion
/// ([`TextUnit::RawParam`] and [`BracedParam`]).
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Param {
    /// Literal representation of the parameter name
    ///
    /// This is the raw string form of the parameter as it appears in the
    /// source code. Examples include `foo`, `@`, `#`, `0`, and `12`.
    pub id: String,

    /// Type of the parameter
    ///
    /// This precomputed value must be consistent with the `id` field. The
    /// [parser](crate::parser) ensures this invariant when it constructs a
    /// `Param` value.
    pub r#type: ParamType,
}

impl Param {
    /// Creates a parameter that refers to a variable of the given name.
    #[must_use]
    pub fn variable<S: Into<String>>(name: S) -> Param {
        Param {
            id: name.into(),
            r#type: ParamType::Variable,
        }
    }
}

impl From<SpecialParam> for Param {
    fn from(special: SpecialParam) -> Param {
        Param {
            id: special.as_char().to_string(),
            r#type: special.into(),
        }
    }
}

/// Flag that specifies how the value is substituted in a [switch](Switch)
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SwitchType {
    /// Alter an existing value, if any. (`+`)
    Alter,
    /// Substitute a missing value with a default. (`-`)
    Default,
    /// Assign a default to the variable if the value is missing. (`=`)
    Assign,
    /// Error out if the value is missing. (`?`)
    Error,
}

/// Condition that triggers a [switch](Switch)
///
/// In the lexical grammar of the shell language, a switch condition is an
/// optional colon that precedes a switch type.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SwitchCondition {
    /// Without a colon, the switch is triggered if the parameter is unset.
    Unset,
    /// With a colon, the switch is triggered if the parameter is unset or
    /// empty.
    UnsetOrEmpty,
}

/// Parameter expansion [modifier](Modifier) that conditionally substitutes
/// the value being expanded
///
/// Examples of switches include `+foo`, `:-bar` and `:=baz`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Switch {
    /// How the value is substituted
    pub r#type: SwitchType,
    /// Condition that determines whether the value is substituted or not
    pub condition: SwitchCondition,
    /// Word that substitutes the parameter value
    pub word: Word,
}

/// Flag that specifies which side of the expanded value is removed in a
/// [trim](Trim)
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TrimSide {
    /// Beginning of the value
    Prefix,
    /// End of the value
    Suffix,
}

/// Flag that specifies pattern matching strategy in a [trim](Trim)
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TrimLength {
    /// Match as small number of characters as possible.
    Shortest,
    /// Match as large number of characters as possible.
    Longest,
}

/// Parameter expansion [modifier](Modifier) that removes the beginning or end
/// of the value being expanded
///
/// Examples of trims include `#foo`, `##bar` and `%%baz*`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Trim {
    /// Which side of the value should be removed?
    pub side: TrimSide,
    /// How long the pattern should match?
    pub length: TrimLength,
    /// Pattern to be matched with the expanded value.
    pub pattern: Word,
}

/// Parameter expansion [modifier](Modifier) that replaces matches of a
/// pattern in the value being expanded
///
/// Examples include `/foo/bar` and `//foo`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Subst {
    /// Pattern whose matches are replaced
    pub pattern: Word,
    /// Replacement string; an absent replacement deletes the matches
    pub replacement: Option<Word>,
    /// Whether all matches are replaced (`//`) or only the first (`/`)
    pub all: bool,
}

/// Scope of a [case conversion](CaseConv)
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CaseScope {
    /// Only the first character is converted (`^`, `,`)
    First,
    /// All characters are converted (`^^`, `,,`)
    All,
}

/// Direction of a [case conversion](CaseConv)
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CaseDirection {
    /// To upper case (`^`)
    Upper,
    /// To lower case (`,`)
    Lower,
}

/// Parameter expansion [modifier](Modifier) that converts the character case
/// of the value being expanded
///
/// Examples include `^`, `^^`, `,` and `,,`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CaseConv {
    /// How many characters are converted
    pub scope: CaseScope,
    /// Whether characters are upper- or lower-cased
    pub direction: CaseDirection,
}

/// Parameter expansion [modifier](Modifier) that extracts a substring of the
/// value being expanded
///
/// Examples include `:2`, `:1:3` and `: -1`. The offset and length are
/// arithmetic expressions, evaluated when the expansion is performed. A
/// negative offset counts from the end of the value.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Slice {
    /// Expression that computes the starting offset
    pub offset: Text,
    /// Expression that computes the length; absent means "to the end"
    pub length: Option<Text>,
}

/// Attribute that modifies a parameter expansion
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Modifier {
    /// No modifier
    None,
    /// `#` prefix (`${#foo}`)
    Length,
    /// `+`, `-`, `=` or `?` suffix, optionally with `:` (`${foo:-bar}`)
    Switch(Switch),
    /// `#`, `##`, `%` or `%%` suffix (`${foo##bar}`)
    Trim(Trim),
    /// `/` or `//` suffix (`${foo/bar/baz}`)
    Subst(Subst),
    /// `^`, `^^`, `,` or `,,` suffix (`${foo^^}`)
    CaseConv(CaseConv),
    /// `:offset` or `:offset:length` suffix (`${foo:1:2}`)
    Slice(Slice),
}

/// Subscript of an array parameter (`${foo[...]}`)
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParamIndex {
    /// `[@]` (all elements, as separate fields when quoted)
    At,
    /// `[*]` (all elements, joined into one field when quoted)
    Asterisk,
    /// Any other subscript
    ///
    /// For an indexed array, the subscript is evaluated as an arithmetic
    /// expression; for an associative array, it expands to the key string.
    Value(Word),
}

/// Effect of a leading `!` in a braced parameter expansion
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Indirection {
    /// `${!var}` (expand the variable named by the value of `var`)
    Variable,
    /// `${!prefix*}` or `${!prefix@}` (names of variables with the prefix)
    NamePrefix(PrefixMatchMode),
}

/// How the names produced by `${!prefix*}`/`${!prefix@}` are combined
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PrefixMatchMode {
    /// `*` (joined into one field when quoted)
    Asterisk,
    /// `@` (separate fields even when quoted)
    At,
}

/// Parameter expansion enclosed in braces
///
/// This struct is used only for parameter expansions that are enclosed in
/// braces. Expansions that are not enclosed in braces are directly encoded
/// with [`TextUnit::RawParam`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BracedParam {
    /// Parameter to be expanded
    pub param: Param,
    /// Subscript, if the expansion refers to an array element
    pub index: Option<ParamIndex>,
    /// Effect of a leading `!`, if any
    pub indirection: Option<Indirection>,
    /// Modifier
    pub modifier: Modifier,
    /// Position of this parameter expansion in the source code
    pub location: Location,
}

/// Element of [`TextUnit::Backquote`]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BackquoteUnit {
    /// Literal single character
    Literal(char),
    /// Backslash-escaped single character
    Backslashed(char),
}

/// Element of a [Text], i.e., something that can be expanded
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TextUnit {
    /// Literal single character
    Literal(char),
    /// Backslash-escaped single character
    Backslashed(char),
    /// Parameter expansion that is not enclosed in braces
    RawParam {
        /// Parameter to be expanded
        param: Param,
        /// Position of this parameter expansion in the source code
        location: Location,
    },
    /// Parameter expansion that is enclosed in braces
    BracedParam(BracedParam),
    /// Command substitution of the form `$(...)`
    CommandSubst {
        /// Command string that will be parsed and executed when the command
        /// substitution is expanded
        ///
        /// This value is reference-counted so that the shell does not have to
        /// clone the entire string when it is passed to the command runner.
        content: Rc<str>,
        /// Position of this command substitution in the source code
        location: Location,
    },
    /// Command substitution of the form `` `...` ``
    Backquote {
        /// Command string that will be parsed and executed when the command
        /// substitution is expanded
        content: Vec<BackquoteUnit>,
        /// Position of this command substitution in the source code
        location: Location,
    },
    /// Arithmetic expansion
    Arith {
        /// Expression that is to be evaluated
        content: Text,
        /// Position of this arithmetic expansion in the source code
        location: Location,
    },
}

pub use TextUnit::*;

/// String that may contain some expansions
///
/// A text is a sequence of [text unit](TextUnit)s, which may contain some
/// kinds of expansions.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Text(pub Vec<TextUnit>);

impl Text {
    /// Creates a text from an iterator of characters, treating every
    /// character as a literal.
    pub fn from_literal_chars<I: IntoIterator<Item = char>>(i: I) -> Text {
        Text(i.into_iter().map(Literal).collect())
    }
}

/// Element of an [`EscapedString`]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum EscapeUnit {
    /// Literal single character
    Literal(char),
    /// Backslash-escaped double-quote character (`\"`)
    DoubleQuote,
    /// Backslash-escaped single-quote character (`\'`)
    SingleQuote,
    /// Backslash-escaped backslash character (`\\`)
    Backslash,
    /// Backslash notation for the bell character (`\a`, ASCII 7)
    Alert,
    /// Backslash notation for the backspace character (`\b`, ASCII 8)
    Backspace,
    /// Backslash notation for the escape character (`\e`, ASCII 27)
    Escape,
    /// Backslash notation for the form feed character (`\f`, ASCII 12)
    FormFeed,
    /// Backslash notation for the newline character (`\n`, ASCII 10)
    Newline,
    /// Backslash notation for the carriage return character (`\r`, ASCII 13)
    CarriageReturn,
    /// Backslash notation for the horizontal tab character (`\t`, ASCII 9)
    Tab,
    /// Backslash notation for the vertical tab character (`\v`, ASCII 11)
    VerticalTab,
    /// Control character notation (`\c...`)
    ///
    /// The associated value is the control character represented by the
    /// following character in the input.
    Control(u8),
    /// Single-byte octal notation (`\OOO`)
    Octal(u8),
    /// Single-byte hexadecimal notation (`\xHH`)
    Hex(u8),
    /// Unicode notation (`\uHHHH` or `\UHHHHHHHH`)
    Unicode(char),
}

/// String that may contain some escapes
///
/// An escaped string is a sequence of [escape unit](EscapeUnit)s. This type
/// is used for the value of a [dollar-single-quoted
/// string](WordUnit::DollarSingleQuote).
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct EscapedString(pub Vec<EscapeUnit>);

/// Direction of a process substitution
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProcSubstDirection {
    /// `<(...)` (the command's output is readable through the resulting path)
    In,
    /// `>(...)` (the command's input is writable through the resulting path)
    Out,
}

/// Element of a [Word], i.e., text with quotes and tilde expansion
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum WordUnit {
    /// Unquoted [`TextUnit`] as a word unit
    Unquoted(TextUnit),
    /// String surrounded with a pair of single quotations
    SingleQuote(String),
    /// Text surrounded with a pair of double quotations
    DoubleQuote(Text),
    /// String surrounded with a pair of single quotations and preceded by a
    /// dollar sign
    DollarSingleQuote(EscapedString),
    /// Tilde expansion
    ///
    /// The `String` value does not contain the initial tilde.
    Tilde(String),
    /// Process substitution (`<(...)` or `>(...)`)
    ProcSubst {
        /// Direction of the substitution
        direction: ProcSubstDirection,
        /// Command string that will be parsed and executed when the process
        /// substitution is expanded
        content: Rc<str>,
        /// Position of this process substitution in the source code
        location: Location,
    },
}

pub use WordUnit::*;

/// Token that may involve expansions and quotes
///
/// A word is a sequence of [word unit](WordUnit)s. It depends on context
/// whether an empty word is valid or not. It is your responsibility to ensure
/// a word is non-empty in a context where it cannot.
///
/// The difference between words and [text](Text)s is that only words can
/// contain single- and double-quotes and tilde expansions. Compare
/// [`WordUnit`] and [`TextUnit`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Word {
    /// Word units that constitute the word
    pub units: Vec<WordUnit>,
    /// Position of the word in the source code
    pub location: Location,
}

/// Operator of an [assignment](Assign)
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AssignOp {
    /// `=` (assign)
    Assign,
    /// `+=` (append)
    Append,
}

/// Value of an [assignment](Assign)
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Value {
    /// Scalar value, a possibly empty word
    Scalar(Word),
    /// Array, possibly empty list of non-empty words
    ///
    /// Array assignment is a POSIXly non-portable extension.
    Array(Vec<Word>),
}

pub use Value::*;

/// Assignment word
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Assign {
    /// Name of the variable to assign to
    ///
    /// In the valid assignment syntax, the name must not be empty.
    pub name: String,
    /// Subscript of the array element to assign to, if any
    ///
    /// The subscript may contain quotes and expansions, as in
    /// `a["key"]=v`.
    pub index: Option<Word>,
    /// Whether the value assigns or appends
    pub operator: AssignOp,
    /// Value assigned to the variable
    pub value: Value,
    /// Location of the assignment word
    pub location: Location,
}

/// File descriptor
///
/// This is the `newtype` pattern applied to `i32`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Fd(pub i32);

impl Fd {
    /// File descriptor for the standard input
    pub const STDIN: Fd = Fd(0);
    /// File descriptor for the standard output
    pub const STDOUT: Fd = Fd(1);
    /// File descriptor for the standard error
    pub const STDERR: Fd = Fd(2);
}

/// Redirection operators
///
/// This enum defines the redirection operator types except here-documents.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RedirOp {
    /// `<` (open a file for input)
    FileIn,
    /// `<>` (open a file for input and output)
    FileInOut,
    /// `>` (open a file for output; truncate or fail if existing)
    FileOut,
    /// `>>` (open a file for output; append if existing)
    FileAppend,
    /// `>|` (open a file for output; always truncate if existing)
    FileClobber,
    /// `<&` (copy or close a file descriptor for input)
    FdIn,
    /// `>&` (copy or close a file descriptor for output)
    FdOut,
    /// `<<<` (here-string)
    HereString,
}

/// Here-document
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HereDoc {
    /// Token that marks the end of the content of the here-document
    pub delimiter: Word,

    /// Whether leading tab characters should be removed from each line of the
    /// here-document content
    ///
    /// This value is `true` for the `<<-` operator and `false` for `<<`.
    pub remove_tabs: bool,

    /// Content of the here-document
    ///
    /// The content ends with a newline unless it is empty. If the delimiter
    /// is quoted, the content is all literal; otherwise it may contain
    /// expansions. If `remove_tabs` is `true`, leading tabs have been removed
    /// from each content line.
    ///
    /// This value is wrapped in `OnceCell` because the here-doc content is
    /// parsed separately from the here-doc operator. When the operator is
    /// parsed, the `HereDoc` instance is created with an empty content. The
    /// content is filled to the cell when it is parsed later.
    pub content: OnceCell<Text>,
}

/// Part of a redirection that defines the nature of the resulting file
/// descriptor
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RedirBody {
    /// Normal redirection
    Normal { operator: RedirOp, operand: Word },
    /// Here-document
    HereDoc(Rc<HereDoc>),
}

impl RedirBody {
    /// Returns the operand word of the redirection.
    pub fn operand(&self) -> &Word {
        match self {
            RedirBody::Normal { operand, .. } => operand,
            RedirBody::HereDoc(here_doc) => &here_doc.delimiter,
        }
    }
}

impl<T: Into<Rc<HereDoc>>> From<T> for RedirBody {
    fn from(t: T) -> Self {
        RedirBody::HereDoc(t.into())
    }
}

/// Redirection
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Redir {
    /// File descriptor that is modified by this redirection
    pub fd: Option<Fd>,
    /// Nature of the resulting file descriptor
    pub body: RedirBody,
}

impl Redir {
    /// Computes the file descriptor that is modified by this redirection.
    ///
    /// If `self.fd` is `Some(_)`, its value is returned intact. Otherwise,
    /// the default file descriptor is selected depending on the type of
    /// `self.body`.
    pub fn fd_or_default(&self) -> Fd {
        use RedirOp::*;
        self.fd.unwrap_or(match self.body {
            RedirBody::Normal { operator, .. } => match operator {
                FileIn | FileInOut | FdIn | HereString => Fd::STDIN,
                FileOut | FileAppend | FileClobber | FdOut => Fd::STDOUT,
            },
            RedirBody::HereDoc { .. } => Fd::STDIN,
        })
    }
}

/// Command that involves assignments, redirections, and word expansions
///
/// In the shell language syntax, a valid simple command must contain at least
/// one of assignments, redirections, and words. The parser must not produce a
/// completely empty simple command.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SimpleCommand {
    /// Assignments
    pub assigns: Vec<Assign>,
    /// Command name and arguments
    pub words: Vec<Word>,
    /// Redirections
    pub redirs: Vec<Redir>,
}

impl SimpleCommand {
    /// Returns true if the simple command does not contain any assignments,
    /// words, or redirections.
    pub fn is_empty(&self) -> bool {
        self.assigns.is_empty() && self.words.is_empty() && self.redirs.is_empty()
    }
}

/// `elif-then` clause
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ElifThen {
    pub condition: List,
    pub body: List,
}

/// Symbol that terminates the body of a case branch and determines what to do
/// after executing it
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum CaseContinuation {
    /// `;;` (terminate the case construct)
    #[default]
    Break,
    /// `;&` (unconditionally execute the body of the next case branch)
    FallThrough,
    /// `;;&` (resume with the next case branch, performing pattern matching
    /// again)
    Continue,
}

/// Branch item of a `case` compound command
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CaseItem {
    /// Array of patterns that are matched against the main word of the case
    /// compound command to decide if the body of this item should be executed
    ///
    /// A syntactically valid case item must have at least one pattern.
    pub patterns: Vec<Word>,
    /// Commands that are executed if any of the patterns matched
    pub body: List,
    /// What to do after executing the body of this item
    pub continuation: CaseContinuation,
}

/// Unary operator usable in a `[[ ... ]]` command
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum UnaryTestOp {
    /// `-e` (the file exists)
    Exists,
    /// `-f` (the file is a regular file)
    IsRegular,
    /// `-d` (the file is a directory)
    IsDirectory,
    /// `-r` (the file is readable)
    IsReadable,
    /// `-w` (the file is writable)
    IsWritable,
    /// `-x` (the file is executable)
    IsExecutable,
    /// `-s` (the file has a size greater than zero)
    IsNonEmptyFile,
    /// `-t` (the file descriptor is a terminal)
    IsTerminal,
    /// `-z` (the string is empty)
    IsEmptyString,
    /// `-n` (the string is non-empty)
    IsNonEmptyString,
}

impl UnaryTestOp {
    /// Returns the literal string representation of the operator.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        use UnaryTestOp::*;
        match self {
            Exists => "-e",
            IsRegular => "-f",
            IsDirectory => "-d",
            IsReadable => "-r",
            IsWritable => "-w",
            IsExecutable => "-x",
            IsNonEmptyFile => "-s",
            IsTerminal => "-t",
            IsEmptyString => "-z",
            IsNonEmptyString => "-n",
        }
    }

    /// Returns the operator for the given literal string, if any.
    #[must_use]
    pub fn from_str_opt(s: &str) -> Option<UnaryTestOp> {
        use UnaryTestOp::*;
        match s {
            "-e" => Some(Exists),
            "-f" => Some(IsRegular),
            "-d" => Some(IsDirectory),
            "-r" => Some(IsReadable),
            "-w" => Some(IsWritable),
            "-x" => Some(IsExecutable),
            "-s" => Some(IsNonEmptyFile),
            "-t" => Some(IsTerminal),
            "-z" => Some(IsEmptyString),
            "-n" => Some(IsNonEmptyString),
            _ => None,
        }
    }
}

/// Binary operator usable in a `[[ ... ]]` command
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BinaryTestOp {
    /// `==` or `=` (pattern match)
    Equal,
    /// `!=` (pattern mismatch)
    NotEqual,
    /// `=~` (regular expression match)
    Match,
    /// `<` (lexicographically less than)
    LessThan,
    /// `>` (lexicographically greater than)
    GreaterThan,
    /// `-eq` (arithmetically equal)
    ArithEqual,
    /// `-ne` (arithmetically not equal)
    ArithNotEqual,
    /// `-lt` (arithmetically less than)
    ArithLessThan,
    /// `-le` (arithmetically less than or equal)
    ArithLessEqual,
    /// `-gt` (arithmetically greater than)
    ArithGreaterThan,
    /// `-ge` (arithmetically greater than or equal)
    ArithGreaterEqual,
    /// `-nt` (newer than)
    NewerThan,
    /// `-ot` (older than)
    OlderThan,
    /// `-ef` (same file)
    SameFile,
}

impl BinaryTestOp {
    /// Returns the literal string representation of the operator.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        use BinaryTestOp::*;
        match self {
            Equal => "==",
            NotEqual => "!=",
            Match => "=~",
            LessThan => "<",
            GreaterThan => ">",
            ArithEqual => "-eq",
            ArithNotEqual => "-ne",
            ArithLessThan => "-lt",
            ArithLessEqual => "-le",
            ArithGreaterThan => "-gt",
            ArithGreaterEqual => "-ge",
            NewerThan => "-nt",
            OlderThan => "-ot",
            SameFile => "-ef",
        }
    }

    /// Returns the operator for the given literal string, if any.
    #[must_use]
    pub fn from_str_opt(s: &str) -> Option<BinaryTestOp> {
        use BinaryTestOp::*;
        match s {
            "==" | "=" => Some(Equal),
            "!=" => Some(NotEqual),
            "=~" => Some(Match),
            "<" => Some(LessThan),
            ">" => Some(GreaterThan),
            "-eq" => Some(ArithEqual),
            "-ne" => Some(ArithNotEqual),
            "-lt" => Some(ArithLessThan),
            "-le" => Some(ArithLessEqual),
            "-gt" => Some(ArithGreaterThan),
            "-ge" => Some(ArithGreaterEqual),
            "-nt" => Some(NewerThan),
            "-ot" => Some(OlderThan),
            "-ef" => Some(SameFile),
            _ => None,
        }
    }
}

/// Expression inside a `[[ ... ]]` command
///
/// The operator precedence is `!` first, then `&&`, then `||`; parentheses
/// group sub-expressions.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TestExpr {
    /// Single word (true if the expanded string is non-empty)
    Word(Word),
    /// Unary operator applied to a word
    Unary {
        op: UnaryTestOp,
        operand: Word,
    },
    /// Binary operator applied to two words
    Binary {
        op: BinaryTestOp,
        lhs: Word,
        rhs: Word,
    },
    /// Logical negation (`!`)
    Not(Box<TestExpr>),
    /// Logical conjunction (`&&`)
    And(Box<TestExpr>, Box<TestExpr>),
    /// Logical disjunction (`||`)
    Or(Box<TestExpr>, Box<TestExpr>),
    /// Parenthesized sub-expression
    Group(Box<TestExpr>),
}

/// Command that contains other commands
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CompoundCommand {
    /// List as a command (`{ ...; }`)
    Grouping(List),
    /// Command for executing commands in a subshell (`(...)`)
    Subshell { body: List, location: Location },
    /// For loop over a word list
    For {
        name: Word,
        values: Option<Vec<Word>>,
        body: List,
    },
    /// C-style for loop (`for ((init; cond; update))`)
    ///
    /// Each of the three head expressions is the raw arithmetic text; an
    /// empty section is `None`. A missing condition is treated as true.
    ArithFor {
        init: Option<String>,
        condition: Option<String>,
        update: Option<String>,
        body: List,
        location: Location,
    },
    /// While loop
    While { condition: List, body: List },
    /// Until loop
    Until { condition: List, body: List },
    /// If conditional construct
    If {
        condition: List,
        body: List,
        elifs: Vec<ElifThen>,
        r#else: Option<List>,
    },
    /// Case conditional construct
    Case { subject: Word, items: Vec<CaseItem> },
    /// Select loop
    Select {
        name: Word,
        values: Option<Vec<Word>>,
        body: List,
    },
    /// Arithmetic command (`((...))`)
    Arith { expr: String, location: Location },
    /// Extended test command (`[[ ... ]]`)
    DoubleBracket(TestExpr),
}

/// Compound command with redirections
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FullCompoundCommand {
    /// The main part
    pub command: CompoundCommand,
    /// Redirections
    pub redirs: Vec<Redir>,
}

/// Function definition command
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FunctionDefinition {
    /// Whether the function definition command starts with the `function`
    /// reserved word
    pub has_keyword: bool,
    /// Function name
    pub name: Word,
    /// Function body
    pub body: Rc<FullCompoundCommand>,
}

/// Element of a pipe sequence
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Command {
    /// Simple command
    Simple(SimpleCommand),
    /// Compound command
    Compound(FullCompoundCommand),
    /// Function definition command
    Function(FunctionDefinition),
}

/// Commands separated by `|`
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pipeline {
    /// Elements of the pipeline
    ///
    /// A valid pipeline must have at least one command.
    pub commands: Vec<Rc<Command>>,
    /// Whether the pipeline begins with a `!`
    pub negation: bool,
    /// Whether the pipeline begins with the `time` reserved word
    pub timed: bool,
}

/// Condition that decides if a [Pipeline] in an [and-or list](AndOrList)
/// should be executed
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AndOr {
    /// `&&`
    AndThen,
    /// `||`
    OrElse,
}

/// Pipelines separated by `&&` and `||`
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AndOrList {
    pub first: Pipeline,
    pub rest: Vec<(AndOr, Pipeline)>,
}

/// Element of a [List]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Item {
    /// Main part of this item
    pub and_or: AndOrList,
    /// Location of the `&` operator for this item, if any
    pub async_flag: Option<Location>,
}

/// Sequence of [and-or lists](AndOrList) separated by `;` or `&`
///
/// It depends on context whether an empty list is a valid syntax.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct List(pub Vec<Item>);

/// Definitions of the [Unquote] and [MaybeLiteral] traits and other
/// conversions between types
mod conversions;
/// Implementations of [std::fmt::Display] for the shell language syntax types
mod impl_display;

pub use conversions::{MaybeLiteral, Unquote};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn special_param_char_round_trip() {
        for c in "@*#?-$!0".chars() {
            let param = SpecialParam::from_char(c).unwrap();
            assert_eq!(param.as_char(), c);
        }
        assert_eq!(SpecialParam::from_char('a'), None);
        assert_eq!(SpecialParam::from_char('1'), None);
    }

    #[test]
    fn redir_fd_or_default() {
        let operand = Word {
            units: vec![],
            location: crate::source::Location::dummy("file"),
        };
        let redir = Redir {
            fd: None,
            body: RedirBody::Normal {
                operator: RedirOp::FileIn,
                operand: operand.clone(),
            },
        };
        assert_eq!(redir.fd_or_default(), Fd::STDIN);

        let redir = Redir {
            fd: None,
            body: RedirBody::Normal {
                operator: RedirOp::FileAppend,
                operand: operand.clone(),
            },
        };
        assert_eq!(redir.fd_or_default(), Fd::STDOUT);

        let redir = Redir {
            fd: Some(Fd(5)),
            body: RedirBody::Normal {
                operator: RedirOp::FileOut,
                operand,
            },
        };
        assert_eq!(redir.fd_or_default(), Fd(5));
    }

    #[test]
    fn binary_test_op_equal_aliases() {
        assert_eq!(BinaryTestOp::from_str_opt("="), Some(BinaryTestOp::Equal));
        assert_eq!(BinaryTestOp::from_str_opt("=="), Some(BinaryTestOp::Equal));
        assert_eq!(BinaryTestOp::from_str_opt("=x"), None);
    }
}
