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

//! Collaborator interfaces for command execution
//!
//! The word expansion needs to run commands (for command and process
//! substitution), evaluate arithmetic expressions, and match patterns
//! against the file system. All three concerns live behind traits defined
//! here, so that the expansion engine never touches processes or the file
//! system itself. The surrounding program supplies implementations; tests
//! use simple doubles.

use crate::Env;
use crate::semantics::ExitStatus;
use pesh_syntax::syntax::List;
use pesh_syntax::syntax::ProcSubstDirection;
use std::path::Path;
use thiserror::Error;

/// Output of a captured command execution
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Capture {
    /// Bytes the command wrote to its standard output
    pub stdout: Vec<u8>,
    /// Exit status of the command
    pub exit_status: ExitStatus,
}

/// Error in running a command on behalf of the expansion
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[non_exhaustive]
pub enum RunError {
    /// The runner could not start the command.
    #[error("cannot run the command: {0}")]
    Failed(String),
    /// The runner does not support process substitution on this system.
    #[error("process substitution is not supported")]
    ProcSubstUnsupported,
}

/// Executor of commands on behalf of the word expansion
///
/// A command substitution runs its content in a subshell-like context:
/// the runner may read the current shell state, but assignments made by the
/// substituted command must not escape into the calling environment.
pub trait CommandRunner {
    /// Runs the given commands and captures their standard output.
    fn run_capture(&mut self, commands: &List, stdin: Option<&[u8]>)
    -> Result<Capture, RunError>;

    /// Runs the given commands asynchronously, connected to a path.
    ///
    /// The returned string is a file system path (a FIFO or a `/dev/fd`
    /// entry, at the runner's choice) whose reads or writes connect to the
    /// command's standard output or input, depending on `direction`.
    fn run_proc_sub(
        &mut self,
        commands: &List,
        direction: ProcSubstDirection,
    ) -> Result<String, RunError>;
}

/// Error in evaluating an arithmetic expression
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[non_exhaustive]
pub enum ArithError {
    /// The expression divides by zero.
    #[error("division by zero")]
    DivisionByZero,
    /// The expression is not syntactically valid arithmetic.
    #[error("invalid arithmetic expression: {0}")]
    InvalidExpression(String),
    /// The expression overflows the 64-bit signed integer range.
    #[error("arithmetic overflow")]
    Overflow,
}

/// Evaluator of arithmetic expressions
///
/// The expression text has already had parameter expansion and command
/// substitution applied when it reaches the evaluator. The evaluator may
/// read and assign shell variables (for `x = ...` and `x++` forms).
pub trait ArithmeticEvaluator {
    /// Evaluates an expression to a signed 64-bit integer.
    fn eval(&self, expression: &str, env: &mut Env) -> Result<i64, ArithError>;
}

/// Matcher of pathname patterns against the file system
pub trait Globber {
    /// Expands a pattern to the matching pathnames.
    ///
    /// The pattern uses POSIX glob syntax with quoted characters escaped by
    /// backslashes. An empty result means no pathname matched; the caller
    /// then uses the pattern itself, unchanged.
    fn glob(&mut self, pattern: &str, dir: &Path) -> Vec<String>;
}
