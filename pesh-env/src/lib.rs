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

//! Shell execution environment interface for pesh
//!
//! This crate defines the part of the shell state that the
//! [expansion engine](../pesh_expand/index.html) reads and writes: the
//! [variable store](variable::VariableSet), the
//! [function table](function::FunctionSet), positional and special
//! parameters, and the [collaborator traits](exec) through which command
//! substitution, arithmetic evaluation, and pathname expansion reach the
//! rest of the shell.

pub mod exec;
pub mod function;
pub mod semantics;
pub mod variable;

use self::function::FunctionSet;
use self::semantics::ExitStatus;
use self::variable::VariableSet;
use std::path::PathBuf;

/// Whole shell state as seen by the word expansion
///
/// An `Env` owns the variable store, the function table, and the positional
/// and special parameters. It does not own any process-related resources;
/// running commands is delegated through the [`exec`] traits.
#[derive(Clone, Debug)]
pub struct Env {
    /// Variables
    pub variables: VariableSet,
    /// Functions
    pub functions: FunctionSet,
    /// Positional parameters (`$1` is `positional_params()[0]`)
    positional_params: Vec<String>,
    /// Exit status of the last command (`$?`)
    pub exit_status: ExitStatus,
    /// Process ID of the shell (`$$`)
    pub shell_pid: i32,
    /// Process ID of the last asynchronous command (`$!`), if any
    pub last_async_pid: Option<i32>,
    /// Name of the shell or shell script (`$0`)
    pub arg0: String,
    /// Currently active option flags (`$-`)
    pub option_flags: String,
    /// Working directory, used for pathname expansion
    pub working_dir: PathBuf,
}

impl Env {
    /// Creates a new environment with the given shell name.
    ///
    /// All other state starts out empty; the process IDs are zero until the
    /// surrounding program fills them in.
    #[must_use]
    pub fn new<S: Into<String>>(arg0: S) -> Env {
        Env {
            variables: VariableSet::new(),
            functions: FunctionSet::new(),
            positional_params: Vec::new(),
            exit_status: ExitStatus::SUCCESS,
            shell_pid: 0,
            last_async_pid: None,
            arg0: arg0.into(),
            option_flags: String::new(),
            working_dir: PathBuf::from("."),
        }
    }

    /// Returns the positional parameters.
    ///
    /// The parameter `$1` is the first element of the returned slice.
    #[must_use]
    pub fn positional_params(&self) -> &[String] {
        &self.positional_params
    }

    /// Replaces the positional parameters.
    pub fn set_positional_params(&mut self, params: Vec<String>) {
        self.positional_params = params;
    }

    /// Returns the value of the `IFS` variable.
    ///
    /// The result is `None` when the variable is unset, in which case field
    /// splitting uses the default separators.
    #[must_use]
    pub fn ifs(&self) -> Option<&str> {
        self.variables.get_scalar("IFS")
    }
}
