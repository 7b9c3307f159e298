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

//! Basic types of command execution semantics

use pesh_syntax::source::Location;
use std::fmt;

/// Result of command execution
///
/// This is the `newtype` pattern applied to `i32`, which is how the wait
/// status is represented on POSIX systems.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ExitStatus(pub i32);

impl ExitStatus {
    /// Exit status of a successful command
    pub const SUCCESS: ExitStatus = ExitStatus(0);
    /// Typical exit status of a failed command
    pub const FAILURE: ExitStatus = ExitStatus(1);
    /// Exit status the shell uses for syntax errors
    pub const ERROR: ExitStatus = ExitStatus(2);

    /// Tests whether the exit status denotes success.
    #[must_use]
    pub fn is_successful(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<i32> for ExitStatus {
    fn from(value: i32) -> ExitStatus {
        ExitStatus(value)
    }
}

/// String that results from expanding a word
///
/// A field is a string accompanied by the location of the word it was
/// expanded from, so that errors in later processing can still point into
/// the source code.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Field {
    /// Value of the field
    pub value: String,
    /// Location of the word this field resulted from
    pub origin: Location,
}

impl Field {
    /// Creates a field with a dummy location, for tests.
    #[must_use]
    pub fn dummy<S: Into<String>>(value: S) -> Field {
        let value = value.into();
        let origin = Location::dummy(value.clone());
        Field { value, origin }
    }

    /// Creates an array of fields with dummy locations, for tests.
    #[must_use]
    pub fn dummies<I, S>(values: I) -> Vec<Field>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        values.into_iter().map(Field::dummy).collect()
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value.fmt(f)
    }
}
