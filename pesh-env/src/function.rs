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

//! Function table
//!
//! Functions are stored by value in a table keyed by name; recursive calls
//! look up the name again at call time, so no cyclic references are needed.

use itertools::Itertools;
use pesh_syntax::source::Location;
use pesh_syntax::syntax::FullCompoundCommand;
use std::collections::HashMap;
use std::rc::Rc;

/// Definition of a shell function
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Function {
    /// Name of the function
    pub name: String,
    /// Command that is executed when the function is called
    pub body: Rc<FullCompoundCommand>,
    /// Location of the function definition command
    pub origin: Option<Location>,
}

/// Collection of functions
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FunctionSet {
    all: HashMap<String, Function>,
}

impl FunctionSet {
    /// Creates an empty function set.
    #[must_use]
    pub fn new() -> FunctionSet {
        FunctionSet::default()
    }

    /// Returns the function with the given name, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Function> {
        self.all.get(name)
    }

    /// Defines a function, replacing any previous definition with the same
    /// name.
    pub fn define(&mut self, function: Function) {
        self.all.insert(function.name.clone(), function);
    }

    /// Removes the function with the given name.
    pub fn unset(&mut self, name: &str) -> Option<Function> {
        self.all.remove(name)
    }

    /// Returns the names of all defined functions, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.all.keys().cloned().sorted().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn function(name: &str, body: &str) -> Function {
        Function {
            name: name.to_string(),
            body: Rc::new(body.parse().unwrap()),
            origin: None,
        }
    }

    #[test]
    fn function_set_define_and_get() {
        let mut functions = FunctionSet::new();
        assert_eq!(functions.get("f"), None);

        functions.define(function("f", "{ echo hi; }"));
        let f = functions.get("f").unwrap();
        assert_eq!(f.name, "f");
        assert_eq!(f.body.to_string(), "{ echo hi; }");
    }

    #[test]
    fn function_set_redefinition_replaces() {
        let mut functions = FunctionSet::new();
        functions.define(function("f", "{ echo one; }"));
        functions.define(function("f", "{ echo two; }"));
        assert_eq!(functions.get("f").unwrap().body.to_string(), "{ echo two; }");
    }

    #[test]
    fn function_set_names() {
        let mut functions = FunctionSet::new();
        functions.define(function("b", "{ :; }"));
        functions.define(function("a", "{ :; }"));
        assert_eq!(functions.names(), ["a", "b"]);
    }
}
