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

//! Variable store
//!
//! A [`VariableSet`] maps names to [`Variable`]s. A variable holds an
//! optional [`Value`] (a variable can exist without a value, e.g. after
//! `export foo`) and a set of [attributes](VariableAttr). Scalar values,
//! indexed arrays, and associative arrays are supported.

use either::{Left, Right};
use enumset::{EnumSet, EnumSetType};
use itertools::Itertools;
use pesh_syntax::source::Location;
use std::collections::HashMap;
use std::fmt::Write as _;
use thiserror::Error;

/// Value of a variable
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Value {
    /// Single string
    Scalar(String),
    /// Array of strings indexed by position
    Array(Vec<String>),
    /// Array of strings indexed by arbitrary string keys
    ///
    /// The iteration order of an associative array is unspecified.
    Assoc(HashMap<String, String>),
}

use Value::*;

impl Value {
    /// Creates a scalar value.
    #[must_use]
    pub fn scalar<S: Into<String>>(value: S) -> Self {
        Scalar(value.into())
    }

    /// Creates an array value.
    #[must_use]
    pub fn array<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Array(values.into_iter().map(Into::into).collect())
    }

    /// Splits the value by colons.
    ///
    /// If this value is `Scalar`, the value is separated at each occurrence
    /// of colon (`:`). For arrays, each element is returned without further
    /// splitting.
    pub fn split(&self) -> impl Iterator<Item = &str> {
        match self {
            Scalar(value) => Left(value.split(':')),
            Array(values) => Right(Left(values.iter().map(String::as_str))),
            Assoc(values) => Right(Right(values.values().map(String::as_str))),
        }
    }

    /// Returns the number of elements in the value.
    ///
    /// A scalar counts as one element.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Scalar(_) => 1,
            Array(values) => values.len(),
            Assoc(values) => values.len(),
        }
    }

    /// Tests whether the value has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Array(values) if values.is_empty())
            || matches!(self, Assoc(values) if values.is_empty())
    }
}

/// Converts a string into a scalar value.
impl From<String> for Value {
    fn from(value: String) -> Self {
        Scalar(value)
    }
}

/// Converts a string slice to a scalar value.
impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Scalar(value.to_owned())
    }
}

/// Converts a vector of strings into an array value.
impl From<Vec<String>> for Value {
    fn from(values: Vec<String>) -> Self {
        Array(values)
    }
}

/// Attribute of a variable
#[derive(Debug, EnumSetType, Hash)]
pub enum VariableAttr {
    /// The variable is exported to the environment of child processes.
    Export,
    /// The variable cannot be assigned to.
    ReadOnly,
    /// Assigned values are evaluated as arithmetic expressions.
    Integer,
    /// Assigned values are converted to lower case.
    Lowercase,
    /// Assigned values are converted to upper case.
    Uppercase,
}

/// Variable, that is, a value with attributes
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Variable {
    /// Value, which may be absent for a variable that only has attributes
    pub value: Option<Value>,
    /// Attributes
    pub attrs: EnumSet<VariableAttr>,
    /// Location of the assignment that gave the current value, if known
    pub last_assigned: Option<Location>,
}

impl Variable {
    /// Creates a variable with the given value and no attributes.
    #[must_use]
    pub fn new<V: Into<Value>>(value: V) -> Variable {
        Variable {
            value: Some(value.into()),
            attrs: EnumSet::empty(),
            last_assigned: None,
        }
    }

    /// Tests whether the variable is read-only.
    #[must_use]
    pub fn is_read_only(&self) -> bool {
        self.attrs.contains(VariableAttr::ReadOnly)
    }
}

/// Error in assignment to a read-only variable
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("read-only variable `{name}` cannot be assigned")]
pub struct AssignError {
    /// Name of the read-only variable
    pub name: String,
    /// Location of the assignment that made the variable read-only, if known
    pub read_only_location: Option<Location>,
}

/// Applies the case-transforming attributes to a string.
fn transform(attrs: EnumSet<VariableAttr>, value: &mut String) {
    if attrs.contains(VariableAttr::Lowercase) {
        *value = value.to_lowercase();
    } else if attrs.contains(VariableAttr::Uppercase) {
        *value = value.to_uppercase();
    }
}

/// Collection of variables
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct VariableSet {
    all: HashMap<String, Variable>,
}

impl VariableSet {
    /// Creates an empty variable set.
    #[must_use]
    pub fn new() -> VariableSet {
        VariableSet::default()
    }

    /// Returns the variable with the given name, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.all.get(name)
    }

    /// Returns the scalar value of the variable with the given name.
    ///
    /// For an indexed array, the first element is returned; for an
    /// associative array, the element with the key `0`. This mirrors how
    /// `$arr` expands to `${arr[0]}`.
    #[must_use]
    pub fn get_scalar(&self, name: &str) -> Option<&str> {
        match self.all.get(name)?.value.as_ref()? {
            Scalar(value) => Some(value),
            Array(values) => values.first().map(String::as_str),
            Assoc(values) => values.get("0").map(String::as_str),
        }
    }

    /// Returns an element of an indexed array.
    ///
    /// A negative index counts from the end of the array, so `-1` is the
    /// last element. A scalar behaves as an array of one element.
    #[must_use]
    pub fn get_element(&self, name: &str, index: i64) -> Option<&str> {
        match self.all.get(name)?.value.as_ref()? {
            Scalar(value) => (index == 0 || index == -1).then_some(value.as_str()),
            Array(values) => {
                let index = resolve_index(index, values.len())?;
                values.get(index).map(String::as_str)
            }
            Assoc(values) => values.get(&index.to_string()).map(String::as_str),
        }
    }

    /// Returns an element of an associative array.
    #[must_use]
    pub fn get_keyed(&self, name: &str, key: &str) -> Option<&str> {
        match self.all.get(name)?.value.as_ref()? {
            Assoc(values) => values.get(key).map(String::as_str),
            _ => None,
        }
    }

    /// Assigns a value to a variable, creating it if necessary.
    ///
    /// Returns the previous value on success. Assigning to a read-only
    /// variable is an error. Case-transforming attributes are applied to
    /// scalar values.
    pub fn assign<V: Into<Value>>(
        &mut self,
        name: String,
        value: V,
        location: Option<Location>,
    ) -> Result<Option<Value>, AssignError> {
        if let Some(variable) = self.all.get(&name) {
            if variable.is_read_only() {
                let read_only_location = variable.last_assigned.clone();
                return Err(AssignError {
                    name,
                    read_only_location,
                });
            }
        }
        let variable = self.all.entry(name).or_default();
        let mut value = value.into();
        if let Scalar(s) = &mut value {
            transform(variable.attrs, s);
        }
        let old = variable.value.replace(value);
        variable.last_assigned = location;
        Ok(old)
    }

    /// Assigns to an element of an indexed array, creating the array if
    /// necessary.
    ///
    /// A scalar variable is converted to a one-element array first. A
    /// negative index counts from the end; an index past the end extends the
    /// array with empty strings.
    pub fn assign_indexed(
        &mut self,
        name: &str,
        index: i64,
        mut value: String,
        location: Option<Location>,
    ) -> Result<(), AssignError> {
        let variable = self.all.entry(name.to_string()).or_default();
        if variable.is_read_only() {
            return Err(AssignError {
                name: name.to_string(),
                read_only_location: variable.last_assigned.clone(),
            });
        }
        transform(variable.attrs, &mut value);

        let values = match &mut variable.value {
            Some(Array(values)) => values,
            Some(Scalar(first)) => {
                let first = std::mem::take(first);
                variable.value = Some(Array(vec![first]));
                match &mut variable.value {
                    Some(Array(values)) => values,
                    _ => unreachable!(),
                }
            }
            Some(Assoc(values)) => {
                values.insert(index.to_string(), value);
                variable.last_assigned = location;
                return Ok(());
            }
            none => {
                *none = Some(Array(Vec::new()));
                match none {
                    Some(Array(values)) => values,
                    _ => unreachable!(),
                }
            }
        };

        let index = match resolve_index(index, values.len()) {
            Some(index) => index,
            // A negative index beyond the first element resolves to nothing;
            // treat it as the first element like an out-of-range assignment.
            None => 0,
        };
        if index >= values.len() {
            values.resize(index + 1, String::new());
        }
        values[index] = value;
        variable.last_assigned = location;
        Ok(())
    }

    /// Assigns to an element of an associative array, creating the array if
    /// necessary.
    pub fn assign_keyed(
        &mut self,
        name: &str,
        key: String,
        mut value: String,
        location: Option<Location>,
    ) -> Result<(), AssignError> {
        let variable = self.all.entry(name.to_string()).or_default();
        if variable.is_read_only() {
            return Err(AssignError {
                name: name.to_string(),
                read_only_location: variable.last_assigned.clone(),
            });
        }
        transform(variable.attrs, &mut value);

        match &mut variable.value {
            Some(Assoc(values)) => {
                values.insert(key, value);
            }
            Some(_) => {
                // Keyed assignment to a non-associative variable replaces it.
                let mut values = HashMap::new();
                values.insert(key, value);
                variable.value = Some(Assoc(values));
            }
            none => {
                let mut values = HashMap::new();
                values.insert(key, value);
                *none = Some(Assoc(values));
            }
        }
        variable.last_assigned = location;
        Ok(())
    }

    /// Removes the variable with the given name.
    ///
    /// Returns the removed variable, if any. Read-only variables cannot be
    /// unset.
    pub fn unset(&mut self, name: &str) -> Result<Option<Variable>, AssignError> {
        if let Some(variable) = self.all.get(name) {
            if variable.is_read_only() {
                return Err(AssignError {
                    name: name.to_string(),
                    read_only_location: variable.last_assigned.clone(),
                });
            }
        }
        Ok(self.all.remove(name))
    }

    /// Returns the names of all variables with the given prefix, sorted.
    #[must_use]
    pub fn names_with_prefix(&self, prefix: &str) -> Vec<String> {
        self.all
            .keys()
            .filter(|name| name.starts_with(prefix))
            .cloned()
            .sorted()
            .collect()
    }

    /// Sets an attribute on a variable, creating it if necessary.
    pub fn set_attr(&mut self, name: &str, attr: VariableAttr) {
        self.all.entry(name.to_string()).or_default().attrs |= attr;
    }

    /// Writes the keys of an associative or indexed array variable,
    /// sorted, to the given string.
    pub fn write_keys(&self, name: &str, out: &mut String) {
        match self.all.get(name).and_then(|v| v.value.as_ref()) {
            Some(Array(values)) => {
                let _ = write!(out, "{}", (0..values.len()).format(" "));
            }
            Some(Assoc(values)) => {
                let _ = write!(out, "{}", values.keys().sorted().format(" "));
            }
            Some(Scalar(_)) => out.push('0'),
            None => (),
        }
    }
}

/// Resolves a possibly negative array index to a vector index.
fn resolve_index(index: i64, len: usize) -> Option<usize> {
    if index >= 0 {
        Some(index as usize)
    } else {
        len.checked_sub(index.unsigned_abs() as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_split() {
        let scalar = Value::scalar("/usr/bin:/bin");
        let values: Vec<&str> = scalar.split().collect();
        assert_eq!(values, ["/usr/bin", "/bin"]);

        let array = Value::array(["foo", "bar"]);
        let values: Vec<&str> = array.split().collect();
        assert_eq!(values, ["foo", "bar"]);
    }

    #[test]
    fn variable_set_scalar_assignment() {
        let mut variables = VariableSet::new();
        let old = variables.assign("x".to_string(), "1", None).unwrap();
        assert_eq!(old, None);
        assert_eq!(variables.get_scalar("x"), Some("1"));

        let old = variables.assign("x".to_string(), "2", None).unwrap();
        assert_eq!(old, Some(Value::scalar("1")));
        assert_eq!(variables.get_scalar("x"), Some("2"));
    }

    #[test]
    fn variable_set_read_only() {
        let mut variables = VariableSet::new();
        variables.assign("x".to_string(), "1", None).unwrap();
        variables.set_attr("x", VariableAttr::ReadOnly);
        let e = variables.assign("x".to_string(), "2", None).unwrap_err();
        assert_eq!(e.name, "x");
        assert_eq!(variables.get_scalar("x"), Some("1"));
        variables.unset("x").unwrap_err();
    }

    #[test]
    fn variable_set_case_transform() {
        let mut variables = VariableSet::new();
        variables.set_attr("up", VariableAttr::Uppercase);
        variables.assign("up".to_string(), "hello", None).unwrap();
        assert_eq!(variables.get_scalar("up"), Some("HELLO"));

        variables.set_attr("down", VariableAttr::Lowercase);
        variables.assign("down".to_string(), "HELLO", None).unwrap();
        assert_eq!(variables.get_scalar("down"), Some("hello"));
    }

    #[test]
    fn variable_set_indexed_elements() {
        let mut variables = VariableSet::new();
        variables
            .assign("a".to_string(), Value::array(["x", "y", "z"]), None)
            .unwrap();
        assert_eq!(variables.get_element("a", 0), Some("x"));
        assert_eq!(variables.get_element("a", 2), Some("z"));
        assert_eq!(variables.get_element("a", -1), Some("z"));
        assert_eq!(variables.get_element("a", -3), Some("x"));
        assert_eq!(variables.get_element("a", 3), None);
        assert_eq!(variables.get_element("a", -4), None);
    }

    #[test]
    fn variable_set_indexed_assignment_auto_creates() {
        let mut variables = VariableSet::new();
        variables
            .assign_indexed("a", 1, "one".to_string(), None)
            .unwrap();
        assert_eq!(variables.get_element("a", 0), Some(""));
        assert_eq!(variables.get_element("a", 1), Some("one"));
    }

    #[test]
    fn variable_set_indexed_assignment_converts_scalar() {
        let mut variables = VariableSet::new();
        variables.assign("a".to_string(), "zero", None).unwrap();
        variables
            .assign_indexed("a", 1, "one".to_string(), None)
            .unwrap();
        assert_eq!(variables.get_element("a", 0), Some("zero"));
        assert_eq!(variables.get_element("a", 1), Some("one"));
    }

    #[test]
    fn variable_set_keyed_assignment() {
        let mut variables = VariableSet::new();
        variables
            .assign_keyed("m", "k v".to_string(), "1".to_string(), None)
            .unwrap();
        assert_eq!(variables.get_keyed("m", "k v"), Some("1"));
        assert_eq!(variables.get_keyed("m", "other"), None);
    }

    #[test]
    fn variable_set_names_with_prefix() {
        let mut variables = VariableSet::new();
        for name in ["PATH", "PWD", "HOME"] {
            variables.assign(name.to_string(), "", None).unwrap();
        }
        assert_eq!(variables.names_with_prefix("P"), ["PATH", "PWD"]);
        assert_eq!(variables.names_with_prefix("X"), Vec::<String>::new());
    }
}
