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

//! Assignment application
//!
//! This module expands the value of an [`Assign`] and writes it to the
//! variable store. Scalar values expand to a single field; array values get
//! the full multi-field expansion. Subscripted assignments resolve their
//! subscript as a key (for associative arrays) or an arithmetic expression
//! (for indexed arrays).

use super::Env;
use super::Error;
use super::ErrorCause;
use super::Result;
use pesh_env::variable::Value;
use pesh_syntax::syntax::Assign;
use pesh_syntax::syntax::AssignOp;
use pesh_syntax::syntax::Scalar;
use pesh_syntax::syntax::Word;

fn read_only_error(e: pesh_env::variable::AssignError, assign: &Assign) -> Error {
    Error {
        cause: ErrorCause::AssignReadOnly(e),
        location: assign.location.clone(),
    }
}

/// Resolves a subscript word to an element reference.
enum Subscript {
    Numeric(i64),
    Key(String),
}

fn resolve_subscript(env: &mut Env, assign: &Assign, index: &Word) -> Result<Subscript> {
    let text = super::expand_word(env, index)?.value;
    let is_assoc = matches!(
        env.inner
            .variables
            .get(&assign.name)
            .and_then(|v| v.value.as_ref()),
        Some(Value::Assoc(_))
    );
    if is_assoc {
        return Ok(Subscript::Key(text));
    }
    match env.arith.eval(&text, env.inner) {
        Ok(value) => Ok(Subscript::Numeric(value)),
        Err(_) => Err(Error {
            cause: ErrorCause::BadArrayIndex,
            location: assign.location.clone(),
        }),
    }
}

/// Expands the value of an assignment and writes it to the variable store.
pub fn perform_assignment(env: &mut Env, assign: &Assign) -> Result<()> {
    let location = Some(assign.location.clone());

    if let Some(index) = &assign.index {
        // Subscripted assignment: the value must be scalar.
        let Scalar(word) = &assign.value else {
            return Err(Error {
                cause: ErrorCause::NonassignableParameter,
                location: assign.location.clone(),
            });
        };
        let mut value = super::expand_word(env, word)?.value;
        let subscript = resolve_subscript(env, assign, index)?;

        if assign.operator == AssignOp::Append {
            let old = match &subscript {
                Subscript::Numeric(i) => env.inner.variables.get_element(&assign.name, *i),
                Subscript::Key(key) => env.inner.variables.get_keyed(&assign.name, key),
            };
            if let Some(old) = old {
                value = format!("{old}{value}");
            }
        }

        let result = match subscript {
            Subscript::Numeric(i) => {
                env.inner
                    .variables
                    .assign_indexed(&assign.name, i, value, location)
            }
            Subscript::Key(key) => {
                env.inner
                    .variables
                    .assign_keyed(&assign.name, key, value, location)
            }
        };
        return result.map_err(|e| read_only_error(e, assign));
    }

    match &assign.value {
        Scalar(word) => {
            let mut value = super::expand_word(env, word)?.value;
            if assign.operator == AssignOp::Append {
                if let Some(old) = env.inner.variables.get_scalar(&assign.name) {
                    value = format!("{old}{value}");
                }
            }
            env.inner
                .variables
                .assign(assign.name.clone(), value, location)
                .map(drop)
                .map_err(|e| read_only_error(e, assign))
        }

        pesh_syntax::syntax::Value::Array(words) => {
            let mut items: Vec<String> = super::expand_words(env, words)?
                .into_iter()
                .map(|field| field.value)
                .collect();

            if assign.operator == AssignOp::Append {
                if let Some(Value::Array(old)) = env
                    .inner
                    .variables
                    .get(&assign.name)
                    .and_then(|v| v.value.as_ref())
                {
                    let mut combined = old.clone();
                    combined.append(&mut items);
                    items = combined;
                }
            }

            env.inner
                .variables
                .assign(assign.name.clone(), Value::Array(items), location)
                .map(drop)
                .map_err(|e| read_only_error(e, assign))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::TestFixture;
    use super::*;
    use pesh_syntax::syntax::SimpleCommand;

    fn assign_of(source: &str) -> Assign {
        let command: SimpleCommand = source.parse().unwrap();
        command.assigns.into_iter().next().unwrap()
    }

    #[test]
    fn scalar_assignment() {
        let mut fixture = TestFixture::default();
        let assign = assign_of("x=hello");
        let mut env = fixture.env();
        perform_assignment(&mut env, &assign).unwrap();
        assert_eq!(fixture.shell.variables.get_scalar("x"), Some("hello"));
    }

    #[test]
    fn scalar_assignment_expands_value() {
        let mut fixture = TestFixture::default();
        fixture
            .shell
            .variables
            .assign("name".to_string(), "world", None)
            .unwrap();
        let assign = assign_of("greeting=hello-$name");
        let mut env = fixture.env();
        perform_assignment(&mut env, &assign).unwrap();
        assert_eq!(
            fixture.shell.variables.get_scalar("greeting"),
            Some("hello-world")
        );
    }

    #[test]
    fn scalar_value_is_not_field_split() {
        let mut fixture = TestFixture::default();
        fixture
            .shell
            .variables
            .assign("spaced".to_string(), "a b c", None)
            .unwrap();
        let assign = assign_of("x=$spaced");
        let mut env = fixture.env();
        perform_assignment(&mut env, &assign).unwrap();
        assert_eq!(fixture.shell.variables.get_scalar("x"), Some("a b c"));
    }

    #[test]
    fn append_assignment() {
        let mut fixture = TestFixture::default();
        fixture
            .shell
            .variables
            .assign("x".to_string(), "abc", None)
            .unwrap();
        let assign = assign_of("x+=def");
        let mut env = fixture.env();
        perform_assignment(&mut env, &assign).unwrap();
        assert_eq!(fixture.shell.variables.get_scalar("x"), Some("abcdef"));
    }

    #[test]
    fn array_assignment() {
        let mut fixture = TestFixture::default();
        let assign = assign_of("a=(one two three)");
        let mut env = fixture.env();
        perform_assignment(&mut env, &assign).unwrap();
        assert_eq!(fixture.shell.variables.get_element("a", 1), Some("two"));
        assert_eq!(fixture.shell.variables.get_element("a", 2), Some("three"));
    }

    #[test]
    fn indexed_assignment() {
        let mut fixture = TestFixture::default();
        let assign = assign_of("a[2]=third");
        let mut env = fixture.env();
        perform_assignment(&mut env, &assign).unwrap();
        assert_eq!(fixture.shell.variables.get_element("a", 2), Some("third"));
        assert_eq!(fixture.shell.variables.get_element("a", 0), Some(""));
    }

    #[test]
    fn keyed_assignment_with_quoted_subscript() {
        let mut fixture = TestFixture::default();
        // Make `arr` associative first, as `declare -A` would.
        fixture
            .shell
            .variables
            .assign_keyed("arr", "seed".to_string(), "".to_string(), None)
            .unwrap();
        let assign = assign_of(r#"arr["k v"]="hello world""#);
        let mut env = fixture.env();
        perform_assignment(&mut env, &assign).unwrap();
        assert_eq!(
            fixture.shell.variables.get_keyed("arr", "k v"),
            Some("hello world")
        );
    }

    #[test]
    fn read_only_assignment_fails() {
        let mut fixture = TestFixture::default();
        fixture
            .shell
            .variables
            .assign("x".to_string(), "1", None)
            .unwrap();
        fixture
            .shell
            .variables
            .set_attr("x", pesh_env::variable::VariableAttr::ReadOnly);
        let assign = assign_of("x=2");
        let mut env = fixture.env();
        let e = perform_assignment(&mut env, &assign).unwrap_err();
        assert!(matches!(e.cause, ErrorCause::AssignReadOnly(_)));
    }
}
