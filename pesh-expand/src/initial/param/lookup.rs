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

//! Parameter value lookup

use super::super::super::Error;
use super::super::super::ErrorCause;
use super::Env;
use super::ParamValue;
use super::ResolvedIndex;
use itertools::Itertools;
use pesh_env::variable::Value;
use pesh_syntax::parser::lex::is_name_char;
use pesh_syntax::source::Location;
use pesh_syntax::syntax::Param;
use pesh_syntax::syntax::ParamType;
use pesh_syntax::syntax::SpecialParam;

/// Looks up the whole value of a variable.
fn variable_value(env: &Env, name: &str) -> ParamValue {
    match env.inner.variables.get(name).and_then(|v| v.value.as_ref()) {
        None => ParamValue::Unset,
        Some(Value::Scalar(value)) => ParamValue::Single(value.clone()),
        Some(Value::Array(values)) => match values.first() {
            // `$arr` is `${arr[0]}`
            Some(first) => ParamValue::Single(first.clone()),
            None => ParamValue::Unset,
        },
        Some(Value::Assoc(values)) => match values.get("0") {
            Some(value) => ParamValue::Single(value.clone()),
            None => ParamValue::Unset,
        },
    }
}

/// Looks up all elements of a variable.
fn variable_elements(env: &Env, name: &str) -> ParamValue {
    match env.inner.variables.get(name).and_then(|v| v.value.as_ref()) {
        None => ParamValue::Unset,
        Some(Value::Scalar(value)) => ParamValue::Fields(vec![value.clone()]),
        Some(Value::Array(values)) => ParamValue::Fields(values.clone()),
        Some(Value::Assoc(values)) => {
            // The iteration order of an associative array is unspecified;
            // sort by key so the result is at least deterministic.
            ParamValue::Fields(
                values
                    .iter()
                    .sorted_by(|a, b| a.0.cmp(b.0))
                    .map(|(_, v)| v.clone())
                    .collect(),
            )
        }
    }
}

/// Looks up a special parameter.
fn special_value(env: &Env, special: SpecialParam) -> ParamValue {
    use SpecialParam::*;
    match special {
        At | Asterisk => ParamValue::Fields(env.inner.positional_params().to_vec()),
        Number => ParamValue::Single(env.inner.positional_params().len().to_string()),
        Question => ParamValue::Single(env.inner.exit_status.to_string()),
        Hyphen => ParamValue::Single(env.inner.option_flags.clone()),
        Dollar => ParamValue::Single(env.inner.shell_pid.to_string()),
        Exclamation => match env.inner.last_async_pid {
            Some(pid) => ParamValue::Single(pid.to_string()),
            None => ParamValue::Unset,
        },
        Zero => ParamValue::Single(env.inner.arg0.clone()),
    }
}

/// Looks up the raw value of a parameter.
pub(super) fn lookup(env: &Env, param: &Param, index: Option<&ResolvedIndex>) -> ParamValue {
    match param.r#type {
        ParamType::Special(special) => special_value(env, special),
        ParamType::Positional(n) => match n
            .checked_sub(1)
            .and_then(|i| env.inner.positional_params().get(i))
        {
            Some(value) => ParamValue::Single(value.clone()),
            None => ParamValue::Unset,
        },
        ParamType::Variable => match index {
            None => variable_value(env, &param.id),
            Some(ResolvedIndex::At | ResolvedIndex::Asterisk) => {
                variable_elements(env, &param.id)
            }
            Some(ResolvedIndex::Numeric(i)) => {
                match env.inner.variables.get_element(&param.id, *i) {
                    Some(value) => ParamValue::Single(value.to_string()),
                    None => ParamValue::Unset,
                }
            }
            Some(ResolvedIndex::Key(key)) => {
                match env.inner.variables.get_keyed(&param.id, key) {
                    Some(value) => ParamValue::Single(value.to_string()),
                    None => ParamValue::Unset,
                }
            }
        },
    }
}

/// Looks up the parameter named by an indirect reference string.
///
/// The reference may be a variable name, a name with a subscript, a
/// positional parameter, or a special parameter. Anything else is a bad
/// substitution.
pub(super) fn lookup_by_reference(
    env: &Env,
    reference: &str,
    location: &Location,
) -> super::Result<(ParamValue, super::JoinMode)> {
    let bad = || Error {
        cause: ErrorCause::BadSubstitution,
        location: location.clone(),
    };

    // Special parameter
    let mut chars = reference.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if let Some(special) = SpecialParam::from_char(c) {
            let param = Param::from(special);
            return Ok((
                special_value(env, special),
                super::join_mode(&param, None),
            ));
        }
    }

    // Positional parameter
    if reference.chars().all(|c| c.is_ascii_digit()) {
        let value = match reference
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| env.inner.positional_params().get(i))
        {
            Some(value) => ParamValue::Single(value.clone()),
            None => ParamValue::Unset,
        };
        return Ok((value, super::JoinMode::Scalar));
    }

    // Variable name, possibly with a subscript
    let (name, index) = match reference.find('[') {
        None => (reference, None),
        Some(open) => {
            let Some(close) = reference.rfind(']') else {
                return Err(bad());
            };
            if close != reference.len() - 1 || close <= open {
                return Err(bad());
            }
            (&reference[..open], Some(&reference[open + 1..close]))
        }
    };
    if name.is_empty()
        || name.starts_with(|c: char| c.is_ascii_digit())
        || !name.chars().all(is_name_char)
    {
        return Err(bad());
    }

    match index {
        None => Ok((variable_value(env, name), super::JoinMode::Scalar)),
        Some("@") => Ok((variable_elements(env, name), super::JoinMode::At)),
        Some("*") => Ok((variable_elements(env, name), super::JoinMode::Asterisk)),
        Some(key) => {
            let is_assoc = matches!(
                env.inner.variables.get(name).and_then(|v| v.value.as_ref()),
                Some(Value::Assoc(_))
            );
            let value = if is_assoc {
                env.inner.variables.get_keyed(name, key)
            } else {
                let Ok(i) = key.trim().parse::<i64>() else {
                    return Err(bad());
                };
                env.inner.variables.get_element(name, i)
            };
            let value = match value {
                Some(value) => ParamValue::Single(value.to_string()),
                None => ParamValue::Unset,
            };
            Ok((value, super::JoinMode::Scalar))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::super::super::tests::TestFixture;
    use super::*;

    #[test]
    fn lookup_unset_variable() {
        let mut fixture = TestFixture::default();
        let env = fixture.env();
        let param = Param::variable("nothing");
        assert_eq!(lookup(&env, &param, None), ParamValue::Unset);
    }

    #[test]
    fn lookup_special_parameters() {
        let mut fixture = TestFixture::default();
        fixture.shell.shell_pid = 1234;
        fixture.shell.arg0 = "pesh".to_string();
        fixture
            .shell
            .set_positional_params(vec!["a".to_string(), "b".to_string()]);
        let env = fixture.env();

        assert_eq!(
            lookup(&env, &Param::from(SpecialParam::Dollar), None),
            ParamValue::Single("1234".to_string())
        );
        assert_eq!(
            lookup(&env, &Param::from(SpecialParam::Zero), None),
            ParamValue::Single("pesh".to_string())
        );
        assert_eq!(
            lookup(&env, &Param::from(SpecialParam::At), None),
            ParamValue::Fields(vec!["a".to_string(), "b".to_string()])
        );
        assert_eq!(
            lookup(&env, &Param::from(SpecialParam::Exclamation), None),
            ParamValue::Unset
        );
    }

    #[test]
    fn lookup_by_reference_forms() {
        let mut fixture = TestFixture::default();
        fixture
            .shell
            .variables
            .assign("x".to_string(), "scalar", None)
            .unwrap();
        fixture
            .shell
            .variables
            .assign(
                "a".to_string(),
                pesh_env::variable::Value::array(["p", "q"]),
                None,
            )
            .unwrap();
        fixture.shell.set_positional_params(vec!["one".to_string()]);
        let env = fixture.env();
        let location = Location::dummy("ref");

        let (value, _) = lookup_by_reference(&env, "x", &location).unwrap();
        assert_eq!(value, ParamValue::Single("scalar".to_string()));

        let (value, _) = lookup_by_reference(&env, "a[1]", &location).unwrap();
        assert_eq!(value, ParamValue::Single("q".to_string()));

        let (value, mode) = lookup_by_reference(&env, "a[@]", &location).unwrap();
        assert_eq!(value, ParamValue::Fields(vec!["p".to_string(), "q".to_string()]));
        assert_eq!(mode, super::super::JoinMode::At);

        let (value, _) = lookup_by_reference(&env, "1", &location).unwrap();
        assert_eq!(value, ParamValue::Single("one".to_string()));

        lookup_by_reference(&env, "not a name", &location).unwrap_err();
    }
}
