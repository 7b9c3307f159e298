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

//! Parameter expansion switch semantics
//!
//! A switch (`${v:-w}`, `${v:=w}`, `${v:?w}`, `${v:+w}`) decides, based on
//! whether the parameter is vacant, whether the parameter's own value or the
//! switch word is used. The `=` type additionally writes the substituted
//! value back to the variable store, and `?` turns vacancy into an error.

use super::super::super::Error;
use super::super::super::ErrorCause;
use super::super::super::phrase::Phrase;
use super::Env;
use super::Expand;
use super::ParamValue;
use super::Result;
use super::ResolvedIndex;
use super::expand_to_string;
use pesh_syntax::source::Location;
use pesh_syntax::syntax::Param;
use pesh_syntax::syntax::ParamType;
use pesh_syntax::syntax::Switch;
use pesh_syntax::syntax::SwitchCondition;
use pesh_syntax::syntax::SwitchType;

/// Tests whether the value triggers the switch.
fn is_vacant(condition: SwitchCondition, value: &ParamValue) -> bool {
    match condition {
        SwitchCondition::Unset => matches!(value, ParamValue::Unset),
        SwitchCondition::UnsetOrEmpty => match value {
            ParamValue::Unset => true,
            ParamValue::Single(value) => value.is_empty(),
            ParamValue::Fields(values) => values.iter().all(String::is_empty),
        },
    }
}

/// Assigns the switch word to the parameter for the `=` switch type.
fn assign_default(
    env: &mut Env,
    param: &Param,
    index: Option<&ResolvedIndex>,
    value: String,
    location: &Location,
) -> Result<()> {
    if param.r#type != ParamType::Variable {
        return Err(Error {
            cause: ErrorCause::NonassignableParameter,
            location: location.clone(),
        });
    }

    let result = match index {
        None => env
            .inner
            .variables
            .assign(param.id.clone(), value, Some(location.clone()))
            .map(drop),
        Some(ResolvedIndex::Numeric(i)) => env.inner.variables.assign_indexed(
            &param.id,
            *i,
            value,
            Some(location.clone()),
        ),
        Some(ResolvedIndex::Key(key)) => env.inner.variables.assign_keyed(
            &param.id,
            key.clone(),
            value,
            Some(location.clone()),
        ),
        Some(ResolvedIndex::At | ResolvedIndex::Asterisk) => {
            return Err(Error {
                cause: ErrorCause::NonassignableParameter,
                location: location.clone(),
            });
        }
    };
    result.map_err(|e| Error {
        cause: ErrorCause::AssignReadOnly(e),
        location: location.clone(),
    })
}

/// Applies a switch to the looked-up value.
///
/// Returns `Some(phrase)` when the switch replaces the expansion entirely,
/// `None` when the parameter's own (possibly just assigned) value is used.
pub(super) fn apply(
    env: &mut Env,
    switch: &Switch,
    param: &Param,
    index: Option<&ResolvedIndex>,
    value: &mut ParamValue,
    location: &Location,
) -> Result<Option<Phrase>> {
    let vacant = is_vacant(switch.condition, value);
    match switch.r#type {
        SwitchType::Alter => {
            if vacant {
                Ok(Some(Phrase::Field(vec![])))
            } else {
                switch.word.expand(env).map(Some)
            }
        }

        SwitchType::Default => {
            if vacant {
                switch.word.expand(env).map(Some)
            } else {
                Ok(None)
            }
        }

        SwitchType::Assign => {
            if vacant {
                let new_value = expand_to_string(env, &switch.word)?;
                assign_default(env, param, index, new_value.clone(), location)?;
                *value = ParamValue::Single(new_value);
            }
            Ok(None)
        }

        SwitchType::Error => {
            if vacant {
                let message = if switch.word.units.is_empty() {
                    "parameter not set or null".to_string()
                } else {
                    expand_to_string(env, &switch.word)?
                };
                Err(Error {
                    cause: ErrorCause::ParameterUnsetOrNull {
                        param: param.id.clone(),
                        message,
                    },
                    location: location.clone(),
                })
            } else {
                Ok(None)
            }
        }
    }
}
