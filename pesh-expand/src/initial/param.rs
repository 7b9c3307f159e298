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

//! Initial expansion of parameters
//!
//! Parameter expansion proceeds in stages: the subscript is resolved, the
//! raw value is [looked up](lookup), an optional [switch](switch) may
//! substitute a different word entirely, and the remaining modifiers
//! ([trim, substitution, case conversion](trim), slicing, length) transform
//! the value before it becomes a phrase.

mod lookup;
mod switch;
mod trim;

use super::super::Error;
use super::super::ErrorCause;
use super::super::attr::{Origin, from_str};
use super::super::phrase::Phrase;
use super::Env;
use super::Expand;
use super::Result;
use pesh_syntax::source::Location;
use pesh_syntax::syntax::BracedParam;
use pesh_syntax::syntax::Indirection;
use pesh_syntax::syntax::Modifier;
use pesh_syntax::syntax::Param;
use pesh_syntax::syntax::ParamIndex;
use pesh_syntax::syntax::ParamType;
use pesh_syntax::syntax::PrefixMatchMode;
use pesh_syntax::syntax::Slice;
use pesh_syntax::syntax::SpecialParam;
use pesh_syntax::syntax::Word;

/// Raw value of a parameter before modifiers apply
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum ParamValue {
    /// The parameter is not set.
    Unset,
    /// Single string value
    Single(String),
    /// Multi-valued result (`$@`, `${a[@]}`, …)
    Fields(Vec<String>),
}

impl ParamValue {
    /// Applies a transformation to every value.
    fn for_each<F: FnMut(&mut String)>(&mut self, mut f: F) {
        match self {
            ParamValue::Unset => (),
            ParamValue::Single(value) => f(value),
            ParamValue::Fields(values) => values.iter_mut().for_each(f),
        }
    }
}

/// How a multi-valued parameter combines into a phrase
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum JoinMode {
    /// Ordinary scalar-valued parameter
    Scalar,
    /// `@`-style: one field per value, even when quoted
    At,
    /// `*`-style: joined into one field when quoted
    Asterisk,
}

/// Resolved subscript of an array parameter
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum ResolvedIndex {
    At,
    Asterisk,
    Numeric(i64),
    Key(String),
}

/// Expands a word to a single string, without field splitting.
fn expand_to_string(env: &mut Env, word: &Word) -> Result<String> {
    let will_split = std::mem::replace(&mut env.will_split, false);
    let result = word.expand(env);
    env.will_split = will_split;
    let phrase = result?;
    let chars = phrase.ifs_join(env.join_char());
    Ok(super::super::attr_strip::strip(
        super::super::quote_removal::skip_quotes(chars),
    ))
}

/// Resolves the subscript of a parameter expansion.
///
/// For an associative array variable the subscript expands to a string key;
/// otherwise it is evaluated as an arithmetic expression.
fn resolve_index(
    env: &mut Env,
    param: &Param,
    index: &ParamIndex,
    location: &Location,
) -> Result<ResolvedIndex> {
    let word = match index {
        ParamIndex::At => return Ok(ResolvedIndex::At),
        ParamIndex::Asterisk => return Ok(ResolvedIndex::Asterisk),
        ParamIndex::Value(word) => word,
    };

    let text = expand_to_string(env, word)?;
    let is_assoc = matches!(
        env.inner.variables.get(&param.id).and_then(|v| v.value.as_ref()),
        Some(pesh_env::variable::Value::Assoc(_))
    );
    if is_assoc {
        return Ok(ResolvedIndex::Key(text));
    }

    match env.arith.eval(&text, env.inner) {
        Ok(value) => Ok(ResolvedIndex::Numeric(value)),
        Err(_) => Err(Error {
            cause: ErrorCause::BadArrayIndex,
            location: location.clone(),
        }),
    }
}

/// Determines how the value combines into a phrase.
fn join_mode(param: &Param, index: Option<&ResolvedIndex>) -> JoinMode {
    match index {
        Some(ResolvedIndex::At) => return JoinMode::At,
        Some(ResolvedIndex::Asterisk) => return JoinMode::Asterisk,
        _ => (),
    }
    match param.r#type {
        ParamType::Special(SpecialParam::At) => JoinMode::At,
        ParamType::Special(SpecialParam::Asterisk) => JoinMode::Asterisk,
        _ => JoinMode::Scalar,
    }
}

/// Converts the final value to a phrase.
fn into_phrase(env: &Env, value: ParamValue, mode: JoinMode) -> Phrase {
    let soft = |s: &str| from_str(s, Origin::SoftExpansion, false, false);
    let join = |values: Vec<String>, env: &Env| {
        let mut chars = Vec::new();
        let mut first = true;
        for value in values {
            if !first {
                chars.extend(env.join_char().map(|c| {
                    super::super::attr::AttrChar {
                        value: c,
                        origin: Origin::SoftExpansion,
                        is_quoted: false,
                        is_quoting: false,
                    }
                }));
            }
            first = false;
            chars.extend(soft(&value));
        }
        chars
    };

    match mode {
        JoinMode::Scalar => match value {
            ParamValue::Unset => Phrase::Field(vec![]),
            ParamValue::Single(value) => Phrase::Field(soft(&value)),
            ParamValue::Fields(values) => Phrase::Field(join(values, env)),
        },
        JoinMode::At => match value {
            ParamValue::Unset => Phrase::zero_fields(),
            ParamValue::Single(value) => Phrase::Field(soft(&value)),
            ParamValue::Fields(values) => {
                Phrase::Full(values.iter().map(|v| soft(v)).collect())
            }
        },
        JoinMode::Asterisk => {
            let values = match value {
                ParamValue::Unset => Vec::new(),
                ParamValue::Single(value) => vec![value],
                ParamValue::Fields(values) => values,
            };
            if env.will_split {
                Phrase::Full(values.iter().map(|v| soft(v)).collect())
            } else {
                Phrase::Field(join(values, env))
            }
        }
    }
}

/// Computes the length modifier.
fn length_of(value: ParamValue, mode: JoinMode) -> ParamValue {
    let result = match mode {
        // `${#a[@]}` is the number of elements
        JoinMode::At | JoinMode::Asterisk => match value {
            ParamValue::Unset => 0,
            ParamValue::Single(_) => 1,
            ParamValue::Fields(values) => values.len(),
        },
        JoinMode::Scalar => match value {
            ParamValue::Unset => 0,
            ParamValue::Single(value) => value.chars().count(),
            ParamValue::Fields(values) => values.iter().map(|v| v.chars().count()).sum(),
        },
    };
    ParamValue::Single(result.to_string())
}

/// Applies a slice modifier.
fn apply_slice(
    env: &mut Env,
    slice: &Slice,
    value: &mut ParamValue,
    location: &Location,
) -> Result<()> {
    let eval = |env: &mut Env, text: &pesh_syntax::syntax::Text| -> Result<i64> {
        let expression = super::arith::expand_expression(env, text)?;
        env.arith.eval(&expression, env.inner).map_err(|e| Error {
            cause: e.into(),
            location: location.clone(),
        })
    };

    let offset = eval(env, &slice.offset)?;
    let length = match &slice.length {
        Some(text) => Some(eval(env, text)?),
        None => None,
    };

    match value {
        ParamValue::Unset => (),
        ParamValue::Single(s) => {
            let chars: Vec<char> = s.chars().collect();
            *s = slice_values(&chars, offset, length, location)?
                .iter()
                .collect();
        }
        ParamValue::Fields(values) => {
            *values = slice_values(values, offset, length, location)?;
        }
    }
    Ok(())
}

/// Slices a list of items by a possibly negative offset and length.
fn slice_values<T: Clone>(
    items: &[T],
    offset: i64,
    length: Option<i64>,
    location: &Location,
) -> Result<Vec<T>> {
    let len = items.len() as i64;
    let start = if offset < 0 {
        (len + offset).max(0)
    } else {
        offset.min(len)
    };
    let end = match length {
        None => len,
        // A negative length counts back from the end of the value.
        Some(l) if l < 0 => {
            let end = len + l;
            if end < start {
                return Err(Error {
                    cause: ErrorCause::BadSubstitution,
                    location: location.clone(),
                });
            }
            end
        }
        Some(l) => (start + l).min(len),
    };
    Ok(items[start as usize..end.max(start) as usize].to_vec())
}

/// Expands a parameter that is not enclosed in braces (`$foo`).
pub fn expand_raw(env: &mut Env, param: &Param, location: &Location) -> Result<Phrase> {
    env.check_cancel(location)?;
    let value = lookup::lookup(env, param, None);
    let mode = join_mode(param, None);
    Ok(into_phrase(env, value, mode))
}

/// Expands a braced parameter expansion (`${...}`).
pub fn expand_braced(env: &mut Env, braced: &BracedParam) -> Result<Phrase> {
    let location = &braced.location;
    env.check_cancel(location)?;

    let index = match &braced.index {
        None => None,
        Some(index) => Some(resolve_index(env, &braced.param, index, location)?),
    };

    // `${!prefix*}` and `${!prefix@}` list variable names and take no
    // further modifiers.
    if let Some(Indirection::NamePrefix(mode)) = braced.indirection {
        if braced.modifier != Modifier::None || index.is_some() {
            return Err(Error {
                cause: ErrorCause::BadSubstitution,
                location: location.clone(),
            });
        }
        let names = env.inner.variables.names_with_prefix(&braced.param.id);
        let mode = match mode {
            PrefixMatchMode::At => JoinMode::At,
            PrefixMatchMode::Asterisk => JoinMode::Asterisk,
        };
        return Ok(into_phrase(env, ParamValue::Fields(names), mode));
    }

    let (mut value, mode) = if braced.indirection == Some(Indirection::Variable) {
        // `${!name}`: the value of `name` names the parameter to expand.
        let referent = lookup::lookup(env, &braced.param, index.as_ref());
        let reference = match referent {
            ParamValue::Unset => String::new(),
            ParamValue::Single(value) => value,
            ParamValue::Fields(_) => {
                return Err(Error {
                    cause: ErrorCause::BadSubstitution,
                    location: location.clone(),
                });
            }
        };
        if reference.is_empty() {
            (ParamValue::Unset, JoinMode::Scalar)
        } else {
            lookup::lookup_by_reference(env, &reference, location)?
        }
    } else {
        let value = lookup::lookup(env, &braced.param, index.as_ref());
        (value, join_mode(&braced.param, index.as_ref()))
    };

    if let Modifier::Switch(switch) = &braced.modifier {
        if let Some(phrase) =
            switch::apply(env, switch, &braced.param, index.as_ref(), &mut value, location)?
        {
            return Ok(phrase);
        }
    }

    match &braced.modifier {
        Modifier::None | Modifier::Switch(_) => (),
        Modifier::Length => value = length_of(value, mode),
        Modifier::Trim(trim) => trim::apply_trim(env, trim, &mut value)?,
        Modifier::Subst(subst) => trim::apply_subst(env, subst, &mut value)?,
        Modifier::CaseConv(conv) => trim::apply_case(*conv, &mut value),
        Modifier::Slice(slice) => apply_slice(env, slice, &mut value, location)?,
    }

    Ok(into_phrase(env, value, mode))
}
