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

//! Initial expansion of arithmetic expansions
//!
//! The expression text first undergoes the step-3 expansions itself (so
//! `$((x + $y))` sees the value of `$y`), then goes to the arithmetic
//! evaluator collaborator. The result is the decimal form of the evaluated
//! 64-bit value.

use super::super::Error;
use super::super::attr::{Origin, from_str};
use super::super::phrase::Phrase;
use super::Env;
use super::Expand;
use super::Result;
use pesh_syntax::source::Location;
use pesh_syntax::syntax::Text;

/// Expands the expression text to the string handed to the evaluator.
pub(super) fn expand_expression(env: &mut Env, content: &Text) -> Result<String> {
    let will_split = std::mem::replace(&mut env.will_split, false);
    let result = content.expand(env);
    env.will_split = will_split;
    let phrase = result?;
    let chars = phrase.ifs_join(env.join_char());
    Ok(super::super::attr_strip::strip(
        super::super::quote_removal::skip_quotes(chars),
    ))
}

/// Expands an arithmetic expansion.
pub fn expand(env: &mut Env, content: &Text, location: &Location) -> Result<Phrase> {
    env.check_cancel(location)?;

    let expression = expand_expression(env, content)?;
    let value = env
        .arith
        .eval(&expression, env.inner)
        .map_err(|e| Error {
            cause: e.into(),
            location: location.clone(),
        })?;

    Ok(Phrase::Field(from_str(
        &value.to_string(),
        Origin::SoftExpansion,
        false,
        false,
    )))
}
