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

//! Initial expansion
//!
//! The initial expansion is the first evaluating pass over a word: tilde
//! expansion, parameter expansion, command substitution, and arithmetic
//! expansion, performed in the order the parts appear in the word. The
//! result is a [`Phrase`](super::phrase::Phrase) of attributed characters;
//! field splitting and pathname expansion are separate, later steps.

mod arith;
mod command_subst;
mod param;
mod text;
mod tilde;
mod word;

use super::Env;
use super::Result;
use super::phrase::Phrase;

/// Syntactic construct that can be subjected to the initial expansion
pub trait Expand {
    /// Performs the initial expansion.
    fn expand(&self, env: &mut Env) -> Result<Phrase>;
}

/// Expands a sequence of constructs, concatenating the results.
impl<T: Expand> Expand for [T] {
    fn expand(&self, env: &mut Env) -> Result<Phrase> {
        let mut phrase = Phrase::empty_field();
        for item in self {
            phrase.append(item.expand(env)?);
        }
        Ok(phrase)
    }
}

impl Expand for pesh_syntax::syntax::Text {
    fn expand(&self, env: &mut Env) -> Result<Phrase> {
        self.0.expand(env)
    }
}
