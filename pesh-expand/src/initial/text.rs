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

//! Initial expansion of text units

use super::super::attr::{AttrChar, Origin};
use super::super::phrase::Phrase;
use super::Env;
use super::Expand;
use super::Result;
use pesh_syntax::syntax::TextUnit::{self, *};

impl Expand for TextUnit {
    fn expand(&self, env: &mut Env) -> Result<Phrase> {
        match self {
            Literal(value) => Ok(Phrase::Char(AttrChar {
                value: *value,
                origin: Origin::Literal,
                is_quoted: false,
                is_quoting: false,
            })),

            Backslashed(value) => Ok(Phrase::Field(vec![
                AttrChar {
                    value: '\\',
                    origin: Origin::Literal,
                    is_quoted: false,
                    is_quoting: true,
                },
                AttrChar {
                    value: *value,
                    origin: Origin::Literal,
                    is_quoted: true,
                    is_quoting: false,
                },
            ])),

            RawParam { param, location } => super::param::expand_raw(env, param, location),

            BracedParam(param) => super::param::expand_braced(env, param),

            CommandSubst { content, location } => {
                super::command_subst::expand(env, content, location)
            }

            Backquote { content, location } => {
                super::command_subst::expand_backquote(env, content, location)
            }

            Arith { content, location } => super::arith::expand(env, content, location),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::super::tests::TestFixture;
    use super::*;

    #[test]
    fn literal_expands_to_itself() {
        let mut fixture = TestFixture::default();
        let mut env = fixture.env();
        let phrase = Literal('x').expand(&mut env).unwrap();
        assert_eq!(phrase, Phrase::Char(AttrChar::literal('x')));
    }

    #[test]
    fn backslashed_produces_quoting_pair() {
        let mut fixture = TestFixture::default();
        let mut env = fixture.env();
        let phrase = Backslashed('$').expand(&mut env).unwrap();
        let fields = phrase.into_fields();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].len(), 2);
        assert!(fields[0][0].is_quoting);
        assert_eq!(fields[0][1].value, '$');
        assert!(fields[0][1].is_quoted);
    }
}
