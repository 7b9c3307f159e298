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

//! Tilde expansion semantics

use super::super::attr::{AttrChar, Origin, from_str};
use super::super::phrase::Phrase;
use super::Env;

/// Expands a tilde unit.
///
/// A bare `~` expands to the value of the `HOME` variable. If `HOME` is
/// unset, or the tilde names a user (whose home directory the core cannot
/// look up), the tilde prefix is reproduced literally.
///
/// The result of a successful expansion is a hard expansion: it is not
/// subject to field splitting or pathname expansion.
pub fn expand(env: &Env, name: &str) -> Phrase {
    if name.is_empty() {
        if let Some(home) = env.inner.variables.get_scalar("HOME") {
            return Phrase::Field(from_str(home, Origin::HardExpansion, false, false));
        }
    }

    let mut field = vec![AttrChar {
        value: '~',
        origin: Origin::Literal,
        is_quoted: false,
        is_quoting: false,
    }];
    field.extend(from_str(name, Origin::Literal, false, false));
    Phrase::Field(field)
}

#[cfg(test)]
mod tests {
    use super::super::super::tests::TestFixture;
    use super::*;

    fn phrase_string(phrase: &Phrase) -> String {
        phrase
            .clone()
            .ifs_join(None)
            .iter()
            .map(|c| c.value)
            .collect()
    }

    #[test]
    fn bare_tilde_expands_to_home() {
        let mut fixture = TestFixture::default();
        fixture
            .shell
            .variables
            .assign("HOME".to_string(), "/home/user", None)
            .unwrap();
        let env = fixture.env();
        let phrase = expand(&env, "");
        assert_eq!(phrase_string(&phrase), "/home/user");
    }

    #[test]
    fn bare_tilde_without_home_is_literal() {
        let mut fixture = TestFixture::default();
        let env = fixture.env();
        let phrase = expand(&env, "");
        assert_eq!(phrase_string(&phrase), "~");
    }

    #[test]
    fn named_tilde_is_literal() {
        let mut fixture = TestFixture::default();
        let env = fixture.env();
        let phrase = expand(&env, "alice");
        assert_eq!(phrase_string(&phrase), "~alice");
    }

    #[test]
    fn home_value_is_a_hard_expansion() {
        let mut fixture = TestFixture::default();
        fixture
            .shell
            .variables
            .assign("HOME".to_string(), "/h o/me", None)
            .unwrap();
        let env = fixture.env();
        let phrase = expand(&env, "");
        let fields = phrase.into_fields();
        assert!(fields[0].iter().all(|c| c.origin == Origin::HardExpansion));
    }
}
