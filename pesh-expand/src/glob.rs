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

//! Pathname expansion
//!
//! Pathname expansion applies to each field that contains an unquoted `*`,
//! `?`, or `[` after field splitting. The file system walking is the
//! [`Globber`](pesh_env::exec::Globber) collaborator's business: this module
//! only decides whether a field is a pattern, renders it to pattern text
//! with quoted characters backslash-escaped, and falls back to the literal
//! field when nothing matches.

use super::Env;
use super::attr::{AttrChar, Origin};
use pesh_env::semantics::Field;
use pesh_syntax::source::Location;

/// Tests whether the character is special in a glob pattern.
fn is_glob_special(c: char) -> bool {
    matches!(c, '*' | '?' | '[')
}

/// Tests whether a character of the field acts as a pattern character.
fn is_active_pattern_char(c: &AttrChar) -> bool {
    !c.is_quoted && !c.is_quoting && c.origin != Origin::HardExpansion && is_glob_special(c.value)
}

/// Renders the field as pattern text.
///
/// Quoted characters (and hard expansion results) are escaped with a
/// backslash when they would otherwise be special, so the globber sees an
/// unambiguous pattern.
fn pattern_text(chars: &[AttrChar]) -> String {
    let mut result = String::new();
    for c in chars {
        if c.is_quoting {
            continue;
        }
        let literal = c.is_quoted || c.origin == Origin::HardExpansion;
        if literal && (is_glob_special(c.value) || c.value == '\\') {
            result.push('\\');
        }
        result.push(c.value);
    }
    result
}

/// Performs pathname expansion on one field.
///
/// A field without active pattern characters, and a pattern that matches
/// nothing, produce the field itself (with quotes removed).
pub fn glob_field(env: &mut Env, chars: Vec<AttrChar>, origin: &Location) -> Vec<Field> {
    if !chars.iter().any(is_active_pattern_char) {
        return vec![super::finish_field(chars, origin)];
    }

    let pattern = pattern_text(&chars);
    let matches = env.globber.glob(&pattern, &env.inner.working_dir);
    if matches.is_empty() {
        return vec![super::finish_field(chars, origin)];
    }

    matches
        .into_iter()
        .map(|value| Field {
            value,
            origin: origin.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::super::attr::from_str;
    use super::super::tests::TestFixture;
    use super::*;

    #[test]
    fn field_without_pattern_passes_through() {
        let mut fixture = TestFixture::default();
        let mut env = fixture.env();
        let chars = from_str("plain", Origin::Literal, false, false);
        let fields = glob_field(&mut env, chars, &Location::dummy("plain"));
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].value, "plain");
    }

    #[test]
    fn pattern_expands_to_matches() {
        let mut fixture = TestFixture::default();
        fixture.globber.matches.insert(
            "*.rs".to_string(),
            vec!["a.rs".to_string(), "b.rs".to_string()],
        );
        let mut env = fixture.env();
        let chars = from_str("*.rs", Origin::Literal, false, false);
        let fields = glob_field(&mut env, chars, &Location::dummy("*.rs"));
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].value, "a.rs");
        assert_eq!(fields[1].value, "b.rs");
    }

    #[test]
    fn unmatched_pattern_is_literal() {
        let mut fixture = TestFixture::default();
        let mut env = fixture.env();
        let chars = from_str("*.nomatch", Origin::Literal, false, false);
        let fields = glob_field(&mut env, chars, &Location::dummy("*.nomatch"));
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].value, "*.nomatch");
    }

    #[test]
    fn quoted_specials_do_not_glob() {
        let mut fixture = TestFixture::default();
        fixture
            .globber
            .matches
            .insert("*".to_string(), vec!["file".to_string()]);
        let mut env = fixture.env();
        let chars = from_str("*", Origin::Literal, true, false);
        let fields = glob_field(&mut env, chars, &Location::dummy("*"));
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].value, "*");
    }

    #[test]
    fn quoted_specials_are_escaped_in_pattern_text() {
        let mut chars = from_str("*", Origin::Literal, true, false);
        chars.extend(from_str(".rs", Origin::Literal, false, false));
        assert_eq!(pattern_text(&chars), "\\*.rs");
    }
}
