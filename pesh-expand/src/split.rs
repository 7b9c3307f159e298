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

//! Field splitting
//!
//! Field splitting divides the result of the initial expansion into fields
//! on `$IFS` characters. Only unquoted characters of
//! [soft-expansion](super::attr::Origin::SoftExpansion) origin act as
//! separators; everything else passes through. Runs of whitespace
//! separators collapse into one delimiter, while each non-whitespace
//! separator delimits a field of its own (possibly empty). A field that
//! would be entirely empty and contains no quoting characters is removed.

mod ifs;

pub use self::ifs::Class;
pub use self::ifs::Ifs;

use super::attr::AttrChar;
use super::attr::Origin;

/// Splits one expansion result into fields.
pub fn split_fields(chars: Vec<AttrChar>, ifs: &Ifs) -> Vec<Vec<AttrChar>> {
    let mut fields = Vec::new();
    let mut current = Vec::new();
    let mut started = false;
    // One non-whitespace separator may be absorbed into a delimiter that
    // already ended a field with whitespace (`a : b` is two fields).
    let mut absorb_non_ws = false;

    for c in chars {
        let is_separator =
            !c.is_quoted && !c.is_quoting && c.origin == Origin::SoftExpansion && ifs.is_ifs(c.value);

        if !is_separator {
            current.push(c);
            started = true;
            absorb_non_ws = false;
            continue;
        }

        if ifs.is_ifs_non_whitespace(c.value) {
            if absorb_non_ws {
                absorb_non_ws = false;
            } else {
                fields.push(std::mem::take(&mut current));
            }
            started = false;
        } else if started {
            fields.push(std::mem::take(&mut current));
            started = false;
            absorb_non_ws = true;
        }
    }
    if started {
        fields.push(current);
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::super::attr::from_str;
    use super::*;

    fn soft(s: &str) -> Vec<AttrChar> {
        from_str(s, Origin::SoftExpansion, false, false)
    }

    fn values(fields: &[Vec<AttrChar>]) -> Vec<String> {
        fields
            .iter()
            .map(|field| field.iter().map(|c| c.value).collect())
            .collect()
    }

    #[test]
    fn split_on_default_ifs() {
        let fields = split_fields(soft("  a  b\tc "), &Ifs::default());
        assert_eq!(values(&fields), ["a", "b", "c"]);
    }

    #[test]
    fn split_empty_input_yields_no_fields() {
        let fields = split_fields(soft(""), &Ifs::default());
        assert_eq!(fields, Vec::<Vec<AttrChar>>::new());

        let fields = split_fields(soft("   "), &Ifs::default());
        assert_eq!(fields, Vec::<Vec<AttrChar>>::new());
    }

    #[test]
    fn split_on_non_whitespace_separator() {
        let ifs = Ifs::new(":");
        let fields = split_fields(soft("a:b"), &ifs);
        assert_eq!(values(&fields), ["a", "b"]);

        let fields = split_fields(soft("a::b"), &ifs);
        assert_eq!(values(&fields), ["a", "", "b"]);

        let fields = split_fields(soft(":a:"), &ifs);
        assert_eq!(values(&fields), ["", "a"]);
    }

    #[test]
    fn split_whitespace_around_non_whitespace_separator() {
        let ifs = Ifs::new(" :");
        let fields = split_fields(soft("a : b"), &ifs);
        assert_eq!(values(&fields), ["a", "b"]);

        let fields = split_fields(soft("a : : b"), &ifs);
        assert_eq!(values(&fields), ["a", "", "b"]);
    }

    #[test]
    fn split_ignores_quoted_separators() {
        let mut chars = soft("a");
        chars.extend(from_str(" ", Origin::SoftExpansion, true, false));
        chars.extend(soft("b"));
        let fields = split_fields(chars, &Ifs::default());
        assert_eq!(values(&fields), ["a b"]);
    }

    #[test]
    fn split_ignores_literal_characters() {
        // A literal space in the word (impossible in practice, but the rule
        // is origin-based) does not split.
        let chars = from_str("a b", Origin::Literal, false, false);
        let fields = split_fields(chars, &Ifs::default());
        assert_eq!(values(&fields), ["a b"]);
    }

    #[test]
    fn split_keeps_field_with_quoting_chars_only() {
        // The field resulting from `""` contains two quoting characters and
        // no value; it must survive splitting as an empty field.
        let quote = AttrChar {
            value: '"',
            origin: Origin::Literal,
            is_quoted: false,
            is_quoting: true,
        };
        let fields = split_fields(vec![quote, quote], &Ifs::default());
        assert_eq!(fields.len(), 1);
    }

    #[test]
    fn split_empty_ifs_does_not_split() {
        let fields = split_fields(soft("a b"), &Ifs::empty());
        assert_eq!(values(&fields), ["a b"]);
    }
}
