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

//! Result of the initial expansion
//!
//! Most expansions produce a single run of characters, but `"$@"` and
//! friends produce any number of fields whose boundaries must be preserved.
//! A [`Phrase`] captures both shapes. Concatenating phrases (as when a word
//! has several units) joins the last field of the left phrase with the first
//! field of the right one, which is exactly how `a"$@"b` distributes over
//! the positional parameters.

use super::attr::AttrChar;

/// Result of the initial expansion
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Phrase {
    /// Single character
    Char(AttrChar),
    /// Single field of any number of characters
    Field(Vec<AttrChar>),
    /// Any number of fields
    ///
    /// `Full(vec![])` is a valid phrase of zero fields, which is the result
    /// of `"$@"` without positional parameters.
    Full(Vec<Vec<AttrChar>>),
}

impl Phrase {
    /// Creates a phrase of one empty field.
    #[must_use]
    pub fn empty_field() -> Phrase {
        Phrase::Field(Vec::new())
    }

    /// Creates a phrase of zero fields.
    #[must_use]
    pub fn zero_fields() -> Phrase {
        Phrase::Full(Vec::new())
    }

    /// Returns the number of fields in the phrase.
    #[must_use]
    pub fn field_count(&self) -> usize {
        match self {
            Phrase::Char(_) | Phrase::Field(_) => 1,
            Phrase::Full(fields) => fields.len(),
        }
    }

    /// Converts the phrase to a vector of fields.
    #[must_use]
    pub fn into_fields(self) -> Vec<Vec<AttrChar>> {
        match self {
            Phrase::Char(c) => vec![vec![c]],
            Phrase::Field(field) => vec![field],
            Phrase::Full(fields) => fields,
        }
    }

    /// Joins the fields into one, separated by the given character.
    ///
    /// The separator is unquoted and of soft-expansion origin, like the
    /// values it separates. A `None` separator joins without anything in
    /// between.
    #[must_use]
    pub fn ifs_join(self, separator: Option<char>) -> Vec<AttrChar> {
        match self {
            Phrase::Char(c) => vec![c],
            Phrase::Field(field) => field,
            Phrase::Full(fields) => {
                let mut result = Vec::new();
                let mut first = true;
                for field in fields {
                    if !first {
                        if let Some(value) = separator {
                            result.push(AttrChar {
                                value,
                                origin: super::attr::Origin::SoftExpansion,
                                is_quoted: false,
                                is_quoting: false,
                            });
                        }
                    }
                    first = false;
                    result.extend(field);
                }
                result
            }
        }
    }

    /// Appends another phrase to this one.
    ///
    /// The last field of `self` and the first field of `other` are
    /// concatenated into one field; other fields keep their boundaries. A
    /// zero-field phrase is an identity on the adjacent field boundary:
    /// appending one leaves `self` unchanged, and appending to one yields
    /// `other`.
    pub fn append(&mut self, other: Phrase) {
        // Fast path for the common single-field cases
        if let (Phrase::Field(lhs), Phrase::Char(c)) = (&mut *self, &other) {
            lhs.push(*c);
            return;
        }

        let mut lhs = std::mem::replace(self, Phrase::zero_fields()).into_fields();
        let rhs = other.into_fields();

        *self = if lhs.is_empty() {
            normalize(rhs)
        } else if rhs.is_empty() {
            normalize(lhs)
        } else {
            let mut rhs = rhs.into_iter();
            lhs.last_mut().unwrap().extend(rhs.next().unwrap());
            lhs.extend(rhs);
            normalize(lhs)
        };
    }
}

fn normalize(mut fields: Vec<Vec<AttrChar>>) -> Phrase {
    if fields.len() == 1 {
        Phrase::Field(fields.pop().unwrap())
    } else {
        Phrase::Full(fields)
    }
}

/// Creates a single-field phrase.
impl From<Vec<AttrChar>> for Phrase {
    fn from(field: Vec<AttrChar>) -> Phrase {
        Phrase::Field(field)
    }
}

impl From<AttrChar> for Phrase {
    fn from(c: AttrChar) -> Phrase {
        Phrase::Char(c)
    }
}

#[cfg(test)]
mod tests {
    use super::super::attr::Origin;
    use super::*;

    fn chars(s: &str) -> Vec<AttrChar> {
        super::super::attr::from_str(s, Origin::SoftExpansion, false, false)
    }

    #[test]
    fn phrase_append_fields() {
        let mut phrase = Phrase::Field(chars("ab"));
        phrase.append(Phrase::Field(chars("cd")));
        assert_eq!(phrase, Phrase::Field(chars("abcd")));
    }

    #[test]
    fn phrase_append_full_to_field() {
        let mut phrase = Phrase::Field(chars("x"));
        phrase.append(Phrase::Full(vec![chars("a"), chars("b")]));
        assert_eq!(phrase, Phrase::Full(vec![chars("xa"), chars("b")]));
    }

    #[test]
    fn phrase_append_field_to_full() {
        let mut phrase = Phrase::Full(vec![chars("a"), chars("b")]);
        phrase.append(Phrase::Field(chars("x")));
        assert_eq!(phrase, Phrase::Full(vec![chars("a"), chars("bx")]));
    }

    #[test]
    fn phrase_append_zero_fields_is_identity() {
        let mut phrase = Phrase::Field(chars("a"));
        phrase.append(Phrase::zero_fields());
        assert_eq!(phrase, Phrase::Field(chars("a")));

        let mut phrase = Phrase::zero_fields();
        phrase.append(Phrase::Field(chars("b")));
        assert_eq!(phrase, Phrase::Field(chars("b")));

        let mut phrase = Phrase::zero_fields();
        phrase.append(Phrase::zero_fields());
        assert_eq!(phrase, Phrase::Full(vec![]));
    }

    #[test]
    fn phrase_ifs_join() {
        let phrase = Phrase::Full(vec![chars("a"), chars("b"), chars("c")]);
        let joined = phrase.ifs_join(Some(':'));
        let text: String = joined.iter().map(|c| c.value).collect();
        assert_eq!(text, "a:b:c");

        let phrase = Phrase::Full(vec![chars("a"), chars("b")]);
        let joined = phrase.ifs_join(None);
        let text: String = joined.iter().map(|c| c.value).collect();
        assert_eq!(text, "ab");
    }

    #[test]
    fn phrase_into_fields() {
        assert_eq!(Phrase::Char(AttrChar::literal('x')).into_fields().len(), 1);
        assert_eq!(Phrase::Field(chars("ab")).into_fields(), vec![chars("ab")]);
        assert_eq!(Phrase::zero_fields().into_fields(), Vec::<Vec<AttrChar>>::new());
    }
}
