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

//! Conversions between syntax types
//!
//! This module defines the [`Unquote`] and [`MaybeLiteral`] traits and the
//! conversion from a [`Word`] to an [`Assign`], which is how the parser
//! classifies an assignment word at command position.

use super::*;
use crate::parser::lex::is_name_char;
use std::fmt::Write;

/// Result of [`Unquote::write_unquoted`]
///
/// If there is some quotation in the input, the result is `Ok(true)`. If not,
/// `Ok(false)`. A formatting error is reported as `Err(_)`.
type UnquoteResult = Result<bool, std::fmt::Error>;

/// Removing quotes from syntax without performing expansion
///
/// This trait computes the "unquoted" version of a syntactic element: the
/// string the element denotes when no expansion is performed, with quote
/// characters removed. The second result value tells whether the element
/// contained any quotation; here-document delimiters use it to decide whether
/// the content is subject to expansion.
pub trait Unquote {
    /// Writes the unquoted version to the given writer.
    fn write_unquoted<W: Write>(&self, w: &mut W) -> UnquoteResult;

    /// Returns the unquoted version and whether the original was quoted.
    fn unquote(&self) -> (String, bool) {
        let mut unquoted = String::new();
        let is_quoted = self
            .write_unquoted(&mut unquoted)
            .expect("writing to a string should not fail");
        (unquoted, is_quoted)
    }
}

impl EscapeUnit {
    /// Returns the character value this escape unit denotes.
    #[must_use]
    pub fn char_value(&self) -> char {
        use EscapeUnit::*;
        match self {
            Literal(c) => *c,
            DoubleQuote => '"',
            SingleQuote => '\'',
            Backslash => '\\',
            Alert => '\u{7}',
            Backspace => '\u{8}',
            Escape => '\u{1B}',
            FormFeed => '\u{C}',
            Newline => '\n',
            CarriageReturn => '\r',
            Tab => '\t',
            VerticalTab => '\u{B}',
            Control(b) | Octal(b) | Hex(b) => char::from(*b),
            Unicode(c) => *c,
        }
    }
}

impl Unquote for TextUnit {
    fn write_unquoted<W: Write>(&self, w: &mut W) -> UnquoteResult {
        match self {
            Literal(c) => {
                w.write_char(*c)?;
                Ok(false)
            }
            Backslashed(c) => {
                w.write_char(*c)?;
                Ok(true)
            }
            RawParam { param, .. } => {
                write!(w, "${param}")?;
                Ok(false)
            }
            BracedParam(param) => {
                write!(w, "{param}")?;
                Ok(false)
            }
            CommandSubst { content, .. } => {
                write!(w, "$({content})")?;
                Ok(false)
            }
            Backquote { content, .. } => {
                w.write_char('`')?;
                for unit in content {
                    write!(w, "{unit}")?;
                }
                w.write_char('`')?;
                Ok(false)
            }
            Arith { content, .. } => {
                write!(w, "$((")?;
                let quoted = content.write_unquoted(w)?;
                write!(w, "))")?;
                Ok(quoted)
            }
        }
    }
}

impl Unquote for Text {
    fn write_unquoted<W: Write>(&self, w: &mut W) -> UnquoteResult {
        let mut quoted = false;
        for unit in &self.0 {
            quoted |= unit.write_unquoted(w)?;
        }
        Ok(quoted)
    }
}

impl Unquote for WordUnit {
    fn write_unquoted<W: Write>(&self, w: &mut W) -> UnquoteResult {
        match self {
            Unquoted(inner) => inner.write_unquoted(w),
            SingleQuote(inner) => {
                w.write_str(inner)?;
                Ok(true)
            }
            DoubleQuote(inner) => {
                inner.write_unquoted(w)?;
                Ok(true)
            }
            DollarSingleQuote(inner) => {
                for unit in &inner.0 {
                    w.write_char(unit.char_value())?;
                }
                Ok(true)
            }
            Tilde(name) => {
                write!(w, "~{name}")?;
                Ok(false)
            }
            ProcSubst {
                direction, content, ..
            } => {
                let c = match direction {
                    ProcSubstDirection::In => '<',
                    ProcSubstDirection::Out => '>',
                };
                write!(w, "{c}({content})")?;
                Ok(false)
            }
        }
    }
}

impl Unquote for [WordUnit] {
    fn write_unquoted<W: Write>(&self, w: &mut W) -> UnquoteResult {
        let mut quoted = false;
        for unit in self {
            quoted |= unit.write_unquoted(w)?;
        }
        Ok(quoted)
    }
}

impl Unquote for Word {
    fn write_unquoted<W: Write>(&self, w: &mut W) -> UnquoteResult {
        self.units.write_unquoted(w)
    }
}

/// Error value indicating that a syntactic element is not a literal
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct NotLiteral;

/// Possibly literal syntax element
///
/// A syntactic element is *literal* when it is free of quotations and
/// expansions, so its string value is fixed at parse time. Examples of
/// literal words include `foo` and `12`, while `'single'` and `$x` are not
/// literal.
pub trait MaybeLiteral {
    /// Appends the literal characters to the given container.
    ///
    /// If `self` is not literal, returns `Err(NotLiteral)` and the container
    /// may have been partially extended.
    fn extend_literal<T: Extend<char>>(&self, result: &mut T) -> Result<(), NotLiteral>;

    /// Checks if `self` is literal and, if so, converts to a string.
    fn to_string_if_literal(&self) -> Option<String> {
        let mut result = String::new();
        self.extend_literal(&mut result).ok()?;
        Some(result)
    }
}

impl MaybeLiteral for TextUnit {
    fn extend_literal<T: Extend<char>>(&self, result: &mut T) -> Result<(), NotLiteral> {
        if let Literal(c) = self {
            result.extend(std::iter::once(*c));
            Ok(())
        } else {
            Err(NotLiteral)
        }
    }
}

impl MaybeLiteral for Text {
    fn extend_literal<T: Extend<char>>(&self, result: &mut T) -> Result<(), NotLiteral> {
        self.0
            .iter()
            .try_for_each(|unit| unit.extend_literal(result))
    }
}

impl MaybeLiteral for WordUnit {
    fn extend_literal<T: Extend<char>>(&self, result: &mut T) -> Result<(), NotLiteral> {
        if let Unquoted(inner) = self {
            inner.extend_literal(result)
        } else {
            Err(NotLiteral)
        }
    }
}

impl MaybeLiteral for [WordUnit] {
    fn extend_literal<T: Extend<char>>(&self, result: &mut T) -> Result<(), NotLiteral> {
        self.iter().try_for_each(|unit| unit.extend_literal(result))
    }
}

impl MaybeLiteral for Word {
    fn extend_literal<T: Extend<char>>(&self, result: &mut T) -> Result<(), NotLiteral> {
        self.units.extend_literal(result)
    }
}

/// Tests if a string is a valid variable name.
fn is_name(s: &str) -> bool {
    !s.is_empty()
        && !s.starts_with(|c: char| c.is_ascii_digit())
        && s.chars().all(is_name_char)
}

/// Converts a word token to an assignment.
///
/// The conversion succeeds if the word starts with a valid variable name, an
/// optional bracketed subscript, and an unquoted `=` or `+=`. The subscript
/// may contain quotes and expansions; unquoted `[` and `]` inside it must
/// nest. The remainder of the word becomes the scalar assignment value.
///
/// The location of the resulting `Assign` and its value word refer to the
/// entire assignment word.
impl TryFrom<Word> for Assign {
    type Error = Word;
    fn try_from(word: Word) -> Result<Assign, Word> {
        let mut name = String::new();
        let mut units = word.units.iter().enumerate();

        // Parse the variable name
        let mut next = loop {
            match units.next() {
                Some((_, Unquoted(Literal(c)))) if is_name_char(*c) => name.push(*c),
                other => break other,
            }
        };
        if !is_name(&name) {
            return Err(word);
        }

        // Parse the optional subscript
        let mut index = None;
        if let Some((i, Unquoted(Literal('[')))) = next {
            let start = i + 1;
            let mut depth = 1;
            let end = loop {
                match units.next() {
                    Some((j, Unquoted(Literal(']')))) => {
                        depth -= 1;
                        if depth == 0 {
                            break j;
                        }
                    }
                    Some((_, Unquoted(Literal('[')))) => depth += 1,
                    Some(_) => (),
                    None => return Err(word),
                }
            };
            index = Some(Word {
                units: word.units[start..end].to_vec(),
                location: word.location.clone(),
            });
            next = units.next();
        }

        // Parse the `=` or `+=` operator
        let operator = match next {
            Some((_, Unquoted(Literal('=')))) => AssignOp::Assign,
            Some((_, Unquoted(Literal('+')))) => match units.next() {
                Some((_, Unquoted(Literal('=')))) => AssignOp::Append,
                _ => return Err(word),
            },
            _ => return Err(word),
        };

        let value_units = match units.next() {
            Some((i, _)) => word.units[i..].to_vec(),
            None => Vec::new(),
        };
        let location = word.location;
        let value = Scalar(Word {
            units: value_units,
            location: location.clone(),
        });
        Ok(Assign {
            name,
            index,
            operator,
            value,
            location,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn word(s: &str) -> Word {
        s.parse().unwrap()
    }

    #[test]
    fn word_to_string_if_literal_success() {
        let result = word("foo").to_string_if_literal().unwrap();
        assert_eq!(result, "foo");
    }

    #[test]
    fn word_to_string_if_literal_failure() {
        assert_eq!(word("'quoted'").to_string_if_literal(), None);
        assert_eq!(word("$var").to_string_if_literal(), None);
        assert_eq!(word(r"\escaped").to_string_if_literal(), None);
    }

    #[test]
    fn word_unquote_plain() {
        let (unquoted, is_quoted) = word("foo").unquote();
        assert_eq!(unquoted, "foo");
        assert!(!is_quoted);
    }

    #[test]
    fn word_unquote_quoted() {
        let (unquoted, is_quoted) = word(r#""foo"'bar'\!"#).unquote();
        assert_eq!(unquoted, "foobar!");
        assert!(is_quoted);
    }

    #[test]
    fn assign_try_from_word_without_equal() {
        let word = word("foo");
        let result = Assign::try_from(word.clone()).unwrap_err();
        assert_eq!(result, word);
    }

    #[test]
    fn assign_try_from_word_simple() {
        let assign = Assign::try_from(word("foo=bar")).unwrap();
        assert_eq!(assign.name, "foo");
        assert_eq!(assign.index, None);
        assert_eq!(assign.operator, AssignOp::Assign);
        assert_matches!(assign.value, Scalar(value) => {
            assert_eq!(value.to_string(), "bar");
        });
    }

    #[test]
    fn assign_try_from_word_empty_value() {
        let assign = Assign::try_from(word("x=")).unwrap();
        assert_eq!(assign.name, "x");
        assert_matches!(assign.value, Scalar(value) => {
            assert_eq!(value.units, []);
        });
    }

    #[test]
    fn assign_try_from_word_append() {
        let assign = Assign::try_from(word("x+=1")).unwrap();
        assert_eq!(assign.name, "x");
        assert_eq!(assign.operator, AssignOp::Append);
        assert_matches!(assign.value, Scalar(value) => {
            assert_eq!(value.to_string(), "1");
        });
    }

    #[test]
    fn assign_try_from_word_with_subscript() {
        let assign = Assign::try_from(word("a[1]=x")).unwrap();
        assert_eq!(assign.name, "a");
        let index = assign.index.unwrap();
        assert_eq!(index.to_string(), "1");
        assert_eq!(assign.operator, AssignOp::Assign);
    }

    #[test]
    fn assign_try_from_word_with_quoted_subscript() {
        let assign = Assign::try_from(word(r#"a["k v"]=1"#)).unwrap();
        assert_eq!(assign.name, "a");
        let index = assign.index.unwrap();
        assert_eq!(index.to_string(), r#""k v""#);
        assert_matches!(assign.value, Scalar(value) => {
            assert_eq!(value.to_string(), "1");
        });
    }

    #[test]
    fn assign_try_from_word_with_nested_subscript() {
        let assign = Assign::try_from(word("a[b[1]]=x")).unwrap();
        assert_eq!(assign.name, "a");
        let index = assign.index.unwrap();
        assert_eq!(index.to_string(), "b[1]");
    }

    #[test]
    fn assign_try_from_word_invalid_names() {
        assert_matches!(Assign::try_from(word("=foo")), Err(_));
        assert_matches!(Assign::try_from(word("1a=foo")), Err(_));
        assert_matches!(Assign::try_from(word("a-b=foo")), Err(_));
        assert_matches!(Assign::try_from(word(r#""a"=foo"#)), Err(_));
    }

    #[test]
    fn assign_try_from_word_unclosed_subscript() {
        assert_matches!(Assign::try_from(word("a[1=x")), Err(_));
    }
}
