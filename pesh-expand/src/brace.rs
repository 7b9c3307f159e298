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

//! Brace expansion
//!
//! Brace expansion is purely syntactic: it operates on the unquoted literal
//! characters of a word before any other expansion and produces one or more
//! words. A brace expression is either a comma list (`{a,b,c}`) or a
//! sequence (`{1..5}`, `{a..e}`, `{1..9..2}`). Quoted characters and
//! embedded expansions never form brace expressions, but may appear in the
//! preamble, postscript, or alternatives.

use pesh_syntax::syntax::TextUnit::Literal;
use pesh_syntax::syntax::Word;
use pesh_syntax::syntax::WordUnit::{self, Unquoted};

/// Tests if the unit is the given unquoted literal character.
fn is_literal(unit: &WordUnit, value: char) -> bool {
    matches!(unit, Unquoted(Literal(c)) if *c == value)
}

/// Extracts the literal string of a unit slice, if it is all literal.
fn literal_string(units: &[WordUnit]) -> Option<String> {
    let mut result = String::new();
    for unit in units {
        match unit {
            Unquoted(Literal(c)) => result.push(*c),
            _ => return None,
        }
    }
    Some(result)
}

/// Parses a sequence expression (`x..y` or `x..y..step`).
///
/// Both endpoints must be integers, or both single letters of the same
/// case. The step, if given, must be a non-zero integer.
fn sequence(content: &str) -> Option<Vec<String>> {
    let mut parts = content.split("..");
    let from = parts.next()?;
    let to = parts.next()?;
    let step = match parts.next() {
        Some(step) => {
            let step: i64 = step.parse().ok()?;
            if step == 0 {
                return None;
            }
            step.unsigned_abs()
        }
        None => 1,
    };
    if parts.next().is_some() {
        return None;
    }

    if let (Ok(from), Ok(to)) = (from.parse::<i64>(), to.parse::<i64>()) {
        let mut values = Vec::new();
        let mut i = from;
        if from <= to {
            while i <= to {
                values.push(i.to_string());
                i = i.checked_add(step as i64)?;
            }
        } else {
            while i >= to {
                values.push(i.to_string());
                i = i.checked_sub(step as i64)?;
            }
        }
        return Some(values);
    }

    let (from, to) = (single_letter(from)?, single_letter(to)?);
    let (from, to) = (from as u32, to as u32);
    let step = step as u32;
    let mut values = Vec::new();
    let mut i = from;
    if from <= to {
        while i <= to {
            values.push(char::from_u32(i)?.to_string());
            i += step;
        }
    } else {
        while i >= to {
            values.push(char::from_u32(i)?.to_string());
            i = i.checked_sub(step)?;
        }
    }
    Some(values)
}

fn single_letter(s: &str) -> Option<char> {
    let mut chars = s.chars();
    let c = chars.next()?;
    (chars.next().is_none() && c.is_ascii_alphabetic()).then_some(c)
}

/// Converts a string to literal word units.
fn literal_units(s: &str) -> Vec<WordUnit> {
    s.chars().map(|c| Unquoted(Literal(c))).collect()
}

/// Expands the first brace expression of the unit sequence, recursively.
fn expand_units(units: &[WordUnit]) -> Vec<Vec<WordUnit>> {
    // Find a `{` with a matching `}` that makes a valid brace expression
    for open in 0..units.len() {
        if !is_literal(&units[open], '{') {
            continue;
        }

        let mut depth = 0;
        let mut commas = Vec::new();
        let mut close = None;
        for (offset, unit) in units[open + 1..].iter().enumerate() {
            let j = open + 1 + offset;
            if is_literal(unit, '{') {
                depth += 1;
            } else if is_literal(unit, '}') {
                if depth == 0 {
                    close = Some(j);
                    break;
                }
                depth -= 1;
            } else if is_literal(unit, ',') && depth == 0 {
                commas.push(j);
            }
        }
        let Some(close) = close else { continue };

        let alternatives: Vec<Vec<WordUnit>> = if commas.is_empty() {
            // Maybe a sequence expression
            let Some(content) = literal_string(&units[open + 1..close]) else {
                continue;
            };
            let Some(values) = sequence(&content) else {
                continue;
            };
            values.iter().map(|v| literal_units(v)).collect()
        } else {
            let mut alternatives = Vec::new();
            let mut start = open + 1;
            for &comma in &commas {
                alternatives.push(units[start..comma].to_vec());
                start = comma + 1;
            }
            alternatives.push(units[start..close].to_vec());
            alternatives
        };

        // The postscript may contain further brace expressions.
        let suffixes = expand_units(&units[close + 1..]);
        let mut results = Vec::new();
        for alternative in &alternatives {
            // Each alternative is itself subject to brace expansion.
            for expanded in expand_units(alternative) {
                for suffix in &suffixes {
                    let mut result = units[..open].to_vec();
                    result.extend(expanded.iter().cloned());
                    result.extend(suffix.iter().cloned());
                    results.push(result);
                }
            }
        }
        return results;
    }

    vec![units.to_vec()]
}

/// Performs brace expansion on a word.
///
/// The result has at least one word. When the word contains no brace
/// expression, it is returned unchanged.
#[must_use]
pub fn expand_word_braces(word: &Word) -> Vec<Word> {
    if !word.units.iter().any(|unit| is_literal(unit, '{')) {
        return vec![word.clone()];
    }

    expand_units(&word.units)
        .into_iter()
        .map(|units| Word {
            units,
            location: word.location.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expansions_of(word: &str) -> Vec<String> {
        let word: Word = word.parse().unwrap();
        expand_word_braces(&word)
            .iter()
            .map(Word::to_string)
            .collect()
    }

    #[test]
    fn no_braces() {
        assert_eq!(expansions_of("plain"), ["plain"]);
    }

    #[test]
    fn simple_list() {
        assert_eq!(expansions_of("{a,b,c}"), ["a", "b", "c"]);
    }

    #[test]
    fn preamble_and_postscript() {
        assert_eq!(expansions_of("x{a,b}y"), ["xay", "xby"]);
    }

    #[test]
    fn empty_alternative() {
        assert_eq!(expansions_of("a{,x}"), ["a", "ax"]);
    }

    #[test]
    fn nested_braces() {
        assert_eq!(expansions_of("{a,b{c,d}}"), ["a", "bc", "bd"]);
    }

    #[test]
    fn multiple_expressions() {
        assert_eq!(expansions_of("{a,b}{1,2}"), ["a1", "a2", "b1", "b2"]);
    }

    #[test]
    fn numeric_sequence() {
        assert_eq!(expansions_of("{1..5}"), ["1", "2", "3", "4", "5"]);
        assert_eq!(expansions_of("{5..1}"), ["5", "4", "3", "2", "1"]);
        assert_eq!(expansions_of("{-1..1}"), ["-1", "0", "1"]);
    }

    #[test]
    fn numeric_sequence_with_step() {
        assert_eq!(expansions_of("{1..9..2}"), ["1", "3", "5", "7", "9"]);
        assert_eq!(expansions_of("{9..1..3}"), ["9", "6", "3"]);
    }

    #[test]
    fn alphabetic_sequence() {
        assert_eq!(expansions_of("{a..e}"), ["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn braces_without_comma_are_literal() {
        assert_eq!(expansions_of("{abc}"), ["{abc}"]);
        assert_eq!(expansions_of("{}"), ["{}"]);
    }

    #[test]
    fn unmatched_brace_is_literal() {
        assert_eq!(expansions_of("{a,b"), ["{a,b"]);
        // An unmatched opener before a valid expression does not defeat it.
        assert_eq!(expansions_of("{x{a,b}"), ["{xa", "{xb"]);
    }

    #[test]
    fn quoted_braces_are_literal() {
        assert_eq!(expansions_of("'{a,b}'"), ["'{a,b}'"]);
        assert_eq!(expansions_of("\"{a,b}\""), ["\"{a,b}\""]);
    }

    #[test]
    fn expansions_may_appear_in_alternatives() {
        assert_eq!(expansions_of("{$x,b}"), ["$x", "b"]);
    }

    #[test]
    fn comma_in_expansion_does_not_split() {
        // The comma inside the parameter expansion is not a brace comma.
        assert_eq!(expansions_of("{${a},b}"), ["${a}", "b"]);
    }
}
