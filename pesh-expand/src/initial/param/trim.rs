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

//! Pattern-based parameter expansion modifiers
//!
//! This module implements the trim (`${v#p}`, `${v%%p}`), substitution
//! (`${v/p/r}`), and case-conversion (`${v^^}`) modifiers. The pattern word
//! is expanded first; its quoted characters match literally while unquoted
//! `*`, `?`, and bracket expressions are special, and an unquoted backslash
//! quotes the following character.

use super::super::super::Result;
use super::super::super::attr::AttrChar;
use super::super::super::pattern::{Pattern, PatternChar};
use super::Env;
use super::Expand;
use super::ParamValue;
use pesh_syntax::syntax::CaseConv;
use pesh_syntax::syntax::CaseDirection;
use pesh_syntax::syntax::CaseScope;
use pesh_syntax::syntax::Subst;
use pesh_syntax::syntax::Trim;
use pesh_syntax::syntax::TrimLength;
use pesh_syntax::syntax::TrimSide;
use pesh_syntax::syntax::Word;

/// Converts unquoted backslashes to quoting characters.
///
/// Sets the `is_quoting` flag of unquoted backslashes and the `is_quoted`
/// flag of their following characters.
fn apply_escapes(chars: &mut [AttrChar]) {
    for j in 1..chars.len() {
        let i = j - 1;
        if chars[i].value == '\\' && !chars[i].is_quoting && !chars[i].is_quoted {
            chars[i].is_quoting = true;
            chars[j].is_quoted = true;
        }
    }
}

fn to_pattern_chars(chars: &[AttrChar]) -> Vec<PatternChar> {
    chars
        .iter()
        .filter_map(|c| {
            if c.is_quoting {
                None
            } else if c.is_quoted {
                Some(PatternChar::Literal(c.value))
            } else {
                Some(PatternChar::Normal(c.value))
            }
        })
        .collect()
}

/// Expands a pattern word to pattern characters.
fn expand_pattern(env: &mut Env, word: &Word) -> Result<Vec<PatternChar>> {
    let will_split = std::mem::replace(&mut env.will_split, false);
    let result = word.expand(env);
    env.will_split = will_split;
    let phrase = result?;
    let mut chars = phrase.ifs_join(env.join_char());
    apply_escapes(&mut chars);
    Ok(to_pattern_chars(&chars))
}

/// Applies the trim modifier to the value.
pub(super) fn apply_trim(env: &mut Env, trim: &Trim, value: &mut ParamValue) -> Result<()> {
    let chars = expand_pattern(env, &trim.pattern)?;
    let Some(pattern) = Pattern::parse(&chars) else {
        // Treat a broken pattern as a valid pattern that matches nothing.
        return Ok(());
    };
    let longest = trim.length == TrimLength::Longest;

    value.for_each(|s| match trim.side {
        TrimSide::Prefix => {
            if let Some(end) = pattern.match_prefix(s, longest) {
                s.drain(..end);
            }
        }
        TrimSide::Suffix => {
            if let Some(start) = pattern.match_suffix(s, longest) {
                s.truncate(start);
            }
        }
    });
    Ok(())
}

/// Applies the substitution modifier to the value.
pub(super) fn apply_subst(env: &mut Env, subst: &Subst, value: &mut ParamValue) -> Result<()> {
    let chars = expand_pattern(env, &subst.pattern)?;
    let Some(pattern) = Pattern::parse(&chars) else {
        return Ok(());
    };
    let replacement = match &subst.replacement {
        Some(word) => super::expand_to_string(env, word)?,
        None => String::new(),
    };

    value.for_each(|s| {
        let mut result = String::new();
        let mut position = 0;
        loop {
            let Some((start, end)) = pattern.find_in(s, position) else {
                break;
            };
            result.push_str(&s[position..start]);
            result.push_str(&replacement);
            if end == start {
                // An empty match must not loop forever.
                match s[end..].chars().next() {
                    Some(c) => {
                        result.push(c);
                        position = end + c.len_utf8();
                    }
                    None => {
                        position = end;
                        break;
                    }
                }
            } else {
                position = end;
            }
            if !subst.all {
                break;
            }
        }
        result.push_str(&s[position..]);
        *s = result;
    });
    Ok(())
}

/// Applies the case-conversion modifier to the value.
pub(super) fn apply_case(conv: CaseConv, value: &mut ParamValue) {
    fn convert(direction: CaseDirection, c: char) -> String {
        match direction {
            CaseDirection::Upper => c.to_uppercase().collect(),
            CaseDirection::Lower => c.to_lowercase().collect(),
        }
    }

    value.for_each(|s| match conv.scope {
        CaseScope::All => {
            *s = s.chars().map(|c| convert(conv.direction, c)).collect();
        }
        CaseScope::First => {
            let mut chars = s.chars();
            if let Some(first) = chars.next() {
                let mut result = convert(conv.direction, first);
                result.push_str(chars.as_str());
                *s = result;
            }
        }
    });
}
