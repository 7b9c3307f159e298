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

//! POSIX-compatible pattern matching
//!
//! This module implements the glob pattern matching used by the trim,
//! substitution, and case-modification parameter expansion operators. A
//! pattern is parsed from [`PatternChar`]s, which distinguish quoted
//! characters (always literal) from unquoted ones (special when `*`, `?`,
//! or a bracket expression). Matching works by translating the pattern to
//! an anchored regular expression.
//!
//! Supported syntax:
//!
//! - Any single character (`?`)
//! - Any character sequence (`*`)
//! - Bracket expressions (`[...]`) with ranges (`a-z`), complement
//!   (`[!...]`), and character classes (`[:alpha:]`)

use regex::Regex;

/// Character in a pattern
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PatternChar {
    /// Character that may have a special meaning
    Normal(char),
    /// Character that always matches itself
    Literal(char),
}

impl PatternChar {
    /// Returns the character value.
    #[must_use]
    pub fn char_value(self) -> char {
        match self {
            PatternChar::Normal(c) | PatternChar::Literal(c) => c,
        }
    }
}

/// Tests whether the pattern contains an unquoted special character.
///
/// A pattern without special characters matches only itself, which callers
/// can test with a string comparison instead.
#[must_use]
pub fn has_special(chars: &[PatternChar]) -> bool {
    chars
        .iter()
        .any(|c| matches!(c, PatternChar::Normal('*' | '?' | '[')))
}

/// Appends a regex-escaped character to the string.
fn push_escaped(out: &mut String, c: char) {
    if regex_syntax::is_meta_character(c) {
        out.push('\\');
    }
    out.push(c);
}

/// Appends a character escaped for use inside a regex character class.
fn push_class_escaped(out: &mut String, c: char) {
    if matches!(c, '\\' | ']' | '^' | '[' | '&' | '~' | '-') {
        out.push('\\');
    }
    out.push(c);
}

/// Translates a bracket expression starting at `chars[start]`.
///
/// Returns the regex class and the index just past the closing `]`, or
/// `None` if the expression is not closed (in which case the `[` is an
/// ordinary character).
fn bracket(chars: &[PatternChar], start: usize) -> Option<(String, usize)> {
    use PatternChar::*;
    let mut out = String::from("[");
    let mut i = start + 1;

    if let Some(Normal('!' | '^')) = chars.get(i) {
        out.push('^');
        i += 1;
    }
    // A `]` right after the opening (or the complement marker) is literal.
    if let Some(c) = chars.get(i) {
        if c.char_value() == ']' {
            out.push_str("\\]");
            i += 1;
        }
    }

    loop {
        match chars.get(i)? {
            Normal(']') => {
                out.push(']');
                return Some((out, i + 1));
            }
            Normal('[')
                if chars.get(i + 1).map(|c| c.char_value()) == Some(':') =>
            {
                // Character class like `[:alpha:]`
                let name_start = i + 2;
                let mut j = name_start;
                while let Some(c) = chars.get(j) {
                    if c.char_value() == ':' {
                        break;
                    }
                    j += 1;
                }
                if chars.get(j + 1).map(|c| c.char_value()) == Some(']') {
                    out.push_str("[:");
                    for c in &chars[name_start..j] {
                        out.push(c.char_value());
                    }
                    out.push_str(":]");
                    i = j + 2;
                } else {
                    out.push_str("\\[");
                    i += 1;
                }
            }
            Normal('-') => {
                out.push('-');
                i += 1;
            }
            c => {
                push_class_escaped(&mut out, c.char_value());
                i += 1;
            }
        }
    }
}

/// Translates a pattern to an anchored regular expression string.
fn to_regex(chars: &[PatternChar]) -> String {
    use PatternChar::*;
    let mut out = String::from("(?s)\\A(?:");
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            Normal('*') => out.push_str(".*"),
            Normal('?') => out.push('.'),
            Normal('[') => {
                if let Some((class, next)) = bracket(chars, i) {
                    out.push_str(&class);
                    i = next;
                    continue;
                }
                out.push_str("\\[");
            }
            Normal(c) | Literal(c) => push_escaped(&mut out, c),
        }
        i += 1;
    }
    out.push_str(")\\z");
    out
}

/// Compiled pattern
#[derive(Clone, Debug)]
pub struct Pattern {
    regex: Regex,
}

impl Pattern {
    /// Compiles a pattern.
    ///
    /// Returns `None` when the translated regular expression does not
    /// compile; callers treat such a pattern as matching nothing.
    #[must_use]
    pub fn parse(chars: &[PatternChar]) -> Option<Pattern> {
        let regex = Regex::new(&to_regex(chars)).ok()?;
        Some(Pattern { regex })
    }

    /// Tests whether the pattern matches the whole string.
    #[must_use]
    pub fn matches(&self, s: &str) -> bool {
        self.regex.is_match(s)
    }

    /// Finds the prefix of `s` matched by the pattern.
    ///
    /// Returns the byte length of the matched prefix: the shortest or the
    /// longest one, as requested.
    #[must_use]
    pub fn match_prefix(&self, s: &str, longest: bool) -> Option<usize> {
        let bounds = boundaries(s);
        if longest {
            bounds.iter().rev().copied().find(|&end| self.matches(&s[..end]))
        } else {
            bounds.iter().copied().find(|&end| self.matches(&s[..end]))
        }
    }

    /// Finds the suffix of `s` matched by the pattern.
    ///
    /// Returns the byte index where the matched suffix starts: the shortest
    /// suffix has the largest start index.
    #[must_use]
    pub fn match_suffix(&self, s: &str, longest: bool) -> Option<usize> {
        let bounds = boundaries(s);
        if longest {
            bounds.iter().copied().find(|&start| self.matches(&s[start..]))
        } else {
            bounds.iter().rev().copied().find(|&start| self.matches(&s[start..]))
        }
    }

    /// Finds the leftmost-longest match at or after the given byte index.
    ///
    /// Returns the byte range of the match.
    #[must_use]
    pub fn find_in(&self, s: &str, from: usize) -> Option<(usize, usize)> {
        let bounds = boundaries(s);
        for &start in bounds.iter().filter(|&&b| b >= from) {
            for &end in bounds.iter().rev() {
                if end < start {
                    break;
                }
                if self.matches(&s[start..end]) {
                    return Some((start, end));
                }
            }
        }
        None
    }
}

/// Returns all character boundaries of the string, including both ends.
fn boundaries(s: &str) -> Vec<usize> {
    let mut bounds: Vec<usize> = s.char_indices().map(|(i, _)| i).collect();
    bounds.push(s.len());
    bounds
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(s: &str) -> Pattern {
        let chars: Vec<PatternChar> = s.chars().map(PatternChar::Normal).collect();
        Pattern::parse(&chars).unwrap()
    }

    #[test]
    fn literal_match() {
        let p = pattern("abc");
        assert!(p.matches("abc"));
        assert!(!p.matches("abcd"));
        assert!(!p.matches("ab"));
    }

    #[test]
    fn asterisk() {
        let p = pattern("a*c");
        assert!(p.matches("ac"));
        assert!(p.matches("abc"));
        assert!(p.matches("a///c"));
        assert!(!p.matches("ab"));
    }

    #[test]
    fn question_mark() {
        let p = pattern("a?c");
        assert!(p.matches("abc"));
        assert!(p.matches("axc"));
        assert!(!p.matches("ac"));
    }

    #[test]
    fn bracket_expression() {
        let p = pattern("[abc]");
        assert!(p.matches("a"));
        assert!(p.matches("c"));
        assert!(!p.matches("d"));

        let p = pattern("[a-z]");
        assert!(p.matches("m"));
        assert!(!p.matches("M"));

        let p = pattern("[!a]");
        assert!(p.matches("b"));
        assert!(!p.matches("a"));

        let p = pattern("[[:digit:]]");
        assert!(p.matches("5"));
        assert!(!p.matches("x"));
    }

    #[test]
    fn unclosed_bracket_is_literal() {
        let p = pattern("a[b");
        assert!(p.matches("a[b"));
        assert!(!p.matches("ab"));
    }

    #[test]
    fn quoted_special_characters_are_literal() {
        use PatternChar::*;
        let chars = [Literal('*'), Normal('*')];
        let p = Pattern::parse(&chars).unwrap();
        assert!(p.matches("*"));
        assert!(p.matches("*xyz"));
        assert!(!p.matches("xyz"));
    }

    #[test]
    fn regex_metacharacters_are_not_special() {
        let p = pattern("a.c+");
        assert!(p.matches("a.c+"));
        assert!(!p.matches("abc"));
    }

    #[test]
    fn match_prefix_shortest_and_longest() {
        let p = pattern("*2");
        assert_eq!(p.match_prefix("123123", false), Some(2));
        assert_eq!(p.match_prefix("123123", true), Some(5));
        assert_eq!(p.match_prefix("333", false), None);
    }

    #[test]
    fn match_suffix_shortest_and_longest() {
        let p = pattern("2*");
        assert_eq!(p.match_suffix("123123", false), Some(4));
        assert_eq!(p.match_suffix("123123", true), Some(1));
    }

    #[test]
    fn find_in_leftmost_longest() {
        let p = pattern("b*d");
        assert_eq!(p.find_in("abcdbd", 0), Some((1, 6)));
        assert_eq!(p.find_in("abcdbd", 2), Some((4, 6)));
        assert_eq!(p.find_in("xyz", 0), None);
    }

    #[test]
    fn empty_pattern_matches_empty() {
        let p = pattern("");
        assert!(p.matches(""));
        assert!(!p.matches("a"));
    }
}
