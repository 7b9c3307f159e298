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

//! Initial expansion of words and word units

use super::super::ErrorCause;
use super::super::attr::{AttrChar, Origin};
use super::super::phrase::Phrase;
use super::Env;
use super::Expand;
use super::Result;
use pesh_syntax::parser::Parser;
use pesh_syntax::parser::lex::Lexer;
use pesh_syntax::source::Source;
use pesh_syntax::syntax::Word;
use pesh_syntax::syntax::WordUnit::{self, *};

const SINGLE_QUOTE: AttrChar = AttrChar {
    value: '\'',
    origin: Origin::Literal,
    is_quoted: false,
    is_quoting: true,
};

/// Adds single quotes around the string.
fn single_quote(value: &str) -> Phrase {
    let mut field = Vec::with_capacity(value.chars().count() + 2);
    field.push(SINGLE_QUOTE);
    field.extend(value.chars().map(|c| AttrChar {
        value: c,
        origin: Origin::Literal,
        is_quoted: true,
        is_quoting: false,
    }));
    field.push(SINGLE_QUOTE);
    Phrase::Field(field)
}

/// Adds double quotes around each field in the phrase.
///
/// This function sets the `is_quoted` flag of the characters in the phrase.
fn double_quote(phrase: &mut Phrase) {
    const QUOTE: AttrChar = AttrChar {
        value: '"',
        origin: Origin::Literal,
        is_quoted: false,
        is_quoting: true,
    };

    fn quote_field(chars: &mut Vec<AttrChar>) {
        for c in chars.iter_mut() {
            c.is_quoted = true;
        }
        chars.reserve_exact(2);
        chars.insert(0, QUOTE);
        chars.push(QUOTE);
    }

    match phrase {
        Phrase::Char(c) => {
            let is_quoted = true;
            let c = AttrChar { is_quoted, ..*c };
            *phrase = Phrase::Field(vec![QUOTE, c, QUOTE]);
        }
        Phrase::Field(chars) => quote_field(chars),
        Phrase::Full(fields) => fields.iter_mut().for_each(quote_field),
    }
}

/// Expands a process substitution.
///
/// The content is parsed and handed to the command runner, which provides
/// the path the substitution expands to. The path is a hard expansion: it
/// is not subject to field splitting or pathname expansion.
fn proc_subst(
    env: &mut Env,
    direction: pesh_syntax::syntax::ProcSubstDirection,
    content: &str,
    location: &pesh_syntax::source::Location,
) -> Result<Phrase> {
    env.check_cancel(location)?;

    let source = Source::ProcSubst {
        original: location.clone(),
    };
    let mut lexer = Lexer::from_memory(content, source);
    let mut parser = Parser::new(&mut lexer);
    let commands = parser.program().map_err(|e| super::super::Error {
        cause: ErrorCause::CommandSubstSyntax(Box::new(e)),
        location: location.clone(),
    })?;

    let path = env
        .runner
        .run_proc_sub(&commands, direction)
        .map_err(|e| super::super::Error {
            cause: ErrorCause::CommandSubstFailure(e),
            location: location.clone(),
        })?;

    Ok(Phrase::Field(super::super::attr::from_str(
        &path,
        Origin::HardExpansion,
        false,
        false,
    )))
}

impl Expand for WordUnit {
    fn expand(&self, env: &mut Env) -> Result<Phrase> {
        match self {
            Unquoted(text_unit) => text_unit.expand(env),

            SingleQuote(value) => Ok(single_quote(value)),

            DoubleQuote(text) => {
                let would_split = std::mem::replace(&mut env.will_split, false);
                let result = text.expand(env);
                env.will_split = would_split;

                let mut phrase = result?;
                double_quote(&mut phrase);
                Ok(phrase)
            }

            DollarSingleQuote(string) => {
                let value: String = string.0.iter().map(|unit| unit.char_value()).collect();
                Ok(single_quote(&value))
            }

            Tilde(name) => Ok(super::tilde::expand(env, name)),

            ProcSubst {
                direction,
                content,
                location,
            } => proc_subst(env, *direction, content, location),
        }
    }
}

/// Expands a word.
///
/// This implementation delegates to `[WordUnit] as Expand`.
impl Expand for Word {
    #[inline]
    fn expand(&self, env: &mut Env) -> Result<Phrase> {
        self.units.expand(env)
    }
}

#[cfg(test)]
mod tests {
    use super::super::super::tests::TestFixture;
    use super::*;

    fn phrase_string(phrase: &Phrase) -> String {
        phrase
            .clone()
            .ifs_join(Some(' '))
            .iter()
            .filter(|c| !c.is_quoting)
            .map(|c| c.value)
            .collect()
    }

    #[test]
    fn single_quote_preserves_value_verbatim() {
        let mut fixture = TestFixture::default();
        fixture.shell.variables.assign("x".to_string(), "y", None).unwrap();
        let mut env = fixture.env();
        let word: Word = "'$x'".parse().unwrap();
        let phrase = word.expand(&mut env).unwrap();
        assert_eq!(phrase_string(&phrase), "$x");
        // All value characters are quoted.
        let fields = phrase.into_fields();
        assert!(fields[0].iter().filter(|c| !c.is_quoting).all(|c| c.is_quoted));
    }

    #[test]
    fn double_quote_suppresses_splitting() {
        let mut fixture = TestFixture::default();
        fixture
            .shell
            .variables
            .assign("x".to_string(), "a b", None)
            .unwrap();
        let mut env = fixture.env();
        let word: Word = "\"$x\"".parse().unwrap();
        let phrase = word.expand(&mut env).unwrap();
        let fields = phrase.into_fields();
        assert_eq!(fields.len(), 1);
        assert!(fields[0].iter().filter(|c| !c.is_quoting).all(|c| c.is_quoted));
    }

    #[test]
    fn dollar_single_quote_decodes_escapes() {
        let mut fixture = TestFixture::default();
        let mut env = fixture.env();
        let word: Word = r"$'a\tb'".parse().unwrap();
        let phrase = word.expand(&mut env).unwrap();
        assert_eq!(phrase_string(&phrase), "a\tb");
    }

    #[test]
    fn mixed_quoting_concatenates() {
        let mut fixture = TestFixture::default();
        fixture
            .shell
            .variables
            .assign("d".to_string(), "D", None)
            .unwrap();
        let mut env = fixture.env();
        let word: Word = r#"a"b"c$d"#.parse().unwrap();
        let phrase = word.expand(&mut env).unwrap();
        assert_eq!(phrase_string(&phrase), "abcD");
    }
}
