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

//! Initial expansion of command substitutions
//!
//! The lexer captured the substitution content as raw text; this module
//! parses it, hands the AST to the command runner, and turns the captured
//! output into soft-expansion characters with trailing newlines removed.

use super::super::Error;
use super::super::ErrorCause;
use super::super::attr::{Origin, from_str};
use super::super::phrase::Phrase;
use super::Env;
use super::Result;
use pesh_syntax::parser::Parser;
use pesh_syntax::parser::lex::Lexer;
use pesh_syntax::source::Location;
use pesh_syntax::source::Source;
use pesh_syntax::syntax::BackquoteUnit;

/// Expands a command substitution of the form `$(...)`.
pub fn expand(env: &mut Env, content: &str, location: &Location) -> Result<Phrase> {
    env.check_cancel(location)?;

    let source = Source::CommandSubst {
        original: location.clone(),
    };
    let mut lexer = Lexer::from_memory(content, source);
    let mut parser = Parser::new(&mut lexer);
    let commands = parser.program().map_err(|e| Error {
        cause: ErrorCause::CommandSubstSyntax(Box::new(e)),
        location: location.clone(),
    })?;

    let capture = env.runner.run_capture(&commands, None).map_err(|e| Error {
        cause: ErrorCause::CommandSubstFailure(e),
        location: location.clone(),
    })?;
    env.last_command_subst_status = Some(capture.exit_status);

    let output = String::from_utf8_lossy(&capture.stdout);
    let output = output.trim_end_matches('\n');
    Ok(Phrase::Field(from_str(
        output,
        Origin::SoftExpansion,
        false,
        false,
    )))
}

/// Expands a command substitution of the form `` `...` ``.
pub fn expand_backquote(
    env: &mut Env,
    content: &[BackquoteUnit],
    location: &Location,
) -> Result<Phrase> {
    let content: String = content
        .iter()
        .map(|unit| match unit {
            BackquoteUnit::Literal(c) => *c,
            BackquoteUnit::Backslashed(c) => *c,
        })
        .collect();
    expand(env, &content, location)
}
