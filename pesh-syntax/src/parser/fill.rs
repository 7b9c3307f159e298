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

//! Here-document completeness pass
//!
//! The parser fills here-document contents when it consumes the newline that
//! terminates the command line. This module provides the final pass that
//! walks a finished AST and verifies that every here-document actually got
//! its content, so that consumers of a [`List`] never observe an unfilled
//! content cell.

use super::core::Result;
use super::error::Error;
use super::error::SyntaxError;
use crate::syntax::Command;
use crate::syntax::CompoundCommand;
use crate::syntax::List;
use crate::syntax::Redir;
use crate::syntax::RedirBody;

fn check_redirs(redirs: &[Redir]) -> Result<()> {
    for redir in redirs {
        if let RedirBody::HereDoc(here_doc) = &redir.body {
            if here_doc.content.get().is_none() {
                return Err(Error {
                    cause: SyntaxError::MissingHereDocContent.into(),
                    location: here_doc.delimiter.location.clone(),
                });
            }
        }
    }
    Ok(())
}

fn check_compound(command: &CompoundCommand) -> Result<()> {
    use CompoundCommand::*;
    match command {
        Grouping(list) | Subshell { body: list, .. } => check_list(list),
        For { body, .. } | ArithFor { body, .. } | Select { body, .. } => check_list(body),
        While { condition, body } | Until { condition, body } => {
            check_list(condition)?;
            check_list(body)
        }
        If {
            condition,
            body,
            elifs,
            r#else,
        } => {
            check_list(condition)?;
            check_list(body)?;
            for elif in elifs {
                check_list(&elif.condition)?;
                check_list(&elif.body)?;
            }
            if let Some(r#else) = r#else {
                check_list(r#else)?;
            }
            Ok(())
        }
        Case { items, .. } => items.iter().try_for_each(|item| check_list(&item.body)),
        Arith { .. } | DoubleBracket(_) => Ok(()),
    }
}

fn check_command(command: &Command) -> Result<()> {
    match command {
        Command::Simple(simple) => check_redirs(&simple.redirs),
        Command::Compound(compound) => {
            check_compound(&compound.command)?;
            check_redirs(&compound.redirs)
        }
        Command::Function(function) => {
            check_compound(&function.body.command)?;
            check_redirs(&function.body.redirs)
        }
    }
}

fn check_list(list: &List) -> Result<()> {
    for item in &list.0 {
        for pipeline in std::iter::once(&item.and_or.first)
            .chain(item.and_or.rest.iter().map(|(_, pipeline)| pipeline))
        {
            for command in &pipeline.commands {
                check_command(command)?;
            }
        }
    }
    Ok(())
}

/// Verifies that every here-document in the AST has its content filled.
///
/// Returns a `MissingHereDocContent` error pointing at the delimiter of the
/// first unfilled here-document, if any.
pub fn ensure_here_docs_filled(list: &List) -> Result<()> {
    check_list(list)
}
