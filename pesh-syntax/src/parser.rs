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

//! Syntax parser for the shell language
//!
//! This module implements a recursive descent parser with one-token
//! lookahead. The [lexer](lex) provides tokens; grammar rules map one-to-one
//! to methods of [`Parser`]. The principal entry points are
//! [`Parser::command_line`], which parses one logical line and its
//! here-document contents, and [`Parser::program`], which parses a whole
//! script. [`Parser::program_collecting`] additionally recovers from syntax
//! errors and returns a partial result with diagnostics.

mod arith_cmd;
mod case;
mod command;
mod compound_command;
mod core;
mod double_bracket;
mod error;
mod fill;
mod for_loop;
mod from_str;
mod function;
mod grouping;
mod r#if;
pub mod lex;
mod list;
mod pipeline;
mod redir;
mod simple_command;
mod validate;
mod while_loop;

pub use self::core::Config;
pub use self::core::ErrorRecovery;
pub use self::core::Parser;
pub use self::core::Result;
pub use self::error::Error;
pub use self::error::ErrorCause;
pub use self::error::SyntaxError;
pub use self::fill::ensure_here_docs_filled;
pub use self::validate::Warning;
pub use self::validate::WarningCause;
pub use self::validate::validate;
