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

//! This crate provides a parser for the shell language used by pesh, an
//! educational POSIX-leaning shell.
//!
//! The [`syntax`] module defines the abstract syntax tree of the language.
//! The [`parser`] module contains the lexer and the recursive descent parser
//! that produce the AST from source code, and the [`source`] module defines
//! how positions in source code are represented in the AST and in
//! diagnostics.
//!
//! The parser covers the POSIX grammar plus the commonly used extensions:
//! arrays, the `[[ ... ]]` extended test, the `(( ... ))` arithmetic command,
//! c-style `for` loops, `select`, process substitution, and ANSI-C quoting.
//! Each extension can be disabled through
//! [`Options`](parser::lex::Options).

pub mod parser;
pub mod source;
pub mod syntax;
