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

//! Lexical analyzer
//!
//! This module implements the shell lexer. The entry point is
//! [`Lexer::token`], which recognizes one token at a time; the sibling
//! submodules implement the recognizers for operators, words, quotations,
//! expansions, and here-document contents.

mod arith;
mod backquote;
mod braced_param;
mod command_subst;
mod core;
mod dollar;
mod dollar_single;
mod heredoc;
mod keyword;
mod modifier;
mod op;
mod raw_param;
mod text;
mod tilde;
mod word;

pub use self::core::Lexer;
pub use self::core::Options;
pub use self::core::Token;
pub use self::core::TokenId;
pub use self::core::WordContext;
pub use self::core::WordLexer;
pub use self::core::is_blank;
pub use self::core::is_token_delimiter_char;
pub use self::keyword::Keyword;
pub use self::keyword::ParseKeywordError;
pub use self::op::Operator;
pub use self::op::TryFromOperatorError;
pub use self::op::is_operator_char;
pub use self::raw_param::is_name_char;
pub use self::raw_param::is_portable_name_char;
