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

//! Post-parse validation
//!
//! This module implements a pass over a parsed [`List`] that detects
//! constructs that are syntactically valid but cannot work at run time, such
//! as `break` outside a loop. The pass produces [warnings](Warning) and
//! never fails; deciding whether to reject the script is the caller's
//! business.

use crate::parser::lex::is_name_char;
use crate::source::Location;
use crate::source::pretty::{Annotation, AnnotationType, MessageBase};
use crate::syntax::Command;
use crate::syntax::CompoundCommand;
use crate::syntax::Fd;
use crate::syntax::List;
use crate::syntax::MaybeLiteral;
use crate::syntax::Redir;
use crate::syntax::SimpleCommand;
use std::borrow::Cow;

/// Types of validation warnings
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum WarningCause {
    /// A function is defined with a name that is not a valid identifier.
    InvalidFunctionName { name: String },
    /// `break` is used outside any loop.
    BreakOutsideLoop,
    /// `continue` is used outside any loop.
    ContinueOutsideLoop,
    /// `return` is used outside any function.
    ReturnOutsideFunction,
    /// A redirection uses a file descriptor beyond the portable range.
    NonPortableFd(Fd),
}

impl WarningCause {
    /// Returns a message describing the warning.
    #[must_use]
    pub fn message(&self) -> Cow<'static, str> {
        use WarningCause::*;
        match self {
            InvalidFunctionName { name } => {
                format!("`{name}` is not a valid function name").into()
            }
            BreakOutsideLoop => "`break` is only meaningful inside a loop".into(),
            ContinueOutsideLoop => "`continue` is only meaningful inside a loop".into(),
            ReturnOutsideFunction => "`return` is only meaningful inside a function".into(),
            NonPortableFd(fd) => {
                format!("file descriptor {fd} is beyond the portable range").into()
            }
        }
    }
}

/// Validation warning with the location of the offending construct
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Warning {
    pub cause: WarningCause,
    pub location: Location,
}

impl MessageBase for Warning {
    fn message_type(&self) -> AnnotationType {
        AnnotationType::Warning
    }

    fn message_title(&self) -> Cow<'_, str> {
        self.cause.message()
    }

    fn main_annotation(&self) -> Annotation<'_> {
        Annotation::new(AnnotationType::Warning, self.cause.message(), &self.location)
    }
}

/// Context of the walk
#[derive(Clone, Copy, Default)]
struct Scope {
    in_loop: bool,
    in_function: bool,
}

fn is_name(s: &str) -> bool {
    !s.is_empty() && !s.starts_with(|c: char| c.is_ascii_digit()) && s.chars().all(is_name_char)
}

fn check_redirs(redirs: &[Redir], warnings: &mut Vec<Warning>) {
    for redir in redirs {
        if let Some(fd) = redir.fd {
            if fd.0 > 9 {
                warnings.push(Warning {
                    cause: WarningCause::NonPortableFd(fd),
                    location: redir.body.operand().location.clone(),
                });
            }
        }
    }
}

fn check_simple(simple: &SimpleCommand, scope: Scope, warnings: &mut Vec<Warning>) {
    check_redirs(&simple.redirs, warnings);

    let Some(word) = simple.words.first() else {
        return;
    };
    let Some(name) = word.to_string_if_literal() else {
        return;
    };
    let cause = match name.as_str() {
        "break" if !scope.in_loop => WarningCause::BreakOutsideLoop,
        "continue" if !scope.in_loop => WarningCause::ContinueOutsideLoop,
        "return" if !scope.in_function => WarningCause::ReturnOutsideFunction,
        _ => return,
    };
    warnings.push(Warning {
        cause,
        location: word.location.clone(),
    });
}

fn check_compound(command: &CompoundCommand, scope: Scope, warnings: &mut Vec<Warning>) {
    use CompoundCommand::*;
    let looped = Scope {
        in_loop: true,
        ..scope
    };
    match command {
        Grouping(list) | Subshell { body: list, .. } => check_list(list, scope, warnings),
        For { body, .. } | ArithFor { body, .. } | Select { body, .. } => {
            check_list(body, looped, warnings)
        }
        While { condition, body } | Until { condition, body } => {
            check_list(condition, looped, warnings);
            check_list(body, looped, warnings);
        }
        If {
            condition,
            body,
            elifs,
            r#else,
        } => {
            check_list(condition, scope, warnings);
            check_list(body, scope, warnings);
            for elif in elifs {
                check_list(&elif.condition, scope, warnings);
                check_list(&elif.body, scope, warnings);
            }
            if let Some(r#else) = r#else {
                check_list(r#else, scope, warnings);
            }
        }
        Case { items, .. } => {
            for item in items {
                check_list(&item.body, scope, warnings);
            }
        }
        Arith { .. } | DoubleBracket(_) => (),
    }
}

fn check_command(command: &Command, scope: Scope, warnings: &mut Vec<Warning>) {
    match command {
        Command::Simple(simple) => check_simple(simple, scope, warnings),
        Command::Compound(compound) => {
            check_compound(&compound.command, scope, warnings);
            check_redirs(&compound.redirs, warnings);
        }
        Command::Function(function) => {
            if let Some(name) = function.name.to_string_if_literal() {
                if !is_name(&name) {
                    warnings.push(Warning {
                        cause: WarningCause::InvalidFunctionName { name },
                        location: function.name.location.clone(),
                    });
                }
            }
            let inner = Scope {
                in_function: true,
                in_loop: false,
            };
            check_compound(&function.body.command, inner, warnings);
            check_redirs(&function.body.redirs, warnings);
        }
    }
}

fn check_list(list: &List, scope: Scope, warnings: &mut Vec<Warning>) {
    for item in &list.0 {
        for pipeline in std::iter::once(&item.and_or.first)
            .chain(item.and_or.rest.iter().map(|(_, pipeline)| pipeline))
        {
            for command in &pipeline.commands {
                check_command(command, scope, warnings);
            }
        }
    }
}

/// Validates a parsed program.
///
/// The returned warnings are ordered by the position of the offending
/// construct in the walk.
#[must_use]
pub fn validate(list: &List) -> Vec<Warning> {
    let mut warnings = Vec::new();
    check_list(list, Scope::default(), &mut warnings);
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn warnings_of(source: &str) -> Vec<Warning> {
        let list: List = source.parse().unwrap();
        validate(&list)
    }

    #[test]
    fn validate_clean_program() {
        let warnings = warnings_of("for i in 1 2; do break; done");
        assert_eq!(warnings, []);

        let warnings = warnings_of("f() { return; }");
        assert_eq!(warnings, []);
    }

    #[test]
    fn validate_break_outside_loop() {
        let warnings = warnings_of("break");
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].cause, WarningCause::BreakOutsideLoop);
    }

    #[test]
    fn validate_continue_in_while_condition_is_fine() {
        let warnings = warnings_of("while continue; do :; done");
        assert_eq!(warnings, []);
    }

    #[test]
    fn validate_return_outside_function() {
        let warnings = warnings_of("if :; then return; fi");
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].cause, WarningCause::ReturnOutsideFunction);
    }

    #[test]
    fn validate_break_in_function_outside_loop() {
        // The function body is a new scope: a loop around the definition
        // does not make `break` inside the body valid.
        let warnings = warnings_of("while :; do f() { break; }; done");
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].cause, WarningCause::BreakOutsideLoop);
    }

    #[test]
    fn validate_non_portable_fd() {
        let warnings = warnings_of("echo x 42>file");
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].cause, WarningCause::NonPortableFd(Fd(42)));
    }
}
