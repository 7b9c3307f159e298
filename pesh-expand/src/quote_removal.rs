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

//! Quote removal
//!
//! The quote removal is the step of the word expansion that removes quote
//! characters from a field. Quote characters were kept through the earlier
//! steps because field splitting and pathname expansion need to know which
//! characters they protect; once those steps are done, the characters whose
//! [`is_quoting`](super::attr::AttrChar::is_quoting) flag is set are
//! dropped.

use super::attr::AttrChar;

/// Performs quote removal on an iterator.
///
/// This function returns an iterator that skips over quoting characters
/// from the original iterator.
pub fn skip_quotes<I>(iter: I) -> impl Iterator<Item = AttrChar>
where
    I: IntoIterator<Item = AttrChar>,
{
    iter.into_iter().filter(|c| !c.is_quoting)
}

/// Performs quote removal on a mutable vector of `AttrChar`s.
///
/// This function removes quoting characters from the vector.
pub fn remove_quotes(chars: &mut Vec<AttrChar>) {
    chars.retain(|c| !c.is_quoting)
}
