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

//! Attribute stripping
//!
//! The final step of the word expansion converts attributed characters back
//! into a plain string, dropping the attributes.

use super::attr::AttrChar;

/// Converts attributed characters to a string, dropping the attributes.
///
/// Quote removal is a separate concern; pass the characters through
/// [`skip_quotes`](super::quote_removal::skip_quotes) first if quoting
/// characters are to be removed.
pub fn strip<I>(chars: I) -> String
where
    I: IntoIterator<Item = AttrChar>,
{
    chars.into_iter().map(|c| c.value).collect()
}

#[cfg(test)]
mod tests {
    use super::super::attr::{Origin, from_str};
    use super::*;

    #[test]
    fn strip_drops_attributes() {
        let chars = from_str("hello", Origin::SoftExpansion, true, false);
        assert_eq!(strip(chars), "hello");
    }
}
