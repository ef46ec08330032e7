// This file is part of hexcalc, an expression calculator.
//
// SPDX-License-Identifier: GPL-3.0-or-later
//
// hexcalc is free software: you can redistribute it and/or modify it
// under the terms of the GNU General Public License as published
// by the Free Software Foundation, either version 3 of the License,
// or (at your option) any later version.
//
// hexcalc is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See
// the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with hexcalc.  If not, see <http://www.gnu.org/licenses/>.

//! Lexical tokens.

use serde::{Deserialize, Serialize};

/// The lexical class of a [`Token`].
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum TokenKind {
    /// Number written in scientific notation, e.g. `1.5e10`.
    NumSci,
    /// Number written in decimal, e.g. `42` or `3.14`.
    NumDec,
    /// Number written in hexadecimal, e.g. `0xFF`.
    NumHex,
    /// Number written in binary, e.g. `0b1011`.
    NumBin,
    /// Identifier: a variable, constant, or function name.
    Unit,
    /// Operator glyph, e.g. `+`, `==`, `->`.
    Op,
    /// Flow control: `(` or `)`.
    Ctl,
    /// Quoted string literal.
    Str,
}

/// A single lexical token together with its source literal.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<String>) -> Self {
        Self { kind, literal: literal.into() }
    }
}
