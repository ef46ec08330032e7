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

//! The error type shared by every pipeline stage.

use std::fmt::{self, Display, Formatter};

use crate::token::Token;

/// An error raised while compiling or evaluating an expression.
///
/// Compile errors retain the offending token and its index so a caller can
/// render a caret under it against the original source.
#[derive(Debug)]
pub enum EvalError {
    Compile { token: Token, pos: usize, message: String },
    Runtime(String),
    Io(String),
}

impl EvalError {
    pub fn compile(token: Token, pos: usize, message: impl Into<String>) -> Self {
        EvalError::Compile { token, pos, message: message.into() }
    }

    pub fn runtime(message: impl Into<String>) -> Self {
        EvalError::Runtime(message.into())
    }
}

impl Display for EvalError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            EvalError::Compile { pos, message, .. } => {
                write!(f, "compile error at token {}: {}", pos, message)
            }
            EvalError::Runtime(message) => write!(f, "{}", message),
            EvalError::Io(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for EvalError {}

impl From<std::io::Error> for EvalError {
    fn from(e: std::io::Error) -> Self {
        EvalError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for EvalError {
    fn from(e: serde_json::Error) -> Self {
        EvalError::Io(e.to_string())
    }
}
