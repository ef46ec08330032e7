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

//! A dynamically-typed expression calculator: lexer, shunting-yard
//! compiler, and stack-based runtime over a shared, mutable evaluation
//! context of built-in and user-defined variables and functions.

pub mod builtin;
pub mod calculator;
pub mod compiler;
pub mod context;
pub mod env;
pub mod error;
pub mod lexer;
pub mod operator;
pub mod predict;
pub mod runtime;
pub mod sequence;
pub mod system;
pub mod token;
pub mod value;

pub use calculator::Calculator;
pub use error::EvalError;
pub use value::RtValue;
