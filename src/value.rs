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

//! Runtime values and compiled value nodes.

use std::fmt::{self, Display, Formatter};
use std::rc::Rc;

use crate::context::UserFunction;
use crate::sequence::Sequence;
use crate::token::Token;

/// A fully evaluated runtime value.
///
/// This is the dynamically-typed value domain the runtime operates over.
/// Rather than a trait-object design, every member here is a closed,
/// non-extensible variant: the calculator language has a fixed set of value
/// shapes and gains nothing from open dispatch.
#[derive(Clone, Debug)]
pub enum RtValue {
    Nil,
    Bool(bool),
    U64(u64),
    I64(i64),
    F64(f64),
    Str(String),
    List(Vec<RtValue>),
    UserFunc(UserFunction),
    BuiltinFunc(&'static str),
}

impl RtValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            RtValue::Nil => "nil",
            RtValue::Bool(_) => "bool",
            RtValue::U64(_) | RtValue::I64(_) | RtValue::F64(_) => "number",
            RtValue::Str(_) => "string",
            RtValue::List(_) => "list",
            RtValue::UserFunc(_) => "user function",
            RtValue::BuiltinFunc(_) => "built-in function",
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, RtValue::List(_))
    }
}

impl Display for RtValue {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            RtValue::Nil => write!(f, "nil"),
            RtValue::Bool(b) => write!(f, "{}", b),
            RtValue::U64(n) => write!(f, "{}", n),
            RtValue::I64(n) => write!(f, "{}", n),
            RtValue::F64(n) => write!(f, "{}", n),
            RtValue::Str(s) => write!(f, "{}", s),
            RtValue::List(items) => {
                write!(f, "[")?;
                for (i, v) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                write!(f, "]")
            }
            RtValue::UserFunc(_) => write!(f, "<user function>"),
            RtValue::BuiltinFunc(name) => write!(f, "<built-in function {}>", name),
        }
    }
}

/// The kind of a compiled [`Value`] node. Mirrors the taxonomy the compiler
/// resolves identifiers into; see `crate::compiler` for how each is chosen.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ValueKind {
    /// An already-evaluated literal, carried inline in the sequence.
    Const,
    /// An identifier that resolved to nothing at compile time.
    VarName,
    /// An identifier, followed by `(`, that resolved to nothing at compile time.
    FuncName,
    /// A name bound in the current call frame.
    LocalVar,
    /// A name bound in the shared user-variable container.
    UserVar,
    /// A name bound in the built-in constant table.
    BuiltinConst,
    /// A name bound in the shared user-function container.
    UserFunc,
    /// A name bound in the built-in function table.
    BuiltinFunc,
    /// A captured argument-list sub-sequence of a function declaration.
    FuncArg,
    /// A captured body sub-sequence of a function declaration.
    FuncBody,
}

impl ValueKind {
    pub fn is_assignable(self) -> bool {
        matches!(self, ValueKind::LocalVar | ValueKind::UserVar)
    }

    pub fn is_func(self) -> bool {
        matches!(self, ValueKind::UserFunc | ValueKind::BuiltinFunc)
    }
}

impl Display for ValueKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let s = match self {
            ValueKind::Const => "constant value",
            ValueKind::VarName => "variable name",
            ValueKind::FuncName => "function name",
            ValueKind::LocalVar => "local variable",
            ValueKind::UserVar => "user variable",
            ValueKind::BuiltinConst => "built-in constant",
            ValueKind::UserFunc => "user function",
            ValueKind::BuiltinFunc => "built-in function",
            ValueKind::FuncArg => "function arguments",
            ValueKind::FuncBody => "function body",
        };
        write!(f, "{}", s)
    }
}

/// The payload carried by a [`Value`] node, shaped by its [`ValueKind`].
#[derive(Clone, Debug)]
pub enum Payload {
    /// Used by `Const`.
    Value(RtValue),
    /// Used by every name-bearing kind.
    Name(String),
    /// Used by `FuncBody`: a captured, self-contained execution sequence,
    /// plus the original body token slice (needed to serialize a function
    /// variant as source text rather than as a compiled sequence).
    Body(Rc<Sequence>, Rc<[Token]>),
    /// Used by `FuncArg`: the captured argument sequence plus the original
    /// token slice, which is the variant-replacement identity (see
    /// DESIGN.md for why token identity was chosen over structural identity).
    Args(Rc<Sequence>, Rc<[Token]>),
}

/// A compiled value node: one step of postfix output that is not an operator.
#[derive(Clone, Debug)]
pub struct Value {
    pub kind: ValueKind,
    pub payload: Payload,
    /// Index into the original token list, or `None` for synthetic nodes
    /// (injected zero operands, captured sub-sequences).
    pub token_index: Option<usize>,
}

impl Value {
    pub fn constant(v: RtValue, token_index: Option<usize>) -> Self {
        Self { kind: ValueKind::Const, payload: Payload::Value(v), token_index }
    }

    pub fn name(kind: ValueKind, name: impl Into<String>, token_index: usize) -> Self {
        Self { kind, payload: Payload::Name(name.into()), token_index: Some(token_index) }
    }

    pub fn func_body(seq: Sequence, tokens: Rc<[Token]>) -> Self {
        Self {
            kind: ValueKind::FuncBody,
            payload: Payload::Body(Rc::new(seq), tokens),
            token_index: None,
        }
    }

    pub fn func_args(seq: Sequence, tokens: Rc<[Token]>) -> Self {
        Self {
            kind: ValueKind::FuncArg,
            payload: Payload::Args(Rc::new(seq), tokens),
            token_index: None,
        }
    }

    pub fn name_str(&self) -> Option<&str> {
        match &self.payload {
            Payload::Name(s) => Some(s),
            _ => None,
        }
    }
}
