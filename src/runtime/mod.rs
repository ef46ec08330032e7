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

//! Stack-based evaluation of a compiled [`Sequence`].

pub mod coerce;
mod ops;

use std::collections::HashMap;

use crate::context::{Context, UserFunction};
use crate::error::EvalError;
use crate::sequence::{Node, Sequence};
use crate::value::{Payload, RtValue, Value, ValueKind};

/// One evaluation frame: the shared context plus this frame's local
/// variables. A user-function call spawns a fresh `Runtime` with an empty
/// local map; the parent's locals are not visible inside the callee.
pub struct Runtime<'ctx> {
    pub(crate) ctx: &'ctx mut Context,
    locals: HashMap<String, RtValue>,
}

impl<'ctx> Runtime<'ctx> {
    pub fn new(ctx: &'ctx mut Context) -> Self {
        Self { ctx, locals: HashMap::new() }
    }

    /// Evaluates `seq` against this frame, returning its final value
    /// (`Nil` for an empty sequence).
    pub fn execute_sequence(&mut self, seq: &Sequence) -> Result<RtValue, EvalError> {
        let mut stack: Vec<Value> = Vec::with_capacity(6);

        for node in seq.nodes() {
            match node {
                Node::Value(v) => stack.push(v.clone()),
                Node::Operator(op) => {
                    let right = stack
                        .pop()
                        .ok_or_else(|| EvalError::runtime(format!("missing right operand for the {} operator", op.kind)))?;
                    let left = stack
                        .pop()
                        .ok_or_else(|| EvalError::runtime(format!("missing left operand for the {} operator", op.kind)))?;
                    let result = ops::dispatch(self, op.kind, &left, &right)?;
                    stack.push(Value::constant(result, None));
                }
            }
        }

        match stack.pop() {
            None => Ok(RtValue::Nil),
            Some(v) => self.obtain_variable(&v),
        }
    }

    /// Resolves a compiled value node to its runtime value. `Const` nodes
    /// resolve to their carried value; name-bearing nodes are looked up in
    /// the appropriate container. A bare, never-bound name (`VarName` /
    /// `FuncName`) resolves to `Nil` rather than erroring — referencing an
    /// undefined identifier is only a problem if something tries to use the
    /// result, which the caller (an arithmetic or assignment handler) is
    /// free to reject on its own terms.
    pub fn obtain_variable(&self, value: &Value) -> Result<RtValue, EvalError> {
        match value.kind {
            ValueKind::Const => match &value.payload {
                Payload::Value(v) => Ok(v.clone()),
                _ => Ok(RtValue::Nil),
            },
            ValueKind::LocalVar => {
                let name = value.name_str().unwrap_or_default();
                self.locals
                    .get(name)
                    .cloned()
                    .ok_or_else(|| EvalError::runtime(format!("'{}' is not a local variable", name)))
            }
            ValueKind::UserVar => {
                let name = value.name_str().unwrap_or_default();
                self.ctx
                    .user
                    .get_variable(name)
                    .cloned()
                    .ok_or_else(|| EvalError::runtime(format!("'{}' is not a user variable", name)))
            }
            ValueKind::BuiltinConst => {
                let name = value.name_str().unwrap_or_default();
                self.ctx
                    .builtin
                    .get_constant(name)
                    .cloned()
                    .ok_or_else(|| EvalError::runtime(format!("'{}' is not a built-in constant", name)))
            }
            ValueKind::UserFunc => {
                let name = value.name_str().unwrap_or_default();
                self.ctx
                    .user
                    .get_function(name)
                    .cloned()
                    .map(RtValue::UserFunc)
                    .ok_or_else(|| EvalError::runtime(format!("'{}' is not a user function", name)))
            }
            ValueKind::BuiltinFunc => {
                let name = value.name_str().unwrap_or_default();
                if self.ctx.builtin.has_function(name) {
                    Ok(RtValue::BuiltinFunc(name.to_string()))
                } else {
                    Err(EvalError::runtime(format!("'{}' is not a built-in function", name)))
                }
            }
            // Bare unresolved names and captured sub-sequences carry no
            // runtime value of their own.
            ValueKind::VarName | ValueKind::FuncName | ValueKind::FuncArg | ValueKind::FuncBody => {
                Ok(RtValue::Nil)
            }
        }
    }

    /// Writes `val` to the name `variable` refers to. Only `LocalVar` and
    /// `UserVar` targets are assignable.
    pub fn assign_value(&mut self, variable: &Value, val: RtValue) -> Result<(), EvalError> {
        let name = variable.name_str().unwrap_or_default().to_string();
        match variable.kind {
            ValueKind::LocalVar => {
                self.locals.insert(name, val);
                Ok(())
            }
            ValueKind::UserVar => {
                self.ctx.user.set_variable(&name, val);
                Ok(())
            }
            other => Err(EvalError::runtime(format!("{} '{}' is not allowed for assignment", other, name))),
        }
    }

    /// `:=` always binds into the current frame, regardless of whether the
    /// name previously resolved to something else.
    pub fn assign_local_value(&mut self, name: &str, val: RtValue) {
        self.locals.insert(name.to_string(), val);
    }

    /// Dispatches a call to a user-defined function: tries each variant in
    /// declaration order, running its guard in a fresh child frame with the
    /// parameters bound, and executing the first variant whose guard is
    /// true (or, for a list-valued guard, all-true).
    pub fn execute_user_function(&mut self, f: &UserFunction, args: &[RtValue]) -> Result<RtValue, EvalError> {
        for variant in &f.variants {
            if !variant.params.is_empty() && variant.params.len() != args.len() {
                continue;
            }

            let mut child = Runtime::new(&mut *self.ctx);
            for (name, val) in variant.params.iter().zip(args) {
                child.locals.insert(name.clone(), val.clone());
            }

            let guard_val = child.execute_sequence(&variant.guard)?;
            let guard_ok = match &guard_val {
                RtValue::List(items) => items.iter().all(coerce::to_bool),
                other => coerce::to_bool(other),
            };
            if !guard_ok {
                continue;
            }

            return child.execute_sequence(&variant.body);
        }

        Err(EvalError::runtime("unable to find user function variant"))
    }
}
