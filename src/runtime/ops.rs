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

//! Operator handler implementations.
//!
//! Each handler receives the two (still possibly unresolved) compiled
//! [`Value`] nodes popped off the evaluation stack and resolves them itself,
//! mirroring an action-handler table. Arithmetic runs in `f64`, bitwise
//! operators in `u64`, modulo in `i64`.

use std::rc::Rc;

use crate::context::UserFunctionVariant;
use crate::error::EvalError;
use crate::operator::OperatorKind;
use crate::runtime::coerce::{to_bool, to_f64, to_i64, to_u64};
use crate::runtime::Runtime;
use crate::sequence::Sequence;
use crate::value::{Payload, RtValue, Value, ValueKind};

pub fn dispatch(
    rt: &mut Runtime,
    kind: OperatorKind,
    left: &Value,
    right: &Value,
) -> Result<RtValue, EvalError> {
    use OperatorKind::*;
    match kind {
        Sequence => rt.obtain_variable(right),
        DeclFunc => decl_func(rt, left, right),
        Assign => assign(rt, left, right),
        AssignLocal => assign_local(rt, left, right),
        AssignMinus => compound_assign(rt, left, right, |a, b| a - b),
        AssignPlus => compound_assign(rt, left, right, |a, b| a + b),
        AssignMul => compound_assign(rt, left, right, |a, b| a * b),
        AssignDiv => {
            let l = to_f64(&rt.obtain_variable(left)?);
            let r = to_f64(&rt.obtain_variable(right)?);
            let res = signed_divide(l, r);
            rt.assign_value(left, RtValue::F64(res))?;
            Ok(RtValue::F64(res))
        }
        AssignBitAnd => compound_assign_u64(rt, left, right, |a, b| a & b),
        AssignBitOr => compound_assign_u64(rt, left, right, |a, b| a | b),
        Enumerate => enumerate(rt, left, right),
        LogicOr => {
            let l = to_bool(&rt.obtain_variable(left)?);
            let r = to_bool(&rt.obtain_variable(right)?);
            Ok(RtValue::Bool(l || r))
        }
        LogicAnd => {
            let l = to_bool(&rt.obtain_variable(left)?);
            let r = to_bool(&rt.obtain_variable(right)?);
            Ok(RtValue::Bool(l && r))
        }
        Equality => compare(rt, left, right, |a, b| a == b),
        NotEq => compare(rt, left, right, |a, b| a != b),
        More => compare(rt, left, right, |a, b| a > b),
        Less => compare(rt, left, right, |a, b| a < b),
        MoreEq => compare(rt, left, right, |a, b| a >= b),
        LessEq => compare(rt, left, right, |a, b| a <= b),
        Plus => arith(rt, left, right, |a, b| a + b),
        Minus => arith(rt, left, right, |a, b| a - b),
        Multiply => arith(rt, left, right, |a, b| a * b),
        Divide => {
            let l = to_f64(&rt.obtain_variable(left)?);
            let r = to_f64(&rt.obtain_variable(right)?);
            Ok(RtValue::F64(signed_divide(l, r)))
        }
        Modulo => {
            let l = to_i64(&rt.obtain_variable(left)?);
            let r = to_i64(&rt.obtain_variable(right)?);
            if r == 0 {
                // Preserved wart: modulo by zero yields +inf, not an error.
                Ok(RtValue::F64(f64::INFINITY))
            } else {
                Ok(RtValue::I64(l % r))
            }
        }
        Power => {
            let l = to_f64(&rt.obtain_variable(left)?);
            let r = to_f64(&rt.obtain_variable(right)?);
            Ok(RtValue::F64(l.powf(r)))
        }
        BitOr => bitwise(rt, left, right, |a, b| a | b),
        BitAnd => bitwise(rt, left, right, |a, b| a & b),
        BitXor => bitwise(rt, left, right, |a, b| a ^ b),
        BitClear => bitwise(rt, left, right, |a, b| a & !b),
        BitInverse => {
            let r = to_u64(&rt.obtain_variable(right)?);
            Ok(RtValue::U64(!r))
        }
        LeftShift => shift(rt, left, right, |a, n| if n >= 64 { 0 } else { a << n }),
        RightShift => shift(rt, left, right, |a, n| if n >= 64 { 0 } else { a >> n }),
        LogicNot => {
            let r = to_bool(&rt.obtain_variable(right)?);
            Ok(RtValue::Bool(!r))
        }
        Popcnt => {
            let r = to_u64(&rt.obtain_variable(right)?);
            Ok(RtValue::U64(r.count_ones() as u64))
        }
        CallFunc => call_func(rt, left, right),
    }
}

fn signed_divide(left: f64, right: f64) -> f64 {
    if right == 0.0 {
        if left >= 0.0 {
            f64::INFINITY
        } else {
            f64::NEG_INFINITY
        }
    } else {
        left / right
    }
}

fn arith(
    rt: &mut Runtime,
    left: &Value,
    right: &Value,
    f: impl Fn(f64, f64) -> f64,
) -> Result<RtValue, EvalError> {
    let l = to_f64(&rt.obtain_variable(left)?);
    let r = to_f64(&rt.obtain_variable(right)?);
    Ok(RtValue::F64(f(l, r)))
}

fn bitwise(
    rt: &mut Runtime,
    left: &Value,
    right: &Value,
    f: impl Fn(u64, u64) -> u64,
) -> Result<RtValue, EvalError> {
    let l = to_u64(&rt.obtain_variable(left)?);
    let r = to_u64(&rt.obtain_variable(right)?);
    Ok(RtValue::U64(f(l, r)))
}

fn shift(
    rt: &mut Runtime,
    left: &Value,
    right: &Value,
    f: impl Fn(u64, u64) -> u64,
) -> Result<RtValue, EvalError> {
    let l = to_u64(&rt.obtain_variable(left)?);
    let r = to_u64(&rt.obtain_variable(right)?);
    Ok(RtValue::U64(f(l, r)))
}

fn compare(
    rt: &mut Runtime,
    left: &Value,
    right: &Value,
    f: impl Fn(f64, f64) -> bool,
) -> Result<RtValue, EvalError> {
    let l = to_f64(&rt.obtain_variable(left)?);
    let r = to_f64(&rt.obtain_variable(right)?);
    Ok(RtValue::Bool(f(l, r)))
}

fn compound_assign(
    rt: &mut Runtime,
    left: &Value,
    right: &Value,
    f: impl Fn(f64, f64) -> f64,
) -> Result<RtValue, EvalError> {
    let l = to_f64(&rt.obtain_variable(left)?);
    let r = to_f64(&rt.obtain_variable(right)?);
    let res = f(l, r);
    rt.assign_value(left, RtValue::F64(res))?;
    Ok(RtValue::F64(res))
}

fn compound_assign_u64(
    rt: &mut Runtime,
    left: &Value,
    right: &Value,
    f: impl Fn(u64, u64) -> u64,
) -> Result<RtValue, EvalError> {
    let l = to_u64(&rt.obtain_variable(left)?);
    let r = to_u64(&rt.obtain_variable(right)?);
    let res = f(l, r);
    rt.assign_value(left, RtValue::U64(res))?;
    Ok(RtValue::U64(res))
}

fn assign(rt: &mut Runtime, left: &Value, right: &Value) -> Result<RtValue, EvalError> {
    let val = rt.obtain_variable(right)?;
    rt.assign_value(left, val.clone())?;
    Ok(val)
}

fn assign_local(rt: &mut Runtime, left: &Value, right: &Value) -> Result<RtValue, EvalError> {
    let val = rt.obtain_variable(right)?;
    let name = left
        .name_str()
        .ok_or_else(|| EvalError::runtime("':=' target has no name"))?;
    rt.assign_local_value(name, val.clone());
    Ok(val)
}

fn enumerate(rt: &mut Runtime, left: &Value, right: &Value) -> Result<RtValue, EvalError> {
    let left_val = rt.obtain_variable(left)?;
    let right_val = rt.obtain_variable(right)?;

    let mut items = match left_val {
        RtValue::List(v) => v,
        RtValue::Nil => Vec::new(),
        other => vec![other],
    };
    match right_val {
        RtValue::List(v) => items.extend(v),
        RtValue::Nil => {}
        other => items.push(other),
    }
    Ok(RtValue::List(items))
}

fn decl_func(rt: &mut Runtime, left: &Value, right: &Value) -> Result<RtValue, EvalError> {
    let (args_seq, arg_tokens) = match &left.payload {
        Payload::Args(seq, tokens) => (seq.clone(), tokens.clone()),
        _ => return Err(EvalError::runtime("function declaration is missing its argument list")),
    };
    let (body, body_tokens) = match &right.payload {
        Payload::Body(seq, tokens) => (seq.clone(), tokens.clone()),
        _ => return Err(EvalError::runtime("function declaration is missing its body")),
    };

    let mut args_seq: Sequence = (*args_seq).clone();
    let name = args_seq
        .get_value(0)
        .and_then(|v| v.name_str())
        .ok_or_else(|| EvalError::runtime("function declaration is missing its name"))?
        .to_string();

    // Drop the leading function-name node and the trailing synthetic
    // `CallFunc` the compiler speculatively pushes for every `name(` before
    // it can tell a call from a declaration; what remains is the variant's
    // guard (parameter list plus any guard expression).
    let len = args_seq.len();
    let guard = args_seq.extract_subsequence(1, len.saturating_sub(1));
    let params = guard.locals_order().to_vec();

    let variant = UserFunctionVariant {
        params,
        guard: Rc::new(guard),
        body,
        arg_tokens,
        body_tokens,
    };

    let function = rt.ctx.user.set_function_variant(&name, variant);
    Ok(RtValue::UserFunc(function))
}

fn call_func(rt: &mut Runtime, left: &Value, right: &Value) -> Result<RtValue, EvalError> {
    let callee = rt.obtain_variable(left)?;
    let arg_val = rt.obtain_variable(right)?;
    let args = match arg_val {
        RtValue::List(v) => v,
        other => vec![other],
    };

    match callee {
        RtValue::UserFunc(f) => rt.execute_user_function(&f, &args),
        RtValue::BuiltinFunc(name) => {
            let exec = rt
                .ctx
                .builtin
                .get_function(&name)
                .map(|f| f.exec)
                .ok_or_else(|| EvalError::runtime(format!("'{}' is not a built-in function", name)))?;
            exec(rt.ctx, &args)
        }
        other => Err(EvalError::runtime(format!("'{}' is not a function", fmt_callee(left, &other)))),
    }
}

fn fmt_callee(left: &Value, val: &RtValue) -> String {
    left.name_str().map(|s| s.to_string()).unwrap_or_else(|| val.to_string())
}

#[allow(dead_code)]
pub(crate) fn value_kind_is_assignable(kind: ValueKind) -> bool {
    kind.is_assignable()
}
