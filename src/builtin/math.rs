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

//! Built-in math functions.

use rand::Rng;

use crate::context::Context;
use crate::error::EvalError;
use crate::runtime::coerce::{to_f64, to_i64};
use crate::value::RtValue;

fn arg(args: &[RtValue], i: usize) -> RtValue {
    args.get(i).cloned().unwrap_or(RtValue::Nil)
}

pub fn sin(_ctx: &mut Context, args: &[RtValue]) -> Result<RtValue, EvalError> {
    Ok(RtValue::F64(to_f64(&arg(args, 0)).sin()))
}

pub fn cos(_ctx: &mut Context, args: &[RtValue]) -> Result<RtValue, EvalError> {
    Ok(RtValue::F64(to_f64(&arg(args, 0)).cos()))
}

pub fn tan(_ctx: &mut Context, args: &[RtValue]) -> Result<RtValue, EvalError> {
    Ok(RtValue::F64(to_f64(&arg(args, 0)).tan()))
}

pub fn asin(_ctx: &mut Context, args: &[RtValue]) -> Result<RtValue, EvalError> {
    Ok(RtValue::F64(to_f64(&arg(args, 0)).asin()))
}

pub fn acos(_ctx: &mut Context, args: &[RtValue]) -> Result<RtValue, EvalError> {
    Ok(RtValue::F64(to_f64(&arg(args, 0)).acos()))
}

pub fn atan(_ctx: &mut Context, args: &[RtValue]) -> Result<RtValue, EvalError> {
    Ok(RtValue::F64(to_f64(&arg(args, 0)).atan()))
}

pub fn pow(_ctx: &mut Context, args: &[RtValue]) -> Result<RtValue, EvalError> {
    if args.len() < 2 {
        return Err(EvalError::runtime("not enough arguments"));
    }
    Ok(RtValue::F64(to_f64(&args[0]).powf(to_f64(&args[1]))))
}

pub fn sqrt(_ctx: &mut Context, args: &[RtValue]) -> Result<RtValue, EvalError> {
    Ok(RtValue::F64(to_f64(&arg(args, 0)).sqrt()))
}

pub fn logn(_ctx: &mut Context, args: &[RtValue]) -> Result<RtValue, EvalError> {
    Ok(RtValue::F64(to_f64(&arg(args, 0)).ln()))
}

pub fn log2(_ctx: &mut Context, args: &[RtValue]) -> Result<RtValue, EvalError> {
    Ok(RtValue::F64(to_f64(&arg(args, 0)).log2()))
}

pub fn log10(_ctx: &mut Context, args: &[RtValue]) -> Result<RtValue, EvalError> {
    Ok(RtValue::F64(to_f64(&arg(args, 0)).log10()))
}

pub fn exp(_ctx: &mut Context, args: &[RtValue]) -> Result<RtValue, EvalError> {
    Ok(RtValue::F64(to_f64(&arg(args, 0)).exp()))
}

pub fn round(_ctx: &mut Context, args: &[RtValue]) -> Result<RtValue, EvalError> {
    Ok(RtValue::F64(to_f64(&arg(args, 0)).round()))
}

pub fn ceil(_ctx: &mut Context, args: &[RtValue]) -> Result<RtValue, EvalError> {
    Ok(RtValue::F64(to_f64(&arg(args, 0)).ceil()))
}

pub fn floor(_ctx: &mut Context, args: &[RtValue]) -> Result<RtValue, EvalError> {
    Ok(RtValue::F64(to_f64(&arg(args, 0)).floor()))
}

pub fn popcnt(_ctx: &mut Context, args: &[RtValue]) -> Result<RtValue, EvalError> {
    Ok(RtValue::U64(crate::runtime::coerce::to_u64(&arg(args, 0)).count_ones() as u64))
}

pub fn random(ctx: &mut Context, args: &[RtValue]) -> Result<RtValue, EvalError> {
    match args.len() {
        0 => Ok(RtValue::F64(ctx.random.gen::<f64>())),
        1 => {
            let a = to_i64(&args[0]);
            if a < 0 {
                return Err(EvalError::runtime("the first argument must be positive"));
            }
            Ok(RtValue::I64(ctx.random.gen_range(0..a.max(1))))
        }
        _ => {
            let a = to_i64(&args[0]);
            let b = to_i64(&args[1]);
            if b < a {
                return Err(EvalError::runtime("the first argument must be greater"));
            }
            if b == a {
                return Ok(RtValue::I64(a));
            }
            Ok(RtValue::I64(ctx.random.gen_range(a..b)))
        }
    }
}
