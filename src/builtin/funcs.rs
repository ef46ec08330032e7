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

//! Built-in function-registry introspection and housekeeping.

use std::io::Write;

use colored::Colorize;

use crate::context::Context;
use crate::error::EvalError;
use crate::value::RtValue;

/// `funcs()` — lists every user-defined function, one variant per line, and
/// every built-in function with its argument description; returns the
/// combined count.
pub fn funcs(ctx: &mut Context, _args: &[RtValue]) -> Result<RtValue, EvalError> {
    let mut user_names: Vec<&String> = ctx.user.functions().keys().collect();
    user_names.sort();
    let mut builtin_names: Vec<&String> = ctx.builtin.functions().keys().collect();
    builtin_names.sort();

    let highlight = ctx.system.is_highlight_enabled();
    let mut count = 0u64;
    let out = ctx.system.stdout();

    for name in &user_names {
        let f = ctx.user.functions().get(name.as_str()).expect("listed name exists");
        for (i, variant) in f.variants.iter().enumerate() {
            count += 1;
            let heading = if highlight { name.as_str().cyan().to_string() } else { (*name).clone() };
            writeln!(out, "{}#{}({})", heading, i, variant.params.join(", "))?;
        }
    }
    for name in &builtin_names {
        let f = ctx.builtin.functions().get(name.as_str()).expect("listed name exists");
        count += 1;
        let heading = if highlight { name.as_str().green().to_string() } else { (*name).clone() };
        writeln!(out, "{}({}) — {}", heading, f.args, f.desc)?;
    }

    Ok(RtValue::U64(count))
}

/// `rmfunc(name, ...)` — removes each named user function entirely (every
/// variant); returns how many actually existed.
pub fn rmfunc(ctx: &mut Context, args: &[RtValue]) -> Result<RtValue, EvalError> {
    let mut removed = 0u64;
    for arg in args {
        if let RtValue::Str(name) = arg {
            if ctx.user.delete_function(name) {
                removed += 1;
            }
        }
    }
    Ok(RtValue::U64(removed))
}

/// `rmfuncvar(name, index)` — removes a single variant of a user function by
/// its position in `funcs()`'s listing.
pub fn rmfuncvar(ctx: &mut Context, args: &[RtValue]) -> Result<RtValue, EvalError> {
    let name = match args.first() {
        Some(RtValue::Str(s)) => s.clone(),
        _ => return Err(EvalError::runtime("the first argument must be a function name")),
    };
    let idx = match args.get(1) {
        Some(v) => crate::runtime::coerce::to_u64(v) as usize,
        None => return Err(EvalError::runtime("the second argument must be a variant index")),
    };
    Ok(RtValue::Bool(ctx.user.delete_function_variant(&name, idx)))
}

/// `clfuncs()` — removes every user-defined function; returns how many were
/// removed.
pub fn clfuncs(ctx: &mut Context, _args: &[RtValue]) -> Result<RtValue, EvalError> {
    let count = ctx.user.functions().len() as u64;
    ctx.user.clear_functions();
    Ok(RtValue::U64(count))
}
