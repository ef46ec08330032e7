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

//! Built-in user-variable introspection and housekeeping.

use std::io::Write;

use colored::Colorize;

use crate::context::Context;
use crate::error::EvalError;
use crate::value::RtValue;

/// `vars()` — lists every user variable, one per line, then every built-in
/// constant (skipping `help` and `version`, which are reference text rather
/// than values a calculation would use); returns the user-variable count.
pub fn vars(ctx: &mut Context, _args: &[RtValue]) -> Result<RtValue, EvalError> {
    let mut names: Vec<&String> = ctx.user.variables().keys().collect();
    names.sort();
    let highlight = ctx.system.is_highlight_enabled();
    let out = ctx.system.stdout();
    for name in &names {
        let value = ctx.user.get_variable(name.as_str()).expect("listed name exists");
        if highlight {
            writeln!(out, "{} = {}", name.as_str().cyan(), value)?;
        } else {
            writeln!(out, "{} = {}", name, value)?;
        }
    }

    let mut const_names: Vec<&String> = ctx.builtin.constants().keys().collect();
    const_names.sort();
    for name in &const_names {
        if name.as_str() == "help" || name.as_str() == "version" {
            continue;
        }
        let value = ctx.builtin.get_constant(name.as_str()).expect("listed name exists");
        if highlight {
            writeln!(out, "{} = {}", name.as_str().green(), value)?;
        } else {
            writeln!(out, "{} = {}", name, value)?;
        }
    }

    Ok(RtValue::U64(names.len() as u64))
}

/// `rmvar(name, ...)` — removes each named user variable; returns how many
/// actually existed.
pub fn rmvar(ctx: &mut Context, args: &[RtValue]) -> Result<RtValue, EvalError> {
    let mut removed = 0u64;
    for arg in args {
        if let RtValue::Str(name) = arg {
            if ctx.user.delete_variable(name) {
                removed += 1;
            }
        }
    }
    Ok(RtValue::U64(removed))
}

/// `clvars()` — removes every user variable; returns how many were removed.
pub fn clvars(ctx: &mut Context, _args: &[RtValue]) -> Result<RtValue, EvalError> {
    let count = ctx.user.variables().len() as u64;
    ctx.user.clear_variables();
    Ok(RtValue::U64(count))
}
