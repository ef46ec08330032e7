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

//! The built-in constant and function registry.
//!
//! A flat list of name-to-implementation bindings registered once into a
//! fresh [`Context`].

mod funcs;
mod math;
mod sys;
mod vars;

use crate::context::{BuiltinFunction, Context};
use crate::value::RtValue;

const HELP_TEXT: &str = "Type in the expression you want to calc and press Enter to get the result.\n\tTo define a variable type its name and assign the value with '=' operator.\n\tType 'funcs()' to see all available functions.\n\tType 'vars()' to see all available variables.";

/// Registers every built-in constant (`nil`, `inf`, `nan`, `pi`, `e`, `true`,
/// `false`, `help`, `version`) into `ctx`.
pub fn register_constants(ctx: &mut Context) {
    ctx.builtin.register_constant("nil", RtValue::Nil);
    ctx.builtin.register_constant("inf", RtValue::F64(f64::INFINITY));
    ctx.builtin.register_constant("nan", RtValue::F64(f64::NAN));
    ctx.builtin.register_constant("pi", RtValue::F64(std::f64::consts::PI));
    ctx.builtin.register_constant("e", RtValue::F64(std::f64::consts::E));
    ctx.builtin.register_constant("true", RtValue::Bool(true));
    ctx.builtin.register_constant("false", RtValue::Bool(false));
    ctx.builtin.register_constant("help", RtValue::Str(HELP_TEXT.to_string()));
    ctx.builtin.register_constant("version", RtValue::Str(env!("CARGO_PKG_VERSION").to_string()));
}

/// Registers every built-in function into `ctx`.
pub fn register_functions(ctx: &mut Context) {
    let table: &[(&str, &str, &str, crate::context::BuiltinExec)] = &[
        ("sin", "(x)", "The sine of the radian argument x", math::sin),
        ("cos", "(x)", "The cosine of the radian argument x", math::cos),
        ("tan", "(x)", "The tangent of the radian argument x", math::tan),
        ("asin", "(x)", "The arcsine of the radian argument x", math::asin),
        ("acos", "(x)", "The arccosine of the radian argument x", math::acos),
        ("atan", "(x)", "The arctangent of the radian argument x", math::atan),
        ("pow", "(x,y)", "The base-x exponential of y", math::pow),
        ("sqrt", "(x)", "The square root of x", math::sqrt),
        ("exp", "(x)", "The base-e exponential of x", math::exp),
        ("logn", "(x)", "The natural logarithm of x", math::logn),
        ("log2", "(x)", "The binary logarithm of x", math::log2),
        ("log10", "(x)", "The decimal logarithm of x", math::log10),
        ("round", "(x)", "The nearest integer, rounding half away from zero", math::round),
        ("ceil", "(x)", "The least integer value greater than or equal to x", math::ceil),
        ("floor", "(x)", "The greatest integer value less than or equal to x", math::floor),
        ("rand", "(a,b)", "The random number in the range [a,b) or [0,1) if no arguments are passed", math::random),
        ("popcnt", "(x)", "The number of one bits (\"population count\") in x", math::popcnt),
        ("vars", "()", "List available variables", vars::vars),
        ("rmvar", "(name)", "Delete a specific user variable", vars::rmvar),
        ("clvars", "()", "Delete user defined variables", vars::clvars),
        ("funcs", "()", "List available functions", funcs::funcs),
        ("rmfunc", "(name)", "Delete a specific user function", funcs::rmfunc),
        ("rmfuncvar", "(name,varid)", "Delete a specific user function variation", funcs::rmfuncvar),
        ("clfuncs", "()", "Delete user defined functions", funcs::clfuncs),
        ("save", "(id,comment)", "Save working environment with id and optional comment", sys::save),
        ("load", "(id)", "Load working environment with id", sys::load),
        ("import", "(id,unit)", "Import unit from the working environment with id", sys::import),
        ("envs", "()", "List all available environments", sys::envs),
        ("clear", "()", "Clear screen", sys::clear),
        ("exit", "(code)", "Exit with error code", sys::exit),
    ];

    for (name, args, desc, exec) in table.iter().copied() {
        ctx.builtin.register_function(name, BuiltinFunction { args, desc, exec });
    }
}
