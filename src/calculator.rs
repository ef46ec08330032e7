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

//! The `Calculator` façade: a `Context` plus the lexer/compiler/runtime
//! pipeline behind one `eval` call.

use crate::builtin;
use crate::compiler;
use crate::context::{BuiltinContainer, Context, UserContainer};
use crate::error::EvalError;
use crate::lexer::tokenize;
use crate::runtime::Runtime;
use crate::system::SystemInterface;
use crate::value::RtValue;

/// Owns a [`Context`] and drives source text through the lexer, compiler,
/// and runtime. This is the library's main entry point.
pub struct Calculator {
    ctx: Context,
}

impl Calculator {
    /// Builds a fresh calculator: a new context with every built-in constant
    /// and function registered.
    pub fn new(system: Box<dyn SystemInterface>) -> Self {
        let mut ctx = Context::new(system);
        builtin::register_constants(&mut ctx);
        builtin::register_functions(&mut ctx);
        Self { ctx }
    }

    /// Lexes, compiles, and runs `source` against this calculator's
    /// context, returning its final value.
    pub fn eval(&mut self, source: &str) -> Result<RtValue, EvalError> {
        let tokens = tokenize(source);
        let seq = compiler::compile(&self.ctx, &tokens)?;
        Runtime::new(&mut self.ctx).execute_sequence(&seq)
    }

    /// The built-in constant/function registry, for introspection (e.g. by
    /// a prediction front-end).
    pub fn builtins(&self) -> &BuiltinContainer {
        &self.ctx.builtin
    }

    /// The user variable/function registry.
    pub fn user(&self) -> &UserContainer {
        &self.ctx.user
    }

    /// Direct access to the underlying context, for callers that need to
    /// drive [`crate::env`] persistence or other lower-level operations.
    pub fn context(&mut self) -> &mut Context {
        &mut self.ctx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::coerce::to_f64;
    use crate::system::DefaultSystem;

    fn calc() -> Calculator {
        Calculator::new(Box::new(DefaultSystem::new()))
    }

    fn eval_num(src: &str) -> f64 {
        let v = calc().eval(src).expect("evaluates");
        to_f64(&v)
    }

    #[test]
    fn arithmetic_precedence() {
        assert_eq!(eval_num("2 + 3 * 4"), 14.0);
    }

    #[test]
    fn hex_bitwise_and() {
        let v = calc().eval("0xFF & 0x0F").expect("evaluates");
        assert_eq!(to_f64(&v), 15.0);
    }

    #[test]
    fn binary_popcount() {
        let v = calc().eval("#0b1011").expect("evaluates");
        assert_eq!(to_f64(&v), 3.0);
    }

    #[test]
    fn local_assignment_then_use() {
        assert_eq!(eval_num("x := 5; x + 1"), 6.0);
    }

    #[test]
    fn user_function_variant_body_runs() {
        assert_eq!(eval_num("sq(n) -> n*n; sq(7)"), 49.0);
    }

    #[test]
    fn guard_selects_variant() {
        let mut c = calc();
        let v = c.eval("f(x) -> x<0; f(x) -> x>=0; f(-3), f(4)").expect("evaluates");
        match v {
            RtValue::List(items) => {
                assert_eq!(items.len(), 2);
                assert!(items.iter().all(|v| matches!(v, RtValue::Bool(true))));
            }
            other => panic!("expected a list of booleans, got {:?}", other),
        }
    }

    #[test]
    fn comma_builds_a_list() {
        let v = calc().eval("(1,2,3)").expect("evaluates");
        match v {
            RtValue::List(items) => {
                let nums: Vec<f64> = items.iter().map(to_f64).collect();
                assert_eq!(nums, vec![1.0, 2.0, 3.0]);
            }
            other => panic!("expected a list, got {:?}", other),
        }
    }

    #[test]
    fn division_by_zero_is_infinite() {
        assert_eq!(eval_num("1 / 0"), f64::INFINITY);
    }

    #[test]
    fn compound_assignment_accumulates() {
        assert_eq!(eval_num("a = 1; a += 2; a"), 3.0);
    }

    #[test]
    fn compile_then_run_is_deterministic() {
        let src = "x := 3; (x + 2) * (x - 1) / 2";
        assert_eq!(eval_num(src), eval_num(src));
    }

    // Precedence monotonicity: a looser-binding operator never steals an
    // operand that a tighter one could still claim between it and its
    // neighbor. `+` is looser than `*`, so `2 + 3 * 4` must parse as
    // `2 + (3 * 4)`, not `(2 + 3) * 4`.
    #[test]
    fn precedence_monotonicity_examples() {
        assert_eq!(eval_num("2 + 3 * 4"), 2.0 + 3.0 * 4.0);
        assert_eq!(eval_num("2 * 3 + 4"), 2.0 * 3.0 + 4.0);
        assert_eq!(eval_num("1 || 0 && 0"), eval_num("1 || (0 && 0)"));
    }

    // Unary prefix: a leading `-` is compiled as a synthetic zero operand
    // followed by a binary minus, so it must agree with the equivalent
    // spelled-out subtraction for any numeric operand.
    #[test]
    fn unary_minus_matches_zero_minus() {
        for x in ["5", "0", "3.25", "0xA"] {
            assert_eq!(eval_num(&format!("-{}", x)), eval_num(&format!("0-{}", x)));
        }
    }
}
