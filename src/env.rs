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

//! JSON-backed environment persistence: save/load a snapshot of user
//! variables and user functions, independent of any particular
//! [`crate::system::SystemInterface`] storage backend.
//!
//! A function variant is stored as its original parameter-list and body
//! token sequences, not as a compiled [`crate::sequence::Sequence`] — a
//! compiled sequence shares state via `Rc` that does not round-trip through
//! JSON, and replaying the declaration through the lexer/compiler on load
//! re-validates it against whatever context is loading it.

use std::collections::BTreeMap;
use std::io::{Read, Write};

use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

use crate::compiler;
use crate::context::Context;
use crate::error::EvalError;
use crate::lexer::tokenize;
use crate::runtime::Runtime;
use crate::token::Token;
use crate::value::RtValue;

/// One `(guard, body)` alternative of a user function, as source tokens.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VariantRecord {
    pub arg_tokens: Vec<Token>,
    pub body_tokens: Vec<Token>,
}

/// A saved environment snapshot.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Environment {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub user_vars: BTreeMap<String, Json>,
    #[serde(default)]
    pub user_funcs: BTreeMap<String, Vec<VariantRecord>>,
}

fn value_to_json(v: &RtValue) -> Option<Json> {
    match v {
        RtValue::Nil => Some(Json::Null),
        RtValue::Bool(b) => Some(Json::from(*b)),
        RtValue::U64(n) => Some(Json::from(*n)),
        RtValue::I64(n) => Some(Json::from(*n)),
        RtValue::F64(n) => serde_json::Number::from_f64(*n).map(Json::Number),
        RtValue::Str(s) => Some(Json::from(s.clone())),
        // Lists and functions are not primitive scalars; they are dropped
        // from a saved snapshot rather than failing the whole save.
        RtValue::List(_) | RtValue::UserFunc(_) | RtValue::BuiltinFunc(_) => None,
    }
}

fn json_to_value(j: &Json) -> RtValue {
    match j {
        Json::Null => RtValue::Nil,
        Json::Bool(b) => RtValue::Bool(*b),
        Json::Number(n) => {
            if let Some(u) = n.as_u64() {
                RtValue::U64(u)
            } else if let Some(i) = n.as_i64() {
                RtValue::I64(i)
            } else {
                RtValue::F64(n.as_f64().unwrap_or(0.0))
            }
        }
        Json::String(s) => RtValue::Str(s.clone()),
        Json::Array(_) | Json::Object(_) => RtValue::Nil,
    }
}

/// Builds a snapshot of the context's current user state.
pub fn capture(ctx: &Context, description: impl Into<String>) -> Environment {
    let mut user_vars = BTreeMap::new();
    for (name, val) in ctx.user.variables() {
        if let Some(j) = value_to_json(val) {
            user_vars.insert(name.clone(), j);
        }
    }

    let mut user_funcs = BTreeMap::new();
    for (name, f) in ctx.user.functions() {
        let records = f
            .variants
            .iter()
            .map(|v| VariantRecord {
                arg_tokens: v.arg_tokens.to_vec(),
                body_tokens: v.body_tokens.to_vec(),
            })
            .collect();
        user_funcs.insert(name.clone(), records);
    }

    Environment { description: description.into(), user_vars, user_funcs }
}

/// Writes `env` as JSON to `w`.
pub fn save(env: &Environment, w: &mut dyn Write) -> Result<(), EvalError> {
    serde_json::to_writer_pretty(w, env)?;
    Ok(())
}

/// Reads an [`Environment`] from JSON.
pub fn read(r: &mut dyn Read) -> Result<Environment, EvalError> {
    let env = serde_json::from_reader(r)?;
    Ok(env)
}

/// Applies every unit in `env` to `ctx`; returns how many variables plus
/// function variants were restored.
pub fn apply_all(ctx: &mut Context, env: &Environment) -> Result<usize, EvalError> {
    let mut count = 0;
    for (name, j) in &env.user_vars {
        ctx.user.set_variable(name, json_to_value(j));
        count += 1;
    }
    for (name, records) in &env.user_funcs {
        for record in records {
            apply_variant(ctx, name, record)?;
            count += 1;
        }
    }
    Ok(count)
}

/// Applies only the units named in `names`: a user variable or user
/// function whose name matches is restored; names matching neither are
/// silently skipped, mirroring a best-effort partial import.
pub fn apply_named(ctx: &mut Context, env: &Environment, names: &[String]) -> Result<usize, EvalError> {
    let mut count = 0;
    for name in names {
        if let Some(j) = env.user_vars.get(name) {
            ctx.user.set_variable(name, json_to_value(j));
            count += 1;
        }
        if let Some(records) = env.user_funcs.get(name) {
            for record in records {
                apply_variant(ctx, name, record)?;
            }
            count += 1;
        }
    }
    Ok(count)
}

/// Reconstitutes `name(args)->body` as source text from a variant's
/// original tokens, then replays it through the lexer, compiler, and
/// runtime exactly as if the user had just typed the declaration.
fn apply_variant(ctx: &mut Context, name: &str, record: &VariantRecord) -> Result<(), EvalError> {
    let args_src: String = record.arg_tokens.iter().map(|t| t.literal.as_str()).collect::<Vec<_>>().join(" ");
    let body_src: String = record.body_tokens.iter().map(|t| t.literal.as_str()).collect::<Vec<_>>().join(" ");

    let source = format!("{}({})->{}", name, args_src, body_src);
    let tokens = tokenize(&source);
    let seq = compiler::compile(ctx, &tokens)?;
    Runtime::new(ctx).execute_sequence(&seq)?;
    Ok(())
}
