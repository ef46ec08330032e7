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

//! The shared evaluation context: built-in and user containers.

use std::collections::HashMap;
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::EvalError;
use crate::sequence::Sequence;
use crate::system::SystemInterface;
use crate::token::Token;
use crate::value::RtValue;

/// A built-in function's native implementation.
pub type BuiltinExec = fn(&mut Context, &[RtValue]) -> Result<RtValue, EvalError>;

/// A registered built-in function: its argument description (for `funcs()`),
/// a one-line description, and its native handler.
#[derive(Clone)]
pub struct BuiltinFunction {
    pub args: &'static str,
    pub desc: &'static str,
    pub exec: BuiltinExec,
}

/// One alternative of a user-defined, multi-variant function.
///
/// `arg_tokens` is the original parameter-list token slice; it is the
/// identity used to decide whether a new declaration replaces this variant
/// in place rather than adding a sibling alternative.
#[derive(Clone, Debug)]
pub struct UserFunctionVariant {
    pub params: Vec<String>,
    pub guard: Rc<Sequence>,
    pub body: Rc<Sequence>,
    pub arg_tokens: Rc<[Token]>,
    pub body_tokens: Rc<[Token]>,
}

/// A user-defined function: an ordered, non-empty list of variants, tried
/// first-match-wins.
#[derive(Clone, Debug, Default)]
pub struct UserFunction {
    pub variants: Vec<UserFunctionVariant>,
}

impl UserFunction {
    /// Appends `variant`, replacing an existing variant with the same
    /// parameter-list token sequence in place.
    pub fn set_variant(&mut self, variant: UserFunctionVariant) {
        if let Some(existing) = self
            .variants
            .iter_mut()
            .find(|v| same_tokens(&v.arg_tokens, &variant.arg_tokens))
        {
            *existing = variant;
        } else {
            self.variants.push(variant);
        }
    }
}

fn same_tokens(a: &[Token], b: &[Token]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x == y)
}

/// The built-in, read-mostly container: constants and functions registered
/// once at startup (see `crate::builtin`).
#[derive(Default)]
pub struct BuiltinContainer {
    functions: HashMap<String, BuiltinFunction>,
    constants: HashMap<String, RtValue>,
}

impl BuiltinContainer {
    pub fn register_function(&mut self, name: &str, f: BuiltinFunction) {
        self.functions.insert(name.to_string(), f);
    }

    pub fn register_constant(&mut self, name: &str, v: RtValue) {
        self.constants.insert(name.to_string(), v);
    }

    pub fn has_function(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn has_constant(&self, name: &str) -> bool {
        self.constants.contains_key(name)
    }

    pub fn get_function(&self, name: &str) -> Option<&BuiltinFunction> {
        self.functions.get(name)
    }

    pub fn get_constant(&self, name: &str) -> Option<&RtValue> {
        self.constants.get(name)
    }

    pub fn functions(&self) -> &HashMap<String, BuiltinFunction> {
        &self.functions
    }

    pub fn constants(&self) -> &HashMap<String, RtValue> {
        &self.constants
    }
}

/// The mutable user container: user variables and user-defined functions.
#[derive(Default)]
pub struct UserContainer {
    functions: HashMap<String, UserFunction>,
    variables: HashMap<String, RtValue>,
}

impl UserContainer {
    pub fn has_function(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn has_variable(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    pub fn set_variable(&mut self, name: &str, v: RtValue) {
        self.variables.insert(name.to_string(), v);
    }

    pub fn get_variable(&self, name: &str) -> Option<&RtValue> {
        self.variables.get(name)
    }

    pub fn delete_variable(&mut self, name: &str) -> bool {
        self.variables.remove(name).is_some()
    }

    pub fn clear_variables(&mut self) {
        self.variables.clear();
    }

    pub fn variables(&self) -> &HashMap<String, RtValue> {
        &self.variables
    }

    pub fn set_function_variant(&mut self, name: &str, variant: UserFunctionVariant) -> UserFunction {
        let entry = self.functions.entry(name.to_string()).or_default();
        entry.set_variant(variant);
        entry.clone()
    }

    pub fn get_function(&self, name: &str) -> Option<&UserFunction> {
        self.functions.get(name)
    }

    pub fn delete_function(&mut self, name: &str) -> bool {
        self.functions.remove(name).is_some()
    }

    pub fn delete_function_variant(&mut self, name: &str, idx: usize) -> bool {
        if let Some(f) = self.functions.get_mut(name) {
            if idx < f.variants.len() {
                f.variants.remove(idx);
                return true;
            }
        }
        false
    }

    pub fn clear_functions(&mut self) {
        self.functions.clear();
    }

    pub fn functions(&self) -> &HashMap<String, UserFunction> {
        &self.functions
    }
}

/// The shared evaluation environment: built-ins, user state, the random
/// source, and the system-interface hook bundle.
pub struct Context {
    pub builtin: BuiltinContainer,
    pub user: UserContainer,
    pub random: StdRng,
    pub system: Box<dyn SystemInterface>,
}

impl Context {
    pub fn new(system: Box<dyn SystemInterface>) -> Self {
        let seed = system.random_seed();
        Self {
            builtin: BuiltinContainer::default(),
            user: UserContainer::default(),
            random: StdRng::seed_from_u64(seed as u64),
            system,
        }
    }
}
