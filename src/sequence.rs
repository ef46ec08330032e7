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

//! The flat postfix execution sequence produced by the compiler.

use std::collections::HashSet;

use crate::operator::Operator;
use crate::value::{Value, ValueKind};

/// One step of a compiled [`Sequence`]: either a value to push, or an
/// operator to apply to the two values on top of the runtime's stack.
#[derive(Clone, Debug)]
pub enum Node {
    Value(Value),
    Operator(Operator),
}

/// A compiled postfix program.
///
/// Besides the flat node list, a sequence tracks which local-variable,
/// user-variable, and user-function names have been *seen* while compiling
/// it, so that a later appearance of the same identifier within one compiled
/// unit resolves consistently even though the actual assignment only takes
/// effect in the shared [`crate::context::Context`] at runtime.
#[derive(Clone, Debug, Default)]
pub struct Sequence {
    nodes: Vec<Node>,
    local_vars: HashSet<String>,
    local_order: Vec<String>,
    user_vars: HashSet<String>,
    user_funcs: HashSet<String>,
}

impl Sequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    fn note_kind(&mut self, kind: ValueKind, name: &str) {
        match kind {
            ValueKind::LocalVar => {
                if self.local_vars.insert(name.to_string()) {
                    self.local_order.push(name.to_string());
                }
            }
            ValueKind::UserVar => {
                self.user_vars.insert(name.to_string());
            }
            ValueKind::UserFunc => {
                self.user_funcs.insert(name.to_string());
            }
            _ => {}
        }
    }

    pub fn append_value(&mut self, v: Value) {
        if let Some(name) = v.name_str() {
            self.note_kind(v.kind, &name.to_string());
        }
        self.nodes.push(Node::Value(v));
    }

    pub fn append_operator(&mut self, op: Operator) {
        self.nodes.push(Node::Operator(op));
    }

    pub fn get_value(&self, idx: usize) -> Option<&Value> {
        match self.nodes.get(idx) {
            Some(Node::Value(v)) => Some(v),
            _ => None,
        }
    }

    pub fn get_operator(&self, idx: usize) -> Option<&Operator> {
        match self.nodes.get(idx) {
            Some(Node::Operator(op)) => Some(op),
            _ => None,
        }
    }

    pub fn set_value(&mut self, idx: usize, v: Value) {
        if let Some(name) = v.name_str() {
            self.note_kind(v.kind, &name.to_string());
        }
        self.nodes[idx] = Node::Value(v);
    }

    pub fn insert_value(&mut self, idx: usize, v: Value) {
        if let Some(name) = v.name_str() {
            self.note_kind(v.kind, &name.to_string());
        }
        self.nodes.insert(idx, Node::Value(v));
    }

    pub fn has_local_variable(&self, name: &str) -> bool {
        self.local_vars.contains(name)
    }

    pub fn has_user_variable(&self, name: &str) -> bool {
        self.user_vars.contains(name)
    }

    pub fn has_user_function(&self, name: &str) -> bool {
        self.user_funcs.contains(name)
    }

    pub fn locals_order(&self) -> &[String] {
        &self.local_order
    }

    /// Explicitly records `name` as a user function, without touching the
    /// node list. Used by the compiler to make a function name visible to
    /// itself before its body has finished compiling, so a recursive call
    /// resolves instead of erroring as an unbound name.
    pub fn mark_user_function(&mut self, name: &str) {
        self.user_funcs.insert(name.to_string());
    }

    /// Removes `[start, end)` from this sequence and returns it as a new,
    /// self-contained sequence.
    ///
    /// Within the extracted range, any bare unresolved name is promoted:
    /// `VarName` becomes `LocalVar` (and is recorded, in order of first
    /// appearance, as a declared local — this *is* how a function's
    /// parameter list is derived) and `FuncName` becomes `UserFunc`. This
    /// promotion always happens, regardless of whether the extracted range
    /// ends up tagged `FuncArg` or `FuncBody` by the caller, so name
    /// resolution inside a captured sub-sequence is never left inconsistent.
    pub fn extract_subsequence(&mut self, start: usize, end: usize) -> Sequence {
        let mut extracted: Vec<Node> = self.nodes.drain(start..end).collect();
        let mut out = Sequence::new();

        for node in extracted.iter_mut() {
            if let Node::Value(val) = node {
                match val.kind {
                    ValueKind::LocalVar | ValueKind::VarName => {
                        let name = val.name_str().unwrap_or_default().to_string();
                        if out.local_vars.insert(name.clone()) {
                            out.local_order.push(name);
                        }
                        if val.kind == ValueKind::VarName {
                            val.kind = ValueKind::LocalVar;
                        }
                    }
                    ValueKind::UserVar => {
                        let name = val.name_str().unwrap_or_default().to_string();
                        out.user_vars.insert(name);
                    }
                    ValueKind::UserFunc | ValueKind::FuncName => {
                        let name = val.name_str().unwrap_or_default().to_string();
                        out.user_funcs.insert(name);
                        if val.kind == ValueKind::FuncName {
                            val.kind = ValueKind::UserFunc;
                        }
                    }
                    _ => {}
                }
            }
        }

        out.nodes = extracted;
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::RtValue;

    #[test]
    fn extract_promotes_bare_names_to_locals() {
        let mut seq = Sequence::new();
        seq.append_value(Value::name(ValueKind::VarName, "n", 0));
        let extracted = seq.extract_subsequence(0, 1);
        assert_eq!(extracted.locals_order(), &["n".to_string()]);
        assert!(extracted.has_local_variable("n"));
        assert_eq!(extracted.get_value(0).unwrap().kind, ValueKind::LocalVar);
    }

    #[test]
    fn extract_removes_range_from_parent() {
        let mut seq = Sequence::new();
        seq.append_value(Value::constant(RtValue::F64(1.0), None));
        seq.append_value(Value::constant(RtValue::F64(2.0), None));
        let extracted = seq.extract_subsequence(1, 2);
        assert_eq!(seq.len(), 1);
        assert_eq!(extracted.len(), 1);
    }
}
