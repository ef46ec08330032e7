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

//! Shunting-yard compiler: tokens to a flat postfix [`Sequence`].

use std::rc::Rc;

use crate::context::Context;
use crate::error::EvalError;
use crate::operator::{Flow, Operator, OperatorKind};
use crate::sequence::Sequence;
use crate::token::{Token, TokenKind};
use crate::value::{RtValue, Value, ValueKind};

/// A bookmark recording where a pending function call or declaration began:
/// the token index it started at, and the sequence length at that point.
#[derive(Clone, Copy)]
struct Bookmark {
    token_pos: usize,
    sequence_pos: usize,
}

enum StackEntry {
    Op(Operator),
    Flow(Flow),
}

/// Compiles `tokens` against `ctx` (used only to resolve identifiers to
/// built-in constants/functions; nothing is mutated).
pub fn compile(ctx: &Context, tokens: &[Token]) -> Result<Sequence, EvalError> {
    let mut seq = Sequence::new();

    if tokens.is_empty() {
        return Ok(seq);
    }

    if tokens.last().unwrap().kind == TokenKind::Op {
        let t = tokens.last().unwrap().clone();
        let op_kind = OperatorKind::parse(&t.literal)
            .ok_or_else(|| EvalError::compile(t.clone(), tokens.len() - 1, format!("unknown operator '{}'", t.literal)))?;
        return Err(EvalError::compile(
            t,
            tokens.len() - 1,
            format!("missing right operand for the {} operator", op_kind),
        ));
    }

    let mut op_stack: Vec<StackEntry> = Vec::with_capacity(tokens.len() / 3 + 1);
    let mut decl_stack: Vec<Bookmark> = Vec::new();
    let mut func_stack: Vec<Bookmark> = Vec::new();

    for (ti, t) in tokens.iter().enumerate() {
        match t.kind {
            TokenKind::Op => {
                let op_type = OperatorKind::parse(&t.literal)
                    .ok_or_else(|| EvalError::compile(t.clone(), ti, format!("unknown operator '{}'", t.literal)))?;

                let prev_is_op = ti == 0 || tokens[ti - 1].kind == TokenKind::Op;
                if prev_is_op {
                    if !op_type.is_unary() {
                        return Err(EvalError::compile(
                            t.clone(),
                            ti,
                            format!("missing left operand for the {} operator", op_type),
                        ));
                    }
                    seq.append_value(Value::constant(RtValue::F64(0.0), None));
                }

                drain_while_tighter(&mut op_stack, &mut decl_stack, &mut seq, op_type, tokens, ti);

                if op_type.is_assign() {
                    let idx = seq.len();
                    if idx == 0 {
                        return Err(EvalError::compile(t.clone(), ti, "there is no variable for assignment"));
                    }
                    let mut last = seq
                        .get_value(idx - 1)
                        .ok_or_else(|| EvalError::compile(t.clone(), ti, "there is no variable for assignment"))?
                        .clone();
                    if last.kind == ValueKind::Const {
                        let prev = tokens[ti - 1].clone();
                        return Err(EvalError::compile(
                            prev,
                            ti - 1,
                            format!("'{}' is not assignable", tokens[ti - 1].literal),
                        ));
                    }
                    if op_type == OperatorKind::AssignLocal {
                        last.kind = ValueKind::LocalVar;
                    } else if op_type == OperatorKind::Assign {
                        last.kind = ValueKind::UserVar;
                    }
                    seq.set_value(idx - 1, last);
                } else if op_type == OperatorKind::DeclFunc {
                    // The parameter-list node sits just before this operator;
                    // mark its name as a user function in the parent sequence
                    // now, not only inside the extracted body, so a
                    // recursive call compiled later in this same body
                    // resolves to `UserFunc` instead of erroring as an
                    // unresolved `FuncName` (see DESIGN.md).
                    let recursive_name: Option<String> = seq
                        .get_value(seq.len().wrapping_sub(1))
                        .and_then(|args_val| match &args_val.payload {
                            crate::value::Payload::Args(args_seq, _) => args_seq
                                .get_value(0)
                                .and_then(|v| v.name_str().map(|s| s.to_string())),
                            _ => None,
                        });
                    if let Some(name) = recursive_name {
                        seq.mark_user_function(&name);
                    }
                    decl_stack.push(Bookmark { token_pos: ti, sequence_pos: seq.len() });
                }

                op_stack.push(StackEntry::Op(Operator { kind: op_type, token_index: ti }));
            }

            TokenKind::Ctl => {
                if t.literal == "(" {
                    op_stack.push(StackEntry::Flow(Flow { token_index: ti }));
                    if seq.len() > 0 {
                        if let Some(val) = seq.get_value(seq.len() - 1) {
                            if val.kind.is_func() || val.kind == ValueKind::FuncName {
                                op_stack.push(StackEntry::Op(Operator { kind: OperatorKind::CallFunc, token_index: ti }));
                            }
                        }
                    }
                } else {
                    let mut flow_found = false;
                    while let Some(entry) = op_stack.pop() {
                        match entry {
                            StackEntry::Flow(_) => {
                                flow_found = true;
                                break;
                            }
                            StackEntry::Op(op) => {
                                if op.kind == OperatorKind::DeclFunc {
                                    extract_func_body(&mut decl_stack, &mut seq, tokens, ti);
                                }
                                seq.append_operator(op);
                            }
                        }
                    }
                    if !flow_found {
                        return Err(EvalError::compile(t.clone(), ti, "missing opening parenthesis"));
                    }

                    let last_is_call = seq
                        .get_operator(seq.len().wrapping_sub(1))
                        .map(|op| op.kind == OperatorKind::CallFunc)
                        .unwrap_or(false);

                    if last_is_call {
                        let fn_mark = func_stack.pop().ok_or_else(|| {
                            EvalError::compile(t.clone(), ti, "internal error: missing function bookmark")
                        })?;
                        let func_val = seq
                            .get_value(fn_mark.sequence_pos)
                            .cloned()
                            .ok_or_else(|| EvalError::compile(t.clone(), ti, "internal error: missing function value"))?;

                        let next_is_decl = ti < tokens.len() - 1
                            && tokens[ti + 1].kind == TokenKind::Op
                            && OperatorKind::parse(&tokens[ti + 1].literal) == Some(OperatorKind::DeclFunc);

                        if next_is_decl {
                            let args_seq = seq.extract_subsequence(fn_mark.sequence_pos, seq.len());
                            // `fn_mark.token_pos` is the function-name token,
                            // always immediately followed by the opening
                            // paren; skip both it and the name to capture
                            // exactly the parameter-list tokens between them.
                            let arg_tokens: Rc<[Token]> =
                                Rc::from(tokens[fn_mark.token_pos + 2..ti].to_vec().into_boxed_slice());
                            seq.append_value(Value::func_args(args_seq, arg_tokens));
                        } else {
                            if !func_val.kind.is_func() {
                                let name_token_index = func_val.token_index.unwrap_or(fn_mark.token_pos);
                                return Err(EvalError::compile(
                                    tokens[name_token_index].clone(),
                                    name_token_index,
                                    format!("'{}' is not a function", tokens[name_token_index].literal),
                                ));
                            }
                            if fn_mark.token_pos + 2 == ti {
                                let idx = seq.len() - 1;
                                seq.insert_value(idx, Value::constant(RtValue::F64(0.0), None));
                            }
                        }
                    }
                }
            }

            TokenKind::NumSci => {
                let parts: Vec<&str> = t.literal.splitn(2, |c| c == 'e' || c == 'E').collect();
                if parts.len() != 2 {
                    return Err(EvalError::compile(t.clone(), ti, format!("unable to parse literal '{}'", t.literal)));
                }
                let mantissa: f64 = parts[0]
                    .replace('_', "")
                    .parse()
                    .map_err(|_| EvalError::compile(t.clone(), ti, format!("unable to parse mantissa part of literal '{}'", t.literal)))?;
                let order: f64 = parts[1]
                    .replace('_', "")
                    .parse()
                    .map_err(|_| EvalError::compile(t.clone(), ti, format!("unable to parse order part of literal '{}'", t.literal)))?;
                seq.append_value(Value::constant(RtValue::F64(mantissa * 10f64.powf(order)), Some(ti)));
            }

            TokenKind::NumDec => {
                let val: f64 = t
                    .literal
                    .replace('_', "")
                    .parse()
                    .map_err(|_| EvalError::compile(t.clone(), ti, format!("unable to parse literal '{}' as number", t.literal)))?;
                seq.append_value(Value::constant(RtValue::F64(val), Some(ti)));
            }

            TokenKind::NumHex => {
                let val = u64::from_str_radix(&t.literal.replace('_', ""), 16)
                    .map_err(|_| EvalError::compile(t.clone(), ti, format!("unable to parse literal '{}' as hex number", t.literal)))?;
                seq.append_value(Value::constant(RtValue::U64(val), Some(ti)));
            }

            TokenKind::NumBin => {
                let val = u64::from_str_radix(&t.literal.replace('_', ""), 2)
                    .map_err(|_| EvalError::compile(t.clone(), ti, format!("unable to parse literal '{}' as bin number", t.literal)))?;
                seq.append_value(Value::constant(RtValue::U64(val), Some(ti)));
            }

            TokenKind::Str => {
                seq.append_value(Value::constant(RtValue::Str(t.literal.clone()), Some(ti)));
            }

            TokenKind::Unit => {
                let next_is_call =
                    ti < tokens.len() - 1 && tokens[ti + 1].kind == TokenKind::Ctl && tokens[ti + 1].literal == "(";

                let kind = if next_is_call {
                    if seq.has_user_function(&t.literal) || ctx.user.has_function(&t.literal) {
                        ValueKind::UserFunc
                    } else if ctx.builtin.has_function(&t.literal) {
                        ValueKind::BuiltinFunc
                    } else {
                        ValueKind::FuncName
                    }
                } else if seq.has_local_variable(&t.literal) {
                    ValueKind::LocalVar
                } else if seq.has_user_variable(&t.literal) || ctx.user.has_variable(&t.literal) {
                    ValueKind::UserVar
                } else if ctx.builtin.has_constant(&t.literal) {
                    ValueKind::BuiltinConst
                } else {
                    ValueKind::VarName
                };

                if kind.is_func() || kind == ValueKind::FuncName {
                    func_stack.push(Bookmark { token_pos: ti, sequence_pos: seq.len() });
                }

                seq.append_value(Value::name(kind, t.literal.clone(), ti));
            }
        }
    }

    while let Some(entry) = op_stack.pop() {
        match entry {
            StackEntry::Flow(flow) => {
                return Err(EvalError::compile(tokens[flow.token_index].clone(), flow.token_index, "missing closing parenthesis"));
            }
            StackEntry::Op(op) => {
                if op.kind == OperatorKind::DeclFunc {
                    extract_func_body(&mut decl_stack, &mut seq, tokens, tokens.len());
                }
                seq.append_operator(op);
            }
        }
    }

    Ok(seq)
}

fn extract_func_body(decl_stack: &mut Vec<Bookmark>, seq: &mut Sequence, tokens: &[Token], body_end_ti: usize) {
    if let Some(mark) = decl_stack.pop() {
        let body = seq.extract_subsequence(mark.sequence_pos, seq.len());
        let body_tokens: Rc<[Token]> =
            Rc::from(tokens[mark.token_pos + 1..body_end_ti].to_vec().into_boxed_slice());
        seq.append_value(Value::func_body(body, body_tokens));
    }
}

/// Pops operators off `op_stack` while the top has precedence greater than
/// or equal to `op_type` (left-associative: ties drain before the new
/// operator is pushed). Stops at a `Flow` sentinel or an empty stack.
///
/// `DeclFunc` binds tighter than `Sequence` precisely so that a pending
/// declaration drains here when an unparenthesized `;` is reached, bounding
/// the declared body at the first top-level statement separator instead of
/// swallowing every statement after it through to the matching close-paren
/// or end of input.
fn drain_while_tighter(
    op_stack: &mut Vec<StackEntry>,
    decl_stack: &mut Vec<Bookmark>,
    seq: &mut Sequence,
    op_type: OperatorKind,
    tokens: &[Token],
    ti: usize,
) {
    loop {
        let should_pop = matches!(op_stack.last(), Some(StackEntry::Op(top)) if top.kind >= op_type);
        if !should_pop {
            break;
        }
        let op = match op_stack.pop() {
            Some(StackEntry::Op(op)) => op,
            _ => unreachable!(),
        };
        if op.kind == OperatorKind::DeclFunc {
            extract_func_body(decl_stack, seq, tokens, ti);
        }
        seq.append_operator(op);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use crate::system::DefaultSystem;

    fn compile_str(src: &str) -> Sequence {
        let ctx = Context::new(Box::new(DefaultSystem::new()));
        let tokens = tokenize(src);
        compile(&ctx, &tokens).expect("compiles")
    }

    #[test]
    fn simple_arithmetic_compiles() {
        let seq = compile_str("2 + 3 * 4");
        assert!(seq.len() > 0);
    }

    #[test]
    fn trailing_operator_errors() {
        let ctx = Context::new(Box::new(DefaultSystem::new()));
        let tokens = tokenize("2 +");
        assert!(compile(&ctx, &tokens).is_err());
    }

    #[test]
    fn unmatched_paren_errors() {
        let ctx = Context::new(Box::new(DefaultSystem::new()));
        let tokens = tokenize("(1 + 2");
        assert!(compile(&ctx, &tokens).is_err());
    }

    #[test]
    fn assigning_to_literal_errors() {
        let ctx = Context::new(Box::new(DefaultSystem::new()));
        let tokens = tokenize("5 = 3");
        assert!(compile(&ctx, &tokens).is_err());
    }
}
