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

//! Operator kinds and their precedence.
//!
//! The declaration order of [`OperatorKind`] below *is* the precedence table:
//! earlier variants bind looser than later ones. The shunting-yard compiler
//! in [`crate::compiler`] relies on `Ord`/`PartialOrd` derived from this
//! order, so reordering a variant reorders precedence.

use std::fmt::{self, Display, Formatter};

/// A single compiled operator together with the index of the token it came
/// from (used for diagnostics; `usize::MAX` marks a synthetic operator with
/// no originating token).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Operator {
    pub kind: OperatorKind,
    pub token_index: usize,
}

/// The kind of an operator, ordered by precedence (low to high).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum OperatorKind {
    Sequence,
    DeclFunc,

    Assign,
    AssignLocal,
    AssignMinus,
    AssignPlus,
    AssignMul,
    AssignDiv,
    AssignBitAnd,
    AssignBitOr,

    Enumerate,

    LogicOr,
    LogicAnd,

    Equality,
    NotEq,
    More,
    Less,
    MoreEq,
    LessEq,

    Plus,
    Minus,
    Multiply,
    Divide,
    Modulo,
    Power,

    BitOr,
    BitAnd,
    BitXor,
    BitClear,
    BitInverse,
    LeftShift,
    RightShift,

    LogicNot,
    Popcnt,

    /// Synthetic operator emitted by the compiler around every function call.
    CallFunc,
}

impl OperatorKind {
    /// Parses an operator glyph. Returns `None` for glyphs that are not
    /// operators (the caller should treat that as a lexer/compiler bug,
    /// since only tokens already classified as [`crate::token::TokenKind::Op`]
    /// reach here).
    pub fn parse(literal: &str) -> Option<Self> {
        use OperatorKind::*;
        Some(match literal {
            "->" => DeclFunc,
            ";" => Sequence,

            "=" => Assign,
            ":=" => AssignLocal,
            "-=" => AssignMinus,
            "+=" => AssignPlus,
            "*=" => AssignMul,
            "/=" => AssignDiv,
            "&=" => AssignBitAnd,
            "|=" => AssignBitOr,

            "," => Enumerate,

            "||" => LogicOr,
            "&&" => LogicAnd,
            "==" => Equality,
            "!=" => NotEq,

            ">" => More,
            "<" => Less,
            ">=" => MoreEq,
            "<=" => LessEq,

            "+" => Plus,
            "-" => Minus,
            "*" => Multiply,
            "/" => Divide,
            "%" => Modulo,
            "**" => Power,

            "|" => BitOr,
            "&" => BitAnd,
            "^" => BitXor,
            "&^" | "&~" => BitClear,
            "~" => BitInverse,
            "<<" => LeftShift,
            ">>" => RightShift,

            "!" => LogicNot,
            "#" => Popcnt,

            _ => return None,
        })
    }

    /// Is this operator eligible to appear with no left operand?
    pub fn is_unary(self) -> bool {
        use OperatorKind::*;
        matches!(self, BitInverse | Popcnt | LogicNot | Minus)
    }

    /// Is this one of the `=`/`:=`/`+=`/... family?
    pub fn is_assign(self) -> bool {
        use OperatorKind::*;
        self >= Assign && self <= AssignBitOr
    }
}

impl Display for OperatorKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        use OperatorKind::*;
        let s = match self {
            DeclFunc => "->",
            Sequence => ";",
            Assign => "=",
            AssignLocal => ":=",
            AssignMinus => "-=",
            AssignPlus => "+=",
            AssignMul => "*=",
            AssignDiv => "/=",
            AssignBitAnd => "&=",
            AssignBitOr => "|=",
            Enumerate => ",",
            LogicOr => "||",
            LogicAnd => "&&",
            Equality => "==",
            NotEq => "!=",
            More => ">",
            Less => "<",
            MoreEq => ">=",
            LessEq => "<=",
            Plus => "+",
            Minus => "-",
            Multiply => "*",
            Divide => "/",
            Modulo => "%",
            Power => "**",
            BitOr => "|",
            BitAnd => "&",
            BitXor => "^",
            BitClear => "&^",
            BitInverse => "~",
            LeftShift => "<<",
            RightShift => ">>",
            LogicNot => "!",
            Popcnt => "#",
            CallFunc => "()",
        };
        write!(f, "{}", s)
    }
}

/// Sentinel pushed onto the compiler's operator stack to mark an open
/// parenthesis. It is never part of a finalized [`crate::sequence::Sequence`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Flow {
    pub token_index: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precedence_ordering() {
        assert!(OperatorKind::Sequence < OperatorKind::DeclFunc);
        assert!(OperatorKind::Plus < OperatorKind::Multiply);
        assert!(OperatorKind::LogicOr < OperatorKind::LogicAnd);
        assert!(OperatorKind::Popcnt < OperatorKind::CallFunc);
    }

    #[test]
    fn parse_roundtrips_through_display() {
        for lit in ["->", ";", "=", ":=", ",", "||", "&&", "==", "!=", ">", "<",
                    ">=", "<=", "+", "-", "*", "/", "%", "**", "|", "&", "^",
                    "&^", "~", "<<", ">>", "!", "#"] {
            let kind = OperatorKind::parse(lit).expect("known operator");
            assert_eq!(kind.to_string(), if lit == "&~" { "&^" } else { lit });
        }
    }

    #[test]
    fn unary_set() {
        assert!(OperatorKind::Minus.is_unary());
        assert!(OperatorKind::LogicNot.is_unary());
        assert!(!OperatorKind::Plus.is_unary());
    }
}
