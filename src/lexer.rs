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

//! Single-pass character-classification lexer.
//!
//! No regex, no parser-generator: a running "current token" state machine
//! classifies each character as it arrives, exactly as the original
//! character-class tables did. The lexer never fails; a character that
//! cannot start any recognized token is silently dropped, the same as a
//! `T_NONE`-typed token being discarded upstream.

use crate::token::{Token, TokenKind};

const STRING_LITERALS: &str = "_@QWERTYUIOPASDFGHJKLZXCVBNMqwertyuiopasdfghjklzxcvbnm";
const NUM_SCI_LITERALS: &str = "0123456789.eE-+_";
const NUM_DEC_LITERALS: &str = "0123456789._";
const NUM_HEX_LITERALS: &str = "0123456789ABCDEFabcdef_";
const NUM_BIN_LITERALS: &str = "01_";
const CONTROL_LITERALS: &str = "()";
const OPERATOR_LITERALS: &str = ";#?:=-+*/%^!&|~<>,";

#[derive(Clone, Copy, PartialEq, Eq)]
enum State {
    None,
    NumSci,
    NumDec,
    NumHex,
    NumBin,
    Unit,
    Op,
    Ctl,
    Str,
}

impl State {
    fn into_kind(self) -> Option<TokenKind> {
        match self {
            State::None => None,
            State::NumSci => Some(TokenKind::NumSci),
            State::NumDec => Some(TokenKind::NumDec),
            State::NumHex => Some(TokenKind::NumHex),
            State::NumBin => Some(TokenKind::NumBin),
            State::Unit => Some(TokenKind::Unit),
            State::Op => Some(TokenKind::Op),
            State::Ctl => Some(TokenKind::Ctl),
            State::Str => Some(TokenKind::Str),
        }
    }
}

/// Tokenizes `src`. Always succeeds; unrecognized characters are dropped.
pub fn tokenize(src: &str) -> Vec<Token> {
    let chars: Vec<char> = src.chars().collect();
    let mut tokens = Vec::new();

    let mut state = State::NumDec;
    let mut token_begin: isize = -1;

    let mut i = 0usize;
    while i < chars.len() {
        let c = chars[i];

        if token_begin >= 0 {
            let mut token_done = false;

            match state {
                State::Unit => {
                    if !(contains(STRING_LITERALS, c) || contains(NUM_DEC_LITERALS, c)) {
                        token_done = true;
                    }
                }
                State::NumSci | State::NumDec | State::NumHex | State::NumBin => {
                    let begin = token_begin as usize;
                    if (c == 'x' || c == 'b') && i - begin == 1 && state == State::NumDec {
                        state = if c == 'x' { State::NumHex } else { State::NumBin };
                        token_begin += 2;
                    } else if (c == 'e' || c == 'E') && state == State::NumDec {
                        state = State::NumSci;
                    } else {
                        let set = match state {
                            State::NumSci => NUM_SCI_LITERALS,
                            State::NumDec => NUM_DEC_LITERALS,
                            State::NumHex => NUM_HEX_LITERALS,
                            State::NumBin => NUM_BIN_LITERALS,
                            _ => unreachable!(),
                        };
                        if !contains(set, c) {
                            token_done = true;
                        }
                    }
                }
                State::Str => {
                    if c == '"' {
                        let begin = token_begin as usize;
                        let literal: String = chars[begin..i].iter().collect();
                        tokens.push(Token::new(TokenKind::Str, literal));
                        token_begin = -1;
                        i += 1;
                        continue;
                    }
                }
                State::Ctl => {
                    token_done = true;
                }
                State::Op => {
                    if !contains(OPERATOR_LITERALS, c) {
                        token_done = true;
                    }
                }
                State::None => {}
            }

            if token_done {
                if let Some(kind) = state.into_kind() {
                    let begin = token_begin as usize;
                    let literal: String = chars[begin..i].iter().collect();
                    tokens.push(Token::new(kind, literal));
                }
                token_begin = -1;
            }
        }

        if token_begin < 0 {
            if c == '"' {
                state = State::Str;
                token_begin = i as isize + 1;
            } else if contains(STRING_LITERALS, c) {
                state = State::Unit;
                token_begin = i as isize;
            } else if contains(NUM_DEC_LITERALS, c) {
                state = State::NumDec;
                token_begin = i as isize;
            } else if contains(CONTROL_LITERALS, c) {
                state = State::Ctl;
                token_begin = i as isize;
            } else if contains(OPERATOR_LITERALS, c) {
                state = State::Op;
                token_begin = i as isize;
            } else {
                state = State::None;
                token_begin = -1;
            }
        }

        i += 1;
    }

    if token_begin >= 0 {
        if let Some(kind) = state.into_kind() {
            let begin = token_begin as usize;
            let literal: String = chars[begin..].iter().collect();
            tokens.push(Token::new(kind, literal));
        }
    }

    tokens
}

fn contains(set: &str, c: char) -> bool {
    set.chars().any(|s| s == c)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        tokenize(src).into_iter().map(|t| t.kind).collect()
    }

    fn literals(src: &str) -> Vec<String> {
        tokenize(src).into_iter().map(|t| t.literal).collect()
    }

    #[test]
    fn decimal_and_whitespace() {
        assert_eq!(literals("2 + 3 * 4"), vec!["2", "+", "3", "*", "4"]);
    }

    #[test]
    fn hex_and_binary_promotion() {
        assert_eq!(kinds("0xFF"), vec![TokenKind::NumHex]);
        assert_eq!(kinds("0b1011"), vec![TokenKind::NumBin]);
    }

    #[test]
    fn scientific_promotion() {
        assert_eq!(kinds("1.5e10"), vec![TokenKind::NumSci]);
        assert_eq!(literals("1.5e10"), vec!["1.5e10"]);
    }

    #[test]
    fn identifier_and_call() {
        assert_eq!(kinds("sq(n)"), vec![
            TokenKind::Unit, TokenKind::Ctl, TokenKind::Unit, TokenKind::Ctl,
        ]);
    }

    #[test]
    fn quoted_string() {
        assert_eq!(literals("\"hi there\""), vec!["hi there"]);
    }

    #[test]
    fn multi_char_operators() {
        assert_eq!(literals("a := b && c"), vec!["a", ":=", "b", "&&", "c"]);
    }

    #[test]
    fn unknown_characters_are_dropped() {
        assert_eq!(literals("a $ b"), vec!["a", "b"]);
    }

    // Lexer totality: a source string built
    // entirely out of characters the lexer recognizes, with no whitespace
    // or quotes to drop, reconstructs exactly from its emitted literals —
    // the lexer only ever draws token boundaries, it never discards or
    // rewrites a recognized character. `x`/`b` are excluded from the
    // charset: as the second character of a decimal number they trigger
    // the hex/bin promotion, which deliberately drops the `0x`/`0b` prefix
    // from the captured literal (see `tokenize`'s state-transition comment).
    proptest::proptest! {
        #[test]
        fn totality_over_recognized_charset(
            src in "[_@acdefghijklmnopqrstuvwyzA-Z0-9.;#?:=+*/%^!&|~<>,()-]{0,64}"
        ) {
            let reconstructed: String = tokenize(&src).into_iter().map(|t| t.literal).collect();
            proptest::prop_assert_eq!(reconstructed, src);
        }
    }
}
