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

//! Prefix-based word completion, consumed by an interactive front-end.

use crate::calculator::Calculator;

/// Returns the first name whose prefix matches `word`, searched in order:
/// user variables, user functions (suffixed with `()`), built-in constants,
/// built-in functions (suffixed with `()`). An empty string means no match.
pub fn predict(calc: &Calculator, word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }

    for name in calc.user().variables().keys() {
        if name.starts_with(word) {
            return name.clone();
        }
    }
    for name in calc.user().functions().keys() {
        if name.starts_with(word) {
            return format!("{}()", name);
        }
    }
    for name in calc.builtins().constants().keys() {
        if name.starts_with(word) {
            return name.clone();
        }
    }
    for name in calc.builtins().functions().keys() {
        if name.starts_with(word) {
            return format!("{}()", name);
        }
    }

    String::new()
}
