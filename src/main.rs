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

//! Command-line front end: evaluates a joined argument list once, or drives
//! a `rustyline`-backed interactive prompt. This binary is a thin
//! collaborator around the `hexcalc` library — it owns no evaluation logic
//! of its own.

use std::time::Instant;

use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use hexcalc::system::DefaultSystem;
use hexcalc::value::RtValue;
use hexcalc::{Calculator, EvalError};

fn main() {
    let mut calc = Calculator::new(Box::new(DefaultSystem::new()));

    let mut expr = String::new();
    for arg in std::env::args().skip(1) {
        if arg == "-ignore" || arg == "--ignore" {
            break;
        }
        expr.push_str(&arg);
    }

    if !expr.is_empty() {
        match calc.eval(&expr) {
            Ok(result) => {
                display_result(&result);
                println!();
            }
            Err(err) => {
                display_error(&expr, &err);
                std::process::exit(1);
            }
        }
        return;
    }

    run_repl(&mut calc);
}

fn run_repl(calc: &mut Calculator) {
    let mut editor = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(err) => {
            eprintln!("unable to start the line editor: {}", err);
            return;
        }
    };

    loop {
        match editor.readline("hexcalc> ") {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(line.as_str());

                let begin = Instant::now();
                let result = calc.eval(&line);
                let elapsed = begin.elapsed();

                match result {
                    Ok(value) => {
                        display_result(&value);
                        println!("\n\tTime:\t{} ms\n", elapsed.as_millis());
                    }
                    Err(err) => display_error(&line, &err),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("readline error: {}", err);
                break;
            }
        }
    }
}

/// Prints a value the way the original CLI did: the primary representation
/// first, then a hex and binary rendering of anything that coerces
/// meaningfully to an integer.
fn display_result(value: &RtValue) {
    match value {
        RtValue::Nil => {}
        RtValue::Str(s) => println!("\n\t{}", s),
        RtValue::List(items) => {
            println!("\n\t{}", value);
            if items.iter().all(is_numeric) && !items.is_empty() {
                let hex: Vec<String> = items.iter().map(|v| format!("0x{:X}", hexcalc::runtime::coerce::to_u64(v))).collect();
                let bin: Vec<String> = items.iter().map(|v| format!("0b{:b}", hexcalc::runtime::coerce::to_u64(v))).collect();
                println!("\t\t[{}]", hex.join(" "));
                println!("\t\t[{}]", bin.join(" "));
            }
        }
        other if is_numeric(other) => {
            let n = hexcalc::runtime::coerce::to_u64(other);
            println!("\n\t{}", other);
            println!("\t\t0x{:X}", n);
            println!("\t\t0b{:b}", n);
        }
        other => println!("\n\t{}", other),
    }
}

fn is_numeric(v: &RtValue) -> bool {
    matches!(v, RtValue::U64(_) | RtValue::I64(_) | RtValue::F64(_))
}

fn display_error(source: &str, err: &EvalError) {
    if let EvalError::Compile { token, .. } = err {
        if let Some(offset) = source.find(&token.literal) {
            eprintln!("{}", source);
            eprintln!("{}{}", " ".repeat(offset), "^".red());
        }
    }
    eprintln!("{}{}", "\n\tError occurred: ".red(), err);
}
