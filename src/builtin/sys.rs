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

//! Built-in system-housekeeping functions: environment persistence, the
//! terminal clear, and process exit. Every effect is routed through
//! [`crate::system::SystemInterface`] rather than touched directly.

use std::io::Write;

use crate::context::Context;
use crate::env;
use crate::error::EvalError;
use crate::runtime::coerce::to_u64;
use crate::value::RtValue;

const ENV_NAME_VAR: &str = "name";
const ENV_DESCRIPTION_VAR: &str = "description";

fn arg_name(args: &[RtValue], i: usize) -> Option<String> {
    match args.get(i) {
        Some(RtValue::Str(s)) => Some(s.clone()),
        Some(other @ (RtValue::U64(_) | RtValue::I64(_))) => Some(format!("0x{:016X}", to_u64(other))),
        _ => None,
    }
}

/// `save(name, description?)` — writes the current user variables and
/// functions to a named environment file.
pub fn save(ctx: &mut Context, args: &[RtValue]) -> Result<RtValue, EvalError> {
    let name = match args.first() {
        Some(RtValue::Str(s)) => {
            ctx.user.set_variable(ENV_NAME_VAR, RtValue::Str(s.clone()));
            s.clone()
        }
        Some(other) => {
            let n = to_u64(other);
            ctx.user.set_variable(ENV_NAME_VAR, RtValue::U64(n));
            format!("0x{:016X}", n)
        }
        None => return Err(EvalError::runtime("the first argument must be an environment name")),
    };

    let description = match args.get(1) {
        Some(RtValue::Str(s)) => {
            ctx.user.set_variable(ENV_DESCRIPTION_VAR, RtValue::Str(s.clone()));
            s.clone()
        }
        Some(_) => return Err(EvalError::runtime("the second argument must be a string")),
        None => match ctx.user.get_variable(ENV_DESCRIPTION_VAR) {
            Some(RtValue::Str(s)) => s.clone(),
            _ => String::new(),
        },
    };

    let snapshot = env::capture(ctx, description);
    let mut file = ctx.system.write_environment(&name)?;
    env::save(&snapshot, &mut file)?;

    writeln!(ctx.system.stdout(), "\n\tEnvironment saved as '{}'\n", name)?;
    Ok(RtValue::Bool(true))
}

/// `load(name)` — replaces every user variable and function with the ones
/// stored in the named environment file.
pub fn load(ctx: &mut Context, args: &[RtValue]) -> Result<RtValue, EvalError> {
    let name =
        arg_name(args, 0).ok_or_else(|| EvalError::runtime("the first argument must be an environment name"))?;

    let mut file = ctx.system.read_environment(&name)?;
    let snapshot = env::read(&mut file)?;

    ctx.user.clear_variables();
    ctx.user.clear_functions();
    env::apply_all(ctx, &snapshot)?;

    writeln!(ctx.system.stdout(), "\n\tEnvironment '{}' loaded\n", name)?;
    Ok(RtValue::Bool(true))
}

/// `import(name, unit, ...)` — merges units from the named environment file
/// into the current one without clearing it first. With no unit names,
/// imports everything.
pub fn import(ctx: &mut Context, args: &[RtValue]) -> Result<RtValue, EvalError> {
    let name =
        arg_name(args, 0).ok_or_else(|| EvalError::runtime("the first argument must be an environment name"))?;

    let mut file = match ctx.system.read_environment(&name) {
        Ok(f) => f,
        Err(e) => {
            writeln!(ctx.system.stdout(), "\n\tEnvironment '{}' import failed: {}\n", name, e)?;
            return Ok(RtValue::Bool(false));
        }
    };
    let snapshot = env::read(&mut file)?;

    let count = if args.len() <= 1 {
        env::apply_all(ctx, &snapshot)?
    } else {
        let names: Vec<String> = args[1..].iter().filter_map(|a| arg_name(&[a.clone()], 0)).collect();
        env::apply_named(ctx, &snapshot, &names)?
    };

    writeln!(ctx.system.stdout(), "\n\tImported {} units from environment '{}'\n", count, name)?;
    Ok(RtValue::Bool(true))
}

/// `envs()` — lists every saved environment with its description.
pub fn envs(ctx: &mut Context, _args: &[RtValue]) -> Result<RtValue, EvalError> {
    let names = ctx.system.list_environments()?;
    if names.is_empty() {
        writeln!(ctx.system.stdout(), "\n\tThere are no saved environments\n")?;
        return Ok(RtValue::U64(0));
    }

    writeln!(ctx.system.stdout(), "\n\tAvailable environments:")?;
    let mut count = 0u64;
    for name in &names {
        let mut file = ctx.system.read_environment(name)?;
        match env::read(&mut file) {
            Ok(snapshot) if !snapshot.description.is_empty() => {
                writeln!(ctx.system.stdout(), "\t\t{} - {}", name, snapshot.description)?;
            }
            Ok(_) => {
                writeln!(ctx.system.stdout(), "\t\t{}", name)?;
            }
            Err(e) => {
                writeln!(ctx.system.stdout(), "\t\t{} - {}", name, e)?;
                continue;
            }
        }
        count += 1;
    }
    Ok(RtValue::U64(count))
}

/// `clear()` — clears the terminal screen.
pub fn clear(ctx: &mut Context, _args: &[RtValue]) -> Result<RtValue, EvalError> {
    ctx.system.clear_screen();
    Ok(RtValue::Nil)
}

/// `exit(code?)` — terminates the process.
pub fn exit(ctx: &mut Context, args: &[RtValue]) -> Result<RtValue, EvalError> {
    let code = args.first().map(to_u64).unwrap_or(0) as i32;
    ctx.system.exit(code)
}
