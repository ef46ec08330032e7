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

//! The `SystemInterface` hook bundle.
//!
//! Built-in functions (`vars`, `funcs`, `save`, `load`, `clear`, `exit`, ...)
//! need to touch the outside world: print, clear the terminal, persist an
//! environment file, exit the process. Rather than letting the core pipeline
//! depend on any of that directly, every such need is routed through this
//! trait, which decouples the built-ins from a concrete terminal.

use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::PathBuf;

use crate::error::EvalError;

/// External collaborators the core calculator consumes but never implements
/// itself. A caller embedding the library supplies its own implementation;
/// [`DefaultSystem`] is a batteries-included one suitable for a standalone
/// CLI.
pub trait SystemInterface {
    /// Whether built-in output should be ANSI-highlighted.
    fn is_highlight_enabled(&self) -> bool;

    /// The seed used to initialize the context's random source.
    fn random_seed(&self) -> i64;

    /// The stream built-ins print additional output to.
    fn stdout(&mut self) -> &mut dyn Write;

    /// Clears the terminal screen.
    fn clear_screen(&mut self);

    /// Lists the names of saved environments.
    fn list_environments(&self) -> Result<Vec<String>, EvalError>;

    /// Opens the named environment file for writing, creating it if absent.
    fn write_environment(&self, name: &str) -> Result<Box<dyn Write>, EvalError>;

    /// Opens the named environment file for reading.
    fn read_environment(&self, name: &str) -> Result<Box<dyn Read>, EvalError>;

    /// Terminates the process with the given exit code.
    fn exit(&mut self, code: i32) -> !;
}

/// The default [`SystemInterface`]: highlighting on, a time-seeded random
/// source, real stdout, and environments stored as one JSON file per name
/// under the platform data directory (resolved with `dirs`).
pub struct DefaultSystem {
    highlight_enabled: bool,
    seed: i64,
    env_dir: PathBuf,
    out: io::Stdout,
}

impl DefaultSystem {
    pub fn new() -> Self {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as i64)
            .unwrap_or(0);

        let env_dir = dirs::data_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("hexcalc")
            .join("environments");

        Self { highlight_enabled: true, seed, env_dir, out: io::stdout() }
    }

    pub fn with_highlighting(mut self, enabled: bool) -> Self {
        self.highlight_enabled = enabled;
        self
    }

    fn ensure_dir(&self) -> Result<(), EvalError> {
        fs::create_dir_all(&self.env_dir)?;
        Ok(())
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.env_dir.join(format!("{}.json", name))
    }
}

impl Default for DefaultSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemInterface for DefaultSystem {
    fn is_highlight_enabled(&self) -> bool {
        self.highlight_enabled
    }

    fn random_seed(&self) -> i64 {
        self.seed
    }

    fn stdout(&mut self) -> &mut dyn Write {
        &mut self.out
    }

    fn clear_screen(&mut self) {
        print!("\x1B[2J\x1B[H");
        let _ = io::stdout().flush();
    }

    fn list_environments(&self) -> Result<Vec<String>, EvalError> {
        if !self.env_dir.exists() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.env_dir)? {
            let entry = entry?;
            if let Some(stem) = entry.path().file_stem().and_then(|s| s.to_str()) {
                if entry.path().extension().and_then(|e| e.to_str()) == Some("json") {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    fn write_environment(&self, name: &str) -> Result<Box<dyn Write>, EvalError> {
        self.ensure_dir()?;
        let file = File::create(self.path_for(name))?;
        Ok(Box::new(file))
    }

    fn read_environment(&self, name: &str) -> Result<Box<dyn Read>, EvalError> {
        let file = File::open(self.path_for(name))?;
        Ok(Box::new(file))
    }

    fn exit(&mut self, code: i32) -> ! {
        std::process::exit(code);
    }
}
