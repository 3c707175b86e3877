//! TOML manifests that declare a whole program.
//!
//! ```toml
//! name = "deploy-tool"
//! version = "1.0.0"
//!
//! [[option]]
//! flags = "-p, --port <n>"
//! description = "port to bind"
//! coerce = "int"
//!
//! [[command]]
//! spec = "deploy <target> [env]"
//! description = "deploy to a target"
//!
//!   [[command.option]]
//!   flags = "-f, --force"
//! ```

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::program::{CommandId, Program};
use crate::value::coerce;

/// Root manifest structure
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Program name; empty means "guess from argv[1]"
    pub name: String,
    pub version: Option<String>,
    pub description: Option<String>,
    pub usage: Option<String>,
    /// Options declared on the root command
    #[serde(rename = "option")]
    pub options: Vec<OptionEntry>,
    #[serde(rename = "command")]
    pub commands: Vec<CommandEntry>,
}

/// One `[[option]]` table.
#[derive(Debug, Clone, Deserialize)]
pub struct OptionEntry {
    pub flags: String,
    #[serde(default)]
    pub description: String,
    /// Built-in coercer name: int, float, list or string.
    #[serde(default)]
    pub coerce: Option<String>,
}

/// One `[[command]]` table.
#[derive(Debug, Clone, Deserialize)]
pub struct CommandEntry {
    /// `"name <required> [optional]"`
    pub spec: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "option")]
    pub options: Vec<OptionEntry>,
}

/// A dispatched sub-command as seen by its action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invocation {
    pub command: String,
    pub args: Vec<String>,
}

/// Shared log of the invocations fired during a parse.
pub type Recorder = Rc<RefCell<Vec<Invocation>>>;

impl Manifest {
    /// Load a manifest from a specific path.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read manifest {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("failed to parse manifest {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Declare everything in the manifest on a fresh [`Program`].
    ///
    /// Every command gets an action that appends to the returned recorder.
    pub fn build(&self) -> Result<(Program, Recorder)> {
        let mut program = Program::new(self.name.clone());
        let root = program.root();
        let recorder: Recorder = Rc::new(RefCell::new(Vec::new()));

        if let Some(version) = &self.version {
            program.version(version.clone());
        }
        if let Some(description) = &self.description {
            program.description(root, description.clone());
        }
        if let Some(usage) = &self.usage {
            program.usage(root, usage.clone());
        }
        declare_options(&mut program, root, &self.options)?;

        for entry in &self.commands {
            if entry.spec.trim().is_empty() {
                bail!("command spec must not be empty");
            }
            let id = program.command(root, &entry.spec);
            if let Some(description) = &entry.description {
                program.description(id, description.clone());
            }
            declare_options(&mut program, id, &entry.options)?;

            let name = program.get(id).name().to_string();
            let log = Rc::clone(&recorder);
            program.action(id, move |args| {
                log.borrow_mut().push(Invocation {
                    command: name.clone(),
                    args: args.to_vec(),
                });
                Ok(())
            })?;
        }

        Ok((program, recorder))
    }
}

fn declare_options(program: &mut Program, id: CommandId, entries: &[OptionEntry]) -> Result<()> {
    for entry in entries {
        match entry.coerce.as_deref() {
            None => {
                program.option(id, &entry.flags, &entry.description);
            }
            Some(name) => {
                let Some(coercer) = coerce::by_name(name) else {
                    bail!("unknown coerce '{}' for option '{}'", name, entry.flags);
                };
                program.option_coerced(id, &entry.flags, &entry.description, coercer);
            }
        }
    }
    Ok(())
}
