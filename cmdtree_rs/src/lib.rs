//! # cmdtree
//!
//! **Declarative command-line parsing** - declare options and sub-commands on
//! a program, hand it the process argument vector, and read back the values
//! and dispatched actions.
//!
//! ## Features
//!
//! - **Flag specs** - `"-p, --port <n>"`, `"--color [when]"`, `"--no-sauce"`
//! - **Sub-commands** - `"deploy <target> [env]"` with bound actions
//! - **Event dispatch** - every option and command is an event on its parent's bus
//! - **Generated help** - `-h, --help` on the root, `-v, --version` on request
//! - **Suggestions** - unknown `--long` options point at the closest spelling
//!
//! ## Quick Start
//!
//! ```rust
//! use cmdtree::{Program, Value};
//!
//! let mut program = Program::new("deploy-tool");
//! let root = program.root();
//! program
//!     .option(root, "-p, --port <n>", "port to bind")
//!     .option(root, "--no-color", "disable colors");
//!
//! program.parse(["node", "deploy-tool", "--port", "8080", "--no-color"])?;
//!
//! assert_eq!(program.value(root, "port"), Some(&Value::from("8080")));
//! assert_eq!(program.value(root, "color"), Some(&Value::Bool(false)));
//! # Ok::<(), cmdtree::Error>(())
//! ```
//!
//! ## Sub-commands
//!
//! ```rust
//! use cmdtree::Program;
//!
//! let mut program = Program::new("deploy-tool");
//! let root = program.root();
//! let deploy = program.command(root, "deploy <target> [env]");
//! program.action(deploy, |args| {
//!     println!("deploying {}", args[0]);
//!     Ok(())
//! })?;
//!
//! program.parse(["node", "deploy-tool", "deploy", "prod"])?;
//! # Ok::<(), cmdtree::Error>(())
//! ```
//!
//! ## CLI Usage
//!
//! ```bash
//! cmdtree app.toml --port 80 deploy prod   # JSON report of the parse
//! cmdtree --help
//! ```

// ============================================================================
// Declarations
// ============================================================================

/// Positional slots parsed from command specs.
pub mod argument;

/// Option flag specs and their arity.
pub mod option;

/// Stored option values and the built-in coercers.
pub mod value;

/// Per-command event buses.
pub mod events;

/// The command tree and its builder API.
pub mod program;

// ============================================================================
// Parsing
// ============================================================================

/// Tokenizer and dispatcher.
pub mod parser;

/// Help text layout.
pub mod help;

/// Terminal results of a parse.
pub mod error;

// ============================================================================
// Binary Support
// ============================================================================

/// TOML manifests declaring a program.
pub mod config;

/// ANSI colors for stderr diagnostics.
pub mod colors;

/// Entry point shared by the `cmdtree` binary.
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use argument::ArgSlot;
pub use config::Manifest;
pub use error::{Error, Result};
pub use events::{CATCH_ALL, Event, EventBus};
pub use option::{Arity, OptionSpec};
pub use program::{Command, CommandId, Program};
pub use value::{Coercer, Value, Values, coerce};
