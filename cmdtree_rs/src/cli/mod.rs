//! The `cmdtree` binary.
//!
//! `cmdtree <manifest.toml> [args...]` declares a program from a manifest,
//! parses the arguments against it and prints what was assigned and
//! dispatched as JSON. The binary's own options are declared with the same
//! library.

pub mod entrypoint;

pub use entrypoint::{EntryOptions, run};
