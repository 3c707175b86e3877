//! Shared CLI entry point for the `cmdtree` binary.
//!
//! All output decisions live here: the library only returns terminal
//! results, this module prints them and picks the exit code.

use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use serde_json::{Value as Json, json};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::colors::{ColorMode, Painter};
use crate::config::{Manifest, Recorder};
use crate::error::Error;
use crate::program::Program;

/// Exit code when a manifest cannot be read or declared.
const EXIT_MANIFEST: u8 = 2;

/// Options controlling binary-specific behavior.
pub struct EntryOptions {
    /// Name shown in help output.
    pub binary_name: &'static str,
    /// Printed by `--version`.
    pub version: &'static str,
}

/// Run the CLI with the given options. This is the shared main() body.
pub fn run(opts: &EntryOptions) -> ExitCode {
    init_tracing();
    let raw_args: Vec<String> = std::env::args().collect();
    run_with_args(opts, &raw_args, Painter::new(ColorMode::from_env()))
}

/// Same as [`run`] for an explicit argument vector (`argv[0]` is the binary).
pub fn run_with_args(opts: &EntryOptions, argv: &[String], painter: Painter) -> ExitCode {
    match argv.get(1) {
        Some(manifest) if !manifest.starts_with('-') => {
            run_manifest(Path::new(manifest), argv, painter)
        }
        _ => run_self(opts, argv, painter),
    }
}

/// Logs go to stderr; stdout carries the report.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init();
}

/// The binary's own command line, declared with the library.
pub fn self_program(opts: &EntryOptions) -> Program {
    let mut program = Program::new(opts.binary_name);
    let root = program.root();
    program
        .version(opts.version)
        .usage(root, "<manifest.toml> [args...]")
        .description(
            root,
            "Parse arguments against a TOML program manifest and print the result as JSON",
        );
    program
}

fn run_self(opts: &EntryOptions, argv: &[String], painter: Painter) -> ExitCode {
    let mut program = self_program(opts);

    // No script path here, so leave an empty one in the reserved slot.
    let mut shifted = Vec::with_capacity(argv.len() + 1);
    shifted.push(argv.first().cloned().unwrap_or_default());
    shifted.push(String::new());
    shifted.extend(argv.iter().skip(1).cloned());

    match program.parse(&shifted) {
        Ok(()) => emit(&mut io::stdout().lock(), &program.help_information(program.root())),
        Err(err) => report_error(&err, painter),
    }
}

fn run_manifest(path: &Path, argv: &[String], painter: Painter) -> ExitCode {
    let built = Manifest::load_from_path(path).and_then(|manifest| manifest.build());
    let (mut program, recorder) = match built {
        Ok(built) => built,
        Err(err) => {
            eprintln!("{} {:#}", painter.error("[cmdtree] error:"), err);
            return ExitCode::from(EXIT_MANIFEST);
        }
    };
    debug!(manifest = %path.display(), program = %program.name(), "manifest declared");

    if let Err(err) = program.parse(argv) {
        return report_error(&err, painter);
    }

    let report = build_report(&program, &recorder);
    match serde_json::to_string_pretty(&report) {
        Ok(text) => emit(&mut io::stdout().lock(), &format!("{}\n", text)),
        Err(err) => {
            eprintln!("{} {}", painter.error("[cmdtree] error:"), err);
            ExitCode::FAILURE
        }
    }
}

/// JSON summary of a finished parse.
pub fn build_report(program: &Program, recorder: &Recorder) -> Json {
    let root = program.root();
    let invocations: Vec<Json> = recorder
        .borrow()
        .iter()
        .map(|invocation| {
            let options = program
                .command_named(root, &invocation.command)
                .map(|id| json!(program.values(id)))
                .unwrap_or_else(|| json!({}));
            json!({
                "command": invocation.command,
                "args": invocation.args,
                "options": options,
            })
        })
        .collect();

    json!({
        "program": program.name(),
        "options": program.values(root),
        "invocations": invocations,
        "args": program.args(),
    })
}

/// Write `text` to `out`. A reader that went away (`cmdtree app.toml | head`)
/// is not an error.
fn emit(out: &mut impl Write, text: &str) -> ExitCode {
    match out.write_all(text.as_bytes()).and_then(|()| out.flush()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => {
            debug!("stdout closed early");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("[cmdtree] error: failed to write output: {}", err);
            ExitCode::FAILURE
        }
    }
}

/// Print a terminal result the way the user expects it and map it to an exit code.
fn report_error(err: &Error, painter: Painter) -> ExitCode {
    match err {
        Error::HelpRequested(text) => emit(&mut io::stdout().lock(), text),
        Error::VersionRequested(version) => {
            emit(&mut io::stdout().lock(), &format!("{}\n", version))
        }
        _ => {
            eprintln!();
            eprintln!("  {} {}", painter.error("error:"), err);
            if let Some(suggestion) = err.suggestion() {
                eprintln!("  {} {}?", painter.dim("did you mean"), painter.token(suggestion));
            }
            eprintln!();
            ExitCode::from(u8::try_from(err.exit_code()).unwrap_or(1))
        }
    }
}
