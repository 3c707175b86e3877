use std::process::ExitCode;

use cmdtree::cli::{EntryOptions, run};

fn main() -> ExitCode {
    run(&EntryOptions {
        binary_name: "cmdtree",
        version: env!("CARGO_PKG_VERSION"),
    })
}
