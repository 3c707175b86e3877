//! Help text generation.
//!
//! Layout:
//!
//! ```text
//!
//!   Usage: deploy-tool [options]
//!
//!   Commands:
//!
//!     deploy <target> [env]
//!     deploy to a target
//!
//!   Options:
//!
//!     -h, --help      output usage information
//!     -p, --port <n>  port to bind
//!
//! ```

use crate::program::{CommandId, Program};

const INDENT: &str = "    ";

impl Program {
    /// Full help text for a command.
    pub fn help_information(&self, id: CommandId) -> String {
        let command = self.get(id);
        [
            String::new(),
            format!("  Usage: {} {}", command.name(), command.usage()),
            self.command_help(id),
            "  Options:".to_string(),
            String::new(),
            indent(&self.option_help(id)),
            String::new(),
            String::new(),
        ]
        .join("\n")
    }

    /// One line per option: flags padded to the widest flags, then description.
    pub fn option_help(&self, id: CommandId) -> String {
        let options = self.get(id).options();
        let width = self.largest_option_length(id);
        options
            .iter()
            .map(|option| format!("{}  {}", pad(option.flags(), width), option.description()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Sub-command section, empty when there are no sub-commands.
    pub fn command_help(&self, id: CommandId) -> String {
        let children = self.get(id).children();
        if children.is_empty() {
            return String::new();
        }

        let entries = children
            .iter()
            .map(|child| {
                let command = self.get(*child);
                let mut signature = command.name().to_string();
                for slot in command.args() {
                    signature.push(' ');
                    signature.push_str(&slot.display());
                }
                format!("{}\n{}", signature, command.description().unwrap_or_default())
            })
            .collect::<Vec<_>>()
            .join("\n\n");

        [
            String::new(),
            "  Commands:".to_string(),
            String::new(),
            indent(&entries),
            String::new(),
        ]
        .join("\n")
    }

    pub fn largest_option_length(&self, id: CommandId) -> usize {
        self.get(id)
            .options()
            .iter()
            .map(|option| option.flags().len())
            .max()
            .unwrap_or(0)
    }
}

fn pad(text: &str, width: usize) -> String {
    format!("{:<width$}", text, width = width)
}

fn indent(text: &str) -> String {
    text.split('\n')
        .map(|line| format!("{}{}", INDENT, line))
        .collect::<Vec<_>>()
        .join("\n")
}
