//! Tokenizer and dispatcher.
//!
//! `parse` runs one left-to-right pass over the argument vector against the
//! root's options, then dispatches the leftover positional tokens: the whole
//! list goes to the `*` event, the first token names the command event and
//! the rest become that command's arguments.
//!
//! Once the first positional token names a declared sub-command, the rest of
//! the scan looks options up on that sub-command first and then on its
//! ancestors. Options still fire during the scan and never reach dispatch.

use std::path::Path;

use strsim::levenshtein;
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::events::{CATCH_ALL, Event};
use crate::option::Arity;
use crate::program::{CommandId, Program};

/// Tokens reserved at the head of a process argument vector (runtime, script).
const RESERVED_ARGS: usize = 2;

/// Largest edit distance for an unknown-option suggestion.
const SUGGESTION_DISTANCE: usize = 2;

impl Program {
    /// Parse a full process argument vector.
    ///
    /// Registers `-h, --help` on the root the first time it runs. Any error
    /// ends the parse: later tokens are not scanned and later events do not
    /// fire.
    pub fn parse<I, S>(&mut self, argv: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let argv: Vec<String> = argv.into_iter().map(|arg| arg.as_ref().to_string()).collect();
        self.raw_args = argv.clone();
        self.args.clear();

        if self.name().is_empty() {
            if let Some(script) = argv.get(1) {
                let guessed = Path::new(script)
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| script.clone());
                let root = self.root();
                self.get_mut(root).name = guessed;
            }
        }

        self.ensure_help();
        let root = self.root();
        let help = self.help_information(root);
        *self.help_text.borrow_mut() = help;

        let tokens = self.parse_options(&argv)?;
        self.args = tokens.clone();
        self.parse_args(tokens)
    }

    fn ensure_help(&mut self) {
        if self.help_registered {
            return;
        }
        self.help_registered = true;

        let root = self.root();
        self.option(root, "-h, --help", "output usage information");
        let text = std::rc::Rc::clone(&self.help_text);
        self.on(root, "help", move |_, _| {
            Err(Error::HelpRequested(text.borrow().clone()))
        });
    }

    /// Scan `argv[2..]` against the root's options and return the positional
    /// tokens in order.
    pub fn parse_options(&mut self, argv: &[String]) -> Result<Vec<String>> {
        let tokens = argv.get(RESERVED_ARGS..).unwrap_or_default();
        let root = self.root();
        self.tokenize(root, tokens)
    }

    /// Dispatch positional tokens from the root.
    pub fn parse_args(&mut self, tokens: Vec<String>) -> Result<()> {
        let root = self.root();
        self.dispatch(root, tokens)
    }

    /// Single left-to-right pass over `tokens`, starting in the scope of `scope`.
    ///
    /// Options are looked up in the current scope and then its ancestors and
    /// fire as soon as they are met. Once the first positional token names a
    /// child of `scope`, the scan continues in that child's scope. Only
    /// positional tokens are returned.
    fn tokenize(&mut self, scope: CommandId, tokens: &[String]) -> Result<Vec<String>> {
        let mut scope = scope;
        let mut positional = Vec::new();
        let mut i = 0;

        while i < tokens.len() {
            let token = &tokens[i];
            trace!(token = %token, index = i, "scanning token");

            if let Some((owner, index)) = self.find_option(scope, token) {
                let option = &self.get(owner).options[index];
                let name = option.canonical_name().to_string();
                let flags = option.flags().to_string();
                let arity = option.arity();
                let next = tokens.get(i + 1).map(String::as_str);

                match arity {
                    Arity::RequiredValue => match next {
                        None => {
                            return Err(Error::OptionMissingArgument { flags, got: None });
                        }
                        Some(got) if got.starts_with('-') => {
                            return Err(Error::OptionMissingArgument {
                                flags,
                                got: Some(got.to_string()),
                            });
                        }
                        Some(value) => {
                            self.activate(owner, &name, Some(value))?;
                            i += 2;
                        }
                    },
                    Arity::OptionalValue => match next {
                        Some(value) if !value.starts_with('-') => {
                            self.activate(owner, &name, Some(value))?;
                            i += 2;
                        }
                        _ => {
                            self.activate(owner, &name, None)?;
                            i += 1;
                        }
                    },
                    Arity::Boolean => {
                        self.activate(owner, &name, None)?;
                        i += 1;
                    }
                }
                continue;
            }

            if token.len() > 1 && token.starts_with('-') {
                return Err(Error::UnknownOption {
                    token: token.clone(),
                    suggestion: self.suggest_option(scope, token),
                });
            }

            if positional.is_empty() {
                if let Some(child) = self.command_named(scope, token) {
                    debug!(command = %token, "scanning in sub-command scope");
                    scope = child;
                }
            }

            positional.push(token.clone());
            i += 1;
        }

        Ok(positional)
    }

    /// Fire `*` with every token, then the event named by the first token
    /// with the rest. A leading token nobody listens for is silently ignored.
    fn dispatch(&mut self, id: CommandId, mut tokens: Vec<String>) -> Result<()> {
        if tokens.is_empty() {
            return Ok(());
        }

        self.get_mut(id).publish(CATCH_ALL, &Event::Tokens(&tokens))?;

        let name = tokens.remove(0);
        let fired = self.get_mut(id).publish(&name, &Event::Tokens(&tokens))?;
        if fired == 0 {
            debug!(token = %name, "no listener for leading token");
        }
        Ok(())
    }

    /// First option matching `token`, looking in `scope` then its ancestors.
    fn find_option(&self, scope: CommandId, token: &str) -> Option<(CommandId, usize)> {
        self.scope_chain(scope).find_map(|id| {
            self.get(id)
                .options
                .iter()
                .position(|option| option.matches(token))
                .map(|index| (id, index))
        })
    }

    fn scope_chain(&self, scope: CommandId) -> impl Iterator<Item = CommandId> + '_ {
        std::iter::successors(Some(scope), move |id| self.get(*id).parent)
    }

    fn activate(&mut self, owner: CommandId, name: &str, value: Option<&str>) -> Result<()> {
        trace!(option = %name, value = ?value, "firing option");
        self.get_mut(owner).publish(name, &Event::Activation(value))?;
        Ok(())
    }

    /// Closest long spelling in scope, for `--long` shaped tokens only.
    fn suggest_option(&self, scope: CommandId, token: &str) -> Option<String> {
        if !token.starts_with("--") {
            return None;
        }

        let mut best: Option<(&str, usize)> = None;
        for id in self.scope_chain(scope) {
            for option in &self.get(id).options {
                let distance = levenshtein(token, option.long());
                if distance > SUGGESTION_DISTANCE {
                    continue;
                }
                match best {
                    Some((_, best_distance)) if best_distance <= distance => {}
                    _ => best = Some((option.long(), distance)),
                }
            }
        }

        best.map(|(long, _)| long.to_string())
    }
}
