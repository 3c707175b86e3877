//! The command tree and its registration API.
//!
//! Every command lives in one arena owned by [`Program`] and is addressed by a
//! [`CommandId`]. A child keeps only its parent's id; that link is used to bind
//! actions on the parent's event bus and to route option activations upward
//! while a sub-command's tokens are scanned.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use crate::argument::{ArgSlot, parse_command_spec};
use crate::error::{Error, Result};
use crate::events::{Event, EventBus};
use crate::option::OptionSpec;
use crate::value::{Coercer, Value, Values};

const DEFAULT_USAGE: &str = "[options]";

/// Handle to a command inside a [`Program`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommandId(pub(crate) usize);

/// One node of the command tree.
#[derive(Debug)]
pub struct Command {
    pub(crate) name: String,
    pub(crate) description: Option<String>,
    pub(crate) usage: Option<String>,
    pub(crate) parent: Option<CommandId>,
    pub(crate) children: Vec<CommandId>,
    pub(crate) options: Vec<OptionSpec>,
    pub(crate) args: Vec<ArgSlot>,
    pub(crate) values: Values,
    pub(crate) bus: EventBus,
}

impl Command {
    fn new(name: String, args: Vec<ArgSlot>, parent: Option<CommandId>) -> Self {
        Self {
            name,
            description: None,
            usage: None,
            parent,
            children: Vec::new(),
            options: Vec::new(),
            args,
            values: Values::new(),
            bus: EventBus::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn usage(&self) -> &str {
        self.usage.as_deref().unwrap_or(DEFAULT_USAGE)
    }

    pub fn parent(&self) -> Option<CommandId> {
        self.parent
    }

    pub fn children(&self) -> &[CommandId] {
        &self.children
    }

    pub fn options(&self) -> &[OptionSpec] {
        &self.options
    }

    pub fn args(&self) -> &[ArgSlot] {
        &self.args
    }

    pub fn values(&self) -> &Values {
        &self.values
    }

    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Publish on this command's bus against its own values.
    pub(crate) fn publish(&mut self, name: &str, event: &Event<'_>) -> Result<usize> {
        let Command { bus, values, .. } = self;
        bus.publish(name, event, values)
    }
}

/// A command-line program: the root command plus everything declared under it.
#[derive(Debug)]
pub struct Program {
    pub(crate) commands: Vec<Command>,
    pub(crate) raw_args: Vec<String>,
    pub(crate) args: Vec<String>,
    version: Option<String>,
    version_text: Rc<RefCell<String>>,
    pub(crate) help_text: Rc<RefCell<String>>,
    pub(crate) help_registered: bool,
}

impl Program {
    /// Create a program. An empty name is replaced at parse time by the
    /// basename of `argv[1]`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            commands: vec![Command::new(name.into(), Vec::new(), None)],
            raw_args: Vec::new(),
            args: Vec::new(),
            version: None,
            version_text: Rc::new(RefCell::new(String::new())),
            help_text: Rc::new(RefCell::new(String::new())),
            help_registered: false,
        }
    }

    pub fn root(&self) -> CommandId {
        CommandId(0)
    }

    pub fn name(&self) -> &str {
        &self.commands[0].name
    }

    /// The command behind `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was handed out by another `Program` with fewer
    /// commands. Use [`Program::try_get`] when the id's origin is unknown.
    pub fn get(&self, id: CommandId) -> &Command {
        &self.commands[id.0]
    }

    /// Like [`Program::get`], `None` for an id outside this program.
    pub fn try_get(&self, id: CommandId) -> Option<&Command> {
        self.commands.get(id.0)
    }

    pub(crate) fn get_mut(&mut self, id: CommandId) -> &mut Command {
        &mut self.commands[id.0]
    }

    /// Declare a sub-command from a spec such as `"deploy <target> [env]"`.
    pub fn command(&mut self, parent: CommandId, spec: &str) -> CommandId {
        let (name, args) = parse_command_spec(spec);
        let id = CommandId(self.commands.len());
        debug!(command = %name, slots = args.len(), "declared command");
        self.commands.push(Command::new(name, args, Some(parent)));
        self.get_mut(parent).children.push(id);
        id
    }

    /// Find a direct child of `parent` by its declared name.
    pub fn command_named(&self, parent: CommandId, name: &str) -> Option<CommandId> {
        self.get(parent)
            .children
            .iter()
            .copied()
            .find(|child| self.get(*child).name == name)
    }

    /// Declare an option whose value is stored as given.
    pub fn option(&mut self, id: CommandId, flags: &str, description: &str) -> &mut Self {
        self.add_option(id, OptionSpec::parse(flags, description), None);
        self
    }

    /// Declare an option whose value passes through `coercer` before it is stored.
    pub fn option_with<F>(
        &mut self,
        id: CommandId,
        flags: &str,
        description: &str,
        coercer: F,
    ) -> &mut Self
    where
        F: Fn(&str) -> std::result::Result<Value, String> + 'static,
    {
        self.add_option(id, OptionSpec::parse(flags, description), Some(Box::new(coercer)));
        self
    }

    /// Same as [`Program::option_with`] for an already boxed coercer.
    pub fn option_coerced(
        &mut self,
        id: CommandId,
        flags: &str,
        description: &str,
        coercer: Coercer,
    ) -> &mut Self {
        self.add_option(id, OptionSpec::parse(flags, description), Some(coercer));
        self
    }

    /// Register the option and the listener that assigns its value.
    ///
    /// Options sharing a canonical name each keep their own listener, so one
    /// activation runs all of them.
    pub(crate) fn add_option(&mut self, id: CommandId, spec: OptionSpec, coercer: Option<Coercer>) {
        let name = spec.canonical_name().to_string();
        let flags = spec.flags().to_string();
        let bool_default = spec.bool_default();

        let command = self.get_mut(id);
        command.options.push(spec);
        command.bus.subscribe(name.clone(), move |event, values| {
            let value = match (event.value(), &coercer) {
                (None, _) => Value::Bool(bool_default),
                (Some(raw), Some(coerce)) => {
                    coerce(raw).map_err(|reason| Error::InvalidOptionValue {
                        flags: flags.clone(),
                        value: raw.to_string(),
                        reason,
                    })?
                }
                (Some(raw), None) => Value::Str(raw.to_string()),
            };
            debug!(option = %name, value = %value, "option activated");
            values.insert(name.clone(), value);
            Ok(())
        });
    }

    /// Bind `callback` to run when this command is dispatched.
    ///
    /// The listener is registered on the parent's bus under this command's
    /// name. Required slots are checked in order before the callback runs.
    pub fn action<F>(&mut self, id: CommandId, mut callback: F) -> Result<&mut Self>
    where
        F: FnMut(&[String]) -> anyhow::Result<()> + 'static,
    {
        let command = self.get(id);
        let parent = command
            .parent
            .ok_or_else(|| Error::DetachedCommand(command.name.clone()))?;
        let name = command.name.clone();
        let slots = command.args.clone();

        let event_name = name.clone();
        self.get_mut(parent).bus.subscribe(event_name, move |event, _| {
            let tokens = event.tokens();
            if let Some(missing) = slots
                .iter()
                .find(|slot| slot.required && tokens.get(slot.position).is_none())
            {
                return Err(Error::MissingArgument(missing.name.clone()));
            }
            debug!(command = %name, args = ?tokens, "running action");
            callback(tokens).map_err(|source| Error::Action {
                command: name.clone(),
                source,
            })
        });
        Ok(self)
    }

    /// Subscribe to any event on a command's bus: an option's canonical
    /// name, [`CATCH_ALL`](crate::events::CATCH_ALL), or a child's name.
    pub fn on<F>(&mut self, id: CommandId, event: &str, listener: F) -> &mut Self
    where
        F: FnMut(&Event<'_>, &mut Values) -> Result<()> + 'static,
    {
        self.get_mut(id).bus.subscribe(event, listener);
        self
    }

    /// Set the version string and register `-v, --version` on first call.
    pub fn version(&mut self, version: impl Into<String>) -> &mut Self {
        let version = version.into();
        *self.version_text.borrow_mut() = version.clone();

        if self.version.is_none() {
            let root = self.root();
            self.add_option(
                root,
                OptionSpec::parse("-v, --version", "output the version number"),
                None,
            );
            let text = Rc::clone(&self.version_text);
            self.on(root, "version", move |_, _| {
                Err(Error::VersionRequested(text.borrow().clone()))
            });
        }
        self.version = Some(version);
        self
    }

    pub fn get_version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn description(&mut self, id: CommandId, text: impl Into<String>) -> &mut Self {
        self.get_mut(id).description = Some(text.into());
        self
    }

    pub fn get_description(&self, id: CommandId) -> Option<&str> {
        self.get(id).description()
    }

    pub fn usage(&mut self, id: CommandId, text: impl Into<String>) -> &mut Self {
        self.get_mut(id).usage = Some(text.into());
        self
    }

    /// Usage string, `"[options]"` unless one was set.
    pub fn get_usage(&self, id: CommandId) -> &str {
        self.get(id).usage()
    }

    pub fn value(&self, id: CommandId, name: &str) -> Option<&Value> {
        self.get(id).value(name)
    }

    pub fn values(&self, id: CommandId) -> &Values {
        self.get(id).values()
    }

    /// The argument vector given to the last parse.
    pub fn raw_args(&self) -> &[String] {
        &self.raw_args
    }

    /// Positional tokens left by the root scan of the last parse.
    pub fn args(&self) -> &[String] {
        &self.args
    }
}
