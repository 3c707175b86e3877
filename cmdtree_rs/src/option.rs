//! Option descriptors parsed from flag specs such as `"-p, --port <n>"`.
//!
//! A descriptor is built once at declaration time and never re-parsed while
//! tokenizing.

/// How many value tokens an option consumes.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Arity {
    /// Pure switch, `--verbose`.
    Boolean,
    /// `--color [when]`: takes the next token unless it looks like an option.
    OptionalValue,
    /// `--port <n>`: the next token is always the value.
    RequiredValue,
}

/// One declared flag.
#[derive(Debug, Clone)]
pub struct OptionSpec {
    flags: String,
    description: String,
    short: Option<String>,
    long: String,
    arity: Arity,
    negated: bool,
    name: String,
}

impl OptionSpec {
    /// Parse a flags spec. Separators are any run of spaces, commas or pipes;
    /// the leading dash-prefixed tokens are the short then long spelling and
    /// anything after them is ignored.
    pub fn parse(flags: &str, description: &str) -> Self {
        let arity = if flags.contains('<') {
            Arity::RequiredValue
        } else if flags.contains('[') {
            Arity::OptionalValue
        } else {
            Arity::Boolean
        };

        let mut spellings = flags
            .split([' ', ',', '|'])
            .filter(|token| !token.is_empty())
            .take_while(|token| token.starts_with('-'));

        let first = spellings.next().unwrap_or_default().to_string();
        let (short, long) = match spellings.next() {
            Some(second) => (Some(first), second.to_string()),
            None => (None, first),
        };

        let name = canonical_name(&long);

        Self {
            flags: flags.to_string(),
            description: description.to_string(),
            short,
            long,
            arity,
            negated: flags.contains("-no-"),
            name,
        }
    }

    /// The raw spec exactly as declared.
    pub fn flags(&self) -> &str {
        &self.flags
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn short(&self) -> Option<&str> {
        self.short.as_deref()
    }

    pub fn long(&self) -> &str {
        &self.long
    }

    pub fn arity(&self) -> Arity {
        self.arity
    }

    /// True when the spec contains `-no-`.
    pub fn negated(&self) -> bool {
        self.negated
    }

    /// Value stored when the option fires without a value.
    pub fn bool_default(&self) -> bool {
        !self.negated
    }

    /// Name used for event routing and value storage: `--no-color` is `color`.
    pub fn canonical_name(&self) -> &str {
        &self.name
    }

    /// Exact match against either spelling. No prefixes, no `--opt=value`.
    pub fn matches(&self, token: &str) -> bool {
        self.short.as_deref() == Some(token) || self.long == token
    }
}

fn canonical_name(long: &str) -> String {
    let stripped = long
        .strip_prefix("--")
        .or_else(|| long.strip_prefix('-'))
        .unwrap_or(long);
    stripped.replacen("no-", "", 1)
}
