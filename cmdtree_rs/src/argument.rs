//! Positional argument slots and the sub-command spec grammar
//! (`"deploy <target> [env]"`).

/// One declared positional slot of a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgSlot {
    pub name: String,
    pub required: bool,
    /// Declaration order, which is also binding order.
    pub position: usize,
}

impl ArgSlot {
    /// `<name>` or `[name]`, as shown in help output.
    pub fn display(&self) -> String {
        if self.required {
            format!("<{}>", self.name)
        } else {
            format!("[{}]", self.name)
        }
    }
}

/// Split a sub-command spec into its name and positional slots.
///
/// The first space-separated token is the name. `<...>` tokens declare
/// required slots, `[...]` tokens optional ones, anything else is ignored.
pub fn parse_command_spec(spec: &str) -> (String, Vec<ArgSlot>) {
    let mut tokens = spec.split(' ').filter(|token| !token.is_empty());
    let name = tokens.next().unwrap_or_default().to_string();

    let mut slots = Vec::new();
    for token in tokens {
        let required = match token.chars().next() {
            Some('<') => true,
            Some('[') => false,
            _ => continue,
        };
        slots.push(ArgSlot {
            name: strip_brackets(token).to_string(),
            required,
            position: slots.len(),
        });
    }

    (name, slots)
}

fn strip_brackets(token: &str) -> &str {
    let inner = &token[1..];
    inner
        .strip_suffix('>')
        .or_else(|| inner.strip_suffix(']'))
        .unwrap_or(inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_name_and_slots_in_order() {
        let (name, slots) = parse_command_spec("deploy <target> [env]");
        assert_eq!(name, "deploy");
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].name, "target");
        assert!(slots[0].required);
        assert_eq!(slots[0].position, 0);
        assert_eq!(slots[1].name, "env");
        assert!(!slots[1].required);
        assert_eq!(slots[1].position, 1);
    }

    #[test]
    fn ignores_bare_tokens_and_extra_spaces() {
        let (name, slots) = parse_command_spec("build   release <out>");
        assert_eq!(name, "build");
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].name, "out");
        assert_eq!(slots[0].position, 0);
    }

    #[test]
    fn name_only() {
        let (name, slots) = parse_command_spec("status");
        assert_eq!(name, "status");
        assert!(slots.is_empty());
    }

    #[test]
    fn display_round_trips_brackets() {
        let (_, slots) = parse_command_spec("cp <src> [dest]");
        let shown: Vec<String> = slots.iter().map(ArgSlot::display).collect();
        assert_eq!(shown, ["<src>", "[dest]"]);
    }
}
