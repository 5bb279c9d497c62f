//! Command trait, immutable command table, and resolution.
//!
//! Resolution is total: every input maps to a display string. Unknown
//! commands resolve to a "not found" message rather than an error.

use std::collections::HashMap;

/// A single canned command.
pub trait Command {
    /// The command key (what the user types). Normalised on registration.
    fn name(&self) -> &str;

    /// One-line description for listings.
    fn description(&self) -> &str {
        ""
    }

    /// Produce the display text. An empty string means "no output line".
    fn execute(&self) -> String;
}

/// Adapter so a bare closure can act as a producer.
struct FnCommand<F> {
    name: String,
    producer: F,
}

impl<F: Fn() -> String> Command for FnCommand<F> {
    fn name(&self) -> &str {
        &self.name
    }

    fn execute(&self) -> String {
        (self.producer)()
    }
}

/// Trim surrounding whitespace and lower-case.
pub fn normalize(input: &str) -> String {
    input.trim().to_lowercase()
}

/// Message returned for any input that is not in the table.
pub fn not_found_message(normalized: &str) -> String {
    format!("Command not found: {normalized}. Type 'help' for available commands.")
}

/// Collects commands before the table is frozen.
pub struct CommandTableBuilder {
    commands: HashMap<String, Box<dyn Command>>,
}

impl CommandTableBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    /// Register a command. Replaces any existing command with the same key.
    pub fn register(&mut self, cmd: Box<dyn Command>) {
        let key = normalize(cmd.name());
        if self.commands.insert(key.clone(), cmd).is_some() {
            log::debug!("command {key:?} replaced");
        }
    }

    /// Register a closure as the producer for `name`.
    pub fn register_fn<F>(&mut self, name: &str, producer: F)
    where
        F: Fn() -> String + 'static,
    {
        self.register(Box::new(FnCommand {
            name: name.to_string(),
            producer,
        }));
    }

    /// Freeze the table. No commands can be added afterwards.
    pub fn build(self) -> CommandTable {
        log::debug!("command table built with {} entries", self.commands.len());
        CommandTable {
            commands: self.commands,
        }
    }
}

impl Default for CommandTableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable mapping from normalised command keys to producers.
pub struct CommandTable {
    commands: HashMap<String, Box<dyn Command>>,
}

impl CommandTable {
    /// Start building a table.
    pub fn builder() -> CommandTableBuilder {
        CommandTableBuilder::new()
    }

    /// Resolve a raw input line to its display text.
    ///
    /// Multi-word keys (`cat about.txt`) match only as exact literals;
    /// there is no argument parsing.
    pub fn resolve(&self, input: &str) -> String {
        let key = normalize(input);
        match self.commands.get(&key) {
            Some(cmd) => {
                log::debug!("resolved command {key:?}");
                cmd.execute()
            },
            None => {
                log::debug!("unknown command {key:?}");
                not_found_message(&key)
            },
        }
    }

    /// Like [`resolve`](Self::resolve), but `None` for unknown commands.
    pub fn lookup(&self, input: &str) -> Option<String> {
        self.commands.get(&normalize(input)).map(|cmd| cmd.execute())
    }

    /// Whether `input` names a registered command.
    pub fn contains(&self, input: &str) -> bool {
        self.commands.contains_key(&normalize(input))
    }

    /// Sorted command keys.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(|k| k.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Description of the command `input` names, if registered.
    pub fn describe(&self, input: &str) -> Option<&str> {
        self.commands.get(&normalize(input)).map(|cmd| cmd.description())
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
