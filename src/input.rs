//! Keyboard input: maps browser key names to simulation commands.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

/// A keyboard key as reported by `KeyboardEvent.key` (e.g. `"m"`, `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

/// Something the page asked the simulation to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Spawn one extra fly (`M` / `m`).
    SpawnExtra,
}

impl Key {
    /// The command bound to this key, if any. Binding is case-insensitive.
    #[must_use]
    pub fn command(&self) -> Option<Command> {
        match self.0.as_str() {
            "m" | "M" => Some(Command::SpawnExtra),
            _ => None,
        }
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}
