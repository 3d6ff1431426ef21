//! Parsing of shell input lines.

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// A typed registration ID, passed on unmodified for validation.
    Lookup(String),
    /// A decoded QR payload.
    Scan(String),
    /// Mark the actionable meal consumed.
    Confirm,
    Profile(String),
    Status,
    Reset,
    Help,
    Quit,
}

impl Command {
    /// Parse a line. Blank lines yield `None`; anything that is not a
    /// keyword is treated as a typed registration ID.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let command = match word.to_ascii_lowercase().as_str() {
            "scan" => Command::Scan(rest.to_string()),
            "profile" => Command::Profile(rest.to_string()),
            "avail" | "confirm" | "y" if rest.is_empty() => Command::Confirm,
            "status" if rest.is_empty() => Command::Status,
            "reset" | "cancel" | "ok" if rest.is_empty() => Command::Reset,
            "help" | "?" if rest.is_empty() => Command::Help,
            "quit" | "exit" if rest.is_empty() => Command::Quit,
            _ => Command::Lookup(line.to_string()),
        };
        Some(command)
    }
}
