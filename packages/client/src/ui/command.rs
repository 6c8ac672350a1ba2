//! Lines typed at the client prompt.

/// What a line of input asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Send the text as a chat message
    Send(String),
    /// Print the connection state
    Status,
    /// Print the stored conversation
    History,
    /// Mark a message as read
    Read(String),
    /// Connect again if the connection dropped
    Reconnect,
    Quit,
    Empty,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Self::Empty;
        }
        let Some(rest) = line.strip_prefix('/') else {
            return Self::Send(line.to_string());
        };

        let mut parts = rest.split_whitespace();
        match (parts.next(), parts.next()) {
            (Some("quit"), None) => Self::Quit,
            (Some("status"), None) => Self::Status,
            (Some("history"), None) => Self::History,
            (Some("reconnect"), None) => Self::Reconnect,
            (Some("read"), Some(id)) => Self::Read(id.to_string()),
            _ => Self::Unknown(line.to_string()),
        }
    }
}
