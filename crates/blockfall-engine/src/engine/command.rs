use std::str::FromStr;

use serde::Serialize;

/// Player command accepted by [`GameSession::process_command`].
///
/// [`GameSession::process_command`]: crate::GameSession::process_command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, derive_more::IsVariant)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    MoveLeft,
    MoveRight,
    /// Move down by one row (soft drop).
    SoftDrop,
    /// Rotate 90° clockwise.
    Rotate,
    /// Drop to the bottom and lock immediately.
    HardDrop,
    Hold,
    /// Reset to a fresh game. Accepted in every state.
    Restart,
    /// Pause or resume gravity and piece commands.
    TogglePause,
}

impl Command {
    /// Returns the text tag understood by [`FromStr`].
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Command::MoveLeft => "left",
            Command::MoveRight => "right",
            Command::SoftDrop => "down",
            Command::Rotate => "rotate",
            Command::HardDrop => "drop",
            Command::Hold => "hold",
            Command::Restart => "restart",
            Command::TogglePause => "pause",
        }
    }

    pub const ALL: [Command; 8] = [
        Command::MoveLeft,
        Command::MoveRight,
        Command::SoftDrop,
        Command::Rotate,
        Command::HardDrop,
        Command::Hold,
        Command::Restart,
        Command::TogglePause,
    ];
}

/// An unrecognized command tag.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown command {tag:?}")]
pub struct ParseCommandError {
    tag: String,
}

impl FromStr for Command {
    type Err = ParseCommandError;

    /// Parses a command tag, ignoring ASCII case and surrounding whitespace.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::Command;
    ///
    /// assert_eq!("left".parse(), Ok(Command::MoveLeft));
    /// assert_eq!(" DROP ".parse(), Ok(Command::HardDrop));
    /// assert!("jump".parse::<Command>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        Command::ALL
            .into_iter()
            .find(|command| command.tag().eq_ignore_ascii_case(tag))
            .ok_or_else(|| ParseCommandError {
                tag: tag.to_owned(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_tag_parses_back() {
        for command in Command::ALL {
            assert_eq!(command.tag().parse(), Ok(command));
            assert_eq!(command.tag().to_uppercase().parse(), Ok(command));
        }
    }

    #[test]
    fn test_unknown_tag_is_rejected() {
        let err = "teleport".parse::<Command>().unwrap_err();
        assert_eq!(err.to_string(), "unknown command \"teleport\"");
        assert!("".parse::<Command>().is_err());
    }
}
