//! Player commands and the command history.
//!
//! Commands are the synchronous user actions. Pool loads and banker
//! requests are not commands: they suspend on a collaborator and go through
//! the `begin_*` / `finish_*` pairs on `GameMachine` instead.

use serde::{Deserialize, Serialize};

use crate::core::{CaseNumber, Slot};

/// A user action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    SelectSlot(Slot),
    SetSeed(u64),
    Reserve(CaseNumber),
    Open(CaseNumber),
    AcceptOffer,
    DeclineOffer,
    KeepReserved,
    SwitchToOther,
    ResetPlaythrough,
    ResetSession,
}

/// An accepted command with ordering metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRecord {
    pub command: Command,
    /// Round the command was applied in, if a round was underway.
    pub round: Option<usize>,
    /// Position in the session's command sequence.
    pub sequence: u32,
}

impl CommandRecord {
    /// Create a new command record.
    #[must_use]
    pub fn new(command: Command, round: Option<usize>, sequence: u32) -> Self {
        Self {
            command,
            round,
            sequence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_serde() {
        let cmd = Command::Open(CaseNumber::new(4));
        let json = serde_json::to_string(&cmd).unwrap();
        let back: Command = serde_json::from_str(&json).unwrap();
        assert_eq!(cmd, back);
    }

    #[test]
    fn test_record_new() {
        let record = CommandRecord::new(Command::DeclineOffer, Some(2), 9);
        assert_eq!(record.round, Some(2));
        assert_eq!(record.sequence, 9);
    }
}
