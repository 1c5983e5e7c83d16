//! Command types for the Elm-style architecture
//!
//! Commands tell the host what to do after an update: repaint, or keep
//! delivering frame ticks because an animation is running.

/// Side effects requested by `update`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Offsets or placements changed; repaint once
    Redraw,
    /// An animation is in flight; repaint and send `RevealMsg::Tick` next frame
    ScheduleFrame,
    /// Execute multiple commands
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Create a batch of commands
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        Cmd::Batch(cmds)
    }

    /// Check if this command requires a redraw
    pub fn needs_redraw(&self) -> bool {
        match self {
            Cmd::None => false,
            Cmd::Redraw | Cmd::ScheduleFrame => true,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.needs_redraw()),
        }
    }

    /// Check if the host should keep ticking
    pub fn needs_frame(&self) -> bool {
        match self {
            Cmd::ScheduleFrame => true,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.needs_frame()),
            Cmd::None | Cmd::Redraw => false,
        }
    }

    /// Merge an optional follow-up into this command
    pub fn and(self, other: Option<Cmd>) -> Cmd {
        match (self, other) {
            (cmd, None) | (Cmd::None, Some(cmd)) => cmd,
            (cmd, Some(Cmd::None)) => cmd,
            (Cmd::Batch(mut cmds), Some(other)) => {
                cmds.push(other);
                Cmd::Batch(cmds)
            }
            (cmd, Some(other)) => Cmd::Batch(vec![cmd, other]),
        }
    }
}
