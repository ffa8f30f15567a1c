use std::fmt;

/// Where a run has got to. Transitions only move forward, one step at a
/// time; `Failed` can follow any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Init,
    ConfigLoaded,
    DirsReady,
    InputValidated,
    Transformed,
    Written,
    Reported,
    Done,
    Failed,
}

impl RunState {
    /// The state that follows a successful step, `None` for terminal states.
    pub fn next(self) -> Option<RunState> {
        use RunState::*;
        match self {
            Init => Some(ConfigLoaded),
            ConfigLoaded => Some(DirsReady),
            DirsReady => Some(InputValidated),
            InputValidated => Some(Transformed),
            Transformed => Some(Written),
            Written => Some(Reported),
            Reported => Some(Done),
            Done | Failed => None,
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
