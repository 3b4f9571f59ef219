use std::fmt;

/// The two steps of a simulated command's lifecycle.
///
/// - `Start`: decides whether the process begins at all.
/// - `Wait`: decides how and when a started process finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Start,
    Wait,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Start => f.write_str("Start"),
            Phase::Wait => f.write_str("Wait"),
        }
    }
}

/// Where a simulated process is in its lifecycle.
///
/// `NotStarted -> Starting -> {StartFailed | Running}`, then
/// `Running -> {Completed | WaitFailed | Cancelled}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessState {
    /// Built and bound to a target, `start` not yet called.
    NotStarted,
    Starting,
    StartFailed,
    Running,
    Completed,
    WaitFailed,
    Cancelled,
}
