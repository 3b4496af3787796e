use std::time::Duration;

/// Session tuning knobs.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Maximum gap between stream frames before the turn degrades to a
    /// terminal connection error.
    pub stall_timeout: Duration,
    /// Upper bound on quick replies attached to one message.
    pub max_quick_replies: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            stall_timeout: Duration::from_secs(30),
            max_quick_replies: itinera_flow::MAX_QUICK_REPLIES,
        }
    }
}
