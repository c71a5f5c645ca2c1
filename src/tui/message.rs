/// Message types for board communication
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiMessage {
    /// Time to run the day check
    Tick,
}
