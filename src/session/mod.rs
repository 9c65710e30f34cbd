pub mod breaks;
pub mod controller;
pub mod scheduler;
pub mod state;

pub use breaks::{advise, BreakAdvice, BreakKind, BreakSuggestion};
pub use controller::{SessionController, SessionSnapshot};
pub use state::{format_session_time, PostureSession, PostureState, SessionStatus, TickOutcome};
