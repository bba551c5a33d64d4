//! The timed quiz session: a synchronous state machine (`engine`), the async
//! loop that wires it to a countdown (`runner`), and the flow that starts
//! attempts from a contest id (`flow`).

mod engine;
mod flow;
mod runner;

pub use engine::{
    IgnoredReason, Progress, QuestionView, SelectOutcome, SessionEngine, SessionSnapshot,
    TickOutcome,
};
pub use flow::SessionFlow;
pub use runner::{SessionCommand, SessionHandle, SessionRunner, SessionUpdate};
