pub mod advice;
pub mod app;
pub mod catalog;
pub mod config;
pub mod handler;
pub mod logging;
pub mod provider;
pub mod session;
pub mod transcript;
pub mod tui;
pub mod ui;

// Re-export main types for convenience
pub use advice::{AdviceBackend, AdviceClient, AdviceError};
pub use session::{ChatSession, SubmitRejected};
pub use transcript::{ChatRole, ChatTurn, Transcript};
