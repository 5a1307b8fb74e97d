//! Interactive console session
//!
//! - `prompt`: reading numbers, amounts and PINs from a line-based console
//! - `controller`: the menu state machine over the teller

pub mod controller;
pub mod prompt;

pub use controller::{Session, SessionState};
pub use prompt::Prompter;
