//! MapEdit Application
//!
//! Headless shell around the editor core: loads scripted input sessions
//! and drives them through the mode host.

mod replay;

pub use replay::{ReplayError, ReplayScript, ReplayStep, Session, run};
