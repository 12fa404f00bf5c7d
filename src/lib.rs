pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod generator;
pub mod interactive;
pub mod plan_file;
pub mod session;

pub use error::{PlannerError, Result};
pub use session::PlanningSession;
