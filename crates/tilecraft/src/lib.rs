pub mod config;
pub mod session;

pub use config::{GameConfig, SessionConfig};
pub use session::{Session, SessionReport};
