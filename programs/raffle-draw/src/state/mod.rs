pub use config::*;
pub use prize::*;
pub use snapshot::*;
pub use ticket::*;

pub mod config;
pub mod prize;
pub mod snapshot;
pub mod ticket;
