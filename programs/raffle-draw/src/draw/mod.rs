pub use engine::*;
pub use random::*;
pub use scheduler::*;
pub use timing::*;

pub mod engine;
pub mod random;
pub mod scheduler;
pub mod timing;
