#![allow(unexpected_cfgs)]

use anchor_lang::prelude::*;

pub mod allocator;
pub mod constants;
pub mod draw;
pub mod error;
pub mod instructions;
pub mod raffle;
pub mod registry;
pub mod state;
pub mod store;

pub use allocator::PrizeAllocator;
pub use draw::*;
pub use error::RaffleError;
pub use raffle::Raffle;
pub use registry::TicketRegistry;
pub use state::*;
pub use store::{FileStore, MemoryStore, SnapshotStore};

declare_id!("RafDrawTick5Wn8rPzeQ7k3LmVx9eYtHs2DcGbNpJq4");
