use anchor_lang::prelude::*;

use crate::{draw::RandomSource, raffle::Raffle, store::SnapshotStore};

impl<S: SnapshotStore, R: RandomSource> Raffle<S, R> {
    /// Forgets the configuration, every ticket and every winner, and clears
    /// the store. A running draw is abandoned first.
    pub fn reconfigure_from_scratch(&mut self) -> Result<()> {
        self.cancel_draw();

        self.config = None;
        self.registry.clear();
        self.allocator.clear();
        msg!("Raffle cleared, awaiting a new configuration");

        self.store.clear()
    }
}
