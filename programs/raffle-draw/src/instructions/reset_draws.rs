use anchor_lang::prelude::*;

use crate::{draw::RandomSource, error::RaffleError, raffle::Raffle, store::SnapshotStore};

impl<S: SnapshotStore, R: RandomSource> Raffle<S, R> {
    /// Takes every prize back so the raffle can be drawn again.
    ///
    /// After execution:
    /// - No ticket is a winner or holds a prize
    /// - Buyer names and payment status are unchanged
    /// - All configured prizes are available, first prize next
    ///
    /// # Errors
    /// - `InvalidState` while a draw is running
    /// - `PersistenceFailure` if the reset cannot be saved; it is kept in memory
    pub fn reset_draws(&mut self) -> Result<()> {
        require!(!self.engine.is_drawing(), RaffleError::InvalidState);

        self.registry.clear_winners();
        self.allocator.reset();
        msg!("Draws reset, {} prizes available", self.allocator.remaining());

        self.persist()
    }
}
