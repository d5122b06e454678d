use anchor_lang::prelude::*;

use crate::{
    draw::RandomSource,
    error::RaffleError,
    raffle::Raffle,
    state::{PrizeSpec, RaffleConfig},
    store::SnapshotStore,
};

impl<S: SnapshotStore, R: RandomSource> Raffle<S, R> {
    /// Configures the raffle with `total_tickets` tickets and one prize per
    /// spec, awarded in the given order.
    ///
    /// # Arguments
    /// * `total_tickets` - Number of tickets, numbered from 1
    /// * `prizes` - Prizes in award order; ids are assigned from 1
    ///
    /// # Errors
    /// - `InvalidConfig` if there are no tickets, no prizes, or more prizes than tickets
    /// - `OutOfRange` if `total_tickets` exceeds `MAX_TOTAL_TICKETS`
    /// - `InvalidState` while a draw is running
    /// - `PersistenceFailure` if the new state cannot be saved
    pub fn configure_raffle(&mut self, total_tickets: u32, prizes: Vec<PrizeSpec>) -> Result<()> {
        let config = RaffleConfig::new(total_tickets, prizes)?;
        self.configure_raffle_with(config)
    }

    /// Commits a prebuilt configuration.
    ///
    /// After execution:
    /// - Every ticket is unsold, unpaid and without a prize
    /// - All prizes are available again
    pub fn configure_raffle_with(&mut self, config: RaffleConfig) -> Result<()> {
        require!(!self.engine.is_drawing(), RaffleError::InvalidState);
        config.validate()?;

        self.registry.configure(config.total_tickets)?;
        self.allocator.configure(config.prizes.clone());

        msg!(
            "Raffle configured with {} tickets and {} prizes",
            config.total_tickets,
            config.total_prizes
        );
        self.config = Some(config);

        self.persist()
    }
}
