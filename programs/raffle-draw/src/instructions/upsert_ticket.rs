use anchor_lang::prelude::*;

use crate::{draw::RandomSource, raffle::Raffle, store::SnapshotStore};

impl<S: SnapshotStore, R: RandomSource> Raffle<S, R> {
    /// Records the buyer and payment status of a ticket. Winner status is
    /// never touched. Allowed while a draw is running; the running draw keeps
    /// the pool it started with.
    ///
    /// # Errors
    /// - `OutOfRange` if `number` is not a configured ticket
    /// - `PersistenceFailure` if the update cannot be saved; it is kept in memory
    pub fn upsert_ticket(&mut self, number: u32, buyer_name: &str, is_paid: bool) -> Result<()> {
        self.registry.upsert(number, buyer_name, is_paid)?;
        self.persist()
    }
}
