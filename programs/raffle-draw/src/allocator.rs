use anchor_lang::prelude::*;

use crate::{error::RaffleError, state::Prize};

/// Hands out prizes in configured order and tracks how many are left.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PrizeAllocator {
    prizes: Vec<Prize>,
    remaining: u32,
}

impl PrizeAllocator {
    pub fn configure(&mut self, prizes: Vec<Prize>) {
        self.remaining = prizes.len() as u32;
        self.prizes = prizes;
    }

    pub fn restore(&mut self, prizes: Vec<Prize>, remaining: u32) -> Result<()> {
        require!(
            remaining as usize <= prizes.len(),
            RaffleError::PersistenceFailure
        );
        self.prizes = prizes;
        self.remaining = remaining;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.prizes.clear();
        self.remaining = 0;
    }

    /// The prize the next draw awards: position `total - remaining` in the configured list.
    ///
    /// # Errors
    /// - `NoPrizesRemaining` once every prize has been awarded
    pub fn next_prize(&self) -> Result<&Prize> {
        require!(self.remaining > 0, RaffleError::NoPrizesRemaining);
        self.prizes
            .get(self.awarded() as usize)
            .ok_or_else(|| error!(RaffleError::NoPrizesRemaining))
    }

    /// Records that the prize returned by `next_prize` has been given out.
    pub fn commit_award(&mut self) -> Result<()> {
        self.remaining = self
            .remaining
            .checked_sub(1)
            .ok_or(RaffleError::NoPrizesRemaining)?;
        Ok(())
    }

    pub fn reset(&mut self) {
        self.remaining = self.total();
    }

    pub fn prize(&self, id: u32) -> Option<&Prize> {
        self.prizes.iter().find(|prize| prize.id == id)
    }

    pub fn prizes(&self) -> &[Prize] {
        &self.prizes
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn total(&self) -> u32 {
        self.prizes.len() as u32
    }

    pub fn awarded(&self) -> u32 {
        self.total() - self.remaining
    }
}
