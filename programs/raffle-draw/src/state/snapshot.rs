use anchor_lang::prelude::*;
use arrayref::array_ref;

use crate::{
    error::RaffleError,
    state::{config::RaffleConfig, ticket::Ticket},
};

const DISCRIMINATOR_LEN: usize = 8;

/// Everything needed to rebuild a raffle after a restart.
///
/// Stored with the Anchor account layout: an 8 byte discriminator followed by
/// the Borsh encoding of the fields.
#[account]
#[derive(Debug, PartialEq)]
pub struct RaffleSnapshot {
    pub config: RaffleConfig,
    /// One entry per ticket, ordered by number
    pub tickets: Vec<Ticket>,
    pub remaining_prizes: u32,
}

impl RaffleSnapshot {
    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut data = Vec::new();
        self.try_serialize(&mut data)
            .map_err(|_| error!(RaffleError::PersistenceFailure))?;
        Ok(data)
    }

    /// Decodes a stored snapshot and checks that it describes a consistent raffle.
    ///
    /// # Errors
    /// - `PersistenceFailure` if the data is truncated or has bytes left over,
    ///   carries a foreign discriminator, awards a prize twice, or otherwise
    ///   violates ticket/prize invariants
    pub fn decode(data: &[u8]) -> Result<Self> {
        require!(
            data.len() >= DISCRIMINATOR_LEN,
            RaffleError::PersistenceFailure
        );
        let discriminator = array_ref![data, 0, DISCRIMINATOR_LEN];
        require!(
            discriminator[..] == *Self::DISCRIMINATOR,
            RaffleError::PersistenceFailure
        );

        let mut body = &data[DISCRIMINATOR_LEN..];
        let snapshot = <Self as AnchorDeserialize>::deserialize(&mut body)
            .map_err(|_| error!(RaffleError::PersistenceFailure))?;
        require!(body.is_empty(), RaffleError::PersistenceFailure);
        snapshot.check()?;

        Ok(snapshot)
    }

    fn check(&self) -> Result<()> {
        self.config
            .validate()
            .map_err(|_| error!(RaffleError::PersistenceFailure))?;
        require!(
            self.tickets.len() == self.config.total_tickets as usize,
            RaffleError::PersistenceFailure
        );

        let mut awarded: Vec<u32> = Vec::new();
        for (ticket, expected) in self.tickets.iter().zip(1u32..) {
            require!(ticket.number == expected, RaffleError::PersistenceFailure);
            match (ticket.is_winner, ticket.prize_id) {
                (true, Some(prize_id)) => {
                    require!(
                        self.config.prize(prize_id).is_some(),
                        RaffleError::PersistenceFailure
                    );
                    awarded.push(prize_id);
                }
                (false, None) => {}
                _ => return err!(RaffleError::PersistenceFailure),
            }
        }

        let winners = awarded.len();
        awarded.sort_unstable();
        awarded.dedup();
        require!(awarded.len() == winners, RaffleError::PersistenceFailure);

        let winners =
            u32::try_from(winners).map_err(|_| error!(RaffleError::PersistenceFailure))?;
        require!(
            self.config.total_prizes.checked_sub(winners) == Some(self.remaining_prizes),
            RaffleError::PersistenceFailure
        );

        Ok(())
    }
}
