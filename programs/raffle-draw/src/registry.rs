use anchor_lang::prelude::*;

use crate::{error::RaffleError, state::Ticket};

/// Owns every ticket of the raffle, indexed by `number - 1`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TicketRegistry {
    tickets: Vec<Ticket>,
}

impl TicketRegistry {
    /// Replaces the collection with `total_tickets` unsold tickets numbered from 1.
    pub fn configure(&mut self, total_tickets: u32) -> Result<()> {
        require!(total_tickets >= 1, RaffleError::InvalidConfig);
        self.tickets = (1..=total_tickets).map(Ticket::unsold).collect();
        Ok(())
    }

    /// Rebuilds the collection from persisted tickets, which must be numbered 1..N in order.
    pub fn restore(&mut self, tickets: Vec<Ticket>) -> Result<()> {
        require!(
            tickets
                .iter()
                .zip(1u32..)
                .all(|(ticket, expected)| ticket.number == expected),
            RaffleError::PersistenceFailure
        );
        self.tickets = tickets;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.tickets.clear();
    }

    /// Updates the buyer and payment status of an existing ticket.
    /// Winner status is left as it is.
    ///
    /// # Errors
    /// - `OutOfRange` if `number` is not between 1 and the configured total
    pub fn upsert(&mut self, number: u32, buyer_name: &str, is_paid: bool) -> Result<&Ticket> {
        let ticket = self.ticket_mut(number)?;
        ticket.buyer_name = buyer_name.to_string();
        ticket.is_paid = is_paid;
        Ok(ticket)
    }

    /// # Errors
    /// - `OutOfRange` for unknown ticket numbers
    /// - `AlreadyWinner` if the ticket already holds a prize
    pub fn mark_winner(&mut self, number: u32, prize_id: u32) -> Result<&Ticket> {
        let ticket = self.ticket_mut(number)?;
        require!(!ticket.is_winner, RaffleError::AlreadyWinner);

        ticket.is_winner = true;
        ticket.prize_id = Some(prize_id);
        Ok(ticket)
    }

    pub fn clear_winners(&mut self) {
        for ticket in self.tickets.iter_mut() {
            ticket.is_winner = false;
            ticket.prize_id = None;
        }
    }

    /// Paid tickets that have not won yet. Recomputed on every call.
    pub fn eligible_for_draw(&self) -> impl Iterator<Item = &Ticket> + '_ {
        self.tickets.iter().filter(|ticket| ticket.is_eligible())
    }

    pub fn winners(&self) -> impl Iterator<Item = &Ticket> + '_ {
        self.tickets.iter().filter(|ticket| ticket.is_winner)
    }

    pub fn sold_count(&self) -> usize {
        self.tickets.iter().filter(|ticket| ticket.is_sold()).count()
    }

    pub fn paid_count(&self) -> usize {
        self.tickets.iter().filter(|ticket| ticket.is_paid).count()
    }

    pub fn ticket(&self, number: u32) -> Option<&Ticket> {
        let index = number.checked_sub(1)? as usize;
        self.tickets.get(index)
    }

    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    pub fn total(&self) -> u32 {
        self.tickets.len() as u32
    }

    fn ticket_mut(&mut self, number: u32) -> Result<&mut Ticket> {
        let index = number
            .checked_sub(1)
            .ok_or(RaffleError::OutOfRange)? as usize;
        self.tickets
            .get_mut(index)
            .ok_or_else(|| error!(RaffleError::OutOfRange))
    }
}
