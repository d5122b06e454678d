use anchor_lang::prelude::*;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct Ticket {
    /// Position in the raffle, starting at 1
    pub number: u32,
    /// Empty while the ticket is unsold
    pub buyer_name: String,
    pub is_paid: bool,
    pub is_winner: bool,
    /// Set exactly when `is_winner` is true
    pub prize_id: Option<u32>,
}

impl Ticket {
    pub fn unsold(number: u32) -> Self {
        Self {
            number,
            buyer_name: String::new(),
            is_paid: false,
            is_winner: false,
            prize_id: None,
        }
    }

    pub fn is_sold(&self) -> bool {
        !self.buyer_name.is_empty()
    }

    pub fn is_eligible(&self) -> bool {
        self.is_paid && !self.is_winner
    }
}
