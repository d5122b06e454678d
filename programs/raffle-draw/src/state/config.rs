use anchor_lang::prelude::*;

use crate::{
    constants::{DEFAULT_TOTAL_PRIZES, DEFAULT_TOTAL_TICKETS, MAX_TOTAL_TICKETS},
    error::RaffleError,
    state::prize::{Prize, PrizeSpec},
};

/// Shape of a raffle: how many tickets exist and which prizes are drawn, in order.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct RaffleConfig {
    pub total_tickets: u32,
    pub total_prizes: u32,
    /// Awarded strictly in this order, first prize first
    pub prizes: Vec<Prize>,
}

impl RaffleConfig {
    /// Builds a configuration with one prize per spec, ids assigned from 1.
    ///
    /// # Errors
    /// - `InvalidConfig` if there are no tickets, no prizes, or more prizes than tickets
    /// - `OutOfRange` if `total_tickets` exceeds `MAX_TOTAL_TICKETS`
    pub fn new(total_tickets: u32, prizes: Vec<PrizeSpec>) -> Result<Self> {
        let total_prizes =
            u32::try_from(prizes.len()).map_err(|_| error!(RaffleError::InvalidConfig))?;

        let config = Self {
            total_tickets,
            total_prizes,
            prizes: prizes
                .into_iter()
                .zip(1..)
                .map(|(spec, id)| spec.into_prize(id))
                .collect(),
        };
        config.validate()?;

        Ok(config)
    }

    /// Builds a configuration with exactly `total_prizes` prizes. Named specs are
    /// used first; missing ones get placeholders and extra ones are dropped.
    pub fn with_prize_count(
        total_tickets: u32,
        total_prizes: u32,
        named: Vec<PrizeSpec>,
    ) -> Result<Self> {
        require!(total_prizes > 0, RaffleError::InvalidConfig);
        require!(total_prizes <= total_tickets, RaffleError::InvalidConfig);

        let mut specs: Vec<PrizeSpec> = named.into_iter().take(total_prizes as usize).collect();
        let named_count = specs.len() as u32;
        specs.extend((named_count + 1..=total_prizes).map(PrizeSpec::placeholder));

        Self::new(total_tickets, specs)
    }

    pub fn validate(&self) -> Result<()> {
        require!(self.total_tickets >= 1, RaffleError::InvalidConfig);
        require!(
            self.total_tickets <= MAX_TOTAL_TICKETS,
            RaffleError::OutOfRange
        );
        require!(self.total_prizes >= 1, RaffleError::InvalidConfig);
        require!(
            self.total_prizes <= self.total_tickets,
            RaffleError::InvalidConfig
        );
        require!(
            self.prizes.len() == self.total_prizes as usize,
            RaffleError::InvalidConfig
        );

        let mut ids: Vec<u32> = self.prizes.iter().map(|prize| prize.id).collect();
        ids.sort_unstable();
        ids.dedup();
        require!(ids.len() == self.prizes.len(), RaffleError::InvalidConfig);

        Ok(())
    }

    pub fn prize(&self, id: u32) -> Option<&Prize> {
        self.prizes.iter().find(|prize| prize.id == id)
    }
}

impl Default for RaffleConfig {
    fn default() -> Self {
        Self {
            total_tickets: DEFAULT_TOTAL_TICKETS,
            total_prizes: DEFAULT_TOTAL_PRIZES,
            prizes: (1..=DEFAULT_TOTAL_PRIZES)
                .map(|id| PrizeSpec::placeholder(id).into_prize(id))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::expect_err;

    #[test]
    fn test_new_assigns_ids_in_order() {
        let config = RaffleConfig::new(
            10,
            vec![PrizeSpec::new("Bike", "Red"), PrizeSpec::new("Mug", "")],
        )
        .unwrap();

        assert_eq!(config.total_prizes, 2);
        assert_eq!(config.prizes[0].id, 1);
        assert_eq!(config.prizes[1].id, 2);
        assert_eq!(config.prize(2).unwrap().name, "Mug");
    }

    #[test]
    fn test_rejects_bad_counts() {
        expect_err(
            RaffleConfig::new(0, vec![PrizeSpec::placeholder(1)]),
            RaffleError::InvalidConfig,
        );
        expect_err(RaffleConfig::new(5, vec![]), RaffleError::InvalidConfig);
        expect_err(
            RaffleConfig::new(1, vec![PrizeSpec::placeholder(1), PrizeSpec::placeholder(2)]),
            RaffleError::InvalidConfig,
        );
        expect_err(
            RaffleConfig::new(MAX_TOTAL_TICKETS + 1, vec![PrizeSpec::placeholder(1)]),
            RaffleError::OutOfRange,
        );
    }

    #[test]
    fn test_with_prize_count_pads_and_truncates() {
        let padded =
            RaffleConfig::with_prize_count(50, 3, vec![PrizeSpec::new("Car", "Blue")]).unwrap();
        assert_eq!(padded.prizes.len(), 3);
        assert_eq!(padded.prizes[0].name, "Car");
        assert_eq!(padded.prizes[2].name, "Prize 3");

        let truncated = RaffleConfig::with_prize_count(
            50,
            1,
            vec![PrizeSpec::new("Car", ""), PrizeSpec::new("Boat", "")],
        )
        .unwrap();
        assert_eq!(truncated.prizes.len(), 1);
        assert_eq!(truncated.prizes[0].name, "Car");
    }

    #[test]
    fn test_validate_rejects_duplicate_ids() {
        let mut config = RaffleConfig::new(
            5,
            vec![PrizeSpec::placeholder(1), PrizeSpec::placeholder(2)],
        )
        .unwrap();
        config.prizes[1].id = 1;

        expect_err(config.validate(), RaffleError::InvalidConfig);
    }

    #[test]
    fn test_default_is_valid() {
        let config = RaffleConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.total_tickets, 100);
        assert_eq!(config.prizes[0].name, "Prize 1");
    }
}
