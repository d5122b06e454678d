use anchor_lang::prelude::*;

use crate::{
    allocator::PrizeAllocator,
    draw::{DrawEngine, DrawState, DrawTiming, RandomSource, SplitMix64},
    registry::TicketRegistry,
    state::{Prize, RaffleConfig, RaffleSnapshot, Ticket},
    store::SnapshotStore,
};

/// Single owner of the raffle state. Commands live in `instructions`; every
/// one that commits a change writes a fresh snapshot to the store.
pub struct Raffle<S, R = SplitMix64> {
    pub(crate) store: S,
    pub(crate) rng: R,
    pub(crate) config: Option<RaffleConfig>,
    pub(crate) registry: TicketRegistry,
    pub(crate) allocator: PrizeAllocator,
    pub(crate) engine: DrawEngine,
}

impl<S: SnapshotStore> Raffle<S> {
    /// Opens the raffle kept in `store` with the default draw timing.
    pub fn open(store: S) -> Result<Self> {
        Self::open_with(store, SplitMix64::from_entropy(), DrawTiming::default())
    }
}

impl<S: SnapshotStore, R: RandomSource> Raffle<S, R> {
    /// Opens the raffle kept in `store`. A stored snapshot is restored as is;
    /// without one the raffle starts unconfigured.
    ///
    /// # Errors
    /// - `PersistenceFailure` if the store cannot be read or holds an
    ///   inconsistent snapshot
    pub fn open_with(mut store: S, rng: R, timing: DrawTiming) -> Result<Self> {
        let snapshot = store.load()?;

        let mut raffle = Self {
            store,
            rng,
            config: None,
            registry: TicketRegistry::default(),
            allocator: PrizeAllocator::default(),
            engine: DrawEngine::new(timing),
        };

        if let Some(snapshot) = snapshot {
            raffle.restore(snapshot)?;
            msg!(
                "Restored raffle with {} tickets, {} of {} prizes left",
                raffle.registry.total(),
                raffle.allocator.remaining(),
                raffle.allocator.total()
            );
        }

        Ok(raffle)
    }

    fn restore(&mut self, snapshot: RaffleSnapshot) -> Result<()> {
        let RaffleSnapshot {
            config,
            tickets,
            remaining_prizes,
        } = snapshot;

        self.registry.restore(tickets)?;
        self.allocator
            .restore(config.prizes.clone(), remaining_prizes)?;
        self.config = Some(config);

        Ok(())
    }

    /// The document the store receives after each committed change.
    pub fn snapshot(&self) -> Option<RaffleSnapshot> {
        let config = self.config.clone()?;
        Some(RaffleSnapshot {
            config,
            tickets: self.registry.tickets().to_vec(),
            remaining_prizes: self.allocator.remaining(),
        })
    }

    /// Writes the current state, or clears the store when unconfigured.
    /// In-memory state is kept whatever the outcome.
    pub(crate) fn persist(&mut self) -> Result<()> {
        match self.snapshot() {
            Some(snapshot) => self.store.save(&snapshot),
            None => self.store.clear(),
        }
    }

    pub fn config(&self) -> Option<&RaffleConfig> {
        self.config.as_ref()
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_some()
    }

    pub fn ticket(&self, number: u32) -> Option<&Ticket> {
        self.registry.ticket(number)
    }

    pub fn tickets(&self) -> &[Ticket] {
        self.registry.tickets()
    }

    /// Winning tickets in number order, each with the prize it holds.
    pub fn winners(&self) -> Vec<(&Ticket, &Prize)> {
        self.registry
            .winners()
            .filter_map(|ticket| {
                let prize = self.allocator.prize(ticket.prize_id?)?;
                Some((ticket, prize))
            })
            .collect()
    }

    pub fn sold_count(&self) -> usize {
        self.registry.sold_count()
    }

    pub fn paid_count(&self) -> usize {
        self.registry.paid_count()
    }

    pub fn eligible_count(&self) -> usize {
        self.registry.eligible_for_draw().count()
    }

    pub fn remaining_prizes(&self) -> u32 {
        self.allocator.remaining()
    }

    pub fn draw_state(&self) -> DrawState {
        DrawState {
            phase: self.engine.phase(),
            displayed_number: self.engine.displayed_number(),
            remaining_prizes: self.allocator.remaining(),
        }
    }

    /// Elapsed time, since the running draw started, at which its next tick is due.
    pub fn next_tick_at(&self) -> Option<u64> {
        self.engine.next_tick_at()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}
