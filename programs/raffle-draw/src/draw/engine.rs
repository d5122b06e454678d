use anchor_lang::prelude::*;

use crate::{
    allocator::PrizeAllocator,
    draw::{random::RandomSource, timing::DrawTiming},
    error::RaffleError,
    registry::TicketRegistry,
    state::{Prize, Ticket},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawPhase {
    Idle,
    /// Ticks are speeding up
    Drawing,
    /// Ticks are slowing down towards the winner
    Settling,
}

/// What the presentation layer needs to render the draw area.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DrawState {
    pub phase: DrawPhase,
    pub displayed_number: Option<u32>,
    pub remaining_prizes: u32,
}

/// Reported on every animation tick. The displayed number is cosmetic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DrawTick {
    pub displayed_number: u32,
    /// Time since the draw started at which this tick fired
    pub elapsed_ms: u64,
    pub next_tick_in_ms: u64,
}

/// Emitted once when a draw awards its prize.
#[event]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DrawCompleted {
    pub winner: Ticket,
    pub prize: Prize,
    pub remaining_prizes: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DrawEvent {
    Tick(DrawTick),
    Completed(DrawCompleted),
}

#[derive(Clone, Copy, Debug)]
struct ScheduledTick {
    due_ms: u64,
}

#[derive(Debug)]
struct DrawSession {
    /// Eligible ticket numbers, frozen when the draw started
    pool: Vec<u32>,
    displayed_number: Option<u32>,
    settling: bool,
    /// `None` only while a tick is being fired
    pending: Option<ScheduledTick>,
}

/// Runs one draw at a time: freezes the eligible pool, samples it on every
/// tick and commits the last sample as the winner.
#[derive(Debug, Default)]
pub struct DrawEngine {
    timing: DrawTiming,
    session: Option<DrawSession>,
}

impl DrawEngine {
    pub fn new(timing: DrawTiming) -> Self {
        Self {
            timing,
            session: None,
        }
    }

    pub fn timing(&self) -> &DrawTiming {
        &self.timing
    }

    pub fn phase(&self) -> DrawPhase {
        match &self.session {
            None => DrawPhase::Idle,
            Some(session) if session.settling => DrawPhase::Settling,
            Some(_) => DrawPhase::Drawing,
        }
    }

    pub fn is_drawing(&self) -> bool {
        self.session.is_some()
    }

    pub fn displayed_number(&self) -> Option<u32> {
        self.session.as_ref()?.displayed_number
    }

    /// Elapsed time at which the pending tick is due.
    pub fn next_tick_at(&self) -> Option<u64> {
        Some(self.session.as_ref()?.pending?.due_ms)
    }

    pub fn pool(&self) -> Option<&[u32]> {
        self.session.as_ref().map(|session| session.pool.as_slice())
    }

    /// Starts a draw and fires its first tick at time zero.
    ///
    /// # Errors
    /// - `DrawInProgress` if a draw is already running
    /// - `NoEligibleTickets` if no ticket is paid and still without a prize
    /// - `NoPrizesRemaining` if every prize has been awarded
    pub fn start(
        &mut self,
        registry: &mut TicketRegistry,
        allocator: &mut PrizeAllocator,
        rng: &mut dyn RandomSource,
    ) -> Result<DrawEvent> {
        require!(!self.is_drawing(), RaffleError::DrawInProgress);

        let pool: Vec<u32> = registry
            .eligible_for_draw()
            .map(|ticket| ticket.number)
            .collect();
        require!(!pool.is_empty(), RaffleError::NoEligibleTickets);
        require!(allocator.remaining() > 0, RaffleError::NoPrizesRemaining);

        self.session = Some(DrawSession {
            pool,
            displayed_number: None,
            settling: false,
            pending: Some(ScheduledTick { due_ms: 0 }),
        });

        self.advance(0, registry, allocator, rng)
    }

    /// Fires the pending tick. A tick never fires before it is due, so an
    /// earlier `elapsed_ms` is moved forward to the due time.
    ///
    /// The tick that reaches the end of the animation commits the number it
    /// sampled: the next prize goes to that ticket and the engine returns to idle.
    ///
    /// # Errors
    /// - `InvalidState` if no draw is running
    pub fn advance(
        &mut self,
        elapsed_ms: u64,
        registry: &mut TicketRegistry,
        allocator: &mut PrizeAllocator,
        rng: &mut dyn RandomSource,
    ) -> Result<DrawEvent> {
        let session = self.session.as_mut().ok_or(RaffleError::InvalidState)?;
        let tick = session.pending.take().ok_or(RaffleError::InvalidState)?;

        let elapsed_ms = elapsed_ms.max(tick.due_ms);
        let progress = self.timing.progress(elapsed_ms);

        let index = rng.next_index(session.pool.len());
        let number = *session
            .pool
            .get(index)
            .ok_or(RaffleError::InvalidState)?;
        session.displayed_number = Some(number);

        if progress < 1.0 {
            let next_tick_in_ms = self.timing.interval_ms(progress);
            session.settling = self.timing.is_settling(progress);
            session.pending = Some(ScheduledTick {
                due_ms: elapsed_ms.saturating_add(next_tick_in_ms),
            });

            return Ok(DrawEvent::Tick(DrawTick {
                displayed_number: number,
                elapsed_ms,
                next_tick_in_ms,
            }));
        }

        // The pending tick was taken above, so nothing fires after the commit
        self.session = None;
        let completed = commit(number, registry, allocator)?;

        Ok(DrawEvent::Completed(completed))
    }

    /// Abandons the running draw without awarding anything.
    /// Returns whether a draw was running.
    pub fn cancel(&mut self) -> bool {
        self.session.take().is_some()
    }
}

fn commit(
    winner: u32,
    registry: &mut TicketRegistry,
    allocator: &mut PrizeAllocator,
) -> Result<DrawCompleted> {
    let prize = allocator.next_prize()?.clone();
    let ticket = registry.mark_winner(winner, prize.id)?.clone();
    allocator.commit_award()?;

    Ok(DrawCompleted {
        winner: ticket,
        prize,
        remaining_prizes: allocator.remaining(),
    })
}
