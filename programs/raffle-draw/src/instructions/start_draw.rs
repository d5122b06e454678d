use anchor_lang::prelude::*;

use crate::{
    draw::{DrawCompleted, DrawEvent, DrawObserver, DrawSignal, RandomSource, Scheduler},
    raffle::Raffle,
    store::SnapshotStore,
};

impl<S: SnapshotStore, R: RandomSource> Raffle<S, R> {
    /// Starts a draw for the next prize. The pool of candidates is every paid
    /// ticket without a prize at this moment; later sales do not join it.
    ///
    /// The first tick fires right away. Call `advance_draw` when the tick
    /// announced in `next_tick_in_ms` is due, or let `run_draw` pace it.
    ///
    /// # Errors
    /// - `DrawInProgress` if a draw is already running
    /// - `NoEligibleTickets` if no ticket is paid and without a prize
    /// - `NoPrizesRemaining` if every prize has been awarded
    pub fn start_draw(&mut self) -> Result<DrawEvent> {
        let event = self.begin_draw()?;
        self.record(&event)?;
        Ok(event)
    }

    /// Fires the pending tick of the running draw at `elapsed_ms` since it
    /// started. The tick that reaches the end of the animation awards the
    /// prize and returns `DrawEvent::Completed`.
    ///
    /// # Errors
    /// - `InvalidState` if no draw is running
    /// - `PersistenceFailure` if the award cannot be saved; the winner is
    ///   still recorded in memory and `DrawCompleted` has been emitted
    pub fn advance_draw(&mut self, elapsed_ms: u64) -> Result<DrawEvent> {
        let event = self.fire_tick(elapsed_ms)?;
        self.record(&event)?;
        Ok(event)
    }

    /// Abandons the running draw; no prize is awarded.
    /// Returns whether a draw was running.
    pub fn cancel_draw(&mut self) -> bool {
        let cancelled = self.engine.cancel();
        if cancelled {
            msg!("Draw abandoned before a winner was chosen");
        }
        cancelled
    }

    /// Runs a whole draw, sleeping on `scheduler` between ticks and reporting
    /// every event to `observer`.
    ///
    /// Returns `None` if the observer abandoned the draw.
    ///
    /// # Errors
    /// Same as `start_draw` and `advance_draw`. The observer receives the
    /// completed draw before the award is saved, so it hears about the winner
    /// even when the save then fails with `PersistenceFailure`.
    pub fn run_draw(
        &mut self,
        scheduler: &mut impl Scheduler,
        observer: &mut impl DrawObserver,
    ) -> Result<Option<DrawCompleted>> {
        scheduler.restart();
        let mut event = self.begin_draw()?;

        loop {
            let tick = match event {
                DrawEvent::Tick(tick) => tick,
                DrawEvent::Completed(completed) => {
                    observer.on_completed(&completed);
                    self.record_completed(&completed)?;
                    return Ok(Some(completed));
                }
            };

            if observer.on_tick(&tick) == DrawSignal::Abandon {
                self.cancel_draw();
                return Ok(None);
            }

            let due_ms = tick.elapsed_ms.saturating_add(tick.next_tick_in_ms);
            let now_ms = scheduler.elapsed_ms();
            if due_ms > now_ms {
                scheduler.sleep_ms(due_ms - now_ms);
            }

            event = self.fire_tick(scheduler.elapsed_ms())?;
        }
    }

    fn begin_draw(&mut self) -> Result<DrawEvent> {
        let event = self
            .engine
            .start(&mut self.registry, &mut self.allocator, &mut self.rng)?;

        msg!(
            "Draw started for prize {} of {} with {} candidate tickets",
            self.allocator.awarded() + 1,
            self.allocator.total(),
            self.engine.pool().map_or(0, <[u32]>::len)
        );

        Ok(event)
    }

    fn fire_tick(&mut self, elapsed_ms: u64) -> Result<DrawEvent> {
        self.engine.advance(
            elapsed_ms,
            &mut self.registry,
            &mut self.allocator,
            &mut self.rng,
        )
    }

    fn record(&mut self, event: &DrawEvent) -> Result<()> {
        match event {
            DrawEvent::Completed(completed) => self.record_completed(completed),
            DrawEvent::Tick(_) => Ok(()),
        }
    }

    /// Emits the award, then saves it.
    fn record_completed(&mut self, completed: &DrawCompleted) -> Result<()> {
        msg!(
            "Ticket {} wins {}, {} prizes left",
            completed.winner.number,
            completed.prize.name,
            completed.remaining_prizes
        );
        emit!(completed.clone());

        self.persist()
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        draw::{
            DrawCompleted, DrawEvent, DrawObserver, DrawPhase, DrawSignal, DrawTick,
            ManualScheduler, Scheduler,
        },
        error::RaffleError,
        raffle::Raffle,
        state::PrizeSpec,
        store::{MemoryStore, SnapshotStore},
        test_utils::{expect_err, grand_prize_raffle, raffle_with, FlakyStore},
    };

    #[derive(Default)]
    struct Recorder {
        ticks: Vec<DrawTick>,
        completed: Vec<DrawCompleted>,
        abandon_after: Option<usize>,
    }

    impl DrawObserver for Recorder {
        fn on_tick(&mut self, tick: &DrawTick) -> DrawSignal {
            self.ticks.push(tick.clone());
            match self.abandon_after {
                Some(limit) if self.ticks.len() >= limit => DrawSignal::Abandon,
                _ => DrawSignal::Continue,
            }
        }

        fn on_completed(&mut self, completed: &DrawCompleted) {
            self.completed.push(completed.clone());
        }
    }

    #[test]
    fn test_grand_prize_goes_to_a_paid_ticket() {
        let mut raffle = grand_prize_raffle();
        let mut scheduler = ManualScheduler::default();
        let mut recorder = Recorder::default();

        let completed = raffle
            .run_draw(&mut scheduler, &mut recorder)
            .unwrap()
            .unwrap();

        assert!([2, 4].contains(&completed.winner.number));
        assert_eq!(completed.prize.name, "Grand Prize");
        assert_eq!(completed.remaining_prizes, 0);
        assert_eq!(raffle.remaining_prizes(), 0);
        assert_eq!(recorder.completed, vec![completed.clone()]);
        assert!(scheduler.elapsed_ms() >= 3_000);
        assert_eq!(scheduler.sleeps(), recorder.ticks.len());

        let loser = if completed.winner.number == 2 { 4 } else { 2 };
        let loser = raffle.ticket(loser).unwrap();
        assert!(loser.is_paid);
        assert!(!loser.is_winner);
        assert_eq!(loser.prize_id, None);

        let stored = raffle.store_mut().load().unwrap().unwrap();
        assert_eq!(stored.remaining_prizes, 0);
        assert!(stored.tickets[completed.winner.number as usize - 1].is_winner);
    }

    #[test]
    fn test_no_eligible_tickets_leaves_state_unchanged() {
        let mut raffle = raffle_with(MemoryStore::default(), 3);
        raffle
            .configure_raffle(5, vec![PrizeSpec::placeholder(1)])
            .unwrap();
        raffle.upsert_ticket(1, "Unpaid", false).unwrap();
        let before = raffle.snapshot();

        expect_err(raffle.start_draw(), RaffleError::NoEligibleTickets);
        assert_eq!(raffle.snapshot(), before);
        assert_eq!(raffle.draw_state().phase, DrawPhase::Idle);
    }

    #[test]
    fn test_second_start_while_animating() {
        let mut raffle = grand_prize_raffle();
        raffle.start_draw().unwrap();
        raffle.advance_draw(100).unwrap();

        expect_err(raffle.start_draw(), RaffleError::DrawInProgress);
        assert_eq!(raffle.draw_state().phase, DrawPhase::Drawing);
        assert!(raffle.draw_state().displayed_number.is_some());
    }

    #[test]
    fn test_late_payments_do_not_join_running_draw() {
        for seed in 0..10 {
            let mut raffle = grand_prize_raffle_seeded(seed);
            raffle.start_draw().unwrap();
            raffle.upsert_ticket(1, "Late", true).unwrap();
            raffle.upsert_ticket(3, "Later", true).unwrap();

            let completed = finish(&mut raffle);

            assert!([2, 4].contains(&completed.winner.number));
            assert_eq!(raffle.eligible_count(), 3);
        }
    }

    #[test]
    fn test_prizes_awarded_in_order_until_exhausted() {
        let mut raffle = raffle_with(MemoryStore::default(), 21);
        raffle
            .configure_raffle(
                6,
                vec![
                    PrizeSpec::new("Car", ""),
                    PrizeSpec::new("Bike", ""),
                    PrizeSpec::new("Book", ""),
                ],
            )
            .unwrap();
        for number in 1..=6 {
            raffle.upsert_ticket(number, "Buyer", true).unwrap();
        }

        let mut scheduler = ManualScheduler::default();
        let awarded: Vec<String> = (0..3)
            .map(|_| {
                let completed = raffle.run_draw(&mut scheduler, &mut ()).unwrap().unwrap();
                completed.prize.name
            })
            .collect();

        assert_eq!(awarded, vec!["Car", "Bike", "Book"]);
        assert_eq!(raffle.winners().len(), 3);
        expect_err(raffle.start_draw(), RaffleError::NoPrizesRemaining);
    }

    #[test]
    fn test_observer_can_abandon() {
        let mut raffle = grand_prize_raffle();
        let mut recorder = Recorder {
            abandon_after: Some(5),
            ..Default::default()
        };

        let outcome = raffle
            .run_draw(&mut ManualScheduler::default(), &mut recorder)
            .unwrap();

        assert!(outcome.is_none());
        assert_eq!(recorder.ticks.len(), 5);
        assert!(recorder.completed.is_empty());
        assert_eq!(raffle.remaining_prizes(), 1);
        assert_eq!(raffle.draw_state().phase, DrawPhase::Idle);
        assert_eq!(raffle.next_tick_at(), None);
    }

    #[test]
    fn test_dropping_mid_draw_records_nothing() {
        let mut raffle = grand_prize_raffle();
        raffle.start_draw().unwrap();
        raffle.advance_draw(100).unwrap();
        let store = raffle.store().clone();
        drop(raffle);

        let reopened = raffle_with(store, 4);
        assert_eq!(reopened.remaining_prizes(), 1);
        assert!(reopened.winners().is_empty());
        assert_eq!(reopened.draw_state().phase, DrawPhase::Idle);
    }

    #[test]
    fn test_advance_without_draw() {
        let mut raffle = grand_prize_raffle();
        expect_err(raffle.advance_draw(0), RaffleError::InvalidState);
        assert!(!raffle.cancel_draw());
    }

    #[test]
    fn test_failed_save_keeps_winner_in_memory() {
        let mut raffle = flaky_raffle();

        let mut event = raffle.start_draw().unwrap();
        let result = loop {
            let DrawEvent::Tick(tick) = event else {
                panic!("draw completed without saving");
            };
            match raffle.advance_draw(tick.elapsed_ms + tick.next_tick_in_ms) {
                Ok(next) => event = next,
                Err(err) => break err,
            }
        };

        let expected: anchor_lang::error::Error = RaffleError::PersistenceFailure.into();
        assert_eq!(result, expected);
        assert!(raffle.ticket(2).unwrap().is_winner);
        assert_eq!(raffle.remaining_prizes(), 0);
        assert_eq!(raffle.draw_state().phase, DrawPhase::Idle);
    }

    #[test]
    fn test_failed_save_still_reports_completion() {
        let mut raffle = flaky_raffle();
        let mut recorder = Recorder::default();

        expect_err(
            raffle.run_draw(&mut ManualScheduler::default(), &mut recorder),
            RaffleError::PersistenceFailure,
        );

        assert_eq!(recorder.completed.len(), 1);
        let completed = &recorder.completed[0];
        assert_eq!(completed.winner.number, 2);
        assert_eq!(completed.winner.buyer_name, "Rosa");
        assert_eq!(completed.prize.id, 1);
        assert_eq!(completed.remaining_prizes, 0);
        assert_eq!(raffle.winners().len(), 1);
        let stored = raffle.store_mut().inner.load().unwrap().unwrap();
        assert_eq!(stored.remaining_prizes, 1);
    }

    fn flaky_raffle() -> Raffle<FlakyStore> {
        let mut raffle = raffle_with(FlakyStore::default(), 9);
        raffle
            .configure_raffle(3, vec![PrizeSpec::placeholder(1)])
            .unwrap();
        raffle.upsert_ticket(2, "Rosa", true).unwrap();
        raffle.store_mut().fail_writes = true;
        raffle
    }

    fn grand_prize_raffle_seeded(seed: u64) -> Raffle<MemoryStore> {
        let mut raffle = raffle_with(MemoryStore::default(), seed);
        raffle
            .configure_raffle(5, vec![PrizeSpec::new("Grand Prize", "")])
            .unwrap();
        raffle.upsert_ticket(2, "Ana", true).unwrap();
        raffle.upsert_ticket(4, "Luis", true).unwrap();
        raffle
    }

    fn finish(raffle: &mut Raffle<MemoryStore>) -> DrawCompleted {
        loop {
            let due = raffle.next_tick_at().unwrap();
            if let DrawEvent::Completed(completed) = raffle.advance_draw(due).unwrap() {
                return completed;
            }
        }
    }
}
