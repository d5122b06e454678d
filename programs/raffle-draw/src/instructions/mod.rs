pub mod configure_raffle;
pub mod reconfigure_from_scratch;
pub mod reset_draws;
pub mod start_draw;
pub mod upsert_ticket;
