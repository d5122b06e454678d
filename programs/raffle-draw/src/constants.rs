/// Total length of the draw animation.
pub const DRAW_DURATION_MS: u64 = 3_000;

/// Delay between ticks when the animation starts.
pub const INITIAL_TICK_INTERVAL_MS: u64 = 100;

/// Shortest delay between ticks while the animation accelerates.
pub const MIN_TICK_INTERVAL_MS: u64 = 20;

/// Progress fraction at which the animation starts slowing down.
pub const SETTLE_THRESHOLD: f64 = 0.8;

/// Delay added over the settling phase, on top of the minimum interval.
pub const SETTLE_GROWTH_MS: u64 = 200;

/// Upper bound on the number of tickets a configuration may declare.
pub const MAX_TOTAL_TICKETS: u32 = 1_000_000;

pub const DEFAULT_TOTAL_TICKETS: u32 = 100;
pub const DEFAULT_TOTAL_PRIZES: u32 = 1;

pub const SNAPSHOT_FILE_NAME: &str = "raffle.snapshot";
