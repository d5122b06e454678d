use std::time::{SystemTime, UNIX_EPOCH};

/// Source of the indices sampled on every draw tick.
pub trait RandomSource {
    /// Returns an index in `0..len`. `len` is never zero.
    fn next_index(&mut self, len: usize) -> usize;
}

const GOLDEN_GAMMA: u64 = 0x9e3779b97f4a7c15;

/// Small, fast generator. Good enough to animate a draw; not meant to be
/// unpredictable to an adversary.
#[derive(Clone, Debug)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    pub fn seeded(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Seeds from the wall clock and the process id.
    pub fn from_entropy() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos() as u64)
            .unwrap_or_default();
        Self::seeded(mix(nanos, std::process::id() as u64))
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(GOLDEN_GAMMA);
        mix(self.state, 0)
    }

    /// Maps fresh random values onto `0..range` without modulo bias.
    fn unbiased_range(&mut self, range: u64) -> u64 {
        if range.is_power_of_two() {
            return self.next_u64() & (range - 1);
        }

        // Values at or above the threshold would favour the low residues
        let threshold = u64::MAX - (u64::MAX % range);
        loop {
            let value = self.next_u64();
            if value < threshold {
                return value % range;
            }
        }
    }
}

impl RandomSource for SplitMix64 {
    fn next_index(&mut self, len: usize) -> usize {
        self.unbiased_range(len.max(1) as u64) as usize
    }
}

/// splitmix64 finalizer: every output bit depends on every input bit.
fn mix(a: u64, b: u64) -> u64 {
    let mut z = a.wrapping_add(b);

    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z ^ (z >> 31)
}
