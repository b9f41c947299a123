use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;

/// Generates object ids, deterministic for a given seed.
///
/// Pcg32 is used as it is both seedable and portable, so the same import
/// produces the same ids on every platform.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    rng: Pcg32,
    counter: u64,
}

impl IdGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            counter: 0,
        }
    }

    /// Next id with the given prefix, e.g. `obj-3-a91f0c`
    pub fn next_id(&mut self, prefix: &str) -> String {
        self.counter += 1;
        let tag = self.rng.next_u32() & 0x00ff_ffff;
        format!("{prefix}-{}-{tag:06x}", self.counter)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new(0)
    }
}
