use crate::{
    error::{aura::AuraError, AppError},
    model::{
        aura::{Player, Scope},
        outcome::{CoinSide, DrainOutcome, WagerResult},
    },
    service::aura::{lock::AccountLocks, AuraService},
};
use chrono::{Duration, Utc};
use rand::{rngs::StdRng, RngCore, SeedableRng};
use test_utils::{builder::TestBuilder, factory};

mod detonate_bomb;
mod play_slots;

/// Random source returning the same word forever.
///
/// All zeros draws the low end of every range and passes every probability check; all
/// ones draws the high end and fails every probability check.
struct FixedRng(u64);

impl FixedRng {
    fn lowest() -> Self {
        Self(0)
    }

    fn highest() -> Self {
        Self(u64::MAX)
    }
}

impl RngCore for FixedRng {
    fn next_u32(&mut self) -> u32 {
        self.0 as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.0
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        dst.fill(self.0 as u8);
    }
}

const GUILD: u64 = 7;

fn scope() -> Scope {
    Scope::Guild(GUILD)
}
