use airlink_record::RecordKind;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::SkipConfig;

#[derive(Debug, Clone, Copy, Default)]
struct Slot {
    skip_count: u32,
    /// `None` until the first send opportunity seeds it.
    remaining: Option<u32>,
}

/// Per-record decimation.
///
/// A kind with skip count `n` is sent on one of every `n + 1` opportunities.
/// Each counter starts at a random offset in `[0, n)` so kinds sharing a
/// skip count do not all land in the same cycle.
#[derive(Debug)]
pub struct Throttle<R = StdRng> {
    slots: [Slot; RecordKind::ALL.len()],
    rng: R,
}

impl Throttle<StdRng> {
    pub fn new(skip: &SkipConfig) -> Self {
        Self::with_rng(skip, StdRng::from_entropy())
    }
}

impl<R: Rng> Throttle<R> {
    /// Build a throttle drawing its start offsets from `rng`.
    pub fn with_rng(skip: &SkipConfig, rng: R) -> Self {
        let mut throttle = Self {
            slots: [Slot::default(); RecordKind::ALL.len()],
            rng,
        };
        for kind in RecordKind::ALL {
            throttle.set_skip_count(kind, skip.get(kind));
        }
        throttle
    }

    /// Change a kind's skip count. Negative counts mean "send every time".
    ///
    /// An in-progress countdown is left alone; the new count applies from the
    /// next transmission.
    pub fn set_skip_count(&mut self, kind: RecordKind, skip_count: i32) {
        self.slots[kind as usize].skip_count = skip_count.max(0).unsigned_abs();
    }

    pub fn skip_count(&self, kind: RecordKind) -> u32 {
        self.slots[kind as usize].skip_count
    }

    /// Whether this opportunity to send `kind` should be used.
    pub fn should_send(&mut self, kind: RecordKind) -> bool {
        let slot = &mut self.slots[kind as usize];
        let skip_count = slot.skip_count;
        let rng = &mut self.rng;
        let remaining = slot.remaining.get_or_insert_with(|| {
            if skip_count == 0 {
                0
            } else {
                rng.gen_range(0..skip_count)
            }
        });

        if *remaining > 0 {
            *remaining -= 1;
            false
        } else {
            *remaining = skip_count;
            true
        }
    }
}
