use crate::queue::{Direction, Sector};

/// Number of seek buckets. The last one is open ended.
pub const SEEK_BUCKETS: usize = 49;

/// Seek distances grouped by power of two.
///
/// Bucket 0 counts zero-length seeks (back-to-back requests on one sector).
/// Bucket `i` counts distances in `[2^(i-1), 2^i)`. Everything from 2^47
/// sectors up (64 PiB of 512-byte sectors) lands in the last bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeekHistogram {
    buckets: [u64; SEEK_BUCKETS],
    seeks: u64,
    travelled: u128,
    longest: Sector,
}

impl SeekHistogram {
    pub const fn new() -> Self {
        Self {
            buckets: [0; SEEK_BUCKETS],
            seeks: 0,
            travelled: 0,
            longest: 0,
        }
    }

    #[inline]
    pub fn bucket_of(distance: Sector) -> usize {
        let bits = (Sector::BITS - distance.leading_zeros()) as usize;
        bits.min(SEEK_BUCKETS - 1)
    }

    /// Smallest distance counted by bucket `i`.
    pub fn bucket_floor(i: usize) -> Sector {
        match i {
            0 => 0,
            i => 1 << (i - 1),
        }
    }

    #[inline]
    pub fn record(&mut self, distance: Sector) {
        self.buckets[Self::bucket_of(distance)] += 1;
        self.seeks += 1;
        self.travelled += u128::from(distance);
        self.longest = self.longest.max(distance);
    }

    pub fn buckets(&self) -> &[u64; SEEK_BUCKETS] {
        &self.buckets
    }

    pub fn seeks(&self) -> u64 {
        self.seeks
    }

    /// Sectors travelled over all recorded seeks.
    pub fn travelled(&self) -> u128 {
        self.travelled
    }

    pub fn longest(&self) -> Sector {
        self.longest
    }

    /// Share of seeks that did not move the head.
    pub fn zero_ratio(&self) -> f64 {
        if self.seeks == 0 {
            return 0.0;
        }
        self.buckets[0] as f64 / self.seeks as f64
    }

    pub fn mean(&self) -> f64 {
        if self.seeks == 0 {
            return 0.0;
        }
        self.travelled as f64 / self.seeks as f64
    }
}

impl Default for SeekHistogram {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-elevator counters.
/// Plain integers: the host already serializes every call into an elevator.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ElevatorStats {
    pub added: u64,
    pub dispatched: u64,
    pub forward_dispatches: u64,
    pub backward_dispatches: u64,
    pub merged: u64,

    // head movement caused by dispatch decisions
    pub seek: SeekHistogram,

    // largest number of requests queued at once
    pub max_depth: usize,
}

impl ElevatorStats {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn record_add(&mut self, depth: usize) {
        self.added += 1;
        self.max_depth = self.max_depth.max(depth);
    }

    #[inline]
    pub fn record_dispatch(&mut self, direction: Direction, seek: Sector) {
        self.dispatched += 1;
        match direction {
            Direction::Forward => self.forward_dispatches += 1,
            Direction::Backward => self.backward_dispatches += 1,
        }
        self.seek.record(seek);
    }

    #[inline]
    pub fn record_merge(&mut self) {
        self.merged += 1;
    }

    /// Total sectors travelled by the head.
    pub fn total_seek(&self) -> u128 {
        self.seek.travelled()
    }
}
