//! RNG module - deterministic linear-congruential streams
//!
//! Every random decision in the engine (shape kind, angle, obstacle cells) is
//! drawn from an LCG so that a pair of seeds reproduces a game bit for bit.
//!
//! Two independently seeded streams advance in lockstep; one value from each
//! forms an [`RngPair`].

/// LCG multiplier
pub const LCG_A: u64 = 1_103_515_245;
/// LCG increment
pub const LCG_C: u64 = 12_345;
/// LCG modulus (2^31)
pub const LCG_M: u64 = 1 << 31;

/// One LCG step: `(a * seed + c) mod m`
pub fn hash(seed: u32) -> u32 {
    ((LCG_A * seed as u64 + LCG_C) % LCG_M) as u32
}

/// Map a hash value into [-1, 1]
pub fn scale(h: u32) -> f64 {
    2.0 * h as f64 / (LCG_M - 1) as f64 - 1.0
}

/// Map a [-1, 1] value onto the inclusive integer range `from..=to`.
///
/// `v = 1.0` would land one past `to`, so the result is clamped.
pub fn scale_to_range(v: f64, from: i32, to: i32) -> i32 {
    let span = (to - from + 1) as f64;
    let n = ((v + 1.0) / 2.0 * span + from as f64).floor() as i32;
    n.clamp(from, to)
}

/// A single LCG stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lcg {
    seed: u32,
}

impl Lcg {
    pub fn new(seed: u32) -> Self {
        Self { seed }
    }

    /// Advance the stream and return the new hash
    pub fn next_hash(&mut self) -> u32 {
        self.seed = hash(self.seed);
        self.seed
    }

    /// Advance the stream and return the new value scaled into [-1, 1]
    pub fn next_scaled(&mut self) -> f64 {
        scale(self.next_hash())
    }
}

/// Two hash values drawn in lockstep from independent streams.
///
/// The pair is itself a valid LCG state, so consumers that need more than one
/// pair (obstacle placement) keep stepping it with [`RngPair::next`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RngPair {
    pub a: u32,
    pub b: u32,
}

impl RngPair {
    pub fn new(a: u32, b: u32) -> Self {
        Self { a, b }
    }

    /// The pair scaled into [-1, 1]
    pub fn values(&self) -> (f64, f64) {
        (scale(self.a), scale(self.b))
    }

    /// The following pair of both streams
    #[must_use]
    pub fn next(&self) -> Self {
        Self {
            a: hash(self.a),
            b: hash(self.b),
        }
    }
}

/// Two independently seeded streams producing successive [`RngPair`]s
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairStream {
    first: Lcg,
    second: Lcg,
}

impl PairStream {
    pub fn new(seed_a: u32, seed_b: u32) -> Self {
        Self {
            first: Lcg::new(seed_a),
            second: Lcg::new(seed_b),
        }
    }

    /// Advance both streams one step
    pub fn next_pair(&mut self) -> RngPair {
        RngPair::new(self.first.next_hash(), self.second.next_hash())
    }
}

impl Iterator for PairStream {
    type Item = RngPair;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_pair())
    }
}
