//! Queue module - piece generation, lookahead and hold
//!
//! Kinds come from a [`KindSource`]. The default source draws each of the
//! seven kinds uniformly at random per draw (no bag), from a seedable
//! `rand` generator so games can be replayed. [`ScriptedKinds`] replays a
//! fixed sequence for tests and puzzles.
//!
//! Holding never draws from the source when a piece is already held, so the
//! lookahead and the hold slot do not disturb each other's randomness.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::{PieceKind, QUEUE_LEN};

/// Supplier of piece kinds
pub trait KindSource {
    fn next_kind(&mut self) -> PieceKind;
}

impl<S: KindSource + ?Sized> KindSource for Box<S> {
    fn next_kind(&mut self) -> PieceKind {
        (**self).next_kind()
    }
}

/// Uniform random kinds: every draw picks one of the 7 kinds with equal
/// probability
#[derive(Debug, Clone)]
pub struct UniformKinds<R = StdRng> {
    rng: R,
}

impl UniformKinds<StdRng> {
    /// Deterministic stream for a given seed
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> UniformKinds<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> KindSource for UniformKinds<R> {
    fn next_kind(&mut self) -> PieceKind {
        PieceKind::ALL[self.rng.gen_range(0..PieceKind::ALL.len())]
    }
}

/// Fixed sequence of kinds, repeated cyclically.
///
/// An empty script cycles through [`PieceKind::ALL`].
#[derive(Debug, Clone)]
pub struct ScriptedKinds {
    kinds: Vec<PieceKind>,
    cursor: usize,
}

impl ScriptedKinds {
    pub fn new(kinds: impl IntoIterator<Item = PieceKind>) -> Self {
        let mut kinds: Vec<PieceKind> = kinds.into_iter().collect();
        if kinds.is_empty() {
            kinds = PieceKind::ALL.to_vec();
        }
        Self { kinds, cursor: 0 }
    }

    /// Endless stream of one kind
    pub fn repeat(kind: PieceKind) -> Self {
        Self::new([kind])
    }
}

impl KindSource for ScriptedKinds {
    fn next_kind(&mut self) -> PieceKind {
        let kind = self.kinds[self.cursor % self.kinds.len()];
        self.cursor = (self.cursor + 1) % self.kinds.len();
        kind
    }
}

/// Upcoming kinds, the current kind and the hold slot
#[derive(Debug, Clone)]
pub struct PieceQueue<S = UniformKinds> {
    upcoming: [PieceKind; QUEUE_LEN],
    current: PieceKind,
    held: Option<PieceKind>,
    can_hold: bool,
    source: S,
}

impl<S: KindSource> PieceQueue<S> {
    /// Create an initialized queue drawing from `source`
    pub fn new(mut source: S) -> Self {
        let upcoming = std::array::from_fn(|_| source.next_kind());
        let mut queue = Self {
            upcoming,
            current: upcoming[0],
            held: None,
            can_hold: true,
            source,
        };
        queue.advance();
        queue
    }

    /// Refill the lookahead with fresh draws, take the first as current and
    /// reset the hold slot.
    pub fn initialize(&mut self) {
        let source = &mut self.source;
        self.upcoming = std::array::from_fn(|_| source.next_kind());
        self.held = None;
        self.can_hold = true;
        self.advance();
    }

    /// Take the front of the lookahead as the current kind and append a
    /// fresh draw. Returns the new current kind.
    pub fn advance(&mut self) -> PieceKind {
        self.current = self.upcoming[0];
        self.upcoming.rotate_left(1);
        self.upcoming[QUEUE_LEN - 1] = self.source.next_kind();
        self.current
    }

    /// Hold the current kind.
    ///
    /// With an empty slot the current kind is stored and the queue advances;
    /// otherwise current and held swap without touching the lookahead.
    /// Fails (returns false, no change) when a hold already happened since
    /// the last lock.
    pub fn try_set_held(&mut self) -> bool {
        if !self.can_hold {
            return false;
        }
        match self.held {
            None => {
                self.held = Some(self.current);
                self.advance();
            }
            Some(held) => {
                self.held = Some(self.current);
                self.current = held;
            }
        }
        self.can_hold = false;
        true
    }

    /// Re-enable holding; called once per lock
    pub fn reset_hold_availability(&mut self) {
        self.can_hold = true;
    }

    pub fn current(&self) -> PieceKind {
        self.current
    }

    /// Front of the lookahead
    pub fn next(&self) -> PieceKind {
        self.upcoming[0]
    }

    pub fn lookahead(&self) -> [PieceKind; QUEUE_LEN] {
        self.upcoming
    }

    pub fn held(&self) -> Option<PieceKind> {
        self.held
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

impl Default for PieceQueue<UniformKinds> {
    fn default() -> Self {
        Self::new(UniformKinds::seeded(1))
    }
}
