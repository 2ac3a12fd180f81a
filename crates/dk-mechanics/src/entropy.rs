//! Injectable entropy: where the d12 values actually come from.
//!
//! The resolution engine never touches an RNG directly. It issues one
//! batched draw per roll to an [`EntropyProvider`] — a local RNG, an
//! animated 3D-dice surface, or a remote roll service — and resumes once
//! every requested value is back. The draw carries an opaque context
//! alongside the values so a host can thread an animation handle or
//! audit token through the engine untouched.

use std::collections::VecDeque;
use std::future::Future;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::roll::DIE_SIDES;

/// One batch of dice values plus the provider's opaque context.
#[derive(Debug, Clone)]
pub struct EntropyDraw<T> {
    /// The rolled values, each expected in 1..=12.
    pub values: Vec<u32>,
    /// Pass-through payload the engine does not interpret.
    pub context: T,
}

/// A source of d12 values.
///
/// The engine makes exactly one `draw` call per roll; there is no
/// partial-result handling and no retry in the core. A slow or failing
/// provider is the caller's concern.
pub trait EntropyProvider {
    /// Opaque side-channel returned with every draw.
    type Context;

    /// Produce `count` d12 values in a single batch.
    fn draw(&mut self, count: usize) -> impl Future<Output = EntropyDraw<Self::Context>>;
}

/// Entropy from a local seedable RNG.
#[derive(Debug, Clone)]
pub struct RngEntropy {
    rng: StdRng,
}

impl RngEntropy {
    /// A provider with a fixed seed, for reproducible rolls.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// A provider seeded from the operating system.
    pub fn from_os() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl EntropyProvider for RngEntropy {
    type Context = ();

    fn draw(&mut self, count: usize) -> impl Future<Output = EntropyDraw<()>> {
        let values = (0..count)
            .map(|_| self.rng.random_range(1..=DIE_SIDES))
            .collect();
        std::future::ready(EntropyDraw {
            values,
            context: (),
        })
    }
}

/// Entropy from a fixed script of values.
///
/// Serves deterministic tests and replay of recorded rolls. Draining
/// past the end of the script returns a short batch, which the engine
/// rejects — useful for exercising the error path too.
#[derive(Debug, Clone, Default)]
pub struct ScriptedEntropy {
    values: VecDeque<u32>,
}

impl ScriptedEntropy {
    /// A provider that will hand out the given values in order.
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }

    /// How many scripted values remain.
    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl EntropyProvider for ScriptedEntropy {
    type Context = ();

    fn draw(&mut self, count: usize) -> impl Future<Output = EntropyDraw<()>> {
        let take = count.min(self.values.len());
        let values = self.values.drain(..take).collect();
        std::future::ready(EntropyDraw {
            values,
            context: (),
        })
    }
}
