use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of uniform deviates for every stochastic decision of a walk.
pub trait Sampler {
    /// Uniformly distributed number in the half-open interval `[0, 1)`.
    fn uniform(&mut self) -> f64;
}

impl<'a, S: Sampler + ?Sized> Sampler for &'a mut S {
    fn uniform(&mut self) -> f64 {
        (**self).uniform()
    }
}

/// Seeded ChaCha8 random stream.
///
/// Streams built from the same seed (and batch) yield the same deviates,
/// which makes runs reproducible.
#[derive(Debug, Clone)]
pub struct Stream {
    rng: ChaCha8Rng,
}

impl Stream {
    pub fn seeded(seed: u64) -> Stream {
        Stream {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Non-reproducible stream, seeded from the thread local generator.
    pub fn from_entropy() -> Stream {
        Self::seeded(rand::random())
    }

    /// Independent stream for one batch of a parallel run.
    ///
    /// Batches of the same seed share the key but use distinct ChaCha stream
    /// ids, so their deviates never overlap.
    pub fn for_batch(seed: u64, batch: u64) -> Stream {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        rng.set_stream(batch);
        Stream { rng }
    }
}

impl Sampler for Stream {
    fn uniform(&mut self) -> f64 {
        self.rng.gen()
    }
}

/// Replays a fixed sequence of deviates and repeats the last one forever.
///
/// Forces specific step lengths and interaction outcomes, e.g. to reproduce
/// a single walk.
#[derive(Debug, Clone)]
pub struct Scripted {
    deviates: Vec<f64>,
    next: usize,
}

impl Scripted {
    pub fn new(deviates: Vec<f64>) -> Scripted {
        assert!(!deviates.is_empty(), "Scripted sampler needs at least one deviate");
        Scripted { deviates, next: 0 }
    }

    /// Always yields `deviate`.
    pub fn constant(deviate: f64) -> Scripted {
        Self::new(vec![deviate])
    }

    /// Amount of deviates drawn so far.
    pub fn drawn(&self) -> usize {
        self.next
    }
}

impl Sampler for Scripted {
    fn uniform(&mut self) -> f64 {
        let idx = self.next.min(self.deviates.len() - 1);
        self.next += 1;
        self.deviates[idx]
    }
}
