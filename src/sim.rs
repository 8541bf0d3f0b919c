use crate::config::Config;
use crate::detector::Detector;
use crate::error::ConfigError;
use crate::medium::Medium;
use crate::photon::PhotonSource;
use crate::sampler::{Sampler, Stream};
use crate::tracer::{Fate, Tracer};
use rayon::prelude::*;
use std::ops::Range;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// Photons between two checks of the wall clock in budgeted runs.
const CLOCK_CHECK_INTERVAL: usize = 1024;

pub struct Simulation {
    sources: Vec<PhotonSource>,
    medium: Medium,
    config: Config,
    detector: Detector,
    seed: u64,
    /// Number of completed runs, mixed into the seed so runs do not repeat photons
    runs: u64,
}

/// Counts how the walks of a run ended.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Tally {
    pub emitted: usize,
    pub exited: usize,
    pub escaped: usize,
    pub absorbed: usize,
    /// Energy deposited on the detector
    pub deposited: f64,
}

impl Tally {
    pub fn record(&mut self, fate: &Fate) {
        self.emitted += 1;
        match *fate {
            Fate::Exited { energy, .. } => {
                self.exited += 1;
                if energy > 0.0 {
                    self.deposited += energy;
                }
            }
            Fate::Escaped => self.escaped += 1,
            Fate::Absorbed => self.absorbed += 1,
        }
    }

    pub fn merge(&mut self, other: &Tally) {
        self.emitted += other.emitted;
        self.exited += other.exited;
        self.escaped += other.escaped;
        self.absorbed += other.absorbed;
        self.deposited += other.deposited;
    }
}

/// Limits of a run. Whichever limit is reached first ends it.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Budget {
    pub photons: Option<usize>,
    pub wall_clock: Option<Duration>,
}

impl Budget {
    /// Runs every photon of every source.
    pub fn unlimited() -> Budget {
        Budget::default()
    }

    pub fn photons(photons: usize) -> Budget {
        Budget {
            photons: Some(photons),
            wall_clock: None,
        }
    }

    pub fn wall_clock(duration: Duration) -> Budget {
        Budget {
            photons: None,
            wall_clock: Some(duration),
        }
    }
}

impl Simulation {
    /// Validates configuration and sources against the medium.
    ///
    /// The run is seeded from entropy unless `seeded` is called.
    pub fn new(
        sources: Vec<PhotonSource>,
        medium: Medium,
        config: Config,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        for source in &sources {
            source.validate(&medium)?;
        }

        if sources.iter().all(|s| s.emission_count() == 0) {
            return Err(ConfigError::NoPhotons);
        }

        let detector = Detector::new(medium.width(), config.bin_policy);

        Ok(Simulation {
            sources,
            medium,
            config,
            detector,
            seed: rand::random(),
            runs: 0,
        })
    }

    /// Makes all following runs reproducible.
    pub fn seeded(mut self, seed: u64) -> Self {
        self.seed = seed;
        self.runs = 0;
        self
    }

    /// Traces every photon of every source on the calling thread.
    pub fn run(&mut self) -> Tally {
        self.run_with_budget(Budget::unlimited())
    }

    /// Traces photons on the calling thread until all are done or the budget
    /// is used up. Photons are always traced to completion, the detector
    /// never holds a partial walk.
    pub fn run_with_budget(&mut self, budget: Budget) -> Tally {
        let total = match budget.photons {
            Some(limit) => limit.min(self.emission_count()),
            None => self.emission_count(),
        };
        let started = Instant::now();
        let tenth = (total / 10).max(1);

        let mut stream = Stream::for_batch(self.next_run_seed(), 0);
        let tracer = Tracer::new(&self.medium, &self.config);
        let detector = &mut self.detector;
        let mut tally = Tally::default();

        debug!(
            "Tracing {} photons through {}x{} medium",
            total,
            self.medium.width(),
            self.medium.height()
        );

        'sources: for source in &self.sources {
            for _ in 0..source.emission_count() {
                let traced = tally.emitted;
                if traced == total {
                    break 'sources;
                }

                if let Some(limit) = budget.wall_clock {
                    if traced % CLOCK_CHECK_INTERVAL == 0 && started.elapsed() >= limit {
                        info!("Wall clock budget used up after {} photons", traced);
                        break 'sources;
                    }
                }

                if traced % tenth == 0 {
                    info!("Progress: {}%", traced * 100 / total);
                }

                let mut photon = source.emit_one(&self.medium, &mut stream);
                let fate = tracer.trace(&mut photon, &mut stream);
                Self::detect(detector, &mut tally, &fate);
            }
        }

        tally
    }

    /// Traces every photon of every source on the rayon thread pool.
    ///
    /// Photons are split into batches of `batch_size`. Each batch has its own
    /// random stream and partial detector, partial results are merged in
    /// batch order. For a fixed seed the result does not depend on the
    /// number of threads.
    pub fn run_fast(&mut self) -> Tally {
        let total = self.emission_count();
        let batch_size = self.config.batch_size;
        let batch_count = (total + batch_size - 1) / batch_size;
        let tenth = (batch_count / 10).max(1);
        let seed = self.next_run_seed();

        let sources = &self.sources;
        let tracer = Tracer::new(&self.medium, &self.config);
        let width = self.medium.width();
        let policy = self.config.bin_policy;
        let done = AtomicUsize::new(0);

        debug!(
            "Tracing {} photons in {} batches on {} threads",
            total,
            batch_count,
            rayon::current_num_threads()
        );

        let partials: Vec<(Detector, Tally)> = (0..batch_count)
            .into_par_iter()
            .map(|batch| {
                let start = batch * batch_size;
                let end = (start + batch_size).min(total);
                let mut stream = Stream::for_batch(seed, batch as u64);
                let mut detector = Detector::new(width, policy);
                let mut tally = Tally::default();

                Self::trace_range(
                    sources,
                    &tracer,
                    start..end,
                    &mut detector,
                    &mut tally,
                    &mut stream,
                );

                let finished = done.fetch_add(1, Ordering::Relaxed) + 1;
                if finished % tenth == 0 {
                    info!("Progress: {}%", finished * 100 / batch_count);
                }

                (detector, tally)
            })
            .collect();

        let mut tally = Tally::default();
        for (detector, partial) in &partials {
            self.detector.merge(detector);
            tally.merge(partial);
        }

        tally
    }

    pub fn detector(&self) -> &Detector {
        &self.detector
    }

    pub fn medium(&self) -> &Medium {
        &self.medium
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Amount of photons emitted from all sources each run
    pub fn emission_count(&self) -> usize {
        self.sources.iter().map(|s| s.emission_count()).sum()
    }

    fn next_run_seed(&mut self) -> u64 {
        let seed = self.seed.wrapping_add(self.runs);
        self.runs += 1;
        seed
    }

    /// Traces the photons with global indexes in `range`, counting through
    /// the sources in order.
    fn trace_range<S: Sampler>(
        sources: &[PhotonSource],
        tracer: &Tracer,
        range: Range<usize>,
        detector: &mut Detector,
        tally: &mut Tally,
        sampler: &mut S,
    ) {
        let mut offset = 0;
        for source in sources {
            let count = source.emission_count();
            let start = range.start.max(offset);
            let end = range.end.min(offset + count);

            for _ in start..end {
                let mut photon = source.emit_one(tracer.medium(), sampler);
                let fate = tracer.trace(&mut photon, sampler);
                Self::detect(detector, tally, &fate);
            }

            offset += count;
            if offset >= range.end {
                break;
            }
        }
    }

    fn detect(detector: &mut Detector, tally: &mut Tally, fate: &Fate) {
        if let Fate::Exited { row, energy } = *fate {
            detector.deposit(row, energy);
        }
        tally.record(fate);
    }
}
