#[macro_use]
extern crate log;

mod config;
mod detector;
mod error;
mod medium;
mod photon;
mod sampler;
mod sim;
mod tracer;
mod transport;
mod view;

pub use config::{Config, Transport};
pub use detector::{BinPolicy, Detector};
pub use error::ConfigError;
pub use medium::{Medium, DENSITY_FLOOR};
pub use photon::{Photon, PhotonSource, PhotonSourceBuilder, DEFAULT_ENERGY};
pub use sampler::{Sampler, Scripted, Stream};
pub use sim::{Budget, Simulation, Tally};
pub use tracer::{mean_free_path, Fate, Tracer, OPAQUE_FREE_PATH};
pub use transport::{interact, Drift, Halt, Outcome, Rule, Walk};
pub use view::{DetectorView, SampleView};
