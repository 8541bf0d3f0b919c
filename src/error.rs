use std::error::Error;
use std::fmt;

/// Errors arising from an invalid medium, source or simulation configuration.
///
/// All of these are detected before the first photon is traced.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Medium with zero cells in at least one dimension.
    EmptyGrid { width: usize, height: usize },
    /// Density grid does not have `width * height` entries.
    DensityCount { expected: usize, actual: usize },
    /// The sources together emit no photons.
    NoPhotons,
    /// Source energy that is zero, negative or not finite.
    NonPositiveEnergy(f64),
    /// A pencil beam entering outside of the medium.
    SourceOutsideMedium { row: f64, height: usize },
    /// A probability or factor outside of the unit interval.
    OutOfUnitRange { name: &'static str, value: f64 },
    /// Mean free path scale that is zero, negative or not finite.
    NonPositiveScale(f64),
    /// Parallel runs need at least one photon per batch.
    ZeroBatchSize,
    /// Seed override that does not parse as an unsigned integer.
    InvalidSeed(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid { width, height } => {
                write!(f, "medium must have at least one cell, got {}x{}", width, height)
            }
            Self::DensityCount { expected, actual } => write!(
                f,
                "expected {} densities for the medium, got {}",
                expected, actual
            ),
            Self::NoPhotons => write!(f, "photon count must be positive"),
            Self::NonPositiveEnergy(energy) => {
                write!(f, "photon energy must be positive and finite, got {}", energy)
            }
            Self::SourceOutsideMedium { row, height } => write!(
                f,
                "pencil beam row {} lies outside of the medium height {}",
                row, height
            ),
            Self::OutOfUnitRange { name, value } => {
                write!(f, "{} must lie within [0, 1], got {}", name, value)
            }
            Self::NonPositiveScale(scale) => write!(
                f,
                "mean free path scale must be positive and finite, got {}",
                scale
            ),
            Self::ZeroBatchSize => write!(f, "batch size must be positive"),
            Self::InvalidSeed(seed) => write!(f, "seed {:?} is not an unsigned integer", seed),
        }
    }
}

impl Error for ConfigError {}
