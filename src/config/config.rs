use crate::config::Transport;
use crate::detector::BinPolicy;
use crate::error::ConfigError;

/// Encapsulates parameters that influence interactions and detection.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Numerator `K` of the mean free path `K / (density × energy)`.
    pub mean_free_path_scale: f64,
    /// Probability of Compton scattering per interaction, photoelectric
    /// absorption happens otherwise.
    pub p_scatter: f64,
    /// Fraction of energy a photon keeps when scattered.
    pub energy_retention: f64,
    pub transport: Transport,
    pub bin_policy: BinPolicy,
    /// Photons per work item of a parallel run.
    pub batch_size: usize,
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.mean_free_path_scale > 0.0) || !self.mean_free_path_scale.is_finite() {
            return Err(ConfigError::NonPositiveScale(self.mean_free_path_scale));
        }

        unit_range("p_scatter", self.p_scatter)?;
        unit_range("energy_retention", self.energy_retention)?;

        if self.batch_size == 0 {
            return Err(ConfigError::ZeroBatchSize);
        }

        Ok(())
    }
}

fn unit_range(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value >= 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfUnitRange { name, value })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            mean_free_path_scale: 10.0,
            p_scatter: 0.8,
            energy_retention: 0.9,
            transport: Transport::default(),
            bin_policy: BinPolicy::default(),
            batch_size: 10_000,
        }
    }
}
