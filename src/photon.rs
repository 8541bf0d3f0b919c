use crate::error::ConfigError;
use crate::medium::Medium;
use crate::sampler::Sampler;

/// Energy of freshly emitted photons in keV.
pub const DEFAULT_ENERGY: f64 = 100.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Photon {
    /// Position in medium coordinates, not restricted to cell corners
    pub x: f64,
    pub y: f64,
    /// Direction of travel, unit length after every scattering event
    pub dx: f64,
    pub dy: f64,
    /// Remaining energy, zero after photoelectric absorption
    pub energy: f64,
}

impl Photon {
    /// A photon at the given position, travelling in positive x direction.
    pub fn new(x: f64, y: f64, energy: f64) -> Photon {
        Photon {
            x,
            y,
            dx: 1.0,
            dy: 0.0,
            energy,
        }
    }

    /// Moves `step` units along the current direction.
    pub fn advance(&mut self, step: f64) {
        self.x += step * self.dx;
        self.y += step * self.dy;
    }

    /// Turns the photon to `angle` radians and keeps `retention` of its energy.
    pub fn scatter(&mut self, angle: f64, retention: f64) {
        self.dx = angle.cos();
        self.dy = angle.sin();
        self.energy *= retention;
    }

    pub fn absorb(&mut self) {
        self.energy = 0.0;
    }

    pub fn is_absorbed(&self) -> bool {
        self.energy <= 0.0
    }
}

enum Shape {
    /// Collimated beam entering uniformly along the left edge of the medium
    Edge,
    /// Collimated beam entering the left edge at a fixed row
    Pencil { row: f64 },
}

pub struct PhotonSource {
    shape: Shape,
    energy: f64,
    emission_count: usize,
}

pub struct PhotonSourceBuilder {
    source: PhotonSource,
}

impl PhotonSource {
    /// Creates a fresh photon on the left edge of `medium`.
    pub fn emit_one<S: Sampler + ?Sized>(&self, medium: &Medium, sampler: &mut S) -> Photon {
        let y = match self.shape {
            Shape::Edge => sampler.uniform() * medium.height() as f64,
            Shape::Pencil { row } => row,
        };

        Photon::new(0.0, y, self.energy)
    }

    pub fn emission_count(&self) -> usize {
        self.emission_count
    }

    pub fn energy(&self) -> f64 {
        self.energy
    }

    /// Checks that photons of this source start inside `medium` with usable energy.
    pub fn validate(&self, medium: &Medium) -> Result<(), ConfigError> {
        if !(self.energy > 0.0) || !self.energy.is_finite() {
            return Err(ConfigError::NonPositiveEnergy(self.energy));
        }

        if let Shape::Pencil { row } = self.shape {
            if !medium.contains(0.0, row) {
                return Err(ConfigError::SourceOutsideMedium {
                    row,
                    height: medium.height(),
                });
            }
        }

        Ok(())
    }
}

impl PhotonSourceBuilder {
    pub fn new() -> PhotonSourceBuilder {
        PhotonSourceBuilder {
            source: PhotonSource {
                shape: Shape::Edge,
                energy: DEFAULT_ENERGY,
                emission_count: 10000,
            },
        }
    }

    pub fn edge_shaped(mut self) -> PhotonSourceBuilder {
        self.source.shape = Shape::Edge;
        self
    }

    pub fn pencil_shaped(mut self, row: f64) -> PhotonSourceBuilder {
        self.source.shape = Shape::Pencil { row };
        self
    }

    pub fn emission_count(mut self, emission_count: usize) -> PhotonSourceBuilder {
        self.source.emission_count = emission_count;
        self
    }

    pub fn energy(mut self, energy: f64) -> PhotonSourceBuilder {
        self.source.energy = energy;
        self
    }

    pub fn build(self) -> PhotonSource {
        self.source
    }
}

impl Default for PhotonSourceBuilder {
    fn default() -> Self {
        Self::new()
    }
}
