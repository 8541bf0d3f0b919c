use crate::config::Config;
use crate::medium::Medium;
use crate::photon::Photon;
use crate::sampler::Sampler;
use crate::transport::Walk;
use std::f64::INFINITY;

/// Cells with a shorter mean free path, in cell widths, are opaque and absorb
/// photons on the spot.
pub const OPAQUE_FREE_PATH: f64 = 1e-12;

/// How the random walk of a photon ended.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Fate {
    /// Left through the far side at the given (floored) row, carrying `energy`.
    Exited { row: i64, energy: f64 },
    /// Left through the near side, the top or the bottom. Energy is lost.
    Escaped,
    /// Photoelectrically absorbed inside the medium.
    Absorbed,
}

/// Walks photons through a medium until they leave it or get absorbed.
pub struct Tracer<'a> {
    medium: &'a Medium,
    config: &'a Config,
}

/// `scale / (density × energy)`, infinite if the product is not positive and
/// zero if it overflows.
pub fn mean_free_path(scale: f64, density: f64, energy: f64) -> f64 {
    let attenuation = density * energy;
    if attenuation > 0.0 {
        scale / attenuation
    } else {
        INFINITY
    }
}

impl<'a> Tracer<'a> {
    pub fn new(medium: &'a Medium, config: &'a Config) -> Self {
        Tracer { medium, config }
    }

    pub fn medium(&self) -> &'a Medium {
        self.medium
    }

    pub fn config(&self) -> &'a Config {
        self.config
    }

    /// Runs the random walk of `photon` to completion.
    ///
    /// Each iteration samples an exponentially distributed step from the
    /// mean free path of the current cell, moves, and either detects the
    /// photon on the far side or lets it interact with the cell it moved
    /// away from.
    pub fn trace<S: Sampler + ?Sized>(&self, photon: &mut Photon, sampler: &mut S) -> Fate {
        let width = self.medium.width() as f64;

        while self.medium.contains(photon.x, photon.y) {
            let density = self.medium.density_at(photon.x, photon.y);
            let free_path =
                mean_free_path(self.config.mean_free_path_scale, density, photon.energy);

            // No interaction can happen anymore, e.g. for drifting absorbed photons
            if free_path.is_infinite() {
                return self.stream_out(photon);
            }

            if free_path < OPAQUE_FREE_PATH {
                match self.config.transport.absorb(photon) {
                    Walk::Stop => return Fate::Absorbed,
                    Walk::Continue => continue,
                }
            }

            // ln(0) is undefined, a zero draw takes the longest representable step instead
            let u = sampler.uniform().max(std::f64::MIN_POSITIVE);
            let step = -u.ln() * free_path;
            if step.is_infinite() {
                return self.stream_out(photon);
            }
            photon.advance(step);

            if photon.x >= width {
                return Fate::Exited {
                    row: photon.y.floor() as i64,
                    energy: photon.energy,
                };
            }

            let walk = self.config.transport.perform(
                photon,
                self.config.p_scatter,
                self.config.energy_retention,
                sampler,
            );

            if walk == Walk::Stop {
                return Fate::Absorbed;
            }
        }

        Fate::Escaped
    }

    /// Moves the photon in a straight line out of the medium.
    fn stream_out(&self, photon: &mut Photon) -> Fate {
        if photon.dx > 0.0 {
            let width = self.medium.width() as f64;
            let travel = (width - photon.x) / photon.dx;
            photon.x = width;
            if photon.dy != 0.0 {
                photon.y += travel * photon.dy;
            }

            Fate::Exited {
                row: photon.y.floor() as i64,
                energy: photon.energy,
            }
        } else {
            Fate::Escaped
        }
    }
}
