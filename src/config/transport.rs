use self::Transport::*;
use crate::photon::Photon;
use crate::sampler::Sampler;
use crate::transport::{transport, Drift, Halt, Transport as Inner, Walk};
use std::default::Default;

/// Specifies what happens to a photon after photoelectric absorption.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Transport {
    /// End the walk as soon as the photon is absorbed.
    Halting(Inner<Halt>),
    /// Keep walking with zero energy until the photon leaves the medium,
    /// far side exits then deposit nothing.
    Drifting(Inner<Drift>),
}

impl Transport {
    pub fn halting() -> Self {
        Halting(transport())
    }

    pub fn drifting() -> Self {
        Drifting(transport())
    }

    pub fn perform<S: Sampler + ?Sized>(
        &self,
        photon: &mut Photon,
        p_scatter: f64,
        energy_retention: f64,
        sampler: &mut S,
    ) -> Walk {
        match self {
            Halting(inner) => inner.perform(photon, p_scatter, energy_retention, sampler),
            Drifting(inner) => inner.perform(photon, p_scatter, energy_retention, sampler),
        }
    }

    pub fn absorb(&self, photon: &mut Photon) -> Walk {
        match self {
            Halting(inner) => inner.absorb(photon),
            Drifting(inner) => inner.absorb(photon),
        }
    }
}

impl Default for Transport {
    fn default() -> Self {
        Self::halting()
    }
}
