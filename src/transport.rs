use crate::photon::Photon;
use crate::sampler::Sampler;
use std::f64::consts::PI;
use std::marker::PhantomData;

/// Result of a single interaction with the medium.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Compton scattering, photon was turned and lost some energy
    Scattered,
    /// Photoelectric absorption, photon has no energy left
    Absorbed,
}

/// Whether the random walk goes on after an interaction.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Walk {
    Continue,
    Stop,
}

/// Scatters with probability `p_scatter`, absorbs otherwise.
///
/// Scattering samples the new direction from the half turn `[0, π)` and
/// multiplies the energy with `energy_retention`. Absorption leaves the
/// direction untouched.
pub fn interact<S: Sampler + ?Sized>(
    photon: &mut Photon,
    p_scatter: f64,
    energy_retention: f64,
    sampler: &mut S,
) -> Outcome {
    if sampler.uniform() < p_scatter {
        let angle = sampler.uniform() * PI;
        photon.scatter(angle, energy_retention);
        Outcome::Scattered
    } else {
        photon.absorb();
        Outcome::Absorbed
    }
}

/// Performs interactions and decides on continuation of absorbed photons.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Transport<A> {
    absorption: PhantomData<A>,
}

pub fn transport<A: Rule>() -> Transport<A> {
    Transport {
        absorption: PhantomData,
    }
}

impl<A> Transport<A>
where
    A: Rule,
{
    pub fn perform<S: Sampler + ?Sized>(
        &self,
        photon: &mut Photon,
        p_scatter: f64,
        energy_retention: f64,
        sampler: &mut S,
    ) -> Walk {
        match interact(photon, p_scatter, energy_retention, sampler) {
            Outcome::Scattered => Walk::Continue,
            Outcome::Absorbed => A::after_absorption(photon),
        }
    }

    /// Absorbs the photon without drawing and applies the absorption rule.
    pub fn absorb(&self, photon: &mut Photon) -> Walk {
        photon.absorb();
        A::after_absorption(photon)
    }
}

pub trait Rule {
    fn after_absorption(photon: &Photon) -> Walk;
}

/// Ends the walk of an absorbed photon right away.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Halt;

/// Keeps walking absorbed photons until they leave the medium with zero energy.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Drift;

impl Rule for Halt {
    fn after_absorption(_photon: &Photon) -> Walk {
        Walk::Stop
    }
}

impl Rule for Drift {
    fn after_absorption(_photon: &Photon) -> Walk {
        Walk::Continue
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::sampler::Scripted;

    #[test]
    fn test_low_draw_scatters() {
        let mut photon = Photon::new(3.0, 4.0, 100.0);
        let mut sampler = Scripted::new(vec![0.79, 0.5]);

        let outcome = interact(&mut photon, 0.8, 0.9, &mut sampler);

        assert_eq!(outcome, Outcome::Scattered);
        assert!(photon.dx.abs() < 1e-12);
        assert!((photon.dy - 1.0).abs() < 1e-12);
        assert!((photon.energy - 90.0).abs() < 1e-12);
    }

    #[test]
    fn test_high_draw_absorbs() {
        let mut photon = Photon::new(3.0, 4.0, 100.0);
        let mut sampler = Scripted::new(vec![0.8]);

        let outcome = interact(&mut photon, 0.8, 0.9, &mut sampler);

        assert_eq!(outcome, Outcome::Absorbed);
        assert_eq!(photon.energy, 0.0);
        assert_eq!((photon.dx, photon.dy), (1.0, 0.0));
    }

    #[test]
    fn test_scatter_angle_in_upper_half_turn() {
        let mut photon = Photon::new(3.0, 4.0, 100.0);
        let mut sampler = Scripted::new(vec![0.0, 0.999_999]);

        interact(&mut photon, 0.8, 0.9, &mut sampler);

        assert!(photon.dy >= 0.0);
        assert!(photon.dx < -0.99);
    }

    #[test]
    fn test_absorption_rules() {
        let mut photon = Photon::new(3.0, 4.0, 100.0);
        let halt = transport::<Halt>();
        let drift = transport::<Drift>();

        assert_eq!(
            halt.perform(&mut photon.clone(), 0.8, 0.9, &mut Scripted::new(vec![0.9])),
            Walk::Stop
        );
        assert_eq!(
            drift.perform(&mut photon, 0.8, 0.9, &mut Scripted::new(vec![0.9])),
            Walk::Continue
        );
        assert!(photon.is_absorbed());

        let mut photon = Photon::new(3.0, 4.0, 100.0);
        assert_eq!(
            halt.perform(&mut photon, 0.8, 0.9, &mut Scripted::new(vec![0.1])),
            Walk::Continue
        );
    }

    #[test]
    fn test_absorb_applies_rule() {
        let mut halted = Photon::new(3.0, 4.0, 100.0);
        let mut drifting = halted.clone();

        assert_eq!(transport::<Halt>().absorb(&mut halted), Walk::Stop);
        assert_eq!(transport::<Drift>().absorb(&mut drifting), Walk::Continue);
        assert!(halted.is_absorbed());
        assert!(drifting.is_absorbed());
    }
}
