/// Contains functionality to create representative test simulations.
///
/// Provides shared functionality for tests and benchmarks.
extern crate radiograph_sim as sim;

pub mod phantom;
