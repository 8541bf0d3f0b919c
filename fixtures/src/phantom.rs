use sim::{Config, Medium, PhotonSourceBuilder, Simulation};

/// Edge length of the square phantom in cells.
pub const SIZE: usize = 50;

/// The 50×50 phantom: a disk of density 1.0 in a background of 0.1.
pub fn medium() -> Medium {
    Medium::circular_phantom(SIZE, SIZE, 1.0, 0.1).unwrap()
}

/// Default interaction constants, but a mean free path 50 times longer.
///
/// With the default constants next to no photon makes it through 50 cells of
/// background, with these a few percent reach the detector.
pub fn transmissive_config() -> Config {
    Config {
        mean_free_path_scale: 500.0,
        ..Config::default()
    }
}

/// Creates a simulation of a collimated 100 keV beam entering the left edge of
/// the phantom, with transmissive constants and a fixed seed.
pub fn make_simulation(emission_count: usize) -> Simulation {
    make_simulation_with(emission_count, transmissive_config())
}

pub fn make_simulation_with(emission_count: usize, config: Config) -> Simulation {
    let source = PhotonSourceBuilder::new()
        .emission_count(emission_count)
        .build();

    Simulation::new(vec![source], medium(), config)
        .unwrap()
        .seeded(0x5EED)
}
