#[macro_use]
extern crate log;

use radiograph_sim::{
    Config, ConfigError, DetectorView, Medium, PhotonSourceBuilder, SampleView, Simulation,
};
use std::env;
use std::process;

const GRID_SIZE: usize = 50;
const PHOTON_COUNT: usize = 1_000_000;
const DEFAULT_OUTPUT: &str = "detector_data.txt";
const SEED_VAR: &str = "RADIOGRAPH_SEED";

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run() {
        error!("{}", err);
        process::exit(2);
    }
}

fn run() -> Result<(), ConfigError> {
    let output = env::args().nth(1).unwrap_or_else(|| DEFAULT_OUTPUT.to_string());

    let medium = Medium::circular_phantom(GRID_SIZE, GRID_SIZE, 1.0, 0.1)?;
    let source = PhotonSourceBuilder::new()
        .emission_count(PHOTON_COUNT)
        .build();

    let mut simulation = Simulation::new(vec![source], medium, Config::default())?;
    if let Some(seed) = seed_from_env()? {
        info!("Using fixed seed {}", seed);
        simulation = simulation.seeded(seed);
    }

    debug!("Sample:\n{}", SampleView(simulation.medium()));

    let tally = simulation.run_fast();

    info!(
        "Simulation complete: {} exited, {} escaped, {} absorbed, {:.3} keV detected",
        tally.exited, tally.escaped, tally.absorbed, tally.deposited
    );
    debug!("Detector:\n{}", DetectorView(simulation.detector()));

    info!("Outputting detector data to {}", output);
    if let Err(err) = simulation.detector().save(&output) {
        error!("Error writing detector data to {}: {}", output, err);
    }

    Ok(())
}

fn seed_from_env() -> Result<Option<u64>, ConfigError> {
    match env::var(SEED_VAR) {
        Ok(seed) => seed
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidSeed(seed)),
        Err(_) => Ok(None),
    }
}
