use crate::error::ConfigError;

/// Smallest density a cell can hold. Lower, negative or NaN densities are
/// raised to this value when the medium is built.
pub const DENSITY_FLOOR: f64 = 1e-6;

/// Two dimensional sample the photons travel through.
///
/// Cells are unit squares, cell `(x, y)` covers `[x, x + 1) × [y, y + 1)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Medium {
    width: usize,
    height: usize,
    /// Row-major, `densities[y * width + x]`.
    densities: Vec<f64>,
}

impl Medium {
    /// Builds a medium by evaluating `density` at every cell.
    pub fn from_fn<F>(width: usize, height: usize, mut density: F) -> Result<Medium, ConfigError>
    where
        F: FnMut(usize, usize) -> f64,
    {
        let mut densities = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                densities.push(density(x, y));
            }
        }

        Self::from_densities(width, height, densities)
    }

    /// Takes ownership of row-major densities.
    pub fn from_densities(
        width: usize,
        height: usize,
        mut densities: Vec<f64>,
    ) -> Result<Medium, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyGrid { width, height });
        }

        if densities.len() != width * height {
            return Err(ConfigError::DensityCount {
                expected: width * height,
                actual: densities.len(),
            });
        }

        let mut clamped = 0;
        for density in densities.iter_mut() {
            // also catches NaN
            if !(*density >= DENSITY_FLOOR) || density.is_infinite() {
                *density = if *density == std::f64::INFINITY {
                    std::f64::MAX
                } else {
                    DENSITY_FLOOR
                };
                clamped += 1;
            }
        }

        if clamped > 0 {
            warn!(
                "Clamped {} of {} densities into [{}, {}]",
                clamped,
                densities.len(),
                DENSITY_FLOOR,
                std::f64::MAX
            );
        }

        Ok(Medium {
            width,
            height,
            densities,
        })
    }

    pub fn uniform(width: usize, height: usize, density: f64) -> Result<Medium, ConfigError> {
        Self::from_fn(width, height, |_, _| density)
    }

    /// A dense disk centered in a sparser background.
    ///
    /// Cell `(x, y)` is `inside` if `(x - W/2)² + (y - H/2)² < (W/4)·(H/4)`,
    /// halves and quarters taken in integer arithmetic.
    pub fn circular_phantom(
        width: usize,
        height: usize,
        inside: f64,
        outside: f64,
    ) -> Result<Medium, ConfigError> {
        let cx = (width / 2) as i64;
        let cy = (height / 2) as i64;
        let radius_sqr = ((width / 4) * (height / 4)) as i64;

        Self::from_fn(width, height, |x, y| {
            let dx = x as i64 - cx;
            let dy = y as i64 - cy;
            if dx * dx + dy * dy < radius_sqr {
                inside
            } else {
                outside
            }
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn densities(&self) -> &[f64] {
        &self.densities
    }

    /// Density of the cell at integer coordinates. Panics if out of bounds.
    pub fn density(&self, x: usize, y: usize) -> f64 {
        assert!(x < self.width && y < self.height, "Cell ({}, {}) outside of medium", x, y);
        self.densities[y * self.width + x]
    }

    /// Checks whether a continuous position lies within `[0, W) × [0, H)`.
    ///
    /// NaN coordinates are never contained.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= 0.0 && x < self.width as f64 && y >= 0.0 && y < self.height as f64
    }

    /// Density of the cell containing the given position, truncating
    /// both coordinates. Position must be contained in the medium.
    pub fn density_at(&self, x: f64, y: f64) -> f64 {
        self.density(x as usize, y as usize)
    }
}
