use std::fs::File;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::Path;

/// Maps the row a photon exited at onto a detector bin.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinPolicy {
    /// Rows fold onto the detector, bin is `floor(y) mod len`, always non-negative.
    Wrap,
    /// Rows outside of the detector are attributed to the nearest edge bin.
    Clamp,
}

impl Default for BinPolicy {
    fn default() -> Self {
        BinPolicy::Wrap
    }
}

/// Linear array of energy accumulators on the far side of the medium.
///
/// Energy is only ever added, so every bin is monotonically non-decreasing
/// over the lifetime of a detector.
#[derive(Debug, Clone, PartialEq)]
pub struct Detector {
    bins: Vec<f64>,
    policy: BinPolicy,
}

impl Detector {
    pub fn new(len: usize, policy: BinPolicy) -> Detector {
        Detector {
            bins: vec![0.0; len],
            policy,
        }
    }

    pub fn from_bins(bins: Vec<f64>, policy: BinPolicy) -> Detector {
        Detector { bins, policy }
    }

    pub fn bins(&self) -> &[f64] {
        &self.bins
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    pub fn policy(&self) -> BinPolicy {
        self.policy
    }

    /// Sum of all deposited energy.
    pub fn total(&self) -> f64 {
        self.bins.iter().sum()
    }

    pub fn max(&self) -> f64 {
        self.bins.iter().cloned().fold(0.0, f64::max)
    }

    /// Bin for a photon that left the medium in the given row, `None` for
    /// a detector without bins.
    pub fn bin_for(&self, row: i64) -> Option<usize> {
        let len = self.bins.len();
        if len == 0 {
            return None;
        }

        let bin = match self.policy {
            BinPolicy::Wrap => row.rem_euclid(len as i64) as usize,
            BinPolicy::Clamp => row.max(0).min(len as i64 - 1) as usize,
        };

        Some(bin)
    }

    /// Adds energy to the bin of the given exit row and returns the bin.
    ///
    /// Negative or NaN energy is never deposited.
    pub fn deposit(&mut self, row: i64, energy: f64) -> Option<usize> {
        let bin = self.bin_for(row)?;
        if energy > 0.0 {
            self.bins[bin] += energy;
        }
        Some(bin)
    }

    /// Adds the bins of a partial detector, e.g. from one batch of a parallel run.
    pub fn merge(&mut self, other: &Detector) {
        assert_eq!(
            self.bins.len(),
            other.bins.len(),
            "Detectors have unequal amount of bins, cannot merge"
        );

        self.bins
            .iter_mut()
            .zip(other.bins.iter())
            .for_each(|(b, o)| *b += o);
    }

    /// Writes one `<bin> <energy>` line per bin, energy with six decimals.
    pub fn write_to<W: Write>(&self, mut out: W) -> io::Result<()> {
        for (idx, energy) in self.bins.iter().enumerate() {
            writeln!(out, "{} {:.6}", idx, energy)?;
        }
        out.flush()
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let file = File::create(path)?;
        self.write_to(BufWriter::new(file))
    }

    /// Parses the format of `write_to`. Bins must be listed in order starting at zero.
    pub fn read_from<R: BufRead>(input: R, policy: BinPolicy) -> io::Result<Detector> {
        let mut bins = Vec::new();

        for (line_idx, line) in input.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let mut fields = line.split_whitespace();
            let bin = fields.next().and_then(|f| f.parse::<usize>().ok());
            let energy = fields.next().and_then(|f| f.parse::<f64>().ok());

            match (bin, energy, fields.next()) {
                (Some(bin), Some(energy), None) if bin == bins.len() => bins.push(energy),
                _ => {
                    return Err(io::Error::new(
                        io::ErrorKind::InvalidData,
                        format!("malformed detector line {}: {:?}", line_idx + 1, line),
                    ))
                }
            }
        }

        Ok(Detector { bins, policy })
    }
}
