use crate::detector::Detector;
use crate::medium::Medium;
use std::fmt;

/// Densities above this are drawn as dense cells.
const DENSE_THRESHOLD: f64 = 0.5;
/// Length of the bar of the fullest detector bin.
const BAR_WIDTH: f64 = 20.0;

/// Renders a medium row by row, `█` for dense and `·` for sparse cells.
pub struct SampleView<'a>(pub &'a Medium);

/// Renders a detector as a horizontal bar chart normalized to its fullest bin.
pub struct DetectorView<'a>(pub &'a Detector);

impl<'a> fmt::Display for SampleView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let medium = self.0;
        for y in 0..medium.height() {
            for x in 0..medium.width() {
                let glyph = if medium.density(x, y) > DENSE_THRESHOLD {
                    '█'
                } else {
                    '·'
                };
                write!(f, "{}", glyph)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl<'a> fmt::Display for DetectorView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let max = self.0.max();

        for (idx, &energy) in self.0.bins().iter().enumerate() {
            let height = if max > 0.0 {
                (energy / max * BAR_WIDTH) as usize
            } else {
                0
            };

            write!(f, "{:2} | ", idx)?;
            for _ in 0..height {
                write!(f, "█")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::detector::BinPolicy;

    #[test]
    fn test_sample_view() {
        let medium = Medium::from_densities(3, 2, vec![1.0, 0.1, 0.1, 0.1, 0.6, 0.5]).unwrap();

        assert_eq!(SampleView(&medium).to_string(), "█··\n·█·\n");
    }

    #[test]
    fn test_detector_view() {
        let detector = Detector::from_bins(vec![10.0, 5.0, 0.0], BinPolicy::Wrap);

        let expected = format!(" 0 | {}\n 1 | {}\n 2 | \n", "█".repeat(20), "█".repeat(10));
        assert_eq!(DetectorView(&detector).to_string(), expected);
    }

    #[test]
    fn test_empty_detector_view() {
        let detector = Detector::new(2, BinPolicy::Wrap);

        assert_eq!(DetectorView(&detector).to_string(), " 0 | \n 1 | \n");
    }
}
