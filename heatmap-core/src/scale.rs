//! Positional scales shared by the grid and the sparklines.

/// Continuous linear mapping from a numeric domain to a pixel range.
///
/// A degenerate domain maps every value to the middle of the range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn apply(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return (r0 + r1) / 2.0;
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }
}

/// Discrete categories laid out as equal, contiguous pixel bands.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale<T> {
    domain: Vec<T>,
    start: f64,
    step: f64,
}

impl<T: PartialEq> BandScale<T> {
    pub fn new(domain: Vec<T>, start: f64, step: f64) -> Self {
        Self {
            domain,
            start,
            step,
        }
    }

    pub fn domain(&self) -> &[T] {
        &self.domain
    }

    pub fn bandwidth(&self) -> f64 {
        self.step
    }

    /// Total pixel extent of all bands.
    pub fn extent(&self) -> f64 {
        self.domain.len() as f64 * self.step
    }

    /// Leading edge of the band for `value`.
    pub fn position(&self, value: &T) -> Option<f64> {
        self.domain
            .iter()
            .position(|v| v == value)
            .map(|idx| self.start + idx as f64 * self.step)
    }

    /// Category whose band contains pixel `px`.
    pub fn invert(&self, px: f64) -> Option<&T> {
        if px < self.start || self.step <= 0.0 {
            return None;
        }
        let idx = ((px - self.start) / self.step).floor() as usize;
        self.domain.get(idx)
    }
}
