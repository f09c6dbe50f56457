//! Continuous scales mapping a numeric domain onto a visual range.

/// How the domain is transformed before linear interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Curve {
    /// Identity.
    Linear,
    /// Signed square root, so areas rather than radii grow with the input.
    Sqrt,
}

impl Curve {
    fn transform(self, v: f64) -> f64 {
        match self {
            Curve::Linear => v,
            Curve::Sqrt => v.signum() * v.abs().sqrt(),
        }
    }
}

/// A linear or square-root scale with a fixed output for degenerate
/// domains.
///
/// Values outside the domain extrapolate; nothing is clamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    curve: Curve,
    domain: (f64, f64),
    range: (f64, f64),
    fallback: f64,
}

impl Scale {
    /// Linear scale; a zero-width domain maps everything to the range start.
    pub fn linear(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            curve: Curve::Linear,
            domain,
            range,
            fallback: range.0,
        }
    }

    /// Square-root scale; a zero-width domain maps everything to the range
    /// start.
    pub fn sqrt(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            curve: Curve::Sqrt,
            ..Self::linear(domain, range)
        }
    }

    /// Output used when the domain has zero width.
    pub fn with_fallback(self, fallback: f64) -> Self {
        Self { fallback, ..self }
    }

    /// Maps `v` from the domain to the range.
    pub fn apply(&self, v: f64) -> f64 {
        let d0 = self.curve.transform(self.domain.0);
        let d1 = self.curve.transform(self.domain.1);
        let width = d1 - d0;
        if width == 0.0 || !width.is_finite() {
            return self.fallback;
        }
        let t = (self.curve.transform(v) - d0) / width;
        self.range.0 + t * (self.range.1 - self.range.0)
    }
}

/// `(min, max)` of the values, or `None` when there are none.
pub fn extent(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values.into_iter().fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqrt_scale_hits_both_ends() {
        let s = Scale::sqrt((10.0, 100.0), (20.0, 70.0));
        assert_eq!(s.apply(10.0), 20.0);
        assert_eq!(s.apply(100.0), 70.0);
        let mid = s.apply(55.0);
        assert!(mid > 45.0 && mid < 70.0, "sqrt bows upward, got {mid}");
    }

    #[test]
    fn linear_scale_interpolates() {
        let s = Scale::linear((2.0, 12.0), (0.0, 1.0));
        assert_eq!(s.apply(7.0), 0.5);
    }

    #[test]
    fn degenerate_domain_uses_fallback() {
        assert_eq!(Scale::sqrt((5.0, 5.0), (0.5, 4.0)).apply(5.0), 0.5);
        let shade = Scale::linear((3.0, 3.0), (0.0, 1.0)).with_fallback(1.0);
        assert_eq!(shade.apply(3.0), 1.0);
    }

    #[test]
    fn extent_of_nothing_is_none() {
        assert_eq!(extent(Vec::new()), None);
        assert_eq!(extent([3.0, -1.0, 8.0]), Some((-1.0, 8.0)));
    }
}
