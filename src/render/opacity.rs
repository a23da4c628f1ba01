//! Fixed-point opacity shared by the coverage and trail renderers.
use serde::{Serialize, Serializer};

/// Opacity resolution: one unit is a millionth.
pub const OPACITY_SCALE: u32 = 1_000_000;

/// Opacity in `[0, 1]`, stored in millionths so ramps stay exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Opacity(u32);

impl Opacity {
    pub const TRANSPARENT: Self = Self(0);
    pub const OPAQUE: Self = Self(OPACITY_SCALE);

    /// Clamps to `OPACITY_SCALE`.
    #[must_use]
    pub const fn from_millionths(value: u32) -> Self {
        if value > OPACITY_SCALE {
            Self(OPACITY_SCALE)
        } else {
            Self(value)
        }
    }

    #[must_use]
    pub const fn millionths(self) -> u32 {
        self.0
    }

    /// Scales by `numerator / denominator`, saturating at opaque.
    #[must_use]
    pub fn scale(self, numerator: u32, denominator: u32) -> Self {
        let scaled = u64::from(self.0)
            .saturating_mul(u64::from(numerator))
            .checked_div(u64::from(denominator))
            .unwrap_or(0);
        Self::from_millionths(u32::try_from(scaled).unwrap_or(OPACITY_SCALE))
    }

    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "surfaces consume opacity as a unit-interval float"
    )]
    pub fn as_f64(self) -> f64 {
        f64::from(self.0) / f64::from(OPACITY_SCALE)
    }
}

impl Serialize for Opacity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(self.as_f64())
    }
}

/// `floor + span * numerator / denominator`.
///
/// The fraction is clamped to `[0, 1]`; a non-positive denominator counts as
/// a fully saturated fraction instead of dividing by zero.
#[must_use]
pub fn ramp(floor: Opacity, span: Opacity, numerator: i64, denominator: i64) -> Opacity {
    let span_units = i128::from(span.millionths());
    let offset = if denominator <= 0 {
        span_units
    } else {
        i128::from(numerator.clamp(0, denominator))
            .saturating_mul(span_units)
            .checked_div(i128::from(denominator))
            .unwrap_or(span_units)
    };
    let total = i128::from(floor.millionths()).saturating_add(offset);
    Opacity::from_millionths(u32::try_from(total).unwrap_or(OPACITY_SCALE))
}
