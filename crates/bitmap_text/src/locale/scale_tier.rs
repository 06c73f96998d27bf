//! Discrete scale tiers for localized text
//!
//! The external font engines are pre-rendered at a small fixed set of
//! magnifications. A bitmap font's baseline height identifies which
//! magnification visually matches it.

/// One of the fixed magnification levels of the external font resources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScaleTier {
    /// 1x magnification, the fallback tier
    X1,
    /// 1.5x magnification
    X15,
    /// 2x magnification
    X2,
    /// 2.5x magnification
    X25,
    /// 3x magnification
    X3,
}

impl ScaleTier {
    /// Classify a bitmap font by its baseline height
    ///
    /// Baselines 9, 11, 13, and 17 are the heights of the stock fonts the
    /// pre-rendered resources were matched against; anything else falls
    /// back to 1x.
    pub fn from_baseline(baseline: f32) -> Self {
        match baseline.round() as i32 {
            9 => Self::X15,
            11 => Self::X2,
            13 => Self::X25,
            17 => Self::X3,
            _ => Self::X1,
        }
    }

    /// Resource key of this tier
    pub const fn key(self) -> &'static str {
        match self {
            Self::X1 => "1x",
            Self::X15 => "15x",
            Self::X2 => "2x",
            Self::X25 => "25x",
            Self::X3 => "3x",
        }
    }

    /// Magnification factor of this tier
    pub const fn factor(self) -> f32 {
        match self {
            Self::X1 => 1.0,
            Self::X15 => 1.5,
            Self::X2 => 2.0,
            Self::X25 => 2.5,
            Self::X3 => 3.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_baselines_map_to_tiers() {
        assert_eq!(ScaleTier::from_baseline(9.0), ScaleTier::X15);
        assert_eq!(ScaleTier::from_baseline(11.0), ScaleTier::X2);
        assert_eq!(ScaleTier::from_baseline(13.0), ScaleTier::X25);
        assert_eq!(ScaleTier::from_baseline(17.0), ScaleTier::X3);
    }

    #[test]
    fn test_unknown_baseline_falls_back_to_1x() {
        assert_eq!(ScaleTier::from_baseline(8.0), ScaleTier::X1);
        assert_eq!(ScaleTier::from_baseline(12.0), ScaleTier::X1);
        assert_eq!(ScaleTier::from_baseline(64.0), ScaleTier::X1);
    }

    #[test]
    fn test_tier_keys() {
        assert_eq!(ScaleTier::X1.key(), "1x");
        assert_eq!(ScaleTier::X15.key(), "15x");
        assert_eq!(ScaleTier::X2.key(), "2x");
        assert_eq!(ScaleTier::X25.key(), "25x");
        assert_eq!(ScaleTier::X3.key(), "3x");
    }
}
