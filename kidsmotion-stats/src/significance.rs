//! Significance Bands

/// Star annotation for an (uncorrected) p-value
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Significance {
    /// p >= 0.05, or p is NaN
    NotSignificant,
    /// 0.01 <= p < 0.05
    P05,
    /// 0.001 <= p < 0.01
    P01,
    /// p < 0.001
    P001,
}

impl Significance {
    /// Tightest band containing `p`
    pub fn from_p(p: f64) -> Self {
        if p < 0.001 {
            Significance::P001
        } else if p < 0.01 {
            Significance::P01
        } else if p < 0.05 {
            Significance::P05
        } else {
            Significance::NotSignificant
        }
    }

    /// Star label: `ns`, `*`, `**` or `***`
    pub fn as_str(self) -> &'static str {
        match self {
            Significance::NotSignificant => "ns",
            Significance::P05 => "*",
            Significance::P01 => "**",
            Significance::P001 => "***",
        }
    }
}

impl std::fmt::Display for Significance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_edges() {
        assert_eq!(Significance::from_p(0.0005), Significance::P001);
        assert_eq!(Significance::from_p(0.001), Significance::P01);
        assert_eq!(Significance::from_p(0.0099), Significance::P01);
        assert_eq!(Significance::from_p(0.01), Significance::P05);
        assert_eq!(Significance::from_p(0.049), Significance::P05);
        assert_eq!(Significance::from_p(0.05), Significance::NotSignificant);
        assert_eq!(Significance::from_p(0.8), Significance::NotSignificant);
        assert_eq!(Significance::from_p(f64::NAN), Significance::NotSignificant);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Significance::P001.to_string(), "***");
        assert_eq!(Significance::P01.to_string(), "**");
        assert_eq!(Significance::P05.to_string(), "*");
        assert_eq!(Significance::NotSignificant.to_string(), "ns");
    }
}
