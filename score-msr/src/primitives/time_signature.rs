use std::fmt::Display;

use super::Duration;

/// Meter of the following measures.
///
/// A senza-misura time gives unbounded measures.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TimeSignature {
    pub numerator: u32,
    pub denominator: u32,
    pub senza_misura: bool,
}
impl TimeSignature {
    pub fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
            senza_misura: false,
        }
    }
    pub fn senza_misura() -> Self {
        Self {
            numerator: 0,
            denominator: 1,
            senza_misura: true,
        }
    }
    /// Full length of a measure in this meter.
    pub fn whole_notes_per_measure(&self) -> Duration {
        if self.senza_misura || self.denominator == 0 {
            return Duration::unbounded();
        }
        Duration::new(self.numerator as u64, self.denominator as u64)
    }
}
impl Default for TimeSignature {
    fn default() -> Self {
        Self::new(4, 4)
    }
}
impl Display for TimeSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.senza_misura {
            true => write!(f, "senza misura"),
            false => write!(f, "{}/{}", self.numerator, self.denominator),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TimeSignature;
    use crate::primitives::Duration;

    #[test]
    fn measure_length() {
        assert_eq!(
            TimeSignature::new(6, 8).whole_notes_per_measure(),
            Duration::new(3, 4)
        );
        assert_eq!(
            TimeSignature::new(2, 2).whole_notes_per_measure(),
            Duration::whole()
        );
        assert!(TimeSignature::senza_misura()
            .whole_notes_per_measure()
            .is_unbounded());
    }
}
