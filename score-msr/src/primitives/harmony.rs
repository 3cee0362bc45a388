//! Chord symbols and figured bass.
//!
//! Both live in their own voices, next to the regular ones, and take time
//! there like notes do.
use super::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct Harmony {
    pub text: String,
    sounding: Duration,
    position: Duration,
}
impl Harmony {
    pub fn new(text: impl Into<String>, sounding: Duration) -> Self {
        Self {
            text: text.into(),
            sounding,
            position: Duration::zero(),
        }
    }
    pub fn sounding(&self) -> Duration {
        self.sounding
    }
    pub fn position(&self) -> Duration {
        self.position
    }
    pub(crate) fn set_position(&mut self, position: Duration) {
        self.position = position;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FiguredBass {
    pub figures: Vec<String>,
    sounding: Duration,
    position: Duration,
}
impl FiguredBass {
    pub fn new(
        figures: impl IntoIterator<Item = impl Into<String>>,
        sounding: Duration,
    ) -> Self {
        Self {
            figures: figures.into_iter().map(Into::into).collect(),
            sounding,
            position: Duration::zero(),
        }
    }
    pub fn sounding(&self) -> Duration {
        self.sounding
    }
    pub fn position(&self) -> Duration {
        self.position
    }
    pub(crate) fn set_position(&mut self, position: Duration) {
        self.position = position;
    }
}
