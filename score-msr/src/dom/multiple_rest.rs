use crate::primitives::Duration;

use super::Segment;

/// Several full-measure rests shown as one.
///
/// The measures themselves are kept as contents.
#[derive(Debug, Clone, PartialEq)]
pub struct MultipleRest {
    count: u32,
    measure_sounding: Duration,
    contents: Segment,
    next_measure_number: Option<String>,
}
impl MultipleRest {
    pub fn new(
        count: u32,
        measure_sounding: Duration,
        contents: Segment,
        next_measure_number: Option<String>,
    ) -> Self {
        Self {
            count,
            measure_sounding,
            contents,
            next_measure_number,
        }
    }
    pub fn count(&self) -> u32 {
        self.count
    }
    pub fn measure_sounding(&self) -> Duration {
        self.measure_sounding
    }
    /// Length of the whole rest.
    pub fn sounding(&self) -> Duration {
        self.measure_sounding * self.count as u64
    }
    pub fn contents(&self) -> &Segment {
        &self.contents
    }
    pub fn next_measure_number(&self) -> Option<&str> {
        self.next_measure_number.as_deref()
    }

    pub(crate) fn set_next_measure_number(&mut self, number: String) {
        self.next_measure_number = Some(number);
    }
}
