use crate::error::{MsrError, MsrResult};

use super::{measure::MeasureUplink, Chord, Duration, Note, NoteKind};

#[derive(Debug, Clone, PartialEq)]
pub enum TremoloElement {
    Note(Note),
    Chord(Chord),
}
impl TremoloElement {
    pub fn sounding(&self) -> Duration {
        match self {
            Self::Note(n) => n.sounding(),
            Self::Chord(c) => c.sounding(),
        }
    }
    fn is_chord(&self) -> bool {
        matches!(self, Self::Chord(_))
    }
    fn set_position(&mut self, position: Duration) {
        match self {
            Self::Note(n) => n.set_position(position),
            Self::Chord(c) => c.set_position(position),
        }
    }
    fn set_measure_uplink(&mut self, uplink: &MeasureUplink) {
        match self {
            Self::Note(n) => n.set_measure_uplink(uplink),
            Self::Chord(c) => c.set_measure_uplink(uplink),
        }
    }
}
impl From<Note> for TremoloElement {
    fn from(mut note: Note) -> Self {
        note.set_kind(NoteKind::InDoubleTremolo);
        Self::Note(note)
    }
}
impl From<Chord> for TremoloElement {
    fn from(chord: Chord) -> Self {
        Self::Chord(chord)
    }
}

/// Two notes or chords alternating fast for their common duration.
///
/// Both elements carry the combined duration of the tremolo. The first
/// element fixes it, the second must match.
#[derive(Debug, Clone, PartialEq)]
pub struct DoubleTremolo {
    marks: u8,
    first: Option<TremoloElement>,
    second: Option<TremoloElement>,
    /// zero while no element is set.
    sounding: Duration,
    position: Duration,
}
impl DoubleTremolo {
    pub fn new(marks: u8) -> Self {
        Self {
            marks,
            first: None,
            second: None,
            sounding: Duration::zero(),
            position: Duration::zero(),
        }
    }

    pub fn set_first_element(
        &mut self,
        element: impl Into<TremoloElement>,
    ) -> MsrResult<()> {
        let element = element.into();
        self.sounding =
            Self::checked_sounding(self.sounding, &element, self.second.as_ref())?;
        self.first = Some(element);
        Ok(())
    }
    pub fn set_second_element(
        &mut self,
        element: impl Into<TremoloElement>,
    ) -> MsrResult<()> {
        let element = element.into();
        self.sounding =
            Self::checked_sounding(self.sounding, &element, self.first.as_ref())?;
        self.second = Some(element);
        Ok(())
    }
    /// Sounding of the tremolo once `element` is set next to `other`.
    fn checked_sounding(
        current: Duration,
        element: &TremoloElement,
        other: Option<&TremoloElement>,
    ) -> MsrResult<Duration> {
        if let Some(other) = other {
            if other.is_chord() != element.is_chord() {
                return Err(MsrError::UnexpectedElement {
                    expected: match other.is_chord() {
                        true => "chord",
                        false => "note",
                    },
                    found: format!("{:?}", element),
                });
            }
        }
        let sounding = element.sounding();
        if !current.is_zero() && current != sounding {
            return Err(MsrError::DurationMismatch {
                container: "double tremolo",
                expected: current,
                found: sounding,
            });
        }
        Ok(sounding)
    }

    pub fn marks(&self) -> u8 {
        self.marks
    }
    pub fn first(&self) -> Option<&TremoloElement> {
        self.first.as_ref()
    }
    pub fn second(&self) -> Option<&TremoloElement> {
        self.second.as_ref()
    }
    pub fn sounding(&self) -> Duration {
        self.sounding
    }
    pub fn position(&self) -> Duration {
        self.position
    }
    pub fn is_complete(&self) -> bool {
        self.first.is_some() && self.second.is_some()
    }

    /// Written value of one stroke: `1 / 2^(marks + 2)`.
    ///
    /// # Example
    /// ```
    /// # use score_msr::primitives::{DoubleTremolo, Duration};
    /// assert_eq!(DoubleTremolo::new(2).element_duration(), Duration::new(1, 16));
    /// ```
    pub fn element_duration(&self) -> Duration {
        Duration::new(1, 1_u64 << (self.marks as u32 + 2))
    }

    /// How many times the pair of strokes repeats.
    pub fn repeat_count(&self) -> MsrResult<u64> {
        let error = || MsrError::TremoloRepeatCount {
            combined: self.sounding,
            element: self.element_duration(),
        };
        let strokes = self.sounding / self.element_duration();
        (strokes / Duration::new(2, 1))
            .as_integer()
            .filter(|count| *count > 0)
            .ok_or_else(error)
    }

    pub(crate) fn set_position(&mut self, position: Duration) {
        self.position = position;
        for element in [&mut self.first, &mut self.second].into_iter().flatten()
        {
            element.set_position(position);
        }
    }
    pub(crate) fn set_measure_uplink(&mut self, uplink: &MeasureUplink) {
        for element in [&mut self.first, &mut self.second].into_iter().flatten()
        {
            element.set_measure_uplink(uplink);
        }
    }
}
