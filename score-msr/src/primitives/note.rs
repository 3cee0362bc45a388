use std::fmt::Display;

use derivative::Derivative;

use super::{measure::MeasureUplink, Duration, Pitch};

/// Where a note stands, which also tells which container owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoteKind {
    Regular,
    Rest,
    Skip,
    Unpitched,
    Grace,
    GraceSkip,
    InChord,
    InTuplet,
    InChordInTuplet,
    InGraceNotesGroup,
    InDoubleTremolo,
}
impl NoteKind {
    pub fn is_rest_or_skip(&self) -> bool {
        matches!(self, Self::Rest | Self::Skip | Self::GraceSkip)
    }
}

/// The smallest timed unit.
///
/// Sounding duration is what is heard, display duration is what is written
/// (dots included). They differ inside tuplets and for grace notes.
#[derive(Derivative, Clone)]
#[derivative(Debug, PartialEq)]
pub struct Note {
    kind: NoteKind,
    pitch: Option<Pitch>,
    sounding: Duration,
    display: Duration,
    dots: u8,
    full_measure_rest: bool,
    /// distance from the start of the measure.
    position: Duration,
    #[derivative(Debug = "ignore", PartialEq = "ignore")]
    measure_uplink: Option<MeasureUplink>,
}
impl Note {
    pub fn new(
        kind: NoteKind,
        pitch: Option<Pitch>,
        sounding: Duration,
        display: Duration,
    ) -> Self {
        Self {
            kind,
            pitch,
            sounding,
            display,
            dots: 0,
            full_measure_rest: false,
            position: Duration::zero(),
            measure_uplink: None,
        }
    }
    pub fn regular(pitch: Pitch, duration: Duration) -> Self {
        Self::new(NoteKind::Regular, Some(pitch), duration, duration)
    }
    pub fn unpitched(duration: Duration) -> Self {
        Self::new(NoteKind::Unpitched, None, duration, duration)
    }
    pub fn rest(duration: Duration) -> Self {
        Self::new(NoteKind::Rest, None, duration, duration)
    }
    pub fn skip(duration: Duration) -> Self {
        Self::new(NoteKind::Skip, None, duration, duration)
    }
    pub fn full_measure_rest(duration: Duration) -> Self {
        let mut rest = Self::rest(duration);
        rest.full_measure_rest = true;
        rest
    }
    /// Grace notes take no time in their measure.
    pub fn grace(pitch: Pitch, display: Duration) -> Self {
        Self::new(NoteKind::Grace, Some(pitch), Duration::zero(), display)
    }
    /// Note for a note written inside a tuplet: sounding duration is
    /// computed by the tuplet.
    pub fn written(pitch: Option<Pitch>, display: Duration) -> Self {
        let kind = match pitch {
            Some(_) => NoteKind::Regular,
            None => NoteKind::Rest,
        };
        Self::new(kind, pitch, display, display)
    }
    /// Rest or skip filling a gap, shaped as a dotted value when possible.
    pub fn padding(duration: Duration, skip: bool) -> Self {
        let mut note = match skip {
            true => Self::skip(duration),
            false => Self::rest(duration),
        };
        if let Some((_, dots)) = duration.dotted_decomposition() {
            note.dots = dots;
        }
        note
    }
    pub fn with_dots(mut self, dots: u8) -> Self {
        self.dots = dots;
        self
    }

    pub fn kind(&self) -> NoteKind {
        self.kind
    }
    pub fn pitch(&self) -> Option<&Pitch> {
        self.pitch.as_ref()
    }
    pub fn sounding(&self) -> Duration {
        self.sounding
    }
    pub fn display(&self) -> Duration {
        self.display
    }
    pub fn dots(&self) -> u8 {
        self.dots
    }
    pub fn position(&self) -> Duration {
        self.position
    }
    pub fn is_full_measure_rest(&self) -> bool {
        self.full_measure_rest
    }
    pub fn is_rest(&self) -> bool {
        self.kind == NoteKind::Rest
    }
    pub fn is_skip(&self) -> bool {
        self.kind == NoteKind::Skip
    }
    pub fn measure_uplink(&self) -> Option<&MeasureUplink> {
        self.measure_uplink.as_ref()
    }

    /// Same written event, wherever it was placed.
    pub fn is_same_event(&self, other: &Self) -> bool {
        self.pitch == other.pitch
            && self.sounding == other.sounding
            && self.display == other.display
            && self.dots == other.dots
            && self.kind.is_rest_or_skip() == other.kind.is_rest_or_skip()
    }

    pub(crate) fn set_kind(&mut self, kind: NoteKind) {
        self.kind = kind;
    }
    pub(crate) fn set_sounding(&mut self, sounding: Duration) {
        self.sounding = sounding;
    }
    pub(crate) fn set_position(&mut self, position: Duration) {
        self.position = position;
    }
    pub(crate) fn set_measure_uplink(&mut self, uplink: &MeasureUplink) {
        self.measure_uplink = Some(uplink.clone());
    }
    pub(crate) fn enter_chord(&mut self) {
        self.kind = match self.kind {
            NoteKind::InTuplet => NoteKind::InChordInTuplet,
            _ => NoteKind::InChord,
        };
    }
    pub(crate) fn enter_tuplet(&mut self) {
        self.kind = match self.kind {
            NoteKind::Rest | NoteKind::Skip => self.kind,
            NoteKind::InChord => NoteKind::InChordInTuplet,
            _ => NoteKind::InTuplet,
        };
    }
}
impl Display for Note {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.pitch, self.kind) {
            (_, NoteKind::Rest) => write!(f, "r")?,
            (_, NoteKind::Skip | NoteKind::GraceSkip) => write!(f, "s")?,
            (Some(pitch), _) => write!(f, "{pitch}")?,
            (None, _) => write!(f, "x")?,
        }
        write!(f, ":{}", self.display)?;
        if self.sounding != self.display {
            write!(f, "({})", self.sounding)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Note, NoteKind};
    use crate::primitives::{Duration, NoteName, Pitch};

    #[test]
    fn padding_takes_dotted_shape() {
        let rest = Note::padding(Duration::new(3, 8), false);
        assert_eq!(rest.kind(), NoteKind::Rest);
        assert_eq!(rest.dots(), 1);
        assert_eq!(rest.display(), Duration::new(3, 8));
        let skip = Note::padding(Duration::new(5, 8), true);
        assert!(skip.is_skip());
        assert_eq!(skip.dots(), 0);
    }

    #[test]
    fn same_event_ignores_placement() {
        let c = Note::regular(Pitch::natural(NoteName::C, 4), Duration::new(1, 4));
        let mut placed = c.clone();
        placed.set_position(Duration::new(1, 2));
        placed.enter_chord();
        assert!(c.is_same_event(&placed));
        assert_ne!(c, placed);
        assert_eq!(c.to_string(), "C4:1/4");
        assert_eq!(Note::rest(Duration::new(1, 2)).to_string(), "r:1/2");
    }
}
