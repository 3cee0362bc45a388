//! Measure holds the elements of one voice between two barlines.
//!
//! Elements are only appended: each one is placed at the current length of
//! the measure, and the length grows by its sounding duration. So, at any
//! time, the length is the sum of the element durations, and every
//! position is the sum of the durations before it.
//!
//! Measure never splits or rejects content for its length. Overfull
//! measures are kept and flagged by [`Measure::classify`].
//!
//! # Developer Note
//! Measure knows its voice kind only to tell which elements it accepts
//! and what padding looks like. Synchronization between voices is the
//! Part's job, see [`crate::dom::Part::high_tide`].

use std::cmp::Ordering;

use derivative::Derivative;
use log::{debug, warn};

use crate::{
    dom::VoiceKind,
    error::{MsrError, MsrResult},
    ids::{MeasureId, SegmentId, VoiceId},
};

use super::{Chord, Duration, MeasureElement, Note, NoteKind, TimeSignature};

/// What a note knows about its measure.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MeasureUplink {
    pub id: MeasureId,
    pub number: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MeasureKind {
    #[default]
    Unclassified,
    Empty,
    Full,
    Upbeat,
    Underfull,
    Overfull,
}

/// Why the measure exists, with respect to repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RepeatProvenance {
    #[default]
    NotCreatedForRepeat,
    BeforeRepeat,
    AfterRepeat,
    PaddedForRepeat,
}

#[derive(Derivative, Clone)]
#[derivative(Debug, PartialEq)]
pub struct Measure {
    id: MeasureId,
    number: String,
    ordinal: u32,
    voice_kind: VoiceKind,
    elements: Vec<MeasureElement>,
    length: Duration,
    full_length: Duration,
    kind: MeasureKind,
    provenance: RepeatProvenance,
    #[derivative(PartialEq = "ignore")]
    segment_uplink: Option<SegmentId>,
    #[derivative(PartialEq = "ignore")]
    voice_uplink: Option<VoiceId>,
}
impl Measure {
    pub fn new(
        id: MeasureId,
        number: impl Into<String>,
        ordinal: u32,
        voice_kind: VoiceKind,
    ) -> Self {
        Self {
            id,
            number: number.into(),
            ordinal,
            voice_kind,
            elements: Vec::new(),
            length: Duration::zero(),
            full_length: TimeSignature::default().whole_notes_per_measure(),
            kind: MeasureKind::default(),
            provenance: RepeatProvenance::default(),
            segment_uplink: None,
            voice_uplink: None,
        }
    }

    /// New measure with the same number, ordinal, full length and voice
    /// kind, but no elements.
    pub fn empty_like(&self, id: MeasureId) -> Self {
        let mut measure =
            Self::new(id, self.number.clone(), self.ordinal, self.voice_kind);
        measure.full_length = self.full_length;
        measure.voice_uplink = self.voice_uplink;
        measure
    }
    pub fn with_provenance(mut self, provenance: RepeatProvenance) -> Self {
        self.provenance = provenance;
        self
    }

    pub fn id(&self) -> MeasureId {
        self.id
    }
    pub fn number(&self) -> &str {
        &self.number
    }
    pub fn ordinal(&self) -> u32 {
        self.ordinal
    }
    pub fn voice_kind(&self) -> VoiceKind {
        self.voice_kind
    }
    pub fn elements(&self) -> &Vec<MeasureElement> {
        &self.elements
    }
    /// Length so far: the sum of the element durations.
    pub fn length(&self) -> Duration {
        self.length
    }
    pub fn full_length(&self) -> Duration {
        self.full_length
    }
    pub fn kind(&self) -> MeasureKind {
        self.kind
    }
    pub fn provenance(&self) -> RepeatProvenance {
        self.provenance
    }
    pub fn segment_uplink(&self) -> Option<SegmentId> {
        self.segment_uplink
    }
    pub fn voice_uplink(&self) -> Option<VoiceId> {
        self.voice_uplink
    }
    pub fn uplink(&self) -> MeasureUplink {
        MeasureUplink {
            id: self.id,
            number: self.number.clone(),
        }
    }

    /// Nothing sounding was put here yet.
    ///
    /// A trailing placeholder is carried over when the voice is
    /// restructured around it.
    pub fn is_placeholder(&self) -> bool {
        self.length.is_zero() && !self.elements.iter().any(|e| e.is_musical())
    }
    /// No elements at all, not even marks.
    pub fn is_genuinely_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Append element at the end of the measure.
    ///
    /// # Returns
    /// the new length of the measure, for the Part high tide.
    ///
    /// # Example
    /// ```
    /// # use score_msr::{dom::VoiceKind, ids::IdGenerator};
    /// # use score_msr::primitives::{Duration, Measure, Note, NoteName, Pitch};
    /// let mut ids = IdGenerator::new();
    /// let mut measure = Measure::new(ids.next_measure(), "1", 1, VoiceKind::Regular);
    /// let c = Pitch::natural(NoteName::C, 4);
    /// measure.append(Note::regular(c, Duration::new(1, 4))).unwrap();
    /// let length = measure.append(Note::rest(Duration::new(1, 8))).unwrap();
    /// assert_eq!(length, Duration::new(3, 8));
    /// assert_eq!(measure.elements()[1].position(), Duration::new(1, 4));
    /// ```
    pub fn append(
        &mut self,
        element: impl Into<MeasureElement>,
    ) -> MsrResult<Duration> {
        let mut element = element.into();
        self.check_accepts(&element)?;
        if let MeasureElement::Time { time, .. } = &element {
            self.full_length = time.whole_notes_per_measure();
        }
        element.set_position(self.length);
        element.set_measure_uplink(&self.uplink());
        self.length += element.sounding();
        self.elements.push(element);
        if !self.full_length.is_unbounded() && self.length > self.full_length {
            warn!(
                "Measure {} is overfull: {} of {}",
                self.number, self.length, self.full_length
            );
        }
        Ok(self.length)
    }

    fn check_accepts(&self, element: &MeasureElement) -> MsrResult<()> {
        let unexpected = |expected: &'static str| MsrError::UnexpectedElement {
            expected,
            found: element.kind_name().to_string(),
        };
        match (element, self.voice_kind) {
            (MeasureElement::Harmony(_), VoiceKind::Harmony) => (),
            (MeasureElement::Harmony(_), _) => {
                return Err(unexpected("harmony voice"))
            }
            (MeasureElement::FiguredBass(_), VoiceKind::FiguredBass) => (),
            (MeasureElement::FiguredBass(_), _) => {
                return Err(unexpected("figured bass voice"))
            }
            (MeasureElement::Note(n), VoiceKind::Harmony | VoiceKind::FiguredBass)
                if n.kind().is_rest_or_skip() => {}
            (
                MeasureElement::Note(_)
                | MeasureElement::Chord(_)
                | MeasureElement::Tuplet(_)
                | MeasureElement::DoubleTremolo(_)
                | MeasureElement::GraceNotesGroup(_),
                VoiceKind::Harmony | VoiceKind::FiguredBass,
            ) => return Err(unexpected("skip")),
            _ => (),
        }
        match element {
            MeasureElement::Chord(c) if c.notes().len() < 2 => {
                Err(MsrError::ChordTooSmall(c.notes().len()))
            }
            MeasureElement::DoubleTremolo(t) if t.first().is_none() => {
                Err(MsrError::TremoloIncomplete("first"))
            }
            MeasureElement::DoubleTremolo(t) if t.second().is_none() => {
                Err(MsrError::TremoloIncomplete("second"))
            }
            _ => Ok(()),
        }
    }

    /// Add a note to the chord ending the measure.
    ///
    /// If the measure ends with a standalone note, it becomes the first
    /// note of a new chord.
    pub fn append_chord_member(&mut self, note: Note) -> MsrResult<Duration> {
        let last = self.elements.pop();
        let mut chord = match last {
            Some(MeasureElement::Chord(chord)) => chord,
            Some(MeasureElement::Note(first))
                if matches!(
                    first.kind(),
                    NoteKind::Regular | NoteKind::Unpitched
                ) =>
            {
                Chord::new(first)
            }
            other => {
                let found = other
                    .as_ref()
                    .map(|e| e.kind_name())
                    .unwrap_or("nothing")
                    .to_string();
                if let Some(other) = other {
                    self.elements.push(other);
                }
                return Err(MsrError::UnexpectedElement {
                    expected: "note or chord before chord member",
                    found,
                });
            }
        };
        self.length = self.length.checked_sub(chord.sounding())?;
        let result = chord.add_note(note);
        self.elements.push(MeasureElement::Chord(chord));
        let sounding = self.elements[self.elements.len() - 1].sounding();
        self.length += sounding;
        result.map(|_| self.length)
    }

    /// Remove a previously appended standalone note, as found in
    /// [`Measure::elements`]: the same event at the same position.
    ///
    /// Positions of the following elements are derived again.
    pub fn remove_note(&mut self, note: &Note) -> MsrResult<()> {
        let index = self
            .elements
            .iter()
            .position(|e| match e {
                MeasureElement::Note(n) => {
                    n.is_same_event(note) && n.position() == note.position()
                }
                _ => false,
            })
            .ok_or_else(|| MsrError::ElementNotFound {
                measure: self.number.clone(),
                element: note.to_string(),
            })?;
        self.elements.remove(index);
        self.recompute_positions();
        Ok(())
    }

    fn recompute_positions(&mut self) {
        let mut length = Duration::zero();
        for element in self.elements.iter_mut() {
            element.set_position(length);
            length += element.sounding();
        }
        self.length = length;
    }

    /// Fill the measure with one rest (or skip, outside regular voices)
    /// up to `target`.
    ///
    /// # Returns
    /// true if padding was appended.
    pub fn pad_up_to(&mut self, target: Duration) -> MsrResult<bool> {
        if target.is_unbounded() || self.length >= target {
            return Ok(false);
        }
        let missing = target.checked_sub(self.length)?;
        let padding = Note::padding(missing, self.voice_kind != VoiceKind::Regular);
        debug!(
            "padding measure {} with {} up to {}",
            self.number, padding, target
        );
        self.append(padding)?;
        if matches!(
            self.provenance,
            RepeatProvenance::BeforeRepeat | RepeatProvenance::AfterRepeat
        ) {
            self.provenance = RepeatProvenance::PaddedForRepeat;
        }
        Ok(true)
    }

    pub fn set_full_length_from_time(&mut self, time: &TimeSignature) {
        self.full_length = time.whole_notes_per_measure();
    }

    /// Decide the kind from length and full length. Calling it again gives
    /// the same answer.
    pub fn classify(&mut self, is_first_in_segment: bool) -> MeasureKind {
        self.kind = if self.is_placeholder() {
            MeasureKind::Empty
        } else if self.full_length.is_unbounded() {
            MeasureKind::Full
        } else {
            match self.length.cmp(&self.full_length) {
                Ordering::Equal => MeasureKind::Full,
                Ordering::Greater => MeasureKind::Overfull,
                Ordering::Less if is_first_in_segment => MeasureKind::Upbeat,
                Ordering::Less => MeasureKind::Underfull,
            }
        };
        if self.kind == MeasureKind::Overfull {
            warn!(
                "Measure {} classified overfull: {} of {}",
                self.number, self.length, self.full_length
            );
        }
        self.kind
    }

    pub(crate) fn set_provenance(&mut self, provenance: RepeatProvenance) {
        self.provenance = provenance;
    }
    pub(crate) fn set_segment_uplink(&mut self, segment: SegmentId) {
        self.segment_uplink = Some(segment);
    }
    pub(crate) fn set_voice_uplink(&mut self, voice: VoiceId) {
        self.voice_uplink = Some(voice);
    }
}

#[cfg(test)]
mod tests {
    use super::{Measure, MeasureKind, RepeatProvenance};
    use crate::{
        dom::VoiceKind,
        error::MsrError,
        ids::IdGenerator,
        primitives::{
            Duration, Harmony, MeasureElement, Note, NoteName, Pitch,
            TimeSignature,
        },
    };

    fn measure(voice_kind: VoiceKind) -> Measure {
        let mut ids = IdGenerator::new();
        let mut measure = Measure::new(ids.next_measure(), "1", 1, voice_kind);
        measure.set_full_length_from_time(&TimeSignature::new(3, 4));
        measure
    }

    #[test]
    fn classify_is_stable() {
        let mut m = measure(VoiceKind::Regular);
        assert_eq!(m.classify(false), MeasureKind::Empty);
        m.append(Note::rest(Duration::new(1, 4))).unwrap();
        assert_eq!(m.classify(true), MeasureKind::Upbeat);
        assert_eq!(m.classify(true), MeasureKind::Upbeat);
        assert_eq!(m.classify(false), MeasureKind::Underfull);
        m.append(Note::rest(Duration::new(1, 2))).unwrap();
        assert_eq!(m.classify(false), MeasureKind::Full);
        m.append(Note::rest(Duration::new(1, 8))).unwrap();
        assert_eq!(m.classify(false), MeasureKind::Overfull);
        assert_eq!(m.classify(false), MeasureKind::Overfull);
    }

    #[test]
    fn senza_misura_is_full() {
        let mut m = measure(VoiceKind::Regular);
        m.set_full_length_from_time(&TimeSignature::senza_misura());
        assert_eq!(m.classify(false), MeasureKind::Empty);
        m.append(Note::rest(Duration::new(7, 4))).unwrap();
        assert_eq!(m.classify(false), MeasureKind::Full);
        assert!(!m.pad_up_to(Duration::unbounded()).unwrap());
    }

    #[test]
    fn voice_kind_filters_elements() {
        let mut m = measure(VoiceKind::Regular);
        let err = m
            .append(Harmony::new("Cmaj7", Duration::new(1, 4)))
            .unwrap_err();
        assert!(matches!(err, MsrError::UnexpectedElement { .. }));

        let mut h = measure(VoiceKind::Harmony);
        h.append(Harmony::new("Cmaj7", Duration::new(1, 4))).unwrap();
        h.append(Note::skip(Duration::new(1, 4))).unwrap();
        let c = Pitch::natural(NoteName::C, 4);
        assert!(h.append(Note::regular(c, Duration::new(1, 4))).is_err());
        h.pad_up_to(Duration::new(3, 4)).unwrap();
        match h.elements().last() {
            Some(MeasureElement::Note(n)) => assert!(n.is_skip()),
            other => panic!("expected padding skip, got {:?}", other),
        }
    }

    #[test]
    fn chord_member_converts_last_note() {
        let mut m = measure(VoiceKind::Regular);
        let quarter = Duration::new(1, 4);
        m.append(Note::rest(quarter)).unwrap();
        m.append(Note::regular(Pitch::natural(NoteName::C, 4), quarter))
            .unwrap();
        let length = m
            .append_chord_member(Note::regular(
                Pitch::natural(NoteName::E, 4),
                quarter,
            ))
            .unwrap();
        assert_eq!(length, Duration::new(1, 2));
        match &m.elements()[1] {
            MeasureElement::Chord(c) => {
                assert_eq!(c.notes().len(), 2);
                assert_eq!(c.position(), quarter);
            }
            other => panic!("expected chord, got {:?}", other),
        }
        let err = m
            .append_chord_member(Note::regular(
                Pitch::natural(NoteName::G, 4),
                Duration::new(1, 8),
            ))
            .unwrap_err();
        assert!(matches!(err, MsrError::DurationMismatch { .. }));
        assert_eq!(m.length(), Duration::new(1, 2));
    }

    #[test]
    fn remove_note_shifts_following() {
        let mut m = measure(VoiceKind::Regular);
        let c = Note::regular(Pitch::natural(NoteName::C, 4), Duration::new(1, 4));
        let d = Note::regular(Pitch::natural(NoteName::D, 4), Duration::new(1, 2));
        m.append(c.clone()).unwrap();
        m.append(d.clone()).unwrap();
        m.remove_note(&c).unwrap();
        assert_eq!(m.length(), Duration::new(1, 2));
        assert_eq!(m.elements()[0].position(), Duration::zero());
        let err = m.remove_note(&c).unwrap_err();
        assert!(matches!(err, MsrError::ElementNotFound { .. }));
    }

    #[test]
    fn remove_note_picks_the_one_at_its_position() {
        let mut m = measure(VoiceKind::Regular);
        let quarter = Duration::new(1, 4);
        for name in [NoteName::C, NoteName::D, NoteName::C] {
            m.append(Note::regular(Pitch::natural(name, 4), quarter))
                .unwrap();
        }
        let second_c = match &m.elements()[2] {
            MeasureElement::Note(n) => n.clone(),
            other => panic!("expected note, got {:?}", other),
        };
        m.remove_note(&second_c).unwrap();
        let names: Vec<NoteName> = m
            .elements()
            .iter()
            .filter_map(|e| match e {
                MeasureElement::Note(n) => n.pitch().map(|p| p.name),
                _ => None,
            })
            .collect();
        assert_eq!(names, vec![NoteName::C, NoteName::D]);
        assert_eq!(m.elements()[1].position(), quarter);
    }

    #[test]
    fn padding_retags_repeat_measures() {
        let mut m = measure(VoiceKind::Regular)
            .with_provenance(RepeatProvenance::AfterRepeat);
        assert!(m.pad_up_to(Duration::new(3, 4)).unwrap());
        assert_eq!(m.provenance(), RepeatProvenance::PaddedForRepeat);
        assert_eq!(m.elements().len(), 1);
        assert!(!m.pad_up_to(Duration::new(3, 4)).unwrap());
    }
}
