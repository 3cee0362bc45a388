//! Voice receives measures one by one and carves them into a sequence of
//! [`VoiceElement`].
//!
//! Everything is appended to the last measure of the current segment.
//! Structural events (repeats, endings, multiple rests, measures repeats)
//! close the current segment and move it, or a part of it, to its final
//! place. Closed elements go to the *destination*: the common part of the
//! innermost pending repeat, or the voice initial elements.
//!
//! The front end may report a structural event before or after it opens
//! the next measure. A trailing measure with nothing sounding in it is a
//! *placeholder*: it does not belong to what the event closes, and is
//! carried over to the fresh current segment.
//!
//! Repeat handling lives in `repeats`, multiple rests in `rests`.

mod repeats;
mod rests;

use log::{debug, warn};

use crate::{
    error::{MsrError, MsrResult},
    ids::{IdGenerator, VoiceId},
    primitives::{
        Barline, Clef, Duration, Key, Measure, MeasureElement, Note,
        RepeatProvenance, TimeSignature,
    },
    settings::MsrSettings,
};

use super::{Repeat, Segment, VoiceElement, VoiceKind};

pub use repeats::RepeatPhase;
use repeats::PendingMeasuresRepeat;
use rests::PendingMultipleRest;

#[derive(Debug, Clone, PartialEq)]
pub struct Voice {
    id: VoiceId,
    kind: VoiceKind,
    settings: MsrSettings,
    initial_elements: Vec<VoiceElement>,
    current_segment: Option<Segment>,
    /// Number and ordinal of the part measure this voice is in.
    current_measure_number: Option<(String, u32)>,
    /// Marks delivered before the first measure of the voice.
    pending_marks: Vec<MeasureElement>,
    pending_repeats: Vec<Repeat>,
    repeat_phase: RepeatPhase,
    pending_multiple_rest: Option<PendingMultipleRest>,
    /// A multiple rest was closed by a repeat boundary before the number
    /// of the following measure was announced.
    rest_awaiting_number: bool,
    pending_measures_repeat: Option<PendingMeasuresRepeat>,
    current_clef: Option<Clef>,
    current_key: Option<Key>,
    current_time: TimeSignature,
}
impl Voice {
    pub fn new(id: VoiceId, kind: VoiceKind, settings: MsrSettings) -> Self {
        Self {
            id,
            kind,
            settings,
            initial_elements: Vec::new(),
            current_segment: None,
            current_measure_number: None,
            pending_marks: Vec::new(),
            pending_repeats: Vec::new(),
            repeat_phase: RepeatPhase::Normal,
            pending_multiple_rest: None,
            rest_awaiting_number: false,
            pending_measures_repeat: None,
            current_clef: None,
            current_key: None,
            current_time: TimeSignature::default(),
        }
    }

    pub fn id(&self) -> VoiceId {
        self.id
    }
    pub fn number(&self) -> u32 {
        self.id.voice
    }
    pub fn kind(&self) -> VoiceKind {
        self.kind
    }
    pub fn settings(&self) -> &MsrSettings {
        &self.settings
    }
    /// Elements closed outside of any repeat, in document order.
    pub fn initial_elements(&self) -> &Vec<VoiceElement> {
        &self.initial_elements
    }
    pub fn current_segment(&self) -> Option<&Segment> {
        self.current_segment.as_ref()
    }
    pub fn pending_repeats(&self) -> &Vec<Repeat> {
        &self.pending_repeats
    }
    pub fn repeat_phase(&self) -> &RepeatPhase {
        &self.repeat_phase
    }
    pub fn current_clef(&self) -> Option<Clef> {
        self.current_clef
    }
    pub fn current_key(&self) -> Option<Key> {
        self.current_key
    }
    pub fn current_time(&self) -> &TimeSignature {
        &self.current_time
    }
    pub fn current_measure(&self) -> Option<&Measure> {
        self.current_segment.as_ref()?.last_measure()
    }
    /// Length so far of the current measure.
    pub fn current_length(&self) -> Duration {
        self.current_measure()
            .map(|m| m.length())
            .unwrap_or_default()
    }

    /// Every measure of the voice, in document order.
    pub fn measures(&self) -> Vec<&Measure> {
        let mut measures: Vec<&Measure> = self
            .initial_elements
            .iter()
            .flat_map(|e| e.measures())
            .collect();
        if let Some(segment) = &self.current_segment {
            measures.extend(segment.measures().iter());
        }
        measures
    }

    /// Finish the current measure and open the next one.
    ///
    /// `previous_high_tide` is the length the part reached in the
    /// measure being finished: an empty measure is padded up to it.
    pub fn create_measure(
        &mut self,
        number: impl Into<String>,
        ordinal: u32,
        previous_high_tide: Duration,
        ids: &mut IdGenerator,
    ) -> MsrResult<()> {
        self.finish_current_measure(previous_high_tide)?;
        let number = number.into();
        self.current_measure_number = Some((number.clone(), ordinal));
        self.open_measure(number, ordinal, ids)
    }

    fn finish_current_measure(&mut self, high_tide: Duration) -> MsrResult<()> {
        let pad = self.settings.pad_empty_measures;
        let trace = self.settings.trace_measures;
        let Some(segment) = self.current_segment.as_mut() else {
            return Ok(());
        };
        let is_first = segment.len() == 1;
        let Some(measure) = segment.last_measure_mut() else {
            return Ok(());
        };
        if pad
            && measure.is_placeholder()
            && measure.provenance() == RepeatProvenance::NotCreatedForRepeat
            && measure.pad_up_to(high_tide)?
        {
            debug!("padded empty measure {} in {}", measure.number(), self.id);
        }
        let kind = measure.classify(is_first);
        if trace {
            debug!(
                "measure {} of {} finished as {:?}: {}",
                measure.number(),
                self.id,
                kind,
                measure.length()
            );
        }
        Ok(())
    }

    fn open_measure(
        &mut self,
        number: String,
        ordinal: u32,
        ids: &mut IdGenerator,
    ) -> MsrResult<()> {
        let mut measure =
            Measure::new(ids.next_measure(), number, ordinal, self.kind);
        measure.set_full_length_from_time(&self.current_time);
        for mark in self.pending_marks.drain(..) {
            measure.append(mark)?;
        }
        if self.current_segment.is_none() {
            self.current_segment = Some(Segment::new(ids.next_segment(), self.id));
        }
        if let Some(segment) = self.current_segment.as_mut() {
            segment.append_measure(measure);
        }
        Ok(())
    }

    /// Last measure of the current segment, created on demand for a voice
    /// that joined the part after the measure was opened.
    fn current_measure_mut(
        &mut self,
        ids: &mut IdGenerator,
    ) -> MsrResult<&mut Measure> {
        let has_measure = self
            .current_segment
            .as_ref()
            .map(|s| !s.is_empty())
            .unwrap_or(false);
        if !has_measure {
            let (number, ordinal) = self
                .current_measure_number
                .clone()
                .ok_or(MsrError::NoCurrentMeasure(self.id))?;
            self.open_measure(number, ordinal, ids)?;
        }
        self.current_segment
            .as_mut()
            .and_then(|s| s.last_measure_mut())
            .ok_or(MsrError::NoCurrentMeasure(self.id))
    }

    pub(crate) fn set_current_measure_number(&mut self, number: String, ordinal: u32) {
        self.current_measure_number = Some((number, ordinal));
    }

    /// Append to the current measure.
    ///
    /// # Returns
    /// the new length of the current measure.
    pub fn append(
        &mut self,
        element: impl Into<MeasureElement>,
        ids: &mut IdGenerator,
    ) -> MsrResult<Duration> {
        let element = element.into();
        let trace = self.settings.trace_positions;
        let id = self.id;
        let measure = self.current_measure_mut(ids)?;
        if trace {
            debug!(
                "{}: {} at {} in measure {}",
                id,
                element,
                measure.length(),
                measure.number()
            );
        }
        measure.append(element)
    }

    /// Add a note to the chord being built in the current measure.
    pub fn append_chord_member(
        &mut self,
        note: Note,
        ids: &mut IdGenerator,
    ) -> MsrResult<Duration> {
        self.current_measure_mut(ids)?.append_chord_member(note)
    }

    /// Rest, or skip outside regular voices, of the given duration.
    pub fn append_padding(
        &mut self,
        duration: Duration,
        ids: &mut IdGenerator,
    ) -> MsrResult<Duration> {
        let skip = self.kind != VoiceKind::Regular;
        self.append(Note::padding(duration, skip), ids)
    }

    /// Pad the current measure up to `target`, if it is shorter.
    pub fn pad_up_to(
        &mut self,
        target: Duration,
        ids: &mut IdGenerator,
    ) -> MsrResult<bool> {
        self.current_measure_mut(ids)?.pad_up_to(target)
    }

    pub fn append_clef(&mut self, clef: Clef, ids: &mut IdGenerator) -> MsrResult<()> {
        self.current_clef = Some(clef);
        self.append_mark(
            MeasureElement::Clef {
                clef,
                position: Duration::zero(),
            },
            ids,
        )
    }
    pub fn append_key(&mut self, key: Key, ids: &mut IdGenerator) -> MsrResult<()> {
        self.current_key = Some(key);
        self.append_mark(
            MeasureElement::Key {
                key,
                position: Duration::zero(),
            },
            ids,
        )
    }
    pub fn append_time(
        &mut self,
        time: TimeSignature,
        ids: &mut IdGenerator,
    ) -> MsrResult<()> {
        self.current_time = time.clone();
        self.append_mark(
            MeasureElement::Time {
                time,
                position: Duration::zero(),
            },
            ids,
        )
    }
    pub fn append_barline(
        &mut self,
        barline: Barline,
        ids: &mut IdGenerator,
    ) -> MsrResult<()> {
        self.append_mark(
            MeasureElement::Barline {
                barline,
                position: Duration::zero(),
            },
            ids,
        )
    }
    fn append_mark(
        &mut self,
        mark: MeasureElement,
        ids: &mut IdGenerator,
    ) -> MsrResult<()> {
        if self.current_measure_number.is_none() {
            self.pending_marks.push(mark);
            return Ok(());
        }
        self.append(mark, ids).map(|_| ())
    }

    /// Segment the next closed element goes to.
    fn destination_mut(&mut self) -> &mut Vec<VoiceElement> {
        match self.pending_repeats.last_mut() {
            Some(repeat) => repeat.common_part_mut().elements_mut(),
            None => &mut self.initial_elements,
        }
    }
    fn push_closed(&mut self, element: VoiceElement) {
        if self.settings.trace_repeats {
            debug!("{}: closing {}", self.id, element.kind_name());
        }
        self.destination_mut().push(element);
    }

    /// Detach the current segment.
    ///
    /// # Returns
    /// the closed part (None if it has no measures) and the placeholder
    /// measure, if any.
    fn split_current_segment(&mut self) -> (Option<Segment>, Option<Measure>) {
        let Some(mut segment) = self.current_segment.take() else {
            return (None, None);
        };
        let placeholder = segment.take_placeholder();
        let is_first = segment.len() == 1;
        if let Some(last) = segment.last_measure_mut() {
            last.classify(is_first);
        }
        match segment.is_empty() {
            true => (None, placeholder),
            false => (Some(segment), placeholder),
        }
    }

    /// Fresh current segment, seeded with the carried-over placeholder.
    fn open_segment(
        &mut self,
        ids: &mut IdGenerator,
        placeholder: Option<Measure>,
        provenance: Option<RepeatProvenance>,
    ) {
        let mut segment = Segment::new(ids.next_segment(), self.id);
        if let Some(mut measure) = placeholder {
            if let Some(provenance) = provenance {
                measure.set_provenance(provenance);
            }
            segment.append_measure(measure);
        }
        self.current_segment = Some(segment);
    }

    /// Something sounding was appended to the current segment.
    fn current_has_music(&self) -> bool {
        self.current_segment
            .as_ref()
            .map(|s| s.measures().iter().any(|m| !m.is_placeholder()))
            .unwrap_or(false)
    }

    /// Close everything still open and move the current segment to the
    /// initial elements.
    pub fn finalize(&mut self, ids: &mut IdGenerator) -> MsrResult<()> {
        if let Some(segment) = self.current_segment.as_mut() {
            let is_first = segment.len() == 1;
            if let Some(measure) = segment.last_measure_mut() {
                measure.classify(is_first);
            }
            if self.settings.discard_trailing_empty_measure
                && segment
                    .last_measure()
                    .map(|m| m.is_genuinely_empty())
                    .unwrap_or(false)
            {
                if let Some(measure) = segment.pop_measure() {
                    debug!(
                        "{}: discarding trailing empty measure {}",
                        self.id,
                        measure.number()
                    );
                }
            }
        }
        if self.pending_multiple_rest.is_some() {
            warn!("{}: multiple rest still pending at the end", self.id);
            self.close_multiple_rest(None, false, ids);
        }
        if self.pending_measures_repeat.is_some() {
            warn!("{}: measures repeat still pending at the end", self.id);
            self.close_pending_measures_repeat(false, ids)?;
        }
        if let Some(segment) = self.current_segment.take() {
            if !segment.is_empty() {
                self.push_closed(VoiceElement::Segment(segment));
            }
        }
        while let Some(mut repeat) = self.pending_repeats.pop() {
            warn!(
                "{}: repeat started but never ended, keeping its music",
                self.id
            );
            for element in repeat.common_part_mut().take_elements() {
                self.push_closed(element);
            }
        }
        self.repeat_phase = RepeatPhase::Normal;
        Ok(())
    }
}
