//! Part is the entry point of the front end.
//!
//! Measure creation, keys, times, barlines and structural events apply to
//! every voice of the part. Notes and other timed elements go to one
//! voice, and move the part *high tide*: the longest current measure
//! length over all voices. It is used to pad voices that have less to
//! say, so that all of them end their measures together.

use std::collections::BTreeMap;

use log::debug;

use crate::{
    error::{MsrError, MsrResult},
    ids::{IdGenerator, PartId},
    primitives::{
        Barline, BarlineLocation, Chord, Clef, DoubleTremolo, Duration,
        FiguredBass, GraceNotesGroup, Harmony, Key, MeasureElement, Note,
        TimeSignature, Tuplet,
    },
    settings::MsrSettings,
};

use super::{EndingKind, Staff, Voice, VoiceKind};

#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    id: PartId,
    name: String,
    settings: MsrSettings,
    staves: BTreeMap<u32, Staff>,
    high_tide: Duration,
    current_measure: Option<(String, u32)>,
    current_key: Option<Key>,
    current_time: Option<TimeSignature>,
}
impl Part {
    pub fn new(
        ids: &mut IdGenerator,
        name: impl Into<String>,
        settings: MsrSettings,
    ) -> Self {
        Self {
            id: ids.next_part(),
            name: name.into(),
            settings,
            staves: BTreeMap::new(),
            high_tide: Duration::zero(),
            current_measure: None,
            current_key: None,
            current_time: None,
        }
    }

    pub fn id(&self) -> PartId {
        self.id
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn settings(&self) -> &MsrSettings {
        &self.settings
    }
    /// Longest length reached in the current measure by any voice.
    pub fn high_tide(&self) -> Duration {
        self.high_tide
    }
    pub fn current_measure_number(&self) -> Option<&str> {
        self.current_measure.as_ref().map(|(n, _)| n.as_str())
    }
    pub fn staves(&self) -> impl Iterator<Item = &Staff> {
        self.staves.values()
    }

    pub fn add_staff(&mut self, number: u32) -> MsrResult<&mut Staff> {
        if self.staves.contains_key(&number) {
            return Err(MsrError::DuplicateStaff(number));
        }
        let staff = Staff::new(self.id, number)
            .with_attributes(self.current_key, self.current_time.clone());
        Ok(self.staves.entry(number).or_insert(staff))
    }
    pub fn staff(&self, number: u32) -> MsrResult<&Staff> {
        self.staves.get(&number).ok_or(MsrError::UnknownStaff(number))
    }
    pub fn staff_mut(&mut self, number: u32) -> MsrResult<&mut Staff> {
        self.staves
            .get_mut(&number)
            .ok_or(MsrError::UnknownStaff(number))
    }
    pub fn add_voice(
        &mut self,
        staff: u32,
        voice: u32,
        kind: VoiceKind,
        ids: &mut IdGenerator,
    ) -> MsrResult<&mut Voice> {
        let settings = self.settings.clone();
        let current_measure = self.current_measure.clone();
        self.staff_mut(staff)?
            .add_voice(voice, kind, settings, current_measure, ids)
    }
    pub fn voice(&self, staff: u32, voice: u32) -> MsrResult<&Voice> {
        self.staff(staff)?.voice(voice)
    }
    pub fn voice_mut(&mut self, staff: u32, voice: u32) -> MsrResult<&mut Voice> {
        self.staff_mut(staff)?.voice_mut(voice)
    }

    fn for_each_voice(
        &mut self,
        mut f: impl FnMut(&mut Voice) -> MsrResult<()>,
    ) -> MsrResult<()> {
        self.staves
            .values_mut()
            .try_for_each(|s| s.for_each_voice(&mut f))
    }

    fn update_high_tide(&mut self, length: Duration) {
        if length > self.high_tide {
            if self.settings.trace_positions {
                debug!("{}: high tide {} -> {}", self.id, self.high_tide, length);
            }
            self.high_tide = length;
        }
    }

    /// Finish the current measure of every voice and open the next one.
    ///
    /// The high tide starts again from zero.
    pub fn create_measure(
        &mut self,
        number: impl Into<String>,
        ordinal: u32,
        ids: &mut IdGenerator,
    ) -> MsrResult<()> {
        let number = number.into();
        if self.settings.trace_measures {
            debug!("{}: measure {} ({})", self.id, number, ordinal);
        }
        let previous = self.high_tide;
        for staff in self.staves.values_mut() {
            staff.create_measure(&number, ordinal, previous, ids)?;
        }
        self.high_tide = Duration::zero();
        self.current_measure = Some((number, ordinal));
        Ok(())
    }

    pub fn append_clef(
        &mut self,
        staff: u32,
        clef: Clef,
        ids: &mut IdGenerator,
    ) -> MsrResult<()> {
        self.staff_mut(staff)?.append_clef(clef, ids)
    }
    pub fn append_key(&mut self, key: Key, ids: &mut IdGenerator) -> MsrResult<()> {
        self.current_key = Some(key);
        self.staves
            .values_mut()
            .try_for_each(|s| s.append_key(key, ids))
    }
    pub fn append_time(
        &mut self,
        time: TimeSignature,
        ids: &mut IdGenerator,
    ) -> MsrResult<()> {
        self.current_time = Some(time.clone());
        self.staves
            .values_mut()
            .try_for_each(|s| s.append_time(time.clone(), ids))
    }

    /// Barline for every voice. A right barline ends the measure, so the
    /// voices are padded to the high tide first.
    pub fn append_barline(
        &mut self,
        barline: Barline,
        ids: &mut IdGenerator,
    ) -> MsrResult<()> {
        if barline.location == BarlineLocation::Right {
            self.pad_up_to_high_tide(ids)?;
        }
        self.for_each_voice(|v| v.append_barline(barline.clone(), ids))
    }

    fn append_element(
        &mut self,
        staff: u32,
        voice: u32,
        element: MeasureElement,
        ids: &mut IdGenerator,
    ) -> MsrResult<Duration> {
        let length = self.voice_mut(staff, voice)?.append(element, ids)?;
        self.update_high_tide(length);
        Ok(length)
    }
    pub fn append_note(
        &mut self,
        staff: u32,
        voice: u32,
        note: Note,
        ids: &mut IdGenerator,
    ) -> MsrResult<Duration> {
        self.append_element(staff, voice, note.into(), ids)
    }
    /// Note sounding together with the previous one.
    pub fn append_chord_member(
        &mut self,
        staff: u32,
        voice: u32,
        note: Note,
        ids: &mut IdGenerator,
    ) -> MsrResult<Duration> {
        let length = self
            .voice_mut(staff, voice)?
            .append_chord_member(note, ids)?;
        self.update_high_tide(length);
        Ok(length)
    }
    pub fn append_chord(
        &mut self,
        staff: u32,
        voice: u32,
        chord: Chord,
        ids: &mut IdGenerator,
    ) -> MsrResult<Duration> {
        self.append_element(staff, voice, chord.into(), ids)
    }
    pub fn append_tuplet(
        &mut self,
        staff: u32,
        voice: u32,
        tuplet: Tuplet,
        ids: &mut IdGenerator,
    ) -> MsrResult<Duration> {
        self.append_element(staff, voice, tuplet.into(), ids)
    }
    pub fn append_double_tremolo(
        &mut self,
        staff: u32,
        voice: u32,
        tremolo: DoubleTremolo,
        ids: &mut IdGenerator,
    ) -> MsrResult<Duration> {
        self.append_element(staff, voice, tremolo.into(), ids)
    }
    pub fn append_grace_notes_group(
        &mut self,
        staff: u32,
        voice: u32,
        group: GraceNotesGroup,
        ids: &mut IdGenerator,
    ) -> MsrResult<Duration> {
        self.append_element(staff, voice, group.into(), ids)
    }
    pub fn append_harmony(
        &mut self,
        staff: u32,
        voice: u32,
        harmony: Harmony,
        ids: &mut IdGenerator,
    ) -> MsrResult<Duration> {
        self.append_element(staff, voice, harmony.into(), ids)
    }
    pub fn append_figured_bass(
        &mut self,
        staff: u32,
        voice: u32,
        figured_bass: FiguredBass,
        ids: &mut IdGenerator,
    ) -> MsrResult<Duration> {
        self.append_element(staff, voice, figured_bass.into(), ids)
    }

    /// Pad every voice shorter than the high tide with one rest (or skip).
    ///
    /// # Returns
    /// how many voices were padded.
    pub fn pad_up_to_high_tide(&mut self, ids: &mut IdGenerator) -> MsrResult<usize> {
        let high_tide = self.high_tide;
        let mut padded = 0;
        self.for_each_voice(|v| {
            if v.pad_up_to(high_tide, ids)? {
                padded += 1;
            }
            Ok(())
        })?;
        Ok(padded)
    }

    /// Front end moves back by `duration` to write another voice.
    ///
    /// The voice written so far is padded to the high tide first.
    ///
    /// # Returns
    /// the front end position after the move.
    pub fn handle_backup(
        &mut self,
        staff: u32,
        voice: u32,
        duration: Duration,
        ids: &mut IdGenerator,
    ) -> MsrResult<Duration> {
        let high_tide = self.high_tide;
        self.voice_mut(staff, voice)?.pad_up_to(high_tide, ids)?;
        high_tide.checked_sub(duration)
    }

    /// Front end moves forward by `duration` in a voice, leaving a gap.
    pub fn handle_forward(
        &mut self,
        staff: u32,
        voice: u32,
        duration: Duration,
        ids: &mut IdGenerator,
    ) -> MsrResult<Duration> {
        let length = self
            .voice_mut(staff, voice)?
            .append_padding(duration, ids)?;
        self.update_high_tide(length);
        Ok(length)
    }

    pub fn handle_repeat_start(&mut self, ids: &mut IdGenerator) -> MsrResult<()> {
        self.for_each_voice(|v| v.handle_repeat_start(ids))
    }
    pub fn handle_repeat_end(
        &mut self,
        times: u32,
        ids: &mut IdGenerator,
    ) -> MsrResult<()> {
        self.for_each_voice(|v| v.handle_repeat_end(times, ids))
    }
    pub fn handle_repeat_ending_start(
        &mut self,
        label: &str,
        ids: &mut IdGenerator,
    ) -> MsrResult<()> {
        self.for_each_voice(|v| v.handle_repeat_ending_start(label, ids))
    }
    pub fn append_repeat_ending(
        &mut self,
        label: &str,
        kind: EndingKind,
        ids: &mut IdGenerator,
    ) -> MsrResult<()> {
        self.for_each_voice(|v| v.append_repeat_ending(label, kind, ids))
    }
    pub fn begin_multiple_rest(
        &mut self,
        count: u32,
        ids: &mut IdGenerator,
    ) -> MsrResult<()> {
        self.for_each_voice(|v| v.begin_multiple_rest(count, ids))
    }
    pub fn set_next_measure_number(
        &mut self,
        number: &str,
        ids: &mut IdGenerator,
    ) -> MsrResult<()> {
        self.for_each_voice(|v| v.set_next_measure_number(number, ids))
    }
    pub fn begin_measures_repeat(
        &mut self,
        pattern_measures: usize,
        slashes: u32,
        ids: &mut IdGenerator,
    ) -> MsrResult<()> {
        self.for_each_voice(|v| {
            v.begin_measures_repeat(pattern_measures, slashes, ids)
        })
    }
    pub fn end_measures_repeat(&mut self, ids: &mut IdGenerator) -> MsrResult<()> {
        self.for_each_voice(|v| v.end_measures_repeat(ids))
    }

    pub fn finalize(&mut self, ids: &mut IdGenerator) -> MsrResult<()> {
        self.for_each_voice(|v| v.finalize(ids))
    }
}
