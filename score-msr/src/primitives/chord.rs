use crate::error::{MsrError, MsrResult};

use super::{measure::MeasureUplink, Duration, Note};

/// Notes sharing one onset.
///
/// Sounding and display durations are those of the first note; every
/// further note must sound exactly as long.
#[derive(Debug, Clone, PartialEq)]
pub struct Chord {
    notes: Vec<Note>,
    sounding: Duration,
    display: Duration,
    position: Duration,
}
impl Chord {
    pub fn new(mut first: Note) -> Self {
        first.enter_chord();
        Self {
            sounding: first.sounding(),
            display: first.display(),
            position: first.position(),
            notes: vec![first],
        }
    }
    pub fn with_notes(notes: impl IntoIterator<Item = Note>) -> MsrResult<Self> {
        let mut notes = notes.into_iter();
        let mut chord = Self::new(notes.next().ok_or(MsrError::ChordTooSmall(0))?);
        for note in notes {
            chord.add_note(note)?;
        }
        Ok(chord)
    }
    pub fn add_note(&mut self, mut note: Note) -> MsrResult<()> {
        if note.sounding() != self.sounding {
            return Err(MsrError::DurationMismatch {
                container: "chord",
                expected: self.sounding,
                found: note.sounding(),
            });
        }
        note.enter_chord();
        note.set_position(self.position);
        if let Some(uplink) = self.notes[0].measure_uplink().cloned() {
            note.set_measure_uplink(&uplink);
        }
        self.notes.push(note);
        Ok(())
    }

    pub fn notes(&self) -> &Vec<Note> {
        &self.notes
    }
    pub fn sounding(&self) -> Duration {
        self.sounding
    }
    pub fn display(&self) -> Duration {
        self.display
    }
    pub fn position(&self) -> Duration {
        self.position
    }

    pub(crate) fn set_position(&mut self, position: Duration) {
        self.position = position;
        self.notes.iter_mut().for_each(|n| n.set_position(position));
    }
    pub(crate) fn set_measure_uplink(&mut self, uplink: &MeasureUplink) {
        self.notes.iter_mut().for_each(|n| n.set_measure_uplink(uplink));
    }
    pub(crate) fn enter_tuplet(&mut self, ratio: Duration) {
        self.sounding = self.display * ratio;
        for note in self.notes.iter_mut() {
            note.enter_tuplet();
            note.set_sounding(note.display() * ratio);
        }
    }
    pub(crate) fn scale_sounding(&mut self, ratio: Duration) {
        self.sounding = self.sounding * ratio;
        for note in self.notes.iter_mut() {
            note.set_sounding(note.sounding() * ratio);
        }
    }
}
