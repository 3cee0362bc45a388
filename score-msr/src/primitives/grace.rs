use super::{measure::MeasureUplink, Duration, Note, NoteKind};

/// Grace notes attached before the next note. They take no time.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GraceNotesGroup {
    notes: Vec<Note>,
    slashed: bool,
}
impl GraceNotesGroup {
    pub fn new(slashed: bool) -> Self {
        Self {
            notes: Vec::new(),
            slashed,
        }
    }
    pub fn add_note(&mut self, mut note: Note) {
        note.set_kind(match note.kind() {
            NoteKind::Skip | NoteKind::GraceSkip => NoteKind::GraceSkip,
            _ => NoteKind::InGraceNotesGroup,
        });
        note.set_sounding(Duration::zero());
        self.notes.push(note);
    }
    pub fn notes(&self) -> &Vec<Note> {
        &self.notes
    }
    pub fn is_slashed(&self) -> bool {
        self.slashed
    }

    pub(crate) fn set_position(&mut self, position: Duration) {
        self.notes.iter_mut().for_each(|n| n.set_position(position));
    }
    pub(crate) fn set_measure_uplink(&mut self, uplink: &MeasureUplink) {
        self.notes.iter_mut().for_each(|n| n.set_measure_uplink(uplink));
    }
}
