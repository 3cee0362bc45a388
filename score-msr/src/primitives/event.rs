//! Everything a measure can hold.
use std::fmt::Display;

use super::{
    measure::MeasureUplink, Barline, Chord, Clef, DoubleTremolo, Duration,
    FiguredBass, GraceNotesGroup, Harmony, Key, Note, TimeSignature, Tuplet,
};

/// Measure content, in the order it was appended.
///
/// Marks carry their own position, musical elements keep it inside.
#[derive(Debug, Clone, PartialEq)]
pub enum MeasureElement {
    Note(Note),
    Chord(Chord),
    Tuplet(Tuplet),
    DoubleTremolo(DoubleTremolo),
    GraceNotesGroup(GraceNotesGroup),
    Harmony(Harmony),
    FiguredBass(FiguredBass),
    Clef { clef: Clef, position: Duration },
    Key { key: Key, position: Duration },
    Time { time: TimeSignature, position: Duration },
    Barline { barline: Barline, position: Duration },
}
impl MeasureElement {
    /// Time the element takes in its measure.
    pub fn sounding(&self) -> Duration {
        match self {
            Self::Note(n) => n.sounding(),
            Self::Chord(c) => c.sounding(),
            Self::Tuplet(t) => t.sounding(),
            Self::DoubleTremolo(t) => t.sounding(),
            Self::Harmony(h) => h.sounding(),
            Self::FiguredBass(f) => f.sounding(),
            Self::GraceNotesGroup(_)
            | Self::Clef { .. }
            | Self::Key { .. }
            | Self::Time { .. }
            | Self::Barline { .. } => Duration::zero(),
        }
    }

    pub fn position(&self) -> Duration {
        match self {
            Self::Note(n) => n.position(),
            Self::Chord(c) => c.position(),
            Self::Tuplet(t) => t.position(),
            Self::DoubleTremolo(t) => t.position(),
            Self::Harmony(h) => h.position(),
            Self::FiguredBass(f) => f.position(),
            Self::GraceNotesGroup(g) => g
                .notes()
                .first()
                .map(|n| n.position())
                .unwrap_or_default(),
            Self::Clef { position, .. }
            | Self::Key { position, .. }
            | Self::Time { position, .. }
            | Self::Barline { position, .. } => *position,
        }
    }

    /// Anything that is not a clef, key, time or barline.
    pub fn is_musical(&self) -> bool {
        !matches!(
            self,
            Self::Clef { .. }
                | Self::Key { .. }
                | Self::Time { .. }
                | Self::Barline { .. }
        )
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Note(_) => "note",
            Self::Chord(_) => "chord",
            Self::Tuplet(_) => "tuplet",
            Self::DoubleTremolo(_) => "double tremolo",
            Self::GraceNotesGroup(_) => "grace notes group",
            Self::Harmony(_) => "harmony",
            Self::FiguredBass(_) => "figured bass",
            Self::Clef { .. } => "clef",
            Self::Key { .. } => "key",
            Self::Time { .. } => "time",
            Self::Barline { .. } => "barline",
        }
    }

    pub(crate) fn set_position(&mut self, new: Duration) {
        match self {
            Self::Note(n) => n.set_position(new),
            Self::Chord(c) => c.set_position(new),
            Self::Tuplet(t) => t.set_position(new),
            Self::DoubleTremolo(t) => t.set_position(new),
            Self::GraceNotesGroup(g) => g.set_position(new),
            Self::Harmony(h) => h.set_position(new),
            Self::FiguredBass(f) => f.set_position(new),
            Self::Clef { position, .. }
            | Self::Key { position, .. }
            | Self::Time { position, .. }
            | Self::Barline { position, .. } => *position = new,
        }
    }

    pub(crate) fn set_measure_uplink(&mut self, uplink: &MeasureUplink) {
        match self {
            Self::Note(n) => n.set_measure_uplink(uplink),
            Self::Chord(c) => c.set_measure_uplink(uplink),
            Self::Tuplet(t) => t.set_measure_uplink(uplink),
            Self::DoubleTremolo(t) => t.set_measure_uplink(uplink),
            Self::GraceNotesGroup(g) => g.set_measure_uplink(uplink),
            _ => (),
        }
    }
}
impl Display for MeasureElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Note(n) => write!(f, "{n}"),
            Self::Chord(c) => {
                let notes: Vec<String> =
                    c.notes().iter().map(|n| n.to_string()).collect();
                write!(f, "<{}>", notes.join(" "))
            }
            Self::Tuplet(t) => write!(
                f,
                "tuplet {}:{} ({} members)",
                t.actual_notes(),
                t.normal_notes(),
                t.members().len()
            ),
            Self::DoubleTremolo(t) => {
                write!(f, "double tremolo {} marks:{}", t.marks(), t.sounding())
            }
            Self::GraceNotesGroup(g) => {
                write!(f, "grace notes ({})", g.notes().len())
            }
            Self::Harmony(h) => write!(f, "harmony {}:{}", h.text, h.sounding()),
            Self::FiguredBass(fb) => {
                write!(f, "figured bass {}:{}", fb.figures.join(","), fb.sounding())
            }
            Self::Clef { clef, .. } => write!(f, "clef {clef:?}"),
            Self::Key { key, .. } => {
                write!(f, "key {} {:?}", key.fifths, key.mode)
            }
            Self::Time { time, .. } => write!(f, "time {time}"),
            Self::Barline { barline, .. } => {
                write!(f, "barline {:?}", barline.style)
            }
        }
    }
}
impl From<Note> for MeasureElement {
    fn from(value: Note) -> Self {
        Self::Note(value)
    }
}
impl From<Chord> for MeasureElement {
    fn from(value: Chord) -> Self {
        Self::Chord(value)
    }
}
impl From<Tuplet> for MeasureElement {
    fn from(value: Tuplet) -> Self {
        Self::Tuplet(value)
    }
}
impl From<DoubleTremolo> for MeasureElement {
    fn from(value: DoubleTremolo) -> Self {
        Self::DoubleTremolo(value)
    }
}
impl From<GraceNotesGroup> for MeasureElement {
    fn from(value: GraceNotesGroup) -> Self {
        Self::GraceNotesGroup(value)
    }
}
impl From<Harmony> for MeasureElement {
    fn from(value: Harmony) -> Self {
        Self::Harmony(value)
    }
}
impl From<FiguredBass> for MeasureElement {
    fn from(value: FiguredBass) -> Self {
        Self::FiguredBass(value)
    }
}
