//! Elements, from which the score is built.
//!
//! Durations are exact fractions of a whole note. Notes are grouped into
//! chords, tuplets and tremolos, which are appended to Measures together
//! with clefs, keys, times and barlines. Measures are then organized by
//! [`crate::dom`].

pub mod chord;
pub mod duration;
pub mod event;
pub mod fraction_tools;
pub mod grace;
pub mod harmony;
pub mod marks;
pub mod measure;
pub mod note;
pub mod pitch;
pub mod time_signature;
pub mod tremolo;
pub mod tuplet;

pub use chord::Chord;
pub use duration::Duration;
pub use event::MeasureElement;
pub use grace::GraceNotesGroup;
pub use harmony::{FiguredBass, Harmony};
pub use marks::{
    Barline, BarlineLocation, BarlineStyle, Clef, Key, KeyMode,
    RepeatDirection,
};
pub use measure::{Measure, MeasureKind, MeasureUplink, RepeatProvenance};
pub use note::{Note, NoteKind};
pub use pitch::{Accidental, NoteName, Octave, Pitch};
pub use time_signature::TimeSignature;
pub use tremolo::{DoubleTremolo, TremoloElement};
pub use tuplet::{Tuplet, TupletMember};
