use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NoteName {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Accidental {
    DoubleFlat,
    Flat,
    #[default]
    Natural,
    Sharp,
    DoubleSharp,
}

pub type Octave = i8;

/// Spelled pitch, as delivered by the front end.
///
/// Spelling is not checked here: the pitch only travels with its note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pitch {
    pub name: NoteName,
    pub accidental: Accidental,
    pub octave: Octave,
}
impl Pitch {
    pub fn new(name: NoteName, accidental: Accidental, octave: Octave) -> Self {
        Self {
            name,
            accidental,
            octave,
        }
    }
    pub fn natural(name: NoteName, octave: Octave) -> Self {
        Self::new(name, Accidental::Natural, octave)
    }
}
impl Display for Pitch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let accidental = match self.accidental {
            Accidental::DoubleFlat => "bb",
            Accidental::Flat => "b",
            Accidental::Natural => "",
            Accidental::Sharp => "#",
            Accidental::DoubleSharp => "##",
        };
        write!(f, "{:?}{}{}", self.name, accidental, self.octave)
    }
}

#[cfg(test)]
#[test]
fn test_pitch_display() {
    let a = Pitch::new(NoteName::F, Accidental::Sharp, 4);
    let b = Pitch::natural(NoteName::B, 3);
    let c = Pitch::new(NoteName::E, Accidental::DoubleFlat, 5);
    assert_eq!(a.to_string(), "F#4");
    assert_eq!(b.to_string(), "B3");
    assert_eq!(c.to_string(), "Ebb5");
    assert_ne!(a, b);
}
