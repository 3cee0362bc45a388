//! Non-sounding measure content.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Clef {
    Treble,
    Bass,
    Alto,
    Tenor,
    Percussion,
    Tablature,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyMode {
    #[default]
    Major,
    Minor,
}

/// Traditional key, as circle-of-fifths position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key {
    pub fifths: i8,
    pub mode: KeyMode,
}
impl Key {
    pub fn new(fifths: i8, mode: KeyMode) -> Self {
        Self { fifths, mode }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BarlineLocation {
    Left,
    Middle,
    #[default]
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BarlineStyle {
    #[default]
    Regular,
    Dotted,
    Dashed,
    LightLight,
    LightHeavy,
    HeavyLight,
    HeavyHeavy,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepeatDirection {
    Forward,
    Backward,
}

/// Barline as written in the score.
///
/// Interpreting repeat barlines is the front end's job: it turns them into
/// the structural calls of [`crate::dom::Part`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Barline {
    pub location: BarlineLocation,
    pub style: BarlineStyle,
    pub repeat: Option<RepeatDirection>,
    pub times: Option<u32>,
}
impl Barline {
    pub fn new(location: BarlineLocation, style: BarlineStyle) -> Self {
        Self {
            location,
            style,
            repeat: None,
            times: None,
        }
    }
    pub fn backward_repeat(times: u32) -> Self {
        Self {
            location: BarlineLocation::Right,
            style: BarlineStyle::LightHeavy,
            repeat: Some(RepeatDirection::Backward),
            times: Some(times),
        }
    }
    pub fn forward_repeat() -> Self {
        Self {
            location: BarlineLocation::Left,
            style: BarlineStyle::HeavyLight,
            repeat: Some(RepeatDirection::Forward),
            times: None,
        }
    }
}
