//! Score structure above the measure.
//!
//! Score → Part → Staff → Voice. A voice is a sequence of
//! [`VoiceElement`]: plain segments of measures, repeats, multiple rests
//! and measures repeats. The voice builds that sequence while measures
//! arrive one by one, restructuring it when the front end reports a
//! repeat or a rest compression. See [`Voice`].

pub mod measures_repeat;
pub mod multiple_rest;
pub mod part;
pub mod repeat;
pub mod score;
pub mod segment;
pub mod staff;
pub mod voice;

pub use measures_repeat::MeasuresRepeat;
pub use multiple_rest::MultipleRest;
pub use part::Part;
pub use repeat::{EndingKind, Repeat, RepeatCommonPart, RepeatEnding};
pub use score::Score;
pub use segment::Segment;
pub use staff::Staff;
pub use voice::{RepeatPhase, Voice};

use crate::primitives::Measure;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VoiceKind {
    #[default]
    Regular,
    Harmony,
    FiguredBass,
}

#[derive(Debug, Clone, PartialEq)]
pub enum VoiceElement {
    Segment(Segment),
    Repeat(Repeat),
    MeasuresRepeat(MeasuresRepeat),
    MultipleRest(MultipleRest),
}
impl VoiceElement {
    /// All measures, in document order.
    pub fn measures(&self) -> Vec<&Measure> {
        match self {
            Self::Segment(s) => s.measures().iter().collect(),
            Self::Repeat(r) => r.measures(),
            Self::MeasuresRepeat(r) => r
                .pattern()
                .measures()
                .iter()
                .chain(r.replicas().measures().iter())
                .collect(),
            Self::MultipleRest(r) => r.contents().measures().iter().collect(),
        }
    }
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Segment(_) => "segment",
            Self::Repeat(_) => "repeat",
            Self::MeasuresRepeat(_) => "measures repeat",
            Self::MultipleRest(_) => "multiple rest",
        }
    }
}
