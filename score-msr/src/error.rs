//! Fatal errors of the model.
//!
//! Every variant means the driving front end and this crate went out of
//! sync: the front end is expected to abort on them. Recoverable
//! situations (empty measures, redundant markers, overfull measures) are
//! only logged.

use crate::{ids::VoiceId, primitives::Duration};

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum MsrError {
    #[error(
        "Duration mismatch in {container}: expected {expected}, found {found}"
    )]
    DurationMismatch {
        container: &'static str,
        expected: Duration,
        found: Duration,
    },
    #[error(
        "Double tremolo repeat count is not an integer: \
        {combined} / {element} / 2"
    )]
    TremoloRepeatCount { combined: Duration, element: Duration },
    #[error("Double tremolo is missing its {0} element")]
    TremoloIncomplete(&'static str),
    #[error("Chord needs at least two notes, found {0}")]
    ChordTooSmall(usize),
    #[error("Element not found in measure {measure}: {element}")]
    ElementNotFound { measure: String, element: String },
    #[error("Unexpected element: expected {expected}, found {found}")]
    UnexpectedElement {
        expected: &'static str,
        found: String,
    },
    #[error("Duration can not be negative: {left} - {right}")]
    NegativeDuration { left: Duration, right: Duration },
    #[error("A {structure} is already open in voice {voice}")]
    AlreadyOpen {
        structure: &'static str,
        voice: VoiceId,
    },
    #[error("No {structure} is pending in voice {voice}")]
    NothingPending {
        structure: &'static str,
        voice: VoiceId,
    },
    #[error("No open repeat can receive ending `{label}` in voice {voice}")]
    NoOpenRepeat { label: String, voice: VoiceId },
    #[error(
        "Measures repeat needs {needed} pattern measures, \
        voice {voice} has {available}"
    )]
    PatternTooShort {
        needed: usize,
        available: usize,
        voice: VoiceId,
    },
    #[error(
        "Measures repeat replicas ({replicas} measures) are not a \
        multiple of its pattern ({pattern} measures)"
    )]
    UnevenReplicas { pattern: usize, replicas: usize },
    #[error("Unknown staff {0}")]
    UnknownStaff(u32),
    #[error("Unknown voice {voice} in staff {staff}")]
    UnknownVoice { staff: u32, voice: u32 },
    #[error("Staff {0} already exists")]
    DuplicateStaff(u32),
    #[error("Voice {voice} already exists in staff {staff}")]
    DuplicateVoice { staff: u32, voice: u32 },
    #[error("Voice {0} has no current measure")]
    NoCurrentMeasure(VoiceId),
}

pub type MsrResult<T> = Result<T, MsrError>;
