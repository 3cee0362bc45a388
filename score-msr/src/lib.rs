//! Normalized in-memory score representation (MSR).
//!
//! A front end reading a score calls the mutators of [`dom::Part`] in
//! document order. Parts fan the calls out to their staves and voices,
//! voices carve their stream of measures into segments, repeats,
//! measures repeats and multiple rests, and the finished tree is handed to
//! a back end through [`visit`].
//!
//! ```
//! use score_msr::{
//!     dom::{Part, VoiceKind},
//!     ids::IdGenerator,
//!     primitives::{Duration, Note, NoteName, Pitch, TimeSignature},
//!     settings::MsrSettings,
//! };
//!
//! let mut ids = IdGenerator::new();
//! let mut part = Part::new(&mut ids, "P1", MsrSettings::default());
//! part.add_staff(1).unwrap();
//! part.add_voice(1, 1, VoiceKind::Regular, &mut ids).unwrap();
//! part.append_time(TimeSignature::new(3, 4), &mut ids).unwrap();
//! part.create_measure("1", 1, &mut ids).unwrap();
//! let c4 = Pitch::natural(NoteName::C, 4);
//! part.append_note(1, 1, Note::regular(c4, Duration::new(3, 4)), &mut ids)
//!     .unwrap();
//! assert_eq!(part.high_tide(), Duration::new(3, 4));
//! part.finalize(&mut ids).unwrap();
//! ```

pub mod dom;
pub mod error;
pub mod ids;
pub mod primitives;
pub mod settings;
pub mod skeleton;
pub mod visit;

pub use error::{MsrError, MsrResult};
