use std::collections::BTreeMap;

use crate::{
    error::{MsrError, MsrResult},
    ids::{IdGenerator, PartId, VoiceId},
    primitives::{Clef, Duration, Key, TimeSignature},
    settings::MsrSettings,
};

use super::{Voice, VoiceKind};

/// Voices sharing one staff, with the staff-wide clef, key and time.
#[derive(Debug, Clone, PartialEq)]
pub struct Staff {
    part: PartId,
    number: u32,
    voices: BTreeMap<u32, Voice>,
    current_clef: Option<Clef>,
    current_key: Option<Key>,
    current_time: Option<TimeSignature>,
}
impl Staff {
    pub fn new(part: PartId, number: u32) -> Self {
        Self {
            part,
            number,
            voices: BTreeMap::new(),
            current_clef: None,
            current_key: None,
            current_time: None,
        }
    }

    /// Staff added to a part that already has a key or a time.
    pub(crate) fn with_attributes(
        mut self,
        key: Option<Key>,
        time: Option<TimeSignature>,
    ) -> Self {
        self.current_key = key;
        self.current_time = time;
        self
    }

    pub fn number(&self) -> u32 {
        self.number
    }
    pub fn voices(&self) -> impl Iterator<Item = &Voice> {
        self.voices.values()
    }
    pub fn current_clef(&self) -> Option<Clef> {
        self.current_clef
    }
    pub fn current_key(&self) -> Option<Key> {
        self.current_key
    }
    pub fn current_time(&self) -> Option<&TimeSignature> {
        self.current_time.as_ref()
    }

    /// New voice starts with the current clef, key and time of the staff,
    /// in the measure the part is currently in.
    pub fn add_voice(
        &mut self,
        number: u32,
        kind: VoiceKind,
        settings: MsrSettings,
        current_measure: Option<(String, u32)>,
        ids: &mut IdGenerator,
    ) -> MsrResult<&mut Voice> {
        if self.voices.contains_key(&number) {
            return Err(MsrError::DuplicateVoice {
                staff: self.number,
                voice: number,
            });
        }
        let mut voice =
            Voice::new(VoiceId::new(self.part, self.number, number), kind, settings);
        if let Some((measure_number, ordinal)) = current_measure {
            voice.set_current_measure_number(measure_number, ordinal);
        }
        if let Some(clef) = self.current_clef {
            voice.append_clef(clef, ids)?;
        }
        if let Some(key) = self.current_key {
            voice.append_key(key, ids)?;
        }
        if let Some(time) = &self.current_time {
            voice.append_time(time.clone(), ids)?;
        }
        Ok(self.voices.entry(number).or_insert(voice))
    }
    pub fn voice(&self, number: u32) -> MsrResult<&Voice> {
        self.voices.get(&number).ok_or(MsrError::UnknownVoice {
            staff: self.number,
            voice: number,
        })
    }
    pub fn voice_mut(&mut self, number: u32) -> MsrResult<&mut Voice> {
        self.voices.get_mut(&number).ok_or(MsrError::UnknownVoice {
            staff: self.number,
            voice: number,
        })
    }

    /// Apply `f` to every voice, stopping at the first error.
    pub(crate) fn for_each_voice(
        &mut self,
        mut f: impl FnMut(&mut Voice) -> MsrResult<()>,
    ) -> MsrResult<()> {
        self.voices.values_mut().try_for_each(|v| f(v))
    }

    pub fn append_clef(&mut self, clef: Clef, ids: &mut IdGenerator) -> MsrResult<()> {
        self.current_clef = Some(clef);
        self.for_each_voice(|v| v.append_clef(clef, ids))
    }
    pub fn append_key(&mut self, key: Key, ids: &mut IdGenerator) -> MsrResult<()> {
        self.current_key = Some(key);
        self.for_each_voice(|v| v.append_key(key, ids))
    }
    pub fn append_time(
        &mut self,
        time: TimeSignature,
        ids: &mut IdGenerator,
    ) -> MsrResult<()> {
        self.current_time = Some(time.clone());
        self.for_each_voice(|v| v.append_time(time.clone(), ids))
    }

    pub fn create_measure(
        &mut self,
        number: &str,
        ordinal: u32,
        previous_high_tide: Duration,
        ids: &mut IdGenerator,
    ) -> MsrResult<()> {
        self.for_each_voice(|v| {
            v.create_measure(number, ordinal, previous_high_tide, ids)
        })
    }
}
