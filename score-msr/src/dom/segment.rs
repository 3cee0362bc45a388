use crate::{
    ids::{SegmentId, VoiceId},
    primitives::Measure,
};

/// Run of consecutive measures of one voice.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    id: SegmentId,
    voice: VoiceId,
    measures: Vec<Measure>,
}
impl Segment {
    pub fn new(id: SegmentId, voice: VoiceId) -> Self {
        Self {
            id,
            voice,
            measures: Vec::new(),
        }
    }

    pub fn id(&self) -> SegmentId {
        self.id
    }
    pub fn voice(&self) -> VoiceId {
        self.voice
    }
    pub fn measures(&self) -> &Vec<Measure> {
        &self.measures
    }
    pub fn len(&self) -> usize {
        self.measures.len()
    }
    pub fn is_empty(&self) -> bool {
        self.measures.is_empty()
    }
    pub fn last_measure(&self) -> Option<&Measure> {
        self.measures.last()
    }
    pub fn last_measure_mut(&mut self) -> Option<&mut Measure> {
        self.measures.last_mut()
    }

    pub fn append_measure(&mut self, mut measure: Measure) {
        measure.set_segment_uplink(self.id);
        measure.set_voice_uplink(self.voice);
        self.measures.push(measure);
    }

    /// Detach the trailing measure if nothing sounding was put in it.
    pub(crate) fn take_placeholder(&mut self) -> Option<Measure> {
        match self.measures.last() {
            Some(m) if m.is_placeholder() => self.measures.pop(),
            _ => None,
        }
    }
    pub(crate) fn pop_measure(&mut self) -> Option<Measure> {
        self.measures.pop()
    }

    /// Move the last `count` measures to a new segment.
    pub(crate) fn split_off_tail(&mut self, count: usize, id: SegmentId) -> Segment {
        let at = self.measures.len().saturating_sub(count);
        let mut tail = Segment::new(id, self.voice);
        for measure in self.measures.split_off(at) {
            tail.append_measure(measure);
        }
        tail
    }
}
