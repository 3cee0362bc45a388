//! Identifiers handed out while the score is built.
//!
//! Containers refer to their owners through these ids rather than through
//! references, so moving a measure from one segment to another only needs
//! the segment id updated.

use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PartId(u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SegmentId(u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MeasureId(u32);

/// Position of a voice in the part → staff → voice hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VoiceId {
    pub part: PartId,
    pub staff: u32,
    pub voice: u32,
}
impl VoiceId {
    pub fn new(part: PartId, staff: u32, voice: u32) -> Self {
        Self { part, staff, voice }
    }
}

impl Display for PartId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "part#{}", self.0)
    }
}
impl Display for SegmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "segment#{}", self.0)
    }
}
impl Display for MeasureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "measure#{}", self.0)
    }
}
impl Display for VoiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/staff {}/voice {}", self.part, self.staff, self.voice)
    }
}

/// Monotonic sequence numbers, shared by everything built from one input.
///
/// Passed explicitly to every operation that creates parts, segments or
/// measures.
#[derive(Debug, Default)]
pub struct IdGenerator {
    parts: u32,
    segments: u32,
    measures: u32,
}
impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn next_part(&mut self) -> PartId {
        self.parts += 1;
        PartId(self.parts)
    }
    pub fn next_segment(&mut self) -> SegmentId {
        self.segments += 1;
        SegmentId(self.segments)
    }
    pub fn next_measure(&mut self) -> MeasureId {
        self.measures += 1;
        MeasureId(self.measures)
    }
}

#[cfg(test)]
mod tests {
    use super::IdGenerator;

    #[test]
    fn sequences_are_independent_and_increasing() {
        let mut ids = IdGenerator::new();
        let s1 = ids.next_segment();
        let m1 = ids.next_measure();
        let s2 = ids.next_segment();
        assert!(s1 < s2);
        assert_eq!(m1.to_string(), "measure#1");
        assert_eq!(s2.to_string(), "segment#2");
        assert_eq!(ids.next_part().to_string(), "part#1");
    }
}
