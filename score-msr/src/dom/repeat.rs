use crate::primitives::Measure;

use super::{Segment, VoiceElement};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndingKind {
    Hooked,
    Hookless,
}

/// Music played on every pass of a repeat.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RepeatCommonPart {
    elements: Vec<VoiceElement>,
}
impl RepeatCommonPart {
    pub fn elements(&self) -> &Vec<VoiceElement> {
        &self.elements
    }
    pub fn is_empty(&self) -> bool {
        self.elements.iter().all(|e| e.measures().is_empty())
    }
    pub(crate) fn push(&mut self, element: VoiceElement) {
        self.elements.push(element);
    }
    pub(crate) fn elements_mut(&mut self) -> &mut Vec<VoiceElement> {
        &mut self.elements
    }
    pub(crate) fn take_elements(&mut self) -> Vec<VoiceElement> {
        std::mem::take(&mut self.elements)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RepeatEnding {
    label: String,
    kind: EndingKind,
    /// 1-based, in the order endings were appended.
    number: u32,
    segment: Segment,
}
impl RepeatEnding {
    pub fn label(&self) -> &str {
        &self.label
    }
    pub fn kind(&self) -> EndingKind {
        self.kind
    }
    pub fn number(&self) -> u32 {
        self.number
    }
    pub fn segment(&self) -> &Segment {
        &self.segment
    }
}

/// Common part played `times` times, with optional alternative endings.
#[derive(Debug, Clone, PartialEq)]
pub struct Repeat {
    times: u32,
    common_part: RepeatCommonPart,
    endings: Vec<RepeatEnding>,
}
impl Repeat {
    pub fn new(times: u32) -> Self {
        Self {
            times,
            common_part: RepeatCommonPart::default(),
            endings: Vec::new(),
        }
    }
    pub fn times(&self) -> u32 {
        self.times
    }
    pub fn common_part(&self) -> &RepeatCommonPart {
        &self.common_part
    }
    pub fn endings(&self) -> &Vec<RepeatEnding> {
        &self.endings
    }
    /// Common part measures, then every ending's.
    pub fn measures(&self) -> Vec<&Measure> {
        self.common_part
            .elements()
            .iter()
            .flat_map(|e| e.measures())
            .chain(
                self.endings
                    .iter()
                    .flat_map(|e| e.segment.measures().iter()),
            )
            .collect()
    }

    pub(crate) fn set_times(&mut self, times: u32) {
        self.times = times;
    }
    pub(crate) fn common_part_mut(&mut self) -> &mut RepeatCommonPart {
        &mut self.common_part
    }
    pub(crate) fn add_ending(
        &mut self,
        label: impl Into<String>,
        kind: EndingKind,
        segment: Segment,
    ) {
        let number = self.endings.len() as u32 + 1;
        self.endings.push(RepeatEnding {
            label: label.into(),
            kind,
            number,
            segment,
        });
    }
}
