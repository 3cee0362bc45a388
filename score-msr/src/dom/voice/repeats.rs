//! Repeats, endings and measures repeats.
//!
//! A repeat start pushes a pending repeat: its common part becomes the
//! destination of closed elements, so repeats nest. A repeat end closes
//! the innermost pending repeat, or, without one, gathers everything after
//! the last repeat of the destination. The closed repeat stays open for
//! endings until music follows it or another structure starts.

use log::{debug, warn};

use crate::{
    dom::{EndingKind, MeasuresRepeat, Repeat, Segment, VoiceElement},
    error::{MsrError, MsrResult},
    ids::IdGenerator,
    primitives::RepeatProvenance,
};

use super::Voice;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RepeatPhase {
    #[default]
    Normal,
    /// A repeat was closed, endings may follow.
    AwaitingEnding,
    InEnding {
        label: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub(super) struct PendingMeasuresRepeat {
    pattern_measures: usize,
    slashes: u32,
    pattern: Segment,
}

impl Voice {
    fn trace_repeats(&self, message: &str) {
        if self.settings.trace_repeats {
            debug!("{}: {}", self.id, message);
        }
    }

    /// Repeat that can still receive endings.
    fn open_repeat_mut(&mut self) -> Option<&mut Repeat> {
        if self.repeat_phase == RepeatPhase::Normal {
            return None;
        }
        match self.destination_mut().last_mut() {
            Some(VoiceElement::Repeat(repeat)) => Some(repeat),
            _ => None,
        }
    }

    /// Forward repeat barline.
    pub fn handle_repeat_start(&mut self, ids: &mut IdGenerator) -> MsrResult<()> {
        if let RepeatPhase::InEnding { .. } = self.repeat_phase {
            return Err(MsrError::AlreadyOpen {
                structure: "repeat ending",
                voice: self.id,
            });
        }
        self.close_multiple_rest_early(ids);
        self.trace_repeats("repeat start");
        self.repeat_phase = RepeatPhase::Normal;
        let (closed, placeholder) = self.split_current_segment();
        if let Some(segment) = closed {
            self.push_closed(VoiceElement::Segment(segment));
        }
        self.pending_repeats.push(Repeat::new(2));
        self.open_segment(ids, placeholder, Some(RepeatProvenance::BeforeRepeat));
        Ok(())
    }

    /// Backward repeat barline.
    ///
    /// Inside an ending only the times are recorded.
    pub fn handle_repeat_end(
        &mut self,
        times: u32,
        ids: &mut IdGenerator,
    ) -> MsrResult<()> {
        if let RepeatPhase::InEnding { .. } = self.repeat_phase {
            if let Some(repeat) = self.open_repeat_mut() {
                repeat.set_times(times);
            }
            return Ok(());
        }
        self.close_multiple_rest_early(ids);
        self.trace_repeats("repeat end");
        let (closed, placeholder) = self.split_current_segment();
        let repeat = self.close_common_part(closed, times);
        if repeat.common_part().is_empty() {
            warn!(
                "{}: repeat end right after its start, dropping the repeat",
                self.id
            );
            self.repeat_phase = RepeatPhase::Normal;
            self.open_segment(ids, placeholder, None);
            return Ok(());
        }
        self.push_closed(VoiceElement::Repeat(repeat));
        self.repeat_phase = RepeatPhase::AwaitingEnding;
        self.open_segment(ids, placeholder, Some(RepeatProvenance::AfterRepeat));
        Ok(())
    }

    /// Take the innermost pending repeat, or build the one that implicitly
    /// started after the last repeat of the destination, and put `closed`
    /// at the end of its common part.
    fn close_common_part(&mut self, closed: Option<Segment>, times: u32) -> Repeat {
        let mut repeat = match self.pending_repeats.pop() {
            Some(repeat) => repeat,
            None => {
                let destination = self.destination_mut();
                let start = destination
                    .iter()
                    .rposition(|e| matches!(e, VoiceElement::Repeat(_)))
                    .map(|i| i + 1)
                    .unwrap_or(0);
                let mut repeat = Repeat::new(times);
                for element in destination.split_off(start) {
                    repeat.common_part_mut().push(element);
                }
                repeat
            }
        };
        repeat.set_times(times);
        if let Some(segment) = closed {
            repeat.common_part_mut().push(VoiceElement::Segment(segment));
        }
        repeat
    }

    /// Start of an ending bracket.
    ///
    /// Right after a repeat end it opens the next ending. Otherwise the
    /// music so far is the common part of a repeat whose first ending
    /// starts here.
    pub fn handle_repeat_ending_start(
        &mut self,
        label: impl Into<String>,
        ids: &mut IdGenerator,
    ) -> MsrResult<()> {
        let label = label.into();
        if let RepeatPhase::InEnding { .. } = self.repeat_phase {
            return Err(MsrError::AlreadyOpen {
                structure: "repeat ending",
                voice: self.id,
            });
        }
        self.close_multiple_rest_early(ids);
        match self.repeat_phase {
            RepeatPhase::AwaitingEnding if !self.current_has_music() => {
                self.trace_repeats(&format!("ending {label} start"));
            }
            _ => {
                self.trace_repeats(&format!("first ending {label} start"));
                let (closed, placeholder) = self.split_current_segment();
                let repeat = self.close_common_part(closed, 2);
                self.push_closed(VoiceElement::Repeat(repeat));
                self.open_segment(ids, placeholder, None);
            }
        }
        self.repeat_phase = RepeatPhase::InEnding { label };
        Ok(())
    }

    /// End of an ending bracket: the current segment becomes the ending.
    pub fn append_repeat_ending(
        &mut self,
        label: impl Into<String>,
        kind: EndingKind,
        ids: &mut IdGenerator,
    ) -> MsrResult<()> {
        let label = label.into();
        if self.open_repeat_mut().is_none() {
            return Err(MsrError::NoOpenRepeat {
                label,
                voice: self.id,
            });
        }
        self.trace_repeats(&format!("ending {label} ({kind:?})"));
        let (closed, placeholder) = self.split_current_segment();
        let segment =
            closed.unwrap_or_else(|| Segment::new(ids.next_segment(), self.id));
        if let Some(repeat) = self.open_repeat_mut() {
            repeat.add_ending(label, kind, segment);
        }
        self.repeat_phase = RepeatPhase::AwaitingEnding;
        self.open_segment(ids, placeholder, None);
        Ok(())
    }

    /// The last `pattern_measures` completed measures are repeated by the
    /// measures that follow, until [`Voice::end_measures_repeat`].
    pub fn begin_measures_repeat(
        &mut self,
        pattern_measures: usize,
        slashes: u32,
        ids: &mut IdGenerator,
    ) -> MsrResult<()> {
        if self.pending_measures_repeat.is_some() {
            return Err(MsrError::AlreadyOpen {
                structure: "measures repeat",
                voice: self.id,
            });
        }
        let available = self
            .current_segment
            .as_ref()
            .map(|s| s.measures().iter().filter(|m| !m.is_placeholder()).count())
            .unwrap_or(0);
        if pattern_measures == 0 || available < pattern_measures {
            return Err(MsrError::PatternTooShort {
                needed: pattern_measures,
                available,
                voice: self.id,
            });
        }
        self.trace_repeats(&format!("measures repeat of {pattern_measures}"));
        self.repeat_phase = RepeatPhase::Normal;
        let (closed, placeholder) = self.split_current_segment();
        let mut closed =
            closed.unwrap_or_else(|| Segment::new(ids.next_segment(), self.id));
        let pattern = closed.split_off_tail(pattern_measures, ids.next_segment());
        if !closed.is_empty() {
            self.push_closed(VoiceElement::Segment(closed));
        }
        self.pending_measures_repeat = Some(PendingMeasuresRepeat {
            pattern_measures,
            slashes,
            pattern,
        });
        self.open_segment(ids, placeholder, None);
        Ok(())
    }

    pub fn end_measures_repeat(&mut self, ids: &mut IdGenerator) -> MsrResult<()> {
        if self.pending_measures_repeat.is_none() {
            return Err(MsrError::NothingPending {
                structure: "measures repeat",
                voice: self.id,
            });
        }
        self.close_pending_measures_repeat(true, ids)
    }

    /// Current segment becomes the replicas. With `detach_next`, a
    /// placeholder opened for the following measure stays current.
    pub(super) fn close_pending_measures_repeat(
        &mut self,
        detach_next: bool,
        ids: &mut IdGenerator,
    ) -> MsrResult<()> {
        let Some(pattern_measures) = self
            .pending_measures_repeat
            .as_ref()
            .map(|p| p.pattern_measures)
        else {
            return Ok(());
        };
        let replica_measures = self
            .current_segment
            .as_ref()
            .map(|s| {
                let placeholder = detach_next
                    && s.last_measure().map(|m| m.is_placeholder()).unwrap_or(false);
                s.len() - placeholder as usize
            })
            .unwrap_or(0);
        MeasuresRepeat::check_replicas(pattern_measures, replica_measures)?;
        let Some(pending) = self.pending_measures_repeat.take() else {
            return Ok(());
        };
        let (replicas, next) = match detach_next {
            true => self.split_current_segment(),
            false => (self.current_segment.take(), None),
        };
        let replicas =
            replicas.unwrap_or_else(|| Segment::new(ids.next_segment(), self.id));
        let repeat = MeasuresRepeat::new(
            pending.pattern_measures,
            pending.slashes,
            pending.pattern,
            replicas,
        )?;
        self.push_closed(VoiceElement::MeasuresRepeat(repeat));
        self.open_segment(ids, next, None);
        Ok(())
    }
}
