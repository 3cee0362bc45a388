//! Multiple rest compression.
//!
//! The front end announces the rest with its measure count, keeps sending
//! the rest measures, and closes it by announcing the number of the
//! measure that follows. A repeat boundary met while the rest is pending
//! closes it early; the number announced afterwards is then recorded on
//! the rest already in place.

use log::{debug, warn};

use crate::{
    dom::{MultipleRest, Segment, VoiceElement},
    error::{MsrError, MsrResult},
    ids::IdGenerator,
    primitives::Duration,
};

use super::{RepeatPhase, Voice};

#[derive(Debug, Clone, PartialEq)]
pub(super) struct PendingMultipleRest {
    count: u32,
    measure_sounding: Duration,
}

/// Last multiple rest without a next measure number in `elements`,
/// looking into repeat common parts.
fn unnumbered_rest_mut(
    elements: &mut [VoiceElement],
) -> Option<&mut MultipleRest> {
    elements.iter_mut().rev().find_map(|element| match element {
        VoiceElement::MultipleRest(rest)
            if rest.next_measure_number().is_none() =>
        {
            Some(rest)
        }
        VoiceElement::Repeat(repeat) => {
            unnumbered_rest_mut(repeat.common_part_mut().elements_mut())
        }
        _ => None,
    })
}

impl Voice {
    pub fn begin_multiple_rest(
        &mut self,
        count: u32,
        ids: &mut IdGenerator,
    ) -> MsrResult<()> {
        if !self.settings.compress_multiple_rests {
            return Ok(());
        }
        if let RepeatPhase::InEnding { label } = &self.repeat_phase {
            warn!(
                "{}: multiple rest inside ending {} is left uncompressed",
                self.id, label
            );
            return Ok(());
        }
        if self.pending_multiple_rest.is_some() {
            return Err(MsrError::AlreadyOpen {
                structure: "multiple rest",
                voice: self.id,
            });
        }
        if self.settings.trace_multiple_rests {
            debug!("{}: multiple rest of {} measures", self.id, count);
        }
        self.repeat_phase = RepeatPhase::Normal;
        self.rest_awaiting_number = false;
        let (closed, placeholder) = self.split_current_segment();
        if let Some(segment) = closed {
            self.push_closed(VoiceElement::Segment(segment));
        }
        self.pending_multiple_rest = Some(PendingMultipleRest {
            count,
            measure_sounding: self.current_time.whole_notes_per_measure(),
        });
        self.open_segment(ids, placeholder, None);
        Ok(())
    }

    /// Number of the measure after the multiple rest. Closes the rest.
    ///
    /// Ignored when no multiple rest is pending or waiting for it.
    pub fn set_next_measure_number(
        &mut self,
        number: impl Into<String>,
        ids: &mut IdGenerator,
    ) -> MsrResult<()> {
        if self.pending_multiple_rest.is_some() {
            self.close_multiple_rest(Some(number.into()), true, ids);
            return Ok(());
        }
        if !self.rest_awaiting_number {
            return Ok(());
        }
        self.rest_awaiting_number = false;
        let number = number.into();
        let rest = self
            .pending_repeats
            .iter_mut()
            .rev()
            .find_map(|r| {
                unnumbered_rest_mut(r.common_part_mut().elements_mut())
            })
            .or_else(|| unnumbered_rest_mut(&mut self.initial_elements));
        match rest {
            Some(rest) => rest.set_next_measure_number(number),
            None => {
                warn!("{}: no multiple rest for next measure {}", self.id, number)
            }
        }
        Ok(())
    }

    /// Close a pending multiple rest before a repeat boundary reshapes
    /// the voice. The placeholder of the next measure stays current.
    pub(super) fn close_multiple_rest_early(&mut self, ids: &mut IdGenerator) {
        if self.pending_multiple_rest.is_none() {
            return;
        }
        if self.settings.trace_multiple_rests {
            debug!("{}: repeat boundary closes the multiple rest", self.id);
        }
        self.close_multiple_rest(None, true, ids);
        self.rest_awaiting_number = true;
    }

    /// Current segment becomes the contents. With `detach_next`, the
    /// measure opened after the rest stays current.
    pub(super) fn close_multiple_rest(
        &mut self,
        next_number: Option<String>,
        detach_next: bool,
        ids: &mut IdGenerator,
    ) {
        let Some(pending) = self.pending_multiple_rest.take() else {
            return;
        };
        let (contents, next) = match detach_next {
            true => self.split_current_segment(),
            false => (self.current_segment.take(), None),
        };
        let contents =
            contents.unwrap_or_else(|| Segment::new(ids.next_segment(), self.id));
        if contents.len() != pending.count as usize {
            warn!(
                "{}: multiple rest of {} measures holds {}",
                self.id,
                pending.count,
                contents.len()
            );
        }
        if self.settings.trace_multiple_rests {
            debug!(
                "{}: multiple rest closed, next measure {:?}",
                self.id, next_number
            );
        }
        let rest = MultipleRest::new(
            pending.count,
            pending.measure_sounding,
            contents,
            next_number,
        );
        self.push_closed(VoiceElement::MultipleRest(rest));
        self.open_segment(ids, next, None);
    }
}
