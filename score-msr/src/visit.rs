//! Traversal of the finished tree.
//!
//! Every node is entered, its children are walked in document order, then
//! it is left. Repeat common parts and endings, measures repeat patterns
//! and replicas, and multiple rest contents are walked like any segment.
//!
//! Any `FnMut(Visit)` is a [`Visitor`]:
//! ```
//! # use score_msr::{dom::Score, settings::MsrSettings};
//! use score_msr::visit::{Node, Visit, Walk};
//! let score = Score::new(MsrSettings::default());
//! let mut entered = 0;
//! score.walk(&mut |visit: Visit<'_>| {
//!     if let Visit::Enter(Node::Score(_)) = visit {
//!         entered += 1;
//!     }
//! });
//! assert_eq!(entered, 1);
//! ```

use crate::{
    dom::{
        MeasuresRepeat, MultipleRest, Part, Repeat, RepeatCommonPart,
        RepeatEnding, Score, Segment, Staff, Voice, VoiceElement,
    },
    primitives::{
        Barline, Chord, Clef, DoubleTremolo, FiguredBass, GraceNotesGroup,
        Harmony, Key, Measure, MeasureElement, Note, TimeSignature,
        TremoloElement, Tuplet, TupletMember,
    },
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Node<'a> {
    Score(&'a Score),
    Part(&'a Part),
    Staff(&'a Staff),
    Voice(&'a Voice),
    Segment(&'a Segment),
    Measure(&'a Measure),
    Repeat(&'a Repeat),
    RepeatCommonPart(&'a RepeatCommonPart),
    RepeatEnding(&'a RepeatEnding),
    MeasuresRepeat(&'a MeasuresRepeat),
    MeasuresRepeatPattern(&'a Segment),
    MeasuresRepeatReplicas(&'a Segment),
    MultipleRest(&'a MultipleRest),
    MultipleRestContents(&'a Segment),
    Note(&'a Note),
    Chord(&'a Chord),
    Tuplet(&'a Tuplet),
    DoubleTremolo(&'a DoubleTremolo),
    GraceNotesGroup(&'a GraceNotesGroup),
    Harmony(&'a Harmony),
    FiguredBass(&'a FiguredBass),
    Clef(&'a Clef),
    Key(&'a Key),
    Time(&'a TimeSignature),
    Barline(&'a Barline),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Visit<'a> {
    Enter(Node<'a>),
    Leave(Node<'a>),
}

pub trait Visitor {
    fn visit(&mut self, visit: Visit<'_>);
}
impl<F> Visitor for F
where
    F: FnMut(Visit<'_>),
{
    fn visit(&mut self, visit: Visit<'_>) {
        self(visit)
    }
}

pub trait Walk {
    fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V);
}

/// Enter `node`, walk children with `inner`, leave `node`.
fn around<'a, V: Visitor + ?Sized>(
    node: Node<'a>,
    visitor: &mut V,
    inner: impl FnOnce(&mut V),
) {
    visitor.visit(Visit::Enter(node));
    inner(visitor);
    visitor.visit(Visit::Leave(node));
}

fn leaf<V: Visitor + ?Sized>(node: Node<'_>, visitor: &mut V) {
    around(node, visitor, |_| ());
}

fn walk_segment_as<'a, V: Visitor + ?Sized>(
    node: Node<'a>,
    segment: &'a Segment,
    visitor: &mut V,
) {
    around(node, visitor, |v| {
        segment.measures().iter().for_each(|m| m.walk(v))
    });
}

impl Walk for Score {
    fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        around(Node::Score(self), visitor, |v| {
            self.parts().iter().for_each(|p| p.walk(v))
        });
    }
}

impl Walk for Part {
    fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        around(Node::Part(self), visitor, |v| {
            self.staves().for_each(|s| s.walk(v))
        });
    }
}

impl Walk for Staff {
    fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        around(Node::Staff(self), visitor, |v| {
            self.voices().for_each(|voice| voice.walk(v))
        });
    }
}

/// Initial elements, then the current segment of a voice that was not
/// finalized.
impl Walk for Voice {
    fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        around(Node::Voice(self), visitor, |v| {
            self.initial_elements().iter().for_each(|e| e.walk(v));
            if let Some(segment) = self.current_segment() {
                if !segment.is_empty() {
                    segment.walk(v);
                }
            }
        });
    }
}

impl Walk for VoiceElement {
    fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        match self {
            Self::Segment(s) => s.walk(visitor),
            Self::Repeat(r) => r.walk(visitor),
            Self::MeasuresRepeat(r) => r.walk(visitor),
            Self::MultipleRest(r) => r.walk(visitor),
        }
    }
}

impl Walk for Segment {
    fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        walk_segment_as(Node::Segment(self), self, visitor);
    }
}

impl Walk for Repeat {
    fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        around(Node::Repeat(self), visitor, |v| {
            let common = self.common_part();
            around(Node::RepeatCommonPart(common), v, |v| {
                common.elements().iter().for_each(|e| e.walk(v))
            });
            for ending in self.endings() {
                around(Node::RepeatEnding(ending), v, |v| {
                    ending.segment().walk(v)
                });
            }
        });
    }
}

impl Walk for MeasuresRepeat {
    fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        around(Node::MeasuresRepeat(self), visitor, |v| {
            walk_segment_as(
                Node::MeasuresRepeatPattern(self.pattern()),
                self.pattern(),
                v,
            );
            walk_segment_as(
                Node::MeasuresRepeatReplicas(self.replicas()),
                self.replicas(),
                v,
            );
        });
    }
}

impl Walk for MultipleRest {
    fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        around(Node::MultipleRest(self), visitor, |v| {
            walk_segment_as(
                Node::MultipleRestContents(self.contents()),
                self.contents(),
                v,
            )
        });
    }
}

impl Walk for Measure {
    fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        around(Node::Measure(self), visitor, |v| {
            self.elements().iter().for_each(|e| e.walk(v))
        });
    }
}

impl Walk for MeasureElement {
    fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        match self {
            Self::Note(n) => leaf(Node::Note(n), visitor),
            Self::Chord(c) => c.walk(visitor),
            Self::Tuplet(t) => t.walk(visitor),
            Self::DoubleTremolo(t) => t.walk(visitor),
            Self::GraceNotesGroup(g) => {
                around(Node::GraceNotesGroup(g), visitor, |v| {
                    g.notes().iter().for_each(|n| leaf(Node::Note(n), v))
                })
            }
            Self::Harmony(h) => leaf(Node::Harmony(h), visitor),
            Self::FiguredBass(f) => leaf(Node::FiguredBass(f), visitor),
            Self::Clef { clef, .. } => leaf(Node::Clef(clef), visitor),
            Self::Key { key, .. } => leaf(Node::Key(key), visitor),
            Self::Time { time, .. } => leaf(Node::Time(time), visitor),
            Self::Barline { barline, .. } => {
                leaf(Node::Barline(barline), visitor)
            }
        }
    }
}

impl Walk for Chord {
    fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        around(Node::Chord(self), visitor, |v| {
            self.notes().iter().for_each(|n| leaf(Node::Note(n), v))
        });
    }
}

impl Walk for Tuplet {
    fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        around(Node::Tuplet(self), visitor, |v| {
            for member in self.members() {
                match member {
                    TupletMember::Note(n) => leaf(Node::Note(n), v),
                    TupletMember::Chord(c) => c.walk(v),
                    TupletMember::Tuplet(t) => t.walk(v),
                }
            }
        });
    }
}

impl Walk for DoubleTremolo {
    fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        around(Node::DoubleTremolo(self), visitor, |v| {
            for element in [self.first(), self.second()].into_iter().flatten() {
                match element {
                    TremoloElement::Note(n) => leaf(Node::Note(n), v),
                    TremoloElement::Chord(c) => c.walk(v),
                }
            }
        });
    }
}
