//! Text outline of the structure: parts, staves, voices, segments,
//! repeats and measures, without the notes.
//!
//! ```
//! # use score_msr::{dom::{Part, VoiceKind}, ids::IdGenerator, settings::MsrSettings};
//! # use score_msr::primitives::{Duration, Note};
//! use score_msr::skeleton::Skeleton;
//! let mut ids = IdGenerator::new();
//! let mut part = Part::new(&mut ids, "P1", MsrSettings::default());
//! part.add_staff(1).unwrap();
//! part.add_voice(1, 1, VoiceKind::Regular, &mut ids).unwrap();
//! part.create_measure("1", 1, &mut ids).unwrap();
//! part.append_note(1, 1, Note::rest(Duration::whole()), &mut ids).unwrap();
//! part.finalize(&mut ids).unwrap();
//! let text = Skeleton::render(&part);
//! assert!(text.contains("measure 1 Full 1/1"));
//! ```

use itertools::Itertools;

use crate::visit::{Node, Visit, Visitor, Walk};

#[derive(Debug, Default)]
pub struct Skeleton {
    depth: usize,
    lines: Vec<String>,
}
impl Skeleton {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn render(node: &impl Walk) -> String {
        let mut skeleton = Self::new();
        node.walk(&mut skeleton);
        skeleton.finish()
    }
    pub fn finish(self) -> String {
        self.lines.into_iter().join("\n")
    }

    fn line(node: &Node) -> Option<String> {
        let line = match node {
            Node::Score(s) => format!("score ({} parts)", s.parts().len()),
            Node::Part(p) => format!("part {} {}", p.name(), p.id()),
            Node::Staff(s) => format!("staff {}", s.number()),
            Node::Voice(v) => format!("voice {} {:?}", v.number(), v.kind()),
            Node::Segment(s) => format!("{}", s.id()),
            Node::Measure(m) => format!(
                "measure {} {:?} {}",
                m.number(),
                m.kind(),
                m.length()
            ),
            Node::Repeat(r) => format!("repeat x{}", r.times()),
            Node::RepeatCommonPart(_) => "common part".to_string(),
            Node::RepeatEnding(e) => {
                format!("ending {} ({:?})", e.label(), e.kind())
            }
            Node::MeasuresRepeat(r) => format!(
                "measures repeat of {} ({} slashes)",
                r.pattern_measures(),
                r.slashes()
            ),
            Node::MeasuresRepeatPattern(_) => "pattern".to_string(),
            Node::MeasuresRepeatReplicas(_) => "replicas".to_string(),
            Node::MultipleRest(r) => format!(
                "multiple rest x{} next {}",
                r.count(),
                r.next_measure_number().unwrap_or("-")
            ),
            Node::MultipleRestContents(_) => "contents".to_string(),
            _ => return None,
        };
        Some(line)
    }
}
impl Visitor for Skeleton {
    fn visit(&mut self, visit: Visit<'_>) {
        match visit {
            Visit::Enter(node) => {
                if let Some(line) = Self::line(&node) {
                    self.lines
                        .push(format!("{}{}", "  ".repeat(self.depth), line));
                    self.depth += 1;
                }
            }
            Visit::Leave(node) => {
                if Self::line(&node).is_some() {
                    self.depth -= 1;
                }
            }
        }
    }
}
