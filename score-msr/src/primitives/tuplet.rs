//! Tuplets, possibly nested.
//!
//! A tuplet plays `actual` written notes in the time of `normal` ones, so
//! every member sounds `normal / actual` of its written value. Nested
//! tuplets scale their members once more by the enclosing ratio.
use super::{measure::MeasureUplink, Chord, Duration, Note};

#[derive(Debug, Clone, PartialEq)]
pub enum TupletMember {
    Note(Note),
    Chord(Chord),
    Tuplet(Tuplet),
}
impl TupletMember {
    pub fn sounding(&self) -> Duration {
        match self {
            Self::Note(n) => n.sounding(),
            Self::Chord(c) => c.sounding(),
            Self::Tuplet(t) => t.sounding(),
        }
    }
    fn set_position(&mut self, position: Duration) {
        match self {
            Self::Note(n) => n.set_position(position),
            Self::Chord(c) => c.set_position(position),
            Self::Tuplet(t) => t.set_position(position),
        }
    }
    fn set_measure_uplink(&mut self, uplink: &MeasureUplink) {
        match self {
            Self::Note(n) => n.set_measure_uplink(uplink),
            Self::Chord(c) => c.set_measure_uplink(uplink),
            Self::Tuplet(t) => t.set_measure_uplink(uplink),
        }
    }
    fn scale_sounding(&mut self, ratio: Duration) {
        match self {
            Self::Note(n) => n.set_sounding(n.sounding() * ratio),
            Self::Chord(c) => c.scale_sounding(ratio),
            Self::Tuplet(t) => t.scale_sounding(ratio),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tuplet {
    number: u32,
    actual_notes: u32,
    normal_notes: u32,
    members: Vec<TupletMember>,
    sounding: Duration,
    display: Duration,
    position: Duration,
}
impl Tuplet {
    /// # Example
    /// ```
    /// # use score_msr::primitives::{Duration, Note, Tuplet};
    /// let mut triplet = Tuplet::new(1, 3, 2);
    /// for _ in 0..3 {
    ///     triplet.add_note(Note::rest(Duration::new(1, 4)));
    /// }
    /// assert_eq!(triplet.sounding(), Duration::new(1, 2));
    /// assert_eq!(triplet.display(), Duration::new(3, 4));
    /// ```
    pub fn new(number: u32, actual_notes: u32, normal_notes: u32) -> Self {
        Self {
            number,
            actual_notes,
            normal_notes,
            members: Vec::new(),
            sounding: Duration::zero(),
            display: Duration::zero(),
            position: Duration::zero(),
        }
    }

    pub fn ratio(&self) -> Duration {
        Duration::new(self.normal_notes as u64, self.actual_notes as u64)
    }

    pub fn add_note(&mut self, mut note: Note) {
        note.enter_tuplet();
        note.set_sounding(note.display() * self.ratio());
        self.display += note.display();
        self.push(TupletMember::Note(note));
    }
    pub fn add_chord(&mut self, mut chord: Chord) {
        chord.enter_tuplet(self.ratio());
        self.display += chord.display();
        self.push(TupletMember::Chord(chord));
    }
    /// The inner tuplet counts with its own sounding time as written
    /// value, then gets scaled by this tuplet's ratio.
    pub fn add_tuplet(&mut self, mut tuplet: Tuplet) {
        let written = tuplet.sounding();
        tuplet.scale_sounding(self.ratio());
        self.display += written;
        self.push(TupletMember::Tuplet(tuplet));
    }
    fn push(&mut self, mut member: TupletMember) {
        member.set_position(self.position + self.sounding);
        self.sounding += member.sounding();
        self.members.push(member);
    }

    pub fn number(&self) -> u32 {
        self.number
    }
    pub fn actual_notes(&self) -> u32 {
        self.actual_notes
    }
    pub fn normal_notes(&self) -> u32 {
        self.normal_notes
    }
    pub fn members(&self) -> &Vec<TupletMember> {
        &self.members
    }
    pub fn sounding(&self) -> Duration {
        self.sounding
    }
    pub fn display(&self) -> Duration {
        self.display
    }
    pub fn position(&self) -> Duration {
        self.position
    }

    pub(crate) fn set_position(&mut self, position: Duration) {
        self.position = position;
        let mut offset = position;
        for member in self.members.iter_mut() {
            member.set_position(offset);
            offset += member.sounding();
        }
    }
    pub(crate) fn set_measure_uplink(&mut self, uplink: &MeasureUplink) {
        self.members
            .iter_mut()
            .for_each(|m| m.set_measure_uplink(uplink));
    }
    fn scale_sounding(&mut self, ratio: Duration) {
        self.members.iter_mut().for_each(|m| m.scale_sounding(ratio));
        self.sounding = self.members.iter().map(|m| m.sounding()).sum();
        let position = self.position;
        self.set_position(position);
    }
}
