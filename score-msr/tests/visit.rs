use itertools::Itertools;
use score_msr::{
    dom::{EndingKind, Part, Score, VoiceKind},
    ids::IdGenerator,
    primitives::{Duration, Note, NoteName, Pitch, TimeSignature},
    settings::MsrSettings,
    skeleton::Skeleton,
    visit::{Node, Visit, Walk},
};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn setup(part: &mut Part, ids: &mut IdGenerator, time: TimeSignature) {
    part.add_staff(1).expect("Can not add staff");
    part.add_voice(1, 1, VoiceKind::Regular, ids)
        .expect("Can not add voice");
    part.append_time(time, ids).expect("Can not set time");
}

fn half_measure(part: &mut Part, ids: &mut IdGenerator, number: u32) {
    part.create_measure(number.to_string(), number, ids)
        .expect("Can not create measure");
    part.append_note(
        1,
        1,
        Note::regular(Pitch::natural(NoteName::A, 4), Duration::new(1, 2)),
        ids,
    )
    .expect("Can not append note");
}

/// Repeat of measures 1-2 with two endings, then measure 5.
fn repeat_score(ids: &mut IdGenerator) -> Score {
    let mut score = Score::new(MsrSettings::default());
    let part = score.add_part("P1", ids);
    setup(part, ids, TimeSignature::new(2, 4));
    part.create_measure("1", 1, ids).unwrap();
    part.handle_repeat_start(ids).unwrap();
    part.append_note(1, 1, Note::rest(Duration::new(1, 2)), ids)
        .unwrap();
    half_measure(part, ids, 2);
    part.handle_repeat_end(2, ids).unwrap();
    part.handle_repeat_ending_start("1", ids).unwrap();
    half_measure(part, ids, 3);
    part.append_repeat_ending("1", EndingKind::Hooked, ids).unwrap();
    part.handle_repeat_ending_start("2", ids).unwrap();
    half_measure(part, ids, 4);
    part.append_repeat_ending("2", EndingKind::Hookless, ids)
        .unwrap();
    half_measure(part, ids, 5);
    score.finalize(ids).unwrap();
    score
}

#[test]
fn enter_and_leave_are_balanced() {
    init();
    let mut ids = IdGenerator::new();
    let score = repeat_score(&mut ids);

    let mut depth: i32 = 0;
    let mut notes = 0;
    let mut first = None;
    let mut last = None;
    score.walk(&mut |visit: Visit<'_>| {
        match visit {
            Visit::Enter(node) => {
                depth += 1;
                if matches!(node, Node::Note(_)) {
                    notes += 1;
                }
                if first.is_none() {
                    first = Some(matches!(node, Node::Score(_)));
                }
            }
            Visit::Leave(node) => {
                depth -= 1;
                assert!(depth >= 0);
                last = Some(matches!(node, Node::Score(_)));
            }
        }
    });
    assert_eq!(depth, 0);
    assert_eq!(notes, 5);
    assert_eq!(first, Some(true));
    assert_eq!(last, Some(true));
}

#[test]
fn skeleton_of_repeat_with_endings() {
    init();
    let mut ids = IdGenerator::new();
    let score = repeat_score(&mut ids);
    let text = Skeleton::render(&score);
    let lines = text
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.starts_with("segment#"))
        .collect_vec();
    assert_eq!(
        lines,
        vec![
            "score (1 parts)",
            "part P1 part#1",
            "staff 1",
            "voice 1 Regular",
            "repeat x2",
            "common part",
            "measure 1 Full 1/2",
            "measure 2 Full 1/2",
            "ending 1 (Hooked)",
            "measure 3 Full 1/2",
            "ending 2 (Hookless)",
            "measure 4 Full 1/2",
            "measure 5 Full 1/2",
        ]
    );
    // measures are nested one level under their segment.
    let measure_1 = text
        .lines()
        .find(|l| l.trim() == "measure 1 Full 1/2")
        .expect("No measure 1");
    assert_eq!(measure_1.len() - measure_1.trim_start().len(), 14);
}

#[test]
fn skeleton_of_multiple_rest() {
    init();
    let mut ids = IdGenerator::new();
    let mut part = Part::new(&mut ids, "P1", MsrSettings::default());
    setup(&mut part, &mut ids, TimeSignature::new(3, 4));
    let rest = || Note::full_measure_rest(Duration::new(3, 4));

    part.create_measure("1", 1, &mut ids).unwrap();
    part.append_note(1, 1, rest(), &mut ids).unwrap();
    part.create_measure("2", 2, &mut ids).unwrap();
    part.begin_multiple_rest(2, &mut ids).unwrap();
    part.append_note(1, 1, rest(), &mut ids).unwrap();
    part.create_measure("3", 3, &mut ids).unwrap();
    part.append_note(1, 1, rest(), &mut ids).unwrap();
    part.create_measure("4", 4, &mut ids).unwrap();
    part.set_next_measure_number("4", &mut ids).unwrap();
    part.append_note(1, 1, rest(), &mut ids).unwrap();
    part.finalize(&mut ids).unwrap();

    let text = Skeleton::render(&part);
    let lines = text
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.starts_with("segment#"))
        .collect_vec();
    let position = lines
        .iter()
        .position(|l| *l == "multiple rest x2 next 4")
        .expect("No multiple rest");
    assert_eq!(lines[position + 1], "contents");
    assert!(lines[position + 2].starts_with("measure 2 "));
    assert!(lines[position + 3].starts_with("measure 3 "));
    assert!(lines[position + 4].starts_with("measure 4 "));
    assert_eq!(lines.len(), position + 5);
}
