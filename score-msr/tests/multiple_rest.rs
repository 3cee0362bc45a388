use itertools::Itertools;
use score_msr::{
    dom::{EndingKind, MultipleRest, Part, Voice, VoiceElement, VoiceKind},
    ids::IdGenerator,
    primitives::{Duration, Note, RepeatProvenance, TimeSignature},
    settings::MsrSettings,
    MsrError,
};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn new_part(ids: &mut IdGenerator, settings: MsrSettings) -> Part {
    let mut part = Part::new(ids, "P1", settings);
    part.add_staff(1).expect("Can not add staff");
    part.add_voice(1, 1, VoiceKind::Regular, ids)
        .expect("Can not add voice");
    part.append_time(TimeSignature::new(3, 4), ids)
        .expect("Can not set time");
    part
}

fn rest_measure(part: &mut Part, ids: &mut IdGenerator, number: u32) {
    part.create_measure(number.to_string(), number, ids)
        .expect("Can not create measure");
    part.append_note(1, 1, Note::full_measure_rest(Duration::new(3, 4)), ids)
        .expect("Can not append rest");
}

fn voice(part: &Part) -> &Voice {
    part.voice(1, 1).expect("No voice 1")
}

/// Measure 1, a rest over measures 2 to 5, then measure 6 opened.
fn rest_of_four(part: &mut Part, ids: &mut IdGenerator) {
    rest_measure(part, ids, 1);
    part.create_measure("2", 2, ids).unwrap();
    part.begin_multiple_rest(4, ids).unwrap();
    part.append_note(1, 1, Note::full_measure_rest(Duration::new(3, 4)), ids)
        .unwrap();
    for number in 3..=5 {
        rest_measure(part, ids, number);
    }
    part.create_measure("6", 6, ids).unwrap();
    part.set_next_measure_number("6", ids).unwrap();
}

fn check_rest(element: &VoiceElement, voice: &Voice) {
    let VoiceElement::MultipleRest(rest) = element else {
        panic!("expected multiple rest, got {:?}", element);
    };
    assert_eq!(rest.count(), 4);
    assert_eq!(rest.contents().len(), 4);
    assert_eq!(rest.measure_sounding(), Duration::new(3, 4));
    assert_eq!(rest.sounding(), Duration::new(3, 1));
    assert_eq!(rest.next_measure_number(), Some("6"));
    let numbers = rest
        .contents()
        .measures()
        .iter()
        .map(|m| m.number())
        .collect_vec();
    assert_eq!(numbers, vec!["2", "3", "4", "5"]);
    let current = voice.current_segment().expect("No current segment");
    assert_eq!(current.measures()[0].number(), "6");
}

#[test]
fn multiple_rest_outside_repeat() {
    init();
    let mut ids = IdGenerator::new();
    let mut part = new_part(&mut ids, MsrSettings::traced());
    rest_of_four(&mut part, &mut ids);

    let voice = voice(&part);
    let kinds = voice
        .initial_elements()
        .iter()
        .map(|e| e.kind_name())
        .collect_vec();
    assert_eq!(kinds, vec!["segment", "multiple rest"]);
    check_rest(&voice.initial_elements()[1], voice);
}

#[test]
fn multiple_rest_inside_repeat() {
    init();
    let mut ids = IdGenerator::new();
    let mut part = new_part(&mut ids, MsrSettings::traced());
    part.create_measure("0", 0, &mut ids).unwrap();
    part.handle_repeat_start(&mut ids).unwrap();
    part.append_note(1, 1, Note::rest(Duration::new(3, 4)), &mut ids)
        .unwrap();
    rest_of_four(&mut part, &mut ids);

    let voice = voice(&part);
    assert!(voice.initial_elements().is_empty());
    let repeat = &voice.pending_repeats()[0];
    let elements = repeat.common_part().elements();
    let kinds = elements.iter().map(|e| e.kind_name()).collect_vec();
    assert_eq!(kinds, vec!["segment", "multiple rest"]);
    assert_eq!(elements[0].measures().len(), 2);
    check_rest(&elements[1], voice);

    part.append_note(1, 1, Note::rest(Duration::new(3, 4)), &mut ids)
        .unwrap();
    part.handle_repeat_end(2, &mut ids).unwrap();
    part.finalize(&mut ids).unwrap();
    let voice = self::voice(&part);
    let VoiceElement::Repeat(repeat) = &voice.initial_elements()[0] else {
        panic!("expected repeat");
    };
    assert_eq!(repeat.common_part().elements().len(), 3);
    assert_eq!(voice.measures().len(), 7);
}

#[test]
fn compression_can_be_switched_off() {
    init();
    let mut ids = IdGenerator::new();
    let settings = MsrSettings {
        compress_multiple_rests: false,
        ..MsrSettings::default()
    };
    let mut part = new_part(&mut ids, settings);
    rest_of_four(&mut part, &mut ids);
    part.finalize(&mut ids).unwrap();
    let voice = voice(&part);
    assert_eq!(voice.initial_elements().len(), 1);
    // measure 6 was opened but left empty, so it is discarded.
    assert_eq!(voice.measures().len(), 5);
}

#[test]
fn second_pending_rest_is_fatal() {
    init();
    let mut ids = IdGenerator::new();
    let mut part = new_part(&mut ids, MsrSettings::default());
    rest_measure(&mut part, &mut ids, 1);
    part.begin_multiple_rest(2, &mut ids).unwrap();
    assert!(matches!(
        part.begin_multiple_rest(2, &mut ids),
        Err(MsrError::AlreadyOpen {
            structure: "multiple rest",
            ..
        })
    ));
}

#[test]
fn pending_rest_is_closed_at_the_end() {
    init();
    let mut ids = IdGenerator::new();
    let mut part = new_part(&mut ids, MsrSettings::default());
    rest_measure(&mut part, &mut ids, 1);
    part.create_measure("2", 2, &mut ids).unwrap();
    part.begin_multiple_rest(2, &mut ids).unwrap();
    part.append_note(1, 1, Note::full_measure_rest(Duration::new(3, 4)), &mut ids)
        .unwrap();
    rest_measure(&mut part, &mut ids, 3);
    part.finalize(&mut ids).unwrap();

    let voice = voice(&part);
    let VoiceElement::MultipleRest(rest) = &voice.initial_elements()[1] else {
        panic!("expected multiple rest");
    };
    assert_eq!(rest.contents().len(), 2);
    assert_eq!(rest.next_measure_number(), None);
}

fn kinds(elements: &[VoiceElement]) -> Vec<&'static str> {
    elements.iter().map(|e| e.kind_name()).collect_vec()
}

fn numbers(element: &VoiceElement) -> Vec<String> {
    element
        .measures()
        .iter()
        .map(|m| m.number().to_string())
        .collect_vec()
}

fn as_rest(element: &VoiceElement) -> &MultipleRest {
    match element {
        VoiceElement::MultipleRest(rest) => rest,
        other => panic!("expected multiple rest, got {:?}", other),
    }
}

/// Rest over measures 2 and 3, measure 4 opened but not numbered yet.
fn rest_of_two(part: &mut Part, ids: &mut IdGenerator) {
    part.create_measure("2", 2, ids).unwrap();
    part.begin_multiple_rest(2, ids).unwrap();
    part.append_note(1, 1, Note::full_measure_rest(Duration::new(3, 4)), ids)
        .unwrap();
    rest_measure(part, ids, 3);
    part.create_measure("4", 4, ids).unwrap();
}

#[test]
fn multiple_rest_ends_a_repeat() {
    init();
    let mut ids = IdGenerator::new();
    let mut part = new_part(&mut ids, MsrSettings::traced());
    part.create_measure("1", 1, &mut ids).unwrap();
    part.handle_repeat_start(&mut ids).unwrap();
    part.append_note(1, 1, Note::rest(Duration::new(3, 4)), &mut ids)
        .unwrap();
    part.create_measure("2", 2, &mut ids).unwrap();
    part.begin_multiple_rest(2, &mut ids).unwrap();
    part.append_note(1, 1, Note::full_measure_rest(Duration::new(3, 4)), &mut ids)
        .unwrap();
    rest_measure(&mut part, &mut ids, 3);
    // backward repeat on the last rest measure, before measure 4 exists.
    part.handle_repeat_end(2, &mut ids).unwrap();
    rest_measure(&mut part, &mut ids, 4);
    part.set_next_measure_number("4", &mut ids).unwrap();
    part.finalize(&mut ids).unwrap();

    let voice = voice(&part);
    let elements = voice.initial_elements();
    assert_eq!(kinds(elements), vec!["repeat", "segment"]);
    let VoiceElement::Repeat(repeat) = &elements[0] else {
        panic!("expected repeat");
    };
    let common = repeat.common_part().elements();
    assert_eq!(kinds(common), vec!["segment", "multiple rest"]);
    assert_eq!(numbers(&common[0]), vec!["1"]);
    let rest = as_rest(&common[1]);
    assert_eq!(numbers(&common[1]), vec!["2", "3"]);
    assert_eq!(rest.next_measure_number(), Some("4"));
    assert_eq!(numbers(&elements[1]), vec!["4"]);
}

#[test]
fn forward_repeat_after_multiple_rest() {
    init();
    let mut ids = IdGenerator::new();
    let mut part = new_part(&mut ids, MsrSettings::traced());
    rest_measure(&mut part, &mut ids, 1);
    rest_of_two(&mut part, &mut ids);
    part.handle_repeat_start(&mut ids).unwrap();
    part.set_next_measure_number("4", &mut ids).unwrap();
    part.append_note(1, 1, Note::rest(Duration::new(3, 4)), &mut ids)
        .unwrap();
    rest_measure(&mut part, &mut ids, 5);
    part.handle_repeat_end(2, &mut ids).unwrap();
    part.finalize(&mut ids).unwrap();

    let voice = voice(&part);
    let elements = voice.initial_elements();
    assert_eq!(kinds(elements), vec!["segment", "multiple rest", "repeat"]);
    assert_eq!(numbers(&elements[0]), vec!["1"]);
    assert_eq!(numbers(&elements[1]), vec!["2", "3"]);
    assert_eq!(as_rest(&elements[1]).next_measure_number(), Some("4"));
    assert_eq!(numbers(&elements[2]), vec!["4", "5"]);
    assert_eq!(
        voice.measures()[3].provenance(),
        RepeatProvenance::BeforeRepeat
    );
}

#[test]
fn multiple_rest_before_first_ending() {
    init();
    let mut ids = IdGenerator::new();
    let mut part = new_part(&mut ids, MsrSettings::traced());
    part.create_measure("1", 1, &mut ids).unwrap();
    part.handle_repeat_start(&mut ids).unwrap();
    part.append_note(1, 1, Note::rest(Duration::new(3, 4)), &mut ids)
        .unwrap();
    rest_of_two(&mut part, &mut ids);
    part.handle_repeat_ending_start("1", &mut ids).unwrap();
    part.set_next_measure_number("4", &mut ids).unwrap();
    part.append_note(1, 1, Note::rest(Duration::new(3, 4)), &mut ids)
        .unwrap();
    part.append_repeat_ending("1", EndingKind::Hooked, &mut ids)
        .unwrap();
    part.finalize(&mut ids).unwrap();

    let elements = voice(&part).initial_elements();
    assert_eq!(kinds(elements), vec!["repeat"]);
    let VoiceElement::Repeat(repeat) = &elements[0] else {
        panic!("expected repeat");
    };
    let common = repeat.common_part().elements();
    assert_eq!(kinds(common), vec!["segment", "multiple rest"]);
    assert_eq!(numbers(&common[1]), vec!["2", "3"]);
    assert_eq!(as_rest(&common[1]).next_measure_number(), Some("4"));
    assert_eq!(repeat.endings().len(), 1);
    let ending = repeat.endings()[0].segment();
    let ending_numbers = ending.measures().iter().map(|m| m.number()).collect_vec();
    assert_eq!(ending_numbers, vec!["4"]);
}

#[test]
fn multiple_rest_inside_ending_is_not_compressed() {
    init();
    let mut ids = IdGenerator::new();
    let mut part = new_part(&mut ids, MsrSettings::traced());
    part.create_measure("1", 1, &mut ids).unwrap();
    part.handle_repeat_start(&mut ids).unwrap();
    part.append_note(1, 1, Note::rest(Duration::new(3, 4)), &mut ids)
        .unwrap();
    part.create_measure("2", 2, &mut ids).unwrap();
    part.handle_repeat_ending_start("1", &mut ids).unwrap();
    part.begin_multiple_rest(2, &mut ids).unwrap();
    part.append_note(1, 1, Note::full_measure_rest(Duration::new(3, 4)), &mut ids)
        .unwrap();
    rest_measure(&mut part, &mut ids, 3);
    part.create_measure("4", 4, &mut ids).unwrap();
    part.set_next_measure_number("4", &mut ids).unwrap();
    part.handle_repeat_end(2, &mut ids).unwrap();
    part.append_repeat_ending("1", EndingKind::Hooked, &mut ids)
        .unwrap();
    part.append_note(1, 1, Note::rest(Duration::new(3, 4)), &mut ids)
        .unwrap();
    part.finalize(&mut ids).unwrap();

    let elements = voice(&part).initial_elements();
    assert_eq!(kinds(elements), vec!["repeat", "segment"]);
    let VoiceElement::Repeat(repeat) = &elements[0] else {
        panic!("expected repeat");
    };
    assert_eq!(kinds(repeat.common_part().elements()), vec!["segment"]);
    let ending = repeat.endings()[0].segment();
    let ending_numbers = ending.measures().iter().map(|m| m.number()).collect_vec();
    assert_eq!(ending_numbers, vec!["2", "3"]);
    assert_eq!(numbers(&elements[1]), vec!["4"]);
}
