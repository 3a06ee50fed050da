//! End-to-end tests for building quiz documents.
//!
//! Drives the library over the XML fixtures and over hand-written tag
//! streams, checking the finished model and the failure modes.

use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use webquiz::registry::TagEvent;
use webquiz::types::{ChoiceKind, Comparison, QuizIndexEntry};
use webquiz::yaml::generate_yaml;
use webquiz::{build_quiz, read_quiz, read_quiz_file, Defaults, QuizError};

fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn load_fixture(name: &str) -> String {
    let path = fixture_path(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to load {}: {}", path.display(), e))
}

fn open(tag: &str) -> TagEvent {
    TagEvent::open_bare(tag)
}

fn close(tag: &str) -> TagEvent {
    TagEvent::close(tag)
}

fn text(fragment: &str) -> TagEvent {
    TagEvent::text(fragment)
}

/// Wrap question events in a root element.
fn quiz(body: Vec<TagEvent>) -> Vec<TagEvent> {
    let mut events = vec![open("webquiz")];
    events.extend(body);
    events.push(close("webquiz"));
    events
}

/// A single-choice question with one item per flag.
fn single_choice(correct: &[bool]) -> Vec<TagEvent> {
    let mut events = vec![
        open("question"),
        text("Pick one"),
        TagEvent::open("choice", [("type", "single")]),
    ];
    for (index, &is_correct) in correct.iter().enumerate() {
        events.push(TagEvent::open(
            "item",
            [("correct", if is_correct { "true" } else { "false" })],
        ));
        events.push(text(&format!("option {}", index + 1)));
        events.push(close("item"));
    }
    events.extend([close("choice"), close("question")]);
    events
}

/// Defaults covering exactly the setting tags.
fn setting_defaults() -> Defaults {
    [
        ("department", "School of Mathematics"),
        ("department_url", "/maths"),
        ("institution", "University of Sydney"),
        ("institution_url", "/"),
        ("language", "french"),
        ("theme", "Night"),
    ]
    .into_iter()
    .collect()
}

#[test]
fn test_limits_fixture_page() {
    let document = read_quiz_file(&fixture_path("limits.xml"), &Defaults::builtin()).unwrap();

    assert_eq!(document.title, "Limits and continuity");
    assert_eq!(document.unit_code, "MATH1001");
    assert_eq!(document.unit_name, "Differential Calculus");
    assert_eq!(document.breadcrumb, "Limits");
    assert_eq!(document.quizzes_url.as_deref(), Some("/u/MATH1001/Quizzes"));

    assert_eq!(document.setting("language"), Some("english"));
    assert_eq!(document.setting("theme"), Some("default"));
    assert_eq!(document.setting("unit_url"), Some("/u/MATH1001"));
    assert_eq!(document.setting("breadcrumbs"), Some(""));
    assert_eq!(document.setting("department"), Some("School of Mathematics"));
    assert_eq!(document.setting("uni"), Some("University of Sydney"));
    assert_eq!(document.setting("url"), None);
    assert_eq!(document.setting("department_url"), Some("/"));
    assert_eq!(document.setting("institution"), Some(""));

    assert!(document.flags.one_page);
    assert!(!document.flags.random_order);
    assert!(!document.flags.hide_side_menu);

    assert_eq!(document.links.len(), 1);
    assert_eq!(document.metas.len(), 1);
}

#[test]
fn test_limits_fixture_discussion() {
    let document = read_quiz(&load_fixture("limits.xml"), &Defaults::builtin()).unwrap();

    assert_eq!(document.discussions.len(), 1);
    let discussion = &document.discussions[0];
    assert_eq!(discussion.heading, "The squeeze theorem");
    assert_eq!(discussion.short_heading, "Squeeze");
    assert_eq!(
        discussion.text,
        "If f lies between two functions with the same limit, so does f."
    );
}

#[test]
fn test_limits_fixture_questions() {
    let document = read_quiz(&load_fixture("limits.xml"), &Defaults::builtin()).unwrap();
    assert_eq!(document.questions.len(), 2);

    let first = &document.questions[0];
    assert_eq!(first.type_name(), Some("single"));
    assert_eq!(
        first.text.trim(),
        "What is the limit of 1/n as n tends to infinity?"
    );
    let choice = first.choice().unwrap();
    assert_eq!(choice.kind, ChoiceKind::Single);
    assert_eq!(choice.columns, 3);
    assert_eq!(choice.correct, 1);
    let items: Vec<_> = choice
        .items
        .iter()
        .map(|item| (item.correct, item.text.as_str(), item.feedback.as_str()))
        .collect();
    assert_eq!(
        items,
        vec![
            (false, "1", "The terms get smaller."),
            (true, "0", "Correct."),
            (false, "It does not exist", ""),
        ]
    );
    assert_eq!(choice.items[1].symbol.as_deref(), Some("*"));

    let second = &document.questions[1];
    assert_eq!(second.type_name(), Some("input"));
    assert_eq!(second.text.trim(), "What is 6 times 7?");
    assert_eq!(second.after_text, " Give your answer as an integer.");
    let input = second.input().unwrap();
    assert_eq!(input.answer, "42");
    assert_eq!(input.comparison, Comparison::Number);
    assert!(input.prompt);
    assert_eq!(input.feedback_right, "Well done.");
    assert_eq!(input.feedback_wrong, "Try multiplying again.");

    assert!(document.needs_mathjs);
}

#[test]
fn test_index_fixture() {
    let document = read_quiz(&load_fixture("index.xml"), &Defaults::builtin()).unwrap();

    assert_eq!(document.setting("theme"), Some("ocean"));
    assert_eq!(
        document.quiz_index,
        vec![
            QuizIndexEntry {
                prompt: true,
                url: "quiz1.html".to_string(),
                title: "Quiz One".to_string(),
            },
            QuizIndexEntry {
                prompt: false,
                url: "quiz2.html".to_string(),
                title: "Quiz Two".to_string(),
            },
        ]
    );
    assert!(document.questions.is_empty());
    assert!(!document.needs_mathjs);
}

#[test]
fn test_duplicate_type_fixture() {
    let err = read_quiz(&load_fixture("duplicate_type.xml"), &Defaults::builtin()).unwrap_err();

    match err {
        QuizError::DuplicateType {
            question,
            existing,
            declared,
        } => {
            assert_eq!(question, 1);
            assert_eq!(existing, "input");
            assert_eq!(declared, "multiple");
        }
        other => panic!("expected DuplicateType, got {other:?}"),
    }
}

#[test]
fn test_two_question_stream() {
    let mut body = single_choice(&[false, true, false]);
    body.extend([
        open("question"),
        text("What is 6 times 7?"),
        TagEvent::open("answer", [("comparison", "number")]),
        text("42"),
        close("answer"),
        close("question"),
    ]);

    let document = build_quiz(quiz(body), &Defaults::builtin()).unwrap();

    assert_eq!(document.questions.len(), 2);
    let first = document.questions[0].choice().unwrap();
    assert_eq!(document.questions[0].type_name(), Some("single"));
    assert_eq!(first.items.len(), 3);
    assert_eq!(first.correct, 1);
    assert!(first.items[1].correct);
    assert_eq!(document.questions[1].type_name(), Some("input"));
    assert_eq!(document.questions[1].input().unwrap().answer, "42");
    assert!(document.needs_mathjs);
}

#[test]
fn test_single_choice_needs_exactly_one_correct() {
    let err = build_quiz(quiz(single_choice(&[false, false])), &Defaults::builtin()).unwrap_err();
    assert!(matches!(
        err,
        QuizError::SingleChoiceCount {
            question: 1,
            count: 0
        }
    ));

    let err = build_quiz(quiz(single_choice(&[true, false, true])), &Defaults::builtin())
        .unwrap_err();
    assert!(matches!(
        err,
        QuizError::SingleChoiceCount {
            question: 1,
            count: 2
        }
    ));
}

#[test]
fn test_multiple_choice_needs_items() {
    let empty = quiz(vec![
        open("question"),
        TagEvent::open("choice", [("type", "multiple")]),
        close("choice"),
        close("question"),
    ]);
    let err = build_quiz(empty, &Defaults::builtin()).unwrap_err();
    assert!(matches!(err, QuizError::EmptyChoice { question: 1 }));

    let any_correct = quiz(vec![
        open("question"),
        TagEvent::open("choice", [("type", "multiple")]),
        TagEvent::open("item", [("correct", "false")]),
        text("a"),
        close("item"),
        close("choice"),
        close("question"),
    ]);
    assert!(build_quiz(any_correct, &Defaults::builtin()).is_ok());
}

#[test]
fn test_blank_input_answer() {
    let events = quiz(vec![
        open("question"),
        text("Anything?"),
        open("answer"),
        text("  \n "),
        close("answer"),
        close("question"),
    ]);

    let err = build_quiz(events, &Defaults::builtin()).unwrap_err();
    assert!(matches!(err, QuizError::MissingAnswer { question: 1 }));
    assert_eq!(err.question(), Some(1));
}

#[test]
fn test_question_without_type() {
    let events = quiz(vec![open("question"), text("Just text"), close("question")]);

    let err = build_quiz(events, &Defaults::builtin()).unwrap_err();
    assert!(matches!(err, QuizError::MissingType { question: 1 }));
}

#[test]
fn test_close_without_open() {
    let err = build_quiz([close("question")], &Defaults::builtin()).unwrap_err();
    assert!(matches!(err, QuizError::Structural { .. }));
}

#[test]
fn test_unknown_tags_under_question_are_text() {
    let events = quiz(vec![
        open("question"),
        text("Solve "),
        open("span"),
        text("x + 1 = 3"),
        close("span"),
        open("answer"),
        text("2"),
        close("answer"),
        close("question"),
    ]);

    let document = build_quiz(events, &Defaults::builtin()).unwrap();
    assert_eq!(document.questions[0].text, "Solve x + 1 = 3");
}

#[test]
fn test_sentinel_uses_supplied_defaults() {
    let xml = concat!(
        r#"<webquiz language="DeFaUlT" theme="DeFaUlT">"#,
        "<department_url>DeFaUlT</department_url>",
        "</webquiz>",
    );

    let document = read_quiz(xml, &setting_defaults()).unwrap();
    assert_eq!(document.setting("language"), Some("french"));
    assert_eq!(document.setting("theme"), Some("night"));
    assert_eq!(document.setting("department_url"), Some("/maths"));
    assert_eq!(document.setting("department"), Some("School of Mathematics"));
}

#[test]
fn test_incomplete_defaults_fail() {
    let defaults: Defaults = [("language", "english")].into_iter().collect();
    let xml = "<webquiz><department>Maths</department></webquiz>";

    let err = read_quiz(xml, &defaults).unwrap_err();
    assert!(matches!(err, QuizError::UnknownSetting { ref key } if key == "department"));

    let err = read_quiz(r#"<webquiz theme="Dark"></webquiz>"#, &Defaults::new()).unwrap_err();
    assert!(matches!(err, QuizError::UnknownSetting { .. }));
}

#[test]
fn test_root_sentinel_without_default_fails() {
    let xml = r#"<webquiz colour="DeFaUlT"><title>T</title></webquiz>"#;

    let err = read_quiz(xml, &setting_defaults()).unwrap_err();
    assert!(matches!(err, QuizError::UnknownSetting { ref key } if key == "colour"));
}

#[test]
fn test_passthrough_attributes_resolve_under_tag_name() {
    let mut defaults = setting_defaults();
    defaults.set("uni", "USyd");
    let xml = r#"<webquiz><uni name="DeFaUlT"/></webquiz>"#;

    let document = read_quiz(xml, &defaults).unwrap();
    assert_eq!(document.setting("uni"), Some("USyd"));
    assert_eq!(document.setting("name"), None);

    // Without a default for the tag the sentinel cannot be resolved
    let err = read_quiz(xml, &setting_defaults()).unwrap_err();
    assert!(matches!(err, QuizError::UnknownSetting { ref key } if key == "uni"));
}

#[test]
fn test_two_choice_blocks_are_duplicate() {
    let events = quiz(vec![
        open("question"),
        TagEvent::open("choice", [("type", "single")]),
        TagEvent::open("item", [("correct", "true")]),
        text("a"),
        close("item"),
        close("choice"),
        TagEvent::open("choice", [("type", "multiple")]),
    ]);

    let err = build_quiz(events, &Defaults::builtin()).unwrap_err();
    match err {
        QuizError::DuplicateType {
            question,
            existing,
            declared,
        } => {
            assert_eq!(question, 1);
            assert_eq!(existing, "single");
            assert_eq!(declared, "multiple");
        }
        other => panic!("expected DuplicateType, got {other:?}"),
    }
}

#[test]
fn test_feedback_block_in_choice_question_is_dropped() {
    let events = quiz(vec![
        open("question"),
        text("Pick"),
        TagEvent::open("choice", [("type", "multiple")]),
        TagEvent::open("item", [("correct", "true")]),
        text("a"),
        close("item"),
        close("choice"),
        text(" Read the notes. "),
        TagEvent::open("when", [("type", "wrong")]),
        text("Nobody sees this"),
        close("when"),
        close("question"),
    ]);

    let document = build_quiz(events, &Defaults::builtin()).unwrap();
    let question = &document.questions[0];
    assert_eq!(question.after_text, " Read the notes.");
    assert_eq!(question.choice().unwrap().items[0].feedback, "");
}

#[test]
fn test_fixture_yaml() {
    let document = read_quiz(&load_fixture("limits.xml"), &Defaults::builtin()).unwrap();
    let yaml = generate_yaml(&document).unwrap();

    assert!(yaml.contains("title: Limits and continuity"));
    assert!(yaml.contains("type: input"));
    assert!(yaml.contains("comparison: number"));
    assert!(yaml.contains("needs_mathjs: true"));
}
