//! Integration tests for the quizsnap-rs library API

#[test]
fn test_prelude_imports() {
    use quizsnap_rs::prelude::*;

    let result = classify("- Paris\n- London");
    assert_eq!(result.question_type, QuestionType::MultipleChoice);
    assert_eq!(result.answers, vec!["Paris", "London"]);

    assert_eq!(normalize_candidate("©  Paris"), "Paris");

    let _config = SelectorConfig::default();
    let _pointer = DryRunPointer::new();
}

#[test]
fn test_classifier_module() {
    use quizsnap_rs::classifier::{classify, QuestionType};

    let result = classify("A → 1\nB → 2\nC → 3");
    assert_eq!(result.question_type, QuestionType::Match);
    assert_eq!(result.answers, vec!["A → 1", "B → 2", "C → 3"]);

    assert_eq!(classify("True").question_type, QuestionType::TrueFalse);
    assert_eq!(classify("Mitochondria").question_type, QuestionType::SingleChoice);
    assert_eq!(classify("because it is").question_type, QuestionType::Unknown);
}

#[test]
fn test_matcher_module() {
    use quizsnap_rs::matcher::{find_match, MatchStrategy, DEFAULT_ACCEPTANCE_SCORE};
    use quizsnap_rs::{resolve_target, BoundingBox, OcrToken};

    let words = ["The", "mitochondria", "produces", "energy", "Nucleus", "stores", "DNA"];
    let tokens: Vec<OcrToken> = words
        .iter()
        .enumerate()
        .map(|(i, w)| OcrToken::new(*w, BoundingBox::new(50 + i as i32 * 120, 400, 100, 24)))
        .collect();

    let m = find_match("mitochondria", &tokens, DEFAULT_ACCEPTANCE_SCORE).unwrap();
    assert_eq!(m.token_index, 1);
    assert_eq!(m.score, 100.0);
    assert_eq!(m.strategy, MatchStrategy::ExactWord);

    let target = resolve_target(&tokens[m.token_index], 30);
    assert_eq!(target.x, tokens[1].bounding_box.left - 30);
    assert_eq!(target.y, 412);
}

#[test]
fn test_click_offset_is_configurable() {
    use quizsnap_rs::{resolve_target, BoundingBox, ClickPoint, OcrToken};

    let token = OcrToken::new("Right-aligned", BoundingBox::new(300, 100, 120, 20));
    assert_eq!(resolve_target(&token, -140), ClickPoint::new(440, 110));
}

#[test]
fn test_ocr_crate_reexports() {
    use quizsnap_rs::{OcrInput, TesseractEngine};

    let _engine = TesseractEngine::new("eng");
    let _input = OcrInput::Bytes(Vec::new());
}
