//! Codecs: effectuation text, event JSON, severity names, placeholders.

use crate::{
    substitute_placeholders, Effectuation, Language, LocalizedText, LoggingEvent, Severity, StepId,
};

#[test]
fn step_id_canonical_form_round_trips() {
    let id = StepId::new("script1", "function1");
    assert_eq!(id.to_string(), "function1@script1");
    assert_eq!("function1@script1".parse::<StepId>().unwrap(), id);
    assert!("no-separator".parse::<StepId>().is_err());
}

#[test]
fn effectuation_text_round_trips_for_every_variant() {
    let frames = [
        Effectuation::Step(StepId::new("script1", "function1")),
        Effectuation::OptionalPart("optional part 1".to_string()),
        Effectuation::DispensablePart("cleanup".to_string()),
        Effectuation::DescribedPart("rebuilding index".to_string()),
    ];
    for frame in frames {
        let text = frame.to_string();
        let decoded: Effectuation = text.parse().unwrap();
        assert_eq!(decoded, frame, "through {text:?}");
    }
}

#[test]
fn effectuation_json_uses_the_canonical_text() {
    let stepped = Effectuation::Step(StepId::new("script1", "function1"));
    assert_eq!(
        serde_json::to_string(&stepped).unwrap(),
        r#"{"effectuation":"step function1@script1"}"#
    );

    let optional = Effectuation::OptionalPart("optional part 1".to_string());
    assert_eq!(
        serde_json::to_string(&optional).unwrap(),
        r#"{"effectuation":"optional part \"optional part 1\""}"#
    );

    let back: Effectuation =
        serde_json::from_str(r#"{"effectuation":"step function1@script1"}"#).unwrap();
    assert_eq!(back, stepped);
}

#[test]
fn effectuation_decoding_rejects_garbage() {
    assert!("stepping out".parse::<Effectuation>().is_err());
    assert!("optional part unquoted".parse::<Effectuation>().is_err());
}

#[test]
fn severity_names_are_stable_and_ordered() {
    assert!(Severity::Debug < Severity::Progress);
    assert!(Severity::Error < Severity::Fatal);
    assert!(Severity::Fatal < Severity::Loss);
    assert!(Severity::Loss < Severity::Deadly);

    for severity in Severity::ALL {
        assert_eq!(severity.name().parse::<Severity>().unwrap(), severity);
        assert_eq!(
            serde_json::to_string(&severity).unwrap(),
            format!("\"{}\"", severity.name())
        );
    }
    assert!("Catastrophe".parse::<Severity>().is_err());
}

#[test]
fn event_json_round_trips_with_null_slots_preserved() {
    let mut event = LoggingEvent::new(
        Severity::Warning,
        "app",
        LocalizedText::english("file $1 missing").with(Language::De, "Datei $1 fehlt"),
    );
    event.message_id = Some("fs:missing".to_string());
    event.process_id = Some(4711);
    event.solution = Some(LocalizedText::english("check the path"));
    event.item_info = Some("batch-7".to_string());
    event.item_position_info = Some("line 3".to_string());
    event.effectuation_stack = vec![
        Effectuation::Step(StepId::new("f1", "import")),
        Effectuation::DescribedPart("scanning".to_string()),
    ];
    event.time = 1_700_000_000_123;

    let json = serde_json::to_string(&event).unwrap();
    let decoded: LoggingEvent = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, event);
    assert_eq!(decoded.execution_level(), 2);

    // Wire field names and the always-present language slots.
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["messageID"], "fs:missing");
    assert_eq!(value["type"], "Warning");
    assert_eq!(value["processID"], 4711);
    assert_eq!(value["applicationName"], "app");
    assert_eq!(value["fact"]["fr"], serde_json::Value::Null);
    assert_eq!(value["solution"]["de"], serde_json::Value::Null);
    assert_eq!(value["time"], 1_700_000_000_123u64);
    assert_eq!(
        value["effectuationIDStack"][0]["effectuation"],
        "step import@f1"
    );
}

#[test]
fn absent_solution_encodes_as_null() {
    let event = LoggingEvent::new(Severity::Info, "app", LocalizedText::english("fine"));
    let value = serde_json::to_value(&event).unwrap();
    assert!(value.as_object().unwrap().contains_key("solution"));
    assert_eq!(value["solution"], serde_json::Value::Null);

    let decoded: LoggingEvent = serde_json::from_value(value).unwrap();
    assert_eq!(decoded, event);
}

#[test]
fn substitution_replaces_one_based_positions() {
    assert_eq!(
        substitute_placeholders("copy $1 to $2", &["a.txt", "b.txt"]),
        "copy a.txt to b.txt"
    );
    assert_eq!(substitute_placeholders("$2 before $1", &["x", "y"]), "y before x");
}

#[test]
fn substitution_with_no_arguments_is_the_identity() {
    assert_eq!(substitute_placeholders("keep $1 and $2", &[]), "keep $1 and $2");
}

#[test]
fn substitution_leaves_dollar_zero_and_out_of_range_intact() {
    assert_eq!(substitute_placeholders("$0 stays", &["a"]), "$0 stays");
    assert_eq!(substitute_placeholders("$1 and $3", &["a"]), "a and $3");
    assert_eq!(substitute_placeholders("price in $", &["a"]), "price in $");
}

#[test]
fn substitution_does_not_recurse_into_arguments() {
    assert_eq!(substitute_placeholders("say $1", &["$2"]), "say $2");
    assert_eq!(substitute_placeholders("$1$1", &["ab"]), "abab");
}

#[test]
fn localized_text_substitutes_every_slot() {
    let text = LocalizedText::english("took $1 ms").with(Language::Fr, "a pris $1 ms");
    let filled = text.substitute(&["12"]);
    assert_eq!(filled.get(Language::En), Some("took 12 ms"));
    assert_eq!(filled.get(Language::Fr), Some("a pris 12 ms"));
    assert_eq!(filled.get(Language::De), None);
}
