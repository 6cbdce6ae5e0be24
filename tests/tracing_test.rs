use axum::http::HeaderValue;
use midi_bridge::application::ports::ConversionEvents;
use midi_bridge::domain::{ConversionId, ConversionStage, StageEvent};
use midi_bridge::infrastructure::observability::{
    DEFAULT_FILTER, RequestId, TracingConfig, TracingConversionEvents, output_excerpt,
};

#[test]
fn given_default_config_when_created_then_environment_is_set() {
    let config = TracingConfig::default();
    assert!(!config.environment.is_empty());
    assert_eq!(config.default_filter, DEFAULT_FILTER);
}

#[test]
fn given_custom_filter_when_building_config_then_it_replaces_default() {
    let config = TracingConfig::new("test", true).with_default_filter("warn");

    assert!(config.json_format);
    assert_eq!(config.default_filter, "warn");
}

#[test]
fn given_blank_output_when_excerpting_then_marked_empty() {
    assert_eq!(output_excerpt("  \n "), "[EMPTY]");
}

#[test]
fn given_short_output_when_excerpting_then_kept_trimmed() {
    assert_eq!(output_excerpt("  SUCCESS: done \n"), "SUCCESS: done");
}

#[test]
fn given_long_multibyte_output_when_excerpting_then_truncated_on_char_boundary() {
    let text = "é".repeat(500);

    let excerpt = output_excerpt(&text);

    assert!(excerpt.starts_with(&"é".repeat(200)));
    assert!(excerpt.ends_with("(500 chars total)"));
}

#[test]
fn given_any_stage_when_recording_without_subscriber_then_does_not_panic() {
    let events = TracingConversionEvents;
    let id = ConversionId::new();

    for stage in [
        ConversionStage::Staged,
        ConversionStage::Completed,
        ConversionStage::Classified,
        ConversionStage::CleanupFailed,
        ConversionStage::Fault,
    ] {
        events.record(&StageEvent::new(id, stage, "detail"));
    }
}

#[test]
fn given_well_formed_header_when_reading_request_id_then_it_is_kept() {
    let header = HeaderValue::from_static("upload-42");

    let id = RequestId::from_header(Some(&header));

    assert_eq!(id.as_str(), "upload-42");
}

#[test]
fn given_oversized_header_when_reading_request_id_then_a_new_one_is_generated() {
    let long = "x".repeat(500);
    let header = HeaderValue::from_str(&long).unwrap();

    let id = RequestId::from_header(Some(&header));

    assert_ne!(id.as_str(), long);
    assert_eq!(id.as_str().len(), 36);
}
