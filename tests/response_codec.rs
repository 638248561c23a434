// tests/response_codec.rs

use runpad::answer::codec::{decode, encode, escape_html, unescape_html};
use runpad::answer::AnswerRecord;
use runpad::response::{ResponseView, ShortResponseView};
use runpad::session::SessionOptions;

#[test]
fn escape_and_unescape_cover_the_five_entities() {
    let raw = r#"if x < 2 & y > 1: say "it's""#;
    let escaped = escape_html(raw);
    assert!(!escaped.contains('<'));
    assert!(!escaped.contains('"'));
    assert_eq!(unescape_html(&escaped), raw);
}

#[test]
fn unescape_handles_doubly_escaped_ampersands() {
    // "&amp;lt;" means the literal text "&lt;", not "<".
    assert_eq!(unescape_html("&amp;lt;"), "&lt;");
}

#[test]
fn record_survives_the_host_transport() {
    let record = AnswerRecord::failed("say \"x\"", "x is <not> defined");
    let escaped = encode(&record).unwrap();
    let decoded: AnswerRecord = decode(&escaped).unwrap();
    assert_eq!(decoded, record);
}

#[test]
fn decode_rejects_malformed_payloads() {
    assert!(decode::<AnswerRecord>("&quot;unterminated").is_err());
    assert!(decode::<AnswerRecord>("{}").is_err());
}

#[test]
fn response_views_expose_the_stored_code() {
    let stored = encode(&AnswerRecord::finished("print 1", Some("1".to_string())))
        .unwrap();

    let full = ResponseView::from_escaped(&stored).unwrap();
    assert_eq!(full.code(), "print 1");

    let short = ShortResponseView::from_escaped(&stored).unwrap();
    assert_eq!(short.code(), "print 1");
}

#[test]
fn response_views_ignore_unrelated_fields() {
    let stored = escape_html(r#"{"code":"print 1","output":"1","extra":42}"#);
    let view = ResponseView::from_escaped(&stored).unwrap();
    assert_eq!(view.code(), "print 1");
}

#[test]
fn response_view_decode_failure_propagates() {
    assert!(ResponseView::from_escaped("not json at all").is_err());
    assert!(ShortResponseView::from_escaped("not json at all").is_err());
}

#[test]
fn session_options_decode_the_initial_code_parameter() {
    let escaped = escape_html("\"print \\\"hi\\\"\"");
    let options = SessionOptions::from_escaped_initial_code(&escaped).unwrap();
    assert_eq!(options.initial_code, "print \"hi\"");
    assert_eq!(options.fallback_timeout, SessionOptions::DEFAULT_FALLBACK_TIMEOUT);
    assert_eq!(
        options.suppression_window,
        SessionOptions::DEFAULT_SUPPRESSION_WINDOW
    );
}
