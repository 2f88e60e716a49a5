use rota_core::errors::{ErrorInfo, RotaError};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("day", "3")
        .with_context("reason", "example")
}

#[test]
fn config_error_surface() {
    let err = RotaError::Config(sample_info("C001", "missing names"));
    assert_eq!(err.info().code, "C001");
    assert!(err.info().context.contains_key("day"));
}

#[test]
fn generation_error_surface() {
    let err = RotaError::Generation(sample_info("G001", "max tries").with_hint("raise max_tries"));
    assert_eq!(err.info().code, "G001");
    assert_eq!(err.info().hint.as_deref(), Some("raise max_tries"));
}

#[test]
fn display_includes_context_and_hint() {
    let err = RotaError::Report(
        ErrorInfo::new("R001", "bad header")
            .with_context("line", "1")
            .with_hint("regenerate the grid"),
    );
    assert_eq!(
        err.to_string(),
        "report failed: [R001] bad header {line=1}; regenerate the grid"
    );
    let bare = RotaError::Config(ErrorInfo::new("C002", "no names"));
    assert_eq!(bare.to_string(), "invalid configuration: [C002] no names");
    assert_eq!(bare.code(), "C002");
}

#[test]
fn context_accepts_any_displayable_value() {
    let info = ErrorInfo::new("G002", "stuck")
        .with_context("day", 4usize)
        .with_context("path", std::path::Path::new("out.csv").display())
        .with_context("day", 5usize);
    assert_eq!(info.context("day"), Some("5"));
    assert_eq!(info.context("path"), Some("out.csv"));
    assert_eq!(info.context("hint"), None);
    assert_eq!(info.to_string(), "[G002] stuck {day=5 path=out.csv}");
}

#[test]
fn io_helper_records_path() {
    let err = RotaError::io(
        "read",
        std::path::Path::new("missing.json"),
        std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
    );
    assert!(matches!(err, RotaError::Io(_)));
    assert_eq!(err.info().context("path"), Some("missing.json"));
    assert_eq!(err.info().context("kind"), Some("NotFound"));
}

#[test]
fn errors_serialize_with_family_tag() {
    let err = RotaError::Roster(ErrorInfo::new("roster-too-small", "need two"));
    let json = serde_json::to_value(&err).expect("serialize");
    assert_eq!(json["family"], "Roster");
    assert_eq!(json["detail"]["code"], "roster-too-small");
    assert!(json["detail"].get("context").is_none());
    let back: RotaError = serde_json::from_value(json).expect("deserialize");
    assert_eq!(back, err);
}
