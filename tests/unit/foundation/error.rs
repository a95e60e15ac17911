use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        PageflowError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        PageflowError::config("x")
            .to_string()
            .contains("config error:")
    );
    assert!(
        PageflowError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = PageflowError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn seconds_reject_negative_and_non_finite() {
    assert!(ensure_seconds("delay", 0.0).is_ok());
    assert!(ensure_seconds("delay", 1.5).is_ok());
    assert!(ensure_seconds("delay", -0.1).is_err());
    assert!(ensure_seconds("delay", f64::NAN).is_err());
    assert!(ensure_seconds("delay", f64::INFINITY).is_err());
}

#[test]
fn json_errors_map_to_serde_variant() {
    let err: PageflowError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, PageflowError::Serde(_)));
}
