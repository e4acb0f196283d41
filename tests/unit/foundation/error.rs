use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        SpriteError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        SpriteError::precondition("x")
            .to_string()
            .contains("precondition failed:")
    );
    assert!(
        SpriteError::resource_load("x")
            .to_string()
            .contains("resource load error:")
    );
    assert!(SpriteError::decode("x").to_string().contains("decode error:"));
    assert!(
        SpriteError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = SpriteError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn only_precondition_reports_rejection() {
    assert!(SpriteError::precondition("no frames").is_precondition());
    assert!(!SpriteError::validation("bad").is_precondition());
}
