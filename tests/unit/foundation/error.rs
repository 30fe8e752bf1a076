use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert_eq!(
        ReelError::malformed(3, "too few tokens").to_string(),
        "malformed record at row 3: too few tokens"
    );
    assert!(
        ReelError::degenerate("x")
            .to_string()
            .contains("degenerate bounds:")
    );
    assert!(
        ReelError::encoder("x")
            .to_string()
            .contains("encoder failure:")
    );
    assert!(
        ReelError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert_eq!(
        ReelError::UnknownAnimation("wave".to_string()).to_string(),
        "unknown animation 'wave'"
    );
}

#[test]
fn missing_asset_names_the_path() {
    let err = ReelError::MissingAsset(PathBuf::from("input/unit_cgg_7.csv"));
    assert!(err.to_string().contains("unit_cgg_7.csv"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ReelError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
