use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        HiscoreError::config("x")
            .to_string()
            .contains("configuration error:")
    );
    assert!(HiscoreError::render("x").to_string().contains("render error:"));
}

#[test]
fn file_unavailable_names_the_path() {
    let err = HiscoreError::file_unavailable(
        "scores.txt",
        std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
    );
    let msg = err.to_string();
    assert!(msg.contains("file unavailable"));
    assert!(msg.contains("scores.txt"));
    assert!(msg.contains("gone"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = HiscoreError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
