// Tests for file name validation and sanitization

use tagtrim::error::FilenameError;
use tagtrim::{validate_filename, FilenamePolicy};

fn policy() -> FilenamePolicy {
    FilenamePolicy::default()
}

#[test]
fn test_accepts_simple_names() {
    assert_eq!(validate_filename("song.mp3", &policy()).unwrap(), "song.mp3");
    assert_eq!(
        validate_filename("my-track_01.wav", &policy()).unwrap(),
        "my-track_01.wav"
    );
}

#[test]
fn test_sanitizes_special_characters() {
    assert_eq!(
        validate_filename("My Song!!.mp3", &policy()).unwrap(),
        "My_Song.mp3"
    );
    assert_eq!(
        validate_filename("a@b#c.mp3", &policy()).unwrap(),
        "a_b_c.mp3"
    );
}

#[test]
fn test_lowercases_extension() {
    assert_eq!(validate_filename("song.MP3", &policy()).unwrap(), "song.mp3");
    assert_eq!(
        validate_filename("Track.FLAC", &policy()).unwrap(),
        "Track.flac"
    );
}

#[test]
fn test_rejects_empty() {
    assert!(matches!(
        validate_filename("", &policy()),
        Err(FilenameError::Empty)
    ));
    assert!(matches!(
        validate_filename("   ", &policy()),
        Err(FilenameError::Empty)
    ));
}

#[test]
fn test_rejects_too_long() {
    let name = format!("{}.mp3", "a".repeat(120));
    assert!(matches!(
        validate_filename(&name, &policy()),
        Err(FilenameError::TooLong(100))
    ));
}

#[test]
fn test_rejects_null_character() {
    assert!(matches!(
        validate_filename("bad\0name.mp3", &policy()),
        Err(FilenameError::InvalidCharacter)
    ));
}

#[test]
fn test_rejects_traversal() {
    let err = validate_filename("../../etc/passwd.mp3", &policy()).unwrap_err();
    assert!(matches!(
        err,
        FilenameError::PathTraversal | FilenameError::DirectoryTraversal
    ));

    assert!(matches!(
        validate_filename("music/song.mp3", &policy()),
        Err(FilenameError::DirectoryTraversal)
    ));
}

#[test]
fn test_rejects_unknown_extension() {
    let err = validate_filename("song.exe", &policy()).unwrap_err();
    match err {
        FilenameError::InvalidExtension { allowed } => {
            // The message enumerates the accepted set.
            assert!(allowed.contains(".mp3"));
            assert!(allowed.contains(".wav"));
        }
        other => panic!("expected InvalidExtension, got {:?}", other),
    }

    // No extension at all is rejected the same way.
    assert!(matches!(
        validate_filename("song", &policy()),
        Err(FilenameError::InvalidExtension { .. })
    ));
}

#[test]
fn test_rejects_stem_that_sanitizes_to_nothing() {
    assert!(matches!(
        validate_filename("!!!.mp3", &policy()),
        Err(FilenameError::Invalid)
    ));
}

#[test]
fn test_allow_list_is_configuration() {
    let narrow = FilenamePolicy {
        max_length: 100,
        allowed_extensions: ["mp3", "wav", "ogg", "wma"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
    };

    assert!(validate_filename("song.mp3", &narrow).is_ok());
    assert!(matches!(
        validate_filename("song.flac", &narrow),
        Err(FilenameError::InvalidExtension { .. })
    ));
}
