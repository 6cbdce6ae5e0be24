use std::path::Path;

use midi_bridge::application::ports::PathTranslator;
use midi_bridge::domain::{ForeignPath, InvalidPathError};
use midi_bridge::infrastructure::bridge::WslPathTranslator;

#[test]
fn given_windows_path_when_translating_then_drive_becomes_lowercase_mount() {
    let translator = WslPathTranslator::default();

    let foreign = translator
        .translate(Path::new(r"C:\Users\ana\audio\take 1.wav"))
        .unwrap();

    assert_eq!(foreign.as_str(), "/mnt/c/Users/ana/audio/take 1.wav");
}

#[test]
fn given_forward_slash_path_when_translating_then_separators_are_kept() {
    let translator = WslPathTranslator::default();

    let foreign = translator.translate(Path::new("D:/data/outputs/x.mid")).unwrap();

    assert_eq!(foreign.as_str(), "/mnt/d/data/outputs/x.mid");
}

#[test]
fn given_duplicate_separators_and_dot_segments_when_translating_then_path_is_normalized() {
    let translator = WslPathTranslator::default();

    let foreign = translator
        .translate(Path::new(r"E:\\data\.\tmp\..\uploads\\a.wav"))
        .unwrap();

    assert_eq!(foreign.as_str(), "/mnt/e/data/uploads/a.wav");
}

#[test]
fn given_bare_drive_root_when_translating_then_maps_to_mount_of_drive() {
    let translator = WslPathTranslator::default();

    let foreign = translator.translate(Path::new(r"Z:\")).unwrap();

    assert_eq!(foreign.as_str(), "/mnt/z");
}

#[test]
fn given_custom_mount_root_with_trailing_slash_when_translating_then_no_double_separator() {
    let translator = WslPathTranslator::new("/media/");

    let foreign = translator.translate(Path::new(r"C:\a.wav")).unwrap();

    assert_eq!(foreign.as_str(), "/media/c/a.wav");
}

#[test]
fn given_foreign_style_path_when_translating_then_rejected() {
    let translator = WslPathTranslator::default();

    let result = translator.translate(Path::new("/mnt/c/already/foreign.wav"));

    assert!(matches!(result, Err(InvalidPathError::MissingDriveRoot(_))));
}

#[test]
fn given_empty_path_when_translating_then_rejected() {
    let translator = WslPathTranslator::default();

    assert!(translator.translate(Path::new("")).is_err());
}

#[cfg(unix)]
#[test]
fn given_drive_relative_path_on_unix_host_when_translating_then_rejected() {
    let translator = WslPathTranslator::default();

    assert!(translator.translate(Path::new("C:audio.wav")).is_err());
}

#[test]
fn given_translated_path_when_mapping_back_then_drive_and_remainder_survive() {
    let translator = WslPathTranslator::default();
    let originals = [
        r"C:\Users\ana\audio\take 1.wav",
        r"d:\x",
        r"Q:\deep\nested\dir\file.mid",
    ];

    for original in originals {
        let foreign = translator.translate(Path::new(original)).unwrap();
        let host = translator.to_host(&foreign).unwrap();

        assert!(host.eq_ignore_ascii_case(original), "{} != {}", host, original);
        assert_eq!(translator.translate(Path::new(&host)).unwrap(), foreign);
    }
}

#[test]
fn given_path_outside_mount_root_when_mapping_back_then_rejected() {
    let translator = WslPathTranslator::default();

    let result = translator.to_host(&ForeignPath::from_raw("/home/ana/file.wav"));

    assert!(matches!(result, Err(InvalidPathError::OutsideMountRoot { .. })));
}

#[test]
fn given_multi_letter_drive_segment_when_mapping_back_then_rejected() {
    let translator = WslPathTranslator::default();

    assert!(translator.to_host(&ForeignPath::from_raw("/mnt/wsl/file")).is_err());
}
