use std::io::Write;

use tactic_board::tactics::{MediaKind, TacticsLibrary};

fn write_manifest(contents: &str) -> (tempfile::TempDir, String) {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("tactics.json");
    let mut file = std::fs::File::create(&path).expect("create manifest");
    file.write_all(contents.as_bytes()).expect("write manifest");
    let path = path.to_str().expect("utf-8 path").to_owned();
    (dir, path)
}

#[test]
fn manifest_loads_from_disk_with_authored_order() {
    let (_dir, path) = write_manifest(
        r#"{
            "Zonal Marking": [{"name": "Back Line", "file": "clips/back_line.mp4"}],
            "Pressing": [{"name": "High Press", "file": "clips/high_press.mp4"}],
            "Throw Ins": [{"name": "Long Throw", "file": "docs/long_throw.pdf"}]
        }"#,
    );

    let library = TacticsLibrary::load(&path).expect("load manifest");
    let names: Vec<&str> = library.category_names().collect();
    assert_eq!(names, ["Zonal Marking", "Pressing", "Throw Ins"]);
    assert_eq!(library.first_category(), Some("Zonal Marking"));
}

#[test]
fn missing_manifest_reports_the_path() {
    let error = TacticsLibrary::load("does_not_exist/tactics.json").expect_err("missing file");
    assert!(error.to_string().contains("does_not_exist/tactics.json"));
}

#[test]
fn video_and_document_tactics_are_distinguished() {
    let (_dir, path) = write_manifest(
        r#"{
            "Mixed": [
                {"name": "Clip", "file": "clips/a.MP4"},
                {"name": "Board", "file": "docs/a.html"},
                {"name": "Web Clip", "file": "clips/b.webm"}
            ]
        }"#,
    );

    let library = TacticsLibrary::load(&path).expect("load manifest");
    let mixed = library.tactics("Mixed").expect("category");
    assert_eq!(mixed[0].media_kind(), MediaKind::Video);
    assert_eq!(mixed[1].media_kind(), MediaKind::Document);
    assert_eq!(mixed[2].media_kind(), MediaKind::Video);
}

#[test]
fn invalid_json_is_an_error_not_a_panic() {
    let (_dir, path) = write_manifest("{not json");
    assert!(TacticsLibrary::load(&path).is_err());
}

#[test]
fn empty_manifest_yields_an_empty_library() {
    let (_dir, path) = write_manifest("{}");
    let library = TacticsLibrary::load(&path).expect("load manifest");
    assert!(library.is_empty());
    assert_eq!(library.first_category(), None);
}
