use super::*;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn vols(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn load_missing_file_seeds_known_volumes() {
    let dir = tempdir().unwrap();
    let store = CatalogStore::load(dir.path().join("games.json"), &vols(&["left", "right"]));

    assert!(store.records("left").is_empty());
    assert!(store.records("right").is_empty());
    assert!(store.records("unknown").is_empty());
}

#[test]
fn load_corrupt_file_starts_empty() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("games.json");
    fs::write(&path, "{ not json").unwrap();

    let store = CatalogStore::load(path, &vols(&["left"]));
    assert!(store.records("left").is_empty());
}

#[test]
fn save_and_reload_round_trips() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("games.json");

    let mut store = CatalogStore::load(path.clone(), &vols(&["left", "right"]));
    store.add("left", GameRecord::register("Foo", "/left/Foo", "left"));
    store.add(
        "left",
        GameRecord {
            name: "Loose".into(),
            path: PathBuf::from("/left/Loose.exe"),
            original_path: None,
            original_drive: None,
        },
    );
    store.save().unwrap();

    let reloaded = CatalogStore::load(path, &vols(&["left", "right"]));
    let left = reloaded.records("left");
    assert_eq!(left.len(), 2);
    assert_eq!(left[0].name, "Foo");
    assert_eq!(left[0].original_drive.as_deref(), Some("left"));
    assert_eq!(left[1].name, "Loose");
    assert!(left[1].original_path.is_none());
}

#[test]
fn save_leaves_no_temp_file_behind() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("games.json");

    let mut store = CatalogStore::load(path.clone(), &vols(&["left"]));
    store.add("left", GameRecord::register("Foo", "/left/Foo", "left"));
    store.save().unwrap();

    assert!(path.is_file());
    assert!(!path.with_extension("json.tmp").exists());
}

#[test]
fn optional_fields_are_omitted_from_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("games.json");

    let mut store = CatalogStore::load(path.clone(), &vols(&[]));
    store.add(
        "left",
        GameRecord {
            name: "Loose".into(),
            path: PathBuf::from("/left/Loose.exe"),
            original_path: None,
            original_drive: None,
        },
    );
    store.save().unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"name\""));
    assert!(!text.contains("original_path"));
    assert!(!text.contains("original_drive"));
}

#[test]
fn transfer_moves_record_and_updates_path() {
    let dir = tempdir().unwrap();
    let mut store = CatalogStore::load(dir.path().join("games.json"), &vols(&["left", "right"]));
    store.add("left", GameRecord::register("Foo", "/left/Foo", "left"));
    store.add("left", GameRecord::register("Bar", "/left/Bar", "left"));

    let moved = store.transfer(
        "left",
        "right",
        &PathBuf::from("/left/Foo"),
        PathBuf::from("/right/Foo"),
    );
    assert!(moved);

    let left = store.records("left");
    assert_eq!(left.len(), 1);
    assert_eq!(left[0].name, "Bar");

    let right = store.records("right");
    assert_eq!(right.len(), 1);
    assert_eq!(right[0].name, "Foo");
    assert_eq!(right[0].path, PathBuf::from("/right/Foo"));
    // Anchors survive the transfer untouched.
    assert_eq!(right[0].original_path, Some(PathBuf::from("/left/Foo")));
    assert_eq!(right[0].original_drive.as_deref(), Some("left"));
}

#[test]
fn transfer_with_unknown_path_is_a_no_op() {
    let dir = tempdir().unwrap();
    let mut store = CatalogStore::load(dir.path().join("games.json"), &vols(&["left", "right"]));
    store.add("left", GameRecord::register("Foo", "/left/Foo", "left"));

    let moved = store.transfer(
        "left",
        "right",
        &PathBuf::from("/left/Nope"),
        PathBuf::from("/right/Nope"),
    );
    assert!(!moved);
    assert_eq!(store.records("left").len(), 1);
    assert!(store.records("right").is_empty());
}

#[test]
fn transfer_creates_destination_volume_list() {
    let dir = tempdir().unwrap();
    let mut store = CatalogStore::load(dir.path().join("games.json"), &vols(&["left"]));
    store.add("left", GameRecord::register("Foo", "/left/Foo", "left"));

    assert!(store.transfer(
        "left",
        "brand-new",
        &PathBuf::from("/left/Foo"),
        PathBuf::from("/new/Foo"),
    ));
    assert_eq!(store.records("brand-new").len(), 1);
}
