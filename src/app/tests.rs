use super::*;
use crate::catalog::{CatalogStore, GameRecord};
use crate::mover::MoveEvent;
use crate::volumes::Volume;
use std::fs;
use std::path::Path;
use tempfile::{TempDir, tempdir};

/// Two real volume roots under a tempdir plus a catalog stored beside them.
fn fixture() -> (TempDir, App) {
    let tmp = tempdir().unwrap();
    let left = tmp.path().join("left");
    let right = tmp.path().join("right");
    fs::create_dir_all(&left).unwrap();
    fs::create_dir_all(&right).unwrap();

    let volumes = vec![
        Volume::new(left.to_string_lossy().into_owned()),
        Volume::new(right.to_string_lossy().into_owned()),
    ];
    let ids: Vec<String> = volumes.iter().map(|v| v.id.clone()).collect();
    let catalog = CatalogStore::load(tmp.path().join("games.json"), &ids);

    // Right pane = second volume, left pane = first.
    let app = App::new(catalog, volumes, 1);
    (tmp, app)
}

fn add_game_dir(app: &mut App, pane: Pane, name: &str) {
    let volume = app.pane_volume(pane).clone();
    let dir = volume.root.join(name);
    fs::create_dir_all(&dir).unwrap();
    app.catalog
        .add(&volume.id, GameRecord::register(name, dir, &volume.id));
}

fn drain_to_outcome(app: &mut App) -> crate::mover::BatchOutcome {
    loop {
        match app.batch.as_ref().unwrap().rx_recv() {
            MoveEvent::Progress { .. } => {}
            MoveEvent::Finished(outcome) => return outcome,
        }
    }
}

#[test]
fn selection_falls_back_to_cursor() {
    let (_tmp, mut app) = fixture();
    add_game_dir(&mut app, Pane::Left, "Alpha");
    add_game_dir(&mut app, Pane::Left, "Beta");

    assert_eq!(app.selection(Pane::Left), vec![0]);
    app.move_cursor(1);
    assert_eq!(app.selection(Pane::Left), vec![1]);
    assert!(app.selection(Pane::Right).is_empty());
}

#[test]
fn marks_win_over_cursor_and_stay_ordered() {
    let (_tmp, mut app) = fixture();
    for name in ["Alpha", "Beta", "Gamma"] {
        add_game_dir(&mut app, Pane::Left, name);
    }

    app.move_cursor(2);
    app.toggle_mark(); // Gamma
    app.move_cursor(-2);
    app.toggle_mark(); // Alpha
    assert_eq!(app.selection(Pane::Left), vec![0, 2]);

    app.toggle_mark(); // unmark Alpha
    assert_eq!(app.selection(Pane::Left), vec![2]);
}

#[test]
fn start_move_with_empty_pane_warns_and_spawns_nothing() {
    let (_tmp, mut app) = fixture();
    app.start_move();

    assert!(!app.is_moving());
    let status = app.status.as_ref().unwrap();
    assert_eq!(status.tone, StatusTone::Warning);
}

#[test]
fn second_batch_is_refused_while_one_runs() {
    let (_tmp, mut app) = fixture();
    add_game_dir(&mut app, Pane::Left, "Alpha");

    app.start_move();
    assert!(app.is_moving());

    app.start_move();
    assert!(matches!(
        app.status.as_ref().map(|s| s.tone),
        Some(StatusTone::Warning)
    ));

    let outcome = drain_to_outcome(&mut app);
    app.finish_batch(outcome);
    assert!(!app.is_moving());
}

#[test]
fn finished_batch_reconciles_catalog_and_reports_count() {
    let (_tmp, mut app) = fixture();
    for name in ["Alpha", "Beta", "Gamma"] {
        add_game_dir(&mut app, Pane::Left, name);
    }
    // Knock out Beta's folder so the worker skips it.
    let beta = app.pane_records(Pane::Left)[1].path.clone();
    fs::remove_dir_all(&beta).unwrap();

    for i in 0..3 {
        app.move_cursor(if i == 0 { 0 } else { 1 });
        app.toggle_mark();
    }
    app.start_move();
    let outcome = drain_to_outcome(&mut app);
    app.finish_batch(outcome);

    let left: Vec<&str> = app
        .pane_records(Pane::Left)
        .iter()
        .map(|g| g.name.as_str())
        .collect();
    let right: Vec<&str> = app
        .pane_records(Pane::Right)
        .iter()
        .map(|g| g.name.as_str())
        .collect();
    assert_eq!(left, vec!["Beta"]);
    assert_eq!(right, vec!["Alpha", "Gamma"]);

    // Moved records now live under the right volume's root, on disk and in
    // the catalog.
    let right_root = app.pane_volume(Pane::Right).root.clone();
    for record in app.pane_records(Pane::Right) {
        assert!(record.path.starts_with(&right_root));
        assert!(record.path.is_dir());
    }

    let status = app.status.clone().unwrap();
    assert!(status.text.contains("Moved 2 game(s)"), "{}", status.text);
    assert!(status.text.contains("1 skipped"), "{}", status.text);

    // Catalog hit disk: a fresh load sees the reconciled state.
    let reloaded = CatalogStore::load(
        app.catalog.path().to_path_buf(),
        &[app.pane_volume(Pane::Left).id.clone()],
    );
    assert_eq!(reloaded.records(&app.pane_volume(Pane::Right).id).len(), 2);
}

#[test]
fn failed_move_leaves_record_in_place_and_reports_it() {
    let (_tmp, mut app) = fixture();
    add_game_dir(&mut app, Pane::Left, "Alpha");
    // Occupy the destination with a regular file so the move cannot land.
    let blocker = app.pane_volume(Pane::Right).root.join("Alpha");
    fs::write(&blocker, b"occupied").unwrap();

    app.start_move();
    let outcome = drain_to_outcome(&mut app);
    app.finish_batch(outcome);

    let left: Vec<&str> = app
        .pane_records(Pane::Left)
        .iter()
        .map(|g| g.name.as_str())
        .collect();
    assert_eq!(left, vec!["Alpha"]);
    assert!(app.pane_records(Pane::Right).is_empty());
    assert!(app.pane_records(Pane::Left)[0].path.is_dir());

    let status = app.status.clone().unwrap();
    assert!(status.text.contains("Moved 0 game(s)"), "{}", status.text);
    assert!(status.text.contains("1 failed"), "{}", status.text);
    assert_eq!(status.tone, StatusTone::Warning);
}

#[test]
fn open_with_empty_pane_warns() {
    let (_tmp, mut app) = fixture();
    app.open_selected();
    assert_eq!(app.status.as_ref().unwrap().tone, StatusTone::Warning);
}

#[test]
fn open_reports_records_missing_on_disk() {
    let (_tmp, mut app) = fixture();
    add_game_dir(&mut app, Pane::Left, "Alpha");
    let alpha = app.pane_records(Pane::Left)[0].path.clone();
    fs::remove_dir_all(&alpha).unwrap();

    app.open_selected();

    let status = app.status.as_ref().unwrap();
    assert_eq!(status.tone, StatusTone::Error);
    assert!(status.text.contains("missing on disk"), "{}", status.text);
}

#[test]
fn registration_prompt_adds_anchored_record() {
    let (_tmp, mut app) = fixture();
    let left = app.pane_volume(Pane::Left).clone();
    let game_dir = left.root.join("games").join("Foo");
    fs::create_dir_all(&game_dir).unwrap();

    app.begin_add_game();
    for c in game_dir.to_str().unwrap().chars() {
        app.push_prompt_char(c);
    }
    app.submit_prompt();

    // Second step pre-fills the folder name.
    let prompt = app.prompt.as_ref().unwrap();
    assert!(matches!(prompt.kind, PromptKind::GameName { .. }));
    assert_eq!(prompt.buffer, "Foo");
    app.submit_prompt();

    let records = app.pane_records(Pane::Left);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "Foo");
    assert_eq!(records[0].original_path, Some(game_dir));
    assert_eq!(records[0].original_drive, Some(left.id));
}

#[test]
fn registration_rejects_paths_outside_managed_volumes() {
    let (_tmp, mut app) = fixture();
    let stray = tempdir().unwrap();

    app.begin_add_game();
    for c in stray.path().to_str().unwrap().chars() {
        app.push_prompt_char(c);
    }
    app.submit_prompt();

    assert!(app.prompt.is_none());
    assert_eq!(app.status.as_ref().unwrap().tone, StatusTone::Error);
    assert!(app.pane_records(Pane::Left).is_empty());
}

#[test]
fn registration_rejects_missing_paths() {
    let (_tmp, mut app) = fixture();
    let ghost = app.pane_volume(Pane::Left).root.join("nope");
    assert!(!Path::new(&ghost).exists());

    app.begin_add_game();
    for c in ghost.to_str().unwrap().chars() {
        app.push_prompt_char(c);
    }
    app.submit_prompt();

    assert!(app.prompt.is_none());
    assert_eq!(app.status.as_ref().unwrap().tone, StatusTone::Error);
}

#[test]
fn cursor_clamps_to_list_bounds() {
    let (_tmp, mut app) = fixture();
    add_game_dir(&mut app, Pane::Left, "Alpha");
    add_game_dir(&mut app, Pane::Left, "Beta");

    app.move_cursor(-5);
    assert_eq!(app.cursor(Pane::Left), 0);
    app.move_cursor(10);
    assert_eq!(app.cursor(Pane::Left), 1);

    app.focus_other();
    app.move_cursor(1); // empty pane, no-op
    assert_eq!(app.cursor(Pane::Right), 0);
}
