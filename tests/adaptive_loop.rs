use std::time::Duration;

use tempfile::TempDir;

use typefast::app::App;
use typefast::config::Config;
use typefast::store::json_store::JsonStore;

const KEY_INTERVAL: Duration = Duration::from_millis(250);

fn config_in(dir: &TempDir, seed: u64) -> Config {
    Config {
        seed: Some(seed),
        stats_file: dir.path().join("stats.json").to_string_lossy().to_string(),
        ..Config::default()
    }
}

fn open_app(config: &Config) -> App {
    let store = JsonStore::new(config.stats_path()).unwrap();
    App::new(config.clone(), Some(store))
}

/// Type the current text at a steady pace, substituting `'x'` for `fumble`.
fn type_drill(app: &mut App, fumble: Option<char>) {
    let text = app.current_text().unwrap();
    let t0 = app.drill.as_ref().unwrap().presented_at;
    for (i, expected) in text.chars().enumerate() {
        let ch = if Some(expected) == fumble { 'x' } else { expected };
        app.type_char(ch, t0 + KEY_INTERVAL * (i as u32 + 1));
    }
    app.finish_drill().unwrap();
}

#[test]
fn steady_typist_unlocks_new_keys_in_order() {
    let dir = TempDir::new().unwrap();
    let mut app = open_app(&config_in(&dir, 11));

    let mut unlocked = Vec::new();
    for _ in 0..60 {
        if let Some(key) = app.start_drill() {
            unlocked.push(key);
        }
        let text = app.current_text().unwrap();
        assert!(text.chars().all(|c| app.tracker.is_unlocked(c)), "{text}");
        type_drill(&mut app, None);
        if unlocked.len() >= 2 {
            break;
        }
    }

    assert_eq!(unlocked, vec!['g', 'h']);
    assert!(app.tracker.total_keys_typed() > 450);
}

#[test]
fn fumbled_key_becomes_the_practice_target() {
    let dir = TempDir::new().unwrap();
    let mut app = open_app(&config_in(&dir, 5));

    // Enough drills to build a record while staying short of an unlock.
    for _ in 0..5 {
        assert_eq!(app.start_drill(), None);
        type_drill(&mut app, Some('k'));
    }
    assert!(app.tracker.total_keys_typed() < 400);

    let snapshot = app.tracker.snapshot();
    assert_eq!(snapshot.ranked_keys()[0].0, 'k');
    assert!(snapshot.difficult_keys().contains(&'k'));
    assert!(app.tracker.key_stat('k').unwrap().accuracy_pct() == Some(0.0));

    let mut with_k = 0;
    let mut total = 0;
    for _ in 0..25 {
        app.start_drill();
        let text = app.current_text().unwrap();
        for word in text.split(' ') {
            total += 1;
            if word.contains('k') {
                with_k += 1;
            }
        }
    }
    assert!(with_k * 2 > total, "{with_k} of {total} words contain 'k'");
}

#[test]
fn progress_survives_restart() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir, 23);

    let (typed, unlocked) = {
        let mut app = open_app(&config);
        for _ in 0..3 {
            app.start_drill();
            type_drill(&mut app, None);
        }
        app.save().unwrap();
        (app.tracker.total_keys_typed(), app.tracker.unlocked_keys().clone())
    };

    let app = open_app(&config);
    assert_eq!(app.tracker.session_count(), 2);
    assert_eq!(app.tracker.total_keys_typed(), typed);
    assert_eq!(app.tracker.unlocked_keys(), &unlocked);
    assert!(app.tracker.last_practice_at().is_some());
}

#[test]
fn export_then_import_into_fresh_store() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir, 29);
    let mut app = open_app(&config);
    app.start_drill();
    type_drill(&mut app, Some('s'));
    app.save().unwrap();

    let store = JsonStore::new(config.stats_path()).unwrap();
    let export_path = dir.path().join("backup.json");
    store.export_to(&export_path, 50).unwrap();

    let other = TempDir::new().unwrap();
    let fresh = JsonStore::new(other.path().join("stats.json")).unwrap();
    let imported = fresh.import_from(&export_path, 50).unwrap();
    assert_eq!(imported, store.load_state(50));
    assert!(imported.key_stats.contains_key(&'s'));
}
