use chrono::{Duration, NaiveDate};
use mosaic::ai::{LocalExtractor, NoImageSynthesizer};
use mosaic::collage::PoemVariant;
use mosaic::config::Config;
use mosaic::db::Database;
use mosaic::editor::Editor;
use mosaic::errors::{AppError, AppResult, LockError};
use mosaic::journal::EntryStore;
use mosaic::ops;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

// Appends a fixed line to whatever the scratch file holds.
struct AppendingEditor(&'static str);

impl Editor for AppendingEditor {
    fn edit(&self, path: &Path) -> AppResult<()> {
        let mut text = fs::read_to_string(path)?;
        text.push_str(self.0);
        fs::write(path, text)?;
        Ok(())
    }
}

fn set_up_test_env() -> (Config, Database, TempDir) {
    let temp_dir = tempdir().unwrap();
    let config = Config {
        editor: "true".to_string(),
        data_dir: temp_dir.path().to_path_buf(),
        ..Config::default()
    };
    let db = Database::open(&config.db_path()).unwrap();
    db.initialize_schema().unwrap();
    (config, db, temp_dir)
}

fn day(offset: i64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 15).unwrap() + Duration::days(offset)
}

#[test]
fn test_editor_flow_appends_to_existing_entry() {
    let (config, db, _temp_dir) = set_up_test_env();

    assert!(ops::write_entry(&config, &db, &AppendingEditor("早晨有雾"), day(0)).unwrap());
    assert!(ops::write_entry(&config, &db, &AppendingEditor("\n傍晚放晴"), day(0)).unwrap());

    assert_eq!(
        db.get(day(0)).unwrap().as_deref(),
        Some("早晨有雾\n傍晚放晴")
    );
    assert!(config.lock_dir().join("2024-01-15.lock").exists());
}

#[test]
fn test_lock_is_released_after_editing() {
    let (config, db, _temp_dir) = set_up_test_env();

    ops::write_entry(&config, &db, &AppendingEditor("一"), day(0)).unwrap();

    // A second holder can take the lock once the editor session ended.
    let lock = ops::EntryLock::acquire(&config.lock_dir(), day(0)).unwrap();
    let busy = ops::write_entry(&config, &db, &AppendingEditor("二"), day(0));
    assert!(matches!(
        busy,
        Err(AppError::Lock(LockError::EntryBusy { .. }))
    ));

    drop(lock);
    assert!(ops::write_entry(&config, &db, &AppendingEditor("二"), day(0)).unwrap());
}

#[test]
fn test_retention_across_reopen() {
    let (config, db, _temp_dir) = set_up_test_env();
    let db = db.with_retention(3);

    for offset in 0..5 {
        ops::save_text(&db, day(offset), &format!("第{}天", offset)).unwrap();
    }
    drop(db);

    let reopened = Database::open(&config.db_path()).unwrap();
    let dates: Vec<NaiveDate> = reopened
        .list()
        .unwrap()
        .into_iter()
        .map(|entry| entry.date)
        .collect();
    assert_eq!(dates, vec![day(4), day(3), day(2)]);
    assert!(reopened.get(day(0)).unwrap().is_none());
}

#[test]
fn test_generate_compose_export_flow() {
    let (config, db, _temp_dir) = set_up_test_env();
    ops::save_text(&db, day(0), "清晨的雨，打湿了窗台。我泡了一杯茶，读完半本旧书。").unwrap();

    let text = db.get(day(0)).unwrap().unwrap();
    let mut rng = StdRng::seed_from_u64(11);
    let extractor = LocalExtractor::new(StdRng::seed_from_u64(12));
    let poem =
        ops::generate_collage(&extractor, &NoImageSynthesizer, &text, day(0), &mut rng).unwrap();
    db.save_collage(&poem).unwrap();

    let stored = db.latest_collage(day(0)).unwrap().unwrap();
    assert_eq!(stored.id, poem.id);
    assert_eq!(stored.raw_pool, poem.raw_pool);
    assert_eq!(stored.four_lines.line_count(), 4);
    assert_eq!(stored.eight_lines.line_count(), 8);

    let composed = ops::compose_manual(&stored, &[vec![0, 1], vec![2]], &mut rng).unwrap();
    db.save_collage(&composed).unwrap();

    let latest = db.latest_collage(day(0)).unwrap().unwrap();
    assert_eq!(latest.id, composed.id);
    assert_ne!(latest.id, poem.id);

    let card = config.data_dir.join("export").join("manual.svg");
    ops::export_svg(&latest, PoemVariant::Manual, &card).unwrap();
    assert!(fs::read_to_string(&card).unwrap().starts_with("<svg"));
}
