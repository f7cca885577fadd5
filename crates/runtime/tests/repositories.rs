use std::fs;

use game_core::{GameConfig, LoadError, RunState};
use runtime::{
    BattleRecord, FileHistoryRepository, FileLogSink, FileSaveRepository, HistoryRepository,
    LogSink, RepositoryError, SaveRepository,
};
use tempfile::TempDir;

fn record(floor: u32, won: bool) -> BattleRecord {
    BattleRecord {
        seed: 42,
        floor,
        node_id: "1_0".to_string(),
        room_type: game_core::RoomType::Battle,
        won,
        turns: 4,
        player_hp: 61,
        player_max_hp: 80,
        enemies: Vec::new(),
        stats: Default::default(),
        recorded_at: 1_700_000_000,
    }
}

#[test]
fn save_round_trip() {
    let dir = TempDir::new().unwrap();
    let repo = FileSaveRepository::new(dir.path()).unwrap();
    assert!(repo.load().unwrap().is_none());
    assert!(!repo.exists());

    let run = RunState::new(42, &GameConfig::new());
    repo.save(&run.snapshot()).unwrap();

    let loaded = repo.load().unwrap().unwrap();
    assert_eq!(RunState::restore(&loaded).unwrap(), run);

    repo.clear().unwrap();
    assert!(!repo.exists());
}

#[test]
fn incompatible_saves_are_surfaced() {
    let dir = TempDir::new().unwrap();
    let repo = FileSaveRepository::new(dir.path()).unwrap();

    let mut snapshot = RunState::new(42, &GameConfig::new()).snapshot();
    snapshot.version = 3;
    fs::write(repo.path(), serde_json::to_string(&snapshot).unwrap()).unwrap();

    let error = repo.load().unwrap_err();
    assert!(matches!(
        error,
        RepositoryError::Load(LoadError::IncompatibleVersion {
            found: 3,
            expected: 5
        })
    ));
}

#[test]
fn garbage_saves_are_malformed() {
    let dir = TempDir::new().unwrap();
    let repo = FileSaveRepository::new(dir.path()).unwrap();
    fs::write(repo.path(), "{ not json").unwrap();

    assert!(matches!(
        repo.load(),
        Err(RepositoryError::Load(LoadError::Malformed(_)))
    ));
}

#[test]
fn history_appends_in_order() {
    let dir = TempDir::new().unwrap();
    let repo = FileHistoryRepository::new(dir.path()).unwrap();
    assert!(repo.load().unwrap().is_empty());

    repo.append(&record(1, true)).unwrap();
    repo.append(&record(2, false)).unwrap();

    // A fresh handle reads what the first one wrote.
    let reopened = FileHistoryRepository::new(dir.path()).unwrap();
    let records = reopened.load().unwrap();
    assert_eq!(records, vec![record(1, true), record(2, false)]);

    reopened.clear().unwrap();
    assert!(repo.load().unwrap().is_empty());
}

#[test]
fn truncated_history_is_corrupted() {
    let dir = TempDir::new().unwrap();
    let repo = FileHistoryRepository::new(dir.path()).unwrap();
    repo.append(&record(1, true)).unwrap();

    let mut bytes = fs::read(repo.path()).unwrap();
    bytes.truncate(bytes.len() - 3);
    fs::write(repo.path(), bytes).unwrap();

    assert!(matches!(
        repo.load(),
        Err(RepositoryError::CorruptedData(_))
    ));
}

#[test]
fn log_sink_appends_lines() {
    let dir = TempDir::new().unwrap();
    let sink = FileLogSink::new(dir.path()).unwrap();
    sink.write_line("entered 1_0 (battle)").unwrap();
    sink.write_line("  turn 1 started").unwrap();

    let text = fs::read_to_string(sink.path()).unwrap();
    assert_eq!(text, "entered 1_0 (battle)\n  turn 1 started\n");

    sink.clear().unwrap();
    assert!(!sink.path().exists());
}
