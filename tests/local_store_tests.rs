//! Local team/round store behavior.

mod support;

use std::sync::Arc;

use support::{round_for, team, CANONICAL_LAP_TIMES};
use wettkampf_timer::db::{LocalStore, RepositoryError};
use wettkampf_timer::services::{LapRecorder, TeamContext};

#[tokio::test]
async fn test_rounds_are_newest_first_and_filtered_by_team() {
    let store = LocalStore::open_in_memory().await.unwrap();
    let red = team("Löschzwerge", 0);
    let blue = team("Funkenflieger", 1);
    store.save_team(&red).await.unwrap();
    store.save_team(&blue).await.unwrap();

    let early = round_for(&red, &CANONICAL_LAP_TIMES, 0);
    let late = round_for(&red, &CANONICAL_LAP_TIMES, 30);
    let other = round_for(&blue, &CANONICAL_LAP_TIMES, 15);
    for round in [&early, &late, &other] {
        store.save_round(round).await.unwrap();
    }

    let all: Vec<_> = store.get_all_rounds().await.unwrap().into_iter().map(|r| r.id).collect();
    assert_eq!(all, vec![late.id, other.id, early.id]);

    let red_rounds: Vec<_> = store
        .get_rounds_by_team(red.id)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(red_rounds, vec![late.id, early.id]);

    assert_eq!(store.get_latest_round(red.id).await.unwrap().unwrap().id, late.id);
}

#[tokio::test]
async fn test_teams_are_oldest_first() {
    let store = LocalStore::open_in_memory().await.unwrap();
    let newer = team("B", 5);
    let older = team("A", 1);
    store.save_team(&newer).await.unwrap();
    store.save_team(&older).await.unwrap();

    let names: Vec<_> = store
        .get_all_teams()
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.name)
        .collect();
    assert_eq!(names, vec!["A", "B"]);
}

#[tokio::test]
async fn test_delete_team_cascades_and_keeps_last_team() {
    let store = LocalStore::open_in_memory().await.unwrap();
    let red = team("Löschzwerge", 0);
    let blue = team("Funkenflieger", 1);
    store.save_team(&red).await.unwrap();
    store.save_team(&blue).await.unwrap();
    store.save_round(&round_for(&red, &CANONICAL_LAP_TIMES, 0)).await.unwrap();
    let kept = round_for(&blue, &CANONICAL_LAP_TIMES, 5);
    store.save_round(&kept).await.unwrap();

    store.delete_team(red.id).await.unwrap();
    let rounds = store.get_all_rounds().await.unwrap();
    assert_eq!(rounds.len(), 1);
    assert_eq!(rounds[0].id, kept.id);

    let err = store.delete_team(blue.id).await.unwrap_err();
    assert!(matches!(err, RepositoryError::ValidationError { .. }));
    assert_eq!(store.get_all_teams().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_round_mutations() {
    let store = LocalStore::open_in_memory().await.unwrap();
    let red = team("Löschzwerge", 0);
    let mut round = round_for(&red, &CANONICAL_LAP_TIMES, 0);
    store.save_round(&round).await.unwrap();

    round.scoring.knot_time = Some(31.0);
    store.save_round(&round).await.unwrap();
    assert_eq!(
        store.get_round(round.id).await.unwrap().unwrap().scoring.knot_time,
        Some(31.0)
    );

    store.delete_round(round.id).await.unwrap();
    assert!(store.get_round(round.id).await.unwrap().is_none());

    store.save_round(&round).await.unwrap();
    store.clear_all_rounds().await.unwrap();
    assert!(store.get_all_rounds().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_snapshot_file_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("store.json");

    let store = LocalStore::open_file(&path).await.unwrap();
    let context = TeamContext::load(&store).await.unwrap();
    let team = context.selected().clone();

    let mut recorder = LapRecorder::new();
    recorder.start().unwrap();
    for (i, &time) in CANONICAL_LAP_TIMES.iter().enumerate() {
        let at = support::start_time() + chrono::Duration::milliseconds(time);
        recorder.record_lap(time, at).unwrap();
        assert_eq!(recorder.laps().len(), i + 1);
    }
    assert!(recorder.is_finished());
    let round = recorder.to_round(&team, support::start_time()).unwrap();
    store.save_round(&round).await.unwrap();
    store.set_setting("soundEnabled", &false).await.unwrap();
    drop(store);

    let reopened = LocalStore::open_file(&path).await.unwrap();
    let reloaded = TeamContext::load(&reopened).await.unwrap();
    assert_eq!(reloaded.selected().id, team.id);
    assert_eq!(reopened.get_all_rounds().await.unwrap(), vec![round]);
    assert_eq!(reopened.get_setting::<bool>("soundEnabled").await.unwrap(), Some(false));
}

#[tokio::test]
async fn test_unopened_store_rejects_operations() {
    let store = LocalStore::in_memory();
    let red = team("Löschzwerge", 0);
    let err = store.save_team(&red).await.unwrap_err();
    assert!(matches!(err, RepositoryError::NotInitialized { .. }));
    assert!(store.get_rounds_by_team(red.id).await.is_err());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_saves_keep_snapshot_readable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");
    let store = Arc::new(LocalStore::open_file(&path).await.unwrap());
    let red = team("Löschzwerge", 0);

    let handles: Vec<_> = (0..32)
        .map(|i| {
            let store = Arc::clone(&store);
            let round = round_for(&red, &CANONICAL_LAP_TIMES, i);
            tokio::spawn(async move { store.save_round(&round).await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(store.get_all_rounds().await.unwrap().len(), 32);
    let reopened = LocalStore::open_file(&path).await.unwrap();
    assert_eq!(reopened.get_all_rounds().await.unwrap().len(), 32);
}

#[tokio::test]
async fn test_failed_write_commits_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let blocked = dir.path().join("sub");
    let path = blocked.join("store.json");

    let store = LocalStore::open_file(&path).await.unwrap();
    std::fs::write(&blocked, "not a directory").unwrap();

    let err = store.save_team(&team("Löschzwerge", 0)).await.unwrap_err();
    assert!(matches!(err, RepositoryError::IoError { .. }));
    assert!(store.get_all_teams().await.unwrap().is_empty());

    std::fs::remove_file(&blocked).unwrap();
    let saved = team("Funkenflieger", 1);
    store.save_team(&saved).await.unwrap();
    let reopened = LocalStore::open_file(&path).await.unwrap();
    let teams = reopened.get_all_teams().await.unwrap();
    assert_eq!(teams.len(), 1);
    assert_eq!(teams[0].id, saved.id);
}
