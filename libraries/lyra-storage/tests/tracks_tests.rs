//! Integration tests for the tracks vertical slice
//!
//! Covers upsert-by-path identity, change detection, and the inverted
//! delete used by the sync reconciler.


use test_helpers::*;

#[tokio::test]
async fn upsert_inserts_new_track() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let track = sample_track("/music/a.mp3", Some("Artist X"), Some("Album X"));
    let outcome = lyra_storage::tracks::upsert(pool, &track)
        .await
        .expect("upsert failed");

    assert!(outcome.changed);
    assert_eq!(outcome.track.file_path, "/music/a.mp3");
    assert_eq!(outcome.track.title, Some("a".to_string()));

    let stored = lyra_storage::tracks::find_by_path(pool, "/music/a.mp3")
        .await
        .expect("query failed")
        .expect("track not found");
    assert_eq!(stored.artist, Some("Artist X".to_string()));
}

#[tokio::test]
async fn upsert_is_idempotent_for_unchanged_content() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let track = sample_track("/music/a.mp3", Some("Artist X"), None);
    let first = lyra_storage::tracks::upsert(pool, &track).await.unwrap();
    assert!(first.changed);

    let second = lyra_storage::tracks::upsert(pool, &track).await.unwrap();
    assert!(!second.changed, "identical content must not count as changed");

    // Original added_at survives
    assert_eq!(second.track.added_at, first.track.added_at);

    let all = lyra_storage::tracks::get_all(pool).await.unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn upsert_updates_changed_metadata_in_place() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let mut track = sample_track("/music/a.mp3", Some("Artist X"), None);
    lyra_storage::tracks::upsert(pool, &track).await.unwrap();

    track.title = Some("Renamed".to_string());
    let outcome = lyra_storage::tracks::upsert(pool, &track).await.unwrap();
    assert!(outcome.changed);
    assert_eq!(outcome.track.title, Some("Renamed".to_string()));

    let all = lyra_storage::tracks::get_all(pool).await.unwrap();
    assert_eq!(all.len(), 1, "update must not create a second row");
}

#[tokio::test]
async fn upsert_materializes_artist_and_album_rows() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let track = sample_track("/music/a.mp3", Some("Artist X"), Some("Album X"));
    lyra_storage::tracks::upsert(pool, &track).await.unwrap();

    let artists = lyra_storage::artists::get_all(pool).await.unwrap();
    assert_eq!(artists.len(), 1);
    assert_eq!(artists[0].name, "Artist X");

    let albums = lyra_storage::albums::get_all(pool).await.unwrap();
    assert_eq!(albums.len(), 1);
    assert_eq!(albums[0].name, "Album X");
    assert_eq!(albums[0].artist_name, Some("Artist X".to_string()));
}

#[tokio::test]
async fn delete_not_in_removes_only_missing_paths() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    for path in ["/music/a.mp3", "/music/b.mp3", "/music/c.mp3"] {
        let track = sample_track(path, None, None);
        lyra_storage::tracks::upsert(pool, &track).await.unwrap();
    }

    let keep = vec!["/music/a.mp3".to_string(), "/music/c.mp3".to_string()];
    let deleted = lyra_storage::tracks::delete_not_in(pool, &keep)
        .await
        .unwrap();
    assert_eq!(deleted, 1);

    let remaining = lyra_storage::tracks::get_all(pool).await.unwrap();
    let paths: Vec<_> = remaining.iter().map(|t| t.file_path.as_str()).collect();
    assert_eq!(paths, ["/music/a.mp3", "/music/c.mp3"]);
}

#[tokio::test]
async fn delete_not_in_with_empty_set_clears_table() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let track = sample_track("/music/a.mp3", None, None);
    lyra_storage::tracks::upsert(pool, &track).await.unwrap();

    let deleted = lyra_storage::tracks::delete_not_in(pool, &[]).await.unwrap();
    assert_eq!(deleted, 1);
    assert!(lyra_storage::tracks::get_all(pool).await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_not_in_handles_keep_sets_beyond_the_bind_limit() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let kept = sample_track("/music/track-00000.mp3", None, None);
    let doomed = sample_track("/music/gone.mp3", None, None);
    lyra_storage::tracks::upsert(pool, &kept).await.unwrap();
    lyra_storage::tracks::upsert(pool, &doomed).await.unwrap();

    // More paths than SQLite allows bound variables in one statement.
    let keep: Vec<String> = (0..40_000)
        .map(|i| format!("/music/track-{i:05}.mp3"))
        .collect();

    let deleted = lyra_storage::tracks::delete_not_in(pool, &keep)
        .await
        .unwrap();
    assert_eq!(deleted, 1);

    let remaining = lyra_storage::tracks::get_all(pool).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].file_path, "/music/track-00000.mp3");
}
