/// SeaORM repository tests against a migrated SQLite file
///
/// Tests cover:
/// - Hydrated reservation reads and filters
/// - Unique slot index and concurrent inserts
/// - Referential checks on theme and time deletion, also under concurrent writes
/// - Popular theme ranking
mod common;

use std::sync::Arc;

use chrono::NaiveDate;
use roomescape::application::ReservationService;
use roomescape::domain::{
    ClientName, ConflictKind, DomainError, EntityKind, RepositoryProvider, Reservation,
    ReservationDate, ReservationId, ReservationTime, Theme, ThemeId, TimeId,
};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn booking(day: &str, name: &str, time: &ReservationTime, theme: &Theme) -> Reservation {
    Reservation::new(
        ClientName::new(name).unwrap(),
        ReservationDate::parse(day).unwrap(),
        time.clone(),
        theme.clone(),
    )
    .unwrap()
}

#[tokio::test]
async fn saved_reservation_reads_back_hydrated() {
    let t = common::sqlite().await;
    let repos = t.repos.as_ref();
    let theme = common::theme(repos, "Secret").await;
    let time = common::time(repos, "10:00").await;

    let saved = repos
        .reservations()
        .save(booking("2024-06-01", "Kelly", &time, &theme))
        .await
        .unwrap();
    let id = saved.id().unwrap();

    let loaded = repos.reservations().find_by_id(id).await.unwrap().unwrap();
    assert_eq!(loaded, saved);
    assert_eq!(loaded.theme().name().value(), "Secret");
    assert_eq!(loaded.time().start_at(), time.start_at());

    assert!(repos
        .reservations()
        .find_by_id(ReservationId(999))
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn lists_are_ordered_and_filtered() {
    let t = common::sqlite().await;
    let repos = t.repos.as_ref();
    let secret = common::theme(repos, "Secret").await;
    let horror = common::theme(repos, "Horror").await;
    let late = common::time(repos, "14:00").await;
    let early = common::time(repos, "10:00").await;

    let starts: Vec<_> = repos
        .times()
        .find_all()
        .await
        .unwrap()
        .iter()
        .map(|t| t.start_at())
        .collect();
    assert_eq!(starts, vec![early.start_at(), late.start_at()]);

    repos
        .reservations()
        .save(booking("2024-06-01", "a", &late, &secret))
        .await
        .unwrap();
    repos
        .reservations()
        .save(booking("2024-06-01", "b", &early, &horror))
        .await
        .unwrap();
    repos
        .reservations()
        .save(booking("2024-06-02", "c", &early, &secret))
        .await
        .unwrap();

    let all = repos.reservations().find_all().await.unwrap();
    let ids: Vec<i32> = all.iter().filter_map(|r| r.id()).map(|id| id.value()).collect();
    assert_eq!(ids, vec![1, 2, 3]);

    let filtered = repos
        .reservations()
        .find_all_by_date_and_theme(date("2024-06-01"), secret.id().unwrap())
        .await
        .unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].client_name().value(), "a");

    assert!(repos
        .reservations()
        .exists_by_date_and_time_and_theme(date("2024-06-02"), early.id().unwrap(), secret.id().unwrap())
        .await
        .unwrap());
    assert!(!repos
        .reservations()
        .exists_by_date_and_time_and_theme(date("2024-06-02"), late.id().unwrap(), secret.id().unwrap())
        .await
        .unwrap());
}

#[tokio::test]
async fn unique_index_rejects_a_second_booking_of_the_slot() {
    let t = common::sqlite().await;
    let repos = t.repos.as_ref();
    let theme = common::theme(repos, "Secret").await;
    let time = common::time(repos, "10:00").await;

    repos
        .reservations()
        .save(booking("2024-06-01", "Kelly", &time, &theme))
        .await
        .unwrap();
    let err = repos
        .reservations()
        .save(booking("2024-06-01", "Brown", &time, &theme))
        .await
        .unwrap_err();
    assert!(err.is_conflict(ConflictKind::DuplicateBooking));
    assert_eq!(repos.reservations().find_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn concurrent_bookings_of_one_slot_store_a_single_row() {
    let t = common::sqlite().await;
    let theme = common::theme(t.repos.as_ref(), "Secret").await;
    let time = common::time(t.repos.as_ref(), "10:00").await;
    let service = Arc::new(ReservationService::new(t.repos.clone()));

    let mut handles = Vec::new();
    for i in 0..6 {
        let service = service.clone();
        let (time_id, theme_id) = (time.id().unwrap(), theme.id().unwrap());
        handles.push(tokio::spawn(async move {
            service
                .create_reservation("2024-06-01", &format!("guest{}", i), time_id, theme_id)
                .await
        }));
    }

    let mut succeeded = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => succeeded += 1,
            Err(e) => assert!(e.is_conflict(ConflictKind::DuplicateBooking), "{}", e),
        }
    }
    assert_eq!(succeeded, 1);
    assert_eq!(t.repos.reservations().find_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn save_with_missing_reference_is_not_found() {
    let t = common::sqlite().await;
    let repos = t.repos.as_ref();
    let theme = common::theme(repos, "Secret").await;
    let ghost_time = ReservationTime::parse("10:00").unwrap().with_id(TimeId(42));

    let err = repos
        .reservations()
        .save(booking("2024-06-01", "Kelly", &ghost_time, &theme))
        .await
        .unwrap_err();
    assert!(err.is_not_found(EntityKind::Time));
}

#[tokio::test]
async fn referenced_theme_and_time_are_protected() {
    let t = common::sqlite().await;
    let repos = t.repos.as_ref();
    let theme = common::theme(repos, "Secret").await;
    let time = common::time(repos, "10:00").await;
    let (theme_id, time_id) = (theme.id().unwrap(), time.id().unwrap());

    let saved = repos
        .reservations()
        .save(booking("2024-06-01", "Kelly", &time, &theme))
        .await
        .unwrap();
    assert!(repos.reservations().exists_by_theme_id(theme_id).await.unwrap());
    assert!(repos.reservations().exists_by_time_id(time_id).await.unwrap());

    let err = repos.themes().delete_by_id(theme_id).await.unwrap_err();
    assert!(err.is_conflict(ConflictKind::ThemeInUse));
    let err = repos.times().delete_by_id(time_id).await.unwrap_err();
    assert!(err.is_conflict(ConflictKind::TimeInUse));

    assert!(repos
        .reservations()
        .delete_by_id(saved.id().unwrap())
        .await
        .unwrap());
    assert!(!repos
        .reservations()
        .delete_by_id(saved.id().unwrap())
        .await
        .unwrap());

    assert!(repos.times().delete_by_id(time_id).await.unwrap());
    assert!(repos.themes().delete_by_id(theme_id).await.unwrap());
    assert!(!repos.themes().delete_by_id(theme_id).await.unwrap());
    assert!(!repos.themes().exists_by_id(theme_id).await.unwrap());
    assert!(!repos.times().exists_by_id(time_id).await.unwrap());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_deletes_of_unreferenced_rows_all_succeed() {
    let t = common::sqlite().await;
    let booked_theme = common::theme(t.repos.as_ref(), "Booked").await;
    let booked_time = common::time(t.repos.as_ref(), "09:00").await;

    for round in 0..10u32 {
        let theme = common::theme(t.repos.as_ref(), &format!("Theme {}", round)).await;
        let time = common::time(t.repos.as_ref(), &format!("{:02}:30", round + 10)).await;
        let day = format!("2024-07-{:02}", round + 1);
        let reservation = booking(&day, "Kelly", &booked_time, &booked_theme);

        let (themes, times, reservations) = (t.repos.clone(), t.repos.clone(), t.repos.clone());
        let (theme_id, time_id) = (theme.id().unwrap(), time.id().unwrap());
        let (deleted_theme, deleted_time, booked) = tokio::join!(
            tokio::spawn(async move { themes.themes().delete_by_id(theme_id).await }),
            tokio::spawn(async move { times.times().delete_by_id(time_id).await }),
            tokio::spawn(async move { reservations.reservations().save(reservation).await }),
        );

        let deleted_theme = deleted_theme.unwrap();
        let deleted_time = deleted_time.unwrap();
        assert!(matches!(deleted_theme, Ok(true)), "round {}: {:?}", round, deleted_theme);
        assert!(matches!(deleted_time, Ok(true)), "round {}: {:?}", round, deleted_time);
        assert!(booked.unwrap().is_ok(), "round {}", round);
        assert!(!t.repos.themes().exists_by_id(theme_id).await.unwrap());
        assert!(!t.repos.times().exists_by_id(time_id).await.unwrap());
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn booking_racing_theme_deletion_has_exactly_one_winner() {
    let t = common::sqlite().await;
    let time = common::time(t.repos.as_ref(), "10:00").await;

    for round in 0..20u32 {
        let theme = common::theme(t.repos.as_ref(), &format!("Theme {}", round)).await;
        let theme_id = theme.id().unwrap();
        let reservation = booking("2024-06-01", "Kelly", &time, &theme);

        let (bookings, themes) = (t.repos.clone(), t.repos.clone());
        let (booked, deleted) = tokio::join!(
            tokio::spawn(async move { bookings.reservations().save(reservation).await }),
            tokio::spawn(async move { themes.themes().delete_by_id(theme_id).await }),
        );

        match (booked.unwrap(), deleted.unwrap()) {
            (Ok(_), Err(e)) => {
                assert!(e.is_conflict(ConflictKind::ThemeInUse), "round {}: {}", round, e)
            }
            (Err(e), Ok(true)) => {
                assert!(e.is_not_found(EntityKind::Theme), "round {}: {}", round, e)
            }
            other => panic!("round {}: unexpected outcome {:?}", round, other),
        }
    }
}

#[tokio::test]
async fn duplicate_start_time_is_a_conflict() {
    let t = common::sqlite().await;
    let repos = t.repos.as_ref();
    let time = common::time(repos, "10:00").await;

    assert!(repos.times().exists_by_start_at(time.start_at()).await.unwrap());
    let err = repos
        .times()
        .save(ReservationTime::parse("10:00:00").unwrap())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::DuplicateTime)
    ));
}

#[tokio::test]
async fn popular_themes_rank_within_the_window() {
    let t = common::sqlite().await;
    let repos: &dyn RepositoryProvider = t.repos.as_ref();

    let mut themes = Vec::new();
    for name in ["A", "B", "C", "D"] {
        themes.push(common::theme(repos, name).await);
    }
    let mut times = Vec::new();
    for start in ["10:00", "12:00", "14:00"] {
        times.push(common::time(repos, start).await);
    }

    // D x4 (two on the window edges), C x3, B x2, A only outside the window
    for time in &times {
        repos
            .reservations()
            .save(booking("2024-06-03", "x", time, &themes[2]))
            .await
            .unwrap();
    }
    for theme in [&themes[1], &themes[3]] {
        for time in &times[..2] {
            repos
                .reservations()
                .save(booking("2024-06-05", "x", time, theme))
                .await
                .unwrap();
        }
    }
    for day in ["2024-06-01", "2024-06-07"] {
        repos
            .reservations()
            .save(booking(day, "x", &times[0], &themes[3]))
            .await
            .unwrap();
    }
    for day in ["2024-05-31", "2024-06-08"] {
        repos
            .reservations()
            .save(booking(day, "x", &times[0], &themes[0]))
            .await
            .unwrap();
    }

    let ranked: Vec<ThemeId> = repos
        .themes()
        .find_popular_themes(date("2024-06-01"), date("2024-06-07"), 10)
        .await
        .unwrap()
        .iter()
        .filter_map(|t| t.id())
        .collect();
    assert_eq!(
        ranked,
        vec![
            themes[3].id().unwrap(),
            themes[2].id().unwrap(),
            themes[1].id().unwrap()
        ]
    );

    let top: Vec<ThemeId> = repos
        .themes()
        .find_popular_themes(date("2024-06-01"), date("2024-06-07"), 1)
        .await
        .unwrap()
        .iter()
        .filter_map(|t| t.id())
        .collect();
    assert_eq!(top, vec![themes[3].id().unwrap()]);
}
