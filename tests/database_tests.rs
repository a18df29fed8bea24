use chrono::{NaiveDate, NaiveTime};
use pretty_assertions::assert_eq;
use uuid::Uuid;

use bookline::database::repositories::{AssignOutcome, ReserveOutcome, SlotReservation};

mod common;

fn reservation(service_id: Uuid, user_id: Uuid, time: &str) -> SlotReservation {
    SlotReservation {
        service_id,
        user_id,
        scheduled_date: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
        scheduled_time: NaiveTime::parse_from_str(time, "%H:%M").unwrap(),
        location: "Main studio".to_string(),
    }
}

#[actix_web::test]
async fn test_reserve_is_first_wins_on_the_tuple() {
    common::setup_test_env();
    let ctx = common::TestCtx::new().await.unwrap();
    let service = common::seed_service(&ctx, Uuid::new_v4()).await;
    let alice = common::seed_user(&ctx).await;
    let bob = common::seed_user(&ctx).await;

    let first = ctx
        .state
        .slots
        .reserve(reservation(service.id, alice.id, "10:00"))
        .await
        .unwrap();
    assert!(matches!(first, ReserveOutcome::Reserved(_)));

    // Same tuple, different user: the unique index decides
    let second = ctx
        .state
        .slots
        .reserve(reservation(service.id, bob.id, "10:00"))
        .await
        .unwrap();
    assert!(matches!(second, ReserveOutcome::SlotTaken));

    // A different time on the same day is free
    let other = ctx
        .state
        .slots
        .reserve(reservation(service.id, bob.id, "11:00"))
        .await
        .unwrap();
    assert!(matches!(other, ReserveOutcome::Reserved(_)));
}

#[actix_web::test]
async fn test_release_frees_the_tuple_and_reports_the_cascade() {
    common::setup_test_env();
    let ctx = common::TestCtx::new().await.unwrap();
    let owner_id = Uuid::new_v4();
    let service = common::seed_service(&ctx, owner_id).await;
    let user = common::seed_user(&ctx).await;
    let booking = common::seed_booking(&ctx, service.id, user.id, "2024-06-15", "10:00").await;

    for _ in 0..2 {
        let staff = common::seed_staff(&ctx, owner_id).await;
        ctx.state
            .assignments
            .assign(booking.id, staff.id)
            .await
            .unwrap();
    }

    let released = ctx
        .state
        .slots
        .release(booking.id)
        .await
        .unwrap()
        .expect("first release frees the slot");
    assert_eq!(released.booking_id, booking.id);
    assert_eq!(released.service_id, service.id);
    assert_eq!(released.owner_id, owner_id);
    assert_eq!(released.scheduled_time.to_string(), "10:00:00");
    assert_eq!(released.released_assignments, 2);

    // Second release finds nothing live
    let repeat = ctx.state.slots.release(booking.id).await.unwrap();
    assert!(repeat.is_none());

    // The tuple is reservable again
    let again = ctx
        .state
        .slots
        .reserve(reservation(service.id, user.id, "10:00"))
        .await
        .unwrap();
    assert!(matches!(again, ReserveOutcome::Reserved(_)));
}

#[actix_web::test]
async fn test_release_of_unknown_booking_is_none() {
    common::setup_test_env();
    let ctx = common::TestCtx::new().await.unwrap();

    let released = ctx.state.slots.release(Uuid::new_v4()).await.unwrap();
    assert!(released.is_none());
}

#[actix_web::test]
async fn test_assignment_rows_toggle_instead_of_duplicating() {
    common::setup_test_env();
    let ctx = common::TestCtx::new().await.unwrap();
    let owner_id = Uuid::new_v4();
    let service = common::seed_service(&ctx, owner_id).await;
    let user = common::seed_user(&ctx).await;
    let staff = common::seed_staff(&ctx, owner_id).await;
    let booking = common::seed_booking(&ctx, service.id, user.id, "2024-06-15", "10:00").await;
    let engine = &ctx.state.assignments;

    let first = engine.assign(booking.id, staff.id).await.unwrap();
    assert!(first.active);

    common::assert_record_count(&ctx.db.pool, "staff_assignments", 1).await;

    // Releasing keeps the row for history
    engine.unassign(booking.id, staff.id).await.unwrap();
    common::assert_record_count(&ctx.db.pool, "staff_assignments", 1).await;
    let active = engine.list_by_booking(booking.id).await.unwrap();
    assert!(active.is_empty());

    // Re-assigning reactivates the same row
    let second = engine.assign(booking.id, staff.id).await.unwrap();
    assert_eq!(second.id, first.id);
    assert!(second.active);
    common::assert_record_count(&ctx.db.pool, "staff_assignments", 1).await;
}

#[actix_web::test]
async fn test_raw_assign_outcome_distinguishes_active_pairs() {
    common::setup_test_env();
    let ctx = common::TestCtx::new().await.unwrap();
    let owner_id = Uuid::new_v4();
    let service = common::seed_service(&ctx, owner_id).await;
    let user = common::seed_user(&ctx).await;
    let staff = common::seed_staff(&ctx, owner_id).await;
    let booking = common::seed_booking(&ctx, service.id, user.id, "2024-06-15", "10:00").await;

    let assignments =
        bookline::database::repositories::AssignmentRepository::new(ctx.db.pool.clone());

    let outcome = assignments.assign(booking.id, staff.id).await.unwrap();
    assert!(matches!(outcome, AssignOutcome::Assigned(_)));

    let outcome = assignments.assign(booking.id, staff.id).await.unwrap();
    assert!(matches!(outcome, AssignOutcome::PairActive));

    assert!(assignments.pair_exists(booking.id, staff.id).await.unwrap());
    assert!(
        !assignments
            .pair_exists(booking.id, Uuid::new_v4())
            .await
            .unwrap()
    );
}

#[actix_web::test]
async fn test_booked_times_skip_cancelled_rows() {
    common::setup_test_env();
    let ctx = common::TestCtx::new().await.unwrap();
    let service = common::seed_service(&ctx, Uuid::new_v4()).await;
    let user = common::seed_user(&ctx).await;

    common::seed_booking(&ctx, service.id, user.id, "2024-06-15", "10:00").await;
    let doomed = common::seed_booking(&ctx, service.id, user.id, "2024-06-15", "11:00").await;
    ctx.state.slots.release(doomed.id).await.unwrap();

    let times = ctx
        .state
        .slots
        .booked_times(service.id, NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
        .await
        .unwrap();

    assert_eq!(times, vec![NaiveTime::from_hms_opt(10, 0, 0).unwrap()]);
}

#[actix_web::test]
async fn test_stats_repository_aggregates_live_rows_only() {
    common::setup_test_env();
    let ctx = common::TestCtx::new().await.unwrap();
    let owner_id = Uuid::new_v4();
    let service = common::seed_service(&ctx, owner_id).await;
    let alice = common::seed_user(&ctx).await;
    let bob = common::seed_user(&ctx).await;

    common::seed_booking(&ctx, service.id, alice.id, "2024-06-15", "10:00").await;
    common::seed_booking(&ctx, service.id, alice.id, "2024-06-15", "11:00").await;
    let doomed = common::seed_booking(&ctx, service.id, bob.id, "2024-06-15", "12:00").await;
    ctx.state.slots.release(doomed.id).await.unwrap();

    let stats = bookline::database::repositories::StatsRepository::new(ctx.db.pool.clone());

    let per_service = stats.stats_for_service(service.id).await.unwrap();
    assert_eq!(per_service.total_booking_count, 2);
    assert_eq!(per_service.unique_users_count, 1);
    assert_eq!(per_service.total_price_cents, 20_000);

    let per_owner = stats.stats_for_owner(owner_id).await.unwrap();
    assert_eq!(per_owner.service_count, 1);
    assert_eq!(per_owner.total_booking_count, 2);
}
