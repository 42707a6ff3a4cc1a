use chrono::{DateTime, Duration, Utc};
use hearth_core::db::open_db_in_memory;
use hearth_core::{
    AdvanceOutcome, Frequency, ReminderRepository, ReminderService, RepoError,
    SqliteReminderRepository, ValidationError,
};

fn fixed_now() -> DateTime<Utc> {
    DateTime::from_timestamp_millis(1_700_000_000_000).unwrap()
}

#[test]
fn daily_reminder_first_run_is_exactly_one_day_out() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteReminderRepository::try_new(&conn).unwrap();
    let now = fixed_now();

    let reminder = repo
        .add_reminder(Frequency::Daily, "take out trash", "#kitchen", now)
        .unwrap();

    assert!(reminder.id > 0);
    assert_eq!(reminder.next_run, now + Duration::hours(24));
    assert_eq!(reminder.frequency, Frequency::Daily);
    assert_eq!(reminder.message, "take out trash");
    assert_eq!(reminder.destination, "#kitchen");
}

#[test]
fn every_written_field_round_trips_through_list() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteReminderRepository::try_new(&conn).unwrap();
    let now = fixed_now();

    let weekly = repo
        .add_reminder(Frequency::Weekly, "laundry day", "#home", now)
        .unwrap();
    let monthly = repo
        .add_reminder(Frequency::Monthly, "pay rent", "#finance", now)
        .unwrap();

    let listed = repo.list_reminders().unwrap();
    assert_eq!(listed, vec![weekly, monthly]);
}

#[test]
fn monthly_first_run_clamps_at_month_end() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteReminderRepository::try_new(&conn).unwrap();
    let jan_31: DateTime<Utc> = "2024-01-31T09:00:00Z".parse().unwrap();

    let reminder = repo
        .add_reminder(Frequency::Monthly, "change air filter", "#home", jan_31)
        .unwrap();

    let feb_29: DateTime<Utc> = "2024-02-29T09:00:00Z".parse().unwrap();
    assert_eq!(reminder.next_run, feb_29);
}

#[test]
fn unsupported_frequency_is_rejected_by_the_service() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteReminderRepository::try_new(&conn).unwrap();
    let service = ReminderService::new(repo);

    let err = service
        .schedule("biweekly", "water plants", "#garden")
        .unwrap_err();
    assert!(matches!(err, RepoError::UnsupportedFrequency(text) if text == "biweekly"));
    assert!(service.list_reminders().unwrap().is_empty());
}

#[test]
fn empty_message_and_destination_are_rejected() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteReminderRepository::try_new(&conn).unwrap();
    let now = fixed_now();

    let err = repo
        .add_reminder(Frequency::Daily, "  ", "#kitchen", now)
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::EmptyMessage)
    ));

    let err = repo
        .add_reminder(Frequency::Daily, "take out trash", "", now)
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::EmptyDestination)
    ));
}

#[test]
fn due_scan_includes_exactly_the_next_run_boundary() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteReminderRepository::try_new(&conn).unwrap();
    let now = fixed_now();

    let reminder = repo
        .add_reminder(Frequency::Daily, "take out trash", "#kitchen", now)
        .unwrap();

    let just_before = reminder.next_run - Duration::milliseconds(1);
    assert!(repo.due_reminders(just_before).unwrap().is_empty());

    let due = repo.due_reminders(reminder.next_run).unwrap();
    assert_eq!(due.len(), 1);
    assert_eq!(due[0].id, reminder.id);
}

#[test]
fn due_scan_orders_ascending_by_id() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteReminderRepository::try_new(&conn).unwrap();
    let now = fixed_now();

    let a = repo
        .add_reminder(Frequency::Daily, "first", "#a", now)
        .unwrap();
    let b = repo
        .add_reminder(Frequency::Weekly, "second", "#b", now)
        .unwrap();

    let due = repo.due_reminders(now + Duration::days(8)).unwrap();
    let ids: Vec<i64> = due.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![a.id, b.id]);
}

#[test]
fn advance_moves_next_run_one_period_from_its_prior_value() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteReminderRepository::try_new(&conn).unwrap();
    let now = fixed_now();

    let reminder = repo
        .add_reminder(Frequency::Daily, "take out trash", "#kitchen", now)
        .unwrap();

    // The wall clock at advance time is irrelevant; only the stored prior
    // value counts, so delivery drift never compounds.
    let outcome = repo.advance_reminder(reminder.id).unwrap();
    let expected = reminder.next_run + Duration::hours(24);
    assert_eq!(outcome, AdvanceOutcome::Rescheduled(expected));

    let listed = repo.list_reminders().unwrap();
    assert_eq!(listed[0].next_run, expected);
}

#[test]
fn advance_retires_rows_with_unrecognized_frequency() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteReminderRepository::try_new(&conn).unwrap();
    let now = fixed_now();

    // Such rows cannot be created through the API; emulate a legacy/foreign
    // writer directly.
    conn.execute(
        "INSERT INTO reminders (frequency, next_run, message, destination)
         VALUES ('once', ?1, 'defrost freezer', '#kitchen');",
        [now.timestamp_millis()],
    )
    .unwrap();

    let due = repo.due_reminders(now).unwrap();
    assert_eq!(due.len(), 1);
    assert_eq!(
        due[0].frequency,
        Frequency::Unrecognized("once".to_string())
    );

    let outcome = repo.advance_reminder(due[0].id).unwrap();
    assert_eq!(outcome, AdvanceOutcome::Retired);
    assert!(repo.list_reminders().unwrap().is_empty());
}

#[test]
fn advance_on_a_missing_id_is_a_noop_success() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteReminderRepository::try_new(&conn).unwrap();

    let outcome = repo.advance_reminder(999).unwrap();
    assert_eq!(outcome, AdvanceOutcome::Missing);
}

#[test]
fn reminder_serializes_with_snake_case_fields() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteReminderRepository::try_new(&conn).unwrap();

    let reminder = repo
        .add_reminder(Frequency::Weekly, "laundry day", "#home", fixed_now())
        .unwrap();

    let json = serde_json::to_value(&reminder).unwrap();
    assert_eq!(json["frequency"], "weekly");
    assert_eq!(json["message"], "laundry day");
    assert_eq!(json["destination"], "#home");
    assert!(json["next_run"].is_string());
}
