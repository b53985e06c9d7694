pub mod repository_error;
pub mod mongo;
pub mod user_repo;
pub mod gift_repo;
pub mod announcement_repo;
pub mod exchange_date_repo;
pub mod memory;

/// Store-managed timestamp, millisecond precision.
pub(crate) fn now_timestamp() -> bson::DateTime {
    bson::DateTime::now()
}
