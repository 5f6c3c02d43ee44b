pub mod activity_log;
pub mod attempt_store;
pub mod pool;

pub use activity_log::{ActivityLog, PgActivityLog};
pub use attempt_store::{AttemptStore, PgAttemptStore};
