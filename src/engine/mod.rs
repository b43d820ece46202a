//! Scheduling & statistics engine.
//!
//! Pure computations over snapshots of tasks and their completion history.
//! The engine never touches the database: the caller supplies the data, the
//! reference time `now_ms`, and (for backfill) the random-number source, so
//! every function here is deterministic and directly testable.

pub mod backfill;
pub mod priority;
pub mod stats;

pub use backfill::random_completion;
pub use priority::{last_done_ms, priority, rank};
pub use stats::{
    hours_per_week, hours_per_week_per_user, minutes_done_since, minutes_for_user,
    minutes_per_day, remaining_hours, total_duration,
};

/// Milliseconds in one day.
pub const MS_PER_DAY: i64 = 86_400_000;

/// Milliseconds in seven days.
pub const MS_PER_WEEK: i64 = 7 * MS_PER_DAY;
