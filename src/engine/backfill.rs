//! Synthetic completion records for seeding plausible history.

use crate::engine::MS_PER_DAY;
use crate::types::{NewTaskDone, Task};
use rand::Rng;

/// Generate one unsaved completion for `task`, placed uniformly at random
/// within the task's recurrence period ending at `now_ms`.
///
/// Used when creating a task whose real history is unknown: "assume this
/// was last done at some point within its cycle". No actual duration is
/// recorded. The caller persists the value.
pub fn random_completion<R: Rng + ?Sized>(task: &Task, now_ms: i64, rng: &mut R) -> NewTaskDone {
    let r: f64 = rng.r#gen();
    let offset_ms = (r * task.period_days as f64 * MS_PER_DAY as f64) as i64;
    NewTaskDone {
        task_id: task.id,
        when_ms: now_ms - offset_ms,
        duration_min: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn task(period_days: i64) -> Task {
        Task {
            id: 7,
            category_id: 1,
            name: "water plants".to_string(),
            description: String::new(),
            duration_min: 10,
            period_days,
            assigned_user: None,
            created_at: 0,
        }
    }

    #[test]
    fn samples_stay_within_one_period_of_now() {
        let mut rng = StdRng::seed_from_u64(42);
        let now = 1_700_000_000_000;
        let task = task(10);
        for _ in 0..1000 {
            let done = random_completion(&task, now, &mut rng);
            assert_eq!(done.task_id, 7);
            assert!(done.duration_min.is_none());
            assert!(done.when_ms <= now);
            assert!(done.when_ms > now - 10 * MS_PER_DAY);
        }
    }

    #[test]
    fn samples_spread_across_the_whole_period() {
        let mut rng = StdRng::seed_from_u64(7);
        let now = 1_700_000_000_000;
        let task = task(10);
        // Bucket the offsets by day; a uniform draw should touch every day
        // and no day should dominate.
        let mut buckets = [0u32; 10];
        let n = 10_000;
        for _ in 0..n {
            let done = random_completion(&task, now, &mut rng);
            let day = ((now - done.when_ms) / MS_PER_DAY) as usize;
            buckets[day] += 1;
        }
        let expected = n / 10;
        for (day, count) in buckets.iter().enumerate() {
            assert!(
                (*count as i64 - expected as i64).abs() < expected as i64 / 2,
                "day {} count {} too far from uniform expectation {}",
                day,
                count,
                expected
            );
        }
    }
}
