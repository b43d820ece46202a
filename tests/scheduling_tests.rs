//! End-to-end tests for the engine-backed views: overdue-first ordering,
//! list summaries, and backfill persistence.

use chorewheel::db::Database;
use chorewheel::engine::{self, MS_PER_DAY};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn setup_db() -> Database {
    Database::open_in_memory().expect("Failed to create in-memory database")
}

mod todo_tests {
    use super::*;

    #[test]
    fn todo_orders_most_overdue_first() {
        let db = setup_db();
        let list = db.create_list("home").unwrap();
        let cat = db.create_category(list.id, "kitchen").unwrap();
        let now = 100 * MS_PER_DAY;

        // done 2 days ago on a 4-day period -> 0.5
        let fresh = db.create_task(cat.id, "fresh", "", 10, 4).unwrap();
        db.add_done(fresh.id, Some(now - 2 * MS_PER_DAY), None).unwrap();
        // never done -> infinite urgency
        let never = db.create_task(cat.id, "never", "", 10, 7).unwrap();
        // done 6 days ago on a 2-day period -> 3.0
        let overdue = db.create_task(cat.id, "overdue", "", 10, 2).unwrap();
        db.add_done(overdue.id, Some(now - 6 * MS_PER_DAY), None).unwrap();

        let ranked = db.todo(list.id, now).unwrap();
        let ids: Vec<i64> = ranked.iter().map(|r| r.task.id).collect();
        assert_eq!(ids, vec![never.id, overdue.id, fresh.id]);
        assert!(ranked[0].priority.is_infinite());
        assert_eq!(ranked[1].priority, 3.0);
        assert_eq!(ranked[2].priority, 0.5);
    }

    #[test]
    fn todo_uses_most_recent_completion() {
        let db = setup_db();
        let list = db.create_list("home").unwrap();
        let cat = db.create_category(list.id, "kitchen").unwrap();
        let now = 100 * MS_PER_DAY;
        let task = db.create_task(cat.id, "dishes", "", 10, 2).unwrap();
        db.add_done(task.id, Some(now - 10 * MS_PER_DAY), None).unwrap();
        db.add_done(task.id, Some(now - MS_PER_DAY), None).unwrap();

        let ranked = db.todo(list.id, now).unwrap();
        assert_eq!(ranked[0].priority, 0.5);
    }

    #[test]
    fn todo_on_empty_list_is_empty() {
        let db = setup_db();
        let list = db.create_list("home").unwrap();

        assert!(db.todo(list.id, 0).unwrap().is_empty());
    }
}

mod summary_tests {
    use super::*;

    #[test]
    fn summary_of_empty_list_is_all_zeroes() {
        let db = setup_db();
        let list = db.create_list("home").unwrap();

        let summary = db.summary(list.id, 100 * MS_PER_DAY).unwrap();

        assert_eq!(summary.member_count, 0);
        assert_eq!(summary.minutes_per_day, 0.0);
        assert_eq!(summary.hours_per_week, 0.0);
        assert_eq!(summary.hours_per_week_per_user, None);
        assert_eq!(summary.hours_done_last_week, 0.0);
        assert_eq!(summary.remaining_hours_this_week, 0.0);
    }

    #[test]
    fn summary_arithmetic_end_to_end() {
        let db = setup_db();
        db.create_user("alice").unwrap();
        db.create_user("bob").unwrap();
        let list = db.create_list("home").unwrap();
        db.add_member(list.id, "alice").unwrap();
        db.add_member(list.id, "bob").unwrap();
        let kitchen = db.create_category(list.id, "kitchen").unwrap();
        let garden = db.create_category(list.id, "garden").unwrap();
        let now = 100 * MS_PER_DAY;

        // 60/1 + 30/2 = 75 min/day; 75*7/60 = 8.75 h/week
        let dishes = db.create_task(kitchen.id, "dishes", "", 60, 1).unwrap();
        let mow = db.create_task(garden.id, "mow", "", 30, 2).unwrap();
        db.assign_task(dishes.id, "alice").unwrap();

        // dishes touched twice inside the window, mow only outside it
        db.add_done(dishes.id, Some(now - MS_PER_DAY), Some(90)).unwrap();
        db.add_done(dishes.id, Some(now - 2 * MS_PER_DAY), None).unwrap();
        db.add_done(mow.id, Some(now - 8 * MS_PER_DAY), None).unwrap();

        let summary = db.summary(list.id, now).unwrap();

        assert_eq!(summary.member_count, 2);
        assert_eq!(summary.minutes_per_day, 75.0);
        assert_eq!(summary.hours_per_week, 8.75);
        assert_eq!(summary.hours_per_week_per_user, Some(4.375));
        // nominal 60min counted once, not the 90min actually logged
        assert_eq!(summary.hours_done_last_week, 1.0);
        assert_eq!(summary.remaining_hours_this_week, 7.75);

        let alice = summary
            .minutes_per_member
            .iter()
            .find(|(name, _)| name == "alice")
            .unwrap();
        assert_eq!(alice.1, 60);
        let bob = summary
            .minutes_per_member
            .iter()
            .find(|(name, _)| name == "bob")
            .unwrap();
        assert_eq!(bob.1, 0);

        let kitchen_load = summary
            .categories
            .iter()
            .find(|c| c.category_id == kitchen.id)
            .unwrap();
        assert_eq!(kitchen_load.minutes_per_day, 60.0);
        let garden_load = summary
            .categories
            .iter()
            .find(|c| c.category_id == garden.id)
            .unwrap();
        assert_eq!(garden_load.minutes_per_day, 15.0);
    }

    #[test]
    fn remaining_hours_never_goes_negative() {
        let db = setup_db();
        let list = db.create_list("home").unwrap();
        let cat = db.create_category(list.id, "kitchen").unwrap();
        let now = 100 * MS_PER_DAY;

        // 10 min/week of scheduled work, but a 600-minute task was touched
        let big = db.create_task(cat.id, "deep clean", "", 600, 420).unwrap();
        db.add_done(big.id, Some(now - MS_PER_DAY), None).unwrap();

        let summary = db.summary(list.id, now).unwrap();
        assert_eq!(summary.remaining_hours_this_week, 0.0);
    }

    #[test]
    fn category_minutes_per_day_matches_engine() {
        let db = setup_db();
        let list = db.create_list("home").unwrap();
        let cat = db.create_category(list.id, "kitchen").unwrap();
        db.create_task(cat.id, "dishes", "", 60, 1).unwrap();
        db.create_task(cat.id, "fridge", "", 30, 2).unwrap();

        assert_eq!(db.category_minutes_per_day(cat.id).unwrap(), 75.0);
    }
}

mod backfill_tests {
    use super::*;

    #[test]
    fn backfill_persists_within_current_cycle() {
        let db = setup_db();
        let list = db.create_list("home").unwrap();
        let cat = db.create_category(list.id, "kitchen").unwrap();
        let task = db.create_task(cat.id, "descale kettle", "", 10, 30).unwrap();
        let now = 1_700_000_000_000;
        let mut rng = StdRng::seed_from_u64(1);

        let done = engine::random_completion(&task, now, &mut rng);
        let saved = db.insert_done(&done).unwrap();

        assert!(saved.when_ms <= now);
        assert!(saved.when_ms > now - 30 * MS_PER_DAY);
        assert!(saved.duration_min.is_none());

        // The seeded history makes the task finitely urgent, and at most
        // one period elapsed means it is not yet overdue.
        let ranked = db.todo(list.id, now).unwrap();
        assert!(ranked[0].priority.is_finite());
        assert!((0.0..1.0).contains(&ranked[0].priority));
    }

    #[test]
    fn backfilled_task_ranks_below_never_done_tasks() {
        let db = setup_db();
        let list = db.create_list("home").unwrap();
        let cat = db.create_category(list.id, "kitchen").unwrap();
        let seeded = db.create_task(cat.id, "seeded", "", 10, 30).unwrap();
        let untouched = db.create_task(cat.id, "untouched", "", 10, 30).unwrap();
        let now = 1_700_000_000_000;
        let mut rng = StdRng::seed_from_u64(2);

        let done = engine::random_completion(&seeded, now, &mut rng);
        db.insert_done(&done).unwrap();

        let ranked = db.todo(list.id, now).unwrap();
        assert_eq!(ranked[0].task.id, untouched.id);
        assert_eq!(ranked[1].task.id, seeded.id);
    }
}
