//! Chorewheel CLI
//!
//! Command-line front end over the store and scheduling engine.

use anyhow::Result;
use chrono::DateTime;
use clap::Parser;
use chorewheel::cli::{
    CategoryCommand, Cli, Command, DoneAddArgs, DoneCommand, ListCommand, TaskCommand,
    TaskCreateArgs, TaskModifyArgs, UserCommand, DEFAULT_DATABASE,
};
use chorewheel::db::{now_ms, Database};
use chorewheel::engine;
use chorewheel::error::StoreError;
use chorewheel::format::{format_hours, format_priority, format_when, OutputFormat};
use serde_json::json;
use std::fs::OpenOptions;
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on --log option
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    match cli.log.as_str() {
        "0" | "off" => {
            // No logging
        }
        "1" | "stdout" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stdout)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        "2" | "stderr" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        filename => {
            // Log to file (append mode)
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(filename)?;
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(file)
                .with_ansi(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }

    let format = OutputFormat::from_str(&cli.format)
        .ok_or_else(|| StoreError::invalid_value("format", "Expected 'text' or 'json'"))?;

    let db_path = cli.database.as_deref().unwrap_or(DEFAULT_DATABASE);
    debug!("Opening database at {}", db_path);
    let db = Database::open(db_path)?;

    if let Err(err) = run(&db, cli.command, format) {
        let err = StoreError::from(err);
        eprintln!("error [{:?}]: {}", err.code, err);
        std::process::exit(1);
    }
    Ok(())
}

fn run(db: &Database, command: Command, format: OutputFormat) -> Result<()> {
    match command {
        Command::User(cmd) => run_user(db, cmd),
        Command::List(cmd) => run_list(db, cmd, format),
        Command::Category(cmd) => run_category(db, cmd),
        Command::Task(cmd) => run_task(db, cmd, format),
        Command::Done(cmd) => run_done(db, cmd),
    }
}

fn run_user(db: &Database, cmd: UserCommand) -> Result<()> {
    match cmd {
        UserCommand::Add { name } => {
            let user = db.create_user(&name)?;
            println!("Created user {}", user.name);
        }
        UserCommand::Ls => {
            for user in db.list_users()? {
                println!("{}", user.name);
            }
        }
        UserCommand::Rm { name } => {
            db.delete_user(&name)?;
            info!("Deleted user {}", name);
            println!("Deleted user {}", name);
        }
    }
    Ok(())
}

fn run_list(db: &Database, cmd: ListCommand, format: OutputFormat) -> Result<()> {
    match cmd {
        ListCommand::Create { name } => {
            let list = db.create_list(&name)?;
            println!("Created list {} ({})", list.id, list.name);
        }
        ListCommand::Ls => {
            for list in db.list_lists()? {
                let members = db.members(list.id)?;
                println!("{:>4}  {}  [{}]", list.id, list.name, members.join(", "));
            }
        }
        ListCommand::Rename { list_id, name } => {
            let list = db.rename_list(list_id, &name)?;
            println!("Renamed list {} to {}", list.id, list.name);
        }
        ListCommand::Rm { list_id } => {
            db.delete_list(list_id)?;
            println!("Deleted list {}", list_id);
        }
        ListCommand::Todo { list_id } => {
            let ranked = db.todo(list_id, now_ms())?;
            if format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(&ranked)?);
                return Ok(());
            }
            for entry in ranked {
                let assignee = entry.task.assigned_user.as_deref().unwrap_or("-");
                println!(
                    "{:>10}  {:>4}  {}  ({}min every {}d, {})",
                    format_priority(entry.priority),
                    entry.task.id,
                    entry.task.name,
                    entry.task.duration_min,
                    entry.task.period_days,
                    assignee,
                );
            }
        }
        ListCommand::Summary { list_id } => {
            let summary = db.summary(list_id, now_ms())?;
            if format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
                return Ok(());
            }
            println!("List {} ({})", summary.list_id, summary.name);
            println!("  members:              {}", summary.member_count);
            println!("  load per day:         {:.1}min", summary.minutes_per_day);
            println!(
                "  load per week:        {}",
                format_hours(summary.hours_per_week)
            );
            match summary.hours_per_week_per_user {
                Some(h) => println!("  load per member:      {}", format_hours(h)),
                None => println!("  load per member:      n/a (no members)"),
            }
            println!(
                "  done last week:       {}",
                format_hours(summary.hours_done_last_week)
            );
            println!(
                "  remaining this week:  {}",
                format_hours(summary.remaining_hours_this_week)
            );
            for (member, minutes) in &summary.minutes_per_member {
                println!("  assigned to {:<10} {}min", format!("{}:", member), minutes);
            }
            for category in &summary.categories {
                println!(
                    "  category {:<12} {:.1}min/day",
                    format!("{}:", category.name),
                    category.minutes_per_day
                );
            }
        }
        ListCommand::AddMember { list_id, user } => {
            db.add_member(list_id, &user)?;
            println!("Added {} to list {}", user, list_id);
        }
        ListCommand::RmMember { list_id, user } => {
            db.remove_member(list_id, &user)?;
            println!("Removed {} from list {}", user, list_id);
        }
    }
    Ok(())
}

fn run_category(db: &Database, cmd: CategoryCommand) -> Result<()> {
    match cmd {
        CategoryCommand::Create { list_id, name } => {
            let category = db.create_category(list_id, &name)?;
            println!("Created category {} ({})", category.id, category.name);
        }
        CategoryCommand::Ls { list_id } => {
            for category in db.categories_in_list(list_id)? {
                let load = db.category_minutes_per_day(category.id)?;
                println!("{:>4}  {}  {:.1}min/day", category.id, category.name, load);
            }
        }
        CategoryCommand::Rename { category_id, name } => {
            let category = db.rename_category(category_id, &name)?;
            println!("Renamed category {} to {}", category.id, category.name);
        }
        CategoryCommand::Rm { category_id } => {
            db.delete_category(category_id)?;
            println!("Deleted category {}", category_id);
        }
    }
    Ok(())
}

fn run_task(db: &Database, cmd: TaskCommand, format: OutputFormat) -> Result<()> {
    match cmd {
        TaskCommand::Create(TaskCreateArgs {
            category_id,
            name,
            duration,
            period,
            description,
        }) => {
            let task = db.create_task(category_id, &name, &description, duration, period)?;
            println!(
                "Created task {} ({}): {}min every {}d",
                task.id, task.name, task.duration_min, task.period_days
            );
        }
        TaskCommand::Show { task_id } => {
            let task = db
                .get_task(task_id)?
                .ok_or_else(|| StoreError::task_not_found(task_id))?;
            let dones = db.dones_for_task(task_id)?;
            let priority = engine::priority(
                task.period_days,
                engine::last_done_ms(&dones),
                now_ms(),
            );
            if format == OutputFormat::Json {
                let out = json!({
                    "task": task,
                    "priority": format_priority(priority),
                    "history": dones,
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
                return Ok(());
            }
            println!("Task {} ({})", task.id, task.name);
            if !task.description.is_empty() {
                println!("  {}", task.description);
            }
            println!("  duration: {}min, period: {}d", task.duration_min, task.period_days);
            println!(
                "  assigned: {}",
                task.assigned_user.as_deref().unwrap_or("-")
            );
            println!("  priority: {}", format_priority(priority));
            let logged = engine::total_duration(dones.iter().filter_map(|d| d.duration_min));
            println!("  logged:   {}min", logged);
            for done in dones {
                let spent = done
                    .duration_min
                    .map(|m| format!("{}min", m))
                    .unwrap_or_else(|| "-".to_string());
                println!("  done {:>6}  {}  {}", done.id, format_when(done.when_ms), spent);
            }
        }
        TaskCommand::Modify(TaskModifyArgs {
            task_id,
            name,
            duration,
            period,
            description,
        }) => {
            let task = db.update_task(
                task_id,
                name.as_deref(),
                description.as_deref(),
                duration,
                period,
            )?;
            println!(
                "Updated task {} ({}): {}min every {}d",
                task.id, task.name, task.duration_min, task.period_days
            );
        }
        TaskCommand::Rm { task_id } => {
            db.delete_task(task_id)?;
            println!("Deleted task {}", task_id);
        }
        TaskCommand::Assign { task_id, user } => {
            let task = db.assign_task(task_id, &user)?;
            println!("Assigned task {} to {}", task.id, user);
        }
        TaskCommand::Unassign { task_id } => {
            let task = db.unassign_task(task_id)?;
            println!("Unassigned task {}", task.id);
        }
        TaskCommand::Backfill { task_id } => {
            let task = db
                .get_task(task_id)?
                .ok_or_else(|| StoreError::task_not_found(task_id))?;
            let done = engine::random_completion(&task, now_ms(), &mut rand::thread_rng());
            let saved = db.insert_done(&done)?;
            info!("Backfilled task {} at {}", task_id, saved.when_ms);
            println!(
                "Seeded completion for task {} at {}",
                task_id,
                format_when(saved.when_ms)
            );
        }
    }
    Ok(())
}

fn run_done(db: &Database, cmd: DoneCommand) -> Result<()> {
    match cmd {
        DoneCommand::Add(DoneAddArgs {
            task_id,
            when,
            duration,
        }) => {
            let when_ms = when.as_deref().map(parse_when).transpose()?;
            let done = db.add_done(task_id, when_ms, duration)?;
            println!(
                "Recorded completion {} for task {} at {}",
                done.id,
                task_id,
                format_when(done.when_ms)
            );
        }
        DoneCommand::Ls { task_id } => {
            for done in db.dones_for_task(task_id)? {
                let spent = done
                    .duration_min
                    .map(|m| format!("{}min", m))
                    .unwrap_or_else(|| "-".to_string());
                println!("{:>6}  {}  {}", done.id, format_when(done.when_ms), spent);
            }
        }
        DoneCommand::Rm { done_id } => {
            db.delete_done(done_id)?;
            println!("Deleted completion {}", done_id);
        }
    }
    Ok(())
}

/// Parse an RFC 3339 timestamp into epoch milliseconds.
fn parse_when(s: &str) -> Result<i64> {
    let dt = DateTime::parse_from_rfc3339(s).map_err(|e| {
        StoreError::invalid_value("when", &format!("Invalid RFC 3339 timestamp: {}", e))
    })?;
    Ok(dt.timestamp_millis())
}
