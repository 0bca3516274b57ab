//! Habit management commands for CLI.

use clap::Subcommand;
use hitlist_core::{Config, DayContext, Habit, HabitCategory, HabitStore, HabitSummary};

use super::{month_or_current, today_or_now};

#[derive(Subcommand)]
pub enum HabitAction {
    /// Add a habit to a month
    Add {
        /// Habit name
        name: String,
        /// Career, Health or Mindset
        #[arg(long)]
        category: Option<String>,
        /// Monthly goal in days
        #[arg(long)]
        goal: Option<u32>,
        /// Month as YYYY-MM (default: current month)
        #[arg(long)]
        month: Option<String>,
    },
    /// List habits of a month with their streaks
    List {
        /// Month as YYYY-MM (default: current month)
        #[arg(long)]
        month: Option<String>,
        /// Override today's date (YYYY-MM-DD)
        #[arg(long)]
        today: Option<String>,
    },
    /// Edit a habit's name, category or goal
    Edit {
        /// Habit ID
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        goal: Option<u32>,
    },
    /// Delete a habit
    Delete {
        /// Habit ID
        id: String,
    },
    /// Mark or unmark a day as done
    Toggle {
        /// Habit ID
        id: String,
        /// Day of month (1-based)
        day: u32,
        /// Override today's date (YYYY-MM-DD)
        #[arg(long)]
        today: Option<String>,
    },
}

pub fn run(action: HabitAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = HabitStore::open()?;

    match action {
        HabitAction::Add {
            name,
            category,
            goal,
            month,
        } => {
            let config = Config::load_or_default();
            let month = month_or_current(month)?;
            let category = match category {
                Some(c) => c.parse::<HabitCategory>()?,
                None => config.habits.default_category,
            };
            let goal = goal.unwrap_or_else(|| config.default_goal_for(month));
            let habit = Habit::new(&name, category, goal, month)?;
            store.create_habit(&habit)?;
            eprintln!("Habit created: {}", habit.id);
            println!("{}", serde_json::to_string_pretty(&habit)?);
        }
        HabitAction::List { month, today } => {
            let month = month_or_current(month)?;
            let ctx = DayContext::for_month(month, today_or_now(today)?);
            let rows: Vec<HabitSummary> = store
                .list_habits(month)?
                .iter()
                .map(|h| HabitSummary::new(h, ctx))
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        HabitAction::Edit {
            id,
            name,
            category,
            goal,
        } => {
            let existing = store
                .get_habit(&id)?
                .ok_or_else(|| format!("habit not found: {id}"))?;
            let category = match category {
                Some(c) => c.parse::<HabitCategory>()?,
                None => existing.category,
            };
            let updated = store.update_habit(
                &id,
                name.as_deref().unwrap_or(&existing.name),
                category,
                goal.unwrap_or(existing.monthly_goal),
            )?;
            println!("{}", serde_json::to_string_pretty(&updated)?);
        }
        HabitAction::Delete { id } => {
            store.delete_habit(&id)?;
            println!("Habit removed: {id}");
        }
        HabitAction::Toggle { id, day, today } => {
            let outcome = store.toggle_day(&id, day, today_or_now(today)?)?;
            if let Some(c) = &outcome.celebration {
                if Config::load_or_default().celebrations.enabled {
                    eprintln!("{} {} - {} ({} day streak)", c.title(), c.habit_name, c.message(), c.streak);
                }
            }
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
    }
    Ok(())
}
