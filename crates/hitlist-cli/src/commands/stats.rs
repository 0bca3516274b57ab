use clap::Subcommand;
use hitlist_core::stats::{category_breakdown, daily_consistency, monthly_progress};
use hitlist_core::{DayContext, HabitStore};
use serde_json::json;

use super::{month_or_current, today_or_now};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Completed days over all monthly goals
    Progress {
        #[arg(long)]
        month: Option<String>,
    },
    /// Share of habits done per day, up to today
    Consistency {
        #[arg(long)]
        month: Option<String>,
        /// Override today's date (YYYY-MM-DD)
        #[arg(long)]
        today: Option<String>,
    },
    /// Habit count per category
    Categories {
        #[arg(long)]
        month: Option<String>,
    },
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = HabitStore::open()?;

    match action {
        StatsAction::Progress { month } => {
            let month = month_or_current(month)?;
            let habits = store.list_habits(month)?;
            let out = json!({
                "month": month.to_string(),
                "progress_percent": monthly_progress(&habits),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        StatsAction::Consistency { month, today } => {
            let month = month_or_current(month)?;
            let ctx = DayContext::for_month(month, today_or_now(today)?);
            let habits = store.list_habits(month)?;
            println!("{}", serde_json::to_string_pretty(&daily_consistency(&habits, ctx))?);
        }
        StatsAction::Categories { month } => {
            let month = month_or_current(month)?;
            let habits = store.list_habits(month)?;
            println!("{}", serde_json::to_string_pretty(&category_breakdown(&habits))?);
        }
    }
    Ok(())
}
