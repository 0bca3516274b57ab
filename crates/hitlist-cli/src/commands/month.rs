//! Month overview commands for CLI.

use clap::Subcommand;
use hitlist_core::{DayContext, HabitStore, MonthKey, MonthSummary};

use super::{month_or_current, today_or_now};

#[derive(Subcommand)]
pub enum MonthAction {
    /// Full dashboard for a month
    Show {
        /// Month as YYYY-MM (default: current month)
        #[arg(long)]
        month: Option<String>,
        /// Override today's date (YYYY-MM-DD)
        #[arg(long)]
        today: Option<String>,
    },
    /// Copy a month's habits into an empty month, without completions
    Reuse {
        /// Target month as YYYY-MM
        to: String,
        /// Source month as YYYY-MM (default: the month before the target)
        #[arg(long)]
        from: Option<String>,
    },
}

pub fn run(action: MonthAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = HabitStore::open()?;

    match action {
        MonthAction::Show { month, today } => {
            let month = month_or_current(month)?;
            let ctx = DayContext::for_month(month, today_or_now(today)?);
            let habits = store.list_habits(month)?;
            let summary = MonthSummary::build(month, &habits, ctx);
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        MonthAction::Reuse { to, from } => {
            let to: MonthKey = to.parse()?;
            let from = match from {
                Some(f) => f.parse::<MonthKey>()?,
                None => to.prev(),
            };
            let copies = store.reuse_month(from, to)?;
            eprintln!("Reused {} habit(s) from {from} into {to}", copies.len());
            println!("{}", serde_json::to_string_pretty(&copies)?);
        }
    }
    Ok(())
}
