//! Direct access to the streak engine, without touching the store.

use clap::Subcommand;
use hitlist_core::streak::{milestone_message, next_milestone};
use hitlist_core::{check_milestone, compute_streak};
use serde_json::json;

#[derive(Subcommand)]
pub enum StreakAction {
    /// Compute streaks for a comma-separated list of completed days
    Compute {
        /// Completed days, e.g. 1,2,3,10
        #[arg(value_delimiter = ',')]
        days: Vec<u32>,
        /// Today's day of month, 0 for another month
        #[arg(long, default_value_t = 0)]
        today: u32,
        /// Length of the month
        #[arg(long, default_value_t = 31)]
        days_in_month: u32,
    },
    /// Check which milestone a streak transition crosses
    Milestone {
        previous: u32,
        new: u32,
    },
}

pub fn run(action: StreakAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        StreakAction::Compute {
            days,
            today,
            days_in_month,
        } => {
            let result = compute_streak(&days, today, days_in_month);
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        StreakAction::Milestone { previous, new } => {
            let milestone = check_milestone(previous, new);
            let out = json!({
                "milestone": milestone,
                "message": milestone.and_then(milestone_message),
                "next_milestone": next_milestone(new),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
    }
    Ok(())
}
