//! Terminal thermometer gauge.
//!
//! A text rendition of the classic fundraising thermometer: a vertical tube
//! with 10% tick marks, filled red for prior days and green for the latest
//! day, a pace marker at the linear-month position, and the required daily
//! run-rate underneath.

use crate::cli::commands::format_currency;
use crate::core::Pace;
use crate::types::Metric;
use colored::Colorize;
use std::fmt::Write;

/// Tick levels in the tube, 10% apart
const LEVELS: u32 = 10;

/// Render one company gauge as a multi-line string.
pub fn render(company: &str, metric: Metric, pace: &Pace, month_label: Option<&str>) -> String {
    let mut out = String::new();
    let month = month_label.unwrap_or("Current Month");

    let title = format!(
        "{company} {month} {} Goal: {}",
        metric.label(),
        format_currency(pace.monthly_goal)
    );
    let _ = writeln!(out, "{}", title.bold());

    let goal = pace.monthly_goal;
    let fill = if goal > 0.0 {
        (pace.cumulative_total / goal).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let prior = if goal > 0.0 {
        (pace.prior_total / goal).clamp(0.0, fill)
    } else {
        0.0
    };
    let behind_goal = goal > 0.0 && pace.cumulative_total < goal;

    let fill_levels = (fill * f64::from(LEVELS)).round() as u32;
    let prior_levels = ((prior * f64::from(LEVELS)).round() as u32).min(fill_levels);
    let pace_level = if goal > 0.0 {
        ((pace.expected_position / goal * f64::from(LEVELS)).round() as i64)
            .clamp(1, i64::from(LEVELS)) as u32
    } else {
        0
    };

    if !behind_goal && goal > 0.0 {
        let _ = writeln!(
            out,
            "         {}",
            format!("Percent of Goal: {:.0}%", pace.percent_of_goal * 100.0)
                .bold()
                .blue()
        );
    }

    for level in (1..=LEVELS).rev() {
        let bar = if level <= fill_levels {
            if level > prior_levels {
                "██".green().to_string()
            } else {
                "██".red().to_string()
            }
        } else {
            "  ".to_string()
        };

        let mut line = format!("  {:>3}% ┤{bar}", level * 10);

        // The pace marker only appears while the goal is still ahead
        if behind_goal && level == pace_level {
            line.push_str(&format!("  {}", "◄ 100% pace".bold().blue()));
        }
        if level == fill_levels && fill_levels > 0 && pace.latest_value != 0.0 {
            line.push_str(&format!(
                "  {} {}",
                "yesterday".bold().green(),
                format_currency(pace.latest_value).green()
            ));
        }

        let _ = writeln!(out, "{line}");
    }

    let _ = writeln!(out, "       ╰──────");
    let _ = writeln!(
        out,
        "  Current: {}   {} out of {} days",
        format_currency(pace.cumulative_total).bold(),
        pace.days_elapsed,
        pace.total_days
    );
    let _ = writeln!(
        out,
        "  {}",
        format!("NEEDED {} / DAY", format_currency(pace.per_day_needed))
            .bold()
            .blue()
    );
    if goal <= 0.0 {
        let _ = writeln!(out, "  {}", "(no monthly goal on file)".dimmed());
    }

    out
}
