//! In-memory metric computations over already-loaded activity rows.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::Duration;

use super::model::{UserDuration, VendorSessionSummary};
use crate::domain::activity::SessionRecord;

/// Sum of closed-session durations keyed by username.
pub fn total_duration_by_user(sessions: &[SessionRecord]) -> HashMap<String, Duration> {
    let mut totals: HashMap<String, Duration> = HashMap::new();
    for s in sessions {
        let total = totals.entry(s.username.clone()).or_insert_with(Duration::zero);
        *total = *total + s.duration();
    }
    totals
}

/// The `limit` users with the largest cumulative session time, longest first.
/// Ties are broken by username.
pub fn top_users_by_duration(sessions: &[SessionRecord], limit: usize) -> Vec<UserDuration> {
    let mut ranked: Vec<UserDuration> = total_duration_by_user(sessions)
        .into_iter()
        .map(|(username, total)| UserDuration { username, total })
        .collect();
    ranked.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.username.cmp(&b.username)));
    ranked.truncate(limit);
    ranked
}

/// Share of last week's active users that were also active this week, as a
/// percentage with two decimals. `0.0` when nobody was active last week.
pub fn retention_rate(this_week: &[String], last_week: &[String]) -> f64 {
    let last: HashSet<&String> = last_week.iter().collect();
    if last.is_empty() {
        return 0.0;
    }
    let this: HashSet<&String> = this_week.iter().collect();
    let retained = this.intersection(&last).count();
    round2(retained as f64 / last.len() as f64 * 100.0)
}

/// Average over users of each user's total closed-session time, in minutes
/// with two decimals. `0.0` when there are no sessions.
pub fn average_session_minutes(sessions: &[SessionRecord]) -> f64 {
    let mut per_user: HashMap<&str, Duration> = HashMap::new();
    for s in sessions {
        let total = per_user.entry(s.user_id.as_str()).or_insert_with(Duration::zero);
        *total = *total + s.duration();
    }
    if per_user.is_empty() {
        return 0.0;
    }
    let total_minutes: f64 = per_user.values().map(|d| minutes(*d)).sum();
    round2(total_minutes / per_user.len() as f64)
}

/// Session count, total and average minutes per user, ordered by username.
/// `emails` maps user id to email for display; missing entries render empty.
pub fn vendor_session_summaries(
    sessions: &[SessionRecord],
    emails: &HashMap<String, String>,
) -> Vec<VendorSessionSummary> {
    let mut grouped: BTreeMap<(&str, &str), Vec<Duration>> = BTreeMap::new();
    for s in sessions {
        grouped
            .entry((s.username.as_str(), s.user_id.as_str()))
            .or_default()
            .push(s.duration());
    }

    grouped
        .into_iter()
        .map(|((username, user_id), durations)| {
            let total = durations.iter().fold(Duration::zero(), |acc, d| acc + *d);
            let count = durations.len() as u64;
            let avg_minutes = if count > 0 {
                minutes(total) / count as f64
            } else {
                0.0
            };
            VendorSessionSummary {
                username: username.to_string(),
                email: emails.get(user_id).cloned().unwrap_or_default(),
                total_sessions: count,
                total_minutes: round2(minutes(total)),
                avg_minutes: round2(avg_minutes),
            }
        })
        .collect()
}

pub fn minutes(d: Duration) -> f64 {
    d.num_milliseconds() as f64 / 60_000.0
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `H:MM:SS`, with a leading `-` for negative durations.
pub fn format_duration(d: Duration) -> String {
    let secs = d.num_seconds();
    let sign = if secs < 0 { "-" } else { "" };
    let secs = secs.abs();
    format!("{}{}:{:02}:{:02}", sign, secs / 3600, (secs % 3600) / 60, secs % 60)
}
