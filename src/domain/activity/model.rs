//! Login-session activity

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

/// One row per login session.
///
/// Times are wall-clock times on `login_date`; `end_time` stays empty while
/// the session is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserActivity {
    pub id: i32,
    pub user_id: String,
    pub login_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: Option<NaiveTime>,
    pub created_at: DateTime<Utc>,
}

impl UserActivity {
    pub fn is_open(&self) -> bool {
        self.end_time.is_none()
    }

    /// `end_time - start_time` for a closed session.
    ///
    /// The ordering of the two times is not checked, so an inverted row
    /// yields a negative duration.
    pub fn duration(&self) -> Option<Duration> {
        self.end_time.map(|end| session_duration(self.start_time, end))
    }
}

/// A closed session joined with the owner's username.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    pub user_id: String,
    pub username: String,
    pub login_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl SessionRecord {
    pub fn duration(&self) -> Duration {
        session_duration(self.start_time, self.end_time)
    }
}

/// Both times are taken to lie on the same calendar day.
pub fn session_duration(start: NaiveTime, end: NaiveTime) -> Duration {
    end.signed_duration_since(start)
}

/// Login-date predicate over the activity log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityWindow {
    /// Any activity at all.
    Ever,
    /// `login_date == date`
    On(NaiveDate),
    /// `login_date >= date`
    Since(NaiveDate),
    /// `from <= login_date <= to`
    Between(NaiveDate, NaiveDate),
}

impl ActivityWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        match *self {
            Self::Ever => true,
            Self::On(d) => date == d,
            Self::Since(d) => date >= d,
            Self::Between(from, to) => date >= from && date <= to,
        }
    }
}
