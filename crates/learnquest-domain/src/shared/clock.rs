use chrono::{DateTime, NaiveDate, Utc};

/// Time source for the domain.
///
/// Streak evaluation is calendar-day sensitive; handlers resolve "today"
/// through this port so the computation stays deterministic under test.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Production clock backed by the system time.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a fixed instant, for tests and replays.
pub struct FixedClock {
    now: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    /// Pin the clock to midnight UTC of the given date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            now: date.and_time(chrono::NaiveTime::MIN).and_utc(),
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }
}
