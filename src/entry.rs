use chrono::{DateTime, Utc};
use core::fmt::{self, Display, Formatter};

/// Wrapper around a recorded operation that contains additional metadata.
#[derive(Clone, Debug, PartialEq)]
pub struct Entry<R> {
    record: R,
    recorded_at: DateTime<Utc>,
}

impl<R> Entry<R> {
    /// Returns the recorded operation.
    pub fn get(&self) -> &R {
        &self.record
    }

    /// Returns when the operation was recorded.
    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }
}

impl<R> From<R> for Entry<R> {
    fn from(record: R) -> Self {
        Entry {
            record,
            recorded_at: Utc::now(),
        }
    }
}

impl<R: Display> Display for Entry<R> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        (&self.record as &dyn Display).fmt(f)
    }
}
