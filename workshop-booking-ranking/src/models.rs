use core::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkshopId(pub String);

impl fmt::Display for WorkshopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WorkshopId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// Popularity rank, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Rank(pub u32);

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A workshop as the workshop service stores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workshop {
    #[serde(rename = "_id")]
    pub id: WorkshopId,
    #[serde(default)]
    pub title: String,
    #[serde(with = "date_format")]
    pub date: NaiveDate,
    #[serde(with = "time_format")]
    pub start_time: NaiveTime,
    #[serde(with = "time_format")]
    pub end_time: NaiveTime,
    #[serde(default)]
    pub points: i64,
    /// Registered users, in registration order.
    #[serde(default)]
    pub users: Vec<UserId>,
    /// Everything else the service sends along, kept so updates don't lose it.
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl Workshop {
    /// Local date-time at which the workshop ends.
    #[must_use]
    pub fn end_instant(&self) -> NaiveDateTime {
        self.date.and_time(self.end_time)
    }

    /// A workshop stays current up to and including its end instant.
    #[must_use]
    pub fn is_current_at(&self, now: NaiveDateTime) -> bool {
        self.end_instant() >= now
    }

    #[must_use]
    pub fn has_user(&self, user_id: &UserId) -> bool {
        self.users.contains(user_id)
    }
}

/// Payload for creating a workshop. The service assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWorkshop {
    pub title: String,
    #[serde(with = "date_format")]
    pub date: NaiveDate,
    #[serde(with = "time_format")]
    pub start_time: NaiveTime,
    #[serde(with = "time_format")]
    pub end_time: NaiveTime,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

/// A current workshop together with its popularity rank.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedWorkshop {
    pub rank: Rank,
    #[serde(flatten)]
    pub workshop: Workshop,
}

/// The workshops of one user, split like the full view.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UserWorkshops {
    pub upcoming: Vec<RankedWorkshop>,
    pub attended: Vec<Workshop>,
}

mod date_format {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let value = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&value, FORMAT).map_err(serde::de::Error::custom)
    }
}

mod time_format {
    use chrono::{NaiveTime, Timelike as _};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        if time.second() == 0 {
            serializer.collect_str(&time.format("%H:%M"))
        } else {
            serializer.collect_str(&time.format("%H:%M:%S"))
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let value = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&value, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(&value, "%H:%M:%S"))
            .map_err(serde::de::Error::custom)
    }
}
