//! Task model for tasker.
//!
//! The on-disk field names are mixed-case (`id`, `title`, `CreatedAt`,
//! `status`) and must stay that way to read files written by earlier
//! versions of the tool.

use std::fmt;

use chrono::{DateTime, FixedOffset, Local};
use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// First id handed out in an empty store. New ids are `count + ID_BASE`.
pub const ID_BASE: i64 = 5381;

const LABEL_COMPLETED: &str = "Completed";
const LABEL_NOT_COMPLETED: &str = "Not completed";

/// Field names are matched case-insensitively when reading (see the
/// `Deserialize` impl below); writing always uses the names shown here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    #[serde(rename = "CreatedAt", serialize_with = "rfc3339_trimmed::serialize")]
    pub created_at: DateTime<FixedOffset>,
    /// `true` once the task has been completed.
    #[serde(rename = "status")]
    pub completed: bool,
}

impl Task {
    /// Build a fresh, not-yet-completed task stamped with the local time.
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            created_at: Local::now().fixed_offset(),
            completed: false,
        }
    }

    pub fn status_label(&self) -> &'static str {
        if self.completed {
            LABEL_COMPLETED
        } else {
            LABEL_NOT_COMPLETED
        }
    }

    /// One-line rendering used by `tasker list`: `<id>. <title> [<label>]`.
    pub fn display_line(&self) -> String {
        format!("{}. {} [{}]", self.id, self.title, self.status_label())
    }
}

/// Id the next task appended to `tasks` receives.
///
/// Count-based, so ids are not guaranteed unique once tasks are removed
/// from the file by hand.
pub fn next_task_id(tasks: &[Task]) -> i64 {
    tasks.len() as i64 + ID_BASE
}

impl<'de> Deserialize<'de> for Task {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(TaskVisitor)
    }
}

struct TaskVisitor;

impl<'de> Visitor<'de> for TaskVisitor {
    type Value = Task;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a task object")
    }

    // Keys match ignoring ASCII case, the last duplicate wins and unknown
    // keys are skipped. A missing `status` means not completed.
    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Task, A::Error> {
        let mut id = None;
        let mut title = None;
        let mut created_at = None;
        let mut completed = None;

        while let Some(key) = map.next_key::<String>()? {
            if key.eq_ignore_ascii_case("id") {
                id = Some(map.next_value()?);
            } else if key.eq_ignore_ascii_case("title") {
                title = Some(map.next_value()?);
            } else if key.eq_ignore_ascii_case("CreatedAt") {
                let raw: String = map.next_value()?;
                let parsed = DateTime::parse_from_rfc3339(&raw).map_err(de::Error::custom)?;
                created_at = Some(parsed);
            } else if key.eq_ignore_ascii_case("status") {
                completed = Some(map.next_value()?);
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }

        Ok(Task {
            id: id.ok_or_else(|| de::Error::missing_field("id"))?,
            title: title.ok_or_else(|| de::Error::missing_field("title"))?,
            created_at: created_at.ok_or_else(|| de::Error::missing_field("CreatedAt"))?,
            completed: completed.unwrap_or(false),
        })
    }
}

/// RFC 3339 timestamps with trailing zeros trimmed from the fraction
/// (`.1234567`, not `.123456700`), matching existing store files.
mod rfc3339_trimmed {
    use chrono::{DateTime, FixedOffset, SecondsFormat};
    use serde::Serializer;

    pub fn format(value: &DateTime<FixedOffset>) -> String {
        let raw = value.to_rfc3339_opts(SecondsFormat::AutoSi, true);
        let Some(dot) = raw.find('.') else {
            return raw;
        };
        let frac_end = raw[dot + 1..]
            .find(|ch: char| !ch.is_ascii_digit())
            .map(|offset| dot + 1 + offset)
            .unwrap_or(raw.len());
        let digits = raw[dot + 1..frac_end].trim_end_matches('0');

        let mut out = String::with_capacity(raw.len());
        out.push_str(&raw[..dot]);
        if !digits.is_empty() {
            out.push('.');
            out.push_str(digits);
        }
        out.push_str(&raw[frac_end..]);
        out
    }

    pub fn serialize<S: Serializer>(
        value: &DateTime<FixedOffset>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(value))
    }
}

/// Which tasks `tasker list` should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskFilter {
    #[default]
    All,
    Pending,
    Completed,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            TaskFilter::All => true,
            TaskFilter::Pending => !task.completed,
            TaskFilter::Completed => task.completed,
        }
    }

    pub fn apply(&self, tasks: Vec<Task>) -> Vec<Task> {
        tasks.into_iter().filter(|task| self.matches(task)).collect()
    }
}
