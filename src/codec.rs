//! JSON codec for the persisted state blob.
//!
//! The payload keeps the widget's original shape: three parallel bucket
//! objects per tier (`tasks`, `completed`, `rolloverCounts` and their
//! `overflow*` twins) plus streak, archive and stats. There is no schema
//! version; every top-level key is decoded on its own and falls back to
//! its default when missing or ill-typed, so a partial blob never loses
//! the fields that are still good.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::slots::{Priority, TaskSet, TaskSlot, Tier};
use crate::state::{AppState, ArchivedDay, Stats, HISTORY_LIMIT};

/// One value per slot, shaped like the original `{major, medium[], small[]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Buckets<T: Default> {
    pub major: T,
    pub medium: Vec<T>,
    pub small: Vec<T>,
}

impl<T: Default + Clone> Buckets<T> {
    fn from_set(set: &TaskSet, pick: impl Fn(&TaskSlot) -> T) -> Self {
        Self {
            major: pick(set.slot(Priority::Major, 0)),
            medium: set.bucket(Priority::Medium).iter().map(&pick).collect(),
            small: set.bucket(Priority::Small).iter().map(&pick).collect(),
        }
    }

    /// Value for a slot, defaulting past the end of a short array.
    fn get(&self, priority: Priority, index: usize) -> T {
        match priority {
            Priority::Major => self.major.clone(),
            Priority::Medium => self.medium.get(index).cloned().unwrap_or_default(),
            Priority::Small => self.small.get(index).cloned().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct StatsWire {
    week_completed: u32,
    total_completed: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ArchivedDayWire {
    date: String,
    tasks: Buckets<String>,
    completed: Buckets<bool>,
    overflow_tasks: Buckets<String>,
    overflow_completed: Buckets<bool>,
    completion_rate: u8,
}

/// Serialize the full state to the JSON blob.
pub fn encode(state: &AppState) -> Result<String, serde_json::Error> {
    let mut root = Map::new();
    insert_tier(&mut root, "", &state.main)?;
    insert_tier(&mut root, "overflow", &state.overflow)?;
    root.insert("streak".to_string(), Value::from(state.streak));
    root.insert(
        "lastCompletionDate".to_string(),
        serde_json::to_value(&state.last_completion_date)?,
    );
    let history = state
        .history
        .iter()
        .map(|day| serde_json::to_value(archived_to_wire(day)))
        .collect::<Result<Vec<_>, _>>()?;
    root.insert("history".to_string(), Value::Array(history));
    root.insert(
        "stats".to_string(),
        serde_json::to_value(StatsWire {
            week_completed: state.stats.week_completed,
            total_completed: state.stats.total_completed,
        })?,
    );
    root.insert(
        "currentDate".to_string(),
        Value::String(state.current_date.clone()),
    );
    serde_json::to_string_pretty(&Value::Object(root))
}

/// Decode a blob into a complete state.
///
/// Returns `None` only when the blob is not a JSON object at all. Missing
/// or malformed fields are defaulted individually; `currentDate` defaults
/// to `today`.
pub fn decode(blob: &str, today: &str) -> Option<AppState> {
    let root = match serde_json::from_str::<Value>(blob) {
        Ok(Value::Object(root)) => root,
        Ok(_) => {
            warn!("state blob is not a JSON object");
            return None;
        }
        Err(e) => {
            warn!("state blob is not valid JSON: {}", e);
            return None;
        }
    };

    let main = tier_from(&root, "", Tier::Main);
    let overflow = tier_from(&root, "overflow", Tier::Overflow);
    let stats: StatsWire = field(&root, "stats").unwrap_or_default();
    let last_completion_date: Option<String> =
        field(&root, "lastCompletionDate").unwrap_or_default();
    let current_date = field::<String>(&root, "currentDate")
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| today.to_string());

    Some(AppState {
        current_date,
        main,
        overflow,
        streak: field(&root, "streak").unwrap_or(0),
        last_completion_date,
        history: history_from(&root),
        stats: Stats {
            week_completed: stats.week_completed,
            total_completed: stats.total_completed,
        },
    })
}

/// Decode one key, treating `null` and type mismatches as absent.
fn field<T: DeserializeOwned>(root: &Map<String, Value>, key: &str) -> Option<T> {
    let value = root.get(key)?;
    if value.is_null() {
        return None;
    }
    match serde_json::from_value(value.clone()) {
        Ok(v) => Some(v),
        Err(e) => {
            warn!(field = key, "ignoring malformed state field: {}", e);
            None
        }
    }
}

/// Key for a tier's bucket object, e.g. `tasks` / `overflowTasks`.
fn tier_key(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        let mut chars = name.chars();
        let head: String = chars.next().map(|c| c.to_uppercase().collect()).unwrap_or_default();
        format!("{}{}{}", prefix, head, chars.as_str())
    }
}

fn insert_tier(
    root: &mut Map<String, Value>,
    prefix: &str,
    set: &TaskSet,
) -> Result<(), serde_json::Error> {
    root.insert(
        tier_key(prefix, "tasks"),
        serde_json::to_value(Buckets::from_set(set, |s| s.text.clone()))?,
    );
    root.insert(
        tier_key(prefix, "completed"),
        serde_json::to_value(Buckets::from_set(set, |s| s.completed))?,
    );
    root.insert(
        tier_key(prefix, "rolloverCounts"),
        serde_json::to_value(Buckets::from_set(set, |s| s.rollover_count))?,
    );
    Ok(())
}

fn tier_from(root: &Map<String, Value>, prefix: &str, tier: Tier) -> TaskSet {
    let tasks: Buckets<String> = buckets(root, &tier_key(prefix, "tasks"));
    let completed: Buckets<bool> = buckets(root, &tier_key(prefix, "completed"));
    let counts: Buckets<u32> = buckets(root, &tier_key(prefix, "rolloverCounts"));
    assemble(tier, &tasks, &completed, Some(&counts))
}

/// Decode a `{major, medium[], small[]}` object slot by slot.
///
/// A bad element (a `null` written for `NaN`, a wrong type) defaults on
/// its own; its siblings are kept.
fn buckets<T: DeserializeOwned + Default>(root: &Map<String, Value>, key: &str) -> Buckets<T> {
    let object = match root.get(key) {
        Some(Value::Object(object)) => object,
        Some(Value::Null) | None => return Buckets::default(),
        Some(_) => {
            warn!(field = key, "ignoring malformed state field: not an object");
            return Buckets::default();
        }
    };

    let list = |name: &str| -> Vec<T> {
        match object.get(name) {
            Some(Value::Array(items)) => items.iter().map(|item| element(key, item)).collect(),
            Some(Value::Null) | None => Vec::new(),
            Some(_) => {
                warn!(field = key, bucket = name, "ignoring malformed bucket: not an array");
                Vec::new()
            }
        }
    };

    Buckets {
        major: object
            .get("major")
            .map(|value| element(key, value))
            .unwrap_or_default(),
        medium: list("medium"),
        small: list("small"),
    }
}

fn element<T: DeserializeOwned + Default>(key: &str, value: &Value) -> T {
    if value.is_null() {
        return T::default();
    }
    serde_json::from_value(value.clone()).unwrap_or_else(|e| {
        warn!(field = key, "ignoring malformed slot value: {}", e);
        T::default()
    })
}

/// Build a task set from parallel bucket arrays, padding or truncating to
/// the tier's arity.
fn assemble(
    tier: Tier,
    tasks: &Buckets<String>,
    completed: &Buckets<bool>,
    counts: Option<&Buckets<u32>>,
) -> TaskSet {
    let mut set = TaskSet::empty(tier);
    for priority in Priority::ALL {
        for index in 0..tier.arity(priority) {
            set.place(
                priority,
                index,
                TaskSlot {
                    text: tasks.get(priority, index),
                    completed: completed.get(priority, index),
                    rollover_count: counts.map(|c| c.get(priority, index)).unwrap_or(0),
                },
            );
        }
    }
    set
}

fn archived_to_wire(day: &ArchivedDay) -> ArchivedDayWire {
    ArchivedDayWire {
        date: day.date.clone(),
        tasks: Buckets::from_set(&day.main, |s| s.text.clone()),
        completed: Buckets::from_set(&day.main, |s| s.completed),
        overflow_tasks: Buckets::from_set(&day.overflow, |s| s.text.clone()),
        overflow_completed: Buckets::from_set(&day.overflow, |s| s.completed),
        completion_rate: day.completion_rate,
    }
}

fn history_from(root: &Map<String, Value>) -> Vec<ArchivedDay> {
    let entries = match root.get("history") {
        Some(Value::Array(entries)) => entries,
        Some(Value::Null) | None => return Vec::new(),
        Some(_) => {
            warn!(field = "history", "ignoring malformed state field: not an array");
            return Vec::new();
        }
    };

    entries
        .iter()
        .filter_map(|entry| match entry {
            Value::Object(day) => Some(archived_from(day)),
            _ => {
                warn!("skipping malformed archived day");
                None
            }
        })
        .take(HISTORY_LIMIT)
        .collect()
}

fn archived_from(day: &Map<String, Value>) -> ArchivedDay {
    let tasks: Buckets<String> = buckets(day, "tasks");
    let completed: Buckets<bool> = buckets(day, "completed");
    let overflow_tasks: Buckets<String> = buckets(day, "overflowTasks");
    let overflow_completed: Buckets<bool> = buckets(day, "overflowCompleted");
    ArchivedDay {
        date: field(day, "date").unwrap_or_default(),
        main: assemble(Tier::Main, &tasks, &completed, None),
        overflow: assemble(Tier::Overflow, &overflow_tasks, &overflow_completed, None),
        completion_rate: field::<u8>(day, "completionRate").unwrap_or(0).min(100),
    }
}
