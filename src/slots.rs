//! Fixed-shape task slots for the main and overflow tiers.
//!
//! The main tier holds 1 major / 3 medium / 5 small slots and the overflow
//! tier 1 / 2 / 3. A slot carries its text, a completion flag and the number
//! of day boundaries it has survived without being completed.

use std::fmt;

/// Which task set a slot belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    /// The daily 1/3/5 board.
    Main,
    /// Bonus tasks, unlocked once every main slot is done.
    Overflow,
}

impl Tier {
    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Overflow => "overflow",
        }
    }

    /// Number of slots the tier holds for a priority bucket.
    pub fn arity(&self, priority: Priority) -> usize {
        match (self, priority) {
            (_, Priority::Major) => 1,
            (Self::Main, Priority::Medium) => 3,
            (Self::Main, Priority::Small) => 5,
            (Self::Overflow, Priority::Medium) => 2,
            (Self::Overflow, Priority::Small) => 3,
        }
    }

    /// Total number of slots across all buckets.
    pub fn total_slots(&self) -> usize {
        Priority::ALL.iter().map(|p| self.arity(*p)).sum()
    }
}

/// Priority bucket of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Priority {
    Major,
    Medium,
    Small,
}

impl Priority {
    /// Buckets in board order.
    pub const ALL: [Priority; 3] = [Priority::Major, Priority::Medium, Priority::Small];

    /// Parse priority from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "major" => Some(Self::Major),
            "medium" => Some(Self::Medium),
            "small" => Some(Self::Small),
            _ => None,
        }
    }

    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Major => "major",
            Self::Medium => "medium",
            Self::Small => "small",
        }
    }
}

/// One task slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskSlot {
    pub text: String,
    pub completed: bool,
    /// Day boundaries survived incomplete with unchanged text.
    pub rollover_count: u32,
}

impl TaskSlot {
    /// A fresh, incomplete slot with the given text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            completed: false,
            rollover_count: 0,
        }
    }

    /// A slot carried over from an earlier day.
    pub fn carried(text: impl Into<String>, rollover_count: u32) -> Self {
        Self {
            text: text.into(),
            completed: false,
            rollover_count,
        }
    }

    /// Whether the slot has non-blank text.
    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }

    /// Whether the slot would be carried to the next day.
    pub fn is_pending(&self) -> bool {
        !self.completed && self.has_text()
    }

    /// Rollover badge to show next to the slot, if any.
    pub fn badge(&self) -> Option<RolloverBadge> {
        RolloverBadge::for_count(self.rollover_count)
    }
}

/// How long a task has been dragging along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeLevel {
    /// Carried once.
    Fresh,
    /// Carried twice.
    Stale,
    /// Carried three times or more.
    Overdue,
}

/// Badge shown on slots with a non-zero rollover count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RolloverBadge {
    pub days: u32,
    pub level: BadgeLevel,
}

impl RolloverBadge {
    pub fn for_count(count: u32) -> Option<Self> {
        let level = match count {
            0 => return None,
            1 => BadgeLevel::Fresh,
            2 => BadgeLevel::Stale,
            _ => BadgeLevel::Overdue,
        };
        Some(Self { days: count, level })
    }

    pub fn label(&self) -> String {
        if self.days == 1 {
            "1 day".to_string()
        } else {
            format!("{} days", self.days)
        }
    }
}

/// Address of a single slot: tier, bucket and index within the bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotAddr {
    pub tier: Tier,
    pub priority: Priority,
    pub index: usize,
}

impl SlotAddr {
    pub fn new(tier: Tier, priority: Priority, index: usize) -> Self {
        Self {
            tier,
            priority,
            index,
        }
    }

    /// The major slot of a tier.
    pub fn major(tier: Tier) -> Self {
        Self::new(tier, Priority::Major, 0)
    }

    /// Whether the index fits the bucket's fixed arity.
    pub fn is_valid(&self) -> bool {
        self.index < self.tier.arity(self.priority)
    }

    /// Every slot of a tier in board order.
    pub fn all(tier: Tier) -> Vec<SlotAddr> {
        Priority::ALL
            .iter()
            .flat_map(|&p| (0..tier.arity(p)).map(move |i| SlotAddr::new(tier, p, i)))
            .collect()
    }

    /// Hint shown in an empty slot.
    pub fn placeholder(&self) -> String {
        match self.priority {
            Priority::Major => "What's the ONE thing that matters most today?".to_string(),
            Priority::Medium => format!("Medium task {}", self.index + 1),
            Priority::Small => format!("Small task {}", self.index + 1),
        }
    }

    /// Parse a human slot reference such as `major`, `medium.2` or
    /// `overflow.small.3`. Indices are 1-based.
    pub fn parse(input: &str) -> Result<Self, String> {
        let mut parts: Vec<&str> = input.trim().split('.').collect();
        if parts.first().map(|p| p.is_empty()).unwrap_or(true) {
            return Err("empty slot reference".to_string());
        }

        let tier = match parts[0].to_lowercase().as_str() {
            "overflow" | "bonus" => {
                parts.remove(0);
                Tier::Overflow
            }
            "main" => {
                parts.remove(0);
                Tier::Main
            }
            _ => Tier::Main,
        };

        let (priority, index) = match parts.as_slice() {
            [p] => {
                let priority = Priority::parse(p)
                    .ok_or_else(|| format!("unknown priority '{}' in slot '{}'", p, input))?;
                if priority != Priority::Major {
                    return Err(format!(
                        "slot '{}' needs an index, e.g. {}.1",
                        input,
                        priority.as_str()
                    ));
                }
                (priority, 0)
            }
            [p, n] => {
                let priority = Priority::parse(p)
                    .ok_or_else(|| format!("unknown priority '{}' in slot '{}'", p, input))?;
                let n: usize = n
                    .parse()
                    .map_err(|_| format!("invalid slot index '{}' in slot '{}'", n, input))?;
                if n == 0 {
                    return Err(format!("slot indices start at 1: '{}'", input));
                }
                (priority, n - 1)
            }
            _ => return Err(format!("invalid slot reference '{}'", input)),
        };

        let addr = SlotAddr::new(tier, priority, index);
        if !addr.is_valid() {
            return Err(format!(
                "{} {} has {} slot(s), got index {}",
                tier.as_str(),
                priority.as_str(),
                tier.arity(priority),
                index + 1
            ));
        }
        Ok(addr)
    }
}

impl fmt::Display for SlotAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.tier == Tier::Overflow {
            write!(f, "overflow.")?;
        }
        match self.priority {
            Priority::Major => write!(f, "major"),
            p => write!(f, "{}.{}", p.as_str(), self.index + 1),
        }
    }
}

/// The slots of one tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSet {
    tier: Tier,
    major: TaskSlot,
    medium: Vec<TaskSlot>,
    small: Vec<TaskSlot>,
}

impl TaskSet {
    /// An all-empty task set shaped for the tier.
    pub fn empty(tier: Tier) -> Self {
        Self {
            tier,
            major: TaskSlot::default(),
            medium: vec![TaskSlot::default(); tier.arity(Priority::Medium)],
            small: vec![TaskSlot::default(); tier.arity(Priority::Small)],
        }
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    /// Slots of one bucket, in order.
    pub fn bucket(&self, priority: Priority) -> &[TaskSlot] {
        match priority {
            Priority::Major => std::slice::from_ref(&self.major),
            Priority::Medium => &self.medium,
            Priority::Small => &self.small,
        }
    }

    fn bucket_mut(&mut self, priority: Priority) -> &mut [TaskSlot] {
        match priority {
            Priority::Major => std::slice::from_mut(&mut self.major),
            Priority::Medium => &mut self.medium,
            Priority::Small => &mut self.small,
        }
    }

    fn check_index(&self, priority: Priority, index: usize) {
        let arity = self.tier.arity(priority);
        assert!(
            index < arity,
            "{} {} slot index {} out of range (0..{})",
            self.tier.as_str(),
            priority.as_str(),
            index,
            arity
        );
    }

    /// A single slot. Panics on an index outside the bucket's arity.
    pub fn slot(&self, priority: Priority, index: usize) -> &TaskSlot {
        self.check_index(priority, index);
        &self.bucket(priority)[index]
    }

    /// Replace a slot wholesale. Panics on an index outside the bucket's arity.
    pub fn place(&mut self, priority: Priority, index: usize, slot: TaskSlot) {
        self.check_index(priority, index);
        self.bucket_mut(priority)[index] = slot;
    }

    /// Set a slot's text. A different value resets the rollover count;
    /// returns whether the text changed.
    pub fn set_text(&mut self, priority: Priority, index: usize, value: &str) -> bool {
        self.check_index(priority, index);
        let slot = &mut self.bucket_mut(priority)[index];
        if slot.text == value {
            return false;
        }
        slot.text = value.to_string();
        slot.rollover_count = 0;
        true
    }

    /// Flip a slot's completion flag and return the new value.
    pub fn toggle_completed(&mut self, priority: Priority, index: usize) -> bool {
        self.check_index(priority, index);
        let slot = &mut self.bucket_mut(priority)[index];
        slot.completed = !slot.completed;
        slot.completed
    }

    /// All slots in board order: major, medium, small.
    pub fn slots(&self) -> impl Iterator<Item = (Priority, usize, &TaskSlot)> + '_ {
        Priority::ALL.into_iter().flat_map(move |p| {
            self.bucket(p)
                .iter()
                .enumerate()
                .map(move |(i, slot)| (p, i, slot))
        })
    }

    /// Number of slots marked completed, text or not.
    pub fn completed_count(&self) -> usize {
        self.slots().filter(|(_, _, s)| s.completed).count()
    }

    pub fn any_completed(&self) -> bool {
        self.slots().any(|(_, _, s)| s.completed)
    }

    /// Reset every slot to empty.
    pub fn clear(&mut self) {
        *self = Self::empty(self.tier);
    }
}
