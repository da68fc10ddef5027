use std::fmt;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::registration::RegistrationId;

/// Teaching day of the weekly grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Day {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
}

impl Day {
    pub const ALL: [Day; 5] = [Day::Mon, Day::Tue, Day::Wed, Day::Thu, Day::Fri];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Day::Mon => "MON",
            Day::Tue => "TUE",
            Day::Wed => "WED",
            Day::Thu => "THU",
            Day::Fri => "FRI",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SlotType {
    Theory,
    Lab,
}

impl fmt::Display for SlotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotType::Theory => f.write_str("Theory"),
            SlotType::Lab => f.write_str("Lab"),
        }
    }
}

/// One of the 13 ordered grid columns.
///
/// Serialized as its canonical key (`"08:00"`, `"Lunch"`, ...). The key of a
/// column is the start of its lab period, which is why lab occurrences can
/// use it directly while theory lecture hours need translating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ColumnKey {
    #[serde(rename = "08:00")]
    Morning1,
    #[serde(rename = "08:51")]
    Morning2,
    #[serde(rename = "09:51")]
    Morning3,
    #[serde(rename = "10:41")]
    Morning4,
    #[serde(rename = "11:40")]
    Morning5,
    #[serde(rename = "12:31")]
    Morning6,
    #[serde(rename = "Lunch")]
    Lunch,
    #[serde(rename = "14:00")]
    Afternoon1,
    #[serde(rename = "14:51")]
    Afternoon2,
    #[serde(rename = "15:51")]
    Afternoon3,
    #[serde(rename = "16:41")]
    Afternoon4,
    #[serde(rename = "17:40")]
    Afternoon5,
    #[serde(rename = "18:31")]
    Afternoon6,
}

impl ColumnKey {
    pub const ALL: [ColumnKey; 13] = [
        ColumnKey::Morning1,
        ColumnKey::Morning2,
        ColumnKey::Morning3,
        ColumnKey::Morning4,
        ColumnKey::Morning5,
        ColumnKey::Morning6,
        ColumnKey::Lunch,
        ColumnKey::Afternoon1,
        ColumnKey::Afternoon2,
        ColumnKey::Afternoon3,
        ColumnKey::Afternoon4,
        ColumnKey::Afternoon5,
        ColumnKey::Afternoon6,
    ];

    pub const MORNING: [ColumnKey; 6] = [
        ColumnKey::Morning1,
        ColumnKey::Morning2,
        ColumnKey::Morning3,
        ColumnKey::Morning4,
        ColumnKey::Morning5,
        ColumnKey::Morning6,
    ];

    pub const AFTERNOON: [ColumnKey; 6] = [
        ColumnKey::Afternoon1,
        ColumnKey::Afternoon2,
        ColumnKey::Afternoon3,
        ColumnKey::Afternoon4,
        ColumnKey::Afternoon5,
        ColumnKey::Afternoon6,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn key(self) -> &'static str {
        match self {
            ColumnKey::Morning1 => "08:00",
            ColumnKey::Morning2 => "08:51",
            ColumnKey::Morning3 => "09:51",
            ColumnKey::Morning4 => "10:41",
            ColumnKey::Morning5 => "11:40",
            ColumnKey::Morning6 => "12:31",
            ColumnKey::Lunch => "Lunch",
            ColumnKey::Afternoon1 => "14:00",
            ColumnKey::Afternoon2 => "14:51",
            ColumnKey::Afternoon3 => "15:51",
            ColumnKey::Afternoon4 => "16:41",
            ColumnKey::Afternoon5 => "17:40",
            ColumnKey::Afternoon6 => "18:31",
        }
    }

    /// Parses a canonical key. Only exact keys are accepted.
    pub fn from_key(key: &str) -> Option<ColumnKey> {
        ColumnKey::ALL.into_iter().find(|column| column.key() == key)
    }

    pub fn is_lunch(self) -> bool {
        self == ColumnKey::Lunch
    }

    /// Real-world (start, end) window of this column
    pub fn window(self) -> (NaiveTime, NaiveTime) {
        let (start, end) = match self {
            ColumnKey::Morning1 => ((8, 0), (8, 50)),
            ColumnKey::Morning2 => ((8, 51), (9, 40)),
            ColumnKey::Morning3 => ((9, 51), (10, 40)),
            ColumnKey::Morning4 => ((10, 41), (11, 30)),
            ColumnKey::Morning5 => ((11, 40), (12, 30)),
            ColumnKey::Morning6 => ((12, 31), (13, 20)),
            ColumnKey::Lunch => ((13, 20), (14, 0)),
            ColumnKey::Afternoon1 => ((14, 0), (14, 50)),
            ColumnKey::Afternoon2 => ((14, 51), (15, 40)),
            ColumnKey::Afternoon3 => ((15, 51), (16, 40)),
            ColumnKey::Afternoon4 => ((16, 41), (17, 30)),
            ColumnKey::Afternoon5 => ((17, 40), (18, 30)),
            ColumnKey::Afternoon6 => ((18, 31), (19, 20)),
        };
        (hm(start), hm(end))
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

fn hm((hour, minute): (u32, u32)) -> NaiveTime {
    // Every pair above is a valid wall-clock time.
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

/// A catalog entry: one slot code and the weekly occurrences it stands for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotDefinition {
    pub code: String,
    pub slot_type: SlotType,
    /// (day, raw time) in catalog order. Theory raw times are lecture hours,
    /// lab raw times are already column keys.
    pub occurrences: Vec<(Day, String)>,
}

/// One grid cell a course occupies through one of its slots
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OccupancyRecord {
    pub course: RegistrationId,
    pub course_number: u32,
    pub slot_code: String,
    pub slot_type: SlotType,
    pub day: Day,
    pub column: ColumnKey,
}

/// Two courses claiming the same (day, column).
///
/// The pair is unordered: `new` puts the records in a fixed order so that
/// equal conflicts compare and hash equal however they were found.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConflictRecord {
    pub day: Day,
    pub column: ColumnKey,
    pub first: OccupancyRecord,
    pub second: OccupancyRecord,
}

impl ConflictRecord {
    pub fn new(a: OccupancyRecord, b: OccupancyRecord) -> Self {
        let (first, second) = if a <= b { (a, b) } else { (b, a) };
        Self {
            day: first.day,
            column: first.column,
            first,
            second,
        }
    }

    /// True when a theory slot collides with a lab slot
    pub fn is_cross_category(&self) -> bool {
        self.first.slot_type != self.second.slot_type
    }

    pub fn involves(&self, course: RegistrationId) -> bool {
        self.first.course == course || self.second.course == course
    }
}
