use serde::{Deserialize, Serialize};

/// Opaque candidate identifier assigned by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateId(pub u64);

impl std::fmt::Display for CandidateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Female,
    Male,
    NonBinary,
}

/// Declared running level. The backend historically sent `advanced` for the
/// top tier before renaming it to `confirmed`; both spellings decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    #[serde(alias = "advanced")]
    Confirmed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayKind {
    Weekday,
    Weekend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    Midday,
    Evening,
}

/// One availability slot: the cross-product of day kind and time of day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilitySlot {
    WeekdayMorning,
    WeekdayMidday,
    WeekdayEvening,
    WeekendMorning,
    WeekendMidday,
    WeekendEvening,
}

impl AvailabilitySlot {
    pub fn new(day: DayKind, time: TimeOfDay) -> Self {
        match (day, time) {
            (DayKind::Weekday, TimeOfDay::Morning) => Self::WeekdayMorning,
            (DayKind::Weekday, TimeOfDay::Midday) => Self::WeekdayMidday,
            (DayKind::Weekday, TimeOfDay::Evening) => Self::WeekdayEvening,
            (DayKind::Weekend, TimeOfDay::Morning) => Self::WeekendMorning,
            (DayKind::Weekend, TimeOfDay::Midday) => Self::WeekendMidday,
            (DayKind::Weekend, TimeOfDay::Evening) => Self::WeekendEvening,
        }
    }

    pub fn day(&self) -> DayKind {
        match self {
            Self::WeekdayMorning | Self::WeekdayMidday | Self::WeekdayEvening => DayKind::Weekday,
            Self::WeekendMorning | Self::WeekendMidday | Self::WeekendEvening => DayKind::Weekend,
        }
    }

    pub fn time(&self) -> TimeOfDay {
        match self {
            Self::WeekdayMorning | Self::WeekendMorning => TimeOfDay::Morning,
            Self::WeekdayMidday | Self::WeekendMidday => TimeOfDay::Midday,
            Self::WeekdayEvening | Self::WeekendEvening => TimeOfDay::Evening,
        }
    }
}

/// A swipeable profile, immutable once fetched from the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub name: String,
    pub age: u8,
    pub gender: Gender,
    #[serde(rename = "imageUrl", default)]
    pub image_url: Option<String>,
    /// Home locality shown on the card (the backend calls this `commune`)
    pub commune: String,
    #[serde(rename = "distanceKm")]
    pub distance_km: f64,
    pub level: SkillLevel,
    #[serde(default)]
    pub availability: Vec<AvailabilitySlot>,
}

/// Enumerated age brackets selectable in the filter panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgeBracket {
    #[serde(rename = "18-25")]
    From18To25,
    #[serde(rename = "26-35")]
    From26To35,
    #[serde(rename = "36+")]
    From36Plus,
}

impl AgeBracket {
    /// Inclusive bounds; `36+` means age >= 36
    pub fn contains(&self, age: u8) -> bool {
        match self {
            Self::From18To25 => (18..=25).contains(&age),
            Self::From26To35 => (26..=35).contains(&age),
            Self::From36Plus => age >= 36,
        }
    }
}

/// Distance choices offered by the filter panel, in kilometers
pub const MAX_DISTANCE_CHOICES_KM: [f64; 4] = [5.0, 10.0, 25.0, 50.0];

/// A filter configuration snapshot.
///
/// `None`/empty fields mean "unconstrained". Drafts are plain clones edited by
/// the caller; they only affect the live deck through
/// [`SwipeDeck::apply_filters`](crate::core::deck::SwipeDeck::apply_filters),
/// which commits atomically or rejects the whole draft.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(rename = "maxDistanceKm", default)]
    pub max_distance_km: Option<f64>,
    #[serde(default)]
    pub level: Option<SkillLevel>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(rename = "ageBracket", default)]
    pub age_bracket: Option<AgeBracket>,
    #[serde(rename = "requiredSlots", default)]
    pub required_slots: Vec<AvailabilitySlot>,
}

impl FilterCriteria {
    /// Check that the max-distance choice is one of the allowed values
    pub fn validate(&self) -> Result<(), CriteriaError> {
        match self.max_distance_km {
            Some(km) if !MAX_DISTANCE_CHOICES_KM.contains(&km) => {
                Err(CriteriaError::InvalidDistanceChoice(km))
            }
            _ => Ok(()),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CriteriaError {
    #[error("max distance {0} km is not one of the allowed choices")]
    InvalidDistanceChoice(f64),
}

/// Swipe direction on the wire: right = like, left = pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeDirection {
    Left,
    Right,
}

impl SwipeDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// Which server-side quota was exhausted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    /// Daily free-like quota
    PerActionLimit,
    /// Daily total swipe quota (likes and passes combined)
    DailyTotalLimit,
}

impl LimitKind {
    /// Fallback user-facing message when the backend sends none
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::PerActionLimit => "Daily like limit reached. Come back tomorrow!",
            Self::DailyTotalLimit => "Daily swipe limit reached. Come back tomorrow!",
        }
    }
}

/// Resolution of a submitted like. Exhaustively matched by the deck
/// controller; never persisted client-side.
#[derive(Debug, Clone, PartialEq)]
pub enum DecisionOutcome {
    Confirmed { matched: bool },
    LimitReached { kind: LimitKind, message: String },
    Failed { reason: String },
}
