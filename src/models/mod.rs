// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    AgeBracket, AvailabilitySlot, Candidate, CandidateId, CriteriaError, DayKind, DecisionOutcome,
    FilterCriteria, Gender, LimitKind, SkillLevel, SwipeDirection, TimeOfDay,
    MAX_DISTANCE_CHOICES_KM,
};
pub use requests::SwipeRequest;
pub use responses::{AckResponse, ErrorResponse, RecommendationsResponse, SwipeResponse};
