use crate::models::{Candidate, FilterCriteria};

/// Check a single candidate against every active filter dimension.
///
/// Dimensions combine conjunctively; within the availability dimension any
/// overlap with the required slots qualifies.
#[inline]
pub fn matches_criteria(candidate: &Candidate, criteria: &FilterCriteria) -> bool {
    // Check max distance
    if let Some(max_km) = criteria.max_distance_km {
        if candidate.distance_km > max_km {
            return false;
        }
    }

    // Check level
    if let Some(level) = criteria.level {
        if candidate.level != level {
            return false;
        }
    }

    // Check gender
    if let Some(gender) = criteria.gender {
        if candidate.gender != gender {
            return false;
        }
    }

    // Check age bracket
    if let Some(bracket) = criteria.age_bracket {
        if !bracket.contains(candidate.age) {
            return false;
        }
    }

    // Check availability overlap
    if !criteria.required_slots.is_empty()
        && !candidate
            .availability
            .iter()
            .any(|slot| criteria.required_slots.contains(slot))
    {
        return false;
    }

    true
}

/// Apply the criteria over a candidate pool.
///
/// Pure and deterministic; surviving candidates keep their relative input
/// order. The result fully replaces the active queue.
pub fn apply(pool: &[Candidate], criteria: &FilterCriteria) -> Vec<Candidate> {
    pool.iter()
        .filter(|candidate| matches_criteria(candidate, criteria))
        .cloned()
        .collect()
}
