//! Progress aggregation.
//!
//! Pure computation: activity completion ratio to assignment progress
//! percentage. Activity-driven progress tops out at 70; the band from
//! 90 upward belongs to the review/approval path and is never touched by
//! recalculation.

/// Portion of the percentage scale driven by activity completion.
pub const ACTIVITY_PROGRESS_SPAN: u8 = 70;

/// Submitting the final report floors progress here; recalculation never
/// overwrites values at or above it.
pub const REVIEW_PROGRESS_FLOOR: u8 = 90;

/// Rejected assignments land in [REWORK_PROGRESS_MIN, REWORK_PROGRESS_MAX].
/// Policy constants carried over from operations, not derived invariants.
pub const REWORK_PROGRESS_MIN: u8 = 70;
pub const REWORK_PROGRESS_MAX: u8 = 89;

pub const MAX_PROGRESS: u8 = 100;

/// Progress contributed by the checklist: `round(completed/total * 70)`.
/// An empty checklist contributes 0.
pub fn activity_progress(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let ratio = completed as f64 / total as f64;
    (ratio * f64::from(ACTIVITY_PROGRESS_SPAN)).round() as u8
}

/// What the assignment's progress should become after an activity
/// change, or `None` when no write is needed. Values at or above the
/// review floor are owned by the review path and left alone.
pub fn recalculated(current: u8, completed: usize, total: usize) -> Option<u8> {
    if current >= REVIEW_PROGRESS_FLOOR {
        return None;
    }
    let next = activity_progress(completed, total);
    (next != current).then_some(next)
}

/// Clamp a rejected assignment's progress into the rework band.
pub fn rework_clamp(current: u8) -> u8 {
    current.clamp(REWORK_PROGRESS_MIN, REWORK_PROGRESS_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_progress_rounding() {
        assert_eq!(activity_progress(0, 0), 0);
        assert_eq!(activity_progress(0, 4), 0);
        assert_eq!(activity_progress(1, 1), 70);
        assert_eq!(activity_progress(2, 4), 35);
        // 1/3 of 70 = 23.33 rounds down, 2/3 = 46.67 rounds up
        assert_eq!(activity_progress(1, 3), 23);
        assert_eq!(activity_progress(2, 3), 47);
    }

    #[test]
    fn test_recalculation_respects_review_floor() {
        assert_eq!(recalculated(35, 4, 4), Some(70));
        assert_eq!(recalculated(90, 4, 4), None);
        assert_eq!(recalculated(95, 0, 4), None);
        // unchanged value needs no write
        assert_eq!(recalculated(70, 1, 1), None);
    }

    #[test]
    fn test_empty_checklist_resets_progress() {
        // all activities were removed: derived progress drops to 0
        assert_eq!(recalculated(35, 0, 0), Some(0));
    }

    #[test]
    fn test_rework_clamp_bounds() {
        assert_eq!(rework_clamp(95), REWORK_PROGRESS_MAX);
        assert_eq!(rework_clamp(90), REWORK_PROGRESS_MAX);
        assert_eq!(rework_clamp(89), 89);
        assert_eq!(rework_clamp(75), 75);
        assert_eq!(rework_clamp(10), REWORK_PROGRESS_MIN);
    }
}
