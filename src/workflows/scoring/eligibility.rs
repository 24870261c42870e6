use super::domain::{CoachGrade, CoachProfile, CoachStatus, EligibleCoach};

/// Filter a roster snapshot down to the coaches cleared for a grade
/// requirement: approved status and grade >= the requirement.
///
/// Order is by coach name, ties broken by member id, so repeated reads over
/// the same snapshot yield the same sequence. Fit ranking is a separate,
/// advisory concern and never happens here.
pub fn eligible_from_roster(
    roster: Vec<CoachProfile>,
    required_grade: CoachGrade,
) -> Vec<EligibleCoach> {
    let mut eligible: Vec<EligibleCoach> = roster
        .into_iter()
        .filter(|coach| coach.status == CoachStatus::Approved && coach.grade >= required_grade)
        .map(EligibleCoach::from_profile)
        .collect();

    eligible.sort_by(|a, b| {
        a.name
            .cmp(&b.name)
            .then_with(|| a.member_id.cmp(&b.member_id))
    });

    eligible
}
