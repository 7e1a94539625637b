//! Step deriver — pure computation of per-step `current`/`done` flags.

use serde::Serialize;

use super::catalog::{StepDescriptor, step_index};

/// A catalog entry enriched with its derived progression flags.
#[derive(Debug, Clone, Serialize)]
pub struct StepView {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub current: bool,
    pub done: bool,
}

/// Derive the view of every step from the current step id and the
/// completion flag.
///
/// A `current_step` that matches no catalog entry (the uninitialized empty
/// value, or a stale id) acts as index −1: nothing is current, nothing is
/// done. That is a valid transient state, not an error.
pub fn derive_steps(
    catalog: &'static [StepDescriptor],
    current_step: &str,
    completed: bool,
) -> Vec<StepView> {
    let current_index = step_index(current_step);

    catalog
        .iter()
        .enumerate()
        .map(|(index, step)| StepView {
            id: step.id,
            title: step.title,
            description: step.description,
            current: !completed && step.id == current_step,
            done: completed || current_index.is_some_and(|c| index < c),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::super::catalog::STEPS;
    use super::*;

    fn flags(views: &[StepView]) -> (Vec<bool>, Vec<bool>) {
        (
            views.iter().map(|v| v.current).collect(),
            views.iter().map(|v| v.done).collect(),
        )
    }

    #[test]
    fn first_step_current_nothing_done() {
        let views = derive_steps(STEPS, "pricing", false);
        let (current, done) = flags(&views);
        assert_eq!(current, [true, false, false]);
        assert_eq!(done, [false, false, false]);
    }

    #[test]
    fn middle_step_marks_prefix_done() {
        let views = derive_steps(STEPS, "billing", false);
        let (current, done) = flags(&views);
        assert_eq!(current, [false, true, false]);
        assert_eq!(done, [true, false, false]);
    }

    #[test]
    fn last_step_marks_two_done() {
        let views = derive_steps(STEPS, "invites", false);
        let (current, done) = flags(&views);
        assert_eq!(current, [false, false, true]);
        assert_eq!(done, [true, true, false]);
    }

    #[test]
    fn completed_means_no_current_and_all_done() {
        // The step pointer stays on the last step after completion
        let views = derive_steps(STEPS, "invites", true);
        let (current, done) = flags(&views);
        assert_eq!(current, [false, false, false]);
        assert_eq!(done, [true, true, true]);
    }

    #[test]
    fn exactly_one_current_for_every_valid_step() {
        for step in STEPS {
            let views = derive_steps(STEPS, step.id, false);
            assert_eq!(views.iter().filter(|v| v.current).count(), 1);
        }
    }

    #[test]
    fn unknown_step_id_acts_as_minus_one() {
        for id in ["", "checkout"] {
            let views = derive_steps(STEPS, id, false);
            let (current, done) = flags(&views);
            assert_eq!(current, [false, false, false], "for {id:?}");
            assert_eq!(done, [false, false, false], "for {id:?}");
        }
    }

    #[test]
    fn views_carry_catalog_metadata() {
        let views = derive_steps(STEPS, "pricing", false);
        assert_eq!(views.len(), STEPS.len());
        assert_eq!(views[0].title, "Choose a Plan");
        assert_eq!(views[2].id, "invites");
    }
}
