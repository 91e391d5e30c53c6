//! Small pieces of survey-page behavior kept out of the component so they
//! can be tested without a renderer.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use survey_core::model::OptionValue;

/// How long a selection stays highlighted before the page moves on.
pub const AUTO_ADVANCE_DELAY_MS: u64 = 400;

/// Cooperative cancellation for the delayed auto-advance.
///
/// Each new selection arms the token, which bumps the generation and
/// invalidates any advance still sleeping on an older one. Rapid taps
/// therefore advance once, for the latest selection.
#[derive(Clone, Default)]
pub struct AdvanceToken {
    generation: Arc<AtomicU64>,
}

impl AdvanceToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Invalidates pending advances and returns the generation that the new
    /// one must check before firing.
    pub fn arm(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    #[must_use]
    pub fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// Invalidates pending advances without arming a new one (navigating
    /// backwards, leaving the page).
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}

/// One-shot latch so a second submit tap cannot start a second request.
/// Set synchronously in the tap handler, before any await.
#[derive(Clone, Default)]
pub struct SubmitGuard {
    in_flight: Arc<AtomicBool>,
}

impl SubmitGuard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the guard. Returns false when a submission already holds it.
    pub fn try_begin(&self) -> bool {
        self.in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    /// Releases the guard after a failed attempt so the user can retry.
    pub fn finish(&self) {
        self.in_flight.store(false, Ordering::SeqCst);
    }

    #[must_use]
    pub fn in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }
}

/// Adds `value` to a multi-select working set, or removes it when already
/// present.
#[must_use]
pub fn toggle_selection(mut selected: Vec<OptionValue>, value: &OptionValue) -> Vec<OptionValue> {
    if let Some(position) = selected.iter().position(|v| v == value) {
        selected.remove(position);
    } else {
        selected.push(value.clone());
    }
    selected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arming_invalidates_the_previous_generation() {
        let token = AdvanceToken::new();
        let first = token.arm();
        assert!(token.is_current(first));

        let second = token.arm();
        assert!(!token.is_current(first));
        assert!(token.is_current(second));
    }

    #[test]
    fn cancel_invalidates_without_arming() {
        let token = AdvanceToken::new();
        let generation = token.arm();
        token.cancel();
        assert!(!token.is_current(generation));
    }

    #[test]
    fn guard_admits_exactly_one_submission() {
        let guard = SubmitGuard::new();
        assert!(guard.try_begin());
        assert!(!guard.try_begin());
        assert!(guard.in_flight());

        guard.finish();
        assert!(guard.try_begin());
    }

    #[test]
    fn guard_is_shared_across_clones() {
        let guard = SubmitGuard::new();
        let other = guard.clone();
        assert!(guard.try_begin());
        assert!(!other.try_begin());
    }

    #[test]
    fn toggle_selection_round_trips() {
        let travel = OptionValue::Text("travel".into());
        let music = OptionValue::Text("music".into());

        let selected = toggle_selection(Vec::new(), &travel);
        let selected = toggle_selection(selected, &music);
        assert_eq!(selected, vec![travel.clone(), music.clone()]);

        let selected = toggle_selection(selected, &travel);
        assert_eq!(selected, vec![music]);
    }
}
