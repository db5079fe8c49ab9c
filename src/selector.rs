//! Patch selection decision procedure.
//!
//! Given a base version, the selectable patch list, and the user's chosen
//! tag, decides whether the choice is current or stale, and gates stale
//! choices behind a confirmation. Presentation is injected as a [`Prompter`];
//! the decision logic never knows what is rendering it.

use crate::catalog;
use crate::ui::Prompter;
use anyhow::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Idle,
    VersionSelected,
    PatchListed,
    PatchChosen,
    StaleConfirm,
    Installing,
    Success,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Proceed,
    Cancelled,
}

/// The latest patch tag in effect for a base version.
///
/// The live feed value only applies to the current line; the frozen lines
/// override it with their hard-coded final patch, whatever the feed says.
pub fn effective_latest(base: &str, live_latest: &str) -> String {
    match catalog::legacy_latest(base) {
        Some(legacy) => legacy.to_string(),
        None => live_latest.to_string(),
    }
}

pub struct PatchSelector {
    state: State,
    base: Option<String>,
    patches: Vec<String>,
    chosen: Option<String>,
}

impl PatchSelector {
    pub fn new() -> Self {
        Self {
            state: State::Idle,
            base: None,
            patches: Vec::new(),
            chosen: None,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn base(&self) -> Option<&str> {
        self.base.as_deref()
    }

    pub fn patches(&self) -> &[String] {
        &self.patches
    }

    pub fn chosen(&self) -> Option<&str> {
        self.chosen.as_deref()
    }

    /// Select the base version. Clears any downstream selection.
    pub fn select_version(&mut self, base: &str) {
        self.base = Some(base.to_string());
        self.patches.clear();
        self.chosen = None;
        self.state = State::VersionSelected;
    }

    /// Provide the selectable patch list for the current base version.
    pub fn set_patches(&mut self, patches: Vec<String>) {
        debug_assert!(self.base.is_some());
        self.patches = patches;
        self.chosen = None;
        self.state = State::PatchListed;
    }

    pub fn choose_patch(&mut self, tag: &str) {
        self.chosen = Some(tag.to_string());
        self.state = State::PatchChosen;
    }

    /// Gate the chosen patch against the latest tag in effect.
    ///
    /// Containment rather than equality is intentional: the chosen tag may
    /// carry the `" (latest)"` display suffix and must not need stripping.
    /// Cancelling at the gate clears the selection and returns `Cancelled`
    /// without error; the caller may list and choose again.
    pub fn decide(&mut self, live_latest: &str, prompter: &dyn Prompter) -> Result<Decision> {
        let base = self.base.as_deref().unwrap_or_default();
        let chosen = self.chosen.as_deref().unwrap_or_default();
        let latest = effective_latest(base, live_latest);

        if !chosen.contains(latest.as_str()) {
            self.state = State::StaleConfirm;
            let proceed = prompter.confirm(
                "You are not using the latest patch version.",
                "Continue anyway",
                "Cancel",
            )?;
            if !proceed {
                tracing::info!("Stale patch selection cancelled");
                self.chosen = None;
                self.state = State::PatchListed;
                return Ok(Decision::Cancelled);
            }
            tracing::info!("Continuing with stale patch version: {}", chosen);
        }

        self.state = State::Installing;
        Ok(Decision::Proceed)
    }

    pub fn mark_success(&mut self) {
        self.state = State::Success;
    }

    /// Failure is re-enterable: the selection is cleared and the caller can
    /// choose again from the existing list.
    pub fn mark_failed(&mut self) {
        self.chosen = None;
        self.state = State::Failed;
    }
}

impl Default for PatchSelector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::ScriptedPrompter;

    fn selector_with_choice(base: &str, tag: &str) -> PatchSelector {
        let mut selector = PatchSelector::new();
        selector.select_version(base);
        selector.set_patches(vec![tag.to_string()]);
        selector.choose_patch(tag);
        selector
    }

    #[test]
    fn test_selection_progresses_through_states() {
        let mut selector = PatchSelector::new();
        assert_eq!(selector.state(), State::Idle);
        assert_eq!(selector.base(), None);

        selector.select_version("3.9.0");
        assert_eq!(selector.state(), State::VersionSelected);
        assert_eq!(selector.base(), Some("3.9.0"));

        selector.set_patches(vec!["v3.9.0_abc123".to_string()]);
        assert_eq!(selector.state(), State::PatchListed);

        selector.choose_patch("v3.9.0_abc123");
        assert_eq!(selector.state(), State::PatchChosen);
        assert_eq!(selector.chosen(), Some("v3.9.0_abc123"));
    }

    #[test]
    fn test_reselecting_version_clears_downstream_choice() {
        let mut selector = selector_with_choice("3.9.0", "v3.9.0_abc123");

        selector.select_version("3.8.0");

        assert_eq!(selector.base(), Some("3.8.0"));
        assert_eq!(selector.chosen(), None);
        assert!(selector.patches().is_empty());
        assert_eq!(selector.state(), State::VersionSelected);
    }

    #[test]
    fn test_effective_latest_live_line() {
        assert_eq!(effective_latest("3.9.0", "v3.9.0_abc123"), "v3.9.0_abc123");
    }

    #[test]
    fn test_effective_latest_frozen_lines_ignore_feed() {
        assert_eq!(effective_latest("3.8.0", "v3.9.0_abc123"), "v3.8.0_b97253e");
        assert_eq!(effective_latest("3.7.1", "v3.9.0_abc123"), "v3.7.1_98e8089");
    }

    #[test]
    fn test_current_choice_skips_stale_gate() {
        let mut selector = selector_with_choice("3.9.0", "v3.9.0_abc123 (latest)");
        let prompter = ScriptedPrompter::new(vec![]);

        let decision = selector.decide("v3.9.0_abc123", &prompter).unwrap();

        assert_eq!(decision, Decision::Proceed);
        assert_eq!(selector.state(), State::Installing);
        assert_eq!(prompter.confirmation_count(), 0);
    }

    #[test]
    fn test_stale_choice_raises_gate() {
        let mut selector = selector_with_choice("3.9.0", "v3.9.0_old999");
        let prompter = ScriptedPrompter::new(vec![true]);

        let decision = selector.decide("v3.9.0_abc123", &prompter).unwrap();

        assert_eq!(decision, Decision::Proceed);
        assert_eq!(prompter.confirmation_count(), 1);
    }

    #[test]
    fn test_declined_gate_clears_selection_without_error() {
        let mut selector = selector_with_choice("3.9.0", "v3.9.0_old999");
        let prompter = ScriptedPrompter::new(vec![false]);

        let decision = selector.decide("v3.9.0_abc123", &prompter).unwrap();

        assert_eq!(decision, Decision::Cancelled);
        assert_eq!(selector.chosen(), None);
        assert_eq!(selector.state(), State::PatchListed);
    }

    #[test]
    fn test_frozen_line_gate_uses_legacy_tag() {
        // Live feed reports a 3.9.0 tag, but on the 3.8.0 line the frozen
        // legacy tag is what counts as latest.
        let mut selector = selector_with_choice("3.8.0", "v3.8.0_b97253e (latest)");
        let prompter = ScriptedPrompter::new(vec![]);

        let decision = selector.decide("v3.9.0_abc123", &prompter).unwrap();

        assert_eq!(decision, Decision::Proceed);
        assert_eq!(prompter.confirmation_count(), 0);
    }

    #[test]
    fn test_failed_install_reenters_choosable_state() {
        let mut selector = selector_with_choice("3.9.0", "v3.9.0_abc123 (latest)");
        let prompter = ScriptedPrompter::new(vec![]);
        selector.decide("v3.9.0_abc123", &prompter).unwrap();

        selector.mark_failed();

        assert_eq!(selector.state(), State::Failed);
        assert_eq!(selector.chosen(), None);
        // List survives the failure so the user can pick again
        assert_eq!(selector.patches().len(), 1);
    }
}
