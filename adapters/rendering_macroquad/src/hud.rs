//! HUD state that receives engine notifications and owns the selection UI.

use std::time::Duration;

use lane_defence_core::{Resources, Selection};
use lane_defence_engine::EngineHost;

/// How long the wave announcement stays on screen.
pub(crate) const WAVE_BANNER_DURATION: Duration = Duration::from_secs(4);

/// Host-side view of a run, updated through [`EngineHost`] callbacks.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct HudState {
    resources: Resources,
    selection: Option<Selection>,
    game_over: bool,
    wave_banner: Duration,
}

impl HudState {
    pub(crate) fn resources(&self) -> Resources {
        self.resources
    }

    pub(crate) fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub(crate) fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub(crate) fn wave_banner_visible(&self) -> bool {
        !self.wave_banner.is_zero()
    }

    /// Counts the wave announcement down by one display frame.
    pub(crate) fn elapse(&mut self, dt: Duration) {
        self.wave_banner = self.wave_banner.saturating_sub(dt);
    }

    /// Reports whether the selection can be afforded with the current total.
    pub(crate) fn affordable(&self, selection: Selection) -> bool {
        self.resources >= selection.cost()
    }

    /// Applies a card press, returning the new selection when it changed.
    ///
    /// Pressing the active card clears it; unaffordable cards are ignored.
    pub(crate) fn choose(&mut self, selection: Selection) -> Option<Option<Selection>> {
        let next = if self.selection == Some(selection) {
            None
        } else if self.affordable(selection) {
            Some(selection)
        } else {
            return None;
        };
        self.selection = next;
        Some(next)
    }
}

impl EngineHost for HudState {
    fn resources_changed(&mut self, total: Resources) {
        self.resources = total;
    }

    fn game_over(&mut self) {
        self.game_over = true;
        self.selection = None;
    }

    fn placement_completed(&mut self) {
        self.selection = None;
    }

    fn wave_started(&mut self) {
        self.wave_banner = WAVE_BANNER_DURATION;
    }
}
