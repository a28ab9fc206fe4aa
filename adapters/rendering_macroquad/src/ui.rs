//! Immediate-mode UI helpers for the Macroquad rendering backend.
//!
//! This module hosts all uses of `macroquad::ui` so the rest of the adapter can
//! remain agnostic of Macroquad's UI types.

use lane_defence_core::{Resources, Selection, UnitKind};
use macroquad::{
    color::{Color, WHITE},
    math::{RectOffset, Vec2},
    ui::{hash, widgets, Skin, Ui},
};

/// Cards offered in the dock, in keyboard-shortcut order.
pub(crate) const CARDS: [Selection; 5] = [
    Selection::Unit(UnitKind::Producer),
    Selection::Unit(UnitKind::Ranged),
    Selection::Unit(UnitKind::Wall),
    Selection::Unit(UnitKind::Consumer),
    Selection::RemovalTool,
];

const CARD_SIZE: Vec2 = Vec2::new(112.0, 56.0);
const CARD_GAP: f32 = 8.0;
const OVERLAY_BUTTON: Vec2 = Vec2::new(200.0, 48.0);

/// Display name of a dock card.
pub(crate) fn card_label(selection: Selection) -> &'static str {
    match selection {
        Selection::Unit(UnitKind::Producer) => "Producer",
        Selection::Unit(UnitKind::Ranged) => "Ranged",
        Selection::Unit(UnitKind::Wall) => "Wall",
        Selection::Unit(UnitKind::Consumer) => "Consumer",
        Selection::RemovalTool => "Remove",
    }
}

/// Snapshot of the dock's layout and data for the current frame.
#[derive(Clone, Copy, Debug)]
pub(crate) struct DockContext {
    /// Top-left corner of the dock in screen coordinates.
    pub(crate) origin: Vec2,
    /// Dock dimensions in screen space.
    pub(crate) size: Vec2,
    /// Current resource total.
    pub(crate) resources: Resources,
    /// Card currently highlighted.
    pub(crate) selection: Option<Selection>,
}

fn panel_skin(ui: &mut Ui, background: Color) -> Skin {
    let mut skin = ui.default_skin();
    skin.margin = 0.0;

    skin.window_style = ui
        .style_builder()
        .color(background)
        .color_hovered(background)
        .color_clicked(background)
        .color_inactive(background)
        .text_color(WHITE)
        .margin(RectOffset::new(12.0, 12.0, 12.0, 12.0))
        .build();

    skin.label_style = ui
        .style_builder()
        .text_color(WHITE)
        .text_color_hovered(WHITE)
        .text_color_clicked(WHITE)
        .margin(RectOffset::new(0.0, 0.0, 4.0, 4.0))
        .build();

    skin.button_style = ui
        .style_builder()
        .text_color(WHITE)
        .text_color_hovered(WHITE)
        .text_color_clicked(WHITE)
        .color(Color::from_rgba(70, 70, 70, 255))
        .color_hovered(Color::from_rgba(96, 96, 96, 255))
        .color_clicked(Color::from_rgba(56, 56, 56, 255))
        .color_selected(Color::from_rgba(46, 125, 50, 255))
        .color_selected_hovered(Color::from_rgba(67, 160, 71, 255))
        .color_inactive(Color::from_rgba(56, 56, 56, 200))
        .margin(RectOffset::new(0.0, 0.0, 8.0, 8.0))
        .build();

    skin
}

/// Renders the dock of unit cards, returning the card pressed this frame.
pub(crate) fn draw_dock(ui: &mut Ui, context: DockContext) -> Option<Selection> {
    let skin = panel_skin(ui, Color::from_rgba(40, 30, 20, 255));
    ui.push_skin(&skin);

    let mut pressed = None;
    let _ = ui.window(hash!("dock"), context.origin, context.size, |ui| {
        for (index, card) in CARDS.iter().copied().enumerate() {
            let affordable = context.resources >= card.cost();
            let label = if affordable {
                format!("{} {}", card_label(card), card.cost().get())
            } else {
                format!("{} ({})", card_label(card), card.cost().get())
            };
            let position = Vec2::new(index as f32 * (CARD_SIZE.x + CARD_GAP), 0.0);
            let clicked = widgets::Button::new(label.as_str())
                .position(position)
                .size(CARD_SIZE)
                .selected(context.selection == Some(card))
                .ui(ui);
            if clicked && (affordable || context.selection == Some(card)) {
                pressed = Some(card);
            }
        }
    });

    ui.pop_skin();
    pressed
}

/// Renders the title menu, returning `true` once play was requested.
pub(crate) fn draw_menu(ui: &mut Ui, screen: Vec2) -> bool {
    let skin = panel_skin(ui, Color::from_rgba(27, 94, 32, 255));
    ui.push_skin(&skin);

    let size = Vec2::new(360.0, 180.0);
    let origin = (screen - size) * 0.5;
    let mut play = false;
    let _ = ui.window(hash!("menu"), origin, size, |ui| {
        ui.label(None, "LANE DEFENCE");
        ui.label(None, "Collect drops, place defenders, hold every lane.");
        play = widgets::Button::new("PLAY GAME")
            .position(Vec2::new((size.x - OVERLAY_BUTTON.x) * 0.5 - 12.0, 80.0))
            .size(OVERLAY_BUTTON)
            .ui(ui);
    });

    ui.pop_skin();
    play
}

/// Renders the game-over overlay, returning `true` when the player asked to
/// return to the menu.
pub(crate) fn draw_game_over(ui: &mut Ui, screen: Vec2) -> bool {
    let skin = panel_skin(ui, Color::from_rgba(60, 0, 0, 230));
    ui.push_skin(&skin);

    let size = Vec2::new(320.0, 150.0);
    let origin = (screen - size) * 0.5;
    let mut back = false;
    let _ = ui.window(hash!("game_over"), origin, size, |ui| {
        ui.label(None, "GAME OVER");
        ui.label(None, "An attacker broke through.");
        back = widgets::Button::new("BACK TO MENU")
            .position(Vec2::new((size.x - OVERLAY_BUTTON.x) * 0.5 - 12.0, 64.0))
            .size(OVERLAY_BUTTON)
            .ui(ui);
    });

    ui.pop_skin();
    back
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cards_follow_the_cost_table() {
        let costs: Vec<u32> = CARDS.iter().map(|card| card.cost().get()).collect();
        assert_eq!(costs, vec![50, 100, 50, 150, 0]);
    }

    #[test]
    fn card_labels_are_distinct() {
        let mut labels: Vec<_> = CARDS.iter().map(|card| card_label(*card)).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), CARDS.len());
    }
}
