//! Immediate-mode UI helpers for the Macroquad rendering backend.
//!
//! This module hosts all uses of `macroquad::ui` so the rest of the adapter can
//! remain agnostic of Macroquad's UI types.

use arena_survivors_core::{PlayerClass, SessionSummary};
use arena_survivors_rendering::Screen;
use macroquad::{
    color::{Color, WHITE},
    math::{RectOffset, Vec2},
    ui::{hash, Ui},
};

/// Choices made through overlay buttons during the current frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct ScreenUiResult {
    /// Class whose button was pressed on the start screen.
    pub(crate) class_choice: Option<PlayerClass>,
    /// Offer slot whose button was pressed on the level-up screen.
    pub(crate) buff_choice: Option<usize>,
    /// Whether the restart button was pressed on the game-over screen.
    pub(crate) restart: bool,
}

/// Layout of the overlay window for the current frame.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ScreenUiContext<'a> {
    /// Top-left corner of the overlay in screen coordinates.
    pub(crate) origin: Vec2,
    /// Overlay dimensions in screen space.
    pub(crate) size: Vec2,
    /// Background colour applied to the window skin.
    pub(crate) background: Color,
    /// Screen to present.
    pub(crate) screen: &'a Screen,
}

/// Renders the overlay for the start, level-up and game-over screens.
///
/// Gameplay frames have no overlay and return an empty result.
pub(crate) fn draw_screen_ui(ui: &mut Ui, context: ScreenUiContext<'_>) -> ScreenUiResult {
    let mut result = ScreenUiResult::default();
    if matches!(context.screen, Screen::Game) {
        return result;
    }

    let mut skin = ui.default_skin();
    skin.margin = 0.0;
    skin.window_style = ui
        .style_builder()
        .color(context.background)
        .color_hovered(context.background)
        .color_clicked(context.background)
        .color_selected(context.background)
        .color_selected_hovered(context.background)
        .color_inactive(context.background)
        .text_color(WHITE)
        .margin(RectOffset::new(24.0, 24.0, 24.0, 24.0))
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
        .margin(RectOffset::new(8.0, 8.0, 8.0, 8.0))
        .build();
    ui.push_skin(&skin);

    let _ = ui.window(hash!("screen_overlay"), context.origin, context.size, |ui| {
        match context.screen {
            Screen::Start => {
                ui.label(None, "Arena Survivors");
                ui.label(None, "Choose your class (keys 1-4):");
                for (slot, class) in PlayerClass::ALL.into_iter().enumerate() {
                    if ui.button(None, class_label(slot, class).as_str()) {
                        result.class_choice = Some(class);
                    }
                }
            }
            Screen::LevelUp { offer } => {
                ui.label(None, "Level up! Choose a buff (keys 1-3):");
                for (slot, buff) in offer.iter().enumerate() {
                    let label = format!(
                        "{}. {} {}: {}",
                        slot + 1,
                        buff.icon(),
                        buff.name(),
                        buff.description()
                    );
                    if ui.button(None, label.as_str()) {
                        result.buff_choice = Some(slot);
                    }
                }
            }
            Screen::GameOver { summary } => {
                for line in summary_lines(summary) {
                    ui.label(None, line.as_str());
                }
                result.restart = ui.button(None, "Restart (R)");
            }
            Screen::Game => {}
        }
    });

    ui.pop_skin();
    result
}

fn class_label(slot: usize, class: PlayerClass) -> String {
    let template = class.template();
    format!(
        "{}. {} - HP {} / ATK {} / SPD {} / RANGE {}",
        slot + 1,
        class.id(),
        template.health,
        template.attack,
        template.speed,
        template.attack_range
    )
}

fn summary_lines(summary: &SessionSummary) -> [String; 4] {
    [
        "Game over".to_string(),
        format!("Survived: {}s", summary.elapsed.as_secs()),
        format!("Kills: {}", summary.kills),
        format!("Level: {}", summary.level),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn class_labels_list_template_statistics() {
        assert_eq!(
            class_label(0, PlayerClass::Warrior),
            "1. warrior - HP 150 / ATK 15 / SPD 3 / RANGE 50"
        );
        assert_eq!(
            class_label(1, PlayerClass::Mage),
            "2. mage - HP 80 / ATK 25 / SPD 3.5 / RANGE 150"
        );
    }

    #[test]
    fn summary_lines_use_whole_seconds() {
        let lines = summary_lines(&SessionSummary {
            elapsed: Duration::from_millis(65_900),
            kills: 12,
            level: 4,
        });

        assert_eq!(lines[1], "Survived: 65s");
        assert_eq!(lines[2], "Kills: 12");
        assert_eq!(lines[3], "Level: 4");
    }
}
