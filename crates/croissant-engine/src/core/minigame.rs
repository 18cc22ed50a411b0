//! Shared minigame shell: the uniform Exit-to-overworld affordance and the
//! Instructions → Playing → Ended round shape every minigame cycles through.
//!
//! The shell is composed, not inherited: a minigame calls `shell.frame(...)`
//! first in its `update` (so the exit button wins the click before any
//! content hit-test runs) and `shell.render(...)` last in its `render` (so
//! the button and overlays stay on top).

use glam::Vec2;

use crate::api::game::GameContext;
use crate::core::progress::source;
use crate::render::color::Color;
use crate::render::surface::Surface;
use crate::util::geom::RectArea;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MinigamePhase {
    /// Timed splash with the how-to-play text; dismissed by timeout or input.
    Instructions,
    /// Accepting input, mutating local entities, may award points.
    Playing,
    /// Round finished. Accepts exactly restart or exit.
    Ended { won: bool },
}

/// What the shell observed this frame. The owning scene reacts to
/// `Restarted` by rebuilding its local state from its initial-state factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellSignal {
    None,
    /// A fresh round entered `Playing` (first frame of play).
    RoundStarted,
    /// The countdown expired; the scene should finalize its scoring.
    TimeUp,
    /// The player asked for another round from the `Ended` overlay.
    Restarted,
    /// The exit button was clicked; a scene switch is already requested.
    Exited,
}

#[derive(Debug, Clone)]
pub struct ShellConfig {
    pub title: &'static str,
    /// Empty string skips the Instructions phase entirely.
    pub instructions: &'static str,
    /// Auto-dismiss delay for the Instructions phase.
    pub instructions_secs: f32,
    /// Round countdown in seconds; 0 means untimed.
    pub round_secs: f32,
    /// Scene to switch to when the exit button is clicked.
    pub exit_scene: &'static str,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            title: "",
            instructions: "",
            instructions_secs: 3.0,
            round_secs: 0.0,
            exit_scene: "worldMap",
        }
    }
}

pub struct MinigameShell {
    config: ShellConfig,
    pub phase: MinigamePhase,
    pub time_left: f32,
    pub round_score: i64,
    instructions_left: f32,
    started: bool,
    exit_button: RectArea,
    restart_button: RectArea,
    view: Vec2,
}

impl MinigameShell {
    pub fn new(config: ShellConfig, view_w: f32, view_h: f32) -> Self {
        let exit_button = RectArea::new(view_w - 150.0, 20.0, 130.0, 44.0);
        let restart_button =
            RectArea::new(view_w / 2.0 - 110.0, view_h / 2.0 + 40.0, 220.0, 50.0);
        let mut shell = Self {
            config,
            phase: MinigamePhase::Playing,
            time_left: 0.0,
            round_score: 0,
            instructions_left: 0.0,
            started: false,
            exit_button,
            restart_button,
            view: Vec2::new(view_w, view_h),
        };
        shell.begin_round();
        shell
    }

    /// Reset to the start of a round. Used by `enter()` and by restart, so
    /// the two paths are indistinguishable by construction.
    pub fn begin_round(&mut self) {
        self.phase = if self.config.instructions.is_empty() {
            MinigamePhase::Playing
        } else {
            MinigamePhase::Instructions
        };
        self.instructions_left = self.config.instructions_secs;
        self.time_left = self.config.round_secs;
        self.round_score = 0;
        self.started = false;
    }

    /// Run the shared per-frame protocol. Call before any minigame logic.
    pub fn frame(&mut self, ctx: &mut GameContext, dt: f32) -> ShellSignal {
        // Exit button has click priority over all content, in every phase.
        if let Some(p) = ctx.input.click_pos() {
            if self.exit_button.contains(p) {
                ctx.input.consume_click();
                ctx.request_scene(self.config.exit_scene);
                return ShellSignal::Exited;
            }
        }

        match self.phase {
            MinigamePhase::Instructions => {
                self.instructions_left -= dt;
                let dismissed = self.instructions_left <= 0.0
                    || ctx.input.consume_click().is_some()
                    || ctx.input.key_just_pressed("enter")
                    || ctx.input.key_just_pressed(" ");
                if dismissed {
                    self.phase = MinigamePhase::Playing;
                }
                ShellSignal::None
            }
            MinigamePhase::Playing => {
                if !self.started {
                    self.started = true;
                    ctx.add_points(0, source::MINIGAME);
                    return ShellSignal::RoundStarted;
                }
                if self.config.round_secs > 0.0 {
                    self.time_left -= dt;
                    if self.time_left <= 0.0 {
                        self.time_left = 0.0;
                        self.phase = MinigamePhase::Ended { won: false };
                        return ShellSignal::TimeUp;
                    }
                }
                ShellSignal::None
            }
            MinigamePhase::Ended { .. } => {
                let clicked_restart = match ctx.input.click_pos() {
                    Some(p) if self.restart_button.contains(p) => {
                        ctx.input.consume_click();
                        true
                    }
                    _ => false,
                };
                if clicked_restart || ctx.input.key_just_pressed("r") {
                    self.begin_round();
                    return ShellSignal::Restarted;
                }
                ShellSignal::None
            }
        }
    }

    /// Finish the round from minigame logic (goal reached, collision, board
    /// full). Idempotence of scoring is guarded by this state change.
    pub fn end_round(&mut self, won: bool) {
        self.phase = MinigamePhase::Ended { won };
    }

    /// Track the round score shown in the HUD and end overlay.
    pub fn add_round_score(&mut self, points: i64) {
        self.round_score += points;
    }

    pub fn is_playing(&self) -> bool {
        self.phase == MinigamePhase::Playing
    }

    pub fn timed(&self) -> bool {
        self.config.round_secs > 0.0
    }

    /// Draw the HUD, the exit button and any phase overlay. Call after all
    /// minigame drawing so the affordances stay on top.
    pub fn render(&self, ctx: &GameContext, surface: &mut Surface) {
        // HUD line.
        surface.text(
            self.config.title,
            Vec2::new(20.0, 36.0),
            26.0,
            Color::WHITE,
        );
        surface.text(
            format!("Score: {}", ctx.progress().score()),
            Vec2::new(20.0, 66.0),
            20.0,
            Color::CROISSANT,
        );
        if self.timed() {
            surface.text(
                format!("Time: {:.0}", self.time_left.ceil()),
                Vec2::new(200.0, 66.0),
                20.0,
                Color::WHITE,
            );
        }

        // Exit button.
        surface.fill_rect(self.exit_button.pos, self.exit_button.size, Color::RED);
        surface.text_centered(
            "Exit",
            self.exit_button.center() + Vec2::new(0.0, 7.0),
            22.0,
            Color::WHITE,
        );

        match self.phase {
            MinigamePhase::Instructions => {
                surface.fill_rect(Vec2::ZERO, self.view, Color::BLACK.with_alpha(0.6));
                surface.text_centered(
                    self.config.title,
                    Vec2::new(self.view.x / 2.0, self.view.y / 2.0 - 60.0),
                    36.0,
                    Color::CROISSANT,
                );
                surface.text_centered(
                    self.config.instructions,
                    Vec2::new(self.view.x / 2.0, self.view.y / 2.0),
                    22.0,
                    Color::WHITE,
                );
            }
            MinigamePhase::Ended { won } => {
                surface.fill_rect(Vec2::ZERO, self.view, Color::BLACK.with_alpha(0.6));
                let headline = if won { "You win!" } else { "Round over" };
                surface.text_centered(
                    headline,
                    Vec2::new(self.view.x / 2.0, self.view.y / 2.0 - 40.0),
                    36.0,
                    Color::CROISSANT,
                );
                surface.text_centered(
                    format!("Round score: {}", self.round_score),
                    Vec2::new(self.view.x / 2.0, self.view.y / 2.0 + 4.0),
                    22.0,
                    Color::WHITE,
                );
                surface.fill_rect(
                    self.restart_button.pos,
                    self.restart_button.size,
                    Color::GREEN,
                );
                surface.text_centered(
                    "Play again (R)",
                    self.restart_button.center() + Vec2::new(0.0, 7.0),
                    22.0,
                    Color::WHITE,
                );
            }
            MinigamePhase::Playing => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::game::GameConfig;
    use crate::input::queue::InputEvent;

    const W: f32 = 1200.0;
    const H: f32 = 800.0;

    fn ctx() -> GameContext {
        GameContext::new(&GameConfig::default(), 7)
    }

    fn shell(round_secs: f32, instructions: &'static str) -> MinigameShell {
        MinigameShell::new(
            ShellConfig {
                title: "Test",
                instructions,
                instructions_secs: 2.0,
                round_secs,
                exit_scene: "worldMap",
            },
            W,
            H,
        )
    }

    #[test]
    fn exit_click_consumes_and_requests_world_map() {
        let mut shell = shell(0.0, "");
        let mut ctx = ctx();
        // Click inside the exit button, which also overlaps imaginary content.
        ctx.input.apply(InputEvent::PointerDown {
            x: W - 100.0,
            y: 40.0,
        });
        assert_eq!(shell.frame(&mut ctx, 0.016), ShellSignal::Exited);
        // Consumed: a content hit-test after the shell sees nothing.
        assert_eq!(ctx.input.click_pos(), None);
        assert_eq!(ctx.take_scene_request().as_deref(), Some("worldMap"));
    }

    #[test]
    fn instructions_auto_dismiss_then_round_starts_once() {
        let mut shell = shell(0.0, "Collect things");
        let mut ctx = ctx();
        assert_eq!(shell.phase, MinigamePhase::Instructions);
        assert_eq!(shell.frame(&mut ctx, 1.0), ShellSignal::None);
        // Timer expires → Playing; next frame reports the round start.
        assert_eq!(shell.frame(&mut ctx, 1.5), ShellSignal::None);
        assert_eq!(shell.frame(&mut ctx, 0.016), ShellSignal::RoundStarted);
        assert_eq!(ctx.progress().achievements().minigames_played, 1);
        // Only one play counted per round.
        shell.frame(&mut ctx, 0.016);
        assert_eq!(ctx.progress().achievements().minigames_played, 1);
    }

    #[test]
    fn countdown_expiry_ends_the_round() {
        let mut shell = shell(1.0, "");
        let mut ctx = ctx();
        assert_eq!(shell.frame(&mut ctx, 0.0), ShellSignal::RoundStarted);
        assert_eq!(shell.frame(&mut ctx, 0.5), ShellSignal::None);
        assert_eq!(shell.frame(&mut ctx, 0.6), ShellSignal::TimeUp);
        assert_eq!(shell.phase, MinigamePhase::Ended { won: false });
        assert!(!shell.is_playing());
    }

    #[test]
    fn restart_resets_round_state() {
        let mut shell = shell(30.0, "");
        let mut ctx = ctx();
        shell.frame(&mut ctx, 0.0);
        shell.add_round_score(55);
        shell.frame(&mut ctx, 10.0);
        shell.end_round(true);

        ctx.input.apply(InputEvent::KeyDown { key: "r".into() });
        assert_eq!(shell.frame(&mut ctx, 0.016), ShellSignal::Restarted);
        assert!(shell.is_playing());
        assert_eq!(shell.round_score, 0);
        assert_eq!(shell.time_left, 30.0);
        // The fresh round counts as another play.
        ctx.input.end_frame();
        assert_eq!(shell.frame(&mut ctx, 0.016), ShellSignal::RoundStarted);
        assert_eq!(ctx.progress().achievements().minigames_played, 2);
    }

    #[test]
    fn ended_ignores_everything_but_restart_and_exit() {
        let mut shell = shell(0.0, "");
        let mut ctx = ctx();
        shell.frame(&mut ctx, 0.0);
        shell.end_round(false);
        // A click on game content (not restart, not exit) does nothing.
        ctx.input.apply(InputEvent::PointerDown { x: 30.0, y: 300.0 });
        assert_eq!(shell.frame(&mut ctx, 0.016), ShellSignal::None);
        assert!(!shell.is_playing());
        // Exit still works from the end overlay.
        ctx.input.end_frame();
        ctx.input.apply(InputEvent::PointerDown {
            x: W - 100.0,
            y: 40.0,
        });
        assert_eq!(shell.frame(&mut ctx, 0.016), ShellSignal::Exited);
    }
}
