use croissant_engine::{
    ActionQueue, Color, GameContext, MinigameShell, Rng, Scene, ShellConfig, ShellSignal,
    SoundEvent, Surface,
};
use glam::Vec2;

use crate::game::{WORLD_H, WORLD_W};

const ROUND_SECS: f32 = 45.0;
/// How long the "!" stays up before the fish escapes.
const BITE_WINDOW_SECS: f32 = 0.9;
const WATER_Y: f32 = 420.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CastPhase {
    /// Rod out of the water.
    Idle,
    /// Line in, waiting for a bite.
    Waiting,
    /// A fish is on — reel now!
    Bite,
}

struct FishingState {
    phase: CastPhase,
    bite_left: f32,
    caught: u32,
    score: i64,
}

impl FishingState {
    fn new() -> Self {
        Self {
            phase: CastPhase::Idle,
            bite_left: 0.0,
            caught: 0,
            score: 0,
        }
    }
}

/// Cast, wait for the tug, reel in time. Catches report as they land, like
/// coin pickups.
pub struct FishingScene {
    shell: MinigameShell,
    state: FishingState,
    rng: Rng,
    bites: ActionQueue<()>,
}

impl FishingScene {
    pub fn new() -> Self {
        Self {
            shell: MinigameShell::new(
                ShellConfig {
                    title: "Fishing Pond",
                    instructions: "Space to cast. When the ! appears, Space again to reel!",
                    round_secs: ROUND_SECS,
                    ..ShellConfig::default()
                },
                WORLD_W,
                WORLD_H,
            ),
            state: FishingState::new(),
            rng: Rng::new(1),
            bites: ActionQueue::new(),
        }
    }

    fn reset(&mut self) {
        self.state = FishingState::new();
        self.bites.clear();
    }
}

impl Scene for FishingScene {
    fn enter(&mut self, ctx: &mut GameContext) {
        self.rng = Rng::new(ctx.next_seed());
        self.reset();
        self.shell.begin_round();
    }

    fn exit(&mut self, _ctx: &mut GameContext) {}

    fn update(&mut self, ctx: &mut GameContext, dt: f32) {
        if self.shell.frame(ctx, dt) == ShellSignal::Restarted {
            self.reset();
        }
        if !self.shell.is_playing() {
            return;
        }

        if !self.bites.tick(dt).is_empty() && self.state.phase == CastPhase::Waiting {
            self.state.phase = CastPhase::Bite;
            self.state.bite_left = BITE_WINDOW_SECS;
            ctx.emit_sound(SoundEvent(7));
        }

        let pressed = ctx.input.key_just_pressed(" ") || ctx.input.consume_click().is_some();
        match self.state.phase {
            CastPhase::Idle => {
                if pressed {
                    self.state.phase = CastPhase::Waiting;
                    self.bites.push(self.rng.next_range(1.0, 4.0), ());
                }
            }
            CastPhase::Waiting => {
                if pressed {
                    // Reeled in too early; the line comes back empty.
                    self.state.phase = CastPhase::Idle;
                    self.bites.clear();
                }
            }
            CastPhase::Bite => {
                if pressed {
                    let value = 10 + self.rng.next_int(3) as i64 * 5;
                    self.state.caught += 1;
                    self.state.score += value;
                    self.shell.add_round_score(value);
                    ctx.add_points(value, "fishing");
                    ctx.emit_sound(SoundEvent(1));
                    self.state.phase = CastPhase::Idle;
                } else {
                    self.state.bite_left -= dt;
                    if self.state.bite_left <= 0.0 {
                        // The fish got away.
                        self.state.phase = CastPhase::Idle;
                    }
                }
            }
        }
    }

    fn render(&self, ctx: &GameContext, surface: &mut Surface) {
        surface.fill_rect(
            Vec2::ZERO,
            Vec2::new(WORLD_W, WATER_Y),
            Color::rgb(0.55, 0.78, 0.9),
        );
        surface.fill_rect(
            Vec2::new(0.0, WATER_Y),
            Vec2::new(WORLD_W, WORLD_H - WATER_Y),
            Color::rgb(0.16, 0.35, 0.6),
        );

        let rod = Vec2::new(WORLD_W / 2.0 - 160.0, WATER_Y - 120.0);
        let bobber = Vec2::new(WORLD_W / 2.0 + 40.0, WATER_Y + 60.0);
        surface.line(rod, bobber, 3.0, Color::WHITE);
        surface.fill_circle(bobber, 10.0, Color::RED);

        match self.state.phase {
            CastPhase::Idle => {
                surface.text_centered(
                    "Space to cast",
                    Vec2::new(WORLD_W / 2.0, WATER_Y - 40.0),
                    24.0,
                    Color::WHITE,
                );
            }
            CastPhase::Waiting => {
                surface.text_centered(
                    "...",
                    bobber - Vec2::new(0.0, 30.0),
                    28.0,
                    Color::WHITE,
                );
            }
            CastPhase::Bite => {
                surface.text_centered(
                    "!",
                    bobber - Vec2::new(0.0, 34.0),
                    44.0,
                    Color::YELLOW,
                );
            }
        }

        surface.text(
            format!("Caught: {}", self.state.caught),
            Vec2::new(200.0, 36.0),
            20.0,
            Color::WHITE,
        );
        self.shell.render(ctx, surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use croissant_engine::{GameConfig, InputEvent};

    fn started() -> (FishingScene, GameContext) {
        let mut scene = FishingScene::new();
        let mut ctx = GameContext::new(&GameConfig::default(), 83);
        scene.enter(&mut ctx);
        ctx.input.apply(InputEvent::KeyDown {
            key: "enter".into(),
        });
        scene.update(&mut ctx, 0.016);
        ctx.input.end_frame();
        scene.update(&mut ctx, 0.016);
        assert!(scene.shell.is_playing());
        (scene, ctx)
    }

    fn press_space(scene: &mut FishingScene, ctx: &mut GameContext, dt: f32) {
        ctx.input.apply(InputEvent::KeyDown { key: " ".into() });
        scene.update(ctx, dt);
        ctx.input.apply(InputEvent::KeyUp { key: " ".into() });
        ctx.input.end_frame();
    }

    #[test]
    fn casting_waits_for_a_bite() {
        let (mut scene, mut ctx) = started();
        press_space(&mut scene, &mut ctx, 0.016);
        assert_eq!(scene.state.phase, CastPhase::Waiting);
        // The bite arrives within the scheduled window.
        scene.update(&mut ctx, 4.1);
        assert_eq!(scene.state.phase, CastPhase::Bite);
    }

    #[test]
    fn reeling_during_the_bite_catches_a_fish() {
        let (mut scene, mut ctx) = started();
        press_space(&mut scene, &mut ctx, 0.016);
        scene.update(&mut ctx, 4.1);
        assert_eq!(scene.state.phase, CastPhase::Bite);
        press_space(&mut scene, &mut ctx, 0.016);
        assert_eq!(scene.state.caught, 1);
        assert!(ctx.progress().score() >= 10);
        assert_eq!(scene.state.phase, CastPhase::Idle);
    }

    #[test]
    fn reeling_too_early_comes_back_empty() {
        let (mut scene, mut ctx) = started();
        press_space(&mut scene, &mut ctx, 0.016);
        assert_eq!(scene.state.phase, CastPhase::Waiting);
        press_space(&mut scene, &mut ctx, 0.016);
        assert_eq!(scene.state.phase, CastPhase::Idle);
        assert_eq!(scene.state.caught, 0);
        // The cancelled bite never fires.
        scene.update(&mut ctx, 10.0);
        assert_eq!(scene.state.phase, CastPhase::Idle);
    }

    #[test]
    fn missing_the_window_loses_the_fish() {
        let (mut scene, mut ctx) = started();
        press_space(&mut scene, &mut ctx, 0.016);
        scene.update(&mut ctx, 4.1);
        assert_eq!(scene.state.phase, CastPhase::Bite);
        scene.update(&mut ctx, BITE_WINDOW_SECS + 0.1);
        assert_eq!(scene.state.phase, CastPhase::Idle);
        assert_eq!(scene.state.caught, 0);
    }

    #[test]
    fn reenter_resets_the_pond() {
        let (mut scene, mut ctx) = started();
        scene.state.caught = 9;
        scene.state.phase = CastPhase::Bite;
        scene.exit(&mut ctx);
        scene.enter(&mut ctx);
        assert_eq!(scene.state.phase, CastPhase::Idle);
        assert_eq!(scene.state.caught, 0);
    }
}
