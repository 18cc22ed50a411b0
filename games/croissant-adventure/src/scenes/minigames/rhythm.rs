use croissant_engine::{
    Color, GameContext, MinigameShell, Rng, Scene, ShellConfig, ShellSignal, SoundEvent, Surface,
};
use glam::Vec2;

use crate::game::{WORLD_H, WORLD_W};

const LANES: usize = 4;
const LANE_KEYS: [&str; 4] = ["d", "f", "j", "k"];
const LANE_W: f32 = 90.0;
const LANES_X: f32 = (WORLD_W - LANES as f32 * LANE_W) / 2.0;
const HIT_Y: f32 = WORLD_H - 140.0;
/// Vertical distance within which a press still counts.
const HIT_WINDOW: f32 = 45.0;
const NOTE_SPEED: f32 = 420.0;
const ROUND_SECS: f32 = 30.0;

struct Note {
    lane: usize,
    y: f32,
}

struct RhythmState {
    notes: Vec<Note>,
    spawn_timer: f32,
    hits: u32,
    misses: u32,
    combo: u32,
    score: i64,
}

impl RhythmState {
    fn new() -> Self {
        Self {
            notes: Vec::new(),
            spawn_timer: 1.0,
            hits: 0,
            misses: 0,
            combo: 0,
            score: 0,
        }
    }

    fn spawn(&mut self, rng: &mut Rng) {
        self.notes.push(Note {
            lane: rng.next_int(LANES as u32) as usize,
            y: -20.0,
        });
        self.spawn_timer = rng.next_range(0.35, 0.8);
    }

    /// Scroll notes down; notes that fall past the hit window are misses.
    fn advance(&mut self, dt: f32) {
        for note in &mut self.notes {
            note.y += NOTE_SPEED * dt;
        }
        let before = self.notes.len();
        self.notes.retain(|n| n.y <= HIT_Y + HIT_WINDOW);
        let dropped = before - self.notes.len();
        if dropped > 0 {
            self.misses += dropped as u32;
            self.combo = 0;
        }
    }

    /// A lane key was pressed: hit the nearest note in the window, or break
    /// the combo on a stray press.
    fn try_hit(&mut self, lane: usize) -> bool {
        let candidate = self
            .notes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.lane == lane && (n.y - HIT_Y).abs() <= HIT_WINDOW)
            .min_by(|(_, a), (_, b)| {
                (a.y - HIT_Y)
                    .abs()
                    .partial_cmp(&(b.y - HIT_Y).abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|(i, _)| i);
        match candidate {
            Some(i) => {
                self.notes.swap_remove(i);
                self.hits += 1;
                self.combo += 1;
                self.score += 10 + self.combo as i64;
                true
            }
            None => {
                self.misses += 1;
                self.combo = 0;
                false
            }
        }
    }
}

/// Four-lane note catcher. The run's score is reported once when the clock
/// runs out.
pub struct RhythmScene {
    shell: MinigameShell,
    state: RhythmState,
    rng: Rng,
}

impl RhythmScene {
    pub fn new() -> Self {
        Self {
            shell: MinigameShell::new(
                ShellConfig {
                    title: "Rhythm",
                    instructions: "Press D, F, J, K as the notes reach the line!",
                    round_secs: ROUND_SECS,
                    ..ShellConfig::default()
                },
                WORLD_W,
                WORLD_H,
            ),
            state: RhythmState::new(),
            rng: Rng::new(1),
        }
    }

    fn reset(&mut self) {
        self.state = RhythmState::new();
    }
}

impl Scene for RhythmScene {
    fn enter(&mut self, ctx: &mut GameContext) {
        self.rng = Rng::new(ctx.next_seed());
        self.reset();
        self.shell.begin_round();
    }

    fn exit(&mut self, _ctx: &mut GameContext) {}

    fn update(&mut self, ctx: &mut GameContext, dt: f32) {
        match self.shell.frame(ctx, dt) {
            ShellSignal::Restarted => self.reset(),
            ShellSignal::TimeUp => {
                ctx.add_points(self.state.score, "rhythm");
            }
            _ => {}
        }
        if !self.shell.is_playing() {
            return;
        }

        self.state.spawn_timer -= dt;
        if self.state.spawn_timer <= 0.0 {
            self.state.spawn(&mut self.rng);
        }
        self.state.advance(dt);

        for (lane, key) in LANE_KEYS.iter().enumerate() {
            if ctx.input.key_just_pressed(key) {
                if self.state.try_hit(lane) {
                    ctx.emit_sound(SoundEvent(5));
                }
            }
        }
        self.shell.round_score = self.state.score;
    }

    fn render(&self, ctx: &GameContext, surface: &mut Surface) {
        surface.fill_rect(
            Vec2::ZERO,
            Vec2::new(WORLD_W, WORLD_H),
            Color::rgb(0.1, 0.08, 0.18),
        );
        for lane in 0..LANES {
            let x = LANES_X + lane as f32 * LANE_W;
            surface.stroke_rect(
                Vec2::new(x, 0.0),
                Vec2::new(LANE_W, WORLD_H),
                Color::DARK_GRAY,
            );
            surface.text_centered(
                LANE_KEYS[lane].to_uppercase(),
                Vec2::new(x + LANE_W / 2.0, WORLD_H - 60.0),
                26.0,
                Color::GRAY,
            );
        }
        surface.line(
            Vec2::new(LANES_X, HIT_Y),
            Vec2::new(LANES_X + LANES as f32 * LANE_W, HIT_Y),
            4.0,
            Color::WHITE,
        );
        for note in &self.state.notes {
            let x = LANES_X + note.lane as f32 * LANE_W + LANE_W / 2.0;
            surface.fill_circle(Vec2::new(x, note.y), 22.0, Color::CROISSANT);
        }
        surface.text(
            format!("Combo: {}", self.state.combo),
            Vec2::new(200.0, 36.0),
            20.0,
            Color::YELLOW,
        );
        self.shell.render(ctx, surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use croissant_engine::GameConfig;

    #[test]
    fn fresh_state_is_empty() {
        let state = RhythmState::new();
        assert!(state.notes.is_empty());
        assert_eq!(state.score, 0);
        assert_eq!(state.combo, 0);
    }

    #[test]
    fn hit_in_window_scores_and_builds_combo() {
        let mut state = RhythmState::new();
        state.notes.push(Note {
            lane: 2,
            y: HIT_Y - 10.0,
        });
        assert!(state.try_hit(2));
        assert_eq!(state.hits, 1);
        assert_eq!(state.combo, 1);
        assert_eq!(state.score, 11);
        assert!(state.notes.is_empty());
    }

    #[test]
    fn press_outside_window_breaks_combo() {
        let mut state = RhythmState::new();
        state.combo = 4;
        state.notes.push(Note {
            lane: 1,
            y: HIT_Y - 200.0,
        });
        assert!(!state.try_hit(1));
        assert_eq!(state.combo, 0);
        assert_eq!(state.misses, 1);
        assert_eq!(state.notes.len(), 1);
    }

    #[test]
    fn notes_past_the_line_are_missed() {
        let mut state = RhythmState::new();
        state.combo = 3;
        state.notes.push(Note {
            lane: 0,
            y: HIT_Y + HIT_WINDOW - 1.0,
        });
        state.advance(0.5);
        assert!(state.notes.is_empty());
        assert_eq!(state.misses, 1);
        assert_eq!(state.combo, 0);
    }

    #[test]
    fn time_up_reports_the_run_score_once() {
        let mut scene = RhythmScene::new();
        let mut ctx = GameContext::new(&GameConfig::default(), 53);
        scene.enter(&mut ctx);
        // Dismiss instructions, start round.
        scene.update(&mut ctx, 10.0);
        scene.update(&mut ctx, 0.0);
        assert!(scene.shell.is_playing());

        scene.state.score = 77;
        scene.update(&mut ctx, ROUND_SECS + 1.0);
        assert!(!scene.shell.is_playing());
        assert_eq!(ctx.progress().score(), 77);
        scene.update(&mut ctx, 1.0);
        assert_eq!(ctx.progress().score(), 77);
    }

    #[test]
    fn reenter_resets_the_run() {
        let mut scene = RhythmScene::new();
        let mut ctx = GameContext::new(&GameConfig::default(), 53);
        scene.enter(&mut ctx);
        scene.state.score = 50;
        scene.state.notes.push(Note { lane: 0, y: 100.0 });
        scene.exit(&mut ctx);
        scene.enter(&mut ctx);
        assert_eq!(scene.state.score, 0);
        assert!(scene.state.notes.is_empty());
        assert_eq!(scene.shell.time_left, ROUND_SECS);
    }
}
