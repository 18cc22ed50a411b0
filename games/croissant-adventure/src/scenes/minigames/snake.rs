use croissant_engine::{
    Color, GameContext, MinigameShell, Rng, Scene, ShellConfig, ShellSignal, SoundEvent, Surface,
};
use glam::Vec2;

use crate::game::{WORLD_H, WORLD_W};

const COLS: i32 = 28;
const ROWS: i32 = 18;
const CELL: f32 = 36.0;
const GRID_X: f32 = (WORLD_W - COLS as f32 * CELL) / 2.0;
const GRID_Y: f32 = 110.0;
const STEP_SECS: f32 = 0.14;
const POINTS_PER_FOOD: i64 = 5;

#[derive(Debug, PartialEq, Eq)]
enum StepOutcome {
    Moved,
    Ate,
    Died,
}

struct SnakeState {
    /// Head first.
    body: Vec<(i32, i32)>,
    dir: (i32, i32),
    /// Direction applied at the next step, so two quick turns in one step
    /// can't fold the snake onto itself.
    pending_dir: (i32, i32),
    food: (i32, i32),
    step_timer: f32,
    eaten: u32,
}

impl SnakeState {
    fn new(rng: &mut Rng) -> Self {
        let body = vec![(COLS / 2, ROWS / 2)];
        let food = Self::spawn_food(rng, &body);
        Self {
            body,
            dir: (1, 0),
            pending_dir: (1, 0),
            food,
            step_timer: STEP_SECS,
            eaten: 0,
        }
    }

    fn spawn_food(rng: &mut Rng, body: &[(i32, i32)]) -> (i32, i32) {
        loop {
            let spot = (rng.next_int(COLS as u32) as i32, rng.next_int(ROWS as u32) as i32);
            if !body.contains(&spot) {
                return spot;
            }
        }
    }

    fn turn(&mut self, dir: (i32, i32)) {
        // No 180° reversal once the snake has a tail.
        if self.body.len() > 1 && (dir.0 == -self.dir.0 && dir.1 == -self.dir.1) {
            return;
        }
        self.pending_dir = dir;
    }

    fn step(&mut self, rng: &mut Rng) -> StepOutcome {
        self.dir = self.pending_dir;
        let head = self.body[0];
        let next = (head.0 + self.dir.0, head.1 + self.dir.1);

        if next.0 < 0 || next.0 >= COLS || next.1 < 0 || next.1 >= ROWS {
            return StepOutcome::Died;
        }
        // Tail cell is vacated this step unless we grow.
        let growing = next == self.food;
        let blocking = if growing {
            &self.body[..]
        } else {
            &self.body[..self.body.len() - 1]
        };
        if blocking.contains(&next) {
            return StepOutcome::Died;
        }

        self.body.insert(0, next);
        if growing {
            self.eaten += 1;
            self.food = Self::spawn_food(rng, &self.body);
            StepOutcome::Ate
        } else {
            self.body.pop();
            StepOutcome::Moved
        }
    }
}

/// Classic snake on a fixed grid. The round score is tallied once, at the
/// moment the snake dies.
pub struct SnakeScene {
    shell: MinigameShell,
    state: SnakeState,
    rng: Rng,
}

impl SnakeScene {
    pub fn new() -> Self {
        let mut rng = Rng::new(1);
        let state = SnakeState::new(&mut rng);
        Self {
            shell: MinigameShell::new(
                ShellConfig {
                    title: "Snake",
                    instructions: "Arrow keys to steer. Eat the berries, avoid the walls!",
                    ..ShellConfig::default()
                },
                WORLD_W,
                WORLD_H,
            ),
            state,
            rng,
        }
    }

    fn reset(&mut self) {
        self.state = SnakeState::new(&mut self.rng);
    }

    fn cell_origin(cell: (i32, i32)) -> Vec2 {
        Vec2::new(
            GRID_X + cell.0 as f32 * CELL,
            GRID_Y + cell.1 as f32 * CELL,
        )
    }
}

impl Scene for SnakeScene {
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

        if ctx.input.key_just_pressed("arrowleft") || ctx.input.key_just_pressed("a") {
            self.state.turn((-1, 0));
        }
        if ctx.input.key_just_pressed("arrowright") || ctx.input.key_just_pressed("d") {
            self.state.turn((1, 0));
        }
        if ctx.input.key_just_pressed("arrowup") || ctx.input.key_just_pressed("w") {
            self.state.turn((0, -1));
        }
        if ctx.input.key_just_pressed("arrowdown") || ctx.input.key_just_pressed("s") {
            self.state.turn((0, 1));
        }

        self.state.step_timer -= dt;
        while self.state.step_timer <= 0.0 && self.shell.is_playing() {
            self.state.step_timer += STEP_SECS;
            match self.state.step(&mut self.rng) {
                StepOutcome::Ate => {
                    self.shell.add_round_score(POINTS_PER_FOOD);
                    ctx.emit_sound(SoundEvent(1));
                }
                StepOutcome::Died => {
                    ctx.add_points(self.state.eaten as i64 * POINTS_PER_FOOD, "snake");
                    self.shell.end_round(false);
                }
                StepOutcome::Moved => {}
            }
        }
    }

    fn render(&self, ctx: &GameContext, surface: &mut Surface) {
        surface.fill_rect(
            Vec2::new(GRID_X, GRID_Y),
            Vec2::new(COLS as f32 * CELL, ROWS as f32 * CELL),
            Color::rgb(0.12, 0.2, 0.14),
        );
        surface.fill_rect(
            Self::cell_origin(self.state.food) + Vec2::splat(4.0),
            Vec2::splat(CELL - 8.0),
            Color::RED,
        );
        for (i, cell) in self.state.body.iter().enumerate() {
            let color = if i == 0 {
                Color::YELLOW
            } else {
                Color::GREEN
            };
            surface.fill_rect(
                Self::cell_origin(*cell) + Vec2::splat(2.0),
                Vec2::splat(CELL - 4.0),
                color,
            );
        }
        self.shell.render(ctx, surface);
    }
}
