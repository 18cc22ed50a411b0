use croissant_engine::{
    source, Color, GameContext, MinigameShell, Scene, ShellConfig, ShellSignal, SoundEvent,
    Surface,
};
use glam::Vec2;

use crate::game::{WORLD_H, WORLD_W};

const PLAYER_Y: f32 = WORLD_H - 70.0;
const PLAYER_W: f32 = 60.0;
const PLAYER_H: f32 = 24.0;
const PLAYER_SPEED: f32 = 420.0;
const BULLET_SPEED: f32 = 560.0;
const SHOT_COOLDOWN: f32 = 0.35;
const ENEMY_COLS: usize = 8;
const ENEMY_ROWS: usize = 3;
const ENEMY_SIZE: f32 = 40.0;
const DESCEND_STEP: f32 = 26.0;
/// Enemies reaching this line end the round.
const LOSE_Y: f32 = PLAYER_Y - 60.0;
const POINTS_PER_HIT: i64 = 10;

struct ShooterState {
    player_x: f32,
    bullets: Vec<Vec2>,
    enemies: Vec<Vec2>,
    enemy_dir: f32,
    enemy_speed: f32,
    wave: u32,
    score: i64,
    cooldown: f32,
}

impl ShooterState {
    fn new() -> Self {
        let mut state = Self {
            player_x: WORLD_W / 2.0,
            bullets: Vec::new(),
            enemies: Vec::new(),
            enemy_dir: 1.0,
            enemy_speed: 60.0,
            wave: 1,
            score: 0,
            cooldown: 0.0,
        };
        state.spawn_wave();
        state
    }

    fn spawn_wave(&mut self) {
        self.enemies.clear();
        for row in 0..ENEMY_ROWS {
            for col in 0..ENEMY_COLS {
                self.enemies.push(Vec2::new(
                    180.0 + col as f32 * 90.0,
                    130.0 + row as f32 * 70.0,
                ));
            }
        }
    }

    /// Advance bullets and enemies by `dt`. Returns true when an enemy has
    /// crossed the lose line.
    fn advance(&mut self, dt: f32) -> bool {
        for bullet in &mut self.bullets {
            bullet.y -= BULLET_SPEED * dt;
        }
        self.bullets.retain(|b| b.y > -10.0);

        let dx = self.enemy_dir * self.enemy_speed * dt;
        for enemy in &mut self.enemies {
            enemy.x += dx;
        }
        let hit_edge = self
            .enemies
            .iter()
            .any(|e| e.x < 80.0 || e.x > WORLD_W - 80.0);
        if hit_edge {
            self.enemy_dir = -self.enemy_dir;
            for enemy in &mut self.enemies {
                enemy.y += DESCEND_STEP;
            }
        }

        // Bullet/enemy hits.
        let mut hits = 0;
        self.bullets.retain(|b| {
            if let Some(i) = self
                .enemies
                .iter()
                .position(|e| (e.x - b.x).abs() < ENEMY_SIZE / 2.0 && (e.y - b.y).abs() < ENEMY_SIZE / 2.0)
            {
                self.enemies.swap_remove(i);
                hits += 1;
                false
            } else {
                true
            }
        });
        self.score += hits as i64 * POINTS_PER_HIT;

        if self.enemies.is_empty() {
            self.wave += 1;
            self.enemy_speed += 30.0;
            self.spawn_wave();
        }

        self.enemies.iter().any(|e| e.y > LOSE_Y)
    }
}

/// Wave shooter. The round total is reported once at game over through the
/// `shooter` source, which tracks the monotonic high score.
pub struct ShooterScene {
    shell: MinigameShell,
    state: ShooterState,
}

impl ShooterScene {
    pub fn new() -> Self {
        Self {
            shell: MinigameShell::new(
                ShellConfig {
                    title: "Shooter",
                    instructions: "Arrows to move, Space to shoot. Stop the invasion!",
                    ..ShellConfig::default()
                },
                WORLD_W,
                WORLD_H,
            ),
            state: ShooterState::new(),
        }
    }

    fn reset(&mut self) {
        self.state = ShooterState::new();
    }
}

impl Scene for ShooterScene {
    fn enter(&mut self, _ctx: &mut GameContext) {
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

        if ctx.is_key_pressed("arrowleft") || ctx.is_key_pressed("a") {
            self.state.player_x -= PLAYER_SPEED * dt;
        }
        if ctx.is_key_pressed("arrowright") || ctx.is_key_pressed("d") {
            self.state.player_x += PLAYER_SPEED * dt;
        }
        self.state.player_x = self
            .state
            .player_x
            .clamp(PLAYER_W / 2.0, WORLD_W - PLAYER_W / 2.0);

        self.state.cooldown -= dt;
        if ctx.is_key_pressed(" ") && self.state.cooldown <= 0.0 {
            self.state.cooldown = SHOT_COOLDOWN;
            self.state
                .bullets
                .push(Vec2::new(self.state.player_x, PLAYER_Y - PLAYER_H));
            ctx.emit_sound(SoundEvent(3));
        }

        let prev_score = self.state.score;
        let lost = self.state.advance(dt);
        let gained = self.state.score - prev_score;
        if gained > 0 {
            self.shell.add_round_score(gained);
        }

        if lost {
            ctx.add_points(self.state.score, source::SHOOTER);
            self.shell.end_round(false);
        }
    }

    fn render(&self, ctx: &GameContext, surface: &mut Surface) {
        surface.fill_rect(
            Vec2::ZERO,
            Vec2::new(WORLD_W, WORLD_H),
            Color::rgb(0.06, 0.06, 0.14),
        );
        surface.fill_rect(
            Vec2::new(self.state.player_x - PLAYER_W / 2.0, PLAYER_Y),
            Vec2::new(PLAYER_W, PLAYER_H),
            Color::GREEN,
        );
        for bullet in &self.state.bullets {
            surface.fill_rect(
                *bullet - Vec2::new(2.0, 8.0),
                Vec2::new(4.0, 16.0),
                Color::YELLOW,
            );
        }
        for enemy in &self.state.enemies {
            surface.fill_rect(
                *enemy - Vec2::splat(ENEMY_SIZE / 2.0),
                Vec2::splat(ENEMY_SIZE),
                Color::PURPLE,
            );
        }
        surface.text(
            format!("Wave: {}", self.state.wave),
            Vec2::new(200.0, 36.0),
            20.0,
            Color::WHITE,
        );
        self.shell.render(ctx, surface);
    }
}
