use croissant_engine::util::geom::circle_rect_overlap;
use croissant_engine::{
    Color, GameContext, MinigameShell, RectArea, Scene, ShellConfig, ShellSignal, SoundEvent,
    Surface,
};
use glam::Vec2;

use crate::game::{WORLD_H, WORLD_W};

const GRAVITY: f32 = 1600.0;
const JUMP_VEL: f32 = -640.0;
const MOVE_SPEED: f32 = 300.0;
const PLAYER_W: f32 = 36.0;
const PLAYER_H: f32 = 48.0;
const STAR_RADIUS: f32 = 12.0;
const STAR_POINTS: i64 = 10;
const GOAL_POINTS: i64 = 50;

const PLATFORMS: [RectArea; 7] = [
    RectArea::new(0.0, 740.0, WORLD_W, 60.0), // ground
    RectArea::new(150.0, 620.0, 200.0, 20.0),
    RectArea::new(430.0, 520.0, 180.0, 20.0),
    RectArea::new(700.0, 430.0, 180.0, 20.0),
    RectArea::new(950.0, 340.0, 160.0, 20.0),
    RectArea::new(640.0, 250.0, 160.0, 20.0),
    RectArea::new(300.0, 180.0, 180.0, 20.0),
];

const GOAL: RectArea = RectArea::new(320.0, 110.0, 60.0, 60.0);

const STAR_SPOTS: [Vec2; 5] = [
    Vec2::new(250.0, 590.0),
    Vec2::new(520.0, 490.0),
    Vec2::new(790.0, 400.0),
    Vec2::new(1030.0, 310.0),
    Vec2::new(720.0, 220.0),
];

struct PlatformState {
    pos: Vec2,
    vel: Vec2,
    on_ground: bool,
    /// Star position and whether it is still collectible.
    stars: Vec<(Vec2, bool)>,
    collected: u32,
}

impl PlatformState {
    fn new() -> Self {
        Self {
            pos: Vec2::new(60.0, 740.0 - PLAYER_H),
            vel: Vec2::ZERO,
            on_ground: true,
            stars: STAR_SPOTS.iter().map(|&p| (p, true)).collect(),
            collected: 0,
        }
    }

    fn player_rect(&self) -> RectArea {
        RectArea::new(self.pos.x, self.pos.y, PLAYER_W, PLAYER_H)
    }

    /// Axis-separated integration against the static platforms.
    fn integrate(&mut self, input_x: f32, dt: f32) {
        self.vel.x = input_x * MOVE_SPEED;
        let old_x = self.pos.x;
        self.pos.x = (self.pos.x + self.vel.x * dt).clamp(0.0, WORLD_W - PLAYER_W);
        if PLATFORMS.iter().any(|p| self.player_rect().intersects(p)) {
            self.pos.x = old_x;
        }

        self.vel.y += GRAVITY * dt;
        self.pos.y += self.vel.y * dt;
        self.on_ground = false;
        for platform in &PLATFORMS {
            if self.player_rect().intersects(platform) {
                if self.vel.y > 0.0 {
                    self.pos.y = platform.pos.y - PLAYER_H;
                    self.on_ground = true;
                } else {
                    self.pos.y = platform.pos.y + platform.size.y;
                }
                self.vel.y = 0.0;
            }
        }
    }

    fn jump(&mut self) -> bool {
        if self.on_ground {
            self.vel.y = JUMP_VEL;
            self.on_ground = false;
            true
        } else {
            false
        }
    }
}

/// Hop up the ledges, grab the stars and reach the flag. Stars report as
/// they are picked up; the flag pays a completion bonus.
pub struct PlatformScene {
    shell: MinigameShell,
    state: PlatformState,
}

impl PlatformScene {
    pub fn new() -> Self {
        Self {
            shell: MinigameShell::new(
                ShellConfig {
                    title: "Platformer",
                    instructions: "Arrows to run, Space to jump. Reach the flag!",
                    ..ShellConfig::default()
                },
                WORLD_W,
                WORLD_H,
            ),
            state: PlatformState::new(),
        }
    }

    fn reset(&mut self) {
        self.state = PlatformState::new();
    }
}

impl Scene for PlatformScene {
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

        let mut input_x = 0.0;
        if ctx.is_key_pressed("arrowleft") || ctx.is_key_pressed("a") {
            input_x -= 1.0;
        }
        if ctx.is_key_pressed("arrowright") || ctx.is_key_pressed("d") {
            input_x += 1.0;
        }
        if ctx.input.key_just_pressed(" ")
            || ctx.input.key_just_pressed("arrowup")
            || ctx.input.key_just_pressed("w")
        {
            if self.state.jump() {
                ctx.emit_sound(SoundEvent(4));
            }
        }

        self.state.integrate(input_x, dt);

        let player = self.state.player_rect();
        for (pos, alive) in &mut self.state.stars {
            if *alive && circle_rect_overlap(*pos, STAR_RADIUS, &player) {
                *alive = false;
                self.state.collected += 1;
                self.shell.add_round_score(STAR_POINTS);
                ctx.add_points(STAR_POINTS, "platform");
                ctx.emit_sound(SoundEvent(1));
            }
        }

        if player.intersects(&GOAL) {
            self.shell.add_round_score(GOAL_POINTS);
            ctx.add_points(GOAL_POINTS, "platform");
            self.shell.end_round(true);
        } else if self.state.pos.y > WORLD_H {
            self.shell.end_round(false);
        }
    }

    fn render(&self, ctx: &GameContext, surface: &mut Surface) {
        surface.fill_rect(
            Vec2::ZERO,
            Vec2::new(WORLD_W, WORLD_H),
            Color::rgb(0.42, 0.65, 0.88),
        );
        for platform in &PLATFORMS {
            surface.fill_rect(platform.pos, platform.size, Color::rgb(0.35, 0.25, 0.18));
        }
        surface.fill_rect(GOAL.pos, GOAL.size, Color::YELLOW);
        surface.text_centered(
            "GOAL",
            GOAL.center() + Vec2::new(0.0, 6.0),
            18.0,
            Color::BLACK,
        );
        for (pos, alive) in &self.state.stars {
            if *alive {
                surface.fill_circle(*pos, STAR_RADIUS, Color::YELLOW);
            }
        }
        surface.sprite(
            &ctx.assets,
            "croissant",
            self.state.pos,
            Vec2::new(PLAYER_W, PLAYER_H),
        );
        self.shell.render(ctx, surface);
    }
}
