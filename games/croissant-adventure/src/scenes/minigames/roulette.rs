use croissant_engine::{
    Color, GameContext, MinigameShell, RectArea, Rng, Scene, ShellConfig, ShellSignal, SoundEvent,
    Surface,
};
use glam::Vec2;

use crate::game::{WORLD_H, WORLD_W};

const POCKETS: u32 = 37;
const ROUND_SECS: f32 = 45.0;
const BET_COST: i64 = 10;
const COLOR_PAYOUT: i64 = 20;
const GREEN_PAYOUT: i64 = 360;
const WHEEL_CENTER: Vec2 = Vec2::new(WORLD_W / 2.0, 380.0);
const WHEEL_RADIUS: f32 = 200.0;
/// Spin drag in rad/s².
const DECEL: f32 = 2.5;
const STOP_VEL: f32 = 0.15;

const BET_RED: RectArea = RectArea::new(260.0, 650.0, 160.0, 60.0);
const BET_BLACK: RectArea = RectArea::new(450.0, 650.0, 160.0, 60.0);
const BET_GREEN: RectArea = RectArea::new(640.0, 650.0, 160.0, 60.0);
const SPIN_BUTTON: RectArea = RectArea::new(850.0, 650.0, 160.0, 60.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BetChoice {
    Red,
    Black,
    Green,
}

/// Simplified wheel: pocket 0 is green, odd pockets red, even pockets black.
fn pocket_color(pocket: u32) -> BetChoice {
    if pocket == 0 {
        BetChoice::Green
    } else if pocket % 2 == 1 {
        BetChoice::Red
    } else {
        BetChoice::Black
    }
}

fn payout(bet: BetChoice, pocket: u32) -> i64 {
    if pocket_color(pocket) != bet {
        0
    } else if bet == BetChoice::Green {
        GREEN_PAYOUT
    } else {
        COLOR_PAYOUT
    }
}

struct RouletteState {
    angle: f32,
    vel: f32,
    spinning: bool,
    bet: Option<BetChoice>,
    last_result: Option<u32>,
}

impl RouletteState {
    fn new() -> Self {
        Self {
            angle: 0.0,
            vel: 0.0,
            spinning: false,
            bet: None,
            last_result: None,
        }
    }

    /// Advance the wheel. Returns the pocket exactly once, when the wheel
    /// comes to rest.
    fn advance(&mut self, dt: f32) -> Option<u32> {
        if !self.spinning {
            return None;
        }
        self.angle = (self.angle + self.vel * dt).rem_euclid(std::f32::consts::TAU);
        self.vel -= DECEL * dt;
        if self.vel <= STOP_VEL {
            self.spinning = false;
            self.vel = 0.0;
            let pocket =
                (self.angle / (std::f32::consts::TAU / POCKETS as f32)) as u32 % POCKETS;
            self.last_result = Some(pocket);
            return Some(pocket);
        }
        None
    }
}

/// Bet on a color, spin the wheel. Each spin costs points up front — the one
/// place the score is allowed to go down.
pub struct RouletteScene {
    shell: MinigameShell,
    state: RouletteState,
    rng: Rng,
}

impl RouletteScene {
    pub fn new() -> Self {
        Self {
            shell: MinigameShell::new(
                ShellConfig {
                    title: "Roulette",
                    instructions: "Pick a color, press Spin. Green pays big!",
                    round_secs: ROUND_SECS,
                    ..ShellConfig::default()
                },
                WORLD_W,
                WORLD_H,
            ),
            state: RouletteState::new(),
            rng: Rng::new(1),
        }
    }

    fn reset(&mut self) {
        self.state = RouletteState::new();
    }

    fn bet_button(p: Vec2) -> Option<BetChoice> {
        if BET_RED.contains(p) {
            Some(BetChoice::Red)
        } else if BET_BLACK.contains(p) {
            Some(BetChoice::Black)
        } else if BET_GREEN.contains(p) {
            Some(BetChoice::Green)
        } else {
            None
        }
    }
}

impl Scene for RouletteScene {
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

        if let Some(p) = ctx.input.click_pos() {
            if let Some(choice) = Self::bet_button(p) {
                ctx.input.consume_click();
                if !self.state.spinning {
                    self.state.bet = Some(choice);
                }
            } else if SPIN_BUTTON.contains(p) {
                ctx.input.consume_click();
                if !self.state.spinning && self.state.bet.is_some() {
                    self.state.spinning = true;
                    self.state.vel = self.rng.next_range(9.0, 14.0);
                    self.state.last_result = None;
                    ctx.add_points(-BET_COST, "roulette");
                    self.shell.add_round_score(-BET_COST);
                }
            }
        }

        if let Some(pocket) = self.state.advance(dt) {
            if let Some(bet) = self.state.bet {
                let won = payout(bet, pocket);
                if won > 0 {
                    ctx.add_points(won, "roulette");
                    self.shell.add_round_score(won);
                    ctx.emit_sound(SoundEvent(6));
                }
            }
        }
    }

    fn render(&self, ctx: &GameContext, surface: &mut Surface) {
        surface.fill_rect(
            Vec2::ZERO,
            Vec2::new(WORLD_W, WORLD_H),
            Color::rgb(0.1, 0.3, 0.16),
        );

        surface.fill_circle(WHEEL_CENTER, WHEEL_RADIUS, Color::DARK_GRAY);
        surface.stroke_circle(WHEEL_CENTER, WHEEL_RADIUS, Color::CROISSANT);
        // Pointer marker at the top of the wheel.
        let marker = WHEEL_CENTER
            + Vec2::new(
                self.state.angle.cos() * WHEEL_RADIUS * 0.8,
                self.state.angle.sin() * WHEEL_RADIUS * 0.8,
            );
        surface.line(WHEEL_CENTER, marker, 5.0, Color::WHITE);

        if let Some(pocket) = self.state.last_result {
            let color = match pocket_color(pocket) {
                BetChoice::Red => Color::RED,
                BetChoice::Black => Color::BLACK,
                BetChoice::Green => Color::GREEN,
            };
            surface.fill_circle(WHEEL_CENTER, 48.0, color);
            surface.text_centered(
                format!("{}", pocket),
                WHEEL_CENTER + Vec2::new(0.0, 12.0),
                34.0,
                Color::WHITE,
            );
        }

        for (rect, label, color) in [
            (BET_RED, "Red", Color::RED),
            (BET_BLACK, "Black", Color::BLACK),
            (BET_GREEN, "Green 0", Color::GREEN),
            (SPIN_BUTTON, "Spin!", Color::ORANGE),
        ] {
            surface.fill_rect(rect.pos, rect.size, color);
            surface.text_centered(
                label,
                rect.center() + Vec2::new(0.0, 8.0),
                22.0,
                Color::WHITE,
            );
        }
        if let Some(bet) = self.state.bet {
            let rect = match bet {
                BetChoice::Red => BET_RED,
                BetChoice::Black => BET_BLACK,
                BetChoice::Green => BET_GREEN,
            };
            surface.stroke_rect(rect.pos - Vec2::splat(4.0), rect.size + Vec2::splat(8.0), Color::YELLOW);
        }
        self.shell.render(ctx, surface);
    }
}
