use croissant_engine::util::geom::circles_overlap;
use croissant_engine::{
    source, Color, GameContext, MinigameShell, Rng, Scene, ShellConfig, ShellSignal, SoundEvent,
    Surface,
};
use glam::Vec2;

use crate::game::{WORLD_H, WORLD_W};

const PLAYER_SPEED: f32 = 380.0;
const PLAYER_RADIUS: f32 = 22.0;
const COIN_RADIUS: f32 = 14.0;
const COIN_COUNT: usize = 6;
const ROUND_SECS: f32 = 30.0;
const POINTS_PER_COIN: i64 = 10;
/// Keep spawns away from the HUD and the edges.
const MARGIN: f32 = 90.0;

struct CoinState {
    player: Vec2,
    coins: Vec<Vec2>,
    collected: u32,
}

impl CoinState {
    fn new(rng: &mut Rng) -> Self {
        let mut state = Self {
            player: Vec2::new(WORLD_W / 2.0, WORLD_H / 2.0),
            coins: Vec::with_capacity(COIN_COUNT),
            collected: 0,
        };
        for _ in 0..COIN_COUNT {
            state.coins.push(random_spot(rng));
        }
        state
    }
}

fn random_spot(rng: &mut Rng) -> Vec2 {
    Vec2::new(
        rng.next_range(MARGIN, WORLD_W - MARGIN),
        rng.next_range(MARGIN, WORLD_H - MARGIN),
    )
}

/// Run around and grab as many coins as you can before the clock runs out.
/// Every pickup reports through the `coin` source, so coins and the
/// coinsCollected achievement move together with the score.
pub struct CoinCollectorScene {
    shell: MinigameShell,
    state: CoinState,
    rng: Rng,
}

impl CoinCollectorScene {
    pub fn new() -> Self {
        let mut rng = Rng::new(1);
        let state = CoinState::new(&mut rng);
        Self {
            shell: MinigameShell::new(
                ShellConfig {
                    title: "Coin Chase",
                    instructions: "Arrow keys to run. Grab coins before time runs out!",
                    round_secs: ROUND_SECS,
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
        self.state = CoinState::new(&mut self.rng);
    }
}

impl Scene for CoinCollectorScene {
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

        let mut dir = Vec2::ZERO;
        if ctx.is_key_pressed("arrowleft") || ctx.is_key_pressed("a") {
            dir.x -= 1.0;
        }
        if ctx.is_key_pressed("arrowright") || ctx.is_key_pressed("d") {
            dir.x += 1.0;
        }
        if ctx.is_key_pressed("arrowup") || ctx.is_key_pressed("w") {
            dir.y -= 1.0;
        }
        if ctx.is_key_pressed("arrowdown") || ctx.is_key_pressed("s") {
            dir.y += 1.0;
        }
        if dir != Vec2::ZERO {
            self.state.player += dir.normalize() * PLAYER_SPEED * dt;
            self.state.player = self.state.player.clamp(
                Vec2::splat(PLAYER_RADIUS),
                Vec2::new(WORLD_W, WORLD_H) - Vec2::splat(PLAYER_RADIUS),
            );
        }

        for i in 0..self.state.coins.len() {
            if circles_overlap(
                self.state.player,
                PLAYER_RADIUS,
                self.state.coins[i],
                COIN_RADIUS,
            ) {
                self.state.coins[i] = random_spot(&mut self.rng);
                self.state.collected += 1;
                self.shell.add_round_score(POINTS_PER_COIN);
                ctx.add_points(POINTS_PER_COIN, source::COIN);
                ctx.emit_sound(SoundEvent(1));
            }
        }
    }

    fn render(&self, ctx: &GameContext, surface: &mut Surface) {
        surface.fill_rect(
            Vec2::ZERO,
            Vec2::new(WORLD_W, WORLD_H),
            Color::rgb(0.3, 0.55, 0.35),
        );
        for coin in &self.state.coins {
            surface.fill_circle(*coin, COIN_RADIUS, Color::YELLOW);
            surface.stroke_circle(*coin, COIN_RADIUS, Color::ORANGE);
        }
        surface.sprite(
            &ctx.assets,
            "croissant",
            self.state.player - Vec2::splat(PLAYER_RADIUS),
            Vec2::splat(PLAYER_RADIUS * 2.0),
        );
        self.shell.render(ctx, surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use croissant_engine::GameConfig;

    fn entered() -> (CoinCollectorScene, GameContext) {
        let mut scene = CoinCollectorScene::new();
        let mut ctx = GameContext::new(&GameConfig::default(), 11);
        scene.enter(&mut ctx);
        // Park every coin far from the player so pickups only happen when a
        // test places one deliberately.
        for coin in &mut scene.state.coins {
            *coin = Vec2::new(50.0, 50.0);
        }
        // Dismiss instructions and start the round.
        scene.update(&mut ctx, 10.0);
        scene.update(&mut ctx, 0.0);
        assert!(scene.shell.is_playing());
        (scene, ctx)
    }

    #[test]
    fn enter_resets_to_initial_shape() {
        let (mut scene, mut ctx) = entered();
        scene.state.collected = 42;
        scene.state.coins.clear();
        scene.exit(&mut ctx);
        scene.enter(&mut ctx);
        assert_eq!(scene.state.collected, 0);
        assert_eq!(scene.state.coins.len(), COIN_COUNT);
        assert_eq!(scene.state.player, Vec2::new(WORLD_W / 2.0, WORLD_H / 2.0));
    }

    #[test]
    fn pickup_awards_coin_points_and_respawns() {
        let (mut scene, mut ctx) = entered();
        let before = ctx.progress().score();
        scene.state.coins[0] = scene.state.player;
        scene.update(&mut ctx, 0.016);
        assert_eq!(ctx.progress().score(), before + POINTS_PER_COIN);
        assert_eq!(ctx.progress().coins(), 1);
        assert_eq!(ctx.progress().achievements().coins_collected, 1);
        assert_eq!(scene.state.collected, 1);
        assert_eq!(scene.state.coins.len(), COIN_COUNT);
    }

    #[test]
    fn no_input_is_accepted_after_time_up() {
        let (mut scene, mut ctx) = entered();
        scene.update(&mut ctx, ROUND_SECS + 1.0);
        assert!(!scene.shell.is_playing());
        let coins_before = ctx.progress().coins();
        scene.state.coins[0] = scene.state.player;
        scene.update(&mut ctx, 0.016);
        assert_eq!(ctx.progress().coins(), coins_before);
    }
}
