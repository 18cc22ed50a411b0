use croissant_engine::{Color, GameContext, RectArea, Scene, Surface};
use glam::Vec2;

use crate::game::{WORLD_H, WORLD_W};
use crate::scenes::names;

const PLAYER_SPEED: f32 = 320.0;
const PLAYER_RADIUS: f32 = 18.0;
const SPAWN: Vec2 = Vec2::new(480.0, 720.0);

struct Portal {
    name: &'static str,
    label: &'static str,
    area: RectArea,
    color: Color,
}

fn build_portals() -> Vec<Portal> {
    const LABELS: [&str; 12] = [
        "Coin Chase",
        "Roulette",
        "Chess",
        "Maze",
        "Shooter",
        "Platformer",
        "Memory",
        "Snake",
        "Sliding Puzzle",
        "Rhythm",
        "Paint Studio",
        "Fishing Pond",
    ];
    const COLORS: [Color; 4] = [Color::ORANGE, Color::PURPLE, Color::BLUE, Color::GREEN];

    names::MINIGAMES
        .into_iter()
        .zip(LABELS)
        .enumerate()
        .map(|(i, (name, label))| {
            let col = i % 4;
            let row = i / 4;
            Portal {
                name,
                label,
                area: RectArea::new(
                    90.0 + col as f32 * 290.0,
                    120.0 + row as f32 * 190.0,
                    200.0,
                    110.0,
                ),
                color: COLORS[col],
            }
        })
        .collect()
}

/// The overworld: walk the croissant between minigame portals and press the
/// interact key (or click a portal) to play.
pub struct WorldMapScene {
    player: Vec2,
    portals: Vec<Portal>,
}

impl WorldMapScene {
    pub fn new() -> Self {
        Self {
            player: SPAWN,
            portals: build_portals(),
        }
    }

    fn standing_on(&self) -> Option<usize> {
        self.portals
            .iter()
            .position(|p| p.area.contains(self.player))
    }
}

impl Scene for WorldMapScene {
    fn enter(&mut self, _ctx: &mut GameContext) {
        self.player = SPAWN;
    }

    fn exit(&mut self, _ctx: &mut GameContext) {}

    fn update(&mut self, ctx: &mut GameContext, dt: f32) {
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
            self.player += dir.normalize() * PLAYER_SPEED * dt;
            self.player = self.player.clamp(
                Vec2::splat(PLAYER_RADIUS),
                Vec2::new(WORLD_W, WORLD_H) - Vec2::splat(PLAYER_RADIUS),
            );
        }

        // Click a portal to jump straight in.
        if let Some(p) = ctx.input.click_pos() {
            if let Some(portal) = self.portals.iter().find(|portal| portal.area.contains(p)) {
                ctx.input.consume_click();
                ctx.request_scene(portal.name);
                return;
            }
        }

        if ctx.input.key_just_pressed("e") || ctx.input.key_just_pressed("enter") {
            if let Some(i) = self.standing_on() {
                ctx.request_scene(self.portals[i].name);
            }
        }
    }

    fn render(&self, ctx: &GameContext, surface: &mut Surface) {
        surface.fill_rect(
            Vec2::ZERO,
            Vec2::new(WORLD_W, WORLD_H),
            Color::rgb(0.45, 0.72, 0.42),
        );

        for portal in &self.portals {
            surface.fill_rect(portal.area.pos, portal.area.size, portal.color);
            surface.stroke_rect(portal.area.pos, portal.area.size, Color::WHITE);
            surface.text_centered(
                portal.label,
                portal.area.center() + Vec2::new(0.0, 6.0),
                20.0,
                Color::WHITE,
            );
        }

        surface.sprite(
            &ctx.assets,
            "croissant",
            self.player - Vec2::splat(PLAYER_RADIUS),
            Vec2::splat(PLAYER_RADIUS * 2.0),
        );

        surface.text(
            format!(
                "Score: {}   Coins: {}",
                ctx.progress().score(),
                ctx.progress().coins()
            ),
            Vec2::new(20.0, 36.0),
            22.0,
            Color::WHITE,
        );
        if let Some(i) = self.standing_on() {
            surface.text_centered(
                format!("Press E to play {}", self.portals[i].label),
                Vec2::new(WORLD_W / 2.0, WORLD_H - 28.0),
                24.0,
                Color::YELLOW,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use croissant_engine::{GameConfig, InputEvent};

    fn ctx() -> GameContext {
        GameContext::new(&GameConfig::default(), 5)
    }

    #[test]
    fn interact_outside_portals_does_nothing() {
        let mut scene = WorldMapScene::new();
        let mut ctx = ctx();
        scene.enter(&mut ctx);
        ctx.input.apply(InputEvent::KeyDown { key: "e".into() });
        scene.update(&mut ctx, 0.016);
        assert_eq!(ctx.take_scene_request(), None);
    }

    #[test]
    fn interact_inside_portal_requests_it() {
        let mut scene = WorldMapScene::new();
        let mut ctx = ctx();
        scene.enter(&mut ctx);
        scene.player = scene.portals[2].area.center();
        ctx.input.apply(InputEvent::KeyDown { key: "e".into() });
        scene.update(&mut ctx, 0.016);
        assert_eq!(ctx.take_scene_request().as_deref(), Some(names::CHESS));
    }

    #[test]
    fn clicking_a_portal_requests_it_and_consumes() {
        let mut scene = WorldMapScene::new();
        let mut ctx = ctx();
        scene.enter(&mut ctx);
        let p = scene.portals[7].area.center();
        ctx.input.apply(InputEvent::PointerDown { x: p.x, y: p.y });
        scene.update(&mut ctx, 0.016);
        assert_eq!(ctx.take_scene_request().as_deref(), Some(names::SNAKE));
        assert_eq!(ctx.input.click_pos(), None);
    }

    #[test]
    fn enter_resets_player_to_spawn() {
        let mut scene = WorldMapScene::new();
        let mut ctx = ctx();
        scene.enter(&mut ctx);
        scene.player = Vec2::new(10.0, 10.0);
        scene.exit(&mut ctx);
        scene.enter(&mut ctx);
        assert_eq!(scene.player, SPAWN);
    }

    #[test]
    fn movement_is_clamped_to_the_map() {
        let mut scene = WorldMapScene::new();
        let mut ctx = ctx();
        scene.enter(&mut ctx);
        scene.player = Vec2::new(PLAYER_RADIUS, PLAYER_RADIUS);
        ctx.input.apply(InputEvent::KeyDown {
            key: "arrowleft".into(),
        });
        scene.update(&mut ctx, 1.0);
        assert_eq!(scene.player.x, PLAYER_RADIUS);
    }
}
