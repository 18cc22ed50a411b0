use croissant_engine::{Color, GameContext, RectArea, Scene, Surface};
use glam::Vec2;

use crate::game::{WORLD_H, WORLD_W};
use crate::scenes::names;

pub(crate) const START_BUTTON: RectArea =
    RectArea::new(WORLD_W / 2.0 - 130.0, 460.0, 260.0, 64.0);

/// Title screen. Click the start button or press Enter to reach the world map.
pub struct MainMenuScene {
    /// Drives the croissant bob animation.
    t: f32,
}

impl MainMenuScene {
    pub fn new() -> Self {
        Self { t: 0.0 }
    }
}

impl Scene for MainMenuScene {
    fn enter(&mut self, _ctx: &mut GameContext) {
        self.t = 0.0;
    }

    fn exit(&mut self, _ctx: &mut GameContext) {}

    fn update(&mut self, ctx: &mut GameContext, dt: f32) {
        self.t += dt;

        let clicked_start = match ctx.input.click_pos() {
            Some(p) if START_BUTTON.contains(p) => {
                ctx.input.consume_click();
                true
            }
            _ => false,
        };
        if clicked_start || ctx.input.key_just_pressed("enter") {
            ctx.request_scene(names::WORLD_MAP);
        }
    }

    fn render(&self, ctx: &GameContext, surface: &mut Surface) {
        surface.fill_rect(Vec2::ZERO, Vec2::new(WORLD_W, WORLD_H), Color::SKY);

        let bob = (self.t * 2.0).sin() * 12.0;
        surface.sprite(
            &ctx.assets,
            "croissant",
            Vec2::new(WORLD_W / 2.0 - 60.0, 200.0 + bob),
            Vec2::splat(120.0),
        );

        surface.text_centered(
            "Croissant Adventure",
            Vec2::new(WORLD_W / 2.0, 160.0),
            52.0,
            Color::CROISSANT,
        );
        surface.fill_rect(START_BUTTON.pos, START_BUTTON.size, Color::GREEN);
        surface.text_centered(
            "Start (Enter)",
            START_BUTTON.center() + Vec2::new(0.0, 8.0),
            26.0,
            Color::WHITE,
        );
        surface.text_centered(
            format!("Score: {}   Coins: {}", ctx.progress().score(), ctx.progress().coins()),
            Vec2::new(WORLD_W / 2.0, 580.0),
            22.0,
            Color::DARK_GRAY,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use croissant_engine::{GameConfig, InputEvent};

    fn ctx() -> GameContext {
        GameContext::new(&GameConfig::default(), 3)
    }

    #[test]
    fn enter_key_requests_world_map() {
        let mut scene = MainMenuScene::new();
        let mut ctx = ctx();
        scene.enter(&mut ctx);
        ctx.input.apply(InputEvent::KeyDown {
            key: "Enter".into(),
        });
        scene.update(&mut ctx, 0.016);
        assert_eq!(ctx.take_scene_request().as_deref(), Some(names::WORLD_MAP));
    }

    #[test]
    fn start_click_requests_world_map_and_consumes() {
        let mut scene = MainMenuScene::new();
        let mut ctx = ctx();
        scene.enter(&mut ctx);
        let p = START_BUTTON.center();
        ctx.input.apply(InputEvent::PointerDown { x: p.x, y: p.y });
        scene.update(&mut ctx, 0.016);
        assert_eq!(ctx.take_scene_request().as_deref(), Some(names::WORLD_MAP));
        assert_eq!(ctx.input.click_pos(), None);
    }

    #[test]
    fn stray_click_does_nothing() {
        let mut scene = MainMenuScene::new();
        let mut ctx = ctx();
        scene.enter(&mut ctx);
        ctx.input.apply(InputEvent::PointerDown { x: 5.0, y: 5.0 });
        scene.update(&mut ctx, 0.016);
        assert_eq!(ctx.take_scene_request(), None);
    }
}
