use croissant_engine::{
    EngineError, Game, GameConfig, GameContext, Scene, SceneStage, Surface,
};

use crate::scenes::minigames::{
    ChessScene, CoinCollectorScene, FishingScene, MazeScene, MemoryScene, PaintScene,
    PlatformScene, PuzzleScene, RhythmScene, RouletteScene, ShooterScene, SnakeScene,
};
use crate::scenes::{names, MainMenuScene, WorldMapScene};

/// Logical canvas size. Every scene authors against this fixed space; the
/// browser scales presentation.
pub const WORLD_W: f32 = 1200.0;
pub const WORLD_H: f32 = 800.0;

/// The whole game: a scene stage populated with the menu, the overworld and
/// the twelve minigames.
pub struct CroissantAdventure {
    stage: SceneStage,
}

impl CroissantAdventure {
    pub fn new() -> Self {
        Self {
            stage: SceneStage::new(),
        }
    }
}

impl Default for CroissantAdventure {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for CroissantAdventure {
    fn config(&self) -> GameConfig {
        GameConfig {
            logical_width: WORLD_W,
            logical_height: WORLD_H,
            start_scene: names::MAIN_MENU,
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut GameContext) {
        self.stage
            .register(names::MAIN_MENU, Box::new(MainMenuScene::new()));
        self.stage
            .register(names::WORLD_MAP, Box::new(WorldMapScene::new()));

        // Minigames register in isolation: one failing constructor is logged
        // and skipped without keeping the rest of the park closed.
        let minigames: [(&str, fn() -> Result<Box<dyn Scene>, EngineError>); 12] = [
            (names::COIN_COLLECTOR, || {
                Ok(Box::new(CoinCollectorScene::new()))
            }),
            (names::ROULETTE, || Ok(Box::new(RouletteScene::new()))),
            (names::CHESS, || Ok(Box::new(ChessScene::new()))),
            (names::MAZE, || Ok(Box::new(MazeScene::new()))),
            (names::SHOOTER, || Ok(Box::new(ShooterScene::new()))),
            (names::PLATFORM, || Ok(Box::new(PlatformScene::new()))),
            (names::MEMORY, || Ok(Box::new(MemoryScene::new()))),
            (names::SNAKE, || Ok(Box::new(SnakeScene::new()))),
            (names::PUZZLE, || Ok(Box::new(PuzzleScene::new()))),
            (names::RHYTHM, || Ok(Box::new(RhythmScene::new()))),
            (names::PAINT_GAME, || Ok(Box::new(PaintScene::new()))),
            (names::FISHING, || Ok(Box::new(FishingScene::new()))),
        ];
        for (name, build) in minigames {
            self.stage.register_with(name, build);
        }

        if !self.stage.switch(names::MAIN_MENU, ctx) {
            log::error!("start scene '{}' missing", names::MAIN_MENU);
        }
    }

    fn update(&mut self, ctx: &mut GameContext, dt: f32) {
        self.stage.frame(ctx, dt);
    }

    fn render(&self, ctx: &GameContext, surface: &mut Surface) {
        self.stage.render(ctx, surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use croissant_engine::InputEvent;

    fn booted() -> (CroissantAdventure, GameContext) {
        let mut game = CroissantAdventure::new();
        let mut ctx = GameContext::new(&game.config(), 7);
        game.init(&mut ctx);
        (game, ctx)
    }

    /// One runner-shaped frame: update, then drop one-shot input state.
    fn frame(game: &mut CroissantAdventure, ctx: &mut GameContext, dt: f32) {
        game.update(ctx, dt);
        ctx.input.end_frame();
    }

    fn key_tap(game: &mut CroissantAdventure, ctx: &mut GameContext, key: &str) {
        ctx.input.apply(InputEvent::KeyDown { key: key.into() });
        frame(game, ctx, 0.016);
        ctx.input.apply(InputEvent::KeyUp { key: key.into() });
    }

    #[test]
    fn boot_lands_on_the_main_menu() {
        let (game, _ctx) = booted();
        assert_eq!(game.stage.active_name(), Some(names::MAIN_MENU));
    }

    #[test]
    fn every_scene_key_is_registered() {
        let (game, _ctx) = booted();
        assert!(game.stage.contains(names::MAIN_MENU));
        assert!(game.stage.contains(names::WORLD_MAP));
        for name in names::MINIGAMES {
            assert!(game.stage.contains(name), "missing scene: {}", name);
        }
    }

    #[test]
    fn unregistered_keys_are_a_silent_no_op() {
        let (mut game, mut ctx) = booted();
        for name in ["towerDefense", "triviaGame", "adminPanel", "nonsense"] {
            ctx.request_scene(name);
            frame(&mut game, &mut ctx, 0.016);
            assert_eq!(game.stage.active_name(), Some(names::MAIN_MENU));
        }
    }

    #[test]
    fn menu_to_world_map_to_minigame_and_back() {
        let (mut game, mut ctx) = booted();

        // Enter on the menu goes to the overworld.
        key_tap(&mut game, &mut ctx, "enter");
        assert_eq!(game.stage.active_name(), Some(names::WORLD_MAP));

        // Walk straight up from the spawn into the Rhythm portal.
        ctx.input.apply(InputEvent::KeyDown {
            key: "arrowup".into(),
        });
        for _ in 0..4 {
            frame(&mut game, &mut ctx, 0.1);
        }
        ctx.input.apply(InputEvent::KeyUp {
            key: "arrowup".into(),
        });

        // Interact key launches the minigame under the player.
        key_tap(&mut game, &mut ctx, "e");
        assert_eq!(game.stage.active_name(), Some(names::RHYTHM));

        // The uniform Exit button returns to the overworld.
        ctx.input.apply(InputEvent::PointerDown {
            x: WORLD_W - 100.0,
            y: 40.0,
        });
        frame(&mut game, &mut ctx, 0.016);
        assert_eq!(game.stage.active_name(), Some(names::WORLD_MAP));
    }

    #[test]
    fn a_broken_minigame_does_not_block_the_rest() {
        let mut game = CroissantAdventure::new();
        let mut ctx = GameContext::new(&game.config(), 7);
        game.stage.register_with("broken", || {
            Err(EngineError::SceneConstruction("no canvas".into()))
        });
        game.init(&mut ctx);
        assert!(!game.stage.contains("broken"));
        assert_eq!(game.stage.active_name(), Some(names::MAIN_MENU));
        ctx.request_scene(names::SNAKE);
        game.update(&mut ctx, 0.016);
        assert_eq!(game.stage.active_name(), Some(names::SNAKE));
    }
}
