//! Scene contract and the stage that drives it.
//!
//! A scene is a full-screen interactive mode (menu, overworld, minigame).
//! Exactly one scene is active at a time; switching calls `exit()` on the
//! outgoing scene strictly before `enter()` on the incoming one, and no
//! scene receives `update`/`render` outside its enter/exit window. Scenes
//! must not assume per-activation state survives the cycle — `enter()` does
//! a full reset.

use std::collections::HashMap;

use glam::Vec2;

use crate::api::game::GameContext;
use crate::api::types::SceneEvent;
use crate::error::EngineError;
use crate::render::color::Color;
use crate::render::surface::Surface;

pub trait Scene {
    /// Activation hook. Reinitialize all per-activation state here.
    fn enter(&mut self, ctx: &mut GameContext);

    /// Deactivation hook, called exactly once when superseded.
    fn exit(&mut self, ctx: &mut GameContext);

    /// Per-frame logic while active. `dt` is the frame delta in seconds.
    fn update(&mut self, ctx: &mut GameContext, dt: f32);

    /// Per-frame drawing while active, after `update`.
    fn render(&self, ctx: &GameContext, surface: &mut Surface);
}

/// Scene registry plus the active-scene pointer and switch protocol.
pub struct SceneStage {
    scenes: HashMap<String, Box<dyn Scene>>,
    active: Option<String>,
}

impl SceneStage {
    pub fn new() -> Self {
        Self {
            scenes: HashMap::new(),
            active: None,
        }
    }

    /// Insert a scene. Entries are created once at startup and never removed.
    pub fn register(&mut self, name: &str, scene: Box<dyn Scene>) {
        self.scenes.insert(name.to_string(), scene);
    }

    /// Fault-isolated registration: a constructor that fails is logged and
    /// skipped, so one broken minigame does not abort startup of the rest.
    pub fn register_with<F>(&mut self, name: &str, build: F)
    where
        F: FnOnce() -> Result<Box<dyn Scene>, EngineError>,
    {
        match build() {
            Ok(scene) => self.register(name, scene),
            Err(e) => log::error!("scene '{}' failed to register: {}", name, e),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.scenes.contains_key(name)
    }

    pub fn active_name(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Switch the active scene. Unknown names leave the active scene
    /// unchanged; otherwise the outgoing scene exits before the incoming
    /// one enters. Returns whether the switch happened.
    pub fn switch(&mut self, name: &str, ctx: &mut GameContext) -> bool {
        if !self.scenes.contains_key(name) {
            log::warn!("switch to unknown scene '{}' ignored", name);
            return false;
        }
        if let Some(current) = self.active.take() {
            if let Some(scene) = self.scenes.get_mut(&current) {
                scene.exit(ctx);
            }
        }
        if let Some(scene) = self.scenes.get_mut(name) {
            scene.enter(ctx);
            self.active = Some(name.to_string());
            ctx.emit_event(SceneEvent {
                kind: SceneEvent::KIND_SCENE_CHANGED,
                ..SceneEvent::default()
            });
        }
        true
    }

    /// One frame: update the active scene, then apply any scene request it
    /// made. The request is applied after `update` returns so the outgoing
    /// scene never observes itself mid-switch.
    pub fn frame(&mut self, ctx: &mut GameContext, dt: f32) {
        if let Some(name) = self.active.clone() {
            if let Some(scene) = self.scenes.get_mut(&name) {
                scene.update(ctx, dt);
            }
        }
        if let Some(request) = ctx.take_scene_request() {
            self.switch(&request, ctx);
        }
    }

    /// Render the active scene, or an on-surface error message when the
    /// stage has nothing to show — the one hard failure a player may see.
    pub fn render(&self, ctx: &GameContext, surface: &mut Surface) {
        match self.active.as_ref().and_then(|n| self.scenes.get(n)) {
            Some(scene) => scene.render(ctx, surface),
            None => {
                surface.fill_rect(
                    Vec2::ZERO,
                    Vec2::new(ctx.width(), ctx.height()),
                    Color::DARK_GRAY,
                );
                surface.text_centered(
                    "Something went wrong - no scene is available.",
                    Vec2::new(ctx.width() / 2.0, ctx.height() / 2.0),
                    28.0,
                    Color::WHITE,
                );
            }
        }
    }
}

impl Default for SceneStage {
    fn default() -> Self {
        Self::new()
    }
}
