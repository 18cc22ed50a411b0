use croissant_engine::{
    Color, GameContext, MinigameShell, RectArea, Scene, ShellConfig, ShellSignal, Surface,
};
use glam::Vec2;

use crate::game::{WORLD_H, WORLD_W};

const PCOLS: usize = 24;
const PROWS: usize = 14;
const CELL: f32 = 34.0;
const GRID_X: f32 = (WORLD_W - PCOLS as f32 * CELL) / 2.0;
const GRID_Y: f32 = 150.0;
const SWATCH: f32 = 54.0;
const DONE_BUTTON: RectArea = RectArea::new(WORLD_W / 2.0 - 80.0, 700.0, 160.0, 56.0);

/// Palette index 0 is the blank canvas color.
const PALETTE: [Color; 9] = [
    Color::WHITE,
    Color::RED,
    Color::ORANGE,
    Color::YELLOW,
    Color::GREEN,
    Color::SKY,
    Color::BLUE,
    Color::PURPLE,
    Color::BLACK,
];

struct PaintState {
    cells: Vec<u8>,
    current: u8,
}

impl PaintState {
    fn new() -> Self {
        Self {
            cells: vec![0; PCOLS * PROWS],
            current: 1,
        }
    }

    fn paint_at(&mut self, col: usize, row: usize) {
        self.cells[row * PCOLS + col] = self.current;
    }

    /// Flat reward plus a bonus for every distinct color on the canvas.
    fn finish_points(&self) -> i64 {
        let mut used = [false; PALETTE.len()];
        for &cell in &self.cells {
            if cell != 0 {
                used[cell as usize] = true;
            }
        }
        let distinct = used.iter().filter(|&&u| u).count() as i64;
        20 + distinct * 5
    }
}

fn cell_at(p: Vec2) -> Option<(usize, usize)> {
    let col = ((p.x - GRID_X) / CELL).floor() as i32;
    let row = ((p.y - GRID_Y) / CELL).floor() as i32;
    if (0..PCOLS as i32).contains(&col) && (0..PROWS as i32).contains(&row) {
        Some((col as usize, row as usize))
    } else {
        None
    }
}

fn swatch_rect(i: usize) -> RectArea {
    RectArea::new(
        40.0,
        GRID_Y + i as f32 * (SWATCH + 8.0) - 20.0,
        SWATCH,
        SWATCH,
    )
}

/// Free painting on a pixel grid. Dragging paints (the mouse button is read
/// as level state, not as the one-shot click), and Done banks the picture.
pub struct PaintScene {
    shell: MinigameShell,
    state: PaintState,
}

impl PaintScene {
    pub fn new() -> Self {
        Self {
            shell: MinigameShell::new(
                ShellConfig {
                    title: "Paint Studio",
                    instructions: "Pick colors, drag to paint. Click Done to finish!",
                    ..ShellConfig::default()
                },
                WORLD_W,
                WORLD_H,
            ),
            state: PaintState::new(),
        }
    }

    fn reset(&mut self) {
        self.state = PaintState::new();
    }
}

impl Scene for PaintScene {
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

        if let Some(p) = ctx.input.click_pos() {
            if let Some(i) = (1..PALETTE.len()).find(|&i| swatch_rect(i).contains(p)) {
                ctx.input.consume_click();
                self.state.current = i as u8;
            } else if DONE_BUTTON.contains(p) {
                ctx.input.consume_click();
                let points = self.state.finish_points();
                self.shell.add_round_score(points);
                ctx.add_points(points, "paintGame");
                self.shell.end_round(true);
                return;
            }
        }

        // Dragging paints continuously.
        if ctx.input.is_mouse_down() {
            if let Some((col, row)) = cell_at(ctx.input.mouse_pos()) {
                self.state.paint_at(col, row);
            }
        }
    }

    fn render(&self, ctx: &GameContext, surface: &mut Surface) {
        surface.fill_rect(
            Vec2::ZERO,
            Vec2::new(WORLD_W, WORLD_H),
            Color::rgb(0.33, 0.3, 0.28),
        );

        for row in 0..PROWS {
            for col in 0..PCOLS {
                let color = PALETTE[self.state.cells[row * PCOLS + col] as usize];
                surface.fill_rect(
                    Vec2::new(GRID_X + col as f32 * CELL, GRID_Y + row as f32 * CELL),
                    Vec2::splat(CELL),
                    color,
                );
            }
        }
        surface.stroke_rect(
            Vec2::new(GRID_X, GRID_Y),
            Vec2::new(PCOLS as f32 * CELL, PROWS as f32 * CELL),
            Color::BLACK,
        );

        for (i, color) in PALETTE.iter().enumerate().skip(1) {
            let rect = swatch_rect(i);
            surface.fill_rect(rect.pos, rect.size, *color);
            if self.state.current == i as u8 {
                surface.stroke_rect(
                    rect.pos - Vec2::splat(4.0),
                    rect.size + Vec2::splat(8.0),
                    Color::WHITE,
                );
            }
        }

        surface.fill_rect(DONE_BUTTON.pos, DONE_BUTTON.size, Color::GREEN);
        surface.text_centered(
            "Done",
            DONE_BUTTON.center() + Vec2::new(0.0, 8.0),
            24.0,
            Color::WHITE,
        );
        self.shell.render(ctx, surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use croissant_engine::{GameConfig, InputEvent};

    fn started() -> (PaintScene, GameContext) {
        let mut scene = PaintScene::new();
        let mut ctx = GameContext::new(&GameConfig::default(), 71);
        scene.enter(&mut ctx);
        scene.update(&mut ctx, 10.0);
        scene.update(&mut ctx, 0.0);
        assert!(scene.shell.is_playing());
        (scene, ctx)
    }

    #[test]
    fn fresh_canvas_is_blank() {
        let state = PaintState::new();
        assert!(state.cells.iter().all(|&c| c == 0));
        assert_eq!(state.current, 1);
        assert_eq!(state.finish_points(), 20);
    }

    #[test]
    fn dragging_paints_the_cell_under_the_cursor() {
        let (mut scene, mut ctx) = started();
        let p = Vec2::new(GRID_X + CELL * 2.5, GRID_Y + CELL * 3.5);
        ctx.input.apply(InputEvent::PointerDown { x: p.x, y: p.y });
        scene.update(&mut ctx, 0.016);
        assert_eq!(scene.state.cells[3 * PCOLS + 2], 1);
        // Still held next frame: drag to a neighbor cell.
        ctx.input.end_frame();
        ctx.input.apply(InputEvent::PointerMove {
            x: p.x + CELL,
            y: p.y,
        });
        scene.update(&mut ctx, 0.016);
        assert_eq!(scene.state.cells[3 * PCOLS + 3], 1);
    }

    #[test]
    fn palette_click_selects_the_color() {
        let (mut scene, mut ctx) = started();
        let p = swatch_rect(4).center();
        ctx.input.apply(InputEvent::PointerDown { x: p.x, y: p.y });
        scene.update(&mut ctx, 0.016);
        assert_eq!(scene.state.current, 4);
    }

    #[test]
    fn distinct_colors_raise_the_finish_points() {
        let mut state = PaintState::new();
        state.current = 1;
        state.paint_at(0, 0);
        state.current = 5;
        state.paint_at(1, 0);
        assert_eq!(state.finish_points(), 30);
    }

    #[test]
    fn done_banks_the_picture_once() {
        let (mut scene, mut ctx) = started();
        scene.state.current = 2;
        scene.state.paint_at(0, 0);
        let p = DONE_BUTTON.center();
        ctx.input.apply(InputEvent::PointerDown { x: p.x, y: p.y });
        scene.update(&mut ctx, 0.016);
        assert!(!scene.shell.is_playing());
        assert_eq!(ctx.progress().score(), 25);
        ctx.input.end_frame();
        scene.update(&mut ctx, 0.016);
        assert_eq!(ctx.progress().score(), 25);
    }

    #[test]
    fn reenter_clears_the_canvas() {
        let (mut scene, mut ctx) = started();
        scene.state.paint_at(0, 0);
        scene.exit(&mut ctx);
        scene.enter(&mut ctx);
        assert!(scene.state.cells.iter().all(|&c| c == 0));
    }
}
