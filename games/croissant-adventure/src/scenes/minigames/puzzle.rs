use croissant_engine::{
    Color, GameContext, MinigameShell, RectArea, Rng, Scene, ShellConfig, ShellSignal, Surface,
};
use glam::Vec2;

use crate::game::{WORLD_H, WORLD_W};

const N: usize = 4;
const TILE: f32 = 130.0;
const GAP: f32 = 8.0;
const GRID_X: f32 = (WORLD_W - (N as f32 * (TILE + GAP) - GAP)) / 2.0;
const GRID_Y: f32 = 140.0;
const SHUFFLE_STEPS: usize = 300;

struct PuzzleState {
    /// `tiles[i]` is the number shown at slot i; 0 is the blank.
    tiles: [u8; N * N],
    blank: usize,
    moves: u32,
}

impl PuzzleState {
    /// Shuffle by walking the blank through random legal slides, so every
    /// board is solvable by construction.
    fn new(rng: &mut Rng) -> Self {
        let mut tiles = [0u8; N * N];
        for (i, tile) in tiles.iter_mut().enumerate().take(N * N - 1) {
            *tile = i as u8 + 1;
        }
        let mut state = Self {
            tiles,
            blank: N * N - 1,
            moves: 0,
        };
        for _ in 0..SHUFFLE_STEPS {
            let neighbors = state.neighbors_of_blank();
            let pick = neighbors[rng.next_int(neighbors.len() as u32) as usize];
            state.slide(pick);
        }
        state.moves = 0;
        state
    }

    fn neighbors_of_blank(&self) -> Vec<usize> {
        let (bx, by) = (self.blank % N, self.blank / N);
        let mut out = Vec::with_capacity(4);
        if bx > 0 {
            out.push(self.blank - 1);
        }
        if bx + 1 < N {
            out.push(self.blank + 1);
        }
        if by > 0 {
            out.push(self.blank - N);
        }
        if by + 1 < N {
            out.push(self.blank + N);
        }
        out
    }

    /// Slide the tile at `idx` into the blank, if adjacent.
    fn slide(&mut self, idx: usize) -> bool {
        if !self.neighbors_of_blank().contains(&idx) {
            return false;
        }
        self.tiles.swap(idx, self.blank);
        self.blank = idx;
        self.moves += 1;
        true
    }

    fn is_solved(&self) -> bool {
        self.tiles[..N * N - 1]
            .iter()
            .enumerate()
            .all(|(i, &t)| t == i as u8 + 1)
            && self.tiles[N * N - 1] == 0
    }

    fn win_points(&self) -> i64 {
        (200 - 2 * self.moves as i64).max(40)
    }
}

fn tile_rect(i: usize) -> RectArea {
    RectArea::new(
        GRID_X + (i % N) as f32 * (TILE + GAP),
        GRID_Y + (i / N) as f32 * (TILE + GAP),
        TILE,
        TILE,
    )
}

/// Classic 15-puzzle. Fewer moves, more points.
pub struct PuzzleScene {
    shell: MinigameShell,
    state: PuzzleState,
    rng: Rng,
}

impl PuzzleScene {
    pub fn new() -> Self {
        let mut rng = Rng::new(1);
        let state = PuzzleState::new(&mut rng);
        Self {
            shell: MinigameShell::new(
                ShellConfig {
                    title: "Sliding Puzzle",
                    instructions: "Click a tile next to the gap to slide it. Order 1-15!",
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
        self.state = PuzzleState::new(&mut self.rng);
    }
}

impl Scene for PuzzleScene {
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
            if let Some(i) = (0..N * N).find(|&i| tile_rect(i).contains(p)) {
                ctx.input.consume_click();
                if self.state.slide(i) && self.state.is_solved() {
                    let points = self.state.win_points();
                    self.shell.add_round_score(points);
                    ctx.add_points(points, "puzzle");
                    self.shell.end_round(true);
                }
            }
        }
    }

    fn render(&self, ctx: &GameContext, surface: &mut Surface) {
        surface.fill_rect(
            Vec2::ZERO,
            Vec2::new(WORLD_W, WORLD_H),
            Color::rgb(0.25, 0.2, 0.3),
        );
        for i in 0..N * N {
            let value = self.state.tiles[i];
            if value == 0 {
                continue;
            }
            let rect = tile_rect(i);
            surface.fill_rect(rect.pos, rect.size, Color::CROISSANT);
            surface.text_centered(
                format!("{}", value),
                rect.center() + Vec2::new(0.0, 14.0),
                40.0,
                Color::BLACK,
            );
        }
        surface.text(
            format!("Moves: {}", self.state.moves),
            Vec2::new(20.0, 96.0),
            20.0,
            Color::WHITE,
        );
        self.shell.render(ctx, surface);
    }
}
