use croissant_engine::{
    source, Color, GameContext, MinigameShell, Rng, Scene, ShellConfig, ShellSignal, Surface,
};
use glam::Vec2;

use crate::game::{WORLD_H, WORLD_W};

const COLS: usize = 15;
const ROWS: usize = 11;
const CELL: f32 = 56.0;
const GRID_X: f32 = (WORLD_W - COLS as f32 * CELL) / 2.0;
const GRID_Y: f32 = 120.0;
const ROUND_SECS: f32 = 60.0;

// Wall bits per cell.
const N: u8 = 1;
const S: u8 = 2;
const E: u8 = 4;
const W: u8 = 8;

struct MazeState {
    /// Wall bitmask per cell, row-major.
    walls: Vec<u8>,
    player: (usize, usize),
    goal: (usize, usize),
}

impl MazeState {
    /// Carve a perfect maze with an iterative depth-first backtracker, so
    /// every cell is reachable from the start.
    fn new(rng: &mut Rng) -> Self {
        let mut walls = vec![N | S | E | W; COLS * ROWS];
        let mut visited = vec![false; COLS * ROWS];
        let mut stack = vec![(0usize, 0usize)];
        visited[0] = true;

        while let Some(&(x, y)) = stack.last() {
            let mut neighbors: Vec<(usize, usize, u8, u8)> = Vec::with_capacity(4);
            if y > 0 && !visited[idx(x, y - 1)] {
                neighbors.push((x, y - 1, N, S));
            }
            if y + 1 < ROWS && !visited[idx(x, y + 1)] {
                neighbors.push((x, y + 1, S, N));
            }
            if x + 1 < COLS && !visited[idx(x + 1, y)] {
                neighbors.push((x + 1, y, E, W));
            }
            if x > 0 && !visited[idx(x - 1, y)] {
                neighbors.push((x - 1, y, W, E));
            }

            if neighbors.is_empty() {
                stack.pop();
                continue;
            }
            let (nx, ny, here, there) =
                neighbors[rng.next_int(neighbors.len() as u32) as usize];
            walls[idx(x, y)] &= !here;
            walls[idx(nx, ny)] &= !there;
            visited[idx(nx, ny)] = true;
            stack.push((nx, ny));
        }

        Self {
            walls,
            player: (0, 0),
            goal: (COLS - 1, ROWS - 1),
        }
    }

    fn can_move(&self, from: (usize, usize), wall: u8) -> bool {
        self.walls[idx(from.0, from.1)] & wall == 0
    }

    /// Try to move the player one cell. Returns whether it moved.
    fn try_move(&mut self, dx: i32, dy: i32) -> bool {
        let (x, y) = self.player;
        let moved = match (dx, dy) {
            (0, -1) if y > 0 && self.can_move((x, y), N) => Some((x, y - 1)),
            (0, 1) if y + 1 < ROWS && self.can_move((x, y), S) => Some((x, y + 1)),
            (1, 0) if x + 1 < COLS && self.can_move((x, y), E) => Some((x + 1, y)),
            (-1, 0) if x > 0 && self.can_move((x, y), W) => Some((x - 1, y)),
            _ => None,
        };
        if let Some(next) = moved {
            self.player = next;
            true
        } else {
            false
        }
    }
}

fn idx(x: usize, y: usize) -> usize {
    y * COLS + x
}

/// Find the exit before the clock runs out. Finishing with T seconds left
/// awards `100 + floor(T * 5)` points in a single maze-tagged report and
/// marks the maze achievement complete.
pub struct MazeScene {
    shell: MinigameShell,
    state: MazeState,
    rng: Rng,
}

impl MazeScene {
    pub fn new() -> Self {
        let mut rng = Rng::new(1);
        let state = MazeState::new(&mut rng);
        Self {
            shell: MinigameShell::new(
                ShellConfig {
                    title: "Maze",
                    instructions: "Arrow keys to walk. Reach the flag before time is up!",
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
        self.state = MazeState::new(&mut self.rng);
    }

    fn check_goal(&mut self, ctx: &mut GameContext) {
        if self.state.player == self.state.goal {
            let bonus = 100 + (self.shell.time_left * 5.0).floor() as i64;
            ctx.add_points(bonus, source::MAZE);
            self.shell.add_round_score(bonus);
            self.shell.end_round(true);
        }
    }
}

impl Scene for MazeScene {
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

        if ctx.input.key_just_pressed("arrowup") || ctx.input.key_just_pressed("w") {
            self.state.try_move(0, -1);
        }
        if ctx.input.key_just_pressed("arrowdown") || ctx.input.key_just_pressed("s") {
            self.state.try_move(0, 1);
        }
        if ctx.input.key_just_pressed("arrowleft") || ctx.input.key_just_pressed("a") {
            self.state.try_move(-1, 0);
        }
        if ctx.input.key_just_pressed("arrowright") || ctx.input.key_just_pressed("d") {
            self.state.try_move(1, 0);
        }

        self.check_goal(ctx);
    }

    fn render(&self, ctx: &GameContext, surface: &mut Surface) {
        surface.fill_rect(
            Vec2::new(GRID_X, GRID_Y),
            Vec2::new(COLS as f32 * CELL, ROWS as f32 * CELL),
            Color::rgb(0.16, 0.16, 0.2),
        );

        // Goal flag.
        let goal = cell_origin(self.state.goal);
        surface.fill_rect(
            goal + Vec2::splat(10.0),
            Vec2::splat(CELL - 20.0),
            Color::YELLOW,
        );

        // Walls.
        for y in 0..ROWS {
            for x in 0..COLS {
                let o = cell_origin((x, y));
                let w = self.state.walls[idx(x, y)];
                if w & N != 0 {
                    surface.line(o, o + Vec2::new(CELL, 0.0), 3.0, Color::WHITE);
                }
                if w & S != 0 {
                    surface.line(
                        o + Vec2::new(0.0, CELL),
                        o + Vec2::new(CELL, CELL),
                        3.0,
                        Color::WHITE,
                    );
                }
                if w & W != 0 {
                    surface.line(o, o + Vec2::new(0.0, CELL), 3.0, Color::WHITE);
                }
                if w & E != 0 {
                    surface.line(
                        o + Vec2::new(CELL, 0.0),
                        o + Vec2::new(CELL, CELL),
                        3.0,
                        Color::WHITE,
                    );
                }
            }
        }

        surface.fill_circle(
            cell_origin(self.state.player) + Vec2::splat(CELL / 2.0),
            CELL * 0.32,
            Color::CROISSANT,
        );
        self.shell.render(ctx, surface);
    }
}

fn cell_origin(cell: (usize, usize)) -> Vec2 {
    Vec2::new(
        GRID_X + cell.0 as f32 * CELL,
        GRID_Y + cell.1 as f32 * CELL,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use croissant_engine::GameConfig;
    use std::collections::VecDeque;

    #[test]
    fn every_cell_is_reachable() {
        let mut rng = Rng::new(123);
        let state = MazeState::new(&mut rng);

        let mut seen = vec![false; COLS * ROWS];
        let mut queue = VecDeque::from([(0usize, 0usize)]);
        seen[0] = true;
        while let Some((x, y)) = queue.pop_front() {
            let mut push = |nx: usize, ny: usize| {
                if !seen[idx(nx, ny)] {
                    seen[idx(nx, ny)] = true;
                    queue.push_back((nx, ny));
                }
            };
            if y > 0 && state.can_move((x, y), N) {
                push(x, y - 1);
            }
            if y + 1 < ROWS && state.can_move((x, y), S) {
                push(x, y + 1);
            }
            if x + 1 < COLS && state.can_move((x, y), E) {
                push(x + 1, y);
            }
            if x > 0 && state.can_move((x, y), W) {
                push(x - 1, y);
            }
        }
        assert!(seen.iter().all(|&v| v), "maze has unreachable cells");
    }

    #[test]
    fn walls_block_movement() {
        let mut rng = Rng::new(5);
        let mut state = MazeState::new(&mut rng);
        // Force a known wall and try to walk through it.
        state.player = (3, 3);
        state.walls[idx(3, 3)] |= N;
        assert!(!state.try_move(0, -1));
        assert_eq!(state.player, (3, 3));
        state.walls[idx(3, 3)] &= !N;
        assert!(state.try_move(0, -1));
        assert_eq!(state.player, (3, 2));
    }

    #[test]
    fn edges_block_movement() {
        let mut rng = Rng::new(5);
        let mut state = MazeState::new(&mut rng);
        state.player = (0, 0);
        state.walls[idx(0, 0)] &= !(N | W);
        assert!(!state.try_move(0, -1));
        assert!(!state.try_move(-1, 0));
    }

    #[test]
    fn finishing_with_ten_seconds_awards_exactly_150() {
        let mut scene = MazeScene::new();
        let mut ctx = GameContext::new(&GameConfig::default(), 23);
        scene.enter(&mut ctx);

        scene.shell.time_left = 10.0;
        scene.state.player = scene.state.goal;
        let before = ctx.progress().score();
        scene.check_goal(&mut ctx);

        assert_eq!(ctx.progress().score() - before, 150);
        assert!(ctx.progress().achievements().maze_completed);
        assert!(!scene.shell.is_playing());

        // Repeated frames in Ended must not re-report.
        scene.update(&mut ctx, 0.016);
        assert_eq!(ctx.progress().score() - before, 150);
    }

    #[test]
    fn reenter_resets_player_and_timer() {
        let mut scene = MazeScene::new();
        let mut ctx = GameContext::new(&GameConfig::default(), 23);
        scene.enter(&mut ctx);
        scene.state.player = (5, 5);
        scene.shell.time_left = 2.0;
        scene.exit(&mut ctx);
        scene.enter(&mut ctx);
        assert_eq!(scene.state.player, (0, 0));
        assert_eq!(scene.shell.time_left, ROUND_SECS);
    }
}
