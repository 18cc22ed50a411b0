use croissant_engine::{
    ActionQueue, Color, GameContext, MinigameShell, RectArea, Rng, Scene, ShellConfig,
    ShellSignal, SoundEvent, Surface,
};
use glam::Vec2;

use crate::game::{WORLD_H, WORLD_W};

const COLS: usize = 4;
const ROWS: usize = 4;
const CARD: f32 = 120.0;
const GAP: f32 = 18.0;
const GRID_X: f32 = (WORLD_W - (COLS as f32 * (CARD + GAP) - GAP)) / 2.0;
const GRID_Y: f32 = 150.0;
const FLIP_BACK_SECS: f32 = 0.8;

const SYMBOLS: [&str; 8] = ["A", "B", "C", "D", "E", "F", "G", "H"];
const SYMBOL_COLORS: [Color; 8] = [
    Color::RED,
    Color::GREEN,
    Color::BLUE,
    Color::YELLOW,
    Color::ORANGE,
    Color::PURPLE,
    Color::CROISSANT,
    Color::SKY,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CardFace {
    Hidden,
    Revealed,
    Matched,
}

#[derive(Debug, PartialEq, Eq)]
enum FlipOutcome {
    Ignored,
    First,
    Match,
    Mismatch(usize, usize),
    Won,
}

struct MemoryState {
    /// Symbol index per card.
    cards: Vec<u8>,
    faces: Vec<CardFace>,
    first: Option<usize>,
    /// True while a mismatched pair waits to flip back; clicks are ignored.
    locked: bool,
    moves: u32,
    matched: usize,
}

impl MemoryState {
    fn new(rng: &mut Rng) -> Self {
        let mut cards: Vec<u8> = (0..(COLS * ROWS) as u8).map(|i| i / 2).collect();
        // Fisher-Yates.
        for i in (1..cards.len()).rev() {
            let j = rng.next_int(i as u32 + 1) as usize;
            cards.swap(i, j);
        }
        Self {
            cards,
            faces: vec![CardFace::Hidden; COLS * ROWS],
            first: None,
            locked: false,
            moves: 0,
            matched: 0,
        }
    }

    fn flip(&mut self, i: usize) -> FlipOutcome {
        if self.locked || self.faces[i] != CardFace::Hidden {
            return FlipOutcome::Ignored;
        }
        self.faces[i] = CardFace::Revealed;
        match self.first.take() {
            None => {
                self.first = Some(i);
                FlipOutcome::First
            }
            Some(f) => {
                self.moves += 1;
                if self.cards[f] == self.cards[i] {
                    self.faces[f] = CardFace::Matched;
                    self.faces[i] = CardFace::Matched;
                    self.matched += 2;
                    if self.matched == self.cards.len() {
                        FlipOutcome::Won
                    } else {
                        FlipOutcome::Match
                    }
                } else {
                    self.locked = true;
                    FlipOutcome::Mismatch(f, i)
                }
            }
        }
    }

    fn flip_back(&mut self, a: usize, b: usize) {
        self.faces[a] = CardFace::Hidden;
        self.faces[b] = CardFace::Hidden;
        self.locked = false;
    }

    fn win_points(&self) -> i64 {
        (160 - 4 * self.moves as i64).max(20)
    }
}

fn card_rect(i: usize) -> RectArea {
    let col = (i % COLS) as f32;
    let row = (i / COLS) as f32;
    RectArea::new(
        GRID_X + col * (CARD + GAP),
        GRID_Y + row * (CARD + GAP),
        CARD,
        CARD,
    )
}

/// Pairs of cards to match. A mismatched pair flips back after a short,
/// frame-driven delay during which further clicks are ignored.
pub struct MemoryScene {
    shell: MinigameShell,
    state: MemoryState,
    rng: Rng,
    flip_back: ActionQueue<(usize, usize)>,
}

impl MemoryScene {
    pub fn new() -> Self {
        let mut rng = Rng::new(1);
        let state = MemoryState::new(&mut rng);
        Self {
            shell: MinigameShell::new(
                ShellConfig {
                    title: "Memory",
                    instructions: "Click cards to find all eight pairs.",
                    ..ShellConfig::default()
                },
                WORLD_W,
                WORLD_H,
            ),
            state,
            rng,
            flip_back: ActionQueue::new(),
        }
    }

    fn reset(&mut self) {
        self.state = MemoryState::new(&mut self.rng);
        self.flip_back.clear();
    }
}

impl Scene for MemoryScene {
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

        for (a, b) in self.flip_back.tick(dt) {
            self.state.flip_back(a, b);
        }

        if let Some(p) = ctx.input.click_pos() {
            if let Some(i) = (0..self.state.cards.len()).find(|&i| card_rect(i).contains(p)) {
                ctx.input.consume_click();
                match self.state.flip(i) {
                    FlipOutcome::Mismatch(a, b) => {
                        self.flip_back.push(FLIP_BACK_SECS, (a, b));
                    }
                    FlipOutcome::Match => {
                        ctx.emit_sound(SoundEvent(2));
                    }
                    FlipOutcome::Won => {
                        let points = self.state.win_points();
                        self.shell.add_round_score(points);
                        ctx.add_points(points, "memory");
                        self.shell.end_round(true);
                    }
                    FlipOutcome::First | FlipOutcome::Ignored => {}
                }
            }
        }
    }

    fn render(&self, ctx: &GameContext, surface: &mut Surface) {
        surface.fill_rect(
            Vec2::ZERO,
            Vec2::new(WORLD_W, WORLD_H),
            Color::rgb(0.2, 0.24, 0.32),
        );
        for i in 0..self.state.cards.len() {
            let rect = card_rect(i);
            match self.state.faces[i] {
                CardFace::Hidden => {
                    surface.fill_rect(rect.pos, rect.size, Color::BLUE);
                    surface.stroke_rect(rect.pos, rect.size, Color::WHITE);
                }
                CardFace::Revealed | CardFace::Matched => {
                    let symbol = self.state.cards[i] as usize;
                    let bg = if self.state.faces[i] == CardFace::Matched {
                        Color::DARK_GRAY
                    } else {
                        Color::WHITE
                    };
                    surface.fill_rect(rect.pos, rect.size, bg);
                    surface.text_centered(
                        SYMBOLS[symbol],
                        rect.center() + Vec2::new(0.0, 14.0),
                        44.0,
                        SYMBOL_COLORS[symbol],
                    );
                }
            }
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
