use croissant_engine::{
    source, ActionQueue, Color, GameContext, MinigameShell, RectArea, Rng, Scene, ShellConfig,
    ShellSignal, Surface,
};
use glam::Vec2;

use crate::game::{WORLD_H, WORLD_W};

const SQUARE: f32 = 70.0;
const BOARD_X: f32 = (WORLD_W - 8.0 * SQUARE) / 2.0;
const BOARD_Y: f32 = 130.0;
/// Delay before the computer answers, so the human move lands visually first.
const AI_DELAY_SECS: f32 = 0.6;
const WIN_BONUS: i64 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    White,
    Black,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    fn capture_value(self) -> i32 {
        match self {
            PieceKind::Pawn => 1,
            PieceKind::Knight | PieceKind::Bishop => 3,
            PieceKind::Rook => 5,
            PieceKind::Queen => 9,
            PieceKind::King => 1000,
        }
    }

    fn letter(self) -> &'static str {
        match self {
            PieceKind::Pawn => "P",
            PieceKind::Knight => "N",
            PieceKind::Bishop => "B",
            PieceKind::Rook => "R",
            PieceKind::Queen => "Q",
            PieceKind::King => "K",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Piece {
    kind: PieceKind,
    side: Side,
}

type Square = (usize, usize);
type Board = [[Option<Piece>; 8]; 8];

/// Kid-friendly chess: piece movement only. No check, castling or en
/// passant — capturing the king ends the game, matching the house rules.
struct ChessState {
    board: Board,
    selected: Option<Square>,
    /// While the computer "thinks", board clicks are ignored. The loop keeps
    /// running; only this state machine pauses.
    awaiting_ai: bool,
}

impl ChessState {
    fn new() -> Self {
        use PieceKind::*;
        let back = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];
        let mut board: Board = [[None; 8]; 8];
        for (x, kind) in back.into_iter().enumerate() {
            board[0][x] = Some(Piece {
                kind,
                side: Side::Black,
            });
            board[7][x] = Some(Piece {
                kind,
                side: Side::White,
            });
        }
        for x in 0..8 {
            board[1][x] = Some(Piece {
                kind: Pawn,
                side: Side::Black,
            });
            board[6][x] = Some(Piece {
                kind: Pawn,
                side: Side::White,
            });
        }
        Self {
            board,
            selected: None,
            awaiting_ai: false,
        }
    }

    fn piece(&self, sq: Square) -> Option<Piece> {
        self.board[sq.1][sq.0]
    }

    /// Pseudo-legal destinations for the piece on `from`.
    fn moves_from(&self, from: Square) -> Vec<Square> {
        let piece = match self.piece(from) {
            Some(p) => p,
            None => return Vec::new(),
        };
        let (x, y) = (from.0 as i32, from.1 as i32);
        let mut out = Vec::new();

        let push = |out: &mut Vec<Square>, tx: i32, ty: i32| -> bool {
            if !(0..8).contains(&tx) || !(0..8).contains(&ty) {
                return false;
            }
            let target = (tx as usize, ty as usize);
            match self.piece(target) {
                Some(p) if p.side == piece.side => false,
                Some(_) => {
                    out.push(target);
                    false
                }
                None => {
                    out.push(target);
                    true
                }
            }
        };

        match piece.kind {
            PieceKind::Pawn => {
                let dir: i32 = if piece.side == Side::White { -1 } else { 1 };
                let start = if piece.side == Side::White { 6 } else { 1 };
                let fwd = (x as usize, (y + dir) as usize);
                if (0..8).contains(&(y + dir)) && self.piece(fwd).is_none() {
                    out.push(fwd);
                    let fwd2 = (x as usize, (y + 2 * dir) as usize);
                    if y == start && self.piece(fwd2).is_none() {
                        out.push(fwd2);
                    }
                }
                for dx in [-1i32, 1] {
                    let (tx, ty) = (x + dx, y + dir);
                    if (0..8).contains(&tx) && (0..8).contains(&ty) {
                        let target = (tx as usize, ty as usize);
                        if matches!(self.piece(target), Some(p) if p.side != piece.side) {
                            out.push(target);
                        }
                    }
                }
            }
            PieceKind::Knight => {
                for (dx, dy) in [
                    (1, 2),
                    (2, 1),
                    (2, -1),
                    (1, -2),
                    (-1, -2),
                    (-2, -1),
                    (-2, 1),
                    (-1, 2),
                ] {
                    push(&mut out, x + dx, y + dy);
                }
            }
            PieceKind::King => {
                for dx in -1..=1 {
                    for dy in -1..=1 {
                        if dx != 0 || dy != 0 {
                            push(&mut out, x + dx, y + dy);
                        }
                    }
                }
            }
            PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
                let dirs: &[(i32, i32)] = match piece.kind {
                    PieceKind::Bishop => &[(1, 1), (1, -1), (-1, 1), (-1, -1)],
                    PieceKind::Rook => &[(1, 0), (-1, 0), (0, 1), (0, -1)],
                    _ => &[
                        (1, 0),
                        (-1, 0),
                        (0, 1),
                        (0, -1),
                        (1, 1),
                        (1, -1),
                        (-1, 1),
                        (-1, -1),
                    ],
                };
                for &(dx, dy) in dirs {
                    let (mut tx, mut ty) = (x + dx, y + dy);
                    while push(&mut out, tx, ty) {
                        tx += dx;
                        ty += dy;
                    }
                }
            }
        }
        out
    }

    /// Move a piece, returning the captured piece if any. Pawns reaching the
    /// far rank promote to queens.
    fn apply(&mut self, from: Square, to: Square) -> Option<Piece> {
        let mut piece = match self.piece(from) {
            Some(p) => p,
            None => return None,
        };
        let captured = self.piece(to);
        let last_rank = if piece.side == Side::White { 0 } else { 7 };
        if piece.kind == PieceKind::Pawn && to.1 == last_rank {
            piece.kind = PieceKind::Queen;
        }
        self.board[from.1][from.0] = None;
        self.board[to.1][to.0] = Some(piece);
        captured
    }

    fn all_moves(&self, side: Side) -> Vec<(Square, Square)> {
        let mut out = Vec::new();
        for y in 0..8 {
            for x in 0..8 {
                if matches!(self.piece((x, y)), Some(p) if p.side == side) {
                    for to in self.moves_from((x, y)) {
                        out.push(((x, y), to));
                    }
                }
            }
        }
        out
    }

    /// Greedy computer move: take the most valuable capture available,
    /// otherwise any legal move, ties broken by the seeded rng.
    fn ai_move(&self, rng: &mut Rng) -> Option<(Square, Square)> {
        let moves = self.all_moves(Side::Black);
        if moves.is_empty() {
            return None;
        }
        let best_capture = moves
            .iter()
            .filter_map(|&(from, to)| self.piece(to).map(|p| (p.kind.capture_value(), from, to)))
            .max_by_key(|&(value, _, _)| value);
        if let Some((_, from, to)) = best_capture {
            return Some((from, to));
        }
        let pick = rng.next_int(moves.len() as u32) as usize;
        Some(moves[pick])
    }
}

fn square_rect(sq: Square) -> RectArea {
    RectArea::new(
        BOARD_X + sq.0 as f32 * SQUARE,
        BOARD_Y + sq.1 as f32 * SQUARE,
        SQUARE,
        SQUARE,
    )
}

fn square_at(p: Vec2) -> Option<Square> {
    let x = ((p.x - BOARD_X) / SQUARE).floor() as i32;
    let y = ((p.y - BOARD_Y) / SQUARE).floor() as i32;
    if (0..8).contains(&x) && (0..8).contains(&y) {
        Some((x as usize, y as usize))
    } else {
        None
    }
}

pub struct ChessScene {
    shell: MinigameShell,
    state: ChessState,
    rng: Rng,
    ai_timer: ActionQueue<()>,
}

impl ChessScene {
    pub fn new() -> Self {
        Self {
            shell: MinigameShell::new(
                ShellConfig {
                    title: "Chess",
                    instructions: "Click a white piece, then a square. Capture the black king!",
                    ..ShellConfig::default()
                },
                WORLD_W,
                WORLD_H,
            ),
            state: ChessState::new(),
            rng: Rng::new(1),
            ai_timer: ActionQueue::new(),
        }
    }

    fn reset(&mut self) {
        self.state = ChessState::new();
        self.ai_timer.clear();
    }

    fn handle_click(&mut self, ctx: &mut GameContext, sq: Square) {
        match self.state.selected {
            Some(from) if self.state.moves_from(from).contains(&sq) => {
                self.state.selected = None;
                let captured = self.state.apply(from, sq);
                ctx.add_points(1, source::CHESS);
                self.shell.add_round_score(1);
                if matches!(captured, Some(p) if p.kind == PieceKind::King) {
                    ctx.add_points(WIN_BONUS, "chessVictory");
                    self.shell.add_round_score(WIN_BONUS);
                    self.shell.end_round(true);
                    return;
                }
                self.state.awaiting_ai = true;
                self.ai_timer.push(AI_DELAY_SECS, ());
            }
            _ => {
                // (Re)select one of the player's own pieces.
                self.state.selected =
                    match self.state.piece(sq) {
                        Some(p) if p.side == Side::White => Some(sq),
                        _ => None,
                    };
            }
        }
    }

    fn run_ai(&mut self) {
        if let Some((from, to)) = self.state.ai_move(&mut self.rng) {
            let captured = self.state.apply(from, to);
            if matches!(captured, Some(p) if p.kind == PieceKind::King) {
                self.shell.end_round(false);
            }
        }
        self.state.awaiting_ai = false;
    }
}

impl Scene for ChessScene {
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

        if !self.ai_timer.tick(dt).is_empty() {
            self.run_ai();
        }

        if self.state.awaiting_ai {
            return;
        }
        if let Some(p) = ctx.input.click_pos() {
            if let Some(sq) = square_at(p) {
                ctx.input.consume_click();
                self.handle_click(ctx, sq);
            }
        }
    }

    fn render(&self, ctx: &GameContext, surface: &mut Surface) {
        for y in 0..8 {
            for x in 0..8 {
                let rect = square_rect((x, y));
                let light = (x + y) % 2 == 0;
                let mut color = if light {
                    Color::rgb(0.93, 0.85, 0.71)
                } else {
                    Color::rgb(0.48, 0.35, 0.26)
                };
                if self.state.selected == Some((x, y)) {
                    color = Color::YELLOW;
                }
                surface.fill_rect(rect.pos, rect.size, color);
            }
        }

        if let Some(from) = self.state.selected {
            for to in self.state.moves_from(from) {
                surface.fill_circle(square_rect(to).center(), 9.0, Color::GREEN);
            }
        }

        for y in 0..8 {
            for x in 0..8 {
                if let Some(piece) = self.state.piece((x, y)) {
                    let center = square_rect((x, y)).center();
                    let (fg, bg) = match piece.side {
                        Side::White => (Color::WHITE, Color::GRAY),
                        Side::Black => (Color::BLACK, Color::rgb(0.8, 0.75, 0.7)),
                    };
                    surface.fill_circle(center, SQUARE * 0.34, bg);
                    surface.text_centered(
                        piece.kind.letter(),
                        center + Vec2::new(0.0, 10.0),
                        30.0,
                        fg,
                    );
                }
            }
        }

        if self.state.awaiting_ai {
            surface.text_centered(
                "Thinking...",
                Vec2::new(WORLD_W / 2.0, BOARD_Y - 20.0),
                22.0,
                Color::WHITE,
            );
        }
        self.shell.render(ctx, surface);
    }
}
