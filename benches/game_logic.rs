use criterion::{black_box, criterion_group, criterion_main, Criterion};
use classic_tetris::core::{
    check_collision, clear_lines, rotate_piece, Board, GameState, Position, Tetromino,
};
use classic_tetris::term::{GameView, Viewport};
use classic_tetris::types::{GameAction, PieceKind};

fn bench_tick(c: &mut Criterion) {
    let state = GameState::new(12345);

    c.bench_function("gravity_tick", |b| {
        b.iter(|| black_box(&state).tick())
    });
}

fn bench_line_clear(c: &mut Criterion) {
    let mut board = Board::new();
    // Fill bottom 4 rows
    for y in 16..20 {
        for x in 0..10 {
            board.set(x, y, Some(PieceKind::I));
        }
    }

    c.bench_function("clear_4_lines", |b| {
        b.iter(|| clear_lines(black_box(&board)))
    });
}

fn bench_collision(c: &mut Criterion) {
    let board = Board::from_ascii(&["ZZZZ..ZZZZ", "JJJJ..JJJJ", "LLLL..LLLL"]);
    let piece = Tetromino::new(PieceKind::T);

    c.bench_function("check_collision", |b| {
        b.iter(|| check_collision(black_box(&board), black_box(&piece), Position::new(3, 16)))
    });
}

fn bench_hard_drop(c: &mut Criterion) {
    let state = GameState::new(12345);

    c.bench_function("hard_drop_and_lock", |b| {
        b.iter(|| black_box(&state).apply(GameAction::HardDrop))
    });
}

fn bench_rotate(c: &mut Criterion) {
    let piece = Tetromino::new(PieceKind::L);

    c.bench_function("rotate_piece", |b| {
        b.iter(|| rotate_piece(black_box(&piece)))
    });
}

fn bench_render(c: &mut Criterion) {
    let snap = GameState::new(12345).snapshot();
    let view = GameView::default();
    let mut fb = view.render(&snap, Viewport::new(80, 24));

    c.bench_function("render_80x24", |b| {
        b.iter(|| view.render_into(black_box(&snap), Viewport::new(80, 24), &mut fb))
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_collision,
    bench_hard_drop,
    bench_rotate,
    bench_render
);
criterion_main!(benches);
