use classic_tetris::core::{Board, GameState, Position, Tetromino};
use classic_tetris::term::{
    encode_diff_into, encode_full_into, FrameBuffer, GameView, Rgb, Viewport,
};
use classic_tetris::types::{GameAction, PieceKind};

#[test]
fn term_view_renders_border_corners() {
    let snap = GameState::new(1).snapshot();
    let view = GameView::default();

    // With cell_w=2 and cell_h=1:
    // board pixels = 10*2 by 20*1 => 20x20
    // plus border => 22x22
    let fb = view.render(&snap, Viewport::new(22, 22));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_locked_cell_as_two_chars_wide() {
    let board = Board::from_ascii(&["I........."]);
    let snap = GameState::new(1).with_board(board).snapshot();

    let view = GameView::default();
    let fb = view.render(&snap, Viewport::new(22, 22));

    // Inside border: (1,1) origin. Each cell is 2 chars wide.
    let (x0, y0) = (1, 1 + 19);
    assert_eq!(fb.get(x0, y0).unwrap().ch, '█');
    assert_eq!(fb.get(x0 + 1, y0).unwrap().ch, '█');
    assert_eq!(fb.get(x0, y0).unwrap().style.fg, Rgb::new(0, 240, 240));
    assert_eq!(fb.get(x0 + 2, y0).unwrap().ch, '·');
}

#[test]
fn term_view_paints_active_piece() {
    let snap = GameState::new(1)
        .with_active(Tetromino::new(PieceKind::O), Position::spawn())
        .snapshot();
    let fb = GameView::default().render(&snap, Viewport::new(22, 22));

    // Spawn column 4 => x = 1 + 4*2.
    assert_eq!(fb.get(9, 1).unwrap().ch, '█');
    assert_eq!(fb.get(12, 2).unwrap().ch, '█');
    assert_eq!(fb.get(9, 1).unwrap().style.fg, Rgb::new(240, 240, 0));
}

#[test]
fn term_view_shows_stats_panel() {
    let snap = GameState::new(1).with_stats(1200, 12, 1).snapshot();
    let fb = GameView::default().render(&snap, Viewport::new(80, 24));
    let text = fb.text();

    assert!(text.contains("NEXT"));
    assert!(text.contains("SCORE"));
    assert!(text.contains("1200"));
    assert!(text.contains("LINES"));
    assert!(text.contains("LEVEL"));
}

#[test]
fn term_view_overlays_pause_and_game_over() {
    let view = GameView::default();
    let vp = Viewport::new(80, 24);

    let paused = GameState::new(1).apply(GameAction::TogglePause).snapshot();
    assert!(view.render(&paused, vp).text().contains("PAUSED"));

    let mut board = Board::new();
    for y in 1..20 {
        for x in 0..9 {
            board.set(x, y, Some(PieceKind::Z));
        }
    }
    let over = GameState::new(1)
        .with_board(board)
        .with_active(Tetromino::new(PieceKind::O), Position::new(4, -1))
        .with_next(Some(Tetromino::new(PieceKind::O)))
        .apply(GameAction::HardDrop);
    assert!(over.game_over());

    let text = view.render(&over.snapshot(), vp).text();
    assert!(text.contains("GAME OVER"));
    assert!(text.contains("ENTER: RESTART"));
    assert!(!text.contains("PAUSED"));
}

#[test]
fn term_view_cell_width_is_configurable() {
    let board = Board::from_ascii(&["I........."]);
    let snap = GameState::new(1).with_board(board).snapshot();
    let view = GameView::new(1, 1);
    let fb = view.render(&snap, Viewport::new(12, 22));

    assert_eq!(fb.get(11, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(1, 20).unwrap().ch, '█');
    assert_eq!(fb.get(2, 20).unwrap().ch, '·');
}

#[test]
fn renderer_diff_is_smaller_than_full_redraw() {
    let view = GameView::default();
    let vp = Viewport::new(80, 24);
    let state = GameState::new(9);
    let a = view.render(&state.snapshot(), vp);
    let b = view.render(&state.apply(GameAction::MoveLeft).snapshot(), vp);

    let mut full = Vec::new();
    encode_full_into(&b, &mut full).unwrap();
    let mut diff = Vec::new();
    encode_diff_into(&a, &b, &mut diff).unwrap();

    assert!(!diff.is_empty());
    assert!(diff.len() < full.len());

    let mut unchanged = Vec::new();
    encode_diff_into(&b, &b, &mut unchanged).unwrap();
    assert!(unchanged.len() < diff.len());
}

#[test]
fn render_into_resizes_buffer() {
    let mut fb = FrameBuffer::new(0, 0);
    GameView::default().render_into(&GameState::new(1).snapshot(), Viewport::new(40, 30), &mut fb);
    assert_eq!((fb.width(), fb.height()), (40, 30));
}
