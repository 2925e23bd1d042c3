use tui_blockfall::core::{Game, GameConfig, Piece, ShapeKind, SimpleRng};
use tui_blockfall::term::{AnchorY, FrameBuffer, GameView, Viewport};
use tui_blockfall::types::Color;

const GREY: Color = Color::new(128, 128, 128);
const RED: Color = Color::new(220, 80, 80);

fn game() -> Game<SimpleRng> {
    Game::with_rng(GameConfig::default(), SimpleRng::new(1)).unwrap()
}

fn screen_text(fb: &FrameBuffer) -> String {
    (0..fb.height())
        .map(|y| fb.row_text(y))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn term_view_renders_border_corners() {
    let snap = game().snapshot();
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
fn term_view_renders_settled_cell_as_two_chars_wide() {
    let mut game = game();
    game.board_mut().set(0, 19, Some(GREY));
    let mut snap = game.snapshot();
    snap.active = None;

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));

    // Inside border: (1,1) origin. Each cell is 2 chars wide.
    let (x0, y0) = (1, 1 + 19);
    for x in [x0, x0 + 1] {
        let cell = fb.get(x, y0).unwrap();
        assert_eq!(cell.ch, '█');
        assert_eq!(cell.style.fg, GREY);
    }
    assert_eq!(fb.get(x0 + 2, y0).unwrap().ch, '·');
}

#[test]
fn term_view_draws_active_piece_in_its_color() {
    let mut game = game();
    game.place_piece(Piece::from_shape(ShapeKind::O, RED).at(4, 0));

    let fb = GameView::default().render(&game.snapshot(), Viewport::new(22, 22));

    let cell = fb.get(1 + 4 * 2, 1).unwrap();
    assert_eq!(cell.ch, '█');
    assert_eq!(cell.style.fg, RED);
    assert_eq!(fb.get(1 + 6 * 2, 1).unwrap().ch, '·');
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let mut snap = game().snapshot();
    snap.score = 1234;
    snap.high_score = 5678;
    snap.speed = 135;

    let fb = GameView::default()
        .with_anchor_y(AnchorY::Top)
        .render(&snap, Viewport::new(60, 22));
    let all = screen_text(&fb);

    for needle in ["SCORE", "1234", "HIGH", "5678", "SPEED", "135"] {
        assert!(all.contains(needle), "missing {needle} in:\n{all}");
    }
}

#[test]
fn term_view_omits_side_panel_when_narrow() {
    let fb = GameView::default().render(&game().snapshot(), Viewport::new(22, 22));
    assert!(!screen_text(&fb).contains("SCORE"));
}

#[test]
fn term_view_shows_game_over_overlay() {
    let mut game = game();
    game.board_mut().set(5, 0, Some(GREY));
    game.place_piece(Piece::from_shape(ShapeKind::O, RED).at(4, 0));
    assert!(game.is_game_over());

    let fb = GameView::default().render(&game.snapshot(), Viewport::new(40, 24));
    let all = screen_text(&fb);
    assert!(all.contains("GAME OVER"));
    assert!(all.contains("move to restart"));
}

#[test]
fn term_view_reuses_framebuffer_across_resizes() {
    let snap = game().snapshot();
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);

    view.render_into(&snap, Viewport::new(80, 24), &mut fb);
    assert_eq!((fb.width(), fb.height()), (80, 24));

    view.render_into(&snap, Viewport::new(30, 22), &mut fb);
    assert_eq!((fb.width(), fb.height()), (30, 22));
}
