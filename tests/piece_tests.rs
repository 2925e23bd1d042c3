//! Piece tests - rotation, collision and merging

use proptest::prelude::*;

use tui_blockfall::core::{Board, Collision, PatternError, Piece, ShapeKind, Side, Step};
use tui_blockfall::types::Color;

const BLUE: Color = Color::new(80, 120, 220);
const GREY: Color = Color::new(128, 128, 128);

#[test]
fn test_clockwise_rotation_of_l_shape() {
    let mut piece = Piece::from_rows(&[[1u8, 1, 1], [1, 0, 0]], BLUE).unwrap();
    piece.rotate(1);
    assert_eq!((piece.width(), piece.height()), (2, 3));
    assert_eq!(piece.to_rows(), vec![vec![1, 1], vec![0, 1], vec![0, 1]]);
}

#[test]
fn test_counter_clockwise_rotation_of_l_shape() {
    let mut piece = Piece::from_rows(&[[1u8, 1, 1], [1, 0, 0]], BLUE).unwrap();
    piece.rotate(-1);
    assert_eq!(piece.to_rows(), vec![vec![1, 0], vec![1, 0], vec![1, 1]]);
}

#[test]
fn test_zero_rotation_is_identity() {
    let mut piece = Piece::from_shape(ShapeKind::S, BLUE);
    let before = piece.to_rows();
    piece.rotate(0);
    assert_eq!(piece.to_rows(), before);
}

#[test]
fn test_rejects_bad_patterns() {
    let ragged: [&[u8]; 2] = [&[1, 1], &[1]];
    assert_eq!(Piece::from_rows(&ragged, BLUE).unwrap_err(), PatternError::Ragged);

    let no_rows: [[u8; 2]; 0] = [];
    assert_eq!(Piece::from_rows(&no_rows, BLUE).unwrap_err(), PatternError::Empty);

    let wide = [[1u8; 5]];
    assert!(matches!(
        Piece::from_rows(&wide, BLUE),
        Err(PatternError::TooLarge { width: 5, height: 1 })
    ));
}

#[test]
fn test_collision_precedence() {
    let board = Board::new(4, 4);
    let piece = Piece::from_shape(ShapeKind::O, BLUE).at(0, 2);

    // Left and bottom both overflow; bottom is reported first.
    assert_eq!(piece.collides(&board, -1, 1), Collision::Wall(Side::Bottom));
    assert_eq!(piece.collides(&board, -1, -3), Collision::Wall(Side::Top));
    assert_eq!(piece.collides(&board, -1, 0), Collision::Wall(Side::Left));
    assert_eq!(piece.collides(&board, 3, 0), Collision::Wall(Side::Right));
    assert_eq!(piece.collides(&board, 0, 0), Collision::None);
}

#[test]
fn test_collision_with_settled_cells() {
    let mut board = Board::new(4, 4);
    board.set(1, 3, Some(GREY));
    let piece = Piece::from_shape(ShapeKind::O, BLUE).at(0, 1);

    assert_eq!(piece.collides(&board, 0, 1), Collision::Cells);
    assert!(piece.collides(&board, 0, 0).is_clear());
    assert!(piece.collides(&board, 0, 1).is_blocked());
}

#[test]
fn test_update_falls_then_merges() {
    let mut board = Board::new(4, 4);
    let mut piece = Piece::from_shape(ShapeKind::O, BLUE).at(1, 1);

    assert_eq!(piece.update(&mut board), Step::Fell);
    assert_eq!(piece.y(), 2);
    assert_eq!(piece.update(&mut board), Step::Merged);
    assert!(piece.is_done());
    assert_eq!(board.filled_count(), 4);
    assert_eq!(board.get(1, 3), Some(Some(BLUE)));
}

#[test]
fn test_update_on_done_piece_leaves_board_alone() {
    let mut board = Board::new(4, 4);
    let mut piece = Piece::from_shape(ShapeKind::O, BLUE).at(0, 2);
    assert_eq!(piece.update(&mut board), Step::Merged);

    let before = board.to_rows();
    assert_eq!(piece.update(&mut board), Step::Idle);
    assert_eq!(board.to_rows(), before);
}

proptest! {
    #[test]
    fn prop_rotation_round_trips(kind_idx in 0usize..ShapeKind::ALL.len(), k in -8i32..=8) {
        let original = Piece::from_shape(ShapeKind::ALL[kind_idx], BLUE);
        let mut piece = original.clone();

        piece.rotate(k);
        piece.rotate(-k);

        prop_assert_eq!(piece.to_rows(), original.to_rows());
        prop_assert_eq!((piece.width(), piece.height()), (original.width(), original.height()));
    }

    #[test]
    fn prop_four_quarter_turns_are_identity(kind_idx in 0usize..ShapeKind::ALL.len(), dir in prop::sample::select(vec![-1i32, 1])) {
        let original = Piece::from_shape(ShapeKind::ALL[kind_idx], BLUE);
        let mut piece = original.clone();
        for _ in 0..4 {
            piece.rotate(dir);
        }
        prop_assert_eq!(piece.to_rows(), original.to_rows());
    }
}
