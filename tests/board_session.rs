//! End-to-end sessions: gestures feeding a board, the way a UI drives it.

use std::sync::Arc;

use block_canvas::{
    BlockKind, Board, DragGesture, LayoutConfig, Logger, MemorySink, Position, Rect,
    ResizeGesture, Size, overlaps,
};

fn assert_apart(board: &Board) {
    let rects = board.rects();
    for (a_id, a) in &rects {
        for (b_id, b) in &rects {
            if a_id < b_id {
                assert!(!overlaps(a, b, board.config().gap), "{a_id} overlaps {b_id}");
            }
        }
    }
}

#[test]
fn drag_session_swaps_two_blocks() {
    let mut board = Board::new(Size::new(800, 600), LayoutConfig::default());
    let chart = board.add_block(BlockKind::Diagram, "");
    let photo = board.add_block(BlockKind::Image, "https://img/photo.png");

    let start = board.get(chart).unwrap().rect;
    let drag = DragGesture::begin(&start, Position::new(40, 40));
    let target = drag.target(Position::new(365, 45), board.bounds(), board.config().gap);
    assert_eq!(target, Position::new(340, 20));

    board.move_block(chart, target).unwrap();
    assert_eq!(board.get(chart).unwrap().rect.position(), Position::new(340, 20));
    assert_eq!(board.get(photo).unwrap().rect.position(), Position::new(20, 20));
    assert_apart(&board);
}

#[test]
fn live_resize_updates_on_every_step() {
    let mut board = Board::new(Size::new(800, 600), LayoutConfig::default());
    let first = board.add_block(BlockKind::Image, "");
    board.add_block(BlockKind::Image, "");
    board.add_block(BlockKind::Diagram, "");
    let config = *board.config();

    let start = board.get(first).unwrap().rect;
    let resize = ResizeGesture::begin(&start, Position::new(320, 220));
    for step in 1..=8 {
        let pointer = Position::new(320 + step * 20, 220 + step * 15);
        let size = resize.target(pointer, board.bounds(), &config);
        board.resize_block(first, size).unwrap();
        assert_apart(&board);
    }

    assert_eq!(board.get(first).unwrap().rect, Rect::new(20, 20, 460, 320));
    assert!(board.metrics().resolves >= 1);
}

#[test]
fn crowded_canvas_grows_downward() {
    let mut board = Board::new(Size::new(360, 500), LayoutConfig::default());
    board.add_block(BlockKind::Image, "");
    board.add_block(BlockKind::Image, "");
    let third = board.add_block(BlockKind::Image, "");

    assert_eq!(board.get(third).unwrap().rect.position(), Position::new(20, 460));
    assert_eq!(board.bounds(), Size::new(360, 680));
    assert_eq!(board.metrics().canvas_growths, 1);
    assert_apart(&board);
}

#[test]
fn session_log_tracks_every_operation() {
    let sink = Arc::new(MemorySink::new());
    let mut board = Board::new(Size::new(800, 600), LayoutConfig::default())
        .with_logger(Logger::from_arc(sink.clone()));

    let a = board.add_block(BlockKind::Image, "");
    let b = board.add_block(BlockKind::Image, "");
    board.resize_block(b, Size::new(400, 200)).unwrap();
    board.remove_block(a).unwrap();

    let messages = sink.messages();
    assert_eq!(
        messages,
        vec!["block_added", "block_added", "block_resized", "block_removed"]
    );
    assert!(sink.events().iter().all(|event| event.target == "canvas::board"));
}
