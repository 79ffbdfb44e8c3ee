//! Walk a board through a short editing session and print the layout after
//! each step. Structured events land in `board_walkthrough.log` (JSON lines).
//!
//! Run with `cargo run --example board_walkthrough`.

use block_canvas::{
    BlockKind, Board, DragGesture, FileSink, LayoutConfig, Logger, Position, ResizeGesture, Result,
    Size,
};

fn print_board(label: &str, board: &Board) {
    let bounds = board.bounds();
    println!("== {label} (canvas {}x{})", bounds.width, bounds.height);
    for block in board.blocks() {
        let r = block.rect;
        let content = if block.has_placeholder() {
            "(placeholder)"
        } else {
            block.content.as_str()
        };
        println!(
            "  {:<9} {:<8} at ({:>4},{:>4}) size {}x{}  {}",
            block.id.to_string(),
            format!("{:?}", block.kind),
            r.x,
            r.y,
            r.width,
            r.height,
            content
        );
    }
}

fn main() -> Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => LayoutConfig::load(path)?,
        None => LayoutConfig::default(),
    };

    let sink = FileSink::new("board_walkthrough.log", 1024 * 1024)?;
    println!("logging to {}", sink.path().display());
    let mut board = Board::new(Size::new(1000, 700), config).with_logger(Logger::new(sink));

    let chart = board.add_block(BlockKind::Diagram, "");
    let photo = board.add_block(BlockKind::Image, "https://example.com/photo.png");
    board.add_block(BlockKind::Image, "");
    board.add_block_sized(BlockKind::Diagram, "", Size::new(400, 240));
    print_board("after adding four blocks", &board);

    // Drag the chart onto the photo's slot.
    let start = board.get(chart).map(|block| block.rect);
    let target_slot = board.get(photo).map(|block| block.rect.position());
    if let (Some(start), Some(slot)) = (start, target_slot) {
        let grab = Position::new(start.x + 10, start.y + 10);
        let drag = DragGesture::begin(&start, grab);
        let pointer = Position::new(slot.x + 12, slot.y + 7);
        let target = drag.target(pointer, board.bounds(), board.config().gap);
        let report = board.move_block(chart, target)?;
        println!("drag displaced {} block(s)", report.displaced.len());
    }
    print_board("after dragging the chart", &board);

    // Stretch the photo to the right and down in a few pointer steps.
    if let Some(start) = board.get(photo).map(|block| block.rect) {
        let resize = ResizeGesture::begin(&start, Position::new(start.right(), start.bottom()));
        let config = *board.config();
        for step in 1..=5 {
            let pointer = Position::new(start.right() + step * 30, start.bottom() + step * 20);
            let size = resize.target(pointer, board.bounds(), &config);
            board.resize_block(photo, size)?;
        }
    }
    print_board("after resizing the photo", &board);

    let report = board.resize_canvas(Size::new(700, 700))?;
    println!("narrowing the canvas displaced {} block(s)", report.displaced.len());
    print_board("after narrowing the canvas", &board);

    let repaint = board.take_dirty();
    println!("{} block(s) need repainting", repaint.len());
    board.log_metrics();
    println!("{:?}", board.metrics());
    Ok(())
}
