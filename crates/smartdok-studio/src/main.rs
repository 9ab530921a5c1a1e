mod board;

use anyhow::Context;
use smartdok_canvas::coords::{Dimension, Point};
use smartdok_canvas::logging::{init_logging, LoggingConfig};
use smartdok_canvas::paint::{Color, Paint};
use smartdok_canvas::surface::CanvasConfig;
use smartdok_canvas::{CanvasMode, Command, ShapeKind};

use board::Board;

const BOARD_WIDTH: f32 = 72.0;
const BOARD_HEIGHT: f32 = 36.0;
const DEVICE_PIXEL_RATIO: f32 = 1.0;

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    println!();
    println!("  ╔════════════════════════════════════════╗");
    println!("  ║          SMARTDOK STUDIO v0.1          ║");
    println!("  ║   software raster  ·  drawing commands ║");
    println!("  ╚════════════════════════════════════════╝");
    println!();

    // optional font file for real glyphs; placeholder boxes otherwise
    let font_bytes = match std::env::args().nth(1) {
        Some(path) => Some(std::fs::read(&path).with_context(|| format!("reading font {path}"))?),
        None => None,
    };

    let mut board = Board::new(CanvasConfig {
        size: Dimension::new(BOARD_WIDTH, BOARD_HEIGHT),
        device_pixel_ratio: DEVICE_PIXEL_RATIO,
        font_bytes,
    })?;

    run_session(&mut board)?;

    println!("{}", board.ascii_preview());

    let stats = board.stats();
    let visible = board.commands().iter().filter(|c| !c.borrow().is_erased()).count();
    println!("  Commands  >  {} ({} visible)", board.commands().len(), visible);
    println!("  Repaints  >  {} full, {} foreground", stats.full, stats.foreground);
    println!("  Undo      >  {}", if board.can_undo() { "available" } else { "empty" });
    println!("  Redo      >  {}", if board.can_redo() { "available" } else { "empty" });
    println!();
    Ok(())
}

/// Scripted drawing session exercising every command kind.
fn run_session(board: &mut Board) -> anyhow::Result<()> {
    board.set_background(Paint::css("#eeeeee").context("background color")?);

    // ── shapes ────────────────────────────────────────────────────────────
    board.set_mode(CanvasMode::Draw);
    board.set_stroke(Paint::Solid(Color::black()));
    board.set_line_width(1.0);

    board.set_fill(Paint::css("#888888").context("rectangle fill")?);
    board.set_tool(ShapeKind::Rectangle);
    board.stroke_through(&[Point::new(3.0, 3.0), Point::new(12.0, 8.0), Point::new(18.0, 12.0)])?;

    // transparent fill: an outline only
    board.set_fill(Paint::css("rgba(0, 0, 0, 0)").context("circle fill")?);
    board.set_tool(ShapeKind::Circle);
    board.stroke_through(&[Point::new(24.0, 10.0), Point::new(32.0, 10.0)])?;

    board.set_fill(Paint::css("#444444").context("triangle fill")?);
    board.set_tool(ShapeKind::Triangle);
    board.stroke_through(&[Point::new(44.0, 4.0), Point::new(56.0, 16.0), Point::new(64.0, 16.0)])?;

    board.set_tool(ShapeKind::Pencil);
    let zigzag: Vec<Point> = (0..12)
        .map(|i| Point::new(4.0 + i as f32 * 5.0, if i % 2 == 0 { 22.0 } else { 26.0 }))
        .collect();
    board.stroke_through(&zigzag)?;

    board.set_fill(Paint::Solid(Color::black()));
    board.set_font("8px sans-serif");
    board.set_text("smartdok");
    board.set_tool(ShapeKind::Text);
    board.stroke_through(&[Point::new(4.0, 28.0)])?;

    // ── edits ─────────────────────────────────────────────────────────────
    board.set_mode(CanvasMode::Move);
    board.stroke_through(&[Point::new(8.0, 6.0), Point::new(10.0, 8.0), Point::new(12.0, 10.0)])?;

    board.set_mode(CanvasMode::Erase);
    board.stroke_through(&[Point::new(54.0, 12.0)])?;
    board.undo();
    board.redo();
    board.undo();

    board
        .resize_background(Point::new(BOARD_WIDTH, BOARD_HEIGHT))
        .context("resizing background")?;
    Ok(())
}
