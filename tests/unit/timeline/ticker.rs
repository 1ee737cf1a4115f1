use super::*;
use crate::{
    foundation::core::Rgba8,
    source::text::TextSource,
    test_support::{CellGlyphs, fixture},
};

fn config(speed: i64) -> TickerConfig {
    TickerConfig {
        canvas: Canvas::new(100, 40).unwrap(),
        y: 12,
        speed,
        separator: "|".to_owned(),
        style: LineStyle {
            primary_px: 10.0,
            secondary_px: 7.0,
            text: Rgba8::WHITE,
            background: Rgba8::BLACK,
        },
    }
}

fn xs(plan: &FramePlan) -> Vec<(u32, i64)> {
    plan.placements.iter().map(|p| (p.buffer.0, p.x)).collect()
}

#[test]
fn first_frame_starts_off_the_right_edge() {
    let path = fixture("unit_ticker", "first.txt", "AB\nCD\n");
    let mut source = TextSource::new(&path);
    let mut glyphs = CellGlyphs::new(10);
    let mut ctx = SceneContext {
        source: &mut source,
        glyphs: &mut glyphs,
    };
    let mut ticker = Ticker::new(config(5));

    let plan = ticker.advance(&mut ctx).unwrap();
    assert!(plan.is_empty());
    assert_eq!(ticker.x_pos(), 95);
    assert_eq!(ticker.text_pos(), 0);
    assert_eq!(glyphs.rendered, vec!["AB|", "CD|"]);
}

#[test]
fn head_chunk_moves_left_by_speed_each_frame() {
    let path = fixture("unit_ticker", "linear.txt", "AB\nCD\n");
    let mut source = TextSource::new(&path);
    let mut glyphs = CellGlyphs::new(10);
    let mut ctx = SceneContext {
        source: &mut source,
        glyphs: &mut glyphs,
    };
    let mut ticker = Ticker::new(config(5));

    ticker.advance(&mut ctx).unwrap();
    for k in 1..=20i64 {
        let plan = ticker.advance(&mut ctx).unwrap();
        let first = plan.placements[0];
        assert_eq!(first.buffer, BufferId(0));
        assert_eq!(first.x, 100 - 5 * k);
        assert_eq!(first.y, 12);
        assert!(plan.placements.iter().all(|p| p.x < 100));
    }
}

#[test]
fn scrolled_out_head_hands_over_to_next_line() {
    let path = fixture("unit_ticker", "wrap.txt", "AB\nCD\n");
    let mut source = TextSource::new(&path);
    let mut glyphs = CellGlyphs::new(10);
    let mut ctx = SceneContext {
        source: &mut source,
        glyphs: &mut glyphs,
    };
    let mut ticker = Ticker::new(config(5));

    for _ in 0..27 {
        ticker.advance(&mut ctx).unwrap();
    }
    assert_eq!(ticker.x_pos(), -35);

    let plan = ticker.advance(&mut ctx).unwrap();
    assert_eq!(xs(&plan), vec![(0, -35), (1, -5), (0, 25), (1, 55), (0, 85)]);
    assert_eq!(ticker.text_pos(), 1);
    assert_eq!(ticker.x_pos(), -10);

    let plan = ticker.advance(&mut ctx).unwrap();
    assert_eq!(plan.placements[0].buffer, BufferId(1));
    assert_eq!(plan.placements[0].x, -10);
}

#[test]
fn text_pos_stays_in_range_over_many_frames() {
    let path = fixture("unit_ticker", "range.txt", "A\nB\nC\n");
    let mut source = TextSource::new(&path);
    let mut glyphs = CellGlyphs::new(10);
    let mut ctx = SceneContext {
        source: &mut source,
        glyphs: &mut glyphs,
    };
    let mut ticker = Ticker::new(config(7));

    for _ in 0..500 {
        let plan = ticker.advance(&mut ctx).unwrap();
        assert!(ticker.text_pos() < 3);
        assert!(plan.placements.iter().all(|p| p.buffer.0 < 3));
        assert!(ticker.buffer(BufferId(ticker.text_pos() as u32)).is_some());
    }
}

#[test]
fn file_change_restarts_from_right_edge() {
    let path = fixture("unit_ticker", "restart.txt", "AB\nCD\n");
    let mut source = TextSource::new(&path);
    let mut glyphs = CellGlyphs::new(10);
    let mut ticker = Ticker::new(config(5));
    {
        let mut ctx = SceneContext {
            source: &mut source,
            glyphs: &mut glyphs,
        };
        for _ in 0..40 {
            ticker.advance(&mut ctx).unwrap();
        }
    }
    assert_ne!(ticker.text_pos(), 0);

    std::fs::write(&path, "LONGER LINE\nCD\nEF\n").unwrap();
    let mut ctx = SceneContext {
        source: &mut source,
        glyphs: &mut glyphs,
    };
    let plan = ticker.advance(&mut ctx).unwrap();
    assert!(plan.is_empty());
    assert_eq!(ticker.text_pos(), 0);
    assert_eq!(ticker.x_pos(), 95);
    assert_eq!(ticker.buffer(BufferId(0)).unwrap().width(), 120);
}

#[test]
fn empty_source_draws_nothing() {
    let path = fixture("unit_ticker", "empty.txt", "\n\n");
    let mut source = TextSource::new(&path);
    let mut glyphs = CellGlyphs::new(10);
    let mut ctx = SceneContext {
        source: &mut source,
        glyphs: &mut glyphs,
    };
    let mut ticker = Ticker::new(config(5));
    for _ in 0..50 {
        assert!(ticker.advance(&mut ctx).unwrap().is_empty());
    }
}

#[test]
fn zero_speed_freezes_the_marquee() {
    let path = fixture("unit_ticker", "frozen.txt", "AB\nCD\n");
    let mut source = TextSource::new(&path);
    let mut glyphs = CellGlyphs::new(10);
    let mut ctx = SceneContext {
        source: &mut source,
        glyphs: &mut glyphs,
    };
    let mut ticker = Ticker::new(config(0));
    let a = ticker.advance(&mut ctx).unwrap();
    let b = ticker.advance(&mut ctx).unwrap();
    assert_eq!(a.placements, b.placements);
    assert_eq!(ticker.x_pos(), 100);
}

#[test]
fn missing_file_on_first_frame_is_fatal() {
    let mut source = TextSource::new("target/unit_ticker/missing.txt");
    let mut glyphs = CellGlyphs::new(10);
    let mut ctx = SceneContext {
        source: &mut source,
        glyphs: &mut glyphs,
    };
    let mut ticker = Ticker::new(config(5));
    assert!(ticker.advance(&mut ctx).is_err());
}
