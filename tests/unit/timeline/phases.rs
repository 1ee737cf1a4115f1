use super::*;
use crate::{
    foundation::core::Rgba8,
    source::text::TextSource,
    test_support::{CellGlyphs, fixture},
};

const SCORES: &str = "Game A\n100 ALICE\nGame B\n200 BOB\n";

fn config(speed: u64, debug: DebugFrames) -> PhaseCycleConfig {
    PhaseCycleConfig {
        canvas: Canvas::new(640, 480).unwrap(),
        title_y: 240,
        score_y: 320,
        speed,
        style: LineStyle {
            primary_px: 10.0,
            secondary_px: 7.0,
            text: Rgba8::WHITE,
            background: Rgba8::BLACK,
        },
        debug,
        random_start: false,
    }
}

fn from_zero() -> DebugFrames {
    DebugFrames {
        start: Some(0),
        end: None,
    }
}

#[test]
fn quarter_is_always_in_range() {
    let frames_max = 1280;
    for frame in 0..frames_max {
        assert!(quarter(frame, frames_max) <= 3);
    }
    assert_eq!(quarter(319, frames_max), 0);
    assert_eq!(quarter(320, frames_max), 1);
    assert_eq!(quarter(640, frames_max), 2);
    assert_eq!(quarter(1279, frames_max), 3);
    assert_eq!(quarter(5000, frames_max), 3);
}

#[test]
fn phases_follow_quarters() {
    assert_eq!(phase_for(0, 1280), Phase::BuildUp);
    assert_eq!(phase_for(320, 1280), Phase::Hold);
    assert_eq!(phase_for(639, 1280), Phase::Hold);
    assert_eq!(phase_for(640, 1280), Phase::ExitAccelerating);
    assert_eq!(phase_for(1279, 1280), Phase::ExitAccelerating);
}

#[test]
fn exit_motion_matches_closed_form() {
    let mut m = ExitMotion::for_cycle(0);
    for n in 0..200u32 {
        let n_f = f64::from(n);
        let speed = EXIT_SPEED + n_f * EXIT_ACCEL;
        let x = EXIT_SPEED * n_f + EXIT_ACCEL * n_f * (n_f - 1.0) / 2.0;
        assert!((m.x_speed - speed).abs() < 1e-9, "speed at {n}");
        assert!((m.x - x).abs() < 1e-9, "x at {n}");
        m.step();
    }
}

#[test]
fn exit_direction_alternates_per_pair() {
    assert_eq!(ExitMotion::for_cycle(0).x_speed, 10.5);
    assert_eq!(ExitMotion::for_cycle(0).x_accel, -0.35);
    assert_eq!(ExitMotion::for_cycle(2).x_speed, -10.5);
    assert_eq!(ExitMotion::for_cycle(2).x_accel, 0.35);
    assert_eq!(ExitMotion::for_cycle(4).x_speed, 10.5);
}

#[test]
fn exit_position_truncates_toward_zero() {
    let m = ExitMotion {
        x: -3.7,
        x_speed: 0.0,
        x_accel: 0.0,
    };
    assert_eq!(m.x_px(), -3);
    assert!(m.is_visible(4));
    assert!(!m.is_visible(3));
}

#[test]
fn skip_offset_centers_the_start() {
    assert_eq!(start_skip(640, 60, 90), 275);
    assert_eq!(start_skip(640, 648, 90), 0);
    assert_eq!(start_skip(640, 640, 640), 0);
}

#[test]
fn bootstrap_starts_after_the_skip() {
    let path = fixture("unit_phases", "skip.txt", SCORES);
    let mut source = TextSource::new(&path);
    let mut glyphs = CellGlyphs::new(10);
    let mut ctx = SceneContext {
        source: &mut source,
        glyphs: &mut glyphs,
    };
    let mut cycle = PhaseCycle::new(config(1, DebugFrames::default()));

    let plan = cycle.advance(&mut ctx).unwrap();
    assert_eq!(plan.frame, 275);
    assert_eq!(plan.placements[0], Placement::at(TITLE, 365, 240));
    assert_eq!(cycle.frames_max(), 1280);
    assert_eq!(cycle.buffer(TITLE).unwrap().width(), 60);
    assert_eq!(cycle.buffer(SCORE_LINE).unwrap().width(), 640);
    assert_eq!(cycle.buffer(LEFT_HALF).unwrap().width(), 320);
    assert_eq!(cycle.buffer(RIGHT_HALF).unwrap().width(), 320);
    assert!(cycle.buffer(BufferId(4)).is_none());
}

#[test]
fn build_up_converges_on_the_center() {
    let path = fixture("unit_phases", "build.txt", SCORES);
    let mut source = TextSource::new(&path);
    let mut glyphs = CellGlyphs::new(10);
    let mut ctx = SceneContext {
        source: &mut source,
        glyphs: &mut glyphs,
    };
    let mut cycle = PhaseCycle::new(config(1, from_zero()));

    let last = (0..320)
        .map(|_| cycle.advance(&mut ctx).unwrap())
        .last()
        .unwrap();
    assert_eq!(last.frame, 319);
    assert_eq!(
        last.placements[1..],
        [
            Placement::at(LEFT_HALF, 0, 320),
            Placement::at(RIGHT_HALF, 320, 320)
        ]
    );

    // the score "100 ALICE" covers columns 275..365 of the full line
    let white = Some([255, 255, 255, 255]);
    let black = Some([0, 0, 0, 255]);
    let left = cycle.buffer(LEFT_HALF).unwrap();
    assert_eq!(left.pixel(300, 0), white);
    assert_eq!(left.pixel(200, 0), black);
    let right = cycle.buffer(RIGHT_HALF).unwrap();
    assert_eq!(right.pixel(10, 0), white);
    assert_eq!(right.pixel(50, 0), black);
}

#[test]
fn hold_shows_the_whole_line() {
    let path = fixture("unit_phases", "hold.txt", SCORES);
    let mut source = TextSource::new(&path);
    let mut glyphs = CellGlyphs::new(10);
    let mut ctx = SceneContext {
        source: &mut source,
        glyphs: &mut glyphs,
    };
    let debug = DebugFrames {
        start: Some(320),
        end: None,
    };
    let mut cycle = PhaseCycle::new(config(1, debug));
    let plan = cycle.advance(&mut ctx).unwrap();
    assert_eq!(
        plan.placements,
        vec![
            Placement::at(TITLE, 320, 240),
            Placement::at(SCORE_LINE, 0, 320)
        ]
    );
}

#[test]
fn exit_moves_then_culls_the_score_line() {
    let path = fixture("unit_phases", "exit.txt", SCORES);
    let mut source = TextSource::new(&path);
    let mut glyphs = CellGlyphs::new(10);
    let mut ctx = SceneContext {
        source: &mut source,
        glyphs: &mut glyphs,
    };
    let debug = DebugFrames {
        start: Some(640),
        end: None,
    };
    let mut cycle = PhaseCycle::new(config(1, debug));

    let plan = cycle.advance(&mut ctx).unwrap();
    assert_eq!(plan.placements[1], Placement::at(SCORE_LINE, 0, 320));
    let plan = cycle.advance(&mut ctx).unwrap();
    assert_eq!(plan.placements[1], Placement::at(SCORE_LINE, 10, 320));

    let mut culled = false;
    for _ in 0..300 {
        let plan = cycle.advance(&mut ctx).unwrap();
        if plan.placements.len() == 1 {
            culled = true;
        } else {
            assert!(!culled, "score line reappeared after leaving the canvas");
        }
    }
    assert!(culled);
    let exit = cycle.exit_motion().unwrap();
    assert!(exit.x < -640.0);
}

#[test]
fn debug_end_frame_forces_the_cycle_over() {
    let path = fixture("unit_phases", "debug.txt", SCORES);
    let mut source = TextSource::new(&path);
    let mut glyphs = CellGlyphs::new(10);
    let mut ctx = SceneContext {
        source: &mut source,
        glyphs: &mut glyphs,
    };
    let debug = DebugFrames {
        start: Some(100),
        end: Some(106),
    };
    let mut cycle = PhaseCycle::new(config(3, debug));

    let mut seen = Vec::new();
    for _ in 0..6 {
        cycle.advance(&mut ctx).unwrap();
        seen.push(cycle.state().cycle_pos);
    }
    assert_eq!(seen, vec![0, 2, 2, 0, 0, 2]);
}

#[test]
fn random_start_is_an_even_pair_index() {
    let path = fixture("unit_phases", "random.txt", "a\n1\nb\n2\nc\n3\nodd\n");
    let mut source = TextSource::new(&path);
    let mut glyphs = CellGlyphs::new(10);
    let mut ctx = SceneContext {
        source: &mut source,
        glyphs: &mut glyphs,
    };
    for _ in 0..50 {
        let mut cfg = config(1, from_zero());
        cfg.random_start = true;
        let mut cycle = PhaseCycle::new(cfg);
        cycle.advance(&mut ctx).unwrap();
        let pos = cycle.state().cycle_pos;
        assert_eq!(pos % 2, 0);
        assert!(pos < 6);
    }
}

#[test]
fn no_pairs_draws_nothing_but_keeps_cycling() {
    let path = fixture("unit_phases", "empty.txt", "lonely title\n");
    let mut source = TextSource::new(&path);
    let mut glyphs = CellGlyphs::new(10);
    let mut ctx = SceneContext {
        source: &mut source,
        glyphs: &mut glyphs,
    };
    let mut cycle = PhaseCycle::new(config(500, DebugFrames::default()));
    for _ in 0..10 {
        assert!(cycle.advance(&mut ctx).unwrap().is_empty());
        assert_eq!(cycle.state().cycle_pos, 0);
    }
    assert!(cycle.buffer(TITLE).is_none());
}

#[test]
fn missing_file_on_first_bootstrap_is_fatal() {
    let mut source = TextSource::new("target/unit_phases/missing.txt");
    let mut glyphs = CellGlyphs::new(10);
    let mut ctx = SceneContext {
        source: &mut source,
        glyphs: &mut glyphs,
    };
    let mut cycle = PhaseCycle::new(config(3, DebugFrames::default()));
    assert!(cycle.advance(&mut ctx).is_err());
}

#[test]
fn one_cycle_at_speed_three_takes_427_ticks() {
    let path = fixture("unit_phases", "scenario.txt", SCORES);
    let mut source = TextSource::new(&path);
    // "100 ALICE" at 72 px per char is wider than the canvas: no skip
    let mut glyphs = CellGlyphs::new(72);
    let mut cycle = PhaseCycle::new(config(3, DebugFrames::default()));
    {
        let mut ctx = SceneContext {
            source: &mut source,
            glyphs: &mut glyphs,
        };
        let first = cycle.advance(&mut ctx).unwrap();
        assert_eq!(first.frame, 0);
        for _ in 1..426 {
            cycle.advance(&mut ctx).unwrap();
            assert!(!cycle.awaiting_bootstrap());
        }
        let last = cycle.advance(&mut ctx).unwrap();
        assert_eq!(last.frame, 1278);
    }
    assert_eq!(cycle.state().cycle_pos, 2);
    assert_eq!(cycle.state().frame, 0);
    assert!(cycle.awaiting_bootstrap());
    assert_eq!(glyphs.rendered, vec!["Game A", "100 ALICE"]);

    let mut ctx = SceneContext {
        source: &mut source,
        glyphs: &mut glyphs,
    };
    cycle.advance(&mut ctx).unwrap();
    assert!(!cycle.awaiting_bootstrap());
    assert_eq!(glyphs.rendered[2..], ["Game B", "200 BOB"]);
}
