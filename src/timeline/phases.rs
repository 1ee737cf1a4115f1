use crate::{
    foundation::core::Canvas,
    foundation::error::{HiscoreError, HiscoreResult},
    raster::bitmap::Bitmap,
    text::LineStyle,
    timeline::{
        AnimationState, BufferId, DebugFrames, FramePlan, Placement, SceneContext, Timeline,
        centered_line, step_frame,
    },
};

/// Title line buffer.
pub const TITLE: BufferId = BufferId(0);
/// Centered score line, canvas wide.
pub const SCORE_LINE: BufferId = BufferId(1);
/// Left half of the score line during build-up.
pub const LEFT_HALF: BufferId = BufferId(2);
/// Right half of the score line during build-up.
pub const RIGHT_HALF: BufferId = BufferId(3);

/// Initial horizontal speed of the exiting score line, px/frame.
pub const EXIT_SPEED: f64 = 10.5;
/// Change of the exit speed per frame.
pub const EXIT_ACCEL: f64 = -0.35;

/// What the score line does during a quarter of the cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Quarter 0: both halves grow outward from the center.
    BuildUp,
    /// Quarter 1: the assembled line stands still.
    Hold,
    /// Quarters 2 and 3: the line swings out and accelerates off screen.
    ExitAccelerating,
}

/// `frame * 4 / frames_max`, capped to the last quarter.
pub fn quarter(frame: u64, frames_max: u64) -> u64 {
    if frames_max == 0 {
        return 3;
    }
    (frame.saturating_mul(4) / frames_max).min(3)
}

/// Phase of the score line at `frame`.
pub fn phase_for(frame: u64, frames_max: u64) -> Phase {
    match quarter(frame, frames_max) {
        0 => Phase::BuildUp,
        1 => Phase::Hold,
        _ => Phase::ExitAccelerating,
    }
}

/// Horizontal exit of the score line: `x += x_speed; x_speed += x_accel` per frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExitMotion {
    /// Offset from the centered position, px.
    pub x: f64,
    /// Current speed, px/frame.
    pub x_speed: f64,
    /// Change of speed per frame.
    pub x_accel: f64,
}

impl ExitMotion {
    /// Even pairs (cycle index `cycle_pos / 2`) start moving right and leave to the
    /// left; odd pairs mirror that.
    pub fn for_cycle(cycle_pos: usize) -> Self {
        let sign = if (cycle_pos / 2) % 2 == 0 { 1.0 } else { -1.0 };
        Self {
            x: 0.0,
            x_speed: sign * EXIT_SPEED,
            x_accel: sign * EXIT_ACCEL,
        }
    }

    /// Advance by one frame.
    pub fn step(&mut self) {
        self.x += self.x_speed;
        self.x_speed += self.x_accel;
    }

    /// True while part of the line is still on a canvas `canvas_width` wide.
    pub fn is_visible(&self, canvas_width: u32) -> bool {
        self.x.abs() < f64::from(canvas_width)
    }

    /// Drawing column, truncated toward zero.
    pub fn x_px(&self) -> i64 {
        self.x as i64
    }
}

/// Frames skipped at cycle start so short lines do not leave a long blank lead-in.
pub fn start_skip(canvas_width: u32, title_width: u32, score_width: u32) -> u64 {
    let widest = i64::from(title_width.max(score_width));
    ((i64::from(canvas_width) - widest) / 2).max(0) as u64
}

/// Settings for a [`PhaseCycle`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhaseCycleConfig {
    /// Canvas size.
    pub canvas: Canvas,
    /// Top row of the title.
    pub title_y: i64,
    /// Top row of the score line.
    pub score_y: i64,
    /// Frames advanced per tick.
    pub speed: u64,
    /// Font sizes and colors.
    pub style: LineStyle,
    /// Cycle start/end overrides.
    pub debug: DebugFrames,
    /// Start at a random pair instead of the first one.
    pub random_start: bool,
}

struct CycleBuffers {
    title: Bitmap,
    score_line: Bitmap,
    left: Bitmap,
    right: Bitmap,
}

/// Four-phase title/score cycle.
///
/// Each pair gets `2 * canvas_width` frames. The title scrolls right to left for
/// the whole cycle while the score line is built from the center, held, then
/// thrown off screen with decelerating-then-reversing speed.
pub struct PhaseCycle {
    config: PhaseCycleConfig,
    state: AnimationState,
    frames_max: u64,
    needs_bootstrap: bool,
    started: bool,
    buffers: Option<CycleBuffers>,
    exit: Option<ExitMotion>,
}

impl PhaseCycle {
    /// Cycle that bootstraps from the text source on its first advance.
    pub fn new(config: PhaseCycleConfig) -> Self {
        Self {
            config,
            state: AnimationState::default(),
            frames_max: 2 * u64::from(config.canvas.width),
            needs_bootstrap: true,
            started: false,
            buffers: None,
            exit: None,
        }
    }

    /// Frame counter and current pair.
    pub fn state(&self) -> AnimationState {
        self.state
    }

    /// Frames in one cycle, `2 * canvas_width`.
    pub fn frames_max(&self) -> u64 {
        self.frames_max
    }

    /// True between the end of a cycle and the bootstrap of the next one.
    pub fn awaiting_bootstrap(&self) -> bool {
        self.needs_bootstrap
    }

    /// Exit motion of the current cycle, once quarter 2 is reached.
    pub fn exit_motion(&self) -> Option<ExitMotion> {
        self.exit
    }

    fn quarter_len(&self) -> u64 {
        (self.frames_max / 4).max(1)
    }

    #[tracing::instrument(level = "debug", skip_all)]
    fn bootstrap(&mut self, ctx: &mut SceneContext<'_>) -> HiscoreResult<()> {
        ctx.source.refresh()?;

        let canvas = self.config.canvas;
        let style = self.config.style;
        self.frames_max = 2 * u64::from(canvas.width);
        self.exit = None;
        self.needs_bootstrap = false;

        let paired = ctx.source.paired_len();
        if paired == 0 {
            tracing::debug!("no complete title/score pair to show");
            self.buffers = None;
            self.state.frame = self.config.debug.start.unwrap_or(0);
            return Ok(());
        }

        if !self.started {
            self.started = true;
            if self.config.random_start {
                self.state.cycle_pos = random_even_index(paired / 2);
            }
        }
        self.state.cycle_pos %= paired;

        let entry = ctx
            .source
            .entry_at(self.state.cycle_pos)
            .ok_or_else(|| HiscoreError::render("cycle position outside the score pairs"))?;
        let title = ctx
            .glyphs
            .rasterize(entry.title, style.primary_px, style.text)?;
        let score = ctx
            .glyphs
            .rasterize(entry.score, style.secondary_px, style.text)?;

        let skip = start_skip(canvas.width, title.width(), score.width());
        self.state.frame = self.config.debug.start.unwrap_or(skip);

        tracing::debug!(
            cycle_pos = self.state.cycle_pos,
            title = entry.title,
            skip,
            frames_max = self.frames_max,
            "cycle started"
        );

        let score_line = centered_line(canvas.width, &score, style.background);
        let half = canvas.width / 2;
        let h = score_line.height();
        self.buffers = Some(CycleBuffers {
            title,
            left: Bitmap::new(half, h, style.background),
            right: Bitmap::new(canvas.width - half, h, style.background),
            score_line,
        });
        Ok(())
    }
}

impl Timeline for PhaseCycle {
    fn advance(&mut self, ctx: &mut SceneContext<'_>) -> HiscoreResult<FramePlan> {
        if self.needs_bootstrap {
            self.bootstrap(ctx)?;
        }

        let frame = self.state.frame;
        let width = self.config.canvas.width;
        let width_i = i64::from(width);
        let quarter_len = self.quarter_len();
        let mut plan = FramePlan::new(frame);

        if let Some(b) = self.buffers.as_mut() {
            plan.push(Placement::at(TITLE, width_i - frame as i64, self.config.title_y));

            match phase_for(frame, self.frames_max) {
                Phase::BuildUp => {
                    let step = (frame % quarter_len) as i64;
                    let half = i64::from(width / 2);
                    b.left.blit(&b.score_line, half - step, 0, None);
                    b.right.blit(&b.score_line, step - width_i, 0, None);
                    plan.push(Placement::at(LEFT_HALF, 0, self.config.score_y));
                    plan.push(Placement::at(RIGHT_HALF, half, self.config.score_y));
                }
                Phase::Hold => {
                    plan.push(Placement::at(SCORE_LINE, 0, self.config.score_y));
                }
                Phase::ExitAccelerating => {
                    let cycle_pos = self.state.cycle_pos;
                    let exit = self
                        .exit
                        .get_or_insert_with(|| ExitMotion::for_cycle(cycle_pos));
                    if exit.is_visible(width) {
                        plan.push(Placement::at(SCORE_LINE, exit.x_px(), self.config.score_y));
                    }
                    exit.step();
                }
            }
        }

        let (next, wrapped) = step_frame(frame, self.config.speed, self.frames_max, self.config.debug);
        self.state.frame = next;
        if wrapped {
            let paired = ctx.source.paired_len();
            if paired > 0 {
                self.state.cycle_pos = (self.state.cycle_pos + 2) % paired;
            }
            self.needs_bootstrap = true;
        }
        Ok(plan)
    }

    fn buffer(&self, id: BufferId) -> Option<&Bitmap> {
        let b = self.buffers.as_ref()?;
        match id {
            TITLE => Some(&b.title),
            SCORE_LINE => Some(&b.score_line),
            LEFT_HALF => Some(&b.left),
            RIGHT_HALF => Some(&b.right),
            _ => None,
        }
    }
}

fn random_even_index(pairs: usize) -> usize {
    if pairs == 0 {
        return 0;
    }
    (rand::random::<u64>() % pairs as u64) as usize * 2
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/phases.rs"]
mod tests;
