//! Frame driver
//!
//! Owns one field, its surface, and the live pointer. The host calls
//! `frame` once per display refresh and keeps scheduling while it returns
//! true; input callbacks feed `handle_event` between frames.

use crate::consts::{FRAME_MS, MAX_FRAME_DT};
use crate::field::{FieldMode, FieldState, Pointer, tick};
use crate::renderer::{DrawStats, Surface, SurfaceSize, draw_field};

/// Number of frame timestamps kept for the FPS estimate
const FPS_WINDOW: usize = 60;

/// Whether the driver advances the field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Stopped,
    Running,
}

/// Host input, delivered on the same queue as frames
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerMove { x: f32, y: f32 },
    PointerLeave,
    SurfaceResize { width: u32, height: u32 },
}

/// Field + surface + pointer, stepped once per frame while running
pub struct FrameDriver<S: Surface> {
    state: FieldState,
    surface: S,
    pointer: Pointer,
    run_state: RunState,
    /// Bumped on every start so the host can drop frames queued by an older run
    run_id: u64,
    /// Draw proximity links (particle mode)
    links: bool,
    last_time: Option<f64>,
    // FPS tracking
    frame_times: [f64; FPS_WINDOW],
    frame_index: usize,
    fps: u32,
    last_stats: DrawStats,
}

impl<S: Surface> FrameDriver<S> {
    /// Build a stopped driver; the store is sized from the surface
    pub fn new(mode: FieldMode, surface: S, seed: u64) -> Self {
        let state = FieldState::new(mode, surface.size(), seed);
        log::info!(
            "Field created: {} mode, {} entities",
            mode.as_str(),
            state.entities.len()
        );
        Self {
            state,
            surface,
            pointer: Pointer::new(mode.interaction_radius()),
            run_state: RunState::Stopped,
            run_id: 0,
            links: true,
            last_time: None,
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            fps: 0,
            last_stats: DrawStats::default(),
        }
    }

    pub fn with_links(mut self, links: bool) -> Self {
        self.links = links;
        self
    }

    /// Stopped to Running. Returns false if already running.
    pub fn start(&mut self) -> bool {
        if self.run_state == RunState::Running {
            return false;
        }
        self.run_state = RunState::Running;
        self.run_id += 1;
        self.last_time = None;
        log::info!("Field running ({} mode)", self.state.mode.as_str());
        true
    }

    /// Running to Stopped. Returns false if already stopped.
    pub fn stop(&mut self) -> bool {
        if self.run_state == RunState::Stopped {
            return false;
        }
        self.run_state = RunState::Stopped;
        log::info!(
            "Field stopped after {} frames",
            self.state.time_frames
        );
        true
    }

    /// Restart after the host page is shown again
    ///
    /// A page restored from the back/forward cache keeps its driver, which
    /// was stopped when the page was hidden. Returns true when the host must
    /// schedule a new frame.
    pub fn resume(&mut self, animate: bool) -> bool {
        animate && self.start()
    }

    pub fn run_id(&self) -> u64 {
        self.run_id
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    /// Apply an input event. Resizes rebuild the store immediately.
    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerMove { x, y } => self.pointer.move_to(x, y),
            InputEvent::PointerLeave => self.pointer.leave(),
            InputEvent::SurfaceResize { width, height } => {
                self.resize(SurfaceSize::new(width, height))
            }
        }
    }

    /// Resize the surface and discard every entity for the new dimensions
    pub fn resize(&mut self, size: SurfaceSize) {
        self.surface.resize(size);
        self.state.rebuild(size);
        if size.is_empty() {
            log::debug!("Surface has no area; frames will draw nothing");
        }
        log::info!(
            "Surface resized to {}x{}, {} entities",
            size.width,
            size.height,
            self.state.entities.len()
        );
    }

    /// Run one step + draw if running; returns whether to schedule another
    ///
    /// `time_ms` is the host's refresh timestamp. The step length comes from
    /// the gap since the previous frame, in units of a 60 Hz refresh.
    pub fn frame(&mut self, time_ms: f64) -> bool {
        if !self.is_running() {
            return false;
        }

        let dt = match self.last_time {
            Some(last) => (((time_ms - last) / FRAME_MS) as f32).clamp(0.0, MAX_FRAME_DT),
            None => 1.0,
        };
        self.last_time = Some(time_ms);

        // Events arriving during the step are only seen next frame
        let pointer = self.pointer;
        tick(&mut self.state, &pointer, dt);
        self.last_stats = draw_field(&self.state, &mut self.surface, self.links);

        self.track_fps(time_ms);
        true
    }

    /// Draw the current field without advancing it
    pub fn render_still(&mut self) -> DrawStats {
        self.last_stats = draw_field(&self.state, &mut self.surface, self.links);
        self.last_stats
    }

    fn track_fps(&mut self, time_ms: f64) {
        self.frame_times[self.frame_index] = time_ms;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;

        // Oldest sample sits at the next write slot
        let oldest = self.frame_times[self.frame_index];
        if oldest > 0.0 {
            let elapsed = time_ms - oldest;
            if elapsed > 0.0 {
                self.fps = ((FPS_WINDOW - 1) as f64 * 1000.0 / elapsed).round() as u32;
            }
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn last_stats(&self) -> DrawStats {
        self.last_stats
    }

    pub fn state(&self) -> &FieldState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut FieldState {
        &mut self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn pointer(&self) -> &Pointer {
        &self.pointer
    }
}
