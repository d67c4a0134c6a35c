//! Headless frame loop: input handling, one physics step, and rendering per frame.
//!
//! Window creation and event polling are left to the embedder, which translates its
//! events into a [`FrameInput`] each frame.

use std::time::{Duration, Instant};

use glam::DVec2;

use crate::{
    config::{FrameConfig, GalaxyConfig, SimConfig},
    error::Result,
    galaxy::GalaxyGenerator,
    render::{Canvas, ViewOffset},
    utils::{logging::warn_if_frame_budget_exceeded, profiling::StepProfile},
    world::Simulation,
};

/// Turns a held button into a single trigger per press.
#[derive(Debug, Default, Clone)]
pub struct ClickTrigger {
    pressed: bool,
    trigger: bool,
}

impl ClickTrigger {
    pub fn event(&mut self, is_pressed: bool) {
        match (self.pressed, is_pressed) {
            (true, true) => (),
            (true, false) => self.pressed = false,
            (false, true) => {
                self.pressed = true;
                self.trigger = true;
            }
            (false, false) => (),
        }
    }

    pub fn get_trigger(&mut self) -> bool {
        let t = self.trigger;
        self.trigger = false;
        t
    }
}

/// Input state sampled by the embedder for one frame.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct FrameInput {
    /// Pointer position in canvas pixels.
    pub pointer: DVec2,
    /// Whether the primary button is held down this frame.
    pub button_down: bool,
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// What happened during one frame.
#[derive(Debug, Default, Clone, Copy)]
pub struct FrameStats {
    pub frame: u64,
    pub spawned: usize,
    pub step: StepProfile,
    pub elapsed: Duration,
    pub over_budget: bool,
}

/// Drives one coordinator step per rendered frame, with a fixed timestep.
pub struct FrameDriver {
    config: FrameConfig,
    simulation: Simulation,
    generator: GalaxyGenerator,
    canvas: Canvas,
    view: ViewOffset,
    click: ClickTrigger,
    frame: u64,
}

impl FrameDriver {
    pub fn new(sim: SimConfig, galaxy: GalaxyConfig, config: FrameConfig) -> Result<Self> {
        Self::with_generator(sim, GalaxyGenerator::new(galaxy)?, config)
    }

    pub fn with_generator(
        sim: SimConfig,
        generator: GalaxyGenerator,
        config: FrameConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            simulation: Simulation::new(sim)?,
            generator,
            canvas: Canvas::new(config.width, config.height),
            view: ViewOffset::default(),
            click: ClickTrigger::default(),
            frame: 0,
            config,
        })
    }

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    pub fn simulation_mut(&mut self) -> &mut Simulation {
        &mut self.simulation
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn view(&self) -> ViewOffset {
        self.view
    }

    pub fn frame(&mut self, input: &FrameInput) -> Result<FrameStats> {
        let start = Instant::now();
        let mut stats = FrameStats {
            frame: self.frame,
            ..FrameStats::default()
        };

        self.click.event(input.button_down);
        if self.click.get_trigger() {
            let center = input.pointer - DVec2::new(self.view.x as f64, self.view.y as f64);
            let stars = self.generator.generate(center);
            stats.spawned = stars.len();
            self.simulation.add_bodies(stars);
        }
        self.pan(input);

        stats.step = self.simulation.step()?;

        self.canvas.darken(self.config.trail_fade);
        for body in self.simulation.bodies().iter() {
            self.canvas.draw_body(body, self.view);
        }

        stats.elapsed = start.elapsed();
        stats.over_budget =
            warn_if_frame_budget_exceeded(stats.elapsed, self.config.frame_budget_ms);
        self.frame += 1;
        Ok(stats)
    }

    // Shifting the canvas along with the view keeps panning from smearing trails.
    fn pan(&mut self, input: &FrameInput) {
        if input.up {
            self.view.y += 1;
            self.canvas.shift_down();
        }
        if input.down {
            self.view.y -= 1;
            self.canvas.shift_up();
        }
        if input.right {
            self.view.x -= 1;
            self.canvas.shift_left();
        }
        if input.left {
            self.view.x += 1;
            self.canvas.shift_right();
        }
    }
}
