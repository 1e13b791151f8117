#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Arena Survivors.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature.
//!
//! Overlay screens use Macroquad's immediate-mode UI module. All UI-specific
//! calls live inside the local `ui` module.

mod sprites;
mod ui;

use self::sprites::SpriteAtlas;
use self::ui::{draw_screen_ui, ScreenUiContext, ScreenUiResult};
use anyhow::{Context, Result};
use arena_survivors_core::{InputSnapshot, PlayerClass};
use arena_survivors_rendering::{
    Color, DrawCommand, FilledCircle, FilledRect, Frame, FrameInput, HudReadout, Presentation,
    RenderingBackend, Scene, Screen,
};
use glam::Vec2;
use macroquad::input::{is_key_down, is_key_pressed, KeyCode};
use macroquad::math::Vec2 as MacroquadVec2;
use std::{
    path::{Path, PathBuf},
    sync::mpsc,
    time::{Duration, Instant},
};

const HUD_FONT_SIZE: f32 = 22.0;
const HUD_MARGIN: f32 = 12.0;
const OVERLAY_SIZE: Vec2 = Vec2::new(520.0, 360.0);

/// Tracks overlay button presses so they can be merged with physical input on the next frame.
#[doc(hidden)]
#[derive(Clone, Copy, Debug, Default)]
pub struct ScreenInputState {
    class_latched: Option<PlayerClass>,
    buff_latched: Option<usize>,
    restart_latched: bool,
}

impl ScreenInputState {
    /// Returns the latched class choice, clearing it so the action fires once.
    pub fn take_class_choice(&mut self) -> Option<PlayerClass> {
        self.class_latched.take()
    }

    /// Records that a class button was pressed this frame.
    pub fn register_class_choice(&mut self, class: PlayerClass) {
        self.class_latched = Some(class);
    }

    /// Returns the latched offer slot, clearing it so the action fires once.
    pub fn take_buff_choice(&mut self) -> Option<usize> {
        self.buff_latched.take()
    }

    /// Records that a buff button was pressed this frame.
    pub fn register_buff_choice(&mut self, slot: usize) {
        self.buff_latched = Some(slot);
    }

    /// Returns whether a restart was latched and clears the latch.
    pub fn take_restart(&mut self) -> bool {
        let latched = self.restart_latched;
        self.restart_latched = false;
        latched
    }

    /// Records that the restart button was pressed this frame.
    pub fn register_restart(&mut self) {
        self.restart_latched = true;
    }

    fn register(&mut self, result: ScreenUiResult) {
        if let Some(class) = result.class_choice {
            self.register_class_choice(class);
        }
        if let Some(slot) = result.buff_choice {
            self.register_buff_choice(slot);
        }
        if result.restart {
            self.register_restart();
        }
    }
}

/// Snapshot of edge-triggered keyboard shortcuts observed during a single frame.
#[derive(Clone, Copy, Debug, Default)]
struct KeyboardShortcuts {
    /// `Q` or `Escape` to quit the game loop.
    quit_requested: bool,
    /// Zero-based index of the number key pressed this frame.
    number: Option<usize>,
    /// `R` or `Enter` restarts from the game-over screen.
    restart: bool,
}

impl KeyboardShortcuts {
    fn poll() -> Self {
        let quit_requested = is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q);
        let number = [KeyCode::Key1, KeyCode::Key2, KeyCode::Key3, KeyCode::Key4]
            .into_iter()
            .position(is_key_pressed);
        let restart = is_key_pressed(KeyCode::R) || is_key_pressed(KeyCode::Enter);

        Self {
            quit_requested,
            number,
            restart,
        }
    }
}

fn held_directions() -> InputSnapshot {
    InputSnapshot {
        left: is_key_down(KeyCode::Left) || is_key_down(KeyCode::A),
        right: is_key_down(KeyCode::Right) || is_key_down(KeyCode::D),
        up: is_key_down(KeyCode::Up) || is_key_down(KeyCode::W),
        down: is_key_down(KeyCode::Down) || is_key_down(KeyCode::S),
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
    sprite_manifest: Option<PathBuf>,
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend prints frame timing metrics once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }

    /// Loads sprites from the provided manifest instead of drawing primitive bodies.
    #[must_use]
    pub fn with_sprite_manifest(mut self, manifest: Option<PathBuf>) -> Self {
        self.sprite_manifest = manifest;
        self
    }
}

/// Per-frame durations fed into the FPS counter.
#[derive(Clone, Copy, Debug, Default)]
struct FrameBreakdown {
    frame: Duration,
    simulation: Duration,
    render: Duration,
}

/// Tracks the average frames-per-second produced by the render loop.
#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
    simulation_accum: Duration,
    render_accum: Duration,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct FpsMetrics {
    per_second: f32,
    avg_simulation: Duration,
    avg_render: Duration,
}

impl FpsCounter {
    /// Records a rendered frame and returns averages once one second has elapsed.
    fn record_frame(&mut self, breakdown: FrameBreakdown) -> Option<FpsMetrics> {
        self.elapsed += breakdown.frame;
        self.frames = self.frames.saturating_add(1);
        self.simulation_accum += breakdown.simulation;
        self.render_accum += breakdown.render;

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let metrics = FpsMetrics {
            per_second: self.frames as f32 / self.elapsed.as_secs_f32(),
            avg_simulation: self.simulation_accum / self.frames,
            avg_render: self.render_accum / self.frames,
        };
        *self = Self::default();
        Some(metrics)
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_frame: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput) -> Frame + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
            sprite_manifest,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            arena_width,
            arena_height,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: arena_width.ceil() as i32,
            window_height: arena_height.ceil() as i32,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        let (atlas_init_sender, atlas_init_receiver) = mpsc::channel::<Result<()>>();

        macroquad::Window::from_config(config, async move {
            let sprite_atlas = match sprite_manifest {
                Some(path) => match load_sprite_atlas(&path) {
                    Ok(atlas) => {
                        tracing::info!(sprites = atlas.texture_count(), "sprite atlas loaded");
                        Some(atlas)
                    }
                    Err(error) => {
                        let _ = atlas_init_sender.send(Err(error));
                        return;
                    }
                },
                None => None,
            };
            let _ = atlas_init_sender.send(Ok(()));

            let background = to_macroquad_color(clear_color);
            let overlay_background = to_macroquad_color(Color::new(0.0, 0.0, 0.0, 0.8));
            let mut fps_counter = FpsCounter::default();
            let mut screen_input = ScreenInputState::default();
            let mut last_screen = Screen::Start;

            loop {
                let keyboard = KeyboardShortcuts::poll();
                if keyboard.quit_requested {
                    break;
                }

                macroquad::window::clear_background(background);

                let screen_width = macroquad::window::screen_width();
                let screen_height = macroquad::window::screen_height();
                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));

                let frame_input = gather_frame_input(
                    &last_screen,
                    held_directions(),
                    keyboard,
                    &mut screen_input,
                );

                let simulation_start = Instant::now();
                let frame = update_frame(frame_dt, frame_input);
                let simulation_duration = simulation_start.elapsed();

                let render_start = Instant::now();
                let metrics = ArenaMetrics::from_scene(&frame.scene, screen_width, screen_height);
                draw_scene(&frame.scene, &metrics, sprite_atlas.as_ref());
                if let Some(hud) = frame.hud {
                    draw_hud(&hud, &metrics);
                }

                let overlay_origin = MacroquadVec2::new(
                    ((screen_width - OVERLAY_SIZE.x) * 0.5).max(0.0),
                    ((screen_height - OVERLAY_SIZE.y) * 0.5).max(0.0),
                );
                let mut overlay_ui = macroquad::ui::root_ui();
                let ui_result = draw_screen_ui(
                    &mut overlay_ui,
                    ScreenUiContext {
                        origin: overlay_origin,
                        size: MacroquadVec2::new(OVERLAY_SIZE.x, OVERLAY_SIZE.y),
                        background: overlay_background,
                        screen: &frame.screen,
                    },
                );
                drop(overlay_ui);
                screen_input.register(ui_result);
                let render_duration = render_start.elapsed();

                last_screen = frame.screen;

                let fps_metrics = fps_counter.record_frame(FrameBreakdown {
                    frame: frame_dt,
                    simulation: simulation_duration,
                    render: render_duration,
                });
                if show_fps {
                    if let Some(FpsMetrics {
                        per_second,
                        avg_simulation,
                        avg_render,
                    }) = fps_metrics
                    {
                        println!(
                            "FPS: {:.2} | sim: {:>6.2}ms render: {:>6.2}ms",
                            per_second,
                            avg_simulation.as_secs_f64() * 1_000.0,
                            avg_render.as_secs_f64() * 1_000.0,
                        );
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        atlas_init_receiver.recv().unwrap_or_else(|_| Ok(()))?;

        Ok(())
    }
}

/// Maps arena coordinates onto the window, preserving the aspect ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
struct ArenaMetrics {
    scale: f32,
    offset_x: f32,
    offset_y: f32,
}

impl ArenaMetrics {
    fn from_scene(scene: &Scene, screen_width: f32, screen_height: f32) -> Self {
        let scale = if scene.width <= f32::EPSILON || scene.height <= f32::EPSILON {
            1.0
        } else {
            (screen_width / scene.width).min(screen_height / scene.height)
        };
        Self {
            scale,
            offset_x: ((screen_width - scene.width * scale) * 0.5).max(0.0),
            offset_y: ((screen_height - scene.height * scale) * 0.5).max(0.0),
        }
    }

    fn to_screen(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            self.offset_x + point.x * self.scale,
            self.offset_y + point.y * self.scale,
        )
    }
}

/// Translates the held keys, number keys and latched overlay clicks into a frame input.
///
/// Number keys pick a class on the start screen and an offer slot on the
/// level-up screen. Restart keys only apply on the game-over screen.
fn gather_frame_input(
    screen: &Screen,
    movement: InputSnapshot,
    keyboard: KeyboardShortcuts,
    latched: &mut ScreenInputState,
) -> FrameInput {
    let mut input = FrameInput {
        movement,
        class_choice: latched.take_class_choice(),
        buff_choice: latched.take_buff_choice(),
        restart: latched.take_restart(),
    };

    match screen {
        Screen::Start => {
            if let Some(class) = keyboard
                .number
                .and_then(|slot| PlayerClass::ALL.get(slot).copied())
            {
                input.class_choice = Some(class);
            }
        }
        Screen::LevelUp { offer } => {
            if let Some(slot) = keyboard.number.filter(|slot| *slot < offer.len()) {
                input.buff_choice = Some(slot);
            }
        }
        Screen::GameOver { .. } => input.restart |= keyboard.restart,
        Screen::Game => {}
    }

    input
}

fn draw_scene(scene: &Scene, metrics: &ArenaMetrics, sprite_atlas: Option<&SpriteAtlas>) {
    let origin = metrics.to_screen(Vec2::ZERO);
    macroquad::shapes::draw_rectangle(
        origin.x,
        origin.y,
        scene.width * metrics.scale,
        scene.height * metrics.scale,
        to_macroquad_color(scene.background),
    );

    for command in &scene.commands {
        match command {
            DrawCommand::FillRect(rect) => draw_rect(rect, metrics),
            DrawCommand::FillCircle(circle) => draw_body(circle, metrics, sprite_atlas),
            DrawCommand::HealthBar { back, front } => {
                draw_rect(back, metrics);
                draw_rect(front, metrics);
            }
        }
    }
}

fn draw_rect(rect: &FilledRect, metrics: &ArenaMetrics) {
    let origin = metrics.to_screen(rect.origin);
    macroquad::shapes::draw_rectangle(
        origin.x,
        origin.y,
        rect.size.x * metrics.scale,
        rect.size.y * metrics.scale,
        to_macroquad_color(rect.color),
    );
}

fn load_sprite_atlas(path: &Path) -> Result<SpriteAtlas> {
    SpriteAtlas::from_manifest_path(path)
        .with_context(|| format!("failed to initialise sprite atlas from {}", path.display()))
}

fn draw_body(circle: &FilledCircle, metrics: &ArenaMetrics, sprite_atlas: Option<&SpriteAtlas>) {
    let center = metrics.to_screen(circle.center);
    let radius = circle.radius * metrics.scale;
    if let (Some(atlas), Some(key)) = (sprite_atlas, circle.sprite) {
        match atlas.draw(key, center, radius) {
            Ok(()) => return,
            Err(error) => {
                tracing::debug!(%error, ?key, "sprite draw failed, drawing primitive");
            }
        }
    }
    macroquad::shapes::draw_circle(center.x, center.y, radius, to_macroquad_color(circle.color));
}

fn draw_hud(hud: &HudReadout, metrics: &ArenaMetrics) {
    let origin = metrics.to_screen(Vec2::ZERO);
    for (row, line) in hud_lines(hud).iter().enumerate() {
        let _ = macroquad::text::draw_text(
            line,
            origin.x + HUD_MARGIN,
            origin.y + HUD_MARGIN + HUD_FONT_SIZE * (row as f32 + 1.0),
            HUD_FONT_SIZE,
            macroquad::color::WHITE,
        );
    }
}

fn hud_lines(hud: &HudReadout) -> [String; 2] {
    [
        format!(
            "HP {}/{}   LV {}   EXP {}/{}",
            hud.health, hud.max_health, hud.level, hud.experience, hud.experience_threshold
        ),
        format!(
            "ATK {}   SPD {:.1}   Kills {}   Time {}s",
            hud.attack, hud.speed, hud.kills, hud.elapsed_seconds
        ),
    ]
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
