#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Arena Survivors adapters.

use anyhow::Result as AnyResult;
use arena_survivors_core::{
    BuffKind, EnemyArchetype, EntityColor, InputSnapshot, PlayerClass, SessionSummary,
};
use glam::Vec2;
use std::{error::Error, fmt, time::Duration};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

impl From<EntityColor> for Color {
    fn from(color: EntityColor) -> Self {
        Self::from_rgb_u8(color.red(), color.green(), color.blue())
    }
}

/// Identifiers of the images a backend may substitute for primitive bodies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpriteKey {
    /// Warrior player body.
    Warrior,
    /// Mage player body.
    Mage,
    /// Assassin player body.
    Assassin,
    /// Ranger player body.
    Ranger,
    /// Normal enemy body.
    NormalEnemy,
    /// Fast enemy body.
    FastEnemy,
    /// Tank enemy body.
    TankEnemy,
}

impl SpriteKey {
    /// Every sprite key in canonical manifest order.
    pub const ALL: [SpriteKey; 7] = [
        Self::Warrior,
        Self::Mage,
        Self::Assassin,
        Self::Ranger,
        Self::NormalEnemy,
        Self::FastEnemy,
        Self::TankEnemy,
    ];

    /// Sprite used for a player of the provided class.
    #[must_use]
    pub const fn for_class(class: PlayerClass) -> Self {
        match class {
            PlayerClass::Warrior => Self::Warrior,
            PlayerClass::Mage => Self::Mage,
            PlayerClass::Assassin => Self::Assassin,
            PlayerClass::Ranger => Self::Ranger,
        }
    }

    /// Sprite used for an enemy of the provided archetype.
    #[must_use]
    pub const fn for_archetype(archetype: EnemyArchetype) -> Self {
        match archetype {
            EnemyArchetype::Normal => Self::NormalEnemy,
            EnemyArchetype::Fast => Self::FastEnemy,
            EnemyArchetype::Tank => Self::TankEnemy,
        }
    }

    /// Name under which the sprite is listed in a manifest.
    #[must_use]
    pub const fn manifest_name(self) -> &'static str {
        match self {
            Self::Warrior => PlayerClass::Warrior.id(),
            Self::Mage => PlayerClass::Mage.id(),
            Self::Assassin => PlayerClass::Assassin.id(),
            Self::Ranger => PlayerClass::Ranger.id(),
            Self::NormalEnemy => EnemyArchetype::Normal.id(),
            Self::FastEnemy => EnemyArchetype::Fast.id(),
            Self::TankEnemy => EnemyArchetype::Tank.id(),
        }
    }

    /// Resolves a manifest name back to its sprite key.
    #[must_use]
    pub fn from_manifest_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|key| key.manifest_name() == name)
    }
}

/// Axis-aligned filled rectangle in arena coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FilledRect {
    /// Top-left corner.
    pub origin: Vec2,
    /// Width and height.
    pub size: Vec2,
    /// Fill color.
    pub color: Color,
}

impl FilledRect {
    /// Creates a new rectangle descriptor.
    #[must_use]
    pub const fn new(origin: Vec2, size: Vec2, color: Color) -> Self {
        Self {
            origin,
            size,
            color,
        }
    }
}

/// Filled circle in arena coordinates, optionally replaced by a sprite.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FilledCircle {
    /// Center of the circle.
    pub center: Vec2,
    /// Radius of the circle.
    pub radius: f32,
    /// Fill color, also used as the sprite fallback.
    pub color: Color,
    /// Sprite the backend may draw instead of the circle.
    pub sprite: Option<SpriteKey>,
}

/// Single primitive drawn as part of a scene, in submission order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawCommand {
    /// Solid rectangle.
    FillRect(FilledRect),
    /// Solid circle.
    FillCircle(FilledCircle),
    /// Health bar composed of a background rectangle and a proportional foreground.
    HealthBar {
        /// Full-width background.
        back: FilledRect,
        /// Foreground scaled by the remaining health fraction.
        front: FilledRect,
    },
}

impl DrawCommand {
    /// Builds a health bar centred horizontally on `center_x`.
    ///
    /// The foreground width is `size.x * current / max`, clamped to `[0, size.x]`.
    #[must_use]
    pub fn health_bar(
        center_x: f32,
        top: f32,
        size: Vec2,
        current: f32,
        max: f32,
        back: Color,
        front: Color,
    ) -> Self {
        let fraction = if max > 0.0 {
            (current / max).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let origin = Vec2::new(center_x - size.x / 2.0, top);
        Self::HealthBar {
            back: FilledRect::new(origin, size, back),
            front: FilledRect::new(origin, Vec2::new(size.x * fraction, size.y), front),
        }
    }
}

/// Ordered draw list covering the arena.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Arena width in world units.
    pub width: f32,
    /// Arena height in world units.
    pub height: f32,
    /// Fill applied to the arena before any command.
    pub background: Color,
    /// Primitives drawn after the background, in order.
    pub commands: Vec<DrawCommand>,
}

impl Scene {
    /// Creates an empty scene.
    #[must_use]
    pub fn new(width: f32, height: f32, background: Color) -> Self {
        Self {
            width,
            height,
            background,
            commands: Vec::new(),
        }
    }

    /// Appends a draw command.
    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}

/// Numbers mirrored into the heads-up display every active frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HudReadout {
    /// Current health, floored and never negative.
    pub health: u32,
    /// Maximum health, floored.
    pub max_health: u32,
    /// Current level.
    pub level: u32,
    /// Experience toward the next level.
    pub experience: u32,
    /// Experience required for the next level.
    pub experience_threshold: u32,
    /// Attack power, floored.
    pub attack: u32,
    /// Movement speed in units per frame.
    pub speed: f32,
    /// Enemies killed by auto-attacks.
    pub kills: u32,
    /// Whole seconds survived.
    pub elapsed_seconds: u64,
}

/// Overlay the host should show on top of the scene.
#[derive(Clone, Debug, PartialEq)]
pub enum Screen {
    /// Class selection before a session.
    Start,
    /// Gameplay without an overlay.
    Game,
    /// Buff choice after a level-up.
    LevelUp {
        /// Buffs the player may pick, in slot order.
        offer: Vec<BuffKind>,
    },
    /// Final statistics after defeat.
    GameOver {
        /// Statistics of the finished session.
        summary: SessionSummary,
    },
}

/// Everything a backend needs to present one display frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// Arena contents.
    pub scene: Scene,
    /// Heads-up display numbers, absent before a session starts.
    pub hud: Option<HudReadout>,
    /// Overlay to show.
    pub screen: Screen,
}

/// Input snapshot gathered by adapters before advancing the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct FrameInput {
    /// Held directional keys.
    pub movement: InputSnapshot,
    /// Class picked on the start screen this frame.
    pub class_choice: Option<PlayerClass>,
    /// Offer slot picked on the level-up screen this frame.
    pub buff_choice: Option<usize>,
    /// Whether a restart was requested this frame.
    pub restart: bool,
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame outside the arena.
    pub clear_color: Color,
    /// Arena width in world units.
    pub arena_width: f32,
    /// Arena height in world units.
    pub arena_height: f32,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    ///
    /// Returns an error when either arena dimension is not positive.
    pub fn new<T>(
        window_title: T,
        clear_color: Color,
        arena_width: f32,
        arena_height: f32,
    ) -> Result<Self, RenderingError>
    where
        T: Into<String>,
    {
        if !(arena_width > 0.0 && arena_height > 0.0) {
            return Err(RenderingError::InvalidArena {
                width: arena_width,
                height: arena_height,
            });
        }

        Ok(Self {
            window_title: window_title.into(),
            clear_color,
            arena_width,
            arena_height,
        })
    }
}

/// Rendering backend capable of presenting Arena Survivors frames.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_frame` closure receives the real frame delta and the
    /// input captured by the adapter, and returns the frame to present. It is
    /// invoked once per display frame in every phase.
    fn run<F>(self, presentation: Presentation, update_frame: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput) -> Frame + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// Arena dimensions must be positive to produce a visible scene.
    InvalidArena {
        /// Provided width.
        width: f32,
        /// Provided height.
        height: f32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArena { width, height } => {
                write!(
                    f,
                    "arena dimensions must be positive (received {width}x{height})"
                )
            }
        }
    }
}

impl Error for RenderingError {}
