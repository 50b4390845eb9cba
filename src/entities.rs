/// All game entity types: plain data plus the rectangles they collide with.

use crate::config::GameConfig;
use crate::geometry::Rect;

/// Stable identifier handed to the renderer for every spawned entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    /// Every enemy destroyed.  Play continues.
    Won,
    /// Player destroyed.  Terminal.
    Lost,
}

// ── Presentation tags ─────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sprite {
    Player,
    Enemy,
    Laser,
    EnemyLaser,
}

impl Sprite {
    /// Category style class.
    pub fn class(&self) -> &'static str {
        match self {
            Sprite::Player => "player",
            Sprite::Enemy => "enemy",
            Sprite::Laser => "laser",
            Sprite::EnemyLaser => "enemy-laser",
        }
    }

    pub fn image(&self) -> &'static str {
        match self {
            Sprite::Player => "media/img/player-blue-1.png",
            Sprite::Enemy => "media/img/enemy-blue-1.png",
            Sprite::Laser => "media/img/laser-blue-1.png",
            Sprite::EnemyLaser => "media/img/laser-red-5.png",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sound {
    Laser,
    Lose,
}

impl Sound {
    pub fn resource(&self) -> &'static str {
        match self {
            Sound::Laser => "media/sound/sfx-laser1.ogg",
            Sound::Lose => "media/sound/sfx-lose.ogg",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Overlay {
    Victory,
    GameOver,
}

/// Side effects requested by a frame, applied afterwards by `render::RenderSync`.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    Spawned { id: EntityId, sprite: Sprite },
    Despawned { id: EntityId },
    PlaySound(Sound),
    ShowOverlay(Overlay),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Schedule {
    NextFrame,
    Halt,
}

/// Output of one call to `compute::tick`.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub events: Vec<GameEvent>,
    pub schedule: Schedule,
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// Physical key state, written by `input` and read by `tick`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputFlags {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

// ── Player, enemies & lasers ──────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub id: EntityId,
    pub x: f64,
    /// Fixed after creation.
    pub y: f64,
    pub alive: bool,
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub id: EntityId,
    /// Home position; sway never moves it.
    pub x: f64,
    pub y: f64,
    /// Shared sway offset from the last enemy pass.
    pub dx: f64,
    pub dy: f64,
    /// Frames until the next shot; fires at zero or below.
    pub cooldown: f64,
    pub dead: bool,
}

impl Player {
    pub fn rect(&self, config: &GameConfig) -> Rect {
        Rect::centered(self.x, self.y, config.player_width, config.player_height)
    }
}

impl Enemy {
    /// Where the enemy is drawn and collides: home plus sway.
    pub fn position(&self) -> (f64, f64) {
        (self.x + self.dx, self.y + self.dy)
    }

    pub fn rect(&self, config: &GameConfig) -> Rect {
        let (x, y) = self.position();
        Rect::centered(x, y, config.enemy_width, config.enemy_height)
    }
}

#[derive(Clone, Debug)]
pub struct Laser {
    pub id: EntityId,
    pub x: f64,
    pub y: f64,
    pub dead: bool,
}

impl Laser {
    pub fn rect(&self, config: &GameConfig) -> Rect {
        Rect::centered(self.x, self.y, config.laser_width, config.laser_height)
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire simulation state, owned by the caller and passed to `tick`.
#[derive(Clone, Debug)]
pub struct GameState {
    pub config: GameConfig,
    pub player: Player,
    pub input: InputFlags,
    /// Frames until the player may fire again.
    pub laser_cooldown: u32,
    pub enemies: Vec<Enemy>,
    /// Player-fired lasers, moving up.
    pub lasers: Vec<Laser>,
    /// Enemy-fired lasers, moving down.
    pub enemy_lasers: Vec<Laser>,
    pub status: GameStatus,
    pub frame: u64,
    pub next_id: u64,
}

impl GameState {
    pub fn alloc_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }
}
