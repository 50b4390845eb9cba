/// Game logic: entity factories, per-frame updaters and the `tick` driver.
///
/// Every function mutates the caller-owned `GameState` in place and records
/// its side effects as `GameEvent`s instead of touching a renderer.  The only
/// randomness (initial enemy cooldowns) comes through an injected RNG.

use rand::Rng;
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::entities::{
    Enemy, EntityId, Frame, GameEvent, GameState, GameStatus, InputFlags, Laser, Overlay,
    Player, Schedule, Sound, Sprite,
};
use crate::geometry::{clamp, rand_range, rects_intersect};

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the opening state: the enemy grid, then the player at the bottom
/// centre.  Returns the spawn events the renderer needs for the first frame.
pub fn init_state(config: GameConfig, rng: &mut impl Rng) -> (GameState, Vec<GameEvent>) {
    let mut state = GameState {
        config,
        player: Player {
            id: EntityId(0),
            x: 0.0,
            y: 0.0,
            alive: false,
        },
        input: InputFlags::default(),
        laser_cooldown: 0,
        enemies: Vec::new(),
        lasers: Vec::new(),
        enemy_lasers: Vec::new(),
        status: GameStatus::Running,
        frame: 0,
        next_id: 0,
    };
    let mut events = Vec::new();

    let spacing = state.config.enemy_spacing();
    for row in 0..state.config.enemy_rows {
        let y = state.config.enemy_vertical_padding
            + row as f64 * state.config.enemy_vertical_spacing;
        for col in 0..state.config.enemies_per_row {
            let x = col as f64 * spacing + state.config.enemy_horizontal_padding;
            create_enemy(&mut state, &mut events, rng, x, y);
        }
    }

    let x = state.config.arena_width / 2.0;
    let y = state.config.arena_height - state.config.player_offset;
    create_player(&mut state, &mut events, x, y);

    debug!(
        enemies = state.enemies.len(),
        player_x = x,
        player_y = y,
        "initial state built"
    );
    (state, events)
}

// ── Factories ────────────────────────────────────────────────────────────────

/// Replace the player slot with a fresh, living player.
pub fn create_player(state: &mut GameState, events: &mut Vec<GameEvent>, x: f64, y: f64) {
    let id = state.alloc_id();
    state.player = Player { id, x, y, alive: true };
    events.push(GameEvent::Spawned { id, sprite: Sprite::Player });
}

/// Enemies start with a randomised cooldown so the first volley is staggered.
pub fn create_enemy(
    state: &mut GameState,
    events: &mut Vec<GameEvent>,
    rng: &mut impl Rng,
    x: f64,
    y: f64,
) {
    let id = state.alloc_id();
    let base = state.config.enemy_cooldown;
    state.enemies.push(Enemy {
        id,
        x,
        y,
        dx: 0.0,
        dy: 0.0,
        cooldown: rand_range(rng, base / 2.0, base * 2.0),
        dead: false,
    });
    events.push(GameEvent::Spawned { id, sprite: Sprite::Enemy });
}

/// Player-fired laser.  Plays the shot sound.
pub fn create_laser(state: &mut GameState, events: &mut Vec<GameEvent>, x: f64, y: f64) {
    let id = state.alloc_id();
    state.lasers.push(Laser { id, x, y, dead: false });
    events.push(GameEvent::Spawned { id, sprite: Sprite::Laser });
    events.push(GameEvent::PlaySound(Sound::Laser));
}

/// Enemy-fired laser.  Silent.
pub fn create_enemy_laser(state: &mut GameState, events: &mut Vec<GameEvent>, x: f64, y: f64) {
    let id = state.alloc_id();
    state.enemy_lasers.push(Laser { id, x, y, dead: false });
    events.push(GameEvent::Spawned { id, sprite: Sprite::EnemyLaser });
}

// ── Input-driven transitions ─────────────────────────────────────────────────

/// Move from the held direction keys, clamp to the arena, then handle firing
/// and the shot cooldown.
pub fn apply_input(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let speed = state.config.player_speed;
    if state.input.left {
        state.player.x -= speed;
    }
    if state.input.right {
        state.player.x += speed;
    }
    let (min_x, max_x) = state.config.player_x_bounds();
    state.player.x = clamp(state.player.x, min_x, max_x);

    if state.input.fire && state.laser_cooldown == 0 {
        let (x, y) = (state.player.x, state.player.y);
        create_laser(state, events, x, y);
        state.laser_cooldown = state.config.laser_cooldown;
    }
    if state.laser_cooldown > 0 {
        state.laser_cooldown -= 1;
    }
}

// ── Per-frame updaters ───────────────────────────────────────────────────────

/// Player lasers: move up, expire above the arena, and destroy at most one
/// enemy each.
pub fn update_lasers(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let config = &state.config;
    let enemies = &mut state.enemies;

    for laser in state.lasers.iter_mut() {
        laser.y -= config.laser_speed;
        if laser.y < 0.0 {
            laser.dead = true;
            events.push(GameEvent::Despawned { id: laser.id });
            continue;
        }

        let r1 = laser.rect(config);
        for enemy in enemies.iter_mut() {
            if enemy.dead {
                continue;
            }
            if rects_intersect(&r1, &enemy.rect(config)) {
                enemy.dead = true;
                laser.dead = true;
                events.push(GameEvent::Despawned { id: enemy.id });
                events.push(GameEvent::Despawned { id: laser.id });
                break;
            }
        }
    }

    state.lasers.retain(|l| !l.dead);
}

/// Shared sway for the whole grid, then per-enemy firing.  Enemies killed
/// earlier this frame neither fire nor survive the pass.
pub fn update_enemies(state: &mut GameState, events: &mut Vec<GameEvent>, clock_secs: f64) {
    let dx = clock_secs.sin() * state.config.sway_x;
    let dy = clock_secs.cos() * state.config.sway_y;
    let base = state.config.enemy_cooldown;

    let mut volleys = Vec::new();
    for enemy in state.enemies.iter_mut() {
        enemy.dx = dx;
        enemy.dy = dy;
        if enemy.dead {
            continue;
        }
        enemy.cooldown -= 1.0;
        if enemy.cooldown <= 0.0 {
            enemy.cooldown = base;
            volleys.push(enemy.position());
        }
    }
    for (x, y) in volleys {
        create_enemy_laser(state, events, x, y);
    }

    state.enemies.retain(|e| !e.dead);
}

/// Enemy lasers: move down, expire below the arena, and end the game on the
/// first one that touches a living player.
pub fn update_enemy_lasers(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let config = &state.config;
    let player = &mut state.player;
    let status = &mut state.status;

    for laser in state.enemy_lasers.iter_mut() {
        laser.y += config.laser_speed;
        if laser.y > config.arena_height {
            laser.dead = true;
            events.push(GameEvent::Despawned { id: laser.id });
            continue;
        }

        if player.alive && rects_intersect(&laser.rect(config), &player.rect(config)) {
            destroy_player(player, status, events);
            break;
        }
    }

    state.enemy_lasers.retain(|l| !l.dead);
}

fn destroy_player(player: &mut Player, status: &mut GameStatus, events: &mut Vec<GameEvent>) {
    player.alive = false;
    *status = GameStatus::Lost;
    events.push(GameEvent::Despawned { id: player.id });
    events.push(GameEvent::PlaySound(Sound::Lose));
    info!(x = player.x, "player destroyed");
}

pub fn player_has_won(state: &GameState) -> bool {
    state.enemies.is_empty()
}

// ── Per-frame driver ─────────────────────────────────────────────────────────

/// Advance the simulation by one frame.
///
/// `clock_secs` drives the enemy sway and should increase continuously with
/// wall-clock time.  A lost game emits the game-over overlay and asks the
/// caller to stop scheduling frames; a won game keeps running.
pub fn tick(state: &mut GameState, clock_secs: f64) -> Frame {
    let mut events = Vec::new();

    if state.status == GameStatus::Lost {
        events.push(GameEvent::ShowOverlay(Overlay::GameOver));
        return Frame {
            events,
            schedule: Schedule::Halt,
        };
    }

    state.frame += 1;
    apply_input(state, &mut events);

    update_lasers(state, &mut events);
    update_enemies(state, &mut events, clock_secs);
    update_enemy_lasers(state, &mut events);

    if state.status != GameStatus::Lost && player_has_won(state) {
        if state.status != GameStatus::Won {
            info!(frame = state.frame, "all enemies destroyed");
        }
        state.status = GameStatus::Won;
        events.push(GameEvent::ShowOverlay(Overlay::Victory));
    }

    Frame {
        events,
        schedule: Schedule::NextFrame,
    }
}
