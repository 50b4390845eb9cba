use invaders::config::GameConfig;
use invaders::entities::*;
use invaders::geometry::rects_intersect;

fn empty_state() -> GameState {
    GameState {
        config: GameConfig::default(),
        player: Player {
            id: EntityId(0),
            x: 400.0,
            y: 550.0,
            alive: true,
        },
        input: InputFlags::default(),
        laser_cooldown: 0,
        enemies: Vec::new(),
        lasers: Vec::new(),
        enemy_lasers: Vec::new(),
        status: GameStatus::Running,
        frame: 0,
        next_id: 1,
    }
}

#[test]
fn alloc_id_is_monotonic() {
    let mut s = empty_state();
    let a = s.alloc_id();
    let b = s.alloc_id();
    assert_eq!(a, EntityId(1));
    assert_eq!(b, EntityId(2));
    assert_eq!(s.next_id, 3);
}

#[test]
fn sprite_tags_match_assets() {
    assert_eq!(Sprite::Player.class(), "player");
    assert_eq!(Sprite::Enemy.class(), "enemy");
    assert_eq!(Sprite::Laser.class(), "laser");
    assert_eq!(Sprite::EnemyLaser.class(), "enemy-laser");
    assert_eq!(Sprite::EnemyLaser.image(), "media/img/laser-red-5.png");
    assert_eq!(Sound::Laser.resource(), "media/sound/sfx-laser1.ogg");
    assert_eq!(Sound::Lose.resource(), "media/sound/sfx-lose.ogg");
}

#[test]
fn enemy_position_adds_sway_to_home() {
    let e = Enemy {
        id: EntityId(3),
        x: 100.0,
        y: 70.0,
        dx: -12.5,
        dy: 4.0,
        cooldown: 10.0,
        dead: false,
    };
    assert_eq!(e.position(), (87.5, 74.0));
    let r = e.rect(&GameConfig::default());
    assert_eq!((r.left, r.right), (67.5, 107.5));
    assert_eq!((r.top, r.bottom), (59.0, 89.0));
}

#[test]
fn entity_rects_are_centred() {
    let config = GameConfig::default();
    let s = empty_state();
    let p = s.player.rect(&config);
    assert_eq!((p.left, p.right, p.top, p.bottom), (380.0, 420.0, 535.0, 565.0));

    let l = Laser { id: EntityId(9), x: 400.0, y: 525.0, dead: false };
    let r = l.rect(&config);
    assert_eq!((r.left, r.right, r.top, r.bottom), (397.0, 403.0, 515.0, 535.0));
    // Bottom edge of the laser touches the top of the player.
    assert!(rects_intersect(&r, &p));
}

#[test]
fn game_state_clone_is_independent() {
    let original = empty_state();
    let mut cloned = original.clone();

    cloned.player.x = 99.0;
    cloned.laser_cooldown = 7;
    cloned.lasers.push(Laser { id: EntityId(5), x: 1.0, y: 1.0, dead: false });

    assert_eq!(original.player.x, 400.0);
    assert_eq!(original.laser_cooldown, 0);
    assert!(original.lasers.is_empty());
}
