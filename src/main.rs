//! Barrage headless driver
//!
//! Builds a walled demo arena (or loads a map file), runs the simulation for
//! a fixed number of ticks and logs what happened.
//!
//! Usage: `barrage [seed] [ticks] [map.json]`

#[cfg(not(target_arch = "wasm32"))]
use barrage::sim::{ActorDef, ImpulseSet, MapDef, World, WorldEvent};
#[cfg(not(target_arch = "wasm32"))]
use barrage::{ConfigError, SimConfig};

#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_TICKS: u64 = 600;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let seed = args.first().and_then(|s| s.parse().ok()).unwrap_or(0xBA22_A6E);
    let ticks = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(DEFAULT_TICKS);

    log::info!("Barrage (native) starting, seed {} for {} ticks", seed, ticks);

    let def = match args.get(2) {
        Some(path) => load_map(path),
        None => Ok(demo_arena()),
    };
    let world = def.and_then(|def| World::from_map_def(SimConfig::with_seed(seed), &def));

    match world {
        Ok(world) => run(world, ticks),
        Err(e) => {
            log::error!("Failed to set up simulation: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No platform layer on wasm; the library is the deliverable there
}

#[cfg(not(target_arch = "wasm32"))]
fn load_map(path: &str) -> Result<MapDef, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(json) => MapDef::from_json(&json),
        Err(e) => {
            log::error!("Cannot read map {}: {}", path, e);
            std::process::exit(1);
        }
    }
}

/// 40x30 arena with a border wall, one spawner near the top and the player
/// start near the bottom
#[cfg(not(target_arch = "wasm32"))]
fn demo_arena() -> MapDef {
    const W: usize = 40;
    const H: usize = 30;
    let rows = (0..H)
        .map(|y| {
            (0..W)
                .map(|x| {
                    if x == 0 || y == 0 || x == W - 1 || y == H - 1 {
                        '#'
                    } else {
                        '.'
                    }
                })
                .collect()
        })
        .collect();

    MapDef {
        tile_size: None,
        layers: vec![rows],
        rune_map: [("#", "wall"), (".", "floor")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        start: [20, 24],
        actors: vec![ActorDef {
            kind: "spawner".to_string(),
            spawn: [20, 8],
            groups: None,
        }],
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn run(mut world: World, ticks: u64) {
    let player = world.add_player(None);

    let mut spawned = 0usize;
    let mut hits = 0usize;
    let mut absorbed = 0usize;
    let mut peak = 0usize;

    for t in 0..ticks {
        // Strafe left and right, reflecting in bursts and shielding now and then
        let phase = (t / 60) % 2;
        let impulses = ImpulseSet {
            movement: glam::Vec2::new(if phase == 0 { 1.0 } else { -1.0 }, 0.0),
            reflect: t % 45 < 5,
            deflect: None,
            shield: t % 120 >= 110,
        };
        world.set_impulses(player, impulses);
        world.tick();

        for event in world.events() {
            match event {
                WorldEvent::BulletsSpawned { count, .. } => spawned += count,
                WorldEvent::PlayerHit { .. } => hits += 1,
                WorldEvent::BulletAbsorbed { .. } => absorbed += 1,
            }
        }
        peak = peak.max(world.bullets().len());

        if (t + 1) % 100 == 0 {
            log::info!(
                "tick {}: {} bullets live, {} hits so far",
                world.time_ticks(),
                world.bullets().len(),
                hits
            );
        }
    }

    log::info!(
        "Done after {} ticks: {} spawned, {} live (peak {}), {} hits, {} absorbed",
        world.time_ticks(),
        spawned,
        world.bullets().len(),
        peak,
        hits,
        absorbed
    );
}
