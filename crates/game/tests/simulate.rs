use paperplane_game::{Flight, GameConfig, Outcome, Pilot, PilotKind};

fn fly(config: &GameConfig, kind: PilotKind, frames: u64) -> Flight {
    let mut flight = Flight::new(config.clone()).unwrap();
    let mut pilot = Pilot::new(kind);
    while flight.frame_count() < frames && !flight.is_over() {
        let observation = flight.observation().unwrap();
        let events = pilot.events(&observation, flight.config());
        flight.process_events(&events);
        flight.step().unwrap();
        flight.frame().unwrap();
    }
    flight
}

fn seeded(seed: u64) -> GameConfig {
    GameConfig {
        seed: Some(seed),
        ..GameConfig::default()
    }
}

#[test]
fn glider_dives_into_the_floor() {
    let flight = fly(&seeded(5), PilotKind::Glide, 1000);
    assert_eq!(flight.outcome(), Some(Outcome::Crashed { score: 0 }));
    assert!(flight.frame_count() < 200);
}

#[test]
fn holder_bounces_along_the_ceiling_into_a_wall() {
    let flight = fly(&seeded(5), PilotKind::Hold, 2000);
    assert!(matches!(flight.outcome(), Some(Outcome::Crashed { .. })));
    let plane = flight.world().get_one(flight.plane_id()).unwrap();
    assert!(plane.transform.unwrap().position.y < 0.0);
}

#[test]
fn same_seed_same_flight() {
    let a = fly(&seeded(42), PilotKind::Seek, 1500);
    let b = fly(&seeded(42), PilotKind::Seek, 1500);
    assert_eq!(a.frame_count(), b.frame_count());
    assert_eq!(a.score(), b.score());
    assert_eq!(a.outcome(), b.outcome());
    assert_eq!(a.observation().unwrap(), b.observation().unwrap());
}

#[test]
fn config_file_drives_the_flight() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("flight.yaml");
    std::fs::write(&path, "seed: 9\ncruise_distance: 50.0\n").unwrap();
    let config = GameConfig::load(&path).unwrap();

    let flight = fly(&config, PilotKind::Glide, 6);
    assert_eq!(flight.phase(), paperplane_game::Phase::Acrobatic);
}
