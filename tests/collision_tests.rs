use galaxy_sim::{
    core::merge_until_stable, merge_collisions, purge_non_finite, Body, DVec2, GalaxyConfig,
    GalaxyGenerator, Rgb,
};

fn star(mass: f64, x: f64, y: f64) -> Body {
    Body::new(mass, DVec2::new(x, y), DVec2::ZERO, Rgb::WHITE)
}

fn assert_no_overlaps(bodies: &[Body]) {
    for (i, a) in bodies.iter().enumerate() {
        for b in &bodies[i + 1..] {
            assert!(!a.overlaps(b), "{:?} overlaps {:?}", a.position, b.position);
        }
    }
}

#[test]
fn test_merge_keeps_survivor_slot_and_order() {
    let mut bodies = vec![
        star(1.0, 0.0, 0.0),
        star(1.0, 50.0, 0.0),
        star(1.0, 1.0, 0.0),
        star(1.0, 100.0, 0.0),
    ];
    assert_eq!(merge_collisions(&mut bodies), 1);
    assert_eq!(bodies.len(), 3);
    assert_eq!(bodies[0].mass, 2.0);
    assert_eq!(bodies[1].position, DVec2::new(50.0, 0.0));
    assert_eq!(bodies[2].position, DVec2::new(100.0, 0.0));
}

#[test]
fn test_chain_of_overlaps_collapses_in_one_pass() {
    let mut bodies: Vec<Body> = (0..5).map(|i| star(1.0, i as f64 * 0.5, 0.0)).collect();
    assert_eq!(merge_collisions(&mut bodies), 4);
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0].mass, 5.0);
}

#[test]
fn test_merge_until_stable_leaves_no_overlaps() {
    let mut generator = GalaxyGenerator::seeded(GalaxyConfig::default(), 5).unwrap();
    let mut bodies = generator.generate(DVec2::ZERO);
    let mass: f64 = bodies.iter().map(|b| b.mass).sum();

    merge_until_stable(&mut bodies);

    assert_no_overlaps(&bodies);
    let merged_mass: f64 = bodies.iter().map(|b| b.mass).sum();
    assert!((merged_mass - mass).abs() <= mass * 1e-9);
    assert_eq!(merge_collisions(&mut bodies), 0);
}

#[test]
fn test_purge_is_idempotent() {
    let mut bodies = vec![
        star(1.0, 0.0, 0.0),
        star(1.0, f64::NAN, 1.0),
        star(1.0, 5.0, f64::NEG_INFINITY),
        star(1.0, 10.0, 10.0),
    ];
    assert_eq!(purge_non_finite(&mut bodies), 2);
    let after_first = bodies.clone();
    assert_eq!(purge_non_finite(&mut bodies), 0);
    assert_eq!(bodies, after_first);
    assert!(bodies.iter().all(Body::is_finite));
}
