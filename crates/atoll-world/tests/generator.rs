use std::sync::{Mutex, MutexGuard};

use atoll_grid::{Grid, Size};
use atoll_world::{
    GenError, GenerationParameters, Generator, GeneratorKind, IslandPolicy, MapGenConfig,
    MapGenerator, Workers, noise_fill, regions, rng,
};

// The random source is process-wide; generators that draw from it run one at a time.
static SERIAL: Mutex<()> = Mutex::new(());

fn serial() -> MutexGuard<'static, ()> {
    SERIAL.lock().unwrap_or_else(|e| e.into_inner())
}

fn config(toml: &str) -> MapGenConfig {
    MapGenConfig::from_toml_str(toml).unwrap()
}

fn generate(cfg: &MapGenConfig) -> Grid {
    Generator::from_config(cfg)
        .unwrap()
        .generate_map(cfg.size)
        .unwrap()
}

#[test]
fn seeded_single_worker_automaton_is_reproducible() {
    let _guard = serial();
    let cfg = config(
        r#"
        seed = 2024
        workers = 1
        [size]
        width = 48
        height = 40
        [islands]
        policy = "keep_largest"
        "#,
    );
    let a = generate(&cfg);
    let b = generate(&cfg);
    assert_eq!(a, b);
    assert_eq!((a.width(), a.height()), (48, 40));
    assert!(regions::label(&a).1.region_count() <= 1);
}

#[test]
fn different_seeds_give_different_maps() {
    let _guard = serial();
    let a = generate(&config("seed = 1\nworkers = 1\n"));
    let b = generate(&config("seed = 2\nworkers = 1\n"));
    assert_ne!(a, b);
}

#[test]
fn new_seed_matches_a_fresh_generator() {
    let _guard = serial();
    let cfg = config("seed = 10\nworkers = 1\n");
    let mut generator = Generator::from_config(&cfg).unwrap();
    let _ = generator.generate_map(cfg.size).unwrap();
    generator.new_seed(99);
    let regenerated = generator.generate_map(cfg.size).unwrap();

    let fresh = generate(&config("seed = 99\nworkers = 1\n"));
    assert_eq!(regenerated, fresh);
}

#[test]
fn drop_smaller_than_leaves_only_big_regions() {
    let _guard = serial();
    let cfg = config(
        r#"
        seed = 5
        workers = 2
        [automaton]
        ground_probability = 0.45
        [islands]
        policy = "drop_smaller_than"
        threshold = 12
        "#,
    );
    let grid = generate(&cfg);
    let (_, counts) = regions::label(&grid);
    assert!(counts.regions().all(|(_, c)| c > 12));
}

#[test]
fn noise_generation_matches_direct_sampling() {
    let cfg = config(
        r#"
        generator = "noise"
        [size]
        width = 30
        height = 18
        [noise]
        scale = 6.0
        threshold = 0.45
        origin = [120.0, 33.5]
        "#,
    );
    let generator = Generator::from_config(&cfg).unwrap();
    assert_eq!(generator.kind(), GeneratorKind::Noise);
    let a = generator.generate_map(cfg.size).unwrap();
    let b = generator.generate_map(cfg.size).unwrap();
    let direct = noise_fill::fill(cfg.size, 6.0, 0.45, (120.0, 33.5)).unwrap();
    assert_eq!(a, b);
    assert_eq!(a, direct);
}

#[test]
fn seeded_noise_origin_is_reproducible() {
    let _guard = serial();
    let cfg = config("generator = \"noise\"\nseed = 77\n");
    let a = generate(&cfg);
    let b = generate(&cfg);
    assert_eq!(a, b);
}

#[test]
fn zero_sized_requests_produce_empty_grids() {
    let _guard = serial();
    for kind in [GeneratorKind::Automaton, GeneratorKind::Noise] {
        let generator =
            Generator::build(kind, GenerationParameters::default(), Workers::global()).unwrap();
        let grid = generator.generate_map(Size::new(0, 25)).unwrap();
        assert!(grid.is_empty());
        assert_eq!(grid.height(), 25);
    }
}

#[test]
fn invalid_requests_are_reported() {
    let _guard = serial();
    let generator = Generator::build(
        GeneratorKind::Automaton,
        GenerationParameters {
            island_policy: IslandPolicy::KeepLargest,
            ..Default::default()
        },
        Workers::global(),
    )
    .unwrap();
    assert_eq!(
        generator.generate_map(Size::new(3, -8)),
        Err(GenError::InvalidSize { width: 3, height: -8 })
    );

    let bad = config("[automaton]\nground_probability = -0.5\n");
    assert_eq!(
        Generator::from_config(&bad).unwrap_err(),
        GenError::InvalidProbability(-0.5)
    );
    let bad = config("generator = \"noise\"\n[noise]\nthreshold = 3.0\n");
    assert!(matches!(
        Generator::from_config(&bad),
        Err(GenError::InvalidThreshold(_))
    ));
}

fn draws_on_fresh_thread(n: usize) -> Vec<f64> {
    std::thread::spawn(move || (0..n).map(|_| rng::next_double()).collect())
        .join()
        .unwrap()
}

#[test]
fn rejected_config_does_not_reseed() {
    let _guard = serial();
    rng::reseed(500);
    let expected = draws_on_fresh_thread(4);

    for bad in [
        "seed = 1\n[automaton]\nground_probability = 7.0\n",
        "seed = 1\ngenerator = \"noise\"\n[noise]\nthreshold = 3.0\n",
        "seed = 1\n[islands]\npolicy = \"drop_smaller_than\"\nthreshold = -2\n",
    ] {
        rng::reseed(500);
        assert!(Generator::from_config(&config(bad)).is_err());
        assert_eq!(draws_on_fresh_thread(4), expected, "config: {bad}");
    }
}
