use bevy::prelude::{Vec2, Vec3};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

use html_tower::catalog::LevelCatalog;
use html_tower::config::{GameConfig, LayoutConfig};
use html_tower::engine::PuzzleEngine;
use html_tower::layout::spawn::{SafeSpawnSampler, SpawnArea};
use html_tower::layout::{generate, layout_rng};

fn bench_layout_generation(c: &mut Criterion) {
    let catalog = LevelCatalog::default();
    let config = LayoutConfig::default();

    c.bench_function("generate_layout_level_1", |b| {
        let def = catalog.get(1).unwrap();
        b.iter(|| generate(black_box(def), &config, &mut layout_rng(black_box(42))))
    });

    c.bench_function("generate_layout_level_10", |b| {
        let def = catalog.get(10).unwrap();
        b.iter(|| generate(black_box(def), &config, &mut layout_rng(black_box(42))))
    });
}

fn bench_safe_spawn(c: &mut Criterion) {
    let config = LayoutConfig::default();
    let area = SpawnArea::new(Vec2::new(-17.0, -10.0), Vec2::new(17.0, 17.0), 0.5);
    let sampler = SafeSpawnSampler::new(area, vec![Vec3::new(0.0, 0.34, -18.0)], &config);
    let blocked = SafeSpawnSampler::new(
        SpawnArea::new(Vec2::new(-1.0, -1.0), Vec2::new(1.0, 1.0), 0.5),
        vec![Vec3::ZERO],
        &config,
    );

    c.bench_function("safe_spawn_sample", |b| {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
        b.iter(|| sampler.sample(&mut rng))
    });

    c.bench_function("safe_spawn_sweep_fallback", |b| {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
        b.iter(|| blocked.sample(&mut rng))
    });
}

fn bench_engine_regeneration(c: &mut Criterion) {
    c.bench_function("engine_generate_level_10", |b| {
        let mut engine = PuzzleEngine::new(GameConfig::default(), LevelCatalog::default());
        engine.spawn_player(Vec3::new(0.0, 1.0, 0.0));
        b.iter(|| {
            let spots = engine
                .generate_level(black_box(10))
                .map(|l| l.spot_ids.len())
                .unwrap_or(0);
            engine.drain_signals();
            spots
        })
    });
}

criterion_group!(
    benches,
    bench_layout_generation,
    bench_safe_spawn,
    bench_engine_regeneration
);
criterion_main!(benches);
