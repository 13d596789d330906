use criterion::{black_box, criterion_group, criterion_main, Criterion};

use strikemap_choreo_core::{historical_timeline, Config, Engine, Inputs};
use strikemap_test_fixtures::{raw_records, FixedCamera, MockRenderer};

fn bench_autoplay_ticks(c: &mut Criterion) {
    c.bench_function("autoplay_full_run_16ms_ticks", |b| {
        b.iter(|| {
            let mut engine = Engine::new(Config::default());
            engine.load_timeline(historical_timeline());
            engine.load_records(raw_records());
            let cam = FixedCamera::default();
            let mut renderer = MockRenderer::new();
            engine.update(0.0, Inputs::play_all(), &cam, &mut renderer);
            let mut now = 0.0;
            while now < 15_000.0 {
                now += 16.0;
                black_box(engine.update(now, Inputs::default(), &cam, &mut renderer));
            }
            renderer.live_count()
        });
    });
}

fn bench_volley_tick(c: &mut Criterion) {
    c.bench_function("volley_steady_state_tick", |b| {
        let mut engine = Engine::new(Config::default());
        engine.load_timeline(historical_timeline());
        let cam = FixedCamera::default();
        let mut renderer = MockRenderer::new();
        engine.update(0.0, Inputs::jump_to(0), &cam, &mut renderer);
        let mut now = 0.0;
        // Warm up to peak concurrency, then measure a single restepped tick.
        while now < 2000.0 {
            now += 16.0;
            engine.update(now, Inputs::default(), &cam, &mut renderer);
        }
        b.iter(|| {
            black_box(engine.update(now, Inputs::default(), &cam, &mut renderer));
        });
    });
}

criterion_group!(benches, bench_autoplay_ticks, bench_volley_tick);
criterion_main!(benches);
