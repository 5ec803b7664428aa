use criterion::{black_box, criterion_group, criterion_main, Criterion};
use payline::selection::{CombinationGenerator, UniformPicker};
use payline::{build_path, Grid, MemoryRenderer, PaylineSet, RectD};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn grid() -> Grid {
    Grid::build(RectD::new(0.0, 0.0, 1024.0, 768.0), 3, 5, 0.05, 0.05).unwrap()
}

fn bench_build_path(c: &mut Criterion) {
    let g = grid();
    let mut picker = UniformPicker::new(StdRng::seed_from_u64(1));
    let visible = payline::selection::select_line(&g, &mut picker).unwrap();
    let hidden: Vec<_> = visible
        .iter()
        .map(|cell| cell.with_visibility(cell.id().column % 2 == 0))
        .collect();

    c.bench_function("build_path visible", |b| {
        b.iter(|| build_path(black_box(&visible), 5.0, None, None).unwrap())
    });
    c.bench_function("build_path hidden", |b| {
        b.iter(|| build_path(black_box(&hidden), 5.0, None, None).unwrap())
    });
}

fn bench_rebuild_set(c: &mut Criterion) {
    let g = grid();
    let generator = CombinationGenerator::new(20, 20, 3.0, 8.0).unwrap();
    let mut rng = StdRng::seed_from_u64(2);
    let mut renderer = MemoryRenderer::new();
    let mut set = PaylineSet::new();

    c.bench_function("rebuild 20 paylines", |b| {
        b.iter(|| {
            let lines = generator.generate(&g, false, &mut rng).unwrap();
            set.rebuild(&mut renderer, lines).unwrap();
        })
    });
    set.clear(&mut renderer);
}

criterion_group!(benches, bench_build_path, bench_rebuild_set);
criterion_main!(benches);
