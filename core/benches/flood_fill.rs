use criterion::{Criterion, criterion_group, criterion_main};
use minesweep_core::{Engine, RevealOutcome};
use std::hint::black_box;

fn open_board(c: &mut Criterion) {
    let mut group = c.benchmark_group("flood_fill");

    for side in [16, 64, 256] {
        group.bench_function(format!("open_{side}x{side}"), |b| {
            b.iter_batched(
                || {
                    let mut engine = Engine::with_seed(side, side, 0).unwrap();
                    engine.place_mine((side - 1, side - 1)).unwrap();
                    engine
                },
                |mut engine| {
                    let outcome = engine.reveal(black_box((0, 0))).unwrap();
                    assert_eq!(outcome, RevealOutcome::Revealed(0));
                    engine
                },
                criterion::BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

fn reveal_random_boards(c: &mut Criterion) {
    c.bench_function("reveal_all_40x40_random", |b| {
        b.iter_batched(
            || {
                let mut engine = Engine::with_seed(40, 40, 7).unwrap();
                engine.place_random_mines(160).unwrap();
                engine
            },
            |mut engine| {
                for y in 0..40 {
                    for x in 0..40 {
                        if !engine.has_mine_at((x, y)) {
                            black_box(engine.reveal((x, y)).unwrap());
                        }
                    }
                }
                engine
            },
            criterion::BatchSize::LargeInput,
        )
    });
}

criterion_group!(benches, open_board, reveal_random_boards);
criterion_main!(benches);
