//! Throughput benchmarks for the fetch/decode/execute cycle and the CPU
//! dump pretty-printer.

use std::fs;
use std::sync::atomic::{AtomicU32, Ordering};

use chip::chip8::{ChipSet, Options};
use chip::resources::Rom;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

static COUNTER: AtomicU32 = AtomicU32::new(0);

/// A tight, never-faulting loop: `V0 += 1; JP back to the ADD`. Exercises
/// the `7XKK` and `1NNN` dispatch paths indefinitely without ever hitting
/// an execution fault, so `step()` can be called as many times as the
/// benchmark harness likes.
fn counting_loop_rom() -> Rom {
    let path = std::env::temp_dir().join(format!(
        "chip8-bench-{}-{}.ch8",
        std::process::id(),
        COUNTER.fetch_add(1, Ordering::Relaxed)
    ));
    fs::write(&path, [0x70, 0x01, 0x12, 0x02]).expect("failed to write bench fixture rom");
    let rom = Rom::load(&path).expect("failed to load bench fixture rom");
    let _ = fs::remove_file(&path);
    rom
}

fn step_bench(c: &mut Criterion) {
    let rom = counting_loop_rom();
    let mut chip = ChipSet::new(&rom, Options::default());
    c.bench_function("step", |b| {
        b.iter(|| {
            chip.step().expect("counting loop never faults");
            black_box(());
        });
    });
}

fn print_bench(c: &mut Criterion) {
    let rom = counting_loop_rom();
    let chip = ChipSet::new(&rom, Options::default());
    c.bench_function("print", |b| {
        b.iter(|| {
            let _ = black_box(format!("{}", chip));
        });
    });
}

criterion_group!(benches, step_bench, print_bench);
criterion_main!(benches);
