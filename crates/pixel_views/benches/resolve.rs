use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use pixel_views::{ConcatenatedView, Plane, StridedView};

/// Number of sub-arrays.
const FAN_OUTS: &[usize] = &[1usize, 2usize, 4usize, 8usize, 16usize, 32usize, 128usize];

/// Pixels per sub-array.
const ARRAY_LEN: usize = 60;

fn make_view(fan_out: usize) -> ConcatenatedView<'static, u8> {
    let arrays = (0..fan_out)
        .map(|_| StridedView::owned(vec![0u8; ARRAY_LEN]))
        .collect();
    ConcatenatedView::new(arrays).unwrap()
}

fn bench_strategy(
    c: &mut Criterion,
    name: &str,
    find: fn(&ConcatenatedView<'static, u8>, usize) -> usize,
) {
    let mut group = c.benchmark_group(name);

    for fan_out in FAN_OUTS.iter().copied() {
        group.throughput(Throughput::Elements((fan_out * ARRAY_LEN) as u64));
        group.bench_with_input(
            criterion::BenchmarkId::from_parameter(fan_out),
            &(fan_out,),
            |b, (fan_out,)| {
                let view = make_view(*fan_out);
                b.iter(|| {
                    let mut sum = 0usize;
                    for i in 0..view.len() {
                        sum = sum.wrapping_add(find(&view, i));
                    }
                    black_box(sum);
                });
            },
        );
    }
}

pub fn linear(c: &mut Criterion) {
    bench_strategy(c, "resolve_linear", ConcatenatedView::find_array_linear);
}

pub fn bisect(c: &mut Criterion) {
    bench_strategy(c, "resolve_bisect", ConcatenatedView::find_array_bisect);
}

/// Whole-view iteration, which steps a cursor instead of resolving every index.
pub fn iterate(c: &mut Criterion) {
    let mut group = c.benchmark_group("iterate");

    for fan_out in FAN_OUTS.iter().copied() {
        group.throughput(Throughput::Elements((fan_out * ARRAY_LEN) as u64));
        group.bench_with_input(
            criterion::BenchmarkId::from_parameter(fan_out),
            &(fan_out,),
            |b, (fan_out,)| {
                let view = make_view(*fan_out);
                b.iter(|| {
                    let sum = view
                        .iter()
                        .fold(0u32, |acc, c| acc.wrapping_add(c.get() as u32));
                    black_box(sum);
                });
            },
        );
    }
}

criterion_group!(benches, linear, bisect, iterate);
criterion_main!(benches);
