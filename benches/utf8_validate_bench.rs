//! Benchmarks for UTF-8 views.
//!
//! Measures validation, lossy repair, character counting and random access
//! across content types and sizes.
//!
//! ## Content Types
//!
//! - **ASCII**: Pure 7-bit ASCII content
//! - **Mixed**: Realistic mix of ASCII and multi-byte characters
//! - **CJK**: 3-byte sequences
//! - **Emoji**: 4-byte sequences
//! - **Corrupted**: Mixed content with one invalid byte every 64 bytes
//!
//! ## Sizes
//!
//! 1KB, 10KB, 100KB, 1MB

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use utf8view::{validate_utf8, Utf8Str, Utf8String};

const SIZES: [usize; 4] = [1024, 10 * 1024, 100 * 1024, 1024 * 1024];

/// Repeat `pattern` up to `size` bytes, padding with ASCII so no character is split.
fn repeat_to(pattern: &str, size: usize) -> Vec<u8> {
    let bytes = pattern.as_bytes();
    let mut result = Vec::with_capacity(size);
    while result.len() + bytes.len() <= size {
        result.extend_from_slice(bytes);
    }
    result.resize(size, b' ');
    result
}

fn generate_ascii(size: usize) -> Vec<u8> {
    repeat_to(
        "The quick brown fox jumps over the lazy dog. 0123456789!@#$%^&*()_+-=[]{}|;':\",./<>?\n",
        size,
    )
}

fn generate_mixed(size: usize) -> Vec<u8> {
    repeat_to(
        "Hello, world! Café résumé naïve über. Здравствуйте. こんにちは 日本語. 🚩😁 more text.\n",
        size,
    )
}

fn generate_cjk(size: usize) -> Vec<u8> {
    repeat_to("日本語中文漢字ひらがなカタカナこんにちは世界", size)
}

fn generate_emoji(size: usize) -> Vec<u8> {
    repeat_to("🎉🚀💻🔥🌍😀🎯💡🚩😁", size)
}

/// Mixed content with a lone continuation byte every 64 bytes.
fn generate_corrupted(size: usize) -> Vec<u8> {
    let mut data = generate_mixed(size);
    for pos in (63..data.len()).step_by(64) {
        data[pos] = 0x80;
    }
    data
}

const INPUTS: [(&str, fn(usize) -> Vec<u8>); 4] = [
    ("ascii", generate_ascii),
    ("mixed", generate_mixed),
    ("cjk", generate_cjk),
    ("emoji", generate_emoji),
];

fn bench_validate(c: &mut Criterion) {
    for (name, generate) in INPUTS {
        let mut group = c.benchmark_group(format!("validate/{}", name));

        for size in SIZES {
            let data = generate(size);
            let size_name = format_size(size);

            group.throughput(Throughput::Bytes(size as u64));
            group.bench_with_input(BenchmarkId::new("utf8view", &size_name), &data, |b, data| {
                b.iter(|| validate_utf8(black_box(data)));
            });
            group.bench_with_input(BenchmarkId::new("core_str", &size_name), &data, |b, data| {
                b.iter(|| core::str::from_utf8(black_box(data)).is_ok());
            });
        }

        group.finish();
    }
}

fn bench_lossy(c: &mut Criterion) {
    let mut group = c.benchmark_group("lossy");

    for size in SIZES {
        let size_name = format_size(size);
        let clean = generate_mixed(size);
        let corrupted = generate_corrupted(size);

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("valid", &size_name), &clean, |b, data| {
            b.iter(|| Utf8String::from_utf8_lossy(black_box(data)));
        });
        group.bench_with_input(
            BenchmarkId::new("corrupted", &size_name),
            &corrupted,
            |b, data| {
                b.iter(|| Utf8String::from_utf8_lossy(black_box(data)));
            },
        );
    }

    group.finish();
}

fn bench_char_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("char_count");

    for (name, generate) in INPUTS {
        let data = generate(100 * 1024);
        let view = match Utf8Str::new(&data) {
            Ok(view) => view,
            Err(e) => panic!("generated {} input is invalid: {}", name, e),
        };

        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &view, |b, view| {
            b.iter(|| black_box(view).char_count());
        });
    }

    group.finish();
}

fn bench_nth_char(c: &mut Criterion) {
    let mut group = c.benchmark_group("nth_char");

    let data = generate_mixed(100 * 1024);
    let view = match Utf8Str::new(&data) {
        Ok(view) => view,
        Err(e) => panic!("generated input is invalid: {}", e),
    };
    let count = view.char_count();

    for (label, index) in [("start", 0), ("middle", count / 2), ("end", count - 1)] {
        group.bench_with_input(BenchmarkId::from_parameter(label), &index, |b, &index| {
            b.iter(|| view.nth_char(black_box(index)));
        });
    }

    group.finish();
}

fn bench_error_at_end(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate/error_at_end");

    for size in SIZES {
        let mut data = generate_ascii(size);
        if let Some(last) = data.last_mut() {
            *last = 0x80;
        }

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format_size(size)),
            &data,
            |b, data| {
                b.iter(|| validate_utf8(black_box(data)));
            },
        );
    }

    group.finish();
}

fn format_size(bytes: usize) -> String {
    if bytes >= 1024 * 1024 {
        format!("{}MB", bytes / (1024 * 1024))
    } else if bytes >= 1024 {
        format!("{}KB", bytes / 1024)
    } else {
        format!("{}B", bytes)
    }
}

criterion_group!(
    benches,
    bench_validate,
    bench_lossy,
    bench_char_count,
    bench_nth_char,
    bench_error_at_end,
);

criterion_main!(benches);
