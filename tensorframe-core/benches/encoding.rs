use bytes::{Bytes, BytesMut};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tensorframe_core::{
    constants::TrailerType,
    decoder::{decode_container, decode_container_zero_copy},
    encoder::{encode_container, encode_into},
    ElementType, FrameRate, TensorInfo, TensorsConfig,
};

/// One float32 tensor of `side * side` elements plus a small uint8 label tensor
fn frame(side: u32) -> (TensorsConfig, Vec<Vec<u8>>) {
    let config = TensorsConfig::new(
        vec![
            TensorInfo::named("image", ElementType::Float32, &[side, side]).unwrap(),
            TensorInfo::named("label", ElementType::Uint8, &[16]).unwrap(),
        ],
        FrameRate::new(30, 1).unwrap(),
    )
    .unwrap();
    let buffers = vec![vec![0x42u8; (side * side * 4) as usize], vec![7u8; 16]];
    (config, buffers)
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    for side in [16u32, 64, 256] {
        let (config, buffers) = frame(side);
        let input: Vec<&[u8]> = buffers.iter().map(Vec::as_slice).collect();
        let size: usize = buffers.iter().map(Vec::len).sum();

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                encode_container(black_box(&config), black_box(&input), TrailerType::None).unwrap()
            });
        });
    }

    group.finish();
}

fn bench_encode_reuse(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_reuse");

    for side in [16u32, 64, 256] {
        let (config, buffers) = frame(side);
        let input: Vec<&[u8]> = buffers.iter().map(Vec::as_slice).collect();
        let size: usize = buffers.iter().map(Vec::len).sum();
        let mut out = BytesMut::new();

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| encode_into(&config, &input, TrailerType::None, &mut out).unwrap());
        });
    }

    group.finish();
}

fn bench_encode_with_trailer(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_trailer");
    let (config, buffers) = frame(64);
    let input: Vec<&[u8]> = buffers.iter().map(Vec::as_slice).collect();

    for trailer in [TrailerType::Crc32c, TrailerType::Blake3] {
        group.bench_with_input(BenchmarkId::from_parameter(trailer.name()), &trailer, |b, &t| {
            b.iter(|| encode_container(&config, &input, t).unwrap());
        });
    }

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    for side in [16u32, 64, 256] {
        let (config, buffers) = frame(side);
        let input: Vec<&[u8]> = buffers.iter().map(Vec::as_slice).collect();
        let encoded = encode_container(&config, &input, TrailerType::Crc32c).unwrap();

        group.throughput(Throughput::Bytes(encoded.len() as u64));
        group.bench_with_input(BenchmarkId::new("copy", encoded.len()), &encoded, |b, data| {
            b.iter(|| decode_container(black_box(data)).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("zero_copy", encoded.len()), &encoded, |b, data| {
            b.iter(|| decode_container_zero_copy(black_box(Bytes::clone(data))).unwrap());
        });
    }

    group.finish();
}

fn bench_round_trip(c: &mut Criterion) {
    let mut group = c.benchmark_group("round_trip");
    let (config, buffers) = frame(64);
    let input: Vec<&[u8]> = buffers.iter().map(Vec::as_slice).collect();

    group.bench_function("float32_64x64", |b| {
        b.iter(|| {
            let encoded = encode_container(&config, &input, TrailerType::Crc32c).unwrap();
            let decoded = decode_container_zero_copy(encoded).unwrap();
            black_box(decoded);
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_encode,
    bench_encode_reuse,
    bench_encode_with_trailer,
    bench_decode,
    bench_round_trip
);
criterion_main!(benches);
