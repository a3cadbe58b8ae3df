use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tensorframe_core::{
    caps::{parse_caps, tensors_caps_string, MEDIA_TENSORS},
    ElementType, FrameRate, TensorInfo, TensorsConfig,
};

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_caps");

    let single = "other/tensor, rank=(int)3, dim1=(int)3, dim2=(int)224, dim3=(int)224, \
                  type=(string)uint8, framerate=(fraction)30/1";
    group.bench_function("single", |b| {
        b.iter(|| parse_caps(black_box(single)).unwrap());
    });

    let tensors: Vec<TensorInfo> = (0..16)
        .map(|i| TensorInfo::named(format!("t{}", i), ElementType::Float32, &[4, i + 1]).unwrap())
        .collect();
    let config = TensorsConfig::new(tensors, FrameRate::new(60, 1).unwrap()).unwrap();
    let multi = tensors_caps_string(MEDIA_TENSORS, &config);
    group.bench_function("multi_16", |b| {
        b.iter(|| parse_caps(black_box(&multi)).unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_parse);
criterion_main!(benches);
