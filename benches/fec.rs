use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pdu_fec::fec::{CodecConfig, ErrorCorrection, FecCodec, Scheme};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SIZES: [usize; 3] = [48, 1536, 49152];

fn payload(len: usize) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(1);
    (0..len).map(|_| rng.gen()).collect()
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("fec_encode");
    for scheme in [Scheme::Repetition3, Scheme::Golay24_12] {
        let codec = FecCodec::new(CodecConfig::new(scheme));
        for size in SIZES {
            let data = payload(size);
            group.throughput(Throughput::Bytes(size as u64));
            group.bench_with_input(BenchmarkId::new(scheme.to_string(), size), &data, |b, data| {
                b.iter(|| codec.encode(black_box(data)).unwrap())
            });
        }
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("fec_decode");
    for scheme in [Scheme::Repetition3, Scheme::Golay24_12] {
        let codec = FecCodec::new(CodecConfig::new(scheme));
        for size in SIZES {
            let mut encoded = codec.encode(&payload(size)).unwrap();
            // One error every 7 bytes keeps the decoder on its correction paths
            for byte in encoded.iter_mut().step_by(7) {
                *byte ^= 0x10;
            }
            group.throughput(Throughput::Bytes(size as u64));
            group.bench_with_input(
                BenchmarkId::new(scheme.to_string(), size),
                &encoded,
                |b, encoded| b.iter(|| codec.decode_with_report(black_box(encoded)).unwrap()),
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
