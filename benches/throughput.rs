use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use ruc::{encrypt_block, encrypt_blocks_batch, expand_key};

fn bench_expand_key(c: &mut Criterion) {
    let key = [0x42u8; 64];
    c.bench_function("expand_key", |b| b.iter(|| expand_key(black_box(&key))));
}

fn bench_encrypt_block(c: &mut Criterion) {
    let key = [0x42u8; 64];
    let iv = [0x24u8; 32];
    let km = expand_key(&key);
    let plaintext = [0xA5u8; 32];

    let mut group = c.benchmark_group("encrypt_block");
    group.throughput(Throughput::Bytes(32));
    group.bench_function("single", |b| {
        b.iter(|| encrypt_block(black_box(&plaintext), &key, &iv, 0, &km))
    });
    group.finish();
}

fn bench_encrypt_batch(c: &mut Criterion) {
    let key = [0x42u8; 64];
    let iv = [0x24u8; 32];
    let km = expand_key(&key);
    let plaintext = vec![0xA5u8; 64 * 32];
    let mut ciphertext = vec![0u8; plaintext.len()];

    let mut group = c.benchmark_group("encrypt_blocks_batch");
    group.throughput(Throughput::Bytes(plaintext.len() as u64));
    group.bench_function("64_blocks", |b| {
        b.iter(|| {
            encrypt_blocks_batch(
                black_box(&plaintext),
                &key,
                &iv,
                0,
                &km,
                &mut ciphertext,
            )
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_expand_key,
    bench_encrypt_block,
    bench_encrypt_batch
);
criterion_main!(benches);
