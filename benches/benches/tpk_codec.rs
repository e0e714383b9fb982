//! Benchmark suite for the TPK animation pack and charset codecs
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::{hint::black_box, io::Cursor};
use ugpack_benches::{frame_names, generate_charset, generate_pack, generate_text, sizes};
use ugpack_types::{file::tpk::AnimationPack, hash::KeyDictionary};

/// Benchmark native block assembly
fn bench_assemble(c: &mut Criterion) {
	let mut group = c.benchmark_group("tpk_assemble");

	for (name, (slots, frames)) in
		[("small", sizes::SMALL), ("medium", sizes::MEDIUM), ("large", sizes::LARGE)]
	{
		let pack = generate_pack(slots, frames);
		group.throughput(Throughput::Elements((slots * frames) as u64));
		group.bench_with_input(BenchmarkId::new("assemble", name), &pack, |b, pack| {
			b.iter(|| black_box(pack.to_bytes()));
		});
	}

	group.finish();
}

/// Benchmark native block parsing, including frame redistribution and name lookup
fn bench_disassemble(c: &mut Criterion) {
	let mut group = c.benchmark_group("tpk_disassemble");

	for (name, (slots, frames)) in
		[("small", sizes::SMALL), ("medium", sizes::MEDIUM), ("large", sizes::LARGE)]
	{
		let Ok(data) = generate_pack(slots, frames).to_bytes() else {
			eprintln!("Warning: Could not assemble {name} pack");
			continue;
		};
		let dict = KeyDictionary::from_names(frame_names(slots, frames));

		group.throughput(Throughput::Bytes(data.len() as u64));
		group.bench_with_input(BenchmarkId::new("disassemble", name), &data, |b, data| {
			b.iter(|| black_box(AnimationPack::from_bytes(black_box(data), &dict)));
		});
	}

	group.finish();
}

/// Benchmark the compressed serialized form
fn bench_serialize(c: &mut Criterion) {
	let mut group = c.benchmark_group("tpk_serialize");
	let (slots, frames) = sizes::MEDIUM;
	let pack = generate_pack(slots, frames);
	let dict = KeyDictionary::from_names(frame_names(slots, frames));

	group.bench_function("serialize", |b| {
		b.iter(|| {
			let mut out = Vec::new();
			let result = pack.serialize(&mut out);
			black_box((result, out))
		});
	});

	let mut serialized = Vec::new();
	if pack.serialize(&mut serialized).is_err() {
		eprintln!("Warning: Could not serialize pack for deserialize benchmark");
		return;
	}
	group.bench_function("deserialize", |b| {
		b.iter(|| {
			let mut loaded = AnimationPack::new("BENCH_ANIMS");
			let result = loaded.deserialize_with_header(&mut Cursor::new(&serialized), &dict);
			black_box((result, loaded))
		});
	});

	group.finish();
}

/// Benchmark charset encoding and decoding
fn bench_charset(c: &mut Criterion) {
	let mut group = c.benchmark_group("charset");
	let charset = generate_charset();

	for len in [16usize, 256, 4096] {
		let text = generate_text(len);
		let encoded = charset.encode(&text);

		group.throughput(Throughput::Elements(len as u64));
		group.bench_with_input(BenchmarkId::new("encode", len), &text, |b, text| {
			b.iter(|| black_box(charset.encode(black_box(text))));
		});
		group.bench_with_input(BenchmarkId::new("decode", len), &encoded, |b, encoded| {
			b.iter(|| black_box(charset.decode(black_box(encoded))));
		});
	}

	group.finish();
}

criterion_group!(benches, bench_assemble, bench_disassemble, bench_serialize, bench_charset);
criterion_main!(benches);
