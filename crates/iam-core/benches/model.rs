//! Benchmarks for the word model
//!
//! Tests performance of:
//! - Weight construction for growing vocabularies
//! - A single synchronous network step
//! - A full 40-step masked trial

#![allow(clippy::expect_used)] // Fine in benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use iam_core::{
	LetterTable, ModelParams, ModelWeights, SimulationSettings, Target, VocabEntry, Vocabulary,
	WordModel,
};
use rand::Rng;

/// Random four-letter strings with frequencies in [-1, 0]
fn generate_vocabulary(count: usize) -> Vocabulary {
	let mut rng = rand::thread_rng();
	let entries = (0..count)
		.map(|_| {
			let word: String = (0..4).map(|_| char::from(rng.gen_range(b'a'..=b'z'))).collect();
			VocabEntry::new(word, -rng.gen::<f64>())
		})
		.collect();
	Vocabulary::new(entries).expect("generated words are valid")
}

fn bench_weight_construction(c: &mut Criterion) {
	let mut group = c.benchmark_group("weight_construction");
	let table = LetterTable::standard();
	let params = ModelParams::classic();

	for count in &[100, 500, 1000, 2000] {
		let vocabulary = generate_vocabulary(*count);

		let _ = group.throughput(Throughput::Elements(*count as u64));
		let _ = group.bench_with_input(BenchmarkId::new("words", count), count, |bench, _| {
			bench.iter(|| ModelWeights::build(black_box(&table), black_box(&vocabulary), &params));
		});
	}

	group.finish();
}

fn bench_step(c: &mut Criterion) {
	let mut group = c.benchmark_group("step_model");

	for count in &[100, 500, 1000, 2000] {
		let mut model = WordModel::new(generate_vocabulary(*count), ModelParams::classic())
			.expect("model should build");
		let stimulus = model.text_to_features("read");

		let _ = group.throughput(Throughput::Elements(*count as u64));
		let _ = group.bench_with_input(BenchmarkId::new("words", count), count, |bench, _| {
			bench.iter(|| model.step_model(black_box(&stimulus), true));
		});
	}

	group.finish();
}

fn bench_trial(c: &mut Criterion) {
	let mut group = c.benchmark_group("run_trial");
	let settings = SimulationSettings::default();

	for count in &[100, 1000] {
		let mut model = WordModel::new(generate_vocabulary(*count), ModelParams::classic())
			.expect("model should build");
		let targets = vec![
			Target::letter("E", 1, 'e').expect("valid letter"),
			Target::word("first", 0),
		];
		let trial = settings.trial(model.text_to_features("read"), targets);

		let _ = group.bench_with_input(BenchmarkId::new("words", count), count, |bench, _| {
			bench.iter(|| model.run_trial(black_box(&trial)));
		});
	}

	group.finish();
}

criterion_group!(benches, bench_weight_construction, bench_step, bench_trial);

criterion_main!(benches);
