//! Word Superiority Example
//!
//! The classic demonstration: E is shown inside READ with the word layer
//! running, then on its own with the word layer switched off. Both are
//! masked after 20 steps. Feedback from READ (and its neighbours) keeps
//! the in-word E ahead.
//!
//! Run with: `cargo run --example word_superiority`

use iam_core::{Experiment, ModelParams, Vocabulary, WordModel};

fn main() -> iam_core::Result<()> {
	println!("=== Word Superiority ===\n");

	// A neighbourhood around READ and MAVE
	let vocabulary = Vocabulary::from_pairs(&[
		("read", -0.20),
		("real", -0.25),
		("road", -0.30),
		("head", -0.15),
		("dead", -0.35),
		("bead", -0.90),
		("have", -0.05),
		("gave", -0.45),
		("save", -0.60),
		("wave", -0.50),
	])?;
	let mut model = WordModel::new(vocabulary, ModelParams::classic())?;

	for experiment in [Experiment::WordSuperiority, Experiment::PseudowordSuperiority] {
		let result = experiment.run(&mut model)?;
		println!("{}", result.title);
		println!("{}\n", result.description);

		print!("{:>6}", "step");
		for series in &result.series {
			print!("{:>12}", series.label);
		}
		println!();

		for t in result.time_points.iter().step_by(5) {
			print!("{t:>6}");
			for series in &result.series {
				print!("{:>12.4}", series.values[*t]);
			}
			println!();
		}
		println!();
	}

	Ok(())
}
