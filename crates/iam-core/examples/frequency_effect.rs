//! Frequency Effect Example
//!
//! MAVE is not a word, but it shares three letters with HAVE, GAVE and
//! SAVE. All three rise together; the most frequent one starts nearest
//! threshold and pulls ahead ("the rich get richer").
//!
//! Also shows loading a configuration document and listing the model's
//! best guesses after the trial.
//!
//! Run with: `cargo run --example frequency_effect`

use iam_core::{Experiment, SimulationConfig, Vocabulary, WordModel};

const CONFIG: &str = r#"{
	"simulation": { "maxSteps": 40, "maskEnabled": true, "maskStart": 20 }
}"#;

fn main() -> iam_core::Result<()> {
	println!("=== Rich Get Richer ===\n");

	let config = SimulationConfig::from_json_str(CONFIG)?;
	let vocabulary = Vocabulary::from_pairs(&[
		("have", -0.05), // very common
		("gave", -0.45),
		("save", -0.60), // rare
		("male", -0.55),
		("move", -0.30),
		("wave", -0.50),
	])?;
	let mut model = WordModel::new(vocabulary, config.parameters.clone())?;

	let result = Experiment::RichGetRicher.run(&mut model)?;
	println!("{}\n", result.title);
	for series in &result.series {
		let peak = series.values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
		let last = series.values.last().copied().unwrap_or_default();
		println!("{:<6} peak {peak:>8.4}   final {last:>8.4}", series.label);
	}

	println!("\nTop words after the mask:");
	for ranked in model.top_words(3)? {
		println!("  {:<6} {:>8.4}", ranked.label, ranked.activation);
	}

	println!("\nTop letters per position:");
	for position in model.top_letters(2)? {
		let letters: Vec<String> = position
			.letters
			.iter()
			.map(|l| format!("{}={:.3}", l.label, l.activation))
			.collect();
		println!("  [{}] {}", position.position, letters.join("  "));
	}

	Ok(())
}
