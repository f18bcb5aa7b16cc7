//! Writes a demo `best_model.json` and a matching `sample_employees.csv`
//! into the working directory.

/// Same artifact the model loader tests parse.
const DEMO_MODEL: &str = include_str!("../model/demo_model.json");

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    /// Uniform integer in `lo..=hi`.
    fn range(&mut self, lo: i64, hi: i64) -> i64 {
        lo + (self.next_u64() % (hi - lo + 1) as u64) as i64
    }
}

const NAMES: [&str; 8] = [
    "Avery", "Blake", "Casey", "Devon", "Emery", "Finley", "Harper", "Jordan",
];

fn main() {
    let mut rng = SimpleRng::new(42);

    // ---- Model artifact: logistic regression over the five features ----
    let model_path = "best_model.json";
    std::fs::write(model_path, DEMO_MODEL).expect("Failed to write model");

    // ---- Batch upload sample, with an extra `name` column ----
    let csv_path = "sample_employees.csv";
    let mut writer = csv::Writer::from_path(csv_path).expect("Failed to create output file");
    writer
        .write_record(["age", "education", "occupation", "hours-per-week", "experience", "name"])
        .expect("Failed to write header");

    let n_rows = 40;
    for i in 0..n_rows {
        let age = rng.range(18, 75);
        let experience = rng.range(0, (age - 18).min(50));
        let record = [
            age.to_string(),
            rng.range(0, 16).to_string(),
            rng.range(0, 20).to_string(),
            rng.range(1, 99).to_string(),
            experience.to_string(),
            format!("{} {i}", NAMES[i % NAMES.len()]),
        ];
        writer.write_record(&record).expect("Failed to write row");
    }
    writer.flush().expect("Failed to flush CSV");

    println!("Wrote {model_path} and {n_rows} employees to {csv_path}");
}
