use serde::Serialize;

/// One synthetic posting, serialized in the dashboard's input layout.
#[derive(Serialize)]
struct JobRow {
    job_id: String,
    job_title: &'static str,
    company_name: &'static str,
    experience_level: &'static str,
    salary_usd: u64,
    remote_category: &'static str,
    company_location: &'static str,
    company_size: &'static str,
    year: i64,
    required_skills: String,
}

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

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

const TITLES: &[&str] = &[
    "Machine Learning Engineer",
    "Data Scientist",
    "AI Research Scientist",
    "NLP Engineer",
    "Computer Vision Engineer",
    "MLOps Engineer",
    "Data Engineer",
    "AI Product Manager",
    "Deep Learning Engineer",
    "Robotics Engineer",
    "AI Consultant",
    "Research Engineer",
];

const COMPANIES: &[&str] = &[
    "TechCorp Inc",
    "Cognitive Systems",
    "DataVision Ltd",
    "Neural Networks Co",
    "Algorithmic Solutions",
    "Quantum Labs",
    "Predictive Systems",
    "Smart Analytics",
    "Future Systems",
    "Autonomous Tech",
    "Machine Intelligence Group",
    "Digital Transformation LLC",
];

const COUNTRIES: &[&str] = &[
    "United States",
    "Germany",
    "United Kingdom",
    "Canada",
    "France",
    "India",
    "Singapore",
    "Japan",
    "Switzerland",
    "Australia",
    "Netherlands",
    "Sweden",
    "Israel",
    "China",
    "Ireland",
    "Denmark",
];

const SKILLS: &[&str] = &[
    "Python", "SQL", "TensorFlow", "PyTorch", "Kubernetes", "Docker", "AWS", "Azure", "GCP",
    "Scala", "Spark", "Hadoop", "NLP", "Computer Vision", "Deep Learning", "MLOps", "Git",
    "Linux", "R", "Java", "Statistics", "Mathematics", "Tableau", "Data Visualization",
];

/// (level, base salary)
const LEVELS: &[(&str, f64)] = &[
    ("Entry", 65_000.0),
    ("Mid", 95_000.0),
    ("Senior", 135_000.0),
    ("Executive", 185_000.0),
];

/// (size, salary multiplier)
const SIZES: &[(&str, f64)] = &[("Small", 0.9), ("Medium", 1.0), ("Large", 1.12)];

const REMOTE: &[&str] = &["Remote", "Hybrid", "Onsite"];
const YEARS: &[i64] = &[2023, 2024, 2025];

fn main() {
    let mut rng = SimpleRng::new(42);
    let n_rows = 2_000;

    let output_path = "AI_job_data.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");

    for i in 0..n_rows {
        let &(level, base) = rng.pick(LEVELS);
        let &(size, size_factor) = rng.pick(SIZES);
        let country_idx = (rng.next_u64() % COUNTRIES.len() as u64) as usize;
        // Earlier countries in the list pay a little more.
        let country_factor = 1.25 - 0.03 * country_idx as f64;
        let salary = rng.gauss(base * size_factor * country_factor, base * 0.12).max(20_000.0);

        let n_skills = 2 + (rng.next_u64() % 4) as usize;
        let mut skills: Vec<&str> = Vec::with_capacity(n_skills);
        while skills.len() < n_skills {
            let skill = *rng.pick(SKILLS);
            if !skills.contains(&skill) {
                skills.push(skill);
            }
        }

        let row = JobRow {
            job_id: format!("AI{:05}", i + 1),
            job_title: *rng.pick(TITLES),
            company_name: *rng.pick(COMPANIES),
            experience_level: level,
            salary_usd: salary.round() as u64,
            remote_category: *rng.pick(REMOTE),
            company_location: COUNTRIES[country_idx],
            company_size: size,
            year: *rng.pick(YEARS),
            required_skills: skills.join(", "),
        };
        writer.serialize(&row).expect("Failed to write row");
    }
    writer.flush().expect("Failed to flush output");

    println!("Wrote {n_rows} job postings to {output_path}");
}
