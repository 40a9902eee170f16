//! Corpus Benchmarking Tool
//!
//! Measures the bigram statistics pipeline on a large UTF-8 text file and
//! prints the strongest collocations it found.
//!
//! ## What It Benchmarks
//!
//! 1. **Tokenization**: Normalizing and splitting raw text into word tokens
//! 2. **Extraction**: Counting bigrams and unigrams into the frequency tables
//! 3. **Ranking**: Scoring every bigram under each association measure
//!
//! ## Usage
//!
//! ```bash
//! ./target/release/corpus_bench /path/to/corpus.txt
//!
//! # With an analysis config
//! ./target/release/corpus_bench /path/to/corpus.txt colloc.toml
//!
//! # With logging
//! RUST_LOG=colloc_core=debug ./target/release/corpus_bench /path/to/corpus.txt
//! ```
//!
//! ## Example Output
//!
//! ```text
//! === Extract ===
//! --------------------------------
//! Mode        : Extract
//! Elapsed     : 0.084 s
//! Throughput  : 421.89 MiB/s
//! Tokens      : 6_120_554
//! Tokens/sec  : 72_863_738
//! --------------------------------
//! ```

use std::env;
use std::fs;
use std::fmt;
use std::time::{Duration, Instant};

use colloc_core::{AnalysisConfig, BigramAnalyzer};
use tracing_subscriber::{prelude::*, EnvFilter};

const WARMUP_RUNS: usize = 1;
const MEASURE_RUNS: usize = 5;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: corpus_bench <path> [config.toml]");
        std::process::exit(1);
    }

    let config = match args.get(2) {
        Some(path) => AnalysisConfig::load(path)?,
        None => AnalysisConfig::default(),
    };

    println!("Loading file...");
    let bytes = fs::read(&args[1])?;
    let input = std::str::from_utf8(&bytes)?;

    println!("File size: {}", human_size(input.len() as u64));
    println!("Config:    top_n={} min_freq={}\n", config.top_n, config.min_freq);

    let tokens = bench_tokenize(input, &config);
    let analyzer = bench_extract(input.len(), &tokens);
    bench_rank(input.len(), &analyzer, &config);

    println!("{}\n", analyzer.stats());
    print_collocations(&analyzer, &config);

    Ok(())
}

fn bench_tokenize(input: &str, config: &AnalysisConfig) -> Vec<String> {
    let tokenizer = config.word_tokenizer();
    let mut norm_buf = String::with_capacity(input.len());

    println!("=== Tokenize ===");

    let mut count = 0u64;
    let elapsed = timed(|| {
        count = 0;
        tokenizer.tokenize_into(input, &mut norm_buf, |_t| count += 1);
        std::hint::black_box(count);
    });

    println!("{}", Report::new("Tokenize", input.len(), elapsed).tokens(count));
    tokenizer.tokenize(input)
}

fn bench_extract(input_bytes: usize, tokens: &[String]) -> BigramAnalyzer {
    println!("=== Extract ===");

    let elapsed = timed(|| {
        let mut analyzer = BigramAnalyzer::new();
        std::hint::black_box(analyzer.extract(tokens).len());
    });

    let report = Report::new("Extract", input_bytes, elapsed).tokens(tokens.len() as u64);
    println!("{report}");

    let mut analyzer = BigramAnalyzer::new();
    analyzer.extract(tokens);
    analyzer
}

fn bench_rank(input_bytes: usize, analyzer: &BigramAnalyzer, config: &AnalysisConfig) {
    println!("=== Rank ===");

    let elapsed = timed(|| {
        for &measure in &config.measures {
            std::hint::black_box(analyzer.rank_all_extracted(measure).len());
        }
    });

    let report = Report::new("Rank", input_bytes, elapsed).bigrams(analyzer.len() as u64);
    println!("{report}");
}

fn print_collocations(analyzer: &BigramAnalyzer, config: &AnalysisConfig) {
    for &measure in &config.measures {
        println!("--- {} ---", measure);
        for bigram in analyzer.rank_extracted(measure, config.top_n, config.min_freq) {
            println!("  {:<32} {}", bigram.phrase(), analyzer.frequency(&bigram));
        }
    }
}

/// Runs `f` for the warmup rounds, then returns the mean of the measured rounds.
fn timed<F: FnMut()>(mut f: F) -> Duration {
    (0..WARMUP_RUNS).for_each(|_| f());

    let total: Duration = (0..MEASURE_RUNS)
        .map(|_| {
            let start = Instant::now();
            f();
            start.elapsed()
        })
        .sum();
    total / MEASURE_RUNS as u32
}

/// One stage's timing, printed as a ruled block.
struct Report {
    stage: &'static str,
    input_bytes: usize,
    elapsed: Duration,
    items: Option<(&'static str, u64)>,
}

impl Report {
    fn new(stage: &'static str, input_bytes: usize, elapsed: Duration) -> Self {
        Self {
            stage,
            input_bytes,
            elapsed,
            items: None,
        }
    }

    fn tokens(self, n: u64) -> Self {
        Self {
            items: Some(("Tokens", n)),
            ..self
        }
    }

    fn bigrams(self, n: u64) -> Self {
        Self {
            items: Some(("Bigrams", n)),
            ..self
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const RULE: &str = "--------------------------------";
        let secs = self.elapsed.as_secs_f64().max(f64::MIN_POSITIVE);
        let per_sec = |n: f64| n / secs;

        writeln!(f, "{RULE}")?;
        writeln!(f, "Mode        : {}", self.stage)?;
        writeln!(f, "Elapsed     : {:.3} s", self.elapsed.as_secs_f64())?;
        writeln!(
            f,
            "Throughput  : {}/s",
            human_size(per_sec(self.input_bytes as f64) as u64)
        )?;
        if let Some((label, n)) = self.items.filter(|&(_, n)| n > 0) {
            writeln!(f, "{:<12}: {}", label, grouped(n))?;
            writeln!(f, "{:<12}: {}", format!("{label}/sec"), grouped(per_sec(n as f64) as u64))?;
        }
        writeln!(f, "{RULE}")
    }
}

/// Formats a byte count with a binary unit.
fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit + 1 < UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.2} {}", UNITS[unit])
    }
}

/// Groups digits in threes with `_`, as in Rust literals.
fn grouped(n: u64) -> String {
    let digits = n.to_string();
    let head = digits.len() % 3;
    let mut out = String::from(&digits[..head]);
    for chunk in digits.as_bytes()[head..].chunks(3) {
        if !out.is_empty() {
            out.push('_');
        }
        out.extend(chunk.iter().map(|&b| b as char));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes() {
        assert_eq!(human_size(0), "0 B");
        assert_eq!(human_size(1023), "1023 B");
        assert_eq!(human_size(1536), "1.50 KiB");
        assert_eq!(human_size(3 * 1024 * 1024), "3.00 MiB");
        assert_eq!(human_size(5 * 1024 * 1024 * 1024 * 1024), "5120.00 GiB");
    }

    #[test]
    fn digit_groups() {
        assert_eq!(grouped(0), "0");
        assert_eq!(grouped(999), "999");
        assert_eq!(grouped(1000), "1_000");
        assert_eq!(grouped(6_120_554), "6_120_554");
        assert_eq!(grouped(72_863_738), "72_863_738");
    }

    #[test]
    fn report_lists_items_only_when_counted() {
        let elapsed = Duration::from_millis(500);
        let plain = Report::new("Rank", 2048, elapsed).to_string();
        assert!(plain.contains("Mode        : Rank"));
        assert!(plain.contains("Throughput  : 4.00 KiB/s"));
        assert!(!plain.contains("Tokens"));

        let counted = Report::new("Tokenize", 2048, elapsed).tokens(1000).to_string();
        assert!(counted.contains("Tokens      : 1_000"));
        assert!(counted.contains("Tokens/sec  : 2_000"));
    }
}
