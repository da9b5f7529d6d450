//! Latency benchmarks for the analyzers and the full analysis path
//!
//! Run with: cargo bench -p authorcheck-detectors

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use authorcheck_core::{Submission, SubmissionKind};
use authorcheck_detectors::{Analyzer, CodeAnalyzer, DetectionService, TextAnalyzer};

const ESSAY: &str = "Artificial intelligence is a transformative technology that has \
    revolutionized numerous sectors. Furthermore, it presents unprecedented opportunities \
    for innovation. Moreover, the integration of intelligent systems enables organizations \
    to optimize their operational efficiency. Consequently, businesses can leverage these \
    capabilities to enhance their competitive advantage.";

const CASUAL: &str = "So I was working on this and honestly it was pretty tough. \
    Tried a few things. Kept getting errors! Finally figured it out after looking at the \
    lecture notes again, and it's kinda messy but it works.";

const CODE: &str = r#"
def mean(values: list) -> float:
    """This function calculates the mean of a list of values."""
    try:
        return sum(values) / len(values)
    except ZeroDivisionError:
        return 0.0


def process_data(rows: list) -> list:
    """This function processes the rows and returns the result."""
    # Process the rows one by one
    return [row.strip() for row in rows]
"#;

/// Text analyzer on prose of different registers
fn benchmark_text_analyzer(c: &mut Criterion) {
    let analyzer = TextAnalyzer::new().expect("Failed to create text analyzer");

    let long_essay = ESSAY.repeat(20);
    let test_cases = vec![
        ("formal", ESSAY),
        ("casual", CASUAL),
        ("long_formal", long_essay.as_str()),
    ];

    let mut group = c.benchmark_group("Text_Analyzer");
    group.significance_level(0.05);
    group.sample_size(100);

    for (name, text) in test_cases {
        group.bench_with_input(BenchmarkId::new("analyze", name), &text, |b, text| {
            b.iter(|| analyzer.analyze(black_box(text)));
        });
    }

    group.finish();
}

/// Code analyzer on short and long sources
fn benchmark_code_analyzer(c: &mut Criterion) {
    let analyzer = CodeAnalyzer::new().expect("Failed to create code analyzer");

    let long_code = CODE.repeat(20);
    let test_cases = vec![("short", CODE), ("long", long_code.as_str())];

    let mut group = c.benchmark_group("Code_Analyzer");
    group.significance_level(0.05);
    group.sample_size(100);

    for (name, code) in test_cases {
        group.bench_with_input(BenchmarkId::new("analyze", name), &code, |b, code| {
            b.iter(|| analyzer.analyze(black_box(code)));
        });
    }

    group.finish();
}

/// Full analysis, including aggregation and record assembly
fn benchmark_detection_service(c: &mut Criterion) {
    let service = DetectionService::default();

    let text = Submission::new("bench", "student", ESSAY, SubmissionKind::Text);
    let code = Submission::new("bench", "student", CODE, SubmissionKind::Code);
    let mixed = Submission::new(
        "bench",
        "student",
        format!("{}\n\n{}", CASUAL, CODE),
        SubmissionKind::Mixed,
    );

    let mut group = c.benchmark_group("Detection_Service");
    group.sample_size(100);

    group.bench_function("text_submission", |b| {
        b.iter(|| service.analyze(black_box(&text)));
    });

    group.bench_function("code_submission", |b| {
        b.iter(|| service.analyze(black_box(&code)));
    });

    group.bench_function("mixed_submission", |b| {
        b.iter(|| service.analyze(black_box(&mixed)));
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_text_analyzer,
    benchmark_code_analyzer,
    benchmark_detection_service
);
criterion_main!(benches);
