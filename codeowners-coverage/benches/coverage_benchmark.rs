use codeowners_coverage::{
    check_coverage,
    loader::{load_rules_from_str, LoadOptions},
    patternset::{Builder, Matcher},
};
use criterion::{criterion_group, criterion_main, Criterion};

const CHANGED_PATHS: &[&str] = &[
    "file-a",
    "dir-a/file-a",
    "dir-a/dir-c/file-a",
    "dir-a/dir-c/file-b",
    "dir-b/file-a",
    "dir-b/dir-d/dir-e/dir-f/dir-g/file-a",
    "unowned/readme.txt",
];

const CODEOWNERS: &str = "
# Default owners
*                                     @org/everyone
*-a                                   @org/a-team
file-*                                @someone
/dir-b                                @org/b-team
dir-a/dir-b                           @org/ab-team
**/dir-*/file-*                       @org/nested
dir-*/*                               @org/shallow
dir-b/dir-d/dir-e/dir-f/dir-g/file-a  @someone-else
";

fn build_matcher(skip_asterisk: bool) -> Matcher {
    let mut builder = Builder::new();
    load_rules_from_str(&mut builder, CODEOWNERS, &LoadOptions { skip_asterisk });
    builder.build()
}

fn coverage_benchmark(c: &mut Criterion) {
    c.bench_function("building", |b| b.iter(|| build_matcher(false)));

    let matcher = build_matcher(true);
    c.bench_function("checking", |b| {
        b.iter(|| check_coverage(&matcher, CHANGED_PATHS))
    });
}

criterion_group!(benches, coverage_benchmark);
criterion_main!(benches);
