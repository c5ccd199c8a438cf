use criterion::{Criterion, criterion_group, criterion_main};
use incbuild::build::{Unit, classify, plan};
use incbuild::config::BuildConfig;
use incbuild::timestamp::Stamp;
use std::collections::BTreeMap;
use std::hint::black_box;
use std::path::PathBuf;
use std::time::{Duration, SystemTime};

const MOCK_CONFIG: &str = r#"
[project]
name = "benchmark_project"
type = "executable"

[compiler]
cc = "g++"
ldflags = ["-Wl,--as-needed"]
libs = ["-lpthread", "-lm"]

[compiler.debug]
cdefs = ["-DDEBUG", "-DTRACE"]
cflags = ["-g", "-O0", "-Wall"]

[compiler.release]
cdefs = ["-DNDEBUG"]
cflags = ["-O3"]

[paths]
bin = "bin"
obj = "obj"
src = "src"
include = "include"
lib = "lib"
"#;

const UNITS: usize = 2_000;

fn at(secs: u64) -> Stamp {
    Stamp::Known(SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
}

fn mock_units() -> Vec<Unit> {
    (0..UNITS)
        .map(|i| Unit {
            name: format!("module{}/unit{}", i % 16, i),
            source: PathBuf::from(format!("src/module{}/unit{}.cpp", i % 16, i)),
            artifact: PathBuf::from(format!("obj/DEBUG/module{}/unit{}.o", i % 16, i)),
            source_stamp: at(1_000 + i as u64),
            artifact_stamp: Some(at(1_500)),
        })
        .collect()
}

fn bench_config_parse(c: &mut Criterion) {
    c.bench_function("parse_build_toml", |b| {
        b.iter(|| {
            let _: BuildConfig = toml::from_str(black_box(MOCK_CONFIG)).unwrap();
        })
    });
}

fn bench_classify(c: &mut Criterion) {
    let units = mock_units();
    let sources: BTreeMap<String, Stamp> = units
        .iter()
        .map(|u| (u.name.clone(), u.source_stamp))
        .collect();
    let artifacts: BTreeMap<String, Stamp> = units
        .iter()
        .filter_map(|u| u.artifact_stamp.map(|s| (u.name.clone(), s)))
        .collect();
    let empty = BTreeMap::new();

    c.bench_function("classify_incremental", |b| {
        b.iter(|| classify(black_box(&sources), black_box(&artifacts)))
    });
    c.bench_function("classify_fresh", |b| {
        b.iter(|| classify(black_box(&sources), black_box(&empty)))
    });
}

fn bench_plan(c: &mut Criterion) {
    let units = mock_units();
    let sources: BTreeMap<String, Stamp> = units
        .iter()
        .map(|u| (u.name.clone(), u.source_stamp))
        .collect();
    let artifacts: BTreeMap<String, Stamp> = units
        .iter()
        .filter_map(|u| u.artifact_stamp.map(|s| (u.name.clone(), s)))
        .collect();
    let staleness = classify(&sources, &artifacts);

    c.bench_function("plan_incremental", |b| {
        b.iter(|| plan(black_box(&staleness), black_box(&units)))
    });
}

criterion_group!(benches, bench_config_parse, bench_classify, bench_plan);
criterion_main!(benches);
