use criterion::{black_box, criterion_group, criterion_main, Criterion};
use method_profiles::{MethodId, MethodProfiles, MethodTable, ProfiledComparator, SortKeyCache};
use std::io::Write;
use tempfile::NamedTempFile;

const INTERACTIONS: [&str; 4] = ["ColdStart", "AppSwitch", "Feed", "Search"];

fn create_method_table(methods: usize) -> MethodTable {
    let mut table = MethodTable::new();
    for i in 0..methods {
        let name = format!("com.app.Class{}.method{}", i / 10, i % 10);
        let signature = format!("LClass{};.method{}:()V", i / 10, i % 10);
        table.add(&signature, Some(name.as_str())).unwrap();
    }
    table
}

fn create_large_profile(methods: usize) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(temp_file, "interaction,appear#").unwrap();
    writeln!(temp_file, "ColdStart,1000").unwrap();
    writeln!(
        temp_file,
        "index,name,appear100,appear#,avg_call,avg_order,avg_rank100,min_api_level,interaction"
    )
    .unwrap();

    for i in 0..methods {
        let appear = (i * 7 % 100) as f64;
        let order = (i * 13 % 100) as f64;
        // Every tenth row references a method the table does not know yet
        let class = if i % 10 == 9 { format!("Late{}", i) } else { format!("Class{}", i / 10) };
        writeln!(
            temp_file,
            "{},L{};.method{}:()V,{},{},1.5,{},{},21,{}",
            i,
            class,
            i % 10,
            appear,
            i,
            i,
            order,
            INTERACTIONS[i % INTERACTIONS.len()]
        )
        .unwrap();
    }

    temp_file
}

fn benchmark_profile_parsing(c: &mut Criterion) {
    let table = create_method_table(20_000);
    let temp_file = create_large_profile(20_000);

    c.bench_function("parse_large_profile", |b| {
        b.iter(|| {
            let mut profiles = MethodProfiles::new();
            profiles
                .parse_stats_file(black_box(temp_file.path()), &table)
                .unwrap();
            black_box(profiles);
        })
    });
}

fn benchmark_profiled_sort(c: &mut Criterion) {
    let table = create_method_table(20_000);
    let temp_file = create_large_profile(20_000);
    let mut profiles = MethodProfiles::new();
    profiles.parse_stats_file(temp_file.path(), &table).unwrap();
    let whitelist = vec!["Class7".to_string()];
    let methods: Vec<MethodId> = table.ids().collect();

    c.bench_function("profiled_sort_cold_cache", |b| {
        b.iter(|| {
            let mut cache = SortKeyCache::new();
            let mut sorted = methods.clone();
            ProfiledComparator::new(&profiles, &table, &whitelist, &mut cache, false)
                .sort(&mut sorted);
            black_box(sorted);
        })
    });

    let mut warm_cache = SortKeyCache::new();
    c.bench_function("profiled_sort_warm_cache", |b| {
        b.iter(|| {
            let mut sorted = methods.clone();
            ProfiledComparator::new(&profiles, &table, &whitelist, &mut warm_cache, false)
                .sort(&mut sorted);
            black_box(sorted);
        })
    });
}

criterion_group!(benches, benchmark_profile_parsing, benchmark_profiled_sort);
criterion_main!(benches);
