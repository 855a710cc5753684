//! Benchmark for manifest enrichment and label encoding

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use plant_visual_metadata::{build_table, SpeciesIndex};
use polars::prelude::*;
use rustc_hash::FxHashMap;

fn bench_build_table(c: &mut Criterion) {
    // 1000 species, 100 images each
    let species_text: String = (0..1000)
        .map(|i| format!("{};Genus{} species{} L.\n", 100000 + i, i % 97, i))
        .collect();
    let species = SpeciesIndex::parse(&species_text).unwrap();

    let (paths, classids): (Vec<String>, Vec<i64>) = (0..100_000)
        .map(|i| {
            let classid = 100000 + (i % 1000) as i64;
            let domain = if i % 3 == 0 { "herbarium" } else { "photo" };
            (format!("train/{}/{}/{}.jpg", domain, classid, i), classid)
        })
        .unzip();
    let manifest = df!["filepath" => paths, "classid" => classids].unwrap();

    let shapes = ["ovate", "palmate", "lanceolate", "cordate"];
    let arrangements = ["alternate", "opposite", "whorled"];
    let mut leaf_shapes = FxHashMap::default();
    let mut leaf_arrangements = FxHashMap::default();
    for i in (0..1000).step_by(2) {
        let formal = format!("Genus{} species{} L.", i % 97, i);
        leaf_shapes.insert(formal.clone(), shapes[i % shapes.len()].to_string());
        leaf_arrangements.insert(formal, arrangements[i % arrangements.len()].to_string());
    }

    c.bench_function("build_table_100k", |b| {
        b.iter(|| {
            let _ = build_table(
                black_box(manifest.clone()),
                black_box(&species),
                black_box(&leaf_shapes),
                black_box(&leaf_arrangements),
            );
        });
    });
}

criterion_group!(benches, bench_build_table);
criterion_main!(benches);
