// Criterion benchmarks for Hospital Match

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hospital_match::core::{distance::haversine_distance, rank_facilities};
use hospital_match::models::{Coordinates, FacilityRecord, RankingQuery};
use hospital_match::services::heuristic_specialties;

const SPECIALTIES: [&str; 6] = [
    "General Medicine",
    "Cardiology",
    "Orthopedics",
    "Pediatrics",
    "Neurology",
    "Pulmonology",
];
const DISTRICTS: [&str; 4] = ["Mandya", "Mysuru", "Hassan", "Tumakuru"];

fn create_facility(id: usize, lat: f64, lon: f64) -> FacilityRecord {
    let primary = SPECIALTIES[id % SPECIALTIES.len()];
    FacilityRecord {
        id: format!("KA-{:05}", id),
        name: format!("Facility {}", id),
        district: DISTRICTS[id % DISTRICTS.len()].to_string(),
        sub_district: format!("Taluk {}", id % 25),
        // every seventh facility has no usable coordinates
        coordinates: if id % 7 == 0 { None } else { Coordinates::new(lat, lon) },
        primary_specialty: primary.to_string(),
        specialty_list: format!("{}, General Medicine", primary),
        total_beds: (id % 200) as u32,
        icu_beds: (id % 13) as u32,
        oxygen_beds: (id % 40) as u32,
    }
}

fn create_catalog(count: usize) -> Vec<FacilityRecord> {
    (0..count)
        .map(|i| {
            let lat_offset = (i as f64 * 0.001) % 1.5;
            let lon_offset = (i as f64 * 0.0017) % 1.5;
            create_facility(i, 12.0 + lat_offset, 76.0 + lon_offset)
        })
        .collect()
}

fn create_query() -> RankingQuery {
    RankingQuery {
        specialties: vec!["Cardiology".to_string(), "General Medicine".to_string()],
        district: Some("Mandya".to_string()),
        sub_district: Some("Taluk 3".to_string()),
        origin: Coordinates::new(12.5843, 77.0436),
    }
}

fn bench_haversine_distance(c: &mut Criterion) {
    c.bench_function("haversine_distance", |b| {
        b.iter(|| {
            haversine_distance(
                black_box(12.5843),
                black_box(77.0436),
                black_box(12.2958),
                black_box(76.6394),
            )
        });
    });
}

fn bench_heuristic(c: &mut Criterion) {
    c.bench_function("heuristic_specialties", |b| {
        b.iter(|| heuristic_specialties(black_box("child with fever, vomiting and a skin rash since morning")));
    });
}

fn bench_ranking(c: &mut Criterion) {
    let query = create_query();

    let mut group = c.benchmark_group("ranking");

    for facility_count in [10, 100, 1000, 5000].iter() {
        let catalog = create_catalog(*facility_count);

        group.bench_with_input(
            BenchmarkId::new("rank_facilities", facility_count),
            facility_count,
            |b, _| {
                b.iter(|| rank_facilities(black_box(&catalog), black_box(&query)).len());
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_haversine_distance, bench_heuristic, bench_ranking);

criterion_main!(benches);
