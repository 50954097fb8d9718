//! End-to-end service tests over an in-memory database: evaluation,
//! simulation, lifecycle, conversion, and reports behind the access policy.

use chrono::{Duration, NaiveDate};
use herdbook_core::errors::MatingError;
use herdbook_core::models::{
    AdjustmentHorizon, EvaluationUpdate, Herd, MatchingStrategy, NewAnimal, NewBreedingRecord,
    NewRecommendation, NewSimulation, NewWeightRecord, ParturitionStatus, RecommendationStatus,
    Sex,
};
use herdbook_core::traits::{AllowAll, StaticAccessList};
use herdbook_mating::{MatingService, SimulationRequest};
use herdbook_storage::queries::{
    animals, breeding, evaluations, herds, recommendations, simulations, weights,
};
use tempfile::TempDir;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn service() -> MatingService {
    let service = MatingService::open_in_memory(Box::new(AllowAll)).unwrap();
    herds::insert(
        service.connection(),
        &Herd {
            id: "h1".into(),
            name: "North herd".into(),
            property_id: "p1".into(),
        },
    )
    .unwrap();
    service
}

fn seed_animal(service: &MatingService, identification: &str, sex: Sex) -> i64 {
    animals::insert(
        service.connection(),
        &NewAnimal {
            herd_id: "h1".into(),
            identification: identification.into(),
            name: None,
            category: None,
            sex,
            birth_date: Some(date(2024, 1, 1)),
            status: "active".into(),
            father_id: None,
            mother_id: None,
        },
    )
    .unwrap()
}

fn seed_weight(service: &MatingService, animal_id: i64, measured: NaiveDate, weight: f64) {
    weights::insert(
        service.connection(),
        &NewWeightRecord::bare(animal_id, measured, weight),
    )
    .unwrap();
}

fn request(sire_ids: Vec<i64>, dam_ids: Vec<i64>) -> SimulationRequest {
    SimulationRequest {
        herd_id: "h1".into(),
        heritability: 0.5,
        min_age_male_months: 6,
        min_age_female_months: 8,
        weight_adjustment: AdjustmentHorizon::Days60,
        max_female_percentage_per_male: 50.0,
        strategy: MatchingStrategy::Greedy,
        sire_ids,
        dam_ids,
    }
}

// ---- herd evaluation ----

#[test]
fn evaluation_covers_every_active_animal() {
    let service = service();
    // Born 2024-01-01 and weighed 2024-03-01: exactly 60 days of age.
    let sire = seed_animal(&service, "M-001", Sex::Male);
    let dam = seed_animal(&service, "F-001", Sex::Female);
    seed_weight(&service, sire, date(2024, 3, 1), 30.0);
    seed_weight(&service, dam, date(2024, 3, 1), 20.0);

    let undated = animals::insert(
        service.connection(),
        &NewAnimal {
            herd_id: "h1".into(),
            identification: "U-001".into(),
            name: None,
            category: None,
            sex: Sex::Male,
            birth_date: None,
            status: "active".into(),
            father_id: None,
            mother_id: None,
        },
    )
    .unwrap();

    let sold = animals::insert(
        service.connection(),
        &NewAnimal {
            herd_id: "h1".into(),
            identification: "S-001".into(),
            name: None,
            category: None,
            sex: Sex::Female,
            birth_date: Some(date(2024, 1, 1)),
            status: "sold".into(),
            father_id: None,
            mother_id: None,
        },
    )
    .unwrap();

    breeding::insert(
        service.connection(),
        &NewBreedingRecord {
            herd_id: "h1".into(),
            dam_id: dam,
            sire_id: sire,
            coverage_date: date(2025, 1, 1),
            dam_weight: 40.0,
            dam_body_condition_score: 3,
            sire_scrotal_perimeter: None,
            parturition_status: ParturitionStatus::Completed,
            birth_date: Some(date(2025, 6, 1)),
            observations: None,
        },
    )
    .unwrap();

    let evaluated = service
        .evaluate_herd("ana", "h1", 0.3, AdjustmentHorizon::Days60)
        .unwrap();
    assert_eq!(evaluated, 3);

    // Herd mean weight is (30 + 20) / 2 = 25.
    let row = evaluations::get_by_animal(service.connection(), sire)
        .unwrap()
        .unwrap();
    assert_eq!(row.dep, Some(0.2));
    assert_eq!(row.selection_index, Some(0.06));
    assert_eq!(row.inbreeding_coefficient, 0.0);
    assert_eq!(row.number_of_offspring, 1);

    let row = evaluations::get_by_animal(service.connection(), dam)
        .unwrap()
        .unwrap();
    assert_eq!(row.dep, Some(-0.2));
    assert_eq!(row.selection_index, Some(-0.06));
    assert_eq!(row.number_of_offspring, 1);

    // No birth date: evaluated, but the growth metrics stay undefined.
    let row = evaluations::get_by_animal(service.connection(), undated)
        .unwrap()
        .unwrap();
    assert_eq!(row.dep, None);
    assert_eq!(row.selection_index, None);
    assert_eq!(row.number_of_offspring, 0);

    assert!(evaluations::get_by_animal(service.connection(), sold)
        .unwrap()
        .is_none());

    // Re-evaluation refreshes in place.
    let evaluated = service
        .evaluate_herd("ana", "h1", 0.3, AdjustmentHorizon::Days60)
        .unwrap();
    assert_eq!(evaluated, 3);
    assert_eq!(
        evaluations::list_by_herd(service.connection(), "h1")
            .unwrap()
            .len(),
        3
    );
}

// ---- simulation ----

#[test]
fn simulation_persists_parameters_and_ranked_recommendations() {
    let service = service();
    let sire = seed_animal(&service, "M-001", Sex::Male);
    let slow_dam = seed_animal(&service, "F-001", Sex::Female);
    let average_dam = seed_animal(&service, "F-002", Sex::Female);
    // Herd mean 32: deps are 0.25, -0.25, 0.0.
    seed_weight(&service, sire, date(2024, 3, 1), 40.0);
    seed_weight(&service, slow_dam, date(2024, 3, 1), 24.0);
    seed_weight(&service, average_dam, date(2024, 3, 1), 32.0);

    let mut req = request(vec![sire], vec![slow_dam, average_dam]);
    req.max_female_percentage_per_male = 100.0;
    let outcome = service.simulate("ana", &req).unwrap();
    assert_eq!(outcome.recommendation_count, 2);

    let stored = simulations::get(service.connection(), outcome.simulation_id)
        .unwrap()
        .unwrap();
    assert_eq!(stored.herd_id, "h1");
    assert_eq!(stored.heritability, 0.5);
    assert_eq!(stored.weight_adjustment, AdjustmentHorizon::Days60);
    assert_eq!(stored.max_female_percentage_per_male, 100.0);
    assert_eq!(stored.strategy, MatchingStrategy::Greedy);

    let recs = service
        .list_recommendations("ana", outcome.simulation_id)
        .unwrap();
    assert_eq!(recs.len(), 2);

    // Best pairing first: the average dam lifts the pair mean.
    assert_eq!(recs[0].dam_id, average_dam);
    assert_eq!(recs[0].predicted_dep, 0.125);
    assert_eq!(recs[0].predicted_index, 0.0625);
    assert_eq!(recs[0].predicted_inbreeding, 0.0);
    assert_eq!(recs[0].predicted_genetic_gain, 0.0625);

    assert_eq!(recs[1].dam_id, slow_dam);
    assert_eq!(recs[1].predicted_genetic_gain, 0.0);

    assert!(recs.iter().all(|r| r.sire_id == sire));
    assert!(recs
        .iter()
        .all(|r| r.status == RecommendationStatus::Pending));
}

#[test]
fn repeated_simulations_produce_identical_pairings() {
    let service = service();
    let sire_a = seed_animal(&service, "M-001", Sex::Male);
    let sire_b = seed_animal(&service, "M-002", Sex::Male);
    let dam_a = seed_animal(&service, "F-001", Sex::Female);
    let dam_b = seed_animal(&service, "F-002", Sex::Female);
    for id in [sire_a, sire_b, dam_a, dam_b] {
        seed_weight(&service, id, date(2024, 3, 1), 40.0);
    }

    // Every pair scores the same, so the result is pure tie-breaking.
    let req = request(vec![sire_a, sire_b], vec![dam_a, dam_b]);
    let first = service.simulate("ana", &req).unwrap();
    let second = service.simulate("ana", &req).unwrap();
    assert_ne!(first.simulation_id, second.simulation_id);
    assert_eq!(first.recommendation_count, 2);

    let pairing = |simulation_id| {
        recommendations::list_by_simulation(service.connection(), simulation_id)
            .unwrap()
            .into_iter()
            .map(|r| (r.sire_id, r.dam_id, r.predicted_genetic_gain))
            .collect::<Vec<_>>()
    };
    let first_pairs = pairing(first.simulation_id);
    assert_eq!(first_pairs, pairing(second.simulation_id));
    assert_eq!(
        first_pairs
            .iter()
            .map(|(s, d, _)| (*s, *d))
            .collect::<Vec<_>>(),
        [(sire_a, dam_a), (sire_b, dam_b)]
    );
}

#[test]
fn sire_capacity_spreads_dams_across_sires() {
    let service = service();
    let strong = seed_animal(&service, "M-001", Sex::Male);
    let weak = seed_animal(&service, "M-002", Sex::Male);
    seed_weight(&service, strong, date(2024, 3, 1), 44.0);
    seed_weight(&service, weak, date(2024, 3, 1), 36.0);

    let mut dams = Vec::new();
    for n in 1..=5 {
        let dam = seed_animal(&service, &format!("F-{n:03}"), Sex::Female);
        seed_weight(&service, dam, date(2024, 3, 1), 40.0);
        dams.push(dam);
    }

    // 5 dams at 50% per sire: each sire may cover at most ceil(2.5) = 3.
    let outcome = service
        .simulate("ana", &request(vec![strong, weak], dams.clone()))
        .unwrap();
    assert_eq!(outcome.recommendation_count, 5);

    let recs = recommendations::list_by_simulation(service.connection(), outcome.simulation_id)
        .unwrap();
    let strong_load = recs.iter().filter(|r| r.sire_id == strong).count();
    let weak_load = recs.iter().filter(|r| r.sire_id == weak).count();
    assert_eq!(strong_load, 3);
    assert_eq!(weak_load, 2);

    let mut covered: Vec<i64> = recs.iter().map(|r| r.dam_id).collect();
    covered.sort_unstable();
    assert_eq!(covered, dams);
}

#[test]
fn candidate_without_birth_date_scores_zero_growth() {
    let service = service();
    let sire = animals::insert(
        service.connection(),
        &NewAnimal {
            herd_id: "h1".into(),
            identification: "M-001".into(),
            name: None,
            category: None,
            sex: Sex::Male,
            birth_date: None,
            status: "active".into(),
            father_id: None,
            mother_id: None,
        },
    )
    .unwrap();
    let dam = seed_animal(&service, "F-001", Sex::Female);
    seed_weight(&service, dam, date(2024, 3, 1), 40.0);

    let mut req = request(vec![sire], vec![dam]);
    req.max_female_percentage_per_male = 100.0;
    let outcome = service.simulate("ana", &req).unwrap();
    assert_eq!(outcome.recommendation_count, 1);

    let recs = recommendations::list_by_simulation(service.connection(), outcome.simulation_id)
        .unwrap();
    assert_eq!(recs[0].predicted_dep, 0.0);
    assert_eq!(recs[0].predicted_genetic_gain, 0.0);
}

#[test]
fn simulation_rejects_empty_candidate_sides() {
    let service = service();
    let sire = seed_animal(&service, "M-001", Sex::Male);

    let err = service
        .simulate("ana", &request(vec![sire], vec![]))
        .unwrap_err();
    assert!(matches!(err, MatingError::InvalidInput { .. }));

    let err = service.simulate("ana", &request(vec![], vec![1])).unwrap_err();
    assert!(matches!(err, MatingError::InvalidInput { .. }));
}

#[test]
fn simulation_rejects_wrong_sex_candidates() {
    let service = service();
    let sire = seed_animal(&service, "M-001", Sex::Male);
    let dam = seed_animal(&service, "F-001", Sex::Female);

    let err = service
        .simulate("ana", &request(vec![dam], vec![dam]))
        .unwrap_err();
    match err {
        MatingError::InvalidInput { message } => {
            assert!(message.contains("not a valid sire"), "{message}");
        }
        other => panic!("unexpected error: {other}"),
    }

    let err = service
        .simulate("ana", &request(vec![sire], vec![sire]))
        .unwrap_err();
    match err {
        MatingError::InvalidInput { message } => {
            assert!(message.contains("not a valid dam"), "{message}");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn simulation_rejects_unknown_candidates_and_herds() {
    let service = service();
    let sire = seed_animal(&service, "M-001", Sex::Male);

    let err = service
        .simulate("ana", &request(vec![sire], vec![999]))
        .unwrap_err();
    assert!(matches!(err, MatingError::NotFound { entity: "animal", .. }));

    let mut req = request(vec![sire], vec![999]);
    req.herd_id = "h9".into();
    let err = service.simulate("ana", &req).unwrap_err();
    assert!(matches!(err, MatingError::NotFound { entity: "herd", .. }));
}

// ---- access control ----

#[test]
fn access_policy_gates_every_herd_operation() {
    let mut policy = StaticAccessList::new();
    policy.grant("ana", "p1");
    let service = MatingService::open_in_memory(Box::new(policy)).unwrap();
    for (herd, property) in [("h1", "p1"), ("h2", "p2")] {
        herds::insert(
            service.connection(),
            &Herd {
                id: herd.into(),
                name: herd.into(),
                property_id: property.into(),
            },
        )
        .unwrap();
    }

    assert!(service
        .evaluate_herd("ana", "h1", 0.3, AdjustmentHorizon::Days60)
        .is_ok());

    let err = service
        .evaluate_herd("ana", "h2", 0.3, AdjustmentHorizon::Days60)
        .unwrap_err();
    assert!(matches!(err, MatingError::AccessDenied { .. }));

    let err = service.birth_forecast("bea", "h1").unwrap_err();
    assert!(matches!(err, MatingError::AccessDenied { .. }));

    // Denial comes before input validation.
    let err = service.simulate("bea", &request(vec![], vec![])).unwrap_err();
    assert!(matches!(err, MatingError::AccessDenied { .. }));
}

// ---- recommendation lifecycle ----

fn seed_simulation(service: &MatingService) -> i64 {
    simulations::insert(
        service.connection(),
        &NewSimulation {
            herd_id: "h1".into(),
            simulation_date: date(2025, 1, 5),
            heritability: 0.3,
            min_age_male_months: 6,
            min_age_female_months: 8,
            weight_adjustment: AdjustmentHorizon::Days60,
            max_female_percentage_per_male: 50.0,
            strategy: MatchingStrategy::Greedy,
        },
    )
    .unwrap()
}

fn seed_recommendation(
    service: &MatingService,
    simulation_id: i64,
    sire_id: i64,
    dam_id: i64,
) -> i64 {
    recommendations::insert(
        service.connection(),
        &NewRecommendation {
            simulation_id,
            herd_id: "h1".into(),
            sire_id,
            dam_id,
            predicted_dep: 0.1,
            predicted_index: 0.03,
            predicted_inbreeding: 0.0,
            predicted_genetic_gain: 0.03,
        },
    )
    .unwrap()
}

#[test]
fn adoption_stamps_date_and_ignoring_clears_it() {
    let service = service();
    let simulation_id = seed_simulation(&service);
    let rec = seed_recommendation(&service, simulation_id, 1, 10);

    service.adopt("ana", rec).unwrap();
    let row = recommendations::get(service.connection(), rec)
        .unwrap()
        .unwrap();
    assert_eq!(row.status, RecommendationStatus::Adopted);
    assert!(row.adopted_date.is_some());

    service.ignore("ana", rec).unwrap();
    let row = recommendations::get(service.connection(), rec)
        .unwrap()
        .unwrap();
    assert_eq!(row.status, RecommendationStatus::Ignored);
    assert_eq!(row.adopted_date, None);

    // Transitions are unguarded: an ignored recommendation can be re-adopted.
    service.adopt("ana", rec).unwrap();
    let row = recommendations::get(service.connection(), rec)
        .unwrap()
        .unwrap();
    assert_eq!(row.status, RecommendationStatus::Adopted);

    let err = service.adopt("ana", rec + 99).unwrap_err();
    assert!(matches!(
        err,
        MatingError::NotFound { entity: "recommendation", .. }
    ));
}

// ---- batch conversion ----

#[test]
fn batch_convert_creates_one_coverage_per_adopted_recommendation() {
    let service = service();
    let sire = seed_animal(&service, "M-001", Sex::Male);
    let weighed_dam = seed_animal(&service, "F-001", Sex::Female);
    let unweighed_dam = seed_animal(&service, "F-002", Sex::Female);
    seed_weight(&service, weighed_dam, date(2025, 2, 1), 40.0);
    seed_weight(&service, weighed_dam, date(2025, 5, 1), 47.0);

    let simulation_id = seed_simulation(&service);
    let first = seed_recommendation(&service, simulation_id, sire, weighed_dam);
    let second = seed_recommendation(&service, simulation_id, sire, unweighed_dam);
    // Stays pending: conversion must not pick it up.
    seed_recommendation(&service, simulation_id, sire, weighed_dam);

    service.adopt("ana", first).unwrap();
    // Adopting twice only refreshes the date; conversion still sees one row.
    service.adopt("ana", first).unwrap();
    service.adopt("ana", second).unwrap();

    let coverage_date = date(2025, 6, 10);
    let outcome = service
        .batch_convert("ana", simulation_id, coverage_date, 50.0, 3)
        .unwrap();
    assert_eq!(outcome.created_count, 2);
    assert!(outcome.errors.is_empty());

    let open = breeding::list_in_progress_by_herd(service.connection(), "h1").unwrap();
    assert_eq!(open.len(), 2);

    let for_dam = |dam_id| open.iter().find(|r| r.dam_id == dam_id).unwrap();
    let record = for_dam(weighed_dam);
    assert_eq!(record.sire_id, sire);
    assert_eq!(record.coverage_date, coverage_date);
    assert_eq!(record.dam_weight, 47.0);
    assert_eq!(record.dam_body_condition_score, 3);
    assert_eq!(record.sire_scrotal_perimeter, None);
    assert_eq!(record.parturition_status, ParturitionStatus::InProgress);
    assert_eq!(
        record.observations.as_deref(),
        Some(format!("Created automatically from recommendation #{first}").as_str())
    );

    // No weighing on record: the default weight is used.
    assert_eq!(for_dam(unweighed_dam).dam_weight, 50.0);
}

#[test]
fn batch_convert_reports_per_item_failures_without_aborting() {
    let service = service();
    let sire = seed_animal(&service, "M-001", Sex::Male);
    let covered_dam = seed_animal(&service, "F-001", Sex::Female);
    let fresh_dam = seed_animal(&service, "F-002", Sex::Female);

    let coverage_date = date(2025, 6, 10);
    breeding::insert(
        service.connection(),
        &NewBreedingRecord {
            herd_id: "h1".into(),
            dam_id: covered_dam,
            sire_id: sire,
            coverage_date,
            dam_weight: 52.0,
            dam_body_condition_score: 3,
            sire_scrotal_perimeter: None,
            parturition_status: ParturitionStatus::InProgress,
            birth_date: None,
            observations: None,
        },
    )
    .unwrap();

    let simulation_id = seed_simulation(&service);
    let duplicate = seed_recommendation(&service, simulation_id, sire, covered_dam);
    let orphan = seed_recommendation(&service, simulation_id, sire, 9999);
    let good = seed_recommendation(&service, simulation_id, sire, fresh_dam);
    for rec in [duplicate, orphan, good] {
        service.adopt("ana", rec).unwrap();
    }

    let outcome = service
        .batch_convert("ana", simulation_id, coverage_date, 50.0, 3)
        .unwrap();
    assert_eq!(outcome.created_count, 1);
    assert_eq!(outcome.errors.len(), 2);
    assert!(outcome.errors[0].contains("coverage already exists"), "{}", outcome.errors[0]);
    assert!(outcome.errors[1].contains("animal not found"), "{}", outcome.errors[1]);

    assert!(breeding::exists_for_triple(service.connection(), fresh_dam, sire, coverage_date)
        .unwrap());
}

#[test]
fn batch_convert_without_adoptions_is_not_found() {
    let service = service();
    let simulation_id = seed_simulation(&service);
    seed_recommendation(&service, simulation_id, 1, 10);

    let err = service
        .batch_convert("ana", simulation_id, date(2025, 6, 10), 50.0, 3)
        .unwrap_err();
    assert!(matches!(err, MatingError::NotFound { .. }));
}

// ---- reports ----

#[test]
fn birth_forecast_projects_gestation_from_coverage() {
    let service = service();
    let sire = seed_animal(&service, "M-001", Sex::Male);
    let dam = animals::insert(
        service.connection(),
        &NewAnimal {
            herd_id: "h1".into(),
            identification: "F-001".into(),
            name: Some("Luna".into()),
            category: None,
            sex: Sex::Female,
            birth_date: Some(date(2023, 1, 1)),
            status: "active".into(),
            father_id: None,
            mother_id: None,
        },
    )
    .unwrap();

    breeding::insert(
        service.connection(),
        &NewBreedingRecord {
            herd_id: "h1".into(),
            dam_id: dam,
            sire_id: sire,
            coverage_date: date(2024, 8, 1),
            dam_weight: 52.0,
            dam_body_condition_score: 3,
            sire_scrotal_perimeter: None,
            parturition_status: ParturitionStatus::InProgress,
            birth_date: None,
            observations: None,
        },
    )
    .unwrap();

    // Already completed: not part of the forecast.
    breeding::insert(
        service.connection(),
        &NewBreedingRecord {
            herd_id: "h1".into(),
            dam_id: dam,
            sire_id: sire,
            coverage_date: date(2024, 1, 1),
            dam_weight: 50.0,
            dam_body_condition_score: 3,
            sire_scrotal_perimeter: None,
            parturition_status: ParturitionStatus::Completed,
            birth_date: Some(date(2024, 6, 1)),
            observations: None,
        },
    )
    .unwrap();

    let forecast = service.birth_forecast("ana", "h1").unwrap();
    assert_eq!(forecast.len(), 1);
    let entry = &forecast[0];
    assert_eq!(entry.dam_id, dam);
    assert_eq!(entry.dam_name.as_deref(), Some("Luna"));
    assert_eq!(entry.sire_name, None);
    assert_eq!(entry.coverage_date, date(2024, 8, 1));
    // 152 days of gestation.
    assert_eq!(entry.predicted_birth_date, date(2024, 12, 31));
    // The due date is long past, so the countdown has gone negative.
    assert!(entry.days_until_birth < 0);
}

#[test]
fn sire_stats_summarize_coverage_outcomes() {
    let service = service();
    let proven = animals::insert(
        service.connection(),
        &NewAnimal {
            herd_id: "h1".into(),
            identification: "M-001".into(),
            name: Some("Thor".into()),
            category: Some("reprodutor".into()),
            sex: Sex::Male,
            birth_date: Some(date(2022, 1, 1)),
            status: "active".into(),
            father_id: None,
            mother_id: None,
        },
    )
    .unwrap();
    let young = animals::insert(
        service.connection(),
        &NewAnimal {
            herd_id: "h1".into(),
            identification: "M-002".into(),
            name: None,
            category: Some("marrão".into()),
            sex: Sex::Male,
            birth_date: Some(date(2024, 1, 1)),
            status: "active".into(),
            father_id: None,
            mother_id: None,
        },
    )
    .unwrap();
    // Uncategorised male: no stats row even with a coverage on file.
    let unlisted = seed_animal(&service, "M-003", Sex::Male);

    let seed_coverage = |sire_id, dam_id, status| {
        breeding::insert(
            service.connection(),
            &NewBreedingRecord {
                herd_id: "h1".into(),
                dam_id,
                sire_id,
                coverage_date: date(2025, 3, 1),
                dam_weight: 52.0,
                dam_body_condition_score: 3,
                sire_scrotal_perimeter: None,
                parturition_status: status,
                birth_date: None,
                observations: None,
            },
        )
        .unwrap();
    };
    seed_coverage(proven, 101, ParturitionStatus::Completed);
    seed_coverage(proven, 102, ParturitionStatus::Completed);
    seed_coverage(proven, 103, ParturitionStatus::NotCompleted);
    seed_coverage(proven, 104, ParturitionStatus::InProgress);
    seed_coverage(unlisted, 105, ParturitionStatus::Completed);

    let stats = service.sire_coverage_stats("ana", "h1").unwrap();
    assert_eq!(stats.len(), 2);
    assert!(stats.iter().all(|s| s.sire_id != unlisted));

    let for_sire = |id| stats.iter().find(|s| s.sire_id == id).unwrap();
    let row = for_sire(proven);
    assert_eq!(row.sire_name.as_deref(), Some("Thor"));
    assert_eq!(row.total_coverages, 4);
    assert_eq!(row.total_births, 2);
    assert_eq!(row.total_in_progress, 1);
    assert_eq!(row.birth_rate, 50.0);

    let row = for_sire(young);
    assert_eq!(row.total_coverages, 0);
    assert_eq!(row.birth_rate, 0.0);
}

// ---- eligibility ----

#[test]
fn eligibility_splits_pools_and_enriches_from_evaluations() {
    let service = service();
    let sire = seed_animal(&service, "M-001", Sex::Male);
    let evaluated_dam = seed_animal(&service, "F-001", Sex::Female);
    let plain_dam = seed_animal(&service, "F-002", Sex::Female);

    // Too young for the 8 month minimum.
    let today = chrono::Local::now().date_naive();
    animals::insert(
        service.connection(),
        &NewAnimal {
            herd_id: "h1".into(),
            identification: "F-003".into(),
            name: None,
            category: None,
            sex: Sex::Female,
            birth_date: Some(today - Duration::days(60)),
            status: "active".into(),
            father_id: None,
            mother_id: None,
        },
    )
    .unwrap();

    // No birth date: never eligible.
    animals::insert(
        service.connection(),
        &NewAnimal {
            herd_id: "h1".into(),
            identification: "U-001".into(),
            name: None,
            category: None,
            sex: Sex::Male,
            birth_date: None,
            status: "active".into(),
            father_id: None,
            mother_id: None,
        },
    )
    .unwrap();

    for (animal_id, inbreeding) in [(sire, 25.0), (evaluated_dam, 0.0)] {
        evaluations::upsert(
            service.connection(),
            &EvaluationUpdate {
                animal_id,
                herd_id: "h1".into(),
                inbreeding_coefficient: inbreeding,
                dep: Some(0.125),
                selection_index: Some(0.037),
                number_of_offspring: 3,
                last_evaluation_date: date(2025, 5, 1),
            },
        )
        .unwrap();
        service
            .connection()
            .execute(
                "UPDATE genetic_evaluations SET scrotal_perimeter = 23.0 WHERE animal_id = ?1",
                [animal_id],
            )
            .unwrap();
    }

    let pools = service.eligible_animals("ana", "h1", 6, 8).unwrap();
    assert_eq!(pools.herd_id, "h1");
    assert_eq!(pools.males.len(), 1);
    assert_eq!(pools.females.len(), 2);

    let male = &pools.males[0];
    assert_eq!(male.id, sire);
    assert_eq!(male.dep, Some(0.125));
    assert_eq!(male.inbreeding_coefficient, 25.0);
    assert_eq!(male.number_of_offspring, 3);
    assert_eq!(male.scrotal_perimeter, Some(23.0));
    assert!(male.age_months >= 6);

    // Scrotal perimeter is a sire attribute; dams never carry it.
    let female = pools.females.iter().find(|f| f.id == evaluated_dam).unwrap();
    assert_eq!(female.dep, Some(0.125));
    assert_eq!(female.scrotal_perimeter, None);

    // Never evaluated: enrichment falls back to empty values.
    let female = pools.females.iter().find(|f| f.id == plain_dam).unwrap();
    assert_eq!(female.dep, None);
    assert_eq!(female.inbreeding_coefficient, 0.0);
    assert_eq!(female.number_of_offspring, 0);
}

// ---- file-backed persistence ----

#[test]
fn file_backed_service_persists_simulations_across_reopen() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("herdbook.db");

    let (simulation_id, sire, dam) = {
        let service = MatingService::open(&db_path, Box::new(AllowAll)).unwrap();
        herds::insert(
            service.connection(),
            &Herd {
                id: "h1".into(),
                name: "North herd".into(),
                property_id: "p1".into(),
            },
        )
        .unwrap();
        let sire = seed_animal(&service, "M-001", Sex::Male);
        let dam = seed_animal(&service, "F-001", Sex::Female);

        let outcome = service.simulate("ana", &request(vec![sire], vec![dam])).unwrap();
        assert_eq!(outcome.recommendation_count, 1);
        (outcome.simulation_id, sire, dam)
    };

    let service = MatingService::open(&db_path, Box::new(AllowAll)).unwrap();
    let params = simulations::get(service.connection(), simulation_id)
        .unwrap()
        .unwrap();
    assert_eq!(params.herd_id, "h1");
    assert_eq!(params.strategy, MatchingStrategy::Greedy);

    let listed = service.list_recommendations("ana", simulation_id).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].sire_id, sire);
    assert_eq!(listed[0].dam_id, dam);
    assert_eq!(listed[0].status, RecommendationStatus::Pending);
}
