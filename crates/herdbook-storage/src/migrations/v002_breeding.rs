//! V002: breeding tables (genetic_evaluations, simulation_parameters,
//! mating_recommendations, breeding_records).

pub const MIGRATION_SQL: &str = r#"
-- Genetic evaluations: exactly one row per animal, refreshed in place.
CREATE TABLE IF NOT EXISTS genetic_evaluations (
    id INTEGER PRIMARY KEY,
    animal_id INTEGER NOT NULL UNIQUE REFERENCES animals(id),
    herd_id TEXT NOT NULL,
    inbreeding_coefficient REAL NOT NULL DEFAULT 0,
    dep REAL,
    selection_index REAL,
    number_of_offspring INTEGER NOT NULL DEFAULT 0,
    last_evaluation_date TEXT NOT NULL,
    adjusted_weight_60d REAL,
    adjusted_weight_120d REAL,
    adjusted_weight_180d REAL,
    scrotal_perimeter REAL,
    observations TEXT
) STRICT;

CREATE INDEX IF NOT EXISTS idx_evaluations_herd ON genetic_evaluations(herd_id);

-- Simulation parameters: immutable snapshot of one optimizer invocation.
CREATE TABLE IF NOT EXISTS simulation_parameters (
    id INTEGER PRIMARY KEY,
    herd_id TEXT NOT NULL REFERENCES herds(id),
    simulation_date TEXT NOT NULL,
    heritability REAL NOT NULL,
    min_age_male_months INTEGER NOT NULL,
    min_age_female_months INTEGER NOT NULL,
    weight_adjustment_days INTEGER NOT NULL
        CHECK (weight_adjustment_days IN (60, 120, 180)),
    max_female_percentage_per_male REAL NOT NULL,
    strategy TEXT NOT NULL DEFAULT 'greedy'
) STRICT;

CREATE INDEX IF NOT EXISTS idx_simulations_herd ON simulation_parameters(herd_id);

-- Mating recommendations: the optimizer's accepted pairings. sire_id/dam_id
-- carry no foreign key so rows survive registry edits; unresolvable ids
-- surface as per-item conversion errors instead.
CREATE TABLE IF NOT EXISTS mating_recommendations (
    id INTEGER PRIMARY KEY,
    simulation_id INTEGER NOT NULL REFERENCES simulation_parameters(id),
    herd_id TEXT NOT NULL,
    sire_id INTEGER NOT NULL,
    dam_id INTEGER NOT NULL,
    predicted_dep REAL NOT NULL,
    predicted_index REAL NOT NULL,
    predicted_inbreeding REAL NOT NULL,
    predicted_genetic_gain REAL NOT NULL,
    status TEXT NOT NULL DEFAULT 'pending'
        CHECK (status IN ('pending', 'adopted', 'ignored')),
    adopted_date TEXT
) STRICT;

CREATE INDEX IF NOT EXISTS idx_recommendations_simulation_status
    ON mating_recommendations(simulation_id, status);
CREATE INDEX IF NOT EXISTS idx_recommendations_gain
    ON mating_recommendations(simulation_id, predicted_genetic_gain DESC);

-- Breeding records: coverages and their outcomes. At most one row per
-- (dam_id, sire_id, coverage_date); the conversion path checks the triple.
CREATE TABLE IF NOT EXISTS breeding_records (
    id INTEGER PRIMARY KEY,
    herd_id TEXT NOT NULL,
    dam_id INTEGER NOT NULL,
    sire_id INTEGER NOT NULL,
    coverage_date TEXT NOT NULL,
    dam_weight REAL NOT NULL,
    dam_body_condition_score INTEGER NOT NULL,
    sire_scrotal_perimeter REAL,
    parturition_status TEXT NOT NULL DEFAULT 'em_andamento'
        CHECK (parturition_status IN ('em_andamento', 'sim', 'não')),
    birth_date TEXT,
    observations TEXT
) STRICT;

CREATE INDEX IF NOT EXISTS idx_breeding_triple
    ON breeding_records(dam_id, sire_id, coverage_date);
CREATE INDEX IF NOT EXISTS idx_breeding_sire
    ON breeding_records(sire_id, parturition_status);
CREATE INDEX IF NOT EXISTS idx_breeding_herd
    ON breeding_records(herd_id, parturition_status);
"#;
