//! V001: registry tables (herds, animals, weight_records).

pub const MIGRATION_SQL: &str = r#"
-- Herds: grouping unit for animals; property_id is the authorization scope.
CREATE TABLE IF NOT EXISTS herds (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    property_id TEXT NOT NULL
) STRICT;

CREATE INDEX IF NOT EXISTS idx_herds_property ON herds(property_id);

-- Animals: the registry. father_id/mother_id carry no foreign key: pedigree
-- links may point at animals that were never imported, and the resolvers
-- treat dangling ids as missing slots.
CREATE TABLE IF NOT EXISTS animals (
    id INTEGER PRIMARY KEY,
    herd_id TEXT NOT NULL REFERENCES herds(id),
    identification TEXT NOT NULL,
    name TEXT,
    category TEXT,
    sex TEXT NOT NULL CHECK (sex IN ('M', 'F')),
    birth_date TEXT,
    status TEXT NOT NULL DEFAULT 'active',
    father_id INTEGER,
    mother_id INTEGER
) STRICT;

CREATE INDEX IF NOT EXISTS idx_animals_herd_status ON animals(herd_id, status);
CREATE INDEX IF NOT EXISTS idx_animals_identification ON animals(identification);

-- Weight records: append-only weighing history.
CREATE TABLE IF NOT EXISTS weight_records (
    id INTEGER PRIMARY KEY,
    animal_id INTEGER NOT NULL REFERENCES animals(id),
    measurement_date TEXT NOT NULL,
    weight REAL NOT NULL,
    conformation_score INTEGER,
    precocity_score INTEGER,
    musculature_score INTEGER,
    cpm_average REAL
) STRICT;

CREATE INDEX IF NOT EXISTS idx_weight_records_animal_date
    ON weight_records(animal_id, measurement_date);
"#;
