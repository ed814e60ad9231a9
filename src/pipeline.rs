use std::collections::HashMap;

use anyhow::{Result, bail};

use crate::artifacts::ModelContext;
use crate::verdict::{VerdictTier, classify};

/// Competition the submitted stats were produced in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompetitionLevel {
    Nba,
    EuroLeague,
    NcaaD1,
    EspoirsU21,
    NationalNm,
    Departemental,
}

impl CompetitionLevel {
    pub const ALL: [CompetitionLevel; 6] = [
        CompetitionLevel::Nba,
        CompetitionLevel::EuroLeague,
        CompetitionLevel::NcaaD1,
        CompetitionLevel::EspoirsU21,
        CompetitionLevel::NationalNm,
        CompetitionLevel::Departemental,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CompetitionLevel::Nba => "NBA",
            CompetitionLevel::EuroLeague => "EuroLeague / Betclic Elite",
            CompetitionLevel::NcaaD1 => "D1 NCAA",
            CompetitionLevel::EspoirsU21 => "Espoirs Elite (U21)",
            CompetitionLevel::NationalNm => "National (NM1/NM2)",
            CompetitionLevel::Departemental => "Départemental",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|l| *l == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|l| *l == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Translation factors: how much a counting stat at each level is worth
/// at NBA difficulty. Kept as a table rather than a match so the lookup
/// stays defensive if the enum and the table ever drift apart.
pub const DIFFICULTY_COEFFICIENTS: [(CompetitionLevel, f64); 6] = [
    (CompetitionLevel::Nba, 1.0),
    (CompetitionLevel::EuroLeague, 0.75),
    (CompetitionLevel::NcaaD1, 0.55),
    (CompetitionLevel::EspoirsU21, 0.25),
    (CompetitionLevel::NationalNm, 0.15),
    (CompetitionLevel::Departemental, 0.02),
];

pub fn difficulty_coefficient(level: CompetitionLevel) -> Result<f64> {
    for (l, coef) in DIFFICULTY_COEFFICIENTS {
        if l == level {
            return Ok(coef);
        }
    }
    bail!("no difficulty coefficient configured for {}", level.label());
}

/// One form submission. The form clamps every field to its domain, so
/// the pipeline takes these values as already valid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawInput {
    pub age: u32,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub games_played: u32,
    pub rebounds: f64,
    pub assists: f64,
    pub usage_pct: f64,
    pub true_shooting_pct: f64,
    pub competition_level: CompetitionLevel,
}

impl Default for RawInput {
    fn default() -> Self {
        Self {
            age: 21,
            height_cm: 193.0,
            weight_kg: 85.0,
            games_played: 20,
            rebounds: 5.0,
            assists: 2.0,
            usage_pct: 0.20,
            true_shooting_pct: 0.55,
            competition_level: CompetitionLevel::Nba,
        }
    }
}

// Fields the form does not collect, fixed to the values the model was
// calibrated around.
const REFERENCE_SEASON: f64 = 2024.0;
const DEFAULT_DRAFT_ROUND: &str = "Undrafted";
const DEFAULT_COUNTRY: &str = "France";
const COUNTRY_SENTINEL: &str = "Other";

/// A record aligned to the model's column schema: same columns, same
/// order, every submission.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRecord {
    columns: Vec<String>,
    values: Vec<f64>,
}

impl FeatureRecord {
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn get(&self, column: &str) -> Option<f64> {
        let idx = self.columns.iter().position(|c| c == column)?;
        Some(self.values[idx])
    }
}

/// Reconciles a dynamically built column map against a fixed schema:
/// absent columns are zero-filled, extra columns are dropped.
pub fn align_to_schema(columns: &[String], values: &HashMap<String, f64>) -> Vec<f64> {
    columns
        .iter()
        .map(|col| values.get(col).copied().unwrap_or(0.0))
        .collect()
}

/// Collapses a country the model never saw in training into the
/// "Other" bucket, so one-hot expansion can never invent a column the
/// schema does not carry.
pub fn resolve_country<'a>(country: &'a str, ctx: &ModelContext) -> &'a str {
    if ctx.knows_country(country) {
        country
    } else {
        COUNTRY_SENTINEL
    }
}

/// Turns a submission into a model-ready record. Rebounds and assists
/// are discounted by the competition coefficient; usage and true
/// shooting are treated as level-invariant, matching the trained model.
pub fn build_feature_record(raw: &RawInput, ctx: &ModelContext) -> Result<FeatureRecord> {
    let coef = difficulty_coefficient(raw.competition_level)?;

    let reb = raw.rebounds * coef;
    let ast = raw.assists * coef;

    let mut values = HashMap::new();
    values.insert("age".to_string(), raw.age as f64);
    values.insert("player_height".to_string(), raw.height_cm);
    values.insert("player_weight".to_string(), raw.weight_kg);
    values.insert("gp".to_string(), raw.games_played as f64);
    values.insert("reb".to_string(), reb);
    values.insert("ast".to_string(), ast);
    values.insert("net_rating".to_string(), 0.0);
    // Fixed-ratio proxies for the rate stats the form does not collect.
    values.insert("oreb_pct".to_string(), reb * 0.05);
    values.insert("dreb_pct".to_string(), reb * 0.10);
    values.insert("usg_pct".to_string(), raw.usage_pct);
    values.insert("ts_pct".to_string(), raw.true_shooting_pct);
    values.insert("ast_pct".to_string(), ast / 15.0);
    values.insert("season".to_string(), REFERENCE_SEASON);

    values.insert(format!("draft_round_{DEFAULT_DRAFT_ROUND}"), 1.0);
    let country = resolve_country(DEFAULT_COUNTRY, ctx);
    values.insert(format!("country_{country}"), 1.0);

    Ok(FeatureRecord {
        values: align_to_schema(&ctx.columns, &values),
        columns: ctx.columns.clone(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub score: f64,
    pub tier: VerdictTier,
}

/// End-to-end: submission in, scored and classified projection out.
pub fn run_projection(raw: &RawInput, ctx: &ModelContext) -> Result<Projection> {
    let record = build_feature_record(raw, ctx)?;
    let score = ctx.model.predict(record.values());
    Ok(Projection {
        score,
        tier: classify(score),
    })
}
