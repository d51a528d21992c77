//! Simulation and ingestion settings.
//!
//! Every tunable used by the traveler state machine lives in
//! [`SimulationConfig`]; callers override individual tables instead of relying
//! on process-wide constants.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::traveler::HealthState;

/// One value per health state. All five entries are required when
/// deserializing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StateTable {
    pub excellent: f64,
    pub good: f64,
    pub poor: f64,
    pub dying: f64,
    pub dead: f64,
}

impl StateTable {
    pub const fn new(excellent: f64, good: f64, poor: f64, dying: f64, dead: f64) -> Self {
        Self {
            excellent,
            good,
            poor,
            dying,
            dead,
        }
    }

    pub fn get(&self, state: HealthState) -> f64 {
        match state {
            HealthState::Excellent => self.excellent,
            HealthState::Good => self.good,
            HealthState::Poor => self.poor,
            HealthState::Dying => self.dying,
            HealthState::Dead => self.dead,
        }
    }

    fn validate(&self, name: &str) -> Result<()> {
        for (state, value) in [
            ("excellent", self.excellent),
            ("good", self.good),
            ("poor", self.poor),
            ("dying", self.dying),
            ("dead", self.dead),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidConfig {
                    message: format!(
                        "{name}.{state} must be finite and non-negative, got {value}"
                    ),
                });
            }
        }
        Ok(())
    }
}

/// Energy gained per kilogram of grass eaten.
pub const DEFAULT_ENERGY_FACTORS: StateTable = StateTable::new(5.0, 3.0, 2.0, 1.0, 0.0);

/// Multiplier on the base research energy cost (`time * 0.2`).
pub const DEFAULT_RESEARCH_MULTIPLIERS: StateTable = StateTable::new(0.7, 1.0, 1.8, 3.0, 1.0);

/// Multiplier on the base travel energy cost (`distance * 0.1`).
pub const DEFAULT_TRAVEL_MULTIPLIERS: StateTable = StateTable::new(0.5, 0.8, 1.5, 3.0, 0.0);

/// Share of a star's eating time the traveler may spend feeding.
pub const DEFAULT_EATING_TIME_RATIO: f64 = 0.5;

/// Tunables for the traveler state machine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SimulationConfig {
    pub energy_factors: StateTable,
    pub research_multipliers: StateTable,
    pub travel_multipliers: StateTable,
    pub eating_time_ratio: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            energy_factors: DEFAULT_ENERGY_FACTORS,
            research_multipliers: DEFAULT_RESEARCH_MULTIPLIERS,
            travel_multipliers: DEFAULT_TRAVEL_MULTIPLIERS,
            eating_time_ratio: DEFAULT_EATING_TIME_RATIO,
        }
    }
}

impl SimulationConfig {
    /// Validate every table and the eating ratio.
    pub fn validate(&self) -> Result<()> {
        self.energy_factors.validate("energyFactors")?;
        self.research_multipliers.validate("researchMultipliers")?;
        self.travel_multipliers.validate("travelMultipliers")?;

        if !self.eating_time_ratio.is_finite() || !(0.0..=1.0).contains(&self.eating_time_ratio) {
            return Err(Error::InvalidConfig {
                message: format!(
                    "eatingTimeRatio must be between 0 and 1, got {}",
                    self.eating_time_ratio
                ),
            });
        }

        Ok(())
    }
}

/// Initial traveler parameters as supplied by the star document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TravelerParams {
    pub initial_energy: f64,
    /// Informational only; the effective state is derived from energy.
    pub health_state: HealthState,
    pub grass: f64,
    pub start_age: f64,
    pub death_age: f64,
}

impl Default for TravelerParams {
    fn default() -> Self {
        Self {
            initial_energy: 100.0,
            health_state: HealthState::Excellent,
            grass: 300.0,
            start_age: 12.0,
            death_age: 3567.0,
        }
    }
}

impl TravelerParams {
    pub fn validate(&self) -> Result<()> {
        let checks = [
            ("initialEnergy", self.initial_energy),
            ("grass", self.grass),
            ("startAge", self.start_age),
            ("deathAge", self.death_age),
        ];
        for (name, value) in checks {
            if !value.is_finite() {
                return Err(Error::InvalidConfig {
                    message: format!("{name} must be finite, got {value}"),
                });
            }
        }
        if self.grass < 0.0 {
            return Err(Error::InvalidConfig {
                message: format!("grass must be non-negative, got {}", self.grass),
            });
        }
        Ok(())
    }
}

/// Axis-aligned rectangle every star position must fall into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self {
            min_x: 0.0,
            max_x: 200.0,
            min_y: 0.0,
            max_y: 200.0,
        }
    }
}

impl WorldBounds {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        (self.min_x..=self.max_x).contains(&x) && (self.min_y..=self.max_y).contains(&y)
    }
}

/// Options applied while turning a document into a [`StarGraph`](crate::StarGraph).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct IngestOptions {
    /// Reject stars outside these bounds. `None` accepts any finite position.
    pub bounds: Option<WorldBounds>,
    /// Insert the reverse of every one-way link.
    pub mirror_links: bool,
}

impl IngestOptions {
    /// Bounds checking with the default 200 x 200 world, no mirroring.
    pub fn strict() -> Self {
        Self {
            bounds: Some(WorldBounds::default()),
            mirror_links: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        SimulationConfig::default().validate().expect("defaults are valid");
        TravelerParams::default().validate().expect("defaults are valid");
    }

    #[test]
    fn negative_factor_is_rejected() {
        let mut config = SimulationConfig::default();
        config.energy_factors.poor = -1.0;
        let err = config.validate().expect_err("negative factor");
        assert!(err.to_string().contains("energyFactors.poor"));
    }

    #[test]
    fn eating_ratio_above_one_is_rejected() {
        let config = SimulationConfig {
            eating_time_ratio: 1.5,
            ..SimulationConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn json_overrides_keep_unspecified_tables() {
        let config: SimulationConfig = serde_json::from_str(
            r#"{
                "energyFactors": {"excellent": 6, "good": 4, "poor": 2, "dying": 2, "dead": 0},
                "eatingTimeRatio": 0.25
            }"#,
        )
        .expect("parse config");
        assert_eq!(config.energy_factors.get(HealthState::Dying), 2.0);
        assert_eq!(config.travel_multipliers, DEFAULT_TRAVEL_MULTIPLIERS);
        assert_eq!(config.eating_time_ratio, 0.25);
    }

    #[test]
    fn incomplete_table_is_rejected() {
        let parsed = serde_json::from_str::<SimulationConfig>(r#"{"energyFactors": {"dying": 2}}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn world_bounds_are_inclusive() {
        let bounds = WorldBounds::default();
        assert!(bounds.contains(0.0, 200.0));
        assert!(!bounds.contains(-0.1, 10.0));
    }
}
