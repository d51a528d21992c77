//! Traveler state machine.
//!
//! The traveler owns every depleting resource of a journey: energy, grass,
//! and the remaining-life budget. Its health state is never set directly; it
//! is recomputed from energy after each transition. Once [`Traveler::is_dead`]
//! holds, every mutating transition is a no-op that reports failure.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{SimulationConfig, TravelerParams};
use crate::error::Result;
use crate::star::{Star, DEFAULT_GALAXY};

/// Upper energy bound.
pub const MAX_ENERGY: f64 = 100.0;

/// Energy below which the traveler eats on arrival.
pub const FEEDING_THRESHOLD: f64 = 50.0;

/// Base energy spent per unit of distance before the health multiplier.
const TRAVEL_COST_PER_UNIT: f64 = 0.1;

/// Base energy spent per unit of research time before the health multiplier.
const RESEARCH_COST_PER_UNIT: f64 = 0.2;

/// Share of current energy granted by a hypergiant.
const HYPERGIANT_ENERGY_BOOST: f64 = 0.5;

/// Health tiers derived from energy.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum HealthState {
    #[default]
    Excellent,
    Good,
    Poor,
    Dying,
    Dead,
}

impl HealthState {
    /// Classify an energy level.
    pub fn from_energy(energy: f64) -> Self {
        if energy >= 75.0 {
            Self::Excellent
        } else if energy >= 50.0 {
            Self::Good
        } else if energy >= 25.0 {
            Self::Poor
        } else if energy > 0.0 {
            Self::Dying
        } else {
            Self::Dead
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Poor => "Poor",
            Self::Dying => "Dying",
            Self::Dead => "Dead",
        }
    }
}

impl fmt::Display for HealthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Sign of a research outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    Gain,
    Loss,
    Neutral,
}

impl EffectKind {
    fn of(effect: f64) -> Self {
        if effect > 0.0 {
            Self::Gain
        } else if effect < 0.0 {
            Self::Loss
        } else {
            Self::Neutral
        }
    }
}

/// One research session, in the order it happened.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResearchRecord {
    pub star: String,
    pub effect: f64,
    pub kind: EffectKind,
    pub research_time: f64,
}

/// Read-only snapshot of a traveler, suitable for display or serialization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TravelerStatus {
    pub health_state: HealthState,
    pub current_energy: f64,
    pub grass: f64,
    pub current_age: f64,
    pub remaining_life: f64,
    pub visited_stars_count: usize,
    pub total_distance: f64,
    pub total_research_time: f64,
    pub total_food_consumed: f64,
    pub current_galaxy: String,
    pub research_effects: Vec<ResearchRecord>,
    pub is_alive: bool,
}

/// The simulated traveler.
///
/// `Clone` produces a fully independent value; search branches rely on this to
/// explore divergent futures without sharing state.
#[derive(Debug, Clone, PartialEq)]
pub struct Traveler {
    config: SimulationConfig,
    health_state: HealthState,
    current_energy: f64,
    grass: f64,
    current_age: f64,
    death_age: f64,
    remaining_life: f64,
    current_galaxy: String,
    visited_stars: Vec<String>,
    total_distance: f64,
    total_food_consumed: f64,
    total_research_time: f64,
    research_log: Vec<ResearchRecord>,
}

impl Traveler {
    /// Create a traveler with the default simulation settings.
    pub fn new(params: &TravelerParams) -> Self {
        Self::build(params, SimulationConfig::default())
    }

    /// Create a traveler with explicit simulation settings.
    ///
    /// Fails with [`Error::InvalidConfig`](crate::Error::InvalidConfig) when a
    /// table entry is negative or non-finite, or the eating ratio leaves `0..=1`.
    pub fn with_config(params: &TravelerParams, config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(params, config))
    }

    /// The remaining-life budget starts at `death_age - start_age`.
    fn build(params: &TravelerParams, config: SimulationConfig) -> Self {
        let current_energy = params.initial_energy.clamp(0.0, MAX_ENERGY);
        Self {
            config,
            health_state: HealthState::from_energy(current_energy),
            current_energy,
            grass: params.grass.max(0.0),
            current_age: params.start_age,
            death_age: params.death_age,
            remaining_life: params.death_age - params.start_age,
            current_galaxy: DEFAULT_GALAXY.to_string(),
            visited_stars: Vec::new(),
            total_distance: 0.0,
            total_food_consumed: 0.0,
            total_research_time: 0.0,
            research_log: Vec::new(),
        }
    }

    /// Place the traveler in a galaxy before the journey starts.
    pub fn in_galaxy(mut self, galaxy: impl Into<String>) -> Self {
        self.current_galaxy = galaxy.into();
        self
    }

    /// Spend `distance` of remaining life and the matching energy.
    ///
    /// Returns `false` if the traveler was already dead or died on the way.
    pub fn travel(&mut self, distance: f64, target_galaxy: Option<&str>) -> bool {
        if self.is_dead() {
            return false;
        }

        self.remaining_life -= distance;
        self.total_distance += distance;

        if let Some(galaxy) = target_galaxy {
            if galaxy != self.current_galaxy {
                self.current_galaxy = galaxy.to_string();
            }
        }

        let cost = distance
            * TRAVEL_COST_PER_UNIT
            * self.config.travel_multipliers.get(self.health_state);
        self.set_energy(self.current_energy - cost);

        !self.is_dead()
    }

    /// Arrive at a star: record it, eat if hungry, optionally research.
    ///
    /// The research effect comes from `research_effect_override` when given,
    /// otherwise from the star itself.
    pub fn visit(
        &mut self,
        star: &Star,
        research_time: f64,
        research_effect_override: Option<f64>,
    ) -> bool {
        if self.is_dead() {
            return false;
        }

        if !self.visited_stars.iter().any(|id| *id == star.id) {
            self.visited_stars.push(star.id.clone());
        }

        if self.current_energy < FEEDING_THRESHOLD && self.grass > 0.0 {
            self.auto_feed(star);
        }

        if research_time > 0.0 {
            let effect = research_effect_override.unwrap_or(star.research_effect);
            self.research(research_time, effect, &star.label);
        }

        !self.is_dead()
    }

    fn auto_feed(&mut self, star: &Star) {
        let factor = self.config.energy_factors.get(self.health_state);
        if factor <= 0.0 {
            return;
        }

        let energy_needed = FEEDING_THRESHOLD - self.current_energy;
        let eaten = (star.time_to_eat * self.config.eating_time_ratio)
            .min(self.grass)
            .min(energy_needed / factor);

        if eaten > 0.0 {
            self.set_energy(self.current_energy + eaten * factor);
            self.grass -= eaten;
            self.total_food_consumed += eaten;
            debug!(star = %star.id, eaten, energy = self.current_energy, "traveler fed");
        }
    }

    /// Spend research time and apply a lifespan effect.
    ///
    /// Returns the applied effect, or `None` when the traveler is dead.
    pub fn research(&mut self, research_time: f64, effect: f64, star_label: &str) -> Option<f64> {
        if self.is_dead() {
            return None;
        }

        let cost = research_time
            * RESEARCH_COST_PER_UNIT
            * self.config.research_multipliers.get(self.health_state);
        self.set_energy(self.current_energy - cost);

        self.remaining_life += effect;
        self.total_research_time += research_time;
        self.research_log.push(ResearchRecord {
            star: star_label.to_string(),
            effect,
            kind: EffectKind::of(effect),
            research_time,
        });

        Some(effect)
    }

    /// Hypergiant boost: +50% energy, doubled grass, optional galaxy hop.
    pub fn use_hypergiant(&mut self, target_galaxy: Option<&str>) -> bool {
        if self.is_dead() {
            return false;
        }

        self.set_energy(self.current_energy * (1.0 + HYPERGIANT_ENERGY_BOOST));
        self.grass *= 2.0;

        if let Some(galaxy) = target_galaxy {
            self.current_galaxy = galaxy.to_string();
        }

        true
    }

    /// Eat `kg` of grass, capped at what is carried.
    ///
    /// Returns the energy actually gained after clamping.
    pub fn feed(&mut self, kg: f64, star_time_to_eat: f64) -> f64 {
        if self.is_dead() {
            return 0.0;
        }

        let kg = kg.min(self.grass).max(0.0);
        let eating_window = star_time_to_eat * self.config.eating_time_ratio;
        if kg > eating_window {
            debug!(kg, eating_window, "feeding longer than the star's eating window");
        }

        let before = self.current_energy;
        let gain = kg * self.config.energy_factors.get(self.health_state);
        self.set_energy(self.current_energy + gain);

        self.grass -= kg;
        self.total_food_consumed += kg;

        self.current_energy - before
    }

    pub fn is_dead(&self) -> bool {
        self.health_state == HealthState::Dead
            || self.remaining_life <= 0.0
            || self.current_age >= self.death_age
    }

    pub fn status(&self) -> TravelerStatus {
        TravelerStatus {
            health_state: self.health_state,
            current_energy: self.current_energy,
            grass: self.grass,
            current_age: self.current_age,
            remaining_life: self.remaining_life,
            visited_stars_count: self.visited_stars.len(),
            total_distance: self.total_distance,
            total_research_time: self.total_research_time,
            total_food_consumed: self.total_food_consumed,
            current_galaxy: self.current_galaxy.clone(),
            research_effects: self.research_log.clone(),
            is_alive: !self.is_dead(),
        }
    }

    pub fn health_state(&self) -> HealthState {
        self.health_state
    }

    pub fn energy(&self) -> f64 {
        self.current_energy
    }

    pub fn grass(&self) -> f64 {
        self.grass
    }

    pub fn remaining_life(&self) -> f64 {
        self.remaining_life
    }

    pub fn current_age(&self) -> f64 {
        self.current_age
    }

    pub fn death_age(&self) -> f64 {
        self.death_age
    }

    pub fn current_galaxy(&self) -> &str {
        &self.current_galaxy
    }

    pub fn visited_stars(&self) -> &[String] {
        &self.visited_stars
    }

    pub fn research_log(&self) -> &[ResearchRecord] {
        &self.research_log
    }

    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }

    pub fn total_food_consumed(&self) -> f64 {
        self.total_food_consumed
    }

    pub fn total_research_time(&self) -> f64 {
        self.total_research_time
    }

    fn set_energy(&mut self, energy: f64) {
        self.current_energy = energy.clamp(0.0, MAX_ENERGY);
        self.health_state = HealthState::from_energy(self.current_energy);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(energy: f64, grass: f64) -> TravelerParams {
        TravelerParams {
            initial_energy: energy,
            grass,
            ..TravelerParams::default()
        }
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn health_thresholds() {
        assert_eq!(HealthState::from_energy(75.0), HealthState::Excellent);
        assert_eq!(HealthState::from_energy(74.9), HealthState::Good);
        assert_eq!(HealthState::from_energy(50.0), HealthState::Good);
        assert_eq!(HealthState::from_energy(25.0), HealthState::Poor);
        assert_eq!(HealthState::from_energy(0.1), HealthState::Dying);
        assert_eq!(HealthState::from_energy(0.0), HealthState::Dead);
    }

    #[test]
    fn state_is_derived_from_initial_energy() {
        let traveler = Traveler::new(&TravelerParams {
            initial_energy: 40.0,
            health_state: HealthState::Excellent,
            ..TravelerParams::default()
        });
        assert_eq!(traveler.health_state(), HealthState::Poor);
        assert_close(traveler.remaining_life(), 3567.0 - 12.0);
    }

    #[test]
    fn travel_cost_uses_health_multiplier() {
        let mut traveler = Traveler::new(&params(100.0, 0.0));
        assert!(traveler.travel(100.0, None));
        // 100 * 0.1 * 0.5 (Excellent)
        assert_close(traveler.energy(), 95.0);
        assert_close(traveler.remaining_life(), 3555.0 - 100.0);
        assert_close(traveler.total_distance(), 100.0);
    }

    #[test]
    fn travel_beyond_remaining_life_kills() {
        let mut traveler = Traveler::new(&TravelerParams {
            start_age: 0.0,
            death_age: 5.0,
            ..TravelerParams::default()
        });
        assert!(!traveler.travel(10.0, None));
        assert!(traveler.energy() > 0.0);
        assert!(traveler.is_dead());
        assert!(!traveler.status().is_alive);
    }

    #[test]
    fn travel_switches_galaxy() {
        let mut traveler = Traveler::new(&TravelerParams::default());
        traveler.travel(1.0, Some("Andromeda"));
        assert_eq!(traveler.current_galaxy(), "Andromeda");
    }

    #[test]
    fn energy_never_drops_below_zero() {
        let mut traveler = Traveler::new(&params(10.0, 0.0));
        assert!(!traveler.travel(1000.0, None));
        assert_eq!(traveler.energy(), 0.0);
        assert_eq!(traveler.health_state(), HealthState::Dead);
    }

    #[test]
    fn feed_in_dying_state_uses_dying_factor() {
        let mut traveler = Traveler::new(&params(10.0, 5.0));
        assert_eq!(traveler.health_state(), HealthState::Dying);

        let gained = traveler.feed(5.0, 10.0);

        assert_close(gained, 5.0);
        assert_close(traveler.energy(), 15.0);
        assert_eq!(traveler.health_state(), HealthState::Dying);
        assert_close(traveler.grass(), 0.0);
        assert_close(traveler.total_food_consumed(), 5.0);
    }

    #[test]
    fn feed_is_capped_by_grass_and_energy_ceiling() {
        let mut traveler = Traveler::new(&params(90.0, 4.0));
        let gained = traveler.feed(10.0, 100.0);
        assert_close(gained, 10.0);
        assert_close(traveler.energy(), MAX_ENERGY);
        assert_close(traveler.grass(), 0.0);
    }

    #[test]
    fn visit_auto_feeds_when_hungry() {
        let mut traveler = Traveler::new(&params(30.0, 100.0));
        let star = Star::new("s", "Spica").time_to_eat(20.0);

        assert!(traveler.visit(&star, 0.0, None));

        // Poor factor 2: min(20 * 0.5, 100, 20 / 2) = 10 kg -> +20 energy
        assert_close(traveler.energy(), 50.0);
        assert_close(traveler.grass(), 90.0);
        assert_eq!(traveler.health_state(), HealthState::Good);
        assert_eq!(traveler.visited_stars(), ["s".to_string()]);
    }

    #[test]
    fn visit_records_each_star_once() {
        let mut traveler = Traveler::new(&TravelerParams::default());
        let star = Star::new("s", "Spica");
        traveler.visit(&star, 0.0, None);
        traveler.visit(&star, 0.0, None);
        assert_eq!(traveler.status().visited_stars_count, 1);
    }

    #[test]
    fn research_applies_effect_and_energy_cost() {
        let mut traveler = Traveler::new(&TravelerParams::default());
        let star = Star::new("v", "Vega").research_effect(3.0);
        let before = traveler.remaining_life();

        assert!(traveler.visit(&star, 10.0, None));

        // 10 * 0.2 * 0.7 (Excellent)
        assert_close(traveler.energy(), 98.6);
        assert_close(traveler.remaining_life(), before + 3.0);
        assert_eq!(traveler.research_log().len(), 1);
        assert_eq!(traveler.research_log()[0].kind, EffectKind::Gain);
        assert_eq!(traveler.research_log()[0].star, "Vega");
    }

    #[test]
    fn research_override_replaces_star_effect() {
        let mut traveler = Traveler::new(&TravelerParams::default());
        let star = Star::new("v", "Vega").research_effect(3.0);
        let before = traveler.remaining_life();

        traveler.visit(&star, 1.0, Some(-4.0));

        assert_close(traveler.remaining_life(), before - 4.0);
        assert_eq!(traveler.research_log()[0].kind, EffectKind::Loss);
    }

    #[test]
    fn negative_research_can_kill() {
        let mut traveler = Traveler::new(&TravelerParams {
            start_age: 0.0,
            death_age: 2.0,
            ..TravelerParams::default()
        });
        let star = Star::new("x", "Cursed").research_effect(-5.0);
        assert!(!traveler.visit(&star, 1.0, None));
        assert!(traveler.is_dead());
    }

    #[test]
    fn hypergiant_boosts_energy_and_grass() {
        let mut traveler = Traveler::new(&params(40.0, 10.0));
        assert!(traveler.use_hypergiant(Some("Andromeda")));
        assert_close(traveler.energy(), 60.0);
        assert_close(traveler.grass(), 20.0);
        assert_eq!(traveler.current_galaxy(), "Andromeda");

        let mut strong = Traveler::new(&params(90.0, 0.0));
        strong.use_hypergiant(None);
        assert_close(strong.energy(), MAX_ENERGY);
    }

    #[test]
    fn age_ceiling_is_an_independent_death_trigger() {
        let traveler = Traveler::new(&TravelerParams {
            start_age: 100.0,
            death_age: 100.0,
            ..TravelerParams::default()
        });
        assert!(traveler.is_dead());
        assert!(traveler.energy() > 0.0);
    }

    #[test]
    fn dead_traveler_ignores_every_transition() {
        let mut traveler = Traveler::new(&TravelerParams {
            start_age: 0.0,
            death_age: 1.0,
            ..TravelerParams::default()
        });
        assert!(!traveler.travel(5.0, None));
        let frozen = traveler.clone();

        let star = Star::new("s", "Sol").time_to_eat(10.0).research_effect(100.0);
        assert!(!traveler.travel(1.0, None));
        assert!(!traveler.visit(&star, 5.0, None));
        assert!(!traveler.use_hypergiant(Some("elsewhere")));
        assert_eq!(traveler.feed(10.0, 10.0), 0.0);
        assert!(traveler.research(5.0, 100.0, "Sol").is_none());

        assert_eq!(traveler, frozen);
        assert!(traveler.is_dead());
    }

    #[test]
    fn clones_do_not_share_state() {
        let original = Traveler::new(&TravelerParams::default());
        let mut branch = original.clone();
        branch.travel(50.0, None);
        branch.visit(&Star::new("a", "A"), 0.0, None);

        assert_close(original.total_distance(), 0.0);
        assert!(original.visited_stars().is_empty());
        assert_eq!(branch.visited_stars().len(), 1);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = SimulationConfig::default();
        config.energy_factors.dying = -3.0;
        assert!(Traveler::with_config(&params(10.0, 10.0), config).is_err());

        let config = SimulationConfig {
            eating_time_ratio: f64::NAN,
            ..SimulationConfig::default()
        };
        assert!(Traveler::with_config(&params(10.0, 10.0), config).is_err());
    }

    #[test]
    fn overridden_tables_drive_every_transition() {
        let mut config = SimulationConfig::default();
        config.travel_multipliers.excellent = 2.0;
        config.research_multipliers.excellent = 0.0;
        config.energy_factors.dying = 4.0;
        config.eating_time_ratio = 1.0;

        let mut traveler = Traveler::with_config(&params(100.0, 100.0), config).expect("valid");
        traveler.travel(10.0, None);
        // 10 * 0.1 * 2.0
        assert_close(traveler.energy(), 98.0);

        traveler.research(10.0, 0.0, "Quiet");
        assert_close(traveler.energy(), 98.0);

        let mut hungry = Traveler::with_config(&params(10.0, 100.0), config).expect("valid");
        assert_close(hungry.feed(2.0, 10.0), 8.0);
        assert_close(hungry.energy(), 18.0);

        // Ratio 1.0 lets the traveler eat the whole window: min(6, 100, 32 / 4) = 6 kg
        let star = Star::new("s", "Spica").time_to_eat(6.0);
        hungry.visit(&star, 0.0, None);
        assert_close(hungry.energy(), 42.0);
        assert_close(hungry.grass(), 92.0);
    }

    #[test]
    fn energy_stays_in_bounds_over_mixed_transitions() {
        let mut traveler = Traveler::new(&params(60.0, 50.0));
        let star = Star::new("m", "Mixed").time_to_eat(30.0).research_effect(2.0);
        for step in 0..40 {
            match step % 4 {
                0 => {
                    traveler.travel(35.0, None);
                }
                1 => {
                    traveler.visit(&star, 6.0, None);
                }
                2 => {
                    traveler.use_hypergiant(None);
                }
                _ => {
                    traveler.feed(7.0, 30.0);
                }
            }
            assert!((0.0..=MAX_ENERGY).contains(&traveler.energy()));
            assert!(traveler.grass() >= 0.0);
        }
    }
}
