//! Room and rule tunables, loaded from the environment with defaults.

use std::env;
use std::str::FromStr;

use crate::error::AppError;

pub const ROOM_CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub default_capacity: i32,
    pub min_capacity: i32,
    pub max_capacity: i32,
    pub room_code_length: usize,
    pub room_code_attempts: u32,
    pub hot_potato: HotPotatoRules,
    /// Fixed seed for the shared random source; OS entropy when absent.
    pub rng_seed: Option<u64>,
}

/// Explosion odds and penalty for hot potato passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HotPotatoRules {
    pub explosion_numerator: u32,
    pub explosion_denominator: u32,
    pub penalty_drinks: i32,
    pub penalty_points: i32,
}

impl Default for HotPotatoRules {
    fn default() -> Self {
        Self {
            explosion_numerator: 3,
            explosion_denominator: 10,
            penalty_drinks: 2,
            penalty_points: 1,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            default_capacity: 8,
            min_capacity: 2,
            max_capacity: 20,
            room_code_length: 6,
            room_code_attempts: 10,
            hot_potato: HotPotatoRules::default(),
            rng_seed: None,
        }
    }
}

impl GameConfig {
    /// Defaults overridden by any of the `ROOM_*`, `HOT_POTATO_*` and
    /// `GAME_RNG_SEED` variables that are set.
    pub fn from_env() -> Result<Self, AppError> {
        let d = Self::default();
        let cfg = Self {
            default_capacity: var_or("ROOM_DEFAULT_CAPACITY", d.default_capacity)?,
            min_capacity: var_or("ROOM_MIN_CAPACITY", d.min_capacity)?,
            max_capacity: var_or("ROOM_MAX_CAPACITY", d.max_capacity)?,
            room_code_length: var_or("ROOM_CODE_LENGTH", d.room_code_length)?,
            room_code_attempts: var_or("ROOM_CODE_ATTEMPTS", d.room_code_attempts)?,
            hot_potato: HotPotatoRules {
                explosion_numerator: var_or(
                    "HOT_POTATO_EXPLOSION_NUMERATOR",
                    d.hot_potato.explosion_numerator,
                )?,
                explosion_denominator: var_or(
                    "HOT_POTATO_EXPLOSION_DENOMINATOR",
                    d.hot_potato.explosion_denominator,
                )?,
                penalty_drinks: var_or("HOT_POTATO_PENALTY_DRINKS", d.hot_potato.penalty_drinks)?,
                penalty_points: var_or("HOT_POTATO_PENALTY_POINTS", d.hot_potato.penalty_points)?,
            },
            rng_seed: match env::var("GAME_RNG_SEED") {
                Ok(raw) => Some(parse_var("GAME_RNG_SEED", &raw)?),
                Err(_) => None,
            },
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.min_capacity < 2 || self.min_capacity > self.max_capacity {
            return Err(AppError::config(format!(
                "room capacity bounds {}..={} are invalid",
                self.min_capacity, self.max_capacity
            )));
        }
        if !(self.min_capacity..=self.max_capacity).contains(&self.default_capacity) {
            return Err(AppError::config(format!(
                "default capacity {} is outside {}..={}",
                self.default_capacity, self.min_capacity, self.max_capacity
            )));
        }
        if self.room_code_length == 0 || self.room_code_attempts == 0 {
            return Err(AppError::config(
                "room code length and attempts must be positive",
            ));
        }
        let hp = &self.hot_potato;
        if hp.explosion_denominator == 0 || hp.explosion_numerator > hp.explosion_denominator {
            return Err(AppError::config(format!(
                "explosion chance {}/{} is not a probability",
                hp.explosion_numerator, hp.explosion_denominator
            )));
        }
        if hp.penalty_drinks < 0 || hp.penalty_points < 0 {
            return Err(AppError::config("hot potato penalties must not be negative"));
        }
        Ok(())
    }

    /// Requested capacity, or the default when absent or out of range.
    pub fn effective_capacity(&self, requested: Option<i32>) -> i32 {
        match requested {
            Some(c) if (self.min_capacity..=self.max_capacity).contains(&c) => c,
            _ => self.default_capacity,
        }
    }
}

fn var_or<T: FromStr>(name: &str, default: T) -> Result<T, AppError> {
    match env::var(name) {
        Ok(raw) => parse_var(name, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_var<T: FromStr>(name: &str, raw: &str) -> Result<T, AppError> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::config(format!("environment variable '{name}' has invalid value '{raw}'")))
}
