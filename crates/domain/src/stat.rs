use std::{collections::BTreeMap, slice::Iter};

use crate::{Property, normalize_key};

pub const MIN_LEVEL: u32 = 1;
pub const MAX_LEVEL: u32 = 1000;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum Stat {
    UpperBodyStrength,
    LowerBodyStrength,
    CoreStrength,
    PowerExplosiveness,
    CardioEndurance,
    FlexibilityMobility,
}

impl Stat {
    /// Strength stats only activate once enough distinct relevant exercises were logged.
    #[must_use]
    pub fn is_strength_gated(self) -> bool {
        matches!(
            self,
            Stat::UpperBodyStrength
                | Stat::LowerBodyStrength
                | Stat::CoreStrength
                | Stat::PowerExplosiveness
        )
    }
}

impl Property for Stat {
    fn iter() -> Iter<'static, Stat> {
        static STATS: [Stat; 6] = [
            Stat::UpperBodyStrength,
            Stat::LowerBodyStrength,
            Stat::CoreStrength,
            Stat::PowerExplosiveness,
            Stat::CardioEndurance,
            Stat::FlexibilityMobility,
        ];
        STATS.iter()
    }

    fn name(self) -> &'static str {
        match self {
            Stat::UpperBodyStrength => "upperBodyStrength",
            Stat::LowerBodyStrength => "lowerBodyStrength",
            Stat::CoreStrength => "coreStrength",
            Stat::PowerExplosiveness => "powerExplosiveness",
            Stat::CardioEndurance => "cardioEndurance",
            Stat::FlexibilityMobility => "flexibilityMobility",
        }
    }
}

impl TryFrom<&str> for Stat {
    type Error = StatError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let key = normalize_key(value);
        Stat::iter()
            .find(|s| s.name().to_lowercase() == key)
            .copied()
            .ok_or_else(|| StatError::Unknown(value.to_string()))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum StatError {
    #[error("Unknown stat \"{0}\"")]
    Unknown(String),
}

/// Progress of a single tracked stat.
///
/// A stat is either wholly inactive (`current` and `potential` are `None`) or
/// wholly active. While active, `current` stays within `MIN_LEVEL..=MAX_LEVEL`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct StatState {
    pub current: Option<u32>,
    pub potential: Option<u32>,
    pub xp: f64,
    pub xp_to_next: f64,
}

impl StatState {
    #[must_use]
    pub fn inactive() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.potential.is_some() && self.current.is_some()
    }

    #[must_use]
    pub fn is_capped(&self) -> bool {
        self.current == Some(MAX_LEVEL)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatSheet(BTreeMap<Stat, StatState>);

impl StatSheet {
    /// Provision a sheet with every tracked stat inactive.
    #[must_use]
    pub fn new() -> Self {
        Self(
            Stat::iter()
                .map(|s| (*s, StatState::inactive()))
                .collect(),
        )
    }

    #[must_use]
    pub fn get(&self, stat: Stat) -> Option<&StatState> {
        self.0.get(&stat)
    }

    pub fn get_mut(&mut self, stat: Stat) -> &mut StatState {
        self.0.entry(stat).or_default()
    }

    pub fn insert(&mut self, stat: Stat, state: StatState) {
        self.0.insert(stat, state);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Stat, &StatState)> {
        self.0.iter()
    }
}

impl Default for StatSheet {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<(Stat, StatState)> for StatSheet {
    fn from_iter<T: IntoIterator<Item = (Stat, StatState)>>(iter: T) -> Self {
        let mut sheet = Self::new();
        for (stat, state) in iter {
            sheet.insert(stat, state);
        }
        sheet
    }
}
