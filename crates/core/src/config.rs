// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use grade_assign_domain::EligibilityRules;
use serde::{Deserialize, Serialize};

/// What to do with homeroom teachers who submitted no preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoPreferencePolicy {
    /// Place them through forced overflow.
    #[default]
    Overflow,
    /// Leave them out of placement and list them separately.
    Exclude,
}

impl NoPreferencePolicy {
    /// Returns the configuration name of this policy.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Overflow => "overflow",
            Self::Exclude => "exclude",
        }
    }
}

impl std::fmt::Display for NoPreferencePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for NoPreferencePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "overflow" => Ok(Self::Overflow),
            "exclude" => Ok(Self::Exclude),
            other => Err(format!(
                "Unknown no-preference policy '{other}' (expected 'overflow' or 'exclude')"
            )),
        }
    }
}

/// Tunables for an assignment run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Handling of teachers without a preference record.
    pub no_preference_policy: NoPreferencePolicy,
    /// Rule out each teacher's current grade.
    pub enforce_rotation: bool,
    /// Grade-head slots contributed by each grade with homerooms.
    pub grade_heads_per_grade: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            no_preference_policy: NoPreferencePolicy::Overflow,
            enforce_rotation: false,
            grade_heads_per_grade: 1,
        }
    }
}

impl EngineConfig {
    /// The eligibility rules this configuration selects.
    #[must_use]
    pub const fn eligibility_rules(&self) -> EligibilityRules {
        EligibilityRules::new(self.enforce_rotation)
    }
}
