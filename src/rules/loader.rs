//! Rule-set file loading and saving
//!
//! The file format is the original planner's JSON config. The core does no
//! file I/O itself: callers hand in the JSON text and receive a complete
//! `RuleSet` or an error, so a failed load can never corrupt the table
//! currently in use.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::core::error::{PlannerError, Result};
use crate::rules::tables::{
    CoolantRecipeValues, CraftingMaterials, FissionValues, FuelValues, HeatSinkValues,
    IrradiatorValues, ModeratorValues, NeutronShieldValues, NeutronSourceValues, ReflectorValues,
    RuleSet, Version,
};

/// Version written by [`save_rule_set`]
pub const SAVE_VERSION: Version = Version(2, 1, 24, 0);

/// Oldest rule-file version whose values are still current
const MIN_SUPPORTED: Version = Version(2, 1, 7, 0);

/// First overhaul version; anything older is a different rule schema
const OVERHAUL: Version = Version(2, 0, 0, 0);

/// On-disk shape of a rule file. Field names match the original config
/// format (note `saveVersion` is the lone camelCase field).
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RuleSetFile {
    #[serde(rename = "saveVersion")]
    save_version: Version,
    fission: FissionValues,
    resource_costs: CraftingMaterials,
    fuels: AHashMap<String, FuelValues>,
    neutron_sources: AHashMap<String, NeutronSourceValues>,
    reflectors: AHashMap<String, ReflectorValues>,
    coolant_recipes: AHashMap<String, CoolantRecipeValues>,
    heat_sinks: AHashMap<String, HeatSinkValues>,
    moderators: AHashMap<String, ModeratorValues>,
    neutron_shields: AHashMap<String, NeutronShieldValues>,
    #[serde(default)]
    irradiators: AHashMap<String, IrradiatorValues>,
}

/// Parse and validate a rule file, producing a fresh immutable rule set.
///
/// The previous rule set is untouched on any failure; the caller decides
/// whether to keep it or fall back to defaults.
pub fn load_rule_set(json: &str) -> Result<Arc<RuleSet>> {
    let file: RuleSetFile = serde_json::from_str(json)?;

    if file.save_version < OVERHAUL {
        tracing::warn!(version = %file.save_version, "rejecting pre-overhaul rule file");
        return Err(PlannerError::RuleSetIncompatible(format!(
            "pre-overhaul rule files are not supported (version {})",
            file.save_version
        )));
    }
    if file.save_version < MIN_SUPPORTED {
        tracing::warn!(version = %file.save_version, "rejecting stale rule file");
        return Err(PlannerError::RuleSetIncompatible(format!(
            "rule file version {} predates the current value tables (need {MIN_SUPPORTED}+)",
            file.save_version
        )));
    }
    if file.fuels.is_empty() || file.heat_sinks.is_empty() {
        return Err(PlannerError::RuleSetIncompatible(
            "rule file is missing fuel or heat sink tables".to_string(),
        ));
    }

    let version = file.save_version;
    let rules = RuleSet::from_tables(
        file.fission,
        file.fuels,
        file.neutron_sources,
        file.reflectors,
        file.coolant_recipes,
        file.heat_sinks,
        file.moderators,
        file.neutron_shields,
        file.irradiators,
        file.resource_costs,
    )?;
    tracing::debug!(
        fuels = rules.fuels.len(),
        heat_sinks = rules.heat_sinks.len(),
        "loaded rule set version {version}"
    );
    Ok(rules)
}

/// Serialize a rule set back to the JSON file form
pub fn save_rule_set(rules: &RuleSet) -> Result<String> {
    let file = RuleSetFile {
        save_version: SAVE_VERSION,
        fission: rules.fission,
        resource_costs: rules.resource_costs.clone(),
        fuels: rules.fuels.clone(),
        neutron_sources: rules.neutron_sources.clone(),
        reflectors: rules.reflectors.clone(),
        coolant_recipes: rules.coolant_recipes.clone(),
        heat_sinks: rules.heat_sinks.clone(),
        moderators: rules.moderators.clone(),
        neutron_shields: rules.neutron_shields.clone(),
        irradiators: rules.irradiators.clone(),
    };
    Ok(serde_json::to_string_pretty(&file)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::defaults::default_rules;

    #[test]
    fn test_default_rules_round_trip() {
        let rules = default_rules();
        let json = save_rule_set(&rules).unwrap();
        let loaded = load_rule_set(&json).unwrap();

        assert_eq!(loaded.fuels, rules.fuels);
        assert_eq!(loaded.heat_sinks, rules.heat_sinks);
        assert_eq!(loaded.moderators, rules.moderators);
        assert_eq!(loaded.fission, rules.fission);
        assert_eq!(loaded.resource_costs, rules.resource_costs);
    }

    #[test]
    fn test_rejects_pre_overhaul_version() {
        let rules = default_rules();
        let json = save_rule_set(&rules)
            .unwrap()
            .replace(&SAVE_VERSION.to_string(), "1.2.25.0");
        let err = load_rule_set(&json).unwrap_err();
        assert!(matches!(err, PlannerError::RuleSetIncompatible(_)));
    }

    #[test]
    fn test_rejects_stale_overhaul_version() {
        let rules = default_rules();
        let json = save_rule_set(&rules)
            .unwrap()
            .replace(&SAVE_VERSION.to_string(), "2.1.6.0");
        let err = load_rule_set(&json).unwrap_err();
        assert!(matches!(err, PlannerError::RuleSetIncompatible(_)));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = load_rule_set("{ not json").unwrap_err();
        assert!(matches!(err, PlannerError::Serde(_)));
    }

    #[test]
    fn test_rejects_unparseable_requirement() {
        let rules = default_rules();
        let json = save_rule_set(&rules)
            .unwrap()
            .replace("One FuelCell", "Several Gadgets");
        let err = load_rule_set(&json).unwrap_err();
        assert!(matches!(err, PlannerError::RuleSetIncompatible(_)));
    }
}
