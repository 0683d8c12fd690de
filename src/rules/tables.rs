//! Rule-set tables: physical constants for every block archetype
//!
//! Field names serialize in the PascalCase form the original planner
//! config files use, so existing rule files load unmodified.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::core::error::{PlannerError, Result};
use crate::grid::block::BlockKind;
use crate::rules::requirements::PlacementRule;

/// Four-part rule-file version, compared lexicographically
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version(pub u16, pub u16, pub u16, pub u16);

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}.{}", self.0, self.1, self.2, self.3)
    }
}

impl From<Version> for String {
    fn from(v: Version) -> String {
        v.to_string()
    }
}

impl TryFrom<String> for Version {
    type Error = String;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        let mut parts = [0u16; 4];
        let mut count = 0;
        for (i, piece) in s.split('.').enumerate() {
            if i >= 4 {
                return Err(format!("too many version components in '{s}'"));
            }
            parts[i] = piece
                .parse()
                .map_err(|_| format!("invalid version component '{piece}'"))?;
            count = i + 1;
        }
        if count < 2 {
            return Err(format!("version '{s}' needs at least major.minor"));
        }
        Ok(Version(parts[0], parts[1], parts[2], parts[3]))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FuelValues {
    pub base_efficiency: f64,
    pub base_heat: f64,
    pub fuel_time: f64,
    pub criticality_factor: u32,
    #[serde(default)]
    pub self_priming: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NeutronSourceValues {
    pub efficiency: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReflectorValues {
    pub reflectivity_multiplier: f64,
    pub efficiency_multiplier: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CoolantRecipeValues {
    pub input_name: String,
    pub output_name: String,
    pub heat_capacity: f64,
    pub out_to_in_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HeatSinkValues {
    pub heat_passive: f64,
    /// Adjacency requirement in the rule-file text form, e.g.
    /// "Exactly Two Iron heatsinks". Parsed once at load into a
    /// [`PlacementRule`]; never re-parsed during scoring.
    pub requirements: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ModeratorValues {
    pub flux_factor: u32,
    pub efficiency_factor: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NeutronShieldValues {
    pub heat_per_flux: u32,
    pub efficiency_factor: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct IrradiatorValues {
    pub heat_per_flux: u32,
    pub efficiency_multiplier: f64,
}

/// Global fission constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FissionValues {
    pub power: f64,
    pub fuel_use: f64,
    pub heat_generation: f64,
    pub min_size: u32,
    pub max_size: u32,
    pub neutron_reach: u32,
    pub max_sparsity_penalty_multiplier: f64,
    pub sparsity_penalty_threshold: f64,
    pub cooling_penalty_leniency: f64,
    #[serde(default)]
    pub irradiator_heat_per_flux: u32,
    #[serde(default)]
    pub irradiator_efficiency_multiplier: f64,
}

/// Crafting-cost tables: archetype -> resource -> per-unit quantity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CraftingMaterials {
    pub heat_sink_costs: AHashMap<String, AHashMap<String, u32>>,
    pub moderator_costs: AHashMap<String, AHashMap<String, u32>>,
    pub fuel_cell_costs: AHashMap<String, u32>,
    pub casing_costs: AHashMap<String, u32>,
}

/// The complete rule set consumed read-only by every simulation pass.
///
/// Immutable after construction; shared as `Arc<RuleSet>` so a reload can
/// replace the whole table atomically (no pass ever observes a partial
/// table).
#[derive(Debug, Clone)]
pub struct RuleSet {
    pub fission: FissionValues,
    pub fuels: AHashMap<String, FuelValues>,
    pub neutron_sources: AHashMap<String, NeutronSourceValues>,
    pub reflectors: AHashMap<String, ReflectorValues>,
    pub coolant_recipes: AHashMap<String, CoolantRecipeValues>,
    pub heat_sinks: AHashMap<String, HeatSinkValues>,
    pub moderators: AHashMap<String, ModeratorValues>,
    pub neutron_shields: AHashMap<String, NeutronShieldValues>,
    pub irradiators: AHashMap<String, IrradiatorValues>,
    pub resource_costs: CraftingMaterials,
    /// Parsed form of each heat sink's `requirements` string
    sink_rules: AHashMap<String, PlacementRule>,
}

impl RuleSet {
    /// Build a rule set from raw tables, parsing every heat-sink
    /// requirement string. Fails with [`PlannerError::RuleSetIncompatible`]
    /// if any requirement does not parse.
    #[allow(clippy::too_many_arguments)]
    pub fn from_tables(
        fission: FissionValues,
        fuels: AHashMap<String, FuelValues>,
        neutron_sources: AHashMap<String, NeutronSourceValues>,
        reflectors: AHashMap<String, ReflectorValues>,
        coolant_recipes: AHashMap<String, CoolantRecipeValues>,
        heat_sinks: AHashMap<String, HeatSinkValues>,
        moderators: AHashMap<String, ModeratorValues>,
        neutron_shields: AHashMap<String, NeutronShieldValues>,
        irradiators: AHashMap<String, IrradiatorValues>,
        resource_costs: CraftingMaterials,
    ) -> Result<Arc<RuleSet>> {
        let mut sink_rules = AHashMap::with_capacity(heat_sinks.len());
        for (name, values) in &heat_sinks {
            let rule = PlacementRule::parse(&values.requirements).map_err(|e| {
                PlannerError::RuleSetIncompatible(format!(
                    "heat sink '{name}' has unparseable requirements: {e}"
                ))
            })?;
            sink_rules.insert(name.clone(), rule);
        }

        Ok(Arc::new(RuleSet {
            fission,
            fuels,
            neutron_sources,
            reflectors,
            coolant_recipes,
            heat_sinks,
            moderators,
            neutron_shields,
            irradiators,
            resource_costs,
            sink_rules,
        }))
    }

    /// Resolve an archetype name to its block kind, or None if the name is
    /// absent from every table.
    pub fn kind_of(&self, archetype: &str) -> Option<BlockKind> {
        match archetype {
            "Conductor" => Some(BlockKind::Conductor),
            "Casing" => Some(BlockKind::Casing),
            _ if self.fuels.contains_key(archetype) => Some(BlockKind::FuelCell),
            _ if self.moderators.contains_key(archetype) => Some(BlockKind::Moderator),
            _ if self.reflectors.contains_key(archetype) => Some(BlockKind::Reflector),
            _ if self.heat_sinks.contains_key(archetype) => Some(BlockKind::HeatSink),
            _ if self.neutron_sources.contains_key(archetype) => Some(BlockKind::NeutronSource),
            _ if self.neutron_shields.contains_key(archetype) => Some(BlockKind::NeutronShield),
            _ if self.irradiators.contains_key(archetype) => Some(BlockKind::Irradiator),
            _ => None,
        }
    }

    /// Parsed placement rule for a heat-sink archetype
    pub fn sink_rule(&self, archetype: &str) -> Option<&PlacementRule> {
        self.sink_rules.get(archetype)
    }
}
