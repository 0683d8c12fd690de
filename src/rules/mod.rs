//! Rule set: immutable archetype tables driving the whole simulation

pub mod defaults;
pub mod requirements;
pub mod tables;
mod loader;

pub use defaults::default_rules;
pub use loader::{load_rule_set, save_rule_set, SAVE_VERSION};
pub use requirements::{Clause, PlacementRule, Quantifier, Target};
pub use tables::{
    CoolantRecipeValues, CraftingMaterials, FissionValues, FuelValues, HeatSinkValues,
    IrradiatorValues, ModeratorValues, NeutronShieldValues, NeutronSourceValues, ReflectorValues,
    RuleSet, Version,
};
