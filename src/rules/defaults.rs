//! Built-in default rule set
//!
//! Values reproduce the planner's stock configuration: the four fuel
//! lines, the full heat-sink roster with adjacency requirements, and the
//! overhaul fission constants.

use ahash::AHashMap;
use std::sync::Arc;

use crate::rules::tables::{
    CoolantRecipeValues, CraftingMaterials, FissionValues, FuelValues, IrradiatorValues,
    ModeratorValues, NeutronShieldValues, NeutronSourceValues, ReflectorValues, RuleSet,
    HeatSinkValues,
};

/// The built-in rule set used when no rule file has been loaded
pub fn default_rules() -> Arc<RuleSet> {
    RuleSet::from_tables(
        default_fission(),
        default_fuels(),
        default_neutron_sources(),
        default_reflectors(),
        default_coolant_recipes(),
        default_heat_sinks(),
        default_moderators(),
        default_neutron_shields(),
        default_irradiators(),
        default_resource_costs(),
    )
    .expect("built-in tables are well-formed")
}

fn default_fission() -> FissionValues {
    FissionValues {
        power: 1.0,
        fuel_use: 1.0,
        heat_generation: 1.0,
        min_size: 1,
        max_size: 24,
        neutron_reach: 4,
        max_sparsity_penalty_multiplier: 0.5,
        sparsity_penalty_threshold: 0.75,
        cooling_penalty_leniency: 10.0,
        irradiator_heat_per_flux: 0,
        irradiator_efficiency_multiplier: 0.0,
    }
}

fn fuel(be: f64, bh: f64, ft: f64, cf: u32) -> FuelValues {
    FuelValues {
        base_efficiency: be,
        base_heat: bh,
        fuel_time: ft,
        criticality_factor: cf,
        self_priming: false,
    }
}

fn priming_fuel(be: f64, bh: f64, ft: f64, cf: u32) -> FuelValues {
    FuelValues {
        self_priming: true,
        ..fuel(be, bh, ft, cf)
    }
}

fn default_fuels() -> AHashMap<String, FuelValues> {
    let entries = [
        // oxide line
        ("[OX]TBU", fuel(1.25, 40.0, 14400.0, 234)),
        ("[OX]LEU-233", fuel(1.1, 216.0, 2666.0, 78)),
        ("[OX]HEU-233", fuel(1.15, 648.0, 2666.0, 39)),
        ("[OX]LEU-235", fuel(1.0, 120.0, 4800.0, 102)),
        ("[OX]HEU-235", fuel(1.05, 360.0, 4800.0, 51)),
        ("[OX]LEN-236", fuel(1.1, 292.0, 1972.0, 70)),
        ("[OX]HEN-236", fuel(1.15, 876.0, 1972.0, 35)),
        ("[OX]LEP-239", fuel(1.2, 126.0, 4572.0, 99)),
        ("[OX]HEP-239", fuel(1.25, 378.0, 4572.0, 49)),
        ("[OX]LEP-241", fuel(1.25, 182.0, 3164.0, 84)),
        ("[OX]HEP-241", fuel(1.3, 546.0, 3164.0, 42)),
        ("[OX]MOX-239", fuel(1.05, 132.0, 4354.0, 94)),
        ("[OX]MOX-241", fuel(1.15, 192.0, 3014.0, 80)),
        ("[OX]LEA-242", fuel(1.35, 390.0, 1476.0, 65)),
        ("[OX]HEA-242", fuel(1.4, 1170.0, 1476.0, 32)),
        ("[OX]LECm-243", fuel(1.45, 384.0, 1500.0, 66)),
        ("[OX]HECm-243", fuel(1.5, 1152.0, 1500.0, 33)),
        ("[OX]LECm-245", fuel(1.5, 238.0, 2420.0, 75)),
        ("[OX]HECm-245", fuel(1.55, 714.0, 2420.0, 37)),
        ("[OX]LECm-247", fuel(1.55, 268.0, 2150.0, 72)),
        ("[OX]HECm-247", fuel(1.6, 804.0, 2150.0, 36)),
        ("[OX]LEB-248", fuel(1.65, 266.0, 2166.0, 73)),
        ("[OX]HEB-248", fuel(1.7, 798.0, 2166.0, 36)),
        ("[OX]LECf-249", priming_fuel(1.75, 540.0, 1066.0, 60)),
        ("[OX]HECf-249", priming_fuel(1.8, 1620.0, 1066.0, 30)),
        ("[OX]LECf-251", priming_fuel(1.8, 288.0, 2000.0, 71)),
        ("[OX]HECf-251", priming_fuel(1.85, 864.0, 2000.0, 35)),
        // nitride line
        ("[NI]TBU", fuel(1.25, 32.0, 18000.0, 293)),
        ("[NI]LEU-233", fuel(1.1, 172.0, 3348.0, 98)),
        ("[NI]HEU-233", fuel(1.15, 516.0, 3348.0, 49)),
        ("[NI]LEU-235", fuel(1.0, 96.0, 6000.0, 128)),
        ("[NI]HEU-235", fuel(1.05, 288.0, 6000.0, 64)),
        ("[NI]LEN-236", fuel(1.1, 234.0, 2462.0, 88)),
        ("[NI]HEN-236", fuel(1.15, 702.0, 2462.0, 44)),
        ("[NI]LEP-239", fuel(1.2, 100.0, 5760.0, 124)),
        ("[NI]HEP-239", fuel(1.25, 300.0, 5760.0, 62)),
        ("[NI]LEP-241", fuel(1.25, 146.0, 3946.0, 105)),
        ("[NI]HEP-241", fuel(1.3, 438.0, 3946.0, 52)),
        ("[NI]MNI-239", fuel(1.05, 106.0, 5486.0, 118)),
        ("[NI]MNI-241", fuel(1.15, 154.0, 3758.0, 100)),
        ("[NI]LEA-242", fuel(1.35, 312.0, 1846.0, 81)),
        ("[NI]HEA-242", fuel(1.4, 936.0, 1846.0, 40)),
        ("[NI]LECm-243", fuel(1.45, 308.0, 1870.0, 83)),
        ("[NI]HECm-243", fuel(1.5, 924.0, 1870.0, 41)),
        ("[NI]LECm-245", fuel(1.5, 190.0, 3032.0, 94)),
        ("[NI]HECm-245", fuel(1.55, 570.0, 3032.0, 47)),
        ("[NI]LECm-247", fuel(1.55, 214.0, 2692.0, 90)),
        ("[NI]HECm-247", fuel(1.6, 642.0, 2692.0, 45)),
        ("[NI]LEB-248", fuel(1.65, 212.0, 2716.0, 91)),
        ("[NI]HEB-248", fuel(1.7, 636.0, 2716.0, 45)),
        ("[NI]LECf-249", priming_fuel(1.75, 432.0, 1334.0, 75)),
        ("[NI]HECf-249", priming_fuel(1.8, 1296.0, 1334.0, 37)),
        ("[NI]LECf-251", priming_fuel(1.8, 230.0, 2504.0, 89)),
        ("[NI]HECf-251", priming_fuel(1.85, 690.0, 2504.0, 44)),
        // zirconium-alloy line
        ("[ZA]TBU", fuel(1.25, 50.0, 11520.0, 199)),
        ("[ZA]LEU-233", fuel(1.1, 270.0, 2134.0, 66)),
        ("[ZA]HEU-233", fuel(1.15, 810.0, 2134.0, 33)),
        ("[ZA]LEU-235", fuel(1.0, 150.0, 3840.0, 87)),
        ("[ZA]HEU-235", fuel(1.05, 450.0, 3840.0, 43)),
        ("[ZA]LEN-236", fuel(1.1, 366.0, 1574.0, 60)),
        ("[ZA]HEN-236", fuel(1.15, 1098.0, 1574.0, 30)),
        ("[ZA]LEP-239", fuel(1.2, 158.0, 3646.0, 84)),
        ("[ZA]HEP-239", fuel(1.25, 474.0, 3646.0, 42)),
        ("[ZA]LEP-241", fuel(1.25, 228.0, 2526.0, 71)),
        ("[ZA]HEP-241", fuel(1.3, 684.0, 2526.0, 35)),
        ("[ZA]MZA-239", fuel(1.05, 166.0, 3472.0, 80)),
        ("[ZA]MZA-241", fuel(1.15, 240.0, 2406.0, 68)),
        ("[ZA]LEA-242", fuel(1.35, 488.0, 1180.0, 55)),
        ("[ZA]HEA-242", fuel(1.4, 1464.0, 1180.0, 27)),
        ("[ZA]LECm-243", fuel(1.45, 480.0, 1200.0, 56)),
        ("[ZA]HECm-243", fuel(1.5, 1440.0, 1200.0, 28)),
        ("[ZA]LECm-245", fuel(1.5, 298.0, 1932.0, 64)),
        ("[ZA]HECm-245", fuel(1.55, 894.0, 1932.0, 32)),
        ("[ZA]LECm-247", fuel(1.55, 336.0, 1714.0, 61)),
        ("[ZA]HECm-247", fuel(1.6, 1008.0, 1714.0, 30)),
        ("[ZA]LEB-248", fuel(1.65, 332.0, 1734.0, 62)),
        ("[ZA]HEB-248", fuel(1.7, 996.0, 1734.0, 31)),
        ("[ZA]LECf-249", priming_fuel(1.75, 676.0, 852.0, 51)),
        ("[ZA]HECf-249", priming_fuel(1.8, 2028.0, 852.0, 25)),
        ("[ZA]LECf-251", priming_fuel(1.8, 360.0, 1600.0, 60)),
        ("[ZA]HECf-251", priming_fuel(1.85, 1080.0, 1600.0, 30)),
        // fluoride-salt line
        ("[F4]TBU", fuel(2.5, 32.0, 18000.0, 234)),
        ("[F4]LEU-233", fuel(2.2, 172.0, 3348.0, 78)),
        ("[F4]HEU-233", fuel(2.3, 516.0, 3348.0, 39)),
        ("[F4]LEU-235", fuel(2.0, 96.0, 6000.0, 102)),
        ("[F4]HEU-235", fuel(2.1, 288.0, 6000.0, 51)),
        ("[F4]LEN-236", fuel(2.2, 234.0, 2462.0, 70)),
        ("[F4]HEN-236", fuel(2.3, 702.0, 2462.0, 35)),
        ("[F4]LEP-239", fuel(2.4, 100.0, 5760.0, 99)),
        ("[F4]HEP-239", fuel(2.5, 300.0, 5760.0, 49)),
        ("[F4]LEP-241", fuel(2.5, 146.0, 3946.0, 84)),
        ("[F4]HEP-241", fuel(2.6, 438.0, 3946.0, 42)),
        ("[F4]MF4-239", fuel(2.1, 106.0, 5486.0, 94)),
        ("[F4]MF4-241", fuel(2.3, 154.0, 3758.0, 80)),
        ("[F4]LEA-242", fuel(2.7, 312.0, 1846.0, 65)),
        ("[F4]HEA-242", fuel(2.8, 936.0, 1846.0, 32)),
        ("[F4]LECm-243", fuel(2.9, 308.0, 1870.0, 66)),
        ("[F4]HECm-243", fuel(3.0, 924.0, 1870.0, 33)),
        ("[F4]LECm-245", fuel(3.0, 190.0, 3032.0, 75)),
        ("[F4]HECm-245", fuel(3.1, 570.0, 3032.0, 37)),
        ("[F4]LECm-247", fuel(3.1, 214.0, 2692.0, 72)),
        ("[F4]HECm-247", fuel(3.2, 642.0, 2692.0, 36)),
        ("[F4]LEB-248", fuel(3.3, 212.0, 2716.0, 73)),
        ("[F4]HEB-248", fuel(3.4, 636.0, 2716.0, 36)),
        ("[F4]LECf-249", priming_fuel(3.5, 432.0, 1334.0, 60)),
        ("[F4]HECf-249", priming_fuel(3.6, 1296.0, 1334.0, 30)),
        ("[F4]LECf-251", priming_fuel(3.6, 230.0, 2504.0, 71)),
        ("[F4]HECf-251", priming_fuel(3.7, 690.0, 2504.0, 35)),
    ];
    entries
        .into_iter()
        .map(|(name, values)| (name.to_string(), values))
        .collect()
}

fn default_neutron_sources() -> AHashMap<String, NeutronSourceValues> {
    [
        ("Ra-Be", NeutronSourceValues { efficiency: 0.9 }),
        ("Po-Be", NeutronSourceValues { efficiency: 0.95 }),
        ("Cf-252", NeutronSourceValues { efficiency: 1.0 }),
    ]
    .into_iter()
    .map(|(name, values)| (name.to_string(), values))
    .collect()
}

fn default_reflectors() -> AHashMap<String, ReflectorValues> {
    [
        (
            "Beryllium-Carbon",
            ReflectorValues {
                reflectivity_multiplier: 1.0,
                efficiency_multiplier: 0.5,
            },
        ),
        (
            "Lead-Steel",
            ReflectorValues {
                reflectivity_multiplier: 0.5,
                efficiency_multiplier: 0.25,
            },
        ),
    ]
    .into_iter()
    .map(|(name, values)| (name.to_string(), values))
    .collect()
}

fn default_coolant_recipes() -> AHashMap<String, CoolantRecipeValues> {
    let recipe = |input: &str, output: &str, heat_capacity: f64, ratio: f64| CoolantRecipeValues {
        input_name: input.to_string(),
        output_name: output.to_string(),
        heat_capacity,
        out_to_in_ratio: ratio,
    };
    [
        (
            "Water to High Pressure Steam",
            recipe("Water", "High Pressure Steam", 64.0, 4.0),
        ),
        (
            "Preheated Water to High Pressure Steam",
            recipe("Preheated Water", "High Pressure Steam", 32.0, 4.0),
        ),
        (
            "IC2 Coolant to Hot IC2 Coolant",
            recipe("IC2 Coolant", "Hot IC2 Coolant", 160.0, 1.0),
        ),
    ]
    .into_iter()
    .map(|(name, values)| (name.to_string(), values))
    .collect()
}

fn default_heat_sinks() -> AHashMap<String, HeatSinkValues> {
    let entries = [
        ("Water", 55.0, "One FuelCell"),
        ("Iron", 50.0, "One Moderator"),
        ("Redstone", 85.0, "One FuelCell; One Moderator"),
        ("Quartz", 80.0, "One Redstone heatsink"),
        ("Obsidian", 70.0, "Axial Glowstone heatsinks"),
        ("NetherBrick", 105.0, "One Obsidian heatsink"),
        ("Glowstone", 90.0, "Two Moderators"),
        ("Lapis", 100.0, "One FuelCell; One Casing"),
        ("Gold", 110.0, "Exactly Two Iron heatsinks"),
        ("Prismarine", 115.0, "Two Water heatsinks"),
        ("Slime", 145.0, "Exactly One Water heatsink; Two Lead heatsinks"),
        ("EndStone", 65.0, "One Reflector"),
        ("Purpur", 95.0, "One Iron heatsink; One Reflector"),
        ("Diamond", 200.0, "One Gold heatsink; One FuelCell"),
        ("Emerald", 195.0, "One Prismarine heatsink; One Moderator"),
        ("Copper", 75.0, "One Water heatsink"),
        ("Tin", 120.0, "Axial Lapis heatsinks"),
        ("Lead", 60.0, "One Iron heatsink"),
        ("Boron", 160.0, "Exactly One Quartz heatsink; One Casing"),
        ("Lithium", 130.0, "Exact-Axial Two Lead heatsinks; One Casing"),
        ("Magnesium", 125.0, "Exactly One Moderator; One Casing"),
        ("Manganese", 150.0, "Two FuelCells"),
        ("Aluminum", 175.0, "One Quartz heatsink; One Lapis heatsink"),
        ("Silver", 170.0, "Two Glowstone heatsinks; One Tin heatsink"),
        ("Fluorite", 165.0, "One Gold heatsink; One Prismarine heatsink"),
        ("Villiaumite", 180.0, "One EndStone heatsink; One Redstone heatsink"),
        ("Carobbiite", 140.0, "One Copper heatsink; One EndStone heatsink"),
        ("Arsenic", 135.0, "Axial Reflectors"),
        ("Nitrogen", 185.0, "Two Copper heatsinks; One Purpur heatsink"),
        ("Helium", 190.0, "Exactly Two Redstone heatsinks"),
        ("Enderium", 155.0, "Three Moderators"),
        ("Cryotheum", 205.0, "Three FuelCells"),
    ];
    entries
        .into_iter()
        .map(|(name, heat_passive, requirements)| {
            (
                name.to_string(),
                HeatSinkValues {
                    heat_passive,
                    requirements: requirements.to_string(),
                },
            )
        })
        .collect()
}

fn default_moderators() -> AHashMap<String, ModeratorValues> {
    [
        (
            "Beryllium",
            ModeratorValues {
                flux_factor: 22,
                efficiency_factor: 1.05,
            },
        ),
        (
            "Graphite",
            ModeratorValues {
                flux_factor: 10,
                efficiency_factor: 1.1,
            },
        ),
        (
            "HeavyWater",
            ModeratorValues {
                flux_factor: 36,
                efficiency_factor: 1.0,
            },
        ),
    ]
    .into_iter()
    .map(|(name, values)| (name.to_string(), values))
    .collect()
}

fn default_neutron_shields() -> AHashMap<String, NeutronShieldValues> {
    [(
        "Boron-Silver",
        NeutronShieldValues {
            heat_per_flux: 5,
            efficiency_factor: 0.5,
        },
    )]
    .into_iter()
    .map(|(name, values)| (name.to_string(), values))
    .collect()
}

// the stock configuration ships no irradiators; rule files may add them
fn default_irradiators() -> AHashMap<String, IrradiatorValues> {
    AHashMap::new()
}

fn default_resource_costs() -> CraftingMaterials {
    let mut costs = CraftingMaterials::default();

    costs.fuel_cell_costs.insert("Glass".to_string(), 4);
    costs.fuel_cell_costs.insert("Tough Alloy".to_string(), 4);

    costs.casing_costs.insert("Tough Alloy".to_string(), 1);
    costs.casing_costs.insert("Basic Plating".to_string(), 4);

    for (name, ingot) in [("Graphite", "Graphite Ingot"), ("Beryllium", "Beryllium Ingot")] {
        let mut table = AHashMap::new();
        table.insert(ingot.to_string(), 9);
        costs.moderator_costs.insert(name.to_string(), table);
    }

    // Every sink starts from an empty heat sink; notable sinks add their
    // filler materials on top.
    for (name, fillers) in default_heat_sink_fillers() {
        let mut table = AHashMap::new();
        table.insert("Empty HeatSink".to_string(), 1);
        for (resource, quantity) in fillers {
            table.insert((*resource).to_string(), *quantity);
        }
        costs.heat_sink_costs.insert(name.to_string(), table);
    }

    costs
}

/// (sink, filler resources); an empty slice means empty-sink cost only
fn default_heat_sink_fillers() -> [(&'static str, &'static [(&'static str, u32)]); 32] {
    [
        ("Water", &[("Water Bucket", 1)]),
        ("Iron", &[("Iron Ingot", 8)]),
        ("Redstone", &[("Redstone", 2), ("Block of Redstone", 2)]),
        ("Quartz", &[("Crushed Quartz", 2), ("Block of Quartz", 2)]),
        ("Obsidian", &[("Obsidian", 8)]),
        ("NetherBrick", &[]),
        ("Glowstone", &[("Glowstone Dust", 6), ("Glowstone", 2)]),
        ("Lapis", &[("Lapis Lazuli Block", 2)]),
        ("Gold", &[("Gold Ingot", 8)]),
        ("Prismarine", &[("Prismarine Shard", 8)]),
        ("Slime", &[]),
        ("EndStone", &[]),
        ("Purpur", &[]),
        ("Diamond", &[("Diamond", 8)]),
        ("Emerald", &[("Emerald", 6)]),
        ("Copper", &[("Copper Ingot", 8)]),
        ("Tin", &[("Tin Ingot", 8)]),
        ("Lead", &[("Lead Ingot", 8)]),
        ("Boron", &[("Boron Ingot", 8)]),
        ("Lithium", &[]),
        ("Magnesium", &[("Magnesium Ingot", 8)]),
        ("Manganese", &[]),
        ("Aluminum", &[]),
        ("Silver", &[]),
        ("Fluorite", &[]),
        ("Villiaumite", &[]),
        ("Carobbiite", &[]),
        ("Arsenic", &[]),
        ("Nitrogen", &[]),
        ("Helium", &[("Liquid Helium Bucket", 1)]),
        ("Enderium", &[("Enderium Ingot", 8)]),
        ("Cryotheum", &[("Cryotheum Dust", 8)]),
    ]
}
