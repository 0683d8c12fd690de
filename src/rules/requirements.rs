//! Heat-sink placement requirements
//!
//! Rule files describe each heat sink's adjacency requirement as free text
//! ("One FuelCell; One Moderator", "Exactly Two Iron heatsinks",
//! "Axial Glowstone heatsinks"). That text is a small predicate language
//! over the sink's six neighbors; it is parsed once when the rule set
//! loads and evaluated many times during scoring.

use crate::core::types::{Direction, Position};
use crate::grid::block::BlockKind;
use crate::grid::model::ReactorGrid;

/// How clause matches are counted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantifier {
    /// At least `count` matching neighbors
    AtLeast,
    /// Exactly `count` matching neighbors
    Exactly,
    /// A matching pair on opposite sides along some axis
    Axial,
    /// Exactly `count` matching neighbors, all forming axial pairs
    ExactAxial,
}

/// What a clause matches against a neighboring cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    FuelCell,
    Moderator,
    Reflector,
    Casing,
    /// A heat sink of one specific archetype
    HeatSink(String),
}

/// One clause of a requirement ("Exactly Two Iron heatsinks")
#[derive(Debug, Clone, PartialEq)]
pub struct Clause {
    pub quantifier: Quantifier,
    pub count: u32,
    pub target: Target,
}

/// A parsed requirement: the conjunction of its clauses
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementRule {
    clauses: Vec<Clause>,
}

impl PlacementRule {
    /// A rule with no conditions (always satisfied)
    pub fn always() -> Self {
        Self { clauses: Vec::new() }
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Parse the rule-file text form. Clauses are separated by ';'.
    pub fn parse(text: &str) -> Result<Self, String> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(Self::always());
        }
        let clauses = trimmed
            .split(';')
            .map(|clause| parse_clause(clause.trim()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { clauses })
    }

    /// Evaluate the rule against the six neighbors of `pos`.
    ///
    /// Matching is by block kind and archetype name only; a neighbor's own
    /// activity never feeds back into the predicate, so evaluation order
    /// across sinks is irrelevant.
    pub fn satisfied(&self, grid: &ReactorGrid, pos: Position) -> bool {
        self.clauses
            .iter()
            .all(|clause| clause_satisfied(clause, grid, pos))
    }
}

fn clause_satisfied(clause: &Clause, grid: &ReactorGrid, pos: Position) -> bool {
    let mut matched = [false; 6];
    let mut matches = 0u32;
    for (i, dir) in Direction::ALL.iter().enumerate() {
        if target_matches(&clause.target, grid, pos.step(*dir)) {
            matched[i] = true;
            matches += 1;
        }
    }

    // Direction::ALL lays out opposite pairs adjacently: (0,1)=x, (2,3)=y, (4,5)=z
    match clause.quantifier {
        Quantifier::AtLeast => matches >= clause.count,
        Quantifier::Exactly => matches == clause.count,
        Quantifier::Axial => (0..3).any(|axis| matched[2 * axis] && matched[2 * axis + 1]),
        Quantifier::ExactAxial => {
            let paired = (0..3).all(|axis| matched[2 * axis] == matched[2 * axis + 1]);
            matches == clause.count && paired
        }
    }
}

fn target_matches(target: &Target, grid: &ReactorGrid, pos: Position) -> bool {
    if grid.is_casing(pos) {
        return *target == Target::Casing;
    }
    match grid.block_at(pos) {
        None => false,
        Some(block) => match target {
            Target::FuelCell => block.kind == BlockKind::FuelCell,
            Target::Moderator => block.kind == BlockKind::Moderator,
            Target::Reflector => block.kind == BlockKind::Reflector,
            Target::Casing => false,
            Target::HeatSink(name) => {
                block.kind == BlockKind::HeatSink && block.archetype == *name
            }
        },
    }
}

fn parse_clause(text: &str) -> Result<Clause, String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return Err("empty clause".to_string());
    }

    let mut idx = 0;
    let quantifier = match words[0] {
        "Exactly" => {
            idx += 1;
            Quantifier::Exactly
        }
        "Axial" => {
            idx += 1;
            Quantifier::Axial
        }
        "Exact-Axial" => {
            idx += 1;
            Quantifier::ExactAxial
        }
        _ => Quantifier::AtLeast,
    };

    let count = match words.get(idx).copied() {
        Some("One") => {
            idx += 1;
            1
        }
        Some("Two") => {
            idx += 1;
            2
        }
        Some("Three") => {
            idx += 1;
            3
        }
        _ => match quantifier {
            // "Axial Reflectors" means an opposite pair
            Quantifier::Axial | Quantifier::ExactAxial => 2,
            _ => return Err(format!("missing count in clause '{text}'")),
        },
    };

    let rest = &words[idx..];
    if rest.is_empty() {
        return Err(format!("missing target in clause '{text}'"));
    }

    let last = rest[rest.len() - 1];
    let target = if last == "heatsink" || last == "heatsinks" {
        let name = rest[..rest.len() - 1].join(" ");
        if name.is_empty() {
            return Err(format!("missing heat sink name in clause '{text}'"));
        }
        Target::HeatSink(name)
    } else if rest.len() == 1 {
        match rest[0].trim_end_matches('s') {
            "FuelCell" => Target::FuelCell,
            "Moderator" => Target::Moderator,
            "Reflector" => Target::Reflector,
            "Casing" => Target::Casing,
            other => return Err(format!("unknown target '{other}' in clause '{text}'")),
        }
    } else {
        return Err(format!("unrecognized clause '{text}'"));
    };

    Ok(Clause {
        quantifier,
        count,
        target,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clause(text: &str) -> Clause {
        let rule = PlacementRule::parse(text).unwrap();
        assert_eq!(rule.clauses().len(), 1);
        rule.clauses()[0].clone()
    }

    #[test]
    fn test_parse_simple_kind_clause() {
        let c = clause("One FuelCell");
        assert_eq!(c.quantifier, Quantifier::AtLeast);
        assert_eq!(c.count, 1);
        assert_eq!(c.target, Target::FuelCell);

        let c = clause("Two Moderators");
        assert_eq!(c.count, 2);
        assert_eq!(c.target, Target::Moderator);

        let c = clause("Three FuelCells");
        assert_eq!(c.count, 3);
    }

    #[test]
    fn test_parse_named_heatsink_clause() {
        let c = clause("One Redstone heatsink");
        assert_eq!(c.quantifier, Quantifier::AtLeast);
        assert_eq!(c.target, Target::HeatSink("Redstone".to_string()));

        let c = clause("Exactly Two Iron heatsinks");
        assert_eq!(c.quantifier, Quantifier::Exactly);
        assert_eq!(c.count, 2);
        assert_eq!(c.target, Target::HeatSink("Iron".to_string()));
    }

    #[test]
    fn test_parse_axial_clauses() {
        let c = clause("Axial Glowstone heatsinks");
        assert_eq!(c.quantifier, Quantifier::Axial);
        assert_eq!(c.count, 2);
        assert_eq!(c.target, Target::HeatSink("Glowstone".to_string()));

        let c = clause("Axial Reflectors");
        assert_eq!(c.target, Target::Reflector);
    }

    #[test]
    fn test_parse_conjunction() {
        let rule = PlacementRule::parse("Exact-Axial Two Lead heatsinks; One Casing").unwrap();
        assert_eq!(rule.clauses().len(), 2);
        assert_eq!(rule.clauses()[0].quantifier, Quantifier::ExactAxial);
        assert_eq!(rule.clauses()[0].count, 2);
        assert_eq!(rule.clauses()[1].target, Target::Casing);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(PlacementRule::parse("Many Widgets").is_err());
        assert!(PlacementRule::parse("One").is_err());
        assert!(PlacementRule::parse("FuelCell").is_err());
    }

    #[test]
    fn test_empty_requirement_is_always_satisfied() {
        let rule = PlacementRule::parse("  ").unwrap();
        assert!(rule.clauses().is_empty());
    }
}
