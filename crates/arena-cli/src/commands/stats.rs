use std::path::Path;

use arena_combat::{Combatant, Side};
use arena_core::Stat;
use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

pub fn run(file: &Path, lexicon: Option<&Path>, json: bool) -> Result<(), String> {
    let lexicon = super::load_lexicon(lexicon)?;
    let ingested = super::ingest(file, &lexicon)?;
    let substitutions: Vec<String> = ingested.substitutions.iter().map(ToString::to_string).collect();
    let combatant = Combatant::new(Side::Player, ingested.value.clone());

    if json {
        let out = serde_json::json!({
            "record": ingested.value,
            "finalStats": combatant.final_stats(),
            "health": combatant.health(),
            "substitutions": substitutions,
        });
        let rendered = serde_json::to_string_pretty(&out).map_err(|e| e.to_string())?;
        println!("{rendered}");
        return Ok(());
    }

    println!(
        "  {} {}",
        combatant.name().bold(),
        format!("(level {})", combatant.level()).dimmed()
    );
    println!("  {}", combatant.health());
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Stat", "Base", "Final"]);
    for stat in Stat::ALL {
        let base = combatant.base_stats().get(&stat);
        let final_value = combatant.final_stats().get(stat);
        if base.is_none() && final_value.is_none() {
            continue;
        }
        table.add_row(vec![
            stat.to_string(),
            base.map_or_else(|| "-".to_string(), ToString::to_string),
            final_value.map_or_else(|| "-".to_string(), format_number),
        ]);
    }
    println!("{table}");
    println!();

    let mut abilities = Table::new();
    abilities.set_content_arrangement(ContentArrangement::Dynamic);
    abilities.set_header(vec!["#", "Ability", "Power", "Accuracy", "Attack", "Defend", "Speed"]);
    for (i, ability) in combatant.available_abilities().iter().enumerate() {
        abilities.add_row(vec![
            (i + 1).to_string(),
            ability.name.clone(),
            format_number(ability.power),
            format_number(ability.accuracy),
            ability.attack_stat.to_string(),
            ability.defend_stat.to_string(),
            format!("x{}", format_number(ability.speed_multiplier)),
        ]);
    }
    println!("{abilities}");

    if !combatant.traits().is_empty() {
        println!();
        println!("  {}", "Traits".bold().underline());
        for t in combatant.traits() {
            println!("  - {} ({} modifiers)", t.name, t.modifiers.len());
        }
    }

    if !combatant.inventory().is_empty() {
        println!();
        println!("  {}", "Inventory".bold().underline());
        for (i, item) in combatant.inventory().iter().enumerate() {
            let heal = item.heal_amount();
            let heal = if heal > 0.0 {
                format!(", heals {}", format_number(heal))
            } else {
                String::new()
            };
            println!("  {}. {} x{}{heal}", i + 1, item.name, item.quantity);
        }
    }

    if !substitutions.is_empty() {
        println!();
        println!("  {}", "Substitutions".yellow().bold());
        for s in &substitutions {
            println!("  - {s}");
        }
    }

    Ok(())
}

/// Print whole numbers without a fractional part.
pub(super) fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}
