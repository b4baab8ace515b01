use std::io::{self, BufRead};
use std::path::Path;

use arena_combat::{
    AbandonReason, Battle, BattleConfig, CombatEvent, Combatant, EventKind, PlayerAction,
    RoundReport, Vitals,
};
use colored::Colorize;

/// One line of player input.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Act(PlayerAction),
    Abandon(AbandonReason),
}

pub fn run(
    player: &Path,
    enemy: &Path,
    lexicon: Option<&Path>,
    config: BattleConfig,
    max_rounds: Option<u32>,
) -> Result<(), String> {
    let lexicon = super::load_lexicon(lexicon)?;
    let player = super::load_combatant(player, &lexicon)?;
    let enemy = super::load_combatant(enemy, &lexicon)?;

    let mut battle = Battle::new(&player, &enemy, config);
    println!(
        "  {} vs {} {}",
        battle.player().name().bold(),
        battle.enemy().name().bold(),
        format!("(battlefield: {}, seed={})", battle.battlefield(), battle.config().seed).dimmed()
    );
    print_status(battle.player());
    print_status(battle.enemy());

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    while !battle.is_over() {
        if max_rounds.is_some_and(|max| battle.round() >= max) {
            println!("  {}", "Round limit reached, fleeing.".dimmed());
            battle.abandon(AbandonReason::Fled).map_err(|e| e.to_string())?;
            break;
        }

        println!();
        print_menu(battle.player());
        let Some(line) = lines.next() else {
            battle.abandon(AbandonReason::Fled).map_err(|e| e.to_string())?;
            break;
        };
        let line = line.map_err(|e| format!("cannot read stdin: {e}"))?;
        if line.trim().is_empty() {
            continue;
        }

        match parse_command(&line) {
            Ok(Command::Act(action)) => match battle.play_round(action) {
                Ok(report) => print_report(&report, &battle),
                Err(e) => eprintln!("  {} {e}", "!".yellow()),
            },
            Ok(Command::Abandon(reason)) => {
                battle.abandon(reason).map_err(|e| e.to_string())?;
            }
            Err(e) => eprintln!("  {} {e}", "!".yellow()),
        }
    }

    let conclusion = battle
        .conclusion()
        .ok_or_else(|| "battle ended without a conclusion".to_string())?;
    println!();
    println!("Outcome: {conclusion}");
    Ok(())
}

/// Parse `<n>`, `item <n>`, `i <n>`, `flee` or `surrender`. Numbers are 1-based.
fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim().to_lowercase();
    let mut words = line.split_whitespace();
    match (words.next(), words.next(), words.next()) {
        (Some("flee" | "run"), None, None) => Ok(Command::Abandon(AbandonReason::Fled)),
        (Some("surrender"), None, None) => Ok(Command::Abandon(AbandonReason::Surrendered)),
        (Some("item" | "i"), Some(n), None) => Ok(Command::Act(PlayerAction::Item(index(n)?))),
        (Some(n), None, None) if n.bytes().all(|b| b.is_ascii_digit()) => Ok(Command::Act(PlayerAction::Ability(index(n)?))),
        _ => Err(format!("unrecognized command '{line}'")),
    }
}

fn index(word: &str) -> Result<usize, String> {
    match word.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => Err(format!("expected a number from 1, got '{word}'")),
    }
}

fn print_menu(player: &Combatant) {
    let abilities: Vec<String> = player
        .available_abilities()
        .iter()
        .enumerate()
        .map(|(i, a)| format!("{}) {}", i + 1, a.name))
        .collect();
    println!("  {} {}", "Abilities:".dimmed(), abilities.join("  "));
    if !player.inventory().is_empty() {
        let items: Vec<String> = player
            .inventory()
            .iter()
            .enumerate()
            .map(|(i, item)| format!("i {}) {} x{}", i + 1, item.name, item.quantity))
            .collect();
        println!("  {} {}", "Items:".dimmed(), items.join("  "));
    }
}

fn print_report(report: &RoundReport, battle: &Battle) {
    println!("  {}", format!("Round {}", report.round).bold());
    for event in &report.events {
        println!("  {}", colorize_event(event));
    }
    print_vitals(battle.player().name(), &report.player);
    print_vitals(battle.enemy().name(), &report.enemy);
}

fn colorize_event(event: &CombatEvent) -> String {
    match event.kind {
        EventKind::Miss => event.text.dimmed().to_string(),
        EventKind::AbilityUsed | EventKind::ItemUsed => event.text.clone(),
        EventKind::Damage => event.text.red().to_string(),
        EventKind::Heal => event.text.green().to_string(),
    }
}

fn print_status(combatant: &Combatant) {
    println!("  {:<16} {}", combatant.name(), combatant.health());
}

fn print_vitals(name: &str, vitals: &Vitals) {
    println!("  {:<16} HP: {}/{}", name, vitals.hp, vitals.hp_max);
}
