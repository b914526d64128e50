//! Two AI-controlled combatants fight until one faints.
//!
//! ```text
//! cargo run -p kazam-engine --example duel -- 42
//! RUST_LOG=kazam_engine=debug cargo run -p kazam-engine --example duel
//! ```

use std::sync::Arc;

use anyhow::{Context, Result};
use kazam_dex::{Dex, SpeciesId};
use kazam_engine::{AiPolicy, Battle, BattleConfig, BattleEvent, CombatantSpec, Side};

const MAX_TURNS: u32 = 100;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let seed = match std::env::args().nth(1) {
        Some(arg) => arg.parse().context("seed must be an unsigned integer")?,
        None => 0,
    };

    let dex = Arc::new(Dex::builtin());
    let mut battle = Battle::new(
        dex.clone(),
        BattleConfig {
            seed,
            ..BattleConfig::default()
        },
    );
    let player = battle.add_combatant(
        CombatantSpec::new(SpeciesId(25), 50, Side::Player)
            .moves(&[85, 86, 98, 33])
            .ai(AiPolicy::Smart),
    )?;
    let enemy = battle.add_combatant(
        CombatantSpec::new(SpeciesId(4), 52, Side::Enemy)
            .moves(&[52, 53, 163, 14])
            .ai(AiPolicy::SmartRandom),
    )?;

    for _ in 0..MAX_TURNS {
        battle.begin_turn();
        println!("-- turn {} --", battle.field.turn);
        for user in [player, enemy] {
            if !battle.combatant(user).is_some_and(|c| c.is_active()) {
                continue;
            }
            let Some(command) = battle.decide(user)? else {
                continue;
            };
            let name = battle.combatant(user).map(|c| c.name.clone()).unwrap_or_default();
            let move_name = dex.move_data(command.move_id).name.clone();
            println!("{name} used {move_name}");

            if !command.ignore_pp {
                if let Some(mon) = battle.combatant_mut(user) {
                    mon.use_pp(command.move_id);
                }
            }
            let strikes = battle.prepare_strikes(user, command.move_id, command.targets.len())?;
            for &target in &command.targets {
                for _ in 0..strikes {
                    let result = battle.strike(user, target, command.move_id)?;
                    if result.dealt > 0 {
                        println!(
                            "  {:?}{} for {} damage",
                            result.damage.outcome,
                            if result.critical { ", critical" } else { "" },
                            result.dealt
                        );
                    }
                    if result.fainted {
                        break;
                    }
                }
            }
        }

        for event in battle.drain_events() {
            if let BattleEvent::Faint { battler } = event {
                battle.resolve_faint(battler);
                let name = battle.combatant(battler).map(|c| c.name.clone()).unwrap_or_default();
                println!("{name} fainted");
            }
        }
        battle.end_turn();

        if [player, enemy]
            .iter()
            .any(|&i| battle.combatant(i).is_some_and(|c| c.is_fainted()))
        {
            break;
        }
    }

    let draws = battle.rng().draws();
    let remaining = battle.end_battle();
    println!("battle over after {draws} draws, {} events unread", remaining.len());
    Ok(())
}
