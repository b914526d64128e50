//! Ranked move choice and weighted target choice

use kazam_dex::{MoveData, MoveId, TagKind};

use super::scoring::{round_half_up, target_benefit_score, user_benefit_score};
use super::{Command, UNUSABLE_SCORE, conditions_pass, is_usable, predicts_crit};
use crate::battle::BattleView;
use crate::damage::{DamageRequest, compute_damage_with};
use crate::effectiveness::move_effectiveness;
use crate::mode::Mode;
use crate::rng::BattleRng;
use crate::types::{AiPolicy, BattlerIndex};

/// SmartRandom steps past a move when a d8 lands on 5 or above
const SMART_RANDOM_SIDES: u32 = 8;
const SMART_RANDOM_SKIP_AT: u32 = 5;

/// Bonus for attacks that share a type with the user
const STAB_WEIGHT: f64 = 1.5;

/// Pick the move and targets for `idx`
pub(crate) fn choose(
    view: &BattleView<'_>,
    idx: BattlerIndex,
    policy: AiPolicy,
    rng: &mut BattleRng,
) -> Command {
    let mon = view.mon(idx);
    if let Some(queued) = mon.summon.move_queue.front() {
        return Command {
            move_id: queued.id,
            targets: queued.targets.clone(),
            ignore_pp: queued.ignore_pp,
        };
    }

    let pool: Vec<MoveId> = mon
        .moveset
        .iter()
        .filter(|slot| is_usable(view, idx, slot))
        .map(|slot| slot.id)
        .collect();

    let command = |move_id: MoveId, rng: &mut BattleRng| Command {
        move_id,
        targets: next_targets(view, idx, move_id, rng),
        ignore_pp: false,
    };

    match pool.as_slice() {
        [] => {
            tracing::debug!(battler = %idx, "no usable moves, struggling");
            return command(MoveId::STRUGGLE, rng);
        }
        [only] => return command(*only, rng),
        _ => {}
    }

    let encored = mon
        .tag(TagKind::Encore)
        .and_then(|t| t.tracked_move())
        .filter(|m| pool.contains(m));
    if let Some(move_id) = encored {
        return command(move_id, rng);
    }

    let finishers: Vec<MoveId> = pool
        .iter()
        .copied()
        .filter(|&m| knocks_out(view, idx, &view.dex.move_data(m)))
        .collect();
    let pool = if finishers.is_empty() { pool } else { finishers };

    let targets: Vec<Vec<BattlerIndex>> =
        pool.iter().map(|&m| next_targets(view, idx, m, rng)).collect();
    let scores: Vec<f64> = pool
        .iter()
        .zip(&targets)
        .map(|(&m, t)| move_score(view, idx, &view.dex.move_data(m), t))
        .collect();

    let mut ranking: Vec<usize> = (0..pool.len()).collect();
    ranking.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));

    let last = ranking.len() - 1;
    let mut r = 0;
    match policy {
        AiPolicy::SmartRandom => {
            while r < last && rng.int_below(SMART_RANDOM_SIDES) >= SMART_RANDOM_SKIP_AT {
                r += 1;
            }
        }
        AiPolicy::Smart => {
            while r < last {
                let ratio = scores[ranking[r + 1]] / scores[ranking[r]];
                if ratio.is_nan() || ratio < 0.0 {
                    break;
                }
                let odds = round_half_up(ratio * 50.0);
                if (rng.int_below(100) as f64) < odds {
                    r += 1;
                } else {
                    break;
                }
            }
        }
    }

    let pick = ranking[r];
    tracing::debug!(
        battler = %idx,
        move_id = %pool[pick],
        score = scores[pick],
        rank = r,
        "ai move chosen"
    );
    Command {
        move_id: pool[pick],
        targets: targets[pick].clone(),
        ignore_pp: false,
    }
}

/// Whether the move is predicted to knock out some opposing target outright
fn knocks_out(view: &BattleView<'_>, user: BattlerIndex, data: &MoveData) -> bool {
    if !data.is_attack() {
        return false;
    }
    let crit = predicts_crit(view, user, data);
    view.move_targets(user, data.target)
        .targets
        .into_iter()
        .filter(|&t| !view.is_ally(user, t))
        .any(|t| {
            if !conditions_pass(view, user, t, data) {
                return false;
            }
            let target = view.mon(t);
            let request = DamageRequest {
                ignore_ability: !target.wave.ability_revealed,
                ..DamageRequest::new(user, t, data.id).critical(crit)
            };
            let result = compute_damage_with(view, &request, data, &mut Mode::Simulated);
            result.amount >= target.hp
        })
}

/// Best score the move reaches over its targets
fn move_score(
    view: &BattleView<'_>,
    user: BattlerIndex,
    data: &MoveData,
    targets: &[BattlerIndex],
) -> f64 {
    targets
        .iter()
        .map(|&t| target_score(view, user, data, t))
        .reduce(f64::max)
        .unwrap_or(UNUSABLE_SCORE)
}

fn target_score(view: &BattleView<'_>, user: BattlerIndex, data: &MoveData, t: BattlerIndex) -> f64 {
    let same_side = view.is_ally(user, t);
    let sign = if same_side { 1.0 } else { -1.0 };
    let mut score = user_benefit_score(data) + target_benefit_score(view, user, t, data) * sign;
    if score.is_nan() {
        tracing::warn!(battler = %user, move_id = %data.id, "move scored NaN, treating as 0");
        score = 0.0;
    }

    if data.unimplemented || !conditions_pass(view, user, t, data) {
        return UNUSABLE_SCORE;
    }
    if data.is_attack() {
        let target = view.mon(t);
        let result = move_effectiveness(
            view,
            user,
            t,
            data,
            !target.wave.ability_revealed,
            &mut Mode::Simulated,
        );
        let effectiveness = if result.cancelled { 0.0 } else { result.multiplier };
        let stab = view.mon(user).is_of_type(data.move_type);
        if !same_side {
            score *= effectiveness;
            if stab {
                score *= STAB_WEIGHT;
            }
        } else if effectiveness != 0.0 {
            score /= effectiveness;
            if stab {
                score /= STAB_WEIGHT;
            }
        }
        if score == 0.0 {
            score = UNUSABLE_SCORE;
        }
    }
    score
}

/// Targets for `move_id`: every candidate for spread moves, otherwise one
/// drawn with weight tied to how much the user gains from hitting it
pub(crate) fn next_targets(
    view: &BattleView<'_>,
    user: BattlerIndex,
    move_id: MoveId,
    rng: &mut BattleRng,
) -> Vec<BattlerIndex> {
    let data = view.dex.move_data(move_id);
    let candidates = view.move_targets(user, data.target);
    if candidates.multiple {
        return candidates.targets;
    }

    let mut weighted: Vec<(BattlerIndex, f64)> = candidates
        .targets
        .into_iter()
        .map(|t| {
            let sign = if view.is_ally(user, t) { 1.0 } else { -1.0 };
            (t, target_benefit_score(view, user, t, &data) * sign)
        })
        .collect();
    if weighted.is_empty() {
        return Vec::new();
    }
    weighted.sort_by(|a, b| b.1.total_cmp(&a.1));

    let lowest = weighted[weighted.len() - 1].1;
    if lowest < 1.0 {
        let shift = (lowest - 1.0).abs();
        for (_, w) in &mut weighted {
            *w += shift;
        }
    }

    let top = weighted[0].1;
    if let Some(cut) = weighted.iter().position(|&(_, w)| w < top / 2.0) {
        weighted.truncate(cut);
    }

    let mut total = 0.0;
    let thresholds: Vec<f64> = weighted
        .iter()
        .map(|&(_, w)| {
            total += w;
            total
        })
        .collect();
    let roll = rng.int_below(total.floor() as u32) as f64;
    let index = thresholds.iter().position(|&t| roll < t).unwrap_or(0);
    vec![weighted[index].0]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::{Battle, BattleConfig};
    use crate::types::{CombatantSpec, QueuedMove, Side, Tag, TagPayload};
    use kazam_dex::{Dex, SpeciesId};

    fn battle(seed: u64, moves: &[u16]) -> (Battle, BattlerIndex, BattlerIndex) {
        let config = BattleConfig {
            seed,
            ..BattleConfig::default()
        };
        let mut battle = Battle::new(Dex::builtin().into(), config);
        let a = battle
            .add_combatant(CombatantSpec::new(SpeciesId(25), 50, Side::Enemy).moves(moves))
            .unwrap();
        let d = battle
            .add_combatant(CombatantSpec::new(SpeciesId(143), 50, Side::Player))
            .unwrap();
        (battle, a, d)
    }

    #[test]
    fn test_struggles_without_pp() {
        let (mut battle, a, d) = battle(1, &[85, 33]);
        for slot in &mut battle.combatant_mut(a).unwrap().moveset {
            slot.pp_used = slot.pp_max;
        }
        let command = battle.choose_action(a, AiPolicy::Smart).unwrap();
        assert_eq!(command.move_id, MoveId::STRUGGLE);
        assert_eq!(command.targets, vec![d]);
    }

    #[test]
    fn test_queued_move_goes_first() {
        let (mut battle, a, d) = battle(1, &[85, 33]);
        battle
            .combatant_mut(a)
            .unwrap()
            .summon
            .move_queue
            .push_back(QueuedMove {
                id: MoveId(19),
                targets: vec![d],
                ignore_pp: true,
            });
        let command = battle.choose_action(a, AiPolicy::Smart).unwrap();
        assert_eq!(command.move_id, MoveId(19));
        assert!(command.ignore_pp);
    }

    #[test]
    fn test_encore_forces_move() {
        let (mut battle, a, _) = battle(3, &[85, 33, 14]);
        battle.add_tag(
            a,
            Tag::new(TagKind::Encore).with_payload(TagPayload::Move(MoveId(14))),
        );
        let command = battle.choose_action(a, AiPolicy::Smart).unwrap();
        assert_eq!(command.move_id, MoveId(14));
        assert_eq!(command.targets, vec![a]);
    }

    #[test]
    fn test_prefers_knockout() {
        for seed in 0..20 {
            let (mut battle, a, d) = battle(seed, &[14, 33]);
            battle.combatant_mut(d).unwrap().hp = 3;
            let command = battle.choose_action(a, AiPolicy::SmartRandom).unwrap();
            assert_eq!(command.move_id, MoveId(33), "seed {seed}");
            assert_eq!(command.targets, vec![d]);
        }
    }

    #[test]
    fn test_smart_takes_clear_best() {
        for seed in 0..20 {
            let (mut battle, a, _) = battle(seed, &[14, 85]);
            let command = battle.choose_action(a, AiPolicy::Smart).unwrap();
            assert_eq!(command.move_id, MoveId(85), "seed {seed}");
        }
    }

    #[test]
    fn test_smart_random_sometimes_strays() {
        let mut top = 0;
        for seed in 0..200 {
            let (mut battle, a, _) = battle(seed, &[14, 85]);
            if battle.choose_action(a, AiPolicy::SmartRandom).unwrap().move_id == MoveId(85) {
                top += 1;
            }
        }
        assert!((90..170).contains(&top), "top pick {top} of 200");
    }

    #[test]
    fn test_scores_unimplemented_as_unusable() {
        let (battle, a, d) = battle(1, &[85]);
        let mut data = battle.dex().move_data(MoveId(85)).into_owned();
        data.unimplemented = true;
        assert_eq!(move_score(&battle.view(), a, &data, &[d]), UNUSABLE_SCORE);
        assert_eq!(move_score(&battle.view(), a, &data, &[]), UNUSABLE_SCORE);
    }

    #[test]
    fn test_next_targets() {
        let (mut battle, a, d) = battle(1, &[85, 14]);
        let view = battle.view();
        let mut rng = BattleRng::new(9);
        assert_eq!(next_targets(&view, a, MoveId(85), &mut rng), vec![d]);
        assert_eq!(next_targets(&view, a, MoveId(14), &mut rng), vec![a]);

        battle.combatant_mut(d).unwrap().hp = 0;
        battle.combatant_mut(d).unwrap().on_field = false;
        let view = battle.view();
        assert!(next_targets(&view, a, MoveId(85), &mut rng).is_empty());
    }
}
