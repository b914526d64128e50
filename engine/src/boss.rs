//! Boss health segments
//!
//! A boss's health bar is split into equal segments. A hit that crosses a
//! boundary is cut short at that boundary unless it was strong enough to
//! break further shields (twice the segment size per extra shield). Every
//! shield broken grants a stat stage reward.

use kazam_dex::BattleStat;

use crate::battle::Battle;
use crate::events::BattleEvent;
use crate::rng::BattleRng;
use crate::types::stats::MAX_STAGE;
use crate::types::{BattleSpec, BattlerIndex, BossShieldState, Combatant};

/// Damage after segment capping, and the index of the lowest shield it reaches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentHit {
    pub damage: u32,
    pub cleared_index: u8,
}

fn segment_size(mon: &Combatant, shield: &BossShieldState) -> f64 {
    mon.max_hp() as f64 / shield.segment_count as f64
}

/// Whether a hit may break `count` shields at once. The last battle's
/// boss in its first form always keeps its final shield for a separate hit.
pub fn can_bypass_segments(mon: &Combatant, spec: BattleSpec, count: u8) -> bool {
    let Some(shield) = mon.boss else {
        return true;
    };
    !(spec == BattleSpec::FinalBoss
        && mon.form_index == 0
        && (shield.segment_index as i16 - count as i16) < 1)
}

/// Cap incoming damage at the next segment boundary it can reach
pub fn segment_damage(mon: &Combatant, damage: u32, spec: BattleSpec) -> SegmentHit {
    let Some(shield) = mon.boss else {
        return SegmentHit {
            damage,
            cleared_index: 0,
        };
    };
    let size = segment_size(mon, &shield);
    let hp = mon.hp as f64;
    let mut hit = SegmentHit {
        damage,
        cleared_index: shield.segment_index + 1,
    };

    for s in (1..=shield.segment_index).rev() {
        let threshold = size * s as f64;
        let rounded = threshold.round();
        if hp < rounded {
            continue;
        }
        if hp - damage as f64 <= rounded {
            let remainder = hp - rounded;
            let mut bypassed = 0u8;
            while bypassed < shield.segment_index
                && can_bypass_segments(mon, spec, bypassed + 1)
                && damage as f64 - remainder >= (size * 2f64.powi(bypassed as i32 + 1)).round()
            {
                bypassed += 1;
            }
            let capped = (hp - threshold + size * bypassed as f64).floor().max(1.0);
            hit.damage = capped as u32;
            hit.cleared_index = s - bypassed;
            tracing::trace!(segment = s, bypassed, damage = hit.damage, "boss hit capped");
        }
        break;
    }
    hit
}

/// Stages granted for breaking the shield at `segment_index`
pub fn reward_stages(shield: &BossShieldState) -> i8 {
    let mut stages = 1;
    if shield.segment_count >= 3 && shield.segment_index == 1 {
        stages += 1;
    }
    if shield.segment_count >= 5 && shield.segment_index == 2 {
        stages += 1;
    }
    stages
}

/// Draw the stat to boost, weighted by permanent stat among those not yet maxed
pub fn pick_reward_stat(mon: &Combatant, rng: &mut BattleRng) -> Option<BattleStat> {
    let candidates: Vec<(BattleStat, u32)> = BattleStat::EFFECTIVE
        .iter()
        .filter(|&&s| mon.summon.stages.get(s) < MAX_STAGE)
        .filter_map(|&s| s.permanent().map(|p| (s, mon.stat(p))))
        .collect();
    let total: u32 = candidates.iter().map(|(_, w)| w).sum();
    if total == 0 {
        return None;
    }
    let roll = rng.int_below(total);
    let mut threshold = 0;
    for (stat, weight) in candidates {
        threshold += weight;
        if roll < threshold {
            return Some(stat);
        }
    }
    None
}

impl Battle {
    /// Break every shield down to `cleared_index`, granting a reward for each
    pub(crate) fn clear_boss_segments(&mut self, idx: BattlerIndex, cleared_index: u8) {
        loop {
            let Some(shield) = self.combatants()[idx.0].boss else {
                return;
            };
            if shield.segment_index == 0 || cleared_index as i16 - 1 >= shield.segment_index as i16 {
                return;
            }
            let stages = reward_stages(&shield);
            let (mon, rng) = self.mon_with_rng(idx);
            if let Some(stat) = pick_reward_stat(mon, rng) {
                self.mon_mut(idx).summon.stages.boost(stat, stages);
                self.emit(BattleEvent::StatStageChange {
                    battler: idx,
                    stats: vec![stat],
                    stages,
                });
            }
            let remaining = shield.segment_index - 1;
            if let Some(shield) = self.mon_mut(idx).boss.as_mut() {
                shield.segment_index = remaining;
            }
            tracing::debug!(battler = %idx, remaining, stages, "boss shield broken");
            self.emit(BattleEvent::BossSegmentCleared {
                battler: idx,
                segment_index: remaining,
            });
        }
    }
}
