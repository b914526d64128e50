//! The battle session
//!
//! [`Battle`] owns the field, the combatants, the RNG and the event queue.
//! Calculations borrow a [`BattleView`]; anything that draws randomness or
//! emits events does so through a [`Mode`].

mod apply;
mod view;

use std::sync::Arc;

use kazam_dex::{Ability, Dex, MoveId, Stat, TagKind};

pub use apply::{ApplyOptions, StrikeResult};
pub use view::{BattleView, MoveTargets};

use crate::ai::{self, Command};
use crate::crit;
use crate::damage::{self, DamageRequest, DamageResult};
use crate::error::BattleError;
use crate::events::{BattleEvent, EventQueue};
use crate::mode::Mode;
use crate::rng::BattleRng;
use crate::stat_calc::{self, StatQuery};
use crate::types::{
    BattleSpec, BattlerIndex, Combatant, CombatantSpec, Controller, Field, Tag,
};

/// Settings fixed for the whole battle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    pub seed: u64,
    pub double: bool,
    pub spec: BattleSpec,
}

/// Persistable battle state, without the shared dex
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleSnapshot {
    pub field: Field,
    pub combatants: Vec<Combatant>,
    pub rng: BattleRng,
    pub next_id: u32,
}

#[derive(Debug, Clone)]
pub struct Battle {
    dex: Arc<Dex>,
    pub field: Field,
    combatants: Vec<Combatant>,
    rng: BattleRng,
    events: EventQueue,
    next_id: u32,
}

impl Battle {
    pub fn new(dex: Arc<Dex>, config: BattleConfig) -> Self {
        let field = Field {
            double: config.double,
            spec: config.spec,
            ..Field::new()
        };
        Self {
            dex,
            field,
            combatants: Vec::new(),
            rng: BattleRng::new(config.seed),
            events: EventQueue::new(),
            next_id: 1,
        }
    }

    pub fn snapshot(&self) -> BattleSnapshot {
        BattleSnapshot {
            field: self.field.clone(),
            combatants: self.combatants.clone(),
            rng: self.rng.clone(),
            next_id: self.next_id,
        }
    }

    /// Rebuild a battle from a snapshot. Pending events are not kept.
    pub fn restore(dex: Arc<Dex>, snapshot: BattleSnapshot) -> Self {
        Self {
            dex,
            field: snapshot.field,
            combatants: snapshot.combatants,
            rng: snapshot.rng,
            events: EventQueue::new(),
            next_id: snapshot.next_id,
        }
    }

    pub fn dex(&self) -> &Dex {
        &self.dex
    }

    pub fn rng(&self) -> &BattleRng {
        &self.rng
    }

    pub fn events(&self) -> &EventQueue {
        &self.events
    }

    /// Take every pending event, oldest first
    pub fn drain_events(&mut self) -> Vec<BattleEvent> {
        self.events.drain()
    }

    pub fn combatants(&self) -> &[Combatant] {
        &self.combatants
    }

    pub fn combatant(&self, idx: BattlerIndex) -> Option<&Combatant> {
        self.combatants.get(idx.0)
    }

    pub fn combatant_mut(&mut self, idx: BattlerIndex) -> Option<&mut Combatant> {
        self.combatants.get_mut(idx.0)
    }

    pub fn view(&self) -> BattleView<'_> {
        BattleView::new(&self.field, &self.combatants, &self.dex)
    }

    /// A view alongside a live mode, borrowing disjoint parts of the battle
    pub(crate) fn live(&mut self) -> (BattleView<'_>, Mode<'_>) {
        (
            BattleView::new(&self.field, &self.combatants, &self.dex),
            Mode::live(&mut self.rng, &mut self.events),
        )
    }

    pub(crate) fn check(&self, idx: BattlerIndex) -> Result<(), BattleError> {
        if idx.0 < self.combatants.len() {
            Ok(())
        } else {
            Err(BattleError::InvalidBattler(idx))
        }
    }

    pub(crate) fn mon_mut(&mut self, idx: BattlerIndex) -> &mut Combatant {
        &mut self.combatants[idx.0]
    }

    pub(crate) fn emit(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    pub(crate) fn rng_mut(&mut self) -> &mut BattleRng {
        &mut self.rng
    }

    pub(crate) fn mon_with_rng(&mut self, idx: BattlerIndex) -> (&Combatant, &mut BattleRng) {
        (&self.combatants[idx.0], &mut self.rng)
    }

    /// Add a combatant to the field
    pub fn add_combatant(&mut self, spec: CombatantSpec) -> Result<BattlerIndex, BattleError> {
        if self
            .combatants
            .iter()
            .any(|c| c.on_field && c.side == spec.side && c.position == spec.position)
        {
            return Err(BattleError::SlotOccupied {
                side: spec.side,
                position: spec.position,
            });
        }
        let mon = Combatant::new(self.next_id, &self.dex, &spec)?;
        self.next_id += 1;
        let idx = BattlerIndex(self.combatants.len());
        tracing::debug!(battler = %idx, name = %mon.name, level = mon.level, side = ?mon.side, "combatant added");
        self.combatants.push(mon);
        self.on_summon(idx);
        Ok(idx)
    }

    /// Entry effects of a combatant arriving on the field
    fn on_summon(&mut self, idx: BattlerIndex) {
        if self.combatants[idx.0].ability == Ability::SlowStart {
            self.add_tag(idx, Tag::new(TagKind::SlowStart));
        }
    }

    /// Send a benched combatant back in
    pub fn switch_in(&mut self, idx: BattlerIndex) -> Result<(), BattleError> {
        self.check(idx)?;
        let (side, position) = {
            let mon = &self.combatants[idx.0];
            (mon.side, mon.position)
        };
        if self
            .combatants
            .iter()
            .enumerate()
            .any(|(i, c)| i != idx.0 && c.is_active() && c.side == side && c.position == position)
        {
            return Err(BattleError::SlotOccupied { side, position });
        }
        self.mon_mut(idx).on_switch_in();
        self.on_summon(idx);
        Ok(())
    }

    /// Withdraw a combatant. Everything tied to its time on the field resets.
    pub fn switch_out(&mut self, idx: BattlerIndex) -> Result<(), BattleError> {
        self.check(idx)?;
        self.release_links(idx);
        self.mon_mut(idx).on_switch_out();
        tracing::debug!(battler = %idx, "switched out");
        Ok(())
    }

    /// Start a new turn: per-turn counters reset
    pub fn begin_turn(&mut self) {
        self.field.turn += 1;
        for mon in &mut self.combatants {
            mon.reset_turn_data();
        }
        tracing::trace!(turn = self.field.turn, "turn begins");
    }

    /// Close the turn: turn-end tag lapses, side condition timers
    pub fn end_turn(&mut self) {
        for i in 0..self.combatants.len() {
            let idx = BattlerIndex(i);
            if !self.combatants[i].is_active() {
                continue;
            }
            self.lapse_tags(idx, kazam_dex::LapseType::TurnEnd);
            self.combatants[i].summon.turns_on_field += 1;
        }
        for side in self.field.sides.iter_mut() {
            let expired = side.tick();
            if !expired.is_empty() {
                tracing::debug!(?expired, "side conditions expired");
            }
        }
    }

    /// Close the wave: per-wave data resets and the field clears
    pub fn end_wave(&mut self) {
        for mon in &mut self.combatants {
            mon.reset_wave_data();
        }
        self.field.clear_conditions();
        self.field.ignore_abilities = false;
    }

    /// End the battle, taking the remaining events
    pub fn end_battle(mut self) -> Vec<BattleEvent> {
        tracing::debug!(turns = self.field.turn, draws = self.rng.draws(), "battle over");
        self.events.drain()
    }

    /// Effective stat of a combatant
    pub fn effective_stat(
        &self,
        idx: BattlerIndex,
        stat: Stat,
        query: &StatQuery<'_>,
    ) -> Result<u32, BattleError> {
        self.check(idx)?;
        if let Some(opponent) = query.opponent {
            self.check(opponent)?;
        }
        Ok(stat_calc::effective_stat(&self.view(), idx, stat, query))
    }

    /// Damage with live randomness; may emit events
    pub fn compute_damage(&mut self, request: DamageRequest) -> Result<DamageResult, BattleError> {
        self.check(request.attacker)?;
        self.check(request.defender)?;
        let mark = self.events.len();
        let result = {
            let (view, mut mode) = self.live();
            damage::compute_damage(&view, &request, &mut mode)
        };
        self.sync_reveals(mark);
        Ok(result)
    }

    /// Damage preview: maximum roll, no events, no RNG draws
    pub fn simulate_damage(&self, request: DamageRequest) -> Result<DamageResult, BattleError> {
        self.check(request.attacker)?;
        self.check(request.defender)?;
        Ok(damage::compute_damage(
            &self.view(),
            &request,
            &mut Mode::Simulated,
        ))
    }

    /// Roll whether a hit is critical
    pub fn roll_critical(
        &mut self,
        attacker: BattlerIndex,
        defender: BattlerIndex,
        move_id: MoveId,
    ) -> Result<bool, BattleError> {
        self.check(attacker)?;
        self.check(defender)?;
        let data = self.dex.move_data(move_id).into_owned();
        let mark = self.events.len();
        let critical = {
            let (view, mut mode) = self.live();
            crit::roll_critical(&view, attacker, defender, &data, &mut mode)
        };
        self.sync_reveals(mark);
        Ok(critical)
    }

    /// Pick the move an AI-controlled combatant uses this turn.
    /// Player-controlled combatants yield `None`.
    pub fn decide(&mut self, idx: BattlerIndex) -> Result<Option<Command>, BattleError> {
        self.check(idx)?;
        match self.combatants[idx.0].controller {
            Controller::Player => Ok(None),
            Controller::Ai(policy) => self.choose_action(idx, policy).map(Some),
        }
    }

    /// Run the AI for `idx` under `policy`
    pub fn choose_action(
        &mut self,
        idx: BattlerIndex,
        policy: crate::types::AiPolicy,
    ) -> Result<Command, BattleError> {
        self.check(idx)?;
        ai::drop_stale_queue(self, idx);
        let view = BattleView::new(&self.field, &self.combatants, &self.dex);
        Ok(ai::choose(&view, idx, policy, &mut self.rng))
    }

    /// Mark abilities named by reveal events queued at or after `since` as
    /// known to the opponent
    pub(crate) fn sync_reveals(&mut self, since: usize) {
        let revealed: Vec<BattlerIndex> = self
            .events
            .iter()
            .skip(since)
            .filter_map(|e| match e {
                BattleEvent::AbilityRevealed { battler, .. } => Some(*battler),
                _ => None,
            })
            .collect();
        for idx in revealed {
            if let Some(mon) = self.combatants.get_mut(idx.0) {
                mon.wave.ability_revealed = true;
            }
        }
    }
}
