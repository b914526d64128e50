//! The combatant record

use std::collections::VecDeque;

use kazam_dex::{
    Ability, Dex, HeldItem, ItemKind, MoveData, MoveId, SpeciesId, Stat, StatusEffect, TagKind,
    Type,
};

use super::side::{BattlerIndex, Side};
use super::stats::StatStages;
use super::status::Status;
use super::tags::Tag;
use crate::error::BattleError;

pub const MAX_LEVEL: u8 = 200;
pub const MAX_IV: u8 = 31;
pub const MAX_MOVES: usize = 4;
pub const MAX_BOSS_SEGMENTS: u8 = 5;

/// AI move-selection policy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AiPolicy {
    /// Walks down the ranking with a fixed 5/8 chance per step
    #[default]
    SmartRandom,
    /// Walks down the ranking with a chance tied to the score ratio
    Smart,
}

/// Who decides this combatant's actions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Controller {
    #[default]
    Player,
    Ai(AiPolicy),
}

/// A learned move and its PP usage. A zero `pp_max` never runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveSlot {
    pub id: MoveId,
    pub pp_used: u8,
    pub pp_max: u8,
}

impl MoveSlot {
    pub fn new(data: &MoveData) -> Self {
        Self {
            id: data.id,
            pp_used: 0,
            pp_max: data.pp,
        }
    }

    pub fn has_pp(&self) -> bool {
        self.pp_max == 0 || self.pp_used < self.pp_max
    }
}

/// A move committed for a later turn (charge turns, forced moves)
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueuedMove {
    pub id: MoveId,
    pub targets: Vec<BattlerIndex>,
    /// Used without spending PP
    pub ignore_pp: bool,
}

/// State cleared whenever the combatant leaves the field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SummonData {
    pub stages: StatStages,
    pub tags: Vec<Tag>,
    pub move_queue: VecDeque<QueuedMove>,
    pub turns_on_field: u32,
    pub types_override: Option<Vec<Type>>,
    /// Last move this combatant used while on the field
    pub last_move: Option<MoveId>,
}

/// Counters reset at the start of each turn
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnData {
    /// Strikes the current move will land in total
    pub hit_count: u8,
    /// Strikes still to land, including the current one
    pub hits_left: u8,
    pub berries_eaten: u8,
    pub acted: bool,
    pub damage_taken: u32,
}

impl TurnData {
    /// Zero-based index of the strike currently resolving
    pub fn strike_index(&self) -> u8 {
        self.hit_count.saturating_sub(self.hits_left)
    }
}

/// Counters reset at the start of each wave
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaveData {
    pub ability_revealed: bool,
}

/// Shield segments on a boss's health bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BossShieldState {
    pub segment_count: u8,
    /// Segments still standing above the last one; 0 means no shields left
    pub segment_index: u8,
}

impl BossShieldState {
    pub fn new(segment_count: u8) -> Self {
        let segment_count = segment_count.clamp(1, MAX_BOSS_SEGMENTS);
        Self {
            segment_count,
            segment_index: segment_count - 1,
        }
    }
}

/// How to build a combatant
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatantSpec {
    pub species: SpeciesId,
    pub nickname: Option<String>,
    pub level: u8,
    pub ability_index: usize,
    pub ivs: [u8; 6],
    pub moves: Vec<MoveId>,
    pub items: Vec<HeldItem>,
    pub side: Side,
    pub position: u8,
    pub controller: Controller,
    pub tera_type: Option<Type>,
    /// Health bar segments; 2 or more makes a boss
    pub boss_segments: u8,
}

impl Default for CombatantSpec {
    fn default() -> Self {
        Self {
            species: SpeciesId(1),
            nickname: None,
            level: 50,
            ability_index: 0,
            ivs: [MAX_IV; 6],
            moves: Vec::new(),
            items: Vec::new(),
            side: Side::Player,
            position: 0,
            controller: Controller::Player,
            tera_type: None,
            boss_segments: 0,
        }
    }
}

impl CombatantSpec {
    pub fn new(species: SpeciesId, level: u8, side: Side) -> Self {
        Self {
            species,
            level,
            side,
            ..Self::default()
        }
    }

    pub fn moves(mut self, moves: &[u16]) -> Self {
        self.moves = moves.iter().map(|&id| MoveId(id)).collect();
        self
    }

    pub fn item(mut self, kind: ItemKind, stacks: u8) -> Self {
        self.items.push(HeldItem::new(kind, stacks));
        self
    }

    pub fn ability_index(mut self, index: usize) -> Self {
        self.ability_index = index;
        self
    }

    pub fn position(mut self, position: u8) -> Self {
        self.position = position;
        self
    }

    pub fn ai(mut self, policy: AiPolicy) -> Self {
        self.controller = Controller::Ai(policy);
        self
    }

    pub fn boss(mut self, segments: u8) -> Self {
        self.boss_segments = segments;
        self
    }

    pub fn tera(mut self, tera_type: Type) -> Self {
        self.tera_type = Some(tera_type);
        self
    }
}

/// One creature in battle
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub id: u32,
    pub name: String,
    pub species: SpeciesId,
    pub level: u8,
    pub ivs: [u8; 6],
    /// Permanent stats in [`Stat`] order
    pub stats: [u32; 6],
    pub hp: u32,
    pub types: Vec<Type>,
    pub tera_type: Option<Type>,
    pub terastallized: bool,
    pub ability: Ability,
    pub ability_index: usize,
    pub items: Vec<HeldItem>,
    pub moveset: Vec<MoveSlot>,
    pub status: Option<Status>,
    pub summon: SummonData,
    pub turn: TurnData,
    pub wave: WaveData,
    pub boss: Option<BossShieldState>,
    pub side: Side,
    pub position: u8,
    pub on_field: bool,
    pub form_index: u8,
    pub controller: Controller,
}

/// Permanent stat from base stat, IV and level
pub fn calculate_stat(stat: Stat, base: u16, iv: u8, level: u8) -> u32 {
    let scaled = (2 * base as u32 + iv as u32) * level as u32 / 100;
    match stat {
        Stat::Hp if base == 1 => 1,
        Stat::Hp => scaled + level as u32 + 10,
        _ => scaled + 5,
    }
}

impl Combatant {
    /// Build a combatant. Fails only for a missing or unobtainable species.
    pub fn new(id: u32, dex: &Dex, spec: &CombatantSpec) -> Result<Self, BattleError> {
        let species = dex.obtainable_species(spec.species)?;

        let level = spec.level.clamp(1, MAX_LEVEL);
        let ivs = spec.ivs.map(|iv| iv.min(MAX_IV));
        let mut stats = [0u32; 6];
        for stat in Stat::ALL {
            stats[stat.index()] =
                calculate_stat(stat, species.base_stats[stat.index()], ivs[stat.index()], level);
        }

        let (ability, ability_index) = if species.abilities.is_empty() {
            (Ability::NoAbility, 0)
        } else {
            let last = species.abilities.len() - 1;
            let index = if spec.ability_index > last {
                tracing::warn!(
                    species = %species.name,
                    requested = spec.ability_index,
                    clamped = last,
                    "ability index out of range"
                );
                last
            } else {
                spec.ability_index
            };
            (species.abilities[index], index)
        };

        if spec.moves.len() > MAX_MOVES {
            tracing::warn!(
                species = %species.name,
                count = spec.moves.len(),
                "moveset truncated to {MAX_MOVES} moves"
            );
        }
        let moveset = spec
            .moves
            .iter()
            .take(MAX_MOVES)
            .map(|&id| MoveSlot::new(&dex.move_data(id)))
            .collect();

        let boss = (spec.boss_segments > 1).then(|| BossShieldState::new(spec.boss_segments));

        Ok(Self {
            id,
            name: spec.nickname.clone().unwrap_or_else(|| species.name.clone()),
            species: species.id,
            level,
            ivs,
            stats,
            hp: stats[Stat::Hp.index()],
            types: species.types.clone(),
            tera_type: spec.tera_type,
            terastallized: false,
            ability,
            ability_index,
            items: spec.items.clone(),
            moveset,
            status: None,
            summon: SummonData::default(),
            turn: TurnData::default(),
            wave: WaveData::default(),
            boss,
            side: spec.side,
            position: spec.position,
            on_field: true,
            form_index: 0,
            controller: spec.controller,
        })
    }

    pub fn max_hp(&self) -> u32 {
        self.stats[Stat::Hp.index()]
    }

    /// Permanent stat value
    pub fn stat(&self, stat: Stat) -> u32 {
        self.stats[stat.index()]
    }

    pub fn is_fainted(&self) -> bool {
        self.hp == 0
    }

    pub fn is_active(&self) -> bool {
        self.on_field && !self.is_fainted()
    }

    pub fn is_full_hp(&self) -> bool {
        self.hp >= self.max_hp()
    }

    pub fn hp_ratio(&self) -> f64 {
        if self.max_hp() == 0 {
            return 0.0;
        }
        self.hp as f64 / self.max_hp() as f64
    }

    pub fn is_boss(&self) -> bool {
        self.boss.is_some()
    }

    pub fn status_effect(&self) -> Option<StatusEffect> {
        self.status.map(|s| s.effect())
    }

    pub fn has_status(&self, effect: StatusEffect) -> bool {
        self.status_effect() == Some(effect)
    }

    pub fn tag(&self, kind: TagKind) -> Option<&Tag> {
        self.summon.tags.iter().find(|t| t.kind == kind)
    }

    pub fn tag_mut(&mut self, kind: TagKind) -> Option<&mut Tag> {
        self.summon.tags.iter_mut().find(|t| t.kind == kind)
    }

    pub fn has_tag(&self, kind: TagKind) -> bool {
        self.tag(kind).is_some()
    }

    /// Total stacks of a held item kind (0 when not held)
    pub fn item_stacks(&self, kind: ItemKind) -> u8 {
        self.items
            .iter()
            .filter(|i| i.kind == kind)
            .fold(0u8, |total, i| total.saturating_add(i.stacks))
    }

    /// Types before battle effects: an override if set, else the species types
    pub fn base_types(&self) -> &[Type] {
        self.summon.types_override.as_deref().unwrap_or(&self.types)
    }

    /// Types used for matchups.
    ///
    /// A non-Stellar Tera replaces everything; Roost drops Flying; an
    /// empty list becomes `[Unknown]`.
    pub fn effective_types(&self) -> Vec<Type> {
        if self.terastallized {
            if let Some(tera) = self.tera_type {
                if tera != Type::Stellar {
                    return vec![tera];
                }
            }
        }
        let mut types: Vec<Type> = self.base_types().to_vec();
        if self.has_tag(TagKind::Roost) {
            types.retain(|t| *t != Type::Flying);
        }
        if types.is_empty() {
            types.push(Type::Unknown);
        }
        types
    }

    pub fn is_of_type(&self, ty: Type) -> bool {
        self.effective_types().contains(&ty)
    }

    /// The Tera type once terastallized
    pub fn active_tera(&self) -> Option<Type> {
        if self.terastallized {
            self.tera_type
        } else {
            None
        }
    }

    pub fn move_slot(&self, id: MoveId) -> Option<&MoveSlot> {
        self.moveset.iter().find(|m| m.id == id)
    }

    /// Spend one PP of a known move; returns false when none was left
    pub fn use_pp(&mut self, id: MoveId) -> bool {
        match self.moveset.iter_mut().find(|m| m.id == id) {
            Some(slot) if slot.has_pp() => {
                if slot.pp_max > 0 {
                    slot.pp_used += 1;
                }
                true
            }
            _ => false,
        }
    }

    /// Leave the field: everything tied to being summoned resets
    pub fn on_switch_out(&mut self) {
        self.summon = SummonData::default();
        self.turn = TurnData::default();
        self.on_field = false;
        self.terastallized = false;
    }

    pub fn on_switch_in(&mut self) {
        self.summon = SummonData::default();
        self.on_field = true;
    }

    pub fn reset_turn_data(&mut self) {
        self.turn = TurnData::default();
    }

    pub fn reset_wave_data(&mut self) {
        self.wave = WaveData::default();
    }
}
