//! Read-only queries over battle state

use kazam_dex::{Ability, Dex, MoveData, MoveTarget, TagKind, Type};

use crate::types::{BattlerIndex, Combatant, Field, Side, Weather};

/// Borrowed view of everything a calculation may read
#[derive(Debug, Clone, Copy)]
pub struct BattleView<'a> {
    pub field: &'a Field,
    pub combatants: &'a [Combatant],
    pub dex: &'a Dex,
}

/// Battlers a move reaches
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MoveTargets {
    pub targets: Vec<BattlerIndex>,
    /// Every target is hit, rather than one chosen among them
    pub multiple: bool,
}

impl<'a> BattleView<'a> {
    pub fn new(field: &'a Field, combatants: &'a [Combatant], dex: &'a Dex) -> Self {
        Self {
            field,
            combatants,
            dex,
        }
    }

    pub fn get(&self, idx: BattlerIndex) -> Option<&'a Combatant> {
        self.combatants.get(idx.0)
    }

    /// Combatant lookup for indices already validated by the caller
    pub fn mon(&self, idx: BattlerIndex) -> &'a Combatant {
        &self.combatants[idx.0]
    }

    pub fn indices(&self) -> impl Iterator<Item = BattlerIndex> + '_ {
        (0..self.combatants.len()).map(BattlerIndex)
    }

    /// Active combatants on `side`
    pub fn active_on(&self, side: Side) -> impl Iterator<Item = BattlerIndex> + '_ {
        self.indices().filter(move |&i| {
            let mon = self.mon(i);
            mon.side == side && mon.is_active()
        })
    }

    /// Active combatants opposing `idx`
    pub fn opponents(&self, idx: BattlerIndex) -> Vec<BattlerIndex> {
        let side = self.mon(idx).side.opposite();
        self.active_on(side).collect()
    }

    /// The active partner of `idx` in a double battle
    pub fn ally(&self, idx: BattlerIndex) -> Option<BattlerIndex> {
        if !self.field.double {
            return None;
        }
        let side = self.mon(idx).side;
        self.active_on(side).find(|&i| i != idx)
    }

    /// `idx` and its ally
    pub fn allied_field(&self, idx: BattlerIndex) -> Vec<BattlerIndex> {
        let mut field = vec![idx];
        field.extend(self.ally(idx));
        field
    }

    pub fn is_ally(&self, a: BattlerIndex, b: BattlerIndex) -> bool {
        self.mon(a).side == self.mon(b).side
    }

    /// The ability in effect for `idx`.
    ///
    /// Breakable abilities are off while `suppress_breakable` is set (an
    /// attacker's Mold Breaker) or while the field ignores abilities.
    pub fn ability(&self, idx: BattlerIndex, suppress_breakable: bool) -> Ability {
        let ability = self.mon(idx).ability;
        if ability.is_breakable() && (suppress_breakable || self.field.ignore_abilities) {
            Ability::NoAbility
        } else {
            ability
        }
    }

    /// Whether an attacker switches off its target's breakable abilities
    pub fn breaks_abilities(&self, attacker: BattlerIndex, data: &MoveData) -> bool {
        self.mon(attacker).ability == Ability::MoldBreaker
            || data.has_flag(kazam_dex::MoveFlags::IGNORE_ABILITIES)
    }

    /// Weather in effect, after Cloud Nine / Air Lock suppression
    pub fn weather(&self) -> Option<Weather> {
        let weather = self.field.weather?;
        let suppressed = self
            .indices()
            .filter(|&i| self.mon(i).is_active())
            .any(|i| self.ability(i, false).suppresses_weather());
        if suppressed { None } else { Some(weather) }
    }

    pub fn is_grounded(&self, idx: BattlerIndex) -> bool {
        self.is_grounded_with(idx, false)
    }

    /// Grounding check with the holder's breakable abilities optionally switched off
    pub fn is_grounded_with(&self, idx: BattlerIndex, suppress_breakable: bool) -> bool {
        let mon = self.mon(idx);
        if self.field.gravity || mon.summon.tags.iter().any(|t| t.kind.is_grounding()) {
            return true;
        }
        if mon.is_of_type(Type::Flying) {
            return false;
        }
        if self.ability(idx, suppress_breakable) == Ability::Levitate {
            return false;
        }
        !mon
            .summon
            .tags
            .iter()
            .any(|t| t.kind.is_floating() || t.kind.is_semi_invulnerable())
    }

    pub fn is_semi_invulnerable(&self, idx: BattlerIndex) -> bool {
        self.mon(idx)
            .summon
            .tags
            .iter()
            .any(|t| t.kind.is_semi_invulnerable())
    }

    pub fn has_tag(&self, idx: BattlerIndex, kind: TagKind) -> bool {
        self.mon(idx).has_tag(kind)
    }

    /// Resolve the battlers a move used by `user` reaches
    pub fn move_targets(&self, user: BattlerIndex, target: MoveTarget) -> MoveTargets {
        let opponents = self.opponents(user);
        let ally = self.ally(user);
        let (targets, multiple) = match target {
            MoveTarget::User => (vec![user], false),
            MoveTarget::Ally => (ally.into_iter().collect(), false),
            MoveTarget::UserOrAlly => {
                let mut t = vec![user];
                t.extend(ally);
                (t, false)
            }
            MoveTarget::NearOther => {
                let mut t = opponents;
                t.extend(ally);
                (t, false)
            }
            MoveTarget::NearEnemy | MoveTarget::RandomNearEnemy => (opponents, false),
            MoveTarget::AllNearEnemies => (opponents, true),
            MoveTarget::AllNearOthers => {
                let mut t = opponents;
                t.extend(ally);
                (t, true)
            }
            MoveTarget::UserSide => {
                let mut t = vec![user];
                t.extend(ally);
                (t, true)
            }
            MoveTarget::EnemySide => (opponents, true),
            MoveTarget::BothSides => (
                self.indices()
                    .filter(|&i| self.mon(i).is_active())
                    .collect(),
                true,
            ),
        };
        MoveTargets { targets, multiple }
    }
}
