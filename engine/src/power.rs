//! Move type and base power as used in battle

use kazam_dex::{MoveData, TagKind, Type, TypeSource};

use crate::abilities;
use crate::battle::BattleView;
use crate::items;
use crate::types::{BattlerIndex, Weather};

/// Power below which a Tera-type move is raised
const TERA_MIN_POWER: f64 = 60.0;

/// The type a move takes when `user` uses it.
///
/// Field-driven typing first, then the user's type-changing ability, then
/// Ion Deluge, then Electrify on the user.
pub fn move_type(view: &BattleView<'_>, user: BattlerIndex, data: &MoveData) -> Type {
    let mon = view.mon(user);
    let variable = data.variable_type();
    let mut ty = data.move_type;

    match variable {
        Some(TypeSource::Weather) => {
            if let Some(t) = view.weather().and_then(|w| w.move_type()) {
                ty = t;
            }
        }
        Some(TypeSource::Terrain) => {
            if let Some(terrain) = view.field.terrain {
                if view.is_grounded(user) {
                    ty = terrain.move_type();
                }
            }
        }
        None => {}
    }

    if let Some((changed, _)) =
        abilities::type_change(view.ability(user, false), ty, variable.is_some())
    {
        ty = changed;
    }
    if view.field.ion_deluge && ty == Type::Normal {
        ty = Type::Electric;
    }
    if mon.has_tag(TagKind::Electrified) {
        ty = Type::Electric;
    }
    ty
}

/// Power doubling from the field for weather and terrain moves
fn variable_power(view: &BattleView<'_>, user: BattlerIndex, data: &MoveData) -> f64 {
    let power = data.power as f64;
    match data.variable_type() {
        Some(TypeSource::Weather)
            if view.weather().is_some_and(|w| w != Weather::StrongWinds) =>
        {
            power * 2.0
        }
        Some(TypeSource::Terrain) if view.field.terrain.is_some() && view.is_grounded(user) => {
            power * 2.0
        }
        _ => power,
    }
}

/// Base power of `data` when `user` uses it. Status moves have none.
pub fn move_power(view: &BattleView<'_>, user: BattlerIndex, data: &MoveData) -> f64 {
    if !data.is_attack() {
        return 0.0;
    }
    let mon = view.mon(user);
    let variable = variable_power(view, user, data);
    let mut power = variable;

    if mon.active_tera() == Some(data.move_type)
        && power < TERA_MIN_POWER
        && data.priority <= 0
        && !data.is_multi_hit()
        && items::multi_lens_hits(mon) == 0
    {
        power = TERA_MIN_POWER;
    }

    let ability = view.ability(user, false);
    let ty = move_type(view, user, data);
    power *= abilities::power_multiplier(ability, mon, ty, variable);
    if let Some((_, bonus)) =
        abilities::type_change(ability, data.move_type, data.variable_type().is_some())
    {
        power *= bonus;
    }
    power
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::{Battle, BattleConfig};
    use crate::types::{CombatantSpec, Side, Terrain};
    use kazam_dex::{Ability, Dex, MoveId, SpeciesId};

    fn setup() -> (Battle, BattlerIndex) {
        let mut battle = Battle::new(Dex::builtin().into(), BattleConfig::default());
        let user = battle
            .add_combatant(CombatantSpec::new(SpeciesId(25), 50, Side::Player))
            .unwrap();
        battle
            .add_combatant(CombatantSpec::new(SpeciesId(143), 50, Side::Enemy))
            .unwrap();
        (battle, user)
    }

    #[test]
    fn test_weather_ball() {
        let (mut battle, user) = setup();
        let data = battle.dex().move_data(MoveId(311)).into_owned();
        assert_eq!(move_type(&battle.view(), user, &data), Type::Normal);
        assert_eq!(move_power(&battle.view(), user, &data), 50.0);

        battle.field.weather = Some(Weather::Rain);
        assert_eq!(move_type(&battle.view(), user, &data), Type::Water);
        assert_eq!(move_power(&battle.view(), user, &data), 100.0);

        battle.field.weather = Some(Weather::StrongWinds);
        assert_eq!(move_type(&battle.view(), user, &data), Type::Normal);
        assert_eq!(move_power(&battle.view(), user, &data), 50.0);
    }

    #[test]
    fn test_weather_ball_under_cloud_nine() {
        let (mut battle, user) = setup();
        battle.field.weather = Some(Weather::Sun);
        battle.combatant_mut(BattlerIndex(1)).unwrap().ability = Ability::CloudNine;
        let data = battle.dex().move_data(MoveId(311)).into_owned();
        assert_eq!(move_type(&battle.view(), user, &data), Type::Normal);
    }

    #[test]
    fn test_terrain_pulse_needs_grounded_user() {
        let (mut battle, user) = setup();
        battle.field.terrain = Some(Terrain::Psychic);
        let data = battle.dex().move_data(MoveId(805)).into_owned();
        assert_eq!(move_type(&battle.view(), user, &data), Type::Psychic);

        battle
            .combatant_mut(user)
            .unwrap()
            .summon
            .tags
            .push(crate::types::Tag::new(TagKind::MagnetRisen));
        assert_eq!(move_type(&battle.view(), user, &data), Type::Normal);
    }

    #[test]
    fn test_ate_ability_and_ion_deluge() {
        let (mut battle, user) = setup();
        let tackle = battle.dex().move_data(MoveId(33)).into_owned();
        battle.combatant_mut(user).unwrap().ability = Ability::Pixilate;
        assert_eq!(move_type(&battle.view(), user, &tackle), Type::Fairy);
        assert!((move_power(&battle.view(), user, &tackle) - 48.0).abs() < 1e-9);

        battle.combatant_mut(user).unwrap().ability = Ability::NoAbility;
        battle.field.ion_deluge = true;
        assert_eq!(move_type(&battle.view(), user, &tackle), Type::Electric);
    }

    #[test]
    fn test_pinch_boost() {
        let (mut battle, user) = setup();
        let thunderbolt = battle.dex().move_data(MoveId(85)).into_owned();
        let mon = battle.combatant_mut(user).unwrap();
        mon.ability = Ability::Overgrow;
        mon.hp = mon.max_hp() / 3;
        // Thunderbolt is not Grass
        assert_eq!(move_power(&battle.view(), user, &thunderbolt), 90.0);
    }
}
