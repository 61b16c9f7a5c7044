use crate::action::{ActionTransition, SiteCapture, try_capture};
use crate::combat::{Exchange, apply_damage, resolve_exchange};
use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{Faction, MatchState, Position, UnitId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackError {
    #[error("attacker {0} not found")]
    AttackerNotFound(UnitId),

    #[error("defender {0} not found")]
    DefenderNotFound(UnitId),

    #[error("attacker {0} is dead")]
    AttackerDead(UnitId),

    #[error("defender {0} is dead")]
    DefenderDead(UnitId),

    #[error("attacker {0} has already acted this turn")]
    AttackerExhausted(UnitId),

    #[error("guardian {0} cannot attack")]
    GuardianCannotAttack(UnitId),

    #[error("units share faction {faction}")]
    SameFaction { faction: Faction },

    #[error("defender at {defender} is not adjacent to attacker at {attacker}")]
    NotAdjacent {
        attacker: Position,
        defender: Position,
    },

    #[error("no tile under a combatant at {position}")]
    TileNotFound { position: Position },
}

impl GameError for AttackError {
    fn severity(&self) -> ErrorSeverity {
        use AttackError::*;
        match self {
            AttackerNotFound(_) | DefenderNotFound(_) => ErrorSeverity::Validation,
            AttackerDead(_) | DefenderDead(_) => ErrorSeverity::Validation,
            GuardianCannotAttack(_) | SameFaction { .. } => ErrorSeverity::Validation,
            AttackerExhausted(_) | NotAdjacent { .. } => ErrorSeverity::Recoverable,
            TileNotFound { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        use AttackError::*;
        match self {
            AttackerNotFound(_) => "ATTACK_ATTACKER_NOT_FOUND",
            DefenderNotFound(_) => "ATTACK_DEFENDER_NOT_FOUND",
            AttackerDead(_) => "ATTACK_ATTACKER_DEAD",
            DefenderDead(_) => "ATTACK_DEFENDER_DEAD",
            AttackerExhausted(_) => "ATTACK_ATTACKER_EXHAUSTED",
            GuardianCannotAttack(_) => "ATTACK_GUARDIAN",
            SameFaction { .. } => "ATTACK_SAME_FACTION",
            NotAdjacent { .. } => "ATTACK_NOT_ADJACENT",
            TileNotFound { .. } => "ATTACK_TILE_NOT_FOUND",
        }
    }
}

/// Melee attack on an orthogonally adjacent enemy. Both sides take damage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackAction {
    pub attacker: UnitId,
    pub defender: UnitId,
}

impl AttackAction {
    pub fn new(attacker: UnitId, defender: UnitId) -> Self {
        Self { attacker, defender }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackOutcome {
    pub attacker: UnitId,
    pub defender: UnitId,
    pub attacker_position: Position,
    pub defender_position: Position,
    pub exchange: Exchange,
    /// Hit points left after the exchange.
    pub attacker_health: u32,
    pub defender_health: u32,
    pub attacker_defeated: bool,
    pub defender_defeated: bool,
    /// Capture at the attacker's tile after the defender fell.
    pub capture: Option<SiteCapture>,
}

impl ActionTransition for AttackAction {
    type Error = AttackError;
    type Result = AttackOutcome;

    fn pre_validate(&self, state: &MatchState, _config: &GameConfig) -> Result<(), Self::Error> {
        let attacker = state
            .unit(self.attacker)
            .ok_or(AttackError::AttackerNotFound(self.attacker))?;
        let defender = state
            .unit(self.defender)
            .ok_or(AttackError::DefenderNotFound(self.defender))?;

        if !attacker.is_alive() {
            return Err(AttackError::AttackerDead(self.attacker));
        }
        if !defender.is_alive() {
            return Err(AttackError::DefenderDead(self.defender));
        }
        if attacker.is_guard() {
            return Err(AttackError::GuardianCannotAttack(self.attacker));
        }
        if attacker.exhausted {
            return Err(AttackError::AttackerExhausted(self.attacker));
        }
        if attacker.faction == defender.faction {
            return Err(AttackError::SameFaction {
                faction: attacker.faction,
            });
        }
        if !attacker.position.is_orthogonally_adjacent(defender.position) {
            return Err(AttackError::NotAdjacent {
                attacker: attacker.position,
                defender: defender.position,
            });
        }
        for position in [attacker.position, defender.position] {
            if state.tile_at(position).is_none() {
                return Err(AttackError::TileNotFound { position });
            }
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut MatchState,
        config: &GameConfig,
    ) -> Result<AttackOutcome, AttackError> {
        let attacker = state
            .unit(self.attacker)
            .ok_or(AttackError::AttackerNotFound(self.attacker))?;
        let defender = state
            .unit(self.defender)
            .ok_or(AttackError::DefenderNotFound(self.defender))?;
        let attacker_position = attacker.position;
        let defender_position = defender.position;

        let terrain_at = |position: Position| {
            state
                .grid
                .terrain_at(position)
                .ok_or(AttackError::TileNotFound { position })
        };
        let exchange = resolve_exchange(
            attacker,
            defender,
            terrain_at(attacker_position)?,
            terrain_at(defender_position)?,
            state,
            &config.combat,
        );

        let defender = state
            .unit_mut(self.defender)
            .ok_or(AttackError::DefenderNotFound(self.defender))?;
        let defender_defeated = apply_damage(defender, exchange.damage_to_defender);
        let defender_health = defender.health.current;

        let attacker = state
            .unit_mut(self.attacker)
            .ok_or(AttackError::AttackerNotFound(self.attacker))?;
        let attacker_defeated = apply_damage(attacker, exchange.damage_to_attacker);
        let attacker_health = attacker.health.current;
        attacker.exhaust();

        let capture = if defender_defeated {
            try_capture(state, attacker_position)
        } else {
            None
        };

        Ok(AttackOutcome {
            attacker: self.attacker,
            defender: self.defender,
            attacker_position,
            defender_position,
            exchange,
            attacker_health,
            defender_health,
            attacker_defeated,
            defender_defeated,
            capture,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{Grid, MapDimensions, TerrainKind};
    use crate::state::{GoldLedger, ResourceSite, Side, UnitClass};

    fn duel() -> (MatchState, GameConfig, UnitId, UnitId) {
        let config = GameConfig::default();
        let mut state = MatchState::new(
            Grid::filled(MapDimensions::new(4, 4), TerrainKind::Open),
            vec![ResourceSite::unowned(Position::new(1, 1))],
            GoldLedger::default(),
            Side::A,
        );
        let attacker = state
            .add_unit(
                Side::A.into(),
                UnitClass::Melee,
                Position::new(1, 1),
                &config.units.melee,
            )
            .unwrap();
        let defender = state
            .add_unit(
                Side::B.into(),
                UnitClass::Melee,
                Position::new(2, 1),
                &config.units.melee,
            )
            .unwrap();
        (state, config, attacker, defender)
    }

    fn run(action: &AttackAction, state: &mut MatchState, config: &GameConfig) -> AttackOutcome {
        action.pre_validate(state, config).unwrap();
        action.apply(state, config).unwrap()
    }

    #[test]
    fn even_exchange_exhausts_attacker() {
        let (mut state, config, attacker, defender) = duel();
        let outcome = run(&AttackAction::new(attacker, defender), &mut state, &config);

        assert_eq!(outcome.exchange.damage_to_defender, 30);
        assert_eq!(outcome.exchange.damage_to_attacker, 30);
        assert_eq!(outcome.defender_health, 70);
        assert_eq!(outcome.attacker_health, 70);
        let unit = state.unit(attacker).unwrap();
        assert!(unit.exhausted);
        assert_eq!(unit.movement.current, 0);
        assert!(!state.unit(defender).unwrap().exhausted);
    }

    #[test]
    fn kill_captures_attackers_tile() {
        let (mut state, config, attacker, defender) = duel();
        state.unit_mut(defender).unwrap().health.current = 10;
        let outcome = run(&AttackAction::new(attacker, defender), &mut state, &config);

        assert!(outcome.defender_defeated);
        assert_eq!(outcome.defender_health, 0);
        assert_eq!(
            outcome.capture.map(|c| c.position),
            Some(Position::new(1, 1))
        );
        assert!(state.living_unit_at(Position::new(2, 1)).is_none());
    }

    #[test]
    fn rejects_invalid_pairs() {
        let (mut state, config, attacker, defender) = duel();
        let ally = state
            .add_unit(
                Side::A.into(),
                UnitClass::Scout,
                Position::new(1, 2),
                &config.units.scout,
            )
            .unwrap();
        let far = state
            .add_unit(
                Side::B.into(),
                UnitClass::Scout,
                Position::new(3, 3),
                &config.units.scout,
            )
            .unwrap();

        let code = |action: AttackAction| {
            action
                .pre_validate(&state, &config)
                .unwrap_err()
                .error_code()
        };
        assert_eq!(code(AttackAction::new(attacker, ally)), "ATTACK_SAME_FACTION");
        assert_eq!(code(AttackAction::new(attacker, far)), "ATTACK_NOT_ADJACENT");
        assert_eq!(
            code(AttackAction::new(attacker, UnitId(77))),
            "ATTACK_DEFENDER_NOT_FOUND"
        );

        state.unit_mut(attacker).unwrap().exhaust();
        assert_eq!(
            AttackAction::new(attacker, defender)
                .pre_validate(&state, &config)
                .unwrap_err(),
            AttackError::AttackerExhausted(attacker)
        );
    }
}
