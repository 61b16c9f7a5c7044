use crate::events::GameEvent;
use crate::state::{MatchState, Position, Side};

/// Ownership change of a resource site.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SiteCapture {
    pub position: Position,
    pub side: Side,
    pub previous: Option<Side>,
}

impl SiteCapture {
    pub fn event(self) -> GameEvent {
        GameEvent::SiteCaptured {
            position: self.position,
            side: self.side,
            previous: self.previous,
        }
    }
}

/// Hands the site at `position` to the side standing on it.
///
/// Nothing happens unless a living side unit occupies the site, no living
/// neutral guardian stands there, and the site is not already that side's.
pub fn try_capture(state: &mut MatchState, position: Position) -> Option<SiteCapture> {
    let guarded = state
        .living_units()
        .any(|unit| unit.position == position && unit.is_guard());
    if guarded {
        return None;
    }
    let side = state.living_unit_at(position)?.side()?;

    let site = state.site_at_mut(position)?;
    if site.is_owned_by(side) {
        return None;
    }
    let previous = site.owner.replace(side);
    Some(SiteCapture {
        position,
        side,
        previous,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::env::{Grid, MapDimensions, TerrainKind};
    use crate::state::{Faction, GoldLedger, ResourceSite, UnitClass};

    fn state() -> MatchState {
        MatchState::new(
            Grid::filled(MapDimensions::new(3, 3), TerrainKind::Open),
            vec![ResourceSite::unowned(Position::new(1, 1))],
            GoldLedger::default(),
            Side::A,
        )
    }

    #[test]
    fn side_unit_on_site_captures_once() {
        let config = GameConfig::default();
        let mut state = state();
        let site = Position::new(1, 1);
        state
            .add_unit(Side::B.into(), UnitClass::Scout, site, &config.units.scout)
            .unwrap();

        assert_eq!(
            try_capture(&mut state, site),
            Some(SiteCapture {
                position: site,
                side: Side::B,
                previous: None,
            })
        );
        assert_eq!(try_capture(&mut state, site), None);
        assert_eq!(state.owned_site_count(Side::B), 1);
    }

    #[test]
    fn guardians_and_empty_tiles_never_capture() {
        let config = GameConfig::default();
        let mut state = state();
        let site = Position::new(1, 1);
        assert_eq!(try_capture(&mut state, site), None);

        let guard = state
            .add_unit(Faction::Neutral, UnitClass::Infantry, site, &config.units.infantry)
            .unwrap();
        state.unit_mut(guard).unwrap().flags |= crate::state::UnitFlags::GUARD;
        assert_eq!(try_capture(&mut state, site), None);
        assert_eq!(state.site_at(site).and_then(|s| s.owner), None);
    }

    #[test]
    fn ownership_transfers_between_sides() {
        let config = GameConfig::default();
        let mut state = state();
        let site = Position::new(1, 1);
        state.sites[0].owner = Some(Side::A);
        state
            .add_unit(Side::B.into(), UnitClass::Melee, site, &config.units.melee)
            .unwrap();

        let capture = try_capture(&mut state, site).unwrap();
        assert_eq!(capture.previous, Some(Side::A));
        assert_eq!(state.owned_site_count(Side::A), 0);
    }
}
