//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use game_core::{GameEvent, Side};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Movement, combat, abilities, spawns, captures
    Units,
    /// Gold settlement
    Economy,
    /// Turn hand-over
    Turn,
}

impl Topic {
    pub fn of(event: &GameEvent) -> Topic {
        match event {
            GameEvent::GoldSettled(_) => Topic::Economy,
            GameEvent::TurnEnded { .. } => Topic::Turn,
            GameEvent::UnitMoved { .. }
            | GameEvent::CombatResolved { .. }
            | GameEvent::UnitDefeated { .. }
            | GameEvent::SiteCaptured { .. }
            | GameEvent::UnitFortified { .. }
            | GameEvent::FortifyExpired { .. }
            | GameEvent::UnitUpgraded { .. }
            | GameEvent::UnitSpawned { .. } => Topic::Units,
        }
    }
}

/// A game event stamped with the turn in which it happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub round: u32,
    /// Side whose turn produced the event.
    pub side: Side,
    pub event: GameEvent,
}

impl Event {
    pub fn topic(&self) -> Topic {
        Topic::of(&self.event)
    }
}

/// Topic-based event bus
///
/// Subscribers only receive events for the topics they asked for. Publishing
/// never blocks; a subscriber that falls more than `capacity` events behind
/// observes `RecvError::Lagged`.
#[derive(Clone)]
pub struct EventBus {
    units: broadcast::Sender<Event>,
    economy: broadcast::Sender<Event>,
    turn: broadcast::Sender<Event>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            units: broadcast::channel(capacity).0,
            economy: broadcast::channel(capacity).0,
            turn: broadcast::channel(capacity).0,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Units => &self.units,
            Topic::Economy => &self.economy,
            Topic::Turn => &self.turn,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.sender(topic).send(event).is_err() {
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.sender(topic).subscribe()
    }

    pub fn subscriber_count(&self, topic: Topic) -> usize {
        self.sender(topic).receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{Position, UnitId};
    use tokio::sync::broadcast::error::TryRecvError;

    fn stamped(event: GameEvent) -> Event {
        Event {
            round: 1,
            side: Side::A,
            event,
        }
    }

    #[test]
    fn routes_by_topic() {
        let bus = EventBus::new();
        let mut units = bus.subscribe(Topic::Units);
        let mut turn = bus.subscribe(Topic::Turn);

        bus.publish(stamped(GameEvent::UnitDefeated {
            unit: UnitId(3),
            position: Position::new(1, 1),
        }));
        bus.publish(stamped(GameEvent::TurnEnded {
            ended: Side::A,
            active: Side::B,
            round: 1,
        }));

        assert_eq!(units.try_recv().unwrap().event.as_snake_case(), "unit_defeated");
        assert!(matches!(units.try_recv(), Err(TryRecvError::Empty)));
        assert_eq!(turn.try_recv().unwrap().topic(), Topic::Turn);
    }

    #[test]
    fn publishing_without_subscribers_is_fine() {
        let bus = EventBus::with_capacity(0);
        assert_eq!(bus.subscriber_count(Topic::Economy), 0);
        bus.publish(stamped(GameEvent::TurnEnded {
            ended: Side::B,
            active: Side::A,
            round: 2,
        }));
    }

    #[tokio::test]
    async fn receivers_close_when_the_bus_is_dropped() {
        let bus = EventBus::new();
        let mut turn = bus.subscribe(Topic::Turn);
        let clone = bus.clone();
        drop(bus);
        clone.publish(stamped(GameEvent::TurnEnded {
            ended: Side::A,
            active: Side::B,
            round: 1,
        }));
        drop(clone);

        assert!(turn.recv().await.is_ok());
        assert!(turn.recv().await.is_err());
    }
}
