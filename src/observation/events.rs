use serde::{Deserialize, Serialize};

use crate::dilemma::Choice;
use crate::structures::BuildingKind;
use crate::world::Position;

/// Something that happened during a run, surfaced as a notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub day: u32,
    pub event_type: EventType,
    pub data: EventData,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EventType {
    // Run
    RunStarted,
    DayAdvanced,

    // Map
    Scavenged,
    TerminalAccessed,

    // Base
    Built,
    Dismantled,
    DailyYields,

    // Dilemmas
    DilemmaOpened,
    DilemmaResolved,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub building: Option<BuildingKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    /// Scrap spent or refunded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scrap: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub food: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub water: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choice: Option<Choice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Event {
    fn new(day: u32, event_type: EventType, data: EventData) -> Self {
        Self {
            day,
            event_type,
            data,
        }
    }

    pub fn run_started(day: u32, summary: &str) -> Self {
        Self::new(
            day,
            EventType::RunStarted,
            EventData {
                description: Some(summary.to_string()),
                ..EventData::empty()
            },
        )
    }

    pub fn day_advanced(day: u32) -> Self {
        Self::new(day, EventType::DayAdvanced, EventData::empty())
    }

    pub fn scavenged(day: u32, position: Position) -> Self {
        Self::new(
            day,
            EventType::Scavenged,
            EventData {
                position: Some(position),
                food: Some(1),
                water: Some(1),
                scrap: Some(1),
                ..EventData::empty()
            },
        )
    }

    pub fn terminal_accessed(day: u32, position: Position) -> Self {
        Self::new(
            day,
            EventType::TerminalAccessed,
            EventData {
                position: Some(position),
                ..EventData::empty()
            },
        )
    }

    pub fn built(day: u32, building: BuildingKind, position: Position, cost: u32) -> Self {
        Self::new(
            day,
            EventType::Built,
            EventData {
                building: Some(building),
                position: Some(position),
                scrap: Some(cost),
                ..EventData::empty()
            },
        )
    }

    pub fn dismantled(day: u32, building: BuildingKind, position: Position, refund: u32) -> Self {
        Self::new(
            day,
            EventType::Dismantled,
            EventData {
                building: Some(building),
                position: Some(position),
                scrap: Some(refund),
                ..EventData::empty()
            },
        )
    }

    pub fn daily_yields(day: u32, food: u32, water: u32) -> Self {
        Self::new(
            day,
            EventType::DailyYields,
            EventData {
                food: Some(food),
                water: Some(water),
                ..EventData::empty()
            },
        )
    }

    pub fn dilemma_opened(day: u32) -> Self {
        Self::new(day, EventType::DilemmaOpened, EventData::empty())
    }

    pub fn dilemma_resolved(day: u32, choice: Choice) -> Self {
        Self::new(
            day,
            EventType::DilemmaResolved,
            EventData {
                choice: Some(choice),
                ..EventData::empty()
            },
        )
    }

    /// Short human-readable text for a toast
    pub fn describe(&self) -> String {
        let d = &self.data;
        let building = d.building.map(|b| b.display_name()).unwrap_or("Building");
        match self.event_type {
            EventType::RunStarted => d
                .description
                .clone()
                .unwrap_or_else(|| "A new run begins".to_string()),
            EventType::DayAdvanced => format!("Day {} dawns", self.day),
            EventType::Scavenged => "Scavenged +1 food, +1 water, +1 scrap".to_string(),
            EventType::TerminalAccessed => "The terminal flickers to life".to_string(),
            EventType::Built => format!("Built {} (-{} scrap)", building, d.scrap.unwrap_or(0)),
            EventType::Dismantled => format!(
                "Dismantled {}, refunded {} scrap",
                building,
                d.scrap.unwrap_or(0)
            ),
            EventType::DailyYields => format!(
                "Daily yields: +{} food, +{} water from your base",
                d.food.unwrap_or(0),
                d.water.unwrap_or(0)
            ),
            EventType::DilemmaOpened => "Someone is at the gate".to_string(),
            EventType::DilemmaResolved => match d.choice {
                Some(choice) => format!("You chose: {}", choice.label()),
                None => "The dilemma passes".to_string(),
            },
        }
    }
}

impl EventData {
    pub fn empty() -> Self {
        Self::default()
    }
}
