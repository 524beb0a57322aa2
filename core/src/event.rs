//! Random day events that nudge the health metrics.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Complaint,
    RaveReview,
    TrainingCompleted,
    CompetitorLaunch,
}

/// One row of the event table: what happened and how much it moves
/// customer satisfaction and employee morale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DayEvent {
    pub kind: EventKind,
    pub message: String,
    pub satisfaction_delta: i32,
    pub morale_delta: i32,
}

impl DayEvent {
    pub fn new(
        kind: EventKind,
        message: impl Into<String>,
        satisfaction_delta: i32,
        morale_delta: i32,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            satisfaction_delta,
            morale_delta,
        }
    }

    /// The stock table. Order matters: the selection draw indexes into it.
    pub fn default_table() -> Vec<DayEvent> {
        vec![
            DayEvent::new(
                EventKind::Complaint,
                "Customer complained about product quality!",
                -5,
                0,
            ),
            DayEvent::new(EventKind::RaveReview, "Great customer review received!", 8, 3),
            DayEvent::new(
                EventKind::TrainingCompleted,
                "Employee training program completed!",
                2,
                10,
            ),
            DayEvent::new(
                EventKind::CompetitorLaunch,
                "Competitor launched similar product",
                -3,
                -2,
            ),
        ]
    }
}
