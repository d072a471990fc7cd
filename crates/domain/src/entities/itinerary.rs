//! Structured multi-day itinerary produced from model output

use serde::{Deserialize, Serialize};

use crate::value_objects::GeoPoint;

/// A generated trip plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Itinerary {
    pub trip_name: String,
    /// Number of days, always at least one
    pub days: u32,
    pub daily_schedules: Vec<DaySchedule>,
    pub route_stops: Vec<RouteStop>,
    /// The sanitized JSON text the itinerary was parsed from
    pub raw_source: String,
}

/// The activities planned for one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySchedule {
    pub day: u32,
    pub items: Vec<ScheduleItem>,
}

impl DaySchedule {
    /// Human-readable day label, e.g. `第1天`
    #[must_use]
    pub fn label(&self) -> String {
        format!("第{}天", self.day)
    }
}

/// One activity within a day
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleItem {
    pub time_slot: String,
    pub place_name: String,
    pub place_address: String,
    pub description: String,
    pub tips: String,
}

/// A stop on the itinerary's route with a parsed location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteStop {
    pub day: u32,
    pub place_name: String,
    pub place_address: String,
    pub location: GeoPoint,
    pub start_time: String,
    pub end_time: String,
    pub description: String,
}

impl Itinerary {
    /// Route stops that belong to the given day, in list order
    pub fn stops_for_day(&self, day: u32) -> impl Iterator<Item = &RouteStop> {
        self.route_stops.iter().filter(move |stop| stop.day == day)
    }
}
