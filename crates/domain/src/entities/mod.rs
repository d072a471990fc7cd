//! Entities - Route geometry and generated itineraries

mod itinerary;
mod route;

pub use itinerary::{DaySchedule, Itinerary, RouteStop, ScheduleItem};
pub use route::{Route, RouteQuery};
