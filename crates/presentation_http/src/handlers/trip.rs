//! AI itinerary handler
//!
//! Turns a free-text travel question into the itinerary document the
//! frontend renders: a day-by-day schedule plus the stops to draw on the
//! map.

use axum::{Json, extract::State};
use domain::{DaySchedule, Itinerary, RouteStop, ScheduleItem};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::ApiError,
    middleware::ValidatedJson,
    response::ApiResponse,
    state::AppState,
};

/// Itinerary generation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({"userQuestion": "衢州两日游，喜欢自然风光"}))]
pub struct GenerateTripRequest {
    /// Free-text travel question
    #[serde(default)]
    #[validate(
        custom(function = "not_blank"),
        length(max = 2000, message = "must be at most 2000 characters")
    )]
    pub user_question: String,
}

fn not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        let mut err = validator::ValidationError::new("blank");
        err.message = Some("must not be blank".into());
        return Err(err);
    }
    Ok(())
}

/// Generated itinerary
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TripResponse {
    pub trip_name: String,
    pub days: u32,
    /// Model output the itinerary was parsed from
    pub ai_content: String,
    pub daily_schedules: Vec<DailyScheduleDto>,
    pub route_list: Vec<RouteStopDto>,
}

/// One day of the schedule
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyScheduleDto {
    pub day: u32,
    /// Display label such as `第1天`
    pub date_desc: String,
    pub schedule_items: Vec<ScheduleItemDto>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleItemDto {
    pub time_slot: String,
    pub scenic_name: String,
    pub scenic_address: String,
    pub description: String,
    pub tips: String,
}

/// A stop to plot on the map
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RouteStopDto {
    pub day: u32,
    pub scenic_name: String,
    pub scenic_address: String,
    pub longitude: f64,
    pub latitude: f64,
    pub start_time: String,
    pub end_time: String,
    pub description: String,
}

impl From<ScheduleItem> for ScheduleItemDto {
    fn from(item: ScheduleItem) -> Self {
        Self {
            time_slot: item.time_slot,
            scenic_name: item.place_name,
            scenic_address: item.place_address,
            description: item.description,
            tips: item.tips,
        }
    }
}

impl From<DaySchedule> for DailyScheduleDto {
    fn from(schedule: DaySchedule) -> Self {
        Self {
            day: schedule.day,
            date_desc: schedule.label(),
            schedule_items: schedule.items.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<RouteStop> for RouteStopDto {
    fn from(stop: RouteStop) -> Self {
        Self {
            day: stop.day,
            scenic_name: stop.place_name,
            scenic_address: stop.place_address,
            longitude: stop.location.longitude(),
            latitude: stop.location.latitude(),
            start_time: stop.start_time,
            end_time: stop.end_time,
            description: stop.description,
        }
    }
}

impl From<Itinerary> for TripResponse {
    fn from(itinerary: Itinerary) -> Self {
        Self {
            trip_name: itinerary.trip_name,
            days: itinerary.days,
            ai_content: itinerary.raw_source,
            daily_schedules: itinerary
                .daily_schedules
                .into_iter()
                .map(Into::into)
                .collect(),
            route_list: itinerary.route_stops.into_iter().map(Into::into).collect(),
        }
    }
}

/// Generate an itinerary from a travel question
#[utoipa::path(
    post,
    path = "/api/ai-trip/generate",
    tag = "trip",
    request_body = GenerateTripRequest,
    responses(
        (status = 200, description = "Itinerary generated", body = ApiResponse<TripResponse>),
        (status = 400, description = "Blank or oversized question", body = crate::response::ErrorResponse),
        (status = 429, description = "Rate limited", body = crate::response::ErrorResponse),
        (status = 502, description = "Model failure or unusable output", body = crate::response::ErrorResponse)
    )
)]
#[instrument(skip(state, request), fields(question_len = request.user_question.len()))]
pub async fn generate_trip(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<GenerateTripRequest>,
) -> Result<Json<ApiResponse<TripResponse>>, ApiError> {
    let itinerary = state
        .trip_service
        .generate_trip(&request.user_question)
        .await?;

    Ok(Json(ApiResponse::success(itinerary.into())))
}

#[cfg(test)]
mod tests {
    use domain::GeoPoint;

    use super::*;

    fn request(question: &str) -> GenerateTripRequest {
        GenerateTripRequest {
            user_question: question.to_string(),
        }
    }

    #[test]
    fn question_rules() {
        assert!(request("衢州一日游").validate().is_ok());
        assert!(request("   ").validate().is_err());
        assert!(request("").validate().is_err());

        let at_limit = "游".repeat(2000);
        assert!(request(&at_limit).validate().is_ok());
        let over_limit = "游".repeat(2001);
        assert!(request(&over_limit).validate().is_err());
    }

    #[test]
    fn missing_question_defaults_to_blank() {
        let req: GenerateTripRequest = serde_json::from_str("{}").unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn itinerary_maps_to_frontend_shape() {
        let itinerary = Itinerary {
            trip_name: "衢州一日游".to_string(),
            days: 1,
            daily_schedules: vec![DaySchedule {
                day: 1,
                items: vec![ScheduleItem {
                    time_slot: "上午".to_string(),
                    place_name: "江郎山".to_string(),
                    place_address: "江山市石门镇".to_string(),
                    description: "三爿石".to_string(),
                    tips: "穿运动鞋".to_string(),
                }],
            }],
            route_stops: vec![RouteStop {
                day: 1,
                place_name: "江郎山".to_string(),
                place_address: "江山市石门镇".to_string(),
                location: GeoPoint::new_unchecked(118.6798, 28.5964),
                start_time: "08:30".to_string(),
                end_time: "12:00".to_string(),
                description: "登山".to_string(),
            }],
            raw_source: "{\"tripName\":\"衢州一日游\"}".to_string(),
        };

        let json = serde_json::to_value(TripResponse::from(itinerary)).unwrap();

        assert_eq!(json["tripName"], "衢州一日游");
        assert_eq!(json["aiContent"], "{\"tripName\":\"衢州一日游\"}");
        assert_eq!(json["dailySchedules"][0]["dateDesc"], "第1天");
        assert_eq!(json["dailySchedules"][0]["scheduleItems"][0]["scenicName"], "江郎山");
        assert_eq!(json["routeList"][0]["scenicAddress"], "江山市石门镇");
        assert_eq!(json["routeList"][0]["longitude"], 118.6798);
        assert_eq!(json["routeList"][0]["startTime"], "08:30");
    }
}
