//! Itinerary parsing and validation
//!
//! The sanitized model output is read into a generic JSON tree first so a
//! missing field and a field of the wrong type produce different errors,
//! each naming the JSON path of the offending value.
//!
//! Structural fields (`days`, `schedule`, `routeList`, every `day`, every
//! `items` list and the stop coordinates) are required. Descriptive strings
//! default to empty when absent or not strings.

use domain::{DaySchedule, DomainError, GeoPoint, Itinerary, RouteStop, ScheduleItem};
use serde_json::{Map, Value};

/// Parse sanitized model output into an [`Itinerary`]
///
/// Parsing is all-or-nothing: the first invalid record aborts the parse.
///
/// # Errors
///
/// - [`DomainError::UnsanitizableModelOutput`] when the text is not a JSON
///   object
/// - [`DomainError::MissingRequiredField`] when a structural field is
///   absent or null
/// - [`DomainError::InvalidFieldType`] when a structural field has the wrong
///   type, `days` is below one, or a required list is empty
/// - [`DomainError::InvalidCoordinateValue`] when a stop's longitude or
///   latitude is not a finite number in range
pub fn parse_itinerary(sanitized_json: &str) -> Result<Itinerary, DomainError> {
    let root: Value = serde_json::from_str(sanitized_json)
        .map_err(|e| DomainError::UnsanitizableModelOutput(e.to_string()))?;
    let Value::Object(fields) = &root else {
        return Err(DomainError::UnsanitizableModelOutput(format!(
            "expected a JSON object, found {}",
            json_kind(&root)
        )));
    };
    let root = Record::new(fields, String::new());

    let trip_name = root.required_str("tripName")?;
    let days = root.required_u32("days")?;
    if days == 0 {
        return Err(DomainError::invalid_type("days", "integer >= 1"));
    }

    let schedule = root.required_list("schedule")?;
    let route_list = root.required_list("routeList")?;

    let daily_schedules = records(schedule, "schedule")?
        .iter()
        .map(parse_day_schedule)
        .collect::<Result<Vec<_>, _>>()?;

    let route_stops = records(route_list, "routeList")?
        .iter()
        .map(parse_route_stop)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Itinerary {
        trip_name,
        days,
        daily_schedules,
        route_stops,
        raw_source: sanitized_json.to_string(),
    })
}

fn parse_day_schedule(record: &Record<'_>) -> Result<DaySchedule, DomainError> {
    let day = record.required_u32("day")?;
    let items = records(record.required_list("items")?, &record.path_of("items"))?
        .iter()
        .map(|item| ScheduleItem {
            time_slot: item.text("timeSlot"),
            place_name: item.text("scenicName"),
            place_address: item.text("scenicAddress"),
            description: item.text("description"),
            tips: item.text("tips"),
        })
        .collect();

    Ok(DaySchedule { day, items })
}

fn parse_route_stop(record: &Record<'_>) -> Result<RouteStop, DomainError> {
    let day = record.required_u32("day")?;
    let longitude = record.coordinate("longitude")?;
    let latitude = record.coordinate("latitude")?;
    let location = GeoPoint::from_lng_lat(longitude, latitude).map_err(|_| {
        DomainError::InvalidCoordinateValue {
            path: record.path.clone(),
            value: format!("{longitude},{latitude}"),
        }
    })?;

    Ok(RouteStop {
        day,
        place_name: record.text("name"),
        place_address: record.text("address"),
        location,
        start_time: record.text("startTime"),
        end_time: record.text("endTime"),
        description: record.text("description"),
    })
}

/// A JSON object together with its path from the document root
struct Record<'a> {
    fields: &'a Map<String, Value>,
    path: String,
}

impl<'a> Record<'a> {
    const fn new(fields: &'a Map<String, Value>, path: String) -> Self {
        Self { fields, path }
    }

    fn path_of(&self, key: &str) -> String {
        if self.path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{key}", self.path)
        }
    }

    /// A field that is present and not null
    fn present(&self, key: &str) -> Result<&'a Value, DomainError> {
        match self.fields.get(key) {
            None | Some(Value::Null) => Err(DomainError::missing_field(self.path_of(key))),
            Some(value) => Ok(value),
        }
    }

    fn required_str(&self, key: &str) -> Result<String, DomainError> {
        self.present(key)?
            .as_str()
            .map(ToString::to_string)
            .ok_or_else(|| DomainError::invalid_type(self.path_of(key), "string"))
    }

    fn required_u32(&self, key: &str) -> Result<u32, DomainError> {
        self.present(key)?
            .as_u64()
            .and_then(|value| u32::try_from(value).ok())
            .ok_or_else(|| DomainError::invalid_type(self.path_of(key), "non-negative integer"))
    }

    fn required_list(&self, key: &str) -> Result<&'a [Value], DomainError> {
        let Value::Array(values) = self.present(key)? else {
            return Err(DomainError::invalid_type(self.path_of(key), "array"));
        };
        if values.is_empty() {
            return Err(DomainError::invalid_type(self.path_of(key), "non-empty array"));
        }
        Ok(values)
    }

    /// A descriptive string, empty when absent or not a string
    fn text(&self, key: &str) -> String {
        self.fields
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    }

    /// A coordinate given as a JSON number or a numeric string
    fn coordinate(&self, key: &str) -> Result<f64, DomainError> {
        let value = self.present(key)?;
        let parsed = match value {
            Value::Number(number) => number.as_f64(),
            Value::String(text) => text.trim().parse::<f64>().ok(),
            _ => None,
        };

        parsed
            .filter(|number| number.is_finite())
            .ok_or_else(|| DomainError::InvalidCoordinateValue {
                path: self.path_of(key),
                value: value.to_string(),
            })
    }
}

fn records<'a>(values: &'a [Value], path: &str) -> Result<Vec<Record<'a>>, DomainError> {
    values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            let entry_path = format!("{path}[{index}]");
            match value {
                Value::Object(fields) => Ok(Record::new(fields, entry_path)),
                _ => Err(DomainError::invalid_type(entry_path, "object")),
            }
        })
        .collect()
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
