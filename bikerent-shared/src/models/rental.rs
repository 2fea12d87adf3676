use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Wire format for calendar dates on the rental API
pub const WIRE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Body of `POST /bikes/rent`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub bike_id: i64,
    pub user_id: i64,
    pub date_from: String,
    pub date_to: String,
}

impl BookingRequest {
    pub fn new(bike_id: i64, user_id: i64, date_from: NaiveDate, date_to: NaiveDate) -> Self {
        Self {
            bike_id,
            user_id,
            date_from: date_from.format(WIRE_DATE_FORMAT).to_string(),
            date_to: date_to.format(WIRE_DATE_FORMAT).to_string(),
        }
    }

    /// Parsed `(date_from, date_to)`, `None` if either is malformed
    pub fn dates(&self) -> Option<(NaiveDate, NaiveDate)> {
        let from = NaiveDate::parse_from_str(&self.date_from, WIRE_DATE_FORMAT).ok()?;
        let to = NaiveDate::parse_from_str(&self.date_to, WIRE_DATE_FORMAT).ok()?;
        Some((from, to))
    }
}

/// Amounts confirmed by the rental service
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub rent_amount: f64,
    pub fee: f64,
    pub total_amount: f64,
}

/// Structured rejection returned by the rental service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BookingErrorPayload {
    pub error_type: String,
    pub message: String,
}

impl BookingErrorPayload {
    pub fn new(error_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_type: error_type.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_format() {
        let from = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let request = BookingRequest::new(7, 1921, from, to);

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "bikeId": 7,
                "userId": 1921,
                "dateFrom": "2024-06-01",
                "dateTo": "2024-06-03"
            })
        );
        assert_eq!(request.dates(), Some((from, to)));
    }

    #[test]
    fn test_malformed_request_dates() {
        let request = BookingRequest {
            bike_id: 1,
            user_id: 1,
            date_from: "06/01/2024".to_string(),
            date_to: "2024-06-03".to_string(),
        };
        assert!(request.dates().is_none());
    }

    #[test]
    fn test_error_payload_from_json() {
        let payload: BookingErrorPayload = serde_json::from_str(
            r#"{"errorType":"Conflict","message":"Bike unavailable"}"#,
        )
        .unwrap();
        assert_eq!(payload, BookingErrorPayload::new("Conflict", "Bike unavailable"));
    }
}
