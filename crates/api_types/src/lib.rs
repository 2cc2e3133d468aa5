use serde::{Deserialize, Serialize};

/// Uniform wrapper applied to every API response.
///
/// `data` is omitted from the JSON body when absent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn new(code: u16, message: impl Into<String>, data: T) -> Self {
        Self {
            code,
            message: message.into(),
            data: Some(data),
        }
    }

    /// Envelope without a payload.
    pub fn message_only(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }
}

/// A single rejected input field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

pub mod expense {
    use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer, Serialize};

    /// External shape of an expense, as sent and received over HTTP.
    ///
    /// `amount` is serialized as a decimal string (e.g. `"50.00"`).
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ExpenseView {
        pub id: Option<i64>,
        pub description: String,
        pub amount: Decimal,
        pub category: String,
        pub created_at: Option<DateTime<Utc>>,
        pub updated_at: Option<DateTime<Utc>>,
        pub user_id: Option<String>,
    }

    /// Request body of create and update.
    ///
    /// Every field is optional at the JSON level so that missing values are
    /// reported by validation instead of a deserialization failure.
    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase", default)]
    pub struct ExpensePayload {
        pub id: Option<i64>,
        pub description: Option<String>,
        pub amount: Option<Decimal>,
        pub category: Option<String>,
        #[serde(deserialize_with = "iso_datetime")]
        pub created_at: Option<DateTime<Utc>>,
        #[serde(deserialize_with = "iso_datetime")]
        pub updated_at: Option<DateTime<Utc>>,
        pub user_id: Option<String>,
    }

    /// Any ISO-8601 datetime. Values without an offset are read as UTC, a
    /// bare date as midnight UTC.
    fn iso_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Some(raw) = Option::<String>::deserialize(deserializer)? else {
            return Ok(None);
        };
        if let Ok(at) = DateTime::parse_from_rfc3339(&raw) {
            return Ok(Some(at.with_timezone(&Utc)));
        }
        if let Ok(naive) = raw.parse::<NaiveDateTime>() {
            return Ok(Some(naive.and_utc()));
        }
        raw.parse::<NaiveDate>()
            .map(|date| Some(date.and_time(NaiveTime::MIN).and_utc()))
            .map_err(serde::de::Error::custom)
    }
}
