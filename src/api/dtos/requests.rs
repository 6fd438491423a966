use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct AdminSignupRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct AdminLoginRequest {
    pub email: String,
    pub password: String,
}

/// Superset of package and ride fields as the clients send them. Numeric
/// fields arrive as JSON numbers or numeric strings, so everything is
/// optional and normalized here; the resolved variant decides what is
/// actually required.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    #[serde(alias = "type")]
    pub kind: Option<String>,
    // Common fields
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub special_requests: Option<String>,
    #[serde(default, deserialize_with = "de_opt_flex_f64")]
    pub total_amount: Option<f64>,
    // Package fields
    pub package_name: Option<String>,
    #[serde(default, deserialize_with = "de_opt_flex_i64")]
    pub package_id: Option<i64>,
    #[serde(default, deserialize_with = "de_opt_flex_i64")]
    pub travelers: Option<i64>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    // Ride fields
    pub ride_type: Option<String>,
    #[serde(default, deserialize_with = "de_opt_flex_i64")]
    pub ride_id: Option<i64>,
    pub pickup_location: Option<String>,
    pub destination: Option<String>,
    pub pickup_date: Option<String>,
    pub pickup_time: Option<String>,
    pub trip_type: Option<String>,
    #[serde(default, deserialize_with = "de_opt_flex_i64")]
    pub passengers: Option<i64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingStatusRequest {
    pub status: String,
    pub rejection_reason: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FlexibleNumber {
    Int(i64),
    Float(f64),
    Text(String),
}

fn de_opt_flex_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<FlexibleNumber>::deserialize(deserializer)? {
        None => Ok(None),
        Some(FlexibleNumber::Int(v)) => Ok(Some(v)),
        Some(FlexibleNumber::Float(v)) => Ok(Some(v as i64)),
        Some(FlexibleNumber::Text(s)) => s
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid integer: {}", s))),
    }
}

fn de_opt_flex_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<FlexibleNumber>::deserialize(deserializer)? {
        None => Ok(None),
        Some(FlexibleNumber::Int(v)) => Ok(Some(v as f64)),
        Some(FlexibleNumber::Float(v)) => Ok(Some(v)),
        Some(FlexibleNumber::Text(s)) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid number: {}", s))),
    }
}
