use crate::model::exchange_date::{DateTimeInput, ExchangeDate};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SetExchangeDateRequest {
    pub date_time: Option<DateTimeInput>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeDateResponse {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_time: Option<DateTime<Utc>>,
}

impl From<ExchangeDate> for ExchangeDateResponse {
    fn from(record: ExchangeDate) -> Self {
        ExchangeDateResponse { date_time: record.date_time(), id: record.id }
    }
}
