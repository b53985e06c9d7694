use crate::model::exchange_date::{DateTimeInput, ExchangeDate};
use crate::repository::exchange_date_repo::ExchangeDateRepository;
use crate::util::error::ServiceError;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

#[async_trait]
pub trait ExchangeDateService: Send + Sync {
    /// Replaces the shared exchange date. `None` stores a record without a date.
    async fn set_exchange_date(&self, input: Option<DateTimeInput>) -> Result<ExchangeDate, ServiceError>;
    async fn get_exchange_date(&self) -> Result<Option<ExchangeDate>, ServiceError>;
}

pub struct ExchangeDateServiceImpl {
    pub exchange_date_repo: Arc<dyn ExchangeDateRepository>,
}

impl ExchangeDateServiceImpl {
    pub fn new(exchange_date_repo: Arc<dyn ExchangeDateRepository>) -> Self {
        Self { exchange_date_repo }
    }
}

#[async_trait]
impl ExchangeDateService for ExchangeDateServiceImpl {
    async fn set_exchange_date(&self, input: Option<DateTimeInput>) -> Result<ExchangeDate, ServiceError> {
        let date_time = match input {
            Some(input) => Some(input.resolve().ok_or_else(|| {
                warn!("Rejected exchange date {}", input);
                ServiceError::InvalidInput(format!("Invalid dateTime: {}", input))
            })?),
            None => None,
        };
        let record = self.exchange_date_repo.set(date_time).await?;
        info!(date_time = ?record.date_time(), "Exchange date updated");
        Ok(record)
    }

    async fn get_exchange_date(&self) -> Result<Option<ExchangeDate>, ServiceError> {
        Ok(self.exchange_date_repo.get().await?)
    }
}
