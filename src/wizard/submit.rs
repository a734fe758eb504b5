//! Submission endpoint for completed inquiries

use crate::state::{is_valid_email, InquiryFields};
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("inquiry was rejected: {0}")]
    Rejected(String),
    #[error("no response within {0:?}")]
    TimedOut(Duration),
}

/// Receiver of submitted inquiries. Single completion, no partial responses.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionEndpoint: Send + Sync {
    async fn send(&self, fields: &InquiryFields) -> Result<(), SubmitError>;
}

/// Logs each inquiry and acknowledges it after a simulated round trip.
/// Inquiries without a usable contact email are rejected.
#[derive(Debug, Clone)]
pub struct LogEndpoint {
    latency: Duration,
}

impl LogEndpoint {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

#[async_trait]
impl SubmissionEndpoint for LogEndpoint {
    async fn send(&self, fields: &InquiryFields) -> Result<(), SubmitError> {
        if !is_valid_email(&fields.email) {
            return Err(SubmitError::Rejected("a valid contact email is required".to_string()));
        }
        let reference = Uuid::new_v4();
        tracing::info!(
            %reference,
            company = %fields.company_name,
            contact = %fields.contact_person,
            email = %fields.email,
            business_type = %fields.business_type,
            fabric_types = ?fields.fabric_types,
            "Quote request received"
        );
        tokio::time::sleep(self.latency).await;
        tracing::debug!(%reference, "Quote request acknowledged");
        Ok(())
    }
}

/// Send with an upper bound on how long the endpoint may take
pub async fn send_with_timeout(
    endpoint: &dyn SubmissionEndpoint,
    fields: &InquiryFields,
    timeout: Duration,
) -> Result<(), SubmitError> {
    match tokio::time::timeout(timeout, endpoint.send(fields)).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!("Submission timed out after {timeout:?}");
            Err(SubmitError::TimedOut(timeout))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inquiry() -> InquiryFields {
        InquiryFields {
            company_name: "Acme".to_string(),
            email: "buyer@acme.com".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_log_endpoint_acknowledges() {
        let endpoint = LogEndpoint::new(Duration::from_millis(500));
        let result = endpoint.send(&inquiry()).await;
        assert_eq!(result, Ok(()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_log_endpoint_rejects_missing_email() {
        let endpoint = LogEndpoint::new(Duration::from_millis(500));
        let result = endpoint.send(&InquiryFields::default()).await;
        assert!(matches!(result, Err(SubmitError::Rejected(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_turns_slow_send_into_error() {
        let endpoint = LogEndpoint::new(Duration::from_secs(60));
        let result = send_with_timeout(&endpoint, &inquiry(), Duration::from_secs(5)).await;
        assert_eq!(result, Err(SubmitError::TimedOut(Duration::from_secs(5))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fast_send_passes_through_timeout() {
        let endpoint = LogEndpoint::new(Duration::from_millis(10));
        let result = send_with_timeout(&endpoint, &inquiry(), Duration::from_secs(5)).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_endpoint_error_passes_through_timeout() {
        let mut endpoint = MockSubmissionEndpoint::new();
        endpoint
            .expect_send()
            .times(1)
            .returning(|_| Err(SubmitError::Rejected("spam filter".to_string())));
        let result =
            send_with_timeout(&endpoint, &InquiryFields::default(), Duration::from_secs(5)).await;
        assert_eq!(
            result,
            Err(SubmitError::Rejected("spam filter".to_string()))
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            SubmitError::TimedOut(Duration::from_secs(30)).to_string(),
            "no response within 30s"
        );
    }
}
