//! Outbound capabilities used by registration and ordering.
//!
//! The bundled implementations are stubs that log and report success; real
//! gateways plug in by implementing the traits.

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum IntegrationError {
    #[error("{0} unavailable: {1}")]
    Unavailable(&'static str, String),
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// `Ok(false)` means the charge was declined.
    async fn process_payment(&self, amount: Decimal) -> Result<bool, IntegrationError>;
}

#[async_trait]
pub trait SmsSender: Send + Sync {
    async fn send_verification(&self, phone: &str) -> Result<bool, IntegrationError>;
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify_new_order(&self, order_id: i32) -> Result<(), IntegrationError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct StubPaymentGateway;

#[async_trait]
impl PaymentGateway for StubPaymentGateway {
    async fn process_payment(&self, amount: Decimal) -> Result<bool, IntegrationError> {
        info!(%amount, "payment_stub_charged");
        Ok(true)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct StubSmsSender;

#[async_trait]
impl SmsSender for StubSmsSender {
    async fn send_verification(&self, phone: &str) -> Result<bool, IntegrationError> {
        info!(phone, "sms_stub_sent");
        Ok(true)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify_new_order(&self, order_id: i32) -> Result<(), IntegrationError> {
        info!(order_id, "dispatcher_notified");
        Ok(())
    }
}

/// Bundle handed to the services at startup.
#[derive(Clone)]
pub struct Integrations {
    pub payment: Arc<dyn PaymentGateway>,
    pub sms: Arc<dyn SmsSender>,
    pub notifier: Arc<dyn Notifier>,
}

impl Integrations {
    pub fn stubs() -> Self {
        Self {
            payment: Arc::new(StubPaymentGateway),
            sms: Arc::new(StubSmsSender),
            notifier: Arc::new(LogNotifier),
        }
    }
}

impl Default for Integrations {
    fn default() -> Self { Self::stubs() }
}

/// Test doubles with scripted outcomes.
pub mod fake {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Declines (or errors on) every charge and counts attempts.
    #[derive(Debug, Default)]
    pub struct DecliningPaymentGateway {
        pub fail_hard: bool,
        pub attempts: AtomicUsize,
    }

    #[async_trait]
    impl PaymentGateway for DecliningPaymentGateway {
        async fn process_payment(&self, _amount: Decimal) -> Result<bool, IntegrationError> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            if self.fail_hard {
                return Err(IntegrationError::Unavailable("payment gateway", "connection refused".into()));
            }
            Ok(false)
        }
    }

    #[derive(Debug, Default, Clone, Copy)]
    pub struct FailingSmsSender;

    #[async_trait]
    impl SmsSender for FailingSmsSender {
        async fn send_verification(&self, _phone: &str) -> Result<bool, IntegrationError> {
            Err(IntegrationError::Unavailable("sms", "timeout".into()))
        }
    }

    #[derive(Debug, Default, Clone, Copy)]
    pub struct FailingNotifier;

    #[async_trait]
    impl Notifier for FailingNotifier {
        async fn notify_new_order(&self, _order_id: i32) -> Result<(), IntegrationError> {
            Err(IntegrationError::Unavailable("notifier", "queue full".into()))
        }
    }
}
