use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{error, info, instrument, warn};

use super::domain::{CreateOrderInput, NewOrder};
use super::repository::OrderRepository;
use crate::errors::ServiceError;
use crate::integrations::{Notifier, PaymentGateway};

pub struct OrderService<R: OrderRepository> {
    repo: Arc<R>,
    payment: Arc<dyn PaymentGateway>,
    notifier: Arc<dyn Notifier>,
}

impl<R: OrderRepository> OrderService<R> {
    pub fn new(repo: Arc<R>, payment: Arc<dyn PaymentGateway>, notifier: Arc<dyn Notifier>) -> Self {
        Self { repo, payment, notifier }
    }

    /// Create a pending order priced from the service's current base price.
    ///
    /// Checks run before payment and payment runs before the insert, so a
    /// failure at any of those steps leaves no order behind. Notification
    /// happens after commit and its failure is only logged.
    ///
    /// # Examples
    /// ```
    /// use service::ordering::{OrderService, domain::CreateOrderInput, repository::mock::MockOrderRepository};
    /// use service::integrations::{StubPaymentGateway, LogNotifier};
    /// use rust_decimal::Decimal;
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockOrderRepository::default());
    /// repo.add_user(1);
    /// repo.add_service(10, Some(Decimal::new(100_000, 0)), true);
    /// let svc = OrderService::new(repo.clone(), Arc::new(StubPaymentGateway), Arc::new(LogNotifier));
    /// let input = CreateOrderInput { user_id: 1, service_id: 10, address_text: None, scheduled_at: None, notes: None };
    /// let id = tokio_test::block_on(svc.create_order(input)).unwrap();
    /// assert_eq!(repo.orders()[0].id, id);
    /// ```
    #[instrument(skip(self, input), fields(user_id = input.user_id, service_id = input.service_id))]
    pub async fn create_order(&self, input: CreateOrderInput) -> Result<i32, ServiceError> {
        let service = self
            .repo
            .find_active_service(input.service_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Service with ID {} not found or inactive", input.service_id)))?;

        if !self.repo.user_exists(input.user_id).await? {
            return Err(ServiceError::not_found("User", input.user_id));
        }

        let amount = service.base_price.unwrap_or(Decimal::ZERO);

        match self.payment.process_payment(amount).await {
            Ok(true) => {}
            Ok(false) => {
                error!(%amount, "payment_declined");
                return Err(ServiceError::PaymentFailed("Payment processing failed".into()));
            }
            Err(e) => {
                error!(%amount, error = %e, "payment_error");
                return Err(ServiceError::PaymentFailed(e.to_string()));
            }
        }

        let created = self
            .repo
            .insert(NewOrder {
                user_id: input.user_id,
                service_id: service.id,
                total_amount: amount,
                address_text: input.address_text,
                scheduled_at: input.scheduled_at,
                notes: input.notes,
            })
            .await?;
        info!(order_id = created.id, %amount, "order_created");

        if let Err(e) = self.notifier.notify_new_order(created.id).await {
            warn!(order_id = created.id, error = %e, "order_notification_failed");
        }
        Ok(created.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integrations::fake::{DecliningPaymentGateway, FailingNotifier};
    use crate::integrations::{LogNotifier, StubPaymentGateway};
    use crate::ordering::repository::mock::MockOrderRepository;
    use models::order::OrderStatus;
    use std::sync::atomic::Ordering;

    fn input(user_id: i32, service_id: i32) -> CreateOrderInput {
        CreateOrderInput { user_id, service_id, address_text: Some("Tashkent, Chilonzor 5".into()), scheduled_at: None, notes: None }
    }

    fn repo_with_catalog() -> Arc<MockOrderRepository> {
        let repo = Arc::new(MockOrderRepository::default());
        repo.add_user(1);
        repo.add_service(10, Some(Decimal::new(100_000, 0)), true);
        repo.add_service(11, None, true);
        repo.add_service(12, Some(Decimal::new(50_000, 0)), false);
        repo
    }

    fn stub_service(repo: Arc<MockOrderRepository>) -> OrderService<MockOrderRepository> {
        OrderService::new(repo, Arc::new(StubPaymentGateway), Arc::new(LogNotifier))
    }

    #[tokio::test]
    async fn snapshots_price_and_starts_pending() {
        let repo = repo_with_catalog();
        let svc = stub_service(repo.clone());
        let id = svc.create_order(input(1, 10)).await.unwrap();

        repo.set_price(10, Some(Decimal::new(200_000, 0)));
        let order = repo.orders().into_iter().find(|o| o.id == id).unwrap();
        assert_eq!(order.total_amount, Some(Decimal::new(100_000, 0)));
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.service_id, Some(10));
        assert_eq!(order.address_text.as_deref(), Some("Tashkent, Chilonzor 5"));
    }

    #[tokio::test]
    async fn unpriced_service_costs_zero() {
        let repo = repo_with_catalog();
        let id = stub_service(repo.clone()).create_order(input(1, 11)).await.unwrap();
        assert_eq!(repo.orders()[0].id, id);
        assert_eq!(repo.orders()[0].total_amount, Some(Decimal::ZERO));
    }

    #[tokio::test]
    async fn missing_or_inactive_service_is_not_found() {
        let repo = repo_with_catalog();
        let svc = stub_service(repo.clone());
        assert!(matches!(svc.create_order(input(1, 99)).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.create_order(input(1, 12)).await, Err(ServiceError::NotFound(_))));
        assert!(repo.orders().is_empty());
    }

    #[tokio::test]
    async fn missing_user_is_not_found() {
        let repo = repo_with_catalog();
        let err = stub_service(repo.clone()).create_order(input(2, 10)).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        assert!(repo.orders().is_empty());
    }

    #[tokio::test]
    async fn declined_payment_leaves_no_order() {
        let repo = repo_with_catalog();
        let gateway = Arc::new(DecliningPaymentGateway::default());
        let svc = OrderService::new(repo.clone(), gateway.clone(), Arc::new(LogNotifier));
        let err = svc.create_order(input(1, 10)).await.unwrap_err();
        assert!(matches!(err, ServiceError::PaymentFailed(_)));
        assert_eq!(gateway.attempts.load(Ordering::SeqCst), 1);
        assert!(repo.orders().is_empty());
    }

    #[tokio::test]
    async fn payment_not_attempted_for_inactive_service() {
        let repo = repo_with_catalog();
        let gateway = Arc::new(DecliningPaymentGateway { fail_hard: true, ..Default::default() });
        let svc = OrderService::new(repo.clone(), gateway.clone(), Arc::new(LogNotifier));
        assert!(matches!(svc.create_order(input(1, 12)).await, Err(ServiceError::NotFound(_))));
        assert_eq!(gateway.attempts.load(Ordering::SeqCst), 0);

        assert!(matches!(svc.create_order(input(1, 10)).await, Err(ServiceError::PaymentFailed(_))));
        assert_eq!(gateway.attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn notification_failure_keeps_order() {
        let repo = repo_with_catalog();
        let svc = OrderService::new(repo.clone(), Arc::new(StubPaymentGateway), Arc::new(FailingNotifier));
        let id = svc.create_order(input(1, 10)).await.unwrap();
        assert_eq!(repo.orders().len(), 1);
        assert_eq!(repo.orders()[0].id, id);
    }
}
