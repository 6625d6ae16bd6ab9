use std::sync::Arc;

use models::user;
use tracing::{debug, info, instrument, warn};

use super::domain::{RegisterInput, UserChanges};
use super::repository::UserRepository;
use crate::errors::ServiceError;
use crate::integrations::SmsSender;
use crate::patch::Patch;

/// User registration service independent of web framework
pub struct RegistrationService<R: UserRepository> {
    repo: Arc<R>,
    sms: Arc<dyn SmsSender>,
}

impl<R: UserRepository> RegistrationService<R> {
    pub fn new(repo: Arc<R>, sms: Arc<dyn SmsSender>) -> Self { Self { repo, sms } }

    /// Send the verification SMS, then reconcile the identity.
    ///
    /// An SMS failure is logged and does not block registration.
    ///
    /// # Examples
    /// ```
    /// use service::registration::{RegistrationService, domain::RegisterInput, repository::mock::MockUserRepository};
    /// use service::integrations::StubSmsSender;
    /// use std::sync::Arc;
    /// let svc = RegistrationService::new(Arc::new(MockUserRepository::default()), Arc::new(StubSmsSender));
    /// let input = RegisterInput { phone_number: "+998900000001".into(), telegram_id: None, language_code: None };
    /// let first = tokio_test::block_on(svc.register(input.clone())).unwrap();
    /// let again = tokio_test::block_on(svc.register(input)).unwrap();
    /// assert_eq!(first, again);
    /// ```
    #[instrument(skip(self, input), fields(phone = %input.phone_number, telegram_id = ?input.telegram_id))]
    pub async fn register(&self, input: RegisterInput) -> Result<i32, ServiceError> {
        let phone = user::validate_phone(&input.phone_number)?;
        match self.sms.send_verification(&phone).await {
            Ok(true) => {}
            Ok(false) => warn!(phone = %phone, "sms_verification_rejected"),
            Err(e) => warn!(phone = %phone, error = %e, "sms_verification_failed"),
        }
        self.reconcile(&phone, input.telegram_id, input.language_code.as_deref()).await
    }

    /// Map `(phone, telegram_id?, language?)` onto exactly one user and return its id.
    ///
    /// Phone wins: a telegram id held by another user is cleared from that
    /// user before being attached here. When a concurrent request inserts the
    /// same phone first, the lookup is repeated once against the stored row.
    ///
    /// # Examples
    /// ```
    /// use service::registration::{RegistrationService, repository::mock::MockUserRepository};
    /// use service::integrations::StubSmsSender;
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockUserRepository::default());
    /// let svc = RegistrationService::new(repo.clone(), Arc::new(StubSmsSender));
    /// let u2 = tokio_test::block_on(svc.reconcile("+998900000002", Some(555), None)).unwrap();
    /// let u3 = tokio_test::block_on(svc.reconcile("+998900000003", Some(555), None)).unwrap();
    /// assert_ne!(u2, u3);
    /// let users = repo.users();
    /// assert_eq!(users.iter().find(|u| u.id == u2).unwrap().telegram_id, None);
    /// assert_eq!(users.iter().find(|u| u.id == u3).unwrap().telegram_id, Some(555));
    /// ```
    #[instrument(skip(self))]
    pub async fn reconcile(&self, phone: &str, telegram_id: Option<i64>, language_code: Option<&str>) -> Result<i32, ServiceError> {
        let phone = user::validate_phone(phone)?;
        let language_code = language_code.map(user::validate_language_code).transpose()?;

        match self.reconcile_once(&phone, telegram_id, language_code.as_deref()).await {
            Err(ServiceError::Conflict(reason)) => {
                warn!(phone = %phone, %reason, "registration_conflict_retrying");
                self.reconcile_once(&phone, telegram_id, language_code.as_deref()).await
            }
            other => other,
        }
    }

    async fn reconcile_once(&self, phone: &str, telegram_id: Option<i64>, language_code: Option<&str>) -> Result<i32, ServiceError> {
        let by_phone = self.repo.find_by_phone(phone).await?;

        if let Some(tg) = telegram_id {
            if let Some(holder) = self.repo.find_by_telegram_id(tg).await? {
                if by_phone.as_ref().map(|u| u.id) != Some(holder.id) {
                    self.repo
                        .update(holder.id, UserChanges { telegram_id: Patch::Null, ..Default::default() })
                        .await?;
                    info!(from_user_id = holder.id, telegram_id = tg, "telegram_id_released");
                }
            }
        }

        if let Some(existing) = by_phone {
            let mut changes = UserChanges::default();
            if let Some(tg) = telegram_id {
                if existing.telegram_id != Some(tg) {
                    changes.telegram_id = Patch::Value(tg);
                }
            }
            if let Some(lang) = language_code {
                if existing.language_code.as_deref() != Some(lang) {
                    changes.language_code = Patch::Value(lang.to_string());
                }
            }
            if changes.is_empty() {
                debug!(user_id = existing.id, "user_unchanged");
            } else {
                self.repo.update(existing.id, changes).await?;
                info!(user_id = existing.id, "user_updated");
            }
            return Ok(existing.id);
        }

        let created = self.repo.insert(phone, telegram_id, language_code).await?;
        info!(user_id = created.id, "user_registered");
        Ok(created.id)
    }

    #[instrument(skip(self))]
    pub async fn find_by_telegram_id(&self, telegram_id: i64) -> Result<user::Model, ServiceError> {
        self.repo
            .find_by_telegram_id(telegram_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("User with telegram_id {telegram_id} not found")))
    }

    #[instrument(skip(self))]
    pub async fn update_language(&self, user_id: i32, language_code: &str) -> Result<user::Model, ServiceError> {
        let language_code = user::validate_language_code(language_code)?;
        if self.repo.find_by_id(user_id).await?.is_none() {
            return Err(ServiceError::not_found("User", user_id));
        }
        let updated = self
            .repo
            .update(user_id, UserChanges { language_code: Patch::Value(language_code), ..Default::default() })
            .await?;
        info!(user_id, language_code = ?updated.language_code, "language_updated");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integrations::{fake::FailingSmsSender, StubSmsSender};
    use crate::registration::repository::mock::MockUserRepository;

    fn svc() -> (Arc<MockUserRepository>, RegistrationService<MockUserRepository>) {
        let repo = Arc::new(MockUserRepository::default());
        (repo.clone(), RegistrationService::new(repo, Arc::new(StubSmsSender)))
    }

    fn input(phone: &str, telegram_id: Option<i64>, language_code: Option<&str>) -> RegisterInput {
        RegisterInput { phone_number: phone.into(), telegram_id, language_code: language_code.map(Into::into) }
    }

    #[tokio::test]
    async fn same_phone_returns_same_user() {
        let (repo, svc) = svc();
        let u1 = svc.register(input("+998900000001", None, None)).await.unwrap();
        let again = svc.register(input("+998900000001", None, None)).await.unwrap();
        assert_eq!(u1, again);
        assert_eq!(repo.users().len(), 1);
    }

    #[tokio::test]
    async fn telegram_id_moves_to_new_phone() {
        let (repo, svc) = svc();
        let u2 = svc.register(input("+998900000002", Some(555), None)).await.unwrap();
        let u3 = svc.register(input("+998900000003", Some(555), None)).await.unwrap();
        assert_ne!(u2, u3);

        let users = repo.users();
        let old = users.iter().find(|u| u.id == u2).unwrap();
        let new = users.iter().find(|u| u.id == u3).unwrap();
        assert_eq!(old.telegram_id, None);
        assert_eq!(new.telegram_id, Some(555));
        assert_eq!(new.phone_number, "+998900000003");
    }

    #[tokio::test]
    async fn telegram_id_moves_to_existing_phone() {
        let (repo, svc) = svc();
        let a = svc.register(input("+998900000010", Some(42), None)).await.unwrap();
        let b = svc.register(input("+998900000011", None, None)).await.unwrap();
        let got = svc.register(input("+998900000011", Some(42), Some("ru"))).await.unwrap();
        assert_eq!(got, b);

        let users = repo.users();
        assert_eq!(users.iter().find(|u| u.id == a).unwrap().telegram_id, None);
        let b_row = users.iter().find(|u| u.id == b).unwrap();
        assert_eq!(b_row.telegram_id, Some(42));
        assert_eq!(b_row.language_code.as_deref(), Some("ru"));
    }

    #[tokio::test]
    async fn re_registration_updates_language_only_when_given() {
        let (repo, svc) = svc();
        let id = svc.register(input("+998900000020", Some(7), Some("uz"))).await.unwrap();
        svc.register(input("+998900000020", None, None)).await.unwrap();
        let row = repo.users().into_iter().find(|u| u.id == id).unwrap();
        assert_eq!(row.telegram_id, Some(7));
        assert_eq!(row.language_code.as_deref(), Some("uz"));

        svc.register(input("+998900000020", None, Some("en"))).await.unwrap();
        let row = repo.users().into_iter().find(|u| u.id == id).unwrap();
        assert_eq!(row.language_code.as_deref(), Some("en"));
    }

    #[tokio::test]
    async fn phone_is_trimmed_before_lookup() {
        let (repo, svc) = svc();
        let a = svc.register(input(" +998900000030 ", None, None)).await.unwrap();
        let b = svc.register(input("+998900000030", None, None)).await.unwrap();
        assert_eq!(a, b);
        assert_eq!(repo.users()[0].phone_number, "+998900000030");
    }

    #[tokio::test]
    async fn invalid_input_is_rejected_without_writes() {
        let (repo, svc) = svc();
        let err = svc.register(input("not-a-phone", None, None)).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        let err = svc.register(input("+998900000040", None, Some("english"))).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert!(repo.users().is_empty());
    }

    #[tokio::test]
    async fn lost_insert_race_resolves_to_stored_row() {
        let (repo, svc) = svc();
        repo.simulate_insert_races(1);
        let id = svc.register(input("+998900000050", Some(99), Some("ru"))).await.unwrap();
        let users = repo.users();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].id, id);
        assert_eq!(users[0].telegram_id, Some(99));
        assert_eq!(users[0].language_code.as_deref(), Some("ru"));
    }

    #[tokio::test]
    async fn sms_failure_does_not_block_registration() {
        let repo = Arc::new(MockUserRepository::default());
        let svc = RegistrationService::new(repo.clone(), Arc::new(FailingSmsSender));
        svc.register(input("+998900000060", None, None)).await.unwrap();
        assert_eq!(repo.users().len(), 1);
    }

    #[tokio::test]
    async fn lookup_and_language_update() {
        let (_repo, svc) = svc();
        let id = svc.register(input("+998900000070", Some(1234), None)).await.unwrap();
        assert_eq!(svc.find_by_telegram_id(1234).await.unwrap().id, id);
        assert!(matches!(svc.find_by_telegram_id(4321).await, Err(ServiceError::NotFound(_))));

        let updated = svc.update_language(id, "uz").await.unwrap();
        assert_eq!(updated.language_code.as_deref(), Some("uz"));
        assert!(matches!(svc.update_language(id + 100, "uz").await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.update_language(id, "u").await, Err(ServiceError::Validation(_))));
    }
}
