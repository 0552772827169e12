use std::sync::Arc;

use crate::{
    auth::policy::{
        decide, looks_like_email, normalize_identity, AccessDecision, AccessSnapshot,
        AdminIdentity,
    },
    errors::{AppError, AppResult},
    models::{
        domain::{AccessSettings, AllowListEntry},
        dto::response::AccessStatusDto,
    },
    repositories::{AccessSettingsRepository, AllowListRepository},
};

/// Owns the allow-list and the global allow-all flag. Every check reads the
/// store, so admin changes are visible to the very next request.
pub struct AccessService {
    admin: AdminIdentity,
    allow_list: Arc<dyn AllowListRepository>,
    settings: Arc<dyn AccessSettingsRepository>,
}

impl AccessService {
    pub fn new(
        admin: AdminIdentity,
        allow_list: Arc<dyn AllowListRepository>,
        settings: Arc<dyn AccessSettingsRepository>,
    ) -> Self {
        Self {
            admin,
            allow_list,
            settings,
        }
    }

    pub fn is_admin(&self, identity: &str) -> bool {
        self.admin.matches(identity)
    }

    pub async fn is_authorized(&self, identity: &str) -> bool {
        self.check_access(identity).await.is_granted()
    }

    /// Store failures deny access rather than surfacing an error.
    pub async fn check_access(&self, identity: &str) -> AccessDecision {
        let identity = normalize_identity(identity);
        if identity.is_empty() {
            return AccessDecision::DENIED;
        }
        if self.admin.matches(&identity) {
            return decide(&identity, &self.admin, AccessSnapshot::default());
        }

        match self.snapshot(&identity).await {
            Ok(snapshot) => decide(&identity, &self.admin, snapshot),
            Err(e) => {
                log::error!("Access check for '{}' failed closed: {}", identity, e);
                AccessDecision::DENIED
            }
        }
    }

    pub async fn access_status(&self, identity: &str) -> AccessStatusDto {
        let decision = self.check_access(identity).await;
        AccessStatusDto {
            email: normalize_identity(identity),
            is_admin: self.is_admin(identity),
            authorized: decision.is_granted(),
            reason: decision.reason,
        }
    }

    async fn snapshot(&self, identity: &str) -> AppResult<AccessSnapshot> {
        let allow_all = self.get_allow_all().await?;
        if allow_all {
            return Ok(AccessSnapshot {
                allow_all,
                allow_listed: false,
            });
        }
        let allow_listed = self.allow_list.exists(identity).await?;
        Ok(AccessSnapshot {
            allow_all,
            allow_listed,
        })
    }

    pub async fn list_authorized(&self) -> AppResult<Vec<String>> {
        let entries = self.allow_list.find_all().await?;
        Ok(entries.into_iter().map(|e| e.identity).collect())
    }

    pub async fn list_entries(&self) -> AppResult<Vec<AllowListEntry>> {
        self.allow_list.find_all().await
    }

    pub async fn add_user(&self, identity: &str, requested_by: &str) -> AppResult<AllowListEntry> {
        let requested_by = self.require_admin(requested_by)?;

        let identity = normalize_identity(identity);
        if !looks_like_email(&identity) {
            return Err(AppError::InvalidInput("Invalid email format".to_string()));
        }

        let entry = self
            .allow_list
            .upsert(AllowListEntry::new(&identity, &requested_by))
            .await?;

        log::info!("'{}' added '{}' to the allow-list", requested_by, identity);
        Ok(entry)
    }

    pub async fn remove_user(&self, identity: &str, requested_by: &str) -> AppResult<()> {
        let requested_by = self.require_admin(requested_by)?;

        let identity = normalize_identity(identity);
        if self.admin.matches(&identity) {
            return Err(AppError::ForbiddenOperation(
                "Cannot remove the admin account".to_string(),
            ));
        }

        let removed = self.allow_list.delete(&identity).await?;
        if removed {
            log::info!("'{}' removed '{}' from the allow-list", requested_by, identity);
        } else {
            log::debug!("'{}' was not on the allow-list", identity);
        }
        Ok(())
    }

    pub async fn set_allow_all(&self, allow_all: bool, requested_by: &str) -> AppResult<bool> {
        let requested_by = self.require_admin(requested_by)?;

        let settings = self
            .settings
            .save(AccessSettings::new(allow_all, &requested_by))
            .await?;

        log::warn!("'{}' set allowAll to {}", requested_by, settings.allow_all);
        Ok(settings.allow_all)
    }

    pub async fn get_allow_all(&self) -> AppResult<bool> {
        let settings = self.settings.get().await?.unwrap_or_default();
        Ok(settings.allow_all)
    }

    fn require_admin(&self, requested_by: &str) -> AppResult<String> {
        if !self.admin.matches(requested_by) {
            log::warn!("Rejected admin action requested by '{}'", requested_by);
            return Err(AppError::Unauthorized(
                "You are not authorized to perform this action".to_string(),
            ));
        }
        Ok(normalize_identity(requested_by))
    }
}
