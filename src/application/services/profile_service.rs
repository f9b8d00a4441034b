//! Profile editing and avatar management.

use std::sync::Arc;

use serde_json::json;
use uuid::Uuid;

use crate::application::in_flight::{InFlight, Operation};
use crate::domain::entities::{Profile, ProfileDraft};
use crate::domain::policy::{normalize_profile, validate_avatar};
use crate::domain::repositories::{AvatarStorage, Notification, Notifier, ProfileRepository};
use crate::error::AppError;

/// Service for the profile editor.
///
/// Every update is normalized in full before a single persistence call, so a
/// failure leaves the stored profile unchanged.
pub struct ProfileService {
    profiles: Arc<dyn ProfileRepository>,
    avatars: Arc<dyn AvatarStorage>,
    notifier: Arc<dyn Notifier>,
    in_flight: InFlight,
}

impl ProfileService {
    pub fn new(
        profiles: Arc<dyn ProfileRepository>,
        avatars: Arc<dyn AvatarStorage>,
        notifier: Arc<dyn Notifier>,
        in_flight: InFlight,
    ) -> Self {
        Self {
            profiles,
            avatars,
            notifier,
            in_flight,
        }
    }

    /// Loads the account's profile.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the account has no profile.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_profile(&self, account_id: Uuid) -> Result<Profile, AppError> {
        self.profiles
            .find(account_id)
            .await?
            .ok_or_else(|| AppError::not_found("No profile found", json!({ "account_id": account_id })))
    }

    /// Normalizes and saves a profile form.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the account has no profile.
    /// Returns [`AppError::Conflict`] for a taken username or custom URL, or a
    /// duplicate submission.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn update_profile(
        &self,
        account_id: Uuid,
        draft: &ProfileDraft,
    ) -> Result<Profile, AppError> {
        let _permit = self.in_flight.begin(account_id, Operation::ProfileUpdate)?;

        let record = normalize_profile(draft);

        let profile = self.report(
            account_id,
            "Error updating profile",
            self.profiles.update(account_id, record).await,
        )?;

        self.notifier.notify(Notification::info(
            "Profile updated",
            "Your profile has been successfully updated.",
        ));
        Ok(profile)
    }

    /// Validates and stores a new avatar, then records its URL.
    ///
    /// Size and type are checked before storage is touched.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a file over 5 MiB or an unsupported type.
    /// Returns [`AppError::Conflict`] for a duplicate upload in flight.
    /// Returns [`AppError::Internal`] if storage fails or on database errors.
    pub async fn upload_avatar(
        &self,
        account_id: Uuid,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<Profile, AppError> {
        let format = validate_avatar(content_type, bytes.len())?;
        let _permit = self.in_flight.begin(account_id, Operation::AvatarUpload)?;

        let Some(url) = self.avatars.upload(account_id, format, bytes).await else {
            self.notifier.notify(Notification::error(
                "Error uploading avatar",
                "The image could not be stored. Please try again.",
            ));
            return Err(AppError::internal(
                "Failed to store avatar",
                json!({ "account_id": account_id }),
            ));
        };

        let profile = self.report(
            account_id,
            "Error uploading avatar",
            self.profiles.set_avatar_url(account_id, Some(url)).await,
        )?;
        self.notifier.notify(Notification::info(
            "Avatar updated",
            "Your new profile picture is live.",
        ));
        Ok(profile)
    }

    /// Removes the stored avatar and clears the URL.
    ///
    /// The URL is only cleared once storage reports success.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] for a duplicate request in flight.
    /// Returns [`AppError::Internal`] if storage fails or on database errors.
    pub async fn remove_avatar(&self, account_id: Uuid) -> Result<Profile, AppError> {
        let _permit = self.in_flight.begin(account_id, Operation::AvatarUpload)?;

        if !self.avatars.remove(account_id).await {
            self.notifier.notify(Notification::error(
                "Error removing avatar",
                "The image could not be removed. Please try again.",
            ));
            return Err(AppError::internal(
                "Failed to remove avatar",
                json!({ "account_id": account_id }),
            ));
        }

        self.report(
            account_id,
            "Error removing avatar",
            self.profiles.set_avatar_url(account_id, None).await,
        )
    }

    /// Logs and sends an error notification for failed persistence calls.
    fn report<T>(
        &self,
        account_id: Uuid,
        title: &str,
        result: Result<T, AppError>,
    ) -> Result<T, AppError> {
        if let Err(e) = &result {
            tracing::warn!(%account_id, error = %e, "{}", title);
            self.notifier
                .notify(Notification::error(title, e.message().to_string()));
        }
        result
    }
}
