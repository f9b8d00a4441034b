//! Link management service.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use super::SubscriptionService;
use crate::application::in_flight::{InFlight, Operation};
use crate::domain::entities::{Link, LinkDraft, SubscriptionLimits};
use crate::domain::policy::{
    LinkQuota, LinkState, SubmitMode, can_create_link, can_schedule, normalize_link,
};
use crate::domain::repositories::{LinkRepository, Notification, Notifier};
use crate::error::AppError;

/// An account's links together with the plan numbers shown beside them.
#[derive(Debug, Clone)]
pub struct LinkOverview {
    pub links: Vec<Link>,
    pub limits: SubscriptionLimits,
    pub quota: LinkQuota,
}

/// Result of a delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The user did not confirm; nothing was touched.
    Aborted,
}

/// Service for listing, creating, editing, toggling and deleting links.
///
/// Creation is gated by the account's plan: the link count is read at
/// submission time and compared against [`SubscriptionLimits::link_limit`]
/// before anything is persisted. Every mutation holds an [`InFlight`] permit
/// so a double submit is rejected instead of running twice.
pub struct LinkService {
    links: Arc<dyn LinkRepository>,
    subscriptions: Arc<SubscriptionService>,
    notifier: Arc<dyn Notifier>,
    in_flight: InFlight,
}

impl LinkService {
    pub fn new(
        links: Arc<dyn LinkRepository>,
        subscriptions: Arc<SubscriptionService>,
        notifier: Arc<dyn Notifier>,
        in_flight: InFlight,
    ) -> Self {
        Self {
            links,
            subscriptions,
            notifier,
            in_flight,
        }
    }

    /// Lists the account's links with its current quota.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_links(&self, account_id: Uuid) -> Result<LinkOverview, AppError> {
        let links = self.links.list(account_id).await?;
        let limits = self.subscriptions.limits(account_id).await;
        let quota = LinkQuota::evaluate(links.len() as i64, &limits);

        Ok(LinkOverview {
            links,
            limits,
            quota,
        })
    }

    /// Plan limits and a freshly counted quota.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn quota(&self, account_id: Uuid) -> Result<(SubscriptionLimits, LinkQuota), AppError> {
        let limits = self.subscriptions.limits(account_id).await;
        let count = self.links.count(account_id).await?;
        let quota = LinkQuota::evaluate(count, &limits);
        Ok((limits, quota))
    }

    /// Creates a link from a submitted form.
    ///
    /// # Flow
    ///
    /// 1. Reject a duplicate submission in flight
    /// 2. Count links and check the plan limit
    /// 3. Check the plan allows scheduling, if a schedule is requested
    /// 4. Normalize the form (scheduled links start inactive)
    /// 5. Persist in a single call
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Forbidden`] if the link limit is reached or the plan
    /// has no scheduling. Nothing is persisted in that case.
    /// Returns [`AppError::Validation`] for a bad form.
    /// Returns [`AppError::Conflict`] for a duplicate submission or slug.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn create_link(&self, account_id: Uuid, draft: &LinkDraft) -> Result<Link, AppError> {
        let _permit = self.in_flight.begin(account_id, Operation::LinkMutation)?;

        let limits = self.subscriptions.limits(account_id).await;
        let count = self.links.count(account_id).await?;

        if !can_create_link(count, &limits) {
            metrics::counter!("link_limit_rejections_total").increment(1);
            let quota = LinkQuota::evaluate(count, &limits);
            let hint = quota.upgrade_hint.unwrap_or_default();
            tracing::info!(%account_id, count, limit = limits.link_limit, "Link limit reached");

            return Err(AppError::forbidden(
                format!(
                    "You've reached your link limit of {} links. {}",
                    limits.link_limit, hint
                ),
                json!({ "used": count, "limit": limits.link_limit, "upgrade_hint": hint }),
            ));
        }

        if draft.requests_schedule() && !can_schedule(&limits) {
            return Err(scheduling_not_in_plan(&limits));
        }

        let record = normalize_link(draft, SubmitMode::Create, Utc::now())?;
        tracing::debug!(%account_id, state = ?LinkState::initial(&record), "Creating link");

        let link = self
            .report("Error creating link", self.links.create(account_id, record).await)?;

        metrics::counter!("links_created_total").increment(1);
        self.notifier.notify(Notification::info(
            "Link created",
            "Your link has been added to your profile.",
        ));
        Ok(link)
    }

    /// Replaces the editable fields of a link.
    ///
    /// An unscheduled form clears any stored schedule.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the link does not belong to the account.
    /// Returns [`AppError::Forbidden`] when adding a schedule without the plan feature.
    /// Returns [`AppError::Validation`] for a bad form.
    /// Returns [`AppError::Conflict`] for a duplicate submission or slug.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn update_link(
        &self,
        account_id: Uuid,
        link_id: Uuid,
        draft: &LinkDraft,
    ) -> Result<Link, AppError> {
        let _permit = self.in_flight.begin(account_id, Operation::LinkMutation)?;

        let existing = self.find_link(account_id, link_id).await?;

        if draft.requests_schedule() && !existing.is_scheduled {
            let limits = self.subscriptions.limits(account_id).await;
            if !can_schedule(&limits) {
                return Err(scheduling_not_in_plan(&limits));
            }
        }

        let record = normalize_link(draft, SubmitMode::Update, Utc::now())?;
        let link = self.report(
            "Error updating link",
            self.links.update(account_id, link_id, record).await,
        )?;

        self.notifier.notify(Notification::info(
            "Link updated",
            "Your changes have been saved.",
        ));
        Ok(link)
    }

    /// Flips a link between active and inactive.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the link does not belong to the account.
    /// Returns [`AppError::Conflict`] if the link waits for its scheduled activation.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn toggle_link(&self, account_id: Uuid, link_id: Uuid) -> Result<Link, AppError> {
        let _permit = self.in_flight.begin(account_id, Operation::LinkMutation)?;

        let existing = self.find_link(account_id, link_id).await?;
        let next = LinkState::of(&existing).toggled()?;

        self.report(
            "Error updating link",
            self.links
                .set_active(account_id, link_id, next == LinkState::Active)
                .await,
        )
    }

    /// Deletes a link once the user has confirmed.
    ///
    /// Without confirmation this is a no-op returning [`DeleteOutcome::Aborted`].
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the link does not belong to the account.
    /// Returns [`AppError::Conflict`] for a duplicate submission.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn delete_link(
        &self,
        account_id: Uuid,
        link_id: Uuid,
        confirmed: bool,
    ) -> Result<DeleteOutcome, AppError> {
        if !confirmed {
            tracing::debug!(%account_id, %link_id, "Delete not confirmed");
            return Ok(DeleteOutcome::Aborted);
        }

        let _permit = self.in_flight.begin(account_id, Operation::LinkDelete)?;

        let deleted = self.report(
            "Error deleting link",
            self.links.delete(account_id, link_id).await,
        )?;
        if !deleted {
            return Err(link_not_found(link_id));
        }

        self.notifier.notify(Notification::info(
            "Link deleted",
            "The link has been removed from your profile.",
        ));
        Ok(DeleteOutcome::Deleted)
    }

    /// Checks that the link store answers.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if it does not.
    pub async fn health_check(&self) -> Result<(), AppError> {
        self.links.ping().await
    }

    async fn find_link(&self, account_id: Uuid, link_id: Uuid) -> Result<Link, AppError> {
        self.links
            .find(account_id, link_id)
            .await?
            .ok_or_else(|| link_not_found(link_id))
    }

    /// Sends an error notification for failed persistence calls.
    fn report<T>(&self, title: &str, result: Result<T, AppError>) -> Result<T, AppError> {
        if let Err(e) = &result {
            self.notifier
                .notify(Notification::error(title, e.message().to_string()));
        }
        result
    }
}

fn link_not_found(link_id: Uuid) -> AppError {
    AppError::not_found("Link not found", json!({ "id": link_id }))
}

fn scheduling_not_in_plan(limits: &SubscriptionLimits) -> AppError {
    AppError::forbidden(
        "Link scheduling is not available on your plan",
        json!({ "tier": limits.tier() }),
    )
}
