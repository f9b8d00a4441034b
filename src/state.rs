//! Shared application state handed to every handler.

use std::sync::Arc;
use std::time::Duration;

use crate::application::in_flight::InFlight;
use crate::application::services::{
    AnalyticsService, LinkService, ProfileService, SubscriptionService,
};
use crate::domain::repositories::{
    AnalyticsRepository, AvatarStorage, LinkRepository, Notifier, ProfileRepository,
    SubscriptionRepository,
};

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub profile_service: Arc<ProfileService>,
    pub analytics_service: Arc<AnalyticsService>,
    /// `None` when the activation worker is disabled.
    pub activation_interval: Option<Duration>,
}

/// Collaborators the services are built from.
pub struct Collaborators {
    pub links: Arc<dyn LinkRepository>,
    pub subscriptions: Arc<dyn SubscriptionRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
    pub analytics: Arc<dyn AnalyticsRepository>,
    pub avatars: Arc<dyn AvatarStorage>,
    pub notifier: Arc<dyn Notifier>,
}

impl AppState {
    /// Wires services over the given collaborators.
    ///
    /// All mutating services share one [`InFlight`] registry.
    pub fn new(c: Collaborators, activation_interval: Option<Duration>) -> Self {
        let in_flight = InFlight::new();
        let subscription_service = Arc::new(SubscriptionService::new(c.subscriptions));

        Self {
            link_service: Arc::new(LinkService::new(
                c.links,
                subscription_service.clone(),
                c.notifier.clone(),
                in_flight.clone(),
            )),
            profile_service: Arc::new(ProfileService::new(
                c.profiles,
                c.avatars,
                c.notifier,
                in_flight,
            )),
            analytics_service: Arc::new(AnalyticsService::new(
                c.analytics,
                subscription_service,
            )),
            activation_interval,
        }
    }
}
