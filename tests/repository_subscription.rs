mod common;

use linkbio::domain::entities::{SubscriptionLimits, SubscriptionTier};
use linkbio::domain::repositories::SubscriptionRepository;
use linkbio::infrastructure::persistence::{PgProfileRepository, PgSubscriptionRepository};
use sqlx::PgPool;
use std::sync::Arc;

#[sqlx::test]
async fn test_fetch_without_subscription_is_free(pool: PgPool) {
    let account = common::create_test_account(&pool, "alice").await;
    let repo = PgSubscriptionRepository::new(Arc::new(pool));

    let limits = repo.fetch(account).await.unwrap();

    assert_eq!(limits, SubscriptionLimits::free());
}

#[sqlx::test]
async fn test_assign_and_fetch(pool: PgPool) {
    let account = common::create_test_account(&pool, "alice").await;
    let repo = PgSubscriptionRepository::new(Arc::new(pool));

    repo.assign_tier(account, SubscriptionTier::Premium)
        .await
        .unwrap();
    let limits = repo.fetch(account).await.unwrap();

    assert_eq!(limits.link_limit, 50);
    assert!(limits.link_scheduling_enabled);
    assert!(limits.advanced_analytics_enabled);
    assert_eq!(limits.subscription_tier, Some(SubscriptionTier::Premium));

    repo.assign_tier(account, SubscriptionTier::Enterprise)
        .await
        .unwrap();
    let limits = repo.fetch(account).await.unwrap();

    assert!(limits.is_unlimited());
    assert_eq!(limits.subscription_tier, Some(SubscriptionTier::Enterprise));
}

#[sqlx::test]
async fn test_list_plans_cheapest_first(pool: PgPool) {
    let repo = PgSubscriptionRepository::new(Arc::new(pool));

    let tiers: Vec<_> = repo
        .list_plans()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.tier)
        .collect();

    assert_eq!(
        tiers,
        vec![
            SubscriptionTier::Free,
            SubscriptionTier::Premium,
            SubscriptionTier::Enterprise
        ]
    );
}

#[sqlx::test]
async fn test_provision_account(pool: PgPool) {
    let pool = Arc::new(pool);
    let profiles = PgProfileRepository::new(pool.clone());
    let account = uuid::Uuid::new_v4();

    let profile = profiles.provision(account, Some("carol")).await.unwrap();
    assert_eq!(profile.id, account);
    assert_eq!(profile.username.as_deref(), Some("carol"));

    let again = profiles.provision(account, None).await;
    assert!(matches!(again, Err(linkbio::AppError::Conflict { .. })));
}

#[sqlx::test]
async fn test_assign_tier_without_profile(pool: PgPool) {
    let repo = PgSubscriptionRepository::new(Arc::new(pool));

    let result = repo
        .assign_tier(uuid::Uuid::new_v4(), SubscriptionTier::Premium)
        .await;

    assert!(matches!(result, Err(linkbio::AppError::NotFound { .. })));
}
