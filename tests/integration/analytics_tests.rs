//! Analytics over stored events
//!
//! Runs the analytics engine against the SeaORM event repository.

#[cfg(test)]
mod tests {
    use crate::common::{EventFactory, ExperimentFactory, TestDatabase, fixtures};
    use abtest_analytics::core::analytics::{AnalyticsEngine, AnalyticsQuery};
    use abtest_analytics::core::dashboard::{DashboardFilter, SortColumn, SortOrder};
    use abtest_analytics::core::models::EventType::{Click, Conversion, PageView};
    use abtest_analytics::core::models::Experiment;
    use chrono::{Duration, TimeZone, Utc};
    use uuid::Uuid;

    /// Homepage CTA data: A has 2 users and 1 conversion, B has 3 users and 1 conversion
    async fn homepage(db: &TestDatabase) -> (Uuid, Experiment) {
        let tenant = fixtures::tenant(db).await;
        let exp = ExperimentFactory::create(db, tenant.id, "Homepage CTA Button Test").await;

        let rows = [
            ("user_001", PageView, "A"),
            ("user_001", Click, "A"),
            ("user_001", Conversion, "A"),
            ("user_002", PageView, "B"),
            ("user_003", PageView, "A"),
            ("user_003", Click, "A"),
            ("user_004", PageView, "B"),
            ("user_004", Conversion, "B"),
            ("user_005", PageView, "B"),
        ];
        for (user, event_type, variant) in rows {
            EventFactory::insert(
                db,
                EventFactory::variant(tenant.id, exp.id, user, event_type, variant),
            )
            .await;
        }
        EventFactory::insert(db, EventFactory::general(tenant.id, "user_020", PageView)).await;

        (tenant.id, exp)
    }

    fn engine(db: &TestDatabase) -> AnalyticsEngine {
        AnalyticsEngine::new(db.storage().event_repository())
    }

    #[tokio::test]
    async fn test_experiment_summary() {
        let db = TestDatabase::new().await;
        let (tenant_id, exp) = homepage(&db).await;

        let query = AnalyticsQuery {
            experiment_id: Some(exp.id.to_string()),
            ..Default::default()
        };
        let summary = engine(&db).summary(tenant_id, &query).await.unwrap();

        assert_eq!(summary.total_events, 9);
        assert_eq!(summary.unique_users, 5);

        let a = summary.variant("A").unwrap();
        assert_eq!((a.events, a.users, a.conversions), (5, 2, 1));
        assert_eq!(a.conversion_rate, 0.5);

        let b = summary.variant("B").unwrap();
        assert_eq!((b.events, b.users, b.conversions), (4, 3, 1));
        assert!((b.conversion_rate - 1.0 / 3.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_tenant_wide_summary_counts_general_events() {
        let db = TestDatabase::new().await;
        let (tenant_id, _) = homepage(&db).await;

        let summary = engine(&db)
            .summary(tenant_id, &AnalyticsQuery::default())
            .await
            .unwrap();

        assert_eq!(summary.total_events, 10);
        assert_eq!(summary.unique_users, 6);
        assert_eq!(summary.variants.len(), 2);
    }

    #[tokio::test]
    async fn test_summary_is_tenant_isolated() {
        let db = TestDatabase::new().await;
        homepage(&db).await;
        let stranger = fixtures::tenant(&db).await;

        let summary = engine(&db)
            .summary(stranger.id, &AnalyticsQuery::default())
            .await
            .unwrap();
        assert_eq!(summary.total_events, 0);
        assert!(summary.variants.is_empty());
    }

    #[tokio::test]
    async fn test_end_date_includes_whole_day() {
        let db = TestDatabase::new().await;
        let tenant = fixtures::tenant(&db).await;
        let exp = ExperimentFactory::create(&db, tenant.id, "Email Subject Line Test").await;

        let late = Utc.with_ymd_and_hms(2024, 12, 15, 23, 30, 0).unwrap();
        let next_day = late + Duration::hours(1);
        for (user, ts) in [("user_010", late), ("user_011", next_day)] {
            EventFactory::insert(
                &db,
                EventFactory::at(
                    EventFactory::variant(tenant.id, exp.id, user, PageView, "Original"),
                    ts,
                ),
            )
            .await;
        }

        let query = AnalyticsQuery {
            start_date: Some("2024-12-15".to_string()),
            end_date: Some("2024-12-15".to_string()),
            experiment_id: None,
        };
        let summary = engine(&db).summary(tenant.id, &query).await.unwrap();
        assert_eq!(summary.total_events, 1);
        assert_eq!(summary.unique_users, 1);
    }

    #[tokio::test]
    async fn test_dashboard_over_stored_experiments() {
        let db = TestDatabase::new().await;
        let (tenant_id, _) = homepage(&db).await;
        ExperimentFactory::create(&db, tenant_id, "Pricing Page Layout Test").await;

        let experiments = db.db().list_experiments(tenant_id).await.unwrap();
        let filter = DashboardFilter {
            sort_by: Some(SortColumn::TotalEvents),
            sort_order: SortOrder::Desc,
            ..Default::default()
        };
        let view = engine(&db)
            .dashboard(tenant_id, &experiments, &filter, 1, 20)
            .await
            .unwrap();

        assert_eq!(view.total, 4);
        assert_eq!(view.cards.total_campaigns, 2);
        assert_eq!(view.cards.total_events, 9);
        assert_eq!(view.rows[0].experiment_name, "Homepage CTA Button Test");
        assert_eq!(view.rows[0].variant, "A");
        assert_eq!(view.rows[0].total_events, 5);
        assert!(
            view.rows
                .iter()
                .filter(|row| row.experiment_name == "Pricing Page Layout Test")
                .all(|row| row.total_events == 0)
        );
    }
}
