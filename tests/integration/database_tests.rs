//! Database integration tests
//!
//! Tests database operations using real in-memory SQLite database.

#[cfg(test)]
mod tests {
    use crate::common::{EventFactory, ExperimentFactory, TestDatabase, fixtures};
    use abtest_analytics::AnalyticsError;
    use abtest_analytics::core::models::{EventFilter, EventType, ExperimentStatus};
    use chrono::{Duration, TimeZone, Utc};
    use uuid::Uuid;

    /// Test basic database connection and health check
    #[tokio::test]
    async fn test_database_health_check() {
        let db = TestDatabase::new().await;
        let health = db.db().health_check().await;
        assert!(health.is_ok(), "Health check failed: {:?}", health.err());
    }

    /// Migrations are idempotent
    #[tokio::test]
    async fn test_database_migration_rerun() {
        let db = TestDatabase::new().await;
        let result = db.db().migrate().await;
        assert!(result.is_ok(), "Migration failed: {:?}", result.err());
    }

    #[tokio::test]
    async fn test_tenant_lookup_by_api_key() {
        let db = TestDatabase::new().await;
        let tenant = db
            .db()
            .create_tenant("Acme Corp", "test-api-key-12345")
            .await
            .unwrap();

        let found = db
            .db()
            .find_tenant_by_api_key("test-api-key-12345")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, tenant.id);
        assert_eq!(found.name, "Acme Corp");

        assert!(db.db().find_tenant_by_api_key("nope").await.unwrap().is_none());
        assert!(
            db.db()
                .find_tenant_by_id(tenant.id)
                .await
                .unwrap()
                .is_some()
        );
    }

    #[tokio::test]
    async fn test_upsert_tenant_keeps_identity() {
        let db = TestDatabase::new().await;
        let first = db.db().upsert_tenant("Acme", "key-1").await.unwrap();
        let second = db.db().upsert_tenant("Acme Corp", "key-1").await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.name, "Acme Corp");
    }

    #[tokio::test]
    async fn test_duplicate_api_key_is_rejected() {
        let db = TestDatabase::new().await;
        db.db().create_tenant("One", "shared").await.unwrap();
        let err = db.db().create_tenant("Two", "shared").await.unwrap_err();
        assert!(matches!(err, AnalyticsError::Database(_)));
    }

    #[tokio::test]
    async fn test_experiment_round_trip() {
        let db = TestDatabase::new().await;
        let tenant = fixtures::tenant(&db).await;

        let created = ExperimentFactory::create(&db, tenant.id, "Checkout").await;
        assert_eq!(created.status, ExperimentStatus::Active);
        assert_eq!(created.variant_names(), vec!["A", "B"]);

        let fetched = db
            .db()
            .get_experiment(tenant.id, created.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.name, "Checkout");
        assert_eq!(fetched.description.as_deref(), Some("Fixture experiment"));
    }

    #[tokio::test]
    async fn test_list_experiments_newest_first() {
        let db = TestDatabase::new().await;
        let tenant = fixtures::tenant(&db).await;
        let other = fixtures::tenant(&db).await;

        ExperimentFactory::create(&db, tenant.id, "First").await;
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        ExperimentFactory::create(&db, tenant.id, "Second").await;
        ExperimentFactory::create(&db, other.id, "Foreign").await;

        let names: Vec<_> = db
            .db()
            .list_experiments(tenant.id)
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["Second", "First"]);
    }

    #[tokio::test]
    async fn test_find_experiment_counts_related_rows() {
        let db = TestDatabase::new().await;
        let tenant = fixtures::tenant(&db).await;
        let exp = ExperimentFactory::create(&db, tenant.id, "Checkout").await;

        for (user, variant) in [("u1", "A"), ("u2", "B")] {
            db.db()
                .create_assignment(tenant.id, exp.id, user, variant)
                .await
                .unwrap();
        }
        for user in ["u1", "u2", "u3"] {
            EventFactory::insert(
                &db,
                EventFactory::variant(tenant.id, exp.id, user, EventType::PageView, "A"),
            )
            .await;
        }

        let detail = db
            .db()
            .find_experiment(tenant.id, exp.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(detail.count.events, 3);
        assert_eq!(detail.count.user_assignments, 2);

        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["_count"]["userAssignments"], 2);
        assert_eq!(json["name"], "Checkout");
    }

    #[tokio::test]
    async fn test_experiments_are_tenant_scoped() {
        let db = TestDatabase::new().await;
        let owner = fixtures::tenant(&db).await;
        let intruder = fixtures::tenant(&db).await;
        let exp = ExperimentFactory::create(&db, owner.id, "Private").await;

        assert!(
            db.db()
                .find_experiment(intruder.id, exp.id)
                .await
                .unwrap()
                .is_none()
        );

        let err = db
            .db()
            .update_experiment_status(intruder.id, exp.id, ExperimentStatus::Completed)
            .await
            .unwrap_err();
        assert!(matches!(err, AnalyticsError::NotFound(_)));
        assert_eq!(
            err.to_string(),
            format!("Experiment with ID {} not found", exp.id)
        );
    }

    #[tokio::test]
    async fn test_update_experiment_status() {
        let db = TestDatabase::new().await;
        let tenant = fixtures::tenant(&db).await;
        let exp = ExperimentFactory::create(&db, tenant.id, "Checkout").await;

        let updated = db
            .db()
            .update_experiment_status(tenant.id, exp.id, ExperimentStatus::Completed)
            .await
            .unwrap();
        assert_eq!(updated.status, ExperimentStatus::Completed);
        assert!(updated.updated_at >= exp.updated_at);
    }

    #[tokio::test]
    async fn test_event_round_trip() {
        let db = TestDatabase::new().await;
        let tenant = fixtures::tenant(&db).await;
        let exp = ExperimentFactory::create(&db, tenant.id, "Checkout").await;

        let stored = EventFactory::insert(
            &db,
            EventFactory::variant(tenant.id, exp.id, "u1", EventType::Conversion, "B"),
        )
        .await;
        assert!(stored.is_conversion());
        assert_eq!(stored.experiment_id, Some(exp.id));

        let events = db
            .db()
            .find_events(&EventFilter::for_tenant(tenant.id))
            .await
            .unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, stored.id);
        assert_eq!(events[0].variant.as_deref(), Some("B"));
        assert_eq!(events[0].properties["variant"], "B");
    }

    #[tokio::test]
    async fn test_find_events_filters() {
        let db = TestDatabase::new().await;
        let tenant = fixtures::tenant(&db).await;
        let other = fixtures::tenant(&db).await;
        let exp = ExperimentFactory::create(&db, tenant.id, "Checkout").await;

        let day = Utc.with_ymd_and_hms(2025, 10, 1, 0, 0, 0).unwrap();
        let inside = [day, day + Duration::hours(12), day + Duration::hours(23)];
        for ts in inside {
            EventFactory::insert(
                &db,
                EventFactory::at(
                    EventFactory::variant(tenant.id, exp.id, "u1", EventType::Click, "A"),
                    ts,
                ),
            )
            .await;
        }
        EventFactory::insert(
            &db,
            EventFactory::at(
                EventFactory::general(tenant.id, "u2", EventType::PageView),
                day - Duration::seconds(1),
            ),
        )
        .await;
        EventFactory::insert(
            &db,
            EventFactory::at(
                EventFactory::general(other.id, "u3", EventType::PageView),
                day + Duration::hours(1),
            ),
        )
        .await;

        let all = db
            .db()
            .find_events(&EventFilter::for_tenant(tenant.id))
            .await
            .unwrap();
        assert_eq!(all.len(), 4);
        assert!(all.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));

        let scoped = db
            .db()
            .find_events(&EventFilter::for_tenant(tenant.id).with_experiment(exp.id))
            .await
            .unwrap();
        assert_eq!(scoped.len(), 3);

        let windowed = db
            .db()
            .find_events(&EventFilter {
                tenant_id: tenant.id,
                experiment_id: None,
                start: Some(day),
                end: Some(day + Duration::hours(23)),
            })
            .await
            .unwrap();
        assert_eq!(windowed.len(), 3);

        let unknown = db
            .db()
            .find_events(&EventFilter::for_tenant(Uuid::new_v4()))
            .await
            .unwrap();
        assert!(unknown.is_empty());
    }
}
