/// Basic integration tests
use wellness_tracker_mcp::*;
use tempfile::NamedTempFile;

#[cfg(test)]
mod basic_integration_tests {
    use super::*;

    #[tokio::test]
    async fn test_server_basic_workflow() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let server = WellnessServer::new(temp_file.path().to_path_buf())
            .await
            .expect("Failed to create server");

        // Seeding an empty catalog loads all products; a second call is a no-op
        let seeded = server.seed_catalog().expect("Failed to seed catalog");
        assert_eq!(seeded, 14);
        let reseeded = server.seed_catalog().expect("Failed to re-seed catalog");
        assert_eq!(reseeded, 0);

        let user = UserId::new();
        let storage = server.storage();

        // Log a short sleep week and generate insights through the engine
        for value in [5.0, 5.5, 6.0] {
            let record = MetricRecord::new(
                user.clone(),
                DataSource::Manual,
                MetricType::SleepHours,
                value,
            )
            .expect("Failed to build record");
            storage.create_record(&record).expect("Failed to log record");
        }

        let insights = InsightEngine::new(storage)
            .generate_insights(&user)
            .expect("Failed to generate insights");

        let sleep_alert = insights
            .iter()
            .find(|i| i.category == InsightCategory::Sleep)
            .expect("Expected a sleep insight");
        assert_eq!(sleep_alert.priority, Priority::High);
        assert!(sleep_alert.message.contains("5.5"));

        // The seeded catalog makes the magnesium recommendation resolvable
        let product_id = sleep_alert
            .recommended_product_id
            .clone()
            .expect("Expected a product recommendation");
        let product = storage.get_product(&product_id).expect("Product lookup failed");
        assert!(product.name.to_lowercase().contains("magnesium"));
    }

    #[tokio::test]
    async fn test_database_persistence() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let db_path = temp_file.path().to_path_buf();
        let user = UserId::new();

        {
            let server = WellnessServer::new(db_path.clone())
                .await
                .expect("Failed to create first server");
            let record = MetricRecord::new(
                user.clone(),
                DataSource::Manual,
                MetricType::WaterMl,
                750.0,
            )
            .expect("Failed to build record");
            server
                .storage()
                .create_record(&record)
                .expect("Failed to log record");
        }

        // A second server over the same file sees the earlier data
        let server2 = WellnessServer::new(db_path)
            .await
            .expect("Failed to create second server");
        let records = server2
            .storage()
            .today_by_type(&user, MetricType::WaterMl)
            .expect("Failed to read records back");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].value, 750.0);
    }

    #[tokio::test]
    async fn test_chat_round_trip_with_safety() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let server = WellnessServer::new(temp_file.path().to_path_buf())
            .await
            .expect("Failed to create server");
        let user = UserId::new();

        let safe = server
            .safety()
            .classify("How can I sleep better?", Locale::En);
        assert!(safe.safe);

        let blocked = server
            .safety()
            .classify("What medication should I take for hypertension?", Locale::En);
        assert!(!blocked.safe);
        assert!(!blocked.block_message.is_empty());

        // Both turns of a blocked exchange end up in persisted history
        let message = ChatMessage::new(user.clone(), Sender::User, "hello".to_string());
        server
            .storage()
            .create_chat_message(&message)
            .expect("Failed to persist chat turn");
        let history = server
            .storage()
            .chat_history(&user, 10)
            .expect("Failed to read chat history");
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_storage_interface() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let storage = SqliteStorage::new(temp_file.path().to_path_buf())
            .expect("Failed to create storage");

        // Storage is usable through the trait object seam
        let _: &dyn WellnessStore = &storage;
    }
}
