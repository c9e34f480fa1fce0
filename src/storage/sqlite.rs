/// SQLite implementation of the wellness storage interface
///
/// This module provides the concrete SQLite implementation for storing
/// and retrieving wellness data. It handles all SQL queries and data
/// conversion.

use std::path::PathBuf;

use chrono::{DateTime, NaiveTime, Utc};
use rusqlite::{params, Connection, Row};

use crate::domain::{
    ChatMessage, DataSource, LinkId, MessageId, MetricRecord, MetricType, Product,
    ProductCategory, ProductId, RecordId, Sender, UserId, WearableLink, WearableProvider,
};
use crate::storage::{migrations, StorageError, WellnessStore};

/// SQLite-based storage implementation
///
/// This struct holds a connection to the SQLite database and implements
/// all the storage operations defined in the WellnessStore trait.
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Create a new SQLite storage instance
    ///
    /// This opens the database file and runs any necessary migrations
    /// to ensure the schema is up to date.
    pub fn new(db_path: PathBuf) -> Result<Self, StorageError> {
        let conn = Connection::open(&db_path)
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;

        conn.execute("PRAGMA foreign_keys = ON", [])
            .map_err(|e| StorageError::Connection(format!("Failed to enable foreign keys: {}", e)))?;

        migrations::initialize_database(&conn)?;

        tracing::info!("SQLite storage initialized at: {:?}", db_path);

        Ok(Self { conn })
    }

    /// Today's UTC calendar-day boundary (00:00)
    fn utc_midnight() -> DateTime<Utc> {
        Utc::now().date_naive().and_time(NaiveTime::MIN).and_utc()
    }

    fn invalid_column(index: usize, what: &str) -> rusqlite::Error {
        rusqlite::Error::InvalidColumnType(index, what.to_string(), rusqlite::types::Type::Text)
    }

    fn parse_timestamp(index: usize, s: &str) -> rusqlite::Result<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|_| Self::invalid_column(index, "Invalid datetime"))
    }

    /// Map a metric_records row (id, user_id, source, metric_type, value,
    /// timestamp) to a MetricRecord
    fn row_to_record(row: &Row) -> rusqlite::Result<MetricRecord> {
        let id_str: String = row.get(0)?;
        let id = RecordId::from_string(&id_str)
            .map_err(|_| Self::invalid_column(0, "Invalid UUID"))?;

        let user_str: String = row.get(1)?;
        let user_id = UserId::from_string(&user_str)
            .map_err(|_| Self::invalid_column(1, "Invalid UUID"))?;

        let source_str: String = row.get(2)?;
        let source = DataSource::parse(&source_str)
            .map_err(|_| Self::invalid_column(2, "Invalid data source"))?;

        let metric_str: String = row.get(3)?;
        let metric_type = MetricType::parse(&metric_str)
            .map_err(|_| Self::invalid_column(3, "Invalid metric type"))?;

        let timestamp_str: String = row.get(5)?;
        let timestamp = Self::parse_timestamp(5, &timestamp_str)?;

        Ok(MetricRecord::from_existing(
            id,
            user_id,
            source,
            metric_type,
            row.get(4)?, // value
            timestamp,
        ))
    }

    /// Map a wearable_links row (id, user_id, provider, connected_at,
    /// is_active) to a WearableLink
    fn row_to_link(row: &Row) -> rusqlite::Result<WearableLink> {
        let id_str: String = row.get(0)?;
        let id = LinkId::from_string(&id_str)
            .map_err(|_| Self::invalid_column(0, "Invalid UUID"))?;

        let user_str: String = row.get(1)?;
        let user_id = UserId::from_string(&user_str)
            .map_err(|_| Self::invalid_column(1, "Invalid UUID"))?;

        let provider_str: String = row.get(2)?;
        let provider = WearableProvider::parse(&provider_str)
            .map_err(|_| Self::invalid_column(2, "Invalid provider"))?;

        let connected_str: String = row.get(3)?;
        let connected_at = Self::parse_timestamp(3, &connected_str)?;

        Ok(WearableLink::from_existing(
            id,
            user_id,
            provider,
            connected_at,
            row.get(4)?, // is_active
        ))
    }

    /// Map a products row (id, name, short_description, description,
    /// category, price, image_url, created_at) to a Product
    fn row_to_product(row: &Row) -> rusqlite::Result<Product> {
        let id_str: String = row.get(0)?;
        let id = ProductId::from_string(&id_str)
            .map_err(|_| Self::invalid_column(0, "Invalid UUID"))?;

        let category_str: String = row.get(4)?;
        let category = ProductCategory::parse(&category_str)
            .map_err(|_| Self::invalid_column(4, "Invalid category"))?;

        let created_str: String = row.get(7)?;
        let created_at = Self::parse_timestamp(7, &created_str)?;

        Ok(Product::from_existing(
            id,
            row.get(1)?, // name
            row.get(2)?, // short_description
            row.get(3)?, // description
            category,
            row.get(5)?, // price
            row.get(6)?, // image_url
            created_at,
        ))
    }

    /// Map a chat_messages row (id, user_id, sender, text, timestamp) to a
    /// ChatMessage
    fn row_to_message(row: &Row) -> rusqlite::Result<ChatMessage> {
        let id_str: String = row.get(0)?;
        let id = MessageId::from_string(&id_str)
            .map_err(|_| Self::invalid_column(0, "Invalid UUID"))?;

        let user_str: String = row.get(1)?;
        let user_id = UserId::from_string(&user_str)
            .map_err(|_| Self::invalid_column(1, "Invalid UUID"))?;

        let sender_str: String = row.get(2)?;
        let sender = Sender::parse(&sender_str)
            .map_err(|_| Self::invalid_column(2, "Invalid sender"))?;

        let timestamp_str: String = row.get(4)?;
        let timestamp = Self::parse_timestamp(4, &timestamp_str)?;

        Ok(ChatMessage::from_existing(
            id,
            user_id,
            sender,
            row.get(3)?, // text
            timestamp,
        ))
    }
}

impl WellnessStore for SqliteStorage {
    fn create_record(&self, record: &MetricRecord) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO metric_records (
                id, user_id, source, metric_type, value, timestamp
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                record.id.to_string(),
                record.user_id.to_string(),
                record.source.as_str(),
                record.metric_type.as_str(),
                record.value,
                record.timestamp.to_rfc3339(),
            ],
        )?;

        tracing::debug!(
            "Created metric record: {} {} = {}",
            record.id.to_string(),
            record.metric_type.as_str(),
            record.value
        );
        Ok(())
    }

    fn recent_by_type(
        &self,
        user_id: &UserId,
        metric_type: MetricType,
        since: DateTime<Utc>,
    ) -> Result<Vec<MetricRecord>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, source, metric_type, value, timestamp
             FROM metric_records
             WHERE user_id = ?1 AND metric_type = ?2 AND timestamp >= ?3",
        )?;

        let record_iter = stmt.query_map(
            params![user_id.to_string(), metric_type.as_str(), since.to_rfc3339()],
            Self::row_to_record,
        )?;

        let mut records = Vec::new();
        for record in record_iter {
            records.push(record?);
        }

        Ok(records)
    }

    fn today_by_type(
        &self,
        user_id: &UserId,
        metric_type: MetricType,
    ) -> Result<Vec<MetricRecord>, StorageError> {
        self.recent_by_type(user_id, metric_type, Self::utc_midnight())
    }

    fn records_for_user(
        &self,
        user_id: &UserId,
        metric_type: Option<MetricType>,
        since: DateTime<Utc>,
        limit: Option<u32>,
    ) -> Result<Vec<MetricRecord>, StorageError> {
        let mut sql = "SELECT id, user_id, source, metric_type, value, timestamp
             FROM metric_records
             WHERE user_id = ?1 AND timestamp >= ?2"
            .to_string();

        if metric_type.is_some() {
            sql.push_str(" AND metric_type = ?3");
        }
        sql.push_str(" ORDER BY timestamp DESC");
        if let Some(limit_val) = limit {
            sql.push_str(&format!(" LIMIT {}", limit_val));
        }

        let mut stmt = self.conn.prepare(&sql)?;

        let mut records = Vec::new();
        match metric_type {
            Some(metric) => {
                let record_iter = stmt.query_map(
                    params![user_id.to_string(), since.to_rfc3339(), metric.as_str()],
                    Self::row_to_record,
                )?;
                for record in record_iter {
                    records.push(record?);
                }
            }
            None => {
                let record_iter = stmt.query_map(
                    params![user_id.to_string(), since.to_rfc3339()],
                    Self::row_to_record,
                )?;
                for record in record_iter {
                    records.push(record?);
                }
            }
        }

        Ok(records)
    }

    fn create_wearable_link(&self, link: &WearableLink) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO wearable_links (
                id, user_id, provider, connected_at, is_active
            ) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                link.id.to_string(),
                link.user_id.to_string(),
                link.provider.as_str(),
                link.connected_at.to_rfc3339(),
                link.is_active,
            ],
        )?;

        tracing::debug!(
            "Created wearable link: {} ({})",
            link.provider.as_str(),
            link.id.to_string()
        );
        Ok(())
    }

    fn active_wearable_links(&self, user_id: &UserId) -> Result<Vec<WearableLink>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, provider, connected_at, is_active
             FROM wearable_links
             WHERE user_id = ?1 AND is_active = 1
             ORDER BY connected_at ASC",
        )?;

        let link_iter = stmt.query_map(params![user_id.to_string()], Self::row_to_link)?;

        let mut links = Vec::new();
        for link in link_iter {
            links.push(link?);
        }

        Ok(links)
    }

    fn find_active_link(
        &self,
        user_id: &UserId,
        provider: WearableProvider,
    ) -> Result<Option<WearableLink>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, provider, connected_at, is_active
             FROM wearable_links
             WHERE user_id = ?1 AND provider = ?2 AND is_active = 1
             LIMIT 1",
        )?;

        let result = stmt.query_row(
            params![user_id.to_string(), provider.as_str()],
            Self::row_to_link,
        );

        match result {
            Ok(link) => Ok(Some(link)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(StorageError::Query(e)),
        }
    }

    fn deactivate_wearable_link(&self, link_id: &LinkId) -> Result<(), StorageError> {
        let rows_affected = self.conn.execute(
            "UPDATE wearable_links SET is_active = 0 WHERE id = ?1",
            params![link_id.to_string()],
        )?;

        if rows_affected == 0 {
            return Err(StorageError::LinkNotFound {
                link_id: link_id.to_string(),
            });
        }

        tracing::debug!("Deactivated wearable link: {}", link_id.to_string());
        Ok(())
    }

    fn insert_product(&self, product: &Product) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO products (
                id, name, short_description, description, category, price, image_url, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                product.id.to_string(),
                product.name,
                product.short_description,
                product.description,
                product.category.as_str(),
                product.price,
                product.image_url,
                product.created_at.to_rfc3339(),
            ],
        )?;

        tracing::debug!("Inserted product: {} ({})", product.name, product.id.to_string());
        Ok(())
    }

    fn list_products(&self) -> Result<Vec<Product>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, short_description, description, category, price, image_url, created_at
             FROM products ORDER BY rowid ASC",
        )?;

        let product_iter = stmt.query_map([], Self::row_to_product)?;

        let mut products = Vec::new();
        for product in product_iter {
            products.push(product?);
        }

        Ok(products)
    }

    fn products_by_category(
        &self,
        category: ProductCategory,
    ) -> Result<Vec<Product>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, short_description, description, category, price, image_url, created_at
             FROM products WHERE category = ?1 ORDER BY rowid ASC",
        )?;

        let product_iter = stmt.query_map(params![category.as_str()], Self::row_to_product)?;

        let mut products = Vec::new();
        for product in product_iter {
            products.push(product?);
        }

        Ok(products)
    }

    fn get_product(&self, product_id: &ProductId) -> Result<Product, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, short_description, description, category, price, image_url, created_at
             FROM products WHERE id = ?1",
        )?;

        let result = stmt.query_row(params![product_id.to_string()], Self::row_to_product);

        match result {
            Ok(product) => Ok(product),
            Err(rusqlite::Error::QueryReturnedNoRows) => Err(StorageError::ProductNotFound {
                product_id: product_id.to_string(),
            }),
            Err(e) => Err(StorageError::Query(e)),
        }
    }

    fn find_product_by_name(&self, fragment: &str) -> Result<Option<Product>, StorageError> {
        // rowid order pins "first match" to catalog insertion order
        let mut stmt = self.conn.prepare(
            "SELECT id, name, short_description, description, category, price, image_url, created_at
             FROM products
             WHERE LOWER(name) LIKE '%' || LOWER(?1) || '%'
             ORDER BY rowid ASC LIMIT 1",
        )?;

        let result = stmt.query_row(params![fragment], Self::row_to_product);

        match result {
            Ok(product) => Ok(Some(product)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(StorageError::Query(e)),
        }
    }

    fn create_chat_message(&self, message: &ChatMessage) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO chat_messages (
                id, user_id, sender, text, timestamp
            ) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                message.id.to_string(),
                message.user_id.to_string(),
                message.sender.as_str(),
                message.text,
                message.timestamp.to_rfc3339(),
            ],
        )?;

        Ok(())
    }

    fn chat_history(&self, user_id: &UserId, limit: u32) -> Result<Vec<ChatMessage>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, sender, text, timestamp
             FROM chat_messages
             WHERE user_id = ?1
             ORDER BY timestamp DESC LIMIT ?2",
        )?;

        let message_iter = stmt.query_map(params![user_id.to_string(), limit], Self::row_to_message)?;

        let mut messages = Vec::new();
        for message in message_iter {
            messages.push(message?);
        }

        // Newest-first window, presented oldest first
        messages.reverse();
        Ok(messages)
    }
}
