//! Postgres-backed [`ObservationStore`] (§4.3, §6 persistence schema).

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use deadpool_postgres::Pool;
use pulsearc_core::ObservationStore;
use pulsearc_domain::{BusinessData, BusinessMetadata, BusinessUpdate, PulseArcError, TimeseriesPoint};
use tokio_postgres::Row;
use tracing::instrument;
use uuid::Uuid;

use crate::errors::InfraError;

pub struct PostgresObservationStore {
    pool: Pool,
}

impl PostgresObservationStore {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

fn row_to_business_data(row: &Row) -> BusinessData {
    BusinessData {
        source: row.get("source"),
        business_phones: row.get("business_phones"),
        website_live: row.get("website_live"),
        business_open: row.get("business_open"),
    }
}

fn row_to_timeseries_point(row: &Row) -> TimeseriesPoint {
    TimeseriesPoint {
        event_timestamp: row.get("event_timestamp"),
        website_live: row.get("website_live"),
        business_open: row.get("business_open"),
        business_phones: row.get("business_phones"),
    }
}

#[async_trait]
impl ObservationStore for PostgresObservationStore {
    #[instrument(skip(self))]
    async fn get_all_metadata(&self) -> Result<Vec<BusinessMetadata>, PulseArcError> {
        let client = self.pool.get().await.map_err(InfraError::from)?;
        let rows = client
            .query(
                "SELECT business_id, business_name, business_uri, metadata FROM asset_metadata",
                &[],
            )
            .await
            .map_err(InfraError::from)?;

        Ok(rows
            .iter()
            .map(|row| BusinessMetadata {
                business_id: row.get("business_id"),
                business_name: row.get("business_name"),
                business_uri: row.get("business_uri"),
                metadata: row
                    .get::<_, serde_json::Value>("metadata")
                    .as_object()
                    .map(|obj| obj.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
                    .unwrap_or_default(),
            })
            .collect())
    }

    #[instrument(skip(self, update), fields(business_id = %update.metadata.business_id, source = %update.data.source))]
    async fn upsert(&self, update: BusinessUpdate) -> Result<(), PulseArcError> {
        let mut client = self.pool.get().await.map_err(InfraError::from)?;
        let tx = client.transaction().await.map_err(InfraError::from)?;

        let business_id = update.metadata.business_id;
        let data = &update.data;

        tx.execute(
            "INSERT INTO asset_data (business_id, source, business_phones, website_live, business_open)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (business_id, source) DO UPDATE SET
               business_phones = EXCLUDED.business_phones,
               website_live = EXCLUDED.website_live,
               business_open = EXCLUDED.business_open",
            &[&business_id, &data.source, &data.business_phones, &data.website_live, &data.business_open],
        )
        .await
        .map_err(InfraError::from)?;

        tx.execute(
            "INSERT INTO asset_data_timeseries (business_id, source, business_phones, website_live, business_open)
             VALUES ($1, $2, $3, $4, $5)",
            &[&business_id, &data.source, &data.business_phones, &data.website_live, &data.business_open],
        )
        .await
        .map_err(InfraError::from)?;

        tx.execute(
            "UPDATE asset_metadata SET last_update = now() WHERE business_id = $1",
            &[&business_id],
        )
        .await
        .map_err(InfraError::from)?;

        tx.commit().await.map_err(InfraError::from)?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_snapshot(
        &self,
        business_id: Uuid,
    ) -> Result<BTreeMap<String, BusinessData>, PulseArcError> {
        let client = self.pool.get().await.map_err(InfraError::from)?;
        let rows = client
            .query(
                "SELECT source, business_phones, website_live, business_open
                 FROM asset_data WHERE business_id = $1",
                &[&business_id],
            )
            .await
            .map_err(InfraError::from)?;

        Ok(rows.iter().map(|row| (row.get::<_, String>("source"), row_to_business_data(row))).collect())
    }

    #[instrument(skip(self))]
    async fn get_timeseries(
        &self,
        business_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<BTreeMap<String, Vec<TimeseriesPoint>>, PulseArcError> {
        let client = self.pool.get().await.map_err(InfraError::from)?;
        let rows = client
            .query(
                "SELECT source, event_timestamp, business_phones, website_live, business_open
                 FROM asset_data_timeseries
                 WHERE business_id = $1 AND event_timestamp BETWEEN $2 AND $3
                 ORDER BY source, event_timestamp DESC",
                &[&business_id, &start, &end],
            )
            .await
            .map_err(InfraError::from)?;

        let mut grouped: BTreeMap<String, Vec<TimeseriesPoint>> = BTreeMap::new();
        for row in &rows {
            let source: String = row.get("source");
            grouped.entry(source).or_default().push(row_to_timeseries_point(row));
        }
        Ok(grouped)
    }

    #[instrument(skip(self))]
    async fn get_timeseries_count(
        &self,
        business_id: Uuid,
        count: i64,
    ) -> Result<BTreeMap<String, Vec<TimeseriesPoint>>, PulseArcError> {
        let client = self.pool.get().await.map_err(InfraError::from)?;
        // Per-source limiting via a window function, not a global top-N (§4.3).
        let rows = client
            .query(
                "SELECT source, event_timestamp, business_phones, website_live, business_open FROM (
                   SELECT source, event_timestamp, business_phones, website_live, business_open,
                          ROW_NUMBER() OVER (PARTITION BY source ORDER BY event_timestamp DESC) AS rn
                   FROM asset_data_timeseries
                   WHERE business_id = $1
                 ) ranked
                 WHERE rn <= $2
                 ORDER BY source, event_timestamp DESC",
                &[&business_id, &count],
            )
            .await
            .map_err(InfraError::from)?;

        let mut grouped: BTreeMap<String, Vec<TimeseriesPoint>> = BTreeMap::new();
        for row in &rows {
            let source: String = row.get("source");
            grouped.entry(source).or_default().push(row_to_timeseries_point(row));
        }
        Ok(grouped)
    }
}
