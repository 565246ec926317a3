use async_trait::async_trait;

use crate::error::{ClientError, Result};
use crate::types::{Record, RecordsFilter, Zone, ZonesFilter};
use crate::utils::domain::{normalize_domain_name, same_domain};

/// Zone and record operations of the Nodion DNS API.
///
/// [`NodionClient`](crate::NodionClient) is the HTTP implementation. Code that
/// only needs these operations can take `Arc<dyn DnsZoneApi>` and be tested
/// against an in-memory fake.
///
/// Each call is a single request. Dropping the returned future aborts the
/// request in flight.
#[async_trait]
pub trait DnsZoneApi: Send + Sync {
    /// Creates a zone for `domain` (`POST /dns_zones`).
    async fn create_zone(&self, domain: &str) -> Result<Zone>;

    /// Lists zones (`GET /dns_zones`), optionally filtered.
    async fn get_zones(&self, filter: Option<&ZonesFilter>) -> Result<Vec<Zone>>;

    /// Deletes a zone (`DELETE /dns_zones/{id}`).
    ///
    /// Returns the server's `deleted` flag. Any non-2xx reply is an error.
    async fn delete_zone(&self, zone_id: &str) -> Result<bool>;

    /// Lists the records of a zone (`GET /dns_zones/{id}/records`).
    async fn get_records(
        &self,
        zone_id: &str,
        filter: Option<&RecordsFilter>,
    ) -> Result<Vec<Record>>;

    /// Creates a record in a zone (`POST /dns_zones/{id}/records`).
    async fn create_record(&self, zone_id: &str, record: &Record) -> Result<Record>;

    /// Deletes a record (`DELETE /dns_zones/{id}/records/{id}`).
    async fn delete_record(&self, zone_id: &str, record_id: &str) -> Result<bool>;

    /// 按名称查找 zone
    ///
    /// Filters server-side by the normalized name, then matches ignoring case
    /// and a trailing dot.
    async fn find_zone(&self, name: &str) -> Result<Zone> {
        let filter = ZonesFilter::by_name(normalize_domain_name(name));
        let zones = self.get_zones(Some(&filter)).await?;

        zones
            .into_iter()
            .find(|zone| same_domain(&zone.name, name))
            .ok_or_else(|| ClientError::ZoneNotFound {
                name: name.to_string(),
            })
    }
}
