//! Nodion `DnsZoneApi` trait 实现

use async_trait::async_trait;

use crate::error::Result;
use crate::traits::DnsZoneApi;
use crate::types::{
    CreateZoneBody, Record, RecordResponse, RecordsFilter, RecordsResponse, Zone, ZoneResponse,
    ZonesFilter, ZonesResponse,
};

use super::{NodionClient, check_id};

const ZONES: &str = "dns_zones";
const RECORDS: &str = "records";

#[async_trait]
impl DnsZoneApi for NodionClient {
    async fn create_zone(&self, domain: &str) -> Result<Zone> {
        let url = self.endpoint(&[ZONES], &[])?;
        let resp: ZoneResponse = self.post(url, &CreateZoneBody { name: domain }).await?;
        log::info!("Created zone {} ({})", resp.dns_zone.name, resp.dns_zone.id);
        Ok(resp.dns_zone)
    }

    async fn get_zones(&self, filter: Option<&ZonesFilter>) -> Result<Vec<Zone>> {
        let query = filter.map(ZonesFilter::query_pairs).unwrap_or_default();
        let url = self.endpoint(&[ZONES], &query)?;
        let resp: ZonesResponse = self.get(url).await?;
        Ok(resp.dns_zones)
    }

    async fn delete_zone(&self, zone_id: &str) -> Result<bool> {
        check_id("zone_id", zone_id)?;
        let url = self.endpoint(&[ZONES, zone_id], &[])?;
        let deleted = self.delete(url).await?;
        log::info!("Deleted zone {zone_id}: {deleted}");
        Ok(deleted)
    }

    async fn get_records(
        &self,
        zone_id: &str,
        filter: Option<&RecordsFilter>,
    ) -> Result<Vec<Record>> {
        check_id("zone_id", zone_id)?;
        let query = filter.map(RecordsFilter::query_pairs).unwrap_or_default();
        let url = self.endpoint(&[ZONES, zone_id, RECORDS], &query)?;
        let resp: RecordsResponse = self.get(url).await?;
        Ok(resp.records)
    }

    async fn create_record(&self, zone_id: &str, record: &Record) -> Result<Record> {
        check_id("zone_id", zone_id)?;
        let url = self.endpoint(&[ZONES, zone_id, RECORDS], &[])?;
        let resp: RecordResponse = self.post(url, record).await?;
        log::info!(
            "Created {} record {} in zone {zone_id}",
            resp.record.record_type,
            resp.record.name
        );
        Ok(resp.record)
    }

    async fn delete_record(&self, zone_id: &str, record_id: &str) -> Result<bool> {
        check_id("zone_id", zone_id)?;
        check_id("record_id", record_id)?;
        let url = self.endpoint(&[ZONES, zone_id, RECORDS, record_id], &[])?;
        let deleted = self.delete(url).await?;
        log::info!("Deleted record {record_id} in zone {zone_id}: {deleted}");
        Ok(deleted)
    }
}
