/// Campaigns are identified by the UUID the campaigns API hands out.
pub type CampaignId = uuid::Uuid;

/// Org unit primary keys (countries, regions, districts).
pub type OrgUnitId = i64;
