//! Whole-calendar layout: window, static columns and one row per campaign.
//!
//! This is the entry point the HTTP layer calls. It chains the mapper, the
//! visibility filter and the cell builders for a single render pass.

use serde::{Deserialize, Serialize};

use crate::campaign::{map_campaigns, MappedCampaign, RawCampaign, SubActivity};
use crate::cells::{get_rounds_cells, get_sub_activities_cells, CellRow};
use crate::error::CoreError;
use crate::threshold_validation::validate_count_range;
use crate::types::{CampaignId, OrgUnitId};
use crate::visibility::filter_campaigns;
use crate::windower::CalendarData;

/// Maximum number of campaigns accepted in a single layout pass.
pub const MAX_LAYOUT_CAMPAIGNS: usize = 2000;

// ---------------------------------------------------------------------------
// Static columns
// ---------------------------------------------------------------------------

/// What the person looking at the calendar is allowed to do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewerCapabilities {
    #[serde(default)]
    pub can_edit: bool,
}

/// Fixed columns drawn left of the day columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StaticColumn {
    Edit,
    Name,
    Country,
    Rounds,
}

/// Static header columns for `viewer`. The edit column is only shown to
/// viewers who can edit campaigns.
pub fn static_columns(viewer: &ViewerCapabilities) -> Vec<StaticColumn> {
    let mut columns = Vec::with_capacity(4);
    if viewer.can_edit {
        columns.push(StaticColumn::Edit);
    }
    columns.extend([StaticColumn::Name, StaticColumn::Country, StaticColumn::Rounds]);
    columns
}

// ---------------------------------------------------------------------------
// Rows
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubActivityRow {
    /// Owning round, `None` for sub-activities that match no round.
    pub round_number: Option<i32>,
    pub cells: CellRow,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CampaignRow {
    pub campaign_id: CampaignId,
    pub name: String,
    pub country: Option<String>,
    pub country_id: Option<OrgUnitId>,
    pub is_test: bool,
    pub on_hold: bool,
    pub is_preventive: bool,
    pub round_count: usize,
    pub cells: CellRow,
    /// One row per round that has sub-activities in view, then one row for
    /// sub-activities attached to no round.
    pub sub_activity_rows: Vec<SubActivityRow>,
}

impl CampaignRow {
    pub fn skipped_count(&self) -> usize {
        self.cells.skipped.len()
            + self
                .sub_activity_rows
                .iter()
                .map(|r| r.cells.skipped.len())
                .sum::<usize>()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarLayout {
    pub calendar: CalendarData,
    pub columns: Vec<StaticColumn>,
    pub rows: Vec<CampaignRow>,
}

pub fn build_campaign_row(campaign: &MappedCampaign, calendar: &CalendarData) -> CampaignRow {
    let window = calendar.window();
    let cells = get_rounds_cells(
        campaign,
        calendar.current_week_index,
        window,
        calendar.period_type,
    );
    let mut sub_activity_rows: Vec<SubActivityRow> = campaign
        .rounds
        .iter()
        .filter(|r| r.has_sub_activities())
        .map(|r| SubActivityRow {
            round_number: Some(r.number),
            cells: get_sub_activities_cells(&r.sub_activities, calendar.current_week_index, window),
        })
        .collect();

    let unattached: Vec<SubActivity> = campaign
        .sub_activities
        .iter()
        .filter(|sa| {
            !campaign
                .rounds
                .iter()
                .any(|r| sa.round_number == Some(r.number))
        })
        .cloned()
        .collect();
    if !unattached.is_empty() {
        sub_activity_rows.push(SubActivityRow {
            round_number: None,
            cells: get_sub_activities_cells(&unattached, calendar.current_week_index, window),
        });
    }

    CampaignRow {
        campaign_id: campaign.id,
        name: campaign.name.clone(),
        country: campaign.country.clone(),
        country_id: campaign.country_id,
        is_test: campaign.is_test,
        on_hold: campaign.on_hold,
        is_preventive: campaign.is_preventive,
        round_count: campaign.rounds.len(),
        cells,
        sub_activity_rows,
    }
}

/// Map, filter and lay out `raw` campaigns for `calendar`'s window.
///
/// Rows keep the input order of the campaigns that survive the filter.
pub fn build_calendar_layout(
    raw: &[RawCampaign],
    calendar: CalendarData,
    viewer: &ViewerCapabilities,
) -> Result<CalendarLayout, CoreError> {
    validate_count_range(raw.len(), MAX_LAYOUT_CAMPAIGNS, "Calendar layout")?;

    let window = calendar.window();
    let visible = filter_campaigns(map_campaigns(raw, window), window);
    let rows = visible
        .iter()
        .map(|c| build_campaign_row(c, &calendar))
        .collect();

    Ok(CalendarLayout {
        columns: static_columns(viewer),
        calendar,
        rows,
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use uuid::Uuid;

    use super::*;
    use crate::campaign::{RawRound, RawSubActivity};
    use crate::cells::CellKind;
    use crate::period::CalendarConfig;
    use crate::windower::get_calendar_data;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn january() -> CalendarData {
        get_calendar_data(&CalendarConfig::uniform(4), day(2024, 1, 15), None, day(2024, 1, 17)).unwrap()
    }

    fn raw(id: u128, rounds: Vec<(i32, Option<NaiveDate>, Option<NaiveDate>)>) -> RawCampaign {
        RawCampaign {
            id: Uuid::from_u128(id),
            obr_name: format!("OBR-{id}"),
            top_level_org_unit_name: Some("Chad".to_string()),
            top_level_org_unit_id: Some(12),
            is_preventive: false,
            is_test: false,
            on_hold: false,
            separate_scopes_per_round: false,
            scopes: vec![],
            rounds: rounds
                .into_iter()
                .map(|(number, started_at, ended_at)| RawRound {
                    number,
                    started_at,
                    ended_at,
                    target_population: None,
                    vaccine_names: None,
                    scopes: vec![],
                })
                .collect(),
            sub_activities: vec![],
        }
    }

    #[test]
    fn edit_column_requires_capability() {
        assert_eq!(
            static_columns(&ViewerCapabilities { can_edit: true }),
            [StaticColumn::Edit, StaticColumn::Name, StaticColumn::Country, StaticColumn::Rounds]
        );
        assert_eq!(
            static_columns(&ViewerCapabilities::default()),
            [StaticColumn::Name, StaticColumn::Country, StaticColumn::Rounds]
        );
    }

    #[test]
    fn layout_keeps_only_visible_campaigns() {
        let campaigns = vec![
            raw(1, vec![(1, Some(day(2024, 1, 2)), Some(day(2024, 1, 5)))]),
            raw(2, vec![(1, Some(day(2024, 6, 2)), Some(day(2024, 6, 5)))]),
            raw(3, vec![
                (1, Some(day(2024, 1, 8)), Some(day(2024, 1, 10))),
                (2, Some(day(2024, 1, 22)), Some(day(2024, 1, 24))),
            ]),
        ];
        let layout = build_calendar_layout(&campaigns, january(), &ViewerCapabilities::default()).unwrap();

        let ids: Vec<Uuid> = layout.rows.iter().map(|r| r.campaign_id).collect();
        assert_eq!(ids, [Uuid::from_u128(1), Uuid::from_u128(3)]);
        for row in &layout.rows {
            assert_eq!(row.cells.total_span(), 28);
        }
        assert_eq!(layout.rows[1].cells.count(CellKind::Round), 2);
        assert_eq!(layout.rows[1].cells.count(CellKind::CampaignDuration), 1);
    }

    #[test]
    fn sub_activity_rows_per_round() {
        let mut campaign = raw(
            1,
            vec![
                (1, Some(day(2024, 1, 2)), Some(day(2024, 1, 5))),
                (2, Some(day(2024, 1, 15)), Some(day(2024, 1, 18))),
            ],
        );
        campaign.sub_activities = vec![RawSubActivity {
            name: "Mop-up".to_string(),
            start_date: Some(day(2024, 1, 20)),
            end_date: Some(day(2024, 1, 23)),
            round_number: Some(2),
        }];

        let layout = build_calendar_layout(&[campaign], january(), &ViewerCapabilities::default()).unwrap();
        let row = &layout.rows[0];
        assert_eq!(row.sub_activity_rows.len(), 1);
        assert_eq!(row.sub_activity_rows[0].round_number, Some(2));
        assert_eq!(row.sub_activity_rows[0].cells.total_span(), 28);
        assert_eq!(row.sub_activity_rows[0].cells.count(CellKind::SubActivity), 1);
        assert_eq!(row.skipped_count(), 0);
    }

    #[test]
    fn sub_activities_without_a_round_get_their_own_row() {
        let mut campaign = raw(1, vec![(1, Some(day(2023, 10, 2)), Some(day(2023, 10, 5)))]);
        campaign.sub_activities = vec![
            RawSubActivity {
                name: "Orphan".to_string(),
                start_date: Some(day(2024, 1, 8)),
                end_date: Some(day(2024, 1, 9)),
                round_number: None,
            },
            RawSubActivity {
                name: "Stale round".to_string(),
                start_date: Some(day(2024, 1, 22)),
                end_date: Some(day(2024, 1, 23)),
                round_number: Some(9),
            },
        ];

        let layout = build_calendar_layout(&[campaign], january(), &ViewerCapabilities::default()).unwrap();
        let row = &layout.rows[0];
        assert_eq!(row.cells.count(CellKind::Round), 0);
        assert_eq!(row.sub_activity_rows.len(), 1);
        assert_eq!(row.sub_activity_rows[0].round_number, None);
        assert_eq!(row.sub_activity_rows[0].cells.count(CellKind::SubActivity), 2);
        assert_eq!(row.sub_activity_rows[0].cells.total_span(), 28);
    }

    #[test]
    fn too_many_campaigns_is_rejected() {
        let campaigns: Vec<RawCampaign> = (0..=MAX_LAYOUT_CAMPAIGNS as u128).map(|i| raw(i, vec![])).collect();
        let err = build_calendar_layout(&campaigns, january(), &ViewerCapabilities::default()).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }
}
