//! Campaign records and the mapping into calendar-ready campaigns.
//!
//! Raw records mirror what the campaigns API returns. [`map_campaigns`]
//! turns them into [`MappedCampaign`]s: gaps between consecutive rounds are
//! computed, sub-activities are stretched to whole days and trimmed to the
//! visible window, and each round gets its own sub-activities attached.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{CampaignId, OrgUnitId};
use crate::windower::DateWindow;

// ---------------------------------------------------------------------------
// Raw API records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRound {
    pub number: i32,
    #[serde(default)]
    pub started_at: Option<NaiveDate>,
    #[serde(default)]
    pub ended_at: Option<NaiveDate>,
    #[serde(default)]
    pub target_population: Option<i64>,
    #[serde(default)]
    pub vaccine_names: Option<String>,
    #[serde(default)]
    pub scopes: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSubActivity {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub round_number: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCampaign {
    pub id: CampaignId,
    pub obr_name: String,
    #[serde(default)]
    pub top_level_org_unit_name: Option<String>,
    #[serde(default)]
    pub top_level_org_unit_id: Option<OrgUnitId>,
    #[serde(default)]
    pub is_preventive: bool,
    #[serde(default)]
    pub is_test: bool,
    #[serde(default)]
    pub on_hold: bool,
    #[serde(default)]
    pub separate_scopes_per_round: bool,
    #[serde(default)]
    pub scopes: Vec<Value>,
    #[serde(default)]
    pub rounds: Vec<RawRound>,
    #[serde(default)]
    pub sub_activities: Vec<RawSubActivity>,
}

// ---------------------------------------------------------------------------
// Mapped records
// ---------------------------------------------------------------------------

/// Why a round has the gap it has.
///
/// `days_count` is 0 for every kind except `Scheduled`; the kind keeps
/// "nothing follows" apart from "the next date is not known yet".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GapKind {
    /// The next round's start is known.
    Scheduled,
    /// No further round is expected.
    LastRound,
    /// A next round exists but has no start date.
    NextRoundUndated,
    /// This round has no end date, so no gap can be measured from it.
    RoundUndated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoundGap {
    /// Days from this round's end to the next round's start.
    pub days_count: i64,
    pub weeks_count: i64,
    pub kind: GapKind,
}

impl RoundGap {
    fn none(kind: GapKind) -> Self {
        Self {
            days_count: 0,
            weeks_count: 0,
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubActivity {
    pub name: String,
    pub round_number: Option<i32>,
    /// First day at 00:01.
    pub start: NaiveDateTime,
    /// Last day at 23:59.
    pub end: NaiveDateTime,
}

impl SubActivity {
    pub fn new(
        name: impl Into<String>,
        round_number: Option<i32>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            name: name.into(),
            round_number,
            start: start_date.and_time(day_start()),
            end: end_date.and_time(day_end()),
        }
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end.date()
    }
}

fn day_start() -> NaiveTime {
    NaiveTime::from_hms_opt(0, 1, 0).unwrap_or(NaiveTime::MIN)
}

fn day_end() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 0).unwrap_or(NaiveTime::MIN)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Round {
    pub number: i32,
    pub started_at: Option<NaiveDate>,
    pub ended_at: Option<NaiveDate>,
    pub days_count: i64,
    pub weeks_count: i64,
    pub gap_kind: GapKind,
    pub target_population: Option<i64>,
    pub vaccine_names: Option<String>,
    pub scopes: Vec<Value>,
    pub sub_activities: Vec<SubActivity>,
}

impl Round {
    /// Both start and end are known.
    pub fn has_dates(&self) -> bool {
        self.started_at.is_some() && self.ended_at.is_some()
    }

    pub fn has_sub_activities(&self) -> bool {
        !self.sub_activities.is_empty()
    }

    /// End of the round plus the gap to the next round. `None` when the end
    /// is unknown or the sum leaves the representable calendar.
    pub fn logical_end(&self) -> Option<NaiveDate> {
        self.ended_at
            .and_then(|end| end.checked_add_signed(Duration::days(self.days_count)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MappedCampaign {
    pub id: CampaignId,
    pub name: String,
    pub country: Option<String>,
    pub country_id: Option<OrgUnitId>,
    pub rounds: Vec<Round>,
    /// Every sub-activity that overlaps the window, across rounds.
    pub sub_activities: Vec<SubActivity>,
    pub is_preventive: bool,
    pub is_test: bool,
    pub on_hold: bool,
    pub separate_scopes_per_round: bool,
    pub scopes: Vec<Value>,
}

// ---------------------------------------------------------------------------
// Mapping
// ---------------------------------------------------------------------------

/// Gap between `round` and the round after it.
pub fn round_gap(round: &RawRound, next: Option<&RawRound>, is_preventive: bool) -> RoundGap {
    let Some(end) = round.ended_at else {
        return RoundGap::none(GapKind::RoundUndated);
    };
    let Some(next) = next else {
        return RoundGap::none(GapKind::LastRound);
    };
    match next.started_at {
        Some(next_start) => {
            let days_count = (next_start - end).num_days();
            RoundGap {
                days_count,
                weeks_count: days_count / 7,
                kind: GapKind::Scheduled,
            }
        }
        // Preventive campaigns often never schedule a follow-up date.
        None if is_preventive => RoundGap::none(GapKind::LastRound),
        None => RoundGap::none(GapKind::NextRoundUndated),
    }
}

/// Sub-activities with both dates that overlap `window`, in source order.
fn visible_sub_activities(raw: &[RawSubActivity], window: DateWindow) -> Vec<SubActivity> {
    raw.iter()
        .filter_map(|sa| match (sa.start_date, sa.end_date) {
            (Some(start), Some(end)) => Some(SubActivity::new(
                sa.name.clone(),
                sa.round_number,
                start,
                end,
            )),
            _ => None,
        })
        .filter(|sa| window.overlaps(sa.start_date(), sa.end_date()))
        .collect()
}

pub fn map_campaign(raw: &RawCampaign, window: DateWindow) -> MappedCampaign {
    let sub_activities = visible_sub_activities(&raw.sub_activities, window);

    let rounds = raw
        .rounds
        .iter()
        .enumerate()
        .map(|(index, round)| {
            let gap = round_gap(round, raw.rounds.get(index + 1), raw.is_preventive);
            let round_sub_activities = sub_activities
                .iter()
                .filter(|sa| sa.round_number == Some(round.number))
                .cloned()
                .collect();
            Round {
                number: round.number,
                started_at: round.started_at,
                ended_at: round.ended_at,
                days_count: gap.days_count,
                weeks_count: gap.weeks_count,
                gap_kind: gap.kind,
                target_population: round.target_population,
                vaccine_names: round.vaccine_names.clone(),
                scopes: round.scopes.clone(),
                sub_activities: round_sub_activities,
            }
        })
        .collect();

    MappedCampaign {
        id: raw.id,
        name: raw.obr_name.clone(),
        country: raw.top_level_org_unit_name.clone(),
        country_id: raw.top_level_org_unit_id,
        rounds,
        sub_activities,
        is_preventive: raw.is_preventive,
        is_test: raw.is_test,
        on_hold: raw.on_hold,
        separate_scopes_per_round: raw.separate_scopes_per_round,
        scopes: raw.scopes.clone(),
    }
}

/// Map every raw campaign, preserving input order.
pub fn map_campaigns(raw: &[RawCampaign], window: DateWindow) -> Vec<MappedCampaign> {
    raw.iter().map(|c| map_campaign(c, window)).collect()
}
