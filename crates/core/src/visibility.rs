//! Which campaigns have anything to show in the visible window.

use crate::campaign::{MappedCampaign, Round};
use crate::windower::DateWindow;

/// The last round with both dates set.
///
/// Scans backwards past rounds with missing dates. When none qualifies the
/// last round is returned as-is (possibly undated); `None` only for a
/// campaign without rounds.
pub fn last_complete_round(rounds: &[Round]) -> Option<&Round> {
    let mut index = rounds.len();
    while index > 0 {
        index -= 1;
        if rounds[index].has_dates() {
            return Some(&rounds[index]);
        }
    }
    rounds.last()
}

fn round_in_window(round: &Round, window: DateWindow) -> bool {
    match (round.started_at, round.ended_at) {
        (Some(start), Some(end)) => window.contains(start) || window.contains(end),
        _ => false,
    }
}

/// A campaign is visible when a dated round starts or ends in the window,
/// when the end of its last complete round plus the following gap lands in
/// the window, or when one of its sub-activities starts or ends in the
/// window.
pub fn is_campaign_visible(campaign: &MappedCampaign, window: DateWindow) -> bool {
    if campaign.rounds.iter().any(|r| round_in_window(r, window)) {
        return true;
    }

    let logical_end = last_complete_round(&campaign.rounds)
        .filter(|r| r.has_dates())
        .and_then(Round::logical_end);
    if logical_end.is_some_and(|end| window.contains(end)) {
        return true;
    }

    campaign
        .sub_activities
        .iter()
        .any(|sa| window.contains(sa.start_date()) || window.contains(sa.end_date()))
}

/// Keep only visible campaigns, in input order.
pub fn filter_campaigns(campaigns: Vec<MappedCampaign>, window: DateWindow) -> Vec<MappedCampaign> {
    campaigns
        .into_iter()
        .filter(|c| is_campaign_visible(c, window))
        .collect()
}
