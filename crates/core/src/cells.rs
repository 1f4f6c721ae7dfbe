//! Cell sequences for one calendar row.
//!
//! A row is a list of cells whose `col_span`s (one column per day) tile the
//! visible window exactly. Rounds become round cells, the time between two
//! rounds becomes a campaign-duration cell, and everything else is filled
//! with empty cells: whole weeks from the start of the run, then the
//! remainder.
//!
//! Every candidate cell goes through [`RowBuilder::span`], which either
//! yields the clipped [`Span`] to draw or a [`SkippedReason`]. Skips are kept
//! on the row so callers can tell "not in view" apart from dates that make no
//! sense, instead of silently dropping non-positive spans.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::campaign::{MappedCampaign, SubActivity};
use crate::period::{min_label_span, PeriodType};
use crate::windower::DateWindow;

// ---------------------------------------------------------------------------
// Cells
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CellKind {
    Empty,
    Round,
    CampaignDuration,
    SubActivity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Cell {
    Empty {
        col_span: u32,
        /// 1-based week column the cell sits in.
        week_index: u32,
        is_current_week: bool,
    },
    Round {
        col_span: u32,
        round_number: i32,
        starts_before_window: bool,
        ends_after_window: bool,
    },
    /// Time between the end of `after_round` and the start of the next round.
    CampaignDuration {
        col_span: u32,
        after_round: i32,
        weeks_count: i64,
        show_label: bool,
    },
    SubActivity {
        col_span: u32,
        name: String,
        round_number: Option<i32>,
    },
}

impl Cell {
    pub fn col_span(&self) -> u32 {
        match self {
            Self::Empty { col_span, .. }
            | Self::Round { col_span, .. }
            | Self::CampaignDuration { col_span, .. }
            | Self::SubActivity { col_span, .. } => *col_span,
        }
    }

    pub fn kind(&self) -> CellKind {
        match self {
            Self::Empty { .. } => CellKind::Empty,
            Self::Round { .. } => CellKind::Round,
            Self::CampaignDuration { .. } => CellKind::CampaignDuration,
            Self::SubActivity { .. } => CellKind::SubActivity,
        }
    }
}

// ---------------------------------------------------------------------------
// Skipped cells
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SkippedReason {
    /// Start or end date is not known yet.
    MissingDates,
    /// Neither start nor end falls inside the window.
    OutOfWindow,
    /// End precedes start.
    InvertedSpan { start: NaiveDate, end: NaiveDate },
    /// Entirely covered by cells already placed on the row.
    Overlap {
        start: NaiveDate,
        covered_until: NaiveDate,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedCell {
    pub kind: CellKind,
    pub round_number: Option<i32>,
    pub reason: SkippedReason,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CellRow {
    pub cells: Vec<Cell>,
    pub skipped: Vec<SkippedCell>,
}

impl CellRow {
    pub fn total_span(&self) -> u32 {
        self.cells.iter().map(Cell::col_span).sum()
    }

    pub fn count(&self, kind: CellKind) -> usize {
        self.cells.iter().filter(|c| c.kind() == kind).count()
    }

    /// Skips caused by bad dates rather than by the window.
    pub fn anomalies(&self) -> impl Iterator<Item = &SkippedCell> {
        self.skipped.iter().filter(|s| {
            matches!(
                s.reason,
                SkippedReason::InvertedSpan { .. } | SkippedReason::Overlap { .. }
            )
        })
    }
}

// ---------------------------------------------------------------------------
// Row builder
// ---------------------------------------------------------------------------

/// Inclusive day range that is safe to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Span {
    pub fn col_span(&self) -> u32 {
        u32::try_from((self.end - self.start).num_days() + 1).unwrap_or(0)
    }
}

/// Places cells left to right. `cursor` is the first day not yet covered.
struct RowBuilder {
    window: DateWindow,
    current_week_index: Option<u32>,
    cursor: NaiveDate,
    row: CellRow,
}

impl RowBuilder {
    fn new(window: DateWindow, current_week_index: Option<u32>) -> Self {
        Self {
            window,
            current_week_index,
            cursor: window.first_monday,
            row: CellRow::default(),
        }
    }

    /// Clip `[start, end]` to the part of the window not yet covered.
    ///
    /// Rounds and sub-activities are only drawn when their start or end is
    /// visible. Duration cells may cross the whole window.
    fn span(
        &self,
        kind: CellKind,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Span, SkippedReason> {
        if end < start {
            return Err(SkippedReason::InvertedSpan { start, end });
        }
        if kind != CellKind::CampaignDuration
            && !self.window.contains(start)
            && !self.window.contains(end)
        {
            return Err(SkippedReason::OutOfWindow);
        }
        let clipped_start = start.max(self.window.first_monday);
        let clipped_end = end.min(self.window.last_sunday);
        if clipped_end < clipped_start {
            return Err(SkippedReason::OutOfWindow);
        }
        if clipped_end < self.cursor {
            return Err(SkippedReason::Overlap {
                start,
                covered_until: self.cursor - Duration::days(1),
            });
        }
        Ok(Span {
            start: clipped_start.max(self.cursor),
            end: clipped_end,
        })
    }

    fn place(
        &mut self,
        kind: CellKind,
        round_number: Option<i32>,
        start: NaiveDate,
        end: NaiveDate,
        make_cell: impl FnOnce(u32) -> Cell,
    ) {
        match self.span(kind, start, end) {
            Ok(span) => {
                if span.start > self.cursor {
                    self.fill_empty_until(span.start - Duration::days(1));
                }
                self.row.cells.push(make_cell(span.col_span()));
                self.cursor = span.end + Duration::days(1);
            }
            Err(reason) => self.skip(kind, round_number, reason),
        }
    }

    fn skip(&mut self, kind: CellKind, round_number: Option<i32>, reason: SkippedReason) {
        self.row.skipped.push(SkippedCell {
            kind,
            round_number,
            reason,
        });
    }

    /// Empty cells from the cursor through `until`: seven-day cells from
    /// the cursor, then whatever is left.
    fn fill_empty_until(&mut self, until: NaiveDate) {
        let end = until.min(self.window.last_sunday);
        while self.cursor <= end {
            let remaining = (end - self.cursor).num_days() + 1;
            let chunk = Span {
                start: self.cursor,
                end: self.cursor + Duration::days(remaining.min(7) - 1),
            };
            let week_index = self.cursor_week_index();
            self.row.cells.push(Cell::Empty {
                col_span: chunk.col_span(),
                week_index,
                is_current_week: self.current_week_index == Some(week_index),
            });
            self.cursor = chunk.end + Duration::days(1);
        }
    }

    /// 1-based week column of the cursor, from the days already placed.
    fn cursor_week_index(&self) -> u32 {
        let placed = (self.cursor - self.window.first_monday).num_days();
        u32::try_from(placed / 7 + 1).unwrap_or(0)
    }

    fn finish(mut self) -> CellRow {
        self.fill_empty_until(self.window.last_sunday);
        self.row
    }
}

// ---------------------------------------------------------------------------
// Public builders
// ---------------------------------------------------------------------------

/// Cells for a campaign's main row: its rounds and the gaps between them.
///
/// A gap is drawn from the day after a round ends up to the day before the
/// next round starts (`days_count - 1` days), clipped to the window. Rounds
/// with a missing date draw nothing themselves; the row stays contiguous
/// through empty cells.
pub fn get_rounds_cells(
    campaign: &MappedCampaign,
    current_week_index: Option<u32>,
    window: DateWindow,
    period_type: Option<PeriodType>,
) -> CellRow {
    let mut builder = RowBuilder::new(window, current_week_index);
    let label_span = min_label_span(period_type);

    for round in &campaign.rounds {
        match (round.started_at, round.ended_at) {
            (Some(start), Some(end)) => builder.place(
                CellKind::Round,
                Some(round.number),
                start,
                end,
                |col_span| Cell::Round {
                    col_span,
                    round_number: round.number,
                    starts_before_window: start < window.first_monday,
                    ends_after_window: end > window.last_sunday,
                },
            ),
            _ => builder.skip(
                CellKind::Round,
                Some(round.number),
                SkippedReason::MissingDates,
            ),
        }

        let Some(end) = round.ended_at else {
            continue;
        };
        if round.days_count <= 1 {
            continue;
        }
        let gap = end
            .checked_add_signed(Duration::days(1))
            .zip(end.checked_add_signed(Duration::days(round.days_count - 1)));
        if let Some((gap_start, gap_end)) = gap {
            builder.place(
                CellKind::CampaignDuration,
                Some(round.number),
                gap_start,
                gap_end,
                |col_span| Cell::CampaignDuration {
                    col_span,
                    after_round: round.number,
                    weeks_count: round.weeks_count,
                    show_label: col_span >= label_span,
                },
            );
        }
    }

    builder.finish()
}

/// Cells for a row of sub-activities, placed in start order with empty
/// cells in between.
pub fn get_sub_activities_cells(
    sub_activities: &[SubActivity],
    current_week_index: Option<u32>,
    window: DateWindow,
) -> CellRow {
    let mut sorted: Vec<&SubActivity> = sub_activities.iter().collect();
    sorted.sort_by_key(|sa| sa.start);

    let mut builder = RowBuilder::new(window, current_week_index);
    for sa in sorted {
        builder.place(
            CellKind::SubActivity,
            sa.round_number,
            sa.start_date(),
            sa.end_date(),
            |col_span| Cell::SubActivity {
                col_span,
                name: sa.name.clone(),
                round_number: sa.round_number,
            },
        );
    }
    builder.finish()
}
