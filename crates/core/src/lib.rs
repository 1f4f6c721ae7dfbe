//! Campaign calendar layout engine.
//!
//! Turns polio campaigns and their rounds into week-aligned table cells for a
//! scrolling calendar view. Everything in this crate is pure and synchronous:
//! callers pass in fully-resolved campaign records plus "today", and get back
//! headers and cell rows whose column spans tile the visible window exactly.
//!
//! Pipeline:
//!
//! ```text
//! windower::get_calendar_data   -> CalendarData (window + headers)
//! campaign::map_campaigns       -> Vec<MappedCampaign>
//! visibility::filter_campaigns  -> campaigns with a date in the window
//! cells::get_rounds_cells       -> CellRow per campaign
//! layout::build_calendar_layout -> all of the above in one call
//! ```

pub mod campaign;
pub mod cells;
pub mod clock;
pub mod error;
pub mod layout;
pub mod period;
pub mod threshold_validation;
pub mod types;
pub mod visibility;
pub mod windower;
