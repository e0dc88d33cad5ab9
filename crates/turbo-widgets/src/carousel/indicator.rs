//! Indicator dots derived from the carousel position.

use serde::{Deserialize, Serialize};

/// How indicator dots map to positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorMode {
    /// No indicators rendered.
    #[default]
    None,
    /// One dot per item.
    PerSlide,
    /// One dot per page of `items_per_view` items.
    PerPage,
}

/// A single dot: where clicking it goes, and whether it is highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indicator {
    pub target_index: usize,
    pub active: bool,
}

/// Number of pages needed to show every item.
pub fn page_count(item_count: usize, items_per_view: usize) -> usize {
    item_count.div_ceil(items_per_view.max(1))
}

/// Project the position onto a row of indicators.
pub fn indicators(
    mode: IndicatorMode,
    current_index: usize,
    items_per_view: usize,
    item_count: usize,
) -> Vec<Indicator> {
    let per_view = items_per_view.max(1);
    let max_index = item_count.saturating_sub(per_view);

    match mode {
        IndicatorMode::None => Vec::new(),
        IndicatorMode::PerSlide => (0..item_count)
            .map(|i| Indicator {
                target_index: i.min(max_index),
                active: i == current_index,
            })
            .collect(),
        IndicatorMode::PerPage => {
            let targets: Vec<usize> = (0..page_count(item_count, per_view))
                .map(|page| (page * per_view).min(max_index))
                .collect();
            // The last page is usually clamped to max_index; prefer the page
            // that lands exactly on the current index.
            let active_page = targets
                .iter()
                .rposition(|t| *t == current_index)
                .unwrap_or(current_index / per_view);
            targets
                .into_iter()
                .enumerate()
                .map(|(page, target_index)| Indicator {
                    target_index,
                    active: page == active_page,
                })
                .collect()
        }
    }
}
