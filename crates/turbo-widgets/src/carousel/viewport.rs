//! Viewport metrics: how many items fit and how wide one step is.

use serde::{Deserialize, Serialize};

use crate::error::WidgetError;

/// One responsive tier: containers up to `max_width` show `items_per_view` items.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Breakpoint {
    pub max_width: f32,
    pub items_per_view: usize,
}

impl Breakpoint {
    pub const fn new(max_width: f32, items_per_view: usize) -> Self {
        Self {
            max_width,
            items_per_view,
        }
    }
}

/// Breakpoint tiers ordered by width, smallest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BreakpointTable(Vec<Breakpoint>);

impl BreakpointTable {
    /// Build a validated table.
    pub fn new(tiers: Vec<Breakpoint>) -> Result<Self, WidgetError> {
        let table = Self(tiers);
        table.validate()?;
        Ok(table)
    }

    /// A single tier that applies at every width.
    pub fn single(items_per_view: usize) -> Self {
        Self(vec![Breakpoint::new(f32::MAX, items_per_view.max(1))])
    }

    pub fn validate(&self) -> Result<(), WidgetError> {
        if self.0.is_empty() {
            return Err(WidgetError::InvalidBreakpoints("no tiers".to_string()));
        }
        if let Some(tier) = self.0.iter().find(|t| t.items_per_view == 0) {
            return Err(WidgetError::InvalidBreakpoints(format!(
                "tier {}px shows zero items",
                tier.max_width
            )));
        }
        if self.0.windows(2).any(|w| w[0].max_width >= w[1].max_width) {
            return Err(WidgetError::InvalidBreakpoints(
                "tiers must be sorted by increasing max_width".to_string(),
            ));
        }
        Ok(())
    }

    /// Items per view for the first tier that fits `width`; the widest tier
    /// applies beyond every threshold.
    pub fn resolve(&self, width: f32) -> usize {
        self.0
            .iter()
            .find(|tier| width <= tier.max_width)
            .or_else(|| self.0.last())
            .map(|tier| tier.items_per_view.max(1))
            .unwrap_or(1)
    }

    pub fn tiers(&self) -> &[Breakpoint] {
        &self.0
    }
}

/// How a carousel sizes its items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Sizing {
    /// Items per view come from a breakpoint table and share the container width.
    Breakpoints {
        table: BreakpointTable,
        #[serde(default)]
        gap_px: f32,
    },
    /// Items have a fixed (or measured) width; as many as fit are shown.
    Fluid {
        item_width_px: f32,
        #[serde(default)]
        gap_px: f32,
        /// Lower bound on items per view, even when fewer whole items fit.
        #[serde(default = "default_min_items")]
        min_items: usize,
    },
}

fn default_min_items() -> usize {
    1
}

/// Resolved layout numbers for the current container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportMetrics {
    /// Always at least 1.
    pub items_per_view: usize,
    /// Distance the track moves per index step, gap included.
    pub item_extent_px: f32,
}

impl Sizing {
    /// Resolve metrics for a container. `measured_item_width` overrides the
    /// configured width in fluid mode when the host can measure a rendered item.
    pub fn resolve(&self, container_width: f32, measured_item_width: Option<f32>) -> ViewportMetrics {
        let container_width = container_width.max(0.0);
        match self {
            Sizing::Breakpoints { table, gap_px } => {
                let items_per_view = table.resolve(container_width);
                let item_extent_px =
                    ((container_width + gap_px.max(0.0)) / items_per_view as f32).max(0.0);
                ViewportMetrics {
                    items_per_view,
                    item_extent_px,
                }
            }
            Sizing::Fluid {
                item_width_px,
                gap_px,
                min_items,
            } => {
                let width = measured_item_width
                    .filter(|w| *w > 0.0)
                    .unwrap_or(*item_width_px)
                    .max(0.0);
                let item_extent_px = width + gap_px.max(0.0);
                let fitted = if item_extent_px > 0.0 {
                    (container_width / item_extent_px).floor() as usize
                } else {
                    0
                };
                let items_per_view = fitted.max(*min_items).max(1);
                ViewportMetrics {
                    items_per_view,
                    item_extent_px,
                }
            }
        }
    }

    pub fn validate(&self) -> Result<(), WidgetError> {
        match self {
            Sizing::Breakpoints { table, .. } => table.validate(),
            Sizing::Fluid { item_width_px, .. } if *item_width_px <= 0.0 => Err(
                WidgetError::Config("fluid item_width_px must be positive".to_string()),
            ),
            Sizing::Fluid { .. } => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bootstrap_table() -> BreakpointTable {
        BreakpointTable::new(vec![
            Breakpoint::new(576.0, 2),
            Breakpoint::new(768.0, 3),
            Breakpoint::new(992.0, 4),
            Breakpoint::new(1200.0, 6),
        ])
        .unwrap()
    }

    // === Breakpoint Tests ===

    #[test]
    fn test_first_matching_tier_wins() {
        let table = bootstrap_table();
        assert_eq!(table.resolve(320.0), 2);
        assert_eq!(table.resolve(576.0), 2);
        assert_eq!(table.resolve(577.0), 3);
        assert_eq!(table.resolve(992.0), 4);
    }

    #[test]
    fn test_wider_than_every_tier_uses_largest() {
        assert_eq!(bootstrap_table().resolve(1920.0), 6);
    }

    #[test]
    fn test_invalid_tables_rejected() {
        assert!(BreakpointTable::new(vec![]).is_err());
        assert!(BreakpointTable::new(vec![Breakpoint::new(500.0, 0)]).is_err());
        assert!(BreakpointTable::new(vec![
            Breakpoint::new(992.0, 4),
            Breakpoint::new(576.0, 2),
        ])
        .is_err());
    }

    // === Sizing Tests ===

    #[test]
    fn test_breakpoint_extent_shares_container() {
        let sizing = Sizing::Breakpoints {
            table: bootstrap_table(),
            gap_px: 16.0,
        };
        let m = sizing.resolve(704.0, None);
        assert_eq!(m.items_per_view, 3);
        assert!((m.item_extent_px - 240.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_fluid_counts_whole_items() {
        let sizing = Sizing::Fluid {
            item_width_px: 180.0,
            gap_px: 20.0,
            min_items: 1,
        };
        let m = sizing.resolve(1200.0, None);
        assert_eq!(m.items_per_view, 6);
        assert_eq!(m.item_extent_px, 200.0);

        assert_eq!(sizing.resolve(1399.0, None).items_per_view, 6);
    }

    #[test]
    fn test_fluid_prefers_measured_width() {
        let sizing = Sizing::Fluid {
            item_width_px: 160.0,
            gap_px: 15.0,
            min_items: 1,
        };
        let m = sizing.resolve(600.0, Some(185.0));
        assert_eq!(m.item_extent_px, 200.0);
        assert_eq!(m.items_per_view, 3);

        // A zero measurement (element hidden) falls back to the configured width.
        assert_eq!(sizing.resolve(600.0, Some(0.0)).item_extent_px, 175.0);
    }

    #[test]
    fn test_fluid_min_items_floor() {
        let sizing = Sizing::Fluid {
            item_width_px: 160.0,
            gap_px: 12.0,
            min_items: 2,
        };
        // One 172px step fits in 330px, but the floor keeps two cards visible.
        assert_eq!(sizing.resolve(330.0, None).items_per_view, 2);
        assert_eq!(sizing.resolve(516.0, None).items_per_view, 3);
    }

    #[test]
    fn test_fluid_fallback_when_nothing_fits() {
        let sizing = Sizing::Fluid {
            item_width_px: 160.0,
            gap_px: 12.0,
            min_items: 2,
        };
        assert_eq!(sizing.resolve(100.0, None).items_per_view, 2);
        assert_eq!(sizing.resolve(-5.0, None).items_per_view, 2);
    }

    #[test]
    fn test_sizing_from_toml() {
        let sizing: Sizing = toml::from_str(
            r#"
            mode = "breakpoints"
            gap_px = 12.0
            table = [
                { max_width = 576.0, items_per_view = 2 },
                { max_width = 992.0, items_per_view = 4 },
            ]
            "#,
        )
        .unwrap();
        assert!(sizing.validate().is_ok());
        assert_eq!(sizing.resolve(800.0, None).items_per_view, 4);
    }
}
