//! Carousel configuration and the storefront's preset variants.

use serde::{Deserialize, Serialize};
use web_time::Duration;

use super::gesture::GestureConfig;
use super::indicator::IndicatorMode;
use super::position::WrapPolicy;
use super::viewport::{BreakpointTable, Sizing};
use crate::error::WidgetError;

/// Viewport width at or below which the page is treated as mobile.
pub const MOBILE_MAX_WIDTH: f32 = 768.0;

/// Everything that distinguishes one carousel instance from another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    pub sizing: Sizing,
    /// Autoplay period; `None` disables autoplay.
    pub autoplay_interval_ms: Option<u64>,
    /// End-of-range behaviour for buttons, keys and swipes. Autoplay always wraps.
    pub wrap: WrapPolicy,
    pub gesture: GestureConfig,
    pub indicators: IndicatorMode,
    pub resize_debounce_ms: u64,
    /// Only follow mouse drags on mobile-sized viewports; touch is always followed.
    pub mouse_drag_mobile_only: bool,
    pub mobile_max_width: f32,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self::category_strip()
    }
}

impl CarouselConfig {
    /// Home page category strip: measured items, 15px gap, 5s autoplay, page dots.
    pub fn category_strip() -> Self {
        Self {
            sizing: Sizing::Fluid {
                item_width_px: 200.0,
                gap_px: 15.0,
                min_items: 1,
            },
            autoplay_interval_ms: Some(5000),
            wrap: WrapPolicy::Clamp,
            gesture: GestureConfig::default(),
            indicators: IndicatorMode::PerPage,
            resize_debounce_ms: 250,
            mouse_drag_mobile_only: false,
            mobile_max_width: MOBILE_MAX_WIDTH,
        }
    }

    /// Mobile category slider: 160px cards, at least two per view, slide dots.
    pub fn mobile_categories() -> Self {
        Self {
            sizing: Sizing::Fluid {
                item_width_px: 160.0,
                gap_px: 12.0,
                min_items: 2,
            },
            autoplay_interval_ms: None,
            indicators: IndicatorMode::PerSlide,
            mouse_drag_mobile_only: true,
            ..Self::category_strip()
        }
    }

    /// Desktop category carousel: 180px cards with 20px gaps, wrapping, 4s autoplay.
    pub fn desktop_categories() -> Self {
        Self {
            sizing: Sizing::Fluid {
                item_width_px: 180.0,
                gap_px: 20.0,
                min_items: 1,
            },
            autoplay_interval_ms: Some(4000),
            wrap: WrapPolicy::Wrap,
            indicators: IndicatorMode::None,
            ..Self::category_strip()
        }
    }

    /// Rotating highlight over a card grid: one "slot", 3s period.
    pub fn highlight_rotation() -> Self {
        Self {
            sizing: Sizing::Breakpoints {
                table: BreakpointTable::single(1),
                gap_px: 0.0,
            },
            autoplay_interval_ms: Some(3000),
            wrap: WrapPolicy::Wrap,
            indicators: IndicatorMode::PerSlide,
            ..Self::category_strip()
        }
    }

    pub fn autoplay_interval(&self) -> Option<Duration> {
        self.autoplay_interval_ms.map(Duration::from_millis)
    }

    pub fn validate(&self) -> Result<(), WidgetError> {
        self.sizing.validate()?;
        if self.autoplay_interval_ms == Some(0) {
            return Err(WidgetError::Config(
                "autoplay_interval_ms must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.gesture.resistance) {
            return Err(WidgetError::Config(format!(
                "drag resistance {} outside 0..=1",
                self.gesture.resistance
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_validate() {
        for cfg in [
            CarouselConfig::category_strip(),
            CarouselConfig::mobile_categories(),
            CarouselConfig::desktop_categories(),
            CarouselConfig::highlight_rotation(),
        ] {
            assert!(cfg.validate().is_ok(), "{:?}", cfg);
        }
    }

    #[test]
    fn test_preset_intervals() {
        assert_eq!(
            CarouselConfig::category_strip().autoplay_interval(),
            Some(Duration::from_millis(5000))
        );
        assert_eq!(
            CarouselConfig::desktop_categories().autoplay_interval(),
            Some(Duration::from_millis(4000))
        );
        assert_eq!(
            CarouselConfig::highlight_rotation().autoplay_interval(),
            Some(Duration::from_millis(3000))
        );
        assert_eq!(CarouselConfig::mobile_categories().autoplay_interval(), None);
    }

    #[test]
    fn test_mobile_categories_keeps_two_cards_on_narrow_phones() {
        let sizing = CarouselConfig::mobile_categories().sizing;
        assert_eq!(sizing.resolve(330.0, None).items_per_view, 2);
        assert_eq!(sizing.resolve(375.0, None).items_per_view, 2);
        assert_eq!(sizing.resolve(120.0, None).items_per_view, 2);
    }

    #[test]
    fn test_highlight_rotation_shows_one_slot() {
        let m = CarouselConfig::highlight_rotation().sizing.resolve(1140.0, None);
        assert_eq!(m.items_per_view, 1);
        assert_eq!(m.item_extent_px, 1140.0);
    }

    #[test]
    fn test_rejects_bad_values() {
        let mut cfg = CarouselConfig::category_strip();
        cfg.autoplay_interval_ms = Some(0);
        assert!(cfg.validate().is_err());

        let mut cfg = CarouselConfig::category_strip();
        cfg.gesture.resistance = 1.5;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let cfg: CarouselConfig = toml::from_str(
            r#"
            autoplay_interval_ms = 3000
            wrap = "wrap"

            [gesture]
            slow_distance_px = 100.0
            "#,
        )
        .unwrap();
        assert_eq!(cfg.wrap, WrapPolicy::Wrap);
        assert_eq!(cfg.gesture.slow_distance_px, 100.0);
        assert_eq!(cfg.gesture.fast_distance_px, 30.0);
        assert_eq!(cfg.indicators, IndicatorMode::PerPage);
    }
}
