//! Quantity input bounds.

/// Result of clamping a quantity input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantityAdjustment {
    pub value: i64,
    /// Set when the value was pulled down to the maximum.
    pub warning: Option<String>,
}

/// Clamp to `[min, max]`. Exceeding the maximum carries a warning for the user;
/// falling below the minimum is corrected silently.
pub fn clamp_quantity(value: i64, min: i64, max: i64) -> QuantityAdjustment {
    if value < min {
        QuantityAdjustment {
            value: min,
            warning: None,
        }
    } else if value > max {
        QuantityAdjustment {
            value: max,
            warning: Some(format!("Maximum quantity is {}", max)),
        }
    } else {
        QuantityAdjustment {
            value,
            warning: None,
        }
    }
}

/// Clamp raw input text. Non-numeric text is left for the browser to reject.
pub fn clamp_quantity_input(raw: &str, min: i64, max: i64) -> Option<QuantityAdjustment> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .map(|value| clamp_quantity(value, min, max))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_within_bounds_unchanged() {
        assert_eq!(
            clamp_quantity(3, 1, 10),
            QuantityAdjustment {
                value: 3,
                warning: None
            }
        );
    }

    #[test]
    fn test_below_min_snaps_silently() {
        let adj = clamp_quantity(0, 1, 10);
        assert_eq!(adj.value, 1);
        assert_eq!(adj.warning, None);
    }

    #[test]
    fn test_above_max_warns() {
        let adj = clamp_quantity(12, 1, 5);
        assert_eq!(adj.value, 5);
        assert_eq!(adj.warning.as_deref(), Some("Maximum quantity is 5"));
    }

    #[test]
    fn test_raw_input() {
        assert_eq!(clamp_quantity_input(" 7 ", 1, 5).map(|a| a.value), Some(5));
        assert_eq!(clamp_quantity_input("abc", 1, 5), None);
    }
}
