//! Unit conversion engine
//!
//! Pure, category-scoped conversions. Each call resolves both units against
//! the category's table, applies the category's range policy, then routes the
//! value through the basis unit. Nothing here rounds; rounding happens in
//! [`formatting::format_result`] at the presentation boundary.

pub mod category;
pub mod formatting;

pub use category::{Category, RangePolicy, UnitDefinition};
pub use formatting::format_result;

use crate::shared::error::ConversionError;
use crate::shared::types::QuickCompareItem;

const ERR_BELOW_ABSOLUTE_ZERO: &str = "Temperature is below absolute zero (-273.15°C)";
const ERR_NEGATIVE_KELVIN: &str = "Kelvin temperature cannot be below 0";
const ERR_NEGATIVE_DISTANCE: &str = "Distance cannot be negative";
const ERR_NEGATIVE_WEIGHT: &str = "Weight cannot be negative";
const ERR_NEGATIVE_VOLUME: &str = "Volume cannot be negative";
const ERR_NEGATIVE_AREA: &str = "Area cannot be negative";
const ERR_NEGATIVE_VALUE: &str = "Value cannot be negative";

pub const ABSOLUTE_ZERO_CELSIUS: f64 = -273.15;
pub const ABSOLUTE_ZERO_FAHRENHEIT: f64 = -459.67;

/// Convert `value` from `from_unit` to `to_unit` within `category`
pub fn convert(
    category: Category,
    value: f64,
    from_unit: &str,
    to_unit: &str,
) -> Result<f64, ConversionError> {
    let from = resolve_unit(category, from_unit)?;
    let to = resolve_unit(category, to_unit)?;

    if !value.is_finite() {
        return Err(ConversionError::InvalidNumber { input: value.to_string() });
    }

    check_range(category, value, from)?;

    // Same unit, no conversion needed
    if from.symbol == to.symbol {
        return Ok(value);
    }

    let result = match category {
        Category::Temperature => from_celsius(category, to_celsius(category, value, from)?, to)?,
        _ => (value * from.base_factor) / to.base_factor,
    };

    if !result.is_finite() {
        return Err(ConversionError::NonFinite {
            value,
            from_unit: from.symbol.to_string(),
            to_unit: to.symbol.to_string(),
        });
    }

    tracing::trace!(%category, value, from = from.symbol, to = to.symbol, result, "converted");
    Ok(result)
}

/// Read a raw input string as a conversion value.
///
/// Accepts surrounding whitespace; rejects empty input and anything that does
/// not parse to a finite number.
pub fn parse_value(raw: &str) -> Result<f64, ConversionError> {
    let trimmed = raw.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ConversionError::InvalidNumber { input: raw.to_string() }),
    }
}

/// Convert `value` into every other unit of the category.
///
/// Units whose conversion fails are left out of the result.
pub fn quick_compare(
    category: Category,
    value: f64,
    from_unit: &str,
    precision: u8,
) -> Result<Vec<QuickCompareItem>, ConversionError> {
    let from = resolve_unit(category, from_unit)?;

    Ok(category
        .units()
        .iter()
        .filter(|to| to.symbol != from.symbol)
        .filter_map(|to| {
            convert(category, value, from.symbol, to.symbol)
                .ok()
                .map(|converted| QuickCompareItem {
                    unit: to.symbol.to_string(),
                    value: converted,
                    formatted: format_result(converted, precision),
                })
        })
        .collect())
}

fn resolve_unit(category: Category, symbol: &str) -> Result<&'static UnitDefinition, ConversionError> {
    category.unit(symbol).ok_or_else(|| ConversionError::UnknownUnit {
        category,
        unit: symbol.to_string(),
    })
}

fn check_range(category: Category, value: f64, from: &UnitDefinition) -> Result<(), ConversionError> {
    let domain_error = |message: &str| ConversionError::Domain {
        category,
        message: message.to_string(),
    };

    match category.range_policy() {
        RangePolicy::Unbounded => Ok(()),
        RangePolicy::NonNegative if value < 0.0 => Err(domain_error(negative_value_message(category))),
        RangePolicy::NonNegative => Ok(()),
        RangePolicy::AboveAbsoluteZero => {
            // Compared in the input unit so conversion rounding cannot move the boundary
            let (minimum, message) = match from.symbol {
                "K" => (0.0, ERR_NEGATIVE_KELVIN),
                "°F" => (ABSOLUTE_ZERO_FAHRENHEIT, ERR_BELOW_ABSOLUTE_ZERO),
                _ => (ABSOLUTE_ZERO_CELSIUS, ERR_BELOW_ABSOLUTE_ZERO),
            };
            if value < minimum {
                return Err(domain_error(message));
            }
            Ok(())
        }
    }
}

fn negative_value_message(category: Category) -> &'static str {
    match category {
        Category::Distance => ERR_NEGATIVE_DISTANCE,
        Category::Weight => ERR_NEGATIVE_WEIGHT,
        Category::Volume => ERR_NEGATIVE_VOLUME,
        Category::Area => ERR_NEGATIVE_AREA,
        _ => ERR_NEGATIVE_VALUE,
    }
}

// Formula: C = (F - 32) × 5/9, C = K - 273.15
fn to_celsius(category: Category, value: f64, unit: &UnitDefinition) -> Result<f64, ConversionError> {
    Ok(match unit.symbol {
        "°C" => value,
        "°F" => (value - 32.0) * 5.0 / 9.0,
        "K" => value - 273.15,
        other => {
            return Err(ConversionError::UnknownUnit {
                category,
                unit: other.to_string(),
            })
        }
    })
}

// Formula: F = (C × 9/5) + 32, K = C + 273.15
fn from_celsius(category: Category, celsius: f64, unit: &UnitDefinition) -> Result<f64, ConversionError> {
    Ok(match unit.symbol {
        "°C" => celsius,
        "°F" => (celsius * 9.0 / 5.0) + 32.0,
        "K" => celsius + 273.15,
        other => {
            return Err(ConversionError::UnknownUnit {
                category,
                unit: other.to_string(),
            })
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        let scale = expected.abs().max(1.0);
        assert!(
            (actual - expected).abs() <= 1e-9 * scale,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_identity_is_exact_for_every_unit() {
        for category in Category::all() {
            for unit in category.units() {
                for value in [0.0, 1.0, 37.5, 123456.789, 0.1 + 0.2] {
                    assert_eq!(convert(*category, value, unit.symbol, unit.symbol).unwrap(), value);
                }
            }
        }
    }

    #[test]
    fn test_round_trip_within_tolerance() {
        for category in Category::all() {
            for a in category.units() {
                for b in category.units() {
                    let value = 42.125;
                    let there = convert(*category, value, a.symbol, b.symbol).unwrap();
                    let back = convert(*category, there, b.symbol, a.symbol).unwrap();
                    assert!(
                        (back - value).abs() <= 1e-9 * value.abs(),
                        "{} {} -> {} -> back = {}",
                        category,
                        a.symbol,
                        b.symbol,
                        back
                    );
                }
            }
        }
    }

    #[test]
    fn test_temperature_conversions() {
        assert_close(convert(Category::Temperature, 100.0, "°C", "°F").unwrap(), 212.0);
        assert_close(convert(Category::Temperature, 32.0, "°F", "°C").unwrap(), 0.0);
        assert_close(convert(Category::Temperature, 0.0, "°C", "K").unwrap(), 273.15);
        assert_close(convert(Category::Temperature, -40.0, "°F", "°C").unwrap(), -40.0);
        assert_eq!(convert(Category::Temperature, -273.15, "°C", "K").unwrap(), 0.0);
    }

    #[test]
    fn test_below_absolute_zero_rejected() {
        let err = convert(Category::Temperature, -300.0, "°C", "°C").unwrap_err();
        assert!(matches!(err, ConversionError::Domain { category: Category::Temperature, .. }));

        assert!(convert(Category::Temperature, -500.0, "°F", "°C").is_err());
        assert!(convert(Category::Temperature, -459.67, "°F", "K").is_ok());
        assert!(convert(Category::Temperature, -459.6700001, "°F", "K").is_err());
    }

    #[test]
    fn test_just_below_absolute_zero_rejected() {
        for to in ["°C", "°F", "K"] {
            let err = convert(Category::Temperature, -273.1500000005, "°C", to).unwrap_err();
            assert_eq!(err.to_string(), ERR_BELOW_ABSOLUTE_ZERO);
        }
        assert!(convert(Category::Temperature, -0.0000001, "K", "°C").is_err());
    }

    #[test]
    fn test_negative_kelvin_rejected() {
        let err = convert(Category::Temperature, -1.0, "K", "°C").unwrap_err();
        assert_eq!(err.to_string(), ERR_NEGATIVE_KELVIN);
    }

    #[test]
    fn test_distance() {
        assert_eq!(convert(Category::Distance, 1.0, "km", "m").unwrap(), 1000.0);
        assert_close(convert(Category::Distance, 1.0, "mi", "km").unwrap(), 1.60934);
        assert_eq!(format_result(convert(Category::Distance, 1.0, "mi", "m").unwrap(), 6), "1609.34");
        assert_close(convert(Category::Distance, 12.0, "in", "ft").unwrap(), 1.0);

        let err = convert(Category::Distance, -5.0, "m", "km").unwrap_err();
        assert_eq!(err.to_string(), ERR_NEGATIVE_DISTANCE);
    }

    #[test]
    fn test_weight() {
        assert_eq!(convert(Category::Weight, 1000.0, "g", "kg").unwrap(), 1.0);
        assert_close(convert(Category::Weight, 1.0, "t", "kg").unwrap(), 1000.0);
        assert!(convert(Category::Weight, -0.5, "kg", "lb").is_err());
    }

    #[test]
    fn test_volume_and_area_reject_negative() {
        assert_close(convert(Category::Volume, 1.0, "L", "mL").unwrap(), 1000.0);
        assert!(convert(Category::Volume, -1.0, "L", "cup").is_err());
        assert_close(convert(Category::Area, 1.0, "ha", "m²").unwrap(), 10_000.0);
        assert!(convert(Category::Area, -1.0, "acre", "ha").is_err());
    }

    #[test]
    fn test_unbounded_categories_accept_negative() {
        assert_close(convert(Category::Energy, -1.0, "kcal", "J").unwrap(), -4184.0);
        assert_close(convert(Category::Speed, -36.0, "km/h", "m/s").unwrap(), -36.0 * 0.277778);
        assert_close(convert(Category::Pressure, -1.0, "bar", "kPa").unwrap(), -100.0);
    }

    #[test]
    fn test_speed_and_pressure() {
        assert_eq!(format_result(convert(Category::Speed, 1.0, "knots", "km/h").unwrap(), 6), "1.851983");
        assert_eq!(format_result(convert(Category::Speed, 100.0, "km/h", "m/s").unwrap(), 6), "27.7778");
        assert_close(convert(Category::Pressure, 1.0, "atm", "Pa").unwrap(), 101_325.0);
    }

    #[test]
    fn test_unknown_unit() {
        let err = convert(Category::Distance, 1.0, "furlong", "m").unwrap_err();
        assert_eq!(
            err,
            ConversionError::UnknownUnit {
                category: Category::Distance,
                unit: "furlong".to_string()
            }
        );
        // Units from another category are unknown too
        assert!(convert(Category::Distance, 1.0, "m", "kg").is_err());
    }

    #[test]
    fn test_non_finite_input_rejected() {
        assert!(matches!(
            convert(Category::Energy, f64::NAN, "J", "kJ"),
            Err(ConversionError::InvalidNumber { .. })
        ));
        assert!(convert(Category::Energy, f64::INFINITY, "J", "kJ").is_err());
    }

    #[test]
    fn test_overflow_rejected() {
        let err = convert(Category::Area, f64::MAX, "km²", "cm²").unwrap_err();
        assert!(matches!(err, ConversionError::NonFinite { .. }));
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value(" 12.5 ").unwrap(), 12.5);
        assert_eq!(parse_value("-3").unwrap(), -3.0);
        assert!(parse_value("").is_err());
        assert!(parse_value("abc").is_err());
        assert!(parse_value("inf").is_err());
        assert!(parse_value("NaN").is_err());
    }

    #[test]
    fn test_quick_compare_lists_other_units() {
        let items = quick_compare(Category::Distance, 1.0, "km", 2).unwrap();
        assert_eq!(items.len(), Category::Distance.units().len() - 1);
        assert!(items.iter().all(|item| item.unit != "km"));

        let meters = items.iter().find(|item| item.unit == "m").unwrap();
        assert_eq!(meters.formatted, "1000");
    }

    #[test]
    fn test_quick_compare_skips_failures() {
        let items = quick_compare(Category::Weight, -1.0, "kg", 6).unwrap();
        assert!(items.is_empty());
        assert!(quick_compare(Category::Weight, 1.0, "stone", 6).is_err());
    }
}
