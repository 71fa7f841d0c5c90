//! Unit categories and their fixed unit tables
//!
//! Every category routes conversions through a single basis unit. Linear
//! categories store the factor that converts one unit into the basis unit;
//! temperature is affine and is handled separately by the converter.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

/// Unit categories for type-safe conversions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export_to = "../target/ts-bindings/")]
pub enum Category {
    Temperature,
    Distance,
    Weight,
    Volume,
    Energy,
    Area,
    Speed,
    Pressure,
}

/// Range validation applied to the input value before converting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangePolicy {
    /// Input must not be below absolute zero in its own unit; Kelvin must not be negative
    AboveAbsoluteZero,
    /// Input must not be negative
    NonNegative,
    /// No range check
    Unbounded,
}

/// Unit definition with conversion factor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitDefinition {
    pub symbol: &'static str,
    pub name: &'static str,
    /// Multiplier to convert to the category's basis unit (unused for temperature)
    pub base_factor: f64,
}

const fn unit(symbol: &'static str, name: &'static str, base_factor: f64) -> UnitDefinition {
    UnitDefinition { symbol, name, base_factor }
}

// Temperature (base: Celsius, affine)
const TEMPERATURE_UNITS: &[UnitDefinition] = &[
    unit("°C", "Celsius", 1.0),
    unit("°F", "Fahrenheit", 1.0),
    unit("K", "Kelvin", 1.0),
];

// Distance (base: meters)
const DISTANCE_UNITS: &[UnitDefinition] = &[
    unit("m", "Meters", 1.0),
    unit("km", "Kilometers", 1000.0),
    unit("cm", "Centimeters", 0.01),
    unit("mm", "Millimeters", 0.001),
    unit("mi", "Miles", 1609.34),
    unit("yd", "Yards", 0.9144),
    unit("ft", "Feet", 0.3048),
    unit("in", "Inches", 0.0254),
];

// Weight (base: kilograms)
const WEIGHT_UNITS: &[UnitDefinition] = &[
    unit("kg", "Kilograms", 1.0),
    unit("g", "Grams", 0.001),
    unit("mg", "Milligrams", 0.000001),
    unit("lb", "Pounds", 0.453592),
    unit("oz", "Ounces", 0.0283495),
    unit("t", "Metric Tons", 1000.0),
];

// Volume (base: liters)
const VOLUME_UNITS: &[UnitDefinition] = &[
    unit("L", "Liters", 1.0),
    unit("mL", "Milliliters", 0.001),
    unit("cup", "Cups", 0.236588),
    unit("gal", "Gallons", 3.78541),
    unit("fl oz", "Fluid Ounces", 0.0295735),
    unit("pint", "Pints", 0.473176),
    unit("quart", "Quarts", 0.946353),
    unit("tbsp", "Tablespoons", 0.0147868),
    unit("tsp", "Teaspoons", 0.00492892),
];

// Energy (base: joules)
const ENERGY_UNITS: &[UnitDefinition] = &[
    unit("J", "Joules", 1.0),
    unit("kJ", "Kilojoules", 1000.0),
    unit("kcal", "Kilocalories", 4184.0),
    unit("BTU", "British Thermal Units", 1055.06),
];

// Area (base: square meters)
const AREA_UNITS: &[UnitDefinition] = &[
    unit("m²", "Square Meters", 1.0),
    unit("km²", "Square Kilometers", 1_000_000.0),
    unit("cm²", "Square Centimeters", 0.0001),
    unit("ha", "Hectares", 10_000.0),
    unit("acre", "Acres", 4046.86),
    unit("ft²", "Square Feet", 0.092903),
    unit("yd²", "Square Yards", 0.836127),
];

// Speed (base: m/s)
const SPEED_UNITS: &[UnitDefinition] = &[
    unit("m/s", "Meters/Second", 1.0),
    unit("km/h", "Kilometers/Hour", 0.277778),
    unit("mph", "Miles/Hour", 0.44704),
    unit("knots", "Knots", 0.51444),
];

// Pressure (base: pascals)
const PRESSURE_UNITS: &[UnitDefinition] = &[
    unit("Pa", "Pascals", 1.0),
    unit("kPa", "Kilopascals", 1000.0),
    unit("atm", "Atmospheres", 101_325.0),
    unit("bar", "Bars", 100_000.0),
    unit("psi", "Pounds/Square Inch", 6894.76),
];

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 8] = [
        Category::Temperature,
        Category::Distance,
        Category::Weight,
        Category::Volume,
        Category::Energy,
        Category::Area,
        Category::Speed,
        Category::Pressure,
    ];

    pub fn all() -> &'static [Category] {
        &Self::ALL
    }

    /// Stable identifier, also used in persisted history
    pub fn id(self) -> &'static str {
        match self {
            Category::Temperature => "temperature",
            Category::Distance => "distance",
            Category::Weight => "weight",
            Category::Volume => "volume",
            Category::Energy => "energy",
            Category::Area => "area",
            Category::Speed => "speed",
            Category::Pressure => "pressure",
        }
    }

    pub fn from_id(id: &str) -> Option<Category> {
        Self::ALL.iter().copied().find(|category| category.id() == id)
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Temperature => "Temperature",
            Category::Distance => "Distance",
            Category::Weight => "Weight",
            Category::Volume => "Volume",
            Category::Energy => "Energy",
            Category::Area => "Area",
            Category::Speed => "Speed",
            Category::Pressure => "Pressure",
        }
    }

    /// Ordered unit table for this category
    pub fn units(self) -> &'static [UnitDefinition] {
        match self {
            Category::Temperature => TEMPERATURE_UNITS,
            Category::Distance => DISTANCE_UNITS,
            Category::Weight => WEIGHT_UNITS,
            Category::Volume => VOLUME_UNITS,
            Category::Energy => ENERGY_UNITS,
            Category::Area => AREA_UNITS,
            Category::Speed => SPEED_UNITS,
            Category::Pressure => PRESSURE_UNITS,
        }
    }

    pub fn unit(self, symbol: &str) -> Option<&'static UnitDefinition> {
        self.units().iter().find(|def| def.symbol == symbol)
    }

    /// The reference unit every conversion in this category passes through
    pub fn basis_unit(self) -> &'static str {
        self.units()[0].symbol
    }

    /// Initial (from, to) pair: the first two units of the table
    pub fn default_units(self) -> (&'static str, &'static str) {
        let units = self.units();
        let to = units.get(1).unwrap_or(&units[0]);
        (units[0].symbol, to.symbol)
    }

    pub fn range_policy(self) -> RangePolicy {
        match self {
            Category::Temperature => RangePolicy::AboveAbsoluteZero,
            Category::Distance | Category::Weight | Category::Volume | Category::Area => {
                RangePolicy::NonNegative
            }
            Category::Energy | Category::Speed | Category::Pressure => RangePolicy::Unbounded,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
