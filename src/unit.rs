use crate::scale::Scale;
use regex::{Regex, RegexBuilder};
use serde::Serialize;
use simple_error::{SimpleError, bail, try_with};
use std::fmt;
use std::str::FromStr;

const QUANTITY_PATTERN: &str = r"^\s*(?<val>[-+]?(?:\d+\.?\d*|\.\d+)(?:e[-+]?\d+)?)\s*(?<unit>[a-zμµ]*)\s*$";

/// Length units accepted on input and used for the wire-length column of CSV output
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub enum LengthUnit {
    #[default]
    Millimeter,
    Centimeter,
    Meter,
    Inch,
    Foot,
}

impl LengthUnit {
    pub fn to_str(&self) -> &str {
        match self {
            LengthUnit::Millimeter => "mm",
            LengthUnit::Centimeter => "cm",
            LengthUnit::Meter => "m",
            LengthUnit::Inch => "in",
            LengthUnit::Foot => "ft",
        }
    }

    /// Length of one unit in millimeters
    pub fn millimeters(&self) -> f64 {
        match self {
            LengthUnit::Millimeter => 1.0,
            LengthUnit::Centimeter => 10.0,
            LengthUnit::Meter => 1000.0,
            LengthUnit::Inch => 25.4,
            LengthUnit::Foot => 304.8,
        }
    }

    pub fn to_mm(&self, val: f64) -> f64 {
        val * self.millimeters()
    }

    pub fn from_mm(&self, mm: f64) -> f64 {
        mm / self.millimeters()
    }
}

impl FromStr for LengthUnit {
    type Err = SimpleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "mm" | "millimeter" | "millimeters" => Ok(LengthUnit::Millimeter),
            "cm" | "centimeter" | "centimeters" => Ok(LengthUnit::Centimeter),
            "m" | "meter" | "meters" => Ok(LengthUnit::Meter),
            "in" | "inch" | "inches" | "\"" => Ok(LengthUnit::Inch),
            "ft" | "foot" | "feet" | "'" => Ok(LengthUnit::Foot),
            _ => bail!("length unit '{}' not recognized, use mm, cm, m, in or ft", s),
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

/// Splits "12.5mm" into its numeric value and (lower-cased) unit suffix
fn split_quantity(s: &str) -> Result<(f64, String), SimpleError> {
    let re = try_with!(
        RegexBuilder::new(QUANTITY_PATTERN)
            .case_insensitive(true)
            .build(),
        "invalid quantity pattern"
    );
    let caps = match re.captures(s) {
        Some(caps) => caps,
        None => bail!("'{}' is not a number with an optional unit", s),
    };
    let val = try_with!(caps["val"].parse::<f64>(), "'{}' is not a valid number", s);
    Ok((val, caps["unit"].to_string()))
}

/// Parses a length such as `400`, `400mm`, `15.75in` or `0.2 m` into millimeters.
/// A bare number is taken as millimeters.
pub fn parse_length_mm(s: &str) -> Result<f64, SimpleError> {
    let (val, unit) = split_quantity(s)?;
    let unit = LengthUnit::from_str(&unit.to_lowercase())?;
    Ok(unit.to_mm(val))
}

/// Parses a frequency such as `10`, `10MHz`, `7100kHz` or `1.8e6Hz` into megahertz.
/// A bare number is taken as megahertz.
pub fn parse_frequency_mhz(s: &str) -> Result<f64, SimpleError> {
    let (val, unit) = split_quantity(s)?;
    if unit.is_empty() {
        return Ok(val);
    }
    let re = try_with!(
        Regex::new(r"(?i)^(?<prefix>[kmg]?)hz$"),
        "invalid frequency unit pattern"
    );
    let prefix = match re.captures(&unit) {
        Some(caps) => caps["prefix"].to_string(),
        None => bail!("frequency unit '{}' not recognized, use Hz, kHz, MHz or GHz", unit),
    };
    let scale = match prefix.as_str() {
        "" => Scale::Base,
        "k" | "K" => Scale::Kilo,
        "m" | "M" => Scale::Mega,
        _ => Scale::Giga,
    };
    Ok(Scale::Mega.scale(scale.unscale(val)))
}
