use serde::Serialize;
use simple_error::{SimpleError, bail};
use std::{fmt, str::FromStr};

/// Descriptor of scaling
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub enum Scale {
    Pico,
    Nano,
    Micro,
    Milli,
    #[default]
    Base,
    Kilo,
    Mega,
    Giga,
}

impl Scale {
    pub fn to_long_string(&self) -> String {
        match self {
            Scale::Giga => "giga".to_string(),
            Scale::Mega => "mega".to_string(),
            Scale::Kilo => "kilo".to_string(),
            Scale::Base => "".to_string(),
            Scale::Milli => "milli".to_string(),
            Scale::Micro => "micro".to_string(),
            Scale::Nano => "nano".to_string(),
            Scale::Pico => "pico".to_string(),
        }
    }

    pub fn to_str(&self) -> &str {
        match self {
            Scale::Pico => "p",
            Scale::Nano => "n",
            Scale::Micro => "μ",
            Scale::Milli => "m",
            Scale::Base => "",
            Scale::Kilo => "k",
            Scale::Mega => "M",
            Scale::Giga => "G",
        }
    }

    /// Provides multiplier for scale
    /// Scale::Pico = 1e-12
    pub fn multiplier(&self) -> f64 {
        match self {
            Scale::Pico => 1e-12,
            Scale::Nano => 1e-9,
            Scale::Micro => 1e-6,
            Scale::Milli => 1e-3,
            Scale::Base => 1.0,
            Scale::Kilo => 1e3,
            Scale::Mega => 1e6,
            Scale::Giga => 1e9,
        }
    }

    /// Base-unit value expressed in this scale, e.g. 1e-6 H -> 1 μH
    pub fn scale(&self, val: f64) -> f64 {
        val / self.multiplier()
    }

    /// Scaled value converted back to the base unit, e.g. 400 mm -> 0.4 m
    pub fn unscale(&self, val: f64) -> f64 {
        val * self.multiplier()
    }
}

impl FromStr for Scale {
    type Err = SimpleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pico" | "pico" | "p" => Ok(Scale::Pico),
            "Nano" | "nano" | "n" => Ok(Scale::Nano),
            "Micro" | "micro" | "u" | "μ" | "µ" => Ok(Scale::Micro),
            "Milli" | "milli" | "m" => Ok(Scale::Milli),
            "" => Ok(Scale::Base),
            "Kilo" | "kilo" | "k" | "K" => Ok(Scale::Kilo),
            "Mega" | "mega" | "M" => Ok(Scale::Mega),
            "Giga" | "giga" | "G" => Ok(Scale::Giga),
            _ => bail!("scale prefix '{}' not recognized", s),
        }
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}
