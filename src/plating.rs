use crate::scale::Scale;
use serde::Serialize;
use simple_error::{SimpleError, bail};
use std::fmt;

/// Conductor (or plating) material of the winding
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Plating {
    pub description: String,
    /// Resistivity in nΩ·m
    pub rho: f64,
    /// Relative permeability
    pub mu_r: f64,
}

impl Plating {
    pub fn new(description: &str, rho: f64, mu_r: f64) -> Self {
        Plating {
            description: description.to_string(),
            rho,
            mu_r,
        }
    }

    /// Resistivity in Ω·m
    pub fn resistivity(&self) -> f64 {
        Scale::Nano.unscale(self.rho)
    }

    /// Index of a plating in `table`, by description (case-insensitive) or by index
    pub fn find(table: &[Plating], name: &str) -> Result<usize, SimpleError> {
        let name = name.trim();
        if let Ok(index) = name.parse::<usize>() {
            if index < table.len() {
                return Ok(index);
            }
            bail!(
                "plating index {} out of range, {} materials available",
                index,
                table.len()
            );
        }
        match table
            .iter()
            .position(|p| p.description.eq_ignore_ascii_case(name))
        {
            Some(index) => Ok(index),
            None => bail!("plating '{}' not recognized", name),
        }
    }
}

impl fmt::Display for Plating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (ρ = {} nΩ·m, μr = {})",
            self.description, self.rho, self.mu_r
        )
    }
}

/// Built-in plating table; index 0 (annealed copper) is the default
pub fn standard_platings() -> Vec<Plating> {
    vec![
        Plating::new("annealed copper", 17.241, 0.99999044),
        Plating::new("hard-drawn copper", 17.71, 0.99999044),
        Plating::new("silver", 15.9, 0.9999738),
        Plating::new("aluminium", 28.24, 1.00002212),
    ]
}

/// Parses a plating given by index or name against the built-in table
pub fn parse_plating(s: &str) -> Result<usize, SimpleError> {
    Plating::find(&standard_platings(), s)
}

#[cfg(test)]
mod plating_tests {
    use super::*;
    use float_cmp::approx_eq;

    #[test]
    fn test_standard_table() {
        let table = standard_platings();
        assert_eq!(table.len(), 4);
        assert_eq!(table[0].description, "annealed copper");
        assert!(approx_eq!(f64, table[0].resistivity(), 17.241e-9, epsilon = 1e-20));
        assert!(approx_eq!(f64, table[3].mu_r, 1.00002212, ulps = 2));
    }

    #[test]
    fn test_find() {
        let table = standard_platings();
        assert_eq!(Plating::find(&table, "silver").unwrap(), 2);
        assert_eq!(Plating::find(&table, "Hard-Drawn Copper").unwrap(), 1);
        assert_eq!(Plating::find(&table, "3").unwrap(), 3);
        assert!(Plating::find(&table, "4").is_err());
        assert!(Plating::find(&table, "gold").is_err());
    }

    #[test]
    fn test_parse_plating() {
        assert_eq!(parse_plating(" aluminium ").unwrap(), 3);
        assert_eq!(parse_plating("0").unwrap(), 0);
    }
}
