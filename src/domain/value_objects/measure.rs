//! Loosely-typed scalars that authors write either as numbers or as text

use serde::{Deserialize, Serialize};

use super::lenient::leading_number;

/// A number or a free-text quantity (`30`, `"30 ft."`, `"1/4"`, `"50 gp"`,
/// `"59 (7d10+21)"`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Measure {
    Number(serde_json::Number),
    Text(String),
}

impl Measure {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => n.as_f64(),
            Self::Text(s) => leading_number(s),
        }
    }

    /// The leading quantity as a whole, non-negative number
    pub fn as_u32(&self) -> Option<u32> {
        self.as_f64()
            .filter(|n| *n >= 0.0 && *n <= f64::from(u32::MAX))
            .map(|n| n.round() as u32)
    }
}

impl std::fmt::Display for Measure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<u32> for Measure {
    fn from(n: u32) -> Self {
        Self::Number(n.into())
    }
}

impl From<&str> for Measure {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_measure_accepts_numbers_and_text() {
        let speed: Measure = serde_json::from_value(json!("30 ft.")).expect("text");
        assert_eq!(speed.as_f64(), Some(30.0));
        assert_eq!(speed.to_string(), "30 ft.");

        let weight: Measure = serde_json::from_value(json!(3)).expect("number");
        assert_eq!(serde_json::to_value(&weight).expect("serialize"), json!(3));
    }

    #[test]
    fn test_as_u32_reads_leading_quantity() {
        assert_eq!(Measure::from("59 (7d10+21)").as_u32(), Some(59));
        assert_eq!(Measure::from("1/4").as_u32(), Some(0));
        assert_eq!(Measure::from("-1").as_u32(), None);
        assert_eq!(Measure::from("lots").as_u32(), None);
        assert_eq!(Measure::from(12u32).as_u32(), Some(12));
    }
}
