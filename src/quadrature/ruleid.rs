use std::fmt;
use std::str::FromStr;

use serde::{
    Serialize,
    Deserialize
};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RuleId {
    Trapezoidal,
    Midpoint,
    #[serde(rename = "Simpson1/3")]
    SimpsonOneThird,
    #[serde(rename = "Simpson3/8")]
    SimpsonThreeEighths,
    MonteCarlo
}

impl RuleId {
    pub const ALL: [RuleId; 5] = [
        RuleId::Trapezoidal,
        RuleId::Midpoint,
        RuleId::SimpsonOneThird,
        RuleId::SimpsonThreeEighths,
        RuleId::MonteCarlo
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RuleId::Trapezoidal => "Trapezoidal",
            RuleId::Midpoint => "Midpoint",
            RuleId::SimpsonOneThird => "Simpson1/3",
            RuleId::SimpsonThreeEighths => "Simpson3/8",
            RuleId::MonteCarlo => "MonteCarlo"
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown quadrature rule '{0}'")]
pub struct ParseRuleIdError(pub String);

impl FromStr for RuleId {
    type Err = ParseRuleIdError;

    /// 不分大小寫，並忽略空白、`-`、`_`、`/`、`'`：
    /// `simpson 1/3`、`Simpson13`、`monte-carlo` 皆可。
    fn from_str(text: &str) -> Result<RuleId, ParseRuleIdError> {
        let key: String = text
            .chars()
            .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '_' | '/' | '\''))
            .flat_map(|c| c.to_lowercase())
            .collect();
        match key.as_str() {
            "trapezoidal" | "trapezoid" | "trap" => Ok(RuleId::Trapezoidal),
            "midpoint" | "mid" => Ok(RuleId::Midpoint),
            "simpson13" | "simpson" | "simpsons" => Ok(RuleId::SimpsonOneThird),
            "simpson38" | "simpsons38" => Ok(RuleId::SimpsonThreeEighths),
            "montecarlo" | "mc" => Ok(RuleId::MonteCarlo),
            _ => Err(ParseRuleIdError(text.to_owned()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_spellings() {
        assert_eq!("Simpson 1/3".parse(), Ok(RuleId::SimpsonOneThird));
        assert_eq!("simpson38".parse(), Ok(RuleId::SimpsonThreeEighths));
        assert_eq!("Monte-Carlo".parse(), Ok(RuleId::MonteCarlo));
        assert_eq!("TRAPEZOIDAL".parse(), Ok(RuleId::Trapezoidal));
        assert_eq!("gauss".parse::<RuleId>(), Err(ParseRuleIdError("gauss".to_owned())));
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for rule in RuleId::ALL {
            assert_eq!(rule.to_string().parse(), Ok(rule));
        }
    }

    #[test]
    fn serializes_with_canonical_names() {
        assert_eq!(serde_json::to_string(&RuleId::SimpsonThreeEighths).unwrap(), "\"Simpson3/8\"");
        let parsed: RuleId = serde_json::from_str("\"Simpson1/3\"").unwrap();
        assert_eq!(parsed, RuleId::SimpsonOneThird);
    }
}
