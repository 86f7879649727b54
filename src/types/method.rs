use serde::{Deserialize, Serialize};

/// Provider calculation convention. Only these five codes are ever stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum CalculationMethod {
    #[default]
    MuslimWorldLeague = 1,
    NorthAmerica = 2,
    Egyptian = 3,
    UmmAlQura = 4,
    Karachi = 5,
}

impl CalculationMethod {
    pub fn code(self) -> i64 {
        self as i64
    }
}

impl TryFrom<i64> for CalculationMethod {
    type Error = String;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::MuslimWorldLeague),
            2 => Ok(Self::NorthAmerica),
            3 => Ok(Self::Egyptian),
            4 => Ok(Self::UmmAlQura),
            5 => Ok(Self::Karachi),
            other => Err(format!("unknown calculation method code {other}")),
        }
    }
}

impl From<CalculationMethod> for i64 {
    fn from(value: CalculationMethod) -> Self {
        value.code()
    }
}
