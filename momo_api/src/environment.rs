use std::{convert::Infallible, fmt::Display, str::FromStr};

pub const SANDBOX_URL: &str = "https://sandbox.momodeveloper.mtn.com";
pub const PRODUCTION_URL: &str = "https://proxy.momoapi.mtn.com";

/// The target environment sent to the provider in `X-Target-Environment`.
///
/// Identifiers are case-sensitive. Strings that are not one of the known MTN markets are kept verbatim in
/// [`Environment::Custom`] and routed to the production host.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Sandbox,
    MtnCongo,
    MtnUganda,
    MtnGhana,
    MtnIvoryCoast,
    MtnZambia,
    MtnCameroon,
    MtnBenin,
    MtnSwaziland,
    MtnGuineaConakry,
    MtnSouthAfrica,
    MtnLiberia,
    Custom(String),
}

impl Environment {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Sandbox => "sandbox",
            Self::MtnCongo => "mtncongo",
            Self::MtnUganda => "mtnuganda",
            Self::MtnGhana => "mtnghana",
            Self::MtnIvoryCoast => "mtnivorycoast",
            Self::MtnZambia => "mtnzambia",
            Self::MtnCameroon => "mtncameroon",
            Self::MtnBenin => "mtnbenin",
            Self::MtnSwaziland => "mtnswaziland",
            Self::MtnGuineaConakry => "mtnguineaconakry",
            Self::MtnSouthAfrica => "mtnsouthafrica",
            Self::MtnLiberia => "mtnliberia",
            Self::Custom(s) => s.as_str(),
        }
    }

    pub fn is_sandbox(&self) -> bool {
        matches!(self, Self::Sandbox)
    }

    pub fn base_url(&self) -> &'static str {
        if self.is_sandbox() {
            SANDBOX_URL
        } else {
            PRODUCTION_URL
        }
    }
}

impl FromStr for Environment {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let env = match s {
            "sandbox" => Self::Sandbox,
            "mtncongo" => Self::MtnCongo,
            "mtnuganda" => Self::MtnUganda,
            "mtnghana" => Self::MtnGhana,
            "mtnivorycoast" => Self::MtnIvoryCoast,
            "mtnzambia" => Self::MtnZambia,
            "mtncameroon" => Self::MtnCameroon,
            "mtnbenin" => Self::MtnBenin,
            "mtnswaziland" => Self::MtnSwaziland,
            "mtnguineaconakry" => Self::MtnGuineaConakry,
            "mtnsouthafrica" => Self::MtnSouthAfrica,
            "mtnliberia" => Self::MtnLiberia,
            other => Self::Custom(other.to_string()),
        };
        Ok(env)
    }
}

impl From<&str> for Environment {
    fn from(value: &str) -> Self {
        match value.parse() {
            Ok(env) => env,
            Err(never) => match never {},
        }
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
