use serde::{Deserialize, Serialize};

pub const MSISDN: &str = "MSISDN";

/// A payer or payee as the provider identifies it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    pub party_id_type: String,
    pub party_id: String,
}

impl Party {
    pub fn msisdn<S: Into<String>>(phone: S) -> Self {
        Self { party_id_type: MSISDN.to_string(), party_id: phone.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountBalance {
    /// Decimal amount, exactly as the provider formatted it.
    pub available_balance: String,
    pub currency: String,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_balance() {
        let json = include_str!("./test_assets/balance.json");
        let balance: AccountBalance = serde_json::from_str(json).unwrap();
        assert_eq!(balance.available_balance, "50000");
        assert_eq!(balance.currency, "EUR");
    }

    #[test]
    fn party_shape() {
        let party = serde_json::to_value(Party::msisdn("46733123454")).unwrap();
        assert_eq!(party, serde_json::json!({"partyIdType": "MSISDN", "partyId": "46733123454"}));
    }
}
