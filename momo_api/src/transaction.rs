use std::fmt::Display;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::data_objects::Party;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum TransactionStatus {
    Pending,
    Successful,
    Failed,
    /// A status outside the documented set, kept verbatim.
    Other(String),
}

impl From<String> for TransactionStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "PENDING" => Self::Pending,
            "SUCCESSFUL" => Self::Successful,
            "FAILED" => Self::Failed,
            _ => Self::Other(value),
        }
    }
}

impl From<TransactionStatus> for String {
    fn from(value: TransactionStatus) -> Self {
        value.to_string()
    }
}

impl Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => f.write_str("PENDING"),
            Self::Successful => f.write_str("SUCCESSFUL"),
            Self::Failed => f.write_str("FAILED"),
            Self::Other(s) => f.write_str(s),
        }
    }
}

/// Why a transaction failed. Unknown codes survive a parse/serialize cycle unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum ReasonCode {
    PayeeNotFound,
    PayerNotFound,
    NotAllowed,
    NotAllowedTargetEnvironment,
    InvalidCallbackUrlHost,
    InvalidCurrency,
    ServiceUnavailable,
    InternalProcessingError,
    NotEnoughFunds,
    PayerLimitReached,
    PayeeNotAllowedToReceive,
    PaymentNotApproved,
    ResourceNotFound,
    ApprovalRejected,
    Expired,
    TransactionCanceled,
    ResourceAlreadyExist,
    Other(String),
}

impl ReasonCode {
    pub fn as_str(&self) -> &str {
        match self {
            Self::PayeeNotFound => "PAYEE_NOT_FOUND",
            Self::PayerNotFound => "PAYER_NOT_FOUND",
            Self::NotAllowed => "NOT_ALLOWED",
            Self::NotAllowedTargetEnvironment => "NOT_ALLOWED_TARGET_ENVIRONMENT",
            Self::InvalidCallbackUrlHost => "INVALID_CALLBACK_URL_HOST",
            Self::InvalidCurrency => "INVALID_CURRENCY",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            Self::InternalProcessingError => "INTERNAL_PROCESSING_ERROR",
            Self::NotEnoughFunds => "NOT_ENOUGH_FUNDS",
            Self::PayerLimitReached => "PAYER_LIMIT_REACHED",
            Self::PayeeNotAllowedToReceive => "PAYEE_NOT_ALLOWED_TO_RECEIVE",
            Self::PaymentNotApproved => "PAYMENT_NOT_APPROVED",
            Self::ResourceNotFound => "RESOURCE_NOT_FOUND",
            Self::ApprovalRejected => "APPROVAL_REJECTED",
            Self::Expired => "EXPIRED",
            Self::TransactionCanceled => "TRANSACTION_CANCELED",
            Self::ResourceAlreadyExist => "RESOURCE_ALREADY_EXIST",
            Self::Other(s) => s.as_str(),
        }
    }
}

impl From<String> for ReasonCode {
    fn from(value: String) -> Self {
        match value.as_str() {
            "PAYEE_NOT_FOUND" => Self::PayeeNotFound,
            "PAYER_NOT_FOUND" => Self::PayerNotFound,
            "NOT_ALLOWED" => Self::NotAllowed,
            "NOT_ALLOWED_TARGET_ENVIRONMENT" => Self::NotAllowedTargetEnvironment,
            "INVALID_CALLBACK_URL_HOST" => Self::InvalidCallbackUrlHost,
            "INVALID_CURRENCY" => Self::InvalidCurrency,
            "SERVICE_UNAVAILABLE" => Self::ServiceUnavailable,
            "INTERNAL_PROCESSING_ERROR" => Self::InternalProcessingError,
            "NOT_ENOUGH_FUNDS" => Self::NotEnoughFunds,
            "PAYER_LIMIT_REACHED" => Self::PayerLimitReached,
            "PAYEE_NOT_ALLOWED_TO_RECEIVE" => Self::PayeeNotAllowedToReceive,
            "PAYMENT_NOT_APPROVED" => Self::PaymentNotApproved,
            "RESOURCE_NOT_FOUND" => Self::ResourceNotFound,
            "APPROVAL_REJECTED" => Self::ApprovalRejected,
            "EXPIRED" => Self::Expired,
            "TRANSACTION_CANCELED" => Self::TransactionCanceled,
            "RESOURCE_ALREADY_EXIST" => Self::ResourceAlreadyExist,
            _ => Self::Other(value),
        }
    }
}

impl From<ReasonCode> for String {
    fn from(value: ReasonCode) -> Self {
        value.as_str().to_string()
    }
}

impl Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `{code, message}` pair attached to failed transactions, and returned as the body of some error responses.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ErrorReason {
    pub code: ReasonCode,
    #[serde(default)]
    pub message: String,
}

impl ErrorReason {
    pub fn new<S: Into<String>>(code: S, message: S) -> Self {
        Self { code: ReasonCode::from(code.into()), message: message.into() }
    }

    /// Lenient conversion from a JSON object. Missing fields become empty strings.
    pub fn from_value(value: &Value) -> Self {
        let field = |k: &str| value[k].as_str().unwrap_or_default().to_string();
        Self::new(field("code"), field("message"))
    }

    pub fn is(&self, code: &ReasonCode) -> bool {
        &self.code == code
    }

    pub fn is_payee_not_found(&self) -> bool {
        self.is(&ReasonCode::PayeeNotFound)
    }

    pub fn is_not_enough_funds(&self) -> bool {
        self.is(&ReasonCode::NotEnoughFunds)
    }

    pub fn is_payer_limit_reached(&self) -> bool {
        self.is(&ReasonCode::PayerLimitReached)
    }
}

impl Display for ErrorReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

/// The state of a request-to-pay, deposit, transfer or refund, as returned by the status endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(default)]
    pub financial_transaction_id: Option<String>,
    #[serde(default)]
    pub external_id: Option<String>,
    #[serde(default)]
    pub amount: Option<String>,
    pub currency: String,
    /// Collections and deposits report a `payer`, transfers a `payee`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payer: Option<Party>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payee: Option<Party>,
    #[serde(default)]
    pub payer_message: Option<String>,
    #[serde(default)]
    pub payee_note: Option<String>,
    pub status: TransactionStatus,
    #[serde(default, deserialize_with = "deserialize_reason", skip_serializing_if = "Option::is_none")]
    pub reason: Option<ErrorReason>,
}

impl Transaction {
    pub fn parse(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }

    pub fn is_successful(&self) -> bool {
        self.status == TransactionStatus::Successful
    }

    pub fn is_pending(&self) -> bool {
        self.status == TransactionStatus::Pending
    }

    pub fn is_failed(&self) -> bool {
        self.status == TransactionStatus::Failed
    }

    /// The other side of the transaction: the payer when one is reported, otherwise the payee.
    pub fn counterparty(&self) -> Option<&Party> {
        self.payer.as_ref().or(self.payee.as_ref())
    }

    pub fn payer(&self) -> Option<&str> {
        self.payer.as_ref().map(|p| p.party_id.as_str())
    }

    pub fn payee(&self) -> Option<&str> {
        self.payee.as_ref().map(|p| p.party_id.as_str())
    }
}

// Only an object is a reason. Anything else (absent, null, a bare string) is ignored.
fn deserialize_reason<'de, D>(deserializer: D) -> Result<Option<ErrorReason>, D::Error>
where D: Deserializer<'de> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.filter(Value::is_object).map(|v| ErrorReason::from_value(&v)))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_pending_payment() {
        let tx = Transaction::parse(include_str!("./test_assets/payment_pending.json")).unwrap();
        assert_eq!(tx.status, TransactionStatus::Pending);
        assert!(tx.is_pending());
        assert!(!tx.is_successful());
        assert!(!tx.is_failed());
        assert_eq!(tx.amount.as_deref(), Some("1000"));
        assert_eq!(tx.currency, "EUR");
        assert_eq!(tx.payer(), Some("46733123454"));
        assert!(tx.reason.is_none());
        assert!(tx.financial_transaction_id.is_none());
    }

    #[test]
    fn parse_successful_payment() {
        let tx = Transaction::parse(include_str!("./test_assets/payment_successful.json")).unwrap();
        assert!(tx.is_successful());
        assert_eq!(tx.amount.as_deref(), Some("2500"));
        assert_eq!(tx.payer(), Some("46733123453"));
        assert_eq!(tx.financial_transaction_id.as_deref(), Some("987654321"));
        assert!(tx.reason.is_none());
    }

    #[test]
    fn parse_failed_not_enough_funds() {
        let tx = Transaction::parse(include_str!("./test_assets/payment_failed_not_enough_funds.json")).unwrap();
        assert!(tx.is_failed());
        assert!(!tx.is_successful());
        assert_eq!(tx.currency, "XAF");
        let reason = tx.reason.expect("reason should be present");
        assert_eq!(reason.code, ReasonCode::NotEnoughFunds);
        assert_eq!(reason.code.as_str(), "NOT_ENOUGH_FUNDS");
        assert!(reason.is_not_enough_funds());
        assert!(!reason.is_payer_limit_reached());
    }

    #[test]
    fn parse_failed_payer_limit() {
        let tx = Transaction::parse(include_str!("./test_assets/payment_failed_payer_limit.json")).unwrap();
        assert!(tx.is_failed());
        let reason = tx.reason.unwrap();
        assert!(reason.is_payer_limit_reached());
        assert!(!reason.is_not_enough_funds());
        assert_eq!(reason.to_string(), "[PAYER_LIMIT_REACHED] The payer's limit has been breached.");
    }

    #[test]
    fn transfers_report_a_payee() {
        let tx = Transaction::parse(include_str!("./test_assets/transfer_successful.json")).unwrap();
        assert!(tx.is_successful());
        assert_eq!(tx.payee(), Some("242061234567"));
    }

    #[test]
    fn payer_wins_when_both_sides_are_reported() {
        let body = r#"{"currency":"EUR","status":"SUCCESSFUL",
            "payer":{"partyIdType":"MSISDN","partyId":"46733123453"},
            "payee":{"partyIdType":"MSISDN","partyId":"46733123454"}}"#;
        let tx = Transaction::parse(body).unwrap();
        assert_eq!(tx.payer(), Some("46733123453"));
        assert_eq!(tx.payee(), Some("46733123454"));
        assert_eq!(tx.counterparty().map(|p| p.party_id.as_str()), Some("46733123453"));
    }

    #[test]
    fn transfers_serialize_under_payee() {
        let tx = Transaction::parse(include_str!("./test_assets/transfer_successful.json")).unwrap();
        assert!(tx.payer.is_none());
        assert_eq!(tx.counterparty(), tx.payee.as_ref());
        let json = serde_json::to_value(&tx).unwrap();
        assert!(json.get("payer").is_none());
        assert_eq!(json["payee"]["partyId"], "242061234567");
        let again: Transaction = serde_json::from_value(json).unwrap();
        assert_eq!(again, tx);
    }

    #[test]
    fn unknown_codes_and_statuses_round_trip() {
        let body = r#"{"currency":"XAF","status":"REJECTED","reason":{"code":"SOMETHING_NEW","message":"?"}}"#;
        let tx = Transaction::parse(body).unwrap();
        assert_eq!(tx.status, TransactionStatus::Other("REJECTED".into()));
        let reason = tx.reason.clone().unwrap();
        assert_eq!(reason.code, ReasonCode::Other("SOMETHING_NEW".into()));
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["status"], "REJECTED");
        assert_eq!(json["reason"]["code"], "SOMETHING_NEW");
    }

    #[test]
    fn non_object_reasons_are_ignored() {
        let body = r#"{"currency":"XAF","status":"FAILED","reason":"APPROVAL_REJECTED"}"#;
        let tx = Transaction::parse(body).unwrap();
        assert!(tx.is_failed());
        assert!(tx.reason.is_none());
    }

    #[test]
    fn error_body_as_reason() {
        let json: Value = serde_json::from_str(include_str!("./test_assets/error_resource_not_found.json")).unwrap();
        let reason = ErrorReason::from_value(&json);
        assert_eq!(reason.code, ReasonCode::ResourceNotFound);
        assert_eq!(reason.message, "Requested resource was not found.");
        let empty = ErrorReason::from_value(&Value::Null);
        assert_eq!(empty.code, ReasonCode::Other(String::new()));
        assert_eq!(empty.message, "");
    }
}
