//! Outgoing money-movement requests.
//!
//! All three types are plain values. Amounts are decimal strings and are sent exactly as given: no parsing, rounding
//! or reformatting happens on the client side.

use serde_json::{json, Value};

use crate::data_objects::Party;

pub const DEFAULT_CURRENCY: &str = "XAF";

/// Collect money from a payer (`requesttopay`) or deposit money to a payee (`deposit`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRequest {
    pub amount: String,
    pub currency: String,
    pub external_id: String,
    /// MSISDN of the counterparty
    pub payer: String,
    pub payer_message: String,
    pub payee_note: String,
}

impl PaymentRequest {
    pub fn new<S: Into<String>>(
        amount: S,
        currency: S,
        external_id: S,
        payer: S,
        payer_message: S,
        payee_note: S,
    ) -> Self {
        Self {
            amount: amount.into(),
            currency: currency.into(),
            external_id: external_id.into(),
            payer: payer.into(),
            payer_message: payer_message.into(),
            payee_note: payee_note.into(),
        }
    }

    pub fn to_request_body(&self) -> Value {
        json!({
            "amount": self.amount,
            "currency": self.currency,
            "externalId": self.external_id,
            "payer": Party::msisdn(self.payer.as_str()),
            "payerMessage": self.payer_message,
            "payeeNote": self.payee_note,
        })
    }
}

/// Send money from the disbursement account to a payee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    pub amount: String,
    pub currency: String,
    pub external_id: String,
    pub payee: String,
    pub payer_message: String,
    pub payee_note: String,
}

impl TransferRequest {
    pub fn new<S: Into<String>>(
        amount: S,
        currency: S,
        external_id: S,
        payee: S,
        payer_message: S,
        payee_note: S,
    ) -> Self {
        Self {
            amount: amount.into(),
            currency: currency.into(),
            external_id: external_id.into(),
            payee: payee.into(),
            payer_message: payer_message.into(),
            payee_note: payee_note.into(),
        }
    }

    /// A transfer in [`DEFAULT_CURRENCY`] with an empty message and note.
    pub fn make<S: Into<String>>(amount: S, payee: S, external_id: S) -> Self {
        Self::new(
            amount.into(),
            DEFAULT_CURRENCY.into(),
            external_id.into(),
            payee.into(),
            String::new(),
            String::new(),
        )
    }

    pub fn with_currency<S: Into<String>>(mut self, currency: S) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn with_payer_message<S: Into<String>>(mut self, message: S) -> Self {
        self.payer_message = message.into();
        self
    }

    pub fn with_payee_note<S: Into<String>>(mut self, note: S) -> Self {
        self.payee_note = note.into();
        self
    }

    pub fn to_request_body(&self) -> Value {
        json!({
            "amount": self.amount,
            "currency": self.currency,
            "externalId": self.external_id,
            "payee": Party::msisdn(self.payee.as_str()),
            "payerMessage": self.payer_message,
            "payeeNote": self.payee_note,
        })
    }
}

/// Refund (part of) an earlier transaction, identified by the reference id it was created with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefundRequest {
    pub amount: String,
    pub currency: String,
    pub external_id: String,
    pub reference_id_to_refund: String,
    pub payer_message: String,
    pub payee_note: String,
}

impl RefundRequest {
    pub fn new<S: Into<String>>(
        amount: S,
        currency: S,
        external_id: S,
        reference_id_to_refund: S,
        payer_message: S,
        payee_note: S,
    ) -> Self {
        Self {
            amount: amount.into(),
            currency: currency.into(),
            external_id: external_id.into(),
            reference_id_to_refund: reference_id_to_refund.into(),
            payer_message: payer_message.into(),
            payee_note: payee_note.into(),
        }
    }

    /// A refund in [`DEFAULT_CURRENCY`] with an empty message and note.
    pub fn make<S: Into<String>>(amount: S, reference_id_to_refund: S, external_id: S) -> Self {
        Self::new(
            amount.into(),
            DEFAULT_CURRENCY.into(),
            external_id.into(),
            reference_id_to_refund.into(),
            String::new(),
            String::new(),
        )
    }

    pub fn with_currency<S: Into<String>>(mut self, currency: S) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn with_payer_message<S: Into<String>>(mut self, message: S) -> Self {
        self.payer_message = message.into();
        self
    }

    pub fn with_payee_note<S: Into<String>>(mut self, note: S) -> Self {
        self.payee_note = note.into();
        self
    }

    pub fn to_request_body(&self) -> Value {
        json!({
            "amount": self.amount,
            "currency": self.currency,
            "externalId": self.external_id,
            "payerMessage": self.payer_message,
            "payeeNote": self.payee_note,
            "referenceIdToRefund": self.reference_id_to_refund,
        })
    }
}
