//! Client for the MTN Mobile Money (MoMo) Open API.
//!
//! [`MomoApi`] selects the provider host for an [`Environment`] and hands out one client per product:
//! * [`CollectionApi`] requests payments from consumers.
//! * [`DisbursementApi`] deposits, transfers and refunds money to consumers.
//! * [`SandboxApi`] provisions API users and keys in the sandbox.
//!
//! Every authenticated call fetches a fresh bearer token first. Non-success responses are mapped to [`MomoApiError`]
//! by [`error_from_response`].
mod api;
mod config;
mod data_objects;
mod environment;
mod error;
pub mod helpers;
mod products;
mod requests;
mod secret;
mod token;
mod transaction;
pub mod transport;


pub use api::MomoApi;
pub use config::{MomoConfig, ProductConfig};
pub use data_objects::{AccountBalance, Party, MSISDN};
pub use environment::{Environment, PRODUCTION_URL, SANDBOX_URL};
pub use error::{error_from_response, MomoApiError};
pub use products::{CollectionApi, DisbursementApi, SandboxApi};
pub use requests::{PaymentRequest, RefundRequest, TransferRequest, DEFAULT_CURRENCY};
pub use secret::Secret;
pub use token::AccessToken;
pub use transaction::{ErrorReason, ReasonCode, Transaction, TransactionStatus};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, ReqwestTransport};
