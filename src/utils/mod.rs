pub mod request;
pub mod serde_utils;
pub(crate) mod signer;
