pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    account::{Account, AccountError, ExternalProfile, NewAccount, Profile, ProfilePatch},
    email::Email,
    password::Password,
    provider::Provider,
    verification_code::{VerificationCode, VerificationCodeError},
};

pub use ports::{
    repositories::{
        AccountStore, AccountStoreError, VerificationCodeStore, VerificationCodeStoreError,
    },
    services::EmailClient,
};
