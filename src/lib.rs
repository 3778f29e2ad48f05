//! # Gatehouse - Identity & Verification Service Library
//!
//! Facade crate re-exporting the public APIs of the service components.
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `Password`, `Account`, `VerificationCode`, ...
//! - **Repository traits**: `AccountStore`, `VerificationCodeStore`
//! - **Use cases**: `SendCodeUseCase`, `RegisterUseCase`, `LoginUseCase`, ...
//! - **Adapters**: `PostgresAccountStore`, `RedisVerificationCodeStore`,
//!   `PostmarkEmailClient`, OAuth provider clients, ...
//! - **Service**: `GatehouseService` - the assembled router

/// Core domain types and value objects
pub mod core {
    pub use gatehouse_core::*;
}

pub use gatehouse_core::{
    Account, AccountError, Email, ExternalProfile, NewAccount, Password, Profile, ProfilePatch,
    Provider, VerificationCode, VerificationCodeError,
};

/// Repository trait definitions
pub mod repositories {
    pub use gatehouse_core::{
        AccountStore, AccountStoreError, VerificationCodeStore, VerificationCodeStoreError,
    };
}

pub use gatehouse_core::{
    AccountStore, AccountStoreError, EmailClient, VerificationCodeStore,
    VerificationCodeStoreError,
};

/// Application use cases
pub mod use_cases {
    pub use gatehouse_application::*;
}

pub use gatehouse_application::{
    GetProfileUseCase, LoginUseCase, ReconcileOAuthUseCase, RegisterUseCase, ResetPasswordUseCase,
    SendCodeUseCase, SendResetCodeUseCase, UpdateProfileUseCase,
};

/// Infrastructure adapters
pub mod adapters {
    /// HTTP route handlers
    pub mod http {
        pub use gatehouse_adapters::http::*;
    }

    /// Persistence implementations
    pub mod persistence {
        pub use gatehouse_adapters::persistence::*;
    }

    /// Email client implementations
    pub mod email {
        pub use gatehouse_adapters::email::*;
    }

    /// Session token utilities
    pub mod auth {
        pub use gatehouse_adapters::auth::*;
    }

    /// OAuth provider clients
    pub mod oauth {
        pub use gatehouse_adapters::oauth::*;
    }

    /// Configuration
    pub mod config {
        pub use gatehouse_adapters::config::*;
    }
}

pub use gatehouse_adapters::{
    email::{MockEmailClient, PostmarkEmailClient},
    oauth::{FacebookOAuthClient, GoogleOAuthClient, ProviderEndpoints},
    persistence::{
        HashMapAccountStore, HashMapVerificationCodeStore, PostgresAccountStore,
        RedisVerificationCodeStore,
    },
};

/// Main service entry point
pub use gatehouse_service::{
    GatehouseService, configure_postgresql, configure_redis, get_redis_client,
};

/// Re-export async-trait for implementing repository traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

pub use http;
