use axum::{
    Router,
    http::{HeaderValue, Method, request},
    routing::{get, post},
};
use gatehouse_adapters::{
    auth::SessionTokenConfig,
    config::AllowedOrigins,
    http::routes::{
        OAuthSuccessRedirect, facebook_callback, facebook_login, get_profile, google_callback,
        google_login, health, login, register, reset_password, send_code, send_reset_code,
        update_profile, verify_token,
    },
    oauth::{FacebookOAuthClient, GoogleOAuthClient},
};
use gatehouse_core::{AccountStore, EmailClient, VerificationCodeStore};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::tracing::{make_span_with_request_id, on_request, on_response};

/// The identity service: every route wired to its stores and clients.
pub struct GatehouseService {
    router: Router,
}

impl GatehouseService {
    /// Assemble the router.
    ///
    /// Stores and clients are cheap `Clone` handles (pools, `Arc`s); each
    /// route receives exactly the state it needs.
    pub fn new<A, C, E>(
        account_store: A,
        code_store: C,
        email_client: E,
        google_client: GoogleOAuthClient,
        facebook_client: FacebookOAuthClient,
        token_config: SessionTokenConfig,
        oauth_success_redirect: OAuthSuccessRedirect,
    ) -> Self
    where
        A: AccountStore + Clone + 'static,
        C: VerificationCodeStore + Clone + 'static,
        E: EmailClient + Clone + 'static,
    {
        let router = Router::new()
            .route("/health", get(health))
            // Registration: issue a code, then redeem it
            .route("/send-code", post(send_code::<A, C, E>))
            .with_state((
                account_store.clone(),
                code_store.clone(),
                email_client.clone(),
            ))
            .route("/register", post(register::<A, C>))
            .with_state((account_store.clone(), code_store.clone()))
            // Password login and session token check
            .route("/login", post(login::<A>))
            .with_state((account_store.clone(), token_config.clone()))
            .route("/verify-token", post(verify_token))
            .with_state(token_config.clone())
            // Password reset
            .route(
                "/forgot-password/send-code",
                post(send_reset_code::<A, C, E>),
            )
            .with_state((account_store.clone(), code_store.clone(), email_client))
            .route("/forgot-password/reset", post(reset_password::<A, C>))
            .with_state((account_store.clone(), code_store))
            // OAuth identity reconciliation
            .route("/auth/google/login", get(google_login))
            .with_state(google_client.clone())
            .route("/auth/google/callback", get(google_callback::<A>))
            .with_state((
                google_client,
                account_store.clone(),
                oauth_success_redirect.clone(),
            ))
            .route("/auth/facebook/login", get(facebook_login))
            .with_state(facebook_client.clone())
            .route("/auth/facebook/callback", get(facebook_callback::<A>))
            .with_state((facebook_client, account_store.clone(), oauth_success_redirect))
            // Bearer-authenticated profile endpoints
            .route(
                "/user/profile",
                get(get_profile::<A>).put(update_profile::<A>),
            )
            .with_state((account_store, token_config));

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Finish the router, optionally restricting CORS to an origin
    /// allowlist.
    pub fn into_router(mut self, allowed_origins: Option<AllowedOrigins>) -> Router {
        if let Some(allowed_origins) = allowed_origins {
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_credentials(true)
                .allow_origin(AllowOrigin::predicate(
                    move |origin: &HeaderValue, _request_parts: &request::Parts| {
                        allowed_origins.contains(origin)
                    },
                ));

            self.router = self.router.layer(cors);
        }
        self.with_trace_layer().router
    }

    /// Run as a standalone server on the given listener.
    pub async fn run_standalone(
        self,
        listener: TcpListener,
        allowed_origins: Option<AllowedOrigins>,
    ) -> Result<(), std::io::Error> {
        let router = self.into_router(allowed_origins);

        tracing::info!("Identity service listening on {}", listener.local_addr()?);

        axum::serve(listener, router).await
    }
}
