pub mod env {
    pub const JWT_SECRET_ENV_VAR: &str = "GATEHOUSE__AUTH__JWT__SECRET";
    pub const DATABASE_URL_ENV_VAR: &str = "GATEHOUSE__POSTGRES__URL";
    pub const REDIS_HOST_NAME_ENV_VAR: &str = "GATEHOUSE__REDIS__HOST_NAME";
    pub const POSTMARK_AUTH_TOKEN_ENV_VAR: &str = "GATEHOUSE__EMAIL_CLIENT__AUTH_TOKEN";
    pub const ALLOWED_ORIGINS_ENV_VAR: &str = "GATEHOUSE__APP__ALLOWED_ORIGINS";
}

/// Base name of the optional configuration file picked up by `load()`.
pub const CONFIG_FILE_NAME: &str = "gatehouse";

pub mod prod {
    pub const APP_ADDRESS: &str = "0.0.0.0:8080";

    pub mod email_client {
        use std::time::Duration;

        pub const BASE_URL: &str = "https://api.postmarkapp.com/";
        pub const TIMEOUT: Duration = Duration::from_secs(10);
    }
}

pub mod test {
    pub const APP_ADDRESS: &str = "127.0.0.1:0";

    pub mod email_client {
        use std::time::Duration;

        pub const SENDER: &str = "test@email.com";
        pub const TIMEOUT: Duration = Duration::from_millis(200);
    }
}
