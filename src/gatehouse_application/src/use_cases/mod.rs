pub mod get_profile;
pub mod login;
pub mod reconcile_oauth;
pub mod register;
pub mod reset_password;
pub mod send_code;
pub mod send_reset_code;
pub mod update_profile;
