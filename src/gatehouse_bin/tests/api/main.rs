mod helpers;
mod login;
mod oauth;
mod password_reset;
mod profile;
mod registration;
