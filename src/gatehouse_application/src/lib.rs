pub mod use_cases;

pub use use_cases::{
    get_profile::{GetProfileError, GetProfileUseCase},
    login::{LoginError, LoginUseCase},
    reconcile_oauth::{ReconcileOAuthError, ReconcileOAuthUseCase},
    register::{RegisterError, RegisterUseCase},
    reset_password::{ResetPasswordError, ResetPasswordUseCase},
    send_code::{SendCodeError, SendCodeUseCase, REGISTRATION_CODE_TTL},
    send_reset_code::{SendResetCodeError, SendResetCodeUseCase, RESET_CODE_TTL},
    update_profile::{UpdateProfileError, UpdateProfileUseCase},
};
