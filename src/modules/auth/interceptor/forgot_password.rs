use serde::Deserialize;
use validator::Validate;

use crate::shared::infrastructure::interceptor::ValidatorInterceptor;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ForgotPasswordBody {
    #[validate(required, email)]
    pub email: Option<String>,
}

pub fn forgot_password_interceptor() -> ValidatorInterceptor<ForgotPasswordBody> {
    ValidatorInterceptor::body()
}
