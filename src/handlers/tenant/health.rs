pub const REGISTRATION_HEALTH_MESSAGE: &str = "EKS SaaS Backend - I am up!!!";

/// GET /amIUp
pub async fn am_i_up() -> &'static str {
    REGISTRATION_HEALTH_MESSAGE
}
