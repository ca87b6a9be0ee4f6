//! HTTP-specific constants for the HiPay API.

use hipay::Environment;

/// Secure gateway base URL on the staging platform.
pub const STAGE_GATEWAY_URL: &str = "https://stage-secure-gateway.hipay-tpp.com/rest/";

/// Secure gateway base URL on the live platform.
pub const PRODUCTION_GATEWAY_URL: &str = "https://secure-gateway.hipay-tpp.com/rest/";

/// API base URL on the staging platform.
pub const STAGE_API_URL: &str = "https://stage-api.hipay.com/";

/// API base URL on the live platform.
pub const PRODUCTION_API_URL: &str = "https://api.hipay.com/";

/// Header carrying the Data API identifier on hosted payment page requests.
pub const DATA_ID_HEADER: &str = "X-HIPAY-DATA-ID";

/// `User-Agent` sent with every request.
pub const USER_AGENT: &str = concat!("HiPayMCPServer/", env!("CARGO_PKG_VERSION"));

/// Returns the `(gateway, api)` base URLs for an environment.
#[must_use]
pub const fn base_urls(environment: Environment) -> (&'static str, &'static str) {
    match environment {
        Environment::Stage => (STAGE_GATEWAY_URL, STAGE_API_URL),
        Environment::Production => (PRODUCTION_GATEWAY_URL, PRODUCTION_API_URL),
    }
}
