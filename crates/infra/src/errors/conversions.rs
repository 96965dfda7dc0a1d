//! Conversions from external infrastructure errors into domain errors.

use pulsearc_domain::PulseArcError;
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub PulseArcError);

impl From<InfraError> for PulseArcError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<PulseArcError> for InfraError {
    fn from(value: PulseArcError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoPulseArcError {
    fn into_pulsearc(self) -> PulseArcError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → PulseArcError */
/* -------------------------------------------------------------------------- */

impl IntoPulseArcError for HttpError {
    fn into_pulsearc(self) -> PulseArcError {
        if self.is_timeout() {
            return PulseArcError::Network("HTTP request timed out".into());
        }

        #[cfg(not(target_arch = "wasm32"))]
        if self.is_connect() {
            return PulseArcError::Network("HTTP connection failure".into());
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                401 | 403 => PulseArcError::Auth(message),
                404 => PulseArcError::NotFound(message),
                429 => PulseArcError::Network(message),
                400..=499 => PulseArcError::InvalidInput(message),
                500..=599 => PulseArcError::Network(message),
                _ => PulseArcError::Network(message),
            };
        }

        PulseArcError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_pulsearc())
    }
}

/* -------------------------------------------------------------------------- */
/* tokio_postgres::Error → PulseArcError */
/* -------------------------------------------------------------------------- */

impl IntoPulseArcError for tokio_postgres::Error {
    fn into_pulsearc(self) -> PulseArcError {
        if let Some(db_error) = self.as_db_error() {
            use tokio_postgres::error::SqlState;

            return match *db_error.code() {
                SqlState::UNIQUE_VIOLATION => {
                    PulseArcError::InvalidInput(format!("unique constraint violation: {db_error}"))
                }
                SqlState::FOREIGN_KEY_VIOLATION => PulseArcError::InvalidInput(format!(
                    "foreign key constraint violation: {db_error}"
                )),
                _ => PulseArcError::Database(db_error.to_string()),
            };
        }

        if self.is_closed() {
            return PulseArcError::Database("database connection closed".into());
        }

        PulseArcError::Database(self.to_string())
    }
}

impl From<tokio_postgres::Error> for InfraError {
    fn from(value: tokio_postgres::Error) -> Self {
        InfraError(value.into_pulsearc())
    }
}

/* -------------------------------------------------------------------------- */
/* deadpool_postgres::PoolError → PulseArcError */
/* -------------------------------------------------------------------------- */

impl IntoPulseArcError for deadpool_postgres::PoolError {
    fn into_pulsearc(self) -> PulseArcError {
        PulseArcError::Database(format!("connection pool error: {self}"))
    }
}

impl From<deadpool_postgres::PoolError> for InfraError {
    fn from(value: deadpool_postgres::PoolError) -> Self {
        InfraError(value.into_pulsearc())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use reqwest::{Client, StatusCode};
    use tokio::runtime::Runtime;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[test]
    fn http_status_401_maps_to_auth_error() {
        Runtime::new().unwrap().block_on(async {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .respond_with(ResponseTemplate::new(StatusCode::UNAUTHORIZED))
                .mount(&server)
                .await;

            let client = Client::builder().no_proxy().build().unwrap();
            let error =
                client.get(server.uri()).send().await.unwrap().error_for_status().unwrap_err();

            let mapped: PulseArcError = InfraError::from(error).into();
            match mapped {
                PulseArcError::Auth(msg) => assert!(msg.contains("401")),
                other => panic!("expected auth error, got {:?}", other),
            }
        });
    }

    #[test]
    fn http_status_429_maps_to_network_error() {
        Runtime::new().unwrap().block_on(async {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .respond_with(ResponseTemplate::new(429_u16))
                .mount(&server)
                .await;

            let client = Client::builder().no_proxy().build().unwrap();
            let error =
                client.get(server.uri()).send().await.unwrap().error_for_status().unwrap_err();

            let mapped: PulseArcError = InfraError::from(error).into();
            assert!(matches!(mapped, PulseArcError::Network(_)));
        });
    }
}
