//! Client error taxonomy and the localized messages shown for each kind.

use std::fmt;

use brew_core::DomainError;
use brew_core::ports::{AuthError, StorageError, TransportError};

pub type AppResult<T> = Result<T, AppError>;

/// Errors surfaced by the API helper and the page controllers.
#[derive(Debug)]
pub enum AppError {
    /// No session, or the backend answered 401 and the session was cleared.
    AuthRequired,
    /// Any other non-2xx status, with the backend's message when it sent one.
    Http { status: u16, message: Option<String> },
    /// No response at all.
    Network(String),
    /// A 2xx response whose body did not have the expected shape.
    Decode(String),
    Domain(DomainError),
    Storage(StorageError),
    Auth(AuthError),
}

impl AppError {
    /// Text shown to the user for this error.
    pub fn user_message(&self) -> String {
        match self {
            AppError::AuthRequired => "Debes iniciar sesión para continuar.".to_string(),
            AppError::Http {
                message: Some(message),
                ..
            } => message.clone(),
            AppError::Http { status, .. } => format!(
                "Error del servidor ({}). Por favor intenta nuevamente.",
                status
            ),
            AppError::Network(_) => {
                "Error de conexión. Por favor verifica tu conexión e intenta nuevamente."
                    .to_string()
            }
            AppError::Decode(_) => {
                "Respuesta inesperada del servidor. Por favor intenta nuevamente.".to_string()
            }
            AppError::Domain(DomainError::IncompleteCase { .. }) => {
                "Error: No se pudieron cargar los datos del caso. Por favor recarga la página."
                    .to_string()
            }
            AppError::Domain(DomainError::Unauthorized) => {
                "Acceso denegado. Solo los administradores pueden ver esta sección.".to_string()
            }
            AppError::Domain(_) => "Por favor completa todos los campos obligatorios.".to_string(),
            AppError::Storage(_) => {
                "No se pudo guardar la sesión en este dispositivo.".to_string()
            }
            AppError::Auth(_) => {
                "Error al procesar la autenticación. Por favor intenta nuevamente.".to_string()
            }
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::AuthRequired => write!(f, "Authentication required"),
            AppError::Http {
                status,
                message: Some(message),
            } => write!(f, "HTTP error {}: {}", status, message),
            AppError::Http { status, .. } => write!(f, "HTTP error {}", status),
            AppError::Network(msg) => write!(f, "Network error: {}", msg),
            AppError::Decode(msg) => write!(f, "Decode error: {}", msg),
            AppError::Domain(err) => write!(f, "{}", err),
            AppError::Storage(err) => write!(f, "{}", err),
            AppError::Auth(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for AppError {}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        AppError::Domain(err)
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        AppError::Storage(err)
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        AppError::Auth(err)
    }
}

impl From<TransportError> for AppError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Network(msg) | TransportError::InvalidRequest(msg) => {
                AppError::Network(msg)
            }
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Decode(err.to_string())
    }
}
