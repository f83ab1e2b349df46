//! Maps failed backend calls to the messages shown to the user.

use crate::error::{ErrorKind, ErrorMessage, RequestFailure};

pub const UNAUTHORIZED_MESSAGE: &str =
    "No autorizado. Por favor, inicia sesión con Mercado Libre e intenta de nuevo.";
pub const SEARCH_FAILED_MESSAGE: &str = "Error al buscar productos. ¿Iniciaste sesión?";
pub const CATEGORIES_FAILED_MESSAGE: &str = "Error al cargar categorías. ¿Iniciaste sesión?";
pub const SEARCH_EMPTY_MESSAGE: &str = "No se encontraron productos para tu búsqueda.";
pub const CATEGORIES_EMPTY_MESSAGE: &str = "No se pudieron cargar las categorías.";

const HTTP_UNAUTHORIZED: u16 = 401;

/// The user-triggered flow a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flow {
    Search,
    Categories,
}

impl Flow {
    pub fn name(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Categories => "categories",
        }
    }

    fn failed_message(self) -> &'static str {
        match self {
            Self::Search => SEARCH_FAILED_MESSAGE,
            Self::Categories => CATEGORIES_FAILED_MESSAGE,
        }
    }

    fn empty_message(self) -> &'static str {
        match self {
            Self::Search => SEARCH_EMPTY_MESSAGE,
            Self::Categories => CATEGORIES_EMPTY_MESSAGE,
        }
    }
}

pub fn classify(flow: Flow, failure: &RequestFailure) -> ErrorMessage {
    if failure.status() == Some(HTTP_UNAUTHORIZED) {
        return ErrorMessage::new(ErrorKind::Unauthorized, UNAUTHORIZED_MESSAGE);
    }

    match failure.backend_message() {
        Some(message) => ErrorMessage::new(ErrorKind::Backend, message),
        None => ErrorMessage::new(ErrorKind::Transport, flow.failed_message()),
    }
}

/// Soft error for a request that succeeded with nothing to list.
pub fn empty_result(flow: Flow) -> ErrorMessage {
    ErrorMessage::new(ErrorKind::Empty, flow.empty_message())
}
