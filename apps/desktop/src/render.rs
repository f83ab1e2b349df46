//! Plain-text rendering of the client view.

use client_core::{CategoryState, FlowState, LoginAffordance, SearchState, ViewState};
use shared::domain::ProductResult;

pub fn header(login: &LoginAffordance) -> String {
    match login {
        LoginAffordance::SignedIn(info) => info.to_string(),
        LoginAffordance::LoginLink(url) => format!("Iniciar Sesión con Mercado Libre: {url}"),
    }
}

pub fn search_panel(state: &SearchState) -> String {
    match state {
        FlowState::Idle => String::new(),
        FlowState::Loading => "Buscando...".to_string(),
        FlowState::Failed(error) => format!("Error: {error}"),
        FlowState::Loaded(items) => {
            let mut out = String::from("Resultados de Búsqueda");
            for item in items {
                out.push('\n');
                out.push_str(&product(item));
            }
            out
        }
    }
}

pub fn categories_panel(state: &CategoryState) -> String {
    match state {
        FlowState::Idle => String::new(),
        FlowState::Loading => "Cargando...".to_string(),
        FlowState::Failed(error) => format!("Error: {error}"),
        FlowState::Loaded(categories) => {
            let mut out = String::from("Categorías Principales");
            for category in categories {
                out.push_str(&format!("\n  - {} ({})", category.name, category.id));
            }
            out
        }
    }
}

pub fn view(view: &ViewState) -> String {
    [
        header(&view.login),
        categories_panel(&view.categories),
        search_panel(&view.search),
    ]
    .into_iter()
    .filter(|section| !section.is_empty())
    .collect::<Vec<_>>()
    .join("\n\n")
}

fn product(item: &ProductResult) -> String {
    format!(
        "- {}\n    Precio: {} ${}\n    Categoría ID: {}\n    Imagen: {}\n    Ver en Mercado Libre: {}",
        item.title,
        item.currency_id,
        format_price(item.price),
        item.category_id,
        item.thumbnail,
        item.permalink
    )
}

fn format_price(price: Option<f64>) -> String {
    match price {
        Some(value) if value.fract() == 0.0 => format!("{value:.0}"),
        Some(value) => value.to_string(),
        None => "-".to_string(),
    }
}
