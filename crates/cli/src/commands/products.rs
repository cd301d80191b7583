//! Product listing command.
//!
//! Fetches the remote catalog once and prints one page of the filtered view,
//! with the same summaries the storefront list page shows.

use tienda_core::{ProductRecord, ProductView};
use tienda_storefront::catalog::ProductSource;
use tienda_storefront::config::StorefrontConfig;
use tienda_storefront::routes::products::FETCH_FAILURE_MESSAGE;

/// Fetch the catalog and print page `page` of products matching `search`.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the catalog cannot be
/// fetched.
pub async fn list(
    search: Option<&str>,
    page: usize,
    url: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present (ignore errors if not found)
    let _ = dotenvy::dotenv();

    let config = StorefrontConfig::from_vars(|key| match (key, &url) {
        ("PRODUCTS_SOURCE_URL", Some(url)) => Some(url.clone()),
        _ => std::env::var(key).ok(),
    })?;

    let source = ProductSource::new(&config.products)?;
    tracing::info!(url = %source.url(), "Fetching product catalog");

    let products = match source.fetch_all().await {
        Ok(products) => products,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load product catalog");
            return Err(FETCH_FAILURE_MESSAGE.into());
        }
    };

    let mut view = ProductView::new();
    view.set_search_term(search.unwrap_or_default());
    view.set_page(page);

    print_lines(&render_page(&view, &products));
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}

/// Text lines for the current page of `view`.
fn render_page(view: &ProductView, products: &[ProductRecord]) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some((shown, total)) = view.match_summary(products) {
        lines.push(format!("Mostrando {shown} de {total} productos"));
    }

    let items = view.page_items(products);
    if items.is_empty() {
        lines.push("No hay productos para mostrar.".to_string());
    }
    for product in items {
        lines.push(format!(
            "[{}] {} ({}) {}",
            product.id,
            product.name,
            product.category,
            product.price.display()
        ));
    }

    if let Some((shown, page, total_pages)) = view.page_summary(products) {
        lines.push(format!(
            "Mostrando {shown} productos (página {page} de {total_pages})"
        ));
    }

    lines
}

#[cfg(test)]
mod tests {
    use tienda_core::{Price, ProductId};

    use super::*;

    fn catalog(count: u32) -> Vec<ProductRecord> {
        (1..=count)
            .map(|n| ProductRecord {
                id: ProductId::new(n.to_string()),
                name: format!("Producto {n}"),
                category: if n % 2 == 0 { "Mates" } else { "Termos" }.to_string(),
                description: None,
                price: Price::new((n * 1000).into()),
                image_url: None,
            })
            .collect()
    }

    #[test]
    fn test_render_second_page() {
        let products = catalog(10);
        let mut view = ProductView::new();
        view.set_page(2);

        let lines = render_page(&view, &products);
        assert_eq!(
            lines,
            vec![
                "[9] Producto 9 (Termos) $9.000,00".to_string(),
                "[10] Producto 10 (Mates) $10.000,00".to_string(),
                "Mostrando 2 productos (página 2 de 2)".to_string(),
            ]
        );
    }

    #[test]
    fn test_render_search_summary() {
        let products = catalog(10);
        let mut view = ProductView::new();
        view.set_search_term("MATES");

        let lines = render_page(&view, &products);
        assert_eq!(lines.first().map(String::as_str), Some("Mostrando 5 de 10 productos"));
        assert_eq!(
            lines.last().map(String::as_str),
            Some("Mostrando 5 productos (página 1 de 1)")
        );
    }

    #[test]
    fn test_render_no_matches() {
        let products = catalog(3);
        let mut view = ProductView::new();
        view.set_search_term("admin");

        let lines = render_page(&view, &products);
        assert_eq!(
            lines,
            vec![
                "Mostrando 0 de 3 productos".to_string(),
                "No hay productos para mostrar.".to_string(),
            ]
        );
    }
}
