//! Navigation targets.

use core::fmt;

use crate::types::ProductId;

/// A page the user can be sent to.
///
/// Delete and update carry the selected product as a payload; front ends
/// attach it however their router allows (the storefront uses `?id=`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Products,
    ProductDetail(ProductId),
    DeleteProduct,
    UpdateProduct,
    Login,
    Cart,
}

impl Route {
    /// Path of the route, without any payload.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Products => "/productos".to_string(),
            Self::ProductDetail(id) => format!("/producto/{id}"),
            Self::DeleteProduct => "/eliminar-producto".to_string(),
            Self::UpdateProduct => "/actualizar-producto".to_string(),
            Self::Login => "/login".to_string(),
            Self::Cart => "/carrito".to_string(),
        }
    }

    /// Path with the selected product attached as the `id` query parameter.
    #[must_use]
    pub fn with_product(&self, id: &ProductId) -> String {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("id", id.as_str())
            .finish();
        format!("{}?{query}", self.path())
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(Route::Products.path(), "/productos");
        assert_eq!(
            Route::ProductDetail(ProductId::new("7")).path(),
            "/producto/7"
        );
        assert_eq!(Route::DeleteProduct.path(), "/eliminar-producto");
        assert_eq!(Route::UpdateProduct.path(), "/actualizar-producto");
    }

    #[test]
    fn test_with_product_payload() {
        let id = ProductId::new("12");
        assert_eq!(
            Route::UpdateProduct.with_product(&id),
            "/actualizar-producto?id=12"
        );
    }

    #[test]
    fn test_with_product_encodes_id() {
        let id = ProductId::new("a&b c#1");
        assert_eq!(
            Route::DeleteProduct.with_product(&id),
            "/eliminar-producto?id=a%26b+c%231"
        );
    }
}
