use serde::{Deserialize, Serialize};

/// Envelope used by the product API: the entity sits under `data`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: T,
}

/// Response body that may or may not be wrapped in the envelope
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Payload<T> {
    Envelope(ApiResponse<T>),
    Bare(T),
}

impl<T> Payload<T> {
    pub fn into_data(self) -> T {
        match self {
            Payload::Envelope(response) => response.data,
            Payload::Bare(data) => data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_product::Product;

    #[test]
    fn test_list_envelope() {
        let body = r#"{"data":[{"id":"p1","name":"Banco 1","description":"d","logo":"l","date_release":"2025-01-01","date_revision":"2026-01-01"}]}"#;
        let products = serde_json::from_str::<Payload<Vec<Product>>>(body)
            .unwrap()
            .into_data();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Banco 1");
    }

    #[test]
    fn test_bare_entity_and_message() {
        let bare = r#"{"id":"p1","name":"Banco 1","description":"d","logo":"l","date_release":"2025-01-01","date_revision":"2026-01-01"}"#;
        let product = serde_json::from_str::<Payload<Product>>(bare).unwrap().into_data();
        assert_eq!(product.id, "p1");

        let wrapped = format!(r#"{{"message":"Product added successfully","data":{}}}"#, bare);
        let response: ApiResponse<Product> = serde_json::from_str(&wrapped).unwrap();
        assert_eq!(response.message.as_deref(), Some("Product added successfully"));
        assert_eq!(response.data, product);
    }
}
