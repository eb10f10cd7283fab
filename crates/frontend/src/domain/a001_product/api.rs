//! Product API collaborator
//!
//! The engine depends on [`ProductApi`] only; [`HttpProductApi`] is the
//! browser implementation over the REST endpoints.

use crate::shared::api_utils::item_url;
use crate::shared::config::ApiConfig;
use async_trait::async_trait;
use contracts::domain::a001_product::Product;
use contracts::shared::api_response::Payload;
use gloo_net::http::{Request, Response};
use leptos::prelude::*;
use serde::de::DeserializeOwned;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Request(String),

    #[error("HTTP error: {0}")]
    Status(u16),

    #[error("Product not found: {0}")]
    NotFound(String),

    #[error("Failed to parse response: {0}")]
    Decode(String),
}

/// Remote operations on the product catalog
#[async_trait(?Send)]
pub trait ProductApi {
    async fn fetch_all_products(&self) -> Result<Vec<Product>, ApiError>;

    async fn fetch_product_by_id(&self, id: &str) -> Result<Product, ApiError>;

    async fn create_product(&self, product: &Product) -> Result<Product, ApiError>;

    /// Replace a registered product; the record's own id selects it
    async fn update_product(&self, product: &Product) -> Result<Product, ApiError>;

    async fn delete_product(&self, id: &str) -> Result<(), ApiError>;

    /// Whether a product with this id is already registered
    async fn check_id_exists(&self, id: &str) -> Result<bool, ApiError>;
}

/// Handle to the API provided through context.
///
/// Components need a `Copy + Send` value; the API itself lives in local
/// storage of the reactive arena.
#[derive(Clone, Copy)]
pub struct ApiContext(StoredValue<Rc<dyn ProductApi>, LocalStorage>);

impl ApiContext {
    pub fn new(api: Rc<dyn ProductApi>) -> Self {
        Self(StoredValue::new_local(api))
    }

    pub fn api(&self) -> Rc<dyn ProductApi> {
        self.0.get_value()
    }
}

// ============================================================================
// HTTP implementation
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpProductApi {
    products_url: String,
}

impl HttpProductApi {
    pub fn new(products_url: impl Into<String>) -> Self {
        Self {
            products_url: products_url.into(),
        }
    }

    pub fn from_config(config: &ApiConfig) -> Self {
        Self::new(config.products_url())
    }

    pub fn products_url(&self) -> &str {
        &self.products_url
    }

    fn product_url(&self, id: &str) -> String {
        item_url(&self.products_url, id)
    }

    /// Updates go to the collection itself (`PUT /bp/products`), not to
    /// `/{id}`; the server reads the id from the body.
    fn update_url(&self) -> &str {
        &self.products_url
    }

    fn verification_url(&self, id: &str) -> String {
        item_url(&item_url(&self.products_url, "verification"), id)
    }
}

async fn read_payload<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    if !response.ok() {
        return Err(ApiError::Status(response.status()));
    }
    response
        .json::<Payload<T>>()
        .await
        .map(Payload::into_data)
        .map_err(|e| ApiError::Decode(e.to_string()))
}

fn request_error(e: gloo_net::Error) -> ApiError {
    ApiError::Request(e.to_string())
}

#[async_trait(?Send)]
impl ProductApi for HttpProductApi {
    async fn fetch_all_products(&self) -> Result<Vec<Product>, ApiError> {
        let response = Request::get(&self.products_url)
            .send()
            .await
            .map_err(request_error)?;
        read_payload(response).await
    }

    async fn fetch_product_by_id(&self, id: &str) -> Result<Product, ApiError> {
        let response = Request::get(&self.product_url(id))
            .send()
            .await
            .map_err(request_error)?;
        if response.status() == 404 {
            return Err(ApiError::NotFound(id.to_string()));
        }
        read_payload(response).await
    }

    async fn create_product(&self, product: &Product) -> Result<Product, ApiError> {
        let response = Request::post(&self.products_url)
            .json(product)
            .map_err(request_error)?
            .send()
            .await
            .map_err(request_error)?;
        read_payload(response).await
    }

    async fn update_product(&self, product: &Product) -> Result<Product, ApiError> {
        let response = Request::put(self.update_url())
            .json(product)
            .map_err(request_error)?
            .send()
            .await
            .map_err(request_error)?;
        read_payload(response).await
    }

    async fn delete_product(&self, id: &str) -> Result<(), ApiError> {
        let response = Request::delete(&self.product_url(id))
            .send()
            .await
            .map_err(request_error)?;
        if !response.ok() {
            return Err(ApiError::Status(response.status()));
        }
        Ok(())
    }

    async fn check_id_exists(&self, id: &str) -> Result<bool, ApiError> {
        let response = Request::get(&self.verification_url(id))
            .send()
            .await
            .map_err(request_error)?;
        read_payload(response).await
    }
}
