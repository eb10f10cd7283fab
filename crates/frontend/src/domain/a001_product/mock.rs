//! In-memory `ProductApi` that records every call

use super::api::{ApiError, ProductApi};
use async_trait::async_trait;
use contracts::domain::a001_product::Product;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    FetchAll,
    FetchById(String),
    Create(String),
    Update(String),
    Delete(String),
    CheckId(String),
}

#[derive(Debug, Default)]
struct MockState {
    products: Vec<Product>,
    calls: Vec<Call>,
    fail_fetch: bool,
    fail_save: bool,
    fail_delete: bool,
    fail_check: bool,
    latency: Option<Duration>,
}

#[derive(Debug, Clone, Default)]
pub struct MockProductApi {
    state: Rc<RefCell<MockState>>,
}

impl MockProductApi {
    pub fn with_products(products: Vec<Product>) -> Self {
        let api = Self::default();
        api.state.borrow_mut().products = products;
        api
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.state.borrow().calls.iter().filter(|c| pred(c)).count()
    }

    pub fn fail_fetch(&self) {
        self.state.borrow_mut().fail_fetch = true;
    }

    pub fn fail_save(&self) {
        self.state.borrow_mut().fail_save = true;
    }

    pub fn fail_delete(&self) {
        self.state.borrow_mut().fail_delete = true;
    }

    pub fn fail_check(&self) {
        self.state.borrow_mut().fail_check = true;
    }

    /// Every call sleeps on tokio's clock before answering
    pub fn set_latency(&self, latency: Duration) {
        self.state.borrow_mut().latency = Some(latency);
    }

    fn record(&self, call: Call) {
        self.state.borrow_mut().calls.push(call);
    }

    async fn delay(&self) {
        let latency = self.state.borrow().latency;
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait(?Send)]
impl ProductApi for MockProductApi {
    async fn fetch_all_products(&self) -> Result<Vec<Product>, ApiError> {
        self.record(Call::FetchAll);
        // Answer with the collection as it was when the request was made
        let snapshot = {
            let state = self.state.borrow();
            if state.fail_fetch {
                Err(ApiError::Status(500))
            } else {
                Ok(state.products.clone())
            }
        };
        self.delay().await;
        snapshot
    }

    async fn fetch_product_by_id(&self, id: &str) -> Result<Product, ApiError> {
        self.record(Call::FetchById(id.to_string()));
        self.delay().await;
        self.state
            .borrow()
            .products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(id.to_string()))
    }

    async fn create_product(&self, product: &Product) -> Result<Product, ApiError> {
        self.record(Call::Create(product.id.clone()));
        self.delay().await;
        let mut state = self.state.borrow_mut();
        if state.fail_save {
            return Err(ApiError::Status(400));
        }
        state.products.push(product.clone());
        Ok(product.clone())
    }

    async fn update_product(&self, product: &Product) -> Result<Product, ApiError> {
        self.record(Call::Update(product.id.clone()));
        self.delay().await;
        let mut state = self.state.borrow_mut();
        if state.fail_save {
            return Err(ApiError::Status(400));
        }
        match state.products.iter_mut().find(|p| p.id == product.id) {
            Some(existing) => {
                *existing = product.clone();
                Ok(product.clone())
            }
            None => Err(ApiError::NotFound(product.id.clone())),
        }
    }

    async fn delete_product(&self, id: &str) -> Result<(), ApiError> {
        self.record(Call::Delete(id.to_string()));
        self.delay().await;
        let mut state = self.state.borrow_mut();
        if state.fail_delete {
            return Err(ApiError::Status(500));
        }
        state.products.retain(|p| p.id != id);
        Ok(())
    }

    async fn check_id_exists(&self, id: &str) -> Result<bool, ApiError> {
        self.record(Call::CheckId(id.to_string()));
        self.delay().await;
        let state = self.state.borrow();
        if state.fail_check {
            return Err(ApiError::Request("connection refused".into()));
        }
        Ok(state.products.iter().any(|p| p.id == id))
    }
}

/// Product named `name` with otherwise valid fields
pub fn product(id: &str, name: &str) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        description: format!("Description of {}", name),
        logo: "https://example.com/logo.png".to_string(),
        date_release: "2030-01-01".to_string(),
        date_revision: "2031-01-01".to_string(),
    }
}

/// Ten products, two of them containing "Banco"
pub fn catalog() -> Vec<Product> {
    [
        ("p1", "Banco 1"),
        ("p2", "Tarjeta 2"),
        ("p3", "Crédito 3"),
        ("p4", "Banco 4"),
        ("p5", "Tarjeta 5"),
        ("p6", "Crédito 6"),
        ("p7", "Prueba 7"),
        ("p8", "Prueba 8"),
        ("p9", "Prueba 9"),
        ("p10", "Prueba 10"),
    ]
    .into_iter()
    .map(|(id, name)| product(id, name))
    .collect()
}
