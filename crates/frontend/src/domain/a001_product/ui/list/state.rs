use crate::domain::a001_product::api::ApiError;
use crate::shared::config::ListConfig;
use crate::shared::list_utils::{contains_ignore_case, filter_list, Searchable};
use contracts::domain::a001_product::Product;

/// Search matches the product name only
impl Searchable for Product {
    fn matches_filter(&self, filter: &str) -> bool {
        contains_ignore_case(&self.name, filter)
    }
}

/// Step of a page change
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageDirection {
    Previous,
    Next,
}

/// Outputs derived from the list inputs
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListView {
    pub filtered: Vec<Product>,
    pub total_filtered_count: usize,
    pub page_slice: Vec<Product>,
    pub is_first_page: bool,
    pub is_last_page: bool,
    /// Size of the unfiltered collection
    pub total_results: usize,
}

/// Product list pipeline: four inputs and the view derived from them.
///
/// Every input setter recomputes the view before returning, so readers never
/// see outputs computed from stale inputs.
#[derive(Clone, Debug, PartialEq)]
pub struct ProductListState {
    raw_products: Vec<Product>,
    search_term: String,
    current_page: usize,
    records_per_page: usize,
    page_size_options: Vec<usize>,

    // Флаг загрузки
    pub is_loading: bool,
    load_generation: u64,

    view: ListView,
}

impl Default for ProductListState {
    fn default() -> Self {
        Self::with_page_sizes(vec![5, 10, 20], 5)
    }
}

impl ProductListState {
    pub fn new(config: &ListConfig) -> Self {
        Self::with_page_sizes(config.page_size_options.clone(), config.default_page_size)
    }

    fn with_page_sizes(page_size_options: Vec<usize>, records_per_page: usize) -> Self {
        let mut state = Self {
            raw_products: Vec::new(),
            search_term: String::new(),
            current_page: 1,
            records_per_page: records_per_page.max(1),
            page_size_options,
            is_loading: false,
            load_generation: 0,
            view: ListView::default(),
        };
        state.recompute();
        state
    }

    // ------------------------------------------------------------------
    // Inputs
    // ------------------------------------------------------------------

    pub fn raw_products(&self) -> &[Product] {
        &self.raw_products
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn records_per_page(&self) -> usize {
        self.records_per_page
    }

    pub fn page_size_options(&self) -> &[usize] {
        &self.page_size_options
    }

    /// Replace the collection wholesale
    pub fn set_products(&mut self, products: Vec<Product>) {
        self.raw_products = products;
        self.recompute();
    }

    /// Update the search term; the current page is kept.
    ///
    /// Returns whether the term changed.
    pub fn set_search_term(&mut self, term: impl Into<String>) -> bool {
        let term = term.into();
        if term == self.search_term {
            return false;
        }
        log::debug!("product list: search term {:?}", term);
        self.search_term = term;
        self.recompute();
        true
    }

    /// Change the page size and go back to the first page.
    ///
    /// Sizes outside the configured options are ignored.
    pub fn set_records_per_page(&mut self, size: usize) -> bool {
        if !self.page_size_options.contains(&size) {
            log::warn!(
                "product list: page size {} is not one of {:?}",
                size,
                self.page_size_options
            );
            return false;
        }
        self.records_per_page = size;
        self.current_page = 1;
        self.recompute();
        true
    }

    /// Move one page. Moving back from the first page stays on it; the
    /// upper bound is left to the caller (`is_last_page`).
    pub fn change_page(&mut self, direction: PageDirection) {
        self.current_page = match direction {
            PageDirection::Previous => self.current_page.saturating_sub(1).max(1),
            PageDirection::Next => self.current_page + 1,
        };
        self.recompute();
    }

    /// Start a fetch and return its sequence number
    pub fn begin_loading(&mut self) -> u64 {
        self.load_generation += 1;
        self.is_loading = true;
        self.load_generation
    }

    /// Apply the outcome of fetch `generation`: a failure empties the
    /// collection. Results of a fetch superseded by a later one are dropped
    /// and the loading flag stays up until the latest fetch lands.
    pub fn apply_fetch(&mut self, generation: u64, result: Result<Vec<Product>, ApiError>) -> bool {
        if generation != self.load_generation {
            log::debug!(
                "product list: fetch {} superseded by {}",
                generation,
                self.load_generation
            );
            return false;
        }
        self.is_loading = false;
        match result {
            Ok(products) => {
                log::info!("product list: loaded {} products", products.len());
                self.set_products(products);
            }
            Err(e) => {
                log::error!("product list: failed to load products: {}", e);
                self.set_products(Vec::new());
            }
        }
        true
    }

    pub fn find_product(&self, id: &str) -> Option<&Product> {
        self.raw_products.iter().find(|p| p.id == id)
    }

    // ------------------------------------------------------------------
    // Derived outputs
    // ------------------------------------------------------------------

    pub fn view(&self) -> &ListView {
        &self.view
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.view.total_filtered_count, self.records_per_page)
    }

    fn recompute(&mut self) {
        let filtered = filter_list(&self.raw_products, &self.search_term);
        let total_filtered_count = filtered.len();
        let page_slice = page_slice(&filtered, self.current_page, self.records_per_page);

        self.view = ListView {
            is_first_page: self.current_page == 1,
            is_last_page: is_last_page(
                total_filtered_count,
                self.current_page,
                self.records_per_page,
            ),
            total_results: self.raw_products.len(),
            total_filtered_count,
            page_slice,
            filtered,
        };
    }
}

pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1))
}

/// `items[(page-1)*size .. page*size]`, empty past the end
pub fn page_slice<T: Clone>(items: &[T], page: usize, page_size: usize) -> Vec<T> {
    let start = page.saturating_sub(1).saturating_mul(page_size);
    items.iter().skip(start).take(page_size).cloned().collect()
}

pub fn is_last_page(count: usize, page: usize, page_size: usize) -> bool {
    count == 0 || page >= total_pages(count, page_size)
}
