use super::form::{FormMode, IdCheck, ProductForm};
use super::unique_id::UniqueIdValidator;
use crate::domain::a001_product::api::ProductApi;
use crate::shared::state::Store;
use crate::shared::timer::{BrowserTimer, Timer};
use contracts::domain::a001_product::{Product, ProductField, ProductRules};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::rc::Rc;
use std::time::Duration;

/// Result of a save attempt
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Saved; carries the notice for the user
    Saved(String),
    /// The API call failed; the form holds the error message
    Failed,
    /// Invalid form, submission already running, or form disposed
    Rejected,
}

/// Run the uniqueness check for `check` and apply the result to the form
pub async fn check_id_uniqueness<A, T, S>(
    validator: &UniqueIdValidator<A, T>,
    form: &S,
    check: IdCheck,
) -> bool
where
    A: ProductApi + ?Sized,
    T: Timer,
    S: Store<ProductForm>,
{
    let Some(result) = validator.validate(&check.id).await else {
        return false;
    };
    form.update_with(|form| form.resolve_id_check(&check, result))
        .unwrap_or(false)
}

/// Submit the form: create in `Create` mode, update in `Edit` mode
pub async fn save_product<A, S>(api: &A, form: &S) -> SaveOutcome
where
    A: ProductApi + ?Sized,
    S: Store<ProductForm>,
{
    let started = form
        .update_with(|form| form.begin_submit().map(|product| (product, form.mode().clone())))
        .flatten();
    let Some((product, mode)) = started else {
        return SaveOutcome::Rejected;
    };

    let result = match mode {
        FormMode::Create => api.create_product(&product).await,
        FormMode::Edit { .. } => api.update_product(&product).await,
    };

    match form.update_with(|form| form.finish_submit(&result)) {
        Some(Some(notice)) => SaveOutcome::Saved(notice),
        Some(None) => SaveOutcome::Failed,
        None => {
            log::debug!("product form: disposed before the save finished");
            SaveOutcome::Rejected
        }
    }
}

/// Fetch the product to edit; `None` means the edit flow cannot start
pub async fn load_product<A>(api: &A, id: Option<&str>) -> Option<Product>
where
    A: ProductApi + ?Sized,
{
    let Some(id) = id.filter(|id| !id.is_empty()) else {
        log::warn!("product edit: no product id given");
        return None;
    };
    match api.fetch_product_by_id(id).await {
        Ok(product) => Some(product),
        Err(e) => {
            log::error!("product edit: failed to load {}: {}", id, e);
            None
        }
    }
}

#[derive(Clone)]
struct Services {
    api: Rc<dyn ProductApi>,
    validator: UniqueIdValidator<dyn ProductApi, BrowserTimer>,
}

/// ViewModel for the product registration and edit forms
#[derive(Clone, Copy)]
pub struct ProductDetailsViewModel {
    pub form: RwSignal<ProductForm>,
    /// False until the edited product has been fetched
    pub loaded: RwSignal<bool>,
    services: StoredValue<Services, LocalStorage>,
}

impl ProductDetailsViewModel {
    /// Registration form; call [`load_existing`](Self::load_existing) to
    /// edit instead.
    pub fn new(api: Rc<dyn ProductApi>, id_check_debounce: Duration) -> Self {
        let validator = UniqueIdValidator::new(api.clone(), BrowserTimer, id_check_debounce);
        Self {
            form: RwSignal::new(ProductForm::initialize(None, ProductRules::for_today())),
            loaded: RwSignal::new(true),
            services: StoredValue::new_local(Services { api, validator }),
        }
    }

    /// Switch to `Edit` mode over a fetched product. Ignored once the page
    /// is gone.
    pub fn load_existing(&self, product: Product) {
        let form = ProductForm::initialize(Some(product), ProductRules::for_today());
        if self.form.try_set(form).is_none() {
            self.loaded.try_set(true);
        }
    }

    pub fn is_edit_mode(&self) -> bool {
        self.form.with(|form| form.mode().is_edit())
    }

    pub fn on_input(&self, field: ProductField, value: String) {
        let check = self
            .form
            .try_update(|form| {
                let check = form.set_value(field, value);
                if field == ProductField::DateRelease {
                    form.set_revision_date();
                }
                check
            })
            .flatten();

        let services = self.services.get_value();
        match check {
            Some(check) => {
                let form = self.form;
                spawn_local(async move {
                    check_id_uniqueness(&services.validator, &form, check).await;
                });
            }
            None if field == ProductField::Id => services.validator.cancel(),
            None => {}
        }
    }

    pub fn on_blur(&self, field: ProductField) {
        self.form.update(|form| form.touch(field));
    }

    pub fn reset(&self) {
        self.services.with_value(|services| services.validator.cancel());
        self.form.update(|form| {
            form.reset();
        });
    }

    /// Save the form and report the notice on success
    pub fn save_command(&self, on_saved: Callback<String>) {
        let form = self.form;
        let api = self.services.with_value(|services| services.api.clone());
        spawn_local(async move {
            if let SaveOutcome::Saved(notice) = save_product(api.as_ref(), &form).await {
                on_saved.run(notice);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_product::mock::{catalog, product, Call, MockProductApi};
    use crate::shared::timer::TokioTimer;
    use chrono::NaiveDate;
    use std::cell::RefCell;

    fn rules() -> ProductRules {
        ProductRules::new(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap())
    }

    fn create_form() -> Rc<RefCell<ProductForm>> {
        Rc::new(RefCell::new(ProductForm::initialize(None, rules())))
    }

    fn fill(form: &Rc<RefCell<ProductForm>>, id: &str) -> Option<IdCheck> {
        let mut form = form.borrow_mut();
        let check = form.set_value(ProductField::Id, id);
        form.set_value(ProductField::Name, "Tarjeta Oro");
        form.set_value(ProductField::Description, "Tarjeta de credito oro");
        form.set_value(ProductField::Logo, "logo.png");
        form.set_value(ProductField::DateRelease, "2030-01-01");
        form.set_revision_date();
        check
    }

    fn validator(api: &MockProductApi) -> UniqueIdValidator<MockProductApi, TokioTimer> {
        UniqueIdValidator::new(Rc::new(api.clone()), TokioTimer, Duration::from_millis(500))
    }

    #[tokio::test(start_paused = true)]
    async fn test_taken_id_blocks_registration() {
        let api = MockProductApi::with_products(vec![product("trj-01", "Tarjeta Uno")]);
        let form = create_form();
        let check = fill(&form, "trj-01").unwrap();

        assert!(check_id_uniqueness(&validator(&api), &form, check).await);
        assert!(!form.borrow().is_valid());

        assert_eq!(save_product(&api, &form).await, SaveOutcome::Rejected);
        assert_eq!(api.count(|c| matches!(c, Call::Create(_))), 0);
        assert!(form.borrow().field(ProductField::Id).touched);
    }

    #[tokio::test(start_paused = true)]
    async fn test_registration_creates_product() {
        let api = MockProductApi::with_products(catalog());
        let form = create_form();
        let check = fill(&form, "new-01").unwrap();
        check_id_uniqueness(&validator(&api), &form, check).await;

        let outcome = save_product(&api, &form).await;

        assert_eq!(
            outcome,
            SaveOutcome::Saved("Product Tarjeta Oro created successfully.".into())
        );
        assert_eq!(api.count(|c| *c == Call::Create("new-01".into())), 1);
        assert!(!form.borrow().is_submitting());
    }

    #[tokio::test(start_paused = true)]
    async fn test_unreachable_lookup_allows_registration() {
        let api = MockProductApi::default();
        api.fail_check();
        let form = create_form();
        let check = fill(&form, "abc").unwrap();
        check_id_uniqueness(&validator(&api), &form, check).await;
        assert!(form.borrow().is_valid());
    }

    #[tokio::test(start_paused = true)]
    async fn test_superseded_check_is_not_applied() {
        let api = MockProductApi::with_products(vec![product("trj-01", "Tarjeta Uno")]);
        let validator = validator(&api);
        let form = create_form();
        let first = fill(&form, "trj-01").unwrap();

        let first_run = check_id_uniqueness(&validator, &form, first);
        let second_run = async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            let second = form
                .borrow_mut()
                .set_value(ProductField::Id, "free-id")
                .unwrap();
            check_id_uniqueness(&validator, &form, second).await
        };
        let (first_applied, second_applied) = tokio::join!(first_run, second_run);

        assert!(!first_applied);
        assert!(second_applied);
        assert!(form.borrow().is_valid());
        assert_eq!(api.calls(), vec![Call::CheckId("free-id".into())]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_double_submit_sends_one_request() {
        let api = MockProductApi::default();
        api.set_latency(Duration::from_millis(200));
        let form = create_form();
        let check = fill(&form, "abc").unwrap();
        form.borrow_mut().resolve_id_check(&check, Ok(()));

        let (first, second) = tokio::join!(save_product(&api, &form), save_product(&api, &form));

        assert!(matches!(first, SaveOutcome::Saved(_)));
        assert_eq!(second, SaveOutcome::Rejected);
        assert_eq!(api.count(|c| matches!(c, Call::Create(_))), 1);
    }

    #[tokio::test]
    async fn test_failed_create_clears_submitting() {
        let api = MockProductApi::default();
        api.fail_save();
        let form = create_form();
        let check = fill(&form, "abc").unwrap();
        form.borrow_mut().resolve_id_check(&check, Ok(()));

        assert_eq!(save_product(&api, &form).await, SaveOutcome::Failed);
        let form = form.borrow();
        assert!(!form.is_submitting());
        assert_eq!(
            form.error_message(),
            Some("There was an error creating the product. Please try again.")
        );
    }

    #[tokio::test]
    async fn test_edit_updates_with_original_id() {
        let api = MockProductApi::with_products(vec![product("XYZ-123", "Cuenta Ahorro")]);
        let existing = load_product(&api, Some("XYZ-123")).await.unwrap();
        let form = Rc::new(RefCell::new(ProductForm::initialize(Some(existing), rules())));
        form.borrow_mut()
            .set_value(ProductField::Name, "Cuenta Ahorro Plus");

        let outcome = save_product(&api, &form).await;

        assert_eq!(
            outcome,
            SaveOutcome::Saved("Product Cuenta Ahorro Plus updated successfully.".into())
        );
        assert_eq!(api.count(|c| *c == Call::Update("XYZ-123".into())), 1);
        assert_eq!(api.count(|c| matches!(c, Call::CheckId(_))), 0);
    }

    #[tokio::test]
    async fn test_load_without_id_or_unknown_id() {
        let api = MockProductApi::with_products(catalog());
        assert_eq!(load_product(&api, None).await, None);
        assert_eq!(load_product(&api, Some("")).await, None);
        assert_eq!(load_product(&api, Some("missing")).await, None);
        assert_eq!(api.calls(), vec![Call::FetchById("missing".into())]);
    }
}
