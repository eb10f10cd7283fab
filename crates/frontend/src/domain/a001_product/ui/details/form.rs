use crate::domain::a001_product::api::ApiError;
use contracts::domain::a001_product::aggregate::revision_date_for;
use contracts::domain::a001_product::{FieldError, Product, ProductField, ProductRules};

/// Whether the form registers a new product or edits an existing one.
///
/// Fixed at initialization. The id field is enabled and checked for
/// uniqueness only in `Create`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { original_id: String },
}

impl FormMode {
    pub fn is_edit(&self) -> bool {
        matches!(self, FormMode::Edit { .. })
    }

    pub fn is_id_enabled(&self) -> bool {
        !self.is_edit()
    }

    pub fn checks_id_uniqueness(&self) -> bool {
        !self.is_edit()
    }
}

/// State of the remote uniqueness check on the id field
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AsyncStatus {
    #[default]
    Idle,
    Pending,
    Valid,
    Invalid(FieldError),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldState {
    pub value: String,
    pub touched: bool,
    pub errors: Vec<FieldError>,
    pub async_status: AsyncStatus,
}

impl FieldState {
    pub fn is_pending(&self) -> bool {
        self.async_status == AsyncStatus::Pending
    }

    /// Sync rules pass and no async check is pending or failed
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
            && !matches!(
                self.async_status,
                AsyncStatus::Pending | AsyncStatus::Invalid(_)
            )
    }

    /// First violation to show, only once the field was touched
    pub fn visible_error(&self) -> Option<&FieldError> {
        if !self.touched {
            return None;
        }
        match &self.async_status {
            AsyncStatus::Invalid(err) => Some(err),
            _ => self.errors.first(),
        }
    }
}

/// Id value handed to the uniqueness check
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdCheck {
    pub id: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormEvent {
    Submitted(Product),
    Reset,
}

/// Product form state machine
#[derive(Clone, Debug, PartialEq)]
pub struct ProductForm {
    mode: FormMode,
    rules: ProductRules,
    fields: [FieldState; 6],
    is_submitting: bool,
    error_message: Option<String>,
}

fn slot(field: ProductField) -> usize {
    match field {
        ProductField::Id => 0,
        ProductField::Name => 1,
        ProductField::Description => 2,
        ProductField::Logo => 3,
        ProductField::DateRelease => 4,
        ProductField::DateRevision => 5,
    }
}

impl ProductForm {
    /// Build the form. An existing record selects `Edit` mode and pre-fills
    /// every field.
    pub fn initialize(existing: Option<Product>, rules: ProductRules) -> Self {
        let mode = match &existing {
            Some(product) => FormMode::Edit {
                original_id: product.id.clone(),
            },
            None => FormMode::Create,
        };
        let record = existing.unwrap_or_default();

        let mut form = Self {
            mode,
            rules,
            fields: Default::default(),
            is_submitting: false,
            error_message: None,
        };
        for field in ProductField::ALL {
            form.write(field, field.get(&record).to_string());
        }
        log::debug!("product form: initialized in {:?} mode", form.mode);
        form
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn rules(&self) -> &ProductRules {
        &self.rules
    }

    pub fn field(&self, field: ProductField) -> &FieldState {
        &self.fields[slot(field)]
    }

    pub fn value(&self, field: ProductField) -> &str {
        &self.field(field).value
    }

    pub fn is_enabled(&self, field: ProductField) -> bool {
        field != ProductField::Id || self.mode.is_id_enabled()
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Set a field value and re-run its rules.
    ///
    /// Returns the uniqueness check to run when the id changed in `Create`
    /// mode and passed its sync rules. Writes to a disabled field are ignored.
    pub fn set_value(&mut self, field: ProductField, value: impl Into<String>) -> Option<IdCheck> {
        if !self.is_enabled(field) {
            log::debug!("product form: {} is disabled", field);
            return None;
        }
        self.write(field, value.into())
    }

    pub fn touch(&mut self, field: ProductField) {
        self.fields[slot(field)].touched = true;
    }

    fn touch_all(&mut self) {
        for state in self.fields.iter_mut() {
            state.touched = true;
        }
    }

    fn write(&mut self, field: ProductField, value: String) -> Option<IdCheck> {
        let errors = self.rules.validate_field(field, &value);
        let wants_check = field == ProductField::Id
            && self.mode.checks_id_uniqueness()
            && errors.is_empty();

        let state = &mut self.fields[slot(field)];
        state.value = value;
        state.errors = errors;
        if field != ProductField::Id {
            return None;
        }

        if wants_check {
            state.async_status = AsyncStatus::Pending;
            Some(IdCheck {
                id: state.value.clone(),
            })
        } else {
            state.async_status = AsyncStatus::Idle;
            None
        }
    }

    /// Apply a uniqueness result. Results for a value the field no longer
    /// holds, or arriving when no check is pending, are dropped.
    pub fn resolve_id_check(&mut self, check: &IdCheck, result: Result<(), FieldError>) -> bool {
        let state = &mut self.fields[slot(ProductField::Id)];
        if !state.is_pending() || state.value != check.id {
            log::debug!("product form: stale id check for {:?} dropped", check.id);
            return false;
        }
        state.async_status = match result {
            Ok(()) => AsyncStatus::Valid,
            Err(err) => AsyncStatus::Invalid(err),
        };
        true
    }

    /// Derive the revision date from the release date. An empty or
    /// malformed release date leaves the revision untouched.
    pub fn set_revision_date(&mut self) {
        let release = self.value(ProductField::DateRelease).to_string();
        if release.is_empty() {
            return;
        }
        match revision_date_for(&release) {
            Some(revision) => {
                self.write(ProductField::DateRevision, revision);
            }
            None => log::debug!("product form: release date {:?} is not a date", release),
        }
    }

    /// Every enabled field is valid
    pub fn is_valid(&self) -> bool {
        ProductField::ALL
            .iter()
            .filter(|field| self.is_enabled(**field))
            .all(|field| self.field(*field).is_valid())
    }

    /// The record held by the form, id included even when disabled
    pub fn record(&self) -> Product {
        let mut product = Product::default();
        for field in ProductField::ALL {
            field.set(&mut product, self.value(field).to_string());
        }
        if let FormMode::Edit { original_id } = &self.mode {
            product.id = original_id.clone();
        }
        product
    }

    /// Emit the record when the form is valid; otherwise mark every field
    /// touched and emit nothing.
    pub fn submit(&mut self) -> Option<FormEvent> {
        if !self.is_valid() {
            log::debug!("product form: submit refused, form is invalid");
            self.touch_all();
            return None;
        }
        Some(FormEvent::Submitted(self.record()))
    }

    /// Clear every value. `Edit` mode keeps its original id.
    pub fn reset(&mut self) -> FormEvent {
        let original_id = match &self.mode {
            FormMode::Edit { original_id } => original_id.clone(),
            FormMode::Create => String::new(),
        };
        for field in ProductField::ALL {
            let value = if field == ProductField::Id {
                original_id.clone()
            } else {
                String::new()
            };
            self.write(field, value);
            self.fields[slot(field)].touched = false;
        }
        self.error_message = None;
        FormEvent::Reset
    }

    /// Start a submission. `None` when one is already running or the form
    /// is invalid.
    pub fn begin_submit(&mut self) -> Option<Product> {
        if self.is_submitting {
            log::debug!("product form: submission already in flight");
            return None;
        }
        match self.submit()? {
            FormEvent::Submitted(product) => {
                self.is_submitting = true;
                self.error_message = None;
                Some(product)
            }
            FormEvent::Reset => None,
        }
    }

    /// End a submission; returns the success notice.
    pub fn finish_submit(&mut self, result: &Result<Product, ApiError>) -> Option<String> {
        self.is_submitting = false;
        let is_edit = self.mode.is_edit();
        match result {
            Ok(product) => {
                let verb = if is_edit { "updated" } else { "created" };
                log::info!("product form: product {} {}", product.id, verb);
                Some(format!("Product {} {} successfully.", product.name, verb))
            }
            Err(e) => {
                log::error!("product form: save failed: {}", e);
                self.error_message = Some(
                    if is_edit {
                        "There was an error updating the product."
                    } else {
                        "There was an error creating the product. Please try again."
                    }
                    .to_string(),
                );
                None
            }
        }
    }
}
