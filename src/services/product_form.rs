use rust_decimal::Decimal;
use tracing::{info, instrument};
use validator::{Validate, ValidationError};

use super::ListSyncView;
use crate::document::{Document, Form, ADD_PRODUCT_FORM};
use crate::errors::{SubmitAction, ViewerError, ViewerResult};
use crate::models::{lenient, Product};
use crate::resources::ResourceKind;

pub const PRODUCTS_PATH: &str = "/products";

/// Raw text of the add-product form, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFormValues {
    pub item_name: String,
    pub quantity: String,
    pub unit_price: String,
    pub location: String,
    pub manufacturer: String,
}

/// Parsed form values awaiting validation.
#[derive(Debug, Validate)]
struct ProductDraft {
    #[validate(range(min = 0, message = "quantity must not be negative"))]
    quantity: i64,
    #[validate(custom = "validate_unit_price")]
    unit_price: Decimal,
}

fn validate_unit_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() && !price.is_zero() {
        let mut err = ValidationError::new("unit_price");
        err.message = Some("unit price must not be negative".into());
        return Err(err);
    }
    Ok(())
}

impl ProductFormValues {
    pub fn from_form(form: &Form) -> Self {
        let field = |id: &str| form.value(id).unwrap_or_default().to_string();
        Self {
            item_name: field("item-name"),
            quantity: field("quantity"),
            unit_price: field("unit-price"),
            location: field("location"),
            manufacturer: field("manufacturer"),
        }
    }

    /// Copies the values into `form`, as if the user had typed them.
    pub fn fill(&self, form: &mut Form) {
        form.set("item-name", self.item_name.as_str());
        form.set("quantity", self.quantity.as_str());
        form.set("unit-price", self.unit_price.as_str());
        form.set("location", self.location.as_str());
        form.set("manufacturer", self.manufacturer.as_str());
    }

    /// Parses and validates the numeric fields and derives the stock status.
    pub fn to_product(&self) -> ViewerResult<Product> {
        let quantity = self.quantity.trim().parse::<i64>().map_err(|_| {
            ViewerError::Validation(format!(
                "quantity must be a whole number, got {:?}",
                self.quantity
            ))
        })?;
        let unit_price = lenient::decimal::parse(&self.unit_price).ok_or_else(|| {
            ViewerError::Validation(format!(
                "unit price must be a number, got {:?}",
                self.unit_price
            ))
        })?;

        let draft = ProductDraft {
            quantity,
            unit_price,
        };
        draft
            .validate()
            .map_err(|e| ViewerError::Validation(e.to_string()))?;

        Ok(Product::new(
            self.item_name.clone(),
            draft.quantity,
            draft.unit_price,
            self.location.clone(),
            self.manufacturer.clone(),
        ))
    }
}

/// Turns a failed follow-up sync into a `Refresh` error for `action`.
pub(crate) fn refresh_error(action: SubmitAction, err: ViewerError) -> ViewerError {
    match err {
        ViewerError::Fetch { resource, source } => ViewerError::Refresh {
            action,
            resource,
            source,
        },
        other => other,
    }
}

impl<D: Document> ListSyncView<D> {
    /// Reads the add-product form from the document and submits it.
    pub async fn submit_product_form(&mut self) -> ViewerResult<()> {
        let values = match self.document.form(ADD_PRODUCT_FORM) {
            Some(form) => ProductFormValues::from_form(form),
            None => return self.fail(ViewerError::MissingElement(ADD_PRODUCT_FORM.to_string())),
        };
        self.submit_product(values).await
    }

    /// Creates a product from `values`, then refreshes the products table and
    /// clears the form.
    ///
    /// The table is re-fetched rather than patched locally. If that refresh
    /// fails, its own alert is shown and a `Refresh` error is returned; the
    /// product itself was created.
    #[instrument(skip(self, values), fields(item_name = %values.item_name))]
    pub async fn submit_product(&mut self, values: ProductFormValues) -> ViewerResult<()> {
        let product = match values.to_product() {
            Ok(product) => product,
            Err(err) => return self.fail(err),
        };
        let body = match serde_json::to_value(&product) {
            Ok(body) => body,
            Err(e) => return self.fail(ViewerError::Validation(e.to_string())),
        };

        if let Err(source) = self.backend.post_json(PRODUCTS_PATH, body).await {
            return self.fail(ViewerError::Submit {
                action: SubmitAction::AddProduct,
                source,
            });
        }

        info!(stock_status = ?product.stock_status, "Product added");
        self.document.alert("Product added successfully!");

        let refreshed = self.sync(ResourceKind::Products).await;

        if let Some(form) = self.document.form_mut(ADD_PRODUCT_FORM) {
            form.reset();
        }

        refreshed
            .map(|_| ())
            .map_err(|err| refresh_error(SubmitAction::AddProduct, err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockInventoryBackend;
    use crate::document::InMemoryDocument;
    use crate::errors::BackendError;
    use assert_matches::assert_matches;
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    fn values(quantity: &str, unit_price: &str) -> ProductFormValues {
        ProductFormValues {
            item_name: "Hex Bolt".into(),
            quantity: quantity.into(),
            unit_price: unit_price.into(),
            location: "Aisle 3".into(),
            manufacturer: "Fastenal".into(),
        }
    }

    #[test]
    fn derives_stock_status_from_quantity() {
        let product = values("5", "0.25").to_product().unwrap();
        assert_eq!(product.stock_status.as_deref(), Some("In Stock"));

        let product = values("0", "0.25").to_product().unwrap();
        assert_eq!(product.stock_status.as_deref(), Some("Out of Stock"));
    }

    #[test]
    fn rejects_unparseable_and_negative_numbers() {
        assert_matches!(values("five", "1").to_product(), Err(ViewerError::Validation(_)));
        assert_matches!(values("5", "").to_product(), Err(ViewerError::Validation(_)));
        assert_matches!(values("-1", "1").to_product(), Err(ViewerError::Validation(_)));
        assert_matches!(values("1", "-0.01").to_product(), Err(ViewerError::Validation(_)));
    }

    #[test]
    fn form_round_trip() {
        let mut form = Form::with_fields(crate::document::PRODUCT_FORM_FIELDS);
        let typed = values("7", "3.10");
        typed.fill(&mut form);
        assert_eq!(ProductFormValues::from_form(&form), typed);
    }

    #[tokio::test]
    async fn successful_submit_refreshes_once_and_resets_form() {
        let posted: Arc<Mutex<Vec<Value>>> = Arc::default();
        let sink = posted.clone();

        let mut backend = MockInventoryBackend::new();
        backend
            .expect_post_json()
            .withf(|path, _| path == "/products")
            .times(1)
            .returning(move |_, body| {
                sink.lock().unwrap().push(body);
                Ok(())
            });
        backend
            .expect_get_json()
            .withf(|path| path == "/products")
            .times(1)
            .returning(|_| {
                Ok(json!([{
                    "item_name": "Hex Bolt", "quantity": 5, "unit_price": 0.25,
                    "location": "Aisle 3", "manufacturer": "Fastenal", "stock_status": "In Stock"
                }]))
            });

        let mut view = ListSyncView::new(Arc::new(backend), InMemoryDocument::inventory_page());
        values("5", "0.25").fill(view.document_mut().form_mut(ADD_PRODUCT_FORM).unwrap());

        view.submit_product_form().await.unwrap();

        let posted = posted.lock().unwrap();
        assert_eq!(posted[0]["stock_status"], json!("In Stock"));
        assert_eq!(posted[0]["quantity"], json!(5));
        assert!(view.document().form(ADD_PRODUCT_FORM).unwrap().is_blank());
        assert_eq!(view.document().table_body("product-table").unwrap().len(), 1);
        assert_eq!(view.document().alerts(), &["Product added successfully!".to_string()]);
    }

    #[tokio::test]
    async fn rejected_submit_alerts_and_skips_refresh() {
        let mut backend = MockInventoryBackend::new();
        backend.expect_post_json().times(1).returning(|path, _| {
            Err(BackendError::Status {
                path: path.to_string(),
                status: 422,
            })
        });
        backend.expect_get_json().never();

        let mut view = ListSyncView::new(Arc::new(backend), InMemoryDocument::inventory_page());
        let typed = values("2", "9.99");
        typed.fill(view.document_mut().form_mut(ADD_PRODUCT_FORM).unwrap());

        let err = view.submit_product_form().await.unwrap_err();
        assert_matches!(err, ViewerError::Submit { action: SubmitAction::AddProduct, .. });
        assert_eq!(view.document().alerts(), &["Failed to add product".to_string()]);
        // the form keeps what the user typed
        assert_eq!(
            ProductFormValues::from_form(view.document().form(ADD_PRODUCT_FORM).unwrap()),
            typed
        );
    }

    #[tokio::test]
    async fn invalid_quantity_never_reaches_the_backend() {
        let mut backend = MockInventoryBackend::new();
        backend.expect_post_json().never();

        let mut view = ListSyncView::new(Arc::new(backend), InMemoryDocument::inventory_page());
        let err = view.submit_product(values("NaN", "1.00")).await.unwrap_err();
        assert_matches!(err, ViewerError::Validation(_));
        assert_eq!(view.document().alerts().len(), 1);
    }
}
