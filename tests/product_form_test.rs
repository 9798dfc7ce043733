//! Add-product form submission end to end.

mod common;

use assert_matches::assert_matches;
use common::{product, TestViewer};
use inventory_viewer::document::ADD_PRODUCT_FORM;
use inventory_viewer::errors::SubmitAction;
use inventory_viewer::services::ProductFormValues;
use inventory_viewer::{Document, ViewerError};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

fn typed(quantity: &str) -> ProductFormValues {
    ProductFormValues {
        item_name: "Widget".into(),
        quantity: quantity.into(),
        unit_price: "4.50".into(),
        location: "Aisle 1".into(),
        manufacturer: "Acme".into(),
    }
}

#[tokio::test]
async fn submit_posts_record_refetches_once_and_clears_form() {
    let mut t = TestViewer::start().await;
    Mock::given(method("POST"))
        .and(path("/products"))
        .and(body_json(json!({
            "item_name": "Widget",
            "quantity": 5,
            "unit_price": 4.5,
            "location": "Aisle 1",
            "manufacturer": "Acme",
            "stock_status": "In Stock"
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&t.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([product("Widget", 5)])))
        .expect(1)
        .mount(&t.server)
        .await;

    typed("5").fill(t.view.document_mut().form_mut(ADD_PRODUCT_FORM).unwrap());
    t.view.submit_product_form().await.unwrap();

    assert!(t.view.document().form(ADD_PRODUCT_FORM).unwrap().is_blank());
    assert_eq!(t.view.document().table_body("product-table").unwrap().len(), 1);
    assert_eq!(t.alerts(), &["Product added successfully!".to_string()]);
    t.server.verify().await;
}

#[tokio::test]
async fn zero_quantity_is_out_of_stock() {
    let mut t = TestViewer::start().await;
    Mock::given(method("POST"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&t.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&t.server)
        .await;

    t.view.submit_product(typed("0")).await.unwrap();

    let sent = t.bodies_sent("POST", "/products").await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0]["stock_status"], json!("Out of Stock"));
}

#[tokio::test]
async fn rejected_post_alerts_and_does_not_refetch() {
    let mut t = TestViewer::start().await;
    Mock::given(method("POST"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&t.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&t.server)
        .await;

    let err = t.view.submit_product(typed("3")).await.unwrap_err();
    assert_matches!(
        err,
        ViewerError::Submit {
            action: SubmitAction::AddProduct,
            ..
        }
    );
    assert_eq!(t.alerts(), &["Failed to add product".to_string()]);
    t.server.verify().await;
}

#[tokio::test]
async fn refresh_failure_after_create_still_clears_form() {
    let mut t = TestViewer::start().await;
    Mock::given(method("POST"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&t.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&t.server)
        .await;

    typed("2").fill(t.view.document_mut().form_mut(ADD_PRODUCT_FORM).unwrap());
    let err = t.view.submit_product_form().await.unwrap_err();

    assert_matches!(
        err,
        ViewerError::Refresh {
            action: SubmitAction::AddProduct,
            ..
        }
    );
    assert!(t.view.document().form(ADD_PRODUCT_FORM).unwrap().is_blank());
    assert_eq!(
        t.alerts(),
        &[
            "Product added successfully!".to_string(),
            "Failed to load products".to_string()
        ]
    );
}
