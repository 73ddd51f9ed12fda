//! Server API tests

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{NaiveDate, Utc};
use fils_core::{
    cycle_for, Category, ExtractedTransaction, MockBackend, NewTransaction,
};
use http_body_util::BodyExt;
use tower::ServiceExt;

fn setup_test_app() -> (Router, Database) {
    let db = Database::in_memory().unwrap();
    let app = create_router(db.clone(), None, None);
    (app, db)
}

fn app_with_extractor(backend: MockBackend) -> Router {
    let db = Database::in_memory().unwrap();
    create_router(db, None, Some(ExtractorClient::Mock(backend)))
}

async fn get_body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body();
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn get_body_text(response: axum::response::Response) -> String {
    let body = response.into_body();
    let bytes = body.collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

const BOUNDARY: &str = "fils-test-boundary";

fn multipart_request(field_name: &str, csv: &str) -> Request<Body> {
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"{f}\"; filename=\"transactions.csv\"\r\n\
         Content-Type: text/csv\r\n\r\n{csv}\r\n--{b}--\r\n",
        b = BOUNDARY,
        f = field_name,
        csv = csv
    );
    Request::builder()
        .method("POST")
        .uri("/import")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn save(db: &Database, description: &str, amount: f64, date: NaiveDate, category: Category) {
    db.insert_transaction(&NewTransaction {
        description: description.to_string(),
        amount,
        date,
        category,
        confidence: 90,
        billing_cycle: cycle_for(date),
        created_at: Utc::now(),
    })
    .unwrap();
}

// ========== Health ==========

#[tokio::test]
async fn test_health() {
    let (app, _db) = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert!(json["time"].is_string());
}

// ========== POST /transaction ==========

#[tokio::test]
async fn test_log_transaction_requires_text() {
    let app = app_with_extractor(MockBackend::new());

    let response = app
        .oneshot(json_request(
            "POST",
            "/transaction",
            serde_json::json!({ "text": "" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_log_transaction_saves_extracted_batch() {
    let app = app_with_extractor(MockBackend::with_transactions(vec![
        ExtractedTransaction {
            date: "2026-02-24".to_string(),
            description: "Starbucks Dubai Mall".to_string(),
            amount: 25.50,
            category: Category::FoodDining,
            confidence: 95,
        },
        ExtractedTransaction {
            date: "2026-02-24".to_string(),
            description: "Careem Ride".to_string(),
            amount: 35.00,
            category: Category::Transport,
            confidence: 98,
        },
    ]));

    let response = app
        .oneshot(json_request(
            "POST",
            "/transaction",
            serde_json::json!({ "text": "two bank SMS messages" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["count"], 2);
    assert_eq!(json["total"], 60.5);

    let message = json["message"].as_str().unwrap();
    assert!(message.contains("✅ Added 2 transactions!"));
    assert!(message.contains("Starbucks Dubai Mall"));
    assert!(message.contains("📅 Cycle: Feb 2026"));
    assert!(message.contains("💵 Total: 60.50 AED"));

    let transactions = json["transactions"].as_array().unwrap();
    assert_eq!(transactions.len(), 2);
    assert_eq!(transactions[0]["billingCycle"], "Feb 2026");
}

#[tokio::test]
async fn test_log_transaction_skips_duplicates_in_batch() {
    let tx = ExtractedTransaction {
        date: "2026-02-24".to_string(),
        description: "Starbucks Dubai Mall".to_string(),
        amount: 25.50,
        category: Category::FoodDining,
        confidence: 95,
    };
    let app = app_with_extractor(MockBackend::with_transactions(vec![tx.clone(), tx]));

    let response = app
        .oneshot(json_request(
            "POST",
            "/transaction",
            serde_json::json!({ "text": "the same SMS pasted twice" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["count"], 1);
    assert_eq!(json["total"], 25.5);
    assert!(json["message"]
        .as_str()
        .unwrap()
        .contains("✅ Added 1 transaction!"));
}

#[tokio::test]
async fn test_log_transaction_with_no_matches_is_not_an_error() {
    let app = app_with_extractor(MockBackend::with_transactions(vec![]));

    let response = app
        .oneshot(json_request(
            "POST",
            "/transaction",
            serde_json::json!({ "text": "hello, nothing financial here" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["count"], 0);
    assert_eq!(json["message"], "No transactions found in the provided text");
}

#[tokio::test]
async fn test_log_transaction_extraction_failure_is_500() {
    let app = app_with_extractor(MockBackend::failing());

    let response = app
        .oneshot(json_request(
            "POST",
            "/transaction",
            serde_json::json!({ "text": "some text" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = get_body_json(response).await;
    assert_eq!(json["error"], "Failed to parse transactions");
}

#[tokio::test]
async fn test_log_transaction_without_backend_is_500() {
    let (app, _db) = setup_test_app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/transaction",
            serde_json::json!({ "text": "some text" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

// ========== PUT/DELETE /transaction/:id ==========

#[tokio::test]
async fn test_update_transaction_recomputes_cycle() {
    let (app, db) = setup_test_app();
    save(&db, "Carrefour", 145.50, d(2026, 2, 24), Category::FoodDining);
    let id = db.transactions_for_cycle("Feb 2026").unwrap()[0].id;

    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/transaction/{}", id),
            serde_json::json!({
                "description": "Carrefour Deira",
                "amount": 151.25,
                "date": "2026-02-20",
                "category": "Food & Dining",
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Transaction updated successfully");

    // Feb 20 is before the cycle boundary, so the row moved to Jan 2026
    let moved = db.get_transaction(id).unwrap().unwrap();
    assert_eq!(moved.description, "Carrefour Deira");
    assert_eq!(moved.billing_cycle, "Jan 2026");
}

#[tokio::test]
async fn test_update_missing_transaction_is_404() {
    let (app, _db) = setup_test_app();

    let response = app
        .oneshot(json_request(
            "PUT",
            "/transaction/999",
            serde_json::json!({
                "description": "Ghost",
                "amount": 1.0,
                "date": "2026-02-20",
                "category": "Unknown",
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_transaction() {
    let (app, db) = setup_test_app();
    save(&db, "Netflix", 54.99, d(2026, 1, 30), Category::Entertainment);
    let id = db.transactions_for_cycle("Jan 2026").unwrap()[0].id;

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/transaction/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["message"], "Transaction deleted successfully");
    assert!(db.get_transaction(id).unwrap().is_none());
}

#[tokio::test]
async fn test_delete_missing_transaction_is_404() {
    let (app, _db) = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/transaction/999")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ========== GET /stats ==========

#[tokio::test]
async fn test_stats_empty_database() {
    let (app, _db) = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/stats")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["count"], 0);
    assert_eq!(json["total"], 0.0);
    assert!(json["message"]
        .as_str()
        .unwrap()
        .contains("No transactions found for this cycle yet."));
}

#[tokio::test]
async fn test_stats_cover_the_current_cycle() {
    let (app, db) = setup_test_app();
    let today = Utc::now().date_naive();
    save(&db, "Carrefour", 145.50, today, Category::FoodDining);
    save(&db, "Salary", -15000.0, today, Category::IncomeTransfer);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/stats")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["cycle"], cycle_for(today));
    // Income never counts toward the cycle total
    assert_eq!(json["count"], 1);
    assert_eq!(json["total"], 145.5);
    assert_eq!(json["allTransactions"].as_array().unwrap().len(), 2);
}

// ========== GET /export ==========

#[tokio::test]
async fn test_export_headers_and_totals() {
    let (app, db) = setup_test_app();
    save(&db, "Carrefour Grocery", 145.50, d(2026, 2, 24), Category::FoodDining);
    save(&db, "Uber Ride", 35.00, d(2026, 2, 23), Category::Transport);
    save(&db, "Netflix", 54.99, d(2026, 1, 30), Category::Entertainment);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/export")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "text/csv; charset=utf-8"
    );
    assert_eq!(
        response.headers().get("content-disposition").unwrap(),
        "attachment; filename=\"transactions.csv\""
    );

    let body = get_body_text(response).await;
    assert!(body.starts_with("Date,Description,Amount (AED),Category"));
    assert!(body.contains("--- Feb 2026 ---"));
    assert!(body.contains(",Subtotal,180.50,"));
    assert!(body.contains(",Subtotal,54.99,"));
    assert!(body.contains(",Grand Total,235.49,"));
}

#[tokio::test]
async fn test_export_empty_database() {
    let (app, _db) = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/export")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = get_body_text(response).await;
    let lines: Vec<&str> = body.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "Date,Description,Amount (AED),Category");
    assert_eq!(lines[1], ",Grand Total,0.00,");
}

#[tokio::test]
async fn test_export_rejects_post() {
    let (app, _db) = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/export")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

// ========== POST /import ==========

#[tokio::test]
async fn test_import_clean_csv() {
    let (app, db) = setup_test_app();
    let csv = "Date,Description,Amount (AED),Category\n\
               2026-02-10,Grocery Store,150.00,Food & Dining\n\
               2026-02-11,Uber Ride,35.50,Transport\n\
               2026-02-12,Netflix,54.99,Entertainment\n";

    let response = app.oneshot(multipart_request("file", csv)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["imported"], 3);
    assert_eq!(json["duplicates"], 0);
    assert_eq!(json["errors"].as_array().unwrap().len(), 0);
    assert_eq!(db.count_transactions().unwrap(), 3);
}

#[tokio::test]
async fn test_import_reports_duplicates() {
    let (app, db) = setup_test_app();
    save(&db, "Grocery Store", 150.00, d(2026, 2, 10), Category::FoodDining);

    let csv = "Date,Description,Amount (AED),Category\n\
               2026-02-10,Grocery Store,150.00,Food & Dining\n\
               2026-02-11,Uber Ride,35.50,Transport\n";

    let response = app.oneshot(multipart_request("file", csv)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["imported"], 1);
    assert_eq!(json["duplicates"], 1);
}

#[tokio::test]
async fn test_import_reports_row_errors() {
    let (app, _db) = setup_test_app();
    let csv = "Date,Description,Amount (AED),Category\n\
               2026-02-10,Grocery Store,abc,Food & Dining\n\
               2026-02-11,Uber Ride,35.50,Transport\n";

    let response = app.oneshot(multipart_request("file", csv)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["imported"], 1);
    let errors = json["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0], "row 2: invalid amount 'abc'");
}

#[tokio::test]
async fn test_import_without_file_is_400() {
    let (app, _db) = setup_test_app();

    let response = app
        .oneshot(multipart_request("attachment", "not the right field"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = get_body_json(response).await;
    assert_eq!(json["error"], "No file uploaded");
}

#[tokio::test]
async fn test_import_rejects_get() {
    let (app, _db) = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/import")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
