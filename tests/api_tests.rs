//! End-to-end tests over the in-memory host

use axum::http::StatusCode;
use axum_test::TestServer;
use resort::prelude::*;
use serde_json::{Value, json};
use std::io::Write;

fn config() -> AppConfig {
    AppConfig {
        jwt_secret: Some("integration-secret".into()),
        bcrypt_cost: 4,
        ..AppConfig::default()
    }
}

fn server_with(config: AppConfig) -> TestServer {
    let host = ServerHost::in_memory(config);
    let app = ServerBuilder::new(host).build().unwrap();
    TestServer::new(app)
}

fn server() -> TestServer {
    server_with(config())
}

fn investment_body() -> Value {
    json!({
        "title": "Ocean Front Villa",
        "price": "₹1.95 Cr",
        "size": "3500 sq.ft",
        "bedrooms": "3 Bedrooms",
        "image": "/images/villa.jpg",
        "description": "Villa with private pool",
        "features": ["Private Pool", "Beach Access"]
    })
}

fn package_body() -> Value {
    json!({
        "title": "Backwater Escape",
        "image": "/images/holiday.jpg",
        "alt": "Houseboat at dusk",
        "quote": "Drift into calm",
        "price": "₹45,000",
        "description": "Three nights on the backwaters",
        "duration": "3-7 Days",
        "features": ["Houseboat stay", "Guided tours"],
        "category": "holiday"
    })
}

fn booking_body() -> Value {
    json!({
        "fullName": "Asha Menon",
        "phoneNumber": "+91 98765 43210",
        "email": "asha@example.com",
        "country": "India",
        "package": "Backwater Escape",
        "checkIn": "2025-12-20",
        "checkOut": "2025-12-24",
        "adults": 2,
        "children": 1,
        "accommodation": "Villa",
        "rooms": 1,
        "view": "Sea",
        "mealPreference": "Vegetarian"
    })
}

fn registration_body(kind: &str, key: &str, reference: &str, name: &str) -> Value {
    json!({
        "type": kind,
        key: reference,
        "name": name,
        "email": "lead@example.com",
        "phone": "+91 90000 00000",
        "country": "India",
        "state": "Kerala",
        "occupation": "Engineer",
        "requirements": "Sea view",
        "message": "Call after 6pm"
    })
}

fn property_intake(property_id: &str, name: &str) -> Value {
    json!({
        "propertyId": property_id,
        "name": name,
        "email": "lead@example.com",
        "country": "India",
        "state": "Kerala",
        "phone": "+91 90000 00000",
        "occupation": "Engineer",
        "requirements": "Sea view"
    })
}

async fn create_investment(server: &TestServer) -> String {
    let response = server.post("/api/investments").json(&investment_body()).await;
    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    body["data"]["id"].as_str().unwrap().to_string()
}

async fn create_package(server: &TestServer) -> Value {
    let response = server.post("/api/tourism").json(&package_body()).await;
    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    body["data"].clone()
}

async fn investment_refs(server: &TestServer, id: &str) -> Vec<Value> {
    let body: Value = server.get(&format!("/api/investments/{}", id)).await.json();
    body["data"]["registrations"].as_array().unwrap().clone()
}

// ============================================================================
// Root and fallback
// ============================================================================

#[tokio::test]
async fn test_greeting_and_health() {
    let server = server();

    let response = server.get("/").await;
    response.assert_status_ok();
    response.assert_text("Hello World!");

    let body: Value = server.get("/health").await.json();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_unknown_route_uses_error_envelope() {
    let server = server();

    let response = server.get("/api/nowhere").await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Route /api/nowhere not found");
}

// ============================================================================
// Investments
// ============================================================================

#[tokio::test]
async fn test_investment_missing_fields_named() {
    let server = server();

    let response = server
        .post("/api/investments")
        .json(&json!({"title": "Half a listing"}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Missing required fields");
    let missing: Vec<&str> = body["missingFields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    for field in ["price", "size", "bedrooms", "image", "description", "features"] {
        assert!(missing.contains(&field), "{} not reported", field);
    }
    assert!(!missing.contains(&"title"));

    let list: Value = server.get("/api/investments").await.json();
    assert_eq!(list["count"], 0);
}

#[tokio::test]
async fn test_invalid_status_leaves_investment_unchanged() {
    let server = server();
    let id = create_investment(&server).await;

    let response = server
        .patch(&format!("/api/investments/{}/status", id))
        .json(&json!({"status": "demolished"}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["message"].as_str().unwrap().contains("available"));

    let body: Value = server.get(&format!("/api/investments/{}", id)).await.json();
    assert_eq!(body["data"]["status"], "available");

    let response = server
        .patch(&format!("/api/investments/{}/status", id))
        .json(&json!({"status": "sold"}))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["status"], "sold");
}

#[tokio::test]
async fn test_unknown_investment_is_not_found() {
    let server = server();

    let response = server
        .get("/api/investments/00000000-0000-0000-0000-000000000000")
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    let response = server.get("/api/investments/not-an-id").await;
    response.assert_status(StatusCode::NOT_FOUND);
}

// ============================================================================
// Tourism packages
// ============================================================================

#[tokio::test]
async fn test_package_status_defaults_to_active() {
    let server = server();

    let package = create_package(&server).await;
    assert_eq!(package["status"], "active");

    let body: Value = server.get("/api/tourism/category/holiday").await.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let body: Value = server.get("/api/tourism/category/wedding").await.json();
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_package_rejects_unknown_category() {
    let server = server();

    let mut body = package_body();
    body["category"] = json!("cruise");
    let response = server.post("/api/tourism").json(&body).await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let list: Value = server.get("/api/tourism").await.json();
    assert!(list["data"].as_array().unwrap().is_empty());
}

// ============================================================================
// Bookings
// ============================================================================

#[tokio::test]
async fn test_booking_needs_an_adult() {
    let server = server();

    let mut body = booking_body();
    body["adults"] = json!(0);
    let response = server.post("/api/bookings").json(&body).await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_booking_defaults_infants_and_status() {
    let server = server();

    let response = server.post("/api/bookings").json(&booking_body()).await;
    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["message"], "Booking created successfully");
    assert_eq!(body["data"]["infants"], 0);
    assert_eq!(body["data"]["status"], "pending");

    let id = body["data"]["id"].as_str().unwrap();
    let response = server
        .patch(&format!("/api/bookings/{}/status", id))
        .json(&json!({"status": "confirmed"}))
        .await;
    response.assert_status_ok();

    let response = server.delete(&format!("/api/bookings/{}", id)).await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"], "Booking deleted successfully");
}

// ============================================================================
// Registrations
// ============================================================================

#[tokio::test]
async fn test_registration_requires_matching_reference() {
    let server = server();
    let package = create_package(&server).await;

    // tourism registration carrying a property id instead of a package id
    let body = registration_body(
        "tourism",
        "propertyId",
        package["id"].as_str().unwrap(),
        "Ravi",
    );
    let response = server.post("/api/registrations").json(&body).await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let list: Value = server.get("/api/registrations").await.json();
    assert!(list["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_registration_for_missing_property_creates_nothing() {
    let server = server();

    let body = registration_body(
        "investment",
        "propertyId",
        "00000000-0000-0000-0000-000000000000",
        "Ravi",
    );
    let response = server.post("/api/registrations").json(&body).await;
    response.assert_status(StatusCode::NOT_FOUND);
    let error: Value = response.json();
    assert_eq!(error["message"], "Property not found");

    let list: Value = server.get("/api/registrations").await.json();
    assert!(list["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_registrations_linked_and_pruned() {
    let server = server();
    let property = create_investment(&server).await;

    let mut ids = Vec::new();
    for name in ["First", "Second"] {
        let body = registration_body("investment", "propertyId", &property, name);
        let response = server.post("/api/registrations").json(&body).await;
        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["message"], "Registration created successfully");
        ids.push(body["data"]["id"].as_str().unwrap().to_string());
    }

    let refs = investment_refs(&server, &property).await;
    assert_eq!(refs.len(), 2);
    for id in &ids {
        assert!(refs.contains(&json!(id)));
    }

    let response = server.delete(&format!("/api/registrations/{}", ids[0])).await;
    response.assert_status_ok();

    let refs = investment_refs(&server, &property).await;
    assert_eq!(refs, vec![json!(ids[1])]);
}

#[tokio::test]
async fn test_registration_delete_survives_missing_property() {
    let server = server();
    let property = create_investment(&server).await;

    let body = registration_body("investment", "propertyId", &property, "Ravi");
    let created: Value = server.post("/api/registrations").json(&body).await.json();
    let id = created["data"]["id"].as_str().unwrap().to_string();

    server
        .delete(&format!("/api/investments/{}", property))
        .await
        .assert_status_ok();

    let response = server.delete(&format!("/api/registrations/{}", id)).await;
    response.assert_status_ok();

    let response = server.get(&format!("/api/registrations/{}", id)).await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_registration_populates_reference() {
    let server = server();
    let package = create_package(&server).await;
    let package_id = package["id"].as_str().unwrap();

    let body = registration_body("tourism", "packageId", package_id, "Ravi");
    let created: Value = server.post("/api/registrations").json(&body).await.json();
    let id = created["data"]["id"].as_str().unwrap();

    let body: Value = server.get(&format!("/api/registrations/{}", id)).await.json();
    assert_eq!(body["data"]["package"]["title"], "Backwater Escape");
    assert_eq!(body["data"]["status"], "pending");

    let response = server
        .patch(&format!("/api/registrations/{}/status", id))
        .json(&json!({"status": "bogus"}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = server
        .patch(&format!("/api/registrations/{}/status", id))
        .json(&json!({"status": "contacted"}))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["status"], "contacted");
}

// ============================================================================
// Property registrations
// ============================================================================

#[tokio::test]
async fn test_property_intake_requires_every_field() {
    let server = server();
    let property = create_investment(&server).await;

    let mut body = property_intake(&property, "Ravi");
    body["occupation"] = json!("  ");
    let response = server.post("/api/property-registrations").json(&body).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let error: Value = response.json();
    assert_eq!(error["message"], "All fields are required");
}

#[tokio::test]
async fn test_property_intake_for_unknown_property() {
    let server = server();

    let body = property_intake("00000000-0000-0000-0000-000000000000", "Ravi");
    let response = server.post("/api/property-registrations").json(&body).await;
    response.assert_status(StatusCode::NOT_FOUND);
    let error: Value = response.json();
    assert_eq!(error["message"], "Property not found");
}

#[tokio::test]
async fn test_property_intake_defaults_message_and_links() {
    let server = server();
    let property = create_investment(&server).await;

    let response = server
        .post("/api/property-registrations")
        .json(&property_intake(&property, "Ravi"))
        .await;
    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["data"]["type"], "investment");
    assert_eq!(body["data"]["message"], "Sea view");
    let id = body["data"]["id"].as_str().unwrap().to_string();

    assert_eq!(investment_refs(&server, &property).await, vec![json!(id)]);

    let response = server
        .put(&format!("/api/property-registrations/{}", id))
        .json(&json!({"occupation": "Architect", "propertyId": null, "type": "tourism"}))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["occupation"], "Architect");
    assert_eq!(body["data"]["type"], "investment");

    let body: Value = server
        .get(&format!("/api/property-registrations/property/{}", property))
        .await
        .json();
    assert_eq!(body["pagination"]["total"], 1);
}

#[tokio::test]
async fn test_property_registrations_paginate_newest_first() {
    let server = server();
    let property = create_investment(&server).await;

    for i in 0..25 {
        server
            .post("/api/property-registrations")
            .json(&property_intake(&property, &format!("Lead {}", i)))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let body: Value = server
        .get("/api/property-registrations")
        .add_query_param("page", 2)
        .add_query_param("limit", 10)
        .await
        .json();

    assert_eq!(body["pagination"]["total"], 25);
    assert_eq!(body["pagination"]["page"], 2);
    assert_eq!(body["pagination"]["limit"], 10);
    assert_eq!(body["pagination"]["pages"], 3);

    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    let expected: Vec<String> = (5..=14).rev().map(|i| format!("Lead {}", i)).collect();
    assert_eq!(names, expected);
}

#[tokio::test]
async fn test_page_past_the_end_is_empty() {
    let server = server();
    let property = create_investment(&server).await;
    server
        .post("/api/property-registrations")
        .json(&property_intake(&property, "Ravi"))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server
        .get("/api/property-registrations")
        .add_query_param("page", usize::MAX)
        .add_query_param("limit", 2)
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert!(body["data"].as_array().unwrap().is_empty());
    assert_eq!(body["pagination"]["total"], 1);

    let response = server
        .get(&format!("/api/property-registrations/property/{}", property))
        .add_query_param("page", 2)
        .add_query_param("limit", usize::MAX)
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["pagination"]["limit"], 100);
}

#[tokio::test]
async fn test_malformed_query_uses_error_envelope() {
    let server = server();

    let response = server.get("/api/property-registrations?page=abc").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "INVALID_QUERY");
    assert_eq!(body["message"], "Invalid query parameters");

    let response = server.get("/api/bookings?status=a&status=b").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_QUERY");
}

// ============================================================================
// Form responses
// ============================================================================

#[tokio::test]
async fn test_form_response_copies_package_title() {
    let server = server();
    let package = create_package(&server).await;

    let response = server
        .post("/api/form-responses")
        .json(&json!({
            "type": "tourism",
            "packageId": package["id"],
            "travelDate": "2025-12-20",
            "name": "Asha",
            "email": "asha@example.com",
            "phone": "+91 98765 43210",
            "message": "Two adults"
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["message"], "Form response created successfully");
    assert_eq!(body["data"]["packageTitle"], "Backwater Escape");
    assert_eq!(body["data"]["status"], "new");
}

#[tokio::test]
async fn test_form_response_unknown_property() {
    let server = server();

    let response = server
        .post("/api/form-responses")
        .json(&json!({
            "type": "investment",
            "propertyId": "00000000-0000-0000-0000-000000000000",
            "investmentAmount": 1500000,
            "name": "Asha",
            "email": "asha@example.com",
            "phone": "+91 98765 43210",
            "message": "Interested"
        }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    let list: Value = server.get("/api/form-responses").await.json();
    assert!(list["data"].as_array().unwrap().is_empty());
}

// ============================================================================
// Dashboard
// ============================================================================

#[tokio::test]
async fn test_dashboard_counts_and_zero_revenue() {
    let server = server();
    create_package(&server).await;
    create_investment(&server).await;
    server
        .post("/api/bookings")
        .json(&booking_body())
        .await
        .assert_status(StatusCode::CREATED);

    let response = server.get("/api/dashboard/stats").await;
    response.assert_status_ok();
    let body: Value = response.json();
    let stats = &body["data"];

    assert_eq!(stats["totalTourismPackages"], 1);
    assert_eq!(stats["totalInvestments"], 1);
    assert_eq!(stats["totalBookings"], 1);
    assert_eq!(stats["totalFormResponses"], 0);
    assert_eq!(stats["pendingApprovals"], 0);
    assert_eq!(stats["monthlyRevenue"], 0.0);
    assert_eq!(stats["recentBookings"][0]["fullName"], "Asha Menon");
}

// ============================================================================
// Users
// ============================================================================

#[tokio::test]
async fn test_signup_then_signin() {
    let server = server();

    let response = server
        .post("/api/users/signup")
        .json(&json!({"name": "Admin", "email": "Admin@Resort.com", "password": "hunter22"}))
        .await;
    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert!(body["data"]["token"].as_str().is_some());
    assert_eq!(body["data"]["user"]["email"], "admin@resort.com");
    assert!(body["data"]["user"].get("password").is_none());

    let response = server
        .post("/api/users/signup")
        .json(&json!({"name": "Again", "email": "admin@resort.com", "password": "other"}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = server
        .post("/api/users/signin")
        .json(&json!({"email": "admin@resort.com", "password": "wrong"}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = server
        .post("/api/users/signin")
        .json(&json!({"email": "admin@resort.com", "password": "hunter22"}))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert!(body["data"]["token"].as_str().is_some());
}

#[tokio::test]
async fn test_signup_without_signing_secret_fails() {
    let server = server_with(AppConfig {
        bcrypt_cost: 4,
        ..AppConfig::default()
    });

    let response = server
        .post("/api/users/signup")
        .json(&json!({"name": "Admin", "email": "admin@resort.com", "password": "hunter22"}))
        .await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}

// ============================================================================
// Config
// ============================================================================

#[test]
fn test_config_from_yaml_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "port: 7070\nfrontend_url: https://resort.example\nseed: true").unwrap();

    let config = AppConfig::from_yaml_file(file.path()).unwrap();
    assert_eq!(config.port, 7070);
    assert_eq!(config.frontend_url, "https://resort.example");
    assert!(config.seed);
    assert_eq!(config.storage, StorageBackend::Memory);
}
