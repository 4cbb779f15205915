use std::collections::BTreeSet;

use newsletter_forms::domain::ListId;
use reqwest::StatusCode;
use wiremock::{
    matchers::{any, method, path},
    Mock, ResponseTemplate,
};

use crate::helpers::App;

fn lists(ids: &[i64]) -> BTreeSet<ListId> {
    ids.iter().copied().map(ListId).collect()
}

#[tokio::test]
async fn get_renders_an_empty_form_without_message() {
    let app = App::new().await;

    let response = app.get("/subscriber").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.unwrap();
    assert!(body.contains(r#"<form action="/subscriber" method="post">"#));
    assert!(!body.contains("alert"));
}

#[tokio::test]
async fn get_ignores_query_parameters() {
    let app = App::new().await;

    let response = app.get("/subscriber?email=alice@example.com").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(!response.text().await.unwrap().contains("alert"));
    assert!(app.contacts().await.is_empty());
}

#[tokio::test]
async fn subscribing_a_new_email_creates_an_active_contact() {
    let app = App::new().await;
    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let response = app
        .post_subscriber(&[("name", "Alice"), ("email", "alice@example.com")])
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.unwrap();
    assert!(body.contains("Thanks! Your subscription was submitted successfully!"));

    let contacts = app.contacts().await;
    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0].email, "alice@example.com");
    assert_eq!(contacts[0].name.as_deref(), Some("Alice"));
    assert!(contacts[0].active);
    assert_eq!(contacts[0].lists, lists(&[1, 2]));
}

#[tokio::test]
async fn rendered_form_does_not_echo_submitted_values() {
    let app = App::new().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .mount(&app.email_server)
        .await;

    let response = app
        .post_subscriber(&[("name", "Alice Liddell"), ("email", "alice@example.com")])
        .await;

    let body = response.text().await.unwrap();
    assert!(!body.contains("alice@example.com"));
    assert!(!body.contains("Alice Liddell"));
}

#[tokio::test]
async fn subscribing_an_existing_contact_reports_already_subscribed() {
    let app = App::new().await;
    app.add_contact(None, &[1, 2], true).await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let response = app.post_subscriber(&[("email", "alice@example.com")]).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.unwrap();
    assert!(body.contains("Your email is already in our newsletter!"));
    let contacts = app.contacts().await;
    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0].lists, lists(&[1, 2]));
}

#[tokio::test]
async fn subscribing_a_contact_missing_lists_adds_them() {
    let app = App::new().await;
    app.add_contact(Some("Alice"), &[2, 3], true).await;

    let response = app
        .post_subscriber(&[("name", ""), ("email", "alice@example.com")])
        .await;

    let body = response.text().await.unwrap();
    assert!(body.contains("Updated your email in our newsletter!"));
    let contacts = app.contacts().await;
    assert_eq!(contacts[0].lists, lists(&[1, 2, 3]));
    assert_eq!(contacts[0].name.as_deref(), Some("Alice"));
}

#[tokio::test]
async fn subscribing_an_inactive_contact_reactivates_it() {
    let app = App::new().await;
    app.add_contact(None, &[1, 2], false).await;

    let response = app
        .post_subscriber(&[("name", "Alicia"), ("email", "alice@example.com")])
        .await;

    let body = response.text().await.unwrap();
    assert!(body.contains("Your email is already in our newsletter!"));
    let contacts = app.contacts().await;
    assert_eq!(contacts.len(), 1);
    assert!(contacts[0].active);
    assert_eq!(contacts[0].name.as_deref(), Some("Alicia"));
}

#[tokio::test]
async fn invalid_emails_are_rejected_with_a_warning() {
    let app = App::new().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let test_cases = [
        (vec![("name", "Alice"), ("email", "not-an-email")], "Invalid email address."),
        (vec![("name", "Alice"), ("email", "")], "This field is required."),
        (vec![("name", "Alice")], "This field is required."),
    ];

    for (parameter, field_error) in test_cases {
        let response = app.post_subscriber(&parameter).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.text().await.unwrap();
        assert!(body.contains(r#"<div class="alert alert-warning">Email is not valid!</div>"#));
        assert!(body.contains(field_error));
    }

    assert!(app.contacts().await.is_empty());
}

#[tokio::test]
async fn welcome_email_is_not_sent_when_disabled() {
    let app = App::with_welcome_email(false).await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let response = app.post_subscriber(&[("email", "alice@example.com")]).await;

    let body = response.text().await.unwrap();
    assert!(body.contains("Thanks! Your subscription was submitted successfully!"));
    assert_eq!(app.contacts().await.len(), 1);
}

#[tokio::test]
async fn mail_delivery_failure_keeps_the_subscription() {
    let app = App::new().await;
    Mock::given(path("/email"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let response = app.post_subscriber(&[("email", "alice@example.com")]).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.unwrap();
    assert!(body.contains("Thanks! Your subscription was submitted successfully!"));
    assert!(app.contacts().await[0].active);
}

#[tokio::test]
async fn get_with_a_repeated_query_key_renders_an_empty_form() {
    let app = App::new().await;

    let response = app
        .get("/subscriber?email=alice@example.com&email=bob@example.com")
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.unwrap();
    assert!(body.contains(r#"<form action="/subscriber" method="post">"#));
    assert!(!body.contains("alert"));
    assert!(app.contacts().await.is_empty());
}

#[tokio::test]
async fn post_without_a_body_is_validated_as_an_empty_form() {
    let app = App::new().await;

    let response = app
        .build_request(reqwest::Method::POST, "/subscriber")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.unwrap();
    assert!(body.contains("Email is not valid!"));
    assert!(body.contains("This field is required."));
    assert!(app.contacts().await.is_empty());
}
