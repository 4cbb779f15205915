use std::collections::BTreeSet;

use newsletter_forms::domain::ListId;
use reqwest::StatusCode;
use wiremock::{matchers::any, Mock, ResponseTemplate};

use crate::helpers::App;

#[tokio::test]
async fn get_renders_an_empty_form_without_message() {
    let app = App::new().await;

    let response = app.get("/unsubscriber").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.unwrap();
    assert!(body.contains(r#"<form action="/unsubscriber" method="post">"#));
    assert!(!body.contains("alert"));
}

#[tokio::test]
async fn unsubscribing_an_unknown_email_reports_not_found() {
    let app = App::new().await;

    let response = app
        .post_unsubscriber(&[("email", "nobody@example.com")])
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.unwrap();
    assert!(body.contains("Your email nobody@example.com not found in our newsletter!"));
    assert!(app.contacts().await.is_empty());
}

#[tokio::test]
async fn unsubscribing_deactivates_and_keeps_lists_and_name() {
    let app = App::new().await;
    app.add_contact(Some("Alice"), &[1, 2], true).await;

    let response = app.post_unsubscriber(&[("email", "alice@example.com")]).await;

    let body = response.text().await.unwrap();
    assert!(body.contains("Unsubscribed alice@example.com in our newsletter!"));
    let contacts = app.contacts().await;
    assert!(!contacts[0].active);
    assert_eq!(contacts[0].name.as_deref(), Some("Alice"));
    assert_eq!(
        contacts[0].lists,
        [ListId(1), ListId(2)].into_iter().collect::<BTreeSet<_>>()
    );
}

#[tokio::test]
async fn unsubscribing_twice_is_harmless() {
    let app = App::new().await;
    app.add_contact(None, &[1], true).await;

    for _ in 0..2 {
        let response = app.post_unsubscriber(&[("email", "alice@example.com")]).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.text().await.unwrap();
        assert!(body.contains("Unsubscribed alice@example.com in our newsletter!"));
    }

    assert!(!app.contacts().await[0].active);
}

#[tokio::test]
async fn invalid_email_is_rejected_with_a_warning() {
    let app = App::new().await;
    app.add_contact(None, &[1], true).await;

    let response = app.post_unsubscriber(&[("email", "alice@")]).await;

    let body = response.text().await.unwrap();
    assert!(body.contains(r#"<div class="alert alert-warning">Email is not valid!</div>"#));
    assert!(app.contacts().await[0].active);
}

#[tokio::test]
async fn subscribe_unsubscribe_and_come_back() {
    let app = App::new().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;
    let parameter = [("email", "alice@example.com")];

    let body = app.post_subscriber(&parameter).await.text().await.unwrap();
    assert!(body.contains("Thanks! Your subscription was submitted successfully!"));

    let body = app.post_subscriber(&parameter).await.text().await.unwrap();
    assert!(body.contains("Your email is already in our newsletter!"));

    let body = app.post_unsubscriber(&parameter).await.text().await.unwrap();
    assert!(body.contains("Unsubscribed alice@example.com in our newsletter!"));
    let contacts = app.contacts().await;
    assert!(!contacts[0].active);
    assert_eq!(
        contacts[0].lists,
        [ListId(1), ListId(2)].into_iter().collect::<BTreeSet<_>>()
    );

    let body = app.post_subscriber(&parameter).await.text().await.unwrap();
    assert!(body.contains("Your email is already in our newsletter!"));
    let contacts = app.contacts().await;
    assert_eq!(contacts.len(), 1);
    assert!(contacts[0].active);
}

#[tokio::test]
async fn get_with_a_repeated_query_key_renders_an_empty_form() {
    let app = App::new().await;
    app.add_contact(None, &[1], true).await;

    let response = app
        .get("/unsubscriber?email=alice@example.com&email=alice@example.com")
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(!response.text().await.unwrap().contains("alert"));
    assert!(app.contacts().await[0].active);
}

#[tokio::test]
async fn post_without_a_body_is_validated_as_an_empty_form() {
    let app = App::new().await;

    let response = app
        .build_request(reqwest::Method::POST, "/unsubscriber")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.unwrap();
    assert!(body.contains("Email is not valid!"));
    assert!(body.contains("This field is required."));
}
