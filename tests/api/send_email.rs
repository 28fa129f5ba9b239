use crate::helpers::{lead, spawn_app, spawn_app_with, ALLOWED_ORIGIN};
use wiremock::matchers::{any, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn a_verified_lead_is_relayed_to_the_operator_exactly_once() {
    // Arrange
    let app = spawn_app().await;
    app.verifier_answers("valid").await;
    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    // Act
    let response = app.post_send_email(&lead()).await;

    // Assert
    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Email successfully sent");

    let emails = app.dispatched_emails().await;
    assert_eq!(emails.len(), 1);
    assert_eq!(emails[0]["Subject"], "New client lead");
    assert_eq!(emails[0]["To"], "leads@kevintcfit.com");
    let text = emails[0]["TextBody"].as_str().unwrap();
    assert!(text.starts_with("Name: Ursula Le Guin\n"));
    assert!(text.contains("Email: test@validdomain.com"));
    assert!(text.ends_with("Message: Looking forward to it!"));
}

#[tokio::test]
async fn an_address_rejected_by_the_verifier_returns_404_and_sends_nothing() {
    // Arrange
    let app = spawn_app().await;
    app.verifier_answers("invalid").await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;
    let mut payload = lead();
    payload["user_email"] = "bad@nodomain".into();

    // Act
    let response = app.post_send_email(&payload).await;

    // Assert
    assert_eq!(response.status().as_u16(), 404);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "The provided email address is invalid.");
    assert_eq!(body["error"], "Invalid email detected");
    assert_eq!(body["suggestion"], "Please provide a valid email address.");
}

#[tokio::test]
async fn a_rate_limited_verifier_does_not_block_delivery() {
    // Arrange
    let app = spawn_app().await;
    Mock::given(path("/v2/email-verifier"))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&app.verifier_server)
        .await;
    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    // Act
    let response = app.post_send_email(&lead()).await;

    // Assert
    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn a_failing_verifier_aborts_the_submission_with_a_redacted_500() {
    // Arrange
    let app = spawn_app().await;
    Mock::given(path("/v2/email-verifier"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&app.verifier_server)
        .await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    // Act
    let response = app.post_send_email(&lead()).await;

    // Assert
    assert_eq!(response.status().as_u16(), 500);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Server error");
    assert!(!body.to_string().contains("api_key"));
}

#[tokio::test]
async fn a_failing_email_api_returns_500_after_a_single_attempt() {
    // Arrange
    let app = spawn_app().await;
    app.verifier_answers("valid").await;
    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&app.email_server)
        .await;

    // Act
    let response = app.post_send_email(&lead()).await;

    // Assert
    assert_eq!(response.status().as_u16(), 500);
}

#[tokio::test]
async fn requests_past_the_quota_are_rejected_with_410() {
    // Arrange
    let app = spawn_app_with(|c| c.rate_limit.max_requests = 2).await;
    app.verifier_answers("valid").await;
    Mock::given(path("/email"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&app.email_server)
        .await;

    // Act
    for _ in 0..2 {
        let response = app.post_send_email(&lead()).await;
        assert_eq!(response.status().as_u16(), 200);
    }
    let response = app.post_send_email(&lead()).await;

    // Assert
    assert_eq!(response.status().as_u16(), 410);
    assert!(response.headers().get("Retry-After").is_some());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body["message"],
        "The resource is currently unavailable due to too many requests."
    );
}

#[tokio::test]
async fn rejected_submissions_still_count_towards_the_quota() {
    // Arrange
    let app = spawn_app_with(|c| c.rate_limit.max_requests = 1).await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    // Act
    let response = app.post_send_email(&serde_json::json!({})).await;
    assert_eq!(response.status().as_u16(), 400);
    let response = app.post_send_email(&lead()).await;

    // Assert
    assert_eq!(response.status().as_u16(), 410);
}

#[tokio::test]
async fn malformed_submissions_return_400_without_calling_out() {
    // Arrange
    let app = spawn_app().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.verifier_server)
        .await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let mut missing_email = lead();
    missing_email.as_object_mut().unwrap().remove("user_email");
    let mut blank_email = lead();
    blank_email["user_email"] = "   ".into();
    let mut not_an_email = lead();
    not_an_email["user_email"] = "definitely-not-an-email".into();
    let mut oversized_message = lead();
    oversized_message["message"] = "a".repeat(5001).into();

    let test_cases = vec![
        (missing_email, "missing email"),
        (blank_email, "blank email"),
        (not_an_email, "malformed email"),
        (oversized_message, "oversized message"),
    ];

    for (invalid_body, description) in test_cases {
        // Act
        let response = app.post_send_email(&invalid_body).await;

        // Assert
        assert_eq!(
            response.status().as_u16(),
            400,
            "The API did not fail with 400 Bad Request when the payload had a {}.",
            description
        );
    }
}

#[tokio::test]
async fn unparseable_json_returns_400() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = app.post_send_email_raw("{\"user_email\": ").await;

    // Assert
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn preflight_from_the_allowed_origin_is_accepted() {
    // Arrange
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    // Act
    let response = client
        .request(
            reqwest::Method::OPTIONS,
            &format!("{}/send-email", &app.address),
        )
        .header("Origin", ALLOWED_ORIGIN)
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type")
        .send()
        .await
        .expect("Failed to execute request.");

    // Assert
    assert!(response.status().is_success());
    assert_eq!(
        response
            .headers()
            .get("Access-Control-Allow-Origin")
            .unwrap(),
        ALLOWED_ORIGIN
    );
}

#[tokio::test]
async fn preflight_from_another_origin_is_refused() {
    // Arrange
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    // Act
    let response = client
        .request(
            reqwest::Method::OPTIONS,
            &format!("{}/send-email", &app.address),
        )
        .header("Origin", "https://elsewhere.example.org")
        .header("Access-Control-Request-Method", "POST")
        .send()
        .await
        .expect("Failed to execute request.");

    // Assert
    assert!(response
        .headers()
        .get("Access-Control-Allow-Origin")
        .is_none());
}

#[tokio::test]
async fn a_concurrent_burst_never_exceeds_the_quota() {
    // Arrange
    let app = spawn_app_with(|c| c.rate_limit.max_requests = 3).await;
    app.verifier_answers("valid").await;
    Mock::given(path("/email"))
        .respond_with(ResponseTemplate::new(200))
        .expect(3)
        .mount(&app.email_server)
        .await;
    let payload = lead();

    // Act
    let responses =
        futures::future::join_all((0..10).map(|_| app.post_send_email(&payload))).await;

    // Assert
    let statuses: Vec<u16> = responses.iter().map(|r| r.status().as_u16()).collect();
    assert_eq!(statuses.iter().filter(|s| **s == 200).count(), 3);
    assert_eq!(statuses.iter().filter(|s| **s == 410).count(), 7);
}

#[tokio::test]
async fn unparseable_bodies_count_towards_the_quota() {
    // Arrange
    let app = spawn_app_with(|c| c.rate_limit.max_requests = 1).await;
    let client = reqwest::Client::new();

    // Act
    let first = app.post_send_email_raw("not json").await;
    let without_content_type = client
        .post(&format!("{}/send-email", &app.address))
        .body("not json either")
        .send()
        .await
        .expect("Failed to execute request.");

    // Assert
    assert_eq!(first.status().as_u16(), 400);
    assert_eq!(without_content_type.status().as_u16(), 410);
}

#[tokio::test]
async fn spoofed_leading_forwarded_hops_do_not_reset_the_quota() {
    // Arrange
    let app = spawn_app_with(|c| {
        c.application.trust_forwarded_for = true;
        c.rate_limit.max_requests = 1;
    })
    .await;
    let client = reqwest::Client::new();

    // Act
    let mut statuses = Vec::new();
    for spoofed in ["198.51.100.1", "198.51.100.2", "198.51.100.3"] {
        let response = client
            .post(&format!("{}/send-email", &app.address))
            .header("Content-Type", "application/json")
            .header("X-Forwarded-For", format!("{}, 203.0.113.9", spoofed))
            .body("{}")
            .send()
            .await
            .expect("Failed to execute request.");
        statuses.push(response.status().as_u16());
    }

    // Assert
    assert_eq!(statuses, vec![400, 410, 410]);
}
