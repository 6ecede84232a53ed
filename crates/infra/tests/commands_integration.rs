//! Integration tests for the command facade
//!
//! Each operation must hit exactly one method and path, with ids encoded as
//! path segments and filters as query parameters.

mod support;

use serde_json::json;
use support::{requests_to, test_client, tokens};
use vakansiya_domain::{
    ChangePasswordRequest, EmploymentType, GeoPoint, JobQuery, JobUpdate, NearbyQuery,
    NewSupportTicket, ProfileUpdate, PushPlatform, PushTokenRegistration, RegisterRequest,
    UserRole,
};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn ok(body: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}

#[tokio::test]
async fn auth_and_profile_operations() {
    let server = MockServer::start().await;
    let auth = json!({ "token": "T1", "refreshToken": "R1", "user": { "id": "u1" } });

    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .and(body_json(json!({
            "email": "e@corp.az",
            "password": "secret",
            "role": "employer",
            "companyName": "Corp"
        })))
        .respond_with(ok(auth))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/change-password"))
        .and(body_json(json!({ "currentPassword": "old", "newPassword": "new" })))
        .respond_with(ok(json!({ "message": "changed" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/users/me"))
        .and(body_json(json!({ "city": "Baku" })))
        .respond_with(ok(json!({ "id": "u1", "city": "Baku" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let harness = test_client(&server, tokens(Some("T1"), None));
    let commands = harness.commands();

    let registered = commands
        .register(&RegisterRequest {
            email: "e@corp.az".into(),
            password: "secret".into(),
            role: UserRole::Employer,
            full_name: None,
            phone: None,
            company_name: Some("Corp".into()),
        })
        .await
        .unwrap();
    assert_eq!(registered.user.map(|u| u.id).as_deref(), Some("u1"));

    let changed = commands
        .change_password(&ChangePasswordRequest {
            current_password: "old".into(),
            new_password: "new".into(),
        })
        .await
        .unwrap();
    assert_eq!(changed.message.as_deref(), Some("changed"));

    let profile = commands
        .update_profile(&ProfileUpdate { city: Some("Baku".into()), ..Default::default() })
        .await
        .unwrap();
    assert_eq!(profile.city.as_deref(), Some("Baku"));

    commands.logout().await.unwrap();
}

#[tokio::test]
async fn job_operations() {
    let server = MockServer::start().await;
    let job = json!({ "id": "j1", "title": "Cook" });

    Mock::given(method("GET"))
        .and(path("/jobs"))
        .and(query_param("search", "aşpaz"))
        .and(query_param("employmentType", "part_time"))
        .and(query_param("page", "2"))
        .respond_with(ok(json!({ "jobs": [job.clone()], "total": 41, "page": 2 })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/jobs/nearby"))
        .and(query_param("lat", "40.4093"))
        .and(query_param("lng", "49.8671"))
        .and(query_param("radius", "5"))
        .respond_with(ok(json!([job.clone()])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/jobs/j1"))
        .respond_with(ok(job.clone()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/jobs/j1"))
        .and(body_json(json!({ "isActive": false })))
        .respond_with(ok(job.clone()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/jobs/j1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let harness = test_client(&server, tokens(Some("T1"), None));
    let commands = harness.commands();

    let page = commands
        .list_jobs(&JobQuery {
            search: Some("aşpaz".into()),
            employment_type: Some(EmploymentType::PartTime),
            page: Some(2),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.total, Some(41));

    let nearby = commands
        .nearby_jobs(&NearbyQuery { center: GeoPoint::new(40.4093, 49.8671), radius_km: Some(5.0) })
        .await
        .unwrap();
    assert_eq!(nearby[0].id, "j1");

    assert_eq!(commands.get_job("j1").await.unwrap().title, "Cook");
    commands
        .update_job("j1", &JobUpdate { is_active: Some(false), ..Default::default() })
        .await
        .unwrap();
    commands.delete_job("j1").await.unwrap();
}

#[tokio::test]
async fn unfiltered_listing_has_no_query_string() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jobs"))
        .respond_with(ok(json!({ "items": [] })))
        .mount(&server)
        .await;

    let harness = test_client(&server, tokens(None, None));
    harness.commands().list_jobs(&JobQuery::default()).await.unwrap();

    let received = requests_to(&server, "/jobs").await;
    assert_eq!(received[0].url.query(), None);
}

#[tokio::test]
async fn job_id_is_encoded_as_one_segment() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ok(json!({ "id": "a/b", "title": "x" })))
        .mount(&server)
        .await;

    let harness = test_client(&server, tokens(None, None));
    harness.commands().get_job("a/b").await.unwrap();

    let received = requests_to(&server, "/jobs/a%2Fb").await;
    assert_eq!(received.len(), 1);
}

#[tokio::test]
async fn geocoding_operations() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/geocode"))
        .and(query_param("address", "Nizami küç. 5, Bakı"))
        .respond_with(ok(json!({ "address": "Nizami küç. 5", "city": "Bakı", "lat": 40.37, "lng": 49.84 })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/geocode/reverse"))
        .and(query_param("lat", "40.37"))
        .and(query_param("lng", "49.84"))
        .respond_with(ok(json!({ "city": "Bakı", "lat": 40.37, "lng": 49.84 })))
        .expect(1)
        .mount(&server)
        .await;

    let harness = test_client(&server, tokens(None, None));
    let commands = harness.commands();

    let found = commands.geocode("Nizami küç. 5, Bakı").await.unwrap();
    assert_eq!(found.point(), GeoPoint::new(40.37, 49.84));

    let reversed = commands.reverse_geocode(GeoPoint::new(40.37, 49.84)).await.unwrap();
    assert_eq!(reversed.city.as_deref(), Some("Bakı"));
}

#[tokio::test]
async fn notification_and_support_operations() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/notifications"))
        .respond_with(ok(json!([{ "id": "n1", "title": "New applicant", "read": false }])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/notifications/n1/read"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/notifications/push-token"))
        .and(body_json(json!({ "token": "fcm-123", "platform": "android" })))
        .respond_with(ok(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/support/tickets"))
        .and(body_json(json!({ "subject": "Bug", "message": "Map is blank" })))
        .respond_with(ok(json!({ "id": "s1", "subject": "Bug", "status": "open" })))
        .expect(1)
        .mount(&server)
        .await;

    let harness = test_client(&server, tokens(Some("T1"), None));
    let commands = harness.commands();

    let notifications = commands.list_notifications().await.unwrap();
    assert!(!notifications[0].read);
    commands.mark_notification_read("n1").await.unwrap();
    commands
        .register_push_token(&PushTokenRegistration {
            token: "fcm-123".into(),
            platform: PushPlatform::Android,
        })
        .await
        .unwrap();

    let ticket = commands
        .create_support_ticket(&NewSupportTicket {
            subject: "Bug".into(),
            message: "Map is blank".into(),
            category: None,
        })
        .await
        .unwrap();
    assert_eq!(ticket.status.as_deref(), Some("open"));
}
