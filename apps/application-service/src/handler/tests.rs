use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;
use staffdesk_domain::application::ApplicationType;
use staffdesk_infra::{
    mock::{FailingNotificationSender, MockApplicationRepository, RecordingNotificationSender},
    notification::{NotificationSender, SmtpConfig, TemplateRenderer},
};

use super::*;

fn state(
    repository: &MockApplicationRepository,
    sender: Option<Arc<dyn NotificationSender>>,
) -> ApplicationState {
    ApplicationState {
        applications: Arc::new(repository.clone()),
        mailer:       ConfirmationMailer::new(TemplateRenderer::new().unwrap(), sender),
    }
}

fn post(payload: &Value) -> GatewayEvent {
    GatewayEvent::new("POST").with_body(payload.to_string())
}

fn applicant() -> Value {
    json!({
        "application_type": "applicant",
        "name": "Иван",
        "surname": "Петров",
        "email": "ivan@example.com",
        "phone": "+7 900 000-00-00",
        "position": "Backend developer",
        "experience": 3,
        "cover_letter": "Хочу работать у вас",
    })
}

fn student() -> Value {
    json!({
        "application_type": "student",
        "name": "Анна",
        "surname": "Орлова",
        "email": "anna@example.com",
        "phone": "+7 900 111-11-11",
        "university": "МГУ",
        "course": 3,
        "specialty": "Прикладная математика",
        "direction": "Data",
        "motivation_letter": "Интересуюсь аналитикой",
        "portfolio_url": "https://github.com/anna",
    })
}

fn body(response: &GatewayResponse) -> Value {
    serde_json::from_str(&response.body).unwrap()
}

#[tokio::test]
async fn test_応募を保存して確認メールを送る() {
    let repository = MockApplicationRepository::new();
    let recorder = RecordingNotificationSender::new();
    let state = state(&repository, Some(Arc::new(recorder.clone())));

    let response = handle(post(&applicant()), &state).await;

    assert_eq!(response.status_code, 200);
    assert_eq!(
        body(&response),
        json!({
            "success": true,
            "application_id": 1,
            "email_sent": true,
            "message": "Application saved successfully. Email sent",
        })
    );
    assert_eq!(response.is_base64_encoded, Some(false));

    let saved = repository.saved();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].1.application_type(), ApplicationType::Applicant);

    let sent = recorder.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "ivan@example.com");
    assert!(sent[0].text_body.contains("Иван Петров"));
}

#[tokio::test]
async fn test_学生の応募を保存する() {
    let repository = MockApplicationRepository::new();
    let recorder = RecordingNotificationSender::new();
    let state = state(&repository, Some(Arc::new(recorder.clone())));

    let response = handle(post(&student()), &state).await;

    assert_eq!(response.status_code, 200);
    let saved = repository.saved();
    let Application::Student(form) = &saved[0].1 else {
        panic!("学生の応募として保存されていない");
    };
    assert_eq!(form.course, 3);
    assert_eq!(form.portfolio_url.as_deref(), Some("https://github.com/anna"));
    assert_eq!(recorder.sent()[0].to, "anna@example.com");
}

#[tokio::test]
async fn test_smtp未設定でも保存は成功する() {
    let repository = MockApplicationRepository::new();
    let state = state(&repository, None);

    let response = handle(post(&student()), &state).await;

    assert_eq!(response.status_code, 200);
    let value = body(&response);
    assert_eq!(value["success"], json!(true));
    assert_eq!(value["email_sent"], json!(false));
    assert_eq!(
        value["message"],
        json!("Application saved successfully. Email not sent (SMTP not configured)")
    );
    assert_eq!(repository.saved().len(), 1);
}

#[tokio::test]
async fn test_送信失敗でも保存は取り消さない() {
    let repository = MockApplicationRepository::new();
    let state = state(&repository, Some(Arc::new(FailingNotificationSender)));

    let response = handle(post(&applicant()), &state).await;

    assert_eq!(response.status_code, 200);
    let value = body(&response);
    assert_eq!(value["email_sent"], json!(false));
    assert_eq!(
        value["message"],
        json!("Application saved successfully. Email not sent (delivery failed)")
    );
    assert_eq!(repository.saved().len(), 1);
}

#[tokio::test]
async fn test_smtpユーザーがアドレスでなくても保存は成功する() {
    let repository = MockApplicationRepository::new();
    let smtp = SmtpConfig {
        host:     "smtp.example.com".to_string(),
        port:     587,
        user:     "apikey".to_string(),
        password: "secret".to_string(),
    };
    let state = ApplicationState {
        applications: Arc::new(repository.clone()),
        mailer:       ConfirmationMailer::from_config(Some(&smtp)).unwrap(),
    };

    let response = handle(post(&applicant()), &state).await;

    assert_eq!(response.status_code, 200);
    let value = body(&response);
    assert_eq!(value["email_sent"], json!(false));
    assert_eq!(
        value["message"],
        json!("Application saved successfully. Email not sent (delivery failed)")
    );
    assert_eq!(repository.saved().len(), 1);
}

#[rstest]
#[case(json!("intern"))]
#[case(json!(1))]
#[case(Value::Null)]
#[tokio::test]
async fn test_応募種別が不正なら400(#[case] application_type: Value) {
    let repository = MockApplicationRepository::new();
    let mut payload = applicant();
    payload["application_type"] = application_type;

    let response = handle(post(&payload), &state(&repository, None)).await;

    assert_eq!(response.status_code, 400);
    assert_eq!(body(&response), json!({ "error": "Invalid application_type" }));
    assert!(repository.saved().is_empty());
}

#[tokio::test]
async fn test_応募種別の欠落は400() {
    let repository = MockApplicationRepository::new();
    let mut payload = applicant();
    payload.as_object_mut().unwrap().remove("application_type");

    let response = handle(post(&payload), &state(&repository, None)).await;

    assert_eq!(response.status_code, 400);
}

#[rstest]
#[case::応募者の志望動機欠落(applicant(), "cover_letter")]
#[case::学生の大学欠落(student(), "university")]
#[case::学生のメール欠落(student(), "email")]
#[tokio::test]
async fn test_必須フィールドの欠落は保存しない(#[case] mut payload: Value, #[case] field: &str) {
    let repository = MockApplicationRepository::new();
    let recorder = RecordingNotificationSender::new();
    payload.as_object_mut().unwrap().remove(field);

    let response = handle(
        post(&payload),
        &state(&repository, Some(Arc::new(recorder.clone()))),
    )
    .await;

    assert_eq!(response.status_code, 422);
    assert!(body(&response)["error"].as_str().unwrap().contains(field));
    assert!(repository.saved().is_empty());
    assert!(recorder.sent().is_empty());
}

#[rstest]
#[case::学生の学年が範囲外(student(), "course", json!(7))]
#[case::応募者の経験が負(applicant(), "experience", json!(-1))]
#[case::メール形式違反(applicant(), "email", json!("ivan-at-example"))]
#[tokio::test]
async fn test_値の制約違反は422(
    #[case] mut payload: Value,
    #[case] field: &str,
    #[case] value: Value,
) {
    let repository = MockApplicationRepository::new();
    payload[field] = value;

    let response = handle(post(&payload), &state(&repository, None)).await;

    assert_eq!(response.status_code, 422);
    assert!(body(&response)["error"].as_str().unwrap().starts_with(field));
    assert!(repository.saved().is_empty());
}

#[tokio::test]
async fn test_jsonでないボディは500() {
    let repository = MockApplicationRepository::new();
    let event = GatewayEvent::new("POST").with_body("application_type=student");

    let response = handle(event, &state(&repository, None)).await;

    assert_eq!(response.status_code, 500);
    assert_eq!(body(&response), json!({ "error": "Internal server error" }));
}

#[tokio::test]
async fn test_保存失敗は500でメールを送らない() {
    let repository = MockApplicationRepository::failing();
    let recorder = RecordingNotificationSender::new();

    let response = handle(
        post(&applicant()),
        &state(&repository, Some(Arc::new(recorder.clone()))),
    )
    .await;

    assert_eq!(response.status_code, 500);
    assert_eq!(body(&response), json!({ "error": "Internal server error" }));
    assert!(recorder.sent().is_empty());
}

#[tokio::test]
async fn test_optionsはプリフライトを返す() {
    let repository = MockApplicationRepository::new();

    let response = handle(GatewayEvent::new("OPTIONS"), &state(&repository, None)).await;

    assert_eq!(response.status_code, 200);
    assert_eq!(response.body, "");
    assert_eq!(
        response.header("Access-Control-Allow-Methods"),
        Some("POST, OPTIONS")
    );
    assert_eq!(response.is_base64_encoded, None);
}

#[rstest]
#[case("GET")]
#[case("PUT")]
#[case("DELETE")]
#[tokio::test]
async fn test_post以外は405(#[case] method: &str) {
    let repository = MockApplicationRepository::new();

    let response = handle(GatewayEvent::new(method), &state(&repository, None)).await;

    assert_eq!(response.status_code, 405);
    assert_eq!(body(&response), json!({ "error": "Method not allowed" }));
}

#[tokio::test]
async fn test_メソッド未指定はpostとして扱う() {
    let repository = MockApplicationRepository::new();
    let event = GatewayEvent::default().with_body(student().to_string());

    let response = handle(event, &state(&repository, None)).await;

    assert_eq!(response.status_code, 200);
    assert_eq!(repository.saved().len(), 1);
}

mod router {
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode},
    };
    use pretty_assertions::assert_eq;
    use tower::ServiceExt as _;

    use super::*;

    #[tokio::test]
    async fn test_postボディがハンドラに届く() {
        let repository = MockApplicationRepository::new();
        let app = crate::router(Arc::new(state(&repository, None)));

        let response = app
            .oneshot(
                Request::post("/")
                    .header("content-type", "application/json")
                    .body(Body::from(applicant().to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["application_id"], json!(1));
        assert_eq!(repository.saved().len(), 1);
    }

    #[tokio::test]
    async fn test_healthは正常を返す() {
        let app = crate::router(Arc::new(state(&MockApplicationRepository::new(), None)));

        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
