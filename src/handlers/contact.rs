use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::contact::ContactForm;
use crate::errors::AppError;
use crate::state::AppState;

use super::blocking;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    /// Free-form topic, e.g. delivery or membership.
    pub category: Option<String>,
    pub subject: Option<String>,
    pub message: String,
    /// Consent to storing the message.
    #[serde(default)]
    pub privacy: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ContactResponse {
    pub id: Uuid,
    pub received_at: String,
}

/// POST /contact
#[utoipa::path(
    post,
    path = "/contact",
    request_body = ContactRequest,
    responses(
        (status = 201, description = "Message received", body = ContactResponse),
        (status = 400, description = "Missing field, bad email or privacy not accepted"),
    ),
    tag = "contact"
)]
pub async fn submit_contact(
    state: web::Data<AppState>,
    body: web::Json<ContactRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let form = ContactForm {
        name: body.name,
        email: body.email,
        phone: body.phone,
        category: body.category,
        subject: body.subject,
        message: body.message,
        privacy_accepted: body.privacy,
    };
    let state = state.into_inner();
    let message = blocking(move || state.contact.submit(form, Utc::now())).await?;
    Ok(HttpResponse::Created().json(ContactResponse {
        id: message.id,
        received_at: message.received_at.to_rfc3339(),
    }))
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test};
    use serde_json::json;

    use super::*;
    use crate::handlers::test_app;

    #[actix_web::test]
    async fn accepts_valid_message() {
        let app = test::init_service(test_app()).await;
        let req = test::TestRequest::post()
            .uri("/contact")
            .set_json(json!({
                "name": "Yoon Ara",
                "email": "ara@example.com",
                "category": "delivery",
                "message": "Do you deliver to Incheon?",
                "privacy": true
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: ContactResponse = test::read_body_json(resp).await;
        assert!(!body.received_at.is_empty());
    }

    #[actix_web::test]
    async fn rejects_bad_email_and_missing_consent() {
        let app = test::init_service(test_app()).await;

        for payload in [
            json!({ "name": "Yoon Ara", "email": "ara@example", "message": "Hi", "privacy": true }),
            json!({ "name": "Yoon Ara", "email": "ara@example.com", "message": "Hi" }),
            json!({ "name": " ", "email": "ara@example.com", "message": "Hi", "privacy": true }),
        ] {
            let req = test::TestRequest::post()
                .uri("/contact")
                .set_json(payload)
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        }
    }
}
