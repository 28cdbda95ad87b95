use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use crate::auth::service::NotificationStatus;
use crate::error::AppError;
use crate::AppState;
use tracing::{info, error, warn};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub notification: NotificationStatus,
}

pub async fn register(
    req: web::Json<RegisterRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    info!("Received registration request for email: {}", req.email);
    match state.auth.register(&req.name, &req.email, &req.password).await {
        Ok(outcome) => {
            info!("Registration successful for email: {}", req.email);
            Ok(HttpResponse::Ok().json(RegisterResponse {
                message: "Registration successful. Check your email to verify your account."
                    .to_string(),
                notification: outcome.notification,
            }))
        }
        Err(e) => {
            error!("Registration failed for email: {}: {}", req.email, e);
            Err(e)
        }
    }
}

/// Landing endpoint for emailed verification links, so responses are plain
/// text rather than JSON.
pub async fn verify(
    token: web::Path<String>,
    state: web::Data<AppState>,
) -> HttpResponse {
    match state.auth.verify(&token).await {
        Ok(()) => HttpResponse::Ok()
            .content_type("text/plain; charset=utf-8")
            .body("Account verified! You can now log in."),
        Err(AppError::AuthError(e)) => {
            warn!("Verification rejected: {}", e);
            HttpResponse::BadRequest()
                .content_type("text/plain; charset=utf-8")
                .body("Invalid or expired verification link.")
        }
        Err(e) => {
            error!("Verification failed: {}", e);
            HttpResponse::InternalServerError()
                .content_type("text/plain; charset=utf-8")
                .body("Verification failed. Please try again later.")
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
}

pub async fn login(
    req: web::Json<LoginRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    info!("Received login request for email: {}", req.email);
    match state.auth.login(&req.email, &req.password).await {
        Ok(token) => Ok(HttpResponse::Ok().json(LoginResponse {
            message: "Logged in successfully".to_string(),
            token,
        })),
        Err(e) => {
            error!("Login failed for email: {}: {}", req.email, e);
            Err(e)
        }
    }
}
