//! Request handlers for the Lorebank HTTP surface.
//!
//! Validation and credential failures are recovered locally as redirects
//! back to the submitting page (the flash-message rendering itself is a
//! frontend concern). Anything else bubbles as [`AppError`].

use axum::extract::{Path, State};
use axum::http::header::SET_COOKIE;
use axum::http::request::Parts;
use axum::response::{AppendHeaders, IntoResponse, Json, Redirect, Response};
use axum::Form;
use serde::Deserialize;
use serde_json::json;

use lorebank_auth::{account_from_parts, clear_cookie, session_cookie, RegisterRequest};
use lorebank_core::{resolve_subject, NewFact, PersonFilter, SUBJECTS};

use crate::error::AppError;
use crate::AppState;

/// `POST /login` form fields.
#[derive(Deserialize)]
pub struct LoginForm {
    email: String,
    password: String,
}

/// `POST /register` form fields.
#[derive(Deserialize)]
pub struct RegisterForm {
    email: String,
    username: String,
    password: String,
    repeat_password: String,
    question: String,
}

/// `POST /post/{person}` form fields.
#[derive(Deserialize)]
pub struct FactForm {
    title: String,
    text: String,
    person: String,
}

/// `POST /read` form fields.
#[derive(Deserialize)]
pub struct ReadForm {
    person: String,
}

/// `GET /` — landing page.
pub async fn index() -> Json<serde_json::Value> {
    Json(json!({
        "service": "lorebank",
        "subjects": SUBJECTS,
    }))
}

/// `GET /login` — login form, or home if already signed in.
pub async fn login_form(parts: Parts) -> Response {
    if account_from_parts(&parts).is_some() {
        return Redirect::to("/").into_response();
    }
    Json(json!({ "form": ["email", "password"] })).into_response()
}

/// `POST /login` — establish a session.
pub async fn login(
    State(state): State<AppState>,
    parts: Parts,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    if account_from_parts(&parts).is_some() {
        return Ok(Redirect::to("/").into_response());
    }

    match state.accounts.authenticate(&form.email, &form.password).await {
        Ok(account) => {
            let token = state.sessions.sign(account.id);
            tracing::info!(id = account.id, "login");
            Ok((
                AppendHeaders([(SET_COOKIE, session_cookie(&token))]),
                Redirect::to("/"),
            )
                .into_response())
        }
        Err(e) if e.is_client_error() => {
            tracing::debug!("login rejected: {e}");
            Ok(Redirect::to("/login").into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// `GET /register` — registration form, or home if already signed in.
pub async fn register_form(parts: Parts) -> Response {
    if account_from_parts(&parts).is_some() {
        return Redirect::to("/").into_response();
    }
    Json(json!({
        "form": ["email", "username", "password", "repeat_password", "question"],
    }))
    .into_response()
}

/// `POST /register` — create an account. No session is established.
pub async fn register(
    State(state): State<AppState>,
    parts: Parts,
    Form(form): Form<RegisterForm>,
) -> Result<Response, AppError> {
    if account_from_parts(&parts).is_some() {
        return Ok(Redirect::to("/").into_response());
    }

    let request = RegisterRequest {
        email: form.email,
        username: form.username,
        password: form.password,
        repeat_password: form.repeat_password,
        security_answer: form.question,
    };

    match state.accounts.register(&request).await {
        Ok(_) => Ok(Redirect::to("/").into_response()),
        Err(e) if e.is_client_error() => {
            tracing::debug!("registration rejected: {e}");
            Ok(Redirect::to("/register").into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// `GET /logout` — clear the session cookie.
pub async fn logout() -> Response {
    (
        AppendHeaders([(SET_COOKIE, clear_cookie())]),
        Redirect::to("/"),
    )
        .into_response()
}

/// `GET /post/{person}` — submission form for a known subject. Gated.
pub async fn submit_form(
    parts: Parts,
    Path(person): Path<String>,
) -> Result<Response, AppError> {
    let subject = resolve_subject(&person).ok_or(AppError::UnknownPerson(person))?;
    if account_from_parts(&parts).is_none() {
        return Ok(Redirect::to("/login").into_response());
    }
    Ok(Json(json!({
        "person": subject,
        "form": ["title", "text", "person"],
    }))
    .into_response())
}

/// `POST /post/{person}` — persist a fact. Gated.
///
/// On success redirects back to the submission page. A write failure is
/// the one storage error reported in plain text rather than propagated.
pub async fn submit_fact(
    State(state): State<AppState>,
    parts: Parts,
    Path(person): Path<String>,
    Form(form): Form<FactForm>,
) -> Result<Response, AppError> {
    resolve_subject(&person).ok_or_else(|| AppError::UnknownPerson(person.clone()))?;
    let Some(current) = account_from_parts(&parts) else {
        return Ok(Redirect::to("/login").into_response());
    };

    // Session resolved to an id first; the fact references that id, not
    // the session object.
    let new_fact = match NewFact::new(&form.title, &form.text, &form.person, current.id) {
        Ok(f) => f,
        Err(e) => {
            tracing::debug!("fact rejected: {e}");
            return Ok(Redirect::to(&format!("/post/{person}")).into_response());
        }
    };

    match state.db.facts().add_fact(&new_fact).await {
        Ok(_) => Ok(Redirect::to(&format!("/post/{person}")).into_response()),
        Err(e) => {
            tracing::error!("fact write failed: {e}");
            Err(AppError::SubmitFailed)
        }
    }
}

/// `GET /read` — filter form.
pub async fn read_form() -> Json<serde_json::Value> {
    Json(json!({
        "form": ["person"],
        "people": [SUBJECTS[0], SUBJECTS[1], "All"],
    }))
}

/// `POST /read` — list facts matching the submitted person filter.
pub async fn read(
    State(state): State<AppState>,
    Form(form): Form<ReadForm>,
) -> Result<Response, AppError> {
    let filter = PersonFilter::parse(&form.person);
    let facts = state.db.facts().list_facts(&filter).await?;
    Ok(Json(facts).into_response())
}

/// `GET /read/{id}` — a single fact, or the 404 empty state.
pub async fn read_one(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    let fact = state
        .db
        .facts()
        .get_fact(id)
        .await?
        .ok_or(AppError::FactNotFound(id))?;
    Ok(Json(fact).into_response())
}
