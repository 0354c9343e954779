//! Route handlers for the `/logos` group.
//!
//! Each handler is glue: optional session lookup, optional multipart parse,
//! one storage call, then a rendered page or a 302 to the canonical path.
//! Storage failures propagate as `AppError` and render through the shared
//! error path.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use uuid::Uuid;

use models::logo::LogoInput;

use crate::errors::AppError;
use crate::session::{self, ServerState};
use crate::uploads;
use crate::views;

/// Listing page size, same as the original module.
const PAGE_SIZE: usize = 10;

#[derive(Deserialize, Default)]
pub struct ListQuery {
    #[serde(rename = "pageToken")]
    pub page_token: Option<String>,
}

/// `302 Found` with a short plain-text body, the shape the original
/// framework produced for `res.redirect`.
pub fn redirect_found(location: &str) -> Response {
    (
        StatusCode::FOUND,
        [(header::LOCATION, location.to_string())],
        format!("Redirecting to {location}"),
    )
        .into_response()
}

fn detail_path(id: Uuid) -> String {
    format!("/logos/{id}")
}

/// GET / — the gallery is the landing page.
pub async fn home() -> Response {
    redirect_found("/logos")
}

/// GET /logos — up to ten logos plus a cursor for the next page.
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
    jar: CookieJar,
) -> Result<Html<String>, AppError> {
    let page = state.store.list(PAGE_SIZE, query.page_token.as_deref()).await?;
    let user = session::current_user(&jar);
    Ok(Html(views::list_page(&page.logos, page.next_page_token.as_deref(), user.as_ref())))
}

/// GET /logos/mine — same listing scoped to the signed-in user.
pub async fn mine(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
    jar: CookieJar,
) -> Result<Html<String>, AppError> {
    let user = session::current_user(&jar)
        .ok_or_else(|| AppError::unauthorized("sign in to see your logos"))?;
    let page = state
        .store
        .list_by(&user.id, PAGE_SIZE, query.page_token.as_deref())
        .await?;
    Ok(Html(views::list_page(&page.logos, page.next_page_token.as_deref(), Some(&user))))
}

/// GET /logos/add
pub async fn add_form(jar: CookieJar) -> Html<String> {
    let user = session::current_user(&jar);
    Html(views::form_page(None, user.as_ref()))
}

/// POST /logos/add — parse the form (storing any upload first), attribute
/// the record to the session user or Anonymous, persist, redirect to the
/// new detail page.
pub async fn add_submit(
    State(state): State<ServerState>,
    jar: CookieJar,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let form = uploads::parse_logo_form(&state.uploads, multipart).await?;
    let user = session::current_user(&jar);
    let input = LogoInput { title: form.title, image_url: form.image_url };
    let logo = state.store.create(input, user.as_ref()).await?;
    Ok(redirect_found(&detail_path(logo.id)))
}

/// GET /logos/:id/edit
pub async fn edit_form(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    jar: CookieJar,
) -> Result<Html<String>, AppError> {
    let logo = state.store.read(id).await?;
    let user = session::current_user(&jar);
    Ok(Html(views::form_page(Some(&logo), user.as_ref())))
}

/// POST /logos/:id/edit — the new image URL only overrides when an upload
/// happened; otherwise the stored one stays.
pub async fn edit_submit(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let form = uploads::parse_logo_form(&state.uploads, multipart).await?;
    let input = LogoInput { title: form.title, image_url: form.image_url };
    let logo = state.store.update(id, input).await?;
    Ok(redirect_found(&detail_path(logo.id)))
}

/// GET /logos/:id
pub async fn view(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    jar: CookieJar,
) -> Result<Html<String>, AppError> {
    let logo = state.store.read(id).await?;
    let user = session::current_user(&jar);
    Ok(Html(views::detail_page(&logo, user.as_ref())))
}

/// GET /logos/:id/delete
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    state.store.delete(id).await?;
    Ok(redirect_found("/logos"))
}
