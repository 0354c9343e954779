use std::sync::Arc;

use axum::extract::Query;
use axum::response::Response;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;

use configs::UploadsConfig;
use models::user::UserProfile;
use service::logos::LogoStore;

use crate::logos::redirect_found;

/// Shared state injected into every handler. The store is resolved once at
/// startup; handlers never look a backend up per request.
#[derive(Clone)]
pub struct ServerState {
    pub store: Arc<dyn LogoStore>,
    pub uploads: UploadsConfig,
}

pub const SESSION_COOKIE: &str = "session";

/// The optional signed-in user, read from the session cookie the auth
/// collaborator set (`<id>|<display name>`). `None` means anonymous.
pub fn current_user(jar: &CookieJar) -> Option<UserProfile> {
    let raw = jar.get(SESSION_COOKIE)?.value();
    let (id, display_name) = raw.split_once('|')?;
    if id.is_empty() || display_name.is_empty() {
        return None;
    }
    Some(UserProfile { id: id.to_string(), display_name: display_name.to_string() })
}

#[derive(Deserialize)]
pub struct LoginQuery {
    pub id: String,
    pub name: String,
}

/// Development stand-in for the OAuth collaborator: establish a session for
/// the given identity and bounce back to the gallery.
pub async fn login(jar: CookieJar, Query(q): Query<LoginQuery>) -> (CookieJar, Response) {
    let mut cookie = Cookie::new(SESSION_COOKIE, format!("{}|{}", q.id, q.name));
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    (jar.add(cookie), redirect_found("/logos"))
}

pub async fn logout(jar: CookieJar) -> (CookieJar, Response) {
    (jar.remove(Cookie::from(SESSION_COOKIE)), redirect_found("/logos"))
}
