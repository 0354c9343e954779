//! Server-rendered HTML for the gallery pages.
//!
//! Markup mirrors the original views: bootstrap-ish classes, one
//! `media-body` block per listed logo, the `form-control` title input on
//! the add/edit form. Everything interpolated is escaped.

use axum::http::StatusCode;

use models::logo::Logo;
use models::user::UserProfile;

pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, user: Option<&UserProfile>, body: &str) -> String {
    let session_link = match user {
        Some(u) => format!(
            r#"<span>{}</span> <a href="/logout">Log out</a>"#,
            escape(&u.display_name)
        ),
        None => r#"<a href="/login">Log in</a>"#.to_string(),
    };
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title} - Logo Gallery</title>
</head>
<body>
<nav class="navbar">
  <a href="/logos" class="navbar-brand">Logo Gallery</a>
  <div class="navbar-right">{session_link}</div>
</nav>
<div class="container">
{body}
</div>
</body>
</html>
"#,
        title = escape(title),
        session_link = session_link,
        body = body,
    )
}

fn media_row(logo: &Logo) -> String {
    let image = match &logo.image_url {
        Some(url) => format!(
            r#"<img src="{}" class="media-object" alt="{}">"#,
            escape(url),
            escape(&logo.title)
        ),
        None => String::new(),
    };
    format!(
        r#"<div class="media">
  <a href="/logos/{id}">
    {image}
    <div class="media-body">
      <h4>{title}</h4>
      <p>{creator}</p>
    </div>
  </a>
</div>"#,
        id = logo.id,
        image = image,
        title = escape(&logo.title),
        creator = escape(&logo.created_by),
    )
}

pub fn list_page(
    logos: &[Logo],
    next_page_token: Option<&str>,
    user: Option<&UserProfile>,
) -> String {
    let mut body = String::from("<h3>Logos</h3>\n<a href=\"/logos/add\" class=\"btn btn-success\">Add logo</a>\n");
    if logos.is_empty() {
        body.push_str("<p>No logos found.</p>\n");
    }
    for logo in logos {
        body.push_str(&media_row(logo));
        body.push('\n');
    }
    if let Some(token) = next_page_token {
        body.push_str(&format!(
            r#"<nav><a href="/logos?pageToken={}">More</a></nav>"#,
            escape(token)
        ));
        body.push('\n');
    }
    layout("Logos", user, &body)
}

/// Add/edit form; pre-filled when editing an existing logo.
pub fn form_page(logo: Option<&Logo>, user: Option<&UserProfile>) -> String {
    let (action, form_action, title_value) = match logo {
        Some(l) => ("Edit", format!("/logos/{}/edit", l.id), escape(&l.title)),
        None => ("Add", "/logos/add".to_string(), String::new()),
    };
    let body = format!(
        r#"<h3>{action} logo</h3>
<form method="POST" action="{form_action}" enctype="multipart/form-data" class="form-horizontal">
  <div class="form-group">
    <label for="title">Title</label>
    <input type="text" name="title" id="title" value="{title_value}" class="form-control">
  </div>
  <div class="form-group">
    <label for="image">Image</label>
    <input type="file" name="image" id="image" class="form-control">
  </div>
  <button type="submit" class="btn btn-success">Save</button>
</form>"#,
        action = action,
        form_action = form_action,
        title_value = title_value,
    );
    layout(&format!("{action} logo"), user, &body)
}

pub fn detail_page(logo: &Logo, user: Option<&UserProfile>) -> String {
    let image = match &logo.image_url {
        Some(url) => format!(
            r#"<img src="{}" class="img-responsive" alt="{}">
"#,
            escape(url),
            escape(&logo.title)
        ),
        None => String::new(),
    };
    let body = format!(
        r#"<h4>{title}&nbsp;<small>{creator}</small></h4>
{image}<div class="btn-group">
  <a href="/logos/{id}/edit" class="btn btn-primary">Edit logo</a>
  <a href="/logos/{id}/delete" class="btn btn-danger">Delete logo</a>
</div>"#,
        title = escape(&logo.title),
        creator = escape(&logo.created_by),
        image = image,
        id = logo.id,
    );
    layout(&logo.title, user, &body)
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    let body = format!(
        "<h3>{code} - {reason}</h3>\n<p>{message}</p>",
        code = status.as_u16(),
        reason = status.canonical_reason().unwrap_or("Error"),
        message = escape(message),
    );
    layout("Error", None, &body)
}
