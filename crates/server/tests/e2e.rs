use std::net::SocketAddr;

use axum::Router;
use reqwest::{redirect, StatusCode as HttpStatusCode};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use configs::{StorageConfig, UploadsConfig};
use server::routes;
use server::session::ServerState;

fn cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

struct TestApp {
    base_url: String,
}

async fn start_server() -> anyhow::Result<TestApp> {
    let storage = StorageConfig { backend: "memory".into(), data_path: "unused".into() };
    let store = service::logos::from_config(&storage).await?;

    // Isolated uploads dir per test run.
    let uploads = UploadsConfig {
        dir: format!("target/test-data/{}/uploads", Uuid::new_v4()),
        public_path: "/uploads".into(),
    };

    let state = ServerState { store, uploads };
    let app: Router = routes::build_router(state, cors());

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });

    Ok(TestApp { base_url })
}

/// Client that keeps cookies and does not follow redirects, so 302s stay
/// observable.
fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .redirect(redirect::Policy::none())
        .build()
        .expect("reqwest client")
}

/// POST the add form and return the created record's detail path.
async fn create_logo(c: &reqwest::Client, base_url: &str, title: &str) -> anyhow::Result<String> {
    let form = reqwest::multipart::Form::new().text("title", title.to_string());
    let res = c
        .post(format!("{}/logos/add", base_url))
        .multipart(form)
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::FOUND);
    let location = res
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .expect("location header");
    Ok(location)
}

#[tokio::test]
async fn e2e_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(format!("{}/health", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_add_redirects_to_detail() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let form = reqwest::multipart::Form::new().text("title", "my logo");
    let res = c
        .post(format!("{}/logos/add", app.base_url))
        .multipart(form)
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::FOUND);
    let location = res
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .expect("location header")
        .to_string();
    assert!(location.starts_with("/logos/"));
    let body = res.text().await?;
    assert!(body.contains("Redirecting to /logos/"));

    // The detail page echoes the submitted fields with the assigned id.
    let id_part = location.replace("/logos/", "");
    Uuid::parse_str(&id_part).expect("backend-assigned id");
    let res = c.get(format!("{}{}", app.base_url, location)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let html = res.text().await?;
    assert!(html.contains("<h4>my logo&nbsp;<small>Anonymous</small></h4>"));
    Ok(())
}

#[tokio::test]
async fn e2e_add_form_renders() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(format!("{}/logos/add", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert!(res
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.starts_with("text/html"))
        .unwrap_or(false));
    let html = res.text().await?;
    assert!(html.contains("Add logo"));
    Ok(())
}

#[tokio::test]
async fn e2e_list_shows_logos() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();
    create_logo(&c, &app.base_url, "my logo").await?;

    let res = c.get(format!("{}/logos", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let html = res.text().await?;
    assert!(html.contains(r#"<div class="media-body">"#));
    assert!(html.contains("my logo"));
    Ok(())
}

#[tokio::test]
async fn e2e_list_paginates_at_ten() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();
    for i in 0..12 {
        create_logo(&c, &app.base_url, &format!("logo {i}")).await?;
    }

    let res = c.get(format!("{}/logos", app.base_url)).send().await?;
    let html = res.text().await?;
    assert_eq!(html.matches(r#"<div class="media-body">"#).count(), 10);
    assert!(html.contains("pageToken=10"));

    let res = c
        .get(format!("{}/logos?pageToken=10", app.base_url))
        .send()
        .await?;
    let html = res.text().await?;
    assert_eq!(html.matches(r#"<div class="media-body">"#).count(), 2);
    assert!(!html.contains("pageToken=20"));
    Ok(())
}

#[tokio::test]
async fn e2e_bad_page_token_is_server_error() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client()
        .get(format!("{}/logos?pageToken=badrequest", app.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::INTERNAL_SERVER_ERROR);
    Ok(())
}

#[tokio::test]
async fn e2e_edit_view_delete_flow() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();
    let detail = create_logo(&c, &app.base_url, "my logo").await?;

    // Update the title.
    let form = reqwest::multipart::Form::new().text("title", "my other logo");
    let res = c
        .post(format!("{}{}/edit", app.base_url, detail))
        .multipart(form)
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::FOUND);
    let body = res.text().await?;
    assert!(body.contains(&format!("Redirecting to {detail}")));

    // The edit form is pre-filled with the new title.
    let res = c.get(format!("{}{}/edit", app.base_url, detail)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let html = res.text().await?;
    assert!(html.contains(
        r#"<input type="text" name="title" id="title" value="my other logo" class="form-control">"#
    ));

    // The detail page shows it too.
    let res = c.get(format!("{}{}", app.base_url, detail)).send().await?;
    let html = res.text().await?;
    assert!(html.contains("<h4>my other logo&nbsp;<small>Anonymous</small></h4>"));

    // Delete redirects to the list, then the record is gone.
    let res = c.get(format!("{}{}/delete", app.base_url, detail)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::FOUND);
    let body = res.text().await?;
    assert!(body.contains("Redirecting to /logos"));

    let res = c.get(format!("{}{}", app.base_url, detail)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_mine_requires_session_and_scopes() -> anyhow::Result<()> {
    let app = start_server().await?;

    // Anonymous caller is rejected before the listing runs.
    let anon = client();
    let res = anon.get(format!("{}/logos/mine", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::UNAUTHORIZED);

    // A logo created without a session stays out of anyone's /mine.
    create_logo(&anon, &app.base_url, "anonymous logo").await?;

    // Sign in and create one; /mine lists exactly that.
    let c = client();
    let res = c
        .get(format!("{}/login?id=u-1&name=Ada", app.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::FOUND);
    create_logo(&c, &app.base_url, "ada logo").await?;

    let res = c.get(format!("{}/logos/mine", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let html = res.text().await?;
    assert!(html.contains("ada logo"));
    assert!(!html.contains("anonymous logo"));
    Ok(())
}

#[tokio::test]
async fn e2e_session_user_attributed_as_creator() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();
    c.get(format!("{}/login?id=u-7&name=Grace", app.base_url)).send().await?;

    let detail = create_logo(&c, &app.base_url, "attributed").await?;
    let res = c.get(format!("{}{}", app.base_url, detail)).send().await?;
    let html = res.text().await?;
    assert!(html.contains("<h4>attributed&nbsp;<small>Grace</small></h4>"));
    Ok(())
}

#[tokio::test]
async fn e2e_upload_sets_image_url_and_serves_file() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let image = reqwest::multipart::Part::bytes(vec![0x89, b'P', b'N', b'G'])
        .file_name("logo.png")
        .mime_str("image/png")?;
    let form = reqwest::multipart::Form::new()
        .text("title", "with image")
        .part("image", image);
    let res = c
        .post(format!("{}/logos/add", app.base_url))
        .multipart(form)
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::FOUND);
    let detail = res
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .expect("location header")
        .to_string();

    let res = c.get(format!("{}{}", app.base_url, detail)).send().await?;
    let html = res.text().await?;
    let src = html
        .split("src=\"")
        .nth(1)
        .and_then(|rest| rest.split('"').next())
        .expect("image url in detail page");
    assert!(src.starts_with("/uploads/"));
    assert!(src.ends_with(".png"));

    // The stored file is served back.
    let res = c.get(format!("{}{}", app.base_url, src)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.bytes().await?.as_ref(), &[0x89, b'P', b'N', b'G']);
    Ok(())
}

#[tokio::test]
async fn e2e_root_redirects_to_gallery() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(format!("{}/", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::FOUND);
    assert_eq!(
        res.headers().get("location").and_then(|v| v.to_str().ok()),
        Some("/logos")
    );
    Ok(())
}
