use std::path::Path;

use axum::extract::Multipart;
use tracing::info;
use uuid::Uuid;

use configs::UploadsConfig;

use crate::errors::AppError;

/// What the add/edit form carried: the text fields plus, when a file was
/// sent, the public URL the stored image is served under.
#[derive(Debug, Default)]
pub struct LogoForm {
    pub title: String,
    pub image_url: Option<String>,
}

/// Parse the multipart form. Runs before the handler touches storage, the
/// way the original chained its upload middleware ahead of the route body.
/// An `image` part without a filename or without bytes is ignored.
pub async fn parse_logo_form(
    uploads: &UploadsConfig,
    mut multipart: Multipart,
) -> Result<LogoForm, AppError> {
    let mut form = LogoForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::invalid(format!("malformed form: {e}")))?
    {
        let name = field.name().map(|s| s.to_string());
        match name.as_deref() {
            Some("title") => {
                form.title = field
                    .text()
                    .await
                    .map_err(|e| AppError::invalid(format!("malformed form: {e}")))?;
            }
            Some("image") => {
                let file_name = field.file_name().map(|s| s.to_string());
                let Some(file_name) = file_name.filter(|n| !n.is_empty()) else {
                    continue;
                };
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::invalid(format!("malformed upload: {e}")))?;
                if bytes.is_empty() {
                    continue;
                }
                form.image_url = Some(store_image(uploads, &file_name, &bytes).await?);
            }
            _ => {}
        }
    }

    Ok(form)
}

/// Write the image under a fresh uuid filename (original extension kept)
/// and return the URL it is publicly served under.
async fn store_image(
    uploads: &UploadsConfig,
    original_name: &str,
    bytes: &[u8],
) -> Result<String, AppError> {
    let file_name = match Path::new(original_name).extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}.{}", Uuid::new_v4(), ext),
        None => Uuid::new_v4().to_string(),
    };

    tokio::fs::create_dir_all(&uploads.dir)
        .await
        .map_err(|e| AppError::internal(format!("cannot create uploads dir: {e}")))?;
    let path = Path::new(&uploads.dir).join(&file_name);
    tokio::fs::write(&path, bytes)
        .await
        .map_err(|e| AppError::internal(format!("cannot store upload: {e}")))?;

    info!(file = %file_name, size = bytes.len(), "stored uploaded image");
    Ok(format!("{}/{}", uploads.public_path.trim_end_matches('/'), file_name))
}
