use actix_multipart::{Field, Multipart, MultipartError};
use actix_web::{HttpResponse, delete, get, http::header, post, web};
use futures_util::TryStreamExt;

use crate::api::{error, success};
use crate::constants::DEFAULT_MIME_TYPE;
use crate::modules::file::schema::{FileSummary, FilenamePath, UploadResponse, validate_filename};
use crate::modules::file::service::{FileService, resolve_mime_type};
use crate::utils::ValidatedPath;

const UPLOAD_FIELD: &str = "file";

fn malformed_multipart(e: MultipartError) -> error::Error {
    log::warn!("Malformed multipart upload: {}", e);
    error::Error::bad_request("Malformed multipart payload")
}

/// Buffers a multipart field, giving up as soon as it grows past `limit`.
async fn read_capped(field: &mut Field, limit: usize) -> Result<Vec<u8>, error::Error> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.try_next().await.map_err(malformed_multipart)? {
        if bytes.len() + chunk.len() > limit {
            return Err(error::Error::PayloadTooLarge("file too big".into()));
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

#[post("/upload")]
pub async fn upload_file(
    file_service: web::Data<FileService>,
    mut payload: Multipart,
) -> Result<success::Success<UploadResponse>, error::Error> {
    while let Some(mut field) = payload.try_next().await.map_err(malformed_multipart)? {
        if field.name() != Some(UPLOAD_FIELD) {
            // drain unrelated form fields
            while field.try_next().await.map_err(malformed_multipart)?.is_some() {}
            continue;
        }

        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .ok_or_else(|| error::Error::bad_request("Missing filename"))?
            .to_string();
        let filename = validate_filename(filename)?;

        let mime_type = resolve_mime_type(&filename, field.content_type().map(|m| m.to_string()));

        let content = read_capped(&mut field, file_service.max_file_size()).await?;

        let result = file_service.upload_file(filename, mime_type, content).await?;
        return Ok(success::Success::created(result));
    }

    Err(error::Error::bad_request("No file found in request"))
}

#[get("/download/{filename}")]
pub async fn download_file(
    file_service: web::Data<FileService>,
    path: ValidatedPath<FilenamePath>,
) -> Result<HttpResponse, error::Error> {
    let filename = path.0.filename;
    let file = file_service.get_file(&filename).await?;

    let mime_type = file.mime_type.unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string());

    Ok(HttpResponse::Ok()
        .content_type(mime_type)
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        ))
        .body(file.content))
}

#[get("/list")]
pub async fn list_files(
    file_service: web::Data<FileService>,
) -> Result<success::Success<Vec<FileSummary>>, error::Error> {
    let files = file_service.list_files().await?;
    Ok(success::Success::ok(files))
}

#[delete("/delete/{filename}")]
pub async fn delete_file(
    file_service: web::Data<FileService>,
    path: ValidatedPath<FilenamePath>,
) -> Result<success::Success<()>, error::Error> {
    file_service.delete_file(&path.0.filename).await?;
    Ok(success::Success::no_content())
}
