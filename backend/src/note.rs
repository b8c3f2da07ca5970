use crate::error::ApiError;
use crate::store::{NewNote, NoteChanges};

pub(crate) async fn index(
    app_state: actix_web::web::Data<crate::AppState>,
) -> Result<actix_web::HttpResponse, ApiError> {
    let notes = app_state.notes.list().await?;
    Ok(actix_web::HttpResponse::Ok().json(notes))
}

pub(crate) async fn show(
    app_state: actix_web::web::Data<crate::AppState>,
    id: actix_web::web::Path<String>,
) -> Result<actix_web::HttpResponse, ApiError> {
    match app_state.notes.get(&id).await? {
        Some(note) => Ok(actix_web::HttpResponse::Ok().json(note)),
        None => Err(ApiError::NotFound),
    }
}

pub(crate) async fn create(
    app_state: actix_web::web::Data<crate::AppState>,
    req: actix_web::HttpRequest,
    body: actix_web::web::Bytes,
) -> Result<actix_web::HttpResponse, ApiError> {
    let payload: common::NewNotePayload = crate::payload::json_or_default(&req, &body)?;
    let content = payload
        .content
        .filter(|content| !content.is_empty())
        .ok_or_else(|| ApiError::BadRequest("content missing".into()))?;
    let note = NewNote {
        content,
        important: payload.important.unwrap_or(false),
    };
    let note = app_state.notes.create(note).await?;
    Ok(actix_web::HttpResponse::Ok().json(note))
}

pub(crate) async fn update(
    app_state: actix_web::web::Data<crate::AppState>,
    id: actix_web::web::Path<String>,
    payload: actix_web::web::Json<common::UpdateNotePayload>,
) -> Result<actix_web::HttpResponse, ApiError> {
    let payload = payload.into_inner();
    let changes = NoteChanges {
        content: payload.content,
        important: payload.important,
    };
    match app_state.notes.update(&id, changes).await? {
        Some(note) => Ok(actix_web::HttpResponse::Ok().json(note)),
        None => Err(ApiError::NotFound),
    }
}

pub(crate) async fn delete(
    app_state: actix_web::web::Data<crate::AppState>,
    id: actix_web::web::Path<String>,
) -> Result<actix_web::HttpResponse, ApiError> {
    app_state.notes.delete(&id).await?;
    Ok(actix_web::HttpResponse::NoContent().finish())
}
