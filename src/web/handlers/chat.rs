//! AI query endpoints: the JSON chat API and the form-based AI page.

use crate::error::AppError;
use crate::services::ai::ImageInput;
use crate::state::AppState;
use crate::types::{ChatRequest, ChatResponse};
use axum::{
    extract::{Multipart, State},
    response::{Html, Json},
};
use minijinja::context;
use std::path::Path;

use super::pages::render_page;

/// `POST /api/chat`: JSON in, `{success, response}` envelope out. Provider
/// failures become the 500 failure envelope via [`AppError`].
pub async fn api_chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    tracing::info!("chat message received ({} chars)", req.message.len());

    let image = req.image.map(ImageInput::DataUri);
    let answer = state.ai.query(&req.message, image).await?;

    Ok(Json(ChatResponse::ok(answer)))
}

/// `GET /ai-chat`: the AI page with no prior exchange.
pub async fn ai_chat_page(State(state): State<AppState>) -> Html<String> {
    render_page(&state, "ai.html", context! {})
}

/// `POST /ai-chat`: multipart form with a `question` field and an optional
/// `image` file. The upload is saved under its (sanitized) original name,
/// last write wins, and the page re-renders with the answer or the error.
pub async fn ai_chat_submit(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Html<String> {
    let form = match read_form(multipart).await {
        Ok(form) => form,
        Err((question, e)) => {
            // Echo back whatever part of the question was parsed before
            // the form broke, so the user doesn't lose their input.
            return render_page(
                &state,
                "ai.html",
                context! {
                    error => e.to_string(),
                    user_message => question,
                },
            );
        }
    };

    let mut img_url = None;
    let image = match form.upload {
        Some((filename, bytes)) => {
            let filename = sanitize_filename(&filename);
            let path = state.config.upload_dir.join(&filename);
            if let Err(e) = tokio::fs::write(&path, &bytes).await {
                let err = AppError::Upload(e);
                tracing::error!("upload save failed: {:?}", err);
                return render_page(
                    &state,
                    "ai.html",
                    context! {
                        error => err.to_string(),
                        user_message => form.question,
                    },
                );
            }
            img_url = Some(format!("/static/uploads/{filename}"));
            Some(ImageInput::Path(path))
        }
        None => None,
    };

    match state.ai.query(&form.question, image).await {
        Ok(answer) => render_page(
            &state,
            "ai.html",
            context! {
                answer => answer,
                img_url => img_url,
                user_message => form.question,
            },
        ),
        Err(e) => {
            tracing::error!("provider query failed: {:?}", e);
            render_page(
                &state,
                "ai.html",
                context! {
                    error => e.to_string(),
                    img_url => img_url,
                    user_message => form.question,
                },
            )
        }
    }
}

struct AiChatForm {
    question: String,
    upload: Option<(String, Vec<u8>)>,
}

/// Read the form, keeping whatever question text was already parsed when
/// the multipart stream turns out to be broken.
async fn read_form(
    mut multipart: Multipart,
) -> Result<AiChatForm, (String, axum::extract::multipart::MultipartError)> {
    let mut question = String::new();
    let mut upload = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return Err((question, e)),
        };
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("question") => match field.text().await {
                Ok(text) => question = text,
                Err(e) => return Err((question, e)),
            },
            Some("image") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                if filename.is_empty() {
                    // File input submitted empty, treat as no image.
                    continue;
                }
                match field.bytes().await {
                    Ok(bytes) => upload = Some((filename, bytes.to_vec())),
                    Err(e) => return Err((question, e)),
                }
            }
            _ => {}
        }
    }

    Ok(AiChatForm { question, upload })
}

/// Keep only the final path component and a conservative character set.
/// The original client-supplied name is otherwise preserved so repeat
/// uploads of the same file overwrite each other.
fn sanitize_filename(name: &str) -> String {
    let base = Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload");
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let trimmed = cleaned.trim_matches('.');
    if trimmed.is_empty() {
        "upload".to_string()
    } else {
        trimmed.to_string()
    }
}
