use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::{delete, get, patch, post},
    Json, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::db::Db;
use crate::error::ApiError;
use crate::models::{ContactList, CreateContact, Message, UpdateContact};

pub fn router(db: Db) -> Router {
    Router::new()
        .route("/contacts", get(get_contacts))
        .route("/create_contact", post(create_contact))
        .route("/update_contact/:id", patch(update_contact))
        .route("/delete_contact/:id", delete(delete_contact))
        .with_state(db)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Ids that do not parse as integers name no contact.
fn contact_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, ApiError> {
    let Path(id) = path.map_err(|_| ApiError::NotFound)?;

    Ok(id)
}

async fn get_contacts(State(db): State<Db>) -> Result<Json<ContactList>, ApiError> {
    let contacts = db.list_contacts().await?;

    Ok(Json(ContactList { contacts }))
}

async fn create_contact(
    State(db): State<Db>,
    payload: Result<Json<CreateContact>, JsonRejection>,
) -> Result<(StatusCode, Json<Message>), ApiError> {
    let Json(payload) = payload.map_err(|_| ApiError::MissingFields)?;
    let new_contact = payload.validate()?;

    let id = db
        .create_contact(&new_contact)
        .await
        .map_err(ApiError::Create)?;

    tracing::info!("Created contact {}", id);

    Ok((StatusCode::CREATED, Json(Message::new("User created!"))))
}

async fn update_contact(
    State(db): State<Db>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateContact>, JsonRejection>,
) -> Result<Json<Message>, ApiError> {
    let id = contact_id(path)?;

    // A missing contact wins over an unreadable body.
    let changes = match payload {
        Ok(Json(changes)) => changes,
        Err(rejection) => {
            if db.get_contact(id).await?.is_none() {
                return Err(ApiError::NotFound);
            }
            return Err(ApiError::InvalidBody(rejection.body_text()));
        }
    };

    if !db.update_contact(id, changes).await? {
        return Err(ApiError::NotFound);
    }

    tracing::info!("Updated contact {}", id);

    Ok(Json(Message::new("User updated.")))
}

async fn delete_contact(
    State(db): State<Db>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Message>, ApiError> {
    let id = contact_id(path)?;

    if !db.delete_contact(id).await? {
        return Err(ApiError::NotFound);
    }

    tracing::info!("Deleted contact {}", id);

    Ok(Json(Message::new("User deleted!")))
}
