//! Dog routes and their status tables.
//!
//! | Route              | Outcome                          | Status          |
//! |--------------------|----------------------------------|-----------------|
//! | `GET /dogs`        | list                             | 200             |
//! | `GET /dogs/:id`    | found / missing / bad id         | 200 / 204 / 400 |
//! | `DELETE /dogs/:id` | deleted / missing / not a number | 200 / 204 / 400 |
//! | `POST /dogs`       | created / invalid / store down   | 201 / 400 / 500 |
//! | `PATCH /dogs/:id`  | updated / invalid / missing      | 201 / 201 / 404 |
//!
//! A 204 still carries its JSON body, and a rejected patch answers 201.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use kennel_core::{parse_id, validate_fields, Dog, DogChanges, Lookup, NewDog, ValidationMode};
use serde::Serialize;

use crate::body::SubmittedFields;
use crate::{KennelAxumError, KennelState};

pub const ID_SHOULD_BE_A_NUMBER: &str = "id should be a number";
pub const DOG_NOT_FOUND: &str = "Dog not found";
pub const CREATE_FAILED: &str = "An error occurred while creating the dog.";

#[derive(Serialize)]
struct MessageBody {
    message: String,
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
}

#[derive(Serialize)]
struct ErrorsBody {
    errors: Vec<String>,
}

fn message(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(MessageBody {
            message: message.into(),
        }),
    )
        .into_response()
}

fn error(status: StatusCode, error: &'static str) -> Response {
    (status, Json(ErrorBody { error })).into_response()
}

fn errors(status: StatusCode, errors: Vec<String>) -> Response {
    (status, Json(ErrorsBody { errors })).into_response()
}

fn found(status: StatusCode, dog: Dog) -> Response {
    (status, Json(dog)).into_response()
}

pub async fn hello() -> Response {
    message(StatusCode::OK, "Hello World!")
}

pub async fn list_dogs(
    State(state): State<KennelState>,
) -> Result<Json<Vec<Dog>>, KennelAxumError> {
    let dogs = state.store.find_many().await?;
    Ok(Json(dogs))
}

pub async fn get_dog(State(state): State<KennelState>, Path(raw_id): Path<String>) -> Response {
    let Ok(id) = parse_id(&raw_id) else {
        return message(StatusCode::BAD_REQUEST, ID_SHOULD_BE_A_NUMBER);
    };

    match state.store.find_unique(id).await {
        Ok(Lookup::Found(dog)) => found(StatusCode::OK, dog),
        Ok(Lookup::NotFound) => error(StatusCode::NO_CONTENT, DOG_NOT_FOUND),
        Err(err) => {
            tracing::warn!(%id, "lookup failed: {err:#}");
            message(StatusCode::BAD_REQUEST, ID_SHOULD_BE_A_NUMBER)
        }
    }
}

pub async fn delete_dog(State(state): State<KennelState>, Path(raw_id): Path<String>) -> Response {
    let id = match parse_id(&raw_id) {
        Ok(id) => id,
        Err(invalid) if invalid.is_not_a_number() => {
            return message(StatusCode::BAD_REQUEST, ID_SHOULD_BE_A_NUMBER);
        }
        // A number no row can carry: nothing to delete.
        Err(_) => return error(StatusCode::NO_CONTENT, DOG_NOT_FOUND),
    };

    match state.store.delete(id).await {
        Ok(Lookup::Found(dog)) => found(StatusCode::OK, dog),
        Ok(Lookup::NotFound) => error(StatusCode::NO_CONTENT, DOG_NOT_FOUND),
        Err(err) => {
            tracing::warn!(%id, "delete failed: {err:#}");
            error(StatusCode::NO_CONTENT, DOG_NOT_FOUND)
        }
    }
}

pub async fn create_dog(
    State(state): State<KennelState>,
    SubmittedFields(fields): SubmittedFields,
) -> Response {
    let problems = validate_fields(&fields, ValidationMode::Strict);
    if !problems.is_empty() {
        return errors(StatusCode::BAD_REQUEST, problems);
    }

    let created = async {
        let new_dog = NewDog::from_fields(&fields)?;
        state.store.create(new_dog).await
    }
    .await;

    match created {
        Ok(dog) => {
            tracing::info!(id = %dog.id, "dog created");
            message(
                StatusCode::CREATED,
                format!("Great success! {} has been spawned.", dog.name),
            )
        }
        Err(err) => {
            tracing::warn!("create failed: {err:#}");
            error(StatusCode::INTERNAL_SERVER_ERROR, CREATE_FAILED)
        }
    }
}

pub async fn update_dog(
    State(state): State<KennelState>,
    Path(raw_id): Path<String>,
    SubmittedFields(fields): SubmittedFields,
) -> Response {
    let problems = validate_fields(&fields, ValidationMode::Partial);
    if !problems.is_empty() {
        return errors(StatusCode::CREATED, problems);
    }

    let updated = async {
        let id = parse_id(&raw_id)?;
        let changes = DogChanges::from_fields(&fields)?;
        state.store.update(id, changes).await
    }
    .await;

    match updated {
        Ok(Lookup::Found(dog)) => found(StatusCode::CREATED, dog),
        Ok(Lookup::NotFound) => error(StatusCode::NOT_FOUND, DOG_NOT_FOUND),
        Err(err) => {
            tracing::warn!(id = %raw_id, "update failed: {err:#}");
            error(StatusCode::NOT_FOUND, DOG_NOT_FOUND)
        }
    }
}

/// `/` and `/dogs` routes over `state`.
pub fn routes(state: KennelState) -> Router<()> {
    let dogs = Router::new()
        .route("/", get(list_dogs).post(create_dog))
        .route("/{id}", get(get_dog).patch(update_dog).delete(delete_dog));

    Router::new()
        .route("/", get(hello))
        .nest("/dogs", dogs)
        .with_state(state)
}
