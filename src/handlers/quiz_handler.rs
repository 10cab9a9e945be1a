use actix_web::{get, post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::{
        request::{CreateQuizRequest, EditQuizRequest, TogglePublishRequest},
        response::{
            CreateQuizResponse, EditQuizResponse, QuizWithSource, TogglePublishResponse,
        },
    },
    shuffle,
};

#[get("/api/quizzes")]
async fn list_quizzes(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let quizzes = state.quiz_service.list_published().await?;

    let body: Vec<QuizWithSource> = quizzes
        .into_iter()
        .map(|(quiz, webpage)| QuizWithSource::from_parts(quiz, &webpage))
        .collect();
    Ok(HttpResponse::Ok().json(body))
}

#[get("/api/quiz/{slug}")]
async fn get_quiz(
    state: web::Data<AppState>,
    slug: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let (mut quiz, webpage) = state.quiz_service.get_quiz(&slug).await?;

    // Fresh display order per request; stored rows keep canonical order.
    quiz.items = shuffle::shuffle_options(&quiz.items, rand::random::<u64>());

    Ok(HttpResponse::Ok().json(QuizWithSource::from_parts(quiz, &webpage)))
}

#[post("/api/create_quiz")]
async fn create_quiz(
    state: web::Data<AppState>,
    request: web::Json<CreateQuizRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let webpage = state.webpage_service.ingest(&request.url).await?;
    let quiz = state.quiz_service.create_quiz(&webpage).await?;

    Ok(HttpResponse::Ok().json(CreateQuizResponse {
        quiz_slug: quiz.slug,
    }))
}

#[post("/api/edit_quiz")]
async fn edit_quiz(
    state: web::Data<AppState>,
    request: web::Json<EditQuizRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();

    let quiz = state
        .quiz_service
        .edit_quiz(
            &request.quiz_id,
            &request.deleted_item_idxs,
            &request.additional_instructions,
        )
        .await?;

    Ok(HttpResponse::Ok().json(EditQuizResponse {
        quiz_slug: quiz.slug,
    }))
}

#[post("/api/toggle_publish_quiz")]
async fn toggle_publish_quiz(
    state: web::Data<AppState>,
    request: web::Json<TogglePublishRequest>,
) -> Result<HttpResponse, AppError> {
    let published_at = state
        .quiz_service
        .toggle_publish(&request.quiz_id)
        .await?;

    Ok(HttpResponse::Ok().json(TogglePublishResponse { published_at }))
}
