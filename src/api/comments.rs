use askama::Template;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use sqlx::SqlitePool;
use tower_sessions::Session;
use validator::Validate;

use crate::{
    db::{self, Article, ArticleId, CommentDetails, CommentId, User, UserId},
    error::AppResult,
    utils::{auth::AuthUser, flash},
};

const NOT_FOUND_NOTICE: &str = "The comment you're looking for cannot be found";

#[derive(Template)]
#[template(path = "comments/index.html")]
pub struct IndexTemplate {
    flash: Option<String>,
    comments: Vec<CommentDetails>,
}

#[derive(Template)]
#[template(path = "comments/show.html")]
pub struct ShowTemplate {
    flash: Option<String>,
    comment: CommentDetails,
}

#[derive(Template)]
#[template(path = "comments/form.html")]
pub struct FormTemplate {
    flash: Option<String>,
    heading: &'static str,
    submit: &'static str,
    action: String,
    method_override: Option<&'static str>,
    errors: Vec<String>,
    message: String,
    user_id: UserId,
    article_id: ArticleId,
    users: Vec<User>,
    articles: Vec<Article>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CommentForm {
    #[validate(length(min = 1, message = "Message can't be blank"))]
    pub message: String,
    pub user_id: UserId,
    pub article_id: ArticleId,
}

/// Form posts from plain HTML carry the real verb in a `_method` field, the
/// fields themselves are optional so a delete post parses too.
#[derive(Debug, Deserialize)]
pub struct OverrideForm {
    #[serde(rename = "_method")]
    method: Option<String>,
    message: Option<String>,
    user_id: Option<UserId>,
    article_id: Option<ArticleId>,
}

fn error_messages(errors: &validator::ValidationErrors) -> Vec<String> {
    errors
        .field_errors()
        .values()
        .flat_map(|field| field.iter())
        .filter_map(|err| err.message.as_ref().map(|msg| msg.to_string()))
        .collect()
}

// GET /comments
pub async fn index(
    _auth: AuthUser,
    session: Session,
    State(pool): State<SqlitePool>,
) -> AppResult<Response> {
    let flash = flash::take(&session).await?;
    let comments = db::get_comments(&pool).await?;
    Ok(IndexTemplate { flash, comments }.into_response())
}

// GET /comments/:id
pub async fn show(
    _auth: AuthUser,
    session: Session,
    State(pool): State<SqlitePool>,
    Path(comment_id): Path<CommentId>,
) -> AppResult<Response> {
    let Some(comment) = db::get_comment(&pool, comment_id).await? else {
        flash::set(&session, NOT_FOUND_NOTICE).await?;
        return Ok(Redirect::to("/comments").into_response());
    };

    let flash = flash::take(&session).await?;
    Ok(ShowTemplate { flash, comment }.into_response())
}

// GET /comments/new
pub async fn new(
    _auth: AuthUser,
    session: Session,
    State(pool): State<SqlitePool>,
) -> AppResult<Response> {
    let flash = flash::take(&session).await?;
    Ok(FormTemplate {
        flash,
        heading: "New Comment",
        submit: "Create Comment",
        action: "/comments".to_string(),
        method_override: None,
        errors: Vec::new(),
        message: String::new(),
        user_id: 0,
        article_id: 0,
        users: db::get_users(&pool).await?,
        articles: db::get_articles(&pool).await?,
    }
    .into_response())
}

// POST /comments
pub async fn create(
    _auth: AuthUser,
    session: Session,
    State(pool): State<SqlitePool>,
    Form(form): Form<CommentForm>,
) -> AppResult<Response> {
    if let Err(errors) = form.validate() {
        let template = FormTemplate {
            flash: None,
            heading: "New Comment",
            submit: "Create Comment",
            action: "/comments".to_string(),
            method_override: None,
            errors: error_messages(&errors),
            message: form.message,
            user_id: form.user_id,
            article_id: form.article_id,
            users: db::get_users(&pool).await?,
            articles: db::get_articles(&pool).await?,
        };
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, template).into_response());
    }

    let comment = db::create_comment(&pool, &form.message, form.user_id, form.article_id).await?;
    flash::set(&session, "Comment was successfully created.").await?;
    Ok(Redirect::to(&format!("/comments/{}", comment.id)).into_response())
}

// GET /comments/:id/edit
pub async fn edit(
    _auth: AuthUser,
    session: Session,
    State(pool): State<SqlitePool>,
    Path(comment_id): Path<CommentId>,
) -> AppResult<Response> {
    let Some(comment) = db::get_comment(&pool, comment_id).await? else {
        flash::set(&session, NOT_FOUND_NOTICE).await?;
        return Ok(Redirect::to("/comments").into_response());
    };

    let flash = flash::take(&session).await?;
    Ok(FormTemplate {
        flash,
        heading: "Editing Comment",
        submit: "Update Comment",
        action: format!("/comments/{}", comment.id),
        method_override: Some("patch"),
        errors: Vec::new(),
        message: comment.message,
        user_id: comment.user_id,
        article_id: comment.article_id,
        users: db::get_users(&pool).await?,
        articles: db::get_articles(&pool).await?,
    }
    .into_response())
}

// PATCH /comments/:id
pub async fn update(
    auth: AuthUser,
    session: Session,
    State(pool): State<SqlitePool>,
    Path(comment_id): Path<CommentId>,
    Form(form): Form<CommentForm>,
) -> AppResult<Response> {
    apply_update(auth, session, pool, comment_id, form).await
}

// DELETE /comments/:id
pub async fn destroy(
    auth: AuthUser,
    session: Session,
    State(pool): State<SqlitePool>,
    Path(comment_id): Path<CommentId>,
) -> AppResult<Response> {
    apply_destroy(auth, session, pool, comment_id).await
}

// POST /comments/:id
pub async fn update_or_destroy(
    auth: AuthUser,
    session: Session,
    State(pool): State<SqlitePool>,
    Path(comment_id): Path<CommentId>,
    Form(form): Form<OverrideForm>,
) -> AppResult<Response> {
    match form.method.as_deref() {
        Some("delete") => apply_destroy(auth, session, pool, comment_id).await,
        _ => {
            let form = CommentForm {
                message: form.message.unwrap_or_default(),
                user_id: form.user_id.unwrap_or_default(),
                article_id: form.article_id.unwrap_or_default(),
            };
            apply_update(auth, session, pool, comment_id, form).await
        }
    }
}

async fn apply_update(
    _auth: AuthUser,
    session: Session,
    pool: SqlitePool,
    comment_id: CommentId,
    form: CommentForm,
) -> AppResult<Response> {
    if let Err(errors) = form.validate() {
        let template = FormTemplate {
            flash: None,
            heading: "Editing Comment",
            submit: "Update Comment",
            action: format!("/comments/{comment_id}"),
            method_override: Some("patch"),
            errors: error_messages(&errors),
            message: form.message,
            user_id: form.user_id,
            article_id: form.article_id,
            users: db::get_users(&pool).await?,
            articles: db::get_articles(&pool).await?,
        };
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, template).into_response());
    }

    let user_id = (form.user_id > 0).then_some(form.user_id);
    let article_id = (form.article_id > 0).then_some(form.article_id);
    let touched = db::update_comment(&pool, comment_id, &form.message, user_id, article_id).await?;

    if touched == 0 {
        flash::set(&session, NOT_FOUND_NOTICE).await?;
        return Ok(Redirect::to("/comments").into_response());
    }

    flash::set(&session, "Comment was successfully updated.").await?;
    Ok(Redirect::to(&format!("/comments/{comment_id}")).into_response())
}

async fn apply_destroy(
    _auth: AuthUser,
    session: Session,
    pool: SqlitePool,
    comment_id: CommentId,
) -> AppResult<Response> {
    let deleted = db::delete_comment(&pool, comment_id).await?;

    if deleted == 0 {
        flash::set(&session, NOT_FOUND_NOTICE).await?;
    } else {
        flash::set(&session, "Comment was successfully destroyed.").await?;
    }

    Ok(Redirect::to("/comments").into_response())
}
