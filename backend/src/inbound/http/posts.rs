//! Posts API handlers.
//!
//! ```text
//! GET    /api/posts/                        all posts
//! GET    /api/posts/{category}              posts in a category
//! GET    /api/user/{username}               posts by an author
//! GET    /api/post/{post_id}                one post, counting a view
//! POST   /api/posts                         create (session required)
//! DELETE /api/post/{post_id}                delete own post
//! POST   /api/post/{post_id}                comment {"comment": "..."}
//! DELETE /api/post/{post_id}/{comment_id}   delete own comment
//! GET    /api/post/{post_id}/upvote|downvote|unvote
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use serde_json::json;

use crate::domain::validation::schemas;
use crate::domain::{Category, Error, NewPost, Post, PostContent, PostKind};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    ensure_valid, hex_id_after_validation, parse_fields, path_hex_id, take_field, validate_body,
};

/// List every post.
#[get("/posts/")]
pub async fn all_posts(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Post>>> {
    Ok(web::Json(state.posts_query.all_posts().await?))
}

/// List posts in one category.
#[get("/posts/{category}")]
pub async fn posts_by_category(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<Post>>> {
    let raw = path.into_inner();
    ensure_valid(state.validator.validate_path_value(schemas::CATEGORY, &raw))?;
    let category: Category = raw
        .parse()
        .map_err(|error| Error::internal(format!("validated category rejected: {error}")))?;
    Ok(web::Json(
        state.posts_query.posts_by_category(category).await?,
    ))
}

/// List posts written by one user.
#[get("/user/{username}")]
pub async fn posts_by_author(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<Post>>> {
    let username = path.into_inner();
    ensure_valid(state.validator.validate_path_value(schemas::USERNAME, &username))?;
    Ok(web::Json(
        state.posts_query.posts_by_author(&username).await?,
    ))
}

/// Read one post. Each call counts as a view.
#[get("/post/{post_id}")]
pub async fn get_post(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Post>> {
    let post_id = path_hex_id(&state.validator, schemas::POST_ID, &path)?;
    Ok(web::Json(state.posts_query.post_by_id(&post_id).await?))
}

/// Create a text or link post.
///
/// The common fields are checked first; the text or url field is checked
/// only once the type is known to be valid.
#[post("/posts")]
pub async fn create_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user(state.accounts.as_ref()).await?;
    let mut fields = parse_fields(&body)?;
    validate_body(&state.validator, schemas::POST_INPUT, &fields)?;

    let kind: PostKind = take_field(&mut fields, "type")
        .parse()
        .map_err(|error| Error::internal(format!("validated post type rejected: {error}")))?;
    let content_schema = match kind {
        PostKind::Text => schemas::TEXT_POST_INPUT,
        PostKind::Link => schemas::URL_POST_INPUT,
    };
    validate_body(&state.validator, content_schema, &fields)?;

    let category: Category = take_field(&mut fields, "category")
        .parse()
        .map_err(|error| Error::internal(format!("validated category rejected: {error}")))?;
    let content = match kind {
        PostKind::Text => PostContent::Text {
            text: take_field(&mut fields, "text"),
        },
        PostKind::Link => PostContent::Link {
            url: take_field(&mut fields, "url"),
        },
    };
    let input = NewPost {
        category,
        title: take_field(&mut fields, "title"),
        content,
    };

    let post = state.posts.create_post(input, &actor).await?;
    Ok(HttpResponse::Created().json(post))
}

/// Delete a post owned by the caller.
#[delete("/post/{post_id}")]
pub async fn delete_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user(state.accounts.as_ref()).await?;
    let post_id = path_hex_id(&state.validator, schemas::POST_ID, &path)?;
    state.posts.delete_post(&post_id, &actor).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "success" })))
}

/// Comment on a post.
#[post("/post/{post_id}")]
pub async fn add_comment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user(state.accounts.as_ref()).await?;
    let post_id = path_hex_id(&state.validator, schemas::POST_ID, &path)?;
    let mut fields = parse_fields(&body)?;
    validate_body(&state.validator, schemas::COMMENT, &fields)?;

    let post = state
        .posts
        .add_comment(&post_id, take_field(&mut fields, "comment"), &actor)
        .await?;
    Ok(HttpResponse::Created().json(post))
}

/// Delete a comment owned by the caller.
///
/// Both path identifiers are validated before either failure is reported.
#[delete("/post/{post_id}/{comment_id}")]
pub async fn delete_comment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<(String, String)>,
) -> ApiResult<web::Json<Post>> {
    let actor = session.require_user(state.accounts.as_ref()).await?;
    let (raw_post_id, raw_comment_id) = path.into_inner();
    let mut errors = state
        .validator
        .validate_path_value(schemas::POST_ID, &raw_post_id);
    errors.extend(
        state
            .validator
            .validate_path_value(schemas::COMMENT_ID, &raw_comment_id),
    );
    ensure_valid(errors)?;

    let post_id = hex_id_after_validation(&raw_post_id)?;
    let comment_id = hex_id_after_validation(&raw_comment_id)?;
    Ok(web::Json(
        state
            .posts
            .delete_comment(&post_id, &comment_id, &actor)
            .await?,
    ))
}

/// Up-vote a post.
#[get("/post/{post_id}/upvote")]
pub async fn upvote(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Post>> {
    let actor = session.require_user(state.accounts.as_ref()).await?;
    let post_id = path_hex_id(&state.validator, schemas::POST_ID, &path)?;
    Ok(web::Json(state.posts.upvote(&post_id, &actor).await?))
}

/// Down-vote a post.
#[get("/post/{post_id}/downvote")]
pub async fn downvote(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Post>> {
    let actor = session.require_user(state.accounts.as_ref()).await?;
    let post_id = path_hex_id(&state.validator, schemas::POST_ID, &path)?;
    Ok(web::Json(state.posts.downvote(&post_id, &actor).await?))
}

/// Withdraw the caller's vote.
#[get("/post/{post_id}/unvote")]
pub async fn unvote(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Post>> {
    let actor = session.require_user(state.accounts.as_ref()).await?;
    let post_id = path_hex_id(&state.validator, schemas::POST_ID, &path)?;
    Ok(web::Json(state.posts.unvote(&post_id, &actor).await?))
}

#[cfg(test)]
#[path = "posts_tests.rs"]
mod tests;
