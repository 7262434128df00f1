//! Registration and login handlers.
//!
//! ```text
//! POST /api/register {"username":"alice","password":"secret"}
//! POST /api/login    {"username":"alice","password":"secret"}
//! ```
//!
//! Both establish a session cookie and respond with the author view
//! `{"id": "...", "username": "..."}`.

use actix_web::{HttpResponse, post, web};

use crate::domain::validation::schemas;
use crate::domain::{Credentials, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_fields, take_field, validate_body};

fn credentials_from_body(state: &HttpState, body: &[u8]) -> Result<Credentials, Error> {
    let mut fields = parse_fields(body)?;
    validate_body(&state.validator, schemas::CREDENTIAL, &fields)?;
    let username = take_field(&mut fields, "username");
    let password = take_field(&mut fields, "password");
    Credentials::try_from_parts(&username, &password)
        .map_err(|error| Error::internal(format!("validated credentials rejected: {error}")))
}

/// Create an account and sign it in.
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    session: SessionContext,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let credentials = credentials_from_body(&state, &body)?;
    let author = state.accounts.register(credentials).await?;
    session.persist_author(&author)?;
    Ok(HttpResponse::Created().json(author))
}

/// Sign in with an existing account.
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let credentials = credentials_from_body(&state, &body)?;
    let author = state.accounts.login(credentials).await?;
    session.persist_author(&author)?;
    Ok(HttpResponse::Ok().json(author))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{memory_state, test_session_middleware};
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;
    use serde_json::{Value, json};

    macro_rules! users_app {
        () => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(memory_state()))
                    .wrap(test_session_middleware())
                    .service(register)
                    .service(login),
            )
            .await
        };
    }

    fn credentials(username: &str, password: &str) -> Value {
        json!({ "username": username, "password": password })
    }

    #[actix_web::test]
    async fn register_then_login_returns_same_author() {
        let app = users_app!();

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/register")
                .set_json(credentials("alice", "pw"))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        assert!(res.response().cookies().any(|c| c.name() == "session"));
        let registered: Value = test::read_body_json(res).await;
        assert_eq!(registered["username"], "alice");
        assert_eq!(registered["id"].as_str().map(str::len), Some(24));

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/login")
                .set_json(credentials("alice", "pw"))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let logged_in: Value = test::read_body_json(res).await;
        assert_eq!(logged_in, registered);
    }

    #[actix_web::test]
    async fn duplicate_registration_reports_username() {
        let app = users_app!();
        for expected in [StatusCode::CREATED, StatusCode::UNPROCESSABLE_ENTITY] {
            let res = test::call_service(
                &app,
                test::TestRequest::post()
                    .uri("/register")
                    .set_json(credentials("alice", "pw"))
                    .to_request(),
            )
            .await;
            assert_eq!(res.status(), expected);
            if expected == StatusCode::UNPROCESSABLE_ENTITY {
                let body: Value = test::read_body_json(res).await;
                let item = &body["details"]["errors"][0];
                assert_eq!(item["location"], "body");
                assert_eq!(item["param"], "username");
                assert_eq!(item["value"], "alice");
                assert_eq!(item["message"], "already exists");
            }
        }
    }

    #[actix_web::test]
    async fn wrong_password_is_unauthorised() {
        let app = users_app!();
        test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/register")
                .set_json(credentials("alice", "pw"))
                .to_request(),
        )
        .await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/login")
                .set_json(credentials("alice", "other"))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["message"], "wrong credential");
    }

    #[rstest]
    #[case(json!({ "username": "", "password": "pw" }), vec!["username"])]
    #[case(json!({ "password": "pw" }), vec!["username"])]
    #[case(json!({}), vec!["username", "password"])]
    #[actix_web::test]
    async fn invalid_credentials_list_every_failure(
        #[case] body: Value,
        #[case] expected: Vec<&str>,
    ) {
        let app = users_app!();
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/register")
                .set_json(body)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = test::read_body_json(res).await;
        let mut params: Vec<String> = body["details"]["errors"]
            .as_array()
            .expect("errors array")
            .iter()
            .filter_map(|item| item["param"].as_str().map(str::to_owned))
            .collect();
        params.sort();
        let mut expected: Vec<String> = expected.into_iter().map(str::to_owned).collect();
        expected.sort();
        assert_eq!(params, expected);
    }

    #[actix_web::test]
    async fn malformed_body_is_bad_request() {
        let app = users_app!();
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/login")
                .insert_header(("content-type", "application/json"))
                .set_payload("{not json")
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
