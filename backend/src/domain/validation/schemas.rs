//! Schemas and path rules used by the board's HTTP endpoints.

use super::{BodySchema, FieldSpec, Rule, Validator};
use crate::domain::{Category, PostKind, is_valid_hex_id};

/// Registration and login body.
pub const CREDENTIAL: &str = "Credential";
/// Fields common to every new post.
pub const POST_INPUT: &str = "PostInput";
/// Extra fields of a text post.
pub const TEXT_POST_INPUT: &str = "TextPostInput";
/// Extra fields of a link post.
pub const URL_POST_INPUT: &str = "URLPostInput";
/// New comment body.
pub const COMMENT: &str = "Comment";

pub const USER_ID: &str = "user_id";
pub const POST_ID: &str = "post_id";
pub const COMMENT_ID: &str = "comment_id";
pub const CATEGORY: &str = "category";
pub const USERNAME: &str = "username";

const CATEGORY_MESSAGE: &str = "category must has specific type";

fn category_rule() -> Rule {
    Rule::new(CATEGORY_MESSAGE, |value| value.parse::<Category>().is_ok())
}

fn hex_id_rule(param: &str) -> Rule {
    Rule::new(
        format!("{param} must be a hexadecimal 24-symbols string"),
        is_valid_hex_id,
    )
}

fn non_empty(field: &str) -> FieldSpec {
    FieldSpec::required(field).rule(Rule::non_empty(format!(
        "{field} must be a non-empty string"
    )))
}

/// Build the registry shared by every request handler.
pub fn board_validator() -> Validator {
    Validator::builder()
        .register_body_schema(
            POST_INPUT,
            BodySchema::new()
                .field(FieldSpec::required("category").rule(category_rule()))
                .field(non_empty("title"))
                .field(FieldSpec::required("type").rule(Rule::new(
                    "type must be a text or a link",
                    |value| value.parse::<PostKind>().is_ok(),
                ))),
        )
        .register_body_schema(TEXT_POST_INPUT, BodySchema::new().field(non_empty("text")))
        .register_body_schema(URL_POST_INPUT, BodySchema::new().field(non_empty("url")))
        .register_body_schema(
            CREDENTIAL,
            BodySchema::new()
                .field(non_empty("username"))
                .field(non_empty("password")),
        )
        .register_body_schema(COMMENT, BodySchema::new().field(non_empty("comment")))
        .register_path_rule(USER_ID, vec![hex_id_rule(USER_ID)])
        .register_path_rule(POST_ID, vec![hex_id_rule(POST_ID)])
        .register_path_rule(COMMENT_ID, vec![hex_id_rule(COMMENT_ID)])
        .register_path_rule(CATEGORY, vec![category_rule()])
        .register_path_rule(
            USERNAME,
            vec![Rule::non_empty("username must be a non-empty string")],
        )
        .build()
}
