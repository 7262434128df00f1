//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! The cookie session is the board's identity provider: it stores the
//! acting user's id and username after register or login, and handlers turn
//! it back into an [`Author`].

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::ports::UserAccounts;
use crate::domain::{Author, BoardError, Error, HexId};

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const USERNAME_KEY: &str = "username";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Store the authenticated author in the session cookie.
    pub fn persist_author(&self, author: &Author) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USER_ID_KEY, author.id.as_str())
            .and_then(|()| self.0.insert(USERNAME_KEY, &author.username))
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the author from the session, if present and well-formed.
    pub fn author(&self) -> Result<Option<Author>, Error> {
        let read = |key: &str| {
            self.0
                .get::<String>(key)
                .map_err(|error| Error::internal(format!("failed to read session: {error}")))
        };
        let (Some(raw_id), Some(username)) = (read(USER_ID_KEY)?, read(USERNAME_KEY)?) else {
            return Ok(None);
        };
        match HexId::new(raw_id) {
            Ok(id) => Ok(Some(Author::new(id, username))),
            Err(error) => {
                warn!(%error, "invalid user id in session cookie");
                Ok(None)
            }
        }
    }

    /// Require an authenticated author or fail with `401 Unauthorized`.
    pub fn require_author(&self) -> Result<Author, Error> {
        self.author()?.ok_or_else(|| {
            BoardError::Unauthorized {
                message: "no active session".to_owned(),
            }
            .into()
        })
    }

    /// Require a session whose user still exists in `accounts`.
    ///
    /// A cookie naming an unknown user is treated like no session at all.
    /// The returned author comes from the account store.
    pub async fn require_user(&self, accounts: &dyn UserAccounts) -> Result<Author, Error> {
        let session_author = self.require_author()?;
        match accounts.user_by_id(&session_author.id).await {
            Ok(author) => Ok(author),
            Err(BoardError::UserNotFoundById { id }) => {
                warn!(user_id = %id, "session names an unknown user");
                Err(BoardError::Unauthorized {
                    message: format!("unknown session user {id}"),
                }
                .into())
            }
            Err(error) => Err(error.into()),
        }
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
