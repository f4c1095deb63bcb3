//! [`Vision`] model definitions.

pub mod openai;

use derive_more::{Debug, Display, Error as StdError};

pub use self::openai::OpenAi;

/// Vision model operation.
pub use common::Handler as Vision;

/// [`Vision`] operation describing a room photo with free-form text.
///
/// The text is expected to carry a JSON object with the room estimate, but
/// no guarantees are made about it.
#[derive(Clone, Debug)]
pub struct Describe {
    /// Photo of the room to describe.
    pub image: Image,

    /// Name of the flooring material the customer is interested in, if any.
    pub material: Option<String>,
}

/// Room photo, either as a `data:` URL or as a remote URL.
#[derive(Clone, Debug, Eq, PartialEq)]
#[debug("Image({} bytes)", _0.len())]
pub struct Image(String);

impl Image {
    /// Creates a new [`Image`] if the provided URL is not blank.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Option<Self> {
        let url = url.into();
        (!url.trim().is_empty()).then_some(Self(url))
    }
}

impl AsRef<str> for Image {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// [`Vision`] model error.
#[derive(Debug, Display, StdError)]
pub enum Error {
    /// API key of the model provider is not configured.
    #[display("API key is not configured")]
    MissingApiKey,

    /// HTTP client failed to be built.
    #[display("Failed to build HTTP client: {_0}")]
    Client(reqwest::Error),

    /// Request to the model provider failed.
    #[display("Request failed: {_0}")]
    Request(reqwest::Error),

    /// Model provider responded with a non-success status.
    #[display("Provider responded with `{status}`: {body}")]
    Status {
        /// HTTP status code of the response.
        status: u16,

        /// Body of the response, as is.
        body: String,
    },

    /// Model provider responded without any content.
    #[display("No content in the response")]
    EmptyResponse,
}

#[cfg(test)]
pub(crate) mod canned {
    //! [`Vision`] replying with predefined outcomes.

    use std::future;

    use tracerr::Traced;

    use super::{Describe, Error, Vision};

    /// [`Vision`] replying with a predefined outcome.
    #[derive(Clone, Copy, Debug)]
    pub(crate) enum Canned {
        /// Replies with the provided text.
        Reply(&'static str),

        /// Fails with [`Error::EmptyResponse`].
        Fail,

        /// Never replies.
        Hang,
    }

    impl Vision<Describe> for Canned {
        type Ok = String;
        type Err = Traced<Error>;

        async fn execute(&self, _: Describe) -> Result<Self::Ok, Self::Err> {
            match self {
                Self::Reply(text) => Ok((*text).to_owned()),
                Self::Fail => Err(tracerr::new!(Error::EmptyResponse)),
                Self::Hang => future::pending().await,
            }
        }
    }
}

#[cfg(test)]
mod spec {
    use super::Image;

    #[test]
    fn image_must_not_be_blank() {
        assert!(Image::new("").is_none());
        assert!(Image::new("   ").is_none());
        assert!(Image::new("data:image/png;base64,AAAA").is_some());
    }

    #[test]
    fn image_debug_hides_payload() {
        let image = Image::new("data:image/png;base64,AAAA").unwrap();
        assert_eq!(format!("{image:?}"), "Image(26 bytes)");
    }
}
