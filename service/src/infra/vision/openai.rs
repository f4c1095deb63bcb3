//! [OpenAI] chat completions [`Vision`] implementation.
//!
//! [OpenAI]: https://platform.openai.com/docs/api-reference/chat

use std::{sync::Arc, time::Duration};

use secrecy::{ExposeSecret as _, SecretString};
use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;
use tracerr::Traced;
use tracing as log;

use super::{Describe, Error, Vision};

/// [`OpenAi`] configuration.
#[derive(Debug, SmartDefault)]
pub struct Config {
    /// API key to authorize requests with.
    ///
    /// Every request fails with [`Error::MissingApiKey`] if absent.
    pub api_key: Option<SecretString>,

    /// URL of the chat completions endpoint.
    #[default("https://api.openai.com/v1/chat/completions".to_owned())]
    pub endpoint: String,

    /// Name of the model to describe photos with.
    #[default("gpt-4o".to_owned())]
    pub model: String,

    /// Maximum number of tokens the model may respond with.
    #[default(500)]
    pub max_tokens: u32,

    /// Timeout of a single HTTP request.
    #[default(Duration::from_secs(30))]
    pub timeout: Duration,
}

impl Config {
    /// Environment variable conventionally holding the [OpenAI] API key.
    ///
    /// [OpenAI]: https://openai.com
    pub const API_KEY_VAR: &'static str = "OPENAI_API_KEY";
}

/// [`Vision`] model served by [OpenAI].
///
/// [OpenAI]: https://openai.com
#[derive(Clone, Debug)]
pub struct OpenAi {
    /// HTTP client to perform requests with.
    client: reqwest::Client,

    /// Configuration of this [`OpenAi`] model.
    config: Arc<Config>,
}

impl OpenAi {
    /// Creates a new [`OpenAi`] model with the provided [`Config`].
    ///
    /// # Errors
    ///
    /// If failed to build an HTTP client.
    pub fn new(config: Config) -> Result<Self, Traced<Error>> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(Error::Client)
            .map_err(tracerr::wrap!())?;
        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }
}

impl Vision<Describe> for OpenAi {
    type Ok = String;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Describe { image, material }: Describe,
    ) -> Result<Self::Ok, Self::Err> {
        let api_key = self
            .config
            .api_key
            .as_ref()
            .ok_or(Error::MissingApiKey)
            .map_err(tracerr::wrap!())?;

        let text = prompt(material.as_deref());
        let request = Request {
            model: &self.config.model,
            messages: [Message {
                role: "user",
                content: [
                    Content::Text { text: &text },
                    Content::ImageUrl {
                        image_url: ImageUrl {
                            url: image.as_ref(),
                        },
                    },
                ],
            }],
            max_tokens: self.config.max_tokens,
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        log::debug!(?image, model = %self.config.model, "describing room");

        let resp = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(Error::Request)
            .map_err(tracerr::wrap!())?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(tracerr::new!(Error::Status {
                status: status.as_u16(),
                body,
            }));
        }

        let Response { choices } = resp
            .json()
            .await
            .map_err(Error::Request)
            .map_err(tracerr::wrap!())?;
        let content = choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(Error::EmptyResponse)
            .map_err(tracerr::wrap!())?;

        log::debug!(%content, "room described");

        Ok(content)
    }
}

/// Builds the instruction text asking to estimate a room, mentioning the
/// provided `material` in the notes request, if any.
fn prompt(material: Option<&str>) -> String {
    let hint = material
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(|m| format!(" relevant to installing {m} flooring"))
        .unwrap_or_default();
    format!(
        "You are a professional flooring expert analyzing a room photo. \
         Analyze this image and respond with ONLY a JSON object \
         (no markdown, no code blocks, just the raw JSON).\n\
         \n\
         Provide:\n\
         - roomType: What type of room is this? (Living Room, Bedroom, \
           Kitchen, Bathroom, Dining Room, Office, Hallway, etc.)\n\
         - estimatedLength: Estimated room length in feet (number only)\n\
         - estimatedWidth: Estimated room width in feet (number only)\n\
         - currentFloorType: Current flooring type (Hardwood, Carpet, Tile, \
           Laminate, Concrete, Vinyl, etc.)\n\
         - condition: Floor condition as \"good\", \"fair\", or \"poor\"\n\
         - notes: Brief observations about the room{hint}\n\
         \n\
         Response format (JSON only, no other text):\n\
         {{\"roomType\":\"string\",\"estimatedLength\":number,\
         \"estimatedWidth\":number,\"currentFloorType\":\"string\",\
         \"condition\":\"good\"|\"fair\"|\"poor\",\"notes\":\"string\"}}",
    )
}

/// Chat completion request body.
#[derive(Debug, Serialize)]
struct Request<'a> {
    model: &'a str,
    messages: [Message<'a>; 1],
    max_tokens: u32,
    response_format: ResponseFormat,
}

/// Chat message of a [`Request`].
#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: [Content<'a>; 2],
}

/// Part of a [`Message`] content.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Content<'a> {
    Text { text: &'a str },
    ImageUrl { image_url: ImageUrl<'a> },
}

/// Image of a [`Content::ImageUrl`] part.
#[derive(Debug, Serialize)]
struct ImageUrl<'a> {
    url: &'a str,
}

/// Format the model is asked to respond in.
#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

/// Chat completion response body.
#[derive(Debug, Deserialize)]
struct Response {
    #[serde(default)]
    choices: Vec<Choice>,
}

/// Completion choice of a [`Response`].
#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

/// Message of a [`Choice`].
#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}
