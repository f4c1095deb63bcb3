//! [`Command`] for analyzing a room photo.

use std::{convert::Infallible, fmt, time::Duration};

use smart_default::SmartDefault;
use tokio::time;
use tracing as log;

use crate::{
    domain::{estimate, Analysis},
    infra::{
        vision::{Describe, Image},
        Vision,
    },
    Service,
};

use super::Command;

/// [`Command`] for analyzing a room photo.
///
/// Never fails: whenever the [`Vision`] model can't describe the photo in
/// time, the [`Analysis::fallback()`] is returned.
#[derive(Clone, Debug)]
pub struct AnalyzeRoom {
    /// Photo of the room to analyze.
    pub image: Image,

    /// Name of the flooring material the customer is interested in, if any.
    pub material: Option<String>,
}

/// [`AnalyzeRoom`] configuration.
#[derive(Clone, Copy, Debug, SmartDefault)]
pub struct Config {
    /// Maximum time to wait for the [`Vision`] model to describe a photo.
    #[default(Duration::from_secs(30))]
    pub timeout: Duration,
}

impl<Db, Ai> Command<AnalyzeRoom> for Service<Db, Ai>
where
    Ai: Vision<Describe, Ok = String, Err: fmt::Display>,
{
    type Ok = Analysis;
    type Err = Infallible;

    async fn execute(&self, cmd: AnalyzeRoom) -> Result<Self::Ok, Self::Err> {
        let AnalyzeRoom { image, material } = cmd;

        let timeout = self.config().analysis.timeout;
        let described = time::timeout(
            timeout,
            self.vision().execute(Describe { image, material }),
        )
        .await;
        let text = match described {
            Ok(Ok(text)) => Some(text),
            Ok(Err(e)) => {
                log::error!("failed to describe room photo: {e}");
                None
            }
            Err(_) => {
                log::warn!(?timeout, "room photo description timed out");
                None
            }
        };

        Ok(estimate::ingest(text.as_deref()))
    }
}
