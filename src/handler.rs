//! Lunch command handler
//!
//! Each lunch question runs one fresh invocation:
//! `Idle -> WeatherCheckPending -> DineOutSearchPending | DeliverySearchPending -> Replied | Failed`.
//! Nothing carries over between invocations, and the first failure ends the
//! invocation with [`ERROR_MESSAGE`].

use tracing::{debug, info, instrument, warn};

use crate::chat::IncomingMessage;
use crate::config::LunchConfig;
use crate::delivery::DeliveryClient;
use crate::dine_out::DineOutClient;
use crate::format::{ERROR_MESSAGE, Suggestion};
use crate::http::HttpGet;
use crate::selector::pick;
use crate::trigger::is_lunch_question;
use crate::weather::{WeatherGate, WeatherVerdict};
use crate::{LunchError, Result};

/// Where an invocation is in the suggestion flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerState {
    Idle,
    WeatherCheckPending,
    DineOutSearchPending,
    DeliverySearchPending,
    Replied,
    Failed,
}

/// Text sent back to the chat, with the path the invocation took
#[derive(Debug, Clone)]
pub struct Reply {
    pub content: String,
    pub state: HandlerState,
    pub trail: Vec<HandlerState>,
}

/// State of a single invocation
#[derive(Debug)]
struct Invocation {
    trail: Vec<HandlerState>,
}

impl Invocation {
    fn new() -> Self {
        Self {
            trail: vec![HandlerState::Idle],
        }
    }

    fn enter(&mut self, state: HandlerState) {
        debug!(?state, "Entering state");
        self.trail.push(state);
    }

    fn finish(mut self, state: HandlerState, content: String) -> Reply {
        self.enter(state);
        Reply {
            content,
            state,
            trail: self.trail,
        }
    }
}

/// Answers lunch questions with a restaurant suggestion
pub struct LunchHandler<H> {
    http: H,
    config: LunchConfig,
}

impl<H: HttpGet> LunchHandler<H> {
    pub fn new(http: H, config: LunchConfig) -> Self {
        Self { http, config }
    }

    /// Reply to `message`, or `None` when it is not a lunch question
    #[instrument(skip(self, message), fields(user = %message.user))]
    pub async fn handle(&self, message: &IncomingMessage) -> Option<Reply> {
        if !is_lunch_question(&message.content) {
            return None;
        }

        info!("Heard a lunch question");
        let mut invocation = Invocation::new();
        let reply = match self.run(&mut invocation).await {
            Ok(suggestion) => invocation.finish(HandlerState::Replied, suggestion.to_string()),
            Err(err) => {
                warn!(error = %err, detail = %err.user_message(), "Lunch suggestion failed");
                invocation.finish(HandlerState::Failed, ERROR_MESSAGE.to_string())
            }
        };
        Some(reply)
    }

    /// Run the suggestion flow without a chat message
    pub async fn suggest(&self) -> Result<Suggestion> {
        self.run(&mut Invocation::new()).await
    }

    async fn run(&self, invocation: &mut Invocation) -> Result<Suggestion> {
        let center = self.config.location.center();
        let mode = self.config.selection.mode;

        invocation.enter(HandlerState::WeatherCheckPending);
        let verdict = WeatherGate::new(&self.http, &self.config.weather)
            .check(&center)
            .await?;

        match verdict {
            WeatherVerdict::Good => {
                invocation.enter(HandlerState::DineOutSearchPending);
                let candidates = DineOutClient::new(&self.http, &self.config.dine_out)
                    .nearby(&center, self.config.dine_out.walking_distance_meters)
                    .await?;
                let restaurant = pick(&candidates, mode, &mut rand::rng())
                    .cloned()
                    .ok_or_else(|| LunchError::no_candidates("Nothing to pick from"))?;
                Ok(Suggestion::DineOut(restaurant))
            }
            WeatherVerdict::Bad => {
                invocation.enter(HandlerState::DeliverySearchPending);
                let candidates = DeliveryClient::new(&self.http, &self.config.delivery)
                    .search(&center)
                    .await?;
                let restaurant = pick(&candidates, mode, &mut rand::rng())
                    .cloned()
                    .ok_or_else(|| LunchError::no_candidates("Nothing to pick from"))?;
                Ok(Suggestion::Delivery(restaurant))
            }
        }
    }
}
