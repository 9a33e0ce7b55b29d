//! Detail screen state: one record fetched per visit, with terminal
//! not-found and failure states instead of an endless spinner.

use tracing::{debug, warn};

use crate::client::ApiError;
use crate::domain::{RestaurantDetail, RestaurantId};
use crate::navigation::{ListContext, Route};
use crate::sequence::{RequestSequence, RequestToken};

#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Loading,
    Loaded(Box<RestaurantDetail>),
    NotFound,
    Failed(String),
}

impl DetailState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, DetailState::Loading)
    }
}

/// A detail fetch the caller must execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailTicket {
    pub token: RequestToken,
    pub id: RestaurantId,
}

#[derive(Debug)]
pub struct DetailController {
    id: RestaurantId,
    context: ListContext,
    state: DetailState,
    sequence: RequestSequence,
}

impl DetailController {
    /// Mount on a route target. Returns the controller and its first fetch.
    pub fn mount(id: RestaurantId, context: ListContext) -> (Self, DetailTicket) {
        let mut controller = Self {
            id,
            context,
            state: DetailState::Loading,
            sequence: RequestSequence::new(),
        };
        let ticket = controller.issue();
        (controller, ticket)
    }

    pub fn id(&self) -> RestaurantId {
        self.id
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    fn issue(&mut self) -> DetailTicket {
        self.state = DetailState::Loading;
        let token = self.sequence.issue();
        debug!(%token, id = %self.id, "fetching restaurant detail");
        DetailTicket { token, id: self.id }
    }

    /// Switch to another record. Same id issues nothing.
    pub fn set_id(&mut self, id: RestaurantId) -> Option<DetailTicket> {
        if id == self.id {
            return None;
        }
        self.id = id;
        Some(self.issue())
    }

    pub fn retry(&mut self) -> DetailTicket {
        self.issue()
    }

    /// Apply a fetch outcome if it belongs to the latest ticket.
    pub fn apply(
        &mut self,
        token: RequestToken,
        outcome: Result<RestaurantDetail, ApiError>,
    ) -> bool {
        if !self.sequence.is_current(token) {
            debug!(%token, "dropping superseded detail response");
            return false;
        }
        self.state = match outcome {
            Ok(detail) => DetailState::Loaded(Box::new(detail)),
            Err(ApiError::NotFound { id }) => {
                warn!(%id, "restaurant not found");
                DetailState::NotFound
            }
            Err(e) => {
                warn!(id = %self.id, error = %e, "detail fetch failed");
                DetailState::Failed(e.to_string())
            }
        };
        true
    }

    /// Leave the detail screen, handing the list its context back unchanged.
    pub fn back(self) -> Route {
        Route::Detail {
            id: self.id,
            context: self.context,
        }
        .back()
    }
}
