//! Operation handlers

use async_trait::async_trait;
use serde_json::Value;

use super::{HttpMethod, Operation, Payload};
use crate::error::ApiError;
use crate::store::UserStore;

pub mod reserved;
pub mod user;

pub use reserved::ReservedHandler;
pub use user::UserHandler;

/// What a handler hands back to the dispatcher: a result to render (possibly
/// none) or a failure to turn into an error envelope
pub type HandlerResult = Result<Option<Value>, ApiError>;

/// Behavior behind one [`Operation`]
#[async_trait]
pub trait OperationHandler: Send + Sync {
    /// The operation this handler serves
    fn operation(&self) -> Operation;

    async fn handle(
        &self,
        method: &HttpMethod,
        payload: &Payload,
        store: &dyn UserStore,
    ) -> HandlerResult;

    fn description(&self) -> &str;
}

static USER: UserHandler = UserHandler;
static SETTINGS: ReservedHandler = ReservedHandler::new(Operation::Settings);
static NONCOMPLIANCES: ReservedHandler = ReservedHandler::new(Operation::Noncompliances);
static NONCOMPLIANCE: ReservedHandler = ReservedHandler::new(Operation::Noncompliance);
static TICKETS: ReservedHandler = ReservedHandler::new(Operation::Tickets);
static TICKET: ReservedHandler = ReservedHandler::new(Operation::Ticket);

/// Dispatch table. Adding an [`Operation`] variant fails to compile until it
/// gets a slot here.
pub fn handler_for(operation: Operation) -> &'static dyn OperationHandler {
    match operation {
        Operation::User => &USER,
        Operation::Settings => &SETTINGS,
        Operation::Noncompliances => &NONCOMPLIANCES,
        Operation::Noncompliance => &NONCOMPLIANCE,
        Operation::Tickets => &TICKETS,
        Operation::Ticket => &TICKET,
    }
}
