// Shared response types for the gateway.
//
// - `Envelope` is the `{"message": ...}` wrapper every handler returns.
// - `render::render_object` turns a received JSON value into the text echoed back by POST /.
use serde::Serialize;
use serde_json::{Map, Value};

pub mod render;

/// Fixed message returned by `GET /`.
pub const GET_MESSAGE: &str = "This is Get Request from python backend";

/// Prefix of the message returned by `POST /`; the rendered body follows it.
pub const POST_MESSAGE_PREFIX: &str = "This is Post Request from python backend and here is response ";

/// The JSON wrapper used for all successful responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Envelope {
    pub message: String,
}

impl Envelope {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }

    /// Envelope for `GET /`.
    pub fn get() -> Self {
        Self::new(GET_MESSAGE)
    }

    /// Envelope for `POST /`, embedding the literal form of `item`.
    pub fn echo(item: &Map<String, Value>) -> Self {
        Self::new(format!("{}{}", POST_MESSAGE_PREFIX, render::render_object(item)))
    }
}
