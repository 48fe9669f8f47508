//! HTTP-level building blocks shared by the authority and application clients.
//!
//! Functions here take an explicit `reqwest::Client` and URL, hold no state and
//! never decide about sessions; `crate::auth` and `crate::client` do that.

mod cas;
mod payload;
mod request;

pub use cas::{create_service_ticket, create_ticket_granting_ticket, validate_service_ticket};
pub use payload::{FileAttachment, coerce_form_value, form_fields, multipart_form};
pub use request::{
    ACCEPT_VALUE, default_headers, read_json, send_request, stream_to_file, user_agent,
};
