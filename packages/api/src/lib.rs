//! # API crate: typed client for the ZenVit backend
//!
//! Everything the front-end knows about the backend lives here, independent of
//! any UI framework so it can be unit-tested natively.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`transport`] | `Transport` trait, request/response values, reqwest implementation |
//! | [`error`] | `ApiError` and the backend `detail` message parser |
//! | [`client`] | `ApiClient`: auth, CRUD, status changes, search, dashboard, uploads, AI |
//! | [`session`] | `SessionStore`: token lifecycle with a stale-restore guard |
//! | [`resource`] | Generic list/form/delete page state shared by every entity screen, stock corrections |
//! | [`models`] | Wire structs for every backend record |
//! | [`upload`] | Image type and size checks |

pub mod client;
pub mod error;
pub mod models;
pub mod resource;
pub mod session;
pub mod transport;
pub mod upload;

pub use client::{ApiClient, MIN_AI_CONTEXT_CHARS};
pub use error::ApiError;
pub use models::*;
pub use resource::{
    AdjustmentError, AdjustmentForm, DraftError, FieldKind, FieldSpec, FormDraft, FormMode,
    FormState, LineDraft, LineItemsDraft, LineItemsError, LinePricing, Lookup, Notice, Record,
    RefOption, References, ResourceKind, ResourcePage, ResourceSchema, StockAdjustmentDraft,
    SubmitRequest, SubmitTicket,
};
pub use session::{RestoreTicket, RouteAccess, Session, SessionPhase, SessionStore};
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
pub use upload::{ImageUpload, IMAGE_ACCEPT};

/// The transport and storage the running app uses.
pub type AppSession<S> = SessionStore<S, ReqwestTransport>;
