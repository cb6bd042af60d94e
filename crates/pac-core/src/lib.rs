//! Tenant PAC Generation Core
//!
//! Everything needed to turn one generic proxy auto-configuration script
//! into a per-tenant, optionally session-pinned instance, and nothing
//! about transporting it. Pure functions over immutable inputs: no I/O,
//! no shared mutable state, every operation O(template) or O(rules).
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      Specialization                          │
//! │                                                              │
//! │  template ──► ScriptTemplate::parse ──► Specializer          │
//! │                 (3 slots, each           │                   │
//! │                  exactly once)           │ tenant, pin,      │
//! │                                          │ variant, host     │
//! │                                          ▼                   │
//! │                                   specialized script         │
//! └──────────────────────────────────────────────────────────────┘
//!
//! The emitted script classifies each outbound URL client-side with the
//! same rule lists `RuleSet` evaluates server-side:
//!     host substring match ─► DIRECT
//!     static extension     ─► DIRECT
//!     otherwise            ─► PROXY <identity>.<endpoint>:8080
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod rules;
pub mod session;
pub mod template;
pub mod tenant;

pub use error::{PacError, PacResult};
pub use rules::{proxy_directive, RouteDecision, RuleSet};
pub use session::SessionPin;
pub use template::{EndpointVariant, Endpoints, ScriptTemplate, Specializer};
pub use tenant::TenantId;
