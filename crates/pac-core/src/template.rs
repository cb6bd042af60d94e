//! Script template and specializer
//!
//! The template carries exactly three substitutable declaration sites:
//!
//! ```text
//! var tenantId = "...";            <- tenant identity (+ optional pin)
//! var efpEndpoint = "...";         <- proxy endpoint (beta overwrites)
//! var pacFileRequestHost = "...";  <- host the script was served from
//! ```
//!
//! Sites are located once, at parse time, and each must appear exactly
//! once in active (uncommented) form; everything else in the template,
//! commented-out declarations of the same shape included, passes through
//! specialization byte-for-byte. A template violating that is rejected
//! here so the fault surfaces at startup instead of on every request.

use crate::error::{PacError, PacResult};
use crate::session::SessionPin;
use crate::tenant::TenantId;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Which proxy endpoint the specialized script embeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EndpointVariant {
    /// Production endpoint, also the template default
    #[default]
    Stable,
    /// Beta/test endpoint
    Beta,
}

/// Proxy endpoint hostnames, owned by configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Endpoints {
    /// Production endpoint; must equal the template default
    pub stable: String,
    /// Beta/test endpoint
    pub beta: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            stable: "efp.opensase.io".into(),
            beta: "efp-beta.opensase.io".into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlotKind {
    TenantId,
    Endpoint,
    RequestHost,
}

const SLOT_KINDS: [SlotKind; 3] = [SlotKind::TenantId, SlotKind::Endpoint, SlotKind::RequestHost];

impl SlotKind {
    fn var_name(self) -> &'static str {
        match self {
            Self::TenantId => "tenantId",
            Self::Endpoint => "efpEndpoint",
            Self::RequestHost => "pacFileRequestHost",
        }
    }
}

/// One located declaration site
#[derive(Debug, Clone)]
struct Slot {
    kind: SlotKind,
    /// Byte range of the quoted value inside the template text
    value: Range<usize>,
    /// Value the template ships with
    default: String,
}

const BUNDLED: &str = include_str!("../assets/forward.pac");

/// Script template with its substitution slots located
#[derive(Debug, Clone)]
pub struct ScriptTemplate {
    text: String,
    slots: Vec<Slot>,
}

impl ScriptTemplate {
    /// Parse a template, locating each declaration site exactly once.
    pub fn parse(text: &str) -> PacResult<Self> {
        let mut slots = Vec::with_capacity(SLOT_KINDS.len());
        for kind in SLOT_KINDS {
            // Anchored at line start (comment markers before `var` keep a
            // line from matching), value captured between the quotes.
            let pattern = format!(r#"(?m)^\s*var {} = "([^"]*)";"#, kind.var_name());
            let re = Regex::new(&pattern).map_err(|_| PacError::MissingSlot(kind.var_name()))?;

            let matches: Vec<_> = re.captures_iter(text).collect();
            match matches.len() {
                1 => {}
                0 => return Err(PacError::MissingSlot(kind.var_name())),
                count => {
                    return Err(PacError::DuplicateSlot {
                        slot: kind.var_name(),
                        count,
                    })
                }
            }
            let value = matches[0]
                .get(1)
                .ok_or(PacError::MissingSlot(kind.var_name()))?;
            slots.push(Slot {
                kind,
                value: value.range(),
                default: value.as_str().to_owned(),
            });
        }

        Ok(Self {
            text: text.to_owned(),
            slots,
        })
    }

    /// Template shipped with the crate
    pub fn bundled() -> PacResult<Self> {
        Self::parse(BUNDLED)
    }

    /// Endpoint value the template ships with
    pub fn default_endpoint(&self) -> &str {
        self.slot(SlotKind::Endpoint)
    }

    fn slot(&self, kind: SlotKind) -> &str {
        self.slots
            .iter()
            .find(|s| s.kind == kind)
            .map(|s| s.default.as_str())
            // Slots are populated for every kind at parse time.
            .unwrap_or_default()
    }
}

/// Produces specialized script instances from one immutable template.
///
/// Construction checks the coupling the stable path relies on: the
/// endpoint declaration is only overwritten for the beta variant, so the
/// template default has to already equal the configured stable endpoint.
/// Specialization itself is a pure splice with no shared state, safe to
/// call from any number of requests concurrently.
#[derive(Debug, Clone)]
pub struct Specializer {
    template: ScriptTemplate,
    endpoints: Endpoints,
}

impl Specializer {
    /// Bind a parsed template to the configured endpoints.
    pub fn new(template: ScriptTemplate, endpoints: Endpoints) -> PacResult<Self> {
        if template.default_endpoint() != endpoints.stable {
            return Err(PacError::EndpointMismatch {
                found: template.default_endpoint().to_owned(),
                expected: endpoints.stable.clone(),
            });
        }
        Ok(Self {
            template,
            endpoints,
        })
    }

    /// Configured endpoint hostnames
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Produce one specialized script instance.
    ///
    /// Deterministic: identical inputs yield byte-identical output. The
    /// request host is embedded as given, per the transport contract.
    pub fn specialize(
        &self,
        tenant: &TenantId,
        pin: Option<&SessionPin>,
        variant: EndpointVariant,
        request_host: &str,
    ) -> String {
        let identity = match pin {
            Some(pin) => tenant.pinned(pin),
            None => tenant.as_str().to_owned(),
        };

        let mut replacements: Vec<(&Range<usize>, &str)> = Vec::with_capacity(3);
        for slot in &self.template.slots {
            let value = match slot.kind {
                SlotKind::TenantId => identity.as_str(),
                SlotKind::RequestHost => request_host,
                SlotKind::Endpoint => match variant {
                    // The constructor proved the default already equals the
                    // stable endpoint.
                    EndpointVariant::Stable => continue,
                    EndpointVariant::Beta => &self.endpoints.beta,
                },
            };
            replacements.push((&slot.value, value));
        }
        replacements.sort_by_key(|(range, _)| range.start);

        let text = &self.template.text;
        let mut out = String::with_capacity(text.len() + 32);
        let mut cursor = 0;
        for (range, value) in replacements {
            out.push_str(&text[cursor..range.start]);
            out.push_str(value);
            cursor = range.end;
        }
        out.push_str(&text[cursor..]);
        out
    }
}
