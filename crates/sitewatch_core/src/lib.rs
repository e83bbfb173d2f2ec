//! Sitewatch core: site records, content normalization and the pure check state machine.
mod fingerprint;
mod normalize;
mod site;
mod update;
mod validate;

pub use fingerprint::{fingerprint, FINGERPRINT_HEX_LEN};
pub use normalize::{normalize, VOLATILE_FIELD_NAMES};
pub use site::{MonitoredSite, SiteId, SitePatch, SiteStatus};
pub use update::{plan_check_update, CheckOutcome};
pub use validate::{validate_new_site, NewSite, ValidationError};
