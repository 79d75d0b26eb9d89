//! Profile → adapter selection
//!
//! The only place that branches on profile identity. Everything downstream
//! talks to the returned [`IntegrationAdapter`].

use crate::claude::ClaudeAdapter;
use crate::integration::IntegrationAdapter;
use crate::profile::IntegrationProfile;
use crate::simple::SimpleAdapter;

/// Get the adapter for a profile.
pub fn adapter_for(profile: IntegrationProfile) -> Box<dyn IntegrationAdapter> {
    match profile {
        IntegrationProfile::Cursor | IntegrationProfile::Trae => Box::new(SimpleAdapter::new(profile)),
        IntegrationProfile::ClaudeCode => Box::new(ClaudeAdapter::new()),
    }
}
