// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Funkwerk — Native platform bridge between the host OS and the
// messenger core.
//
// OS-level lifecycle, input, and push-messaging events flow through the
// bridge to the native core as numeric-coded JSON events; native-core
// requests flow back out as OS actions. The platform specifics live
// behind the trait set in `traits`; the state machines (`permissions`,
// `keyboard`) and the router (`push`) are platform-independent.

pub mod event_bridge;
pub mod keyboard;
pub mod permissions;
pub mod phone;
pub mod push;
pub mod traits;

#[cfg(target_os = "android")]
pub mod android;

#[cfg(not(target_os = "android"))]
pub mod stub;

#[cfg(test)]
pub(crate) mod testing;

pub use event_bridge::{CoreSink, EventBridge};
pub use keyboard::{KeyboardMonitor, LayoutFrame};
pub use permissions::{NegotiationState, PermissionNegotiator};
pub use phone::format_phone_number;
pub use push::PushRouter;

/// Retrieve the host implementation for the target operating system.
///
/// Returns a boxed trait object that abstracts away the native SDK
/// details. On non-Android targets this is a stub that degrades every
/// capability, so desktop builds and CI keep working.
pub fn platform_host() -> Box<dyn traits::PlatformHost> {
    #[cfg(target_os = "android")]
    {
        Box::new(android::AndroidHost::new())
    }
    #[cfg(not(target_os = "android"))]
    {
        Box::new(stub::StubHost)
    }
}
