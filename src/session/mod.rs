//! Guest session management.
//!
//! Visitors are anonymous. The first request without a known `guest_uuid`
//! cookie creates a [`Guest`]; later requests carrying the cookie reuse it.
//! Guests live in process memory only and are swept after an idle timeout.
//!
//! # Example
//!
//! ```rust
//! use policy_chat::session::GuestStore;
//!
//! let store = GuestStore::new();
//! let guest = store.resolve(None);
//! guest.record_exchange("월세 지원", "월세 지원 정책은...");
//!
//! assert_eq!(guest.recent_exchanges(3).len(), 1);
//! ```

mod guest;

pub use guest::{DEFAULT_IDLE_TIMEOUT, Exchange, Guest, GuestStore};

/// Cookie carrying the guest identifier.
pub const GUEST_COOKIE: &str = "guest_uuid";
