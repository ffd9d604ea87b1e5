//! `pantry-auth` — identity boundary.
//!
//! Account creation and sign-in are delegated to an [`IdentityProvider`];
//! this crate only checks the sign-up form locally and keeps track of which
//! sessions are currently signed in. It is decoupled from HTTP and storage.

pub mod authenticator;
pub mod error;
pub mod forms;
pub mod provider;
pub mod session;

pub use authenticator::Authenticator;
pub use error::{AuthError, ProviderError};
pub use forms::{Credentials, SignUp};
pub use provider::IdentityProvider;
pub use session::{SessionRegistry, UserSession, DEFAULT_SESSION_SECS};
