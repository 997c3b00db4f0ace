// ABOUTME: Authentication gate and identity provider seam for the FitTrack client
// ABOUTME: Tracks initializing/unauthenticated/authenticated state and exposes login/logout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Auth Gate
//!
//! The identity provider is an external collaborator: it issues identities and
//! handles the actual login ceremony. This module only consumes it through the
//! [`IdentityProvider`] trait and tracks the three gate states a display layer
//! needs: still initializing (show a loading indicator, no protected content),
//! unauthenticated (show the login prompt), and authenticated (render protected
//! content).
//!
//! An anonymous identity counts as unauthenticated, exactly like having no
//! identity at all. Flushing cached query results on logout is the
//! responsibility of [`crate::queries::QueryClient::logout`], which owns both
//! the gate and the cache.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::errors::AppResult;
use crate::models::Principal;

/// A resolved caller identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    principal: Principal,
}

impl Identity {
    /// Wrap a principal into an identity
    #[must_use]
    pub fn new(principal: Principal) -> Self {
        Self { principal }
    }

    /// The stable textual principal for this identity
    #[must_use]
    pub fn principal(&self) -> &Principal {
        &self.principal
    }

    /// Whether this is the anonymous placeholder identity
    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.principal.is_anonymous()
    }
}

/// External identity provider contract.
///
/// Implementations own identity issuance; the client only calls these three
/// operations. `login` may stay pending indefinitely (no client-side timeout).
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Run the login ceremony and return the resulting identity
    async fn login(&self) -> AppResult<Identity>;

    /// Discard any held identity
    async fn clear(&self) -> AppResult<()>;

    /// The currently held identity, if the provider has resolved one
    async fn current(&self) -> Option<Identity>;
}

/// Gate state as seen by the display layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    /// Identity provider has not resolved yet; render a loading indicator
    Initializing,
    /// No identity, or an anonymous one; render the login prompt
    Unauthenticated,
    /// Render protected content
    Authenticated(Identity),
}

impl AuthState {
    /// Whether protected content may be rendered and protected queries may run
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}

/// Stateful guard in front of all protected views and queries
pub struct AuthGate {
    provider: Arc<dyn IdentityProvider>,
    state: RwLock<AuthState>,
}

impl AuthGate {
    /// Create a gate in the `Initializing` state
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        Self {
            provider,
            state: RwLock::new(AuthState::Initializing),
        }
    }

    /// Current gate state
    pub async fn state(&self) -> AuthState {
        self.state.read().await.clone()
    }

    /// Principal of the authenticated caller, if any
    pub async fn principal(&self) -> Option<Principal> {
        match &*self.state.read().await {
            AuthState::Authenticated(identity) => Some(identity.principal().clone()),
            AuthState::Initializing | AuthState::Unauthenticated => None,
        }
    }

    /// Resolve the initial state from the provider.
    ///
    /// Leaves `Initializing` for either `Unauthenticated` or `Authenticated`
    /// depending on what the provider already holds. Idempotent.
    pub async fn resolve(&self) -> AuthState {
        let resolved = match self.provider.current().await {
            Some(identity) if !identity.is_anonymous() => AuthState::Authenticated(identity),
            _ => AuthState::Unauthenticated,
        };
        let mut state = self.state.write().await;
        *state = resolved.clone();
        debug!(state = ?resolved_label(&resolved), "auth gate resolved");
        resolved
    }

    /// Run the provider's login ceremony and transition to `Authenticated`.
    ///
    /// A provider returning an anonymous identity leaves the gate
    /// unauthenticated; anonymous never unlocks protected content.
    pub async fn login(&self) -> AppResult<AuthState> {
        let identity = self.provider.login().await?;
        let next = if identity.is_anonymous() {
            AuthState::Unauthenticated
        } else {
            info!(principal = %identity.principal(), "login succeeded");
            AuthState::Authenticated(identity)
        };
        let mut state = self.state.write().await;
        *state = next.clone();
        Ok(next)
    }

    /// Clear the provider identity and transition to `Unauthenticated`.
    ///
    /// Callers must flush session-scoped caches alongside this; use
    /// [`crate::queries::QueryClient::logout`] rather than calling this
    /// directly.
    pub async fn logout(&self) -> AppResult<()> {
        self.provider.clear().await?;
        let mut state = self.state.write().await;
        *state = AuthState::Unauthenticated;
        info!("logged out");
        Ok(())
    }
}

fn resolved_label(state: &AuthState) -> &'static str {
    match state {
        AuthState::Initializing => "initializing",
        AuthState::Unauthenticated => "unauthenticated",
        AuthState::Authenticated(_) => "authenticated",
    }
}
