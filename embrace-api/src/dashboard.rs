//! Concurrent dashboard loading with per-view cancellation.
//!
//! A dashboard render needs five resources at once; they are fetched
//! concurrently and joined all-or-nothing, so a view either gets a complete
//! [`DashboardData`] or the first error. Each load runs under a [`ViewLoad`]
//! guard: dropping the guard (navigating away) aborts the in-flight join and
//! the stale result is never delivered.

use std::future::Future;

use futures::future::{AbortHandle, AbortRegistration, Abortable};
use tracing::debug;

use embrace_core::DashboardData;

use crate::{ApiError, Gateway};

/// Cancellation guard for one view load. Aborts the paired future either
/// explicitly via [`ViewLoad::abort`] or implicitly on drop.
#[derive(Debug)]
pub struct ViewLoad {
    handle: AbortHandle,
}

impl ViewLoad {
    /// A guard plus the registration to run the load under; see
    /// [`abortable`].
    pub fn new() -> (Self, AbortRegistration) {
        let (handle, registration) = AbortHandle::new_pair();
        (Self { handle }, registration)
    }

    pub fn abort(&self) {
        self.handle.abort();
    }

    pub fn is_aborted(&self) -> bool {
        self.handle.is_aborted()
    }
}

impl Drop for ViewLoad {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Run any client future under a view's abort registration; an aborted
/// future resolves to [`ApiError::Aborted`] and its result is discarded.
pub async fn abortable<F, T>(future: F, registration: AbortRegistration) -> Result<T, ApiError>
where
    F: Future<Output = Result<T, ApiError>>,
{
    match Abortable::new(future, registration).await {
        Ok(result) => result,
        Err(_) => {
            debug!("view load aborted");
            Err(ApiError::Aborted)
        }
    }
}

/// Fetch everything the dashboard derives its metrics from, concurrently.
/// The first failure cancels the remaining fetches.
pub async fn fetch_dashboard(gateway: &Gateway) -> Result<DashboardData, ApiError> {
    let health = gateway.health();
    let insights_api = gateway.insights();
    let diet_api = gateway.diet();
    let lifestyle_api = gateway.lifestyle();
    let symptoms_api = gateway.symptoms();
    let (summary, insights, diet, lifestyle, symptoms) = futures::try_join!(
        health.weekly_summary(),
        insights_api.weekly(),
        diet_api.list(),
        lifestyle_api.list(),
        symptoms_api.list(),
    )?;

    Ok(DashboardData {
        summary,
        insights: insights.insights,
        diet,
        lifestyle,
        symptoms,
    })
}

/// [`fetch_dashboard`] under a view's cancellation registration.
pub async fn load_dashboard(
    gateway: &Gateway,
    registration: AbortRegistration,
) -> Result<DashboardData, ApiError> {
    abortable(fetch_dashboard(gateway), registration).await
}
