// CrowdSec Monitor - View Models
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Presentation state for every screen.
//!
//! Each view-model owns an [`Observable`](crate::state::Observable) holding a
//! [`LoadingState`](crate::state::LoadingState). Operations take `&mut self`,
//! so one view-model never runs two fetches at once.

mod alert_details;
mod alerts_list;
mod create_decision;
mod dashboard;
mod decision_details;
mod decisions_list;
mod onboarding;
pub mod paging;
mod ranking;
mod server_status;
mod session;

pub use alert_details::AlertDetailsViewModel;
pub use alerts_list::AlertsListViewModel;
pub use create_decision::{CreateDecisionForm, FormError, SubmitError};
pub use dashboard::DashboardViewModel;
pub use decision_details::DecisionDetailsViewModel;
pub use decisions_list::DecisionsListViewModel;
pub use onboarding::{AuthKind, OnboardingError, OnboardingForm};
pub use ranking::{Ranking, RankingViewModel};
pub use server_status::ServerStatusViewModel;
pub use session::Session;
