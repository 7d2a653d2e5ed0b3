//! API seam traits and the repo-scoped octocrab client.
//!
//! The traits define how this crate talks to GitHub without naming the
//! concrete client, which enables:
//! - Mock implementations for testing
//! - Logging/tracing wrappers
//!
//! `OctocrabClient` is the production implementation, wrapping an `Octocrab`
//! instance scoped to a specific repository so call sites don't repeat
//! owner/repo pairs.

use std::future::Future;

use octocrab::Octocrab;

use crate::types::{
    InstallationId, InstallationToken, MergeableState, PrNumber, PrSnapshot, RepoId, Sha,
};

use super::error::ApiFailure;

/// Fetches pull request snapshots.
///
/// # Example (mock for testing)
///
/// ```ignore
/// struct FixedSource(PrSnapshot);
///
/// impl PullRequestSource for FixedSource {
///     async fn fetch_pull_request(&self, _pr: PrNumber) -> Result<PrSnapshot, ApiFailure> {
///         Ok(self.0.clone())
///     }
/// }
/// ```
pub trait PullRequestSource {
    /// Fetches the current state of a pull request.
    fn fetch_pull_request(
        &self,
        pr: PrNumber,
    ) -> impl Future<Output = Result<PrSnapshot, ApiFailure>> + Send;
}

/// Resolves App installations and mints installation tokens.
///
/// Implementations authenticate as a GitHub App (not as an installation);
/// both operations run under App JWT credentials.
pub trait AppInstallationApi {
    /// Finds the installation ID for the App on the given repository.
    ///
    /// A repository without the App installed surfaces as an
    /// [`ApiFailure::Status`] with status 404; callers translate that into
    /// their own terms.
    fn find_installation(
        &self,
        repo: &RepoId,
    ) -> impl Future<Output = Result<InstallationId, ApiFailure>> + Send;

    /// Creates an access token scoped to exactly the given repository.
    fn create_scoped_token(
        &self,
        installation: InstallationId,
        repo: &RepoId,
    ) -> impl Future<Output = Result<InstallationToken, ApiFailure>> + Send;
}

/// A GitHub API client scoped to a specific repository.
///
/// All operations performed through this client target the same repository.
#[derive(Clone)]
pub struct OctocrabClient {
    /// The underlying octocrab client.
    client: Octocrab,

    /// The repository this client is scoped to.
    repo: RepoId,
}

impl OctocrabClient {
    /// Creates a new client scoped to the given repository.
    pub fn new(client: Octocrab, repo: RepoId) -> Self {
        Self { client, repo }
    }

    /// Creates a client from a GitHub token.
    ///
    /// This is a convenience method for creating a client with token
    /// authentication, e.g. from an installation token minted by
    /// [`GitHubApp`](super::GitHubApp).
    pub fn from_token(token: impl Into<String>, repo: RepoId) -> Result<Self, ApiFailure> {
        let client = Octocrab::builder()
            .personal_token(token.into())
            .build()
            .map_err(ApiFailure::from_octocrab)?;
        Ok(Self::new(client, repo))
    }

    /// Returns a reference to the underlying octocrab client.
    pub fn inner(&self) -> &Octocrab {
        &self.client
    }

    /// Returns the repository this client is scoped to.
    pub fn repo(&self) -> &RepoId {
        &self.repo
    }

    /// Returns the repository owner.
    pub fn owner(&self) -> &str {
        &self.repo.owner
    }

    /// Returns the repository name.
    pub fn repo_name(&self) -> &str {
        &self.repo.repo
    }
}

impl std::fmt::Debug for OctocrabClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OctocrabClient")
            .field("repo", &self.repo)
            .finish_non_exhaustive()
    }
}

impl PullRequestSource for OctocrabClient {
    async fn fetch_pull_request(&self, pr: PrNumber) -> Result<PrSnapshot, ApiFailure> {
        let pull = self
            .client
            .pulls(self.owner(), self.repo_name())
            .get(pr.0)
            .await
            .map_err(ApiFailure::from_octocrab)?;

        Ok(PrSnapshot {
            number: pr,
            head_sha: Sha::new(pull.head.sha),
            head_ref: pull.head.ref_field,
            base_ref: pull.base.ref_field,
            mergeable: pull.mergeable,
            mergeable_state: pull.mergeable_state.map(mergeable_state_from_api),
        })
    }
}

fn mergeable_state_from_api(state: octocrab::models::pulls::MergeableState) -> MergeableState {
    use octocrab::models::pulls::MergeableState as Api;
    match state {
        Api::Clean => MergeableState::Clean,
        Api::Unstable => MergeableState::Unstable,
        Api::Blocked => MergeableState::Blocked,
        Api::Behind => MergeableState::Behind,
        Api::Dirty => MergeableState::Dirty,
        Api::Unknown => MergeableState::Unknown,
        Api::Draft => MergeableState::Draft,
        Api::HasHooks => MergeableState::HasHooks,
        // The upstream enum is non-exhaustive; treat new values as unsettled.
        _ => MergeableState::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mergeable_state_mapping_covers_known_values() {
        use octocrab::models::pulls::MergeableState as Api;
        assert_eq!(mergeable_state_from_api(Api::Clean), MergeableState::Clean);
        assert_eq!(mergeable_state_from_api(Api::Dirty), MergeableState::Dirty);
        assert_eq!(
            mergeable_state_from_api(Api::HasHooks),
            MergeableState::HasHooks
        );
        assert_eq!(
            mergeable_state_from_api(Api::Unknown),
            MergeableState::Unknown
        );
    }

    #[tokio::test]
    async fn debug_output_names_the_repo_only() {
        let repo = RepoId::new("octo", "widgets");
        // Construction without credentials is fine; no request is issued.
        let client = OctocrabClient::new(Octocrab::default(), repo);
        let rendered = format!("{:?}", client);
        assert!(rendered.contains("octo"));
        assert!(rendered.contains("widgets"));
    }
}
