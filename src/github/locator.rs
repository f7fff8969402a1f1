//! Identity wrappers for the comment target.

use std::fmt;

use crate::error::ReportError;

/// Repository owner wrapper to avoid stringly typed parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryOwner(String);

impl RepositoryOwner {
    pub(crate) fn new(value: &str) -> Result<Self, ReportError> {
        if value.is_empty() {
            return Err(ReportError::InvalidRepository {
                value: value.to_owned(),
            });
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the owner value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Repository name wrapper to prevent parameter mix-ups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryName(String);

impl RepositoryName {
    pub(crate) fn new(value: &str) -> Result<Self, ReportError> {
        if value.is_empty() {
            return Err(ReportError::InvalidRepository {
                value: value.to_owned(),
            });
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the repository name.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Repository identifier in `owner/repo` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositorySlug {
    owner: RepositoryOwner,
    repository: RepositoryName,
}

impl RepositorySlug {
    /// Parses an `owner/repo` identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::InvalidRepository`] when the value is not two
    /// non-empty segments separated by a single slash.
    pub fn parse(value: &str) -> Result<Self, ReportError> {
        let mut segments = value.splitn(2, '/');
        let owner_segment = segments.next().unwrap_or_default();
        let repository_segment = segments.next().unwrap_or_default();

        if repository_segment.contains('/') {
            return Err(ReportError::InvalidRepository {
                value: value.to_owned(),
            });
        }

        let owner = RepositoryOwner::new(owner_segment)?;
        let repository = RepositoryName::new(repository_segment)?;
        Ok(Self { owner, repository })
    }

    /// Repository owner.
    #[must_use]
    pub const fn owner(&self) -> &RepositoryOwner {
        &self.owner
    }

    /// Repository name.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryName {
        &self.repository
    }
}

/// Pull request number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PullRequestNumber(u64);

impl PullRequestNumber {
    /// Coerces a raw string into a pull request number.
    ///
    /// This is the strict coercion used by the comment step: a value that
    /// reaches it but is not a positive integer is a fatal error.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::InvalidPullRequestNumber`] when the value is
    /// not a positive integer.
    pub fn parse(value: &str) -> Result<Self, ReportError> {
        value
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|number| *number > 0)
            .map(Self)
            .ok_or_else(|| ReportError::InvalidPullRequestNumber {
                value: value.to_owned(),
            })
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Personal access token wrapper enforcing presence.
///
/// The `Debug` implementation redacts the value so the token cannot leak
/// through logging.
#[derive(Clone, PartialEq, Eq)]
pub struct PersonalAccessToken(String);

impl PersonalAccessToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::MissingToken`] when the supplied string is
    /// blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, ReportError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ReportError::MissingToken);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PersonalAccessToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

impl fmt::Debug for PersonalAccessToken {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("PersonalAccessToken([REDACTED])")
    }
}

/// Fully validated comment destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentTarget {
    slug: RepositorySlug,
    number: PullRequestNumber,
}

impl CommentTarget {
    /// Creates a target from a validated slug and number.
    #[must_use]
    pub const fn new(slug: RepositorySlug, number: PullRequestNumber) -> Self {
        Self { slug, number }
    }

    /// Repository identifier.
    #[must_use]
    pub const fn slug(&self) -> &RepositorySlug {
        &self.slug
    }

    /// Pull request number.
    #[must_use]
    pub const fn number(&self) -> PullRequestNumber {
        self.number
    }

    pub(crate) fn comments_path(&self) -> String {
        format!(
            "/repos/{}/{}/issues/{}/comments",
            self.slug.owner().as_str(),
            self.slug.repository().as_str(),
            self.number.get()
        )
    }
}
