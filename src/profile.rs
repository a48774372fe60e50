use serde::{Deserialize, Serialize};

/// Trimmed GitHub profile stored in the favorites list.
///
/// Field names on the wire match the GitHub users API so stored blobs
/// stay compatible with the upstream response shape.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ProfileSummary {
    /// GitHub login, unique within the favorites
    pub login: String,
    /// Display name, `null` upstream for accounts without one
    #[serde(rename = "name")]
    pub display_name: Option<String>,
    /// Number of public repositories
    #[serde(rename = "public_repos")]
    pub public_repo_count: u64,
    /// Number of followers
    #[serde(rename = "followers")]
    pub follower_count: u64,
}

impl ProfileSummary {
    /// Name to show in the table, falling back to the login
    pub fn shown_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.login)
    }

    pub fn html_url(&self) -> String {
        format!("https://github.com/{}", self.login)
    }

    pub fn avatar_url(&self) -> String {
        format!("https://github.com/{}.png", self.login)
    }
}

/// Raw `/users/{username}` response, restricted to the fields we keep.
///
/// Every other field of the upstream payload is dropped during deserialization.
#[derive(Deserialize, Debug)]
pub(crate) struct UserResponse {
    login: String,
    name: Option<String>,
    public_repos: u64,
    followers: u64,
}

impl From<UserResponse> for ProfileSummary {
    fn from(raw: UserResponse) -> Self {
        ProfileSummary {
            login: raw.login,
            display_name: raw.name,
            public_repo_count: raw.public_repos,
            follower_count: raw.followers,
        }
    }
}
