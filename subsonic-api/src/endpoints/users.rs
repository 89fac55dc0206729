//! User management API.
//!
//! Endpoints: `getUser`, `getUsers`, `createUser`, `updateUser`,
//! `deleteUser`, `changePassword`
//!
//! All but `getUser` (for oneself) and `changePassword` (for oneself)
//! require an admin account.

use crate::client::SubsonicClient;
use crate::error::Result;
use crate::params::Params;
use crate::types::User;

/// Optional account fields shared by `createUser` and `updateUser`.
fn role_params(user: &User, params: Params) -> Params {
    params
        .opt("email", user.email.as_deref())
        .opt("adminRole", user.admin_role)
        .opt("settingsRole", user.settings_role)
        .opt("streamRole", user.stream_role)
        .opt("jukeboxRole", user.jukebox_role)
        .opt("downloadRole", user.download_role)
        .opt("uploadRole", user.upload_role)
        .opt("playlistRole", user.playlist_role)
        .opt("coverArtRole", user.cover_art_role)
        .opt("commentRole", user.comment_role)
        .opt("podcastRole", user.podcast_role)
        .opt("shareRole", user.share_role)
        .opt("videoConversionRole", user.video_conversion_role)
        .list("musicFolderId", user.folders.iter().flatten())
}

impl SubsonicClient {
    pub fn get_user(&self, username: &str) -> Result<User> {
        self.fetch("getUser", &Params::new().set("username", username), "user")
    }

    pub fn get_users(&self) -> Result<Vec<User>> {
        self.fetch_list("getUsers", &Params::new(), "users", "user")
    }

    /// Create an account from the fields set on `user`.
    pub fn create_user(&self, user: &User, password: &str) -> Result<()> {
        let params = Params::new()
            .set("username", &user.username)
            .set("password", password);
        self.call("createUser", &role_params(user, params))
    }

    /// Update an account. Unset fields keep their server-side value.
    pub fn update_user(&self, user: &User) -> Result<()> {
        let params = Params::new().set("username", &user.username);
        let params = role_params(user, params).opt("maxBitRate", user.max_bit_rate);
        self.call("updateUser", &params)
    }

    pub fn delete_user(&self, username: &str) -> Result<()> {
        self.call("deleteUser", &Params::new().set("username", username))
    }

    pub fn change_password(&self, username: &str, password: &str) -> Result<()> {
        let params = Params::new()
            .set("username", username)
            .set("password", password);
        self.call("changePassword", &params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_set_roles_are_sent() {
        let user = User {
            username: "bob".into(),
            stream_role: Some(true),
            admin_role: Some(false),
            folders: Some(vec!["1".into(), "2".into()]),
            ..User::default()
        };
        let params = role_params(&user, Params::new());
        assert_eq!(params.get("streamRole"), Some("true"));
        assert_eq!(params.get("adminRole"), Some("false"));
        assert_eq!(params.get("jukeboxRole"), None);
        let folders: Vec<_> = params
            .pairs()
            .iter()
            .filter(|(k, _)| k == "musicFolderId")
            .map(|(_, v)| v.as_str())
            .collect();
        assert_eq!(folders, ["1", "2"]);
    }
}
