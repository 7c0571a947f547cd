//! The signed-in user.
//!
//! Authentication itself (sign-up, password login, token refresh) belongs to an
//! external provider. The library only needs to know who is signed in, which is all a
//! [`User`] carries.

use super::*;

/// Identity of the signed-in user, as handed over by the auth provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
  /// Stable user id, used in endpoint paths and local storage keys
  pub uid:          String,
  /// Chosen display name
  pub display_name: Option<String>,
  /// Account email
  pub email:        Option<String>,
}

impl User {
  /// A user known only by id.
  pub fn new(uid: impl Into<String>) -> Self {
    Self { uid: uid.into(), display_name: None, email: None }
  }

  /// Sets the display name.
  pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
    self.display_name = Some(name.into());
    self
  }

  /// Sets the email.
  pub fn with_email(mut self, email: impl Into<String>) -> Self {
    self.email = Some(email.into());
    self
  }

  /// Name credited on uploads: display name, then email, then `Anonymous`.
  pub fn author_name(&self) -> String {
    self
      .display_name
      .clone()
      .filter(|n| !n.is_empty())
      .or_else(|| self.email.clone().filter(|e| !e.is_empty()))
      .unwrap_or_else(|| "Anonymous".to_string())
  }
}
