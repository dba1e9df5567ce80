// SPDX-License-Identifier: MPL-2.0
//! Toast notifications: severity-colored cards stacked bottom-right,
//! auto-dismissed on a timer except for errors.

pub mod manager;
pub mod notification;
pub mod toast;

pub use manager::{Manager, Message as NotificationMessage};
pub use notification::{Notification, NotificationId, Severity};
pub use toast::Toast;
