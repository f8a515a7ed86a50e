//! Local and push notifications.
//!
//! One [`NotificationService`] is built at start-up and shared by `Arc`
//! with whatever needs to notify. Delivered notifications come out of the
//! receiver returned by [`NotificationService::new`].

mod service;

pub use service::{LocalNotification, NotificationService, Permission, Platform, PushRegistration};
