//! Notification service.

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use std::io::IsTerminal;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::{RwLock, mpsc};
use tracing::{error, info, warn};
use uuid::Uuid;

/// Delivery path for notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Platform {
    /// Browser-style: nothing is shown without granted permission.
    Web,
    /// Device scheduling. Push registration needs a physical device.
    Native { physical_device: bool },
    /// No delivery path.
    Other(String),
}

impl Platform {
    /// Resolve the configured platform name. `auto` and `native` select the
    /// native path, on a physical device when stdout is a terminal.
    pub fn detect(setting: &str) -> Self {
        match setting.trim().to_ascii_lowercase().as_str() {
            "web" => Self::Web,
            "auto" | "native" => Self::Native {
                physical_device: std::io::stdout().is_terminal(),
            },
            other => Self::Other(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Web => "web",
            Self::Native { .. } => "native",
            Self::Other(name) => name,
        }
    }
}

/// Notification permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Permission {
    #[default]
    Undetermined,
    Granted,
    Denied,
}

/// Outcome of push registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushRegistration {
    /// Web path: whether permission was granted.
    Permission(bool),
    /// Native path: the device push token.
    Token(String),
}

/// A notification handed to the delivery channel.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalNotification {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub data: serde_json::Value,
    pub sent_at: DateTime<Utc>,
}

/// Requests permission, registers for push, and sends local notifications.
#[derive(Debug)]
pub struct NotificationService {
    platform: Platform,
    permission: RwLock<Permission>,
    /// The user's preference. Answers permission requests.
    allowed: AtomicBool,
    delivery_tx: mpsc::UnboundedSender<LocalNotification>,
}

impl NotificationService {
    /// Create the service and the receiver delivered notifications arrive on.
    pub fn new(
        platform: Platform,
        allowed: bool,
    ) -> (Self, mpsc::UnboundedReceiver<LocalNotification>) {
        let (delivery_tx, delivery_rx) = mpsc::unbounded_channel();
        let service = Self {
            platform,
            permission: RwLock::new(Permission::Undetermined),
            allowed: AtomicBool::new(allowed),
            delivery_tx,
        };
        (service, delivery_rx)
    }

    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    pub async fn permission(&self) -> Permission {
        *self.permission.read().await
    }

    /// Ask for permission. An undetermined permission is settled by the
    /// user's preference; a settled one is returned as is.
    pub async fn request_permission(&self) -> Permission {
        let mut permission = self.permission.write().await;
        if *permission == Permission::Undetermined {
            *permission = if self.allowed.load(Ordering::Relaxed) {
                Permission::Granted
            } else {
                Permission::Denied
            };
            info!(permission = ?*permission, "Notification permission settled");
        }
        *permission
    }

    /// Apply the user's preference. Disabling denies permission; enabling
    /// makes it undetermined so the next request grants it.
    pub async fn set_enabled(&self, enabled: bool) {
        self.allowed.store(enabled, Ordering::Relaxed);
        *self.permission.write().await = if enabled {
            Permission::Undetermined
        } else {
            Permission::Denied
        };
    }

    /// Apply the user's preference, then register again if it was turned on.
    /// The registration only starts once the new preference is in place.
    pub async fn update_preference(&self, enabled: bool) -> Option<PushRegistration> {
        self.set_enabled(enabled).await;
        if !enabled {
            return None;
        }
        self.register_for_push_notifications().await
    }

    /// Register for push notifications. Failures are logged and yield `None`.
    pub async fn register_for_push_notifications(&self) -> Option<PushRegistration> {
        match &self.platform {
            Platform::Web => {
                let granted = self.request_permission().await == Permission::Granted;
                Some(PushRegistration::Permission(granted))
            }
            Platform::Native {
                physical_device: false,
            } => {
                warn!("Push notifications require a physical device");
                None
            }
            Platform::Native { .. } => {
                if self.request_permission().await != Permission::Granted {
                    warn!("Failed to get push token: permission not granted");
                    return None;
                }
                let token = format!("spreadedge-push-{}", Uuid::new_v4());
                info!(%token, "Registered for push notifications");
                Some(PushRegistration::Token(token))
            }
            Platform::Other(name) => {
                warn!(platform = %name, "Push notifications are not supported");
                None
            }
        }
    }

    /// Send a notification immediately.
    pub async fn send_local_notification(
        &self,
        title: &str,
        body: &str,
        data: Option<serde_json::Value>,
    ) -> Result<()> {
        let result = match &self.platform {
            Platform::Web if self.permission().await != Permission::Granted => {
                Err(Error::PermissionDenied)
            }
            Platform::Web | Platform::Native { .. } => self.deliver(LocalNotification {
                id: Uuid::new_v4(),
                title: title.to_string(),
                body: body.to_string(),
                data: data.unwrap_or(serde_json::Value::Null),
                sent_at: Utc::now(),
            }),
            Platform::Other(name) => Err(Error::PlatformUnsupported(name.clone())),
        };

        if let Err(e) = &result {
            error!(error = %e, title, "Failed to send local notification");
        }
        result
    }

    fn deliver(&self, notification: LocalNotification) -> Result<()> {
        self.delivery_tx
            .send(notification)
            .map_err(|e| Error::channel(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_web_without_permission_is_denied() {
        let (service, mut rx) = NotificationService::new(Platform::Web, true);

        let err = service
            .send_local_notification("Test", "body", None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::PermissionDenied));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_web_after_grant_delivers() {
        let (service, mut rx) = NotificationService::new(Platform::Web, true);
        assert_eq!(
            service.register_for_push_notifications().await,
            Some(PushRegistration::Permission(true))
        );

        service
            .send_local_notification("Test", "body", Some(serde_json::json!({"k": 1})))
            .await
            .unwrap();
        let delivered = rx.recv().await.unwrap();
        assert_eq!(delivered.title, "Test");
        assert_eq!(delivered.data["k"], 1);
    }

    #[tokio::test]
    async fn test_unsupported_platform() {
        let (service, _rx) = NotificationService::new(Platform::detect("windows-phone"), true);
        let err = service
            .send_local_notification("t", "b", None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::PlatformUnsupported(ref p) if p == "windows-phone"));
        assert_eq!(service.register_for_push_notifications().await, None);
    }

    #[tokio::test]
    async fn test_native_token_needs_device_and_permission() {
        let (emulator, _rx) = NotificationService::new(
            Platform::Native {
                physical_device: false,
            },
            true,
        );
        assert_eq!(emulator.register_for_push_notifications().await, None);

        let (device, _rx) = NotificationService::new(
            Platform::Native {
                physical_device: true,
            },
            false,
        );
        assert_eq!(device.register_for_push_notifications().await, None);

        device.set_enabled(true).await;
        match device.register_for_push_notifications().await {
            Some(PushRegistration::Token(token)) => {
                assert!(token.starts_with("spreadedge-push-"))
            }
            other => panic!("expected a token, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_reenabling_registers_after_denial() {
        let (service, _rx) = NotificationService::new(Platform::Web, false);
        assert_eq!(
            service.register_for_push_notifications().await,
            Some(PushRegistration::Permission(false))
        );

        assert_eq!(
            service.update_preference(true).await,
            Some(PushRegistration::Permission(true))
        );
        assert_eq!(service.permission().await, Permission::Granted);

        assert_eq!(service.update_preference(false).await, None);
        assert_eq!(service.permission().await, Permission::Denied);
    }

    #[tokio::test]
    async fn test_disabling_denies_permission() {
        let (service, _rx) = NotificationService::new(Platform::Web, true);
        assert_eq!(service.request_permission().await, Permission::Granted);

        service.set_enabled(false).await;
        assert_eq!(service.permission().await, Permission::Denied);
        assert_eq!(service.request_permission().await, Permission::Denied);
    }
}
