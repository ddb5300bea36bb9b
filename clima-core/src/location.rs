use async_trait::async_trait;
use std::fmt::Debug;

use crate::config::PinnedLocation;
use crate::error::LocationError;
use crate::model::Position;

/// Source of a one-shot position fix.
///
/// Mirrors the two steps a device location service exposes: a permission
/// request, then a single position query. Either may fail or be denied.
#[async_trait]
pub trait LocationProvider: Send + Sync + Debug {
    async fn request_permission(&self) -> Result<(), LocationError>;

    async fn current_position(&self) -> Result<Position, LocationError>;
}

/// Location provider backed by coordinates pinned in configuration.
///
/// A terminal has no GPS, so the pinned coordinate is the position fix and
/// "nothing pinned" is the permission-denied path.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredLocation {
    pinned: Option<PinnedLocation>,
}

impl ConfiguredLocation {
    pub fn new(pinned: Option<PinnedLocation>) -> Self {
        Self { pinned }
    }
}

#[async_trait]
impl LocationProvider for ConfiguredLocation {
    async fn request_permission(&self) -> Result<(), LocationError> {
        match self.pinned {
            Some(_) => Ok(()),
            None => Err(LocationError::PermissionDenied),
        }
    }

    async fn current_position(&self) -> Result<Position, LocationError> {
        let pinned = self.pinned.ok_or(LocationError::Unavailable)?;

        Ok(Position {
            latitude: pinned.latitude,
            longitude: pinned.longitude,
        })
    }
}
