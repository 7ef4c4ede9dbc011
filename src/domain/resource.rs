use std::{collections::BTreeSet, fmt};

use non_empty_string::NonEmptyString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A bookable entity: a room, an equipment item, or the synthetic
/// external-room resource.
///
/// Resources are created and edited by administrators. They are never
/// physically deleted while bookings reference them; that referential
/// integrity is owned by whatever persists them, not by this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    id: Uuid,
    name: NonEmptyString,
    kind: Kind,
    /// Area tags allowed to book this resource. Empty means no
    /// restriction.
    allowed_areas: BTreeSet<String>,
}

/// What a resource is, as a tagged variant rather than parallel
/// per-type code paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Kind {
    /// An internal meeting room.
    Room,
    /// A physical equipment item with an operational status.
    Equipment {
        /// Current operational status. Informational: the conflict
        /// check never consults it, but callers display it.
        status: EquipmentStatus,
    },
    /// The single synthetic resource standing for rooms requested from
    /// the host institution.
    External,
}

/// Discriminant of [`Kind`], used to tag occupancy slots for
/// presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    /// Internal room.
    Room,
    /// Equipment item.
    Equipment,
    /// External room request.
    External,
}

/// Operational status of an equipment item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EquipmentStatus {
    /// In working order and available to borrow.
    #[default]
    Available,
    /// Currently checked out.
    InUse,
    /// Out of service.
    Maintenance,
}

impl Resource {
    /// Creates a resource with a freshly generated id.
    #[must_use]
    pub fn new(name: NonEmptyString, kind: Kind) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            kind,
            allowed_areas: BTreeSet::new(),
        }
    }

    /// The resource's stable identifier.
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// The display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// The resource's kind, including equipment status where relevant.
    #[must_use]
    pub const fn kind(&self) -> &Kind {
        &self.kind
    }

    /// The kind discriminant, without per-kind payload.
    #[must_use]
    pub const fn resource_kind(&self) -> ResourceKind {
        match self.kind {
            Kind::Room => ResourceKind::Room,
            Kind::Equipment { .. } => ResourceKind::Equipment,
            Kind::External => ResourceKind::External,
        }
    }

    /// Area tags allowed to book this resource. Empty means
    /// unrestricted.
    #[must_use]
    pub const fn allowed_areas(&self) -> &BTreeSet<String> {
        &self.allowed_areas
    }

    /// Replaces the allowed-area restriction list.
    pub fn set_allowed_areas(&mut self, areas: BTreeSet<String>) {
        self.allowed_areas = areas;
    }

    /// Updates the equipment status.
    ///
    /// Returns `false` (and changes nothing) when the resource is not
    /// an equipment item.
    pub const fn set_status(&mut self, status: EquipmentStatus) -> bool {
        match &mut self.kind {
            Kind::Equipment { status: current } => {
                *current = status;
                true
            }
            Kind::Room | Kind::External => false,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Room => "room",
            Self::Equipment => "equipment",
            Self::External => "external",
        };
        f.write_str(label)
    }
}

impl fmt::Display for EquipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Available => "available",
            Self::InUse => "in use",
            Self::Maintenance => "maintenance",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> NonEmptyString {
        NonEmptyString::new(s.to_string()).unwrap()
    }

    #[test]
    fn status_update_only_applies_to_equipment() {
        let mut projector = Resource::new(
            name("Projector"),
            Kind::Equipment {
                status: EquipmentStatus::Available,
            },
        );
        assert!(projector.set_status(EquipmentStatus::Maintenance));
        assert_eq!(
            projector.kind(),
            &Kind::Equipment {
                status: EquipmentStatus::Maintenance
            }
        );

        let mut room = Resource::new(name("Sala 1"), Kind::Room);
        assert!(!room.set_status(EquipmentStatus::InUse));
        assert_eq!(room.kind(), &Kind::Room);
    }

    #[test]
    fn resource_kind_discriminant() {
        assert_eq!(
            Resource::new(name("Sala 1"), Kind::Room).resource_kind(),
            ResourceKind::Room
        );
        assert_eq!(
            Resource::new(name("External"), Kind::External).resource_kind(),
            ResourceKind::External
        );
    }
}
