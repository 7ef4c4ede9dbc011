//! The in-memory realisation of the persistence collaborator.
//!
//! [`MemoryStore`] owns the booking book and the points ledger and is
//! what the CLI serialises to its state file. Two races the original
//! platform left open are closed here: booking commits are
//! compare-and-swap against a per-resource revision counter, and
//! semester close performs snapshot-then-reset as a single operation.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    domain::{
        Booking, EquipmentStatus, Interval, InvalidTemplateConfiguration, PeriodSet, RequestStatus,
        Resource, ResourceKey, ScoringPeriod, Semester, Snapshot, Tag, TagTemplate, Target,
        TargetId, UnknownPeriod,
    },
    points::{self, Standing},
    schedule::{Conflict, check_availability},
};

/// In-memory store backing the CLI and the test suites.
///
/// Bookings are grouped by [`ResourceKey`]; each key carries a
/// revision counter that advances on every mutation of that key's
/// booking list. Tags split into the live working set (since the last
/// semester close) and the archive; ranking totals always derive from
/// the live set, so "resetting the running total" is archival, not
/// deletion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryStore {
    resources: BTreeMap<Uuid, Resource>,
    targets: Vec<Target>,
    templates: BTreeMap<Uuid, TagTemplate>,
    periods: PeriodSet,
    semesters: BTreeMap<Uuid, Semester>,
    bookings: Vec<Booking>,
    revisions: Vec<(ResourceKey, u64)>,
    live_tags: Vec<Tag>,
    archived_tags: Vec<Tag>,
    snapshots: Vec<Snapshot>,
}

/// Error committing or rescheduling a booking.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommitError {
    /// The candidate interval overlaps an existing booking.
    #[error(transparent)]
    Conflict(#[from] Conflict),
    /// The booking list changed since the caller last looked at it.
    /// The caller must re-fetch and re-check.
    #[error("booking list moved since revision {expected} (now {actual}); re-check required")]
    Stale {
        /// Revision the caller checked against.
        expected: u64,
        /// Revision the list is actually at.
        actual: u64,
    },
    /// No booking with the given id exists.
    #[error("booking {0} not found")]
    UnknownBooking(Uuid),
}

/// Error recording a tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    /// No template with the given id exists.
    #[error("tag template {0} not found")]
    UnknownTemplate(Uuid),
    /// The target is not registered.
    #[error("target {0} is not registered")]
    UnknownTarget(TargetId),
    /// Tags can only be recorded while a scoring period is active.
    #[error("no scoring period is active")]
    NoActivePeriod,
    /// The template's escalation configuration is unusable.
    #[error(transparent)]
    Template(#[from] InvalidTemplateConfiguration),
}

/// Error closing a semester.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CloseError {
    /// No semester with the given id exists. Nothing was written.
    #[error("semester {0} not found")]
    UnknownSemester(Uuid),
    /// Some per-target snapshots could not be written.
    #[error(transparent)]
    Partial(#[from] PartialSnapshotFailure),
}

/// One or more per-target snapshots failed mid-batch.
///
/// Snapshots that were written stay written (no automatic rollback),
/// and only their targets' live totals were reset. This surfaces to
/// administrators; it is not an end-user error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error(
    "semester close partially failed: {} snapshot(s) written, {} target(s) already snapshotted",
    written.len(),
    failed.len()
)]
pub struct PartialSnapshotFailure {
    /// Snapshots successfully written in this batch.
    pub written: Vec<Snapshot>,
    /// Targets whose snapshot could not be written because one
    /// already existed for this semester.
    pub failed: Vec<TargetId>,
}

impl MemoryStore {
    /// Registers a resource.
    pub fn add_resource(&mut self, resource: Resource) {
        self.resources.insert(resource.id(), resource);
    }

    /// Looks up a resource by id.
    #[must_use]
    pub fn resource(&self, id: Uuid) -> Option<&Resource> {
        self.resources.get(&id)
    }

    /// Looks up a resource by display name.
    #[must_use]
    pub fn resource_named(&self, name: &str) -> Option<&Resource> {
        self.resources.values().find(|r| r.name() == name)
    }

    /// All resources, in id order.
    pub fn resources(&self) -> impl Iterator<Item = &Resource> {
        self.resources.values()
    }

    /// Updates the status of an equipment resource.
    ///
    /// Returns `false` when the id is unknown or the resource is not
    /// equipment.
    pub fn set_equipment_status(&mut self, id: Uuid, status: EquipmentStatus) -> bool {
        self.resources
            .get_mut(&id)
            .is_some_and(|resource| resource.set_status(status))
    }

    /// Registers a scorable target.
    pub fn add_target(&mut self, target: Target) {
        self.targets.push(target);
    }

    /// Looks up a target by id.
    #[must_use]
    pub fn target(&self, id: TargetId) -> Option<&Target> {
        self.targets.iter().find(|t| t.id() == id)
    }

    /// Looks up a target by display name.
    #[must_use]
    pub fn target_named(&self, name: &str) -> Option<&Target> {
        self.targets.iter().find(|t| t.name() == name)
    }

    /// All registered targets.
    #[must_use]
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    /// Registers a tag template.
    pub fn add_template(&mut self, template: TagTemplate) {
        self.templates.insert(template.id(), template);
    }

    /// Looks up a template by display name.
    #[must_use]
    pub fn template_named(&self, name: &str) -> Option<&TagTemplate> {
        self.templates.values().find(|t| t.name() == name)
    }

    /// All templates, in id order.
    pub fn templates(&self) -> impl Iterator<Item = &TagTemplate> {
        self.templates.values()
    }

    /// Registers a scoring period. New periods start inactive.
    pub fn add_period(&mut self, period: ScoringPeriod) {
        self.periods.insert(period);
    }

    /// Makes the given scoring period the active one, atomically
    /// deactivating whichever was active before.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownPeriod`] when no period with that id exists.
    pub fn activate_period(&mut self, id: Uuid) -> Result<Option<Uuid>, UnknownPeriod> {
        self.periods.activate(id)
    }

    /// The currently active scoring period, if any.
    #[must_use]
    pub fn active_period(&self) -> Option<&ScoringPeriod> {
        self.periods.active()
    }

    /// All scoring periods.
    pub fn periods(&self) -> impl Iterator<Item = &ScoringPeriod> {
        self.periods.iter()
    }

    /// Looks up a period by display name.
    #[must_use]
    pub fn period_named(&self, name: &str) -> Option<&ScoringPeriod> {
        self.periods.iter().find(|p| p.name() == name)
    }

    /// Registers a semester.
    pub fn add_semester(&mut self, semester: Semester) {
        self.semesters.insert(semester.id(), semester);
    }

    /// Looks up a semester by display name.
    #[must_use]
    pub fn semester_named(&self, name: &str) -> Option<&Semester> {
        self.semesters.values().find(|s| s.name() == name)
    }

    /// All snapshots taken so far.
    #[must_use]
    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    /// The bookings competing for the given resource key.
    ///
    /// This is the pre-filtered list the schedule functions expect.
    #[must_use]
    pub fn bookings_for(&self, key: ResourceKey) -> Vec<Booking> {
        self.bookings
            .iter()
            .filter(|b| b.slot().key() == key)
            .cloned()
            .collect()
    }

    /// All bookings, unscoped. Input to the day-grid view.
    #[must_use]
    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    /// Looks up a booking by id.
    #[must_use]
    pub fn booking(&self, id: Uuid) -> Option<&Booking> {
        self.bookings.iter().find(|b| b.id() == id)
    }

    /// Current revision of a resource key's booking list.
    ///
    /// Callers capture this before a conflict check and present it
    /// back when committing; a moved revision fails the commit.
    #[must_use]
    pub fn booking_revision(&self, key: ResourceKey) -> u64 {
        self.revisions
            .iter()
            .find(|(k, _)| *k == key)
            .map_or(0, |(_, rev)| *rev)
    }

    /// Commits a new booking, re-validating the conflict check
    /// against the current booking list.
    ///
    /// The check-then-write race is closed by compare-and-swap: the
    /// caller presents the revision it checked against, and the
    /// commit fails as [`CommitError::Stale`] when another write got
    /// there first, even if the intervals would not collide.
    ///
    /// # Errors
    ///
    /// Returns [`CommitError::Stale`] on a moved revision and
    /// [`CommitError::Conflict`] when the interval overlaps an
    /// existing blocking booking.
    #[instrument(skip(self, booking), fields(booking = %booking.id()))]
    pub fn commit_booking(
        &mut self,
        booking: Booking,
        expected_revision: u64,
    ) -> Result<Uuid, CommitError> {
        let key = booking.slot().key();
        self.guard_revision(key, expected_revision)?;

        let blocking = self.blocking_bookings(key);
        check_availability(booking.interval(), &blocking, None)?;

        let id = booking.id();
        info!(%id, "booking committed");
        self.bookings.push(booking);
        self.bump_revision(key);
        Ok(id)
    }

    /// Moves an existing booking to a new interval, re-running the
    /// conflict check with the booking itself excluded.
    ///
    /// # Errors
    ///
    /// Returns [`CommitError::UnknownBooking`] for a missing id,
    /// [`CommitError::Stale`] on a moved revision, and
    /// [`CommitError::Conflict`] on overlap with another booking.
    #[instrument(skip(self))]
    pub fn reschedule_booking(
        &mut self,
        id: Uuid,
        interval: Interval,
        expected_revision: u64,
    ) -> Result<(), CommitError> {
        let key = self
            .booking(id)
            .map(|b| b.slot().key())
            .ok_or(CommitError::UnknownBooking(id))?;
        self.guard_revision(key, expected_revision)?;

        let blocking = self.blocking_bookings(key);
        check_availability(interval, &blocking, Some(id))?;

        let booking = self
            .bookings
            .iter_mut()
            .find(|b| b.id() == id)
            .ok_or(CommitError::UnknownBooking(id))?;
        booking.reschedule(interval);
        self.bump_revision(key);
        Ok(())
    }

    /// Removes a booking. Returns `false` when no such booking
    /// exists.
    pub fn cancel_booking(&mut self, id: Uuid) -> bool {
        let Some(index) = self.bookings.iter().position(|b| b.id() == id) else {
            return false;
        };
        let removed = self.bookings.remove(index);
        self.bump_revision(removed.slot().key());
        true
    }

    /// Reviews an external room request.
    ///
    /// Approval is the moment an external request starts occupying
    /// time, so approving re-runs the conflict check against the
    /// other blocking external bookings. Moving a request *away* from
    /// approved never conflicts.
    ///
    /// # Errors
    ///
    /// Returns [`CommitError::UnknownBooking`] if the id does not
    /// name an external request, and [`CommitError::Conflict`] when
    /// approval would double-book the external resource.
    #[instrument(skip(self))]
    pub fn review_external(&mut self, id: Uuid, status: RequestStatus) -> Result<(), CommitError> {
        let interval = self
            .booking(id)
            .filter(|b| b.slot().key() == ResourceKey::External)
            .map(Booking::interval)
            .ok_or(CommitError::UnknownBooking(id))?;

        if status == RequestStatus::Approved {
            let blocking = self.blocking_bookings(ResourceKey::External);
            check_availability(interval, &blocking, Some(id))?;
        }

        let booking = self
            .bookings
            .iter_mut()
            .find(|b| b.id() == id)
            .ok_or(CommitError::UnknownBooking(id))?;
        booking.set_request_status(status);
        self.bump_revision(ResourceKey::External);
        Ok(())
    }

    /// Records a tag: fetches the chronological history for the
    /// template and target, computes the value with the escalation
    /// engine, and appends the entry to the live ledger.
    ///
    /// The value is frozen on the returned tag; later template edits
    /// do not touch it.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::UnknownTemplate`] /
    /// [`RecordError::UnknownTarget`] for missing references,
    /// [`RecordError::NoActivePeriod`] when no scoring period is
    /// active, and [`RecordError::Template`] for a malformed scalable
    /// template.
    #[instrument(skip(self), fields(%target))]
    pub fn record_tag(
        &mut self,
        template_id: Uuid,
        target: TargetId,
        performed: DateTime<Utc>,
    ) -> Result<Tag, RecordError> {
        let template = self
            .templates
            .get(&template_id)
            .ok_or(RecordError::UnknownTemplate(template_id))?;
        if self.target(target).is_none() {
            return Err(RecordError::UnknownTarget(target));
        }
        let period = self.periods.active().ok_or(RecordError::NoActivePeriod)?;

        let history = self.tag_history(target, template_id);
        let value = points::compute_tag_value(template, &history, performed)?;

        let tag = Tag::record(template_id, target, value, performed, period.id());
        info!(tag = %tag.id(), value, "tag recorded");
        self.live_tags.push(tag.clone());
        Ok(tag)
    }

    /// Deletes a live tag (administrative correction). Archived tags
    /// are immutable history and cannot be deleted here.
    pub fn remove_tag(&mut self, id: Uuid) -> Option<Tag> {
        let index = self.live_tags.iter().position(|t| t.id() == id)?;
        Some(self.live_tags.remove(index))
    }

    /// The full chronological tag history for a target and template,
    /// archives included. This is the streak input for
    /// [`points::compute_tag_value`].
    #[must_use]
    pub fn tag_history(&self, target: TargetId, template: Uuid) -> Vec<Tag> {
        let mut history: Vec<Tag> = self
            .archived_tags
            .iter()
            .chain(&self.live_tags)
            .filter(|t| t.target() == target && t.template() == template)
            .cloned()
            .collect();
        history.sort_by_key(Tag::performed);
        history
    }

    /// The current-period ranking across all registered targets.
    #[must_use]
    pub fn ranking(&self) -> Vec<Standing> {
        let mut by_target: HashMap<TargetId, Vec<Tag>> = HashMap::new();
        for tag in &self.live_tags {
            by_target.entry(tag.target()).or_default().push(tag.clone());
        }
        points::aggregate_ranking(&self.targets, &by_target)
    }

    /// Closes a semester: snapshots every registered target's live
    /// total, then resets the totals by archiving the live tags.
    ///
    /// Snapshot and reset are one operation here, in that order, per
    /// target: a target's tags are archived only once its snapshot is
    /// written, so a failed write can never lose points.
    ///
    /// # Errors
    ///
    /// Returns [`CloseError::UnknownSemester`] (nothing written) for
    /// a missing semester. When some targets already hold a snapshot
    /// for this semester, the remaining targets are still written and
    /// the batch reports [`PartialSnapshotFailure`]; written
    /// snapshots are not rolled back.
    #[instrument(skip(self))]
    pub fn close_semester(
        &mut self,
        semester_id: Uuid,
        closed_at: DateTime<Utc>,
    ) -> Result<Vec<Snapshot>, CloseError> {
        let semester = self
            .semesters
            .get(&semester_id)
            .ok_or(CloseError::UnknownSemester(semester_id))?;

        let totals: Vec<(TargetId, i64)> = self
            .targets
            .iter()
            .map(|target| (target.id(), self.live_total(target.id())))
            .collect();
        let records = points::take_snapshot(semester, &totals, closed_at);

        let mut written = Vec::new();
        let mut failed = Vec::new();
        for snapshot in records {
            let duplicate = self
                .snapshots
                .iter()
                .any(|s| s.semester() == semester_id && s.target() == snapshot.target());
            if duplicate {
                failed.push(snapshot.target());
                continue;
            }

            // Snapshot first, then reset; never the other way round.
            self.snapshots.push(snapshot.clone());
            self.archive_target_tags(snapshot.target());
            written.push(snapshot);
        }

        info!(written = written.len(), failed = failed.len(), "semester closed");
        if failed.is_empty() {
            Ok(written)
        } else {
            Err(PartialSnapshotFailure { written, failed }.into())
        }
    }

    /// A target's live running total.
    #[must_use]
    pub fn live_total(&self, target: TargetId) -> i64 {
        self.live_tags
            .iter()
            .filter(|t| t.target() == target)
            .map(Tag::value)
            .sum()
    }

    fn archive_target_tags(&mut self, target: TargetId) {
        let mut index = 0;
        while index < self.live_tags.len() {
            if self.live_tags[index].target() == target {
                let tag = self.live_tags.remove(index);
                self.archived_tags.push(tag);
            } else {
                index += 1;
            }
        }
    }

    /// Bookings under `key` that actually block time (approved
    /// external requests; all room/equipment bookings).
    fn blocking_bookings(&self, key: ResourceKey) -> Vec<Booking> {
        self.bookings
            .iter()
            .filter(|b| b.slot().key() == key && b.slot().blocks_time())
            .cloned()
            .collect()
    }

    fn guard_revision(&self, key: ResourceKey, expected: u64) -> Result<(), CommitError> {
        let actual = self.booking_revision(key);
        if expected == actual {
            Ok(())
        } else {
            Err(CommitError::Stale { expected, actual })
        }
    }

    fn bump_revision(&mut self, key: ResourceKey) {
        if let Some(entry) = self.revisions.iter_mut().find(|(k, _)| *k == key) {
            entry.1 += 1;
        } else {
            self.revisions.push((key, 1));
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;
    use non_empty_string::NonEmptyString;

    use super::*;
    use crate::domain::{Slot, resource::Kind};

    fn name(s: &str) -> NonEmptyString {
        NonEmptyString::new(s.to_string()).unwrap()
    }

    fn instant(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    fn interval(start: &str, end: &str) -> Interval {
        Interval::new(instant(start), instant(end)).unwrap()
    }

    fn room_booking(room: Uuid, start: &str, end: &str) -> Booking {
        Booking::new(
            Slot::Room { room },
            Uuid::new_v4(),
            interval(start, end),
            "reunião".to_string(),
        )
    }

    /// A store with one room, one member, the enterprise, one
    /// scalable template and an active period.
    fn seeded() -> (MemoryStore, Uuid, TargetId, Uuid) {
        let mut store = MemoryStore::default();

        let room = Resource::new(name("Sala 1"), Kind::Room);
        let room_id = room.id();
        store.add_resource(room);

        let member = Target::member(name("Alice"), instant("2024-01-01T00:00:00Z"));
        let member_id = member.id();
        store.add_target(member);
        store.add_target(Target::enterprise(
            name("Odin"),
            instant("2023-01-01T00:00:00Z"),
        ));

        let template = TagTemplate::scalable(name("Entrega"), 10, 5, 7);
        let template_id = template.id();
        store.add_template(template);

        let period = ScoringPeriod::new(
            name("2025.1"),
            interval("2025-01-01T00:00:00Z", "2025-07-01T00:00:00Z"),
        );
        let period_id = period.id();
        store.add_period(period);
        store.activate_period(period_id).unwrap();

        (store, room_id, member_id, template_id)
    }

    fn add_semester(store: &mut MemoryStore, semester_name: &str) -> Uuid {
        let semester = Semester::new(
            name(semester_name),
            interval("2025-01-01T00:00:00Z", "2025-07-01T00:00:00Z"),
        );
        let id = semester.id();
        store.add_semester(semester);
        id
    }

    #[test]
    fn commit_advances_the_revision() {
        let (mut store, room, _, _) = seeded();
        let key = ResourceKey::Room(room);

        assert_eq!(store.booking_revision(key), 0);
        store
            .commit_booking(
                room_booking(room, "2025-01-10T14:00:00Z", "2025-01-10T15:00:00Z"),
                0,
            )
            .unwrap();
        assert_eq!(store.booking_revision(key), 1);
    }

    #[test]
    fn stale_revision_is_rejected_even_without_overlap() {
        let (mut store, room, _, _) = seeded();

        // Two writers both observed revision 0. The second loses even
        // though the intervals do not collide.
        store
            .commit_booking(
                room_booking(room, "2025-01-10T14:00:00Z", "2025-01-10T15:00:00Z"),
                0,
            )
            .unwrap();

        let err = store
            .commit_booking(
                room_booking(room, "2025-01-10T16:00:00Z", "2025-01-10T17:00:00Z"),
                0,
            )
            .unwrap_err();
        assert_eq!(
            err,
            CommitError::Stale {
                expected: 0,
                actual: 1
            }
        );
    }

    #[test]
    fn commit_revalidates_the_conflict_check() {
        let (mut store, room, _, _) = seeded();

        store
            .commit_booking(
                room_booking(room, "2025-01-10T14:00:00Z", "2025-01-10T15:00:00Z"),
                0,
            )
            .unwrap();

        let err = store
            .commit_booking(
                room_booking(room, "2025-01-10T14:30:00Z", "2025-01-10T14:45:00Z"),
                1,
            )
            .unwrap_err();
        assert!(matches!(err, CommitError::Conflict(_)));
    }

    #[test]
    fn reschedule_excludes_the_booking_itself() {
        let (mut store, room, _, _) = seeded();

        let id = store
            .commit_booking(
                room_booking(room, "2025-01-10T14:00:00Z", "2025-01-10T15:00:00Z"),
                0,
            )
            .unwrap();

        // Same interval, excluded self: must succeed.
        store
            .reschedule_booking(
                id,
                interval("2025-01-10T14:00:00Z", "2025-01-10T15:00:00Z"),
                1,
            )
            .unwrap();

        assert_eq!(store.booking_revision(ResourceKey::Room(room)), 2);
    }

    #[test]
    fn different_rooms_never_compete() {
        let (mut store, room, _, _) = seeded();
        let other = Resource::new(name("Sala 2"), Kind::Room);
        let other_id = other.id();
        store.add_resource(other);

        store
            .commit_booking(
                room_booking(room, "2025-01-10T14:00:00Z", "2025-01-10T15:00:00Z"),
                0,
            )
            .unwrap();
        // Identical interval in another room: separate key, separate
        // revision counter.
        store
            .commit_booking(
                room_booking(other_id, "2025-01-10T14:00:00Z", "2025-01-10T15:00:00Z"),
                0,
            )
            .unwrap();
    }

    #[test]
    fn equipment_status_updates_through_the_store() {
        let (mut store, room, _, _) = seeded();
        let projector = Resource::new(
            name("Projetor"),
            Kind::Equipment {
                status: EquipmentStatus::Available,
            },
        );
        let projector_id = projector.id();
        store.add_resource(projector);

        assert!(store.set_equipment_status(projector_id, EquipmentStatus::Maintenance));
        assert_eq!(
            store.resource(projector_id).unwrap().kind(),
            &Kind::Equipment {
                status: EquipmentStatus::Maintenance
            }
        );

        assert!(!store.set_equipment_status(room, EquipmentStatus::InUse));
        assert!(!store.set_equipment_status(Uuid::new_v4(), EquipmentStatus::InUse));
    }

    #[test]
    fn pending_external_requests_do_not_block_commits() {
        let (mut store, _, _, _) = seeded();
        let member = Uuid::new_v4();

        let pending = Booking::new(
            Slot::External {
                status: RequestStatus::Pending,
            },
            member,
            interval("2025-01-10T14:00:00Z", "2025-01-10T15:00:00Z"),
            "palestra".to_string(),
        );
        let pending_id = store.commit_booking(pending, 0).unwrap();

        // A second request over the same slot is fine while the first
        // is pending.
        let second = Booking::new(
            Slot::External {
                status: RequestStatus::Pending,
            },
            member,
            interval("2025-01-10T14:00:00Z", "2025-01-10T15:00:00Z"),
            "workshop".to_string(),
        );
        let second_id = store.commit_booking(second, 1).unwrap();

        // Approving the first works; approving the second now
        // conflicts.
        store
            .review_external(pending_id, RequestStatus::Approved)
            .unwrap();
        let err = store
            .review_external(second_id, RequestStatus::Approved)
            .unwrap_err();
        assert!(matches!(err, CommitError::Conflict(_)));
    }

    #[test]
    fn record_tag_applies_escalation_from_history() {
        let (mut store, _, member, template) = seeded();

        let first = store
            .record_tag(template, member, instant("2025-03-01T12:00:00Z"))
            .unwrap();
        assert_eq!(first.value(), 10);

        let second = store
            .record_tag(template, member, instant("2025-03-04T12:00:00Z"))
            .unwrap();
        assert_eq!(second.value(), 15);

        assert_eq!(store.live_total(member), 25);
    }

    #[test]
    fn recording_requires_an_active_period() {
        let (mut store, _, member, template) = seeded();
        store.periods.deactivate();

        let err = store
            .record_tag(template, member, instant("2025-03-01T12:00:00Z"))
            .unwrap_err();
        assert_eq!(err, RecordError::NoActivePeriod);
    }

    #[test]
    fn recorded_tags_carry_the_active_period() {
        let (mut store, _, member, template) = seeded();
        let active = store.active_period().unwrap().id();

        let tag = store
            .record_tag(template, member, instant("2025-03-01T12:00:00Z"))
            .unwrap();
        assert_eq!(tag.period(), active);
    }

    #[test]
    fn close_semester_snapshots_then_resets() {
        let (mut store, _, member, template) = seeded();
        let semester = add_semester(&mut store, "2025.1");

        store
            .record_tag(template, member, instant("2025-03-01T12:00:00Z"))
            .unwrap();
        store
            .record_tag(template, member, instant("2025-03-04T12:00:00Z"))
            .unwrap();

        let snapshots = store
            .close_semester(semester, instant("2025-07-01T00:00:00Z"))
            .unwrap();

        // One record per registered target, member total captured.
        assert_eq!(snapshots.len(), 2);
        let member_snapshot = snapshots.iter().find(|s| s.target() == member).unwrap();
        assert_eq!(member_snapshot.total(), 25);

        // Totals are reset for the next period...
        assert_eq!(store.live_total(member), 0);
        // ...but the history still feeds streak computation.
        let third = store
            .record_tag(template, member, instant("2025-03-07T12:00:00Z"))
            .unwrap();
        assert_eq!(third.value(), 20);
    }

    #[test]
    fn double_close_reports_partial_failure_without_writes() {
        let (mut store, _, member, template) = seeded();
        let semester = add_semester(&mut store, "2025.1");

        store
            .record_tag(template, member, instant("2025-03-01T12:00:00Z"))
            .unwrap();
        store
            .close_semester(semester, instant("2025-07-01T00:00:00Z"))
            .unwrap();
        let before = store.snapshots().len();

        let err = store
            .close_semester(semester, instant("2025-07-02T00:00:00Z"))
            .unwrap_err();
        let CloseError::Partial(partial) = err else {
            panic!("expected partial failure, got {err:?}");
        };
        assert!(partial.written.is_empty());
        assert_eq!(partial.failed.len(), 2);
        assert_eq!(store.snapshots().len(), before);
    }

    #[test]
    fn closing_an_unknown_semester_writes_nothing() {
        let (mut store, _, member, template) = seeded();
        store
            .record_tag(template, member, instant("2025-03-01T12:00:00Z"))
            .unwrap();

        let missing = Uuid::new_v4();
        let err = store
            .close_semester(missing, instant("2025-07-01T00:00:00Z"))
            .unwrap_err();
        assert_eq!(err, CloseError::UnknownSemester(missing));
        assert!(store.snapshots().is_empty());
        assert_eq!(store.live_total(member), 10);
    }

    #[test]
    fn ranking_reads_the_live_ledger() {
        let (mut store, _, member, template) = seeded();

        store
            .record_tag(template, member, instant("2025-03-01T12:00:00Z"))
            .unwrap();
        store
            .record_tag(template, TargetId::Enterprise, instant("2025-03-01T12:00:00Z"))
            .unwrap();
        store
            .record_tag(
                template,
                TargetId::Enterprise,
                instant("2025-03-01T12:00:00Z") + TimeDelta::days(1),
            )
            .unwrap();

        let ranking = store.ranking();
        assert_eq!(ranking[0].target, TargetId::Enterprise);
        assert_eq!(ranking[0].total, 25);
        assert_eq!(ranking[1].target, member);
        assert_eq!(ranking[1].total, 10);
    }

    #[test]
    fn removing_a_live_tag_adjusts_the_total() {
        let (mut store, _, member, template) = seeded();

        let tag = store
            .record_tag(template, member, instant("2025-03-01T12:00:00Z"))
            .unwrap();
        assert_eq!(store.live_total(member), 10);

        assert!(store.remove_tag(tag.id()).is_some());
        assert_eq!(store.live_total(member), 0);
        assert!(store.remove_tag(tag.id()).is_none());
    }

    #[test]
    fn store_round_trips_through_json() {
        let (mut store, room, member, template) = seeded();
        store
            .commit_booking(
                room_booking(room, "2025-01-10T14:00:00Z", "2025-01-10T15:00:00Z"),
                0,
            )
            .unwrap();
        store
            .record_tag(template, member, instant("2025-03-01T12:00:00Z"))
            .unwrap();

        let json = serde_json::to_string_pretty(&store).unwrap();
        let restored: MemoryStore = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, store);
    }
}
