use std::collections::BTreeSet;

use non_empty_string::NonEmptyString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A reusable scoring rule.
///
/// Templates come in two flavours: flat templates always award
/// `base_value`, scalable templates additionally escalate when
/// occurrences recur within a streak window. The escalation fields
/// arrive from external data, so a scalable template can be
/// malformed; [`TagTemplate::escalation`] is where that surfaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagTemplate {
    id: Uuid,
    name: NonEmptyString,
    /// Points awarded per occurrence before any escalation. Negative
    /// values model penalties.
    base_value: i64,
    scalable: bool,
    /// Per-occurrence escalation delta, signed. Ignored unless
    /// `scalable`.
    escalation_value: Option<i64>,
    /// Recurrence window, in days, that counts as continuing a
    /// streak. Ignored unless `scalable`.
    escalation_streak_days: Option<u32>,
    /// Area tags this template applies to.
    areas: BTreeSet<String>,
}

/// A resolved, well-formed escalation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Escalation {
    /// Signed per-occurrence delta.
    pub value: i64,
    /// Streak window in days. Always non-zero.
    pub streak_days: u32,
}

/// A scalable template whose escalation fields cannot be used.
///
/// This is administrator data-integrity error, not something the user
/// awarding the tag can correct.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidTemplateConfiguration {
    /// The streak window is absent or zero.
    #[error("template '{0}' is scalable but its streak window is missing or zero")]
    MissingStreakWindow(String),
    /// No escalation value is configured.
    #[error("template '{0}' is scalable but has no escalation value")]
    MissingEscalationValue(String),
}

impl TagTemplate {
    /// Creates a flat (non-scalable) template.
    #[must_use]
    pub fn flat(name: NonEmptyString, base_value: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            base_value,
            scalable: false,
            escalation_value: None,
            escalation_streak_days: None,
            areas: BTreeSet::new(),
        }
    }

    /// Creates a scalable template.
    #[must_use]
    pub fn scalable(
        name: NonEmptyString,
        base_value: i64,
        escalation_value: i64,
        escalation_streak_days: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            base_value,
            scalable: true,
            escalation_value: Some(escalation_value),
            escalation_streak_days: Some(escalation_streak_days),
            areas: BTreeSet::new(),
        }
    }

    /// The template's stable identifier.
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// The display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Points awarded before escalation.
    #[must_use]
    pub const fn base_value(&self) -> i64 {
        self.base_value
    }

    /// Whether the template escalates with streaks.
    #[must_use]
    pub const fn is_scalable(&self) -> bool {
        self.scalable
    }

    /// Area tags this template applies to.
    #[must_use]
    pub const fn areas(&self) -> &BTreeSet<String> {
        &self.areas
    }

    /// Replaces the template's area tags.
    pub fn set_areas(&mut self, areas: BTreeSet<String>) {
        self.areas = areas;
    }

    /// Resolves the raw escalation fields.
    ///
    /// Non-scalable templates resolve to `Ok(None)`: stray escalation
    /// fields are ignored, never an error. Scalable templates resolve
    /// to a well-formed [`Escalation`] or fail.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidTemplateConfiguration`] when the template is
    /// scalable but the streak window is missing or zero, or the
    /// escalation value is missing.
    pub fn escalation(&self) -> Result<Option<Escalation>, InvalidTemplateConfiguration> {
        if !self.scalable {
            return Ok(None);
        }

        let streak_days = match self.escalation_streak_days {
            Some(days) if days > 0 => days,
            _ => {
                return Err(InvalidTemplateConfiguration::MissingStreakWindow(
                    self.name.to_string(),
                ));
            }
        };

        let value = self.escalation_value.ok_or_else(|| {
            InvalidTemplateConfiguration::MissingEscalationValue(self.name.to_string())
        })?;

        Ok(Some(Escalation { value, streak_days }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> NonEmptyString {
        NonEmptyString::new(s.to_string()).unwrap()
    }

    #[test]
    fn flat_template_has_no_escalation() {
        let template = TagTemplate::flat(name("Presença"), 10);
        assert_eq!(template.escalation().unwrap(), None);
    }

    #[test]
    fn stray_escalation_fields_are_ignored_when_not_scalable() {
        let mut template = TagTemplate::flat(name("Presença"), 10);
        // Simulate stale data left behind by an earlier edit.
        template.escalation_value = Some(5);
        template.escalation_streak_days = Some(7);

        assert_eq!(template.escalation().unwrap(), None);
    }

    #[test]
    fn scalable_template_resolves() {
        let template = TagTemplate::scalable(name("Atraso"), -5, -2, 7);
        assert_eq!(
            template.escalation().unwrap(),
            Some(Escalation {
                value: -2,
                streak_days: 7
            })
        );
    }

    #[test]
    fn zero_streak_window_is_rejected() {
        let template = TagTemplate::scalable(name("Atraso"), -5, -2, 0);
        assert_eq!(
            template.escalation().unwrap_err(),
            InvalidTemplateConfiguration::MissingStreakWindow("Atraso".to_string())
        );
    }

    #[test]
    fn missing_escalation_value_is_rejected() {
        let mut template = TagTemplate::scalable(name("Atraso"), -5, -2, 7);
        template.escalation_value = None;
        assert_eq!(
            template.escalation().unwrap_err(),
            InvalidTemplateConfiguration::MissingEscalationValue("Atraso".to_string())
        );
    }
}
