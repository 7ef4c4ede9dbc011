use chrono::{DateTime, TimeDelta, Utc};

use crate::domain::{InvalidTemplateConfiguration, Tag, TagTemplate};

/// Computes the point value for a new tag.
///
/// `prior` is the chronologically ordered list of earlier tags
/// recorded from the same template for the same target; it is only
/// consulted for scalable templates. Supplying it out of order makes
/// the streak computation meaningless, so callers (in practice, the
/// store) are responsible for sorting.
///
/// Flat templates always yield `base_value`. For scalable templates,
/// the streak continues when the newest prior occurrence is within
/// the template's streak window of `performed` (a gap of exactly the
/// window still qualifies; only longer gaps reset). The bonus
/// multiplier is the length of the consecutive qualifying run of
/// prior occurrences, so the first occurrence never carries a bonus
/// and occurrences at day 0, 3 and 6 under a 7-day window value the
/// third at `base + escalation * 2`. The escalation value may be
/// negative; the arithmetic is sign-agnostic.
///
/// # Errors
///
/// Returns [`InvalidTemplateConfiguration`] for a scalable template
/// whose escalation fields are unusable. That is administrator data
/// breakage, surfaced rather than guessed around.
pub fn compute_tag_value(
    template: &TagTemplate,
    prior: &[Tag],
    performed: DateTime<Utc>,
) -> Result<i64, InvalidTemplateConfiguration> {
    let Some(escalation) = template.escalation()? else {
        return Ok(template.base_value());
    };

    let window = TimeDelta::days(i64::from(escalation.streak_days));

    let Some(newest) = prior.last() else {
        return Ok(template.base_value());
    };
    if performed - newest.performed() > window {
        return Ok(template.base_value());
    }

    // Length of the consecutive qualifying run ending at the newest
    // prior occurrence. Each gap wider than the window breaks the run.
    let mut run: i64 = 1;
    for pair in prior.windows(2).rev() {
        if pair[1].performed() - pair[0].performed() > window {
            break;
        }
        run += 1;
    }

    Ok(template.base_value() + escalation.value * run)
}

#[cfg(test)]
mod tests {
    use non_empty_string::NonEmptyString;
    use uuid::Uuid;

    use super::*;
    use crate::domain::TargetId;

    fn name(s: &str) -> NonEmptyString {
        NonEmptyString::new(s.to_string()).unwrap()
    }

    fn day(n: i64) -> DateTime<Utc> {
        let base: DateTime<Utc> = "2025-03-01T12:00:00Z".parse().unwrap();
        base + TimeDelta::days(n)
    }

    /// Builds the chronological history for occurrences on the given
    /// day offsets, valuing each with the engine itself.
    fn history(template: &TagTemplate, days: &[i64]) -> Vec<Tag> {
        let mut tags = Vec::new();
        for &n in days {
            let value = compute_tag_value(template, &tags, day(n)).unwrap();
            tags.push(Tag::record(
                template.id(),
                TargetId::Enterprise,
                value,
                day(n),
                Uuid::new_v4(),
            ));
        }
        tags
    }

    #[test]
    fn flat_template_ignores_history() {
        let template = TagTemplate::flat(name("Presença"), 10);
        let prior = history(&TagTemplate::scalable(name("x"), 10, 5, 7), &[0, 1, 2]);

        assert_eq!(compute_tag_value(&template, &prior, day(3)).unwrap(), 10);
    }

    #[test]
    fn first_occurrence_never_carries_a_bonus() {
        let template = TagTemplate::scalable(name("Entrega"), 10, 5, 7);
        assert_eq!(compute_tag_value(&template, &[], day(0)).unwrap(), 10);
    }

    #[test]
    fn second_occurrence_inside_window_escalates_once() {
        // Base 10, escalation 5, window 7, occurrences on days 0 and 5.
        let template = TagTemplate::scalable(name("Entrega"), 10, 5, 7);
        let prior = history(&template, &[0]);

        assert_eq!(compute_tag_value(&template, &prior, day(5)).unwrap(), 15);
    }

    #[test]
    fn streak_continues_across_consecutive_occurrences() {
        // Days 0, 3, 6 under a 7-day window: the third occurrence is
        // worth base + escalation * 2.
        let template = TagTemplate::scalable(name("Entrega"), 10, 5, 7);
        let prior = history(&template, &[0, 3]);

        assert_eq!(compute_tag_value(&template, &prior, day(6)).unwrap(), 20);
    }

    #[test]
    fn long_gap_resets_the_streak() {
        let template = TagTemplate::scalable(name("Entrega"), 10, 5, 7);
        let prior = history(&template, &[0, 3]);

        assert_eq!(compute_tag_value(&template, &prior, day(20)).unwrap(), 10);
    }

    #[test]
    fn gap_of_exactly_the_window_still_qualifies() {
        let template = TagTemplate::scalable(name("Entrega"), 10, 5, 7);
        let prior = history(&template, &[0]);

        assert_eq!(compute_tag_value(&template, &prior, day(7)).unwrap(), 15);
        assert_eq!(compute_tag_value(&template, &prior, day(8)).unwrap(), 10);
    }

    #[test]
    fn reset_in_the_middle_restarts_the_run_count() {
        // Days 0, 20, 23: the gap before day 20 broke the streak, so
        // day 23 only continues a 1-long run.
        let template = TagTemplate::scalable(name("Entrega"), 10, 5, 7);
        let prior = history(&template, &[0, 20]);

        assert_eq!(compute_tag_value(&template, &prior, day(23)).unwrap(), 15);
    }

    #[test]
    fn negative_escalation_models_penalty_streaks() {
        // Repeated lateness: base -5, escalation -2.
        let template = TagTemplate::scalable(name("Atraso"), -5, -2, 7);
        let prior = history(&template, &[0, 2]);

        assert_eq!(compute_tag_value(&template, &prior, day(4)).unwrap(), -9);
    }

    #[test]
    fn malformed_scalable_template_is_reported() {
        let template = TagTemplate::scalable(name("Entrega"), 10, 5, 0);
        assert_eq!(
            compute_tag_value(&template, &[], day(0)).unwrap_err(),
            InvalidTemplateConfiguration::MissingStreakWindow("Entrega".to_string())
        );
    }
}
