use std::path::Path;

use chrono::{DateTime, Utc};
use non_empty_string::NonEmptyString;
use odin::{Interval, Resource, ScoringPeriod, Semester, TagTemplate, Target, domain::resource};
use tracing::instrument;

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Register an internal room
    Room(Named),
    /// Register an equipment item
    Equipment(Named),
    /// Register the synthetic external-room resource
    External(Named),
    /// Register a member
    Member(Named),
    /// Register a tag template
    Template(Template),
    /// Register a scoring period
    Period(Span),
    /// Register a semester
    Semester(Span),
}

#[derive(Debug, clap::Parser)]
pub struct Named {
    /// Display name
    name: String,
}

#[derive(Debug, clap::Parser)]
pub struct Template {
    /// Display name
    name: String,

    /// Base point value (negative for penalties)
    #[arg(long, allow_hyphen_values = true)]
    value: i64,

    /// Per-occurrence escalation delta; makes the template scalable
    #[arg(long, allow_hyphen_values = true, requires = "streak_days")]
    escalation: Option<i64>,

    /// Streak window in days
    #[arg(long, requires = "escalation")]
    streak_days: Option<u32>,
}

#[derive(Debug, clap::Parser)]
pub struct Span {
    /// Display name
    name: String,

    /// Start of the covered span (RFC 3339)
    #[arg(long)]
    from: DateTime<Utc>,

    /// End of the covered span (RFC 3339)
    #[arg(long)]
    to: DateTime<Utc>,
}

fn parse_name(name: String) -> anyhow::Result<NonEmptyString> {
    NonEmptyString::new(name).map_err(|_| anyhow::anyhow!("name must not be empty"))
}

impl Command {
    #[instrument(skip(self))]
    pub fn run(self, state: &Path) -> anyhow::Result<()> {
        let mut store = super::load_store(state)?;

        let created = match self {
            Self::Room(args) => {
                let resource = Resource::new(parse_name(args.name)?, resource::Kind::Room);
                let line = format!("room '{}' ({})", resource.name(), resource.id());
                store.add_resource(resource);
                line
            }
            Self::Equipment(args) => {
                let resource = Resource::new(
                    parse_name(args.name)?,
                    resource::Kind::Equipment {
                        status: resource::EquipmentStatus::Available,
                    },
                );
                let line = format!("equipment '{}' ({})", resource.name(), resource.id());
                store.add_resource(resource);
                line
            }
            Self::External(args) => {
                let resource = Resource::new(parse_name(args.name)?, resource::Kind::External);
                let line = format!("external resource '{}' ({})", resource.name(), resource.id());
                store.add_resource(resource);
                line
            }
            Self::Member(args) => {
                let target = Target::member(parse_name(args.name)?, Utc::now());
                let line = format!("member '{}' ({})", target.name(), target.id());
                store.add_target(target);
                line
            }
            Self::Template(args) => {
                let name = parse_name(args.name)?;
                let template = match (args.escalation, args.streak_days) {
                    (Some(escalation), Some(streak_days)) => {
                        TagTemplate::scalable(name, args.value, escalation, streak_days)
                    }
                    _ => TagTemplate::flat(name, args.value),
                };
                let line = format!("template '{}' ({})", template.name(), template.id());
                store.add_template(template);
                line
            }
            Self::Period(args) => {
                let span = Interval::new(args.from, args.to)?;
                let period = ScoringPeriod::new(parse_name(args.name)?, span);
                let line = format!("scoring period '{}' ({})", period.name(), period.id());
                store.add_period(period);
                line
            }
            Self::Semester(args) => {
                let span = Interval::new(args.from, args.to)?;
                let semester = Semester::new(parse_name(args.name)?, span);
                let line = format!("semester '{}' ({})", semester.name(), semester.id());
                store.add_semester(semester);
                line
            }
        };

        super::save_store(state, &store)?;
        println!("Added {created}");
        Ok(())
    }
}
