//! Training job command handlers.

use chrono::{DateTime, Local, Utc};
use tabled::Tabled;
use tracing::info;

use switchboard_core::{CreateTrainingJobRequest, Dashboard, TrainingJob};

use crate::cli::{GlobalOpts, JobsArgs, JobsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct JobRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Bot")]
    bot: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Created")]
    created: String,
}

impl JobRow {
    fn new(j: &TrainingJob, color: bool) -> Self {
        Self {
            id: j.id.to_string(),
            bot: j.bot.to_string(),
            title: j.title.clone(),
            status: output::paint_status(j.status, color),
            created: j.created_at.map(format_time).unwrap_or_default(),
        }
    }
}

fn format_time(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

fn detail(j: &TrainingJob, color: bool) -> String {
    util::detail_block(&[
        ("ID", j.id.to_string()),
        ("Bot", j.bot.to_string()),
        ("Title", j.title.clone()),
        ("Status", output::paint_status(j.status, color)),
        (
            "Created",
            j.created_at.map_or_else(|| "-".into(), format_time),
        ),
    ])
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    dashboard: &Dashboard,
    args: JobsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let color = output::should_color(&global.color);

    let job = match args.command {
        JobsCommand::List => {
            let jobs = dashboard
                .authorized::<TrainingJob, _>(|client, token| client.get_list(token))
                .await?;
            let out = output::render_list(
                &global.output,
                &jobs,
                |j| JobRow::new(j, color),
                |j| j.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            return Ok(());
        }

        JobsCommand::Get { id } => {
            dashboard
                .authorized::<TrainingJob, _>(|client, token| {
                    client.get_item(token, util::entity_id(&id))
                })
                .await?
        }

        JobsCommand::Create { bot, title } => {
            let payload = CreateTrainingJobRequest {
                bot: util::entity_id(&bot),
                title,
            };
            let job = dashboard
                .authorized::<TrainingJob, _>(|client, token| client.create(token, payload))
                .await?;
            info!(id = %job.id, bot = %job.bot, "training job started");
            job
        }
    };

    let out = output::render_single(
        &global.output,
        &job,
        |j| detail(j, color),
        |j| j.id.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
