//! Bot command handlers.

use tabled::Tabled;
use tracing::info;

use switchboard_core::{Bot, CreateBotRequest, Dashboard, UpdateBotRequest};

use crate::cli::{BotsArgs, BotsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct BotRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Username")]
    username: String,
    #[tabled(rename = "Active")]
    active: String,
    #[tabled(rename = "Webhook")]
    webhook: String,
}

impl From<&Bot> for BotRow {
    fn from(b: &Bot) -> Self {
        Self {
            id: b.id.to_string(),
            name: b.full_name.clone(),
            username: b.username.clone().unwrap_or_default(),
            active: if b.active { "yes" } else { "no" }.into(),
            webhook: b.webhook.clone().unwrap_or_default(),
        }
    }
}

fn detail(b: &Bot) -> String {
    util::detail_block(&[
        ("ID", b.id.to_string()),
        ("Name", b.full_name.clone()),
        ("Username", b.username.clone().unwrap_or_else(|| "-".into())),
        ("Active", b.active.to_string()),
        ("Webhook", b.webhook.clone().unwrap_or_else(|| "-".into())),
    ])
}

fn print_bot(bot: &Bot, global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_single(&global.output, bot, detail, |b| b.id.to_string())?;
    output::print_output(&out, global.quiet);
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    dashboard: &Dashboard,
    args: BotsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        BotsCommand::List => {
            let bots = dashboard
                .authorized::<Bot, _>(|client, token| client.get_list(token))
                .await?;
            let out = output::render_list(
                &global.output,
                &bots,
                |b| BotRow::from(b),
                |b| b.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        BotsCommand::Get { id } => {
            let bot = dashboard
                .authorized::<Bot, _>(|client, token| client.get_item(token, util::entity_id(&id)))
                .await?;
            print_bot(&bot, global)
        }

        BotsCommand::Create {
            name,
            username,
            webhook,
        } => {
            let payload = CreateBotRequest {
                full_name: name,
                username,
                webhook,
            };
            let bot = dashboard
                .authorized::<Bot, _>(|client, token| client.create(token, payload))
                .await?;
            info!(id = %bot.id, "bot created");
            print_bot(&bot, global)
        }

        BotsCommand::Update {
            id,
            name,
            webhook,
            active,
        } => {
            let patch = UpdateBotRequest {
                full_name: name,
                webhook,
                active,
            };
            if patch.full_name.is_none() && patch.webhook.is_none() && patch.active.is_none() {
                return Err(CliError::Validation {
                    field: "update".into(),
                    reason: "nothing to change; pass --name, --webhook or --active".into(),
                });
            }
            let bot = dashboard
                .authorized::<Bot, _>(|client, token| {
                    client.update(token, util::entity_id(&id), patch)
                })
                .await?;
            print_bot(&bot, global)
        }

        BotsCommand::Delete { id } => {
            if !util::confirm("bots delete", &format!("Delete bot {id}?"), global.yes)? {
                return Ok(());
            }
            dashboard
                .authorized::<Bot, _>(|client, token| client.delete(token, util::entity_id(&id)))
                .await?;
            if !global.quiet {
                eprintln!("Deleted bot {id}");
            }
            Ok(())
        }
    }
}
