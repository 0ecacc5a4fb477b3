//! Light command handlers.

use tabled::Tabled;

use switchboard_core::{Dashboard, Light};

use crate::cli::{GlobalOpts, LightsArgs, LightsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct LightRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Room")]
    room: String,
    #[tabled(rename = "Power")]
    power: String,
    #[tabled(rename = "Brightness")]
    brightness: String,
    #[tabled(rename = "Temp")]
    temperature: String,
}

impl LightRow {
    fn new(l: &Light, color: bool) -> Self {
        Self {
            id: l.id.to_string(),
            name: l.name.clone(),
            room: l.room.clone().unwrap_or_default(),
            power: output::paint_power(l.is_on, color),
            brightness: format!("{}%", l.brightness),
            temperature: l
                .color_temperature
                .map(|k| format!("{k}K"))
                .unwrap_or_default(),
        }
    }
}

fn detail(l: &Light, color: bool) -> String {
    util::detail_block(&[
        ("ID", l.id.to_string()),
        ("Name", l.name.clone()),
        ("Room", l.room.clone().unwrap_or_else(|| "-".into())),
        ("Power", output::paint_power(l.is_on, color)),
        ("Brightness", format!("{}%", l.brightness)),
        (
            "Temperature",
            l.color_temperature
                .map_or_else(|| "-".into(), |k| format!("{k}K")),
        ),
    ])
}

pub async fn handle(
    dashboard: &Dashboard,
    args: LightsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let color = output::should_color(&global.color);

    let light = match args.command {
        LightsCommand::List => {
            let lights = dashboard
                .authorized::<Light, _>(|client, token| client.get_list(token))
                .await?;
            let out = output::render_list(
                &global.output,
                &lights,
                |l| LightRow::new(l, color),
                |l| l.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            return Ok(());
        }

        LightsCommand::Get { id } => {
            dashboard
                .authorized::<Light, _>(|client, token| {
                    client.get_item(token, util::entity_id(&id))
                })
                .await?
        }

        LightsCommand::Brightness { id, value } => {
            dashboard
                .authorized::<Light, _>(|client, token| {
                    client.set_brightness(token, util::entity_id(&id), value)
                })
                .await?
        }

        LightsCommand::Temperature { id, kelvin } => {
            dashboard
                .authorized::<Light, _>(|client, token| {
                    client.set_color_temperature(token, util::entity_id(&id), kelvin)
                })
                .await?
        }

        LightsCommand::Rename { id, name } => {
            dashboard
                .authorized::<Light, _>(|client, token| {
                    client.rename(token, util::entity_id(&id), name)
                })
                .await?
        }

        LightsCommand::On { id } => {
            dashboard
                .authorized::<Light, _>(|client, token| {
                    client.set_power(token, util::entity_id(&id), true)
                })
                .await?
        }

        LightsCommand::Off { id } => {
            dashboard
                .authorized::<Light, _>(|client, token| {
                    client.set_power(token, util::entity_id(&id), false)
                })
                .await?
        }
    };

    let out = output::render_single(
        &global.output,
        &light,
        |l| detail(l, color),
        |l| l.id.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
